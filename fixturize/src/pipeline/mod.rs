//! File-level plumbing around the core: finding table pairs, converting them,
//! and writing the fixtures out.

mod convert;
mod discover;
mod output;

pub use convert::{RunReport, convert_files, convert_pair, run};
pub use discover::{Discovery, TablePair, discover};
pub use output::write_output;

use camino::{Utf8Path, Utf8PathBuf};
use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::error::{MapError, MarkupError, SchemaError, SerializeError};

/// Scanning the source directory failed.
#[derive(Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum DiscoverError {
    /// The directory holds no `<name>.csv` with a matching `<name>.xml`.
    #[error("no table pairs found in `{dir}`")]
    #[diagnostic(
        code(fixturize::discover::no_pairs),
        help("each table needs a `<name>.csv` schema next to a `<name>.xml` data file")
    )]
    NoPairs {
        /// The directory that was scanned.
        dir: Utf8PathBuf,
    },

    /// The directory could not be listed.
    #[error("failed to scan source directory")]
    #[diagnostic(code(fixturize::discover::io))]
    Io(#[from] std::io::Error),
}

/// Writing a fixture file failed.
#[derive(Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum OutputError {
    /// Creating the output directory or writing the file failed.
    #[error("failed to write fixture")]
    #[diagnostic(code(fixturize::output::io))]
    Io(#[from] std::io::Error),
}

/// Converting one table pair failed.
#[derive(Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum ConvertError {
    /// The data file could not be read.
    #[error("failed to read `{path}`")]
    #[diagnostic(code(fixturize::convert::io))]
    Io {
        /// The file that failed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The schema file is unreadable or malformed.
    #[error("malformed schema `{path}`")]
    #[diagnostic(code(fixturize::convert::schema))]
    Schema {
        /// The schema file.
        path: Utf8PathBuf,
        /// What is wrong with it.
        #[source]
        #[diagnostic_source]
        source: SchemaError,
    },

    /// The data file is not well-formed XML.
    #[error("malformed data file `{path}`")]
    #[diagnostic(code(fixturize::convert::markup))]
    Markup {
        /// The data file.
        path: Utf8PathBuf,
        /// Where and how parsing failed.
        #[source]
        #[diagnostic_source]
        source: MarkupError,
    },

    /// A record in the data file does not fit the schema.
    #[error("cannot map records in `{path}`")]
    #[diagnostic(code(fixturize::convert::map))]
    Map {
        /// The data file.
        path: Utf8PathBuf,
        /// The offending record.
        #[source]
        #[diagnostic_source]
        source: MapError,
    },

    /// Writing the fixture bytes failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Serialize(#[from] SerializeError),
}

impl ConvertError {
    /// The input file the failure is attributed to, if any.
    pub fn path(&self) -> Option<&Utf8Path> {
        match self {
            ConvertError::Io { path, .. }
            | ConvertError::Schema { path, .. }
            | ConvertError::Markup { path, .. }
            | ConvertError::Map { path, .. } => Some(path.as_path()),
            ConvertError::Serialize(_) => None,
        }
    }
}

/// A conversion run stopped.
#[derive(Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum RunError {
    /// The configuration was rejected before any file was touched.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// Scanning the source directory failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Discover(#[from] DiscoverError),

    /// A table pair failed to convert.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Convert(#[from] ConvertError),

    /// A fixture could not be written.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Output(#[from] OutputError),
}
