//! Converting table pairs and driving a whole run.

use camino::{Utf8Path, Utf8PathBuf};

use super::discover::{TablePair, discover};
use super::output::write_output;
use super::{ConvertError, RunError};
use crate::config::Config;
use crate::mapper::map;
use crate::rows::read_rows;
use crate::schema::Schema;
use crate::serializer::{SerializeOptions, to_vec_with_options};

/// Convert one schema file and one data file into fixture bytes.
pub fn convert_files(
    schema_path: &Utf8Path,
    data_path: &Utf8Path,
    namespace: &str,
    options: &SerializeOptions,
) -> Result<Vec<u8>, ConvertError> {
    // Validated up front so a bad schema is blamed on the CSV, not the data file.
    let schema = Schema::from_path(schema_path)
        .and_then(|schema| schema.validate().map(|()| schema))
        .map_err(|source| ConvertError::Schema {
            path: schema_path.to_owned(),
            source,
        })?;

    let xml = fs_err::read_to_string(data_path.as_std_path()).map_err(|source| {
        ConvertError::Io {
            path: data_path.to_owned(),
            source,
        }
    })?;
    let records = read_rows(&xml).map_err(|source| ConvertError::Markup {
        path: data_path.to_owned(),
        source: source.with_source_name(data_path),
    })?;

    let dicts = map(&schema, &records, namespace).map_err(|source| ConvertError::Map {
        path: data_path.to_owned(),
        source,
    })?;
    tracing::debug!(?dicts, "record dictionaries for {data_path}");

    Ok(to_vec_with_options(&dicts, options)?)
}

/// Convert a discovered pair.
pub fn convert_pair(
    pair: &TablePair,
    namespace: &str,
    options: &SerializeOptions,
) -> Result<Vec<u8>, ConvertError> {
    convert_files(pair.schema_path(), pair.data_path(), namespace, options)
}

/// Outcome of a successful [`run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Fixture files written, in conversion order.
    pub written: Vec<Utf8PathBuf>,
    /// Schema files skipped for lack of a data file.
    pub unpaired: Vec<Utf8PathBuf>,
}

/// Convert every table pair in the configured source directory.
///
/// Pairs are processed one at a time in file-name order. The first failure
/// stops the run: nothing is written for the failing pair or any pair after
/// it. Fixtures already written stay in place.
pub fn run(config: &Config) -> Result<RunReport, RunError> {
    config.validate()?;
    let discovery = discover(config.source_dir())?;
    let options = config.serialize_options();

    let mut report = RunReport {
        written: Vec::with_capacity(discovery.pairs.len()),
        unpaired: discovery.unpaired,
    };
    for pair in &discovery.pairs {
        let bytes = convert_pair(pair, &config.namespace, &options)?;
        let path = write_output(config.output_dir(), &pair.output_file_name(), &bytes)?;
        tracing::info!(output = %path, "done converting {}", pair.data_path());
        report.written.push(path);
    }
    Ok(report)
}
