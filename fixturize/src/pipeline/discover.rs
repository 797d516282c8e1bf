//! Pairing schema files with data files in a source directory.

use std::collections::BTreeSet;

use camino::{Utf8Path, Utf8PathBuf};

use super::DiscoverError;

const SCHEMA_EXTENSION: &str = ".csv";
const DATA_EXTENSION: &str = ".xml";

/// A schema file and the data file with the same stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePair {
    name: String,
    schema: Utf8PathBuf,
    data: Utf8PathBuf,
}

impl TablePair {
    /// Pair `<dir>/<name>.csv` with `<dir>/<name>.xml`.
    pub fn new(dir: &Utf8Path, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            schema: dir.join(format!("{name}{SCHEMA_EXTENSION}")),
            data: dir.join(format!("{name}{DATA_EXTENSION}")),
            name,
        }
    }

    /// The shared file stem, usually the table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The CSV schema descriptor.
    pub fn schema_path(&self) -> &Utf8Path {
        &self.schema
    }

    /// The XML data export.
    pub fn data_path(&self) -> &Utf8Path {
        &self.data
    }

    /// The fixture keeps the data file's name.
    pub fn output_file_name(&self) -> String {
        format!("{}{DATA_EXTENSION}", self.name)
    }
}

/// What a directory scan found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Complete pairs, ordered by schema file name.
    pub pairs: Vec<TablePair>,
    /// Schema files with no matching data file.
    pub unpaired: Vec<Utf8PathBuf>,
}

/// Scan `source_dir` (not recursively) for table pairs.
///
/// Finding no pair at all is an error; schema files without a data file are
/// reported in [`Discovery::unpaired`] and otherwise skipped.
pub fn discover(source_dir: &Utf8Path) -> Result<Discovery, DiscoverError> {
    let mut files = BTreeSet::new();
    for entry in fs_err::read_dir(source_dir.as_std_path())? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => {
                files.insert(name);
            }
            Err(name) => tracing::warn!(?name, "skipping file with a non UTF-8 name"),
        }
    }

    let mut discovery = Discovery::default();
    for file in &files {
        let Some(stem) = file.strip_suffix(SCHEMA_EXTENSION) else {
            continue;
        };
        if files.contains(&format!("{stem}{DATA_EXTENSION}")) {
            discovery.pairs.push(TablePair::new(source_dir, stem));
        } else {
            tracing::warn!("no corresponding xml file found for `{file}`, skipping");
            discovery.unpaired.push(source_dir.join(file));
        }
    }

    if discovery.pairs.is_empty() {
        return Err(DiscoverError::NoPairs {
            dir: source_dir.to_owned(),
        });
    }

    tracing::debug!(
        pairs = discovery.pairs.len(),
        unpaired = discovery.unpaired.len(),
        "discovered table pairs in {source_dir}"
    );
    Ok(discovery)
}
