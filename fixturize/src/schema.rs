//! Schema descriptors: the CSV side of a table pair.

use std::io::Read;

use camino::Utf8Path;

use crate::error::SchemaError;

/// Column name that marks the primary-key column.
///
/// The key is emitted as the `pk` attribute of each object, so this column
/// never becomes a `field`.
pub const PK_MARKER: &str = "Id (PK)";

/// Ordered rows describing one table.
///
/// Row 0 is a header row. Every following row describes one column: field 0
/// is a label and field 1 is the canonical column name, which is matched
/// against record attribute names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    rows: Vec<Vec<String>>,
}

impl Schema {
    /// Build a schema from in-memory rows. No validation happens here; see
    /// [`Schema::validate`].
    pub fn from_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Read every CSV record from `reader`. Rows may have differing lengths
    /// and the first row is kept as data, not treated as a header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SchemaError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_owned).collect());
        }
        tracing::trace!(rows = rows.len(), "read schema rows");
        Ok(Self { rows })
    }

    /// Parse CSV text.
    pub fn from_csv_str(input: &str) -> Result<Self, SchemaError> {
        Self::from_reader(input.as_bytes())
    }

    /// Read a CSV file.
    pub fn from_path(path: &Utf8Path) -> Result<Self, SchemaError> {
        let file = fs_err::File::open(path.as_std_path()).map_err(csv::Error::from)?;
        Self::from_reader(file)
    }

    /// All rows, header included.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Check the shape the mapper relies on: a header row plus at least one
    /// column row, and two fields on every column row.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.rows.len() < 2 {
            return Err(SchemaError::TooFewRows {
                rows: self.rows.len(),
            });
        }
        for (row, fields) in self.rows.iter().enumerate().skip(1) {
            if fields.len() < 2 {
                return Err(SchemaError::ShortRow {
                    row,
                    fields: fields.len(),
                });
            }
        }
        Ok(())
    }

    /// The entity name used in model labels.
    ///
    /// This is the first field of the *second* row (the first column row),
    /// not the header row.
    pub fn entity_name(&self) -> Result<&str, SchemaError> {
        self.validate()?;
        Ok(&self.rows[1][0])
    }

    /// Column names in schema order, the primary-key marker included.
    pub fn column_names(&self) -> Result<impl Iterator<Item = &str>, SchemaError> {
        self.validate()?;
        Ok(self.rows[1..].iter().map(|row| row[1].as_str()))
    }
}
