//! Convert table exports into Django XML fixtures.
//!
//! A table arrives as two files: a CSV schema descriptor listing its columns,
//! and an XML export holding one `row` element per record, with the record's
//! values in attributes. This crate maps each record onto the schema and
//! writes the result in Django's fixture format:
//!
//! ```
//! use fixturize::{Schema, map, read_rows, to_string};
//!
//! let schema = Schema::from_csv_str("Table_name,column_name\nTags,Id (PK)\nTags,TagName\n")?;
//! let records = read_rows(r#"<tags><row Id="1" TagName="bug"/></tags>"#)?;
//! let dicts = map(&schema, &records, "sedbs")?;
//!
//! let xml = to_string(&dicts)?;
//! assert!(xml.contains(r#"<object model="sedbs.Tags" pk="1"><field name="TagName">bug</field></object>"#));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`pipeline`] wraps the same steps in directory-level plumbing: pairing
//! `<name>.csv` with `<name>.xml`, converting each pair and writing the
//! fixtures to an output directory.

#![warn(missing_docs)]

mod config;
mod error;
mod escaping;
mod mapper;
mod record;
mod rows;
mod schema;
mod serializer;

pub mod pipeline;

pub use config::{
    Config, ConfigError, DEFAULT_NAMESPACE, DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_DIR,
    validate_namespace,
};
pub use error::{MapError, MarkupError, MarkupErrorKind, SchemaError, SerializeError};
pub use mapper::map;
pub use record::{FieldValue, PK_ATTRIBUTE, RawRecord, RecordDict};
pub use rows::{ROW_TAG, read_rows, read_rows_tagged};
pub use schema::{PK_MARKER, Schema};
pub use serializer::{
    FixtureSerializer, SerializeOptions, to_string, to_string_with_options, to_vec,
    to_vec_with_options, to_writer,
};
