//! Error types for the conversion core.
//!
//! Every failure a caller may want to branch on has its own type: a schema
//! that cannot describe a table, a record without a primary key, a data file
//! that is not well-formed XML, and a writer that refused bytes. All of them
//! render as [`miette`] diagnostics.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// The schema descriptor cannot be used to map records.
#[derive(Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum SchemaError {
    /// Fewer than two rows: there is no column row to take the entity name from.
    #[error("schema has {rows} row(s), expected a header row and at least one column row")]
    #[diagnostic(
        code(fixturize::schema::too_few_rows),
        help("the first row is a header; every following row describes one column")
    )]
    TooFewRows {
        /// Number of rows actually present.
        rows: usize,
    },

    /// A column row without a column name in its second field.
    #[error("schema row {row} has {fields} field(s), expected at least 2")]
    #[diagnostic(
        code(fixturize::schema::short_row),
        help("column rows look like `<label>,<column name>,...`")
    )]
    ShortRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Number of fields the row has.
        fields: usize,
    },

    /// The CSV layer failed (syntax, encoding, or I/O).
    #[error("failed to read schema CSV")]
    #[diagnostic(code(fixturize::schema::csv))]
    Csv(#[from] csv::Error),
}

/// A record could not be mapped onto the schema.
#[derive(Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum MapError {
    /// A required attribute (the primary key) is missing from a record.
    #[error("record #{index} has no `{attribute}` attribute")]
    #[diagnostic(
        code(fixturize::map::missing_attribute),
        help("every record element must carry an `Id` attribute holding its primary key")
    )]
    MissingAttribute {
        /// Zero-based position of the record in its source.
        index: usize,
        /// The attribute that was looked up.
        attribute: &'static str,
    },

    /// The schema itself is malformed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),
}

/// The data document is not well-formed.
#[derive(Error, Debug, Diagnostic)]
#[error("malformed markup at byte {offset}: {kind}")]
#[diagnostic(code(fixturize::markup))]
pub struct MarkupError {
    kind: MarkupErrorKind,
    offset: usize,
    #[source_code]
    src: NamedSource<String>,
    #[label("{kind}")]
    span: SourceSpan,
}

impl MarkupError {
    pub(crate) fn new(kind: MarkupErrorKind, offset: usize, input: &str) -> Self {
        let offset = offset.min(input.len());
        let len = usize::from(offset < input.len());
        Self {
            kind,
            offset,
            src: NamedSource::new("<input>", input.to_owned()),
            span: SourceSpan::from((offset, len)),
        }
    }

    /// Name the source in rendered diagnostics, usually with its file path.
    pub fn with_source_name(mut self, name: impl AsRef<str>) -> Self {
        self.src = NamedSource::new(name, self.src.inner().clone());
        self
    }

    /// Returns the error kind for detailed inspection.
    pub fn kind(&self) -> &MarkupErrorKind {
        &self.kind
    }

    /// Byte offset into the input where the problem was detected.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Detailed classification of [`MarkupError`]s.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MarkupErrorKind {
    /// The XML parser rejected the input.
    #[error("{0}")]
    Syntax(String),
    /// An attribute could not be read (bad quoting, duplicate name, bad escape).
    #[error("bad attribute: {0}")]
    Attribute(String),
    /// The document ended while this element was still open.
    #[error("element `{0}` is never closed")]
    UnclosedElement(String),
    /// The input holds no element at all.
    #[error("document has no root element")]
    NoDocumentElement,
    /// A second top-level element follows the document element.
    #[error("document has more than one root element")]
    MultipleDocumentElements,
}

/// Writing the fixture document failed.
#[derive(Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum SerializeError {
    /// The underlying writer returned an error.
    #[error("failed to write fixture output")]
    #[diagnostic(code(fixturize::serialize::io))]
    Io(#[from] std::io::Error),
}
