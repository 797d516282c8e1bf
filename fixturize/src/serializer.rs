//! Django XML fixture serialization.
//!
//! Output shape:
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <django-objects>
//!   <object model="app.Model" pk="1">
//!     <field name="column">value</field>
//!   </object>
//! </django-objects>
//! ```
//!
//! Absent values produce no `field` element at all. Text escaping is left to
//! quick-xml's writer. Attribute values are escaped here, with tabs and line
//! breaks written as character references so they survive a parse.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::SerializeError;
use crate::escaping::escape_attribute;
use crate::record::RecordDict;

const ROOT_TAG: &str = "django-objects";
const OBJECT_TAG: &str = "object";
const FIELD_TAG: &str = "field";

/// Options for fixture serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Whether to pretty-print with indentation (default: false)
    pub pretty: bool,
    /// Spaces per nesting level when pretty-printing (default: 2)
    pub indent_size: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent_size: 2,
        }
    }
}

impl SerializeOptions {
    /// Create new default options (compact output).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty-printing with default indentation.
    pub const fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Set the indentation width (implies pretty-printing).
    pub const fn indent(mut self, size: usize) -> Self {
        self.indent_size = size;
        self.pretty = true;
        self
    }
}

/// Streams records into a fixture document.
///
/// The XML declaration and the root element are written with the first
/// record; [`FixtureSerializer::finish`] closes the document and hands the
/// writer back.
pub struct FixtureSerializer<W: Write> {
    writer: Writer<W>,
    pretty: bool,
    started: bool,
}

impl<W: Write> FixtureSerializer<W> {
    /// Create a serializer with default (compact) options.
    pub fn new(out: W) -> Self {
        Self::with_options(out, &SerializeOptions::default())
    }

    /// Create a serializer with the given options.
    pub fn with_options(out: W, options: &SerializeOptions) -> Self {
        let writer = if options.pretty {
            Writer::new_with_indent(out, b' ', options.indent_size)
        } else {
            Writer::new(out)
        };
        Self {
            writer,
            pretty: options.pretty,
            started: false,
        }
    }

    fn write_declaration(&mut self) -> io::Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        // The indenting writer breaks the line before the root by itself.
        if !self.pretty {
            self.writer.get_mut().write_all(b"\n")?;
        }
        Ok(())
    }

    fn start(&mut self) -> io::Result<()> {
        if !self.started {
            self.write_declaration()?;
            self.writer
                .write_event(Event::Start(BytesStart::new(ROOT_TAG)))?;
            self.started = true;
        }
        Ok(())
    }

    /// Write one `object` element.
    pub fn serialize_record(&mut self, record: &RecordDict) -> Result<(), SerializeError> {
        self.start()?;

        let model = escape_attribute(&record.model);
        let pk = escape_attribute(&record.pk);
        let object = BytesStart::new(OBJECT_TAG).with_attributes([
            ("model".as_bytes(), model.as_bytes()),
            ("pk".as_bytes(), pk.as_bytes()),
        ]);

        let mut fields = record.present_fields().peekable();
        if fields.peek().is_none() {
            self.writer.write_event(Event::Empty(object))?;
            return Ok(());
        }

        self.writer.write_event(Event::Start(object))?;
        for (name, value) in fields {
            let name = escape_attribute(name);
            let field = BytesStart::new(FIELD_TAG)
                .with_attributes([("name".as_bytes(), name.as_bytes())]);
            self.writer.write_event(Event::Start(field))?;
            self.writer.write_event(Event::Text(BytesText::new(value)))?;
            self.writer
                .write_event(Event::End(BytesEnd::new(FIELD_TAG)))?;
        }
        self.writer
            .write_event(Event::End(BytesEnd::new(OBJECT_TAG)))?;
        Ok(())
    }

    /// Close the document and return the underlying writer.
    ///
    /// A serializer that never saw a record still produces a complete,
    /// empty document.
    pub fn finish(mut self) -> Result<W, SerializeError> {
        if self.started {
            self.writer
                .write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;
        } else {
            self.write_declaration()?;
            self.writer
                .write_event(Event::Empty(BytesStart::new(ROOT_TAG)))?;
        }
        Ok(self.writer.into_inner())
    }
}

/// Serialize records into a writer.
pub fn to_writer<W: Write>(
    out: W,
    records: &[RecordDict],
    options: &SerializeOptions,
) -> Result<W, SerializeError> {
    let mut serializer = FixtureSerializer::with_options(out, options);
    for record in records {
        serializer.serialize_record(record)?;
    }
    serializer.finish()
}

/// Serialize records into UTF-8 bytes with default options.
pub fn to_vec(records: &[RecordDict]) -> Result<Vec<u8>, SerializeError> {
    to_vec_with_options(records, &SerializeOptions::default())
}

/// Serialize records into UTF-8 bytes with custom options.
pub fn to_vec_with_options(
    records: &[RecordDict],
    options: &SerializeOptions,
) -> Result<Vec<u8>, SerializeError> {
    to_writer(Vec::new(), records, options)
}

/// Serialize records into a string with default options.
pub fn to_string(records: &[RecordDict]) -> Result<String, SerializeError> {
    to_string_with_options(records, &SerializeOptions::default())
}

/// Serialize records into a string with custom options.
pub fn to_string_with_options(
    records: &[RecordDict],
    options: &SerializeOptions,
) -> Result<String, SerializeError> {
    let bytes = to_vec_with_options(records, options)?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;

    const DECL: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

    #[test]
    fn single_object_compact() {
        let records = [RecordDict::new("sedbs.Tags", "1").with_field("TagName", "bug")];
        let xml = to_string(&records).unwrap();

        assert_eq!(
            xml,
            format!(
                "{DECL}<django-objects><object model=\"sedbs.Tags\" pk=\"1\">\
                 <field name=\"TagName\">bug</field></object></django-objects>"
            )
        );
    }

    #[test]
    fn absent_fields_are_not_written() {
        let records = [RecordDict::new("a.B", "1")
            .with_field("Gone", FieldValue::Absent)
            .with_field("Kept", "x")];
        let xml = to_string(&records).unwrap();

        assert!(!xml.contains("Gone"));
        assert!(xml.contains("<field name=\"Kept\">x</field>"));
    }

    #[test]
    fn empty_text_is_written_as_empty_field() {
        let records = [RecordDict::new("a.B", "1").with_field("Note", "")];
        let xml = to_string(&records).unwrap();
        assert!(xml.contains("<field name=\"Note\"></field>"));
    }

    #[test]
    fn object_without_fields_is_self_closing() {
        let records = [RecordDict::new("a.B", "1").with_field("Gone", FieldValue::Absent)];
        let xml = to_string(&records).unwrap();
        assert_eq!(
            xml,
            format!("{DECL}<django-objects><object model=\"a.B\" pk=\"1\"/></django-objects>")
        );
    }

    #[test]
    fn no_records_is_an_empty_document() {
        assert_eq!(to_string(&[]).unwrap(), format!("{DECL}<django-objects/>"));
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let records = [RecordDict::new("a.B", "x\"y").with_field("Body", "a < b & c")];
        let xml = to_string(&records).unwrap();

        assert!(xml.contains("pk=\"x&quot;y\""));
        assert!(xml.contains(">a &lt; b &amp; c</field>"));
    }

    #[test]
    fn attribute_whitespace_is_written_as_references() {
        let records = [RecordDict::new("a.B", "x\ny\tz\r").with_field("multi\nline", "v")];
        let xml = to_string(&records).unwrap();

        assert!(xml.contains(r#"pk="x&#10;y&#09;z&#13;""#));
        assert!(xml.contains(r#"<field name="multi&#10;line">v</field>"#));
        assert!(!xml.contains('\t'));
    }

    #[test]
    fn written_attributes_read_back_unchanged() {
        let records = [RecordDict::new("a.B", "x\ny\tz").with_field("Note", "n")];
        let xml = to_string(&records).unwrap();

        let objects = crate::rows::read_rows_tagged(&xml, "object").unwrap();
        assert_eq!(objects[0].get_attr("pk"), Some("x\ny\tz"));
    }

    #[test]
    fn pretty_output_indents_elements() {
        let records = [RecordDict::new("sedbs.Tags", "1").with_field("TagName", "bug")];
        let xml = to_string_with_options(&records, &SerializeOptions::new().pretty()).unwrap();

        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <django-objects>\n  \
             <object model=\"sedbs.Tags\" pk=\"1\">\n    \
             <field name=\"TagName\">bug</field>\n  \
             </object>\n\
             </django-objects>"
        );
    }

    #[test]
    fn writer_errors_surface() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("disk on fire"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let result = to_writer(Broken, &[RecordDict::new("a.B", "1")], &SerializeOptions::new());
        assert!(matches!(result, Err(SerializeError::Io(_))));
    }
}
