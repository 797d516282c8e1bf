//! Reading record elements out of an XML data export.
//!
//! The whole document is read with quick-xml's event reader. Every element
//! with the record tag that sits anywhere below the document element becomes
//! one [`RawRecord`] built from its attributes; text, comments and all other
//! elements are ignored. The document must still be well-formed as a whole.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use crate::error::{MarkupError, MarkupErrorKind};
use crate::escaping::normalize_attribute;
use crate::record::RawRecord;

/// Tag of the elements that hold one record each.
pub const ROW_TAG: &str = "row";

/// Read every `row` element below the document element, in document order.
pub fn read_rows(input: &str) -> Result<Vec<RawRecord>, MarkupError> {
    read_rows_tagged(input, ROW_TAG)
}

/// Like [`read_rows`], for records stored under a different element name.
pub fn read_rows_tagged(input: &str, tag: &str) -> Result<Vec<RawRecord>, MarkupError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut open: Vec<(String, usize)> = Vec::new();
    let mut seen_root = false;
    let mut rows = Vec::new();

    loop {
        let offset = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| {
            MarkupError::new(
                MarkupErrorKind::Syntax(e.to_string()),
                reader.error_position() as usize,
                input,
            )
        })?;

        match event {
            Event::Start(_) | Event::Empty(_) if open.is_empty() && seen_root => {
                return Err(MarkupError::new(
                    MarkupErrorKind::MultipleDocumentElements,
                    offset,
                    input,
                ));
            }
            Event::Start(e) => {
                if !open.is_empty() && e.name().as_ref() == tag.as_bytes() {
                    rows.push(collect_attributes(&e, offset, input)?);
                }
                seen_root = true;
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                open.push((name, offset));
            }
            Event::Empty(e) => {
                if !open.is_empty() && e.name().as_ref() == tag.as_bytes() {
                    rows.push(collect_attributes(&e, offset, input)?);
                }
                seen_root = true;
            }
            Event::End(_) => {
                open.pop();
            }
            Event::Text(e) if open.is_empty() => {
                if !e.iter().all(u8::is_ascii_whitespace) {
                    return Err(MarkupError::new(
                        MarkupErrorKind::Syntax("text outside the root element".into()),
                        offset,
                        input,
                    ));
                }
            }
            Event::GeneralRef(_) | Event::CData(_) if open.is_empty() => {
                return Err(MarkupError::new(
                    MarkupErrorKind::Syntax("content outside the root element".into()),
                    offset,
                    input,
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((name, offset)) = open.pop() {
        return Err(MarkupError::new(
            MarkupErrorKind::UnclosedElement(name),
            offset,
            input,
        ));
    }
    if !seen_root {
        return Err(MarkupError::new(
            MarkupErrorKind::NoDocumentElement,
            input.len(),
            input,
        ));
    }

    tracing::trace!(tag, rows = rows.len(), "read record elements");
    Ok(rows)
}

fn collect_attributes(
    e: &BytesStart<'_>,
    offset: usize,
    input: &str,
) -> Result<RawRecord, MarkupError> {
    let attribute_error =
        |message: String| MarkupError::new(MarkupErrorKind::Attribute(message), offset, input);

    let mut record = RawRecord::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| attribute_error(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = std::str::from_utf8(&attr.value).map_err(|e| attribute_error(e.to_string()))?;
        let normalized = normalize_attribute(raw);
        let value = unescape(&normalized)
            .map_err(|e| attribute_error(e.to_string()))?
            .into_owned();
        record.insert(key, value);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_self_closing_rows() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<tags>
  <row Id="1" TagName="bug" Count="12" />
  <row Id="2" TagName="feature" />
</tags>"#;
        let rows = read_rows(xml).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get_attr("Id"), Some("1"));
        assert_eq!(rows[0].get_attr("Count"), Some("12"));
        assert_eq!(rows[1].get_attr("TagName"), Some("feature"));
        assert_eq!(rows[1].get_attr("Count"), None);
    }

    #[test]
    fn reads_nested_rows_with_content() {
        let xml = r#"<export><table><row Id="1">ignored text</row></table><row Id="2"/></export>"#;
        let rows = read_rows(xml).unwrap();

        let ids: Vec<_> = rows.iter().map(|r| r.get_attr("Id").unwrap()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn document_element_is_not_a_record() {
        let rows = read_rows(r#"<row Id="0"><row Id="1"/></row>"#).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_attr("Id"), Some("1"));
    }

    #[test]
    fn attribute_values_are_unescaped() {
        let rows = read_rows(r#"<t><row Id="1" Body="a &lt;b&gt; &amp; &quot;c&quot;"/></t>"#)
            .unwrap();
        assert_eq!(rows[0].get_attr("Body"), Some(r#"a <b> & "c""#));
    }

    #[test]
    fn literal_whitespace_in_attributes_is_normalized() {
        let rows = read_rows("<t><row Id=\"1\" A=\"a\nb\" B=\"c\td\r\ne\"/></t>").unwrap();
        assert_eq!(rows[0].get_attr("A"), Some("a b"));
        assert_eq!(rows[0].get_attr("B"), Some("c d e"));
    }

    #[test]
    fn character_references_survive_normalization() {
        let rows = read_rows(r#"<t><row Id="1" A="a&#10;b&#09;c"/></t>"#).unwrap();
        assert_eq!(rows[0].get_attr("A"), Some("a\nb\tc"));
    }

    #[test]
    fn custom_record_tag() {
        let rows = read_rows_tagged(r#"<t><item Id="1"/><row Id="2"/></t>"#, "item").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_attr("Id"), Some("1"));
    }

    #[test]
    fn empty_document_element_has_no_rows() {
        assert!(read_rows("<tags/>").unwrap().is_empty());
    }

    #[test]
    fn mismatched_tags_are_rejected() {
        let err = read_rows(r#"<tags><row Id="1"></tags>"#).unwrap_err();
        assert!(matches!(err.kind(), MarkupErrorKind::Syntax(_)));
    }

    #[test]
    fn unclosed_document_is_rejected() {
        assert!(read_rows(r#"<tags><row Id="1"/>"#).is_err());
    }

    #[test]
    fn duplicate_attributes_are_rejected() {
        let err = read_rows(r#"<tags><row Id="1" Id="2"/></tags>"#).unwrap_err();
        assert!(matches!(err.kind(), MarkupErrorKind::Attribute(_)));
        assert_eq!(err.offset(), 6);
    }

    #[test]
    fn second_root_is_rejected() {
        let err = read_rows("<a/><b/>").unwrap_err();
        assert_eq!(err.kind(), &MarkupErrorKind::MultipleDocumentElements);
        assert_eq!(err.offset(), 4);
    }

    #[test]
    fn content_after_the_root_is_rejected() {
        for input in [
            r#"<t><row Id="1"/></t>&amp;"#,
            r#"<t><row Id="1"/></t><![CDATA[x]]>"#,
            r#"<t><row Id="1"/></t>tail"#,
        ] {
            let err = read_rows(input).unwrap_err();
            assert!(matches!(err.kind(), MarkupErrorKind::Syntax(_)), "{input}");
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = read_rows("  ").unwrap_err();
        assert_eq!(err.kind(), &MarkupErrorKind::NoDocumentElement);
    }
}
