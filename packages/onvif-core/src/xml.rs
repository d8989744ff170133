//! XML helpers shared by the SOAP codec and WS-Discovery parsing.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

// ─────────────────────────────────────────────────────────────────────────────
// XML Parsing Utilities
// ─────────────────────────────────────────────────────────────────────────────

/// Reads the text content of the element that `start` opened, consuming the
/// reader up to and including the matching end tag.
///
/// Entities are decoded and surrounding whitespace is trimmed. Returns `None`
/// if the element content is not well-formed.
pub fn read_element_text(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Option<String> {
    let raw = reader.read_text(start.name()).ok()?;
    let decoded = html_escape::decode_html_entities(&raw);
    Some(decoded.trim().to_string())
}

/// Extracts text content from the first occurrence of an XML element.
///
/// Searches for an element by its local name (ignoring namespace prefixes)
/// and returns its decoded, trimmed text content.
///
/// # Example
/// ```ignore
/// let xml = r#"<tt:Uri>rtsp://10.0.0.5/stream1</tt:Uri>"#;
/// assert_eq!(extract_xml_text(xml, "Uri"), Some("rtsp://10.0.0.5/stream1".to_string()));
/// ```
pub fn extract_xml_text(xml: &str, element_name: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    let target = element_name.as_bytes();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == target => {
                return read_element_text(&mut reader, &e);
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

/// Splits a whitespace-separated list value (`Types`, `Scopes`, `XAddrs`).
pub fn split_list(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// XML Encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Escapes the five XML special characters for embedding in content or
/// attribute values.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
