//! SOAP 1.2 envelope codec.
//!
//! The codec carries no per-operation knowledge. A request type describes
//! its own root element and namespace bindings through serde attributes:
//!
//! ```ignore
//! #[derive(Serialize)]
//! #[serde(rename = "tds:GetDeviceInformation")]
//! struct GetDeviceInformation {
//!     #[serde(rename = "@xmlns:tds")]
//!     xmlns: &'static str,
//! }
//! ```
//!
//! Decoding inspects the first child of `Body`. A `Fault` always becomes
//! [`SoapError::Fault`], whatever the caller asked for; anything else is
//! deserialized into the caller's type by field name (namespace prefixes are
//! ignored).

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{SoapError, SoapFault, SoapResult};
use crate::protocol_constants::SOAP_ENVELOPE_NS;
use crate::xml::{escape_xml, read_element_text};

// ─────────────────────────────────────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────────────────────────────────────

/// An outgoing SOAP envelope, built fresh for each call.
#[derive(Debug, Clone)]
pub struct Envelope {
    namespaces: Vec<(String, String)>,
    headers: Vec<String>,
    body: String,
}

impl Envelope {
    /// Serializes `request` as the single child of `Body`.
    ///
    /// # Errors
    /// Returns [`SoapError::Encode`] if the value cannot be represented as XML
    /// (for example a root name that is not a valid XML name).
    pub fn new<T: Serialize>(request: &T) -> SoapResult<Self> {
        let body =
            quick_xml::se::to_string(request).map_err(|e| SoapError::Encode(e.to_string()))?;
        Ok(Self {
            namespaces: Vec::new(),
            headers: Vec::new(),
            body,
        })
    }

    /// Declares an additional namespace binding on the `Envelope` element.
    #[must_use]
    pub fn with_namespace(mut self, prefix: &str, uri: &str) -> Self {
        self.namespaces.push((prefix.to_string(), uri.to_string()));
        self
    }

    /// Appends a pre-rendered block to `Header`.
    pub fn push_header(&mut self, block: String) {
        self.headers.push(block);
    }

    #[must_use]
    pub fn has_header(&self) -> bool {
        !self.headers.is_empty()
    }

    /// The serialized body payload.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Renders the full envelope.
    ///
    /// Output is a single line with no whitespace before the root element;
    /// some embedded SOAP stacks reject anything else.
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><s:Envelope xmlns:s="{}""#,
            SOAP_ENVELOPE_NS
        );
        for (prefix, uri) in &self.namespaces {
            xml.push_str(&format!(r#" xmlns:{}="{}""#, prefix, escape_xml(uri)));
        }
        xml.push('>');

        if !self.headers.is_empty() {
            xml.push_str("<s:Header>");
            for block in &self.headers {
                xml.push_str(block);
            }
            xml.push_str("</s:Header>");
        }

        xml.push_str("<s:Body>");
        xml.push_str(&self.body);
        xml.push_str("</s:Body></s:Envelope>");
        xml
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoding
// ─────────────────────────────────────────────────────────────────────────────

/// What the `Body` element of a response holds.
#[derive(Debug, PartialEq, Eq)]
enum BodyPayload<'a> {
    /// Raw XML of a `Fault` element.
    Fault(&'a str),
    /// Raw XML of the first non-Fault child element.
    Element(&'a str),
    /// `Body` has no child element.
    Empty,
}

fn decode_error(err: impl std::fmt::Display) -> SoapError {
    SoapError::Decode(err.to_string())
}

/// Finds the first child of `Envelope/Body` and returns its raw XML.
///
/// `Header` and any other envelope children are skipped unparsed.
fn locate_body_payload(xml: &str) -> SoapResult<BodyPayload<'_>> {
    let mut reader = Reader::from_str(xml);
    let mut seen_envelope = false;
    let mut in_body = false;

    loop {
        // Text is not trimmed, so this is exactly where the next tag starts.
        let start_pos = reader.buffer_position() as usize;
        match reader.read_event().map_err(decode_error)? {
            Event::Start(e) if in_body => {
                let is_fault = e.local_name().as_ref() == b"Fault";
                reader.read_to_end(e.name()).map_err(decode_error)?;
                let fragment = &xml[start_pos..reader.buffer_position() as usize];
                return Ok(if is_fault {
                    BodyPayload::Fault(fragment)
                } else {
                    BodyPayload::Element(fragment)
                });
            }
            Event::Empty(e) if in_body => {
                let fragment = &xml[start_pos..reader.buffer_position() as usize];
                return Ok(if e.local_name().as_ref() == b"Fault" {
                    BodyPayload::Fault(fragment)
                } else {
                    BodyPayload::Element(fragment)
                });
            }
            Event::End(_) if in_body => return Ok(BodyPayload::Empty),
            Event::Start(e) | Event::Empty(e) if !seen_envelope => {
                if e.local_name().as_ref() != b"Envelope" {
                    return Err(SoapError::Decode(format!(
                        "root element <{}> is not a SOAP Envelope",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                seen_envelope = true;
            }
            Event::Start(e) => {
                if e.local_name().as_ref() == b"Body" {
                    in_body = true;
                } else {
                    reader.read_to_end(e.name()).map_err(decode_error)?;
                }
            }
            Event::Empty(e) if e.local_name().as_ref() == b"Body" => {
                return Ok(BodyPayload::Empty);
            }
            Event::Eof => {
                return Err(SoapError::Decode(if seen_envelope {
                    "SOAP envelope has no Body".to_string()
                } else {
                    "response is not a SOAP envelope".to_string()
                }));
            }
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum FaultField {
    Code,
    Subcode,
    Reason,
}

/// Parses a SOAP 1.2 (`Code`/`Reason`) or SOAP 1.1 (`faultcode`/`faultstring`)
/// Fault element.
fn parse_fault(fragment: &str) -> SoapFault {
    let mut reader = Reader::from_str(fragment);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut fault = SoapFault::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let local = e.local_name().as_ref().to_vec();
                let field = match (path.last().map(Vec::as_slice), local.as_slice()) {
                    (Some(b"Code"), b"Value") | (_, b"faultcode") => Some(FaultField::Code),
                    (Some(b"Subcode"), b"Value") => Some(FaultField::Subcode),
                    (Some(b"Reason"), b"Text") | (_, b"faultstring") => Some(FaultField::Reason),
                    _ => None,
                };
                let Some(field) = field else {
                    path.push(local);
                    continue;
                };
                let text = read_element_text(&mut reader, &e).unwrap_or_default();
                match field {
                    FaultField::Code => fault.code = text,
                    // Only the outermost subcode is kept.
                    FaultField::Subcode if fault.subcode.is_none() && !text.is_empty() => {
                        fault.subcode = Some(text);
                    }
                    FaultField::Reason if fault.reason.is_empty() => fault.reason = text,
                    _ => {}
                }
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::debug!("[SOAP] Malformed fault body: {}", e);
                break;
            }
            _ => {}
        }
    }

    if fault.reason.is_empty() {
        fault.reason = "Unknown SOAP fault".to_string();
    }
    fault
}

/// Decodes a response envelope into `T`.
///
/// # Errors
/// - [`SoapError::Fault`] if the body is a SOAP Fault, regardless of `T`
/// - [`SoapError::Decode`] if the document is not an envelope, the body is
///   empty, or the payload does not fit `T`
pub fn decode_envelope<T: DeserializeOwned>(xml: &str) -> SoapResult<T> {
    match locate_body_payload(xml)? {
        BodyPayload::Fault(fragment) => Err(SoapError::Fault(parse_fault(fragment))),
        BodyPayload::Element(fragment) => quick_xml::de::from_str(fragment).map_err(decode_error),
        BodyPayload::Empty => Err(SoapError::Decode("SOAP Body is empty".to_string())),
    }
}

/// Decodes a response envelope for an operation with no result.
///
/// Any non-Fault body is accepted, including an empty one.
///
/// # Errors
/// [`SoapError::Fault`] for a Fault body, [`SoapError::Decode`] if the
/// document is not a SOAP envelope at all.
pub fn decode_void(xml: &str) -> SoapResult<()> {
    match locate_body_payload(xml)? {
        BodyPayload::Fault(fragment) => Err(SoapError::Fault(parse_fault(fragment))),
        BodyPayload::Element(_) | BodyPayload::Empty => Ok(()),
    }
}
