//! WS-Discovery Probe / ProbeMatches messages.

use percent_encoding::percent_decode_str;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::Serialize;
use uuid::Uuid;

use super::types::Device;
use crate::protocol_constants::{
    NETWORK_NS, ONVIF_HARDWARE_SCOPE, ONVIF_NAME_SCOPE, ONVIF_PROBE_TYPES, WS_ADDRESSING_NS,
    WS_DISCOVERY_NS, WS_DISCOVERY_PROBE_ACTION, WS_DISCOVERY_TO,
};
use crate::soap::{Envelope, SoapResult};
use crate::xml::{read_element_text, split_list};

// ─────────────────────────────────────────────────────────────────────────────
// Probe
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename = "d:Probe")]
struct ProbeBody<'a> {
    #[serde(rename = "d:Types")]
    types: &'a str,
}

/// Fresh `urn:uuid:` message identifier for one Probe.
#[must_use]
pub fn new_message_id() -> String {
    format!("urn:uuid:{}", Uuid::new_v4())
}

/// Builds a Probe for ONVIF network video transmitters.
///
/// # Errors
/// Only if the body fails to serialize.
pub fn build_probe(message_id: &str) -> SoapResult<String> {
    let mut envelope = Envelope::new(&ProbeBody {
        types: ONVIF_PROBE_TYPES,
    })?
    .with_namespace("a", WS_ADDRESSING_NS)
    .with_namespace("d", WS_DISCOVERY_NS)
    .with_namespace("dn", NETWORK_NS);

    envelope.push_header(format!(
        r#"<a:Action s:mustUnderstand="1">{}</a:Action>"#,
        WS_DISCOVERY_PROBE_ACTION
    ));
    envelope.push_header(format!("<a:MessageID>{}</a:MessageID>", message_id));
    envelope.push_header(format!(
        "<a:ReplyTo><a:Address>{}/role/anonymous</a:Address></a:ReplyTo>",
        WS_ADDRESSING_NS
    ));
    envelope.push_header(format!(r#"<a:To s:mustUnderstand="1">{}</a:To>"#, WS_DISCOVERY_TO));

    Ok(envelope.to_xml())
}

// ─────────────────────────────────────────────────────────────────────────────
// ProbeMatches
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct ProbeMatchBuilder {
    address: Option<String>,
    types: Vec<String>,
    scopes: Vec<String>,
    xaddrs: Vec<String>,
}

impl ProbeMatchBuilder {
    /// A match without an endpoint reference is dropped.
    fn build(self) -> Option<Device> {
        let endpoint_reference = self.address.filter(|a| !a.is_empty())?;
        Some(Device {
            name: scope_value(&self.scopes, ONVIF_NAME_SCOPE),
            hardware: scope_value(&self.scopes, ONVIF_HARDWARE_SCOPE),
            endpoint_reference,
            types: self.types,
            scopes: self.scopes,
            xaddrs: self.xaddrs,
        })
    }
}

/// Percent-decoded remainder of the first scope starting with `prefix`.
fn scope_value(scopes: &[String], prefix: &str) -> Option<String> {
    scopes
        .iter()
        .find_map(|s| s.strip_prefix(prefix))
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
        .filter(|v| !v.is_empty())
}

/// Parses a ProbeMatches datagram.
///
/// With `expected_relates_to` set, a message whose `RelatesTo` is present and
/// different is a reply to someone else's Probe and yields nothing.
/// Malformed XML yields whatever matches were complete before the error.
#[must_use]
pub fn parse_probe_matches(datagram: &[u8], expected_relates_to: Option<&str>) -> Vec<Device> {
    let text = String::from_utf8_lossy(datagram);
    let mut reader = Reader::from_str(&text);

    let mut relates_to: Option<String> = None;
    let mut devices = Vec::new();
    let mut current: Option<ProbeMatchBuilder> = None;
    let mut in_endpoint_reference = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"RelatesTo" => relates_to = read_element_text(&mut reader, &e),
                b"ProbeMatch" => current = Some(ProbeMatchBuilder::default()),
                b"EndpointReference" => in_endpoint_reference = true,
                b"Address" if in_endpoint_reference => {
                    let value = read_element_text(&mut reader, &e);
                    if let Some(m) = current.as_mut() {
                        m.address = value;
                    }
                }
                name @ (b"Types" | b"Scopes" | b"XAddrs") => {
                    let values = read_element_text(&mut reader, &e)
                        .map(|v| split_list(&v))
                        .unwrap_or_default();
                    if let Some(m) = current.as_mut() {
                        match name {
                            b"Types" => m.types = values,
                            b"Scopes" => m.scopes = values,
                            _ => m.xaddrs = values,
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"EndpointReference" => in_endpoint_reference = false,
                b"ProbeMatch" => {
                    if let Some(device) = current.take().and_then(ProbeMatchBuilder::build) {
                        devices.push(device);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                log::debug!("[WS-Discovery] Malformed ProbeMatches: {}", e);
                break;
            }
            _ => {}
        }
    }

    if let (Some(expected), Some(actual)) = (expected_relates_to, relates_to.as_deref()) {
        if expected != actual {
            log::trace!("[WS-Discovery] Ignoring reply to {} (expected {})", actual, expected);
            return Vec::new();
        }
    }

    devices
}
