//! Fixed protocol constants that should NOT be changed.
//!
//! These values are defined by external specifications (SOAP, WS-Security,
//! WS-Addressing, WS-Discovery, ONVIF) and changing them would break protocol
//! compliance.

// ─────────────────────────────────────────────────────────────────────────────
// SOAP
// ─────────────────────────────────────────────────────────────────────────────

/// SOAP 1.2 envelope namespace (the version ONVIF devices speak).
pub const SOAP_ENVELOPE_NS: &str = "http://www.w3.org/2003/05/soap-envelope";

/// Content type for SOAP 1.2 requests.
pub const SOAP_CONTENT_TYPE: &str = "application/soap+xml; charset=utf-8";

/// Default timeout for a single SOAP exchange (seconds).
pub const SOAP_TIMEOUT_SECS: u64 = 30;

/// Path appended to bare host/IP endpoints.
pub const DEFAULT_DEVICE_SERVICE_PATH: &str = "/onvif/device_service";

// ─────────────────────────────────────────────────────────────────────────────
// WS-Security (UsernameToken Profile 1.0)
// ─────────────────────────────────────────────────────────────────────────────

pub const WSSE_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";

pub const WSU_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-utility-1.0.xsd";

pub const WSSE_PASSWORD_DIGEST_TYPE: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-username-token-profile-1.0#PasswordDigest";

pub const WSSE_BASE64_ENCODING: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-soap-message-security-1.0#Base64Binary";

/// Nonce length in bytes.
pub const WSSE_NONCE_LEN: usize = 16;

/// `wsu:Created` timestamp format (UTC, millisecond precision).
pub const WSSE_CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

// ─────────────────────────────────────────────────────────────────────────────
// ONVIF service namespaces
// ─────────────────────────────────────────────────────────────────────────────

pub const DEVICE_NS: &str = "http://www.onvif.org/ver10/device/wsdl";
pub const MEDIA_NS: &str = "http://www.onvif.org/ver10/media/wsdl";
pub const SCHEMA_NS: &str = "http://www.onvif.org/ver10/schema";
pub const NETWORK_NS: &str = "http://www.onvif.org/ver10/network/wsdl";

// ─────────────────────────────────────────────────────────────────────────────
// WS-Discovery (2005/04, as used by ONVIF)
// ─────────────────────────────────────────────────────────────────────────────

/// Standard WS-Discovery multicast group and port.
pub const DISCOVERY_MULTICAST_ADDR: &str = "239.255.255.250:3702";

pub const WS_ADDRESSING_NS: &str = "http://schemas.xmlsoap.org/ws/2004/08/addressing";
pub const WS_DISCOVERY_NS: &str = "http://schemas.xmlsoap.org/ws/2005/04/discovery";

/// `wsa:To` value for multicast Probe messages.
pub const WS_DISCOVERY_TO: &str = "urn:schemas-xmlsoap-org:ws:2005:04:discovery";

pub const WS_DISCOVERY_PROBE_ACTION: &str = "http://schemas.xmlsoap.org/ws/2005/04/discovery/Probe";

/// Device type probed for (ONVIF network video transmitters).
pub const ONVIF_PROBE_TYPES: &str = "dn:NetworkVideoTransmitter";

/// Scope prefixes that carry human-readable device identity.
pub const ONVIF_NAME_SCOPE: &str = "onvif://www.onvif.org/name/";
pub const ONVIF_HARDWARE_SCOPE: &str = "onvif://www.onvif.org/hardware/";

/// Multicast TTL for Probe messages (WS-Discovery recommends 1, ONVIF devices
/// are expected on the local link).
pub const DISCOVERY_MULTICAST_TTL: u32 = 1;

/// Receive buffer for ProbeMatches datagrams (bytes).
///
/// ProbeMatches with many scopes regularly exceed 4 KiB.
pub const DISCOVERY_RECV_BUFFER: usize = 64 * 1024;

/// Default discovery collection window (seconds).
pub const DISCOVERY_TIMEOUT_SECS: u64 = 5;
