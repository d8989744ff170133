//! Shared types for WS-Discovery.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use super::interfaces::InterfaceError;
use crate::protocol_constants::DISCOVERY_TIMEOUT_SECS;

/// A device that answered a Probe.
///
/// Identity is the endpoint reference; the same device seen on two
/// interfaces is one `Device`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// WS-Addressing endpoint reference, usually `urn:uuid:...`.
    pub endpoint_reference: String,
    /// Friendly name from the `onvif://www.onvif.org/name/` scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Model from the `onvif://www.onvif.org/hardware/` scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,
    pub types: Vec<String>,
    pub scopes: Vec<String>,
    /// Device service URLs.
    pub xaddrs: Vec<String>,
}

/// Per-call discovery options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverOptions {
    /// Interface name or an IP bound to it. `None` probes every usable
    /// interface.
    pub interface: Option<String>,
}

impl DiscoverOptions {
    pub fn on_interface(selector: impl Into<String>) -> Self {
        Self {
            interface: Some(selector.into()),
        }
    }
}

/// Timeout plus options, for callers that keep discovery settings together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Full collection window. Replies arriving after it are dropped.
    pub timeout: Duration,
    pub interface: Option<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DISCOVERY_TIMEOUT_SECS),
            interface: None,
        }
    }
}

impl DiscoveryConfig {
    #[must_use]
    pub fn options(&self) -> DiscoverOptions {
        DiscoverOptions {
            interface: self.interface.clone(),
        }
    }
}

/// Why probing failed on one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailureKind {
    /// Interface has no IPv4 address to bind to.
    NoIpv4Address,
    /// Socket creation, option setup or bind failed.
    SocketBind(String),
    /// The Probe datagram could not be sent.
    Send(String),
}

impl fmt::Display for ProbeFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoIpv4Address => write!(f, "no IPv4 address"),
            Self::SocketBind(msg) => write!(f, "socket bind failed: {}", msg),
            Self::Send(msg) => write!(f, "probe send failed: {}", msg),
        }
    }
}

/// A soft failure on one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceFailure {
    pub interface: String,
    pub kind: ProbeFailureKind,
}

impl fmt::Display for InterfaceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.interface, self.kind)
    }
}

/// Devices found plus the interfaces that could not be probed.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryReport {
    /// Sorted by endpoint reference.
    pub devices: Vec<Device>,
    pub failures: Vec<InterfaceFailure>,
}

fn join_failures(failures: &[InterfaceFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that end a discovery call.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// No interface is both up and multicast-capable.
    #[error("no usable network interfaces found (need up + multicast)")]
    NoInterfaces,

    /// The interface selector did not resolve.
    #[error(transparent)]
    Interface(#[from] InterfaceError),

    /// Every selected interface failed to bind or send.
    #[error("discovery failed on every interface: {}", join_failures(.0))]
    AllInterfacesFailed(Vec<InterfaceFailure>),

    /// The Probe message could not be built.
    #[error("failed to build Probe: {0}")]
    Probe(String),
}

/// Convenient Result alias for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;
