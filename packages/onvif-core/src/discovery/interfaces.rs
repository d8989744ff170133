//! Host network interface enumeration and selector resolution.
//!
//! Interfaces are re-read on every call; nothing is cached because links come
//! and go while a long-running process is alive.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use serde::Serialize;
use thiserror::Error;

/// Snapshot of one host interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInterface {
    pub name: String,
    pub addresses: Vec<IpAddr>,
    pub up: bool,
    pub multicast: bool,
}

impl NetworkInterface {
    /// Up and multicast-capable: eligible for discovery without a selector.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.up && self.multicast
    }

    /// First IPv4 address, used to bind the Probe socket.
    #[must_use]
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        self.addresses.iter().find_map(|addr| match addr {
            IpAddr::V4(v4) => Some(*v4),
            IpAddr::V6(_) => None,
        })
    }
}

impl fmt::Display for NetworkInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let addrs: Vec<String> = self.addresses.iter().map(ToString::to_string).collect();
        write!(f, "{} [{}]", self.name, addrs.join(", "))
    }
}

/// Errors from interface resolution.
#[derive(Debug, Error)]
pub enum InterfaceError {
    /// Selector matched neither an interface name nor a bound address.
    #[error("network interface '{selector}' not found; available: {available}")]
    NotFound { selector: String, available: String },
}

/// Convenient Result alias for interface resolution.
pub type InterfaceResult<T> = Result<T, InterfaceError>;

/// Source of interface snapshots.
pub trait InterfaceProvider: Send + Sync {
    fn interfaces(&self) -> Vec<NetworkInterface>;
}

/// Reads the host's interfaces through `pnet`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInterfaces;

impl InterfaceProvider for SystemInterfaces {
    fn interfaces(&self) -> Vec<NetworkInterface> {
        pnet::datalink::interfaces()
            .into_iter()
            .map(|iface| NetworkInterface {
                up: iface.is_up(),
                multicast: iface.is_multicast(),
                addresses: iface.ips.iter().map(|net| net.ip()).collect(),
                name: iface.name,
            })
            .collect()
    }
}

/// All host interfaces, whatever their state.
#[must_use]
pub fn list_interfaces() -> Vec<NetworkInterface> {
    SystemInterfaces.interfaces()
}

/// Human-readable list of interfaces for error messages.
#[must_use]
pub fn describe_interfaces(interfaces: &[NetworkInterface]) -> String {
    if interfaces.is_empty() {
        return "none".to_string();
    }
    interfaces
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolves `selector` to an interface: exact name first, then an IP
/// literal bound to the interface.
///
/// # Errors
/// [`InterfaceError::NotFound`] listing every interface present right now.
pub fn resolve(provider: &dyn InterfaceProvider, selector: &str) -> InterfaceResult<NetworkInterface> {
    let interfaces = provider.interfaces();

    if let Some(iface) = interfaces.iter().find(|i| i.name == selector) {
        return Ok(iface.clone());
    }

    if let Ok(ip) = selector.parse::<IpAddr>() {
        if let Some(iface) = interfaces.iter().find(|i| i.addresses.contains(&ip)) {
            return Ok(iface.clone());
        }
    }

    Err(InterfaceError::NotFound {
        selector: selector.to_string(),
        available: describe_interfaces(&interfaces),
    })
}
