//! WS-Discovery of ONVIF devices.
//!
//! # Module Structure
//!
//! - `types` - Device, options, report and error types
//! - `interfaces` - Host interface enumeration and selector resolution
//! - `probe` - Probe message construction and ProbeMatches parsing
//! - `socket` - Per-interface UDP sockets behind a factory trait
//! - `engine` - `Discoverer`: fan-out, collection window and merge

mod engine;
pub mod interfaces;
pub mod probe;
pub mod socket;
mod types;

use std::time::Duration;

use tokio_util::sync::CancellationToken;

pub use engine::Discoverer;
pub use interfaces::{
    list_interfaces, resolve, InterfaceError, InterfaceProvider, InterfaceResult, NetworkInterface,
    SystemInterfaces,
};
pub use socket::{MulticastSocketFactory, ProbeSocket, ProbeSocketFactory};
pub use types::{
    Device, DiscoverOptions, DiscoveryConfig, DiscoveryError, DiscoveryReport, DiscoveryResult,
    InterfaceFailure, ProbeFailureKind,
};

/// Discovers devices on the host's interfaces.
///
/// Shorthand for [`Discoverer::default`] followed by
/// [`Discoverer::discover`].
///
/// # Errors
/// See [`Discoverer::discover_with_report`].
pub async fn discover(
    cancel: &CancellationToken,
    timeout: Duration,
    options: &DiscoverOptions,
) -> DiscoveryResult<Vec<Device>> {
    Discoverer::default().discover(cancel, timeout, options).await
}
