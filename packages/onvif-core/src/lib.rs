//! ONVIF Core - client library for ONVIF IP cameras.
//!
//! This crate provides the two pieces every ONVIF operation sits on:
//! a signed SOAP transport and WS-Discovery over UDP multicast.
//!
//! # Architecture
//!
//! - [`soap`]: Envelope codec, WS-Security UsernameToken signer, HTTP transport
//! - [`client`]: [`OnvifClient`], the generic `call` entry point and endpoint handling
//! - [`credentials`]: Guarded credential cell shared by all calls on a client
//! - [`device`] / [`media`]: Representative operation wrappers built on `call`
//! - [`discovery`]: Interface resolution and multi-interface Probe/ProbeMatch
//! - [`error`]: Crate-wide error type and machine-readable codes
//!
//! # Abstraction Traits
//!
//! Discovery reaches the host through two traits so it can be driven
//! without real multicast:
//!
//! - [`InterfaceProvider`](discovery::InterfaceProvider): Interface snapshots
//! - [`ProbeSocketFactory`](discovery::ProbeSocketFactory): Per-interface sockets
//!
//! # Example
//!
//! ```no_run
//! use onvif_core::{CancellationToken, OnvifClient};
//!
//! # async fn run() -> Result<(), onvif_core::OnvifError> {
//! let client = OnvifClient::new("192.168.1.64")?.with_credentials("admin", "secret");
//! let cancel = CancellationToken::new();
//! client.initialize(&cancel).await?;
//! for profile in client.get_profiles(&cancel).await? {
//!     let uri = client.get_stream_uri(&cancel, &profile.token).await?;
//!     println!("{}: {}", profile.name, uri.uri);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod client;
pub mod credentials;
pub mod device;
pub mod discovery;
pub mod error;
pub mod media;
pub mod protocol_constants;
pub mod soap;
pub mod xml;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use client::{normalize_endpoint, ClientConfig, OnvifClient, ServiceEndpoints};
pub use credentials::Credentials;
pub use device::{Capabilities, DeviceInformation, SystemDateAndTime};
pub use discovery::{
    discover, list_interfaces, Device, DiscoverOptions, Discoverer, DiscoveryConfig,
    DiscoveryError, DiscoveryReport, DiscoveryResult, InterfaceError, NetworkInterface,
};
pub use error::{ErrorCode, OnvifError, OnvifResult};
pub use media::{MediaUri, Profile, VideoEncoder};
pub use soap::{SoapError, SoapFault, SoapResult};

pub use tokio_util::sync::CancellationToken;
