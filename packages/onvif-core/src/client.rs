//! ONVIF device client.
//!
//! [`OnvifClient`] is the entry point every operation wrapper goes through:
//! it owns the device endpoint, the HTTP transport and the guarded
//! credentials, and exposes the generic [`call`](OnvifClient::call) /
//! [`call_void`](OnvifClient::call_void) pair.

use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::credentials::{CredentialStore, Credentials};
use crate::device::Capabilities;
use crate::protocol_constants::{DEFAULT_DEVICE_SERVICE_PATH, SOAP_TIMEOUT_SECS};
use crate::soap::{decode_envelope, decode_void, sign, Envelope, SoapError, SoapResult, SoapTransport};

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Construction-time settings for [`OnvifClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deadline for one complete SOAP exchange.
    pub timeout: Duration,
    /// Initial credentials; anonymous by default.
    pub credentials: Credentials,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(SOAP_TIMEOUT_SECS),
            credentials: Credentials::default(),
        }
    }
}

/// Service addresses advertised by the device in `GetCapabilities`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceEndpoints {
    pub media: Option<String>,
    pub ptz: Option<String>,
    pub imaging: Option<String>,
    pub events: Option<String>,
}

impl From<&Capabilities> for ServiceEndpoints {
    fn from(caps: &Capabilities) -> Self {
        Self {
            media: caps.media.clone(),
            ptz: caps.ptz.clone(),
            imaging: caps.imaging.clone(),
            events: caps.events.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Endpoint normalisation
// ─────────────────────────────────────────────────────────────────────────────

/// Turns user input into a device service URL.
///
/// - `http://` / `https://` URLs are kept; an empty or `/` path becomes
///   `/onvif/device_service`
/// - anything else (`host`, `host:port`, `ip`, `ip:port`) becomes
///   `http://<input>/onvif/device_service`; input that already carries a
///   path keeps it, with the service path appended
///
/// # Errors
/// [`SoapError::InvalidEndpoint`] if the result is not a URL with a host.
pub fn normalize_endpoint(input: &str) -> SoapResult<String> {
    let input = input.trim();
    let invalid = |reason: &str| SoapError::InvalidEndpoint(input.to_string(), reason.to_string());

    if input.is_empty() {
        return Err(invalid("endpoint is empty"));
    }

    let lower = input.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        let mut url = Url::parse(input).map_err(|e| invalid(&e.to_string()))?;
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("URL has no host"));
        }
        if url.path().is_empty() || url.path() == "/" {
            url.set_path(DEFAULT_DEVICE_SERVICE_PATH);
        }
        return Ok(url.to_string());
    }

    let candidate = format!("http://{}{}", input, DEFAULT_DEVICE_SERVICE_PATH);
    let url = Url::parse(&candidate).map_err(|e| invalid(&e.to_string()))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("URL has no host"));
    }
    Ok(url.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// Client for a single ONVIF device.
///
/// Cheap to share behind an `Arc`; all methods take `&self`. Each call is
/// independently signed with a snapshot of the credentials taken when the
/// call starts, and no session state is carried between calls.
#[derive(Debug)]
pub struct OnvifClient {
    endpoint: String,
    transport: SoapTransport,
    credentials: CredentialStore,
    services: RwLock<ServiceEndpoints>,
}

impl OnvifClient {
    /// Creates an anonymous client with default settings.
    ///
    /// # Errors
    /// [`SoapError::InvalidEndpoint`] if `endpoint` cannot be normalised.
    pub fn new(endpoint: &str) -> SoapResult<Self> {
        Self::with_config(endpoint, ClientConfig::default())
    }

    /// Creates a client from explicit settings.
    ///
    /// # Errors
    /// [`SoapError::InvalidEndpoint`] if `endpoint` cannot be normalised.
    pub fn with_config(endpoint: &str, config: ClientConfig) -> SoapResult<Self> {
        let endpoint = normalize_endpoint(endpoint)?;
        Ok(Self {
            endpoint,
            transport: SoapTransport::new(Client::new(), config.timeout),
            credentials: CredentialStore::new(config.credentials),
            services: RwLock::new(ServiceEndpoints::default()),
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.transport = self.transport.with_timeout(timeout);
        self
    }

    #[must_use]
    pub fn with_credentials(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.set_credentials(username, password);
        self
    }

    /// Uses a caller-configured HTTP client (TLS roots, proxies, pooling).
    #[must_use]
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.transport = self.transport.with_http_client(http);
        self
    }

    /// The normalised device service URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.transport.timeout()
    }

    /// Replaces the credentials used by subsequent calls.
    ///
    /// Calls already in flight keep the credentials they started with.
    pub fn set_credentials(&self, username: impl Into<String>, password: impl Into<String>) {
        self.credentials.set(Credentials::new(username, password));
    }

    /// Snapshot of the current credentials.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        self.credentials.snapshot()
    }

    /// Sends `request` to `endpoint` and decodes the response into `Resp`.
    ///
    /// # Errors
    /// - transport class ([`SoapError::Http`], [`SoapError::HttpStatus`],
    ///   [`SoapError::Cancelled`])
    /// - [`SoapError::Fault`] if the device answered with a SOAP Fault
    /// - [`SoapError::Decode`] if the response does not fit `Resp`
    pub async fn call<Req, Resp>(
        &self,
        cancel: &CancellationToken,
        endpoint: &str,
        request: &Req,
    ) -> SoapResult<Resp>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let body = self.exchange(cancel, endpoint, request).await?;
        decode_envelope(&body)
    }

    /// Like [`call`](Self::call) for operations whose result is ignored.
    ///
    /// # Errors
    /// As [`call`](Self::call), except that any non-Fault body is accepted.
    pub async fn call_void<Req>(
        &self,
        cancel: &CancellationToken,
        endpoint: &str,
        request: &Req,
    ) -> SoapResult<()>
    where
        Req: Serialize,
    {
        let body = self.exchange(cancel, endpoint, request).await?;
        decode_void(&body)
    }

    async fn exchange<Req>(
        &self,
        cancel: &CancellationToken,
        endpoint: &str,
        request: &Req,
    ) -> SoapResult<String>
    where
        Req: Serialize,
    {
        let credentials = self.credentials.snapshot();
        let envelope = sign(Envelope::new(request)?, &credentials);
        self.transport.post(cancel, endpoint, &envelope).await
    }

    /// Queries `GetCapabilities` and records the advertised service
    /// addresses.
    ///
    /// # Errors
    /// Any error from the underlying `GetCapabilities` call.
    pub async fn initialize(&self, cancel: &CancellationToken) -> SoapResult<Capabilities> {
        let caps = self.get_capabilities(cancel).await?;
        let services = ServiceEndpoints::from(&caps);
        log::debug!("[SOAP] {} advertises {:?}", self.endpoint, services);
        *self.services.write() = services;
        Ok(caps)
    }

    /// Snapshot of the service addresses learned by [`initialize`](Self::initialize).
    #[must_use]
    pub fn services(&self) -> ServiceEndpoints {
        self.services.read().clone()
    }

    /// Media service URL, or the device endpoint when none was advertised.
    #[must_use]
    pub fn media_endpoint(&self) -> String {
        self.service_or_device(|s| s.media.clone())
    }

    #[must_use]
    pub fn ptz_endpoint(&self) -> String {
        self.service_or_device(|s| s.ptz.clone())
    }

    #[must_use]
    pub fn imaging_endpoint(&self) -> String {
        self.service_or_device(|s| s.imaging.clone())
    }

    #[must_use]
    pub fn events_endpoint(&self) -> String {
        self.service_or_device(|s| s.events.clone())
    }

    fn service_or_device(&self, pick: impl FnOnce(&ServiceEndpoints) -> Option<String>) -> String {
        pick(&self.services.read()).unwrap_or_else(|| self.endpoint.clone())
    }
}
