//! HTTP transport for SOAP exchanges.
//!
//! One call is one POST. The full body is read before anything is decoded,
//! and nothing is retried here: callers that want retries wrap the call.

use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tokio_util::sync::CancellationToken;

use super::envelope::{decode_void, Envelope};
use super::{SoapError, SoapResult};
use crate::protocol_constants::{SOAP_CONTENT_TYPE, SOAP_TIMEOUT_SECS};

/// Executes SOAP request/response exchanges over HTTP POST.
#[derive(Debug, Clone)]
pub struct SoapTransport {
    http: Client,
    timeout: Duration,
}

impl Default for SoapTransport {
    fn default() -> Self {
        Self::new(Client::new(), Duration::from_secs(SOAP_TIMEOUT_SECS))
    }
}

impl SoapTransport {
    #[must_use]
    pub fn new(http: Client, timeout: Duration) -> Self {
        Self { http, timeout }
    }

    /// Per-call deadline for the whole exchange.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Swaps the underlying HTTP client (proxies, TLS roots, pooling).
    #[must_use]
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Posts `envelope` to `url` and returns the response body.
    ///
    /// A non-2xx response carrying a SOAP Fault yields [`SoapError::Fault`];
    /// any other non-2xx response yields [`SoapError::HttpStatus`]. A 2xx
    /// body is returned as-is for the caller to decode (it may still hold a
    /// Fault).
    ///
    /// # Errors
    /// [`SoapError::Cancelled`] if `cancel` fires first, [`SoapError::Http`]
    /// on connection failure or timeout.
    pub async fn post(
        &self,
        cancel: &CancellationToken,
        url: &str,
        envelope: &Envelope,
    ) -> SoapResult<String> {
        let body = envelope.to_xml();

        log::debug!("[SOAP] POST {} (body: {} bytes)", url, body.len());
        log::trace!("[SOAP] Request body: {}", body);

        let start = Instant::now();
        let exchange = async {
            let res = self
                .http
                .post(url)
                .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
                .body(body)
                .timeout(self.timeout)
                .send()
                .await?;
            let status = res.status();
            let text = res.text().await?;
            Ok::<_, SoapError>((status, text))
        };

        let (status, text) = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::debug!("[SOAP] POST {} cancelled after {:?}", url, start.elapsed());
                return Err(SoapError::Cancelled);
            }
            result = exchange => result?,
        };

        log::debug!(
            "[SOAP] POST {} completed in {:?}: {}",
            url,
            start.elapsed(),
            status
        );
        log::trace!("[SOAP] Response body: {}", text);

        // Devices usually send Faults with 400/500, so look for one before
        // judging the status code.
        if !status.is_success() {
            if let Err(SoapError::Fault(fault)) = decode_void(&text) {
                return Err(SoapError::Fault(fault));
            }
            return Err(SoapError::HttpStatus(status.as_u16(), text));
        }

        Ok(text)
    }
}
