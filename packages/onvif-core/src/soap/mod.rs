//! SOAP transport and authentication engine.
//!
//! # Module Structure
//!
//! - `envelope` - Envelope codec: request value to SOAP 1.2 XML and back,
//!   with generic Fault detection
//! - `security` - WS-Security UsernameToken signer
//! - `transport` - One HTTP POST exchange under a cancellation token

pub mod envelope;
pub mod security;
pub mod transport;

use std::fmt;

use thiserror::Error;

pub use envelope::{decode_envelope, decode_void, Envelope};
pub use security::{password_digest, sign, UsernameToken};
pub use transport::SoapTransport;

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// A SOAP Fault returned by the remote device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SoapFault {
    /// Fault code (`env:Sender`, `env:Receiver`, or SOAP 1.1 `faultcode`).
    pub code: String,
    /// Optional subcode, e.g. `ter:NotAuthorized`.
    pub subcode: Option<String>,
    /// Human-readable reason.
    pub reason: String,
}

impl fmt::Display for SoapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subcode {
            Some(sub) => write!(f, "{} ({}): {}", self.code, sub, self.reason),
            None => write!(f, "{}: {}", self.code, self.reason),
        }
    }
}

/// Errors that can occur during SOAP operations with ONVIF devices.
#[derive(Debug, Error)]
pub enum SoapError {
    /// HTTP request to the device failed (connection, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Device returned a non-success HTTP status without a SOAP fault.
    #[error("HTTP error {0}: {1}")]
    HttpStatus(u16, String),

    /// The caller cancelled the exchange before it completed.
    #[error("SOAP call cancelled")]
    Cancelled,

    /// Device returned a SOAP fault response.
    #[error("SOAP fault: {0}")]
    Fault(SoapFault),

    /// Response body could not be decoded into the expected shape.
    #[error("failed to decode SOAP response: {0}")]
    Decode(String),

    /// Request value could not be serialized.
    #[error("failed to encode SOAP request: {0}")]
    Encode(String),

    /// Endpoint string is not a usable device URL.
    #[error("invalid endpoint '{0}': {1}")]
    InvalidEndpoint(String, String),
}

/// Convenient Result alias for SOAP operations.
pub type SoapResult<T> = Result<T, SoapError>;

impl SoapError {
    /// Network/HTTP-level failure, including cancellation.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SoapError::Http(_) | SoapError::HttpStatus(_, _) | SoapError::Cancelled
        )
    }

    /// The device answered with an explicit SOAP Fault.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(self, SoapError::Fault(_))
    }

    /// The response was present but not in the expected shape.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, SoapError::Decode(_))
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SoapError::Cancelled)
    }

    /// Returns the fault if this error is a SOAP Fault.
    #[must_use]
    pub fn fault(&self) -> Option<&SoapFault> {
        match self {
            SoapError::Fault(fault) => Some(fault),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_display_includes_subcode() {
        let fault = SoapFault {
            code: "env:Sender".into(),
            subcode: Some("ter:NotAuthorized".into()),
            reason: "Sender not Authorized".into(),
        };
        assert_eq!(
            fault.to_string(),
            "env:Sender (ter:NotAuthorized): Sender not Authorized"
        );
    }

    #[test]
    fn classification_helpers() {
        assert!(SoapError::Cancelled.is_transport());
        assert!(SoapError::Cancelled.is_cancelled());
        assert!(SoapError::HttpStatus(404, String::new()).is_transport());
        assert!(SoapError::Fault(SoapFault::default()).is_fault());
        assert!(!SoapError::Fault(SoapFault::default()).is_transport());
        assert!(SoapError::Decode("x".into()).is_decode());
    }
}
