//! Centralized error types for the ONVIF core library.
//!
//! Each subsystem keeps its own error enum; [`OnvifError`] wraps them for
//! callers that want a single type, and [`ErrorCode`] gives every variant a
//! stable machine-readable code.

use thiserror::Error;

use crate::discovery::{DiscoveryError, InterfaceError};
use crate::soap::SoapError;

/// Trait for error types that provide machine-readable error codes.
pub trait ErrorCode {
    /// Returns a stable, machine-readable error code.
    fn code(&self) -> &'static str;
}

impl ErrorCode for SoapError {
    fn code(&self) -> &'static str {
        match self {
            Self::Http(e) if e.is_timeout() => "http_timeout",
            Self::Http(_) => "http_request_failed",
            Self::HttpStatus(_, _) => "http_error_status",
            Self::Cancelled => "cancelled",
            Self::Fault(_) => "soap_fault",
            Self::Decode(_) => "soap_decode_error",
            Self::Encode(_) => "soap_encode_error",
            Self::InvalidEndpoint(_, _) => "invalid_endpoint",
        }
    }
}

impl ErrorCode for InterfaceError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "interface_not_found",
        }
    }
}

impl ErrorCode for DiscoveryError {
    fn code(&self) -> &'static str {
        match self {
            Self::NoInterfaces => "no_network_interfaces",
            Self::Interface(e) => e.code(),
            Self::AllInterfacesFailed(_) => "all_interfaces_failed",
            Self::Probe(_) => "probe_encode_error",
        }
    }
}

/// Library-wide error type.
#[derive(Debug, Error)]
pub enum OnvifError {
    #[error(transparent)]
    Soap(#[from] SoapError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Interface(#[from] InterfaceError),
}

impl ErrorCode for OnvifError {
    fn code(&self) -> &'static str {
        match self {
            Self::Soap(e) => e.code(),
            Self::Discovery(e) => e.code(),
            Self::Interface(e) => e.code(),
        }
    }
}

/// Convenient Result alias for library-wide operations.
pub type OnvifResult<T> = Result<T, OnvifError>;
