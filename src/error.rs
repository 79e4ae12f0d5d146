//! Error types
//!
//! Every gateway call returns [`BraintreeError`]. The three fault records the
//! gateway can describe in a 422 response ([`ValidationError`],
//! [`GatewayError`], [`ProcessorError`]) are plain structs so callers can
//! keep them after matching.

use http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::types::xml;

/// Transport and (de)serialization failures
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("XML encode error: {0}")]
    Encode(String),

    #[error("XML decode error: {0}")]
    Decode(String),
}

/// A field-level error returned in response to an invalid API call
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Error)]
#[error("Code {code}: {message}")]
#[serde(default)]
pub struct ValidationError {
    /// Name of the offending request field, e.g. `amount`
    pub attribute: String,
    /// Gateway validation code, e.g. `81502`
    #[serde(deserialize_with = "xml::text_or_default::deserialize")]
    pub code: i32,
    pub message: String,
}

/// Returned when a payment is blocked by the gateway settings of the merchant
/// account (fraud rules, AVS/CVV checks, duplicates).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GatewayError {
    pub message: String,
}

/// Returned when the downstream processor declined a payment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Code {code}: {message}")]
pub struct ProcessorError {
    pub code: i32,
    pub message: String,
}

/// Raised when the gateway sends a value outside of a closed enumeration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {kind}: {value:?}")]
pub struct UnrecognizedValue {
    pub kind: &'static str,
    pub value: String,
}

/// Braintree SDK error types
#[derive(Debug, Error)]
pub enum BraintreeError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("404 Not Found")]
    NotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Processor(#[from] ProcessorError),

    #[error("{code} {reason}")]
    Status { code: u16, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for BraintreeError {
    fn from(error: reqwest::Error) -> Self {
        BraintreeError::Http(HttpError::Reqwest(error))
    }
}

impl BraintreeError {
    /// Generic error for a status the SDK has no dedicated variant for
    pub(crate) fn status(status: StatusCode) -> Self {
        BraintreeError::Status {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    pub(crate) fn decode(message: impl std::fmt::Display) -> Self {
        BraintreeError::Http(HttpError::Decode(message.to_string()))
    }

    /// Whether the gateway answered 404 for the requested resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, BraintreeError::NotFound)
    }
}
