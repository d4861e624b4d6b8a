//! Error types for the validation-check client.
//!
//! # Design
//! One variant per stage of a `check` call, in the order the stages run:
//! encode, build the URL, send, read, decode. The HTTP status code is never a
//! source of error on its own; a non-2xx response whose body decodes is a
//! success.

use thiserror::Error;

/// Errors returned by `CheckClient` and the request builders.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload could not be serialized to JSON.
    #[error("failed to encode check request: {0}")]
    Encoding(#[source] serde_json::Error),

    /// Base URL, version and `check` could not be joined into a valid URL.
    #[error("cannot build check URL from base {base:?}")]
    UrlConstruction {
        base: String,
        #[source]
        source: Option<url::ParseError>,
    },

    /// Network-level failure: connection refused, DNS, timeout.
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// The response body could not be read to the end.
    #[error("failed to read response body: {0}")]
    Io(#[from] std::io::Error),

    /// The response body is not JSON or does not match `CheckResponse`.
    #[error("failed to decode check response: {0}")]
    Decoding(#[source] serde_json::Error),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;
