//! HTTP transport types for the check call.
//!
//! # Design
//! A `check` is split into a pure build step, one blocking round-trip, and a
//! pure parse step. These types carry the data across that boundary so the
//! build and parse halves can be tested, or driven by another transport,
//! without touching the network.

/// Content type sent with every check request.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A check request described as plain data. Always sent as a POST.
///
/// Built by `CheckClient::build_check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// A response described as plain data.
///
/// Produced by `CheckClient::execute` (or by the caller's own transport) and
/// consumed by `CheckClient::parse_check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
