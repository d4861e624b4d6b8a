//! Synchronous client for the validation-check API.
//!
//! # Overview
//! Sends a batch of named validations, each with a free-form variables map,
//! as one `POST {url}/{version}/check` and decodes the per-validation
//! verdicts that come back.
//!
//! ```no_run
//! use open_ve_client::{CheckClient, CheckRequest, CheckRequestValidation, Config, ConfigOption};
//!
//! # fn main() -> open_ve_client::Result<()> {
//! let config = Config::with_options("http://localhost:8080", [ConfigOption::version("v1")]);
//! let client = CheckClient::new(config);
//!
//! let request = CheckRequest::new()
//!     .with_validation(CheckRequestValidation::new("signup").variable("email", "a@b.c"));
//! let response = client.check(&request)?;
//! for failure in response.failures() {
//!     eprintln!("{}: {}", failure.id, failure.message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - `Config` is immutable once built; `ConfigOption`s are applied in order
//!   over documented defaults.
//! - `CheckClient` keeps no state between calls and can be shared across
//!   threads.
//! - `check` is `build_check` + `execute` + `parse_check`; the outer two are
//!   pure and usable with any transport.
//! - HTTP status codes are not interpreted. A body that decodes is a result.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::CheckClient;
pub use config::{Config, ConfigOption, DEFAULT_VERSION};
pub use error::{ApiError, Result};
pub use http::{HttpRequest, HttpResponse};
pub use serde_json::Value;
pub use types::{CheckRequest, CheckRequestValidation, CheckResponse, CheckResponseResult, Variables};
