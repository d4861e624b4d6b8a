//! Blocking client for the validation-check API.
//!
//! # Design
//! `CheckClient` holds an immutable `Config` and a `ureq::Agent`, and keeps
//! no state between calls. `check` runs in three steps: `build_check`
//! encodes the body and joins the URL, `execute` performs the single POST and
//! reads the body, `parse_check` decodes it. The build and parse halves are
//! public so callers with their own transport can reuse them.
//!
//! The status code is not interpreted: the agent is configured so 4xx/5xx
//! responses come back as data, and any body that decodes is a success.

use std::fmt;
use std::io::Read;

use tracing::{debug, field, instrument, warn, Span};
use url::Url;

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, HttpResponse, CONTENT_TYPE_JSON};
use crate::types::{CheckRequest, CheckResponse};

/// Final path segment of the check endpoint.
const CHECK_SEGMENT: &str = "check";

/// Synchronous client for `POST {url}/{version}/check`.
///
/// Cheap to clone and safe to share between threads.
#[derive(Clone)]
pub struct CheckClient {
    config: Config,
    agent: ureq::Agent,
}

impl fmt::Debug for CheckClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CheckClient {
    pub fn new(config: Config) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout())
            .build()
            .new_agent();
        Self { config, agent }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Join base URL, version and `check` as path segments.
    ///
    /// A trailing slash on the base and leading or trailing slashes on the
    /// version are absorbed, so `http://host` and `http://host/` with `v1`
    /// both give `http://host/v1/check`. `.` and `..` in the version resolve
    /// against the base path and never climb above the root.
    pub fn endpoint(&self) -> Result<Url> {
        let base = self.config.url();
        let url_error = |source| ApiError::UrlConstruction {
            base: base.to_string(),
            source,
        };

        let mut url = Url::parse(base).map_err(|e| url_error(Some(e)))?;
        {
            let mut segments = url.path_segments_mut().map_err(|()| url_error(None))?;
            segments.pop_if_empty();
            for piece in self.config.version().split('/') {
                match piece {
                    "" | "." => {}
                    ".." => {
                        segments.pop();
                    }
                    segment => {
                        segments.push(segment);
                    }
                }
            }
            segments.push(CHECK_SEGMENT);
        }
        Ok(url)
    }

    /// Encode `request` and target it at the endpoint. No I/O.
    ///
    /// Encoding runs first, so an unencodable request fails with
    /// `ApiError::Encoding` even when the URL is also bad.
    pub fn build_check(&self, request: &CheckRequest) -> Result<HttpRequest> {
        let body = serde_json::to_vec(request).map_err(ApiError::Encoding)?;
        let url = self.endpoint()?;
        Ok(HttpRequest {
            url: url.into(),
            headers: vec![("content-type".to_string(), CONTENT_TYPE_JSON.to_string())],
            body,
        })
    }

    /// Send `request` as a POST and read the whole response body.
    pub fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.agent.post(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder.send(&request.body[..])?;

        let status = response.status().as_u16();
        let mut body = Vec::new();
        response.body_mut().as_reader().read_to_end(&mut body)?;

        Ok(HttpResponse { status, body })
    }

    /// Decode a response body. The status code is logged but not enforced.
    pub fn parse_check(&self, response: HttpResponse) -> Result<CheckResponse> {
        if !response.is_success() {
            warn!(
                status = response.status,
                "check endpoint answered with a non-success status; decoding body anyway"
            );
        }
        serde_json::from_slice(&response.body).map_err(ApiError::Decoding)
    }

    /// Run one validation batch against the server.
    #[instrument(skip_all, fields(validations = request.len(), url = field::Empty))]
    pub fn check(&self, request: &CheckRequest) -> Result<CheckResponse> {
        let http_request = self.build_check(request)?;
        Span::current().record("url", http_request.url.as_str());
        debug!(bytes = http_request.body.len(), "sending check request");

        let http_response = self.execute(http_request)?;
        let response = self.parse_check(http_response)?;
        debug!(results = response.results.len(), "decoded check response");
        Ok(response)
    }
}
