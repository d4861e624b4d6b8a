//! Connection parameters for `CheckClient`.
//!
//! A `Config` is built once from a base URL plus an ordered list of
//! `ConfigOption`s and is read-only afterwards. Options not supplied keep
//! their defaults: version `"v1"`, no timeout.

use std::time::Duration;

/// API version used when no `ConfigOption::Version` is given.
pub const DEFAULT_VERSION: &str = "v1";

/// Immutable target of a `CheckClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    url: String,
    version: String,
    timeout: Option<Duration>,
}

/// A single override applied while building a `Config`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigOption {
    /// Replace the API version path segment.
    Version(String),
    /// Bound each call to the given duration. Unset means the call blocks
    /// until the transport gives up on its own.
    Timeout(Duration),
}

impl ConfigOption {
    pub fn version(version: impl Into<String>) -> Self {
        Self::Version(version.into())
    }

    pub fn timeout(timeout: Duration) -> Self {
        Self::Timeout(timeout)
    }

    fn apply(self, config: &mut Config) {
        match self {
            ConfigOption::Version(version) => config.version = version,
            ConfigOption::Timeout(timeout) => config.timeout = Some(timeout),
        }
    }
}

impl Config {
    /// Config with every option at its default. `url` is stored verbatim.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_options(url, [])
    }

    /// Config with `options` applied in order on top of the defaults, so a
    /// later option wins over an earlier one of the same kind.
    pub fn with_options<I>(url: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = ConfigOption>,
    {
        let mut config = Self {
            url: url.into(),
            version: DEFAULT_VERSION.to_string(),
            timeout: None,
        };
        for option in options {
            option.apply(&mut config);
        }
        config
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
