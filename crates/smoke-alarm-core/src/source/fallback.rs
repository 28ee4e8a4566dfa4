//! Retry a failed lookup against a default location.

use super::{Location, PollutionSnapshot, PollutionSource};
use crate::error::AqiError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CITY: &str = "Delhi";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Location to report when the requested one cannot be resolved.
    pub default_location: Location,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            default_location: Location::City(DEFAULT_CITY.to_string()),
        }
    }
}

/// A snapshot plus what had to happen to get it.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub snapshot: PollutionSnapshot,
    pub requested: Location,
    pub used_fallback: bool,
    /// Why the requested location failed, when it did.
    pub primary_error: Option<String>,
}

pub struct FallbackSource<S> {
    inner: S,
    config: FallbackConfig,
}

impl<S: PollutionSource> FallbackSource<S> {
    pub fn new(inner: S, config: FallbackConfig) -> Self {
        Self { inner, config }
    }

    /// Fetch `location`, falling back to the configured default on failure.
    ///
    /// A failure for the default location itself is returned as is.
    pub fn resolve(&self, location: &Location) -> Result<Resolved, AqiError> {
        match self.inner.fetch(location) {
            Ok(snapshot) => Ok(Resolved {
                snapshot,
                requested: location.clone(),
                used_fallback: false,
                primary_error: None,
            }),
            Err(e) if *location != self.config.default_location => {
                tracing::warn!(
                    source = self.inner.source_name(),
                    requested = %location,
                    fallback = %self.config.default_location,
                    "lookup failed, using default location: {e}"
                );
                let snapshot = self.inner.fetch(&self.config.default_location)?;
                Ok(Resolved {
                    snapshot,
                    requested: location.clone(),
                    used_fallback: true,
                    primary_error: Some(e.to_string()),
                })
            }
            Err(e) => Err(e),
        }
    }
}

impl<S: PollutionSource> PollutionSource for FallbackSource<S> {
    fn fetch(&self, location: &Location) -> Result<PollutionSnapshot, AqiError> {
        self.resolve(location).map(|r| r.snapshot)
    }

    fn source_name(&self) -> &str {
        self.inner.source_name()
    }
}
