//! Configuration for forwarding context entries as request metadata.

use crate::errors::MdcError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Controls which context entries become outgoing headers and how.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationConfig {
    /// Prefix prepended to every forwarded key.
    #[serde(default)]
    pub header_prefix: String,
    /// Headers sent on every call. Context entries override them.
    #[serde(default)]
    pub static_headers: HashMap<String, String>,
    /// If set, only these context keys are forwarded.
    #[serde(default)]
    pub include_keys: Option<HashSet<String>>,
}

impl PropagationConfig {
    /// Creates a configuration forwarding every entry unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `MdcError::Serialization` if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, MdcError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the header prefix.
    #[must_use]
    pub fn with_header_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.header_prefix = prefix.into();
        self
    }

    /// Adds a static header.
    #[must_use]
    pub fn with_static_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.static_headers.insert(key.into(), value.into());
        self
    }

    /// Restricts forwarding to the given keys.
    #[must_use]
    pub fn with_include_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Returns true if `key` should be forwarded.
    #[must_use]
    pub fn forwards(&self, key: &str) -> bool {
        self.include_keys
            .as_ref()
            .map_or(true, |keys| keys.contains(key))
    }

    /// Returns the header name for a context key.
    #[must_use]
    pub fn header_name(&self, key: &str) -> String {
        format!("{}{key}", self.header_prefix)
    }
}
