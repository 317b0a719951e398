use std::collections::HashSet;

use crate::error::AttrError;

/// Hooks invoked for each attribute that fails to serialize or deserialize.
///
/// Returning `Ok` records the failure and lets the traversal continue with
/// the next attribute. Returning `Err` aborts the whole operation; this is
/// how an owning type marks a field as mandatory.
pub trait ErrorPolicy {
    fn on_serialize_error(&self, key: &str, error: &AttrError) -> Result<(), AttrError> {
        tracing::warn!(key, %error, "failed to write attribute");
        Ok(())
    }

    fn on_deserialize_error(&self, key: &str, error: &AttrError) -> Result<(), AttrError> {
        tracing::warn!(key, %error, "failed to read attribute, keeping default");
        Ok(())
    }
}

/// Log every failure and keep going.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnly;

impl ErrorPolicy for LogOnly {}

/// Escalate deserialize failures of the listed keys, log the rest.
#[derive(Debug, Clone, Default)]
pub struct MandatoryFields {
    keys: HashSet<String>,
}

impl MandatoryFields {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_mandatory(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Apply the classification to a single failure.
    pub fn check(&self, key: &str, error: &AttrError) -> Result<(), AttrError> {
        if self.is_mandatory(key) {
            return Err(AttrError::mandatory(key, error.clone()));
        }
        tracing::warn!(key, %error, "ignoring optional attribute");
        Ok(())
    }
}

impl ErrorPolicy for MandatoryFields {
    fn on_deserialize_error(&self, key: &str, error: &AttrError) -> Result<(), AttrError> {
        self.check(key, error)
    }
}
