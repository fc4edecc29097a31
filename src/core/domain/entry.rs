//! Key entry type.
//!
//! A single API key with its display metadata. The key itself is fixed at
//! creation; only the metadata changes afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::core::types::{Label, Secret};
use crate::core::validation;
use crate::error::Result;

/// An API key plus optional label, last-used time and disabled flag.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    secret: Secret,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_used: Option<DateTime<Utc>>,
    #[serde(default)]
    disabled: bool,
}

impl KeyEntry {
    /// Create a new enabled entry after validating the key.
    pub fn new(secret: impl Into<Secret>) -> Result<Self> {
        let secret = secret.into();
        validation::validate_secret(&secret)?;
        Ok(Self {
            secret,
            label: None,
            last_used: None,
            disabled: false,
        })
    }

    /// Attach a label.
    pub fn with_label(mut self, label: impl Into<Label>) -> Result<Self> {
        let label = label.into();
        validation::validate_label(&label)?;
        self.label = Some(label);
        Ok(self)
    }

    /// The key in clear text.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// The key masked for display.
    pub fn masked(&self) -> String {
        validation::mask(&self.secret)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn last_used(&self) -> Option<DateTime<Utc>> {
        self.last_used
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Record that the key was just handed out.
    pub(crate) fn touch(&mut self, at: DateTime<Utc>) {
        self.last_used = Some(at);
    }
}

impl std::fmt::Debug for KeyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyEntry")
            .field("secret", &self.masked())
            .field("label", &self.label)
            .field("last_used", &self.last_used)
            .field("disabled", &self.disabled)
            .finish()
    }
}

impl std::fmt::Display for KeyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} ({})", label, self.masked()),
            None => write!(f, "{}", self.masked()),
        }
    }
}

impl Drop for KeyEntry {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}
