use crate::error::{Result, ScaffoldError};
use serde::Serialize;
use serde_yaml::Value;

/// A freshly scaffolded feature definition.
///
/// Field order is the order keys are written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureDraft {
    pub spec: String,
    pub caniuse: String,
    pub compat_features: Vec<String>,
}

impl FeatureDraft {
    /// Creates a draft with a single blank `compat_features` entry to fill in by hand.
    pub fn new(spec: impl Into<String>, caniuse: impl Into<String>) -> Self {
        Self { spec: spec.into(), caniuse: caniuse.into(), compat_features: vec![String::new()] }
    }

    /// Converts the draft to a YAML document, keys in field order.
    ///
    /// # Errors
    /// Returns [`ScaffoldError::Serialize`] if serialization fails.
    pub fn to_document(&self) -> Result<Value> {
        serde_yaml::to_value(self).map_err(|source| ScaffoldError::Serialize { source })
    }
}
