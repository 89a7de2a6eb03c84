//! Rendering consumer.
//!
//! Stands in for the data-access layer: instead of running the lookup it
//! serializes the condition document it receives.

use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;
use whereabouts::{ConditionDocument, LookupConsumer};

/// Structured output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// Errors that can occur during serialization.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Serializes data to the given format.
pub fn serialize<T: Serialize>(data: &T, format: OutputFormat) -> Result<String, SerializeError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
    }
}

/// Lookup consumer that renders the document instead of executing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConsumer {
    format: OutputFormat,
}

impl RenderConsumer {
    pub fn new(format: OutputFormat) -> Self {
        RenderConsumer { format }
    }
}

impl LookupConsumer for RenderConsumer {
    type Output = String;
    type Error = SerializeError;

    fn find(&self, conditions: ConditionDocument) -> Result<String, SerializeError> {
        tracing::info!(fields = conditions.len(), format = ?self.format, "search");
        serialize(&conditions, self.format)
    }
}
