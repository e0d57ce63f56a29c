//! Analysis configuration from environment variables

use std::env;
use std::str::FromStr;

use tracing::info;

use crate::error::AnalysisError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(AnalysisError::Config(format!(
                "OUTPUT_FORMAT must be json or text, got {other:?}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Display name of the authoritative reference source
    pub reference_name: String,

    /// Name under which the heuristic ranker votes
    pub heuristic_name: String,

    /// Add the ranker's best move to the candidate list
    pub include_heuristic: bool,

    /// Extra strings treated as "unavailable" on top of the built-in markers
    pub unavailable_markers: Vec<String>,

    pub output_format: OutputFormat,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            reference_name: "Stockfish".to_string(),
            heuristic_name: "Heuristic Engine".to_string(),
            include_heuristic: true,
            unavailable_markers: Vec::new(),
            output_format: OutputFormat::Json,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self, AnalysisError> {
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            reference = %config.reference_name,
            heuristic = %config.heuristic_name,
            include_heuristic = config.include_heuristic,
            "Analysis config loaded"
        );
        Ok(config)
    }

    /// Build a config from any key lookup (environment, map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AnalysisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let reference_name = lookup("REFERENCE_ENGINE_NAME")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.reference_name);

        let heuristic_name = lookup("HEURISTIC_ENGINE_NAME")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.heuristic_name);

        let include_heuristic = match lookup("INCLUDE_HEURISTIC") {
            Some(v) => parse_bool(&v).ok_or_else(|| {
                AnalysisError::Config(format!("INCLUDE_HEURISTIC must be a boolean, got {v:?}"))
            })?,
            None => defaults.include_heuristic,
        };

        let unavailable_markers = lookup("UNAVAILABLE_MARKERS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let output_format = match lookup("OUTPUT_FORMAT") {
            Some(v) => v.parse()?,
            None => defaults.output_format,
        };

        Ok(Self {
            reference_name,
            heuristic_name,
            include_heuristic,
            unavailable_markers,
            output_format,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
