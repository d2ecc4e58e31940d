// Normalization settings

use crate::{Result, SupportError};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// How a pipe at the very start of a string is treated when detecting list
/// delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipeDetection {
    /// A pipe only counts when the first one is past position zero.
    #[default]
    Legacy,
    /// A pipe anywhere counts.
    Strict,
}

impl FromStr for PipeDetection {
    type Err = SupportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Ok(PipeDetection::Legacy),
            "strict" => Ok(PipeDetection::Strict),
            other => Err(SupportError::Config(format!(
                "unknown pipe detection mode: {other}"
            ))),
        }
    }
}

/// Settings for [`crate::Normalizer`].
///
/// ```toml
/// pipe_detection = "strict"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    pub pipe_detection: PipeDetection,
}

impl NormalizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pipe_detection(mut self, pipe_detection: PipeDetection) -> Self {
        self.pipe_detection = pipe_detection;
        self
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| SupportError::Config(e.to_string()))
    }

    /// Read `GARAVEL_PIPE_DETECTION`. Unset means the default; an
    /// unrecognised value is an error.
    pub fn from_env() -> Result<Self> {
        match env::var("GARAVEL_PIPE_DETECTION") {
            Ok(raw) => Ok(Self::new().with_pipe_detection(raw.parse()?)),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(SupportError::Config(e.to_string())),
        }
    }
}
