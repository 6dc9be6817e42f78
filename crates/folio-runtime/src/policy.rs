#![forbid(unsafe_code)]

//! Policy-as-data loading for reveal configuration.
//!
//! Sites tune reveal timing without recompiling by shipping a small TOML or
//! JSON file:
//!
//! ```toml
//! [reveal]
//! visibility_threshold = 0.25
//! trigger_once = false
//! delay_ms = 150
//! easing = "cubic-bezier(0.2, 0.8, 0.2, 1)"
//! root_margin_px = [0, 0, -40, 0]
//! ```
//!
//! Every key is optional; missing keys keep the base configuration's value.
//! Unknown keys are rejected so typos do not silently fall back to defaults.

use std::path::Path;
use std::time::Duration;

use folio_core::{ConfigError, Easing, Margin, RevealConfig};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyFile {
    #[serde(default)]
    reveal: RevealSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RevealSection {
    visibility_threshold: Option<f64>,
    trigger_once: Option<bool>,
    delay_ms: Option<u64>,
    duration_ms: Option<u64>,
    offset_px: Option<f64>,
    easing: Option<String>,
    root_margin_px: Option<RootMarginSpec>,
    reduced_motion: Option<bool>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum RootMarginSpec {
    Uniform(f64),
    /// `[top, right, bottom, left]`, CSS order.
    Edges([f64; 4]),
}

impl From<RootMarginSpec> for Margin {
    fn from(spec: RootMarginSpec) -> Self {
        match spec {
            RootMarginSpec::Uniform(px) => Margin::uniform(px),
            RootMarginSpec::Edges([top, right, bottom, left]) => {
                Margin::new(top, right, bottom, left)
            }
        }
    }
}

/// Format of a policy document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyFormat {
    Toml,
    Json,
}

impl PolicyFormat {
    /// Guess the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A parsed reveal policy, applied on top of a base [`RevealConfig`].
#[derive(Debug, Default)]
pub struct RevealPolicy {
    section: RevealSection,
}

impl RevealPolicy {
    /// Parse a policy document.
    pub fn parse(source: &str, format: PolicyFormat) -> Result<Self, ConfigError> {
        let file: PolicyFile = match format {
            PolicyFormat::Toml => {
                toml::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))?
            }
            PolicyFormat::Json => {
                serde_json::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))?
            }
        };
        Ok(Self {
            section: file.reveal,
        })
    }

    /// Read and parse a policy file; the format follows the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = PolicyFormat::from_path(path).ok_or_else(|| {
            ConfigError::Parse(format!(
                "{}: expected a .toml or .json policy file",
                path.display()
            ))
        })?;
        let source = std::fs::read_to_string(path)?;
        let policy = Self::parse(&source, format)?;
        tracing::debug!(path = %path.display(), ?format, "loaded reveal policy");
        Ok(policy)
    }

    /// Overlay this policy on `base` and validate the result.
    pub fn apply(&self, base: RevealConfig) -> Result<RevealConfig, ConfigError> {
        let s = &self.section;
        let mut config = base;
        if let Some(threshold) = s.visibility_threshold {
            config.visibility_threshold = threshold;
        }
        if let Some(once) = s.trigger_once {
            config.trigger_once = once;
        }
        if let Some(ms) = s.delay_ms {
            config.delay = Duration::from_millis(ms);
        }
        if let Some(ms) = s.duration_ms {
            config.duration = Duration::from_millis(ms);
        }
        if let Some(px) = s.offset_px {
            config.offset_px = px;
        }
        if let Some(raw) = &s.easing {
            config.easing = raw
                .parse::<Easing>()
                .map_err(|err| ConfigError::invalid("easing", err.to_string()))?;
        }
        if let Some(margin) = s.root_margin_px {
            config.root_margin = margin.into();
        }
        if let Some(reduced) = s.reduced_motion {
            config.reduced_motion = reduced;
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse `source` and apply it to the default configuration.
    pub fn config_from_str(source: &str, format: PolicyFormat) -> Result<RevealConfig, ConfigError> {
        Self::parse(source, format)?.apply(RevealConfig::default())
    }
}
