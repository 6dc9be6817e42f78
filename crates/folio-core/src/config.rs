#![forbid(unsafe_code)]

//! Reveal configuration.
//!
//! Defaults reproduce the portfolio's section reveal: trigger once at 10%
//! visibility, fade and slide up 32px over 700ms with an ease-out curve.

use std::fmt;
use std::time::Duration;

use crate::easing::Easing;
use crate::geometry::Margin;

/// Default fraction of the element that must be visible to trigger.
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.1;
/// Default transition duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(700);
/// Default vertical offset of the hidden presentation (2rem).
pub const DEFAULT_OFFSET_PX: f64 = 32.0;

/// Configuration for a viewport reveal.
///
/// With the `serde` feature, missing fields take their defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RevealConfig {
    /// Fraction of the element's area that must intersect the viewport.
    pub visibility_threshold: f64,
    /// Whether `Visible` is a permanent latch.
    pub trigger_once: bool,
    /// Wait between the trigger and the start of the reveal interpolation.
    pub delay: Duration,
    /// Length of the interpolation.
    pub duration: Duration,
    /// Downward offset of the hidden presentation, in CSS pixels.
    pub offset_px: f64,
    pub easing: Easing,
    /// Grows (or, if negative, shrinks) the viewport used for observation.
    pub root_margin: Margin,
    /// Skip interpolation and delay entirely.
    pub reduced_motion: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            trigger_once: true,
            delay: Duration::ZERO,
            duration: DEFAULT_DURATION,
            offset_px: DEFAULT_OFFSET_PX,
            easing: Easing::EaseOut,
            root_margin: Margin::ZERO,
            reduced_motion: false,
        }
    }
}

impl RevealConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn visibility_threshold(mut self, threshold: f64) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    #[must_use]
    pub fn trigger_once(mut self, once: bool) -> Self {
        self.trigger_once = once;
        self
    }

    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Delay in milliseconds, the unit content authors usually think in.
    #[must_use]
    pub fn delay_ms(self, ms: u64) -> Self {
        self.delay(Duration::from_millis(ms))
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn offset_px(mut self, offset: f64) -> Self {
        self.offset_px = offset;
        self
    }

    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn root_margin(mut self, margin: Margin) -> Self {
        self.root_margin = margin;
        self
    }

    #[must_use]
    pub fn reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    /// Check that every numeric field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.visibility_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.visibility_threshold)
        {
            return Err(ConfigError::invalid(
                "visibility_threshold",
                format!("{} is outside [0, 1]", self.visibility_threshold),
            ));
        }
        if !self.offset_px.is_finite() {
            return Err(ConfigError::invalid("offset_px", "must be finite"));
        }
        if !self.root_margin.is_finite() {
            return Err(ConfigError::invalid("root_margin", "must be finite"));
        }
        if !self.easing.is_valid() {
            return Err(ConfigError::invalid(
                "easing",
                format!("{} is not a valid timing function", self.easing),
            ));
        }
        Ok(())
    }
}

/// Errors from building or loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A policy file could not be read.
    Io(std::io::Error),
    /// A policy file was malformed.
    Parse(String),
    /// A field held an unusable value.
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read policy: {err}"),
            Self::Parse(msg) => write!(f, "failed to parse policy: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid {field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_section_reveal() {
        let config = RevealConfig::default();
        assert_eq!(config.visibility_threshold, 0.1);
        assert!(config.trigger_once);
        assert_eq!(config.delay, Duration::ZERO);
        assert_eq!(config.duration, Duration::from_millis(700));
        assert_eq!(config.offset_px, 32.0);
        assert_eq!(config.easing, Easing::EaseOut);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let config = RevealConfig::new()
            .visibility_threshold(0.5)
            .trigger_once(false)
            .delay_ms(150)
            .reduced_motion(true);
        assert_eq!(config.visibility_threshold, 0.5);
        assert!(!config.trigger_once);
        assert_eq!(config.delay, Duration::from_millis(150));
        assert!(config.reduced_motion);
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        for bad in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let err = RevealConfig::new()
                .visibility_threshold(bad)
                .validate()
                .unwrap_err();
            assert!(matches!(
                err,
                ConfigError::Invalid {
                    field: "visibility_threshold",
                    ..
                }
            ));
        }
    }

    #[test]
    fn threshold_bounds_accepted() {
        assert!(RevealConfig::new().visibility_threshold(0.0).validate().is_ok());
        assert!(RevealConfig::new().visibility_threshold(1.0).validate().is_ok());
    }

    #[test]
    fn invalid_easing_rejected() {
        let err = RevealConfig::new()
            .easing(Easing::CubicBezier(2.0, 0.0, 0.5, 1.0))
            .validate()
            .unwrap_err();
        assert!(err.to_string().starts_with("invalid easing"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let config = RevealConfig::new()
            .trigger_once(false)
            .delay_ms(150)
            .easing(Easing::CubicBezier(0.2, 0.8, 0.2, 1.0))
            .root_margin(Margin::new(0.0, 0.0, -40.0, 0.0));
        let json = serde_json::to_string(&config).expect("serialize");
        let back: RevealConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_fills_missing_fields() {
        let config: RevealConfig =
            serde_json::from_str(r#"{"easing": "ease-in", "trigger_once": false}"#)
                .expect("deserialize");
        assert_eq!(config.easing, Easing::EaseIn);
        assert!(!config.trigger_once);
        assert_eq!(config.duration, DEFAULT_DURATION);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_rejects_unknown_easing() {
        let err = serde_json::from_str::<RevealConfig>(r#"{"easing": "bouncy"}"#).unwrap_err();
        assert!(err.to_string().contains("unrecognized easing: bouncy"));
    }
}
