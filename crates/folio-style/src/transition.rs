#![forbid(unsafe_code)]

//! Transition timing.
//!
//! A [`Transition`] maps time elapsed since a state change to eased progress:
//! zero for the whole delay, then the easing curve over `duration`, then one.

use std::time::Duration;

use folio_core::{Easing, RevealConfig};

/// Timing of one interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
}

impl Default for Transition {
    fn default() -> Self {
        Self::from_config(&RevealConfig::default())
    }
}

impl Transition {
    #[must_use]
    pub fn new(duration: Duration, delay: Duration, easing: Easing) -> Self {
        Self {
            duration,
            delay,
            easing,
        }
    }

    /// A transition that completes immediately.
    #[must_use]
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, Easing::Linear)
    }

    /// Reveal timing from a config. Reduced motion collapses to [`instant`].
    ///
    /// [`instant`]: Self::instant
    #[must_use]
    pub fn from_config(config: &RevealConfig) -> Self {
        if config.reduced_motion {
            return Self::instant();
        }
        Self::new(config.duration, config.delay, config.easing)
    }

    /// The same timing without its delay.
    #[must_use]
    pub fn without_delay(self) -> Self {
        Self {
            delay: Duration::ZERO,
            ..self
        }
    }

    /// Eased progress in `[0, 1]` after `elapsed`.
    #[must_use]
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if elapsed < self.delay {
            return 0.0;
        }
        let running = elapsed - self.delay;
        if self.duration.is_zero() || running >= self.duration {
            return 1.0;
        }
        let linear = running.as_secs_f64() / self.duration.as_secs_f64();
        self.easing.apply(linear)
    }

    /// Whether the interpolation has started after `elapsed`.
    #[must_use]
    pub fn has_started(&self, elapsed: Duration) -> bool {
        elapsed >= self.delay && (self.duration.is_zero() || elapsed > self.delay)
    }

    /// Whether the interpolation is complete after `elapsed`.
    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.total()
    }

    /// Total time from the state change to the end of the interpolation.
    ///
    /// Saturates at [`Duration::MAX`].
    #[must_use]
    pub fn total(&self) -> Duration {
        self.delay.saturating_add(self.duration)
    }

    /// CSS `transition` shorthand for `properties`.
    #[must_use]
    pub fn to_css(&self, properties: &[&str]) -> String {
        let timing = self.easing.to_css();
        properties
            .iter()
            .map(|prop| {
                format!(
                    "{prop} {}ms {timing} {}ms",
                    self.duration.as_millis(),
                    self.delay.as_millis()
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
