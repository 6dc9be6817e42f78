#![forbid(unsafe_code)]

//! Reveal presentation.
//!
//! Hidden content is transparent and pushed down by the configured offset;
//! shown content is opaque and untransformed. [`StyleSegment`] interpolates
//! between two presentations over a [`Transition`], so the style at any
//! instant is a pure function of the segment and the time since it began.

use std::fmt::Write as _;
use std::time::Duration;

use folio_core::RevealConfig;

use crate::transition::Transition;

/// Properties animated by a reveal.
pub const REVEAL_PROPERTIES: [&str; 2] = ["opacity", "transform"];

/// A concrete reveal presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealStyle {
    /// In `[0, 1]`.
    pub opacity: f64,
    /// Vertical translation in CSS pixels; positive moves down.
    pub translate_y: f64,
}

impl RevealStyle {
    /// Fully shown.
    pub const SHOWN: Self = Self {
        opacity: 1.0,
        translate_y: 0.0,
    };

    /// Hidden, offset by `offset_px`.
    #[must_use]
    pub fn hidden(offset_px: f64) -> Self {
        Self {
            opacity: 0.0,
            translate_y: offset_px,
        }
    }

    /// Hidden presentation for `config`.
    #[must_use]
    pub fn hidden_for(config: &RevealConfig) -> Self {
        Self::hidden(config.offset_px)
    }

    /// Linear blend; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            opacity: (self.opacity + (to.opacity - self.opacity) * t).clamp(0.0, 1.0),
            translate_y: self.translate_y + (to.translate_y - self.translate_y) * t,
        }
    }

    /// Inline declarations, e.g. `opacity: 0; transform: translateY(32px)`.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        let _ = write!(css, "opacity: {}", round3(self.opacity));
        if self.translate_y == 0.0 {
            css.push_str("; transform: none");
        } else {
            let _ = write!(
                css,
                "; transform: translateY({}px)",
                round3(self.translate_y)
            );
        }
        css
    }

    /// `transform` value alone.
    #[must_use]
    pub fn transform_css(&self) -> String {
        if self.translate_y == 0.0 {
            "none".to_string()
        } else {
            format!("translateY({}px)", round3(self.translate_y))
        }
    }
}

fn round3(v: f64) -> f64 {
    let r = (v * 1000.0).round() / 1000.0;
    // Normalize negative zero so it prints as "0".
    if r == 0.0 { 0.0 } else { r }
}

/// One interpolation from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSegment {
    pub from: RevealStyle,
    pub to: RevealStyle,
    pub timing: Transition,
}

impl StyleSegment {
    /// A segment that is already at rest on `style`.
    #[must_use]
    pub fn at_rest(style: RevealStyle) -> Self {
        Self {
            from: style,
            to: style,
            timing: Transition::instant(),
        }
    }

    #[must_use]
    pub fn new(from: RevealStyle, to: RevealStyle, timing: Transition) -> Self {
        Self { from, to, timing }
    }

    /// Style after `elapsed` since the segment began.
    #[must_use]
    pub fn sample(&self, elapsed: Duration) -> RevealStyle {
        self.from.lerp(self.to, self.timing.progress(elapsed))
    }

    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.from == self.to || self.timing.is_finished(elapsed)
    }

    /// Inline CSS for a browser-driven transition towards `to`.
    ///
    /// The browser interpolates from whatever it currently shows, so only
    /// the destination and the timing are emitted.
    #[must_use]
    pub fn target_css(&self) -> String {
        format!(
            "{}; transition: {}",
            self.to.to_css(),
            self.timing.to_css(&REVEAL_PROPERTIES)
        )
    }
}

/// Class list for the container: a base class, a state modifier, and any
/// caller-supplied classes.
#[must_use]
pub fn reveal_classes(visible: bool, extra: &str) -> String {
    let state = if visible { "is-visible" } else { "is-hidden" };
    let extra = extra.trim();
    if extra.is_empty() {
        format!("folio-reveal {state}")
    } else {
        format!("folio-reveal {state} {extra}")
    }
}
