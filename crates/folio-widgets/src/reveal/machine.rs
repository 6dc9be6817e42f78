#![forbid(unsafe_code)]

//! Reveal state machine.
//!
//! ```text
//! Hidden --(ratio >= threshold)--> Visible
//! Visible --(ratio < threshold, !trigger_once)--> Hidden
//! ```
//!
//! With `trigger_once`, `Visible` is terminal and the machine asks its host
//! to disconnect on the entry that latches it.
//!
//! Every state change starts a new [`StyleSegment`] from the style shown at
//! that instant, so reversals mid-transition never jump. Reveals honor the
//! configured delay; hides start immediately.

use folio_core::{IntersectionEntry, Observation, RevealConfig};
use folio_style::{RevealStyle, StyleSegment, Transition};
use web_time::Instant;

/// Whether the wrapped content is currently revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RevealState {
    #[default]
    Hidden,
    Visible,
}

impl RevealState {
    #[must_use]
    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }

    /// Lowercase name, used in `data-` attributes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Visible => "visible",
        }
    }
}

/// Owns one reveal's state and presentation timeline.
#[derive(Debug, Clone)]
pub struct RevealMachine {
    config: RevealConfig,
    state: RevealState,
    segment: StyleSegment,
    changed_at: Option<Instant>,
    transitions: u32,
}

impl RevealMachine {
    /// A machine in `Hidden`, at rest on the hidden style.
    #[must_use]
    pub fn new(config: RevealConfig) -> Self {
        let hidden = RevealStyle::hidden_for(&config);
        Self {
            config,
            state: RevealState::Hidden,
            segment: StyleSegment::at_rest(hidden),
            changed_at: None,
            transitions: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Whether the state can no longer change.
    #[must_use]
    pub fn is_latched(&self) -> bool {
        self.config.trigger_once && self.state.is_visible()
    }

    /// Number of state changes so far.
    #[must_use]
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    /// When the current segment began, if the state ever changed.
    #[must_use]
    pub fn changed_at(&self) -> Option<Instant> {
        self.changed_at
    }

    #[must_use]
    pub fn segment(&self) -> &StyleSegment {
        &self.segment
    }

    /// Feed one observation. Returns whether the host should keep observing.
    pub fn observe(&mut self, entry: &IntersectionEntry, now: Instant) -> Observation {
        if self.is_latched() {
            return Observation::Disconnect;
        }
        let meets = entry.meets(self.config.visibility_threshold);
        match (self.state, meets) {
            (RevealState::Hidden, true) => self.enter(RevealState::Visible, now),
            (RevealState::Visible, false) => self.enter(RevealState::Hidden, now),
            _ => {}
        }
        if self.is_latched() {
            Observation::Disconnect
        } else {
            Observation::Continue
        }
    }

    /// Reveal without observation: straight to the shown style, latched.
    ///
    /// Used when the environment cannot observe the viewport, so content is
    /// never stuck invisible.
    pub fn fail_open(&mut self, now: Instant) {
        self.config.trigger_once = true;
        if self.state.is_visible() {
            return;
        }
        self.state = RevealState::Visible;
        self.segment = StyleSegment::at_rest(RevealStyle::SHOWN);
        self.changed_at = Some(now);
        self.transitions += 1;
    }

    /// Presentation at `now`.
    #[must_use]
    pub fn style_at(&self, now: Instant) -> RevealStyle {
        match self.changed_at {
            None => self.segment.from,
            Some(at) => self.segment.sample(now.saturating_duration_since(at)),
        }
    }

    /// Whether the current segment has begun moving at `now`.
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        let Some(at) = self.changed_at else {
            return false;
        };
        let elapsed = now.saturating_duration_since(at);
        self.segment.timing.has_started(elapsed) && !self.segment.is_finished(elapsed)
    }

    /// Whether the presentation is at rest on the current state's style.
    #[must_use]
    pub fn is_settled(&self, now: Instant) -> bool {
        match self.changed_at {
            None => true,
            Some(at) => self.segment.is_finished(now.saturating_duration_since(at)),
        }
    }

    fn enter(&mut self, next: RevealState, now: Instant) {
        let current = self.style_at(now);
        let timing = Transition::from_config(&self.config);
        let (to, timing) = match next {
            RevealState::Visible => (RevealStyle::SHOWN, timing),
            RevealState::Hidden => (RevealStyle::hidden_for(&self.config), timing.without_delay()),
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            from = self.state.as_str(),
            to = next.as_str(),
            transitions = self.transitions + 1,
            "reveal state change"
        );
        self.state = next;
        self.segment = StyleSegment::new(current, to, timing);
        self.changed_at = Some(now);
        self.transitions += 1;
    }
}
