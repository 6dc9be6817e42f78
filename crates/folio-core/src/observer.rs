#![forbid(unsafe_code)]

//! Viewport-observation capability.
//!
//! An [`IntersectionHost`] is whatever the environment offers for watching an
//! element's overlap with the viewport: the browser's `IntersectionObserver`,
//! or a software tracker driven by scroll events. Hosts deliver
//! [`IntersectionEntry`] values asynchronously, from their own event loop,
//! never from inside `observe`.
//!
//! # Invariants
//!
//! 1. Dropping a [`Registration`] deregisters before the drop returns; no
//!    callback runs afterwards, including entries already queued.
//! 2. A callback returning [`Observation::Disconnect`] is never invoked again.
//! 3. `observe` never invokes the callback synchronously.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Caller behavior |
//! |---------|-------|-----------------|
//! | `ObserveError::Unsupported` | No observation API in the environment | Fail open |
//! | `ObserveError::Host` | API present but construction failed | Fail open |

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::geometry::Margin;
use crate::intersection::IntersectionEntry;

/// What a callback wants after handling an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Keep delivering entries.
    Continue,
    /// Stop observing; the host drops the registration.
    Disconnect,
}

/// Callback invoked for each delivered entry.
pub type ObserverCallback = Box<dyn FnMut(&IntersectionEntry) -> Observation>;

/// Options for a single observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserveOptions {
    /// Ratio whose crossing (in either direction) produces an entry.
    pub threshold: f64,
    pub root_margin: Margin,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: Margin::ZERO,
        }
    }
}

/// A source of intersection entries for targets of type `Target`.
pub trait IntersectionHost {
    /// Handle naming an observable element (a DOM element, a layout id, ...).
    type Target: ?Sized;

    /// Start observing `target`.
    ///
    /// The host must deliver an initial entry for the current geometry and
    /// then one entry per threshold crossing.
    fn observe(
        &self,
        target: &Self::Target,
        options: ObserveOptions,
        callback: ObserverCallback,
    ) -> Result<Registration, ObserveError>;
}

/// RAII guard for an active observation.
///
/// Dropping the guard (or calling [`Registration::cancel`]) runs the host's
/// teardown exactly once.
#[must_use = "dropping a Registration stops the observation"]
pub struct Registration {
    live: Rc<Cell<bool>>,
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Registration {
    /// Create a guard. `live` is shared with the host, which clears it when
    /// the observation ends on its side (e.g. after a `Disconnect`).
    pub fn new(live: Rc<Cell<bool>>, teardown: impl FnOnce() + 'static) -> Self {
        Self {
            live,
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Whether the host still delivers entries for this registration.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.live.get()
    }

    /// Stop observing now.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            self.live.set(false);
            teardown();
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("active", &self.live.get())
            .finish()
    }
}

/// Why observation could not start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserveError {
    /// The environment has no viewport-observation capability.
    Unsupported,
    /// The capability exists but refused this registration.
    Host(String),
}

impl fmt::Display for ObserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "viewport observation is not supported"),
            Self::Host(msg) => write!(f, "viewport observation failed: {msg}"),
        }
    }
}

impl std::error::Error for ObserveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_runs_teardown_once() {
        let runs = Rc::new(Cell::new(0));
        let live = Rc::new(Cell::new(true));
        let r = Rc::clone(&runs);
        let reg = Registration::new(Rc::clone(&live), move || r.set(r.get() + 1));
        assert!(reg.is_active());
        drop(reg);
        assert_eq!(runs.get(), 1);
        assert!(!live.get());
    }

    #[test]
    fn cancel_runs_teardown_once() {
        let runs = Rc::new(Cell::new(0));
        let r = Rc::clone(&runs);
        let reg = Registration::new(Rc::new(Cell::new(true)), move || r.set(r.get() + 1));
        reg.cancel();
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn host_side_disconnect_is_visible() {
        let live = Rc::new(Cell::new(true));
        let reg = Registration::new(Rc::clone(&live), || {});
        live.set(false);
        assert!(!reg.is_active());
    }

    #[test]
    fn error_display() {
        assert_eq!(
            ObserveError::Unsupported.to_string(),
            "viewport observation is not supported"
        );
        assert_eq!(
            ObserveError::Host("boom".into()).to_string(),
            "viewport observation failed: boom"
        );
    }
}
