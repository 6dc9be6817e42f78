#![forbid(unsafe_code)]

//! Intersection ratio computation and observation entries.
//!
//! # Invariants
//!
//! 1. `intersection_ratio` always returns a value in `[0.0, 1.0]`.
//! 2. A zero-area target reports `1.0` when it touches the root and `0.0`
//!    otherwise, mirroring the browser's `IntersectionObserver`.
//! 3. A target fully inside the root reports exactly `1.0`.

use crate::geometry::{Margin, Rect};

/// Fraction of `target`'s area that overlaps `root` grown by `root_margin`.
#[must_use]
pub fn intersection_ratio(target: Rect, root: Rect, root_margin: Margin) -> f64 {
    let root = root.outset(root_margin);
    let Some(overlap) = target.intersection(&root) else {
        return 0.0;
    };
    let area = target.area();
    if area <= 0.0 {
        return 1.0;
    }
    (overlap.area() / area).clamp(0.0, 1.0)
}

/// Identifier of an observed target within a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

/// A single observation delivered to a registration callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    /// Fraction of the target's area inside the root, in `[0.0, 1.0]`.
    pub ratio: f64,
    /// Whether the target touches the root at all.
    pub is_intersecting: bool,
    /// Target bounds at the time of observation.
    pub bounds: Rect,
}

impl IntersectionEntry {
    /// Build an entry from a ratio alone (no geometry available).
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        let ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            ratio,
            is_intersecting: ratio > 0.0,
            bounds: Rect::default(),
        }
    }

    /// Compute an entry for `target` against `root`.
    #[must_use]
    pub fn measure(target: Rect, root: Rect, root_margin: Margin) -> Self {
        let grown = root.outset(root_margin);
        Self {
            ratio: intersection_ratio(target, root, root_margin),
            is_intersecting: target.touches(&grown),
            bounds: target,
        }
    }

    /// Whether this entry meets `threshold`.
    ///
    /// A threshold of `0.0` is met by any touching target, including
    /// zero-overlap edge contact.
    #[must_use]
    pub fn meets(&self, threshold: f64) -> bool {
        if threshold <= 0.0 {
            self.is_intersecting
        } else {
            self.ratio >= threshold
        }
    }
}
