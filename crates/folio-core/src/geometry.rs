#![forbid(unsafe_code)]

//! Layout geometry in CSS pixels.
//!
//! Coordinates are document-space `f64` values: `x` grows to the right and
//! `y` grows downward, matching the browser's layout model.

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle. Negative extents are clamped to zero.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Right edge (exclusive).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether the rectangle has zero area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Shift the rectangle by `(dx, dy)`.
    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Grow (positive margin) or shrink (negative margin) each edge.
    ///
    /// An axis shrunk past zero collapses to a line at the midpoint of the
    /// inverted edges. Edge contact with that line still counts as touching.
    #[must_use]
    pub fn outset(self, margin: Margin) -> Self {
        let (x, width) = collapse(self.x - margin.left, self.right() + margin.right);
        let (y, height) = collapse(self.y - margin.top, self.bottom() + margin.bottom);
        Self::new(x, y, width, height)
    }

    /// Edge-inclusive overlap test.
    ///
    /// Two rectangles that only share an edge are considered touching, which
    /// is how zero-area targets become observable.
    #[must_use]
    pub fn touches(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// Overlapping region of two rectangles, or `None` if they do not touch.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.touches(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(x, y, right - x, bottom - y))
    }
}

/// Start and extent of the span `start..end`; inverted spans collapse to
/// their midpoint.
fn collapse(start: f64, end: f64) -> (f64, f64) {
    if end < start {
        ((start + end) / 2.0, 0.0)
    } else {
        (start, end - start)
    }
}

/// Per-edge margin in CSS pixels, as used by `rootMargin`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    /// No margin.
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same margin on every edge.
    #[must_use]
    pub const fn uniform(px: f64) -> Self {
        Self::new(px, px, px, px)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
            && self.left.is_finite()
    }

    /// CSS shorthand, e.g. `"0px 0px -40px 0px"`.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}
