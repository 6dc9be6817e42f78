#![forbid(unsafe_code)]

//! Timing functions for reveal transitions.
//!
//! Named curves use the CSS definitions so that a software interpolation and
//! a browser-driven `transition` follow the same path.

use std::fmt;
use std::str::FromStr;

/// Easing curve mapping linear progress `t` in `[0, 1]` to eased progress.
///
/// With the `serde` feature the curve is stored as its CSS text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub enum Easing {
    Linear,
    /// CSS `ease`: `cubic-bezier(0.25, 0.1, 0.25, 1)`.
    Ease,
    /// `cubic-bezier(0.4, 0, 1, 1)`.
    EaseIn,
    /// `cubic-bezier(0, 0, 0.2, 1)`.
    #[default]
    EaseOut,
    /// `cubic-bezier(0.4, 0, 0.2, 1)`.
    EaseInOut,
    /// Custom control points `(x1, y1, x2, y2)`; `x1` and `x2` lie in `[0, 1]`.
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Control points for this curve, or `None` for [`Easing::Linear`].
    #[must_use]
    pub fn control_points(self) -> Option<(f64, f64, f64, f64)> {
        match self {
            Self::Linear => None,
            Self::Ease => Some((0.25, 0.1, 0.25, 1.0)),
            Self::EaseIn => Some((0.4, 0.0, 1.0, 1.0)),
            Self::EaseOut => Some((0.0, 0.0, 0.2, 1.0)),
            Self::EaseInOut => Some((0.4, 0.0, 0.2, 1.0)),
            Self::CubicBezier(x1, y1, x2, y2) => Some((x1, y1, x2, y2)),
        }
    }

    /// Apply the curve. Input is clamped to `[0, 1]`; endpoints are exact.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self.control_points() {
            None => t,
            Some((x1, y1, x2, y2)) => {
                let s = solve_bezier_x(t, x1, x2);
                bezier(s, y1, y2)
            }
        }
    }

    /// Whether the control points describe a valid CSS timing function.
    #[must_use]
    pub fn is_valid(self) -> bool {
        match self.control_points() {
            None => true,
            Some((x1, y1, x2, y2)) => {
                [x1, y1, x2, y2].iter().all(|v| v.is_finite())
                    && (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2)
            }
        }
    }

    /// CSS `transition-timing-function` value.
    #[must_use]
    pub fn to_css(self) -> String {
        match self {
            Self::Linear => "linear".to_string(),
            Self::Ease => "ease".to_string(),
            Self::EaseIn => "ease-in".to_string(),
            Self::EaseOut => "cubic-bezier(0, 0, 0.2, 1)".to_string(),
            Self::EaseInOut => "cubic-bezier(0.4, 0, 0.2, 1)".to_string(),
            Self::CubicBezier(x1, y1, x2, y2) => {
                format!("cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

/// One coordinate of a cubic Bézier with endpoints fixed at 0 and 1.
fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

/// Find the curve parameter whose x coordinate equals `x`.
///
/// Fixed-depth bisection: x is monotonic in `s` because both x control
/// points lie in `[0, 1]`, and a fixed depth keeps the result monotonic in
/// `x` as well.
fn solve_bezier_x(x: f64, x1: f64, x2: f64) -> f64 {
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..52 {
        let mid = (lo + hi) / 2.0;
        if bezier(mid, x1, x2) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / 2.0
}

/// Error from parsing an easing name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EasingParseError(pub String);

impl fmt::Display for EasingParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized easing: {}", self.0)
    }
}

impl std::error::Error for EasingParseError {}

impl FromStr for Easing {
    type Err = EasingParseError;

    /// Accepts `linear`, `ease`, `ease-in`, `ease-out`, `ease-in-out`, and
    /// `cubic-bezier(x1, y1, x2, y2)`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let easing = match trimmed.to_ascii_lowercase().as_str() {
            "linear" => Self::Linear,
            "ease" => Self::Ease,
            "ease-in" => Self::EaseIn,
            "ease-out" => Self::EaseOut,
            "ease-in-out" => Self::EaseInOut,
            other => {
                let args = other
                    .strip_prefix("cubic-bezier(")
                    .and_then(|rest| rest.strip_suffix(')'))
                    .ok_or_else(|| EasingParseError(trimmed.to_string()))?;
                let points = args
                    .split(',')
                    .map(|p| p.trim().parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| EasingParseError(trimmed.to_string()))?;
                let [x1, y1, x2, y2] = points[..] else {
                    return Err(EasingParseError(trimmed.to_string()));
                };
                Self::CubicBezier(x1, y1, x2, y2)
            }
        };
        if !easing.is_valid() {
            return Err(EasingParseError(trimmed.to_string()));
        }
        Ok(easing)
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.to_css()
    }
}

impl TryFrom<String> for Easing {
    type Error = EasingParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn endpoints_are_exact() {
        for easing in [
            Easing::Linear,
            Easing::Ease,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn ease_out_leads_linear() {
        for step in 1..10 {
            let t = f64::from(step) / 10.0;
            assert!(Easing::EaseOut.apply(t) > t, "ease-out at {t}");
        }
    }

    #[test]
    fn ease_in_lags_linear() {
        for step in 1..10 {
            let t = f64::from(step) / 10.0;
            assert!(Easing::EaseIn.apply(t) < t, "ease-in at {t}");
        }
    }

    #[test]
    fn symmetric_bezier_midpoint() {
        let mid = Easing::CubicBezier(0.42, 0.0, 0.58, 1.0).apply(0.5);
        assert!((mid - 0.5).abs() < 1e-4);
    }

    #[test]
    fn clamps_input() {
        assert_eq!(Easing::EaseOut.apply(-1.0), 0.0);
        assert_eq!(Easing::EaseOut.apply(4.0), 1.0);
        assert_eq!(Easing::EaseOut.apply(f64::NAN), 0.0);
    }

    #[test]
    fn parse_named_and_bezier() {
        assert_eq!("ease-out".parse::<Easing>(), Ok(Easing::EaseOut));
        assert_eq!(" Linear ".parse::<Easing>(), Ok(Easing::Linear));
        assert_eq!(
            "cubic-bezier(0.1, 0.2, 0.3, 0.4)".parse::<Easing>(),
            Ok(Easing::CubicBezier(0.1, 0.2, 0.3, 0.4))
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("bounce".parse::<Easing>().is_err());
        assert!("cubic-bezier(0.1, 0.2, 0.3)".parse::<Easing>().is_err());
        assert!("cubic-bezier(1.5, 0, 0.3, 1)".parse::<Easing>().is_err());
    }

    #[test]
    fn css_round_trips_through_parse() {
        let easing = Easing::CubicBezier(0.2, 0.8, 0.2, 1.0);
        assert_eq!(easing.to_css().parse::<Easing>(), Ok(easing));
    }

    proptest! {
        #[test]
        fn output_is_monotonic_for_unit_curves(
            x1 in 0.0f64..=1.0,
            x2 in 0.0f64..=1.0,
            a in 0.0f64..=1.0,
            b in 0.0f64..=1.0,
        ) {
            // y in [0, 1] keeps the curve inside the unit square.
            let easing = Easing::CubicBezier(x1, 0.3, x2, 0.7);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(easing.apply(lo) <= easing.apply(hi) + 1e-6);
        }
    }
}
