#![forbid(unsafe_code)]

//! Core types for Folio.
//!
//! This crate provides:
//! - [`Rect`] and [`Margin`] geometry in CSS pixels
//! - [`intersection_ratio`] and [`IntersectionEntry`] for viewport overlap
//! - [`IntersectionHost`], the viewport-observation capability, with its RAII
//!   [`Registration`]
//! - [`RevealConfig`] and [`Easing`] for reveal transitions

pub mod config;
pub mod easing;
pub mod geometry;
pub mod intersection;
#[cfg(feature = "tracing-json")]
pub mod logging;
pub mod observer;

pub use config::{ConfigError, RevealConfig};
pub use easing::{Easing, EasingParseError};
pub use geometry::{Margin, Rect};
pub use intersection::{IntersectionEntry, TargetId, intersection_ratio};
pub use observer::{
    IntersectionHost, ObserveError, ObserveOptions, Observation, ObserverCallback, Registration,
};
