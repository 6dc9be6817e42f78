#![forbid(unsafe_code)]

//! Style computation for Folio reveals.
//!
//! This crate provides:
//! - [`Transition`] for delay/duration/easing timing
//! - [`RevealStyle`] and [`StyleSegment`] for the pure style-at-time function
//! - [`reveal_classes`] for the container's class list

pub mod reveal;
pub mod transition;

pub use reveal::{REVEAL_PROPERTIES, RevealStyle, StyleSegment, reveal_classes};
pub use transition::Transition;
