#![forbid(unsafe_code)]

//! Viewport-triggered reveal.
//!
//! Content wrapped in a [`Reveal`] starts transparent and offset downwards,
//! then fades and slides into place once enough of it scrolls into view.
//!
//! - [`RevealMachine`]: the `Hidden`/`Visible` state machine and its style
//!   timeline. Host-agnostic and clock-agnostic.
//! - [`Reveal`]/[`MountedReveal`]: the widget that wires a machine to an
//!   [`IntersectionHost`](folio_core::IntersectionHost) and renders the
//!   container.

mod machine;
mod wrapper;

pub use machine::{RevealMachine, RevealState};
pub use wrapper::{MountedReveal, Reveal};
