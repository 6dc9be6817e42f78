//! Browser backend for Folio.
//!
//! - [`DomIntersectionHost`]: an [`IntersectionHost`](folio_core::IntersectionHost)
//!   backed by `IntersectionObserver`. Browsers without it get
//!   `ObserveError::Unsupported`, and reveals fail open.
//! - [`DomReveal`]: a reveal mounted on a live element, writing inline
//!   styles and letting the browser run the transition.
//! - [`RevealGroup`]: the JS entry point, one reveal per matching element.
//!
//! Everything except [`declarations`] is compiled only for `wasm32`.

pub mod declarations;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod host;

#[cfg(target_arch = "wasm32")]
pub use dom::{DELAY_ATTRIBUTE, DomReveal, RevealGroup};
#[cfg(target_arch = "wasm32")]
pub use host::DomIntersectionHost;
