#![forbid(unsafe_code)]

//! Runtime support for Folio.
//!
//! - [`reactive`]: observables, bindings, and subscription scopes.
//! - [`viewport`]: a scroll-driven [`IntersectionHost`](folio_core::IntersectionHost)
//!   with a single-threaded event queue.
//! - [`policy`] (feature `policy-config`): reveal configuration from TOML/JSON.

#[cfg(feature = "policy-config")]
pub mod policy;
pub mod reactive;
pub mod viewport;

#[cfg(feature = "policy-config")]
pub use policy::{PolicyFormat, RevealPolicy};
pub use reactive::{Binding, BindingScope, Observable, Subscription};
pub use viewport::ViewportTracker;
