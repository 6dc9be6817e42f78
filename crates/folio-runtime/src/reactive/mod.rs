#![forbid(unsafe_code)]

//! Reactive state for Folio widgets.
//!
//! - [`Observable`]: a shared, version-tracked value with change callbacks.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//! - [`Binding`]: a lazily evaluated read view, optionally transformed.
//! - [`BindingScope`]: owns a widget's subscriptions and releases them on
//!   teardown.
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Subscribers are stored as `Weak` callbacks owned by their
//! `Subscription`, so a dropped subscriber can never be called.

pub mod binding;
pub mod observable;

pub use binding::{Binding, BindingScope, bind_mapped, bind_observable};
pub use observable::{Observable, Subscription};
