#![forbid(unsafe_code)]

//! Read bindings from [`Observable`] values to presentation state.
//!
//! A [`Binding<T>`] wraps an evaluation closure, usually an observable plus a
//! transform. Widgets hand bindings to consumers so they can read derived
//! values (a reveal state, a CSS class list) without owning the source.
//!
//! # Invariants
//!
//! 1. `Binding::get()` always returns the current value.
//! 2. The transform runs on every `get()`; nothing is cached.
//! 3. Bindings keep their source alive (the `Rc` is shared).
//! 4. Dropping a [`BindingScope`] releases every subscription it holds, in
//!    one step, so no callback from that scope fires afterwards.

use std::fmt;
use std::rc::Rc;

use super::observable::{Observable, Subscription};

/// A read-only, lazily evaluated view of reactive state.
pub struct Binding<T> {
    eval: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            eval: Rc::clone(&self.eval),
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.get())
            .finish()
    }
}

impl<T: 'static> Binding<T> {
    /// Create a binding that evaluates `f` on each `get()` call.
    pub fn new(f: impl Fn() -> T + 'static) -> Self {
        Self { eval: Rc::new(f) }
    }

    /// A binding that always yields `value`.
    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(move || value.clone())
    }

    #[must_use]
    pub fn get(&self) -> T {
        (self.eval)()
    }

    /// Chain a further transform.
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + 'static) -> Binding<U> {
        Binding {
            eval: Rc::new(move || f((self.eval)())),
        }
    }
}

/// Bind directly to an observable's value.
pub fn bind_observable<T: Clone + PartialEq + 'static>(source: &Observable<T>) -> Binding<T> {
    let src = source.clone();
    Binding::new(move || src.get())
}

/// Bind to `map` applied to an observable's value.
pub fn bind_mapped<S: Clone + PartialEq + 'static, T: 'static>(
    source: &Observable<S>,
    map: impl Fn(&S) -> T + 'static,
) -> Binding<T> {
    let src = source.clone();
    Binding::new(move || src.with(|v| map(v)))
}

/// Collects subscriptions for one owner (e.g. a mounted widget).
///
/// The owner drops the scope on teardown and every callback is gone.
#[derive(Default)]
pub struct BindingScope {
    subscriptions: Vec<Subscription>,
}

impl BindingScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep an existing subscription alive for the scope's lifetime.
    pub fn hold(&mut self, sub: Subscription) {
        self.subscriptions.push(sub);
    }

    /// Subscribe within this scope. Returns the scope for chaining.
    pub fn subscribe<T: Clone + PartialEq + 'static>(
        &mut self,
        source: &Observable<T>,
        callback: impl Fn(&T) + 'static,
    ) -> &mut Self {
        self.subscriptions.push(source.subscribe(callback));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Release everything now; the scope stays usable.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

impl fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingScope")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}
