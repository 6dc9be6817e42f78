#![forbid(unsafe_code)]

//! [`IntersectionHost`] over the browser's `IntersectionObserver`.
//!
//! Each registration owns one observer and the JS closure it calls. The
//! registration's teardown disconnects the observer before the closure is
//! released, so the browser never calls into freed memory.

use std::cell::Cell;
use std::rc::Rc;

use folio_core::{
    IntersectionEntry, IntersectionHost, ObserveError, ObserveOptions, Observation,
    ObserverCallback, Rect, Registration,
};
use js_sys::{Array, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Observes DOM elements against the browser viewport.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomIntersectionHost;

impl DomIntersectionHost {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Whether `window.IntersectionObserver` exists.
    #[must_use]
    pub fn is_supported() -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
    }
}

fn to_entry(entry: &IntersectionObserverEntry) -> IntersectionEntry {
    let rect = entry.bounding_client_rect();
    let mut out = IntersectionEntry::from_ratio(entry.intersection_ratio());
    out.is_intersecting = entry.is_intersecting();
    out.bounds = Rect::new(rect.x(), rect.y(), rect.width(), rect.height());
    out
}

fn js_error(err: &JsValue) -> ObserveError {
    ObserveError::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl IntersectionHost for DomIntersectionHost {
    type Target = Element;

    fn observe(
        &self,
        target: &Element,
        options: ObserveOptions,
        mut callback: ObserverCallback,
    ) -> Result<Registration, ObserveError> {
        if !Self::is_supported() {
            return Err(ObserveError::Unsupported);
        }

        let live = Rc::new(Cell::new(true));
        let closure_live = Rc::clone(&live);
        let closure = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for value in entries.iter() {
                    if !closure_live.get() {
                        return;
                    }
                    let Ok(entry) = value.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if callback(&to_entry(&entry)) == Observation::Disconnect {
                        closure_live.set(false);
                        observer.disconnect();
                        #[cfg(feature = "tracing")]
                        tracing::trace!("intersection observer disconnected itself");
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin.to_css());
        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)
                .map_err(|err| js_error(&err))?;
        observer.observe(target);
        #[cfg(feature = "tracing")]
        tracing::trace!(threshold = options.threshold, "observe element");

        Ok(Registration::new(live, move || {
            observer.disconnect();
            drop(closure);
            #[cfg(feature = "tracing")]
            tracing::trace!("unobserve element");
        }))
    }
}
