#![forbid(unsafe_code)]

//! The reveal wrapper widget.
//!
//! [`Reveal`] is a builder; [`Reveal::mount`] registers with an
//! [`IntersectionHost`] and yields a [`MountedReveal`], which owns the
//! registration, the state machine, and the wrapped content. Dropping (or
//! [`unmount`](MountedReveal::unmount)ing) it deregisters before returning.
//!
//! # Example
//!
//! ```
//! use folio_core::Rect;
//! use folio_runtime::ViewportTracker;
//! use folio_widgets::{Reveal, RevealState, Text};
//!
//! let tracker = ViewportTracker::new(1280.0, 800.0);
//! let target = tracker.add_target(Rect::new(0.0, 2000.0, 1280.0, 400.0));
//! let reveal = Reveal::new(Text::new("About me"))
//!     .delay_ms(150)
//!     .mount(&tracker, &target);
//!
//! tracker.dispatch();
//! assert_eq!(reveal.state(), RevealState::Hidden);
//!
//! tracker.scroll_to(1600.0);
//! tracker.dispatch();
//! assert_eq!(reveal.state(), RevealState::Visible);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use folio_core::{
    IntersectionEntry, IntersectionHost, ObserveOptions, Observation, ObserverCallback,
    Registration, RevealConfig,
};
use folio_runtime::reactive::{Binding, BindingScope, Observable, Subscription, bind_observable};
use folio_style::{RevealStyle, StyleSegment, reveal_classes};
use web_time::Instant;

use super::machine::{RevealMachine, RevealState};
use crate::{Frame, Widget};

type Clock = Rc<dyn Fn() -> Instant>;

/// Builder for a viewport-triggered reveal around `content`.
pub struct Reveal<C> {
    content: C,
    config: RevealConfig,
    class: String,
    clock: Clock,
}

impl<C> Reveal<C> {
    /// Wrap `content` with the default configuration.
    pub fn new(content: C) -> Self {
        Self {
            content,
            config: RevealConfig::default(),
            class: String::new(),
            clock: Rc::new(Instant::now),
        }
    }

    #[must_use]
    pub fn config(mut self, config: RevealConfig) -> Self {
        self.config = config;
        self
    }

    /// Delay before the reveal starts, in milliseconds.
    #[must_use]
    pub fn delay_ms(mut self, ms: u64) -> Self {
        self.config = self.config.delay_ms(ms);
        self
    }

    /// Extra classes for the container.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Time source for state-change timestamps. Defaults to `Instant::now`.
    #[must_use]
    pub fn clock(mut self, clock: impl Fn() -> Instant + 'static) -> Self {
        self.clock = Rc::new(clock);
        self
    }

    /// Start observing `target` on `host`.
    ///
    /// Never fails: if the host cannot observe, or the configuration is
    /// invalid, the content is shown immediately.
    pub fn mount<H>(self, host: &H, target: &H::Target) -> MountedReveal<C>
    where
        H: IntersectionHost + ?Sized,
    {
        let machine = Rc::new(RefCell::new(RevealMachine::new(self.config.clone())));
        let state = Observable::new(RevealState::Hidden);

        let registration = match self.config.validate() {
            Ok(()) => {
                let options = ObserveOptions {
                    threshold: self.config.visibility_threshold,
                    root_margin: self.config.root_margin,
                };
                host.observe(
                    target,
                    options,
                    observer_callback(&machine, &state, &self.clock),
                )
                .map_err(|err| err.to_string())
            }
            Err(err) => Err(err.to_string()),
        };

        let registration = match registration {
            Ok(registration) => Some(registration),
            Err(reason) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(%reason, "reveal cannot observe viewport; showing content");
                #[cfg(not(feature = "tracing"))]
                let _ = reason;
                machine.borrow_mut().fail_open((self.clock)());
                state.set(RevealState::Visible);
                None
            }
        };

        MountedReveal {
            registration,
            scope: BindingScope::new(),
            machine,
            state,
            clock: self.clock,
            class: self.class,
            content: self.content,
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for Reveal<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reveal")
            .field("content", &self.content)
            .field("config", &self.config)
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

fn observer_callback(
    machine: &Rc<RefCell<RevealMachine>>,
    state: &Observable<RevealState>,
    clock: &Clock,
) -> ObserverCallback {
    let machine = Rc::downgrade(machine);
    let state = state.clone();
    let clock = Rc::clone(clock);
    Box::new(move |entry: &IntersectionEntry| {
        let Some(machine) = machine.upgrade() else {
            return Observation::Disconnect;
        };
        let (flow, next) = {
            let mut machine = machine.borrow_mut();
            let flow = machine.observe(entry, clock());
            (flow, machine.state())
        };
        // Subscribers may read the wrapper; the machine borrow is released.
        state.set(next);
        flow
    })
}

/// A reveal registered with a host.
///
/// Field order matters: the registration drops first, so no entry reaches
/// the machine once teardown has begun.
pub struct MountedReveal<C> {
    registration: Option<Registration>,
    scope: BindingScope,
    machine: Rc<RefCell<RevealMachine>>,
    state: Observable<RevealState>,
    clock: Clock,
    class: String,
    content: C,
}

impl<C> MountedReveal<C> {
    #[must_use]
    pub fn state(&self) -> RevealState {
        self.state.get()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state().is_visible()
    }

    /// Whether the host still delivers entries to this reveal.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.registration
            .as_ref()
            .is_some_and(Registration::is_active)
    }

    #[must_use]
    pub fn config(&self) -> RevealConfig {
        self.machine.borrow().config().clone()
    }

    /// Presentation at `now`.
    #[must_use]
    pub fn style_at(&self, now: Instant) -> RevealStyle {
        self.machine.borrow().style_at(now)
    }

    /// Presentation according to the wrapper's clock.
    #[must_use]
    pub fn style(&self) -> RevealStyle {
        self.style_at((self.clock)())
    }

    /// The segment started by the latest state change.
    #[must_use]
    pub fn segment(&self) -> StyleSegment {
        *self.machine.borrow().segment()
    }

    /// When the state last changed.
    #[must_use]
    pub fn changed_at(&self) -> Option<Instant> {
        self.machine.borrow().changed_at()
    }

    /// A read view of the state.
    #[must_use]
    pub fn binding(&self) -> Binding<RevealState> {
        bind_observable(&self.state)
    }

    /// Call `callback` on every state change until the subscription drops.
    pub fn subscribe(&self, callback: impl Fn(RevealState) + 'static) -> Subscription {
        self.state.subscribe(move |s| callback(*s))
    }

    /// Like [`subscribe`](Self::subscribe), but held by the reveal itself and
    /// released on unmount.
    pub fn watch(&mut self, callback: impl Fn(RevealState) + 'static) {
        self.scope.subscribe(&self.state, move |s| callback(*s));
    }

    /// Container classes for the current state.
    #[must_use]
    pub fn classes(&self) -> String {
        reveal_classes(self.is_visible(), &self.class)
    }

    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Deregister and hand back the content.
    pub fn unmount(mut self) -> C {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.scope.clear();
        #[cfg(feature = "tracing")]
        tracing::trace!(state = self.state.get().as_str(), "reveal unmounted");
        self.content
    }
}

impl<C: Widget> Widget for MountedReveal<C> {
    fn render(&self, frame: &mut Frame) {
        let style = self.style_at(frame.now()).to_css();
        let classes = self.classes();
        frame.open(
            "div",
            &[
                ("class", classes.as_str()),
                ("data-reveal-state", self.state().as_str()),
                ("style", style.as_str()),
            ],
        );
        self.content.render(frame);
        frame.close("div");
    }
}

impl<C> fmt::Debug for MountedReveal<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountedReveal")
            .field("state", &self.state.get())
            .field("observing", &self.is_observing())
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}
