#![forbid(unsafe_code)]

//! Software viewport host.
//!
//! [`ViewportTracker`] implements [`IntersectionHost`] over document-space
//! layout rects. Geometry changes (scroll, resize, relayout) recompute each
//! registration's threshold side and queue an entry when it flips; entries
//! are delivered later, in FIFO order, by [`ViewportTracker::dispatch`]. This
//! mirrors the browser, where observer callbacks run as separate tasks on
//! the UI thread rather than inside the scroll handler.
//!
//! # Invariants
//!
//! 1. `observe` queues exactly one initial entry and never runs the callback.
//! 2. An entry is queued only when the target's threshold side changes.
//! 3. Dropping a [`Registration`] removes its slot and its queued entries;
//!    `dispatch` also skips callbacks whose owner is gone.
//! 4. A callback returning [`Observation::Disconnect`] is removed before the
//!    next entry is processed.
//! 5. Callbacks run with no tracker borrow held; they may scroll, observe,
//!    or drop registrations.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};

use folio_core::{
    IntersectionEntry, IntersectionHost, ObserveError, ObserveOptions, Observation,
    ObserverCallback, Rect, Registration, TargetId,
};

type SharedCallback = Rc<RefCell<ObserverCallback>>;

struct Slot {
    id: u64,
    target: TargetId,
    options: ObserveOptions,
    /// Threshold side of the last queued entry.
    last_side: bool,
    callback: Weak<RefCell<ObserverCallback>>,
    live: Rc<Cell<bool>>,
}

struct Pending {
    slot: u64,
    entry: IntersectionEntry,
}

struct TrackerInner {
    viewport: Rect,
    targets: BTreeMap<TargetId, Rect>,
    slots: Vec<Slot>,
    queue: VecDeque<Pending>,
    next_slot: u64,
    next_target: u64,
}

impl TrackerInner {
    fn measure(&self, slot: &Slot) -> Option<IntersectionEntry> {
        let rect = self.targets.get(&slot.target)?;
        Some(IntersectionEntry::measure(
            *rect,
            self.viewport,
            slot.options.root_margin,
        ))
    }

    fn refresh(&mut self) {
        let mut queued = Vec::new();
        for slot in &self.slots {
            let Some(entry) = self.measure(slot) else {
                continue;
            };
            let side = entry.meets(slot.options.threshold);
            if side != slot.last_side {
                queued.push((slot.id, side, entry));
            }
        }
        for (id, side, entry) in queued {
            if let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) {
                slot.last_side = side;
            }
            tracing::trace!(slot = id, ratio = entry.ratio, side, "queue intersection entry");
            self.queue.push_back(Pending { slot: id, entry });
        }
    }

    fn remove_slot(&mut self, id: u64) {
        if let Some(pos) = self.slots.iter().position(|s| s.id == id) {
            let slot = self.slots.remove(pos);
            slot.live.set(false);
        }
        self.queue.retain(|p| p.slot != id);
    }
}

/// Scroll-driven intersection host.
///
/// Clones share the same viewport and registrations.
#[derive(Clone)]
pub struct ViewportTracker {
    inner: Rc<RefCell<TrackerInner>>,
    supported: bool,
}

impl ViewportTracker {
    /// Create a tracker for a viewport of `width` x `height` at scroll origin.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(TrackerInner {
                viewport: Rect::new(0.0, 0.0, width, height),
                targets: BTreeMap::new(),
                slots: Vec::new(),
                queue: VecDeque::new(),
                next_slot: 0,
                next_target: 0,
            })),
            supported: true,
        }
    }

    /// A tracker that refuses every registration, standing in for an
    /// environment without viewport observation.
    #[must_use]
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new(0.0, 0.0)
        }
    }

    /// Add a target laid out at `rect` (document coordinates).
    pub fn add_target(&self, rect: Rect) -> TargetId {
        let mut inner = self.inner.borrow_mut();
        let id = TargetId(inner.next_target);
        inner.next_target += 1;
        inner.targets.insert(id, rect);
        id
    }

    /// Move or resize a target after relayout.
    pub fn set_target_rect(&self, target: TargetId, rect: Rect) {
        let mut inner = self.inner.borrow_mut();
        if let Some(slot) = inner.targets.get_mut(&target) {
            *slot = rect;
            inner.refresh();
        }
    }

    /// Remove a target; registrations on it stop receiving entries.
    pub fn remove_target(&self, target: TargetId) {
        self.inner.borrow_mut().targets.remove(&target);
    }

    /// Scroll so the viewport's top edge is at `y`.
    pub fn scroll_to(&self, y: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.viewport.y = y;
        inner.refresh();
    }

    /// Scroll by `dy` pixels.
    pub fn scroll_by(&self, dy: f64) {
        let y = self.inner.borrow().viewport.y + dy;
        self.scroll_to(y);
    }

    /// Resize the viewport, keeping the scroll offset.
    pub fn resize(&self, width: f64, height: f64) {
        let mut inner = self.inner.borrow_mut();
        let vp = inner.viewport;
        inner.viewport = Rect::new(vp.x, vp.y, width, height);
        inner.refresh();
    }

    /// Current viewport rect in document coordinates.
    #[must_use]
    pub fn viewport(&self) -> Rect {
        self.inner.borrow().viewport
    }

    /// Entries waiting for [`dispatch`](Self::dispatch).
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Active registrations.
    #[must_use]
    pub fn registration_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    /// Deliver queued entries, including any queued by callbacks while this
    /// runs. Returns the number of callbacks invoked.
    pub fn dispatch(&self) -> usize {
        let mut delivered = 0;
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let Some(pending) = inner.queue.pop_front() else {
                    break;
                };
                inner
                    .slots
                    .iter()
                    .find(|s| s.id == pending.slot)
                    .map(|s| (pending, s.callback.clone()))
            };
            let Some((pending, weak)) = next else {
                continue;
            };
            let Some(callback) = weak.upgrade() else {
                self.inner.borrow_mut().remove_slot(pending.slot);
                continue;
            };

            tracing::trace!(
                slot = pending.slot,
                ratio = pending.entry.ratio,
                "dispatch intersection entry"
            );
            let flow = (*callback.borrow_mut())(&pending.entry);
            delivered += 1;

            if flow == Observation::Disconnect {
                tracing::trace!(slot = pending.slot, "observer disconnected itself");
                self.inner.borrow_mut().remove_slot(pending.slot);
            }
        }
        delivered
    }
}

impl IntersectionHost for ViewportTracker {
    type Target = TargetId;

    fn observe(
        &self,
        target: &TargetId,
        options: ObserveOptions,
        callback: ObserverCallback,
    ) -> Result<Registration, ObserveError> {
        if !self.supported {
            return Err(ObserveError::Unsupported);
        }

        let callback: SharedCallback = Rc::new(RefCell::new(callback));
        let live = Rc::new(Cell::new(true));
        let id = {
            let mut inner = self.inner.borrow_mut();
            let rect = *inner
                .targets
                .get(target)
                .ok_or_else(|| ObserveError::Host(format!("unknown {target}")))?;
            let id = inner.next_slot;
            inner.next_slot += 1;

            let entry = IntersectionEntry::measure(rect, inner.viewport, options.root_margin);
            inner.slots.push(Slot {
                id,
                target: *target,
                options,
                last_side: entry.meets(options.threshold),
                callback: Rc::downgrade(&callback),
                live: Rc::clone(&live),
            });
            inner.queue.push_back(Pending { slot: id, entry });
            id
        };
        tracing::trace!(slot = id, observed = %target, threshold = options.threshold, "observe");

        let tracker: Weak<RefCell<TrackerInner>> = Rc::downgrade(&self.inner);
        Ok(Registration::new(live, move || {
            // The registration owns the callback; it dies with the guard.
            drop(callback);
            if let Some(inner) = tracker.upgrade() {
                inner.borrow_mut().remove_slot(id);
                tracing::trace!(slot = id, "unobserve");
            }
        }))
    }
}

impl fmt::Debug for ViewportTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ViewportTracker")
            .field("viewport", &inner.viewport)
            .field("targets", &inner.targets.len())
            .field("registrations", &inner.slots.len())
            .field("pending", &inner.queue.len())
            .field("supported", &self.supported)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<f64>>>, ObserverCallback) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        let cb: ObserverCallback = Box::new(move |entry: &IntersectionEntry| {
            l.borrow_mut().push(entry.ratio);
            Observation::Continue
        });
        (log, cb)
    }

    fn threshold(t: f64) -> ObserveOptions {
        ObserveOptions {
            threshold: t,
            ..ObserveOptions::default()
        }
    }

    #[test]
    fn initial_entry_is_queued_not_delivered() {
        let tracker = ViewportTracker::new(800.0, 600.0);
        let target = tracker.add_target(Rect::new(0.0, 1000.0, 800.0, 400.0));
        let (log, cb) = recorder();
        let _reg = tracker.observe(&target, threshold(0.1), cb).unwrap();

        assert!(log.borrow().is_empty());
        assert_eq!(tracker.pending(), 1);
        assert_eq!(tracker.dispatch(), 1);
        assert_eq!(*log.borrow(), vec![0.0]);
    }

    #[test]
    fn entries_only_on_threshold_crossing() {
        let tracker = ViewportTracker::new(800.0, 600.0);
        let target = tracker.add_target(Rect::new(0.0, 1000.0, 800.0, 400.0));
        let (log, cb) = recorder();
        let _reg = tracker.observe(&target, threshold(0.1), cb).unwrap();
        tracker.dispatch();

        // 20px of 400 visible: below threshold, no entry.
        tracker.scroll_to(420.0);
        assert_eq!(tracker.pending(), 0);

        // 100px visible: crosses 0.1.
        tracker.scroll_to(500.0);
        assert_eq!(tracker.pending(), 1);

        // Still above threshold: nothing new.
        tracker.scroll_to(700.0);
        assert_eq!(tracker.pending(), 1);

        tracker.dispatch();
        assert_eq!(log.borrow().len(), 2);
        assert!((log.borrow()[1] - 0.25).abs() < 1e-9);
    }

    #[test]
    fn disconnect_removes_registration() {
        let tracker = ViewportTracker::new(800.0, 600.0);
        let target = tracker.add_target(Rect::new(0.0, 100.0, 800.0, 100.0));
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let reg = tracker
            .observe(
                &target,
                threshold(0.1),
                Box::new(move |_: &IntersectionEntry| {
                    c.set(c.get() + 1);
                    Observation::Disconnect
                }),
            )
            .unwrap();

        tracker.dispatch();
        assert_eq!(calls.get(), 1);
        assert!(!reg.is_active());
        assert_eq!(tracker.registration_count(), 0);

        tracker.scroll_to(5000.0);
        tracker.scroll_to(0.0);
        tracker.dispatch();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn dropping_registration_discards_queued_entries() {
        let tracker = ViewportTracker::new(800.0, 600.0);
        let target = tracker.add_target(Rect::new(0.0, 100.0, 800.0, 100.0));
        let (log, cb) = recorder();
        let reg = tracker.observe(&target, threshold(0.1), cb).unwrap();
        assert_eq!(tracker.pending(), 1);

        drop(reg);
        assert_eq!(tracker.pending(), 0);
        assert_eq!(tracker.registration_count(), 0);
        assert_eq!(tracker.dispatch(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn unsupported_refuses() {
        let tracker = ViewportTracker::unsupported();
        let target = tracker.add_target(Rect::new(0.0, 0.0, 10.0, 10.0));
        let (_, cb) = recorder();
        let err = tracker.observe(&target, threshold(0.1), cb).unwrap_err();
        assert_eq!(err, ObserveError::Unsupported);
    }

    #[test]
    fn unknown_target_is_host_error() {
        let tracker = ViewportTracker::new(800.0, 600.0);
        let (_, cb) = recorder();
        let err = tracker.observe(&TargetId(42), threshold(0.1), cb).unwrap_err();
        assert!(matches!(err, ObserveError::Host(_)));
    }

    #[test]
    fn relayout_and_resize_requeue() {
        let tracker = ViewportTracker::new(800.0, 600.0);
        let target = tracker.add_target(Rect::new(0.0, 700.0, 800.0, 100.0));
        let (log, cb) = recorder();
        let _reg = tracker.observe(&target, threshold(0.5), cb).unwrap();
        tracker.dispatch();

        tracker.resize(800.0, 1000.0);
        tracker.set_target_rect(target, Rect::new(0.0, 2000.0, 800.0, 100.0));
        tracker.dispatch();
        assert_eq!(*log.borrow(), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn callback_may_drop_other_registration() {
        let tracker = ViewportTracker::new(800.0, 600.0);
        let a = tracker.add_target(Rect::new(0.0, 0.0, 100.0, 100.0));
        let b = tracker.add_target(Rect::new(0.0, 0.0, 100.0, 100.0));

        let victim: Rc<RefCell<Option<Registration>>> = Rc::new(RefCell::new(None));
        let v = Rc::clone(&victim);
        let _killer = tracker
            .observe(
                &a,
                threshold(0.1),
                Box::new(move |_: &IntersectionEntry| {
                    v.borrow_mut().take();
                    Observation::Continue
                }),
            )
            .unwrap();
        let (log, cb) = recorder();
        *victim.borrow_mut() = Some(tracker.observe(&b, threshold(0.1), cb).unwrap());

        assert_eq!(tracker.dispatch(), 1);
        assert!(log.borrow().is_empty());
    }

    #[test]
    #[tracing_test::traced_test]
    fn lifecycle_is_traced() {
        let tracker = ViewportTracker::new(800.0, 600.0);
        let target = tracker.add_target(Rect::new(0.0, 0.0, 800.0, 100.0));
        let (_, cb) = recorder();
        let reg = tracker.observe(&target, threshold(0.1), cb).unwrap();
        tracker.dispatch();
        drop(reg);

        assert!(logs_contain("observe"));
        assert!(logs_contain("dispatch intersection entry"));
        assert!(logs_contain("unobserve"));
    }
}
