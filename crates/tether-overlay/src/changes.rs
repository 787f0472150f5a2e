#![forbid(unsafe_code)]

//! Position-change stream.
//!
//! # Design
//!
//! [`PositionChanges`] is a single-threaded listener list shared through
//! `Rc<RefCell<..>>`. The strategy emits one event per apply, synchronously,
//! right after the styles were written, so a listener always observes the
//! state the event describes.
//!
//! # Invariants
//!
//! 1. Listeners are called in registration order.
//! 2. Dropping a [`Subscription`] stops delivery; the dead entry is pruned on
//!    the next emit.
//! 3. After [`PositionChanges::complete`] nothing is delivered and new
//!    subscriptions are inert.
//!
//! # Failure Modes
//!
//! - **Re-entrant apply**: calling back into the strategy from a listener is
//!   a borrow error at the call site (the strategy is `&mut` during apply).
//!   Listeners should record what they need and act afterwards.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::position::ConnectedOverlayPositionChange;

type ListenerRc = Rc<dyn Fn(&ConnectedOverlayPositionChange)>;
type ListenerWeak = Weak<dyn Fn(&ConnectedOverlayPositionChange)>;

struct ChangesInner {
    listeners: Vec<ListenerWeak>,
    last: Option<ConnectedOverlayPositionChange>,
    emitted: u64,
    completed: bool,
}

/// Handle to a strategy's position-change stream.
///
/// Cloning yields another handle to the same stream.
#[derive(Clone)]
pub struct PositionChanges {
    inner: Rc<RefCell<ChangesInner>>,
}

impl std::fmt::Debug for PositionChanges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("PositionChanges")
            .field("listeners", &inner.listeners.len())
            .field("emitted", &inner.emitted)
            .field("completed", &inner.completed)
            .finish()
    }
}

impl Default for PositionChanges {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionChanges {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ChangesInner {
                listeners: Vec::new(),
                last: None,
                emitted: 0,
                completed: false,
            })),
        }
    }

    /// Register a listener. Delivery stops when the returned guard drops.
    pub fn subscribe(
        &self,
        listener: impl Fn(&ConnectedOverlayPositionChange) + 'static,
    ) -> Subscription {
        let strong: ListenerRc = Rc::new(listener);
        let mut inner = self.inner.borrow_mut();
        if !inner.completed {
            inner.listeners.push(Rc::downgrade(&strong));
        }
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Most recent event, if any.
    #[must_use]
    pub fn last(&self) -> Option<ConnectedOverlayPositionChange> {
        self.inner.borrow().last.clone()
    }

    /// Number of events emitted so far.
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.inner.borrow().emitted
    }

    /// Live listeners (dead entries not yet pruned are included).
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.inner.borrow().completed
    }

    /// True when at least one listener is still alive.
    pub fn has_listeners(&self) -> bool {
        self.inner
            .borrow()
            .listeners
            .iter()
            .any(|w| w.strong_count() > 0)
    }

    pub(crate) fn emit(&self, change: ConnectedOverlayPositionChange) {
        let listeners: Vec<ListenerRc> = {
            let mut inner = self.inner.borrow_mut();
            if inner.completed {
                return;
            }
            inner.listeners.retain(|w| w.strong_count() > 0);
            inner.emitted += 1;
            inner.last = Some(change.clone());
            inner.listeners.iter().filter_map(Weak::upgrade).collect()
        };

        for listener in &listeners {
            listener(&change);
        }
    }

    /// Close the stream and drop every listener.
    pub(crate) fn complete(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.completed = true;
        inner.listeners.clear();
    }
}

/// RAII guard for a position-change listener.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
