#![forbid(unsafe_code)]

//! Commit listeners with RAII unsubscription.
//!
//! # Design
//!
//! [`Subscribers<T>`] stores callbacks as `Weak` references. The strong
//! `Rc` lives inside the [`Subscription`] guard handed back to the caller,
//! so dropping the guard is all it takes to unsubscribe. Dead entries are
//! pruned lazily on the next [`notify`](Subscribers::notify).
//!
//! # Invariants
//!
//! 1. Live callbacks are invoked in registration order.
//! 2. A callback whose guard was dropped is never invoked again.
//! 3. Callbacks may subscribe new listeners while being notified; the new
//!    listeners see the next notification, not the current one.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

/// A list of weakly-held listeners for values of type `T`.
pub struct Subscribers<T> {
    callbacks: RefCell<Vec<CallbackWeak<T>>>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            callbacks: RefCell::new(Vec::new()),
        }
    }
}

impl<T> std::fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("registered", &self.callbacks.borrow().len())
            .finish()
    }
}

impl<T: 'static> Subscribers<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Keep the returned guard alive to stay subscribed.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        self.callbacks.borrow_mut().push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Invoke every live listener with `value`. Returns how many ran.
    pub fn notify(&self, value: &T) -> usize {
        // Collect first so callbacks can re-enter `subscribe`.
        let live: Vec<CallbackRc<T>> = {
            let mut callbacks = self.callbacks.borrow_mut();
            callbacks.retain(|w| w.strong_count() > 0);
            callbacks.iter().filter_map(Weak::upgrade).collect()
        };
        for cb in &live {
            cb(value);
        }
        live.len()
    }

    /// Forget every listener. Outstanding guards become inert.
    pub fn clear(&self) {
        self.callbacks.borrow_mut().clear();
    }

    /// Registered listeners, including dead ones not yet pruned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// RAII guard for a listener. Dropping it unsubscribes.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
