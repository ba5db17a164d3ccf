#![forbid(unsafe_code)]

//! Completion group: a join barrier over many one-shot completions.
//!
//! A [`CompletionGroup`] hands out member completions with
//! [`enter()`](CompletionGroup::enter). Each member, when called, leaves the
//! group. The callback registered with [`notify()`](CompletionGroup::notify)
//! runs once the count of outstanding members returns to zero.
//!
//! # Usage
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use flap_core::animation::CompletionGroup;
//!
//! let done = Rc::new(Cell::new(false));
//! let group = CompletionGroup::new();
//! let a = group.enter();
//! let b = group.enter();
//!
//! let flag = Rc::clone(&done);
//! group.notify(Box::new(move || flag.set(true)));
//!
//! a();
//! assert!(!done.get());
//! b();
//! assert!(done.get());
//! ```
//!
//! # Invariants
//!
//! 1. Every member completion leaves exactly once (it is `FnOnce`).
//! 2. The notify callback runs at most once.
//! 3. Notifying an idle group (nothing outstanding) runs the callback
//!    immediately.
//! 4. The callback never runs while the group's state is borrowed, so it may
//!    freely enter new members into the same group.
//!
//! # Failure Modes
//!
//! - A member completion that is dropped without being called never leaves;
//!   the group then never notifies. Owners that discard members must call
//!   them instead (the row controller does this when it rebuilds).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::Completion;

#[derive(Default)]
struct GroupState {
    outstanding: usize,
    notify: Option<Completion>,
}

/// Shared join counter with a single notify callback.
///
/// Cloning creates a new handle to the **same** group.
#[derive(Clone, Default)]
pub struct CompletionGroup {
    state: Rc<RefCell<GroupState>>,
}

impl fmt::Debug for CompletionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("CompletionGroup")
            .field("outstanding", &state.outstanding)
            .field("notify_pending", &state.notify.is_some())
            .finish()
    }
}

impl CompletionGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a member and return the completion that releases it.
    #[must_use]
    pub fn enter(&self) -> Completion {
        self.state.borrow_mut().outstanding += 1;
        let group = self.clone();
        Box::new(move || group.leave())
    }

    /// Run `completion` once every member has left.
    ///
    /// Replaces any previously registered callback that has not run yet.
    pub fn notify(&self, completion: Completion) {
        {
            let mut state = self.state.borrow_mut();
            if state.outstanding > 0 {
                state.notify = Some(completion);
                return;
            }
        }
        completion();
    }

    /// Members that have entered but not left.
    #[inline]
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.state.borrow().outstanding
    }

    /// Whether nothing is outstanding.
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.outstanding() == 0
    }

    fn leave(&self) {
        let ready = {
            let mut state = self.state.borrow_mut();
            state.outstanding = state.outstanding.saturating_sub(1);
            if state.outstanding == 0 {
                state.notify.take()
            } else {
                None
            }
        };
        super::fire(ready);
    }
}
