#![forbid(unsafe_code)]

//! Animation primitives: completions, completion groups, and step clocks.
//!
//! Everything here is single-threaded. Callbacks run on the thread that
//! drives [`crate::splitflap::Splitflap::tick`].

pub mod clock;
pub mod group;

pub use clock::StepClock;
pub use group::CompletionGroup;

/// A one-shot completion callback.
pub type Completion = Box<dyn FnOnce() + 'static>;

/// Invoke an optional completion.
#[inline]
pub(crate) fn fire(completion: Option<Completion>) {
    if let Some(completion) = completion {
        completion();
    }
}
