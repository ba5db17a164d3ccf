#![forbid(unsafe_code)]

//! Flap: the per-cell state machine.
//!
//! A [`Flap`] owns a [`TokenCursor`] and walks it, one token per animation
//! step, until the cursor shows the requested target. Drawing is delegated to
//! a [`FlapRenderer`].
//!
//! # States
//!
//! - **Idle**: no target; the current token is shown statically.
//! - **Spinning**: a target is set; exactly one step animation is in flight.
//!
//! # Step protocol
//!
//! Each step is started with [`FlapRenderer::render_animated`]. The step ends
//! when its [`StepClock`] runs out during [`Flap::tick`], or when the host
//! calls [`Flap::finish_step`] directly. On step end the flap decides, in a
//! loop rather than by recursion, whether to stop (target reached) or start
//! the next step.
//!
//! # Invariants
//!
//! 1. A flap never runs two step animations at once.
//! 2. Every completion handed to [`Flap::display_token`] runs exactly once:
//!    on reaching the target, when superseded by a newer request, or when the
//!    flap is detached.
//! 3. Immediate (zero-duration) requests always complete before returning.
//! 4. A target outside the vocabulary, or no target at all, means the
//!    vocabulary's first token.
//!
//! # Failure Modes
//!
//! - Empty vocabulary: nothing is ever rendered; every request completes
//!   immediately.
//! - `finish_step()` while idle: ignored.

use std::fmt;

use web_time::Duration;

use crate::animation::{Completion, StepClock, fire};
use crate::cursor::TokenCursor;
use crate::token::{Token, Vocabulary};

#[cfg(feature = "tracing")]
use crate::logging::{debug, trace};
#[cfg(not(feature = "tracing"))]
use crate::{debug, trace};

// ---------------------------------------------------------------------------
// Render contract
// ---------------------------------------------------------------------------

/// Drawing side of a flap, implemented by the host UI.
pub trait FlapRenderer {
    /// Per-flap visual configuration, supplied by the row's delegate.
    type Config: Clone + Default;

    /// Build a renderer for one flap.
    fn from_config(config: &Self::Config) -> Self
    where
        Self: Sized;

    /// Show `token` at once, without animation.
    fn render_immediate(&mut self, token: &Token);

    /// Start flipping to `token` over `duration`.
    fn render_animated(&mut self, token: &Token, duration: Duration);

    /// Progress of the running step, in `[0.0, 1.0]`.
    fn step_progress(&mut self, _progress: f32) {}

    /// The running step has ended.
    fn animation_finished(&mut self) {}

    /// The flap is being discarded by a rebuild of its row.
    fn detach(&mut self) {}
}

/// A renderer that draws nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullRenderer;

impl FlapRenderer for NullRenderer {
    type Config = ();

    fn from_config(_config: &()) -> Self {
        Self
    }

    fn render_immediate(&mut self, _token: &Token) {}

    fn render_animated(&mut self, _token: &Token, _duration: Duration) {}
}

// ---------------------------------------------------------------------------
// Flap
// ---------------------------------------------------------------------------

/// Coarse state of a flap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlapPhase {
    Idle,
    Spinning,
}

/// One split-flap cell.
pub struct Flap<R> {
    cursor: TokenCursor,
    renderer: R,
    target: Option<Token>,
    pending: Option<Completion>,
    step_duration: Duration,
    clock: StepClock,
}

impl<R: FlapRenderer> fmt::Debug for Flap<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flap")
            .field("current", &self.cursor.current())
            .field("target", &self.target)
            .field("phase", &self.phase())
            .field("clock", &self.clock)
            .field("completion_pending", &self.pending.is_some())
            .finish()
    }
}

impl<R: FlapRenderer> Flap<R> {
    /// Create a flap resting on the vocabulary's first token.
    pub fn new(vocabulary: Vocabulary, mut renderer: R) -> Self {
        let cursor = TokenCursor::new(vocabulary);
        if let Some(first) = cursor.first() {
            renderer.render_immediate(first);
        }
        Self {
            cursor,
            renderer,
            target: None,
            pending: None,
            step_duration: Duration::ZERO,
            clock: StepClock::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> FlapPhase {
        if self.target.is_some() {
            FlapPhase::Spinning
        } else {
            FlapPhase::Idle
        }
    }

    #[inline]
    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.target.is_some()
    }

    /// The token currently on the wheel.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&Token> {
        self.cursor.current()
    }

    /// Where the running spin is headed.
    #[inline]
    #[must_use]
    pub fn target(&self) -> Option<&Token> {
        self.target.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        self.cursor.vocabulary()
    }

    /// Steps left before the target shows; 0 when idle.
    #[must_use]
    pub fn steps_remaining(&self) -> usize {
        self.target
            .as_ref()
            .and_then(|target| self.cursor.distance_to(target))
            .unwrap_or(0)
    }

    /// Clock of the step in flight.
    #[inline]
    #[must_use]
    pub fn step_clock(&self) -> &StepClock {
        &self.clock
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[inline]
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Show `target`, flipping through intermediate tokens if
    /// `rotation_duration` is non-zero.
    ///
    /// While spinning, a new request redirects the running spin instead of
    /// restarting it; the previous completion runs at once.
    pub fn display_token(
        &mut self,
        target: Option<&str>,
        rotation_duration: Duration,
        on_complete: Option<Completion>,
    ) {
        let target = self.sanitize(target);

        if rotation_duration.is_zero() {
            let superseded = self.cancel_spin();
            if let Some(token) = &target {
                self.cursor.set_current(token);
                self.renderer.render_immediate(token);
            }
            fire(superseded);
            fire(on_complete);
            return;
        }

        let Some(target) = target else {
            let superseded = self.cancel_spin();
            fire(superseded);
            fire(on_complete);
            return;
        };

        self.step_duration = rotation_duration;
        if self.is_spinning() {
            debug!(message = "flap.spin.redirect", target = %target);
            self.target = Some(target);
            fire(self.pending.take());
            self.pending = on_complete;
            return;
        }

        debug!(
            message = "flap.spin.start",
            target = %target,
            steps = self.cursor.distance_to(&target).unwrap_or(0)
        );
        self.target = Some(target);
        self.pending = on_complete;
        self.next_step();
    }

    /// Advance the running step by `dt`, starting further steps as earlier
    /// ones complete.
    pub fn tick(&mut self, dt: Duration) {
        let mut remaining = dt;
        while self.is_spinning() {
            let overflow = self.clock.advance(remaining);
            self.renderer.step_progress(self.clock.progress());
            if !self.clock.is_complete() {
                break;
            }
            self.end_step();
            if overflow.is_zero() {
                break;
            }
            remaining = overflow;
        }
    }

    /// Deliver the "step animation finished" signal from outside.
    ///
    /// Returns `false` if the flap was idle and the signal was ignored.
    pub fn finish_step(&mut self) -> bool {
        if !self.is_spinning() {
            return false;
        }
        self.end_step();
        true
    }

    /// Stop any spin and run the pending completion.
    ///
    /// Called when the owning row discards this flap.
    pub fn detach(&mut self) {
        let superseded = self.cancel_spin();
        self.renderer.detach();
        fire(superseded);
    }

    fn sanitize(&self, target: Option<&str>) -> Option<Token> {
        let vocabulary = self.cursor.vocabulary();
        target
            .and_then(|token| vocabulary.position(token))
            .and_then(|index| vocabulary.get(index))
            .or_else(|| vocabulary.first())
            .cloned()
    }

    fn cancel_spin(&mut self) -> Option<Completion> {
        self.target = None;
        self.clock = StepClock::default();
        self.pending.take()
    }

    fn end_step(&mut self) {
        self.renderer.animation_finished();
        self.next_step();
    }

    /// Stop if the target shows, otherwise start one more step.
    fn next_step(&mut self) {
        let reached = match (&self.target, self.cursor.current()) {
            (Some(target), Some(current)) => target == current,
            _ => true,
        };
        if reached {
            self.finish_spin();
            return;
        }
        let Some(token) = self.cursor.next().cloned() else {
            self.finish_spin();
            return;
        };
        trace!(message = "flap.step", token = %token);
        self.renderer.render_animated(&token, self.step_duration);
        self.clock.restart(self.step_duration);
    }

    fn finish_spin(&mut self) {
        debug!(message = "flap.spin.finish");
        self.target = None;
        self.clock = StepClock::default();
        fire(self.pending.take());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const MS_10: Duration = Duration::from_millis(10);
    const MS_25: Duration = Duration::from_millis(25);
    const MS_100: Duration = Duration::from_millis(100);

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Immediate(String),
        Animated(String, Duration),
        Finished,
        Detached,
    }

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<Call>,
        last_progress: Option<f32>,
    }

    impl FlapRenderer for Recorder {
        type Config = ();

        fn from_config(_config: &()) -> Self {
            Self::default()
        }

        fn render_immediate(&mut self, token: &Token) {
            self.calls.push(Call::Immediate(token.to_string()));
        }

        fn render_animated(&mut self, token: &Token, duration: Duration) {
            self.calls.push(Call::Animated(token.to_string(), duration));
        }

        fn step_progress(&mut self, progress: f32) {
            self.last_progress = Some(progress);
        }

        fn animation_finished(&mut self) {
            self.calls.push(Call::Finished);
        }

        fn detach(&mut self) {
            self.calls.push(Call::Detached);
        }
    }

    fn abcd() -> Flap<Recorder> {
        Flap::new(Vocabulary::new(["a", "b", "c", "d"]), Recorder::default())
    }

    fn counter() -> (Rc<Cell<usize>>, Completion) {
        let count = Rc::new(Cell::new(0));
        let handle = Rc::clone(&count);
        (count, Box::new(move || handle.set(handle.get() + 1)))
    }

    fn animated(flap: &Flap<Recorder>) -> Vec<String> {
        flap.renderer()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Animated(token, _) => Some(token.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn new_flap_renders_first_token() {
        let flap = abcd();
        assert_eq!(flap.renderer().calls, vec![Call::Immediate("a".into())]);
        assert_eq!(flap.phase(), FlapPhase::Idle);
    }

    #[test]
    fn immediate_update_completes_synchronously() {
        let mut flap = abcd();
        let (count, done) = counter();
        flap.display_token(Some("c"), Duration::ZERO, Some(done));
        assert_eq!(count.get(), 1);
        assert_eq!(flap.current().map(Token::as_str), Some("c"));
        assert_eq!(flap.phase(), FlapPhase::Idle);
        assert_eq!(
            flap.renderer().calls.last(),
            Some(&Call::Immediate("c".into()))
        );
    }

    #[test]
    fn absent_or_unknown_target_snaps_to_first() {
        let mut flap = abcd();
        flap.display_token(Some("c"), Duration::ZERO, None);
        flap.display_token(None, Duration::ZERO, None);
        assert_eq!(flap.current().map(Token::as_str), Some("a"));
        flap.display_token(Some("c"), Duration::ZERO, None);
        flap.display_token(Some("zz"), Duration::ZERO, None);
        assert_eq!(flap.current().map(Token::as_str), Some("a"));
    }

    #[test]
    fn spins_through_intermediate_tokens() {
        let mut flap = abcd();
        let (count, done) = counter();
        flap.display_token(Some("c"), MS_100, Some(done));
        assert!(flap.is_spinning());
        assert_eq!(flap.target().map(Token::as_str), Some("c"));
        assert_eq!(animated(&flap), vec!["b"]);

        flap.tick(MS_100);
        assert_eq!(animated(&flap), vec!["b", "c"]);
        assert_eq!(count.get(), 0);

        flap.tick(MS_100);
        assert_eq!(count.get(), 1);
        assert_eq!(flap.phase(), FlapPhase::Idle);
        assert_eq!(flap.current().map(Token::as_str), Some("c"));
    }

    #[test]
    fn spin_wraps_to_reach_earlier_token() {
        let mut flap = abcd();
        flap.display_token(Some("c"), Duration::ZERO, None);
        flap.display_token(Some("b"), MS_10, None);
        flap.tick(Duration::from_secs(1));
        assert_eq!(animated(&flap), vec!["d", "a", "b"]);
        assert!(!flap.is_spinning());
    }

    #[test]
    fn already_at_target_completes_without_spinning() {
        let mut flap = abcd();
        let (count, done) = counter();
        flap.display_token(Some("a"), MS_100, Some(done));
        assert_eq!(count.get(), 1);
        assert!(animated(&flap).is_empty());
    }

    #[test]
    fn redirect_fires_superseded_completion_once() {
        let mut flap = abcd();
        let (first, first_done) = counter();
        let (second, second_done) = counter();

        flap.display_token(Some("d"), MS_100, Some(first_done));
        flap.tick(MS_25);
        flap.display_token(Some("c"), MS_100, Some(second_done));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
        // The step in flight is not restarted.
        assert_eq!(animated(&flap), vec!["b"]);

        flap.tick(Duration::from_secs(10));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
        assert_eq!(flap.current().map(Token::as_str), Some("c"));
    }

    #[test]
    fn immediate_request_cancels_spin() {
        let mut flap = abcd();
        let (first, first_done) = counter();
        let (second, second_done) = counter();
        flap.display_token(Some("d"), MS_100, Some(first_done));
        flap.display_token(Some("b"), Duration::ZERO, Some(second_done));
        assert_eq!((first.get(), second.get()), (1, 1));
        assert!(!flap.is_spinning());
        flap.tick(Duration::from_secs(1));
        assert_eq!(flap.current().map(Token::as_str), Some("b"));
    }

    #[test]
    fn tick_carries_overflow_into_next_step() {
        let mut flap = abcd();
        flap.display_token(Some("d"), MS_100, None);
        flap.tick(Duration::from_millis(250));
        assert_eq!(animated(&flap), vec!["b", "c", "d"]);
        assert_eq!(flap.step_clock().elapsed(), Duration::from_millis(50));
        assert!(flap.is_spinning());
        let progress = flap.renderer().last_progress.unwrap_or_default();
        assert!((progress - 0.5).abs() < 1e-6);
    }

    #[test]
    fn finish_step_drives_without_clock() {
        let mut flap = abcd();
        flap.display_token(Some("c"), MS_100, None);
        assert!(flap.finish_step());
        assert!(flap.finish_step());
        assert!(!flap.is_spinning());
        assert!(!flap.finish_step());
        let finished = flap
            .renderer()
            .calls
            .iter()
            .filter(|call| **call == Call::Finished)
            .count();
        assert_eq!(finished, 2);
    }

    #[test]
    fn steps_remaining_counts_down() {
        let mut flap = abcd();
        flap.display_token(Some("d"), MS_100, None);
        assert_eq!(flap.steps_remaining(), 2);
        flap.finish_step();
        assert_eq!(flap.steps_remaining(), 1);
        flap.finish_step();
        flap.finish_step();
        assert_eq!(flap.steps_remaining(), 0);
    }

    #[test]
    fn empty_vocabulary_completes_everything() {
        let mut flap = Flap::new(Vocabulary::empty(), Recorder::default());
        let (count, done) = counter();
        flap.display_token(Some("a"), MS_100, Some(done));
        assert_eq!(count.get(), 1);
        assert!(!flap.is_spinning());
        assert!(flap.renderer().calls.is_empty());
        assert_eq!(flap.current(), None);
    }

    #[test]
    fn detach_settles_pending_completion() {
        let mut flap = abcd();
        let (count, done) = counter();
        flap.display_token(Some("d"), MS_100, Some(done));
        flap.detach();
        assert_eq!(count.get(), 1);
        assert!(!flap.is_spinning());
        assert_eq!(flap.renderer().calls.last(), Some(&Call::Detached));
    }

    #[test]
    fn long_spin_does_not_recurse() {
        let vocabulary: Vocabulary = (0..10_000).map(|i: u32| i.to_string()).collect();
        let mut flap = Flap::new(vocabulary, NullRenderer);
        let (count, done) = counter();
        flap.display_token(Some("9999"), Duration::from_micros(1), Some(done));
        flap.tick(Duration::from_secs(1));
        assert_eq!(count.get(), 1);
        assert_eq!(flap.current().map(Token::as_str), Some("9999"));
    }
}
