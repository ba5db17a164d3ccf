#![forbid(unsafe_code)]

//! Splitflap: the row controller.
//!
//! A [`Splitflap`] owns a row of [`Flap`]s. It asks a [`DataSource`] how many
//! flaps to build and which vocabulary each one carries, asks a [`Delegate`]
//! how fast each flap turns and how it is styled, splits text into per-flap
//! tokens and dispatches them with a left-to-right cascade.
//!
//! # Time
//!
//! The row keeps its own clock. [`Splitflap::tick`] advances it, starting
//! cascaded flaps when their delay expires and stepping every flap. A tick is
//! split at each due start time so starts and steps happen in timestamp order.
//!
//! # Invariants
//!
//! 1. `text()` is the concatenation of the tokens placed into flaps by the
//!    last update, or `None` if no token was placed.
//! 2. `reload()` builds the new row first and swaps it in whole. Flaps and
//!    cascaded starts from the old row are settled (their completions run)
//!    and can never touch the new row.
//! 3. The completion passed to [`Splitflap::update_text`] runs exactly once,
//!    after every flap of that update has finished (or been superseded).
//! 4. A newer update supersedes cascaded starts of an older one that have
//!    not begun yet.
//!
//! # Failure Modes
//!
//! - Completions run inside `tick()`/`update_text()`/`reload()` while the row
//!   is mutably borrowed. They must not call back into the row; signal the
//!   owner instead (flag, channel, queue).
//! - A [`FlapId`] from before the last `reload()` is stale; signals sent with
//!   it are ignored.

use std::fmt;
use std::mem;
use std::sync::Arc;

use web_time::Duration;

use crate::animation::{Completion, CompletionGroup, fire};
use crate::flap::{Flap, FlapRenderer};
use crate::parser::TokenParser;
use crate::token::{Token, TokenSets, Vocabulary};

#[cfg(feature = "tracing")]
use crate::logging::{debug, warn};
#[cfg(not(feature = "tracing"))]
use crate::{debug, warn};

/// Rotation duration used when the delegate does not override it.
pub const DEFAULT_ROTATION_DURATION: Duration = Duration::from_millis(200);

/// Flap `i` starts `i * rotation_duration / CASCADE_DIVISOR` after flap 0.
pub const CASCADE_DIVISOR: f64 = 1.1;

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Supplies the shape of the row.
pub trait DataSource {
    /// Number of flaps in the row.
    fn number_of_flaps(&self) -> usize {
        0
    }

    /// Vocabulary carried by the flap at `index`.
    fn vocabulary(&self, _index: usize) -> Vocabulary {
        TokenSets::alphanumeric()
    }
}

/// Supplies per-flap timing and render configuration.
pub trait Delegate<C: Default = ()> {
    /// Length of one step of the flap at `index`.
    fn rotation_duration(&self, _index: usize) -> Duration {
        DEFAULT_ROTATION_DURATION
    }

    /// Render configuration of the flap at `index`.
    fn render_config(&self, _index: usize) -> C {
        C::default()
    }
}

/// Data source with every default: no flaps, alphanumeric vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDataSource;

impl DataSource for DefaultDataSource {}

/// Delegate with every default: 200 ms steps, default render config.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDelegate;

impl<C: Default> Delegate<C> for DefaultDelegate {}

// ---------------------------------------------------------------------------
// Row controller
// ---------------------------------------------------------------------------

/// Handle to one flap of one build of the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlapId {
    generation: u64,
    index: usize,
}

impl FlapId {
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

struct ScheduledStart {
    due: Duration,
    generation: u64,
    index: usize,
    target: Option<Token>,
    duration: Duration,
    on_complete: Option<Completion>,
}

/// A row of split-flap cells.
pub struct Splitflap<R: FlapRenderer> {
    data_source: Box<dyn DataSource>,
    delegate: Box<dyn Delegate<R::Config>>,
    flaps: Vec<Flap<R>>,
    vocabularies: Vec<Vocabulary>,
    parsers: Vec<Arc<TokenParser>>,
    text: Option<String>,
    generation: u64,
    elapsed: Duration,
    scheduled: Vec<ScheduledStart>,
}

impl<R: FlapRenderer> fmt::Debug for Splitflap<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Splitflap")
            .field("flaps", &self.flaps)
            .field("text", &self.text)
            .field("generation", &self.generation)
            .field("elapsed", &self.elapsed)
            .field("pending_starts", &self.scheduled.len())
            .finish()
    }
}

impl<R: FlapRenderer> Default for Splitflap<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: FlapRenderer> Splitflap<R> {
    /// An empty row using the default data source and delegate.
    ///
    /// Nothing is built until [`Splitflap::reload`] is called.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_source: Box::new(DefaultDataSource),
            delegate: Box::new(DefaultDelegate),
            flaps: Vec::new(),
            vocabularies: Vec::new(),
            parsers: Vec::new(),
            text: None,
            generation: 0,
            elapsed: Duration::ZERO,
            scheduled: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_data_source(mut self, data_source: impl DataSource + 'static) -> Self {
        self.set_data_source(data_source);
        self
    }

    #[must_use]
    pub fn with_delegate(mut self, delegate: impl Delegate<R::Config> + 'static) -> Self {
        self.set_delegate(delegate);
        self
    }

    /// Replace the data source. Takes effect on the next reload.
    pub fn set_data_source(&mut self, data_source: impl DataSource + 'static) {
        self.data_source = Box::new(data_source);
    }

    /// Replace the delegate. Durations apply from the next update, render
    /// configuration from the next reload.
    pub fn set_delegate(&mut self, delegate: impl Delegate<R::Config> + 'static) {
        self.delegate = Box::new(delegate);
    }

    // ── Reloading ────────────────────────────────────────────────────

    /// Rebuild the row from the data source and delegate.
    ///
    /// The cached text is shown again, unanimated, on the new flaps. Must not
    /// be relied on mid-animation: in-flight spins are cut short and their
    /// completions run.
    pub fn reload(&mut self) {
        let count = self.data_source.number_of_flaps();
        let vocabularies: Vec<Vocabulary> = (0..count)
            .map(|index| self.data_source.vocabulary(index))
            .collect();
        let parsers = share_parsers(&vocabularies);
        let flaps: Vec<Flap<R>> = vocabularies
            .iter()
            .enumerate()
            .map(|(index, vocabulary)| {
                let config = self.delegate.render_config(index);
                Flap::new(vocabulary.clone(), R::from_config(&config))
            })
            .collect();

        let retired = mem::replace(&mut self.flaps, flaps);
        let stale = mem::take(&mut self.scheduled);
        self.vocabularies = vocabularies;
        self.parsers = parsers;
        self.generation += 1;
        debug!(
            message = "splitflap.reload",
            flaps = count,
            generation = self.generation
        );

        for mut flap in retired {
            flap.detach();
        }
        for start in stale {
            fire(start.on_complete);
        }

        let text = self.text.take();
        self.update_text(text.as_deref(), false, None);
    }

    // ── Text ─────────────────────────────────────────────────────────

    /// The text currently placed into the flaps.
    #[inline]
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Show `text` at once. Shorthand for `update_text(text, false, None)`.
    pub fn set_text(&mut self, text: Option<&str>) {
        self.update_text(text, false, None);
    }

    /// Show `text`, animating the flaps if `animated` is true.
    ///
    /// Text is split flap by flap with each flap's vocabulary; tokens beyond
    /// the flap count, and any tail that never resolves into a token, are
    /// dropped. Flaps without a token go back to their first token.
    ///
    /// `on_complete` runs once every flap has arrived; without animation it
    /// runs before this call returns.
    pub fn update_text(
        &mut self,
        text: Option<&str>,
        animated: bool,
        on_complete: Option<Completion>,
    ) {
        let tokens = self.tokenize(text.unwrap_or_default());
        self.text = if tokens.is_empty() {
            None
        } else {
            Some(tokens.iter().map(Token::as_str).collect())
        };
        debug!(
            message = "splitflap.update_text",
            animated,
            tokens = tokens.len(),
            flaps = self.flaps.len()
        );

        for start in mem::take(&mut self.scheduled) {
            fire(start.on_complete);
        }

        if !animated {
            for (index, flap) in self.flaps.iter_mut().enumerate() {
                flap.display_token(
                    tokens.get(index).map(Token::as_str),
                    Duration::ZERO,
                    None,
                );
            }
            fire(on_complete);
            return;
        }

        let group = on_complete.is_some().then(CompletionGroup::new);
        for index in 0..self.flaps.len() {
            let duration = self.delegate.rotation_duration(index);
            let member = group.as_ref().map(CompletionGroup::enter);
            let target = tokens.get(index).cloned();
            let delay = cascade_delay(index, duration);
            if delay.is_zero() {
                self.flaps[index].display_token(target.as_deref(), duration, member);
            } else {
                self.scheduled.push(ScheduledStart {
                    due: self.elapsed.saturating_add(delay),
                    generation: self.generation,
                    index,
                    target,
                    duration,
                    on_complete: member,
                });
            }
        }
        if let (Some(group), Some(done)) = (group, on_complete) {
            group.notify(done);
        }
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut rest = text;
        let mut tokens = Vec::with_capacity(self.parsers.len());
        for parser in &self.parsers {
            let Some((token, used)) = parser.next_token(rest) else {
                break;
            };
            tokens.push(token);
            rest = &rest[used..];
        }
        tokens
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// Advance the row's clock by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        let end = self.elapsed.saturating_add(dt);
        loop {
            let next_due = self
                .scheduled
                .iter()
                .map(|start| start.due)
                .filter(|due| *due <= end)
                .min();
            let segment_end = next_due.unwrap_or(end);
            let segment = segment_end.saturating_sub(self.elapsed);
            for flap in &mut self.flaps {
                flap.tick(segment);
            }
            self.elapsed = segment_end;
            let Some(now) = next_due else {
                break;
            };
            self.start_due(now);
        }
    }

    fn start_due(&mut self, now: Duration) {
        let (mut due, waiting): (Vec<_>, Vec<_>) = mem::take(&mut self.scheduled)
            .into_iter()
            .partition(|start| start.due <= now);
        self.scheduled = waiting;
        due.sort_by_key(|start| start.index);
        for start in due {
            match self.flaps.get_mut(start.index) {
                Some(flap) if start.generation == self.generation => {
                    flap.display_token(start.target.as_deref(), start.duration, start.on_complete);
                }
                _ => fire(start.on_complete),
            }
        }
    }

    /// Deliver an external "step finished" signal to one flap.
    ///
    /// Returns `false` if the id is stale or the flap was idle.
    pub fn finish_step(&mut self, id: FlapId) -> bool {
        if id.generation != self.generation {
            warn!(
                message = "splitflap.stale_step",
                index = id.index,
                generation = id.generation,
                current = self.generation
            );
            return false;
        }
        self.flaps
            .get_mut(id.index)
            .is_some_and(|flap| flap.finish_step())
    }

    // ── Introspection ────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub fn number_of_flaps(&self) -> usize {
        self.flaps.len()
    }

    /// Vocabulary of each flap, as fetched by the last reload.
    #[inline]
    #[must_use]
    pub fn vocabularies(&self) -> &[Vocabulary] {
        &self.vocabularies
    }

    #[inline]
    #[must_use]
    pub fn flap(&self, index: usize) -> Option<&Flap<R>> {
        self.flaps.get(index)
    }

    #[inline]
    pub fn flap_mut(&mut self, index: usize) -> Option<&mut Flap<R>> {
        self.flaps.get_mut(index)
    }

    #[inline]
    #[must_use]
    pub fn flaps(&self) -> &[Flap<R>] {
        &self.flaps
    }

    /// Handle for the flap at `index` in the current build.
    #[must_use]
    pub fn flap_id(&self, index: usize) -> Option<FlapId> {
        (index < self.flaps.len()).then_some(FlapId {
            generation: self.generation,
            index,
        })
    }

    /// Whether any flap is spinning or waiting for its cascade start.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.scheduled.is_empty() || self.flaps.iter().any(Flap::is_spinning)
    }

    /// Cascaded starts that have not begun yet.
    #[inline]
    #[must_use]
    pub fn pending_starts(&self) -> usize {
        self.scheduled.len()
    }

    /// Time accumulated by [`Splitflap::tick`].
    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// One parser per distinct vocabulary, shared by every flap that uses it.
fn share_parsers(vocabularies: &[Vocabulary]) -> Vec<Arc<TokenParser>> {
    let mut parsers: Vec<Arc<TokenParser>> = Vec::with_capacity(vocabularies.len());
    for vocabulary in vocabularies {
        let shared = parsers
            .iter()
            .find(|parser| parser.vocabulary() == vocabulary)
            .map(Arc::clone)
            .unwrap_or_else(|| Arc::new(TokenParser::new(vocabulary.clone())));
        parsers.push(shared);
    }
    parsers
}

fn cascade_delay(index: usize, duration: Duration) -> Duration {
    let secs = duration.as_secs_f64() * index as f64 / CASCADE_DIVISOR;
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
