#![forbid(unsafe_code)]

//! Flap view: the terminal renderer of one flap.
//!
//! Two tile pairs, *tic* and *tac*, alternate roles. The **front** pair shows
//! the token at rest; during a step the **back** pair receives the incoming
//! token. When the step ends the roles swap, so the incoming token becomes
//! the front without copying.
//!
//! # Fold geometry
//!
//! For a step at progress `p`:
//!
//! - `p < 3/4`: the front top tile folds down toward the hinge, uncovering
//!   the back top tile row by row.
//! - `p >= 3/4`: the back bottom tile falls over the front bottom tile,
//!   covering it from the hinge downward, and the glyph changes.
//!
//! Rows in motion are drawn dimmed.
//!
//! # Invariants
//!
//! 1. At rest both pairs hold the same token.
//! 2. At most one step is in flight; a new step replaces the back token.

use flap_core::{FlapRenderer, Token};
use flap_render::{Buffer, Rect};
use web_time::Duration;

use crate::Widget;
use crate::style::FlapStyle;
use crate::tile::TilePair;

/// Share of a step spent folding the top half.
pub const TOP_FOLD_SHARE: f32 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Tic,
    Tac,
}

/// Renderer for one flap, drawn with [`Widget::render`].
#[derive(Debug, Clone)]
pub struct FlapView {
    style: FlapStyle,
    tic: TilePair,
    tac: TilePair,
    front: Side,
    animating: bool,
    progress: f32,
    step_duration: Duration,
    detached: bool,
}

impl FlapView {
    #[must_use]
    pub fn new(style: FlapStyle) -> Self {
        Self {
            style,
            tic: TilePair::new(),
            tac: TilePair::new(),
            front: Side::Tic,
            animating: false,
            progress: 0.0,
            step_duration: Duration::ZERO,
            detached: false,
        }
    }

    #[inline]
    pub fn style(&self) -> &FlapStyle {
        &self.style
    }

    pub fn front(&self) -> &TilePair {
        match self.front {
            Side::Tic => &self.tic,
            Side::Tac => &self.tac,
        }
    }

    pub fn back(&self) -> &TilePair {
        match self.front {
            Side::Tic => &self.tac,
            Side::Tac => &self.tic,
        }
    }

    fn back_mut(&mut self) -> &mut TilePair {
        match self.front {
            Side::Tic => &mut self.tac,
            Side::Tac => &mut self.tic,
        }
    }

    /// Token shown at rest (the outgoing token while animating).
    #[inline]
    pub fn token(&self) -> Option<&Token> {
        self.front().token()
    }

    /// Token arriving with the current step.
    pub fn incoming(&self) -> Option<&Token> {
        self.animating.then(|| self.back().token()).flatten()
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Length of the step last started.
    #[inline]
    pub fn step_duration(&self) -> Duration {
        self.step_duration
    }

    /// Whether the owning row has discarded this view.
    #[inline]
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    fn swap(&mut self) {
        self.front = match self.front {
            Side::Tic => Side::Tac,
            Side::Tac => Side::Tic,
        };
    }
}

impl FlapRenderer for FlapView {
    type Config = FlapStyle;

    fn from_config(config: &FlapStyle) -> Self {
        Self::new(*config)
    }

    fn render_immediate(&mut self, token: &Token) {
        self.back_mut().set_token(Some(token));
        self.swap();
        self.back_mut().set_token(Some(token));
        self.animating = false;
        self.progress = 0.0;
    }

    fn render_animated(&mut self, token: &Token, duration: Duration) {
        self.back_mut().set_token(Some(token));
        self.animating = true;
        self.progress = 0.0;
        self.step_duration = duration;
    }

    fn step_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    fn animation_finished(&mut self) {
        if !self.animating {
            return;
        }
        self.swap();
        let token = self.front().token().cloned();
        self.back_mut().set_token(token.as_ref());
        self.animating = false;
        self.progress = 0.0;
    }

    fn detach(&mut self) {
        self.detached = true;
        self.animating = false;
    }
}

/// Fractions `(top_folded, bottom_covered)` of each half at `progress`.
fn fold_fractions(progress: f32) -> (f32, f32) {
    let progress = progress.clamp(0.0, 1.0);
    let top = (progress / TOP_FOLD_SHARE).min(1.0);
    let bottom = ((progress - TOP_FOLD_SHARE) / (1.0 - TOP_FOLD_SHARE)).clamp(0.0, 1.0);
    (top, bottom)
}

fn rows_for(fraction: f32, height: u16) -> u16 {
    ((fraction * height as f32).ceil() as u16).min(height)
}

impl Widget for FlapView {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let top_height = area.height / 2;
        let top = area.rows(0, top_height);
        let bottom = area.rows(top_height, area.height - top_height);
        let hinge = area.height >= 3;
        let style = &self.style;
        let front = self.front();

        if !self.animating {
            front.top.render(top, buf, style, false, hinge);
            front.bottom.render(bottom, buf, style, false, false);
            return;
        }

        let back = self.back();
        let (folded, covered) = fold_fractions(self.progress);

        back.top.render(top, buf, style, false, hinge);
        let front_rows = top_height - rows_for(folded, top_height);
        if front_rows > 0 {
            let folding = folded > 0.0;
            front.top.render(
                top.rows(top_height - front_rows, front_rows),
                buf,
                style,
                folding,
                hinge,
            );
        }

        front.bottom.render(bottom, buf, style, false, false);
        let back_rows = rows_for(covered, bottom.height);
        if back_rows > 0 {
            back.bottom
                .render(bottom.rows(0, back_rows), buf, style, covered < 1.0, false);
        }
    }
}
