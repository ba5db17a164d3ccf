#![forbid(unsafe_code)]

//! Split-flap board widget.
//!
//! Lays the flaps of a [`Splitflap`] row out left to right and draws each
//! one's [`FlapView`]:
//!
//! ```text
//! width_per_flap = (width - spacing * (n - 1)) / n
//! ```
//!
//! Leftover columns on the right stay untouched.

use flap_core::Splitflap;
use flap_render::{Buffer, Rect};
#[cfg(feature = "tracing")]
use web_time::Instant;

use crate::Widget;
use crate::flap_view::FlapView;

/// Default gap between flaps, in cells.
pub const DEFAULT_FLAP_SPACING: u16 = 1;

/// Draws a whole row of flaps.
#[derive(Debug, Clone, Copy)]
pub struct SplitflapBoard<'a> {
    row: &'a Splitflap<FlapView>,
    flap_spacing: u16,
}

impl<'a> SplitflapBoard<'a> {
    #[must_use]
    pub fn new(row: &'a Splitflap<FlapView>) -> Self {
        Self {
            row,
            flap_spacing: DEFAULT_FLAP_SPACING,
        }
    }

    /// Set the gap between neighbouring flaps.
    #[must_use]
    pub fn flap_spacing(mut self, spacing: u16) -> Self {
        self.flap_spacing = spacing;
        self
    }

    /// Area of each flap inside `area`, in row order.
    pub fn layout(&self, area: Rect) -> impl Iterator<Item = Rect> {
        area.columns(self.flap_count(), self.flap_spacing)
    }

    fn flap_count(&self) -> u16 {
        u16::try_from(self.row.number_of_flaps()).unwrap_or(u16::MAX)
    }
}

impl Widget for SplitflapBoard<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        #[cfg(feature = "tracing")]
        let render_start = Instant::now();

        if area.is_empty() || self.row.number_of_flaps() == 0 {
            return;
        }

        #[cfg(feature = "tracing")]
        let render_span = tracing::debug_span!(
            "splitflap_board.render",
            flaps = self.row.number_of_flaps(),
            width = area.width,
            render_duration_us = tracing::field::Empty
        );
        #[cfg(feature = "tracing")]
        let _render_guard = render_span.enter();

        for (flap, column) in self.row.flaps().iter().zip(self.layout(area)) {
            flap.renderer().render(column, buf);
        }

        #[cfg(feature = "tracing")]
        {
            let elapsed_us = render_start.elapsed().as_micros() as u64;
            render_span.record("render_duration_us", elapsed_us);
        }
    }
}
