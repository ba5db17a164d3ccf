#![forbid(unsafe_code)]

//! Buffer: a row-major grid of [`Cell`]s.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height` at all times.
//! 2. Writes outside the grid are dropped, never panic.
//! 3. A wide glyph is written only if both of its cells fit; its trailing
//!    cell holds [`Cell::CONTINUATION`].

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::cell::Cell;
use crate::geometry::Rect;

/// A fixed-size grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// A blank buffer.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width as usize * height as usize],
        }
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The whole buffer as a rectangle at the origin.
    #[inline]
    pub const fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Write one cell; out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Fill `area` (clipped to the buffer) with `cell`.
    pub fn fill(&mut self, area: Rect, cell: Cell) {
        let area = area.intersection(&self.area());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Reset every cell to [`Cell::EMPTY`].
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Draw `text` starting at `(x, y)`, stopping before `max_x`.
    ///
    /// Each grapheme takes its display width in cells, using its first
    /// `char` as the glyph and `template`'s colors and flags. Zero-width
    /// graphemes are skipped. Returns the column after the last drawn cell.
    pub fn set_str(&mut self, mut x: u16, y: u16, text: &str, template: Cell, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        for grapheme in text.graphemes(true) {
            let width = UnicodeWidthStr::width(grapheme) as u16;
            if width == 0 {
                continue;
            }
            if x.saturating_add(width) > max_x {
                break;
            }
            let Some(ch) = grapheme.chars().next() else {
                continue;
            };
            self.set(x, y, template.with_char(ch));
            for offset in 1..width {
                self.set(x + offset, y, Cell::CONTINUATION.with_fg(template.fg).with_bg(template.bg));
            }
            x += width;
        }
        x
    }

    /// The glyphs of row `y`, skipping wide-glyph continuations.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.is_continuation())
            .map(|cell| cell.ch)
            .collect()
    }
}
