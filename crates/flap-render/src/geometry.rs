#![forbid(unsafe_code)]

//! Rectangles in cell coordinates.

/// An axis-aligned rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of cells covered.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// One past the last column (saturating).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// One past the last row (saturating).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Overlap of two rectangles; empty (at `self`'s origin) if disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return Self::new(self.x, self.y, 0, 0);
        }
        Self::new(x, y, right - x, bottom - y)
    }

    /// Rows `[top, top + height)` of this rectangle, clipped.
    #[must_use]
    pub fn rows(&self, top: u16, height: u16) -> Self {
        let top = top.min(self.height);
        let height = height.min(self.height - top);
        Self::new(self.x, self.y.saturating_add(top), self.width, height)
    }

    /// Split into `count` columns separated by `spacing` cells.
    ///
    /// Every column gets `(width - spacing * (count - 1)) / count` cells; the
    /// remainder is left unused on the right.
    pub fn columns(self, count: u16, spacing: u16) -> impl Iterator<Item = Self> {
        let gaps = spacing.saturating_mul(count.saturating_sub(1));
        let column = if count == 0 {
            0
        } else {
            self.width.saturating_sub(gaps) / count
        };
        let stride = column.saturating_add(spacing);
        (0..count).map(move |i| {
            let x = self.x.saturating_add(stride.saturating_mul(i));
            let width = column.min(self.right().saturating_sub(x));
            Self::new(x, self.y, width, self.height)
        })
    }
}
