#![forbid(unsafe_code)]

//! Visual configuration of one flap.

use flap_render::{Cell, PackedRgba, StyleFlags};

/// Horizontal placement of a token inside its flap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    /// Column offset of content `content_width` wide inside `available`.
    #[inline]
    pub const fn offset(self, available: u16, content_width: u16) -> u16 {
        let slack = available.saturating_sub(content_width);
        match self {
            Self::Left => 0,
            Self::Center => slack / 2,
            Self::Right => slack,
        }
    }
}

/// Colors, flags and alignment of a flap.
///
/// Defaults: white text on black, dark grey hinge line, centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlapStyle {
    background: PackedRgba,
    text_color: PackedRgba,
    line_color: PackedRgba,
    flags: StyleFlags,
    alignment: Alignment,
}

impl Default for FlapStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl FlapStyle {
    /// Amount of darkening applied to folding tiles.
    pub const FOLD_SHADE: f32 = 0.45;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            background: PackedRgba::BLACK,
            text_color: PackedRgba::WHITE,
            line_color: PackedRgba::DARK_GRAY,
            flags: StyleFlags::empty(),
            alignment: Alignment::Center,
        }
    }

    #[must_use]
    pub const fn with_background(mut self, color: PackedRgba) -> Self {
        self.background = color;
        self
    }

    #[must_use]
    pub const fn with_text_color(mut self, color: PackedRgba) -> Self {
        self.text_color = color;
        self
    }

    /// Color of the hinge line between the two halves.
    #[must_use]
    pub const fn with_line_color(mut self, color: PackedRgba) -> Self {
        self.line_color = color;
        self
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub const fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[inline]
    pub const fn background(&self) -> PackedRgba {
        self.background
    }

    #[inline]
    pub const fn text_color(&self) -> PackedRgba {
        self.text_color
    }

    #[inline]
    pub const fn line_color(&self) -> PackedRgba {
        self.line_color
    }

    #[inline]
    pub const fn flags(&self) -> StyleFlags {
        self.flags
    }

    #[inline]
    pub const fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Template cell for a tile, darkened and dimmed while it folds.
    pub fn cell(&self, folding: bool) -> Cell {
        let cell = Cell::EMPTY
            .with_fg(self.text_color)
            .with_bg(self.background)
            .with_flags(self.flags);
        if folding {
            cell.with_bg(self.background.shade(Self::FOLD_SHADE))
                .with_flags(self.flags | StyleFlags::DIM)
        } else {
            cell
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let style = FlapStyle::default();
        assert_eq!(style.background(), PackedRgba::BLACK);
        assert_eq!(style.text_color(), PackedRgba::WHITE);
        assert_eq!(style.line_color(), PackedRgba::DARK_GRAY);
        assert!(style.flags().is_empty());
        assert_eq!(style.alignment(), Alignment::Center);
    }

    #[test]
    fn builder_sets_fields() {
        let style = FlapStyle::new()
            .with_background(PackedRgba::rgb(10, 20, 30))
            .with_text_color(PackedRgba::rgb(200, 200, 0))
            .with_line_color(PackedRgba::rgb(1, 1, 1))
            .with_flags(StyleFlags::BOLD)
            .with_alignment(Alignment::Right);
        assert_eq!(style.background(), PackedRgba::rgb(10, 20, 30));
        assert_eq!(style.text_color(), PackedRgba::rgb(200, 200, 0));
        assert_eq!(style.line_color(), PackedRgba::rgb(1, 1, 1));
        assert_eq!(style.flags(), StyleFlags::BOLD);
        assert_eq!(style.alignment(), Alignment::Right);
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(Alignment::Left.offset(10, 4), 0);
        assert_eq!(Alignment::Center.offset(10, 4), 3);
        assert_eq!(Alignment::Right.offset(10, 4), 6);
        assert_eq!(Alignment::Center.offset(2, 4), 0);
    }

    #[test]
    fn folding_cell_is_dimmed() {
        let style = FlapStyle::new()
            .with_background(PackedRgba::rgb(100, 100, 100))
            .with_flags(StyleFlags::BOLD);
        let still = style.cell(false);
        let folding = style.cell(true);
        assert_eq!(still.bg, PackedRgba::rgb(100, 100, 100));
        assert!(folding.bg.r() < 100);
        assert!(folding.flags.contains(StyleFlags::DIM | StyleFlags::BOLD));
    }
}
