#![forbid(unsafe_code)]

//! Tiles: the two halves of a flap.
//!
//! A flap is drawn as a top tile over a bottom tile. The token glyph sits
//! on the first row of the bottom tile; the top tile's last row carries the
//! hinge line when there is room for it.

use flap_core::Token;
use flap_render::{Buffer, Rect};
use unicode_width::UnicodeWidthStr;

use crate::style::FlapStyle;

/// Which half of a flap a tile is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TilePosition {
    Top,
    Bottom,
}

/// One half of a flap showing (its part of) a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    position: TilePosition,
    token: Option<Token>,
}

impl Tile {
    #[must_use]
    pub const fn new(position: TilePosition) -> Self {
        Self {
            position,
            token: None,
        }
    }

    #[inline]
    pub const fn position(&self) -> TilePosition {
        self.position
    }

    #[inline]
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn set_token(&mut self, token: Option<Token>) {
        self.token = token;
    }

    /// Draw into `area`.
    ///
    /// `folding` darkens the tile; `hinge` paints the top tile's last row in
    /// the hinge line color.
    pub fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        style: &FlapStyle,
        folding: bool,
        hinge: bool,
    ) {
        if area.is_empty() {
            return;
        }
        let template = style.cell(folding);
        buf.fill(area, template);

        match self.position {
            TilePosition::Top => {
                if hinge {
                    let line = Rect::new(area.x, area.bottom() - 1, area.width, 1);
                    buf.fill(line, template.with_bg(style.line_color()));
                }
            }
            TilePosition::Bottom => {
                let Some(token) = &self.token else {
                    return;
                };
                let width = u16::try_from(UnicodeWidthStr::width(token.as_str()))
                    .unwrap_or(u16::MAX);
                let x = area.x.saturating_add(style.alignment().offset(area.width, width));
                buf.set_str(x, area.y, token, template, area.right());
            }
        }
    }
}

/// Top and bottom tiles showing the same token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePair {
    pub top: Tile,
    pub bottom: Tile,
}

impl Default for TilePair {
    fn default() -> Self {
        Self::new()
    }
}

impl TilePair {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            top: Tile::new(TilePosition::Top),
            bottom: Tile::new(TilePosition::Bottom),
        }
    }

    pub fn set_token(&mut self, token: Option<&Token>) {
        self.top.set_token(token.cloned());
        self.bottom.set_token(token.cloned());
    }

    #[inline]
    pub fn token(&self) -> Option<&Token> {
        self.bottom.token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flap_render::PackedRgba;

    use crate::style::Alignment;

    fn pair(token: &str) -> TilePair {
        let mut pair = TilePair::new();
        pair.set_token(Some(&Token::from(token)));
        pair
    }

    #[test]
    fn bottom_tile_draws_centered_glyph() {
        let mut buf = Buffer::new(5, 2);
        let style = FlapStyle::new();
        pair("A")
            .bottom
            .render(Rect::new(0, 0, 5, 2), &mut buf, &style, false, false);
        assert_eq!(buf.row_text(0), "  A  ");
        assert_eq!(buf.row_text(1), "     ");
        assert_eq!(buf.get(0, 1).map(|c| c.bg), Some(PackedRgba::BLACK));
    }

    #[test]
    fn alignment_moves_glyph() {
        let mut buf = Buffer::new(5, 1);
        let style = FlapStyle::new().with_alignment(Alignment::Right);
        pair("12")
            .bottom
            .render(Rect::new(0, 0, 5, 1), &mut buf, &style, false, false);
        assert_eq!(buf.row_text(0), "   12");
    }

    #[test]
    fn top_tile_has_no_glyph_and_optional_hinge() {
        let style = FlapStyle::new();
        let mut buf = Buffer::new(3, 2);
        pair("A")
            .top
            .render(Rect::new(0, 0, 3, 2), &mut buf, &style, false, true);
        assert_eq!(buf.row_text(0), "   ");
        assert_eq!(buf.get(0, 0).map(|c| c.bg), Some(PackedRgba::BLACK));
        assert_eq!(buf.get(0, 1).map(|c| c.bg), Some(PackedRgba::DARK_GRAY));

        let mut buf = Buffer::new(3, 2);
        pair("A")
            .top
            .render(Rect::new(0, 0, 3, 2), &mut buf, &style, false, false);
        assert_eq!(buf.get(0, 1).map(|c| c.bg), Some(PackedRgba::BLACK));
    }

    #[test]
    fn empty_tile_draws_background_only() {
        let mut buf = Buffer::new(3, 1);
        TilePair::new()
            .bottom
            .render(Rect::new(0, 0, 3, 1), &mut buf, &FlapStyle::new(), false, false);
        assert_eq!(buf.row_text(0), "   ");
        assert_eq!(buf.get(1, 0).map(|c| c.bg), Some(PackedRgba::BLACK));
    }

    #[test]
    fn empty_area_is_noop() {
        let mut buf = Buffer::new(2, 1);
        pair("A")
            .bottom
            .render(Rect::new(0, 0, 0, 1), &mut buf, &FlapStyle::new(), false, false);
        assert_eq!(buf, Buffer::new(2, 1));
    }
}
