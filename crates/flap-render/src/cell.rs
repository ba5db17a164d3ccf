#![forbid(unsafe_code)]

//! Cell types and invariants.
//!
//! A [`Cell`] is one terminal column of one row: a glyph plus colors and
//! style flags. Wide glyphs occupy two cells; the second holds
//! [`Cell::CONTINUATION`].

/// A compact RGBA color.
///
/// - **Layout:** `0xRRGGBBAA` (R in bits 31..24, A in bits 7..0).
///
/// Straight alpha storage (RGB channels are not pre-multiplied). Compositing
/// uses Porter-Duff **SourceOver** (`src over dst`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    pub const TRANSPARENT: Self = Self(0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const DARK_GRAY: Self = Self::rgb(64, 64, 64);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    const fn div_round_u8(numer: u64, denom: u64) -> u8 {
        let v = (numer + (denom / 2)) / denom;
        if v > 255 { 255 } else { v as u8 }
    }

    /// Porter-Duff SourceOver: `src over dst`.
    ///
    /// Computed in exact rational form and rounded once at the end.
    #[inline]
    pub fn over(self, dst: Self) -> Self {
        let s_a = self.a() as u64;
        if s_a == 255 {
            return self;
        }
        if s_a == 0 {
            return dst;
        }

        let d_a = dst.a() as u64;
        let inv_s_a = 255 - s_a;

        // numer_a = 255*s_a + d_a*(255 - s_a), i.e. out_a scaled by 255^2.
        let numer_a = 255 * s_a + d_a * inv_s_a;
        let out_a = Self::div_round_u8(numer_a, 255);
        let channel = |src: u8, dst: u8| {
            Self::div_round_u8(
                (src as u64) * s_a * 255 + (dst as u64) * d_a * inv_s_a,
                numer_a,
            )
        };

        Self::rgba(
            channel(self.r(), dst.r()),
            channel(self.g(), dst.g()),
            channel(self.b(), dst.b()),
            out_a,
        )
    }

    /// Apply uniform opacity in `[0.0, 1.0]` by scaling alpha.
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        let a = ((self.a() as f32) * opacity).round().clamp(0.0, 255.0) as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }

    /// Darken toward black by `amount` in `[0.0, 1.0]`, keeping alpha.
    #[inline]
    pub fn shade(self, amount: f32) -> Self {
        let shadow = Self::BLACK.with_opacity(amount);
        let opaque = Self::rgb(self.r(), self.g(), self.b());
        let shaded = shadow.over(opaque);
        Self::rgba(shaded.r(), shaded.g(), shaded.b(), self.a())
    }
}

bitflags::bitflags! {
    /// Style flags a flap cell can carry.
    ///
    /// `DIM` marks rows of a half that is mid-fold; `BOLD` is the only
    /// caller-chosen emphasis.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD = 1;
        const DIM  = 1 << 1;
    }
}

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub fg: PackedRgba,
    pub bg: PackedRgba,
    pub flags: StyleFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// A blank cell: space, white on transparent, no flags.
    pub const EMPTY: Self = Self {
        ch: ' ',
        fg: PackedRgba::WHITE,
        bg: PackedRgba::TRANSPARENT,
        flags: StyleFlags::empty(),
    };

    /// Glyph stored in the trailing cell of a wide glyph.
    pub const CONTINUATION_CHAR: char = '\0';

    /// Trailing half of a wide glyph.
    pub const CONTINUATION: Self = Self {
        ch: Self::CONTINUATION_CHAR,
        ..Self::EMPTY
    };

    #[inline]
    #[must_use]
    pub const fn from_char(ch: char) -> Self {
        Self { ch, ..Self::EMPTY }
    }

    #[inline]
    #[must_use]
    pub const fn with_char(self, ch: char) -> Self {
        Self { ch, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn with_fg(self, fg: PackedRgba) -> Self {
        Self { fg, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn with_bg(self, bg: PackedRgba) -> Self {
        Self { bg, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn with_flags(self, flags: StyleFlags) -> Self {
        Self { flags, ..self }
    }

    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.ch == Self::CONTINUATION_CHAR
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, PackedRgba, StyleFlags};

    fn reference_over(src: PackedRgba, dst: PackedRgba) -> PackedRgba {
        let sr = src.r() as f64 / 255.0;
        let sg = src.g() as f64 / 255.0;
        let sb = src.b() as f64 / 255.0;
        let sa = src.a() as f64 / 255.0;

        let dr = dst.r() as f64 / 255.0;
        let dg = dst.g() as f64 / 255.0;
        let db = dst.b() as f64 / 255.0;
        let da = dst.a() as f64 / 255.0;

        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return PackedRgba::TRANSPARENT;
        }

        let out_r = (sr * sa + dr * da * (1.0 - sa)) / out_a;
        let out_g = (sg * sa + dg * da * (1.0 - sa)) / out_a;
        let out_b = (sb * sa + db * da * (1.0 - sa)) / out_a;

        let to_u8 = |x: f64| -> u8 { (x * 255.0).round().clamp(0.0, 255.0) as u8 };
        PackedRgba::rgba(to_u8(out_r), to_u8(out_g), to_u8(out_b), to_u8(out_a))
    }

    #[test]
    fn rgba_round_trips_components() {
        let c = PackedRgba::rgba(10, 20, 30, 40);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (10, 20, 30, 40));
        assert_eq!(PackedRgba::rgb(1, 2, 3).a(), 255);
    }

    #[test]
    fn over_with_opaque_or_transparent_src() {
        let dst = PackedRgba::rgba(9, 8, 7, 200);
        let opaque = PackedRgba::rgba(1, 2, 3, 255);
        assert_eq!(opaque.over(dst), opaque);
        assert_eq!(PackedRgba::TRANSPARENT.over(dst), dst);
    }

    #[test]
    fn over_matches_reference_for_partial_alpha() {
        let cases = [
            (
                PackedRgba::rgba(255, 0, 0, 128),
                PackedRgba::rgba(0, 0, 255, 255),
            ),
            (
                PackedRgba::rgba(200, 10, 10, 64),
                PackedRgba::rgba(10, 200, 10, 128),
            ),
            (
                PackedRgba::rgba(100, 0, 200, 200),
                PackedRgba::rgba(0, 120, 30, 50),
            ),
        ];
        for (src, dst) in cases {
            assert_eq!(src.over(dst), reference_over(src, dst));
        }
    }

    #[test]
    fn with_opacity_scales_alpha() {
        let c = PackedRgba::rgba(10, 20, 30, 255);
        assert_eq!(c.with_opacity(0.5).a(), 128);
        assert_eq!(c.with_opacity(-1.0).a(), 0);
        assert_eq!(c.with_opacity(2.0).a(), 255);
    }

    #[test]
    fn shade_darkens_and_keeps_alpha() {
        let c = PackedRgba::rgba(200, 100, 50, 77);
        assert_eq!(c.shade(0.0), c);
        let half = c.shade(0.5);
        assert_eq!(half.a(), 77);
        assert!(half.r() < c.r() && half.g() < c.g() && half.b() < c.b());
        let black = c.shade(1.0);
        assert_eq!((black.r(), black.g(), black.b()), (0, 0, 0));
    }

    #[test]
    fn cell_builders() {
        let cell = Cell::from_char('A')
            .with_fg(PackedRgba::rgb(1, 2, 3))
            .with_bg(PackedRgba::BLACK)
            .with_flags(StyleFlags::BOLD | StyleFlags::DIM);
        assert_eq!(cell.ch, 'A');
        assert_eq!(cell.fg, PackedRgba::rgb(1, 2, 3));
        assert_eq!(cell.bg, PackedRgba::BLACK);
        assert!(cell.flags.contains(StyleFlags::DIM));
        assert!(!cell.is_continuation());
        assert!(Cell::CONTINUATION.is_continuation());
        assert_eq!(Cell::default(), Cell::EMPTY);
    }
}
