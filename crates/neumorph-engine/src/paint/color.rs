/// Straight-alpha sRGB color, one byte per channel.
///
/// Hosts usually hand colors over as packed `0xAARRGGBB` integers; use
/// [`Color::from_argb`] for those. Conversion to tiny-skia (which premultiplies
/// on its own) happens at paint time via [`Color::to_skia`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_rgba8(0, 0, 0, 0);
    pub const BLACK: Color = Color::from_rgba8(0, 0, 0, 255);
    pub const WHITE: Color = Color::from_rgba8(255, 255, 255, 255);

    #[inline]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB bytes.
    #[inline]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Unpacks a `0xAARRGGBB` integer.
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    #[inline]
    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_unpacks_channels() {
        let c = Color::from_argb(0x80_11_22_33);
        assert_eq!(c, Color::from_rgba8(0x11, 0x22, 0x33, 0x80));
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        assert_eq!(Color::WHITE.with_alpha(0), Color::from_rgba8(255, 255, 255, 0));
    }
}
