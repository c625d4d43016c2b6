/// Straight-alpha RGBA color with `f32` channels in `[0, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const MAGENTA: Rgba = Rgba::new(1.0, 0.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from 8-bit channels.
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    #[inline]
    pub fn r_u8(self) -> u8 {
        channel_u8(self.r)
    }

    #[inline]
    pub fn g_u8(self) -> u8 {
        channel_u8(self.g)
    }

    #[inline]
    pub fn b_u8(self) -> u8 {
        channel_u8(self.b)
    }

    #[inline]
    pub fn a_u8(self) -> u8 {
        channel_u8(self.a)
    }

    /// Packs the color as `0xRRGGBBAA`.
    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.r_u8(), self.g_u8(), self.b_u8(), self.a_u8()])
    }
}

#[inline]
fn channel_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
