//! Colour packing for the matrix transport.
//!
//! The matrix LEDs take 24-bit words in G-R-B order, green in the high byte.
//! [`GrbColor`] holds a colour already packed in that layout, so rendering is a
//! plain copy into the pixel buffer.
//!
//! Conversions to and from `palette::Srgb<u8>` are provided for code that works
//! with ordinary RGB triples, such as the indicator LED.

use palette::Srgb;

/// A colour packed as `0x00GGRRBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GrbColor(u32);

impl GrbColor {
    /// All channels off.
    pub const OFF: Self = GrbColor(0);

    /// Packs three 8-bit channels.
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        GrbColor(((green as u32) << 16) | ((red as u32) << 8) | (blue as u32))
    }

    /// Wraps an already packed value. Bits above the low 24 are discarded.
    #[inline]
    pub const fn from_packed(raw: u32) -> Self {
        GrbColor(raw & 0x00FF_FFFF)
    }

    /// Returns the packed 24-bit value.
    #[inline]
    pub const fn packed(&self) -> u32 {
        self.0
    }

    /// Returns the 32-bit word a WS2812 shift-out program expects: the packed
    /// value left-aligned, most significant bit sent first.
    #[inline]
    pub const fn to_ws2812_word(&self) -> u32 {
        self.0 << 8
    }

    pub const fn red(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn green(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn blue(&self) -> u8 {
        self.0 as u8
    }
}

/// Packs three 8-bit channels into the transport layout.
#[inline]
pub const fn color(red: u8, green: u8, blue: u8) -> GrbColor {
    GrbColor::new(red, green, blue)
}

impl From<Srgb<u8>> for GrbColor {
    fn from(rgb: Srgb<u8>) -> Self {
        GrbColor::new(rgb.red, rgb.green, rgb.blue)
    }
}

impl From<GrbColor> for Srgb<u8> {
    fn from(grb: GrbColor) -> Self {
        Srgb::new(grb.red(), grb.green(), grb.blue())
    }
}

/// Dim green shown while the field lies fallow.
pub const FALLOW: GrbColor = color(0, 3, 0);

/// Brighter green for freshly planted rows.
pub const PLANTING: GrbColor = color(0, 7, 0);

/// Blue-green tint while irrigating.
pub const IRRIGATION: GrbColor = color(0, 3, 7);

/// Bright green for the harvest.
pub const HARVEST: GrbColor = color(0, 15, 0);
