use embedded_graphics::pixelcolor::raw::{RawData, RawU4};
use embedded_graphics::pixelcolor::PixelColor;

/// 3-bit color, one bit per channel: bit 0 red, bit 1 green, bit 2 blue.
///
/// Each channel is simply on or off; the panel hardware has no PWM depth
/// beyond that.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb3(u8);

impl Rgb3 {
    pub const BLACK: Rgb3 = Rgb3(0b000);
    pub const RED: Rgb3 = Rgb3(0b001);
    pub const GREEN: Rgb3 = Rgb3(0b010);
    pub const YELLOW: Rgb3 = Rgb3(0b011);
    pub const BLUE: Rgb3 = Rgb3(0b100);
    pub const MAGENTA: Rgb3 = Rgb3(0b101);
    pub const CYAN: Rgb3 = Rgb3(0b110);
    pub const WHITE: Rgb3 = Rgb3(0b111);

    /// Builds a color from conventional 8-bit channels by keeping only
    /// each channel's most significant bit.
    pub const fn from_channels(red: u8, green: u8, blue: u8) -> Self {
        Rgb3((red >> 7) | ((green & 0x80) >> 6) | ((blue & 0x80) >> 5))
    }

    /// The raw 3-bit value.
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl PixelColor for Rgb3 {
    type Raw = RawU4;
}

impl From<RawU4> for Rgb3 {
    fn from(raw: RawU4) -> Self {
        Rgb3(raw.into_inner() & 0b111)
    }
}

impl From<Rgb3> for RawU4 {
    fn from(color: Rgb3) -> Self {
        RawU4::new(color.0)
    }
}
