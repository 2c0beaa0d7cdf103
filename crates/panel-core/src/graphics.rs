use core::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::Pixel;

use crate::color::Rgb3;
use crate::framebuffer::{FrameBuffer, HEIGHT, WIDTH};

/// `embedded-graphics` draw target over a shared [`FrameBuffer`].
///
/// Points outside the 64x64 logical image are dropped here, as the
/// `DrawTarget` contract requires; the raw [`FrameBuffer::set_pixel`]
/// keeps its coordinate-aliasing behavior for callers that want it.
pub struct Panel<'a> {
    frame: &'a FrameBuffer,
}

impl<'a> Panel<'a> {
    pub fn new(frame: &'a FrameBuffer) -> Self {
        Panel { frame }
    }
}

impl OriginDimensions for Panel<'_> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Panel<'_> {
    type Color = Rgb3;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if (0..WIDTH as i32).contains(&point.x) && (0..HEIGHT as i32).contains(&point.y) {
                self.frame.set_pixel(point.x as u8, point.y as u8, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.frame.fill_color(color);
        Ok(())
    }
}
