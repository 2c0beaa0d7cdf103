use embedded_graphics::geometry::Point;
use embedded_graphics::primitives::{Primitive, PrimitiveStyle, Triangle};
use embedded_graphics::Drawable;

use panel_core::{FrameBuffer, Panel, Rgb3, HEIGHT, WIDTH};

/// Lines swept before the test pattern is shown again.
const SWEEP_LINES: u8 = 15;

/// Ticks the test pattern stays up between sweep cycles (1 s at 5 ms/tick).
const PATTERN_HOLD_TICKS: u16 = 200;

/// Demo animation: a single red pixel sweeps the panel row by row, and a
/// concentric-triangles test pattern is held between sweep cycles.
pub struct DemoState {
    x: u8,
    y: u8,
    hold: u16,
}

impl DemoState {
    pub const fn new() -> Self {
        DemoState { x: 0, y: 0, hold: 0 }
    }

    /// Advances the animation by one step. Returns the pixel just lit, or
    /// `None` while the test pattern is on display.
    pub fn step(&mut self, frame: &FrameBuffer) -> Option<(u8, u8)> {
        if self.hold > 0 {
            self.hold -= 1;
            if self.hold == 0 {
                frame.fill(0);
            }
            return None;
        }

        frame.fill(0);
        frame.set_pixel(self.x, self.y, Rgb3::RED);
        let lit = (self.x, self.y);

        self.x += 1;
        if self.x == WIDTH {
            self.x = 0;
            self.y += 1;
            if self.y == SWEEP_LINES {
                self.y = 0;
                self.hold = PATTERN_HOLD_TICKS;
                draw_test_pattern(frame);
            }
        }
        Some(lit)
    }
}

/// Concentric red triangles centered on the panel, drawn through the
/// `embedded-graphics` boundary.
fn draw_test_pattern(frame: &FrameBuffer) {
    frame.fill(0);
    let mut panel = Panel::new(frame);
    let cx = i32::from(WIDTH) / 2 - 1;
    let cy = i32::from(HEIGHT) / 2 - 1;

    let mut i = 0;
    while i < cx {
        Triangle::new(
            Point::new(cx, cy - i),
            Point::new(cx - i, cy + i),
            Point::new(cx + i, cy + i),
        )
        .into_styled(PrimitiveStyle::with_stroke(Rgb3::RED, 1))
        .draw(&mut panel)
        .unwrap();
        i += 4;
    }
}
