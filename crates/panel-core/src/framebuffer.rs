use core::sync::atomic::{AtomicU8, Ordering};

use crate::color::Rgb3;

/// Number of row-interleave banks; bank `n` lights physical rows `n` and
/// `n + 4` of every 8-row group.
pub const BANKS: usize = 4;

/// Cells per bank: 64 LEDs x 2 sub-rows x 3 color bits.
pub const CELLS_PER_BANK: usize = 384;

/// Byte distance between the three color planes of one pixel group.
pub const PLANE_STRIDE: usize = 16;

/// Logical image width in pixels.
pub const WIDTH: u8 = 64;

/// Logical image height in pixels.
pub const HEIGHT: u8 = 64;

/// Maps a row-group selector (`y >> 3`, 0..8) to the single-bit mask of the
/// output line carrying that row group's serial data. Reordering entries
/// changes which panel shows which part of the image; the table itself is
/// fixed wiring configuration.
pub const LINE_MAP: [u8; 8] = [0x01, 0x02, 0x40, 0x80, 0x10, 0x20, 0x04, 0x08];

/// Byte-wide frame buffer for four 2-data-line panels.
///
/// One bit per cell per data line, so all four panels are updated from a
/// single sequential pass per bank. Cells are atomic bytes: the scan
/// interrupt reads while the application writes, with no lock. Both sides
/// use relaxed loads and stores only; the application is the sole writer,
/// so the read-modify-write in [`set_pixel`](FrameBuffer::set_pixel) never
/// races another writer.
pub struct FrameBuffer {
    banks: [[AtomicU8; CELLS_PER_BANK]; BANKS],
}

impl FrameBuffer {
    pub const fn new() -> Self {
        const ZERO: AtomicU8 = AtomicU8::new(0);
        const BANK: [AtomicU8; CELLS_PER_BANK] = [ZERO; CELLS_PER_BANK];
        FrameBuffer {
            banks: [BANK; BANKS],
        }
    }

    /// Overwrites every cell in every bank with `value`.
    ///
    /// A scan in progress picks the new contents up mid-pass at worst;
    /// the next full pass shows them everywhere.
    pub fn fill(&self, value: u8) {
        for bank in &self.banks {
            for cell in bank {
                cell.store(value, Ordering::Relaxed);
            }
        }
    }

    /// Sets every pixel to `color` in one pass over the raw cells.
    ///
    /// A bank is laid out as 16-byte plane regions repeating red, green,
    /// blue, so the plane a cell belongs to is `(offset / 16) % 3` and a
    /// solid color is a per-region constant.
    pub fn fill_color(&self, color: Rgb3) {
        for bank in &self.banks {
            for (offset, cell) in bank.iter().enumerate() {
                let plane = (offset / PLANE_STRIDE) % 3;
                let value = if color.bits() & (1 << plane) != 0 { 0xff } else { 0 };
                cell.store(value, Ordering::Relaxed);
            }
        }
    }

    /// Reads one cell. `bank` and `offset` are in range by construction on
    /// every internal path (the encoder masks, the scan loop counts).
    pub fn cell(&self, bank: usize, offset: usize) -> u8 {
        self.banks[bank][offset].load(Ordering::Relaxed)
    }

    /// Sets one logical pixel to a 3-bit color.
    ///
    /// The x coordinate is split into a column within an 8-wide group
    /// (`x & 7`) and a group index; each group occupies 6 bytes across the
    /// color-plane and half-row layout, and `(y & 4) * 2` selects between
    /// the two half-rows stored side by side in the same bank. The low two
    /// bits of y pick the bank, and bits 3..6 of y pick which output line
    /// carries the pixel via [`LINE_MAP`]. The three color bits land at
    /// [`PLANE_STRIDE`] intervals, LSB (red) first.
    ///
    /// Coordinates are masked into the 64x64 logical space, so out-of-range
    /// input aliases onto a valid pixel instead of failing.
    pub fn set_pixel(&self, x: u8, y: u8, color: Rgb3) {
        let x = (x & 0x3f) as usize;
        let y = y as usize;

        let offset = (x & 7) + (x & 0xf8) * 6 + (y & 4) * 2;
        let bank = &self.banks[y & 3];
        let mask = LINE_MAP[(y & 0x3f) >> 3];

        let mut bits = color.bits();
        for plane in 0..3 {
            let cell = &bank[offset + plane * PLANE_STRIDE];
            let old = cell.load(Ordering::Relaxed);
            let new = if bits & 1 != 0 { old | mask } else { old & !mask };
            cell.store(new, Ordering::Relaxed);
            bits >>= 1;
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        FrameBuffer::new()
    }
}
