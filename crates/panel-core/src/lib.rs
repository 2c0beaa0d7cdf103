#![cfg_attr(not(test), no_std)]

//! Frame-buffer encoding and multiplexed refresh engine for MBI5034-based
//! LED panels.
//!
//! Four panels, two serial data lines each, are driven from one byte-wide
//! frame buffer: 4 banks of 384 cells, one bit per data line per cell.
//! Each panel is scanned as 4 row-interleave banks (bank 0 lights rows
//! 0 & 4, bank 1 rows 1 & 5, and so on); exactly one bank is lit at a
//! time, and a full pass over all 4 banks refreshes the whole 64x64
//! logical image.
//!
//! The buffer is written by the application side ([`FrameBuffer::set_pixel`],
//! [`FrameBuffer::fill`], or `embedded-graphics` through [`Panel`]) and read
//! concurrently by the periodic scan-out ([`ScanEngine::scan`]). Cells are
//! atomic bytes accessed with relaxed loads and stores, so a write that
//! races a scan in progress shows up at most one refresh late; nothing
//! tears and nothing blocks.

pub mod color;
pub mod framebuffer;
pub mod graphics;
pub mod scan;

pub use color::Rgb3;
pub use framebuffer::{FrameBuffer, BANKS, CELLS_PER_BANK, HEIGHT, LINE_MAP, PLANE_STRIDE, WIDTH};
pub use graphics::Panel;
pub use scan::ScanEngine;
