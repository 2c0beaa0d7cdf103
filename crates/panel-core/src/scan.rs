use embedded_hal::digital::v2::OutputPin;

use crate::framebuffer::{FrameBuffer, BANKS, CELLS_PER_BANK};

fn set_level<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), P::Error> {
    if high {
        pin.set_high()
    } else {
        pin.set_low()
    }
}

/// Multiplexed refresh engine: clocks one bank of the frame buffer onto the
/// panel data lines per call and cycles through the 4 banks in strict
/// round-robin order.
///
/// Generic over the output-pin trait so the firmware can hand it HAL pins
/// while tests drive it with recording mocks. The two 4-line data buses
/// carry the low and high nibble of each cell; panels 1-2 are wired to one
/// bus, panels 3-4 to the other.
pub struct ScanEngine<P: OutputPin> {
    data_lo: [P; 4],
    data_hi: [P; 4],
    clock: P,
    latch: P,
    blank: P,
    addr0: P,
    addr1: P,
    bank: usize,
}

impl<P: OutputPin> ScanEngine<P> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        data_lo: [P; 4],
        data_hi: [P; 4],
        clock: P,
        latch: P,
        blank: P,
        addr0: P,
        addr1: P,
    ) -> Self {
        ScanEngine {
            data_lo,
            data_hi,
            clock,
            latch,
            blank,
            addr0,
            addr1,
            bank: 0,
        }
    }

    /// The bank the next call to [`scan`](ScanEngine::scan) will stream.
    pub fn bank(&self) -> usize {
        self.bank
    }

    /// Runs one scan cycle: streams all 384 cells of the current bank,
    /// then blanks the output, drives the bank address, latches the shifted
    /// data and re-enables the output before advancing the bank cursor.
    ///
    /// The data must be latched with output disabled before the address
    /// lines change, or the previous row's data flashes on the new row.
    pub fn scan(&mut self, frame: &FrameBuffer) -> Result<(), P::Error> {
        let bank = self.bank;

        for offset in 0..CELLS_PER_BANK {
            let cell = frame.cell(bank, offset);
            for bit in 0..4 {
                set_level(&mut self.data_lo[bit], cell & (1 << bit) != 0)?;
                set_level(&mut self.data_hi[bit], cell & (1 << (bit + 4)) != 0)?;
            }
            self.clock.set_low()?;
            self.clock.set_high()?;
        }

        self.blank.set_high()?;
        set_level(&mut self.addr0, bank & 1 != 0)?;
        set_level(&mut self.addr1, bank & 2 != 0)?;
        self.latch.set_high()?;
        self.latch.set_low()?;
        self.blank.set_low()?;

        self.bank = (bank + 1) % BANKS;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use core::convert::Infallible;

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum Line {
        DataLo(usize),
        DataHi(usize),
        Clock,
        Latch,
        Blank,
        Addr0,
        Addr1,
    }

    type Log = Rc<RefCell<Vec<(Line, bool)>>>;

    struct MockPin {
        line: Line,
        log: Log,
    }

    impl OutputPin for MockPin {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push((self.line, false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push((self.line, true));
            Ok(())
        }
    }

    fn engine(log: &Log) -> ScanEngine<MockPin> {
        let pin = |line| MockPin {
            line,
            log: log.clone(),
        };
        ScanEngine::new(
            [
                pin(Line::DataLo(0)),
                pin(Line::DataLo(1)),
                pin(Line::DataLo(2)),
                pin(Line::DataLo(3)),
            ],
            [
                pin(Line::DataHi(0)),
                pin(Line::DataHi(1)),
                pin(Line::DataHi(2)),
                pin(Line::DataHi(3)),
            ],
            pin(Line::Clock),
            pin(Line::Latch),
            pin(Line::Blank),
            pin(Line::Addr0),
            pin(Line::Addr1),
        )
    }

    #[test]
    fn bank_cursor_is_strict_round_robin() {
        let frame = FrameBuffer::new();
        let log: Log = Rc::default();
        let mut scan = engine(&log);

        let mut banks = Vec::new();
        for _ in 0..9 {
            banks.push(scan.bank());
            scan.scan(&frame).unwrap();
        }
        assert_eq!(banks, vec![0, 1, 2, 3, 0, 1, 2, 3, 0]);
    }

    #[test]
    fn one_clock_pulse_per_cell() {
        let frame = FrameBuffer::new();
        frame.fill(0);
        let log: Log = Rc::default();
        let mut scan = engine(&log);
        scan.scan(&frame).unwrap();

        let events = log.borrow();
        let rises = events.iter().filter(|e| **e == (Line::Clock, true)).count();
        let falls = events.iter().filter(|e| **e == (Line::Clock, false)).count();
        assert_eq!(rises, CELLS_PER_BANK);
        assert_eq!(falls, CELLS_PER_BANK);
    }

    #[test]
    fn housekeeping_follows_the_last_clock_in_order() {
        let frame = FrameBuffer::new();
        frame.fill(0);
        let log: Log = Rc::default();
        let mut scan = engine(&log);
        scan.scan(&frame).unwrap();

        let events = log.borrow();
        let last_clock = events
            .iter()
            .rposition(|e| *e == (Line::Clock, true))
            .unwrap();
        // Only data and clock lines move while the bank streams out.
        assert!(events[..=last_clock]
            .iter()
            .all(|(line, _)| matches!(line, Line::DataLo(_) | Line::DataHi(_) | Line::Clock)));
        assert_eq!(
            &events[last_clock + 1..],
            &[
                (Line::Blank, true),
                (Line::Addr0, false),
                (Line::Addr1, false),
                (Line::Latch, true),
                (Line::Latch, false),
                (Line::Blank, false),
            ]
        );
    }

    #[test]
    fn address_lines_reflect_the_streamed_bank() {
        let frame = FrameBuffer::new();
        frame.fill(0);
        let log: Log = Rc::default();
        let mut scan = engine(&log);

        let expected = [(false, false), (true, false), (false, true), (true, true)];
        for &(a0, a1) in &expected {
            log.borrow_mut().clear();
            scan.scan(&frame).unwrap();
            let events = log.borrow();
            assert!(events.contains(&(Line::Addr0, a0)));
            assert!(events.contains(&(Line::Addr1, a1)));
        }
        // Cursor has wrapped after the four scans.
        assert_eq!(scan.bank(), 0);
    }

    #[test]
    fn data_buses_carry_the_cell_nibbles() {
        let frame = FrameBuffer::new();
        frame.fill(0xb6);
        let log: Log = Rc::default();
        let mut scan = engine(&log);
        scan.scan(&frame).unwrap();

        // First cell: low nibble 0x6 on bus A, high nibble 0xb on bus B,
        // then one clock pulse.
        let events = log.borrow();
        assert_eq!(
            &events[..10],
            &[
                (Line::DataLo(0), false),
                (Line::DataHi(0), true),
                (Line::DataLo(1), true),
                (Line::DataHi(1), true),
                (Line::DataLo(2), true),
                (Line::DataHi(2), false),
                (Line::DataLo(3), false),
                (Line::DataHi(3), true),
                (Line::Clock, false),
                (Line::Clock, true),
            ]
        );
    }
}
