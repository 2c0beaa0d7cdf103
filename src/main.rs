#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;
use rtic::app;

mod demo;

use panel_core::FrameBuffer;

/// The one frame buffer, shared lock-free between the scan interrupt and the
/// demo task. Cells are atomic bytes, so a write racing a scan shows up at
/// most one refresh late.
static FRAME: FrameBuffer = FrameBuffer::new();

#[app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use super::*;
    use rp_pico::hal::{
        clocks::init_clocks_and_plls,
        fugit::ExtU32,
        gpio::{bank0::Gpio25, DynPinId, FunctionSioOutput, Pin, PullDown},
        sio::Sio,
        timer::{Alarm, Alarm0, Alarm1, Timer},
        watchdog::Watchdog,
    };
    use embedded_hal::digital::v2::ToggleableOutputPin;

    use crate::demo::DemoState;
    use panel_core::ScanEngine;

    /// Scan-out cadence: one bank per trigger, so all four banks refresh the
    /// full 1024-LED frame at roughly 104 Hz.
    const SCAN_INTERVAL_US: u32 = 2_400;

    /// Demo animation step cadence.
    const DEMO_INTERVAL_US: u32 = 5_000;

    type OutPin = Pin<DynPinId, FunctionSioOutput, PullDown>;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        scan: ScanEngine<OutPin>,
        led: Pin<Gpio25, FunctionSioOutput, PullDown>,
        alarm: Alarm0,
        alarm1: Alarm1,
        demo: DemoState,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let external_xtal_freq_hz = 12_000_000u32;
        let clocks = init_clocks_and_plls(
            external_xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut alarm = timer.alarm_0().unwrap();
        alarm.schedule(SCAN_INTERVAL_US.micros()).unwrap();
        alarm.enable_interrupt();

        let mut alarm1 = timer.alarm_1().unwrap();
        alarm1.schedule(DEMO_INTERVAL_US.micros()).unwrap();
        alarm1.enable_interrupt();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let led = pins.led.into_push_pull_output();

        // Two 4-line data buses (panels 1-2 and 3-4), plus clock, latch,
        // output-enable and the two bank-address lines.
        let scan = ScanEngine::new(
            [
                pins.gpio2.into_push_pull_output().into_dyn_pin(),
                pins.gpio3.into_push_pull_output().into_dyn_pin(),
                pins.gpio4.into_push_pull_output().into_dyn_pin(),
                pins.gpio5.into_push_pull_output().into_dyn_pin(),
            ],
            [
                pins.gpio6.into_push_pull_output().into_dyn_pin(),
                pins.gpio7.into_push_pull_output().into_dyn_pin(),
                pins.gpio8.into_push_pull_output().into_dyn_pin(),
                pins.gpio9.into_push_pull_output().into_dyn_pin(),
            ],
            pins.gpio12.into_push_pull_output().into_dyn_pin(),
            pins.gpio13.into_push_pull_output().into_dyn_pin(),
            pins.gpio14.into_push_pull_output().into_dyn_pin(),
            pins.gpio10.into_push_pull_output().into_dyn_pin(),
            pins.gpio11.into_push_pull_output().into_dyn_pin(),
        );

        // Power-on buffer contents are arbitrary; start from a known image.
        FRAME.fill(0);

        defmt::info!("panel driver up, scan interval {} us", SCAN_INTERVAL_US);

        (
            Shared {},
            Local {
                scan,
                led,
                alarm,
                alarm1,
                demo: DemoState::new(),
            },
            init::Monotonics(),
        )
    }

    // Hardware Task: bank scan-out. Higher priority than the demo so slow
    // drawing can only dim the display by delaying a trigger, never corrupt
    // the scan sequence.
    #[task(binds = TIMER_IRQ_0, priority = 2, local = [alarm, scan, led])]
    fn scan_tick(ctx: scan_tick::Context) {
        ctx.local.alarm.clear_interrupt();
        ctx.local.alarm.schedule(SCAN_INTERVAL_US.micros()).unwrap();

        ctx.local.scan.scan(&FRAME).unwrap();

        // Heartbeat: visible proof the data is clocking out.
        ctx.local.led.toggle().unwrap();
    }

    // Hardware Task: demo animation step.
    #[task(binds = TIMER_IRQ_1, priority = 1, local = [alarm1, demo])]
    fn demo_tick(ctx: demo_tick::Context) {
        ctx.local.alarm1.clear_interrupt();
        ctx.local.alarm1.schedule(DEMO_INTERVAL_US.micros()).unwrap();

        if let Some((x, y)) = ctx.local.demo.step(&FRAME) {
            defmt::trace!("pixel x={} y={}", x, y);
        }
    }
}
