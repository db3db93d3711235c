//! Heliograph - Status LED demo firmware
//!
//! Drives three status LEDs on an RP2040 board through the blink-pattern
//! registry: one solid, one fault blinker, one "long on + three quick
//! blinks" healthy sequence. The registry is polled from a single embassy
//! ticker loop; nothing here is interrupt-driven.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_time::{Duration, Instant, Ticker};
use {defmt_rtt as _, panic_probe as _};

use heliograph_core::config::{build_table, BlinkPattern};
use heliograph_core::led::{Led, StateSelector};
use heliograph_core::updater::Updater;
use heliograph_drivers::led::GpioLed;

/// Registry poll interval
const UPDATE_INTERVAL_MS: u64 = 10;

/// Fault blink period
const FAULT_BLINK_MS: u32 = 500;

/// Long on + 3 quick blinks
const HEALTHY_SEQUENCE: [u32; 8] = [1000, 200, 100, 200, 100, 200, 100, 200];

/// Status patterns, in state-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
enum StatusPattern {
    Off = 0,
    On = 1,
    Fault = 2,
    Healthy = 3,
}

impl StateSelector for StatusPattern {
    fn as_index(self) -> usize {
        self as usize
    }
}

/// Milliseconds since boot, truncated to the width the core expects.
fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Heliograph firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Pattern table, indices matching StatusPattern
    let patterns = [
        BlinkPattern::Off,
        BlinkPattern::On,
        BlinkPattern::Blink {
            duration_ms: FAULT_BLINK_MS,
            start_as_on: true,
        },
        unwrap!(BlinkPattern::sequence(&HEALTHY_SEQUENCE, true)),
    ];
    let mut states = unwrap!(build_table(&patterns));

    // Status LEDs (output-mode configuration happens here, once)
    let mut power_led = Led::new(
        GpioLed::new_active_high(Output::new(p.PIN_2, Level::Low)),
        StatusPattern::Off,
    );
    let mut fault_led = Led::new(
        GpioLed::new_active_high(Output::new(p.PIN_3, Level::Low)),
        StatusPattern::Off,
    );
    let mut link_led = Led::new(
        GpioLed::new_active_high(Output::new(p.PIN_4, Level::Low)),
        StatusPattern::Off,
    );

    let now = now_ms();
    power_led.set_state(StatusPattern::On, &mut states, now, true);
    fault_led.set_state(StatusPattern::Fault, &mut states, now, true);
    link_led.set_state(StatusPattern::Healthy, &mut states, now, true);

    let mut registry = Updater::new();
    unwrap!(registry.register(&mut power_led));
    unwrap!(registry.register(&mut fault_led));
    unwrap!(registry.register(&mut link_led));

    info!(
        "Polling {} LEDs every {} ms",
        registry.len(),
        UPDATE_INTERVAL_MS
    );

    let mut ticker = Ticker::every(Duration::from_millis(UPDATE_INTERVAL_MS));
    loop {
        ticker.next().await;
        registry.update(&mut states, now_ms());
    }
}
