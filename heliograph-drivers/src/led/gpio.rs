//! GPIO LED output
//!
//! Drives a status LED through a digital output pin (directly or via a
//! transistor). The pin can be wired active-high (default) or active-low.

use embedded_hal::digital::OutputPin;

use heliograph_core::led::LedOutput;

/// GPIO LED output
///
/// Output-mode configuration belongs to whoever constructs the pin; this
/// type only writes levels to it.
pub struct GpioLed<P> {
    pin: P,
    /// If true, LED ON = pin LOW
    inverted: bool,
    /// Current logical level (true = LED on)
    on: bool,
}

impl<P: OutputPin> GpioLed<P> {
    /// Create a new GPIO LED output
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the LED is ON when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut led = Self {
            pin,
            inverted,
            on: false,
        };
        // Ensure the LED starts off
        led.set_level(false);
        led
    }

    /// Create a new GPIO LED with active-high wiring
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a new GPIO LED with active-low wiring
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Last logical level written (true = LED on)
    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl<P: OutputPin> LedOutput for GpioLed<P> {
    fn set_level(&mut self, on: bool) {
        self.on = on;

        // Pin errors are swallowed: the sink is non-failing from the
        // core's perspective and a failed write must not abort the
        // registry tick for sibling devices.
        let result = if on != self.inverted {
            // Normal: on=true, inverted=false → high
            // Inverted: on=true, inverted=true → low
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        let _ = result;
    }
}
