//! LED output implementations

pub mod gpio;

pub use gpio::GpioLed;
