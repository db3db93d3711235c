//! Board-agnostic blink-pattern logic for status LEDs
//!
//! This crate contains everything needed to drive indicator LEDs through
//! timed blink patterns from a cooperative polling loop, without depending
//! on any specific hardware:
//!
//! - Wrap-aware millisecond timeouts
//! - Blink-pattern state machines (fixed, periodic, sequenced)
//! - The LED device and its shared state table
//! - The update registry polled by the host loop
//! - Declarative pattern configuration
//!
//! Time never comes from a clock owned by this crate. Every polling entry
//! point takes `now_ms: u32`, milliseconds from the host's monotonic clock,
//! so the same logic runs under embassy on a target board and under plain
//! integers in host tests.

#![no_std]
#![deny(unsafe_code)]

// proptest needs std when the unit tests run on the host
#[cfg(test)]
extern crate std;

pub mod config;
pub mod led;
pub mod state;
pub mod timeout;
pub mod updater;
