//! Hardware driver implementations
//!
//! Concrete implementations of the hardware traits defined in
//! heliograph-core:
//!
//! - GPIO LED outputs (active-high or active-low wiring)

#![no_std]
#![deny(unsafe_code)]

pub mod led;
