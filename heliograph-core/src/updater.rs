//! Update registry polled by the host loop
//!
//! The host scheduling loop owns one [`Updater`] and calls
//! [`Updater::update`] once per iteration (a "tick"). The registry is
//! assembled at startup and then only iterated; devices register in the
//! order they should be polled.

use heapless::Vec;

use crate::led::{Led, LedOutput, StateSelector, StateTable};

/// Maximum devices in one registry
pub const MAX_UPDATABLES: usize = 8;

/// Anything the registry can poll once per tick.
///
/// `update` is infallible by construction, so one misbehaving device can
/// never abort the tick for its siblings.
pub trait Updatable {
    /// Refresh this device's output from the shared state table.
    fn update(&mut self, states: &mut StateTable, now_ms: u32);
}

impl<O: LedOutput, S: StateSelector> Updatable for Led<O, S> {
    fn update(&mut self, states: &mut StateTable, now_ms: u32) {
        Led::update(self, states, now_ms);
    }
}

/// Error returned when a registry is at capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegistryFull;

/// Ordered, fixed registry of pollable devices.
///
/// Holds non-owning references; the devices themselves live with the
/// caller for as long as the registry does.
#[derive(Default)]
pub struct Updater<'a> {
    entries: Vec<&'a mut dyn Updatable, MAX_UPDATABLES>,
}

impl<'a> Updater<'a> {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a device to the end of the polling order. Startup only.
    pub fn register(&mut self, device: &'a mut dyn Updatable) -> Result<(), RegistryFull> {
        self.entries.push(device).map_err(|_| RegistryFull)
    }

    /// Number of registered devices.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no devices.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One tick: poll every device exactly once, in registration order.
    pub fn update(&mut self, states: &mut StateTable, now_ms: u32) {
        for device in self.entries.iter_mut() {
            device.update(states, now_ms);
        }
    }
}
