//! Blink-pattern state machines
//!
//! A [`LedState`] answers "is the output energized right now" every time a
//! device polls it. The blinking variants consult a [`Timeout`] internally
//! and flip their phase when it elapses, so `is_on` is a query that
//! advances internal state as a side effect of being read. The blink
//! cadence depends on exactly one phase advance per elapsed check.

use heapless::Vec;

use crate::timeout::Timeout;

/// Maximum intervals in a sequence blinker
pub const MAX_SEQUENCE_STEPS: usize = 16;

/// Errors raised when constructing blink states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateError {
    /// A sequence blinker needs at least one interval
    EmptySequence,
    /// More intervals than [`MAX_SEQUENCE_STEPS`]
    SequenceTooLong,
}

/// Periodic blinker: one interval, phase flips each time it elapses.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SimpleBlinker {
    timeout: Timeout,
    start_as_on: bool,
    is_on: bool,
}

impl SimpleBlinker {
    /// Create a blinker that spends `duration_ms` in each phase.
    pub const fn new(duration_ms: u32, start_as_on: bool) -> Self {
        Self {
            timeout: Timeout::new(duration_ms, true),
            start_as_on,
            is_on: start_as_on,
        }
    }

    /// Current phase; flips first if the blink interval has elapsed.
    pub fn is_on(&mut self, now_ms: u32) -> bool {
        if self.timeout.is_elapsed(now_ms) {
            self.is_on = !self.is_on;
        }
        self.is_on
    }

    /// Restore the starting phase and restart the interval. No flip.
    pub fn reset(&mut self, now_ms: u32) {
        self.is_on = self.start_as_on;
        self.timeout.restart(now_ms);
    }

    /// Change the blink period and restart the interval.
    pub fn set_duration(&mut self, duration_ms: u32, now_ms: u32) {
        self.timeout.set_duration(duration_ms, true, now_ms);
    }
}

/// Sequence blinker: phase flips walk an ordered list of intervals.
///
/// Each elapsed interval flips the phase and advances to the next entry,
/// wrapping to the first after the last. A single-entry sequence behaves
/// exactly like a [`SimpleBlinker`] with that duration.
///
/// ```text
/// // Long on + 3 quick blinks
/// [1000, 200, 100, 200, 100, 200, 100, 200]
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequenceBlinker {
    blinker: SimpleBlinker,
    durations: Vec<u32, MAX_SEQUENCE_STEPS>,
    index: usize,
}

impl SequenceBlinker {
    /// Create a sequence blinker from a non-empty interval list.
    pub fn new(durations: &[u32], start_as_on: bool) -> Result<Self, StateError> {
        if durations.is_empty() {
            return Err(StateError::EmptySequence);
        }
        let intervals = Vec::from_slice(durations).map_err(|_| StateError::SequenceTooLong)?;
        Ok(Self {
            blinker: SimpleBlinker::new(durations[0], start_as_on),
            durations: intervals,
            index: 0,
        })
    }

    /// Current phase; on an elapsed interval, flips and moves to the next
    /// entry in the sequence.
    pub fn is_on(&mut self, now_ms: u32) -> bool {
        if self.blinker.timeout.is_elapsed(now_ms) {
            self.blinker.is_on = !self.blinker.is_on;
            self.advance(now_ms);
        }
        self.blinker.is_on
    }

    /// Rewind to interval 0 and restore the starting phase.
    ///
    /// Index 0 is reached through the same wraparound step `is_on` uses:
    /// park on the last entry and advance once.
    pub fn reset(&mut self, now_ms: u32) {
        self.index = self.durations.len() - 1;
        self.advance(now_ms);
        self.blinker.reset(now_ms);
    }

    /// Index of the interval currently timing out.
    pub fn current_index(&self) -> usize {
        self.index
    }

    fn advance(&mut self, now_ms: u32) {
        self.index = if self.index + 1 < self.durations.len() {
            self.index + 1
        } else {
            0
        };
        self.blinker.set_duration(self.durations[self.index], now_ms);
    }
}

/// The closed set of states a status LED can reflect.
///
/// Fixed variants never change; blinking variants advance their phase as a
/// side effect of being polled through [`LedState::is_on`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedState {
    /// Output energized, no timing
    On,
    /// Output de-energized, no timing
    Off,
    /// Periodic single-interval blinker
    Blink(SimpleBlinker),
    /// Multi-interval sequence blinker
    Sequence(SequenceBlinker),
}

impl LedState {
    /// Whether the output should currently be energized.
    ///
    /// For blinking variants this is the query that drives the blink: it
    /// may flip the phase before returning.
    pub fn is_on(&mut self, now_ms: u32) -> bool {
        match self {
            LedState::On => true,
            LedState::Off => false,
            LedState::Blink(blinker) => blinker.is_on(now_ms),
            LedState::Sequence(blinker) => blinker.is_on(now_ms),
        }
    }

    /// Return to the canonical starting phase.
    pub fn reset(&mut self, now_ms: u32) {
        match self {
            LedState::On | LedState::Off => {}
            LedState::Blink(blinker) => blinker.reset(now_ms),
            LedState::Sequence(blinker) => blinker.reset(now_ms),
        }
    }
}
