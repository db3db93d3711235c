//! LED device bound to a shared state table
//!
//! Devices never own their blink states. All [`LedState`] objects live in
//! one [`StateTable`] built at startup; a device holds only a selector
//! (an application enum that maps to a table index) and its hardware
//! output. Every poll looks the selected state up in the table, asks it
//! whether the output should be energized, and writes the answer out.

use heapless::Vec;

use crate::state::LedState;

/// Maximum entries in a state table
pub const MAX_LED_STATES: usize = 8;

/// Hardware output sink for one LED.
///
/// "Set logical level L on this channel": synchronous and, from the
/// core's perspective, non-failing. Direction/output-mode configuration
/// belongs in the implementation's constructor, once.
pub trait LedOutput {
    /// Drive the output (true = LED on)
    fn set_level(&mut self, on: bool);
}

/// Application-defined selector enum identifying a state-table entry.
///
/// The table must be sized to cover every selector value; `as_index`
/// returning an out-of-range index is a caller contract violation and
/// panics at the table lookup.
pub trait StateSelector: Copy {
    /// Position of this selector's state within the table
    fn as_index(self) -> usize;
}

/// Error returned when a state table is at capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TableFull;

/// The shared, process-lifetime table of blink states.
///
/// Built once at startup (see [`crate::config::build_table`]) and passed
/// by reference to every device poll. Push order defines the selector
/// indices.
#[derive(Debug, Default)]
pub struct StateTable {
    states: Vec<LedState, MAX_LED_STATES>,
}

impl StateTable {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self { states: Vec::new() }
    }

    /// Append a state, returning the index it was assigned.
    pub fn push(&mut self, state: LedState) -> Result<usize, TableFull> {
        let index = self.states.len();
        self.states.push(state).map_err(|_| TableFull)?;
        Ok(index)
    }

    /// Number of states in the table.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the table holds no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Mutable access to the state at `index`.
    ///
    /// Panics if `index` is out of range; the table must cover every
    /// selector value (construction-time contract, not a runtime error).
    pub fn state_mut(&mut self, index: usize) -> &mut LedState {
        &mut self.states[index]
    }
}

/// A status LED: a selector into the shared state table plus its output.
#[derive(Debug)]
pub struct Led<O, S> {
    output: O,
    selector: S,
}

impl<O: LedOutput, S: StateSelector> Led<O, S> {
    /// Create an LED reflecting `initial` once polled.
    pub fn new(output: O, initial: S) -> Self {
        Self {
            output,
            selector: initial,
        }
    }

    /// Switch to a new state.
    ///
    /// The target state is reset before it is ever polled, so switching
    /// into a blinking state always starts from its canonical phase and
    /// never mid-blink. With `call_update` the output is re-applied
    /// immediately instead of waiting for the next registry tick.
    pub fn set_state(&mut self, selector: S, states: &mut StateTable, now_ms: u32, call_update: bool) {
        self.selector = selector;
        states.state_mut(selector.as_index()).reset(now_ms);
        if call_update {
            self.update(states, now_ms);
        }
    }

    /// Current selector.
    pub fn state(&self) -> S {
        self.selector
    }

    /// Poll the selected state and write its level to the output.
    ///
    /// This is the only place the state's side-effecting `is_on` query
    /// runs during normal polling.
    pub fn update(&mut self, states: &mut StateTable, now_ms: u32) {
        let on = states.state_mut(self.selector.as_index()).is_on(now_ms);
        self.output.set_level(on);
    }

    /// Access the output sink.
    pub fn output(&self) -> &O {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SequenceBlinker, SimpleBlinker};

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum TestState {
        Off,
        On,
        Blink,
        Sequence,
    }

    impl StateSelector for TestState {
        fn as_index(self) -> usize {
            match self {
                TestState::Off => 0,
                TestState::On => 1,
                TestState::Blink => 2,
                TestState::Sequence => 3,
            }
        }
    }

    /// Records every level written, not just the last one
    #[derive(Default)]
    struct RecordingOutput {
        levels: std::vec::Vec<bool>,
    }

    impl LedOutput for RecordingOutput {
        fn set_level(&mut self, on: bool) {
            self.levels.push(on);
        }
    }

    fn make_table() -> StateTable {
        let mut table = StateTable::new();
        table.push(LedState::Off).unwrap();
        table.push(LedState::On).unwrap();
        table
            .push(LedState::Blink(SimpleBlinker::new(500, true)))
            .unwrap();
        table
            .push(LedState::Sequence(
                SequenceBlinker::new(&[1000, 200], true).unwrap(),
            ))
            .unwrap();
        table
    }

    #[test]
    fn test_table_push_assigns_indices_in_order() {
        let table = make_table();
        assert_eq!(table.len(), 4);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_table_rejects_overflow() {
        let mut table = StateTable::new();
        for _ in 0..MAX_LED_STATES {
            table.push(LedState::Off).unwrap();
        }
        assert_eq!(table.push(LedState::On), Err(TableFull));
    }

    #[test]
    fn test_update_writes_selected_level() {
        let mut table = make_table();
        let mut led = Led::new(RecordingOutput::default(), TestState::Off);

        led.update(&mut table, 0);
        assert_eq!(led.output().levels, [false]);

        led.set_state(TestState::On, &mut table, 0, true);
        assert_eq!(led.output().levels, [false, true]);
        assert_eq!(led.state(), TestState::On);
    }

    #[test]
    fn test_set_state_without_update_defers_output() {
        let mut table = make_table();
        let mut led = Led::new(RecordingOutput::default(), TestState::Off);

        led.set_state(TestState::On, &mut table, 0, false);
        assert!(led.output().levels.is_empty());

        led.update(&mut table, 0);
        assert_eq!(led.output().levels, [true]);
    }

    #[test]
    fn test_set_state_resets_blinker_phase() {
        let mut table = make_table();
        let mut led = Led::new(RecordingOutput::default(), TestState::Blink);

        // Drive the blinker into its off phase
        led.set_state(TestState::Blink, &mut table, 0, true);
        led.update(&mut table, 500);
        assert_eq!(led.output().levels, [true, false]);

        // Switching away and back never shows the stale phase
        led.set_state(TestState::Off, &mut table, 600, true);
        led.set_state(TestState::Blink, &mut table, 700, true);
        assert_eq!(led.output().levels, [true, false, false, true]);

        // And the interval measures from the switch
        led.update(&mut table, 1199);
        led.update(&mut table, 1200);
        assert_eq!(led.output().levels, [true, false, false, true, true, false]);
    }

    #[test]
    fn test_set_state_rewinds_sequence() {
        let mut table = make_table();
        let mut led = Led::new(RecordingOutput::default(), TestState::Off);

        led.set_state(TestState::Sequence, &mut table, 0, true);
        led.update(&mut table, 1000); // into the short interval
        led.update(&mut table, 1200); // back on

        // Re-selecting starts over with the long interval
        led.set_state(TestState::Sequence, &mut table, 2000, true);
        led.update(&mut table, 2999);
        led.update(&mut table, 3000);
        assert_eq!(
            led.output().levels,
            [true, false, true, true, true, false]
        );
    }
}
