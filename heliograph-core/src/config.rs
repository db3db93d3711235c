//! Declarative blink-pattern configuration
//!
//! A [`BlinkPattern`] is a plain description of a blink state, suitable
//! for serialization (with the `serde` feature) or static assembly in
//! firmware. [`build_table`] turns an ordered pattern list into the owned
//! [`StateTable`] the devices poll against; slice order defines the
//! selector indices.

use heapless::Vec;

use crate::led::{StateTable, MAX_LED_STATES};
use crate::state::{LedState, SequenceBlinker, SimpleBlinker, StateError, MAX_SEQUENCE_STEPS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum patterns per table
pub const MAX_PATTERNS: usize = MAX_LED_STATES;

/// Errors raised while building a state table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A sequence pattern has no intervals
    EmptySequence,
    /// A sequence pattern exceeds [`MAX_SEQUENCE_STEPS`]
    SequenceTooLong,
    /// More patterns than [`MAX_PATTERNS`]
    TooManyPatterns,
}

impl From<StateError> for ConfigError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::EmptySequence => ConfigError::EmptySequence,
            StateError::SequenceTooLong => ConfigError::SequenceTooLong,
        }
    }
}

/// Description of one blink state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BlinkPattern {
    /// LED permanently off
    Off,
    /// LED permanently on
    On,
    /// Periodic blink with a single interval
    Blink {
        /// Time spent in each phase
        duration_ms: u32,
        /// Phase to start (and reset) in
        start_as_on: bool,
    },
    /// Multi-interval blink sequence
    Sequence {
        /// Ordered phase intervals, first entry first
        durations: Vec<u32, MAX_SEQUENCE_STEPS>,
        /// Phase to start (and reset) in
        start_as_on: bool,
    },
}

impl BlinkPattern {
    /// Convenience constructor for sequence patterns from a slice.
    pub fn sequence(durations: &[u32], start_as_on: bool) -> Result<Self, ConfigError> {
        if durations.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        let durations =
            Vec::from_slice(durations).map_err(|_| ConfigError::SequenceTooLong)?;
        Ok(BlinkPattern::Sequence {
            durations,
            start_as_on,
        })
    }

    /// Instantiate the runtime state this pattern describes.
    pub fn build(&self) -> Result<LedState, ConfigError> {
        match self {
            BlinkPattern::Off => Ok(LedState::Off),
            BlinkPattern::On => Ok(LedState::On),
            BlinkPattern::Blink {
                duration_ms,
                start_as_on,
            } => Ok(LedState::Blink(SimpleBlinker::new(*duration_ms, *start_as_on))),
            BlinkPattern::Sequence {
                durations,
                start_as_on,
            } => Ok(LedState::Sequence(SequenceBlinker::new(
                durations,
                *start_as_on,
            )?)),
        }
    }
}

/// Build the shared state table from an ordered pattern list.
///
/// This is the one-time startup assembly step: the returned table owns
/// every state for the process lifetime, and `patterns[i]` becomes the
/// state selector index `i` resolves to.
pub fn build_table(patterns: &[BlinkPattern]) -> Result<StateTable, ConfigError> {
    let mut table = StateTable::new();
    for pattern in patterns {
        let state = pattern.build()?;
        table
            .push(state)
            .map_err(|_| ConfigError::TooManyPatterns)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_table_preserves_order() {
        let patterns = [
            BlinkPattern::Off,
            BlinkPattern::On,
            BlinkPattern::Blink {
                duration_ms: 500,
                start_as_on: true,
            },
        ];
        let mut table = build_table(&patterns).unwrap();
        assert_eq!(table.len(), 3);

        assert!(!table.state_mut(0).is_on(0));
        assert!(table.state_mut(1).is_on(0));
        // Index 2 is the blinker, starting on
        table.state_mut(2).reset(0);
        assert!(table.state_mut(2).is_on(0));
        assert!(!table.state_mut(2).is_on(500));
    }

    #[test]
    fn test_sequence_constructor_validates() {
        assert_eq!(
            BlinkPattern::sequence(&[], true).unwrap_err(),
            ConfigError::EmptySequence
        );

        let too_long = [10u32; MAX_SEQUENCE_STEPS + 1];
        assert_eq!(
            BlinkPattern::sequence(&too_long, true).unwrap_err(),
            ConfigError::SequenceTooLong
        );

        let pattern = BlinkPattern::sequence(&[1000, 200], false).unwrap();
        assert!(pattern.build().is_ok());
    }

    #[test]
    fn test_build_table_rejects_overflow() {
        let patterns: [BlinkPattern; MAX_PATTERNS + 1] =
            core::array::from_fn(|_| BlinkPattern::Off);
        assert_eq!(
            build_table(&patterns).unwrap_err(),
            ConfigError::TooManyPatterns
        );
    }

    #[test]
    fn test_built_sequence_matches_direct_construction() {
        let pattern = BlinkPattern::sequence(&[1000, 200], true).unwrap();
        let mut built = pattern.build().unwrap();
        built.reset(0);

        assert!(built.is_on(0));
        assert!(!built.is_on(1000));
        assert!(built.is_on(1200));
    }
}
