//! This module defines the `TransitionTable`, the immutable mapping from `(state, symbol)`
//! pairs to actions that drives the execution engine.

use crate::types::{Action, TuringMachineError};
use std::collections::BTreeMap;

/// The rules of a single state, keyed by the symbol under the head.
pub type StateRules = BTreeMap<char, Action>;

/// A validated transition table.
///
/// Every `next_state` referenced by an action is either a state defined in the table or
/// the configured end state. The check runs once in [`TransitionTable::new`]; a table that
/// exists has passed it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    rules: BTreeMap<String, StateRules>,
    end_state: String,
}

impl TransitionTable {
    /// Builds a table and validates it against `end_state`.
    ///
    /// # Returns
    ///
    /// * `Ok(TransitionTable)` if every referenced state exists.
    /// * `Err(TuringMachineError::InvalidConfiguration)` naming the first dangling reference.
    pub fn new(
        rules: BTreeMap<String, StateRules>,
        end_state: impl Into<String>,
    ) -> Result<Self, TuringMachineError> {
        let table = Self {
            rules,
            end_state: end_state.into(),
        };
        table.validate()?;

        Ok(table)
    }

    /// Checks that every action points at a known state.
    ///
    /// States are visited in key order and symbols in symbol order, so the reported
    /// reference is deterministic. Running this again on a valid table has no effect.
    pub fn validate(&self) -> Result<(), TuringMachineError> {
        for (state, actions) in &self.rules {
            for (symbol, action) in actions {
                if !self.is_known_state(&action.next_state) {
                    tracing::debug!(
                        state = %state,
                        symbol = ?symbol,
                        next_state = %action.next_state,
                        "dangling state reference"
                    );
                    return Err(TuringMachineError::InvalidConfiguration {
                        state: action.next_state.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Returns the action for `state` reading `symbol`.
    pub fn lookup(&self, state: &str, symbol: char) -> Result<&Action, TuringMachineError> {
        self.rules
            .get(state)
            .and_then(|actions| actions.get(&symbol))
            .ok_or_else(|| TuringMachineError::MissingTransition {
                state: state.to_string(),
                symbol,
            })
    }

    /// The halting state this table was validated against.
    pub fn end_state(&self) -> &str {
        &self.end_state
    }

    /// Whether `state` is defined in the table or is the end state.
    pub fn is_known_state(&self, state: &str) -> bool {
        state == self.end_state || self.rules.contains_key(state)
    }

    /// Names of the states defined in the table.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Total number of `(state, symbol)` entries.
    pub fn transition_count(&self) -> usize {
        self.rules.values().map(|actions| actions.len()).sum()
    }
}
