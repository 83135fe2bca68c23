//! This module provides the `ProgramLoader` struct, responsible for turning JSON transition
//! tables, from files or strings, into validated `TransitionTable`s.
//!
//! The expected shape is:
//!
//! ```json
//! {
//!   "q0": {
//!     "1": { "write": "1", "move": "right", "nextState": "q0" },
//!     " ": { "write": "1", "move": "right", "nextState": "qdone" }
//!   }
//! }
//! ```

use crate::table::{StateRules, TransitionTable};
use crate::types::{Action, Direction, Mode, TuringMachineError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One action as written in the configuration file.
#[derive(Debug, Deserialize)]
struct RawAction {
    write: String,
    #[serde(rename = "move")]
    direction: String,
    #[serde(rename = "nextState")]
    next_state: String,
}

type RawTable = BTreeMap<String, BTreeMap<String, RawAction>>;

/// `ProgramLoader` is a utility struct for loading transition tables.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a transition table from the JSON file at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(TransitionTable)` if the file is read, parsed and validated.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * Any error of [`ProgramLoader::load_table_from_str`] otherwise.
    pub fn load_table(
        path: &Path,
        end_state: &str,
        mode: Mode,
    ) -> Result<TransitionTable, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::load_table_from_str(&content, end_state, mode)
    }

    /// Loads a transition table from JSON content.
    ///
    /// # Returns
    ///
    /// * `Err(TuringMachineError::ParseError)` if the content is not a table of the expected shape.
    /// * `Err(TuringMachineError::InvalidSymbol)` if a key or `write` value is not one character.
    /// * `Err(TuringMachineError::UnknownMove)` for an unrecognized move in `Mode::Strict`.
    /// * `Err(TuringMachineError::InvalidConfiguration)` if a `nextState` does not exist.
    pub fn load_table_from_str(
        content: &str,
        end_state: &str,
        mode: Mode,
    ) -> Result<TransitionTable, TuringMachineError> {
        let raw: RawTable = serde_json::from_str(content)?;

        let mut rules = BTreeMap::new();
        for (state, raw_actions) in raw {
            let mut actions = StateRules::new();
            for (key, raw_action) in raw_actions {
                let symbol = parse_symbol(&key)?;
                let direction = parse_direction(&state, symbol, &raw_action.direction, mode)?;
                let write = parse_symbol(&raw_action.write)?;
                actions.insert(symbol, Action::new(write, direction, raw_action.next_state));
            }
            rules.insert(state, actions);
        }

        let table = TransitionTable::new(rules, end_state)?;
        tracing::debug!(
            states = table.states().count(),
            transitions = table.transition_count(),
            "loaded transition table"
        );

        Ok(table)
    }
}

/// Converts a single-character string into a symbol.
fn parse_symbol(value: &str) -> Result<char, TuringMachineError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(TuringMachineError::InvalidSymbol(value.to_string())),
    }
}

fn parse_direction(
    state: &str,
    symbol: char,
    token: &str,
    mode: Mode,
) -> Result<Direction, TuringMachineError> {
    match (Direction::from_token(token), mode) {
        (Some(direction), _) => Ok(direction),
        (None, Mode::Normal) => {
            tracing::warn!(state, symbol = ?symbol, token, "unknown move, head will stay");
            Ok(Direction::Stay)
        }
        (None, Mode::Strict) => Err(TuringMachineError::UnknownMove {
            state: state.to_string(),
            symbol,
            token: token.to_string(),
        }),
    }
}
