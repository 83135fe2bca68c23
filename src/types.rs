//! This module defines the core data structures and types shared by the transition table,
//! the tape and the execution engine, including actions, execution results and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The default blank symbol used on the Turing Machine tape.
pub const DEFAULT_BLANK_SYMBOL: char = ' ';
/// The state the machine starts in unless configured otherwise.
pub const DEFAULT_START_STATE: &str = "q0";
/// The halting state unless configured otherwise.
pub const DEFAULT_END_STATE: &str = "qdone";

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Direction {
    /// Parses a move token as it appears in a configuration file.
    ///
    /// Returns `None` for anything other than `left`, `right` or `stay`; what happens to
    /// such tokens is decided by the loader's [`Mode`].
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "stay" => Some(Direction::Stay),
            _ => None,
        }
    }

    /// The head displacement for this direction.
    pub fn offset(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Stay => 0,
        }
    }
}

/// What the machine does for one `(state, symbol)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The symbol written under the head.
    pub write: char,
    /// Where the head goes after writing.
    pub direction: Direction,
    /// The state the machine transitions to.
    pub next_state: String,
}

impl Action {
    pub fn new(write: char, direction: Direction, next_state: impl Into<String>) -> Self {
        Self {
            write,
            direction,
            next_state: next_state.into(),
        }
    }
}

/// How the loader treats move tokens it does not recognize.
///
/// - `Normal` (default): the token is read as `Stay`, matching the permissive legacy behavior.
/// - `Strict`: the token is rejected while loading the table.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mode {
    /// Unknown move tokens mean "stay".
    #[default]
    Normal,
    /// Unknown move tokens are configuration errors.
    Strict,
}

/// Lifecycle of the execution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted,
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine performed a step and has not reached the end state.
    Continue,
    /// The machine is in the end state.
    Halt,
}

/// Represents the errors that can occur while loading or running a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// A transition points at a state that is neither defined nor the end state.
    #[error("Invalid configuration, the state {state} does not exist")]
    InvalidConfiguration { state: String },
    /// No action covers the pair the machine reached.
    #[error("No transition defined for state {state} and symbol {symbol:?}")]
    MissingTransition { state: String, symbol: char },
    /// A move token was not recognized and the loader runs in strict mode.
    #[error("Unknown move {token:?} in state {state} for symbol {symbol:?}")]
    UnknownMove {
        state: String,
        symbol: char,
        token: String,
    },
    /// A table key or written value is not a single character.
    #[error("Invalid symbol {0:?}, expected exactly one character")]
    InvalidSymbol(String),
    /// The configured step ceiling was reached before halting.
    #[error("Step limit of {0} exceeded")]
    StepLimitExceeded(usize),
    /// Indicates an error while parsing a JSON transition table.
    #[error("Program parsing error: {0}")]
    ParseError(String),
    /// No built-in program has the requested name.
    #[error("Program '{0}' not found")]
    UnknownProgram(String),
    /// Indicates an error related to file system operations, such as reading program files.
    #[error("File error: {0}")]
    FileError(String),
}

impl From<serde_json::Error> for TuringMachineError {
    fn from(error: serde_json::Error) -> Self {
        TuringMachineError::ParseError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_tokens() {
        assert_eq!(Direction::from_token("left"), Some(Direction::Left));
        assert_eq!(Direction::from_token("right"), Some(Direction::Right));
        assert_eq!(Direction::from_token("stay"), Some(Direction::Stay));
        assert_eq!(Direction::from_token("Right"), None);
        assert_eq!(Direction::from_token(""), None);
    }

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::Left.offset(), -1);
        assert_eq!(Direction::Right.offset(), 1);
        assert_eq!(Direction::Stay.offset(), 0);
    }

    #[test]
    fn test_action_creation() {
        let action = Action::new('X', Direction::Right, "q1");

        assert_eq!(action.write, 'X');
        assert_eq!(action.direction, Direction::Right);
        assert_eq!(action.next_state, "q1");
    }

    #[test]
    fn test_error_display() {
        let error = TuringMachineError::InvalidConfiguration {
            state: "qX".to_string(),
        };
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid configuration"));
        assert!(error_msg.contains("qX"));

        let error = TuringMachineError::MissingTransition {
            state: "q0".to_string(),
            symbol: '0',
        };
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("q0"));
        assert!(error_msg.contains("'0'"));
    }

    #[test]
    fn test_json_error_conversion() {
        let error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let converted: TuringMachineError = error.into();

        assert!(matches!(converted, TuringMachineError::ParseError(_)));
    }
}
