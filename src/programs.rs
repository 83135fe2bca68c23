//! A small catalog of transition tables embedded in the crate, usable without a
//! configuration file. All of them start in `q0` and halt in `qdone`.

use crate::loader::ProgramLoader;
use crate::table::TransitionTable;
use crate::types::{Mode, TuringMachineError, DEFAULT_END_STATE};

// Default embedded programs: name, description, sample input, table source.
const PROGRAM_SOURCES: [(&str, &str, &str, &str); 4] = [
    (
        "unary-increment",
        "Appends one mark to a unary number",
        "111",
        include_str!("../programs/unary-increment.json"),
    ),
    (
        "binary-increment",
        "Adds one to a binary number",
        "1011",
        include_str!("../programs/binary-increment.json"),
    ),
    (
        "unary-addition",
        "Adds two unary numbers separated by '+'",
        "11+111",
        include_str!("../programs/unary-addition.json"),
    ),
    (
        "invert-bits",
        "Flips every bit of a binary string",
        "1010",
        include_str!("../programs/invert-bits.json"),
    ),
];

/// A built-in program with its validated table.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: &'static str,
    pub description: &'static str,
    /// A tape the program is meant to run on.
    pub sample_input: &'static str,
    pub table: TransitionTable,
}

lazy_static::lazy_static! {
    static ref PROGRAMS: Vec<Program> = load_programs();
}

fn load_programs() -> Vec<Program> {
    PROGRAM_SOURCES
        .iter()
        .filter_map(|&(name, description, sample_input, source)| {
            match ProgramLoader::load_table_from_str(source, DEFAULT_END_STATE, Mode::Strict) {
                Ok(table) => Some(Program {
                    name,
                    description,
                    sample_input,
                    table,
                }),
                Err(e) => {
                    tracing::error!(program = name, error = %e, "failed to load built-in program");
                    None
                }
            }
        })
        .collect()
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// List all program names
    pub fn list_program_names() -> Vec<&'static str> {
        PROGRAMS.iter().map(|program| program.name).collect()
    }

    /// Iterate over all programs
    pub fn programs() -> impl Iterator<Item = &'static Program> {
        PROGRAMS.iter()
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<&'static Program, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name == name)
            .ok_or_else(|| TuringMachineError::UnknownProgram(name.to_string()))
    }

    /// Get a copy of a program's transition table, ready to hand to a machine
    pub fn load_table(name: &str) -> Result<TransitionTable, TuringMachineError> {
        Self::get_program_by_name(name).map(|program| program.table.clone())
    }
}
