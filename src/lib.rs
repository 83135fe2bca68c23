//! This crate provides the core logic of a single-tape universal Turing Machine.
//! It includes modules for loading and validating transition tables, representing the
//! two-way tape, executing transitions until the end state, and a collection of
//! predefined programs.

pub mod loader;
pub mod machine;
pub mod programs;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the engine and its observation hook from the machine module.
pub use machine::{MachineConfig, NoopObserver, Observer, ObserverError, Snapshot, TuringMachine};
/// Re-exports the `ProgramManager` struct from the programs module.
pub use programs::{Program, ProgramManager};
/// Re-exports the `TransitionTable` struct from the table module.
pub use table::TransitionTable;
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports commonly used types from the types module.
pub use types::{Action, Direction, Mode, Status, Step, TuringMachineError};
