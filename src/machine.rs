//! This module defines the `TuringMachine` struct, the execution engine of a single-tape
//! universal Turing Machine. It owns the tape and the current state, and advances them one
//! transition at a time until the end state of its transition table is reached.

use crate::table::TransitionTable;
use crate::tape::Tape;
use crate::types::{Status, Step, TuringMachineError, DEFAULT_BLANK_SYMBOL, DEFAULT_START_STATE};

/// Error type returned by observers. Observer failures never stop the machine.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

/// Per-run settings of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    /// The state the machine starts in.
    pub start_state: String,
    /// The symbol of unwritten cells.
    pub blank: char,
    /// Optional ceiling on the number of steps. `None` runs until the end state.
    pub step_limit: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            start_state: DEFAULT_START_STATE.to_string(),
            blank: DEFAULT_BLANK_SYMBOL,
            step_limit: None,
        }
    }
}

/// A read-only view of the engine between two steps.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub head: isize,
    pub step_count: usize,
    pub state: &'a str,
    pub tape: &'a Tape,
}

/// Receives a [`Snapshot`] before the first step and after every step of a run.
pub trait Observer {
    fn observe(&mut self, snapshot: &Snapshot<'_>) -> Result<(), ObserverError>;
}

/// An observer that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn observe(&mut self, _snapshot: &Snapshot<'_>) -> Result<(), ObserverError> {
        Ok(())
    }
}

/// Represents a single-tape Turing Machine.
pub struct TuringMachine {
    table: TransitionTable,
    tape: Tape,
    state: String,
    status: Status,
    step_limit: Option<usize>,
    step_count: usize,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` from a validated table and the initial tape contents.
    ///
    /// The machine starts `Running` in `config.start_state`, unless that already is the end
    /// state, in which case there is nothing to execute and it starts `Halted`.
    pub fn new(table: TransitionTable, input: &str, config: MachineConfig) -> Self {
        let status = if config.start_state == table.end_state() {
            Status::Halted
        } else {
            Status::Running
        };

        Self {
            tape: Tape::new(input, config.blank),
            state: config.start_state,
            status,
            step_limit: config.step_limit,
            step_count: 0,
            table,
        }
    }

    /// Executes a single step of the machine's computation.
    ///
    /// Reads the symbol under the head (growing the tape by one blank cell if the head is
    /// just outside it), looks up the action, writes, moves, and switches state.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Continue)` if the machine performed a step and is still running.
    /// * `Ok(Step::Halt)` if the machine is in the end state. A halted machine is not modified.
    /// * `Err(TuringMachineError::MissingTransition)` if the table has no action for the
    ///   current state and symbol.
    pub fn step(&mut self) -> Result<Step, TuringMachineError> {
        if self.is_halted() {
            return Ok(Step::Halt);
        }

        let symbol = self.tape.read();
        let action = self.table.lookup(&self.state, symbol)?;

        self.tape.write(action.write);
        self.tape.shift(action.direction);
        self.state = action.next_state.clone();
        self.step_count += 1;

        tracing::debug!(
            step = self.step_count,
            read = ?symbol,
            write = ?action.write,
            direction = ?action.direction,
            state = %self.state,
            head = self.tape.head(),
            "step"
        );

        if self.state == self.table.end_state() {
            self.status = Status::Halted;
            tracing::info!(steps = self.step_count, state = %self.state, "machine halted");
            return Ok(Step::Halt);
        }

        Ok(Step::Continue)
    }

    /// Runs the machine until it halts and returns the tape with every blank removed.
    pub fn run(&mut self) -> Result<String, TuringMachineError> {
        self.run_with(&mut NoopObserver)
    }

    /// Runs the machine until it halts, notifying `observer` before the first step and
    /// after every step.
    ///
    /// A failing observer is logged and otherwise ignored. If a step limit is configured
    /// and reached first, the run fails with `TuringMachineError::StepLimitExceeded`.
    pub fn run_with<O: Observer + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<String, TuringMachineError> {
        self.notify(observer);

        while !self.is_halted() {
            if let Some(limit) = self.step_limit {
                if self.step_count >= limit {
                    return Err(TuringMachineError::StepLimitExceeded(limit));
                }
            }

            self.step()?;
            self.notify(observer);
        }

        Ok(self.tape.output())
    }

    fn notify<O: Observer + ?Sized>(&self, observer: &mut O) {
        if let Err(e) = observer.observe(&self.snapshot()) {
            tracing::warn!(step = self.step_count, error = %e, "observer failed");
        }
    }

    /// Returns a read-only view of the current state, head and tape.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            head: self.tape.head(),
            step_count: self.step_count,
            state: &self.state,
            tape: &self.tape,
        }
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Checks if the machine has reached the end state.
    pub fn is_halted(&self) -> bool {
        self.status == Status::Halted
    }

    /// Returns the total number of steps executed.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the head position. It is `-1` right after a left move off the first cell.
    pub fn head(&self) -> isize {
        self.tape.head()
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the blank symbol used by this machine.
    pub fn blank(&self) -> char {
        self.tape.blank()
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::StateRules;
    use crate::types::{Action, Direction, DEFAULT_END_STATE};
    use std::collections::BTreeMap;

    fn table(entries: &[(&str, char, char, Direction, &str)]) -> TransitionTable {
        let mut rules: BTreeMap<String, StateRules> = BTreeMap::new();
        for (state, read, write, direction, next) in entries {
            rules
                .entry(state.to_string())
                .or_default()
                .insert(*read, Action::new(*write, *direction, *next));
        }
        TransitionTable::new(rules, DEFAULT_END_STATE).unwrap()
    }

    fn unary_increment() -> TransitionTable {
        table(&[
            ("q0", '1', '1', Direction::Right, "q0"),
            ("q0", ' ', '1', Direction::Right, "qdone"),
        ])
    }

    #[derive(Default)]
    struct Recorder {
        snapshots: Vec<(isize, usize, String, String)>,
    }

    impl Observer for Recorder {
        fn observe(&mut self, snapshot: &Snapshot<'_>) -> Result<(), ObserverError> {
            self.snapshots.push((
                snapshot.head,
                snapshot.step_count,
                snapshot.state.to_string(),
                snapshot.tape.to_string(),
            ));
            Ok(())
        }
    }

    struct Failing {
        calls: usize,
    }

    impl Observer for Failing {
        fn observe(&mut self, _snapshot: &Snapshot<'_>) -> Result<(), ObserverError> {
            self.calls += 1;
            Err("terminal went away".into())
        }
    }

    #[test]
    fn test_machine_creation() {
        let machine = TuringMachine::new(unary_increment(), "111", MachineConfig::default());

        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.status(), Status::Running);
        assert_eq!(machine.tape().to_string(), "111");
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.blank(), ' ');
    }

    #[test]
    fn test_unary_increment() {
        let mut machine = TuringMachine::new(unary_increment(), "111", MachineConfig::default());

        assert_eq!(machine.run(), Ok("1111".to_string()));
        assert!(machine.is_halted());
        assert_eq!(machine.state(), "qdone");
        assert_eq!(machine.step_count(), 4);
        assert_eq!(machine.head(), 4);
    }

    #[test]
    fn test_immediate_halt_on_empty_input() {
        let mut machine = TuringMachine::new(
            table(&[("q0", ' ', ' ', Direction::Right, "qdone")]),
            "",
            MachineConfig::default(),
        );

        assert_eq!(machine.run(), Ok(String::new()));
        assert_eq!(machine.step_count(), 1);
        assert_eq!(machine.tape().len(), 1);
    }

    #[test]
    fn test_missing_transition() {
        let mut machine = TuringMachine::new(
            table(&[("q0", '1', '1', Direction::Right, "qdone")]),
            "0",
            MachineConfig::default(),
        );

        assert_eq!(
            machine.run(),
            Err(TuringMachineError::MissingTransition {
                state: "q0".to_string(),
                symbol: '0'
            })
        );
        assert_eq!(machine.step_count(), 0);
        assert!(!machine.is_halted());
    }

    #[test]
    fn test_single_step() {
        let mut machine = TuringMachine::new(unary_increment(), "1", MachineConfig::default());

        assert_eq!(machine.step(), Ok(Step::Continue));
        assert_eq!(machine.head(), 1);
        assert_eq!(machine.step_count(), 1);

        assert_eq!(machine.step(), Ok(Step::Halt));
        assert_eq!(machine.tape().to_string(), "11");
        assert_eq!(machine.step_count(), 2);
    }

    #[test]
    fn test_step_after_halt_is_noop() {
        let mut machine = TuringMachine::new(unary_increment(), "", MachineConfig::default());
        machine.run().unwrap();
        let tape = machine.tape().clone();

        assert_eq!(machine.step(), Ok(Step::Halt));
        assert_eq!(machine.step_count(), 1);
        assert_eq!(machine.tape(), &tape);
    }

    #[test]
    fn test_left_move_prepends_one_blank() {
        let mut machine = TuringMachine::new(
            table(&[
                ("q0", 'a', 'a', Direction::Left, "q1"),
                ("q1", ' ', 'b', Direction::Stay, "qdone"),
            ]),
            "a",
            MachineConfig::default(),
        );

        machine.step().unwrap();
        assert_eq!(machine.head(), -1);
        assert_eq!(machine.tape().len(), 1);

        machine.step().unwrap();
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.tape().to_string(), "ba");
        assert!(machine.is_halted());
    }

    #[test]
    fn test_output_strips_inner_blanks() {
        // Walk right over the input, blanking the middle cell.
        let mut machine = TuringMachine::new(
            table(&[
                ("q0", '1', '1', Direction::Right, "q1"),
                ("q1", '0', ' ', Direction::Right, "q2"),
                ("q2", '1', '1', Direction::Right, "qdone"),
            ]),
            "101",
            MachineConfig::default(),
        );

        assert_eq!(machine.run(), Ok("11".to_string()));
        assert_eq!(machine.tape().to_string(), "1 1");
    }

    #[test]
    fn test_custom_blank() {
        let mut machine = TuringMachine::new(
            table(&[
                ("q0", '1', '1', Direction::Right, "q0"),
                ("q0", '_', '_', Direction::Right, "qdone"),
            ]),
            "1_1",
            MachineConfig {
                blank: '_',
                ..MachineConfig::default()
            },
        );

        assert_eq!(machine.run(), Ok("11".to_string()));
    }

    #[test]
    fn test_start_in_end_state() {
        let mut machine = TuringMachine::new(
            unary_increment(),
            "1 1",
            MachineConfig {
                start_state: DEFAULT_END_STATE.to_string(),
                ..MachineConfig::default()
            },
        );

        assert!(machine.is_halted());
        assert_eq!(machine.run(), Ok("11".to_string()));
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_unknown_start_state() {
        let mut machine = TuringMachine::new(
            unary_increment(),
            "1",
            MachineConfig {
                start_state: "q7".to_string(),
                ..MachineConfig::default()
            },
        );

        assert_eq!(
            machine.run(),
            Err(TuringMachineError::MissingTransition {
                state: "q7".to_string(),
                symbol: '1'
            })
        );
    }

    #[test]
    fn test_step_limit() {
        let mut machine = TuringMachine::new(
            table(&[("q0", ' ', ' ', Direction::Right, "q0")]),
            "",
            MachineConfig {
                step_limit: Some(25),
                ..MachineConfig::default()
            },
        );

        assert_eq!(machine.run(), Err(TuringMachineError::StepLimitExceeded(25)));
        assert_eq!(machine.step_count(), 25);
    }

    #[test]
    fn test_observer_sees_every_step() {
        let mut machine = TuringMachine::new(unary_increment(), "1", MachineConfig::default());
        let mut recorder = Recorder::default();

        machine.run_with(&mut recorder).unwrap();

        assert_eq!(
            recorder.snapshots,
            vec![
                (0, 0, "q0".to_string(), "1".to_string()),
                (1, 1, "q0".to_string(), "1".to_string()),
                (2, 2, "qdone".to_string(), "11".to_string()),
            ]
        );
    }

    #[test]
    fn test_failing_observer_does_not_stop_run() {
        let mut machine = TuringMachine::new(unary_increment(), "11", MachineConfig::default());
        let mut observer = Failing { calls: 0 };

        assert_eq!(machine.run_with(&mut observer), Ok("111".to_string()));
        assert_eq!(observer.calls, 4);
    }
}
