//! Terminal rendering of a running machine: a window of the tape centered on the head,
//! the step counter and current state, and a tally of the symbols on the tape.

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use utm::{Observer, ObserverError, Snapshot};

/// Number of cells shown on each side of the head.
const VISIBLE_CELLS: isize = 15;

/// How the renderer waits between two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// Do not wait.
    None,
    /// Sleep for a fixed time.
    FixedDelay(Duration),
    /// Block until the user presses enter.
    WaitForAcknowledgment,
}

impl Pause {
    fn wait(self) -> io::Result<()> {
        match self {
            Pause::None => Ok(()),
            Pause::FixedDelay(delay) => {
                thread::sleep(delay);
                Ok(())
            }
            Pause::WaitForAcknowledgment => {
                let mut line = String::new();
                io::stdin().read_line(&mut line).map(|_| ())
            }
        }
    }
}

/// Draws every snapshot to stdout.
pub struct TapeRenderer {
    pause: Pause,
    clear_screen: bool,
}

impl TapeRenderer {
    pub fn new(pause: Pause, clear_screen: bool) -> Self {
        Self {
            pause,
            clear_screen,
        }
    }
}

impl Observer for TapeRenderer {
    fn observe(&mut self, snapshot: &Snapshot<'_>) -> Result<(), ObserverError> {
        let mut stdout = io::stdout();
        if self.clear_screen {
            execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        write!(stdout, "{}", render_frame(snapshot))?;
        stdout.flush()?;

        self.pause.wait()?;
        Ok(())
    }
}

/// Logs every snapshot at debug level instead of drawing it.
pub struct TraceObserver;

impl Observer for TraceObserver {
    fn observe(&mut self, snapshot: &Snapshot<'_>) -> Result<(), ObserverError> {
        tracing::debug!(
            step = snapshot.step_count,
            state = snapshot.state,
            head = snapshot.head,
            tape = %snapshot.tape,
            "snapshot"
        );
        Ok(())
    }
}

/// Builds one frame of output for `snapshot`.
pub fn render_frame(snapshot: &Snapshot<'_>) -> String {
    let marker_offset = " ".repeat((VISIBLE_CELLS * 2) as usize);
    let mut frame = String::new();

    let _ = writeln!(frame, "Steps Counter {:>7}", snapshot.step_count);
    let _ = writeln!(frame, "Current State {:>7}", snapshot.state);
    let _ = writeln!(frame, "Tape Index {:>10} ", snapshot.head);
    let _ = writeln!(frame, "{}▼", marker_offset);
    let _ = writeln!(frame, "{}", tape_window(snapshot));
    let _ = writeln!(frame, "{}▲", marker_offset);
    frame.push_str(&symbol_tally(snapshot));
    frame.push('\n');

    frame
}

/// The cells around the head separated by pipes, with the head cell in the middle.
fn tape_window(snapshot: &Snapshot<'_>) -> String {
    let start = snapshot.head - VISIBLE_CELLS;
    let end = snapshot.head + VISIBLE_CELLS;

    (start..=end)
        .map(|index| snapshot.tape.get(index).to_string())
        .collect::<Vec<_>>()
        .join("|")
}

fn symbol_tally(snapshot: &Snapshot<'_>) -> String {
    let mut tally = String::from("Sign Counter\n");
    for (symbol, count) in snapshot.tape.symbol_counts() {
        let _ = writeln!(tally, "{}x: {}", count, symbol);
    }
    tally
}
