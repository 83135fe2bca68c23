//! This module defines the `Tape`, a two-way unbounded tape that only materializes the
//! cells the head has visited.

use crate::types::Direction;
use std::collections::VecDeque;
use std::fmt;

/// A single tape with its head.
///
/// Cells are stored in a ring buffer so that growing at either end is amortized O(1).
/// The head is a signed index into the materialized cells: after a left move from the
/// first cell it is `-1` until the next access materializes a blank there, and after a
/// right move from the last cell it equals `len()` until the next access appends one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<char>,
    head: isize,
    blank: char,
}

impl Tape {
    /// Creates a tape holding `input`, one symbol per character, with the head on the first cell.
    pub fn new(input: &str, blank: char) -> Self {
        Self {
            cells: input.chars().collect(),
            head: 0,
            blank,
        }
    }

    /// Reads the symbol under the head, materializing a blank cell if the head is just
    /// past either end of the tape.
    pub fn read(&mut self) -> char {
        let index = self.materialize();
        self.cells[index]
    }

    /// Overwrites the symbol under the head.
    pub fn write(&mut self, symbol: char) {
        let index = self.materialize();
        self.cells[index] = symbol;
    }

    /// Moves the head one cell in `direction`. Growth is deferred to the next access.
    pub fn shift(&mut self, direction: Direction) {
        self.head += direction.offset();
    }

    /// Makes the cell under the head exist and returns its index.
    ///
    /// Within a machine the head is never more than one cell outside the materialized
    /// range, so this adds at most one blank.
    fn materialize(&mut self) -> usize {
        if self.head < 0 {
            for _ in self.head..0 {
                self.cells.push_front(self.blank);
            }
            self.head = 0;
        }

        let index = self.head as usize;
        if index >= self.cells.len() {
            self.cells.resize(index + 1, self.blank);
        }

        index
    }

    /// The current head position.
    pub fn head(&self) -> isize {
        self.head
    }

    /// The blank symbol of this tape.
    pub fn blank(&self) -> char {
        self.blank
    }

    /// Number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the symbol at `index`, or the blank symbol outside the materialized range.
    pub fn get(&self, index: isize) -> char {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.cells.get(i).copied())
            .unwrap_or(self.blank)
    }

    /// Iterates over the materialized cells from left to right.
    pub fn cells(&self) -> impl Iterator<Item = char> + '_ {
        self.cells.iter().copied()
    }

    /// The tape contents with every blank removed.
    pub fn output(&self) -> String {
        self.cells().filter(|&c| c != self.blank).collect()
    }

    /// Counts the non-blank symbols, in the order they first appear on the tape.
    pub fn symbol_counts(&self) -> Vec<(char, usize)> {
        let mut counts: Vec<(char, usize)> = Vec::new();
        for symbol in self.cells().filter(|&c| c != self.blank) {
            match counts.iter_mut().find(|(s, _)| *s == symbol) {
                Some((_, count)) => *count += 1,
                None => counts.push((symbol, 1)),
            }
        }
        counts
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}
