use std::fs;
use std::path::Path;

use crate::board::{Board, Grid};
use crate::error::PuzzleError;

/// A starting board together with the grid it is played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Puzzle {
    pub grid: Grid,
    pub board: Board,
}

impl Puzzle {
    /// Parse a single square puzzle; the grid size is the number of rows.
    pub fn from_text(text: &str) -> Result<Self, PuzzleError> {
        let grid = Grid::new(text.lines().count())?;
        let board = grid.parse_board(text)?;
        Ok(Puzzle { grid, board })
    }
}

/// A collection of puzzles.
#[derive(Debug)]
pub struct Puzzles {
    puzzles: Vec<Puzzle>,
}

impl Puzzles {
    /// Parse puzzles from a string.
    ///
    /// The format uses:
    /// - Lines starting with `;` as puzzle separators/comments
    /// - One line per row, `X` for a lit cell and `.` for an unlit one
    /// - Empty lines between puzzles (optional)
    ///
    /// Each puzzle is square: its row count is its grid size.
    pub fn from_text(contents: &str) -> Result<Self, PuzzleError> {
        let mut puzzles = Vec::new();
        let mut current = String::new();

        for line in contents.lines() {
            if line.trim_start().starts_with(';') || line.trim().is_empty() {
                Self::flush(&mut current, &mut puzzles)?;
                continue;
            }
            current.push_str(line);
            current.push('\n');
        }
        Self::flush(&mut current, &mut puzzles)?;

        Ok(Puzzles { puzzles })
    }

    fn flush(current: &mut String, puzzles: &mut Vec<Puzzle>) -> Result<(), PuzzleError> {
        if current.is_empty() {
            return Ok(());
        }
        let number = puzzles.len() + 1;
        let puzzle = Puzzle::from_text(current.trim_end_matches('\n')).map_err(|err| match err {
            PuzzleError::Invalid(msg) => PuzzleError::Invalid(format!("puzzle {}: {}", number, msg)),
            other => other,
        })?;
        puzzles.push(puzzle);
        current.clear();
        Ok(())
    }

    /// Parse puzzles from a text file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PuzzleError> {
        let contents = fs::read_to_string(path)?;
        Self::from_text(&contents)
    }

    /// Get the nth puzzle (0-indexed).
    pub fn get(&self, index: usize) -> Option<&Puzzle> {
        self.puzzles.get(index)
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Puzzle> {
        self.puzzles.iter()
    }
}
