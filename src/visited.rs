use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::board::{Board, Move};

/// Boards already expanded during one search. Append-only.
#[derive(Debug, Default)]
pub struct VisitedSet {
    boards: HashSet<Board>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, board: Board) -> bool {
        self.boards.contains(&board)
    }

    /// Returns `true` if `board` was not present before.
    pub fn insert(&mut self, board: Board) -> bool {
        self.boards.insert(board)
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

/// Maps `(board, depth)` to the move that first produced the board at that
/// depth, for backtracking from the goal.
#[derive(Debug, Default)]
pub struct PredecessorIndex {
    moves: HashMap<(Board, u8), Move>,
}

impl PredecessorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-if-absent: the first move recorded for a key wins. Returns
    /// `true` if the entry was added.
    pub fn record(&mut self, board: Board, depth: u8, move_: Move) -> bool {
        match self.moves.entry((board, depth)) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(move_);
                true
            }
        }
    }

    pub fn get(&self, board: Board, depth: u8) -> Option<Move> {
        self.moves.get(&(board, depth)).copied()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}
