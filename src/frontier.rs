use std::collections::VecDeque;

use crate::bits::MoveSet;
use crate::board::{Board, Move};

/// One queued search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRecord {
    /// Number of moves from the initial board.
    pub depth: u8,
    /// Move that produced `board`.
    pub move_: Move,
    pub board: Board,
    /// Cells toggled on the path to `board`.
    pub path_moves: MoveSet,
}

impl SearchRecord {
    pub fn root(board: Board) -> Self {
        SearchRecord {
            depth: 0,
            move_: Move::Sentinel,
            board,
            path_moves: MoveSet::new(),
        }
    }
}

/// FIFO queue of search records. Popping in arrival order is what makes the
/// search level-ordered: records come out in non-decreasing depth.
pub struct Frontier {
    queue: VecDeque<SearchRecord>,
    max_len: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            max_len: 0,
        }
    }

    pub fn push(&mut self, record: SearchRecord) {
        debug_assert!(
            self.queue
                .back()
                .is_none_or(|last| last.depth <= record.depth),
            "frontier depths must be non-decreasing"
        );
        self.queue.push_back(record);
        self.max_len = self.max_len.max(self.queue.len());
    }

    pub fn pop(&mut self) -> Option<SearchRecord> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Largest number of records held at once.
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(depth: u8, bits: u64) -> SearchRecord {
        SearchRecord {
            depth,
            move_: Move::Sentinel,
            board: crate::board::Grid::new(8).unwrap().board_from_bits(bits).unwrap(),
            path_moves: MoveSet::new(),
        }
    }

    #[test]
    fn test_push_pop_single() {
        let mut frontier = Frontier::new();
        frontier.push(record(0, 1));
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.pop(), Some(record(0, 1)));
        assert_eq!(frontier.pop(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new();
        frontier.push(record(1, 10));
        frontier.push(record(1, 20));
        frontier.push(record(2, 30));

        assert_eq!(frontier.pop().map(|r| r.board.bits()), Some(10));
        assert_eq!(frontier.pop().map(|r| r.board.bits()), Some(20));
        assert_eq!(frontier.pop().map(|r| r.board.bits()), Some(30));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_push_pop_mixed() {
        let mut frontier = Frontier::new();
        frontier.push(record(1, 1));
        frontier.push(record(1, 2));
        assert_eq!(frontier.pop().map(|r| r.board.bits()), Some(1));
        frontier.push(record(2, 3));
        assert_eq!(frontier.pop().map(|r| r.board.bits()), Some(2));
        assert_eq!(frontier.pop().map(|r| r.board.bits()), Some(3));
    }

    #[test]
    fn test_max_len() {
        let mut frontier = Frontier::new();
        assert_eq!(frontier.max_len(), 0);
        frontier.push(record(0, 1));
        frontier.push(record(1, 2));
        frontier.push(record(1, 3));
        frontier.pop();
        frontier.pop();
        frontier.push(record(2, 4));
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.max_len(), 3);
    }

    #[test]
    fn test_root_record() {
        let root = record(0, 5);
        assert_eq!(SearchRecord::root(root.board), root);
    }
}
