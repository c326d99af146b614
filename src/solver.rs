use arrayvec::ArrayVec;
use log::{debug, info};
use std::time::Instant;

use crate::board::{Board, Cell, Grid, MAX_CELLS, Move, MoveCatalog};
use crate::frontier::{Frontier, SearchRecord};
use crate::visited::{PredecessorIndex, VisitedSet};

/// Progress hook, called whenever the search first pops a record of a
/// greater depth.
pub trait Tracer {
    fn depth_reached(&self, depth: u8, frontier_len: usize);
}

pub struct NullTracer;

impl Tracer for NullTracer {
    fn depth_reached(&self, _depth: u8, _frontier_len: usize) {}
}

/// One move of a solution and the board it leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub cell: Cell,
    pub board: Board,
}

/// Moves from the initial board to the all-off board, first move first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    steps: ArrayVec<Step, MAX_CELLS>,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.steps.iter().map(|step| step.cell)
    }

    /// Replays the moves from `initial`, checking every recorded
    /// intermediate board and that the last one is all-off.
    pub fn verify(&self, catalog: &MoveCatalog, initial: Board) -> bool {
        let mut board = initial;
        for step in &self.steps {
            board = catalog.apply(board, step.cell);
            if board != step.board {
                return false;
            }
        }
        board.is_goal()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    Solved(Solution),
    /// Every reachable board was expanded without reaching the goal.
    Unsolvable,
    /// The node budget ran out first.
    Cutoff,
}

/// Breadth-first search for a minimum-length sequence of toggles that clears
/// a board.
pub struct Solver<T: Tracer = NullTracer> {
    catalog: MoveCatalog,
    max_nodes: usize,
    tracer: T,
    nodes_explored: usize,
    states_visited: usize,
    max_frontier: usize,
}

impl Solver<NullTracer> {
    pub fn new(grid: Grid) -> Self {
        Solver {
            catalog: MoveCatalog::new(grid),
            max_nodes: usize::MAX,
            tracer: NullTracer,
            nodes_explored: 0,
            states_visited: 0,
            max_frontier: 0,
        }
    }
}

impl<T: Tracer> Solver<T> {
    pub fn with_tracer<U: Tracer>(self, tracer: U) -> Solver<U> {
        Solver {
            catalog: self.catalog,
            max_nodes: self.max_nodes,
            tracer,
            nodes_explored: 0,
            states_visited: 0,
            max_frontier: 0,
        }
    }

    /// Give up with [`SolveResult::Cutoff`] after expanding this many boards.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn grid(&self) -> &Grid {
        self.catalog.grid()
    }

    pub fn catalog(&self) -> &MoveCatalog {
        &self.catalog
    }

    /// Boards expanded by the last call to [`Solver::solve`].
    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    /// Distinct boards popped by the last call to [`Solver::solve`].
    pub fn states_visited(&self) -> usize {
        self.states_visited
    }

    pub fn max_frontier(&self) -> usize {
        self.max_frontier
    }

    pub fn solve(&mut self, initial: Board) -> SolveResult {
        debug_assert!(
            self.grid().contains(initial),
            "board has cells outside the grid"
        );
        let start = Instant::now();
        self.nodes_explored = 0;

        let mut frontier = Frontier::new();
        let mut visited = VisitedSet::new();
        let mut predecessors = PredecessorIndex::new();

        predecessors.record(initial, 0, Move::Sentinel);
        frontier.push(SearchRecord::root(initial));

        let cell_count = self.grid().cell_count() as u8;
        let mut last_depth = 0u8;

        let result = loop {
            let Some(record) = frontier.pop() else {
                break SolveResult::Unsolvable;
            };

            if record.depth > last_depth {
                last_depth = record.depth;
                debug!(
                    "depth searched: {}, states to check: {}",
                    last_depth,
                    frontier.len()
                );
                self.tracer.depth_reached(last_depth, frontier.len());
            }

            // A board can be queued along several paths; only its first pop
            // is expanded.
            if !visited.insert(record.board) {
                continue;
            }
            predecessors.record(record.board, record.depth, record.move_);
            debug_assert_eq!(record.path_moves.len(), record.depth as usize);

            if record.board.is_goal() {
                break SolveResult::Solved(self.reconstruct(
                    &predecessors,
                    record.board,
                    record.depth,
                ));
            }

            if self.nodes_explored >= self.max_nodes {
                break SolveResult::Cutoff;
            }
            self.nodes_explored += 1;

            for index in 0..cell_count {
                // Toggling twice on one path cancels out, and a toggle with
                // no lit cell in reach is never part of a minimal solution.
                if record.path_moves.contains(index)
                    || !self.catalog.is_productive(record.board, index)
                {
                    continue;
                }
                let board = self.catalog.apply_index(record.board, index);
                if visited.contains(board) {
                    continue;
                }
                frontier.push(SearchRecord {
                    depth: record.depth + 1,
                    move_: Move::Toggle(self.grid().cell_at(index)),
                    board,
                    path_moves: record.path_moves.with_move(index),
                });
            }
        };

        self.states_visited = visited.len();
        self.max_frontier = frontier.max_len();

        let outcome = match &result {
            SolveResult::Solved(solution) => format!("solved in {} moves", solution.len()),
            SolveResult::Unsolvable => "no solution".to_string(),
            SolveResult::Cutoff => "node limit reached".to_string(),
        };
        info!(
            "{}: {} nodes expanded, {} states, max frontier {}, {} ms",
            outcome,
            self.nodes_explored,
            self.states_visited,
            self.max_frontier,
            start.elapsed().as_millis()
        );

        result
    }

    /// Walk the predecessor index back from the goal to the initial board.
    fn reconstruct(&self, predecessors: &PredecessorIndex, goal: Board, depth: u8) -> Solution {
        let mut steps = ArrayVec::new();
        let mut board = goal;
        let mut level = depth;

        loop {
            let Some(move_) = predecessors.get(board, level) else {
                panic!(
                    "predecessor index has no entry for board {:#x} at depth {}",
                    board.bits(),
                    level
                );
            };
            match move_ {
                Move::Sentinel => break,
                Move::Toggle(cell) => {
                    assert!(level > 0, "non-sentinel move recorded at depth 0");
                    steps.push(Step { cell, board });
                    board = self.catalog.apply(board, cell);
                    level -= 1;
                }
            }
        }

        assert_eq!(
            steps.len(),
            depth as usize,
            "backtracking stopped short of the goal depth"
        );
        steps.reverse();
        Solution { steps }
    }
}
