//! Property-based tests for the solver.
//!
//! Boards are built by applying a random subset of toggles to the all-off
//! board, so every generated board is solvable.

use std::collections::HashSet;

use flipsolve::{Board, Grid, MoveCatalog, SolveResult, Solution, Solver};
use proptest::prelude::*;

fn board_from_toggles(catalog: &MoveCatalog, toggles: u64) -> Board {
    (0..catalog.grid().cell_count() as u8)
        .filter(|&i| toggles & (1 << i) != 0)
        .fold(Board::EMPTY, |board, i| catalog.apply_index(board, i))
}

fn solve(grid: Grid, board: Board) -> Solution {
    match Solver::new(grid).solve(board) {
        SolveResult::Solved(solution) => solution,
        other => panic!("board {:#x} gave {:?}", board.bits(), other),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_toggle_is_self_inverse(bits in 0u64..(1 << 25), index in 0u8..25) {
        let grid = Grid::new(5).unwrap();
        let catalog = MoveCatalog::new(grid);
        let board = grid.board_from_bits(bits).unwrap();

        let toggled = catalog.apply_index(board, index);
        prop_assert!(grid.contains(toggled));
        prop_assert_eq!(catalog.apply_index(toggled, index), board);
    }

    #[test]
    fn prop_goal_iff_no_lit_cells(bits in 0u64..(1 << 36)) {
        let board = Grid::new(6).unwrap().board_from_bits(bits).unwrap();
        prop_assert_eq!(board.is_goal(), board.lit_count() == 0);
    }

    #[test]
    fn prop_solution_replays_to_goal(toggles in 0u64..(1 << 16)) {
        let grid = Grid::new(4).unwrap();
        let catalog = MoveCatalog::new(grid);
        let board = board_from_toggles(&catalog, toggles);

        let solution = solve(grid, board);
        prop_assert!(solution.verify(&catalog, board));
        // Never longer than the toggles that built the board
        prop_assert!(solution.len() <= toggles.count_ones() as usize);
    }

    #[test]
    fn prop_solution_never_repeats_a_cell(toggles in 0u64..(1 << 16)) {
        let grid = Grid::new(4).unwrap();
        let board = board_from_toggles(&MoveCatalog::new(grid), toggles);

        let solution = solve(grid, board);
        let distinct: HashSet<_> = solution.cells().collect();
        prop_assert_eq!(distinct.len(), solution.len());
    }

    #[test]
    fn prop_solve_is_deterministic(toggles in 0u64..(1 << 16)) {
        let grid = Grid::new(4).unwrap();
        let board = board_from_toggles(&MoveCatalog::new(grid), toggles);

        let mut solver = Solver::new(grid);
        let first = solver.solve(board);
        prop_assert_eq!(&first, &solver.solve(board));
        prop_assert_eq!(first, Solver::new(grid).solve(board));
    }
}
