use arrayvec::ArrayVec;
use std::fmt;

use crate::error::{GridError, PuzzleError};

/// Boards are packed into a `u64`, one bit per cell.
pub const MAX_CELLS: usize = 64;
pub const MAX_SIZE: usize = 8;

/// Cells flipped by a toggle, relative to the toggled cell, as `(dy, dx)`.
pub const TOGGLE_OFFSETS: [(i8, i8); 5] = [(0, 0), (0, 1), (0, -1), (1, 0), (-1, 0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub y: u8,
    pub x: u8,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.y, self.x)
    }
}

/// The move that produced a board during the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Marks the initial board; no move produced it.
    Sentinel,
    Toggle(Cell),
}

impl Move {
    pub fn cell(&self) -> Option<Cell> {
        match self {
            Move::Sentinel => None,
            Move::Toggle(cell) => Some(*cell),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Sentinel => write!(f, "start"),
            Move::Toggle(cell) => write!(f, "toggle {}", cell),
        }
    }
}

/// Lit/unlit state of every cell; bit `y * size + x` set means lit.
///
/// The ordering is the raw integer ordering. It carries no meaning beyond
/// making boards usable as sorted keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board {
    bits: u64,
}

impl Board {
    pub const EMPTY: Board = Board { bits: 0 };

    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Check if every cell is off (win condition)
    pub fn is_goal(&self) -> bool {
        self.bits == 0
    }

    pub fn lit_count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_lit(&self, index: u8) -> bool {
        (self.bits >> index) & 1 != 0
    }

    /// Flip every cell in `mask`. Self-inverse.
    pub fn flip(&self, mask: u64) -> Board {
        Board {
            bits: self.bits ^ mask,
        }
    }

    /// Render the board inside a frame, as printed between solution steps.
    pub fn display<'a>(&'a self, grid: &'a Grid) -> BoardDisplay<'a> {
        BoardDisplay {
            board: self,
            grid,
            highlight: None,
        }
    }

    /// Like [`Board::display`], with `cell` bracketed.
    pub fn display_move<'a>(&'a self, grid: &'a Grid, cell: Cell) -> BoardDisplay<'a> {
        BoardDisplay {
            board: self,
            grid,
            highlight: Some(cell),
        }
    }
}

pub struct BoardDisplay<'a> {
    board: &'a Board,
    grid: &'a Grid,
    highlight: Option<Cell>,
}

impl fmt::Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = format!("+{}+", "-".repeat(3 * self.grid.size as usize));
        writeln!(f, "{}", border)?;
        for y in 0..self.grid.size {
            write!(f, "|")?;
            for x in 0..self.grid.size {
                let cell = Cell { y, x };
                let ch = if self.board.is_lit(self.grid.index(cell)) {
                    'X'
                } else {
                    ' '
                };
                if self.highlight == Some(cell) {
                    write!(f, "[{}]", ch)?;
                } else {
                    write!(f, " {} ", ch)?;
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{}", border)
    }
}

/// Square grid geometry. Construction guarantees that every cell fits in a
/// [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: u8,
}

impl Grid {
    pub fn new(size: usize) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::Empty);
        }
        let cells = size.saturating_mul(size);
        if cells > MAX_CELLS {
            return Err(GridError::TooLarge { size, cells });
        }
        Ok(Grid { size: size as u8 })
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn cell_count(&self) -> usize {
        self.size() * self.size()
    }

    /// Bits of every cell on the grid.
    pub fn full_mask(&self) -> u64 {
        if self.cell_count() == MAX_CELLS {
            u64::MAX
        } else {
            (1u64 << self.cell_count()) - 1
        }
    }

    pub fn cell(&self, y: usize, x: usize) -> Result<Cell, GridError> {
        if y >= self.size() || x >= self.size() {
            return Err(GridError::OutOfBounds {
                y,
                x,
                size: self.size,
            });
        }
        Ok(Cell {
            y: y as u8,
            x: x as u8,
        })
    }

    pub fn index(&self, cell: Cell) -> u8 {
        debug_assert!(cell.y < self.size && cell.x < self.size);
        cell.y * self.size + cell.x
    }

    pub fn cell_at(&self, index: u8) -> Cell {
        debug_assert!((index as usize) < self.cell_count());
        Cell {
            y: index / self.size,
            x: index % self.size,
        }
    }

    /// All cells in row-major order. The solver expands moves in this order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count() as u8).map(move |index| self.cell_at(index))
    }

    /// Build a board with exactly the given `(y, x)` cells lit.
    pub fn board_from_cells<I>(&self, cells: I) -> Result<Board, GridError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut bits = 0u64;
        for (y, x) in cells {
            let cell = self.cell(y, x)?;
            let bit = 1u64 << self.index(cell);
            if bits & bit != 0 {
                return Err(GridError::DuplicateCell {
                    y: cell.y,
                    x: cell.x,
                });
            }
            bits |= bit;
        }
        Ok(Board { bits })
    }

    pub fn board_from_bits(&self, bits: u64) -> Result<Board, GridError> {
        if bits & !self.full_mask() != 0 {
            return Err(GridError::StrayBits {
                bits,
                size: self.size,
            });
        }
        Ok(Board { bits })
    }

    pub fn contains(&self, board: Board) -> bool {
        board.bits & !self.full_mask() == 0
    }

    /// Parse a board from text format.
    ///
    /// One line per row, `size` rows. Characters:
    /// - `X`, `x`, `#` = lit
    /// - `.`, `-`, `o`, ` ` = unlit
    ///
    /// Rows shorter than the grid are padded with unlit cells.
    pub fn parse_board(&self, text: &str) -> Result<Board, PuzzleError> {
        let rows: Vec<&str> = text.lines().map(|line| line.trim_end()).collect();
        if rows.len() != self.size() {
            return Err(PuzzleError::Invalid(format!(
                "expected {} rows, found {}",
                self.size(),
                rows.len()
            )));
        }

        let mut lit = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() > self.size() {
                return Err(PuzzleError::Invalid(format!(
                    "row {} is wider than {} cells",
                    y + 1,
                    self.size()
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    'X' | 'x' | '#' => lit.push((y, x)),
                    '.' | '-' | 'o' | ' ' => {}
                    _ => {
                        return Err(PuzzleError::Invalid(format!(
                            "unexpected character {:?} at row {}, column {}",
                            ch,
                            y + 1,
                            x + 1
                        )));
                    }
                }
            }
        }

        Ok(self.board_from_cells(lit)?)
    }
}

/// Per-cell toggle masks: the plus-shaped neighbourhood of each cell,
/// clipped to the grid.
#[derive(Debug, Clone)]
pub struct MoveCatalog {
    grid: Grid,
    masks: ArrayVec<u64, MAX_CELLS>,
}

impl MoveCatalog {
    pub fn new(grid: Grid) -> Self {
        let size = grid.size() as i16;
        let masks = grid
            .cells()
            .map(|cell| {
                TOGGLE_OFFSETS
                    .iter()
                    .filter_map(|&(dy, dx)| {
                        let y = cell.y as i16 + dy as i16;
                        let x = cell.x as i16 + dx as i16;
                        ((0..size).contains(&y) && (0..size).contains(&x))
                            .then(|| 1u64 << (y * size + x) as u32)
                    })
                    .fold(0u64, |mask, bit| mask | bit)
            })
            .collect();
        MoveCatalog { grid, masks }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mask(&self, index: u8) -> u64 {
        self.masks[index as usize]
    }

    /// Toggle the cell at `index`.
    pub fn apply_index(&self, board: Board, index: u8) -> Board {
        board.flip(self.mask(index))
    }

    /// Toggle `cell`: flips it and its in-bounds orthogonal neighbours.
    pub fn apply(&self, board: Board, cell: Cell) -> Board {
        self.apply_index(board, self.grid.index(cell))
    }

    /// A toggle is productive when some cell it would flip is currently lit.
    pub fn is_productive(&self, board: Board, index: u8) -> bool {
        board.bits() & self.mask(index) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: usize) -> Grid {
        Grid::new(size).unwrap()
    }

    #[test]
    fn test_grid_limits() {
        assert_eq!(Grid::new(0), Err(GridError::Empty));
        assert!(Grid::new(1).is_ok());
        assert!(Grid::new(8).is_ok());
        assert_eq!(
            Grid::new(9),
            Err(GridError::TooLarge { size: 9, cells: 81 })
        );
    }

    #[test]
    fn test_index_round_trip() {
        let grid = grid(5);
        let cell = grid.cell(3, 1).unwrap();
        assert_eq!(grid.index(cell), 16);
        assert_eq!(grid.cell_at(16), cell);
        assert!(grid.cell(5, 0).is_err());
        assert!(grid.cell(0, 5).is_err());
    }

    #[test]
    fn test_cells_row_major() {
        let grid = grid(2);
        let cells: Vec<(u8, u8)> = grid.cells().map(|c| (c.y, c.x)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_catalog_masks_3x3() {
        let catalog = MoveCatalog::new(grid(3));
        // Corner: itself, right, below
        assert_eq!(catalog.mask(0), 0b000_001_011);
        // Top edge middle: itself, left, right, below
        assert_eq!(catalog.mask(1), 0b000_010_111);
        // Centre: full plus
        assert_eq!(catalog.mask(4), 0b010_111_010);
        // Bottom right corner
        assert_eq!(catalog.mask(8), 0b110_100_000);
    }

    #[test]
    fn test_catalog_8x8_uses_every_bit() {
        let catalog = MoveCatalog::new(grid(8));
        assert_eq!(catalog.mask(63), (1 << 63) | (1 << 62) | (1 << 55));
        let all = (0..64).fold(0u64, |acc, i| acc | catalog.mask(i));
        assert_eq!(all, u64::MAX);
    }

    #[test]
    fn test_single_cell_grid() {
        let grid = grid(1);
        let catalog = MoveCatalog::new(grid);
        let board = grid.board_from_cells([(0, 0)]).unwrap();
        assert!(catalog.apply_index(board, 0).is_goal());
    }

    #[test]
    fn test_apply_is_self_inverse() {
        let grid = grid(5);
        let catalog = MoveCatalog::new(grid);
        let board = grid.board_from_cells([(0, 0), (2, 3), (4, 4)]).unwrap();
        for cell in grid.cells() {
            let toggled = catalog.apply(board, cell);
            assert_ne!(toggled, board);
            assert_eq!(catalog.apply(toggled, cell), board);
        }
    }

    #[test]
    fn test_is_productive() {
        let grid = grid(3);
        let catalog = MoveCatalog::new(grid);
        let board = grid.board_from_cells([(0, 0)]).unwrap();
        assert!(catalog.is_productive(board, 0));
        assert!(catalog.is_productive(board, 1));
        assert!(catalog.is_productive(board, 3));
        assert!(!catalog.is_productive(board, 4));
        assert!(!catalog.is_productive(board, 8));
    }

    #[test]
    fn test_board_from_cells_rejects_duplicates() {
        let grid = grid(3);
        assert_eq!(
            grid.board_from_cells([(1, 1), (1, 1)]),
            Err(GridError::DuplicateCell { y: 1, x: 1 })
        );
    }

    #[test]
    fn test_board_from_bits() {
        let grid = grid(2);
        assert_eq!(grid.board_from_bits(0b1001).unwrap().lit_count(), 2);
        assert!(matches!(
            grid.board_from_bits(0b1_0000),
            Err(GridError::StrayBits { .. })
        ));
        assert!(Grid::new(8).unwrap().board_from_bits(u64::MAX).is_ok());
    }

    #[test]
    fn test_move_cell() {
        let cell = Cell { y: 2, x: 1 };
        assert_eq!(Move::Toggle(cell).cell(), Some(cell));
        assert_eq!(Move::Sentinel.cell(), None);
        assert_ne!(Move::Sentinel, Move::Toggle(Cell { y: 0, x: 0 }));
        assert_eq!(Move::Toggle(cell).to_string(), "toggle (2, 1)");
    }

    #[test]
    fn test_is_goal() {
        let grid = grid(3);
        assert!(Board::EMPTY.is_goal());
        assert!(Board::default().is_goal());
        assert!(!grid.board_from_cells([(2, 2)]).unwrap().is_goal());
    }

    #[test]
    fn test_parse_board() {
        let grid = grid(3);
        let board = grid.parse_board("X..\n.#.\n..x").unwrap();
        assert_eq!(
            board,
            grid.board_from_cells([(0, 0), (1, 1), (2, 2)]).unwrap()
        );

        // Short rows are padded
        let board = grid.parse_board("X\n\n  X").unwrap();
        assert_eq!(board, grid.board_from_cells([(0, 0), (2, 2)]).unwrap());
    }

    #[test]
    fn test_parse_board_errors() {
        let grid = grid(3);
        assert!(grid.parse_board("X..\n...").is_err());
        assert!(grid.parse_board("X...\n...\n...").is_err());
        assert!(grid.parse_board("X..\n.?.\n...").is_err());
    }

    #[test]
    fn test_display() {
        let grid = grid(3);
        let board = grid.board_from_cells([(0, 0), (1, 2)]).unwrap();
        let expected = "+---------+\n\
                        | X       |\n\
                        |       X |\n\
                        |         |\n\
                        +---------+\n";
        assert_eq!(board.display(&grid).to_string(), expected);

        let cell = grid.cell(1, 2).unwrap();
        let expected = "+---------+\n\
                        | X       |\n\
                        |      [X]|\n\
                        |         |\n\
                        +---------+\n";
        assert_eq!(board.display_move(&grid, cell).to_string(), expected);
    }
}
