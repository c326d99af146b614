use rand::SeedableRng;
use rand::seq::index;
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, MoveCatalog};

/// Random board that is solvable in at most `moves` toggles.
///
/// Starts from the all-off board and toggles `moves` distinct cells picked by
/// a PRNG seeded with `seed`, so the same seed always yields the same board.
/// `moves` is clamped to the number of cells.
pub fn scramble(catalog: &MoveCatalog, moves: usize, seed: u64) -> Board {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let cells = catalog.grid().cell_count();
    index::sample(&mut rng, cells, moves.min(cells))
        .iter()
        .fold(Board::EMPTY, |board, i| catalog.apply_index(board, i as u8))
}
