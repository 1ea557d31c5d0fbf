use rand::distributions::uniform::SampleRange;
use rand::Rng;

use crate::apple::Apples;
use crate::basic::{Cell, GridDim};
use crate::snake::Body;

/// Sorted, deduplicated list of cells covered by the body and
/// (optionally) by apples
pub fn get_occupied_cells(body: &Body, apples: Option<&Apples>) -> Vec<Cell> {
    // upper bound
    let max_occupied_cells = body.len() + apples.map_or(0, |apples| apples.capacity());
    let mut occupied_cells = Vec::with_capacity(max_occupied_cells);
    if let Some(apples) = apples {
        occupied_cells.extend(apples.iter());
    }
    occupied_cells.extend(body.cells());
    occupied_cells.sort_unstable();
    occupied_cells.dedup();
    occupied_cells
}

/// Uniformly chosen cell that isn't in `occupied_cells`, which must
/// be sorted, deduplicated and on the board
pub fn random_free_spot(occupied_cells: &[Cell], board_dim: GridDim, rng: &mut impl Rng) -> Option<Cell> {
    let free_spaces = board_dim.area().checked_sub(occupied_cells.len())?;
    if free_spaces == 0 {
        return None;
    }

    // skip over occupied cells, they're sorted in index order
    let mut new_idx = (0..free_spaces).sample_single(rng);
    for &cell in occupied_cells {
        if board_dim.index_of(cell) <= new_idx {
            new_idx += 1;
        }
    }

    debug_assert!(new_idx < board_dim.area());
    Some(board_dim.from_index(new_idx))
}

#[test]
fn test_random_free_spot_avoids_occupied() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let board_dim = Cell::new(4, 4);
    let mut rng = StdRng::seed_from_u64(7);
    // everything but <2, 3> and <0, 1>
    let occupied: Vec<_> = (0..16)
        .map(|idx| board_dim.from_index(idx))
        .filter(|&cell| cell != Cell::new(2, 3) && cell != Cell::new(0, 1))
        .collect();

    for _ in 0..50 {
        let spot = random_free_spot(&occupied, board_dim, &mut rng).unwrap();
        assert!(spot == Cell::new(2, 3) || spot == Cell::new(0, 1), "{:?}", spot);
    }
}

#[test]
fn test_random_free_spot_full_board() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let board_dim = Cell::new(3, 2);
    let occupied: Vec<_> = (0..6).map(|idx| board_dim.from_index(idx)).collect();
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(random_free_spot(&occupied, board_dim, &mut rng), None);
}
