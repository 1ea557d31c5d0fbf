use crate::apple::Apples;
use crate::basic::board::{get_occupied_cells, random_free_spot};
use crate::basic::{Cell, GridDim};
use crate::snake::Body;
use rand::Rng;
use tracing::{debug, warn};

/// A uniformly random cell not covered by the body, `None` if the
/// body covers the whole board
pub fn spawn_apple(body: &Body, board_dim: GridDim, rng: &mut impl Rng) -> Option<Cell> {
    if body.len() >= board_dim.area() {
        return None;
    }

    let occupied_cells = get_occupied_cells(body, None);
    random_free_spot(&occupied_cells, board_dim, rng)
}

/// How apples are placed when a game starts
#[derive(Clone, Debug, PartialEq)]
pub enum SpawnPolicy {
    None, // no apples
    /// Fixed positions, filling slots in order
    Preset(Vec<Cell>),
    /// Random positions, avoiding the snake and each other
    Random { apple_count: usize },
}

impl SpawnPolicy {
    pub fn apple_count(&self) -> usize {
        match self {
            SpawnPolicy::None => 0,
            SpawnPolicy::Preset(cells) => cells.len(),
            SpawnPolicy::Random { apple_count } => *apple_count,
        }
    }

    /// Empty all slots and fill them again according to the policy
    pub fn populate(&self, apples: &mut Apples, body: &Body, board_dim: GridDim, rng: &mut impl Rng) {
        apples.clear();

        match self {
            SpawnPolicy::None => {}
            SpawnPolicy::Preset(cells) => {
                for (slot, &pos) in cells.iter().enumerate().take(apples.capacity()) {
                    apples.set(slot, Some(pos));
                }
            }
            SpawnPolicy::Random { apple_count } => {
                let mut occupied_cells = get_occupied_cells(body, Some(apples));

                for slot in 0..(*apple_count).min(apples.capacity()) {
                    let pos = match random_free_spot(&occupied_cells, board_dim, rng) {
                        Some(pos) => pos,
                        None => {
                            warn!(
                                "no space left for new apples ({} apples will be missing)",
                                apple_count - slot,
                            );
                            break;
                        }
                    };

                    // insert at sorted position
                    match occupied_cells.binary_search(&pos) {
                        Ok(_) => unreachable!("spawned apple on an occupied cell {:?}", pos),
                        Err(idx) => occupied_cells.insert(idx, pos),
                    }

                    debug!("apple {} spawned at {:?}", slot, pos);
                    apples.set(slot, Some(pos));
                }
            }
        }
    }
}

#[cfg(test)]
fn seeded_rng() -> rand::rngs::StdRng {
    use rand::SeedableRng;
    rand::rngs::StdRng::seed_from_u64(0xA991E)
}

#[test]
fn test_spawn_apple_never_on_body() {
    use crate::basic::Dir;
    use crate::snake::Builder;

    let board_dim = Cell::new(6, 6);
    let body = Builder::default()
        .pos(Cell::new(5, 2))
        .dir(Dir::Right)
        .len(6)
        .build(board_dim)
        .unwrap();

    let mut rng = seeded_rng();
    for _ in 0..200 {
        let apple = spawn_apple(&body, board_dim, &mut rng).unwrap();
        assert!(board_dim.contains(apple));
        assert!(!body.contains(apple), "apple spawned on the snake at {:?}", apple);
    }
}

#[test]
fn test_spawn_apple_full_board() {
    use crate::basic::Dir;

    let board_dim = Cell::new(3, 2);
    let mut body = Body::new();
    for idx in 0..board_dim.area() {
        body.insert_tail(board_dim.from_index(idx), Dir::Right).unwrap();
    }

    assert_eq!(spawn_apple(&body, board_dim, &mut seeded_rng()), None);

    // one free cell left, it's the only possible choice
    body.remove_tail();
    assert_eq!(spawn_apple(&body, board_dim, &mut seeded_rng()), Some(Cell::new(2, 1)));
}

#[test]
fn test_populate_random_apples_are_distinct() {
    use crate::basic::Dir;
    use crate::snake::Builder;
    use itertools::Itertools;

    let board_dim = Cell::new(5, 5);
    let body = Builder::default()
        .pos(Cell::new(2, 2))
        .dir(Dir::Up)
        .len(3)
        .build(board_dim)
        .unwrap();

    let mut apples = Apples::new(32);
    SpawnPolicy::Random { apple_count: 22 }.populate(&mut apples, &body, board_dim, &mut seeded_rng());

    assert_eq!(apples.count(), 22);
    assert!(apples.iter().all_unique());
    assert!(apples.iter().all(|apple| !body.contains(apple)));

    // only 22 free cells remain on the board
    SpawnPolicy::Random { apple_count: 30 }.populate(&mut apples, &body, board_dim, &mut seeded_rng());
    assert_eq!(apples.count(), 22);
}

#[test]
fn test_populate_preset() {
    let mut apples = Apples::new(4);
    apples.set(3, Some(Cell::new(0, 0)));
    SpawnPolicy::Preset(vec![Cell::new(6, 4), Cell::new(12, 12)]).populate(
        &mut apples,
        &Body::new(),
        Cell::new(16, 16),
        &mut seeded_rng(),
    );

    assert_eq!(apples.slots(), &[Some(Cell::new(6, 4)), Some(Cell::new(12, 12)), None, None]);
}
