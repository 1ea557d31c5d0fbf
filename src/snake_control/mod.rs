use crate::apple::Apples;
use crate::basic::{Dir, GridDim};
use crate::snake::Body;
use itertools::{repeat_n, Itertools};
use programmed::Move;

pub mod breadth_first;
pub mod keyboard;
pub mod programmed;

#[derive(Clone, Debug)]
pub enum Template {
    /// Directions pushed by the host, one used per tick
    Keyboard,
    Programmed(Vec<Move>),
    BreadthFirst,
}

/// Decides which way the snake goes, asked once per tick
pub trait Controller {
    // None means keep going in the current direction
    fn next_dir(&mut self, body: &Body, apples: &Apples, board_dim: GridDim) -> Option<Dir>;

    // called when the snake is respawned
    fn reset(&mut self, _dir: Dir) {}

    // input from the host, only used by interactive controllers
    fn push_dir(&mut self, _dir: Dir) {}
}

// Group contiguous instances of Move::Wait together
fn simplify_pattern<I: IntoIterator<Item = Move>>(iter: I) -> impl Iterator<Item = Move> {
    iter.into_iter().peekable().batching(|it| match it.next() {
        None => None,
        e @ Some(Move::Turn(_)) => e,
        Some(Move::Wait(mut n)) => {
            while let Some(Move::Wait(m)) = it.peek() {
                n += m;
                it.next();
            }
            Some(Move::Wait(n))
        }
    })
}

impl Template {
    /// Clockwise square, turning every `side_len` cells
    pub fn demo_square_pattern(start_dir: Dir, side_len: usize) -> Self {
        let turns = Dir::iter_from(start_dir).map(Move::Turn);
        Self::Programmed(if side_len <= 1 {
            turns.collect()
        } else {
            // the turn itself moves the snake one cell
            let iter = turns.interleave(repeat_n(Move::Wait(side_len - 1), 4));
            simplify_pattern(iter).collect()
        })
    }

    pub fn into_controller(self, start_dir: Dir) -> Box<dyn Controller + Send + Sync> {
        use crate::snake_control::breadth_first::BreadthFirst;
        use crate::snake_control::keyboard::Keyboard;
        use crate::snake_control::programmed::Programmed;

        match self {
            Template::Keyboard => Box::new(Keyboard::new(start_dir)),
            Template::Programmed(move_sequence) => Box::new(Programmed {
                move_sequence: simplify_pattern(move_sequence).collect(),
                dir: start_dir,
                next_move_idx: 0,
                wait: 0,
            }),
            Template::BreadthFirst => Box::new(BreadthFirst::default()),
        }
    }
}

#[test]
fn test_simplify_pattern() {
    use Move::*;
    let simplified: Vec<_> =
        simplify_pattern(vec![Wait(1), Wait(2), Turn(Dir::Up), Wait(3), Turn(Dir::Left), Wait(1)]).collect();
    assert_eq!(simplified, vec![Wait(3), Turn(Dir::Up), Wait(3), Turn(Dir::Left), Wait(1)]);
}

#[test]
fn test_square_pattern_returns_to_start() {
    use crate::basic::Cell;

    let board_dim = Cell::new(16, 16);
    let mut controller = Template::demo_square_pattern(Dir::Right, 4).into_controller(Dir::Right);
    let body = Body::new();
    let apples = Apples::new(0);

    let start = Cell::new(3, 3);
    let mut pos = start;
    let mut dir = Dir::Right;
    for _ in 0..16 {
        if let Some(new_dir) = controller.next_dir(&body, &apples, board_dim) {
            assert!(!new_dir.is_reverse_of(dir));
            dir = new_dir;
        }
        pos = pos.wrapping_translate(dir, board_dim);
    }
    assert_eq!(pos, start);
}
