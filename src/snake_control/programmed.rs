use crate::apple::Apples;
use crate::basic::{Dir, GridDim};
use crate::snake::Body;
use crate::snake_control::Controller;

#[allow(unused_macros)]
#[macro_export]
macro_rules! move_sequence {
    (@ turn($dir:expr) ) => {
        $crate::snake_control::programmed::Move::Turn($dir)
    };
    (@ wait($t:expr) ) => {
        $crate::snake_control::programmed::Move::Wait($t)
    };
    [ $( $action:tt ( $( $inner:tt )* ) ),* $(,)? ] => {
        vec![$(
            move_sequence!(@ $action( $( $inner )* ))
        ),*]
    };
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Move {
    Turn(Dir),
    /// Keep going straight for this many extra ticks
    Wait(usize),
}

/// Plays a fixed sequence of moves, looping forever
pub struct Programmed {
    pub move_sequence: Vec<Move>,
    pub dir: Dir,
    pub next_move_idx: usize,
    pub wait: usize,
}

impl Controller for Programmed {
    fn next_dir(&mut self, _: &Body, _: &Apples, _: GridDim) -> Option<Dir> {
        if self.wait > 0 {
            self.wait -= 1;
        } else {
            match *self.move_sequence.get(self.next_move_idx)? {
                Move::Wait(wait) => self.wait = wait.saturating_sub(1),
                Move::Turn(new_dir) => self.dir = new_dir,
            };

            self.next_move_idx += 1;
            self.next_move_idx %= self.move_sequence.len();
        }

        Some(self.dir)
    }

    fn reset(&mut self, dir: Dir) {
        self.dir = dir;
        self.next_move_idx = 0;
        self.wait = 0;
    }
}

#[test]
fn test_programmed_sequence() {
    use crate::basic::Cell;
    use Dir::*;

    let mut controller = Programmed {
        move_sequence: move_sequence![turn(Up), wait(2), turn(Left)],
        dir: Right,
        next_move_idx: 0,
        wait: 0,
    };
    let body = Body::new();
    let apples = Apples::new(0);
    let board_dim = Cell::new(8, 8);

    let dirs: Vec<_> = (0..8)
        .map(|_| controller.next_dir(&body, &apples, board_dim).unwrap())
        .collect();
    assert_eq!(dirs, vec![Up, Up, Up, Left, Up, Up, Up, Left]);

    controller.reset(Down);
    assert_eq!(controller.dir, Down);
    assert_eq!(controller.next_dir(&body, &apples, board_dim), Some(Up));
}

#[test]
fn test_empty_sequence_keeps_direction() {
    let mut controller = Programmed {
        move_sequence: vec![],
        dir: Dir::Right,
        next_move_idx: 0,
        wait: 0,
    };
    let board_dim = crate::basic::Cell::new(8, 8);
    assert_eq!(controller.next_dir(&Body::new(), &Apples::new(0), board_dim), None);
}
