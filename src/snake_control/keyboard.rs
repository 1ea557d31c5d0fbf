use crate::apple::Apples;
use crate::basic::{Dir, GridDim};
use crate::snake::Body;
use crate::snake_control::Controller;
use std::collections::VecDeque;

/// Directions requested by the player, applied one per tick
pub struct Keyboard {
    control_queue: VecDeque<Dir>,
    dir: Dir,
}

impl Keyboard {
    // How many moves ahead a player can make (this allows quick 180° turns)
    const CTRL_QUEUE_LIMIT: usize = 3;

    pub fn new(start_dir: Dir) -> Self {
        Self {
            control_queue: VecDeque::with_capacity(Self::CTRL_QUEUE_LIMIT),
            dir: start_dir,
        }
    }
}

impl Controller for Keyboard {
    fn next_dir(&mut self, _: &Body, _: &Apples, _: GridDim) -> Option<Dir> {
        let dir = self.control_queue.pop_front()?;
        self.dir = dir;
        Some(dir)
    }

    fn reset(&mut self, dir: Dir) {
        self.control_queue.clear();
        self.dir = dir;
    }

    fn push_dir(&mut self, new_dir: Dir) {
        // deny 180° turns and repeats
        let last_dir = self.control_queue.back().copied().unwrap_or(self.dir);
        if self.control_queue.len() < Self::CTRL_QUEUE_LIMIT
            && new_dir != last_dir
            && !new_dir.is_reverse_of(last_dir)
        {
            self.control_queue.push_back(new_dir);
        }
    }
}

#[test]
fn test_queued_turns() {
    use crate::basic::Cell;
    use Dir::*;

    let mut keyboard = Keyboard::new(Right);
    let (body, apples, board_dim) = (Body::new(), Apples::new(0), Cell::new(8, 8));

    // a quick u-turn takes two ticks
    keyboard.push_dir(Left);
    keyboard.push_dir(Up);
    keyboard.push_dir(Up);
    keyboard.push_dir(Left);
    assert_eq!(keyboard.next_dir(&body, &apples, board_dim), Some(Up));
    assert_eq!(keyboard.next_dir(&body, &apples, board_dim), Some(Left));
    assert_eq!(keyboard.next_dir(&body, &apples, board_dim), None);

    keyboard.push_dir(Down);
    keyboard.push_dir(Right);
    keyboard.push_dir(Up);
    keyboard.push_dir(Left);
    assert_eq!(keyboard.control_queue.len(), 3);

    keyboard.reset(Right);
    assert_eq!(keyboard.next_dir(&body, &apples, board_dim), None);
}
