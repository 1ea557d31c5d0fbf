use crate::apple::Apples;
use crate::basic::{Cell, Dir, GridDim};
use crate::snake::Body;
use crate::snake_control::Controller;
use std::collections::{HashMap, HashSet, VecDeque};

/// Follows the shortest path to the closest apple, going around
/// the snake's own body
#[derive(Default)]
pub struct BreadthFirst {
    /// Cells of the path currently being followed, kept so a
    /// renderer can show it
    pub path: Vec<Cell>,
}

impl BreadthFirst {
    /// Shortest path from the head to any apple, as the cells to step on
    pub fn get_path(body: &Body, apples: &Apples, board_dim: GridDim) -> Option<Vec<Cell>> {
        let head = body.head()?;
        let targets: HashSet<_> = apples.iter().collect();
        if targets.is_empty() {
            return None;
        }

        let mut seen: HashSet<_> = body.cells().collect();
        let mut parents: HashMap<Cell, Cell> = HashMap::new();
        let mut queue = VecDeque::from([head.pos]);

        while let Some(pos) = queue.pop_front() {
            for dir in Dir::iter() {
                // the snake can't turn around on the spot
                if pos == head.pos && dir.is_reverse_of(head.heading) {
                    continue;
                }

                let new_pos = pos.wrapping_translate(dir, board_dim);
                if !seen.insert(new_pos) {
                    continue;
                }
                parents.insert(new_pos, pos);

                if targets.contains(&new_pos) {
                    // walk back to the head
                    let mut path = vec![new_pos];
                    let mut current = new_pos;
                    while let Some(&parent) = parents.get(&current) {
                        if parent == head.pos {
                            break;
                        }
                        path.push(parent);
                        current = parent;
                    }
                    path.reverse();
                    return Some(path);
                }

                queue.push_back(new_pos);
            }
        }

        None
    }

    // any step that doesn't immediately crash, preferring to go straight
    fn safe_dir(body: &Body, board_dim: GridDim) -> Option<Dir> {
        let head = body.head()?;
        Dir::iter_from(head.heading)
            .filter(|dir| !dir.is_reverse_of(head.heading))
            .find(|&dir| !body.contains(head.pos.wrapping_translate(dir, board_dim)))
    }
}

impl Controller for BreadthFirst {
    fn next_dir(&mut self, body: &Body, apples: &Apples, board_dim: GridDim) -> Option<Dir> {
        let head = body.head()?.pos;
        match Self::get_path(body, apples, board_dim) {
            Some(path) => {
                self.path = path;
                self.path
                    .first()
                    .and_then(|&first| head.wrapping_dir_to_1(first, board_dim))
            }
            None => {
                self.path.clear();
                Self::safe_dir(body, board_dim)
            }
        }
    }

    fn reset(&mut self, _dir: Dir) {
        self.path.clear();
    }
}

#[cfg(test)]
fn straight_body(head: Cell, dir: Dir, len: usize, board_dim: GridDim) -> Body {
    crate::snake::Builder::default()
        .pos(head)
        .dir(dir)
        .len(len)
        .build(board_dim)
        .unwrap()
}

#[test]
fn test_path_to_closest_apple() {
    let board_dim = Cell::new(10, 10);
    let body = straight_body(Cell::new(5, 5), Dir::Right, 3, board_dim);
    let mut apples = Apples::new(4);
    apples.set(0, Some(Cell::new(5, 1)));
    apples.set(1, Some(Cell::new(7, 5)));

    let path = BreadthFirst::get_path(&body, &apples, board_dim).unwrap();
    assert_eq!(path, vec![Cell::new(6, 5), Cell::new(7, 5)]);

    let mut controller = BreadthFirst::default();
    assert_eq!(controller.next_dir(&body, &apples, board_dim), Some(Dir::Right));
    assert_eq!(controller.path.len(), 2);
}

#[test]
fn test_path_wraps_and_avoids_turning_around() {
    let board_dim = Cell::new(10, 10);
    // apple right behind the head, the snake has to go around
    let body = straight_body(Cell::new(1, 5), Dir::Right, 1, board_dim);
    let mut apples = Apples::new(1);
    apples.set(0, Some(Cell::new(0, 5)));

    let path = BreadthFirst::get_path(&body, &apples, board_dim).unwrap();
    assert_eq!(path.len(), 3);
    assert_eq!(path.last(), Some(&Cell::new(0, 5)));
    assert_ne!(path[0], Cell::new(0, 5));

    // through the edge is shorter
    let body = straight_body(Cell::new(9, 2), Dir::Right, 2, board_dim);
    apples.set(0, Some(Cell::new(1, 2)));
    let path = BreadthFirst::get_path(&body, &apples, board_dim).unwrap();
    assert_eq!(path, vec![Cell::new(0, 2), Cell::new(1, 2)]);
}

#[test]
fn test_falls_back_to_safe_dir() {
    let board_dim = Cell::new(10, 10);
    let body = straight_body(Cell::new(4, 4), Dir::Up, 3, board_dim);
    let mut controller = BreadthFirst::default();

    // no apples, keep going straight
    assert_eq!(controller.next_dir(&body, &Apples::new(2), board_dim), Some(Dir::Up));
    assert!(controller.path.is_empty());
}
