use std::collections::{vec_deque, VecDeque};

use itertools::Itertools;

use crate::basic::{Cell, Dir, GridDim};
use crate::error::Result;

pub use builder::{Builder, BuilderError};

pub mod builder;

/// A body that can't be placed on a board
#[derive(Debug, Display, Error)]
pub enum BodyError {
    #[display(fmt = "the snake has no segments")]
    Empty,
    #[display(fmt = "segment {:?} is off the board", pos)]
    OffBoard { pos: Cell },
    #[display(fmt = "more than one segment on {:?}", pos)]
    Overlapping { pos: Cell },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Segment {
    pub pos: Cell,
    /// Direction the snake was going when this segment was placed,
    /// only used to orient the segment when drawing it
    pub heading: Dir,
}

/// The cells occupied by a snake, head first
///
/// Segments are only ever added or removed at either end
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Body {
    segments: VecDeque<Segment>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_head(&mut self, pos: Cell, heading: Dir) -> Result {
        self.segments.try_reserve(1)?;
        self.segments.push_front(Segment { pos, heading });
        Ok(())
    }

    pub fn insert_tail(&mut self, pos: Cell, heading: Dir) -> Result {
        self.segments.try_reserve(1)?;
        self.segments.push_back(Segment { pos, heading });
        Ok(())
    }

    // no-op on an empty body
    pub fn remove_head(&mut self) -> Option<Segment> {
        self.segments.pop_front()
    }

    // no-op on an empty body
    pub fn remove_tail(&mut self) -> Option<Segment> {
        self.segments.pop_back()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments from head to tail
    pub fn iter(&self) -> vec_deque::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + Clone + '_ {
        self.segments.iter().map(|seg| seg.pos)
    }

    pub fn head(&self) -> Option<&Segment> {
        self.segments.front()
    }

    pub fn tail(&self) -> Option<&Segment> {
        self.segments.back()
    }

    /// Direction the snake last moved in
    pub fn heading(&self) -> Option<Dir> {
        self.head().map(|seg| seg.heading)
    }

    pub fn contains(&self, pos: Cell) -> bool {
        self.cells().any(|cell| cell == pos)
    }

    /// Bring the head back onto the board after it stepped over an edge
    pub fn wrap_head(&mut self, board_dim: GridDim) {
        if let Some(head) = self.segments.front_mut() {
            head.pos = head.pos.wrap_around(board_dim);
        }
    }

    /// Check that the body is a playable snake on a board of the given size
    pub fn validate(&self, board_dim: GridDim) -> std::result::Result<(), BodyError> {
        if self.is_empty() {
            return Err(BodyError::Empty);
        }
        if let Some(pos) = self.cells().find(|&pos| !board_dim.contains(pos)) {
            return Err(BodyError::OffBoard { pos });
        }
        if let Some(pos) = self.cells().duplicates().next() {
            return Err(BodyError::Overlapping { pos });
        }
        Ok(())
    }

    /// Whether the head shares its cell with any other segment
    pub fn collides_with_self(&self) -> bool {
        let mut cells = self.cells();
        match cells.next() {
            Some(head) => cells.any(|cell| cell == head),
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a Body {
    type Item = &'a Segment;
    type IntoIter = vec_deque::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
fn body_of(cells: &[(isize, isize)]) -> Body {
    let mut body = Body::new();
    for &(x, y) in cells {
        body.insert_tail(Cell::new(x, y), Dir::Right).unwrap();
    }
    body
}

#[test]
fn test_insert_and_remove() {
    let mut body = Body::new();
    assert!(body.is_empty());
    assert_eq!(body.remove_head(), None);
    assert_eq!(body.remove_tail(), None);

    body.insert_tail(Cell::new(1, 0), Dir::Right).unwrap();
    body.insert_head(Cell::new(2, 0), Dir::Right).unwrap();
    body.insert_head(Cell::new(2, 1), Dir::Down).unwrap();
    body.insert_tail(Cell::new(0, 0), Dir::Right).unwrap();

    assert_eq!(body.len(), 4);
    assert_eq!(body.heading(), Some(Dir::Down));
    assert_eq!(
        body.cells().collect::<Vec<_>>(),
        vec![Cell::new(2, 1), Cell::new(2, 0), Cell::new(1, 0), Cell::new(0, 0)],
    );

    assert_eq!(body.remove_tail().map(|seg| seg.pos), Some(Cell::new(0, 0)));
    assert_eq!(body.remove_head().map(|seg| seg.pos), Some(Cell::new(2, 1)));
    assert_eq!(body.head().map(|seg| seg.pos), Some(Cell::new(2, 0)));
    assert_eq!(body.tail().map(|seg| seg.pos), Some(Cell::new(1, 0)));
    assert_eq!(body.len(), 2);
}

#[test]
fn test_traversal_is_repeatable() {
    let body = body_of(&[(8, 8), (7, 8), (6, 8), (6, 9)]);
    let first: Vec<_> = body.iter().copied().collect();
    let second: Vec<_> = (&body).into_iter().copied().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn test_collides_with_self() {
    assert!(!Body::new().collides_with_self());
    assert!(!body_of(&[(5, 5)]).collides_with_self());
    assert!(!body_of(&[(5, 5), (4, 5), (3, 5)]).collides_with_self());
    assert!(body_of(&[(5, 5), (4, 5), (3, 5), (5, 5)]).collides_with_self());
    // only the head counts
    assert!(!body_of(&[(1, 1), (4, 5), (3, 5), (4, 5)]).collides_with_self());
}

#[test]
fn test_wrap_head_only() {
    let mut body = body_of(&[(16, 3), (15, 3)]);
    body.wrap_head(Cell::new(16, 16));
    assert_eq!(body.cells().collect::<Vec<_>>(), vec![Cell::new(0, 3), Cell::new(15, 3)]);
    assert!(body.contains(Cell::new(0, 3)));
    assert!(!body.contains(Cell::new(16, 3)));
}

#[test]
fn test_validate() {
    let board_dim = Cell::new(6, 6);
    assert!(body_of(&[(5, 5), (4, 5)]).validate(board_dim).is_ok());

    assert!(matches!(Body::new().validate(board_dim), Err(BodyError::Empty)));
    assert!(matches!(
        body_of(&[(5, 5), (6, 5)]).validate(board_dim),
        Err(BodyError::OffBoard { pos }) if pos == Cell::new(6, 5)
    ));
    assert!(matches!(
        body_of(&[(1, 1), (2, 1), (1, 1)]).validate(board_dim),
        Err(BodyError::Overlapping { pos }) if pos == Cell::new(1, 1)
    ));
}
