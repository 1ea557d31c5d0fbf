use super::dir::Dir;
use std::{
    cmp::Ordering,
    fmt::{Debug, Error, Formatter},
};

// y grows downwards, (0, 0) is the top left corner of the board
#[derive(Eq, PartialEq, Copy, Clone, Add, Sub, Hash)]
pub struct Cell {
    pub x: isize,
    pub y: isize,
}

/// Board size, `x` is the width and `y` the height
pub type GridDim = Cell;

impl Cell {
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn translate(self, dir: Dir, dist: usize) -> Self {
        let dist = dist as isize;
        let Self { x: dx, y: dy } = dir.unit();
        Self {
            x: self.x + dx * dist,
            y: self.y + dy * dist,
        }
    }

    // only corrects a point that is at most one cell out of bounds,
    // which is all a single step can produce
    #[must_use]
    pub fn wrap_around(mut self, board_dim: GridDim) -> Self {
        if self.x < 0 {
            self.x = board_dim.x - 1;
        } else if self.x >= board_dim.x {
            self.x = 0;
        }

        if self.y < 0 {
            self.y = board_dim.y - 1;
        } else if self.y >= board_dim.y {
            self.y = 0;
        }

        self
    }

    // one step, wrapping around board edges
    #[must_use]
    pub fn wrapping_translate(self, dir: Dir, board_dim: GridDim) -> Self {
        self.translate(dir, 1).wrap_around(board_dim)
    }

    // None if the two cells are not neighbors (wrapping allowed)
    pub fn wrapping_dir_to_1(self, other: Self, board_dim: GridDim) -> Option<Dir> {
        Dir::iter().find(|dir| self.wrapping_translate(*dir, board_dim) == other)
    }

    pub fn contains(self, pos: Self) -> bool {
        (0..self.x).contains(&pos.x) && (0..self.y).contains(&pos.y)
    }

    /// Number of cells on a board of this size
    pub fn area(self) -> usize {
        (self.x.max(0) as usize).saturating_mul(self.y.max(0) as usize)
    }

    /// Row-major index of a cell on a board of this size
    pub fn index_of(self, pos: Self) -> usize {
        (pos.y * self.x + pos.x) as usize
    }

    pub fn from_index(self, idx: usize) -> Self {
        Self {
            x: idx as isize % self.x,
            y: idx as isize / self.x,
        }
    }
}

impl Debug for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// row-major, matches `index_of`
impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.y.cmp(&other.y) {
            Ordering::Equal => self.x.cmp(&other.x),
            ord => ord,
        }
    }
}

#[test]
fn test_wrap_around() {
    let dim = Cell::new(16, 12);
    [
        ((-1, 5), (15, 5)),
        ((16, 5), (0, 5)),
        ((5, -1), (5, 11)),
        ((5, 12), (5, 0)),
        ((-1, 12), (15, 0)),
        ((3, 4), (3, 4)),
    ]
    .iter()
    .for_each(|&((x1, y1), (x2, y2))| {
        assert_eq!(Cell::new(x1, y1).wrap_around(dim), Cell::new(x2, y2));
    });
}

#[test]
fn test_wrapping_translate() {
    use Dir::*;
    let dim = Cell::new(16, 16);
    for (start, dir, expect) in [
        ((15, 3), Right, (0, 3)),
        ((0, 3), Left, (15, 3)),
        ((7, 0), Up, (7, 15)),
        ((7, 15), Down, (7, 0)),
        ((8, 8), Right, (9, 8)),
    ] {
        let start = Cell::new(start.0, start.1);
        let expect = Cell::new(expect.0, expect.1);
        assert_eq!(start.wrapping_translate(dir, dim), expect, "{:?} {:?}", start, dir);
        assert_eq!(start.wrapping_dir_to_1(expect, dim), Some(dir));
    }
}

#[test]
fn test_index_round_trip() {
    let dim = Cell::new(5, 3);
    assert_eq!(dim.area(), 15);
    assert_eq!(dim.index_of(Cell::new(4, 2)), 14);
    assert_eq!(dim.from_index(7), Cell::new(2, 1));
    assert!(Cell::new(4, 0) < Cell::new(0, 1));

    assert_eq!(Cell::new(-2, 3).area(), 0);
    assert_eq!(Cell::new(isize::MAX, 4).area(), usize::MAX);
}
