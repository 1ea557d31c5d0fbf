use std::ops::{Add, Neg};

use crate::basic::Cell;
use rand::Rng;
use Dir::*;

// defined in clockwise order starting at Up
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Dir {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl From<u8> for Dir {
    fn from(num: u8) -> Self {
        match num % 4 {
            0 => Up,
            1 => Right,
            2 => Down,
            _ => Left,
        }
    }
}

impl Neg for Dir {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self + 2
    }
}

/// Clockwise rotation in quarter turns
impl Add<u8> for Dir {
    type Output = Self;

    fn add(self, rhs: u8) -> Self::Output {
        Self::from(self as u8 + rhs % 4)
    }
}

impl Dir {
    // clockwise order starting from Up
    pub fn iter() -> impl Iterator<Item = Self> {
        [Up, Right, Down, Left].iter().copied()
    }

    pub fn iter_from(start: Self) -> impl Iterator<Item = Self> {
        Self::iter().map(move |dir| start + dir as u8)
    }

    /// Offset of a single step in this direction
    pub fn unit(self) -> Cell {
        match self {
            Up => Cell::new(0, -1),
            Right => Cell::new(1, 0),
            Down => Cell::new(0, 1),
            Left => Cell::new(-1, 0),
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::from(rng.gen_range(0..4))
    }

    pub fn is_reverse_of(self, other: Self) -> bool {
        self == -other
    }
}

#[test]
fn test_dir_math() {
    for (dir, reverse) in [(Up, Down), (Right, Left), (Down, Up), (Left, Right)] {
        assert_eq!(-dir, reverse);
        assert!(dir.is_reverse_of(reverse));
        assert!(!dir.is_reverse_of(dir));
        assert_eq!(dir.unit() + reverse.unit(), Cell::new(0, 0));
    }

    assert_eq!(Left + 1, Up);
    assert_eq!(Up + 7, Left);
    assert_eq!(Dir::iter_from(Down).collect::<Vec<_>>(), vec![Down, Left, Up, Right]);
}
