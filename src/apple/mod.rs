use crate::basic::Cell;
use static_assertions::const_assert;

pub mod spawn;

/// Default number of apple slots
pub const APPLE_MAX: usize = 32;

const_assert!(APPLE_MAX > 0);

/// A fixed number of slots, each either holding an apple or empty
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Apples {
    slots: Vec<Option<Cell>>,
}

impl Default for Apples {
    fn default() -> Self {
        Self::new(APPLE_MAX)
    }
}

impl Apples {
    pub fn new(capacity: usize) -> Self {
        Self { slots: vec![None; capacity] }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Option<Cell>] {
        &self.slots
    }

    /// Positions of the apples that are present
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn get(&self, slot: usize) -> Option<Cell> {
        self.slots.get(slot).copied().flatten()
    }

    // out of range slots are ignored
    pub fn set(&mut self, slot: usize, apple: Option<Cell>) {
        if let Some(s) = self.slots.get_mut(slot) {
            *s = apple;
        }
    }

    /// The first slot holding an apple at `pos`
    pub fn find(&self, pos: Cell) -> Option<usize> {
        self.slots.iter().position(|apple| *apple == Some(pos))
    }

    pub fn first_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|apple| *apple = None);
    }
}

#[test]
fn test_slots() {
    let mut apples = Apples::new(4);
    assert_eq!(apples.count(), 0);
    assert_eq!(apples.first_empty_slot(), Some(0));

    apples.set(2, Some(Cell::new(6, 4)));
    apples.set(0, Some(Cell::new(12, 12)));
    apples.set(9, Some(Cell::new(1, 1)));

    assert_eq!(apples.count(), 2);
    assert_eq!(apples.iter().collect::<Vec<_>>(), vec![Cell::new(12, 12), Cell::new(6, 4)]);
    assert_eq!(apples.find(Cell::new(6, 4)), Some(2));
    assert_eq!(apples.find(Cell::new(1, 1)), None);
    assert_eq!(apples.get(2), Some(Cell::new(6, 4)));
    assert_eq!(apples.get(3), None);
    assert_eq!(apples.first_empty_slot(), Some(1));

    apples.clear();
    assert_eq!(apples.capacity(), 4);
    assert_eq!(apples.count(), 0);
}
