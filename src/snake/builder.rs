use super::*;
use std::fmt::{Display, Formatter};
use tracing::debug;

#[derive(Debug, Error)]
#[must_use]
pub struct BuilderError(pub Box<Builder>, pub &'static str);

impl Display for BuilderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "snake builder error: {}", self.1)?;
        writeln!(f, "builder: {:?}", self.0)
    }
}

/// Describes the body a snake starts with: `len` segments in a
/// straight line, the head at `pos`, all going in direction `dir`
#[derive(Default, Clone, Debug)]
pub struct Builder {
    pub pos: Option<Cell>,
    pub dir: Option<Dir>,
    pub len: Option<usize>,
}

impl Builder {
    #[inline(always)]
    #[must_use]
    pub fn pos(mut self, value: Cell) -> Self {
        self.pos = Some(value);
        self
    }

    #[inline(always)]
    #[must_use]
    pub fn dir(mut self, value: Dir) -> Self {
        self.dir = Some(value);
        self
    }

    #[inline(always)]
    #[must_use]
    pub fn len(mut self, value: usize) -> Self {
        self.len = Some(value);
        self
    }

    fn error(&self, message: &'static str) -> BuilderError {
        BuilderError(Box::new(self.clone()), message)
    }

    /// Check that a body can be built on a board of the given size
    pub fn validate(&self, board_dim: GridDim) -> std::result::Result<(), BuilderError> {
        let pos = self.pos.ok_or_else(|| self.error("missing field `pos`"))?;
        let dir = self.dir.ok_or_else(|| self.error("missing field `dir`"))?;
        let len = self.len.ok_or_else(|| self.error("missing field `len`"))?;

        if len == 0 {
            return Err(self.error("a snake needs at least one segment"));
        }
        if !board_dim.contains(pos) {
            return Err(self.error("spawn position is off the board"));
        }

        // the body is laid out in a straight line, it must not
        // wrap around onto itself
        let extent = match dir {
            Dir::Left | Dir::Right => board_dim.x,
            Dir::Up | Dir::Down => board_dim.y,
        };
        if len > extent as usize {
            return Err(self.error("snake is longer than the board"));
        }

        Ok(())
    }

    pub fn build(&self, board_dim: GridDim) -> Result<Body> {
        self.validate(board_dim)?;
        // validated above
        let (pos, dir, len) = match (self.pos, self.dir, self.len) {
            (Some(pos), Some(dir), Some(len)) => (pos, dir, len),
            _ => return Err(self.error("incomplete builder").into()),
        };

        debug!("spawn snake of length {} at {:?} going {:?}", len, pos, dir);

        let mut body = Body::new();
        let mut cell = pos;
        for _ in 0..len {
            body.insert_tail(cell, dir)?;
            cell = cell.wrapping_translate(-dir, board_dim);
        }

        Ok(body)
    }
}

#[test]
fn test_build_trails_behind_head() {
    let body = Builder::default()
        .pos(Cell::new(8, 8))
        .dir(Dir::Right)
        .len(3)
        .build(Cell::new(16, 16))
        .unwrap();

    assert_eq!(
        body.cells().collect::<Vec<_>>(),
        vec![Cell::new(8, 8), Cell::new(7, 8), Cell::new(6, 8)],
    );
    assert!(body.iter().all(|seg| seg.heading == Dir::Right));
}

#[test]
fn test_build_wraps_over_edge() {
    let body = Builder::default()
        .pos(Cell::new(3, 0))
        .dir(Dir::Down)
        .len(3)
        .build(Cell::new(4, 4))
        .unwrap();

    assert_eq!(
        body.cells().collect::<Vec<_>>(),
        vec![Cell::new(3, 0), Cell::new(3, 3), Cell::new(3, 2)],
    );
}

#[test]
fn test_build_rejects_bad_layouts() {
    let board_dim = Cell::new(4, 4);
    let base = Builder::default().pos(Cell::new(1, 1)).dir(Dir::Left);

    assert!(base.clone().build(board_dim).is_err(), "missing len");
    assert!(base.clone().len(0).build(board_dim).is_err());
    assert!(base.clone().len(5).build(board_dim).is_err());
    assert!(base.clone().len(2).pos(Cell::new(4, 0)).build(board_dim).is_err());
    assert!(base.len(4).build(board_dim).is_ok());
}
