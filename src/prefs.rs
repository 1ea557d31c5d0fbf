use crate::apple::spawn::SpawnPolicy;
use crate::apple::APPLE_MAX;
use crate::basic::{Cell, Dir, GridDim};
use crate::game::tick_control::MAX_TPS;
use crate::snake;

/// Largest board, in cells
pub const MAX_BOARD_AREA: usize = 1 << 24;

#[derive(Debug, Display, Error)]
pub enum PrefsError {
    #[display(fmt = "board dimensions must be positive, got {:?}", dim)]
    ZeroDimension { dim: GridDim },
    #[display(fmt = "board {:?} has more than {} cells", dim, MAX_BOARD_AREA)]
    BoardTooLarge { dim: GridDim },
    #[display(fmt = "{} apples don't fit in {} slots", count, capacity)]
    TooManyApples { count: usize, capacity: usize },
    #[display(fmt = "preset apple {:?} is off the board", pos)]
    AppleOffBoard { pos: Cell },
    #[display(fmt = "preset apple {:?} is under the snake", pos)]
    AppleOnSnake { pos: Cell },
    #[display(fmt = "tick rate must be positive and at most {}, got {}", MAX_TPS, tps)]
    InvalidTickRate { tps: f64 },
}

#[derive(Clone, Debug)]
pub struct Prefs {
    pub board_dim: GridDim,

    pub apple_capacity: usize,
    pub apple_spawn_policy: SpawnPolicy,

    pub spawn_pos: Cell,
    pub spawn_len: usize,
    pub spawn_dir: Dir,

    /// Game ticks per second, independent of the drawing rate
    pub tps: f64,
    /// Fixed rng seed, taken from the os when missing
    pub seed: Option<u64>,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            board_dim: Cell::new(16, 16),

            apple_capacity: APPLE_MAX,
            apple_spawn_policy: SpawnPolicy::Random { apple_count: 3 },

            spawn_pos: Cell::new(8, 8),
            spawn_len: 3,
            spawn_dir: Dir::Right,

            tps: 6.,
            seed: None,
        }
    }
}

// builder
impl Prefs {
    /// A single segment in the bottom right corner and two fixed apples
    pub fn classic() -> Self {
        Self::default()
            .spawn_pos(Cell::new(15, 15))
            .spawn_len(1)
            .apple_spawn_policy(SpawnPolicy::Preset(vec![Cell::new(6, 4), Cell::new(12, 12)]))
    }

    pub fn board_dim(mut self, board_dim: GridDim) -> Self {
        self.board_dim = board_dim;
        self
    }

    pub fn apple_capacity(mut self, apple_capacity: usize) -> Self {
        self.apple_capacity = apple_capacity;
        self
    }

    pub fn apple_spawn_policy(mut self, apple_spawn_policy: SpawnPolicy) -> Self {
        self.apple_spawn_policy = apple_spawn_policy;
        self
    }

    pub fn spawn_pos(mut self, spawn_pos: Cell) -> Self {
        self.spawn_pos = spawn_pos;
        self
    }

    pub fn spawn_len(mut self, spawn_len: usize) -> Self {
        self.spawn_len = spawn_len;
        self
    }

    pub fn spawn_dir(mut self, spawn_dir: Dir) -> Self {
        self.spawn_dir = spawn_dir;
        self
    }

    pub fn tps(mut self, tps: f64) -> Self {
        self.tps = tps;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

impl Prefs {
    pub fn snake_builder(&self) -> snake::Builder {
        snake::Builder::default()
            .pos(self.spawn_pos)
            .dir(self.spawn_dir)
            .len(self.spawn_len)
    }

    pub fn validate(&self) -> crate::error::Result {
        if self.board_dim.x <= 0 || self.board_dim.y <= 0 {
            return Err(PrefsError::ZeroDimension { dim: self.board_dim }.into());
        }
        match self.board_dim.x.checked_mul(self.board_dim.y) {
            Some(area) if area as usize <= MAX_BOARD_AREA => {}
            _ => return Err(PrefsError::BoardTooLarge { dim: self.board_dim }.into()),
        }

        let count = self.apple_spawn_policy.apple_count();
        if count > self.apple_capacity {
            return Err(PrefsError::TooManyApples { count, capacity: self.apple_capacity }.into());
        }

        if !(self.tps > 0. && self.tps <= MAX_TPS) {
            return Err(PrefsError::InvalidTickRate { tps: self.tps }.into());
        }

        let body = self.snake_builder().build(self.board_dim)?;

        if let SpawnPolicy::Preset(cells) = &self.apple_spawn_policy {
            if let Some(&pos) = cells.iter().find(|&&pos| !self.board_dim.contains(pos)) {
                return Err(PrefsError::AppleOffBoard { pos }.into());
            }
            if let Some(&pos) = cells.iter().find(|&&pos| body.contains(pos)) {
                return Err(PrefsError::AppleOnSnake { pos }.into());
            }
        }

        Ok(())
    }
}

#[test]
fn test_presets_are_valid() {
    assert!(Prefs::default().validate().is_ok());
    assert!(Prefs::classic().validate().is_ok());
}

#[test]
fn test_validate_rejects() {
    use crate::error::ErrorType;

    let invalid = [
        Prefs::default().board_dim(Cell::new(0, 16)),
        Prefs::default().apple_capacity(2),
        Prefs::default().apple_spawn_policy(SpawnPolicy::Preset(vec![Cell::new(16, 0)])),
        Prefs::default().tps(0.),
        Prefs::default().tps(f64::NAN),
        Prefs::default().tps(2e9),
        Prefs::default().board_dim(Cell::new(1 << 40, 1 << 40)),
        Prefs::default().board_dim(Cell::new(isize::MAX, 2)),
        // <7, 8> is the second segment of the spawn body
        Prefs::default().apple_spawn_policy(SpawnPolicy::Preset(vec![Cell::new(1, 1), Cell::new(7, 8)])),
    ];
    for prefs in invalid {
        let err = prefs.validate().unwrap_err();
        assert!(matches!(err.error_type(), ErrorType::PrefsError(_)), "{:?}", err);
    }

    let err = Prefs::default().spawn_len(17).validate().unwrap_err();
    assert!(matches!(err.error_type(), ErrorType::SnakeBuilderError(_)));
}

#[test]
fn test_apple_under_snake_is_reported() {
    use crate::error::ErrorType;

    let prefs = Prefs::classic().apple_spawn_policy(SpawnPolicy::Preset(vec![Cell::new(15, 15)]));
    let err = prefs.validate().unwrap_err();
    match err.error_type() {
        ErrorType::PrefsError(PrefsError::AppleOnSnake { pos }) => assert_eq!(*pos, Cell::new(15, 15)),
        other => panic!("unexpected error {:?}", other),
    }

    let largest = Prefs::default().board_dim(Cell::new(1 << 12, 1 << 12));
    assert!(largest.validate().is_ok());
}
