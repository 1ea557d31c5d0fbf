use rand::rngs::StdRng;
use rand::SeedableRng;
use static_assertions::assert_impl_all;
use tracing::{debug, info, warn};

use crate::apple::spawn::spawn_apple;
use crate::apple::Apples;
use crate::basic::{Dir, GridDim};
use crate::error::{Error, ErrorConversion, Result};
use crate::prefs::{Prefs, PrefsError};
use crate::snake::Body;

pub use stats::Stats;
pub use tick_control::{TickControl, TickState};

pub mod stats;
pub mod tick_control;

/// What happened during a tick
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TickOutcome {
    /// The snake moved one cell, keeping its length
    Moved,
    /// The snake ate the apple in `slot` and grew by one
    Ate { slot: usize },
    /// The snake ran into itself and was respawned
    Reset,
}

#[derive(Debug)]
pub struct Game {
    prefs: Prefs,

    body: Body,
    apples: Apples,
    /// Direction the snake will go in the next tick
    dir: Dir,

    rng: StdRng,
    stats: Stats,
}

assert_impl_all!(Game: Send);

impl Game {
    pub fn new(prefs: Prefs) -> Result<Self> {
        prefs.validate().with_trace_step("Game::new")?;

        let rng = match prefs.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let body = prefs.snake_builder().build(prefs.board_dim)?;
        let mut game = Self {
            dir: prefs.spawn_dir,
            apples: Apples::new(prefs.apple_capacity),
            body,
            rng,
            stats: Stats::default(),
            prefs,
        };

        game.spawn_apples();
        game.stats.record_len(game.body.len());

        Ok(game)
    }

    /// Start from a given body instead of the spawn configuration,
    /// the snake keeps going in the direction of its head
    pub fn with_body(prefs: Prefs, body: Body) -> Result<Self> {
        body.validate(prefs.board_dim)
            .map_err(Error::from)
            .with_trace_step("Game::with_body")?;
        let mut game = Self::new(prefs).with_trace_step("Game::with_body")?;

        game.dir = body.heading().unwrap_or(game.prefs.spawn_dir);
        game.body = body;
        game.stats = Stats::default();
        game.stats.record_len(game.body.len());

        // place the apples again, around the new body
        game.spawn_apples();
        if let Some(pos) = game.apples.iter().find(|&pos| game.body.contains(pos)) {
            return Err(PrefsError::AppleOnSnake { pos }.into());
        }

        Ok(game)
    }

    fn spawn_apples(&mut self) {
        self.prefs
            .apple_spawn_policy
            .populate(&mut self.apples, &self.body, self.prefs.board_dim, &mut self.rng);
    }

    /// Set the direction for the next tick, turning around on the
    /// spot is not allowed, returns whether the direction was accepted
    pub fn steer(&mut self, dir: Dir) -> bool {
        match self.body.heading() {
            Some(heading) if dir.is_reverse_of(heading) => {
                debug!("ignored 180° turn {:?} -> {:?}", heading, dir);
                false
            }
            _ => {
                self.dir = dir;
                true
            }
        }
    }

    /// Throw away the body and spawn a new one
    pub fn reset(&mut self) -> Result {
        self.body = self
            .prefs
            .snake_builder()
            .build(self.prefs.board_dim)
            .with_trace_step("Game::reset")?;
        self.dir = self.prefs.spawn_dir;
        self.stats.resets += 1;
        Ok(())
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> Result<TickOutcome> {
        let board_dim = self.prefs.board_dim;
        self.stats.ticks += 1;

        let head = match self.body.head() {
            Some(head) => head.pos,
            None => {
                warn!("ticked without a snake, respawning");
                self.reset()?;
                return Ok(TickOutcome::Reset);
            }
        };

        self.body
            .insert_head(head.translate(self.dir, 1), self.dir)
            .with_trace_step("Game::tick")?;
        self.body.wrap_head(board_dim);

        // checked before the tail moves, running into the
        // current tail counts as a crash
        if self.body.collides_with_self() {
            info!("snake crashed at length {}, resetting", self.body.len() - 1);
            self.reset()?;
            return Ok(TickOutcome::Reset);
        }

        let head = self.body.head().map(|seg| seg.pos);
        if let Some(slot) = head.and_then(|head| self.apples.find(head)) {
            // the tail stays where it is, the snake grows by one
            let new_apple = spawn_apple(&self.body, board_dim, &mut self.rng);
            match new_apple {
                Some(pos) => debug!("apple {} respawned at {:?}", slot, pos),
                None => warn!("no space left for apple {}", slot),
            }
            self.apples.set(slot, new_apple);

            self.stats.apples_eaten += 1;
            self.stats.record_len(self.body.len());
            return Ok(TickOutcome::Ate { slot });
        }

        self.body.remove_tail();
        Ok(TickOutcome::Moved)
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn apples(&self) -> &Apples {
        &self.apples
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn dir(&self) -> Dir {
        self.dir
    }

    pub fn board_dim(&self) -> GridDim {
        self.prefs.board_dim
    }

    pub fn prefs(&self) -> &Prefs {
        &self.prefs
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// The snake covers the whole board
    pub fn is_won(&self) -> bool {
        self.body.len() >= self.prefs.board_dim.area()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apple::spawn::SpawnPolicy;
    use crate::basic::Cell;
    use Dir::*;

    fn prefs_with_apples(apples: Vec<Cell>) -> Prefs {
        Prefs::default()
            .apple_spawn_policy(SpawnPolicy::Preset(apples))
            .seed(Some(42))
    }

    fn cells(game: &Game) -> Vec<Cell> {
        game.body().cells().collect()
    }

    fn spawn_cells() -> Vec<Cell> {
        vec![Cell::new(8, 8), Cell::new(7, 8), Cell::new(6, 8)]
    }

    #[test]
    fn test_moves_without_growing() {
        let mut game = Game::new(prefs_with_apples(vec![])).unwrap();
        assert_eq!(cells(&game), spawn_cells());
        assert_eq!(game.dir(), Right);

        for _ in 0..3 {
            assert!(game.steer(Right));
            assert_eq!(game.tick().unwrap(), TickOutcome::Moved);
        }

        assert_eq!(cells(&game), vec![Cell::new(11, 8), Cell::new(10, 8), Cell::new(9, 8)]);
        assert_eq!(game.len(), 3);
        assert_eq!(game.stats().ticks, 3);
    }

    #[test]
    fn test_eating_grows_and_relocates_apple() {
        let mut game = Game::new(prefs_with_apples(vec![Cell::new(9, 8)])).unwrap();

        assert_eq!(game.tick().unwrap(), TickOutcome::Ate { slot: 0 });
        assert_eq!(
            cells(&game),
            vec![Cell::new(9, 8), Cell::new(8, 8), Cell::new(7, 8), Cell::new(6, 8)],
        );

        let apple = game.apples().get(0).expect("apple wasn't respawned");
        assert!(!game.body().contains(apple));
        assert_eq!(game.apples().count(), 1);
        assert_eq!(game.stats().apples_eaten, 1);
        assert_eq!(game.stats().max_len, 4);
    }

    #[test]
    fn test_heading_is_recorded_per_segment() {
        let mut game = Game::new(prefs_with_apples(vec![])).unwrap();
        game.steer(Down);
        game.tick().unwrap();
        game.steer(Left);
        game.tick().unwrap();

        let headings: Vec<_> = game.body().iter().map(|seg| seg.heading).collect();
        assert_eq!(headings, vec![Left, Down, Right]);
        assert_eq!(cells(&game), vec![Cell::new(7, 9), Cell::new(8, 9), Cell::new(8, 8)]);
    }

    #[test]
    fn test_wraps_around_edges() {
        let prefs = prefs_with_apples(vec![]).board_dim(Cell::new(10, 10)).spawn_pos(Cell::new(9, 0));
        let mut game = Game::new(prefs).unwrap();

        game.tick().unwrap();
        assert_eq!(game.body().head().unwrap().pos, Cell::new(0, 0));

        game.steer(Up);
        game.tick().unwrap();
        assert_eq!(game.body().head().unwrap().pos, Cell::new(0, 9));
    }

    #[test]
    fn test_reverse_is_rejected() {
        let mut game = Game::new(prefs_with_apples(vec![])).unwrap();
        assert!(!game.steer(Left));
        assert_eq!(game.dir(), Right);

        // the check is against where the snake last went, not
        // against the last accepted direction
        assert!(game.steer(Up));
        assert!(!game.steer(Left));
        assert!(game.steer(Right));

        assert_eq!(game.tick().unwrap(), TickOutcome::Moved);
        assert_eq!(game.body().head().unwrap().pos, Cell::new(9, 8));
    }

    #[test]
    fn test_crash_resets_to_spawn() {
        // a square loop, the head is about to step onto the tail's
        // cell which hasn't been vacated yet
        let mut body = Body::new();
        for (x, y, heading) in [(5, 4, Up), (5, 5, Right), (4, 5, Right), (4, 4, Up)] {
            body.insert_tail(Cell::new(x, y), heading).unwrap();
        }
        let mut game = Game::with_body(prefs_with_apples(vec![]), body).unwrap();
        game.apples.set(0, Some(Cell::new(4, 4)));
        assert!(game.steer(Left));

        assert_eq!(game.tick().unwrap(), TickOutcome::Reset);
        assert_eq!(cells(&game), spawn_cells());
        assert_eq!(game.dir(), Right);
        assert_eq!(game.stats().resets, 1);
        // crashing takes priority, the apple under the head is untouched
        assert_eq!(game.apples().get(0), Some(Cell::new(4, 4)));
    }

    #[test]
    fn test_crash_after_wrapping() {
        let prefs = prefs_with_apples(vec![]).board_dim(Cell::new(4, 4));
        let mut body = Body::new();
        for (x, y, heading) in [(3, 1, Right), (3, 2, Down), (0, 2, Right), (0, 1, Up)] {
            body.insert_tail(Cell::new(x, y), heading).unwrap();
        }
        let prefs = prefs.spawn_pos(Cell::new(2, 2));
        let mut game = Game::with_body(prefs, body).unwrap();
        assert_eq!(game.dir(), Right);

        // <3, 1> + Right wraps to <0, 1>, the tail
        assert_eq!(game.tick().unwrap(), TickOutcome::Reset);
        assert_eq!(cells(&game), vec![Cell::new(2, 2), Cell::new(1, 2), Cell::new(0, 2)]);
    }

    #[test]
    fn test_with_body_rejects_unplayable_bodies() {
        use crate::error::ErrorType;
        use crate::snake::BodyError;

        let err = Game::with_body(prefs_with_apples(vec![]), Body::new()).unwrap_err();
        assert!(matches!(err.error_type(), ErrorType::BodyError(BodyError::Empty)));

        let mut off_board = Body::new();
        off_board.insert_tail(Cell::new(16, 3), Right).unwrap();
        let err = Game::with_body(prefs_with_apples(vec![]), off_board).unwrap_err();
        assert!(matches!(err.error_type(), ErrorType::BodyError(BodyError::OffBoard { .. })));

        // a fixed apple on a cell the given body covers
        let mut body = Body::new();
        body.insert_tail(Cell::new(2, 2), Right).unwrap();
        body.insert_tail(Cell::new(1, 2), Right).unwrap();
        let err = Game::with_body(prefs_with_apples(vec![Cell::new(1, 2)]), body).unwrap_err();
        assert!(matches!(
            err.error_type(),
            ErrorType::PrefsError(PrefsError::AppleOnSnake { pos }) if *pos == Cell::new(1, 2)
        ));
    }

    #[test]
    fn test_with_body_moves_random_apples_off_the_snake() {
        // the body covers every cell but the last row
        let board_dim = Cell::new(4, 4);
        let prefs = Prefs::default()
            .board_dim(board_dim)
            .spawn_pos(Cell::new(2, 2))
            .apple_spawn_policy(SpawnPolicy::Random { apple_count: 4 })
            .seed(Some(9));
        let mut body = Body::new();
        for idx in 0..12 {
            body.insert_tail(board_dim.from_index(idx), Left).unwrap();
        }

        let game = Game::with_body(prefs, body).unwrap();
        assert_eq!(game.len(), 12);
        assert_eq!(game.stats().max_len, 12);
        assert_eq!(game.apples().count(), 4);
        assert!(game.apples().iter().all(|apple| apple.y == 3));
    }

    #[test]
    fn test_length_invariant_over_many_ticks() {
        let prefs = Prefs::default()
            .apple_spawn_policy(SpawnPolicy::Random { apple_count: 8 })
            .seed(Some(7));
        let mut game = Game::new(prefs).unwrap();
        let spawn_len = game.prefs().spawn_len;
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..2000 {
            game.steer(Dir::random(&mut rng));
            let before = game.len();
            match game.tick().unwrap() {
                TickOutcome::Moved => assert_eq!(game.len(), before),
                TickOutcome::Ate { .. } => assert_eq!(game.len(), before + 1),
                TickOutcome::Reset => assert_eq!(game.len(), spawn_len),
            }

            assert!(!game.body().collides_with_self());
            assert!(game.body().cells().all(|cell| game.board_dim().contains(cell)));
            assert_eq!(game.apples().count(), 8);
        }
    }

    #[test]
    fn test_filling_the_board_empties_the_slot() {
        // 2x1 board, one segment, the only free cell holds the apple
        let prefs = prefs_with_apples(vec![Cell::new(1, 0)])
            .board_dim(Cell::new(2, 1))
            .spawn_pos(Cell::new(0, 0))
            .spawn_len(1);
        let mut game = Game::new(prefs).unwrap();

        assert_eq!(game.tick().unwrap(), TickOutcome::Ate { slot: 0 });
        assert!(game.is_won());
        assert_eq!(game.apples().get(0), None);
        assert_eq!(game.apples().count(), 0);
    }

    #[test]
    fn test_classic_start() {
        let game = Game::new(Prefs::classic().seed(Some(1))).unwrap();
        assert_eq!(cells(&game), vec![Cell::new(15, 15)]);
        assert_eq!(game.apples().iter().collect::<Vec<_>>(), vec![Cell::new(6, 4), Cell::new(12, 12)]);
        assert_eq!(Stats::length_label(game.len()), "Length: 1");
    }
}
