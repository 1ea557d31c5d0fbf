use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};
use tracing::warn;

/// Highest tick rate a `TickControl` runs at, faster rates are clamped
pub const MAX_TPS: f64 = 1_000_000.;
const MIN_TPS: f64 = 0.001;

/// Most ticks made up for in one go after the host stalled,
/// the rest are dropped
pub const MAX_CATCH_UP: usize = 1000;

// (time, total ticks so far), one sample per batch of ticks
struct TpsCounter {
    total: usize,
    samples: VecDeque<(Instant, usize)>,
}

impl TpsCounter {
    const LEN: usize = 10;

    fn new() -> Self {
        Self {
            total: 0,
            samples: VecDeque::with_capacity(Self::LEN),
        }
    }

    fn register_ticks(&mut self, now: Instant, count: usize) {
        self.total += count;
        if self.samples.len() >= Self::LEN {
            self.samples.pop_front();
        }
        self.samples.push_back((now, self.total));
    }

    fn reset(&mut self) {
        self.samples.clear();
    }

    fn tps(&self) -> f64 {
        match (self.samples.front(), self.samples.back()) {
            (Some(&(first, n_first)), Some(&(last, n_last))) if last > first => {
                (n_last - n_first) as f64 / (last - first).as_secs_f64()
            }
            _ => 0.,
        }
    }
}

fn clamp_tps(tps: f64) -> f64 {
    if tps.is_nan() {
        MIN_TPS
    } else {
        tps.clamp(MIN_TPS, MAX_TPS)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TickState {
    Running,
    Paused,
}

/// Decides when game ticks happen, at a fixed rate that doesn't
/// depend on how often the host draws
pub struct TickControl {
    tps: f64,
    tick_duration: Duration,
    last_update: Instant,

    // amount of time which ticks have not yet been
    // accounted for (will be included next time this is done)
    remainder: f64, // ticks

    // number of ticks that still need to be performed
    // to catch up with the current time
    missed_updates: Option<usize>,

    measured_tps: TpsCounter,

    state: TickState,

    // used to store the tick fraction while paused
    frozen_tick_fraction: Option<f32>,
}

// at least a microsecond since the rate is clamped
fn tick_duration(tps: f64) -> Duration {
    Duration::from_nanos((1_000_000_000.0 / tps) as u64)
}

impl TickControl {
    pub fn new(tps: f64) -> Self {
        Self::new_at(tps, Instant::now())
    }

    pub fn new_at(tps: f64, now: Instant) -> Self {
        let tps = clamp_tps(tps);
        Self {
            tps,
            tick_duration: tick_duration(tps),
            last_update: now,
            remainder: 0.,

            missed_updates: None,

            measured_tps: TpsCounter::new(),

            state: TickState::Running,
            frozen_tick_fraction: None,
        }
    }

    pub fn tps(&self) -> f64 {
        self.tps
    }

    // move last_update so that the tick fraction at `now` is `frac`,
    // used when resuming and when changing the rate
    fn set_last_update_to_match_tick_frac(&mut self, frac: f32, now: Instant) {
        let elapsed = ((frac - self.remainder as f32) * self.tick_duration.as_secs_f32()).max(0.);
        self.last_update = now
            .checked_sub(Duration::from_secs_f32(elapsed))
            .unwrap_or(now);
    }

    pub fn set_tps(&mut self, tps: f64) {
        let tps = clamp_tps(tps);
        if (self.tps - tps).abs() < f64::EPSILON {
            return;
        }

        let now = Instant::now();
        let frac = self.tick_fraction_at(now);

        self.tps = tps;
        self.tick_duration = tick_duration(tps);
        self.measured_tps.reset();

        // keep the tick fraction constant
        self.set_last_update_to_match_tick_frac(frac, now);
    }

    /// Called repeatedly as a while loop condition, true once
    /// for every tick that is due
    pub fn can_update(&mut self) -> bool {
        self.can_update_at(Instant::now())
    }

    pub fn can_update_at(&mut self, now: Instant) -> bool {
        if self.state != TickState::Running {
            return false;
        }

        match &mut self.missed_updates {
            Some(0) => {
                self.missed_updates = None;
                false
            }
            Some(n) => {
                *n -= 1;
                true
            }
            None => {
                // how many ticks should have happened since
                // the last call to can_update
                let ticks = now.saturating_duration_since(self.last_update).as_secs_f64()
                    / self.tick_duration.as_secs_f64()
                    + self.remainder;
                let mut missed_updates = ticks as usize;

                if missed_updates > 0 {
                    self.remainder = ticks % 1.;
                    if missed_updates > MAX_CATCH_UP {
                        warn!("{} ticks behind, skipping all but {}", missed_updates, MAX_CATCH_UP);
                        missed_updates = MAX_CATCH_UP;
                        self.remainder = 0.;
                    }
                    self.last_update = now;
                    self.missed_updates = Some(missed_updates - 1);
                    self.measured_tps.register_ticks(now, missed_updates);

                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn state(&self) -> TickState {
        self.state
    }

    pub fn play(&mut self) {
        self.play_at(Instant::now())
    }

    pub fn play_at(&mut self, now: Instant) {
        self.state = TickState::Running;
        self.measured_tps.reset();
        if let Some(frac) = self.frozen_tick_fraction.take() {
            self.set_last_update_to_match_tick_frac(frac, now);
        }
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now())
    }

    pub fn pause_at(&mut self, now: Instant) {
        self.frozen_tick_fraction = Some(self.tick_fraction_at(now));
        self.state = TickState::Paused;
        self.missed_updates = None;
    }

    /// Fraction of the current tick that has elapsed, for
    /// drawing in between ticks
    pub fn tick_fraction(&self) -> f32 {
        self.tick_fraction_at(Instant::now())
    }

    pub fn tick_fraction_at(&self, now: Instant) -> f32 {
        match self.frozen_tick_fraction {
            Some(frac) => frac,
            None => {
                let frac = now.saturating_duration_since(self.last_update).as_secs_f32()
                    / self.tick_duration.as_secs_f32()
                    + self.remainder as f32;
                frac.min(1.)
            }
        }
    }

    pub fn measured_tps(&self) -> f64 {
        self.measured_tps.tps()
    }
}

#[cfg(test)]
fn count_updates(control: &mut TickControl, now: Instant) -> usize {
    let mut n = 0;
    while control.can_update_at(now) {
        n += 1;
    }
    n
}

#[test]
fn test_catches_up_on_missed_ticks() {
    let start = Instant::now();
    let mut control = TickControl::new_at(10., start);

    assert_eq!(count_updates(&mut control, start), 0);
    assert_eq!(count_updates(&mut control, start + Duration::from_millis(50)), 0);
    assert_eq!(count_updates(&mut control, start + Duration::from_millis(250)), 2);
    // nothing new at the same instant
    assert_eq!(count_updates(&mut control, start + Duration::from_millis(250)), 0);
    // half a tick was left over
    assert_eq!(count_updates(&mut control, start + Duration::from_millis(350)), 1);
}

#[test]
fn test_no_ticks_while_paused() {
    let start = Instant::now();
    let mut control = TickControl::new_at(10., start);

    control.pause_at(start);
    assert_eq!(control.state(), TickState::Paused);
    assert_eq!(count_updates(&mut control, start + Duration::from_secs(5)), 0);

    let resume = start + Duration::from_secs(5);
    control.play_at(resume);
    assert_eq!(control.state(), TickState::Running);
    assert_eq!(count_updates(&mut control, resume), 0);
    assert_eq!(count_updates(&mut control, resume + Duration::from_millis(150)), 1);
}

#[test]
fn test_measured_tps() {
    let start = Instant::now();
    let mut control = TickControl::new_at(10., start);
    assert_eq!(control.measured_tps(), 0.);

    for i in 1..=20 {
        count_updates(&mut control, start + Duration::from_millis(100 * i));
    }
    let measured = control.measured_tps();
    assert!((measured - 10.).abs() < 0.5, "measured {}", measured);
}

#[test]
fn test_rate_is_clamped() {
    let start = Instant::now();
    let mut control = TickControl::new_at(2e9, start);
    assert_eq!(control.tps(), MAX_TPS);

    let n = count_updates(&mut control, start + Duration::from_millis(1));
    assert!((1..=MAX_CATCH_UP).contains(&n), "{} ticks", n);

    control.set_tps(0.);
    assert!(control.tps() > 0.);
    control.set_tps(f64::NAN);
    assert!(control.tps() > 0.);
}

#[test]
fn test_catch_up_is_bounded() {
    let start = Instant::now();
    let mut control = TickControl::new_at(10., start);

    let stalled = start + Duration::from_secs(3600);
    assert_eq!(count_updates(&mut control, stalled), MAX_CATCH_UP);
    // the backlog is gone, back to the normal rate
    assert_eq!(count_updates(&mut control, stalled + Duration::from_millis(150)), 1);
}
