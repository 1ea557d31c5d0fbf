use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use grid_snake::apple::spawn::SpawnPolicy;
use grid_snake::basic::Cell;
use grid_snake::error::{ErrorConversion, Result};
use grid_snake::game::{Game, Stats, TickControl, TickOutcome};
use grid_snake::prefs::Prefs;
use grid_snake::snake_control::{Controller, Template};
use tracing::{debug, info};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ControllerKind {
    /// Head for the closest apple
    Bfs,
    /// Go around in squares
    Square,
}

/// Run a snake game without a window, logging what happens
#[derive(Parser, Debug)]
#[command(name = "grid_snake", version)]
struct Args {
    #[arg(long, default_value_t = 16)]
    width: isize,
    #[arg(long, default_value_t = 16)]
    height: isize,
    /// Number of apples on the board
    #[arg(long, default_value_t = 3)]
    apples: usize,
    /// Stop after this many ticks
    #[arg(long, default_value_t = 1000)]
    ticks: usize,
    /// Ticks per second when running in real time
    #[arg(long, default_value_t = 6.)]
    tps: f64,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = ControllerKind::Bfs)]
    controller: ControllerKind,
    /// Pace the ticks with a clock instead of running them back to back
    #[arg(long)]
    realtime: bool,
    /// The original layout: one segment, two fixed apples
    #[arg(long)]
    classic: bool,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn prefs_from_args(args: &Args) -> Prefs {
    let prefs = if args.classic {
        Prefs::classic()
    } else {
        let board_dim = Cell::new(args.width, args.height);
        Prefs::default()
            .board_dim(board_dim)
            .spawn_pos(Cell::new(args.width / 2, args.height / 2))
            .apple_spawn_policy(SpawnPolicy::Random { apple_count: args.apples })
    };
    prefs.tps(args.tps).seed(args.seed)
}

// one game tick, returns false once the game is over
fn step(game: &mut Game, controller: &mut dyn Controller) -> Result<bool> {
    if let Some(dir) = controller.next_dir(game.body(), game.apples(), game.board_dim()) {
        game.steer(dir);
    }

    match game.tick()? {
        TickOutcome::Moved => {}
        TickOutcome::Ate { slot } => debug!("ate apple {}, length {}", slot, game.len()),
        TickOutcome::Reset => controller.reset(game.dir()),
    }

    if game.is_won() {
        info!("the snake fills the board after {} ticks", game.stats().ticks);
        return Ok(false);
    }
    Ok(true)
}

fn main() -> Result {
    init_tracing();
    let args = Args::parse();

    let prefs = prefs_from_args(&args);
    let mut game = Game::new(prefs).with_trace_step("main")?;

    let template = match args.controller {
        ControllerKind::Bfs => Template::BreadthFirst,
        ControllerKind::Square => {
            let side_len = (game.board_dim().x.min(game.board_dim().y) / 2) as usize;
            Template::demo_square_pattern(game.dir(), side_len)
        }
    };
    let mut controller = template.into_controller(game.dir());

    info!(
        "starting a {}x{} game with {:?} control",
        game.board_dim().x,
        game.board_dim().y,
        args.controller,
    );

    if args.realtime {
        let mut tick_control = TickControl::new(game.prefs().tps);
        'game: while game.stats().ticks < args.ticks {
            while tick_control.can_update() {
                if !step(&mut game, controller.as_mut())? || game.stats().ticks >= args.ticks {
                    break 'game;
                }
                info!("{}", Stats::length_label(game.len()));
            }
            thread::sleep(Duration::from_millis(1));
        }
        debug!("measured tick rate: {:.2}", tick_control.measured_tps());
    } else {
        while game.stats().ticks < args.ticks {
            if !step(&mut game, controller.as_mut())? {
                break;
            }
        }
    }

    println!("{}", game.stats().get_stats_message(game.len()));
    Ok(())
}
