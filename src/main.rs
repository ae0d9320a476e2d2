//! Chicken Blaster headless runner
//!
//! Plays the game with the built-in autopilot and logs what happens. Useful
//! for soak-testing balance changes to a config file.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;

use chicken_blaster::consts::FRAME_MS;
use chicken_blaster::gallery::{
    GalleryConfig, GalleryEvent, GalleryState, draw_overhead, gallery_tick,
};
use chicken_blaster::input::InputSource;
use chicken_blaster::render::RecordingRenderer;
use chicken_blaster::score::LogScoreDisplay;
use chicken_blaster::sim::{GameEvent, GameState, TickInput, autopilot_input};
use chicken_blaster::{FrameDriver, GameConfig};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u32,
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// JSON config overrides for the side-scroller
    #[arg(long)]
    config: Option<PathBuf>,
    /// Play the first-person gallery instead of the side-scroller
    #[arg(long)]
    gallery: bool,
    /// Restart automatically after game over
    #[arg(long)]
    endless: bool,
}

/// Input source driven by the autopilot; reads the last state it was shown
#[derive(Default)]
struct AutopilotSource {
    next: TickInput,
}

impl InputSource for AutopilotSource {
    fn poll(&mut self) -> TickInput {
        std::mem::take(&mut self.next)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.gallery {
        run_gallery(&cli)
    } else {
        run_side_scroller(&cli)
    }
}

fn run_side_scroller(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let state = GameState::new(config, cli.seed)?;
    log::info!("Chicken Blaster starting with seed {}", cli.seed);

    let mut driver = FrameDriver::new(
        state,
        AutopilotSource::default(),
        RecordingRenderer::default(),
        LogScoreDisplay,
    );

    let mut defeated = 0u32;
    let mut elites = 0u32;
    let mut rounds = 1u32;
    for _ in 0..cli.frames {
        let mut next = autopilot_input(driver.state());
        next.restart = cli.endless && driver.state().is_game_over();
        driver.input_mut().next = next;

        for event in driver.step() {
            match event {
                GameEvent::Defeated { .. } => defeated += 1,
                GameEvent::EliteSpawned { .. } => elites += 1,
                GameEvent::Restarted => rounds += 1,
                _ => {}
            }
        }
        if driver.state().is_game_over() && !cli.endless {
            break;
        }
    }

    let state = driver.state();
    log::info!(
        "Finished after {:.0} ms of play: {} rounds, {} defeated, {} elites, final score {}",
        state.time_ms(),
        rounds,
        defeated,
        elites,
        state.score
    );
    println!("{}", serde_json::to_string_pretty(&state.pool)?);
    Ok(())
}

fn run_gallery(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let mut state = GalleryState::new(GalleryConfig::default(), cli.seed)?;
    let mut renderer = RecordingRenderer::default();
    log::info!("Shooting gallery starting with seed {}", cli.seed);

    let mut shots = 0u32;
    for _ in 0..cli.frames {
        let target = state
            .chickens
            .iter()
            .min_by(|a, b| {
                let da = a.pos.distance_squared(state.config.eye);
                let db = b.pos.distance_squared(state.config.eye);
                da.total_cmp(&db)
            })
            .map(|c| c.pos);

        let mut input = target.map(|t| state.aim_input(t)).unwrap_or_default();
        input.fire = target.is_some();

        for event in gallery_tick(&mut state, &input, FRAME_MS) {
            if event == GalleryEvent::ArrowFired {
                shots += 1;
            }
        }
        draw_overhead(&state, &mut renderer, Vec2::new(400.0, 300.0), 20.0);
    }

    log::info!(
        "Gallery finished: {} arrows, {} chickens left, score {}",
        shots,
        state.chickens.len(),
        state.score
    );
    Ok(())
}
