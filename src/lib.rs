//! Chicken Blaster - simulation core for a small arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, game state)
//! - `config`: Validated gameplay constants
//! - `input`: Latched input buffer consumed once per tick
//! - `render`: Renderer capability and snapshot drawing
//! - `score`: Score display notifications
//! - `driver`: Fixed-timestep frame driver for hosts
//! - `gallery`: First-person shooting gallery variant

pub mod config;
pub mod driver;
pub mod gallery;
pub mod input;
pub mod render;
pub mod score;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use driver::FrameDriver;
pub use input::{InputLatch, InputSource};
pub use render::{Color, Renderer};
pub use score::{ScoreDisplay, ScoreWatcher};

/// Frame timing constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz, one tick per redraw)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Convert a millisecond duration to whole microseconds for the sim clock
    ///
    /// Negative and NaN durations count as zero.
    #[inline]
    pub fn micros(ms: f64) -> u64 {
        (ms.max(0.0) * 1000.0).round() as u64
    }
}
