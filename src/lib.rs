//! Zero Runner - a binary-state endless runner
//!
//! Core modules:
//! - `audio`: Sound cues for simulation events
//! - `sim`: Simulation (physics, spawner, collisions, run-state machine)
//! - `driver`: Frame clock and per-frame update/draw sequencing
//! - `renderer`: Draw-list generation and the WebGPU pipeline
//! - `platform`: Input mapping from physical triggers to game intents
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences from the page URL

pub mod audio;
pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::{Driver, FrameClock};
pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 300.0;

    /// Ground line, measured from the top of the canvas
    pub const GROUND_Y: f32 = CANVAS_HEIGHT - 60.0;

    /// Downward acceleration (pixels/frame²)
    pub const GRAVITY: f32 = 0.7;
    /// Initial vertical velocity of a jump (pixels/frame, negative is up)
    pub const JUMP_VELOCITY: f32 = -13.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 80.0;
    pub const PLAYER_SIZE: f32 = 40.0;

    /// Obstacle defaults
    pub const OBSTACLE_SIZE: f32 = 40.0;
    /// Obstacles appear just past the right edge
    pub const SPAWN_OFFSET_X: f32 = 10.0;

    /// Horizontal scroll speed (pixels/frame)
    pub const GAME_SPEED_START: f32 = 6.0;
    pub const GAME_SPEED_STEP: f32 = 0.05;

    /// Spawn interval ramp (milliseconds)
    pub const SPAWN_INTERVAL_START: f32 = 1200.0;
    pub const SPAWN_INTERVAL_STEP: f32 = 20.0;
    pub const SPAWN_INTERVAL_FLOOR: f32 = 700.0;

    /// Run ends once the ones counter exceeds this
    pub const ONES_LIMIT: u32 = 5;

    /// Reason shown on the banner when the ones counter overflows
    pub const ONES_OVERFLOW: &str = "ONES OVERFLOW";
}
