//! Ledge Runner - a tiny browser platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven physics values
//! - `settings`: Display preferences

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Downward acceleration per frame (px/frame²)
    pub const GRAVITY: f32 = 0.3;
    /// Upward velocity applied on jump (px/frame, negative is up)
    pub const JUMP_FORCE: f32 = -10.0;
    /// Horizontal speed while an arrow key is held (px/frame)
    pub const MOVE_SPEED: f32 = 4.0;
    /// Simulated time per frame step (milliseconds, ~60 FPS)
    pub const FRAME_DT_MS: f64 = 16.67;
    /// Points awarded per collectible
    pub const COLLECTIBLE_VALUE: u32 = 10;

    /// Player square side length
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Player spawn position (top-left corner)
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = 50.0;

    /// Collectible square side length
    pub const COLLECTIBLE_SIZE: f32 = 20.0;
    /// Platform height in the reference layout
    pub const PLATFORM_HEIGHT: f32 = 20.0;
}
