//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one step per scheduled frame)
//! - Stable iteration order (platform/collectible collection order)
//! - No rendering or platform dependencies

pub mod level;
pub mod rect;
pub mod state;
pub mod step;

pub use level::LevelLayout;
pub use rect::Rect;
pub use state::{Collectible, GamePhase, GameState, Player};
pub use step::{PlayArea, step};
