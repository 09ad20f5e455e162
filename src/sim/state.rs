//! Game state and session transitions
//!
//! The session owns every entity. The renderer gets read-only views; only
//! the physics step and the input surface mutate anything.

use glam::Vec2;

use super::level::LevelLayout;
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Created but never started
    Idle,
    /// Frame loop active, physics stepping
    Running,
    /// Player fell off the bottom of the play area
    GameOver,
    /// Every collectible picked up
    Success,
}

/// The player-controlled square
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    /// Velocity in px/frame (y grows downward)
    pub vel: Vec2,
    /// Airborne flag; cleared only by landing on top of a platform
    pub jumping: bool,
}

impl Player {
    /// Fresh player at the spawn position
    pub fn spawn() -> Self {
        Self {
            rect: Rect::new(PLAYER_START_X, PLAYER_START_Y, PLAYER_SIZE, PLAYER_SIZE),
            vel: Vec2::ZERO,
            jumping: false,
        }
    }
}

/// A pickup item; `collected` flips false→true once and stays set until reset
#[derive(Debug, Clone)]
pub struct Collectible {
    pub rect: Rect,
    pub collected: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    /// Simulated time elapsed while running, in milliseconds
    pub elapsed_ms: f64,
    pub player: Player,
    /// Static level geometry; collection order is the collision tie-break order
    pub platforms: Vec<Rect>,
    pub collectibles: Vec<Collectible>,
    pub tuning: Tuning,
}

impl GameState {
    /// Build a session from a level layout. Starts in `Idle`.
    pub fn new(layout: &LevelLayout, tuning: Tuning) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            elapsed_ms: 0.0,
            player: Player::spawn(),
            platforms: layout.platforms.clone(),
            collectibles: layout
                .collectibles
                .iter()
                .map(|&rect| Collectible {
                    rect,
                    collected: false,
                })
                .collect(),
            tuning,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Restore the world to its initial state: player at spawn, score zero,
    /// collectibles uncollected, clock zero. The phase is left untouched.
    pub fn reset(&mut self) {
        self.player = Player::spawn();
        self.score = 0;
        self.elapsed_ms = 0.0;
        for collectible in &mut self.collectibles {
            collectible.collected = false;
        }
    }

    /// Begin (or restart) a run: reset the world and enter `Running`.
    /// Valid from any phase; while already running this is an in-place reset.
    pub fn start(&mut self) {
        self.reset();
        self.phase = GamePhase::Running;
    }

    /// How many collectibles have been picked up
    pub fn collected_count(&self) -> usize {
        self.collectibles.iter().filter(|c| c.collected).count()
    }

    // --- Input surface ---
    //
    // Mirrors the key handlers: mutations apply only while running, and a
    // jump is refused while already airborne.

    /// Left arrow held
    pub fn move_left(&mut self) {
        if self.is_running() {
            self.player.vel.x = -self.tuning.move_speed;
        }
    }

    /// Right arrow held
    pub fn move_right(&mut self) {
        if self.is_running() {
            self.player.vel.x = self.tuning.move_speed;
        }
    }

    /// Arrow key released
    pub fn stop_horizontal(&mut self) {
        if self.is_running() {
            self.player.vel.x = 0.0;
        }
    }

    /// Space pressed; only takes effect when grounded
    pub fn jump(&mut self) {
        if self.is_running() && !self.player.jumping {
            self.player.vel.y = self.tuning.jump_force;
            self.player.jumping = true;
        }
    }
}
