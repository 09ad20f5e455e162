//! Level layout data
//!
//! A layout is plain data: platform rectangles plus collectible rectangles.
//! The reference layout is baked in as the default; alternative layouts can
//! be supplied as JSON.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::{COLLECTIBLE_SIZE, PLATFORM_HEIGHT};

/// Static level geometry and item placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelLayout {
    pub platforms: Vec<Rect>,
    pub collectibles: Vec<Rect>,
}

impl Default for LevelLayout {
    /// The reference layout: five platforms in a staircase, three coins
    fn default() -> Self {
        let platform = |x, y| Rect::new(x, y, 200.0, PLATFORM_HEIGHT);
        let coin = |x, y| Rect::new(x, y, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE);
        Self {
            platforms: vec![
                platform(0.0, 400.0),
                platform(250.0, 350.0),
                platform(500.0, 300.0),
                platform(0.0, 200.0),
                platform(250.0, 150.0),
            ],
            collectibles: vec![coin(100.0, 350.0), coin(350.0, 300.0), coin(600.0, 250.0)],
        }
    }
}

impl LevelLayout {
    /// Parse a layout from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
