/// Game configuration.
///
/// Every field has a default matching the classic 505×606 board, so a
/// config file only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::Avatar;
use crate::error::{GameError, GameResult};

/// Most lives a game may start with.
pub const MAX_LIVES: u32 = 9;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Inclusive range enemy speeds are rolled from, in pixels per second.
    pub min_speed: u32,
    pub max_speed: u32,
    /// One enemy per entry, spawned at that position.
    pub enemy_lanes: Vec<Position>,
    pub player_start: Position,
    pub lives: u32,
    pub avatar: Avatar,
    /// How long the "you have been hit" notice stays up.
    pub hit_notice_secs: f32,
    /// Put enemies back in their lanes when a new game starts.
    pub reset_enemies_on_restart: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            canvas_width: 505.0,
            canvas_height: 606.0,
            min_speed: 180,
            max_speed: 220,
            enemy_lanes: vec![
                Position { x: 0.0, y: 62.0 },
                Position { x: 202.0, y: 145.0 },
                Position { x: 101.0, y: 230.0 },
            ],
            player_start: Position { x: 202.0, y: 400.0 },
            lives: 3,
            avatar: Avatar::Boy,
            hit_notice_secs: 1.5,
            reset_enemies_on_restart: false,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> GameResult<Self> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GameResult<()> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "canvas must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.min_speed > self.max_speed {
            return Err(GameError::InvalidConfig(format!(
                "min_speed {} exceeds max_speed {}",
                self.min_speed, self.max_speed
            )));
        }
        if self.enemy_lanes.is_empty() {
            return Err(GameError::InvalidConfig("at least one enemy lane is required".into()));
        }
        if self.lives == 0 || self.lives > MAX_LIVES {
            return Err(GameError::InvalidConfig(format!(
                "lives must be between 1 and {MAX_LIVES}, got {}",
                self.lives
            )));
        }
        let Position { x, y } = self.player_start;
        if x < 0.0 || y < 0.0 || x > self.canvas_width || y > self.canvas_height {
            return Err(GameError::InvalidConfig(format!(
                "player start ({x}, {y}) is outside the canvas"
            )));
        }
        if self.hit_notice_secs < 0.0 {
            return Err(GameError::InvalidConfig("hit_notice_secs must not be negative".into()));
        }
        Ok(())
    }
}
