/// All game entity types — pure data, no logic.

use serde::{Deserialize, Serialize};

// ── Directions & avatars ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

/// Playable characters offered by the selection menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Avatar {
    Boy,
    CatGirl,
    HornGirl,
    PinkGirl,
    PrincessGirl,
}

impl Avatar {
    /// Menu order.
    pub const ALL: [Avatar; 5] = [
        Avatar::Boy,
        Avatar::CatGirl,
        Avatar::HornGirl,
        Avatar::PinkGirl,
        Avatar::PrincessGirl,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Avatar::Boy => "Boy",
            Avatar::CatGirl => "Cat Girl",
            Avatar::HornGirl => "Horn Girl",
            Avatar::PinkGirl => "Pink Girl",
            Avatar::PrincessGirl => "Princess Girl",
        }
    }

    pub fn asset_id(self) -> &'static str {
        match self {
            Avatar::Boy => "images/char-boy.png",
            Avatar::CatGirl => "images/char-cat-girl.png",
            Avatar::HornGirl => "images/char-horn-girl.png",
            Avatar::PinkGirl => "images/char-pink-girl.png",
            Avatar::PrincessGirl => "images/char-princess-girl.png",
        }
    }
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Every drawable the render pass can ask the asset provider for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    StoneBlock,
    WaterBlock,
    GrassBlock,
    EnemyBug,
    Character(Avatar),
}

impl Sprite {
    /// Everything that has to be loaded before the first tick.
    pub const ALL: [Sprite; 9] = [
        Sprite::StoneBlock,
        Sprite::WaterBlock,
        Sprite::GrassBlock,
        Sprite::EnemyBug,
        Sprite::Character(Avatar::Boy),
        Sprite::Character(Avatar::CatGirl),
        Sprite::Character(Avatar::HornGirl),
        Sprite::Character(Avatar::PinkGirl),
        Sprite::Character(Avatar::PrincessGirl),
    ];

    pub fn asset_id(self) -> &'static str {
        match self {
            Sprite::StoneBlock => "images/stone-block.png",
            Sprite::WaterBlock => "images/water-block.png",
            Sprite::GrassBlock => "images/grass-block.png",
            Sprite::EnemyBug => "images/enemy-bug.png",
            Sprite::Character(avatar) => avatar.asset_id(),
        }
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Where a reset puts the player back.
    pub start_x: f32,
    pub start_y: f32,
    pub lives: u32,
    /// Set once the player steps past the top row.
    pub is_winner: bool,
    pub avatar: Avatar,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    /// Lane the enemy was spawned in.
    pub start_x: f32,
    pub start_y: f32,
    /// Pixels per second, re-rolled on every update.
    pub speed: u32,
    pub sprite: Sprite,
}

// ── Tick results ──────────────────────────────────────────────────────────────

/// Something a tick decided that the player has to be told about.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// An enemy hit the player and lives remain.
    Hit { lives_left: u32 },
    /// The last life was lost.
    GameOver,
    /// The player reached the water.
    Won,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    /// Fixed set of enemies, one per lane, in spawn order.
    pub enemies: Vec<Enemy>,
    pub is_game_over: bool,
}
