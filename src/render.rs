/// Render pass — draws the tile background, then every entity.
///
/// Drawing goes through two collaborators: an [`AssetProvider`] that owns
/// loaded sprites, and a [`Surface`] that knows how to put them on screen.
/// No game logic is performed here.

use crate::config::GameConfig;
use crate::entities::{GameState, Sprite};
use crate::error::{GameError, GameResult};

// ── Board layout ──────────────────────────────────────────────────────────────

pub const NUM_ROWS: usize = 6;
pub const NUM_COLS: usize = 5;
pub const TILE_WIDTH: f32 = 101.0;
pub const TILE_HEIGHT: f32 = 83.0;

/// Background tile for each board row, top to bottom.
pub const ROW_TILES: [Sprite; NUM_ROWS] = [
    Sprite::WaterBlock,
    Sprite::StoneBlock,
    Sprite::StoneBlock,
    Sprite::StoneBlock,
    Sprite::GrassBlock,
    Sprite::GrassBlock,
];

// ── Collaborators ─────────────────────────────────────────────────────────────

/// Somewhere to draw, addressed in canvas pixels.
pub trait Surface {
    type Image;

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> std::io::Result<()>;

    fn draw_image(&mut self, image: &Self::Image, x: f32, y: f32) -> std::io::Result<()>;
}

/// Loads sprites once and hands out cached handles.
pub trait AssetProvider {
    type Handle;

    fn load(&mut self, sprites: &[Sprite]) -> GameResult<()>;

    /// True once every requested sprite is available.
    fn is_ready(&self) -> bool;

    fn get(&self, sprite: Sprite) -> Option<&Self::Handle>;
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<S, A>(
    surface: &mut S,
    assets: &A,
    state: &GameState,
    config: &GameConfig,
) -> GameResult<()>
where
    S: Surface,
    A: AssetProvider<Handle = S::Image>,
{
    surface.clear_rect(0.0, 0.0, config.canvas_width, config.canvas_height)?;

    for (row, tile) in ROW_TILES.iter().enumerate() {
        let image = lookup(assets, *tile)?;
        for col in 0..NUM_COLS {
            surface.draw_image(image, col as f32 * TILE_WIDTH, row as f32 * TILE_HEIGHT)?;
        }
    }

    render_entities(surface, assets, state)
}

fn render_entities<S, A>(surface: &mut S, assets: &A, state: &GameState) -> GameResult<()>
where
    S: Surface,
    A: AssetProvider<Handle = S::Image>,
{
    for enemy in &state.enemies {
        surface.draw_image(lookup(assets, enemy.sprite)?, enemy.x, enemy.y)?;
    }

    let player = &state.player;
    let avatar = lookup(assets, Sprite::Character(player.avatar))?;
    surface.draw_image(avatar, player.x, player.y)?;
    Ok(())
}

fn lookup<A: AssetProvider>(assets: &A, sprite: Sprite) -> GameResult<&A::Handle> {
    assets.get(sprite).ok_or(GameError::MissingAsset(sprite))
}
