/// Pure game-logic functions.
///
/// Every public function takes immutable references to the current state
/// (and, where needed, an RNG handle) and returns brand-new values.  Side
/// effects are limited to the injected RNG.

use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{Direction, Enemy, GameEvent, GameState, Player, Sprite};

// ── Movement rules ───────────────────────────────────────────────────────────

/// One column of the board.
pub const HORIZONTAL_STEP: f32 = 100.0;
pub const VERTICAL_STEP: f32 = 30.0;
/// Leftmost x the player may land on.
pub const LEFT_BOUND: f32 = 30.0;
/// Distance from the right edge the player may not cross.
pub const RIGHT_MARGIN: f32 = 130.0;
/// Stepping up to a y below this reaches the water instead.
pub const TOP_ROW_Y: f32 = 60.0;
/// Distance from the bottom edge the player may not cross.
pub const BOTTOM_MARGIN: f32 = 200.0;

/// Width an enemy needs on screen before it wraps back to the left edge.
pub const ENEMY_WRAP_WIDTH: f32 = 30.0;

/// Half-extents of the player/enemy overlap box.
pub const HIT_HALF_WIDTH: f32 = 50.0;
pub const HIT_HALF_HEIGHT: f32 = 40.0;

// ── Constructors ─────────────────────────────────────────────────────────────

fn roll_speed(config: &GameConfig, rng: &mut impl Rng) -> u32 {
    rng.gen_range(config.min_speed..=config.max_speed)
}

/// Build the initial game state from the configured lanes and start position.
pub fn init_state(config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let enemies = config
        .enemy_lanes
        .iter()
        .map(|lane| Enemy {
            x: lane.x,
            y: lane.y,
            start_x: lane.x,
            start_y: lane.y,
            speed: roll_speed(config, rng),
            sprite: Sprite::EnemyBug,
        })
        .collect();

    GameState {
        player: Player {
            x: config.player_start.x,
            y: config.player_start.y,
            start_x: config.player_start.x,
            start_y: config.player_start.y,
            lives: config.lives,
            is_winner: false,
            avatar: config.avatar,
        },
        enemies,
        is_game_over: false,
    }
}

// ── Resets ───────────────────────────────────────────────────────────────────

/// Put the player back on the start tile.  A full reset also restores
/// lives and clears the win flag.
pub fn reset_player(player: &Player, reset_all: bool, lives: u32) -> Player {
    let moved = Player {
        x: player.start_x,
        y: player.start_y,
        ..player.clone()
    };
    if reset_all {
        Player {
            lives,
            is_winner: false,
            ..moved
        }
    } else {
        moved
    }
}

/// Return every enemy to its lane's spawn point; speeds are kept.
pub fn reset_enemies(enemies: &[Enemy]) -> Vec<Enemy> {
    enemies
        .iter()
        .map(|e| Enemy {
            x: e.start_x,
            y: e.start_y,
            ..e.clone()
        })
        .collect()
}

/// Reset the whole game state, clearing the game-over flag.
pub fn reset_state(state: &GameState, reset_all: bool, config: &GameConfig) -> GameState {
    GameState {
        player: reset_player(&state.player, reset_all, config.lives),
        is_game_over: false,
        ..state.clone()
    }
}

// ── Entity updates ───────────────────────────────────────────────────────────

/// Advance an enemy by `dt` seconds, or wrap it to the left edge once it
/// has run past `canvas_width - ENEMY_WRAP_WIDTH`.  A fresh speed is rolled
/// either way.
pub fn update_enemy(
    enemy: &Enemy,
    dt: f32,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Enemy {
    let canvas_width = config.canvas_width;
    let x = if enemy.x <= canvas_width - ENEMY_WRAP_WIDTH {
        // A long stall can produce a huge dt; never step off the canvas.
        (enemy.x + dt.max(0.0) * enemy.speed as f32).min(canvas_width)
    } else {
        0.0
    };
    Enemy {
        x,
        speed: roll_speed(config, rng),
        ..enemy.clone()
    }
}

/// The player only moves in response to input, so a tick leaves it as is.
pub fn update_player(player: &Player) -> Player {
    player.clone()
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Apply one directional key press.  Moves that would leave the playable
/// area are ignored; stepping up from the top row wins the game instead.
pub fn handle_input(
    player: &Player,
    direction: Direction,
    canvas_width: f32,
    canvas_height: f32,
) -> Player {
    let within_columns = |x: f32| (LEFT_BOUND..=canvas_width - RIGHT_MARGIN).contains(&x);

    match direction {
        Direction::Left | Direction::Right => {
            let step = if direction == Direction::Left {
                -HORIZONTAL_STEP
            } else {
                HORIZONTAL_STEP
            };
            let new_x = player.x + step;
            if within_columns(new_x) {
                Player { x: new_x, ..player.clone() }
            } else {
                player.clone()
            }
        }
        Direction::Up => {
            let new_y = player.y - VERTICAL_STEP;
            if new_y >= TOP_ROW_Y {
                Player { y: new_y, ..player.clone() }
            } else {
                Player { is_winner: true, ..player.clone() }
            }
        }
        Direction::Down => {
            let new_y = player.y + VERTICAL_STEP;
            if new_y <= canvas_height - BOTTOM_MARGIN {
                Player { y: new_y, ..player.clone() }
            } else {
                player.clone()
            }
        }
    }
}

// ── Collision & win checks ───────────────────────────────────────────────────

/// Axis-aligned box test; edges count as overlapping.
pub fn overlaps(player: &Player, enemy: &Enemy) -> bool {
    (player.x - enemy.x).abs() <= HIT_HALF_WIDTH && (player.y - enemy.y).abs() <= HIT_HALF_HEIGHT
}

/// Check the player against every enemy in order.  Each overlapping enemy
/// costs a life, so two enemies on the same spot cost two.  A hit that
/// leaves lives sends the player back to the start; losing the last life
/// ends the game and stops the scan.
pub fn check_collisions(state: &GameState) -> (GameState, Vec<GameEvent>) {
    let mut player = state.player.clone();
    let mut is_game_over = state.is_game_over;
    let mut events = Vec::new();

    for (index, enemy) in state.enemies.iter().enumerate() {
        if is_game_over {
            break;
        }
        if !overlaps(&player, enemy) {
            continue;
        }

        player.lives = player.lives.saturating_sub(1);
        debug!(enemy = index, lives = player.lives, "player hit");

        if player.lives > 0 {
            events.push(GameEvent::Hit { lives_left: player.lives });
            player = Player {
                x: player.start_x,
                y: player.start_y,
                ..player
            };
        } else {
            is_game_over = true;
            events.push(GameEvent::GameOver);
        }
    }

    let next = GameState {
        player,
        is_game_over,
        ..state.clone()
    };
    (next, events)
}

pub fn check_win(state: &GameState) -> (GameState, Option<GameEvent>) {
    if state.player.is_winner && !state.is_game_over {
        debug!("player reached the water");
        let next = GameState {
            is_game_over: true,
            ..state.clone()
        };
        (next, Some(GameEvent::Won))
    } else {
        (state.clone(), None)
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by `dt` seconds.  All randomness comes through
/// `rng` so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(
    state: &GameState,
    dt: f32,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> (GameState, Vec<GameEvent>) {
    // ── 1. Move entities ─────────────────────────────────────────────────────
    let enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| update_enemy(e, dt, config, rng))
        .collect();
    let moved = GameState {
        player: update_player(&state.player),
        enemies,
        ..state.clone()
    };

    // ── 2. Win check ─────────────────────────────────────────────────────────
    let (checked, won) = check_win(&moved);
    if let Some(event) = won {
        return (checked, vec![event]);
    }

    // ── 3. Collisions ────────────────────────────────────────────────────────
    check_collisions(&checked)
}
