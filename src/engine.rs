/// Game-loop driver.
///
/// The engine is a small state machine.  The host calls it once per frame
/// while `Running`, and feeds modal answers back through [`Engine::resolve`]
/// instead of registering callbacks:
///
/// ```text
/// AwaitingAssets ──assets_ready──▶ AwaitingPlayerSelection ──select_avatar──▶ Running
///        Running ──tick: Won──────▶ Paused(Won)  ──resolve(any)─────────────▶ AwaitingPlayerSelection
///        Running ──tick: GameOver─▶ GameOver     ──resolve(Confirm)─────────▶ AwaitingPlayerSelection
///                                                ──resolve(Cancel)──────────▶ Terminated
/// ```

use std::time::Instant;

use rand::Rng;
use tracing::{debug, info, trace};

use crate::compute::{handle_input, init_state, reset_enemies, reset_state, tick};
use crate::config::GameConfig;
use crate::entities::{Avatar, Direction, GameEvent, GameState};

/// A dialog the game is waiting on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modal {
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalChoice {
    Confirm,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingAssets,
    AwaitingPlayerSelection,
    Running,
    Paused(Modal),
    /// Out of lives, waiting for the restart answer.
    GameOver,
    Terminated,
}

/// Short-lived message shown over the board without stopping the loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub lives_left: u32,
    /// Seconds of game time before the notice disappears.
    pub remaining: f32,
}

pub struct Engine<R: Rng> {
    config: GameConfig,
    state: GameState,
    phase: Phase,
    notice: Option<Notice>,
    last_tick: Option<Instant>,
    rng: R,
}

impl<R: Rng> Engine<R> {
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let state = init_state(&config, &mut rng);
        Engine {
            config,
            state,
            phase: Phase::AwaitingAssets,
            notice: None,
            last_tick: None,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    fn enter(&mut self, phase: Phase) {
        if self.phase != phase {
            info!(from = ?self.phase, to = ?phase, "phase change");
            self.phase = phase;
        }
    }

    /// Every sprite is loaded; ask for a character next.
    pub fn assets_ready(&mut self) {
        if self.phase == Phase::AwaitingAssets {
            self.enter(Phase::AwaitingPlayerSelection);
        }
    }

    /// Start a game.  `None` keeps the current avatar, which is what a
    /// dismissed selection dialog produces.
    pub fn select_avatar(&mut self, avatar: Option<Avatar>, now: Instant) {
        if self.phase != Phase::AwaitingPlayerSelection {
            return;
        }
        if let Some(avatar) = avatar {
            self.state.player.avatar = avatar;
        }
        info!(avatar = self.state.player.avatar.label(), "starting game");

        self.state = reset_state(&self.state, true, &self.config);
        self.notice = None;
        self.last_tick = Some(now);
        self.enter(Phase::Running);
    }

    pub fn handle_input(&mut self, direction: Direction) {
        if self.phase != Phase::Running {
            return;
        }
        self.state.player = handle_input(
            &self.state.player,
            direction,
            self.config.canvas_width,
            self.config.canvas_height,
        );
    }

    /// Run one tick of the loop at wall-clock time `now`.  Does nothing
    /// unless the game is running.
    pub fn tick(&mut self, now: Instant) -> Vec<GameEvent> {
        if self.phase != Phase::Running {
            return Vec::new();
        }
        let dt = self
            .last_tick
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        trace!(dt, "tick");

        let (state, events) = tick(&self.state, dt, &self.config, &mut self.rng);
        self.state = state;

        if let Some(notice) = self.notice.as_mut() {
            notice.remaining -= dt;
            if notice.remaining <= 0.0 {
                self.notice = None;
            }
        }

        for event in &events {
            match event {
                GameEvent::Hit { lives_left } => {
                    debug!(lives_left, "collision");
                    self.notice = Some(Notice {
                        lives_left: *lives_left,
                        remaining: self.config.hit_notice_secs,
                    });
                }
                GameEvent::GameOver => {
                    self.notice = None;
                    self.enter(Phase::GameOver);
                }
                GameEvent::Won => {
                    self.notice = None;
                    self.enter(Phase::Paused(Modal::Won));
                }
            }
        }
        events
    }

    /// Feed back the answer to whichever dialog the engine is waiting on.
    pub fn resolve(&mut self, choice: ModalChoice) {
        match (self.phase, choice) {
            (Phase::GameOver, ModalChoice::Confirm) | (Phase::Paused(Modal::Won), _) => {
                self.restart();
            }
            (Phase::GameOver, ModalChoice::Cancel) => {
                info!("game over");
                self.enter(Phase::Terminated);
            }
            _ => {}
        }
    }

    pub fn quit(&mut self) {
        self.enter(Phase::Terminated);
    }

    fn restart(&mut self) {
        if self.config.reset_enemies_on_restart {
            self.state.enemies = reset_enemies(&self.state.enemies);
        }
        self.enter(Phase::AwaitingPlayerSelection);
    }
}
