//! Game state and core simulation types
//!
//! All mutable game state lives in [`GameState`]. The renderer only reads it;
//! input goes through the control surface (`reset`, `start`, `jump`).

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::spawner::Spawner;
use crate::consts::*;
use crate::tuning::Tuning;

/// Lifecycle phase of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Waiting for the first input (initial, and after every reset)
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; terminal until reset
    GameOver { reason: EndReason },
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Ones counter exceeded its limit
    OnesOverflow,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::OnesOverflow => f.write_str(ONES_OVERFLOW),
        }
    }
}

/// Binary obstacle label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bit {
    #[default]
    Zero,
    One,
}

impl Bit {
    pub fn as_u8(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Message banner contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// "Press to start" prompt
    Idle,
    /// Banner hidden while running
    Hidden,
    /// "<reason> // press to reboot" prompt
    GameOver(EndReason),
}

impl Banner {
    /// Text to show, or `None` when the banner is hidden
    pub fn text(&self) -> Option<String> {
        match self {
            Banner::Idle => Some("PRESS SPACE OR TAP TO START".to_string()),
            Banner::Hidden => None,
            Banner::GameOver(reason) => {
                Some(format!("{} // TAP OR PRESS SPACE TO REBOOT", reason))
            }
        }
    }
}

/// Signals for the UI boundary, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Banner(Banner),
    Started,
    Reset,
    Jumped,
    Spawned(Bit),
    Collided(Bit),
    GameOver { reason: EndReason, score: u64 },
}

/// Snapshot for the three status fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub current_state: Bit,
    pub ones_count: u32,
    pub score: u64,
}

/// The runner
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity (pixels/frame, negative is up)
    pub vy: f32,
    pub on_ground: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            rect: Rect::new(
                tuning.player_x,
                Self::ground_top(tuning.player_size),
                tuning.player_size,
                tuning.player_size,
            ),
            vy: 0.0,
            on_ground: true,
        }
    }

    /// y of the player's top edge when standing on the ground line
    #[inline]
    pub fn ground_top(height: f32) -> f32 {
        GROUND_Y - height
    }

    /// Back to the default pose: on the ground, at rest
    pub fn reset(&mut self) {
        self.rect.pos.y = Self::ground_top(self.rect.size.y);
        self.vy = 0.0;
        self.on_ground = true;
    }
}

/// A scrolling binary block
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    pub bit: Bit,
    /// Touched by the player this frame; removed after the collision pass
    pub consumed: bool,
}

impl Obstacle {
    /// Fully past the left edge
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.rect.right() <= 0.0
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub run_state: RunState,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub spawner: Spawner,
    /// Bit of the last obstacle touched
    pub current_state: Bit,
    /// Ones touched this run
    pub ones_count: u32,
    /// Frames survived this run
    pub score: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game state in the Idle phase
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            player: Player::new(&tuning),
            spawner: Spawner::new(&tuning),
            tuning,
            run_state: RunState::Idle,
            obstacles: Vec::new(),
            current_state: Bit::Zero,
            ones_count: 0,
            score: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        };
        state.reset();
        state
    }

    /// Back to Idle with a fresh run. Valid from any phase.
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.spawner = Spawner::new(&self.tuning);
        self.run_state = RunState::Idle;
        self.player.reset();
        self.current_state = Bit::Zero;
        self.ones_count = 0;
        self.score = 0;

        self.events.push(GameEvent::Reset);
        self.events.push(GameEvent::Banner(Banner::Idle));
        log::debug!("Game reset");
    }

    /// Begin a run. No-op while running; from GameOver, resets first.
    pub fn start(&mut self) {
        match self.run_state {
            RunState::Running => return,
            RunState::GameOver { .. } => self.reset(),
            RunState::Idle => {}
        }

        self.run_state = RunState::Running;
        self.events.push(GameEvent::Started);
        self.events.push(GameEvent::Banner(Banner::Hidden));
        log::info!("Run started");
    }

    /// End the current run. Only a running game can end.
    pub fn end_game(&mut self, reason: EndReason) {
        if self.run_state != RunState::Running {
            return;
        }

        self.run_state = RunState::GameOver { reason };
        self.events.push(GameEvent::GameOver {
            reason,
            score: self.score,
        });
        self.events.push(GameEvent::Banner(Banner::GameOver(reason)));
        log::info!(
            "Game over: {} (score {}, ones {})",
            reason,
            self.score,
            self.ones_count
        );
    }

    /// The single player action. Starts (or restarts) the game when not
    /// running; otherwise jumps if grounded. Never both in one call.
    pub fn jump(&mut self) {
        if !self.is_running() {
            self.start();
            return;
        }

        if self.player.on_ground {
            self.player.on_ground = false;
            self.player.vy = self.tuning.jump_velocity;
            self.events.push(GameEvent::Jumped);
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Current banner for the run phase
    pub fn banner(&self) -> Banner {
        match self.run_state {
            RunState::Idle => Banner::Idle,
            RunState::Running => Banner::Hidden,
            RunState::GameOver { reason } => Banner::GameOver(reason),
        }
    }

    pub fn status(&self) -> Status {
        Status {
            current_state: self.current_state,
            ones_count: self.ones_count,
            score: self.score,
        }
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Push a new obstacle just past the right edge, type drawn 50/50
    pub fn spawn_obstacle(&mut self) -> Bit {
        let bit = if self.rng.random_bool(0.5) {
            Bit::One
        } else {
            Bit::Zero
        };
        self.spawn_obstacle_with(bit);
        bit
    }

    /// Push an obstacle of a known type just past the right edge
    pub fn spawn_obstacle_with(&mut self, bit: Bit) {
        let size = self.tuning.obstacle_size;
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            rect: Rect::new(CANVAS_WIDTH + SPAWN_OFFSET_X, GROUND_Y - size, size, size),
            bit,
            consumed: false,
        });
        self.events.push(GameEvent::Spawned(bit));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_fresh(state: &GameState) {
        assert!(state.obstacles.is_empty());
        assert_eq!(state.spawner.game_speed, GAME_SPEED_START);
        assert_eq!(state.spawner.interval, SPAWN_INTERVAL_START);
        assert_eq!(state.spawner.timer, 0.0);
        assert_eq!(state.current_state, Bit::Zero);
        assert_eq!(state.ones_count, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.run_state, RunState::Idle);
        assert!(state.player.on_ground);
        assert_eq!(state.player.vy, 0.0);
        assert_eq!(state.player.rect.bottom(), GROUND_Y);
    }

    #[test]
    fn test_new_state_is_idle() {
        let mut state = GameState::new(1);
        assert_fresh(&state);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Banner(Banner::Idle)));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_first_jump_only_starts() {
        let mut state = GameState::new(1);
        let before = state.player.clone();
        state.jump();
        assert_eq!(state.run_state, RunState::Running);
        assert_eq!(state.player, before);
    }

    #[test]
    fn test_jump_when_grounded() {
        let mut state = GameState::new(1);
        state.start();
        state.jump();
        assert!(!state.player.on_ground);
        assert_eq!(state.player.vy, JUMP_VELOCITY);
    }

    #[test]
    fn test_no_double_jump() {
        let mut state = GameState::new(1);
        state.start();
        state.jump();
        state.player.vy = -3.0;
        state.jump();
        assert_eq!(state.player.vy, -3.0);
        assert!(!state.player.on_ground);
    }

    #[test]
    fn test_start_is_noop_while_running() {
        let mut state = GameState::new(1);
        state.start();
        state.score = 42;
        state.drain_events();
        state.start();
        assert_eq!(state.score, 42);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_end_game_only_from_running() {
        let mut state = GameState::new(1);
        state.end_game(EndReason::OnesOverflow);
        assert_eq!(state.run_state, RunState::Idle);

        state.start();
        state.end_game(EndReason::OnesOverflow);
        assert_eq!(
            state.run_state,
            RunState::GameOver {
                reason: EndReason::OnesOverflow
            }
        );
        assert_eq!(
            state.banner().text().as_deref(),
            Some("ONES OVERFLOW // TAP OR PRESS SPACE TO REBOOT")
        );
    }

    #[test]
    fn test_jump_from_game_over_restarts() {
        let mut state = GameState::new(1);
        state.start();
        state.ones_count = 6;
        state.score = 99;
        state.spawn_obstacle_with(Bit::One);
        state.end_game(EndReason::OnesOverflow);

        state.jump();
        assert_eq!(state.run_state, RunState::Running);
        assert_eq!(state.ones_count, 0);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_reset_from_any_phase() {
        let mut state = GameState::new(7);
        state.start();
        state.spawn_obstacle();
        state.spawner.game_speed = 9.0;
        state.spawner.interval = 800.0;
        state.current_state = Bit::One;
        state.ones_count = 3;
        state.score = 500;
        state.player.rect.pos.y = 10.0;
        state.player.vy = -5.0;
        state.player.on_ground = false;

        state.reset();
        assert_fresh(&state);
    }

    #[test]
    fn test_banner_text() {
        assert_eq!(
            Banner::Idle.text().as_deref(),
            Some("PRESS SPACE OR TAP TO START")
        );
        assert_eq!(Banner::Hidden.text(), None);
    }

    #[test]
    fn test_spawn_is_seeded() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        for _ in 0..32 {
            assert_eq!(a.spawn_obstacle(), b.spawn_obstacle());
        }
        assert_eq!(a.obstacles.len(), 32);
        assert!(a.obstacles.iter().any(|o| o.bit == Bit::One));
        assert!(a.obstacles.iter().any(|o| o.bit == Bit::Zero));
    }

    #[test]
    fn test_spawn_position() {
        let mut state = GameState::new(1);
        state.spawn_obstacle_with(Bit::Zero);
        let o = &state.obstacles[0];
        assert_eq!(o.rect.pos.x, CANVAS_WIDTH + SPAWN_OFFSET_X);
        assert_eq!(o.rect.bottom(), GROUND_Y);
        assert!(!o.consumed);
    }
}
