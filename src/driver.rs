//! Frame driver
//!
//! Called once per display refresh: measures elapsed time, steps the
//! simulation, then paints. Host-independent so it runs natively in tests.

use crate::renderer::{DrawCmd, Painter};
use crate::settings::Settings;
use crate::sim::{Banner, GameEvent, GameState, Status, update};

/// Elapsed time between consecutive frame callbacks
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous call. The first frame has no
    /// predecessor and reports zero; time never runs backwards.
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let delta = match self.last {
            Some(last) => (timestamp_ms - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last = Some(timestamp_ms);
        delta
    }
}

/// Everything the host needs to present one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub cmds: Vec<DrawCmd>,
    pub status: Status,
    /// Set when the banner changed since the previous frame
    pub banner: Option<Banner>,
    /// All events since the previous frame, input-triggered ones included
    pub events: Vec<GameEvent>,
}

/// Owns the simulation and the painter; the host owns the driver
pub struct Driver {
    pub state: GameState,
    painter: Painter,
    clock: FrameClock,
}

impl Driver {
    pub fn new(state: GameState, settings: &Settings) -> Self {
        // Painter gets its own stream so cosmetics never share the game RNG
        let painter = Painter::new(state.seed.rotate_left(32) ^ 0x5eed, settings);
        Self {
            state,
            painter,
            clock: FrameClock::new(),
        }
    }

    /// Run one display refresh
    pub fn frame(&mut self, timestamp_ms: f64) -> Frame {
        let delta = self.clock.advance(timestamp_ms);
        update(&mut self.state, delta);

        let events = self.state.drain_events();
        let banner = events.iter().rev().find_map(|e| match e {
            GameEvent::Banner(b) => Some(*b),
            _ => None,
        });

        Frame {
            cmds: self.painter.paint(&self.state),
            status: self.state.status(),
            banner,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Trigger, handle};
    use crate::sim::{Bit, EndReason, RunState};

    #[test]
    fn test_first_frame_delta_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(123_456.0), 0.0);
        assert_eq!(clock.advance(123_472.5), 16.5);
        // Clock hiccup
        assert_eq!(clock.advance(123_000.0), 0.0);
    }

    #[test]
    fn test_first_frame_reports_idle_banner() {
        let mut driver = Driver::new(GameState::new(1), &Settings::default());
        let frame = driver.frame(1000.0);
        assert_eq!(frame.banner, Some(Banner::Idle));
        assert_eq!(frame.status.score, 0);
        assert!(!frame.cmds.is_empty());

        // Nothing new on the next idle frame
        let frame = driver.frame(1016.0);
        assert_eq!(frame.banner, None);
    }

    #[test]
    fn test_start_hides_banner_and_scores() {
        let mut driver = Driver::new(GameState::new(1), &Settings::default());
        driver.frame(0.0);
        handle(&mut driver.state, Trigger::Touch);

        let frame = driver.frame(16.0);
        assert_eq!(frame.banner, Some(Banner::Hidden));
        assert!(frame.events.contains(&GameEvent::Started));
        assert_eq!(frame.status.score, 1);
    }

    #[test]
    fn test_large_first_timestamp_does_not_spawn() {
        let mut driver = Driver::new(GameState::new(1), &Settings::default());
        handle(&mut driver.state, Trigger::Touch);
        // Page has been open for a minute before the first callback
        driver.frame(60_000.0);
        assert!(driver.state.obstacles.is_empty());
        assert_eq!(driver.state.spawner.timer, 0.0);
    }

    #[test]
    fn test_full_run_to_overflow_and_reboot() {
        let mut driver = Driver::new(GameState::new(42), &Settings::default());
        handle(&mut driver.state, Trigger::Touch);

        // Never jump: every one on the track is eventually hit
        let mut t = 0.0;
        let mut ended = None;
        for _ in 0..60 * 300 {
            t += 1000.0 / 60.0;
            let frame = driver.frame(t);
            if frame.banner == Some(Banner::GameOver(EndReason::OnesOverflow)) {
                ended = Some(frame.status);
                break;
            }
        }

        let status = ended.expect("run should overflow");
        assert_eq!(status.ones_count, 6);
        assert_eq!(status.current_state, Bit::One);
        assert!(status.score > 0);

        // Input while game over restarts straight into a new run
        handle(&mut driver.state, Trigger::Key {
            code: "Space",
            key: " ",
        });
        assert_eq!(driver.state.run_state, RunState::Running);
        let frame = driver.frame(t + 16.0);
        assert_eq!(frame.status.score, 1);
        assert_eq!(frame.status.ones_count, 0);
    }
}
