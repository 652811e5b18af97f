//! Obstacle spawn scheduling and difficulty ramp

use crate::tuning::Tuning;

/// Spawn timer plus the two ramping difficulty values
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    /// Milliseconds accumulated since the last spawn
    pub timer: f32,
    /// Milliseconds between spawns; shrinks toward the floor
    pub interval: f32,
    /// Horizontal scroll speed (pixels/frame); grows without bound
    pub game_speed: f32,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            timer: 0.0,
            interval: tuning.spawn_interval_start,
            game_speed: tuning.game_speed_start,
        }
    }

    /// Accumulate elapsed time. Returns true when an obstacle is due, in which
    /// case the timer restarts and the difficulty ramps one step.
    pub fn advance(&mut self, delta_ms: f32, tuning: &Tuning) -> bool {
        self.timer += delta_ms;
        if self.timer <= self.interval {
            return false;
        }

        self.timer = 0.0;
        self.ramp(tuning);
        true
    }

    /// One difficulty step. The interval only shrinks while it is still above
    /// the floor and never overshoots it.
    fn ramp(&mut self, tuning: &Tuning) {
        if self.interval > tuning.spawn_interval_floor {
            self.interval =
                (self.interval - tuning.spawn_interval_step).max(tuning.spawn_interval_floor);
        }
        self.game_speed += tuning.game_speed_step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_spawn_until_interval_exceeded() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning);
        assert!(!spawner.advance(1200.0, &tuning));
        assert!(spawner.advance(1.0, &tuning));
        assert_eq!(spawner.timer, 0.0);
        assert_eq!(spawner.interval, 1180.0);
    }

    #[test]
    fn test_interval_reaches_floor_after_25_spawns() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning);
        for _ in 0..25 {
            assert!(spawner.advance(spawner.interval + 1.0, &tuning));
        }
        assert_eq!(spawner.interval, 700.0);

        // Further spawns keep it pinned
        for _ in 0..10 {
            spawner.advance(spawner.interval + 1.0, &tuning);
        }
        assert_eq!(spawner.interval, 700.0);
    }

    #[test]
    fn test_speed_ramps_without_ceiling() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning);
        for _ in 0..100 {
            spawner.advance(spawner.interval + 1.0, &tuning);
        }
        let expected = tuning.game_speed_start + 100.0 * tuning.game_speed_step;
        assert!((spawner.game_speed - expected).abs() < 1e-3);
    }

    #[test]
    fn test_uneven_step_stops_at_floor() {
        let tuning = Tuning {
            spawn_interval_step: 300.0,
            ..Tuning::default()
        };
        let mut spawner = Spawner::new(&tuning);
        assert!(spawner.advance(spawner.interval + 1.0, &tuning));
        assert_eq!(spawner.interval, 900.0);
        assert!(spawner.advance(spawner.interval + 1.0, &tuning));
        assert_eq!(spawner.interval, 700.0);
        assert!(spawner.advance(spawner.interval + 1.0, &tuning));
        assert_eq!(spawner.interval, 700.0);
    }

    proptest! {
        #[test]
        fn prop_interval_never_below_floor(
            step in 0.0f32..=500.0,
            deltas in prop::collection::vec(0.0f32..3000.0, 0..200),
        ) {
            let tuning = Tuning {
                spawn_interval_step: step,
                ..Tuning::default()
            };
            prop_assert!(tuning.validate().is_ok());
            let mut spawner = Spawner::new(&tuning);
            for delta in deltas {
                spawner.advance(delta, &tuning);
                prop_assert!(spawner.interval >= tuning.spawn_interval_floor);
            }
        }
    }
}
