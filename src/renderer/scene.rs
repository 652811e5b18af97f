//! Scene description: game state in, draw commands out
//!
//! The painter never touches simulation state. Its skyline flicker comes from
//! its own RNG, so cosmetic randomness cannot leak into gameplay.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::vertex::{Color, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Bit, GameState, Obstacle, Player, Rect};

/// Skyline bar pitch and width (pixels)
const SKYLINE_PITCH: usize = 60;
const SKYLINE_BAR_WIDTH: f32 = 40.0;
const SKYLINE_MIN_HEIGHT: f32 = 40.0;
const SKYLINE_HEIGHT_JITTER: f32 = 40.0;

/// Scanline spacing (pixels)
const SCANLINE_START: f32 = 40.0;
const SCANLINE_PITCH: f32 = 30.0;

const OBSTACLE_LABEL_SIZE: f32 = 18.0;
const PLAYER_LABEL: &str = "ZERO";
const PLAYER_LABEL_SIZE: f32 = 10.0;
/// Gap between the player box and its glitch border
const PLAYER_BORDER_GAP: f32 = 2.0;

/// A single drawing primitive in canvas pixel space
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Paint the whole canvas
    Clear(Color),
    FillRect { rect: Rect, color: Color },
    /// Outline centered on the rectangle edges
    StrokeRect { rect: Rect, color: Color, width: f32 },
    Line { from: Vec2, to: Vec2, color: Color, width: f32 },
    /// Text centered on `center`; `size` is the glyph height
    Text {
        text: &'static str,
        center: Vec2,
        size: f32,
        color: Color,
    },
}

/// Turns a [`GameState`] into a draw list each frame
#[derive(Debug, Clone)]
pub struct Painter {
    rng: Pcg32,
    scanlines: bool,
    jitter: bool,
    /// Bar heights used when jitter is off
    frozen_skyline: Vec<f32>,
}

impl Painter {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let frozen_skyline = (0..CANVAS_WIDTH as usize)
            .step_by(SKYLINE_PITCH)
            .map(|_| skyline_height(&mut rng))
            .collect();

        Self {
            rng,
            scanlines: settings.quality.scanlines_enabled(),
            jitter: settings.effective_skyline_jitter(),
            frozen_skyline,
        }
    }

    /// Build this frame's draw list: background, obstacles, then the player
    pub fn paint(&mut self, state: &GameState) -> Vec<DrawCmd> {
        let mut cmds = Vec::with_capacity(32 + state.obstacles.len() * 3);
        self.background(&mut cmds);
        for obstacle in &state.obstacles {
            obstacle_cmds(obstacle, &mut cmds);
        }
        player_cmds(&state.player, &mut cmds);
        cmds
    }

    fn background(&mut self, cmds: &mut Vec<DrawCmd>) {
        cmds.push(DrawCmd::Clear(colors::BACKGROUND));

        cmds.push(DrawCmd::Line {
            from: Vec2::new(0.0, GROUND_Y + 0.5),
            to: Vec2::new(CANVAS_WIDTH, GROUND_Y + 0.5),
            color: colors::NEON_YELLOW,
            width: 2.0,
        });

        for (i, x) in (0..CANVAS_WIDTH as usize).step_by(SKYLINE_PITCH).enumerate() {
            let h = if self.jitter {
                skyline_height(&mut self.rng)
            } else {
                self.frozen_skyline[i]
            };
            cmds.push(DrawCmd::FillRect {
                rect: Rect::new(x as f32, GROUND_Y - h, SKYLINE_BAR_WIDTH, h),
                color: colors::SKYLINE,
            });
        }

        if self.scanlines {
            let mut y = SCANLINE_START;
            while y < GROUND_Y {
                cmds.push(DrawCmd::Line {
                    from: Vec2::new(0.0, y),
                    to: Vec2::new(CANVAS_WIDTH, y),
                    color: colors::SCANLINE,
                    width: 1.0,
                });
                y += SCANLINE_PITCH;
            }
        }
    }
}

fn skyline_height(rng: &mut Pcg32) -> f32 {
    SKYLINE_MIN_HEIGHT + rng.random::<f32>() * SKYLINE_HEIGHT_JITTER
}

fn obstacle_cmds(obstacle: &Obstacle, cmds: &mut Vec<DrawCmd>) {
    // Zeros are dark with a yellow edge, ones are inverted
    let (fill, stroke, ink, label) = match obstacle.bit {
        Bit::Zero => (colors::ZERO_FILL, colors::NEON_YELLOW, colors::NEON_YELLOW, "0"),
        Bit::One => (colors::NEON_YELLOW, colors::NEON_CYAN, colors::INK, "1"),
    };
    let rect = obstacle.rect;

    cmds.push(DrawCmd::FillRect { rect, color: fill });
    cmds.push(DrawCmd::StrokeRect {
        rect,
        color: stroke,
        width: 1.0,
    });
    cmds.push(DrawCmd::Text {
        text: label,
        center: rect.pos + rect.size * 0.5,
        size: OBSTACLE_LABEL_SIZE,
        color: ink,
    });
}

fn player_cmds(player: &Player, cmds: &mut Vec<DrawCmd>) {
    let rect = player.rect;

    cmds.push(DrawCmd::FillRect {
        rect,
        color: colors::NEON_YELLOW,
    });
    cmds.push(DrawCmd::Text {
        text: PLAYER_LABEL,
        center: rect.pos + rect.size * 0.5,
        size: PLAYER_LABEL_SIZE,
        color: colors::INK,
    });

    let gap = Vec2::splat(PLAYER_BORDER_GAP);
    cmds.push(DrawCmd::StrokeRect {
        rect: Rect {
            pos: rect.pos - gap,
            size: rect.size + gap * 2.0,
        },
        color: colors::NEON_CYAN,
        width: 2.0,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;

    fn count<F: Fn(&DrawCmd) -> bool>(cmds: &[DrawCmd], f: F) -> usize {
        cmds.iter().filter(|c| f(*c)).count()
    }

    #[test]
    fn test_idle_scene_layout() {
        let state = GameState::new(1);
        let mut painter = Painter::new(1, &Settings::default());
        let cmds = painter.paint(&state);

        assert_eq!(cmds[0], DrawCmd::Clear(colors::BACKGROUND));
        // 800 / 60 rounded up
        let bars = count(&cmds, |c| {
            matches!(c, DrawCmd::FillRect { color, .. } if *color == colors::SKYLINE)
        });
        assert_eq!(bars, 14);
        // Ground line plus scanlines at 40, 70, ..., 220
        assert_eq!(count(&cmds, |c| matches!(c, DrawCmd::Line { .. })), 1 + 7);
        // Player drawn last
        assert!(matches!(
            cmds.last(),
            Some(DrawCmd::StrokeRect { color, .. }) if *color == colors::NEON_CYAN
        ));
    }

    #[test]
    fn test_obstacle_labels() {
        let mut state = GameState::new(1);
        state.spawn_obstacle_with(Bit::Zero);
        state.spawn_obstacle_with(Bit::One);
        let mut painter = Painter::new(1, &Settings::default());
        let cmds = painter.paint(&state);

        let labels: Vec<&str> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(*text),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["0", "1", "ZERO"]);
    }

    #[test]
    fn test_painting_leaves_state_untouched() {
        let mut state = GameState::new(5);
        state.start();
        state.spawn_obstacle();
        state.drain_events();
        let before = format!("{:?}", state);

        let mut painter = Painter::new(5, &Settings::default());
        for _ in 0..10 {
            painter.paint(&state);
        }
        assert_eq!(format!("{:?}", state), before);
    }

    #[test]
    fn test_low_quality_drops_scanlines_and_freezes_skyline() {
        let settings = Settings {
            quality: QualityPreset::Low,
            ..Default::default()
        };
        let state = GameState::new(1);
        let mut painter = Painter::new(1, &settings);
        let a = painter.paint(&state);
        let b = painter.paint(&state);

        assert_eq!(count(&a, |c| matches!(c, DrawCmd::Line { .. })), 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_skyline_flickers_by_default() {
        let state = GameState::new(1);
        let mut painter = Painter::new(1, &Settings::default());
        let a = painter.paint(&state);
        let b = painter.paint(&state);
        assert_ne!(a, b);
    }
}
