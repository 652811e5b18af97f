//! Per-frame simulation step
//!
//! Advances the world by one frame. Physics and scrolling are per-frame;
//! the elapsed time only feeds the spawn timer.

use super::state::{Bit, EndReason, GameEvent, GameState, Player};

/// Advance the game state by one frame. `delta_ms` is the wall-clock time
/// since the previous frame. No-op unless the run is active.
pub fn update(state: &mut GameState, delta_ms: f32) {
    if !state.is_running() {
        return;
    }

    step_player(state);

    if state.spawner.advance(delta_ms.max(0.0), &state.tuning) {
        let bit = state.spawn_obstacle();
        log::trace!(
            "Spawned {} (interval {}ms, speed {:.2})",
            bit,
            state.spawner.interval,
            state.spawner.game_speed
        );
    }

    advance_obstacles(state);

    if resolve_collisions(state) {
        // Run ended mid-pass: no score for this frame
        return;
    }

    state.score += 1;
}

/// Gravity, integration and the ground clamp
fn step_player(state: &mut GameState) {
    let player = &mut state.player;
    player.vy += state.tuning.gravity;
    player.rect.pos.y += player.vy;

    let ground_top = Player::ground_top(player.rect.size.y);
    if player.rect.pos.y >= ground_top {
        player.rect.pos.y = ground_top;
        player.vy = 0.0;
        player.on_ground = true;
    }
}

/// Scroll left and drop everything fully past the left edge
fn advance_obstacles(state: &mut GameState) {
    let speed = state.spawner.game_speed;
    for obstacle in &mut state.obstacles {
        obstacle.rect.pos.x -= speed;
    }
    state.obstacles.retain(|o| !o.is_off_screen());
}

/// Test every obstacle against the player. Touched obstacles are marked and
/// compacted out after the pass. Returns true if the run ended.
fn resolve_collisions(state: &mut GameState) -> bool {
    let player = state.player.rect;
    let mut ended = false;

    for i in 0..state.obstacles.len() {
        if !state.obstacles[i].rect.overlaps(&player) {
            continue;
        }

        let bit = state.obstacles[i].bit;
        state.current_state = bit;
        state.emit(GameEvent::Collided(bit));

        if bit == Bit::One {
            state.ones_count += 1;
            if state.ones_count > state.tuning.ones_limit {
                // The overflowing block stays on screen for the final frame
                state.end_game(EndReason::OnesOverflow);
                ended = true;
                break;
            }
        }

        state.obstacles[i].consumed = true;
    }

    state.obstacles.retain(|o| !o.consumed);
    ended
}
