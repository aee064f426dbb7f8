//! Fixed timestep simulation tick
//!
//! Core game loop that advances the run deterministically: steer, move
//! forward, animate coins, recycle waves, resolve contacts, update score.

use super::collision::{coin_aabb, obstacle_aabb, player_aabb};
use super::state::{GamePhase, GameState};
use super::wave;
use crate::consts::*;

/// Input commands for a single tick (deterministic). All flags are one-shot
/// edge events; the front-end clears them after each consumed tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Slide one lane left
    pub steer_left: bool,
    /// Slide one lane right
    pub steer_right: bool,
    /// Jump (only honored when grounded)
    pub jump: bool,
    /// Restart from the game-over state
    pub restart: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
            }
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused => return,
        GamePhase::GameOver => {
            // Forward motion has halted; only a restart is honored
            if input.restart {
                state.restart();
                log::info!("run restarted (seed {})", state.seed);
            }
            return;
        }
        GamePhase::Running => {}
    }

    // Lane changes, clamped to the lane set
    if input.steer_left && state.player.lane > 0 {
        let lane = state.player.lane - 1;
        state.player.begin_slide(lane);
    }
    if input.steer_right && state.player.lane < LANES.len() - 1 {
        let lane = state.player.lane + 1;
        state.player.begin_slide(lane);
    }
    if input.jump && state.player.grounded() {
        state.player.begin_jump();
    }

    // Forward motion and easing
    state.player.z += PLAYER_SPEED * dt;
    state.player.advance(dt);

    // Coin spin/frame animation
    for coin in &mut state.coins {
        coin.animate(dt);
    }

    // Recycle waves that fell behind the player
    wave::recycle(state);

    // Obstacle contact ends the run
    let player_box = player_aabb(&state.player);
    for obstacle in &state.obstacles {
        if player_box.overlaps(&obstacle_aabb(obstacle)) {
            state.phase = GamePhase::GameOver;
            state.player.run_anim_playing = false;
            log::info!(
                "game over at distance {:.0} (score {}, coins {})",
                state.distance(),
                state.score,
                state.coins_collected
            );
            return;
        }
    }

    // Coin contact collects
    let before = state.coins.len();
    state.coins.retain(|coin| !player_box.overlaps(&coin_aabb(coin)));
    state.coins_collected += (before - state.coins.len()) as u32;

    // Score: distance traveled plus a fixed bonus per coin
    state.score = state.distance().floor() as u64 + COIN_SCORE * state.coins_collected as u64;

    state.normalize_order();
}
