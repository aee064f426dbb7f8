//! Lane Runner - a lane-based endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (waves, collisions, game state)
//! - `camera`: Follow-camera pose for whatever renders the state
//! - `settings`: Persisted player preferences
//! - `highscores`: Local leaderboard

pub mod camera;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Lateral lane offsets, left to right
    pub const LANES: [f32; 3] = [-4.0, 0.0, 4.0];
    /// Index of the center lane (player start)
    pub const CENTER_LANE: usize = 1;

    /// Forward distance between consecutive waves
    pub const WAVE_SPACING: f32 = 20.0;
    /// Number of waves kept in flight
    pub const WAVE_COUNT: usize = 10;
    /// Forward coordinate of the first wave at game start
    pub const FIRST_WAVE_Z: f32 = 10.0;
    /// Total forward span covered by the in-flight waves
    pub const HORIZON_SPAN: f32 = WAVE_SPACING * WAVE_COUNT as f32;
    /// A wave is recycled once it falls this far behind the player
    pub const RECYCLE_TRAIL: f32 = 10.0;

    /// Player forward speed (units/s)
    pub const PLAYER_SPEED: f32 = 15.0;
    /// Player start position on the forward axis
    pub const PLAYER_START_Z: f32 = -10.0;
    /// Duration of a lane slide (seconds)
    pub const SLIDE_DURATION: f32 = 0.2;
    /// Jump apex height
    pub const JUMP_HEIGHT: f32 = 3.0;
    /// Time from takeoff to apex (seconds)
    pub const JUMP_RISE: f32 = 0.3;
    /// Total airborne time (seconds)
    pub const JUMP_DURATION: f32 = 0.6;

    /// Number of frames in the coin spin animation
    pub const COIN_FRAME_COUNT: usize = 7;
    /// Coin animation playback rate (frames/s)
    pub const COIN_ANIM_FPS: f32 = 10.0;
    /// Coin rotation about the y axis (degrees/s)
    pub const COIN_SPIN_DEG: f32 = 100.0;
    /// Score bonus per collected coin
    pub const COIN_SCORE: u64 = 10;

    /// Obstacle box half-extent (cube of scale 2, centered at y = 1)
    pub const OBSTACLE_HALF: f32 = 1.0;
    /// Coin box half-extent (quad of scale 1)
    pub const COIN_HALF: f32 = 0.5;
    /// Height of obstacle and coin centers above the ground plane
    pub const ENTITY_Y: f32 = 1.0;
}

/// Exponential ease-out, mapping t in [0, 1] to [0, 1]
#[inline]
pub fn ease_out_expo(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f32.powf(-10.0 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_expo_endpoints() {
        assert!(ease_out_expo(0.0).abs() < 0.001);
        assert!((ease_out_expo(1.0) - 1.0).abs() < 0.001);
        assert!((ease_out_expo(2.0) - 1.0).abs() < 0.001);
        // Monotonic and front-loaded
        assert!(ease_out_expo(0.5) > 0.9);
    }
}
