//! Follow-camera pose
//!
//! The simulation never renders; it only exposes where a camera should sit.
//! Whatever draws the state (canvas front-end, an embedding engine) consumes
//! the pose computed here: trailing behind and above the player, pitched
//! down, looking at a point just over the player's head.

use glam::{Mat4, Vec3};

use crate::sim::state::Player;

/// Camera offset behind the player on the forward axis
const FOLLOW_BACK: f32 = 15.0;
/// Camera height above the player
const FOLLOW_UP: f32 = 4.0;
/// Look-at height above the player's feet
const TARGET_UP: f32 = 2.0;

/// A camera pose in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
    /// Downward pitch, degrees
    pub pitch_deg: f32,
}

impl CameraPose {
    /// View matrix for this pose (right-handed, +y up)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }
}

/// Compute the follow pose for the current player position
pub fn follow(player: &Player) -> CameraPose {
    CameraPose {
        position: Vec3::new(player.x, player.y + FOLLOW_UP, player.z - FOLLOW_BACK),
        target: Vec3::new(player.x, player.y + TARGET_UP, player.z),
        pitch_deg: 15.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_trails_the_player() {
        let mut player = Player::default();
        player.x = 4.0;
        player.z = 100.0;

        let pose = follow(&player);
        assert_eq!(pose.position, Vec3::new(4.0, 4.0, 85.0));
        assert_eq!(pose.target, Vec3::new(4.0, 2.0, 100.0));
    }

    #[test]
    fn test_view_matrix_centers_the_target() {
        let pose = follow(&Player::default());
        let view = pose.view_matrix();

        // The look-at target sits on the view axis, in front of the camera
        let v = view.transform_point3(pose.target);
        assert!(v.x.abs() < 0.001);
        assert!(v.y.abs() < 0.001);
        assert!(v.z < 0.0);
    }
}
