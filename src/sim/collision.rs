//! Axis-aligned box overlap tests
//!
//! The runner only ever needs pairwise box intersection: the player against
//! obstacles (fail) and coins (collect). Everything is an AABB; no broad
//! phase is needed at these entity counts.

use glam::Vec3;

use super::state::{Coin, Obstacle, Player};
use crate::consts::*;

/// Player box half-extents (roughly a standing character)
const PLAYER_HALF: Vec3 = Vec3::new(0.5, 1.0, 0.5);

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub center: Vec3,
    pub half: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, half: Vec3) -> Self {
        Self { center, half }
    }

    /// Pairwise intersection test
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (self.center.x - other.center.x).abs() <= self.half.x + other.half.x
            && (self.center.y - other.center.y).abs() <= self.half.y + other.half.y
            && (self.center.z - other.center.z).abs() <= self.half.z + other.half.z
    }
}

/// Player collider, centered at chest height
pub fn player_aabb(player: &Player) -> Aabb {
    Aabb::new(
        Vec3::new(player.x, player.y + PLAYER_HALF.y, player.z),
        PLAYER_HALF,
    )
}

/// Obstacle collider
pub fn obstacle_aabb(obstacle: &Obstacle) -> Aabb {
    Aabb::new(
        Vec3::new(obstacle.x(), ENTITY_Y, obstacle.z),
        Vec3::splat(OBSTACLE_HALF),
    )
}

/// Coin collider
pub fn coin_aabb(coin: &Coin) -> Aabb {
    Aabb::new(
        Vec3::new(coin.x(), ENTITY_Y, coin.z),
        Vec3::splat(COIN_HALF),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_and_separation() {
        let a = Aabb::new(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb::new(Vec3::new(1.5, 0.0, 0.0), Vec3::splat(1.0));
        let c = Aabb::new(Vec3::new(3.0, 0.0, 0.0), Vec3::splat(0.5));

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_player_hits_obstacle_in_same_lane_only() {
        let mut player = Player::default();
        let obstacle = Obstacle {
            id: 1,
            wave_id: 1,
            lane: CENTER_LANE,
            z: player.z,
        };
        assert!(player_aabb(&player).overlaps(&obstacle_aabb(&obstacle)));

        // Adjacent lane clears the box
        player.x = LANES[0];
        assert!(!player_aabb(&player).overlaps(&obstacle_aabb(&obstacle)));
    }

    #[test]
    fn test_jump_clears_coin_but_not_obstacle() {
        let mut player = Player::default();
        player.y = JUMP_HEIGHT;

        let coin = Coin::new(1, 1, CENTER_LANE, player.z);
        assert!(!player_aabb(&player).overlaps(&coin_aabb(&coin)));

        // The apex also clears a 2-unit obstacle
        let obstacle = Obstacle {
            id: 2,
            wave_id: 1,
            lane: CENTER_LANE,
            z: player.z,
        };
        assert!(!player_aabb(&player).overlaps(&obstacle_aabb(&obstacle)));
    }
}
