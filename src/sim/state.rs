//! Game state and core simulation types
//!
//! All state that must be persisted for replay/determinism lives here.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::ease_out_expo;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Run ended on obstacle contact
    GameOver,
}

/// A wave: the group of entities sharing one forward coordinate.
///
/// Entities reference their wave by `id`, never by comparing float
/// coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wave {
    pub id: u32,
    pub z: f32,
}

/// A blocking obstacle (contact ends the run)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub wave_id: u32,
    /// Lane index into `consts::LANES`
    pub lane: usize,
    pub z: f32,
}

impl Obstacle {
    /// Lateral position
    #[inline]
    pub fn x(&self) -> f32 {
        LANES[self.lane]
    }
}

/// A collectible coin with its spin animation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub wave_id: u32,
    /// Lane index into `consts::LANES`
    pub lane: usize,
    pub z: f32,
    /// Current animation frame, cycled modulo `COIN_FRAME_COUNT`
    pub frame: usize,
    /// Time accumulated since the last frame advance
    pub frame_timer: f32,
    /// Rotation about the y axis, degrees
    pub rotation_deg: f32,
}

impl Coin {
    pub fn new(id: u32, wave_id: u32, lane: usize, z: f32) -> Self {
        Self {
            id,
            wave_id,
            lane,
            z,
            frame: 0,
            frame_timer: 0.0,
            rotation_deg: 0.0,
        }
    }

    /// Lateral position
    #[inline]
    pub fn x(&self) -> f32 {
        LANES[self.lane]
    }

    /// Advance the frame cycle and rotation by one timestep
    pub fn animate(&mut self, dt: f32) {
        self.frame_timer += dt;
        if self.frame_timer > 1.0 / COIN_ANIM_FPS {
            self.frame = (self.frame + 1) % COIN_FRAME_COUNT;
            self.frame_timer = 0.0;
        }
        self.rotation_deg = (self.rotation_deg + COIN_SPIN_DEG * dt) % 360.0;
    }
}

/// An in-flight lane change, easing x over `SLIDE_DURATION`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Slide {
    pub from_x: f32,
    pub to_x: f32,
    /// Elapsed time since the slide began
    pub t: f32,
}

/// An in-flight jump. The player rises to `JUMP_HEIGHT` over `JUMP_RISE`
/// seconds and lands when `JUMP_DURATION` has elapsed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Jump {
    /// Elapsed time since takeoff
    pub t: f32,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Target lane index into `consts::LANES`
    pub lane: usize,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub slide: Option<Slide>,
    pub jump: Option<Jump>,
    /// Whether the run animation clip should be looping on the rig
    pub run_anim_playing: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            lane: CENTER_LANE,
            x: LANES[CENTER_LANE],
            y: 0.0,
            z: PLAYER_START_Z,
            slide: None,
            jump: None,
            run_anim_playing: true,
        }
    }
}

impl Player {
    /// True when the player can start a jump
    #[inline]
    pub fn grounded(&self) -> bool {
        self.jump.is_none() && self.y.abs() < 0.01
    }

    /// Begin sliding toward a lane (restarts from the current x if a slide
    /// is already in flight)
    pub fn begin_slide(&mut self, lane: usize) {
        self.lane = lane;
        self.slide = Some(Slide {
            from_x: self.x,
            to_x: LANES[lane],
            t: 0.0,
        });
    }

    /// Begin a jump; the run clip stops while airborne
    pub fn begin_jump(&mut self) {
        self.jump = Some(Jump { t: 0.0 });
        self.run_anim_playing = false;
    }

    /// Advance slide and jump easing by one timestep
    pub fn advance(&mut self, dt: f32) {
        if let Some(ref mut slide) = self.slide {
            slide.t += dt;
            let eased = ease_out_expo(slide.t / SLIDE_DURATION);
            self.x = slide.from_x + (slide.to_x - slide.from_x) * eased;
            if slide.t >= SLIDE_DURATION {
                self.x = slide.to_x;
                self.slide = None;
            }
        }

        if let Some(ref mut jump) = self.jump {
            jump.t += dt;
            if jump.t >= JUMP_DURATION {
                // Land and resume the run clip
                self.y = 0.0;
                self.jump = None;
                self.run_anim_playing = true;
            } else {
                // Rise with ease-out, hang at the apex until landing
                self.y = JUMP_HEIGHT * ease_out_expo(jump.t / JUMP_RISE);
            }
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Score: distance traveled plus coin bonuses
    pub score: u64,
    /// Coins collected this run
    pub coins_collected: u32,
    /// Player character
    pub player: Player,
    /// In-flight waves, ordered nearest first
    pub waves: Vec<Wave>,
    /// Active obstacles (sorted by id for determinism)
    pub obstacles: Vec<Obstacle>,
    /// Active coins (sorted by id for determinism)
    pub coins: Vec<Coin>,
    /// Next entity/wave ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and a full initial
    /// horizon of waves
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Running,
            score: 0,
            coins_collected: 0,
            player: Player::default(),
            waves: Vec::with_capacity(WAVE_COUNT),
            obstacles: Vec::new(),
            coins: Vec::new(),
            next_id: 1,
        };

        super::wave::spawn_initial(&mut state);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Forward distance traveled since the start of the run
    #[inline]
    pub fn distance(&self) -> f32 {
        self.player.z - PLAYER_START_Z
    }

    /// Reset to the initial state for this seed. Idempotent: the result is
    /// identical regardless of prior obstacle/coin configuration.
    pub fn restart(&mut self) {
        *self = Self::new(self.seed);
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.obstacles.sort_by_key(|o| o.id);
        self.coins.sort_by_key(|c| c.id);
    }
}
