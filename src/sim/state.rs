//! World state and core simulation types
//!
//! Everything one frame step reads or writes lives in [`World`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::heading;

/// Which of the two ships an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipId {
    Player,
    Enemy,
}

/// A ship entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    /// Center position (world coordinates, y down)
    pub pos: Vec2,
    /// Velocity (pixels per frame); persists, no drag
    pub vel: Vec2,
    /// Heading in degrees, 0 = up, clockwise positive. Never normalized.
    pub angle: f32,
    /// Remaining health, also the shield radius. Never negative.
    pub shields: f32,
}

impl Ship {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle,
            shields: STARTING_SHIELDS,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_shields(mut self, shields: f32) -> Self {
        self.shields = shields.max(0.0);
        self
    }

    /// Dead ships stay in the world but are skipped by collision and drawing
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.shields <= 0.0
    }

    /// Point where bullets spawn
    pub fn nose(&self) -> Vec2 {
        self.pos + heading(self.angle) * SHIP_NOSE_OFFSET
    }
}

/// A bullet in flight. Its heading is fixed at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub angle: f32,
}

/// A decorative background star
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Star {
    pub x: i32,
    pub y: i32,
    /// 0-99
    pub intensity: u8,
}

/// Scatter `count` stars over the screen, reproducibly for a given seed
pub fn generate_stars(seed: u64, count: usize, bounds: Bounds) -> Vec<Star> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..count)
        .map(|_| Star {
            x: (rng.random::<f32>() * bounds.width) as i32,
            y: (rng.random::<f32>() * bounds.height) as i32,
            intensity: rng.random_range(0..100),
        })
        .collect()
}

/// Viewport size the step is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Half-open screen rectangle `[0, width) x [0, height)`
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x < self.width && pos.y >= 0.0 && pos.y < self.height
    }
}

/// The two game variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RulesetKind {
    /// Long bullets, no brake, ships pass through each other
    #[default]
    Classic,
    /// Short bullets, DOWN brakes, ships bounce off each other
    Duel,
}

impl RulesetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RulesetKind::Classic => "Classic",
            RulesetKind::Duel => "Duel",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(RulesetKind::Classic),
            "duel" => Some(RulesetKind::Duel),
            _ => None,
        }
    }
}

/// Rule parameters derived from a [`RulesetKind`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    pub kind: RulesetKind,
    /// Drawn length of a bullet; also widens the instant-kill threshold
    pub bullet_length: f32,
    /// DOWN zeroes the player's velocity
    pub brake_enabled: bool,
    /// Ships bounce off each other's shields
    pub ship_collisions: bool,
}

impl Ruleset {
    pub fn classic() -> Self {
        Self {
            kind: RulesetKind::Classic,
            bullet_length: CLASSIC_BULLET_LENGTH,
            brake_enabled: false,
            ship_collisions: false,
        }
    }

    pub fn duel() -> Self {
        Self {
            kind: RulesetKind::Duel,
            bullet_length: DUEL_BULLET_LENGTH,
            brake_enabled: true,
            ship_collisions: true,
        }
    }
}

impl From<RulesetKind> for Ruleset {
    fn from(kind: RulesetKind) -> Self {
        match kind {
            RulesetKind::Classic => Ruleset::classic(),
            RulesetKind::Duel => Ruleset::duel(),
        }
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Ruleset::classic()
    }
}

/// Something that happened during a step (presentation and logging only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    BulletFired { ship: ShipId },
    ShieldHit { ship: ShipId, shields: f32 },
    ShipDestroyed { ship: ShipId },
    ShipsCollided,
}

/// Complete world state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Seed the starfield was generated from
    pub seed: u64,
    pub ruleset: Ruleset,
    /// Steps taken so far
    pub frame: u64,
    pub player: Ship,
    pub enemy: Ship,
    /// Live bullets, at most `MAX_BULLETS`
    pub bullets: Vec<Bullet>,
    /// Background stars (not gameplay-affecting)
    #[serde(skip)]
    pub stars: Vec<Star>,
    /// Events produced by the most recent step
    #[serde(skip)]
    pub events: Vec<SimEvent>,
}

impl World {
    /// Create the opening position: player and drifting enemy side by side
    pub fn new(seed: u64, ruleset: Ruleset, bounds: Bounds, star_count: usize) -> Self {
        Self {
            seed,
            ruleset,
            frame: 0,
            player: Ship::new(Vec2::new(400.0, 400.0), 20.0),
            enemy: Ship::new(Vec2::new(600.0, 400.0), 340.0).with_velocity(Vec2::new(-1.0, -2.0)),
            bullets: Vec::with_capacity(MAX_BULLETS),
            stars: generate_stars(seed, star_count, bounds),
            events: Vec::new(),
        }
    }

    /// Look up a ship named by a [`SimEvent`]
    pub fn ship(&self, id: ShipId) -> &Ship {
        match id {
            ShipId::Player => &self.player,
            ShipId::Enemy => &self.enemy,
        }
    }
}
