//! Circular shield collision tests
//!
//! A ship's shield value doubles as its hit radius, so every collision in the
//! game is a point-in-circle or circle-circle distance check.

use glam::Vec2;

use super::state::Ship;
use crate::consts::{BULLET_STRENGTH, MIN_SHIELD_RADIUS};

/// Outcome of a bullet striking a shield
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShieldImpact {
    /// Shields absorbed the hit and dropped by the bullet strength
    Absorbed { shields: f32 },
    /// Shields were too weak; the ship is now dead
    Destroyed,
}

/// Whether a point lies within a live ship's shield circle (boundary inclusive)
#[inline]
pub fn point_in_shield(point: Vec2, ship: &Ship) -> bool {
    !ship.is_dead() && ship.pos.distance(point) <= ship.shields
}

/// Apply one bullet hit to a ship's shields.
///
/// Shields above `strength + bullet_length` lose `strength`; anything at or
/// below that threshold drops straight to zero instead of going negative.
pub fn apply_bullet_hit(ship: &mut Ship, bullet_length: f32) -> ShieldImpact {
    if ship.shields > BULLET_STRENGTH + bullet_length {
        ship.shields -= BULLET_STRENGTH;
        ShieldImpact::Absorbed {
            shields: ship.shields,
        }
    } else {
        ship.shields = 0.0;
        ShieldImpact::Destroyed
    }
}

/// Physical shield radius used for ship-ship contact.
///
/// Zero for a dead ship; otherwise never smaller than the hull.
#[inline]
pub fn shield_radius(shields: f32) -> f32 {
    if shields <= 0.0 {
        0.0
    } else {
        shields.max(MIN_SHIELD_RADIUS)
    }
}

/// Whether two live ships' shields overlap.
///
/// The center distance is truncated to whole pixels before comparing.
pub fn ships_overlap(a: &Ship, b: &Ship) -> bool {
    if a.is_dead() || b.is_dead() {
        return false;
    }
    let distance = a.pos.distance(b.pos).trunc();
    distance <= shield_radius(a.shields) + shield_radius(b.shields)
}
