//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, no wall-clock time
//! - Screen bounds injected per step
//! - Input arrives as an ordered action list
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{ShieldImpact, shield_radius, ships_overlap};
pub use input::{Action, Controls, Key, Trigger};
pub use state::{Bounds, Bullet, Ruleset, RulesetKind, Ship, ShipId, SimEvent, Star, World};
pub use tick::{
    apply_actions, collision_detection, fire_bullet, move_bullets, move_ship, remove_hit_bullets,
    tick,
};
