//! Space Ping - A two-ship shield duel on a single screen
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, bullets, shield collisions)
//! - `platform`: Host input events, queued and applied once per frame
//! - `renderer`: 2D canvas drawing
//! - `settings`: Player preferences

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::RulesetKind;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Bullet speed (pixels per frame)
    pub const BULLET_VELOCITY: f32 = 20.0;
    /// Shield damage dealt by a single bullet
    pub const BULLET_STRENGTH: f32 = 1.0;
    /// Bullet length in the classic ruleset (pixels)
    pub const CLASSIC_BULLET_LENGTH: f32 = 10.0;
    /// Bullet length in the duel ruleset (pixels)
    pub const DUEL_BULLET_LENGTH: f32 = 6.0;
    /// Maximum live bullets; firing beyond this is ignored
    pub const MAX_BULLETS: usize = 10;
    /// Distance from ship center to its nose, where bullets spawn
    pub const SHIP_NOSE_OFFSET: f32 = 20.0;

    /// Rotation per frame while a turn key is held (degrees)
    pub const ANGULAR_VELOCITY: f32 = 3.0;
    /// Velocity impulse added per thrust press (pixels per frame)
    pub const THRUST_VELOCITY: f32 = 5.0;

    /// Shields at spawn; doubles as the shield radius
    pub const STARTING_SHIELDS: f32 = 50.0;
    /// Smallest physical shield radius of a live ship (hull is ~20 units)
    pub const MIN_SHIELD_RADIUS: f32 = 25.0;

    /// Velocity multipliers applied on ship-ship contact (first ship, second ship)
    pub const BOUNCE_FIRST: (f32, f32) = (-0.4, -0.6);
    pub const BOUNCE_SECOND: (f32, f32) = (-0.6, -0.4);

    /// Decorative stars generated at startup
    pub const NUM_STARS: usize = 255;

    /// Title image fade window (milliseconds since page load)
    pub const TITLE_START_MS: f64 = 700.0;
    pub const TITLE_END_MS: f64 = 4000.0;
}

/// Unit travel vector for a heading in degrees.
///
/// Headings use 0° = screen-up, increasing clockwise. Screen y grows downward,
/// so the heading is rotated by -90° before going through cos/sin.
#[inline]
pub fn heading(angle_degrees: f32) -> Vec2 {
    let radians = (angle_degrees - 90.0).to_radians();
    Vec2::new(radians.cos(), radians.sin())
}
