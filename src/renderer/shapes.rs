//! Shape generation for 2D primitives

use glam::Vec2;

use crate::heading;
use crate::sim::{Bullet, Ship, Star};

/// Hull outline in ship-local coordinates, nose pointing up
const HULL: [Vec2; 4] = [
    Vec2::new(0.0, -20.0),
    Vec2::new(10.0, 10.0),
    Vec2::new(0.0, 5.0),
    Vec2::new(-10.0, 10.0),
];

/// Hull outline rotated to the ship's heading and placed at its position
pub fn ship_hull(ship: &Ship) -> [Vec2; 4] {
    // Positive angles turn clockwise on a y-down screen
    let rotation = Vec2::from_angle(ship.angle.to_radians());
    HULL.map(|p| ship.pos + rotation.rotate(p))
}

/// Start and end of a bullet's streak
pub fn bullet_segment(bullet: &Bullet, length: f32) -> (Vec2, Vec2) {
    (bullet.pos, bullet.pos + heading(bullet.angle) * length)
}

/// Dot radius for a star: dimmer stars are drawn larger (1-3 px)
pub fn star_radius(star: &Star) -> f32 {
    ((100 - i32::from(star.intensity)) / 40 + 1) as f32
}

/// CSS fill for a star: brighter and more opaque with intensity
pub fn star_color(star: &Star) -> String {
    let brightness = 155 + u32::from(star.intensity);
    format!(
        "rgba({brightness}, {brightness}, {brightness}, {})",
        f32::from(star.intensity) / 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_hull_nose_matches_heading() {
        let ship = Ship::new(Vec2::new(100.0, 100.0), 90.0);
        let hull = ship_hull(&ship);
        assert!(approx(hull[0], ship.nose()));
        assert!(approx(hull[0], Vec2::new(120.0, 100.0)));
    }

    #[test]
    fn test_hull_unrotated() {
        let ship = Ship::new(Vec2::new(50.0, 50.0), 0.0);
        let hull = ship_hull(&ship);
        assert!(approx(hull[0], Vec2::new(50.0, 30.0)));
        assert!(approx(hull[1], Vec2::new(60.0, 60.0)));
        assert!(approx(hull[3], Vec2::new(40.0, 60.0)));
    }

    #[test]
    fn test_bullet_segment() {
        let bullet = Bullet {
            pos: Vec2::new(10.0, 10.0),
            angle: 180.0,
        };
        let (start, end) = bullet_segment(&bullet, 6.0);
        assert_eq!(start, bullet.pos);
        assert!(approx(end, Vec2::new(10.0, 16.0)));
    }

    #[test]
    fn test_star_style() {
        let dim = Star { x: 0, y: 0, intensity: 0 };
        let bright = Star { x: 0, y: 0, intensity: 99 };
        assert_eq!(star_radius(&dim), 3.0);
        assert_eq!(star_radius(&bright), 1.0);
        assert_eq!(star_radius(&Star { x: 0, y: 0, intensity: 60 }), 2.0);
        assert_eq!(star_color(&dim), "rgba(155, 155, 155, 0)");
        assert_eq!(star_color(&bright), "rgba(254, 254, 254, 0.99)");
    }
}
