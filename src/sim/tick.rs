//! Per-frame simulation step
//!
//! One call to [`tick`] advances the world by exactly one frame. The order of
//! the sub-steps is fixed:
//! 1. move bullets and drop the ones that left the screen
//! 2. resolve bullet hits against the enemy's shields
//! 3. apply the player's actions
//! 4. ship-ship collision (duel ruleset)
//! 5. move the player, then the enemy

use super::collision::{ShieldImpact, apply_bullet_hit, point_in_shield, ships_overlap};
use super::input::Action;
use super::state::{Bounds, Bullet, Ruleset, Ship, ShipId, SimEvent, World};
use crate::consts::*;
use crate::heading;

/// Spawn a bullet at the ship's nose. Returns false (and does nothing) at the cap.
pub fn fire_bullet(ship: &Ship, bullets: &mut Vec<Bullet>) -> bool {
    if bullets.len() >= MAX_BULLETS {
        return false;
    }
    bullets.push(Bullet {
        pos: ship.nose(),
        angle: ship.angle,
    });
    true
}

/// Advance every bullet along its heading, then drop those off screen
pub fn move_bullets(bullets: &mut Vec<Bullet>, bounds: Bounds) {
    for bullet in bullets.iter_mut() {
        bullet.pos += heading(bullet.angle) * BULLET_VELOCITY;
    }
    bullets.retain(|bullet| bounds.contains(bullet.pos));
}

/// Remove bullets that struck a target's shields, damaging that target.
///
/// Each bullet is tested against `targets` in order and hits the first live
/// ship whose shield circle contains it, so on an exact tie the earlier target
/// takes the hit. Returns `(target index, impact)` for every hit.
pub fn remove_hit_bullets(
    bullets: &mut Vec<Bullet>,
    targets: &mut [&mut Ship],
    bullet_length: f32,
) -> Vec<(usize, ShieldImpact)> {
    let mut hits = Vec::new();
    bullets.retain(|bullet| {
        let Some(index) = targets
            .iter()
            .position(|ship| point_in_shield(bullet.pos, ship))
        else {
            return true;
        };
        let impact = apply_bullet_hit(&mut *targets[index], bullet_length);
        hits.push((index, impact));
        false
    });
    hits
}

/// Apply velocity, then wrap once per axis.
///
/// A ship overshooting by more than a full screen in one frame stays off
/// screen until later frames bring it back.
pub fn move_ship(ship: &mut Ship, bounds: Bounds) {
    ship.pos += ship.vel;

    if ship.pos.x < 0.0 {
        ship.pos.x += bounds.width;
    } else if ship.pos.x > bounds.width {
        ship.pos.x -= bounds.width;
    }
    if ship.pos.y < 0.0 {
        ship.pos.y += bounds.height;
    } else if ship.pos.y > bounds.height {
        ship.pos.y -= bounds.height;
    }
}

/// Apply this frame's actions to a ship, in the order given
pub fn apply_actions(
    actions: &[Action],
    ship: &mut Ship,
    bullets: &mut Vec<Bullet>,
    ruleset: &Ruleset,
) -> Vec<SimEvent> {
    let mut events = Vec::new();
    for action in actions {
        match action {
            Action::Thrust => {
                ship.vel += heading(ship.angle) * THRUST_VELOCITY;
            }
            Action::Brake => {
                if ruleset.brake_enabled {
                    ship.vel = glam::Vec2::ZERO;
                }
            }
            Action::RotateLeft => ship.angle -= ANGULAR_VELOCITY,
            Action::RotateRight => ship.angle += ANGULAR_VELOCITY,
            Action::Fire => {
                if fire_bullet(ship, bullets) {
                    events.push(SimEvent::BulletFired {
                        ship: ShipId::Player,
                    });
                }
                // Firing always stops the ship, even at the bullet cap
                ship.vel = glam::Vec2::ZERO;
            }
        }
    }
    events
}

/// Bounce two ships apart if their shields touch.
///
/// Velocities are scaled asymmetrically and both ships take an extra move
/// with the new velocities in the same frame. Returns whether they collided.
pub fn collision_detection(a: &mut Ship, b: &mut Ship, bounds: Bounds) -> bool {
    if !ships_overlap(a, b) {
        return false;
    }

    a.vel.x *= BOUNCE_FIRST.0;
    a.vel.y *= BOUNCE_FIRST.1;
    b.vel.x *= BOUNCE_SECOND.0;
    b.vel.y *= BOUNCE_SECOND.1;

    move_ship(a, bounds);
    move_ship(b, bounds);
    true
}

/// Advance the world by one frame
pub fn tick(world: &mut World, actions: &[Action], bounds: Bounds) {
    let mut events = Vec::new();
    world.frame += 1;

    move_bullets(&mut world.bullets, bounds);

    // Only the enemy is a bullet target; bullets spawn inside the player's shields
    let hits = remove_hit_bullets(
        &mut world.bullets,
        &mut [&mut world.enemy],
        world.ruleset.bullet_length,
    );
    for (_, impact) in hits {
        match impact {
            ShieldImpact::Absorbed { shields } => {
                log::debug!("Enemy shields down to {}", shields);
                events.push(SimEvent::ShieldHit {
                    ship: ShipId::Enemy,
                    shields,
                });
            }
            ShieldImpact::Destroyed => {
                log::debug!("Enemy destroyed on frame {}", world.frame);
                events.push(SimEvent::ShipDestroyed { ship: ShipId::Enemy });
            }
        }
    }

    events.extend(apply_actions(
        actions,
        &mut world.player,
        &mut world.bullets,
        &world.ruleset,
    ));

    if world.ruleset.ship_collisions
        && collision_detection(&mut world.player, &mut world.enemy, bounds)
    {
        log::debug!("Ships collided on frame {}", world.frame);
        events.push(SimEvent::ShipsCollided);
    }

    move_ship(&mut world.player, bounds);
    move_ship(&mut world.enemy, bounds);

    world.events = events;
}


#[cfg(test)]
mod proptests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn bullet_strategy() -> impl Strategy<Value = Bullet> {
        (-100.0f32..900.0, -100.0f32..700.0, -720.0f32..720.0).prop_map(|(x, y, angle)| Bullet {
            pos: Vec2::new(x, y),
            angle,
        })
    }

    proptest! {
        #[test]
        fn prop_moved_bullets_stay_on_screen(
            mut bullets in prop::collection::vec(bullet_strategy(), 0..=MAX_BULLETS),
            width in 1.0f32..1600.0,
            height in 1.0f32..1200.0,
        ) {
            let bounds = Bounds::new(width, height);
            move_bullets(&mut bullets, bounds);
            for bullet in &bullets {
                prop_assert!(bounds.contains(bullet.pos));
            }
        }

        #[test]
        fn prop_shields_never_negative(
            shields in 0.0f32..60.0,
            offsets in prop::collection::vec((-60.0f32..60.0, -60.0f32..60.0), 0..40),
            duel in any::<bool>(),
        ) {
            let rules = if duel { Ruleset::duel() } else { Ruleset::classic() };
            let mut ship = Ship::new(Vec2::new(400.0, 300.0), 0.0).with_shields(shields);
            for (dx, dy) in offsets {
                let mut bullets = vec![Bullet { pos: Vec2::new(400.0 + dx, 300.0 + dy), angle: 0.0 }];
                remove_hit_bullets(&mut bullets, &mut [&mut ship], rules.bullet_length);
                prop_assert!(ship.shields >= 0.0);
            }
        }

        #[test]
        fn prop_fire_never_exceeds_cap(existing in 0usize..=MAX_BULLETS, shots in 0usize..20) {
            let ship = Ship::new(Vec2::new(400.0, 300.0), 0.0);
            let mut bullets = vec![Bullet { pos: Vec2::ZERO, angle: 0.0 }; existing];
            for _ in 0..shots {
                fire_bullet(&ship, &mut bullets);
            }
            prop_assert_eq!(bullets.len(), (existing + shots).min(MAX_BULLETS));
        }
    }
}
