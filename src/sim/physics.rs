//! Physics integration and collision tests
//!
//! Gravity and push-force integration mutate the player in place; the
//! collision helpers are pure. Platform landings use an axis-aligned box
//! overlap, pickups and projectiles a distance-squared circle test (no sqrt).

use glam::Vec2;

use super::state::{Platform, Player};
use crate::consts::*;

/// A decaying lateral impulse from a projectile impact. Transient and
/// self-pruning; multiple simultaneous hits compound.
#[derive(Debug, Clone, PartialEq)]
pub struct PushForce {
    /// -1.0 or +1.0
    pub direction: f32,
    pub magnitude: f32,
    /// Remaining ticks before the force expires regardless of magnitude
    pub remaining_ticks: u32,
}

impl PushForce {
    /// Force queued when a projectile travelling along `direction_x` connects.
    pub fn from_impact(direction_x: f32) -> Self {
        Self {
            direction: direction_x.signum(),
            magnitude: PUSH_FORCE * PUSH_HIT_MULTIPLIER,
            remaining_ticks: PUSH_DURATION_TICKS,
        }
    }
}

/// Gravity then position integration, once per tick.
pub fn integrate(player: &mut Player) {
    player.vel.y += GRAVITY;
    player.pos += player.vel;
}

/// Rebuild the player's horizontal velocity from the active push forces,
/// decay them, prune the spent ones, and clamp the result. Horizontal
/// velocity comes only from impacts (keyboard movement shifts position
/// directly), so it returns to zero once every force has expired.
pub fn apply_push_forces(player: &mut Player, forces: &mut Vec<PushForce>) {
    let mut vx = 0.0;
    for force in forces.iter_mut() {
        vx += force.direction * force.magnitude;
        force.magnitude *= PUSH_DECAY;
        force.remaining_ticks = force.remaining_ticks.saturating_sub(1);
    }
    forces.retain(|f| f.remaining_ticks > 0 && f.magnitude >= PUSH_EPSILON);

    let max = PUSH_MAX_SPEED * PUSH_HIT_MULTIPLIER;
    player.vel.x = vx.clamp(-max, max);
}

/// Axis-aligned overlap between the player box and a platform box.
pub fn platform_overlap(player: &Player, platform: &Platform) -> bool {
    player.pos.y - player.half_height <= platform.pos.y + PLATFORM_HALF_HEIGHT
        && player.pos.y + player.half_height >= platform.pos.y - PLATFORM_HALF_HEIGHT
        && player.pos.x + player.half_width > platform.pos.x - PLATFORM_HALF_WIDTH
        && player.pos.x - player.half_width < platform.pos.x + PLATFORM_HALF_WIDTH
}

/// Land the player on a platform if it overlaps while falling. Returns true
/// when the player is now supported. Upward or zero vertical velocity passes
/// through from below and the sides.
pub fn try_land(player: &mut Player, platform: &Platform) -> bool {
    if platform_overlap(player, platform) && player.vel.y < 0.0 {
        player.pos.y = platform.pos.y + PLATFORM_HALF_HEIGHT + player.half_height;
        player.vel.y = 0.0;
        true
    } else {
        false
    }
}

/// Distance-squared circle test against the player: true when `item_pos` is
/// within `player.half_width + item_radius` of the player centre.
pub fn player_within(player: &Player, item_pos: Vec2, item_radius: f32) -> bool {
    let d = player.pos - item_pos;
    let reach = player.half_width + item_radius;
    d.length_squared() < reach * reach
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32, y: f32) -> Player {
        let mut p = Player::new(PLAYER_DEFAULT_HALF_WIDTH, PLAYER_DEFAULT_HALF_HEIGHT);
        p.pos = Vec2::new(x, y);
        p
    }

    fn platform_at(x: f32, y: f32) -> Platform {
        Platform::fixed(Vec2::new(x, y))
    }

    #[test]
    fn gravity_accumulates_each_tick() {
        let mut p = player_at(0.0, 0.0);
        integrate(&mut p);
        integrate(&mut p);
        assert!((p.vel.y - 2.0 * GRAVITY).abs() < 1e-6);
        assert!((p.pos.y - 3.0 * GRAVITY).abs() < 1e-6);
    }

    #[test]
    fn push_force_decays_strictly_and_expires() {
        let mut p = player_at(0.0, 0.0);
        let mut forces = vec![PushForce::from_impact(1.0)];
        let mut last_magnitude = f32::INFINITY;
        let mut ticks = 0;
        while !forces.is_empty() {
            apply_push_forces(&mut p, &mut forces);
            if let Some(f) = forces.first() {
                assert!(f.magnitude < last_magnitude);
                last_magnitude = f.magnitude;
            }
            ticks += 1;
            assert!(ticks <= PUSH_DURATION_TICKS);
        }
        // 0.6 * 0.85^n drops under epsilon well before the duration cap
        assert!(ticks < PUSH_DURATION_TICKS);
        assert!(p.vel.x > 0.0);

        // With no forces left, horizontal velocity falls back to zero
        apply_push_forces(&mut p, &mut forces);
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn hit_velocity_dies_within_duration_cap() {
        let mut p = player_at(0.0, 0.0);
        let mut forces = vec![PushForce::from_impact(-1.0)];
        apply_push_forces(&mut p, &mut forces);
        assert!(p.vel.x < 0.0);
        for _ in 1..PUSH_DURATION_TICKS {
            apply_push_forces(&mut p, &mut forces);
        }
        assert!(forces.is_empty());
        assert!(p.vel.x.abs() < PUSH_EPSILON * 2.0);
    }

    #[test]
    fn simultaneous_hits_compound() {
        let mut solo = player_at(0.0, 0.0);
        let mut pair = player_at(0.0, 0.0);
        apply_push_forces(&mut solo, &mut vec![PushForce::from_impact(1.0)]);
        apply_push_forces(
            &mut pair,
            &mut vec![PushForce::from_impact(1.0), PushForce::from_impact(1.0)],
        );
        assert!(pair.vel.x >= solo.vel.x);
    }

    #[test]
    fn horizontal_velocity_is_clamped() {
        let mut p = player_at(0.0, 0.0);
        let mut forces: Vec<PushForce> = (0..10).map(|_| PushForce::from_impact(1.0)).collect();
        apply_push_forces(&mut p, &mut forces);
        assert!(p.vel.x <= PUSH_MAX_SPEED * PUSH_HIT_MULTIPLIER + 1e-6);
    }

    #[test]
    fn landing_requires_downward_velocity() {
        let platform = platform_at(0.0, -2.0);

        let mut falling = player_at(0.0, -1.3);
        falling.vel.y = -0.1;
        assert!(try_land(&mut falling, &platform));
        assert_eq!(falling.vel.y, 0.0);
        assert!(
            (falling.pos.y - (-2.0 + PLATFORM_HALF_HEIGHT + falling.half_height)).abs() < 1e-6
        );

        let mut rising = player_at(0.0, -1.3);
        rising.vel.y = 0.3;
        assert!(!try_land(&mut rising, &platform));
        assert_eq!(rising.vel.y, 0.3);
    }

    #[test]
    fn no_overlap_outside_platform_width() {
        let platform = platform_at(0.0, -2.0);
        let mut p = player_at(PLATFORM_HALF_WIDTH + PLAYER_DEFAULT_HALF_WIDTH + 0.1, -1.9);
        p.vel.y = -0.1;
        assert!(!try_land(&mut p, &platform));
    }

    #[test]
    fn circle_test_matches_radius_sum() {
        let p = player_at(0.0, 0.0);
        let reach = p.half_width + PICKUP_RADIUS;
        assert!(player_within(&p, Vec2::new(reach - 0.01, 0.0), PICKUP_RADIUS));
        assert!(!player_within(&p, Vec2::new(reach + 0.01, 0.0), PICKUP_RADIUS));
        // Wider tutorial radius reaches further
        assert!(player_within(
            &p,
            Vec2::new(reach + 0.5, 0.0),
            TUTORIAL_PROXIMITY_RADIUS
        ));
    }
}
