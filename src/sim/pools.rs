//! Entity pools: platforms, power-ups, projectiles
//!
//! Each pool follows the same per-tick shape: spawn if due, advance every
//! member, resolve collisions against the player, cull off-bounds members.
//! Culling happens in the same tick an entity crosses its bound, so the
//! pools never carry off-screen members between ticks.
//!
//! Any pool may open a first-encounter tutorial, which pauses the game mid
//! tick; the orchestrator checks the mode after each pool and stops early.

use glam::Vec2;
use rand::Rng;

use super::difficulty;
use super::physics::{self, PushForce};
use super::state::{
    GameEvent, GameMode, GameState, Platform, PlatformMotion, PowerUp, PowerUpKind, Projectile,
    Sound, TutorialKind,
};
use crate::consts::*;

/// Advance the platform pool: spawn, descend, land the player, patrol the
/// movers, cull fallen spawned platforms. Re-derives `is_grounded` from
/// scratch, so it must run before the jump input is sampled.
pub fn update_platforms(state: &mut GameState) {
    let elapsed = state.elapsed_secs();

    // The world only scrolls once the player has jumped
    if state.has_jumped {
        state.platform_spawn_ticks += 1.0;
        if state.platform_spawn_ticks > difficulty::spawn_interval_ticks(state.current_platform_speed)
        {
            state.platform_spawn_ticks = 0.0;
            spawn_platform(state, elapsed);
        }
    }

    state.is_grounded = false;

    let descent = if state.has_jumped {
        state.current_platform_speed
    } else {
        0.0
    };
    let movers_active = elapsed >= MOVING_PLATFORM_UNLOCK_SECS;

    let mut i = 0;
    while i < state.platforms.len() {
        {
            let platform = &mut state.platforms[i];
            platform.pos.y -= descent;
        }

        if physics::try_land(&mut state.player, &state.platforms[i]) {
            state.is_grounded = true;
        }

        let platform = &mut state.platforms[i];
        if movers_active {
            step_motion(platform);
        }

        if !platform.is_initial() && platform.pos.y < CULL_Y {
            state.platforms.remove(i);
        } else {
            i += 1;
        }
    }
}

/// One patrol step with a reflecting boundary: when the next step would
/// leave `initial_x ± range`, flip direction and step the other way, so the
/// platform never stalls on the boundary.
fn step_motion(platform: &mut Platform) {
    let Some(motion) = &mut platform.motion else {
        return;
    };
    let next_x = platform.pos.x + motion.direction * motion.speed;
    if (next_x - motion.initial_x).abs() > motion.range {
        motion.direction = -motion.direction;
        platform.pos.x += motion.direction * motion.speed;
    } else {
        platform.pos.x = next_x;
    }
}

fn spawn_platform(state: &mut GameState, elapsed: f32) {
    let x = (state.rng.random::<f32>() - 0.5) * PLATFORM_SPAWN_X_SPREAD;
    let mut platform = Platform::fixed(Vec2::new(x, PLATFORM_SPAWN_Y));

    if elapsed >= MOVING_PLATFORM_UNLOCK_SECS && state.rng.random_bool(MOVING_PLATFORM_CHANCE) {
        platform.motion = Some(PlatformMotion {
            direction: if state.rng.random_bool(0.5) { 1.0 } else { -1.0 },
            speed: MOVING_PLATFORM_SPEED,
            initial_x: x,
            range: MOVING_PLATFORM_RANGE,
        });
        if !state.tutorial_flags.seen(TutorialKind::MovingPlatform) {
            state.open_tutorial(TutorialKind::MovingPlatform);
        }
    } else {
        // Two independent rolls; a platform may legally carry both
        if state.assets.star && state.rng.random_bool(STAR_SPAWN_CHANCE) {
            state.power_ups.push(PowerUp {
                kind: PowerUpKind::Star,
                pos: Vec2::new(x, PLATFORM_SPAWN_Y + STAR_Y_OFFSET),
                spin: 0.0,
            });
        }
        if state.assets.shield && state.rng.random_bool(SHIELD_SPAWN_CHANCE) {
            state.power_ups.push(PowerUp {
                kind: PowerUpKind::Shield,
                pos: Vec2::new(x, PLATFORM_SPAWN_Y + SHIELD_Y_OFFSET),
                spin: 0.0,
            });
        }
    }

    state.platforms.push(platform);
}

/// Advance the power-up pool: ride the platform flow downward, spin, cull,
/// fire first-encounter tutorials, collect on contact.
pub fn update_power_ups(state: &mut GameState, now_ms: f64) {
    let descent = if state.has_jumped {
        state.current_platform_speed
    } else {
        0.0
    };

    let mut i = 0;
    while i < state.power_ups.len() {
        {
            let power_up = &mut state.power_ups[i];
            power_up.pos.y -= descent;
            power_up.spin += POWER_UP_SPIN_RATE;
        }

        if state.power_ups[i].pos.y < CULL_Y {
            state.power_ups.remove(i);
            continue;
        }

        let (kind, pos) = {
            let p = &state.power_ups[i];
            (p.kind, p.pos)
        };

        // A first encounter opens the overlay instead of collecting; the
        // rest of the pool waits until the countdown brings play back.
        let tutorial = match kind {
            PowerUpKind::Star => TutorialKind::SuperJump,
            PowerUpKind::Shield => TutorialKind::ProjectileShield,
        };
        let near = match kind {
            PowerUpKind::Star => {
                physics::player_within(&state.player, pos, TUTORIAL_PROXIMITY_RADIUS)
            }
            // The shield overlay opens as soon as one is on screen
            PowerUpKind::Shield => true,
        };
        if near && !state.tutorial_flags.seen(tutorial) {
            state.open_tutorial(tutorial);
            return;
        }

        if physics::player_within(&state.player, pos, PICKUP_RADIUS) {
            state.power_ups.remove(i);
            state.push_event(GameEvent::PlaySound(Sound::Star));
            match kind {
                PowerUpKind::Star => state.activate_super_jump(now_ms),
                PowerUpKind::Shield => state.activate_shield(now_ms),
            }
            continue;
        }

        i += 1;
    }
}

/// Advance the projectile pool: spawn on the wall-clock interval once
/// unlocked, travel, spin, collide with the player, cull past the lateral
/// bound.
pub fn update_projectiles(state: &mut GameState, now_ms: f64) {
    if state.assets.projectile
        && state.elapsed_secs() >= PROJECTILE_UNLOCK_SECS
        && now_ms - state.last_projectile_spawn_ms > PROJECTILE_SPAWN_INTERVAL_MS
    {
        state.last_projectile_spawn_ms = now_ms;
        if !state.tutorial_flags.seen(TutorialKind::ProjectileShield) {
            state.open_tutorial(TutorialKind::ProjectileShield);
        }
        spawn_projectile(state);
        if state.mode != GameMode::Playing {
            return;
        }
    }

    let mut i = 0;
    while i < state.projectiles.len() {
        {
            let projectile = &mut state.projectiles[i];
            projectile.pos.x += projectile.direction * PROJECTILE_SPEED;
            projectile.spin += PROJECTILE_SPIN_RATE;
        }

        let (pos, direction) = {
            let p = &state.projectiles[i];
            (p.pos, p.direction)
        };

        if physics::player_within(&state.player, pos, PICKUP_RADIUS) {
            state.projectiles.remove(i);
            // Immunity swallows the hit silently
            if !state.is_immune {
                state.push_forces.push(PushForce::from_impact(direction));
                state.push_event(GameEvent::PlaySound(Sound::ProjectileHit));
            }
            continue;
        }

        if pos.x.abs() > PROJECTILE_LATERAL_BOUND {
            state.projectiles.remove(i);
            continue;
        }

        i += 1;
    }
}

fn spawn_projectile(state: &mut GameState) {
    let y = PROJECTILE_BAND_MIN + state.rng.random::<f32>() * PROJECTILE_BAND_SPAN;
    let (x, direction) = if state.rng.random_bool(0.5) {
        (-PROJECTILE_SPAWN_X, 1.0)
    } else {
        (PROJECTILE_SPAWN_X, -1.0)
    };
    state.projectiles.push(Projectile {
        pos: Vec2::new(x, y),
        direction,
        spin: 0.0,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{SimConfig, TutorialFlags};

    fn seen_everything() -> TutorialFlags {
        TutorialFlags {
            super_jump: true,
            moving_platform: true,
            projectile_shield: true,
        }
    }

    fn playing_state() -> GameState {
        GameState::new(7, SimConfig::default(), seen_everything())
    }

    #[test]
    fn platforms_stay_put_before_the_first_jump() {
        let mut state = playing_state();
        let before: Vec<f32> = state.platforms.iter().map(|p| p.pos.y).collect();
        for _ in 0..200 {
            update_platforms(&mut state);
        }
        let after: Vec<f32> = state.platforms.iter().map(|p| p.pos.y).collect();
        assert_eq!(before, after);
        assert_eq!(state.platforms.len(), INITIAL_PLATFORM_SLOTS.len());
    }

    #[test]
    fn spawn_timer_produces_a_platform_at_the_top() {
        let mut state = playing_state();
        state.has_jumped = true;
        state.platform_spawn_ticks = PLATFORM_SPAWN_INTERVAL_TICKS + 1.0;
        update_platforms(&mut state);
        let spawned: Vec<&Platform> =
            state.platforms.iter().filter(|p| !p.is_initial()).collect();
        assert_eq!(spawned.len(), 1);
        assert!((spawned[0].pos.y - (PLATFORM_SPAWN_Y - PLATFORM_SPEED_INITIAL)).abs() < 1e-5);
        assert!(spawned[0].pos.x.abs() <= PLATFORM_SPAWN_X_SPREAD / 2.0);
        assert_eq!(state.platform_spawn_ticks, 0.0);
    }

    #[test]
    fn fallen_spawned_platforms_are_culled_but_initial_ones_survive() {
        let mut state = playing_state();
        state.has_jumped = true;
        state.platforms.push(Platform::fixed(Vec2::new(0.0, CULL_Y)));
        state.platforms[3].pos.y = CULL_Y - 5.0;
        update_platforms(&mut state);
        assert_eq!(state.platforms.len(), INITIAL_PLATFORM_SLOTS.len());
        assert!(state.platforms.iter().all(Platform::is_initial));
    }

    #[test]
    fn mover_patrols_within_range_and_reflects() {
        let mut platform = Platform::fixed(Vec2::new(1.0, 5.0));
        platform.motion = Some(PlatformMotion {
            direction: 1.0,
            speed: MOVING_PLATFORM_SPEED,
            initial_x: 1.0,
            range: 0.2,
        });
        let mut seen_left = false;
        let mut seen_right = false;
        for _ in 0..100 {
            step_motion(&mut platform);
            let offset = platform.pos.x - 1.0;
            assert!(offset.abs() <= 0.2 + MOVING_PLATFORM_SPEED + 1e-6);
            seen_left |= offset < -0.1;
            seen_right |= offset > 0.1;
        }
        assert!(seen_left && seen_right);
    }

    /// Both power-up rolls are ~0.03, so scan seeds for a state whose next
    /// spawn lands a star and a shield on the same platform. Deterministic:
    /// the same seed always replays the same rolls.
    fn seed_with_both_power_up_rolls() -> u64 {
        (0..50_000)
            .find(|&seed| {
                let mut state = GameState::new(seed, SimConfig::default(), seen_everything());
                spawn_platform(&mut state, 0.0);
                state.power_ups.len() == 2
            })
            .expect("no seed rolled both power-ups")
    }

    #[test]
    fn spawn_rolls_can_put_a_star_and_a_shield_on_one_platform() {
        let seed = seed_with_both_power_up_rolls();
        let mut state = GameState::new(seed, SimConfig::default(), seen_everything());
        spawn_platform(&mut state, 0.0);

        let platform = state.platforms.last().expect("platform spawned");
        assert!(platform.motion.is_none());

        let star = state
            .power_ups
            .iter()
            .find(|p| p.kind == PowerUpKind::Star)
            .expect("star rolled");
        let shield = state
            .power_ups
            .iter()
            .find(|p| p.kind == PowerUpKind::Shield)
            .expect("shield rolled");
        assert_eq!(star.pos.x, platform.pos.x);
        assert_eq!(shield.pos.x, platform.pos.x);
        assert!((star.pos.y - (PLATFORM_SPAWN_Y + STAR_Y_OFFSET)).abs() < 1e-6);
        assert!((shield.pos.y - (PLATFORM_SPAWN_Y + SHIELD_Y_OFFSET)).abs() < 1e-6);
    }

    #[test]
    fn disabled_power_up_assets_stop_the_rolls() {
        let seed = seed_with_both_power_up_rolls();
        let mut state = GameState::new(seed, SimConfig::default(), seen_everything());
        state.assets.star = false;
        state.assets.shield = false;
        spawn_platform(&mut state, 0.0);
        assert!(state.power_ups.is_empty());
        assert_eq!(state.platforms.len(), INITIAL_PLATFORM_SLOTS.len() + 1);
    }

    #[test]
    fn collecting_a_star_grants_the_super_jump_window() {
        let mut state = playing_state();
        state.power_ups.push(PowerUp {
            kind: PowerUpKind::Star,
            pos: state.player.pos,
            spin: 0.0,
        });
        update_power_ups(&mut state, 4_000.0);
        assert!(state.power_ups.is_empty());
        assert_eq!(state.jump_force, crate::sim::state::JumpForce::Super);
        assert_eq!(
            state.super_jump_until_ms,
            Some(4_000.0 + SUPER_JUMP_DURATION_MS)
        );
        assert!(state
            .drain_events()
            .contains(&GameEvent::PlaySound(Sound::Star)));
    }

    #[test]
    fn first_star_nearby_opens_the_tutorial_instead_of_collecting() {
        let mut state = playing_state();
        state.tutorial_flags.super_jump = false;
        state.power_ups.push(PowerUp {
            kind: PowerUpKind::Star,
            pos: state.player.pos + Vec2::new(1.2, 0.0),
            spin: 0.0,
        });
        update_power_ups(&mut state, 0.0);
        assert_eq!(state.mode, GameMode::Paused);
        assert!(state.tutorial_flags.super_jump);
        // Not collected: the overlay fired on proximity, not contact
        assert_eq!(state.power_ups.len(), 1);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ShowTutorial(TutorialKind::SuperJump)));
        assert!(events.contains(&GameEvent::MarkTutorialSeen(TutorialKind::SuperJump)));
    }

    #[test]
    fn projectile_hit_queues_a_push_and_a_sound() {
        let mut state = playing_state();
        state.projectiles.push(Projectile {
            pos: state.player.pos - Vec2::new(PROJECTILE_SPEED / 2.0, 0.0),
            direction: 1.0,
            spin: 0.0,
        });
        update_projectiles(&mut state, 0.0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.push_forces.len(), 1);
        assert_eq!(state.push_forces[0].direction, 1.0);
        assert!(state
            .drain_events()
            .contains(&GameEvent::PlaySound(Sound::ProjectileHit)));
    }

    #[test]
    fn immune_player_swallows_the_hit_silently() {
        let mut state = playing_state();
        state.is_immune = true;
        state.projectiles.push(Projectile {
            pos: state.player.pos,
            direction: -1.0,
            spin: 0.0,
        });
        update_projectiles(&mut state, 0.0);
        assert!(state.projectiles.is_empty());
        assert!(state.push_forces.is_empty());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn projectiles_cull_past_the_lateral_bound() {
        let mut state = playing_state();
        state.projectiles.push(Projectile {
            pos: Vec2::new(PROJECTILE_LATERAL_BOUND + 0.1, 0.0),
            direction: 1.0,
            spin: 0.0,
        });
        update_projectiles(&mut state, 0.0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn projectile_spawns_respect_unlock_and_interval() {
        let mut state = playing_state();

        // Locked until enough run time has passed
        update_projectiles(&mut state, 100_000.0);
        assert!(state.projectiles.is_empty());

        state.clock.start(0.0);
        state.clock.tick(PROJECTILE_UNLOCK_SECS as f64 * 1000.0);
        update_projectiles(&mut state, 100_000.0);
        assert_eq!(state.projectiles.len(), 1);
        // The new projectile already took its first step this tick
        assert!(
            (state.projectiles[0].pos.x.abs() - (PROJECTILE_SPAWN_X - PROJECTILE_SPEED)).abs()
                < 1e-5
        );

        // Within the interval: no second spawn
        update_projectiles(&mut state, 100_100.0);
        assert_eq!(state.projectiles.len(), 1);

        update_projectiles(&mut state, 100_000.0 + PROJECTILE_SPAWN_INTERVAL_MS + 1.0);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn disabled_projectile_assets_stop_the_pool() {
        let mut state = playing_state();
        state.assets.projectile = false;
        state.clock.start(0.0);
        state.clock.tick(60_000.0);
        update_projectiles(&mut state, 100_000.0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn first_projectile_spawn_opens_the_shield_tutorial() {
        let mut state = playing_state();
        state.tutorial_flags.projectile_shield = false;
        state.clock.start(0.0);
        state.clock.tick(60_000.0);
        update_projectiles(&mut state, 100_000.0);
        assert_eq!(state.mode, GameMode::Paused);
        // The projectile still spawns behind the overlay
        assert_eq!(state.projectiles.len(), 1);
    }
}
