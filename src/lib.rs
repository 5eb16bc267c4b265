//! Piggy Jump - an endless vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, entity pools, game modes)
//! - `audio`: Web Audio sound effects (no-op off the web)
//! - `persistence`: String-keyed flag/number storage (LocalStorage on web)
//! - `highscores`: Best score / best survival time records
//! - `settings`: Sound preferences

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::SoundSettings;

/// Game configuration constants
///
/// Distances are world units, velocities are world units per tick at the
/// nominal 60 Hz display rate. Durations that interact with the wall clock
/// (cooldowns, effect windows) are milliseconds.
pub mod consts {
    /// Nominal simulation rate (one tick per animation frame)
    pub const TICK_HZ: f32 = 60.0;

    /// Gravity acceleration per tick (downward)
    pub const GRAVITY: f32 = -0.02;
    /// Horizontal player speed while a direction key is held
    pub const PLAYER_MOVE_SPEED: f32 = 0.1;
    /// Player spawn position (resting on the lowest initial platform)
    pub const PLAYER_SPAWN_Y: f32 = -1.25;
    /// Fallback half-extents used until the model reports its bounds
    pub const PLAYER_DEFAULT_HALF_WIDTH: f32 = 0.5;
    pub const PLAYER_DEFAULT_HALF_HEIGHT: f32 = 0.5;

    /// Jump impulses
    pub const JUMP_FORCE_NORMAL: f32 = 0.4;
    pub const JUMP_FORCE_SUPER: f32 = 0.6;
    /// Jump cooldown shrinks from MAX to MIN as the run goes on
    pub const JUMP_COOLDOWN_MIN_MS: f32 = 300.0;
    pub const JUMP_COOLDOWN_MAX_MS: f32 = 500.0;
    /// Cooldown lost per elapsed second
    pub const JUMP_COOLDOWN_DECAY: f32 = 2.5;

    /// Platform descent speed ramp
    pub const PLATFORM_SPEED_INITIAL: f32 = 0.05;
    pub const PLATFORM_SPEED_MAX: f32 = 0.115;
    /// Speed gained per elapsed second
    pub const PLATFORM_SPEED_RATE: f32 = 0.0005;

    /// Platform box half-extents
    pub const PLATFORM_HALF_WIDTH: f32 = 2.5;
    pub const PLATFORM_HALF_HEIGHT: f32 = 0.25;
    /// Spawn height for procedural platforms
    pub const PLATFORM_SPAWN_Y: f32 = 20.0;
    /// Horizontal spawn spread (uniform in +-SPREAD/2)
    pub const PLATFORM_SPAWN_X_SPREAD: f32 = 8.0;
    /// Base spawn interval in ticks, scaled down as speed ramps up
    pub const PLATFORM_SPAWN_INTERVAL_TICKS: f32 = 100.0;

    /// Side-to-side movers
    pub const MOVING_PLATFORM_CHANCE: f64 = 0.3;
    pub const MOVING_PLATFORM_RANGE: f32 = 6.0;
    pub const MOVING_PLATFORM_SPEED: f32 = 0.05;
    /// Movers only appear after this much run time
    pub const MOVING_PLATFORM_UNLOCK_SECS: f32 = 10.0;

    /// Power-up spawn rolls (independent, non-moving platforms only)
    pub const STAR_SPAWN_CHANCE: f64 = 0.03;
    pub const STAR_Y_OFFSET: f32 = 1.0;
    pub const SHIELD_SPAWN_CHANCE: f64 = 0.03;
    pub const SHIELD_Y_OFFSET: f32 = 1.5;
    /// Effect windows (restart on re-collection, never stack)
    pub const SUPER_JUMP_DURATION_MS: f64 = 10_000.0;
    pub const SHIELD_DURATION_MS: f64 = 15_000.0;

    /// Projectiles unlock independently of moving platforms
    pub const PROJECTILE_UNLOCK_SECS: f32 = 10.0;
    /// Wall-clock interval between projectile spawns
    pub const PROJECTILE_SPAWN_INTERVAL_MS: f64 = 2_000.0;
    pub const PROJECTILE_SPEED: f32 = 0.15;
    /// Spawn edge (left -X travelling right, right +X travelling left)
    pub const PROJECTILE_SPAWN_X: f32 = 12.0;
    /// Vertical spawn band [BAND_MIN, BAND_MIN + BAND_SPAN)
    pub const PROJECTILE_BAND_MIN: f32 = -5.0;
    pub const PROJECTILE_BAND_SPAN: f32 = 15.0;
    /// Projectiles are culled once |x| exceeds this
    pub const PROJECTILE_LATERAL_BOUND: f32 = 25.0;

    /// Lateral push impulse applied on projectile impact
    pub const PUSH_FORCE: f32 = 0.4;
    /// Impact magnitude multiplier
    pub const PUSH_HIT_MULTIPLIER: f32 = 1.5;
    /// Geometric decay per tick
    pub const PUSH_DECAY: f32 = 0.85;
    /// Force lifetime cap in ticks
    pub const PUSH_DURATION_TICKS: u32 = 45;
    /// Horizontal velocity clamp is PUSH_MAX_SPEED * PUSH_HIT_MULTIPLIER
    pub const PUSH_MAX_SPEED: f32 = 0.3;
    /// Forces below this magnitude are dropped
    pub const PUSH_EPSILON: f32 = 1e-3;

    /// Cosmetic spin advanced per tick
    pub const POWER_UP_SPIN_RATE: f32 = 0.02;
    pub const PROJECTILE_SPIN_RATE: f32 = 0.1;

    /// Collection radius for power-ups and projectiles
    pub const PICKUP_RADIUS: f32 = 0.5;
    /// Wider radius that fires the first-encounter tutorial
    pub const TUTORIAL_PROXIMITY_RADIUS: f32 = 1.5;

    /// Entities below this are culled
    pub const CULL_Y: f32 = -20.0;
    /// Default fall limit; the shell overrides this from the viewport height
    pub const DEFAULT_FALL_LIMIT: f32 = -27.0;

    /// Cosmetic day/night flip interval
    pub const BACKGROUND_CHANGE_INTERVAL_SECS: f32 = 60.0;

    /// Post-tutorial countdown
    pub const COUNTDOWN_START: u8 = 3;
    pub const COUNTDOWN_STEP_MS: f64 = 1_000.0;

    /// Score: floor(elapsed secs) + multiplier * floor(max(0, player y))
    pub const HEIGHT_SCORE_MULTIPLIER: u64 = 2;

    /// The ten fixed starting platforms; repositioned (never removed) on reset
    pub const INITIAL_PLATFORM_SLOTS: [(f32, f32); 10] = [
        (0.0, -2.0),
        (-4.0, 2.0),
        (4.0, 2.0),
        (0.0, 6.0),
        (-2.0, 10.0),
        (2.0, 10.0),
        (-3.0, 14.0),
        (3.0, 14.0),
        (-1.0, 19.0),
        (1.0, 19.0),
    ];

    /// Audio defaults
    pub const BGM_VOLUME: f32 = 0.2;
    pub const SFX_VOLUME: f32 = 0.3;
    /// The jump sound plays slightly quieter than other effects
    pub const JUMP_VOLUME_OFFSET: f32 = -0.2;
}
