//! Difficulty and scoring curves
//!
//! Pure functions of elapsed run time (and player height for the score).
//! Negative elapsed time from clock skew clamps to zero here rather than at
//! every call site.

use crate::consts::*;

/// Platform descent speed: ramps linearly, capped at `PLATFORM_SPEED_MAX`.
pub fn platform_speed(elapsed_secs: f32) -> f32 {
    let t = elapsed_secs.max(0.0);
    (PLATFORM_SPEED_INITIAL + t * PLATFORM_SPEED_RATE).min(PLATFORM_SPEED_MAX)
}

/// Jump cooldown: shrinks linearly, floored at `JUMP_COOLDOWN_MIN_MS`.
pub fn jump_cooldown_ms(elapsed_secs: f32) -> f32 {
    let t = elapsed_secs.max(0.0);
    (JUMP_COOLDOWN_MAX_MS - t * JUMP_COOLDOWN_DECAY).max(JUMP_COOLDOWN_MIN_MS)
}

/// Platform spawn interval in ticks. Scales inversely with the current speed
/// so platform density per screen height stays roughly constant as the world
/// speeds up.
pub fn spawn_interval_ticks(current_speed: f32) -> f32 {
    let speed = current_speed.max(PLATFORM_SPEED_INITIAL);
    PLATFORM_SPAWN_INTERVAL_TICKS * (PLATFORM_SPEED_INITIAL / speed)
}

/// Run score: survival seconds plus a bonus for height above the origin.
pub fn score(elapsed_secs: f32, player_y: f32) -> u64 {
    let time_score = elapsed_secs.max(0.0).floor() as u64;
    let height_score = player_y.max(0.0).floor() as u64 * HEIGHT_SCORE_MULTIPLIER;
    time_score + height_score
}
