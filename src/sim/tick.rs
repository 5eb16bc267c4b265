//! Per-tick orchestrator and mode state machine
//!
//! One call per animation frame. Only `GameMode::Playing` advances the
//! simulation; the other modes just watch for their transition trigger.
//! The Playing order is fixed: physics, clock and difficulty, the three
//! entity pools, player input, effect expiry, background cycle, fall check.

use super::state::{
    Countdown, GameEvent, GameMode, GameState, JumpForce, Sound, TickInput,
};
use super::{difficulty, physics, pools};
use crate::consts::*;

pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.mode {
        GameMode::Paused => {
            if input.dismiss_overlay {
                begin_countdown(state, input.now_ms);
            }
            return;
        }
        GameMode::Countdown => {
            step_countdown(state, input.now_ms);
            return;
        }
        GameMode::GameOver => {
            if input.restart {
                restart(state);
            }
            return;
        }
        GameMode::Playing => {}
    }

    physics::integrate(&mut state.player);
    physics::apply_push_forces(&mut state.player, &mut state.push_forces);

    state.clock.tick(input.now_ms);
    let elapsed = state.elapsed_secs();
    state.current_platform_speed = difficulty::platform_speed(elapsed);
    state.jump_cooldown_ms = difficulty::jump_cooldown_ms(elapsed);
    state.score = difficulty::score(elapsed, state.player.pos.y);

    // Any pool may open a tutorial, which freezes the rest of the tick
    pools::update_platforms(state);
    if state.mode != GameMode::Playing {
        return;
    }
    pools::update_power_ups(state, input.now_ms);
    if state.mode != GameMode::Playing {
        return;
    }
    pools::update_projectiles(state, input.now_ms);
    if state.mode != GameMode::Playing {
        return;
    }

    apply_input(state, input);
    expire_effects(state, input.now_ms);
    update_background(state);

    if state.player.pos.y < state.config.fall_limit {
        end_run(state);
    }
}

/// Held direction keys shift position directly; the jump key fires when the
/// player is grounded and the cooldown has passed. The first jump arms the
/// run clock.
fn apply_input(state: &mut GameState, input: &TickInput) {
    if input.left {
        state.player.pos.x -= PLAYER_MOVE_SPEED;
    }
    if input.right {
        state.player.pos.x += PLAYER_MOVE_SPEED;
    }

    if input.jump
        && state.is_grounded
        && input.now_ms - state.last_jump_ms >= f64::from(state.jump_cooldown_ms)
    {
        state.clock.start(input.now_ms);
        state.player.vel.y = state.jump_force.impulse();
        state.is_grounded = false;
        state.has_jumped = true;
        state.last_jump_ms = input.now_ms;
        state.push_event(GameEvent::PlaySound(Sound::Jump));
    }
}

/// Check the effect deadlines. Collecting again while active replaced the
/// deadline, so each window ends exactly one duration after its latest
/// grant.
fn expire_effects(state: &mut GameState, now_ms: f64) {
    if state.super_jump_until_ms.is_some_and(|until| now_ms >= until) {
        state.super_jump_until_ms = None;
        state.jump_force = JumpForce::Normal;
    }
    if state.shield_until_ms.is_some_and(|until| now_ms >= until) {
        state.shield_until_ms = None;
        state.is_immune = false;
    }
}

fn update_background(state: &mut GameState) {
    let elapsed = state.elapsed_secs();
    if elapsed - state.last_background_flip_secs > BACKGROUND_CHANGE_INTERVAL_SECS {
        state.last_background_flip_secs = elapsed;
        state.background_is_day = !state.background_is_day;
        state.push_event(GameEvent::BackgroundChanged {
            day: state.background_is_day,
        });
    }
}

fn end_run(state: &mut GameState) {
    state.mode = GameMode::GameOver;
    state.push_event(GameEvent::StopSound(Sound::BgMusic));
    state.push_event(GameEvent::PlaySound(Sound::BgGameOver));
    state.push_event(GameEvent::RunEnded {
        score: state.score,
        time_secs: state.elapsed_secs(),
    });
    log::info!(
        "run ended: score {} after {:.2}s",
        state.score,
        state.elapsed_secs()
    );
}

fn restart(state: &mut GameState) {
    state.reset();
    state.push_event(GameEvent::StopSound(Sound::BgGameOver));
    state.push_event(GameEvent::PlaySound(Sound::BgMusic));
}

fn begin_countdown(state: &mut GameState, now_ms: f64) {
    state.mode = GameMode::Countdown;
    state.countdown = Some(Countdown {
        value: COUNTDOWN_START,
        next_step_ms: now_ms + COUNTDOWN_STEP_MS,
    });
    state.push_event(GameEvent::PlaySound(Sound::Click));
    state.push_event(GameEvent::CountdownTick(COUNTDOWN_START));
}

/// Walk the countdown deadline forward. Reaching zero resumes play and the
/// clock exactly where the pause left it.
fn step_countdown(state: &mut GameState, now_ms: f64) {
    let Some(mut countdown) = state.countdown.take() else {
        state.mode = GameMode::Playing;
        return;
    };

    while countdown.value > 0 && now_ms >= countdown.next_step_ms {
        countdown.value -= 1;
        countdown.next_step_ms += COUNTDOWN_STEP_MS;
        if countdown.value > 0 {
            state.push_event(GameEvent::CountdownTick(countdown.value));
        }
    }

    if countdown.value == 0 {
        state.mode = GameMode::Playing;
        state.clock.resume(now_ms);
        state.push_event(GameEvent::PlaySound(Sound::BgMusic));
    } else {
        state.countdown = Some(countdown);
    }
}
