//! Game state and core simulation types
//!
//! Everything the tick mutates lives in one orchestrator-owned aggregate;
//! there is no module-level state. Side effects the shell must perform
//! (sounds, overlays, persisted flags) come out as `GameEvent`s.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::Clock;
use super::physics::PushForce;
use crate::consts::*;

/// Current mode of the game loop. Only `Playing` advances the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Active gameplay
    Playing,
    /// Frozen behind a tutorial overlay
    Paused,
    /// Post-tutorial 3-2-1 before play resumes
    Countdown,
    /// The player fell below the fall limit
    GameOver,
}

/// Jump impulse tier. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpForce {
    #[default]
    Normal,
    Super,
}

impl JumpForce {
    pub fn impulse(self) -> f32 {
        match self {
            JumpForce::Normal => JUMP_FORCE_NORMAL,
            JumpForce::Super => JUMP_FORCE_SUPER,
        }
    }
}

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Grants a super-jump window
    Star,
    /// Grants a projectile-immunity window
    Shield,
}

/// One-time help overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialKind {
    SuperJump,
    MovingPlatform,
    /// Two-page overlay covering projectiles and the shield that counters them
    ProjectileShield,
}

impl TutorialKind {
    /// Persisted flag key. Kept identical to earlier releases so existing
    /// players do not see the overlays again.
    pub fn flag_key(self) -> &'static str {
        match self {
            TutorialKind::SuperJump => "hasSeenSuperJumpTutorial",
            TutorialKind::MovingPlatform => "hasSeenMovingPlatformTutorial",
            TutorialKind::ProjectileShield => "hasSeenBulletShieldTutorial",
        }
    }
}

/// Discrete sounds the shell can play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Jump,
    Star,
    Click,
    ProjectileHit,
    BgMusic,
    BgGameOver,
}

/// Side effects emitted by the tick, drained by the shell afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PlaySound(Sound),
    StopSound(Sound),
    /// Open the given overlay; the shell answers with `TickInput::dismiss_overlay`
    ShowTutorial(TutorialKind),
    /// Persist the has-seen flag (fire-and-forget)
    MarkTutorialSeen(TutorialKind),
    /// Cosmetic day/night flip
    BackgroundChanged { day: bool },
    /// Countdown display update (3, 2, 1)
    CountdownTick(u8),
    /// Terminal report; the shell updates persisted records from it
    RunEnded { score: u64, time_secs: f32 },
}

/// Polled input snapshot plus one-shot signals for a single tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held direction keys
    pub left: bool,
    pub right: bool,
    /// Jump key currently held
    pub jump: bool,
    /// The tutorial overlay was dismissed this frame
    pub dismiss_overlay: bool,
    /// Restart requested from the game-over screen
    pub restart: bool,
    /// Host wall clock in milliseconds
    pub now_ms: f64,
}

/// In-memory snapshot of the persisted one-time tutorial gates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TutorialFlags {
    pub super_jump: bool,
    pub moving_platform: bool,
    pub projectile_shield: bool,
}

impl TutorialFlags {
    pub fn seen(&self, kind: TutorialKind) -> bool {
        match kind {
            TutorialKind::SuperJump => self.super_jump,
            TutorialKind::MovingPlatform => self.moving_platform,
            TutorialKind::ProjectileShield => self.projectile_shield,
        }
    }

    pub fn mark_seen(&mut self, kind: TutorialKind) {
        match kind {
            TutorialKind::SuperJump => self.super_jump = true,
            TutorialKind::MovingPlatform => self.moving_platform = true,
            TutorialKind::ProjectileShield => self.projectile_shield = true,
        }
    }
}

/// Which asset-backed entity kinds may spawn. A failed model load disables
/// the matching pool instead of crashing the loop.
#[derive(Debug, Clone, Copy)]
pub struct AssetAvailability {
    pub star: bool,
    pub shield: bool,
    pub projectile: bool,
}

impl Default for AssetAvailability {
    fn default() -> Self {
        Self {
            star: true,
            shield: true,
            projectile: true,
        }
    }
}

/// Host-supplied simulation parameters.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Falling below this y ends the run. The shell derives it from the
    /// viewport height so taller windows see further down.
    pub fall_limit: f32,
    /// Player half-extents from the loaded model bounds
    pub player_half_width: f32,
    pub player_half_height: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fall_limit: DEFAULT_FALL_LIMIT,
            player_half_width: PLAYER_DEFAULT_HALF_WIDTH,
            player_half_height: PLAYER_DEFAULT_HALF_HEIGHT,
        }
    }
}

/// The piggy. Physics and collisions mutate it; nobody else does.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub half_width: f32,
    pub half_height: f32,
}

impl Player {
    pub fn new(half_width: f32, half_height: f32) -> Self {
        Self {
            pos: Vec2::new(0.0, PLAYER_SPAWN_Y),
            vel: Vec2::ZERO,
            half_width,
            half_height,
        }
    }
}

/// Motion descriptor for side-to-side movers.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformMotion {
    /// -1.0 or +1.0
    pub direction: f32,
    pub speed: f32,
    /// Centre of the patrol range (spawn x)
    pub initial_x: f32,
    pub range: f32,
}

/// A platform box. The ten initial platforms carry their slot index and are
/// repositioned rather than removed on reset; spawned platforms are culled
/// once they fall below `CULL_Y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub pos: Vec2,
    pub motion: Option<PlatformMotion>,
    pub initial_slot: Option<usize>,
}

impl Platform {
    /// A stationary spawned platform.
    pub fn fixed(pos: Vec2) -> Self {
        Self {
            pos,
            motion: None,
            initial_slot: None,
        }
    }

    fn initial(slot: usize) -> Self {
        let (x, y) = INITIAL_PLATFORM_SLOTS[slot];
        Self {
            pos: Vec2::new(x, y),
            motion: None,
            initial_slot: Some(slot),
        }
    }

    pub fn is_initial(&self) -> bool {
        self.initial_slot.is_some()
    }
}

/// A collectible riding the platform flow downward.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    /// Cosmetic spin phase (different axis per kind, the shell decides)
    pub spin: f32,
}

/// A horizontally travelling hazard.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    /// -1.0 (right-to-left) or +1.0 (left-to-right)
    pub direction: f32,
    /// Cosmetic spin phase
    pub spin: f32,
}

/// Countdown progress while in `GameMode::Countdown`.
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    pub value: u8,
    pub next_step_ms: f64,
}

/// Complete simulation state, owned by the orchestrator.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub mode: GameMode,
    pub clock: Clock,
    pub score: u64,

    pub has_jumped: bool,
    pub is_grounded: bool,
    pub jump_force: JumpForce,
    /// Derived each tick from the difficulty curves
    pub current_platform_speed: f32,
    pub jump_cooldown_ms: f32,
    pub last_jump_ms: f64,

    /// Tick counter toward the next platform spawn
    pub platform_spawn_ticks: f32,
    pub last_projectile_spawn_ms: f64,

    /// Effect deadlines; replacing one overwrites the previous deadline
    pub super_jump_until_ms: Option<f64>,
    pub shield_until_ms: Option<f64>,
    pub is_immune: bool,

    pub countdown: Option<Countdown>,

    pub background_is_day: bool,
    pub last_background_flip_secs: f32,

    pub player: Player,
    pub platforms: Vec<Platform>,
    pub power_ups: Vec<PowerUp>,
    pub projectiles: Vec<Projectile>,
    pub push_forces: Vec<PushForce>,

    pub tutorial_flags: TutorialFlags,
    pub assets: AssetAvailability,
    pub config: SimConfig,

    events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state. The config carries the model-derived player bounds, so
    /// the shell only constructs this once assets are ready.
    pub fn new(seed: u64, config: SimConfig, tutorial_flags: TutorialFlags) -> Self {
        let platforms = (0..INITIAL_PLATFORM_SLOTS.len())
            .map(Platform::initial)
            .collect();

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode: GameMode::Playing,
            clock: Clock::new(),
            score: 0,
            has_jumped: false,
            is_grounded: true,
            jump_force: JumpForce::Normal,
            current_platform_speed: PLATFORM_SPEED_INITIAL,
            jump_cooldown_ms: JUMP_COOLDOWN_MAX_MS,
            last_jump_ms: 0.0,
            platform_spawn_ticks: 0.0,
            last_projectile_spawn_ms: 0.0,
            super_jump_until_ms: None,
            shield_until_ms: None,
            is_immune: false,
            countdown: None,
            background_is_day: false,
            last_background_flip_secs: 0.0,
            player: Player::new(config.player_half_width, config.player_half_height),
            platforms,
            power_ups: Vec::new(),
            projectiles: Vec::new(),
            push_forces: Vec::new(),
            tutorial_flags,
            assets: AssetAvailability::default(),
            config,
            events: Vec::new(),
        }
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.clock.elapsed_secs()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand the accumulated side effects to the shell.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fire a one-time tutorial: mark it seen (in memory now, persisted by
    /// the shell), open the overlay, and freeze the loop and clock.
    pub fn open_tutorial(&mut self, kind: TutorialKind) {
        debug_assert!(!self.tutorial_flags.seen(kind));
        self.tutorial_flags.mark_seen(kind);
        self.mode = GameMode::Paused;
        self.clock.pause();
        self.push_event(GameEvent::MarkTutorialSeen(kind));
        self.push_event(GameEvent::ShowTutorial(kind));
        log::debug!("tutorial opened: {kind:?}");
    }

    /// Grant (or re-grant) the super-jump window. A pending deadline is
    /// replaced, never extended.
    pub fn activate_super_jump(&mut self, now_ms: f64) {
        self.jump_force = JumpForce::Super;
        self.super_jump_until_ms = Some(now_ms + SUPER_JUMP_DURATION_MS);
    }

    /// Grant (or re-grant) immunity. Same replace-not-stack rule.
    pub fn activate_shield(&mut self, now_ms: f64) {
        self.is_immune = true;
        self.shield_until_ms = Some(now_ms + SHIELD_DURATION_MS);
    }

    /// Full reset back to a fresh run. Tutorial flags survive (they are
    /// process-lifetime gates) and so do persisted records, which live
    /// outside the simulation entirely.
    pub fn reset(&mut self) {
        self.mode = GameMode::Playing;
        self.clock.reset();
        self.score = 0;
        self.has_jumped = false;
        self.is_grounded = true;
        self.jump_force = JumpForce::Normal;
        self.current_platform_speed = PLATFORM_SPEED_INITIAL;
        self.jump_cooldown_ms = JUMP_COOLDOWN_MAX_MS;
        self.last_jump_ms = 0.0;
        self.platform_spawn_ticks = 0.0;
        self.last_projectile_spawn_ms = 0.0;
        self.super_jump_until_ms = None;
        self.shield_until_ms = None;
        self.is_immune = false;
        self.countdown = None;
        self.background_is_day = false;
        self.last_background_flip_secs = 0.0;

        self.player = Player::new(self.config.player_half_width, self.config.player_half_height);

        // Spawned platforms go away; the initial ten snap back to their slots
        self.platforms.retain(Platform::is_initial);
        for platform in &mut self.platforms {
            if let Some(slot) = platform.initial_slot {
                let (x, y) = INITIAL_PLATFORM_SLOTS[slot];
                platform.pos = Vec2::new(x, y);
                platform.motion = None;
            }
        }

        self.power_ups.clear();
        self.projectiles.clear();
        self.push_forces.clear();
        self.events.clear();
    }
}
