//! Deterministic game simulation
//!
//! Pure state-in, state-out: no rendering, DOM, or audio dependencies. The
//! shell feeds a `TickInput` per animation frame (held keys, one-shot
//! signals, the wall clock) and drains `GameEvent`s afterwards. Runs are
//! reproducible from a seed plus the input/clock sequence.

pub mod clock;
pub mod difficulty;
pub mod physics;
pub mod pools;
pub mod state;
pub mod tick;

pub use clock::Clock;
pub use physics::PushForce;
pub use state::{
    AssetAvailability, GameEvent, GameMode, GameState, JumpForce, Platform, PlatformMotion,
    Player, PowerUp, PowerUpKind, Projectile, SimConfig, Sound, TickInput, TutorialFlags,
    TutorialKind,
};
pub use tick::tick;
