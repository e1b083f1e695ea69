//! Plinko Board - pin lattice physics with slot scoring
//!
//! Core modules:
//! - `sim`: Deterministic simulation (board geometry, integration, collisions, scoring)
//! - `config`: Data-driven board and physics tuning
//! - `error`: Configuration errors
//! - `web`: WebAssembly facade for a browser renderer

pub mod config;
pub mod error;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{BoardConfig, BoardPreset, PhysicsConfig, SimConfig};
pub use error::{BoardError, ConfigError};
pub use sim::{Ball, Board, Runner, SimEvent, Simulation, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Fixed step used when driving the simulation from wall-clock time (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock gap folded into a single frame (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Pin and ball sizes (simulation pixels)
    pub const PIN_RADIUS: f32 = 5.0;
    pub const BALL_RADIUS: f32 = 10.0;

    /// Downward acceleration, pixels/tick²
    pub const GRAVITY: f32 = 0.1;
    /// Speed kept after a pin contact
    pub const PIN_DAMPING: f32 = 0.6;
    /// Downward speed forced on a ball that lands in a slot while rising
    pub const SETTLE_SPEED: f32 = 2.0;
    /// Slot glow duration (1000 ms at 60 Hz)
    pub const HIGHLIGHT_TICKS: u64 = 60;

    /// Lattice defaults
    pub const TOP_ROW_PINS: u32 = 3;
    pub const PIN_ROWS: u32 = 15;
    /// Upper bound on top-row pins and on row count
    pub const MAX_LATTICE_DIM: u32 = 1000;
    pub const PIN_SPACING: f32 = 40.0;
    pub const ROW_SPACING: f32 = 40.0;
    /// Height of the entry chute (y of the first pin row)
    pub const CHUTE_HEIGHT: f32 = 70.0;
    pub const SLOT_HEIGHT: f32 = 30.0;
    /// Fraction of the lattice width added as padding on each side
    pub const SIDE_PADDING: f32 = 0.2;
    /// Fraction of a pin spacing covered by a slot (the rest is the gap)
    pub const SLOT_WIDTH_RATIO: f32 = 0.8;

    /// Drop force range accepted from the launcher
    pub const MAX_DROP_FORCE: f32 = 15.0;
    /// Shake impulse bounds
    pub const SHAKE_HORIZONTAL: f32 = 4.0;
    pub const SHAKE_VERTICAL: f32 = 2.0;
    pub const SHAKE_MIN_VY: f32 = 0.5;

    /// Horizontal offset below which a ball counts as balanced on a pin apex
    pub const APEX_EPSILON: f32 = 1e-3;
    /// Offset used to tip a balanced ball off the apex
    pub const APEX_NUDGE: f32 = 1.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
