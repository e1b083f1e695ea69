//! Deterministic simulation module
//!
//! All gameplay physics lives here. This module must be pure and deterministic:
//! - One fixed tick per frame
//! - Seeded RNG only (drop jitter, shake)
//! - Stable iteration order (ball insertion order, lattice order)
//! - No rendering or platform dependencies

pub mod board;
pub mod boundary;
pub mod collision;
pub mod runner;
pub mod slots;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use board::{Board, Pin};
pub use boundary::Boundary;
pub use collision::{PinContact, find_pin_contact, resolve_pin_contact};
pub use runner::Runner;
pub use slots::{Slot, SlotColor, SlotRow, multiplier_for};
pub use snapshot::{BallView, SlotView, Snapshot};
pub use state::{Ball, Highlights, SimEvent, Simulation, shake_balls};
pub use tick::{ScoreHit, Step, integrate, tick};
