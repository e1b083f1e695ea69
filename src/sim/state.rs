//! Simulation state and core entity types
//!
//! The ball store, slot highlights and the seeded RNG all live on
//! [`Simulation`]. External input (drop, shake, reset) is applied between
//! ticks through its methods; only the tick driver touches balls mid-frame.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::snapshot::Snapshot;
use crate::config::{PhysicsConfig, SimConfig};
use crate::consts::*;
use crate::error::BoardError;

/// A ball in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Cleared once the ball drops past the bottom of the board
    pub active: bool,
    /// Set exactly once, when the ball lands over a slot
    pub scored: bool,
    /// Slot the ball scored in (fixed once set)
    pub slot: Option<usize>,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            active: true,
            scored: false,
            slot: None,
        }
    }

    /// Add a random shake impulse (no-op for retired balls)
    pub fn shake<R: Rng>(&mut self, rng: &mut R) {
        if !self.active {
            return;
        }
        self.vel.x += (rng.random::<f32>() - 0.5) * SHAKE_HORIZONTAL;
        self.vel.y = (self.vel.y + rng.random::<f32>() * SHAKE_VERTICAL).max(SHAKE_MIN_VY);
    }
}

/// Shake every ball in `balls`; retired ones are skipped by [`Ball::shake`]
pub fn shake_balls<R: Rng>(balls: &mut [Ball], rng: &mut R) {
    for ball in balls.iter_mut() {
        ball.shake(rng);
    }
}

/// Events raised by a tick, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEvent {
    /// A ball landed over a slot
    Scored {
        ball_id: u32,
        slot: usize,
        multiplier: f32,
    },
    /// A ball left the board and was removed from the store
    Retired { ball_id: u32, scored: bool },
    /// A slot's glow ran out
    HighlightExpired { slot: usize },
}

/// Per-slot glow state: the tick at which each slot stops glowing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Highlights {
    expires_at: Vec<Option<u64>>,
}

impl Highlights {
    pub fn new(slot_count: usize) -> Self {
        Self {
            expires_at: vec![None; slot_count],
        }
    }

    /// Light `slot` until tick `until` (extends an existing glow)
    pub fn light(&mut self, slot: usize, until: u64) {
        if let Some(expiry) = self.expires_at.get_mut(slot) {
            *expiry = Some(expiry.map_or(until, |current| current.max(until)));
        }
    }

    pub fn is_lit(&self, slot: usize) -> bool {
        self.expires_at.get(slot).is_some_and(|e| e.is_some())
    }

    pub fn expiry(&self, slot: usize) -> Option<u64> {
        self.expires_at.get(slot).copied().flatten()
    }

    /// Turn off every glow due at or before `now`; returns the slots cleared
    pub fn expire(&mut self, now: u64) -> Vec<usize> {
        let mut cleared = Vec::new();
        for (slot, expiry) in self.expires_at.iter_mut().enumerate() {
            if expiry.is_some_and(|until| until <= now) {
                *expiry = None;
                cleared.push(slot);
            }
        }
        cleared
    }

    pub fn clear(&mut self) {
        self.expires_at.iter_mut().for_each(|e| *e = None);
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    pub board: Board,
    pub physics: PhysicsConfig,
    /// Balls in flight, in drop order
    pub balls: Vec<Ball>,
    pub highlights: Highlights,
    /// Ticks run so far
    pub time_ticks: u64,
    seed: u64,
    rng: Pcg32,
    next_id: u32,
}

impl Simulation {
    /// Build a simulation from a validated config
    pub fn new(config: SimConfig) -> Result<Self, BoardError> {
        config.physics.validate()?;
        let board = Board::new(config.board)?;
        log::info!("Simulation seeded with {}", config.seed);
        Ok(Self {
            highlights: Highlights::new(board.slot_count()),
            board,
            physics: config.physics,
            balls: Vec::new(),
            time_ticks: 0,
            seed: config.seed,
            rng: Pcg32::seed_from_u64(config.seed),
            next_id: 1,
        })
    }

    /// Classic board with default physics
    pub fn with_seed(seed: u64) -> Result<Self, BoardError> {
        Self::new(SimConfig {
            seed,
            ..SimConfig::default()
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        // Id 0 is never handed out, even after wrapping
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    /// Add a ball with an explicit starting state. Returns its id.
    ///
    /// Positions outside the chute are accepted; the walls pull them back in
    /// on the next tick.
    pub fn drop_ball(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_ball_id();
        self.balls.push(Ball::new(id, pos, vel));
        log::debug!("Ball {} dropped at ({:.1}, {:.1})", id, pos.x, pos.y);
        id
    }

    /// Drop a ball with a launch force in `[0, MAX_DROP_FORCE]`.
    ///
    /// Downward speed is half the force; horizontal speed is a random share
    /// of it in either direction.
    pub fn drop_with_force(&mut self, pos: Vec2, force: f32) -> u32 {
        let force = if force.is_nan() { 0.0 } else { force.clamp(0.0, MAX_DROP_FORCE) };
        let jitter = self.rng.random::<f32>() - 0.5;
        let vel = Vec2::new(jitter * force * 0.5, force * 0.5);
        self.drop_ball(pos, vel)
    }

    /// Shake the board: random impulse on every active ball
    pub fn shake(&mut self) {
        shake_balls(&mut self.balls, &mut self.rng);
        log::debug!("Board shaken ({} balls)", self.balls.len());
    }

    /// Remove every ball and clear all highlights
    pub fn reset(&mut self) {
        let dropped = self.balls.len();
        self.balls.clear();
        self.highlights.clear();
        log::info!("Board reset ({} balls removed)", dropped);
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    /// Run one tick of the simulation
    pub fn tick(&mut self) -> Vec<SimEvent> {
        super::tick::tick(self)
    }

    /// Renderer view of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
