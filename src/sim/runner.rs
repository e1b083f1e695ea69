//! Frame loop control
//!
//! The host (browser animation frame, native event loop, test) calls
//! `frame()` or `advance()` on every refresh; the runner decides whether a
//! tick happens. `stop()` on teardown is enough to halt the loop cleanly.

use super::state::{SimEvent, Simulation};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Owns a simulation and its start/stop lifecycle
#[derive(Debug, Clone)]
pub struct Runner {
    sim: Simulation,
    running: bool,
    /// Wall-clock time not yet consumed by fixed ticks (seconds)
    accumulator: f32,
}

impl Runner {
    /// Wrap a simulation; the loop starts stopped
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            running: false,
            accumulator: 0.0,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            log::info!("Frame loop started at tick {}", self.sim.time_ticks);
        }
        self.running = true;
    }

    /// Halt the loop. State is kept; `start()` resumes where it left off.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Frame loop stopped at tick {}", self.sim.time_ticks);
        }
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// One display refresh: exactly one tick while running, nothing otherwise
    pub fn frame(&mut self) -> Vec<SimEvent> {
        if !self.running {
            return Vec::new();
        }
        self.sim.tick()
    }

    /// Fold `elapsed` seconds of wall-clock time into fixed 60 Hz ticks.
    ///
    /// For hosts whose refresh rate is not 60 Hz. Long stalls are clamped so
    /// a hidden tab does not replay minutes of physics at once.
    pub fn advance(&mut self, elapsed: f32) -> Vec<SimEvent> {
        if !self.running {
            return Vec::new();
        }
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_DT);

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.sim.tick());
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        events
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    /// Mutable access for between-frame input (drop, shake, reset)
    pub fn sim_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn into_sim(self) -> Simulation {
        self.sim
    }
}
