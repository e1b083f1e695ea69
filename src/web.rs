//! WebAssembly facade
//!
//! A browser renderer owns the animation frame loop and calls `frame()` once
//! per refresh. Events and snapshots cross the boundary as JSON strings.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::config::{BoardPreset, SimConfig};
use crate::sim::{Runner, Simulation};

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // Already initialised when a second engine is created on the page
    let _ = console_log::init_with_level(log::Level::Info);
}

fn engine(config: SimConfig) -> Result<PlinkoEngine, JsValue> {
    let sim = Simulation::new(config).map_err(to_js)?;
    Ok(PlinkoEngine {
        runner: Runner::new(sim),
    })
}

#[wasm_bindgen]
pub struct PlinkoEngine {
    runner: Runner,
}

#[wasm_bindgen]
impl PlinkoEngine {
    /// Classic board. Seeded from the clock when no seed is given.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>) -> Result<PlinkoEngine, JsValue> {
        init_logging();
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        engine(SimConfig::from_preset(BoardPreset::Classic, seed))
    }

    /// Build from a JSON `SimConfig`
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<PlinkoEngine, JsValue> {
        init_logging();
        engine(SimConfig::from_json(json).map_err(to_js)?)
    }

    /// Build from a preset name ("compact", "classic", "tall")
    #[wasm_bindgen(js_name = fromPreset)]
    pub fn from_preset(name: &str, seed: Option<f64>) -> Result<PlinkoEngine, JsValue> {
        init_logging();
        let preset = BoardPreset::from_str(name).ok_or_else(|| to_js(format!("unknown preset: {name}")))?;
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        engine(SimConfig::from_preset(preset, seed))
    }

    #[wasm_bindgen(js_name = dropBall)]
    pub fn drop_ball(&mut self, x: f32, y: f32, vx: f32, vy: f32) -> u32 {
        self.runner
            .sim_mut()
            .drop_ball(Vec2::new(x, y), Vec2::new(vx, vy))
    }

    #[wasm_bindgen(js_name = dropWithForce)]
    pub fn drop_with_force(&mut self, x: f32, y: f32, force: f32) -> u32 {
        self.runner.sim_mut().drop_with_force(Vec2::new(x, y), force)
    }

    /// Spawn point as `[x, y]`
    #[wasm_bindgen(js_name = spawnPoint)]
    pub fn spawn_point(&self) -> Vec<f32> {
        let p = self.runner.sim().board.spawn_point();
        vec![p.x, p.y]
    }

    pub fn shake(&mut self) {
        self.runner.sim_mut().shake();
    }

    pub fn reset(&mut self) {
        self.runner.sim_mut().reset();
    }

    pub fn start(&mut self) {
        self.runner.start();
    }

    pub fn stop(&mut self) {
        self.runner.stop();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.runner.is_running()
    }

    /// One tick; returns the tick's events as a JSON array
    pub fn frame(&mut self) -> Result<String, JsValue> {
        let events = self.runner.frame();
        serde_json::to_string(&events).map_err(to_js)
    }

    /// Fixed-step catch-up for `elapsed` seconds; returns events as JSON
    pub fn advance(&mut self, elapsed: f32) -> Result<String, JsValue> {
        let events = self.runner.advance(elapsed);
        serde_json::to_string(&events).map_err(to_js)
    }

    /// Current board and ball state as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.runner.sim().snapshot().to_json().map_err(to_js)
    }

    pub fn seed(&self) -> f64 {
        self.runner.sim().seed() as f64
    }
}
