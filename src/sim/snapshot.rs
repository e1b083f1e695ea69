//! Read-only view of the simulation for a renderer
//!
//! Captured after each tick. Owns its data so it can be serialized and
//! shipped across the wasm boundary.

use glam::Vec2;
use serde::Serialize;

use super::state::Simulation;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotView {
    pub index: usize,
    pub multiplier: f32,
    pub color: &'static str,
    /// Top-left corner of the slot rectangle
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub width: f32,
    pub height: f32,
    pub pin_radius: f32,
    pub pins: Vec<Vec2>,
    pub left_wall: [Vec2; 3],
    pub right_wall: [Vec2; 3],
    pub slots: Vec<SlotView>,
    pub balls: Vec<BallView>,
}

impl Snapshot {
    pub fn capture(sim: &Simulation) -> Self {
        let board = &sim.board;
        let row = &board.slots;

        let slots = row
            .slots
            .iter()
            .map(|slot| SlotView {
                index: slot.index,
                multiplier: slot.multiplier,
                color: slot.color.hex(),
                x: row.slot_x(slot.index),
                y: row.top,
                width: row.slot_width,
                height: row.height,
                highlighted: sim.highlights.is_lit(slot.index),
            })
            .collect();

        let balls = sim
            .balls
            .iter()
            .filter(|b| b.active)
            .map(|b| BallView {
                id: b.id,
                pos: b.pos,
                radius: board.ball_radius(),
            })
            .collect();

        Self {
            tick: sim.time_ticks,
            width: board.width,
            height: board.height,
            pin_radius: board.pin_radius(),
            pins: board.pins.iter().map(|p| p.pos).collect(),
            left_wall: board.boundary.left,
            right_wall: board.boundary.right,
            slots,
            balls,
        }
    }

    /// JSON form for a web renderer
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
