//! Static board geometry
//!
//! Built once from a [`BoardConfig`]: the triangular pin lattice, the side
//! walls and the slot row. Nothing here changes while balls are in play.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boundary::Boundary;
use super::slots::SlotRow;
use crate::config::BoardConfig;
use crate::error::BoardError;

/// A fixed pin in the lattice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub pos: Vec2,
    /// Lattice row, 0 = top
    pub row: u32,
}

/// Complete board geometry (immutable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub config: BoardConfig,
    pub width: f32,
    /// Bottom extent of the board; balls are retired once past it
    pub height: f32,
    /// Row-major, top to bottom, left to right within a row
    pub pins: Vec<Pin>,
    pub boundary: Boundary,
    pub slots: SlotRow,
}

impl Board {
    /// Derive the full board from its configuration
    pub fn new(config: BoardConfig) -> Result<Self, BoardError> {
        config.validate()?;

        let top = config.top_row_pins;
        let bottom = config.bottom_row_pins();
        let spacing = config.pin_spacing;

        let lattice_width = (bottom.max(top) - 1) as f32 * spacing;
        let width = lattice_width * (1.0 + config.side_padding * 2.0);
        let height = config.chute_height + config.rows as f32 * config.row_spacing + config.slot_height;
        let center_x = width / 2.0;

        let mut pins = Vec::with_capacity((top as usize + bottom as usize) * config.rows as usize / 2);
        for row in 0..config.rows {
            let pins_in_row = top + row;
            let row_width = (pins_in_row - 1) as f32 * spacing;
            let start_x = (width - row_width) / 2.0;
            let y = config.chute_height + row as f32 * config.row_spacing;
            for i in 0..pins_in_row {
                pins.push(Pin {
                    pos: Vec2::new(start_x + i as f32 * spacing, y),
                    row,
                });
            }
        }

        let last_row_y = config.chute_height + (config.rows - 1) as f32 * config.row_spacing;
        let chute_half = (top - 1) as f32 * spacing / 2.0 + config.boundary_margin;
        let splay_half = (bottom - 1) as f32 * spacing / 2.0 + config.boundary_margin;
        let boundary = Boundary::new(
            [
                Vec2::new(center_x - chute_half, 0.0),
                Vec2::new(center_x - chute_half, config.chute_height),
                Vec2::new(center_x - splay_half, last_row_y),
            ],
            [
                Vec2::new(center_x + chute_half, 0.0),
                Vec2::new(center_x + chute_half, config.chute_height),
                Vec2::new(center_x + splay_half, last_row_y),
            ],
            height - config.slot_height,
        );

        let slot_width = spacing * config.slot_width_ratio;
        let slots = SlotRow::new(
            (bottom - 1) as usize,
            width,
            slot_width,
            spacing - slot_width,
            last_row_y + config.row_spacing / 2.0,
            config.slot_height,
        );

        log::info!(
            "Board: {} pins in {} rows, {} slots, {}x{}",
            pins.len(),
            config.rows,
            slots.len(),
            width,
            height
        );

        Ok(Self {
            config,
            width,
            height,
            pins,
            boundary,
            slots,
        })
    }

    #[inline]
    pub fn ball_radius(&self) -> f32 {
        self.config.ball_radius
    }

    #[inline]
    pub fn pin_radius(&self) -> f32 {
        self.config.pin_radius
    }

    /// Center distance at which a ball touches a pin
    #[inline]
    pub fn contact_distance(&self) -> f32 {
        self.config.ball_radius + self.config.pin_radius
    }

    /// A ball whose center passes this y has left the board
    #[inline]
    pub fn exit_y(&self) -> f32 {
        self.height + self.config.ball_radius
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Where a new ball is held before release: chute center, one diameter down
    pub fn spawn_point(&self) -> Vec2 {
        let left = self.boundary.left[0].x;
        let right = self.boundary.right[0].x;
        Vec2::new(left + (right - left) / 2.0, self.config.ball_radius * 2.0)
    }

    /// Pins in the given lattice row
    pub fn row_pins(&self, row: u32) -> impl Iterator<Item = &Pin> {
        self.pins.iter().filter(move |p| p.row == row)
    }
}
