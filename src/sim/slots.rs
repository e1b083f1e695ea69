//! Scoring slots along the bottom of the board
//!
//! One slot per gap between adjacent bottom-row pins. Slots are laid out at
//! a fixed pitch (slot width + decorative gap), centered on the board, and
//! pay more the closer they sit to either edge.

use serde::{Deserialize, Serialize};

/// Payout tiers as (max normalized distance from the nearest edge, multiplier, color)
const TIERS: [(f32, f32, SlotColor); 6] = [
    (0.1, 20.0, SlotColor::Red),
    (0.25, 10.0, SlotColor::Orange),
    (0.35, 5.0, SlotColor::Orange),
    (0.4, 3.0, SlotColor::Yellow),
    (0.45, 2.0, SlotColor::Yellow),
    (0.475, 1.5, SlotColor::Yellow),
];

/// Center slots pay the stake back
const BASE_MULTIPLIER: f32 = 1.0;

/// Slot fill colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotColor {
    Red,
    Orange,
    Yellow,
}

impl SlotColor {
    pub fn hex(&self) -> &'static str {
        match self {
            SlotColor::Red => "#e74c3c",
            SlotColor::Orange => "#e67e22",
            SlotColor::Yellow => "#f1c40f",
        }
    }
}

/// A scoring slot definition (immutable)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub index: usize,
    pub multiplier: f32,
    pub color: SlotColor,
}

/// Multiplier and color for slot `index` of `count`.
///
/// Tiers are chosen by distance from the nearer edge, so slot `i` and slot
/// `count - 1 - i` always agree.
pub fn multiplier_for(index: usize, count: usize) -> (f32, SlotColor) {
    if count < 2 {
        return (BASE_MULTIPLIER, SlotColor::Yellow);
    }
    let last = count - 1;
    let edge = index.min(last.saturating_sub(index)) as f32 / last as f32;

    TIERS
        .iter()
        .find(|(max_edge, _, _)| edge <= *max_edge)
        .map(|&(_, multiplier, color)| (multiplier, color))
        .unwrap_or((BASE_MULTIPLIER, SlotColor::Yellow))
}

/// The row of slots and the band in which balls are scored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRow {
    /// Left edge of slot 0
    pub start_x: f32,
    pub slot_width: f32,
    /// Dead space between adjacent slots
    pub gap: f32,
    /// Top of the scoring band
    pub top: f32,
    /// Height of the scoring band
    pub height: f32,
    pub slots: Vec<Slot>,
}

impl SlotRow {
    /// Lay out `count` slots centered in a board of the given width
    pub fn new(count: usize, board_width: f32, slot_width: f32, gap: f32, top: f32, height: f32) -> Self {
        let total = count as f32 * slot_width + count.saturating_sub(1) as f32 * gap;
        let slots = (0..count)
            .map(|index| {
                let (multiplier, color) = multiplier_for(index, count);
                Slot {
                    index,
                    multiplier,
                    color,
                }
            })
            .collect();

        Self {
            start_x: (board_width - total) / 2.0,
            slot_width,
            gap,
            top,
            height,
            slots,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Distance from one slot's left edge to the next
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.slot_width + self.gap
    }

    /// Left edge of slot `index`
    pub fn slot_x(&self, index: usize) -> f32 {
        self.start_x + index as f32 * self.pitch()
    }

    /// Horizontal center of slot `index`
    pub fn center_x(&self, index: usize) -> f32 {
        self.slot_x(index) + self.slot_width / 2.0
    }

    /// Bottom of the scoring band
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Whether `y` lies in the scoring band (inclusive at both ends)
    #[inline]
    pub fn in_band(&self, y: f32) -> bool {
        y >= self.top && y <= self.bottom()
    }

    /// Slot under horizontal position `x`, or `None` over a gap or off the row.
    ///
    /// A ball exactly on a slot's right edge still counts as inside it.
    pub fn locate(&self, x: f32) -> Option<usize> {
        let relative = x - self.start_x;
        let cell = (relative / self.pitch()).floor();
        if cell < 0.0 || cell >= self.len() as f32 {
            return None;
        }
        let offset = relative - cell * self.pitch();
        if offset <= self.slot_width {
            Some(cell as usize)
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }
}
