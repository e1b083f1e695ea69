//! Ball-pin collision detection and response
//!
//! Pins are scanned in lattice order and the first one in reach wins; there
//! is no nearest-pin search. A contact throws the ball radially away from
//! the pin center (an inelastic "radial kick", not a mirror reflection) and
//! parks it exactly at contact distance so it cannot tunnel on the next tick.

use glam::Vec2;

use super::board::Pin;
use crate::consts::{APEX_EPSILON, APEX_NUDGE};

/// A detected ball-pin contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinContact {
    /// Index into the board's pin list
    pub pin_index: usize,
    pub pin: Vec2,
    /// Unit vector from the pin center toward the ball center
    pub normal: Vec2,
    /// How far the proposed position overlaps the contact distance
    pub penetration: f32,
}

/// First pin (in lattice order) whose center is closer than `reach` to `proposed`.
///
/// `tip_right` picks the side a ball balanced exactly on a pin apex rolls off to.
pub fn find_pin_contact(proposed: Vec2, pins: &[Pin], reach: f32, tip_right: bool) -> Option<PinContact> {
    pins.iter().enumerate().find_map(|(pin_index, pin)| {
        let offset = proposed - pin.pos;
        let dist = offset.length();
        if dist >= reach {
            return None;
        }
        Some(PinContact {
            pin_index,
            pin: pin.pos,
            normal: contact_normal(offset, tip_right),
            penetration: reach - dist,
        })
    })
}

/// Direction away from the pin. A ball sitting on the apex would otherwise
/// be thrown straight up forever, so it is tipped off to one side.
fn contact_normal(offset: Vec2, tip_right: bool) -> Vec2 {
    let mut offset = offset;
    if offset.x.abs() < APEX_EPSILON {
        offset.x = if tip_right { APEX_NUDGE } else { -APEX_NUDGE };
    }
    let angle = offset.y.atan2(offset.x);
    Vec2::new(angle.cos(), angle.sin())
}

/// Resolve a contact: returns the new (position, velocity).
///
/// Speed is the magnitude of the incoming velocity scaled by `damping`; the
/// direction is reset to the contact normal.
pub fn resolve_pin_contact(contact: &PinContact, vel: Vec2, reach: f32, damping: f32) -> (Vec2, Vec2) {
    let speed = vel.length();
    let pos = contact.pin + contact.normal * reach;
    (pos, contact.normal * speed * damping)
}
