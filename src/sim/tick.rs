//! Per-tick integration and the tick driver
//!
//! `integrate` advances one ball by one tick and hands back the updated
//! record; `tick` runs it over the whole store and retires balls that have
//! left the board.

use glam::Vec2;

use super::board::Board;
use super::collision::{find_pin_contact, resolve_pin_contact};
use super::state::{Ball, SimEvent, Simulation};
use crate::config::PhysicsConfig;

/// A ball landing over a slot during integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreHit {
    pub slot: usize,
    pub multiplier: f32,
}

/// Result of integrating one ball for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub ball: Ball,
    /// Set on the one tick the ball scores
    pub score: Option<ScoreHit>,
}

/// Advance a single ball by one tick.
///
/// Gravity first, then the proposed move is checked against the pins. A pin
/// contact settles the ball for this tick outright (walls and slots are not
/// consulted). Otherwise the walls commit the move, the slot band is checked,
/// and the ball is retired once it falls past the bottom of the board.
pub fn integrate(ball: Ball, board: &Board, physics: &PhysicsConfig) -> Step {
    let mut ball = ball;
    if !ball.active {
        return Step { ball, score: None };
    }
    // Already past the bottom: retire in place
    if ball.pos.y > board.exit_y() {
        ball.active = false;
        return Step { ball, score: None };
    }

    ball.vel.y += physics.gravity;
    let proposed = ball.pos + ball.vel;

    let reach = board.contact_distance();
    if let Some(contact) = find_pin_contact(proposed, &board.pins, reach, ball.id % 2 == 0) {
        let (pos, vel) = resolve_pin_contact(&contact, ball.vel, reach, physics.pin_damping);
        log::trace!(
            "Ball {} hit pin {} (row {}), speed {:.2}",
            ball.id,
            contact.pin_index,
            board.pins[contact.pin_index].row,
            vel.length()
        );
        ball.pos = pos;
        ball.vel = vel;
        return Step { ball, score: None };
    }

    let (pos, vel) = board
        .boundary
        .contain(proposed, ball.vel, board.ball_radius());
    ball.pos = pos;
    ball.vel = vel;

    let score = check_slot(&mut ball, board, physics);

    if ball.pos.y > board.exit_y() {
        ball.active = false;
    }

    Step { ball, score }
}

/// Score a ball that has just landed over a slot.
///
/// Balls over a gap are left alone and checked again next tick while they
/// are still in the band.
fn check_slot(ball: &mut Ball, board: &Board, physics: &PhysicsConfig) -> Option<ScoreHit> {
    if ball.scored || !board.slots.in_band(ball.pos.y) {
        return None;
    }
    let index = board.slots.locate(ball.pos.x)?;
    let slot = board.slots.get(index)?;

    ball.pos.x = board.slots.center_x(index);
    ball.vel = Vec2::new(
        0.0,
        if ball.vel.y > 0.0 {
            ball.vel.y
        } else {
            physics.settle_speed
        },
    );
    ball.scored = true;
    ball.slot = Some(index);

    Some(ScoreHit {
        slot: index,
        multiplier: slot.multiplier,
    })
}

/// Advance the whole simulation by one tick
pub fn tick(sim: &mut Simulation) -> Vec<SimEvent> {
    sim.time_ticks += 1;
    let now = sim.time_ticks;

    let mut events: Vec<SimEvent> = sim
        .highlights
        .expire(now)
        .into_iter()
        .map(|slot| SimEvent::HighlightExpired { slot })
        .collect();

    let balls = std::mem::take(&mut sim.balls);
    let mut remaining = Vec::with_capacity(balls.len());

    for ball in balls {
        let step = integrate(ball, &sim.board, &sim.physics);

        if let Some(hit) = step.score {
            sim.highlights.light(hit.slot, now + sim.physics.highlight_ticks);
            log::debug!(
                "Ball {} scored in slot {} ({}x)",
                step.ball.id,
                hit.slot,
                hit.multiplier
            );
            events.push(SimEvent::Scored {
                ball_id: step.ball.id,
                slot: hit.slot,
                multiplier: hit.multiplier,
            });
        }

        if step.ball.active {
            remaining.push(step.ball);
        } else {
            log::debug!("Ball {} retired (scored: {})", step.ball.id, step.ball.scored);
            events.push(SimEvent::Retired {
                ball_id: step.ball.id,
                scored: step.ball.scored,
            });
        }
    }

    sim.balls = remaining;
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;

    fn board() -> Board {
        Board::new(BoardConfig::default()).unwrap()
    }

    #[test]
    fn test_inactive_ball_is_untouched() {
        let board = board();
        let mut ball = Ball::new(1, Vec2::new(448.0, 20.0), Vec2::new(1.0, 1.0));
        ball.active = false;
        let step = integrate(ball, &board, &PhysicsConfig::default());
        assert_eq!(step.ball, ball);
        assert!(step.score.is_none());
    }

    #[test]
    fn test_free_fall_applies_gravity() {
        let board = board();
        let ball = Ball::new(1, Vec2::new(430.0, 20.0), Vec2::ZERO);
        let step = integrate(ball, &board, &PhysicsConfig::default());
        assert!((step.ball.vel.y - 0.1).abs() < 1e-6);
        assert!((step.ball.pos.y - 20.1).abs() < 1e-5);
        assert_eq!(step.ball.pos.x, 430.0);
    }

    #[test]
    fn test_pin_contact_skips_walls_and_slots() {
        let board = board();
        let pin = board.pins[0].pos;
        // Falling onto the left side of the first pin
        let ball = Ball::new(1, pin + Vec2::new(-6.0, -14.0), Vec2::new(0.0, 2.0));
        let step = integrate(ball, &board, &PhysicsConfig::default());
        assert!((step.ball.pos.distance(pin) - board.contact_distance()).abs() < 1e-3);
        assert!(step.ball.vel.x < 0.0);
        assert!(step.ball.active);
    }

    #[test]
    fn test_wall_stops_outward_motion() {
        let board = board();
        let left = board.boundary.left[0].x;
        let ball = Ball::new(1, Vec2::new(left + 3.0, 20.0), Vec2::new(-5.0, 0.0));
        let step = integrate(ball, &board, &PhysicsConfig::default());
        assert_eq!(step.ball.vel.x, 0.0);
        assert_eq!(step.ball.pos.x, left + board.ball_radius());
    }

    #[test]
    fn test_scoring_snaps_to_slot_center() {
        let board = board();
        let slots = &board.slots;
        // Just above the band, a little left of slot 4's center, drifting
        let start = Vec2::new(slots.center_x(4) - 3.0, slots.top - 1.5);
        let ball = Ball::new(1, start, Vec2::new(0.5, 1.9));
        let step = integrate(ball, &board, &PhysicsConfig::default());

        let hit = step.score.expect("ball should score");
        assert_eq!(hit.slot, 4);
        assert_eq!(hit.multiplier, slots.slots[4].multiplier);
        assert_eq!(step.ball.pos.x, slots.center_x(4));
        assert_eq!(step.ball.vel.x, 0.0);
        assert!((step.ball.vel.y - 2.0).abs() < 1e-5);
        assert!(step.ball.scored);
        assert_eq!(step.ball.slot, Some(4));
    }

    #[test]
    fn test_rising_ball_is_pushed_down_on_score() {
        let board = board();
        let slots = &board.slots;
        let ball = Ball::new(1, Vec2::new(slots.center_x(2), slots.top + 10.0), Vec2::new(0.0, -1.0));
        let step = integrate(ball, &board, &PhysicsConfig::default());
        assert!(step.score.is_some());
        assert_eq!(step.ball.vel.y, PhysicsConfig::default().settle_speed);
    }

    #[test]
    fn test_scored_ball_never_rescored() {
        let board = board();
        let slots = &board.slots;
        let mut ball = Ball::new(1, Vec2::new(slots.center_x(2), slots.top + 1.0), Vec2::new(0.0, 1.0));
        ball.scored = true;
        ball.slot = Some(2);
        // Move it over a different slot: still no second score
        ball.pos.x = slots.center_x(6);
        let step = integrate(ball, &board, &PhysicsConfig::default());
        assert!(step.score.is_none());
        assert_eq!(step.ball.slot, Some(2));
    }

    #[test]
    fn test_ball_over_gap_does_not_score() {
        let board = board();
        let slots = &board.slots;
        let gap_x = slots.slot_x(5) + slots.slot_width + slots.gap / 2.0;
        let ball = Ball::new(1, Vec2::new(gap_x, slots.top + 2.0), Vec2::new(0.0, 1.0));
        let step = integrate(ball, &board, &PhysicsConfig::default());
        assert!(step.score.is_none());
        assert!(!step.ball.scored);
    }

    #[test]
    fn test_retires_past_bottom() {
        let board = board();
        let ball = Ball::new(1, Vec2::new(100.0, board.exit_y() - 0.5), Vec2::new(0.0, 1.0));
        let step = integrate(ball, &board, &PhysicsConfig::default());
        assert!(!step.ball.active);
    }

    #[test]
    fn test_ball_below_board_retires_without_moving() {
        let board = board();
        let start = Vec2::new(300.0, board.exit_y() + 5.0);
        let ball = Ball::new(1, start, Vec2::new(2.0, -3.0));
        let step = integrate(ball, &board, &PhysicsConfig::default());
        assert!(!step.ball.active);
        assert_eq!(step.ball.pos, start);
        assert_eq!(step.ball.vel, Vec2::new(2.0, -3.0));
        assert!(step.score.is_none());
    }

    #[test]
    fn test_tick_retires_and_reports() {
        let mut sim = Simulation::with_seed(1).unwrap();
        let exit = sim.board.exit_y();
        let leaving = sim.drop_ball(Vec2::new(100.0, exit - 0.5), Vec2::new(0.0, 1.0));
        let staying = sim.drop_ball(sim.board.spawn_point(), Vec2::ZERO);

        let events = sim.tick();
        assert_eq!(
            events,
            vec![SimEvent::Retired {
                ball_id: leaving,
                scored: false
            }]
        );
        assert_eq!(sim.balls.len(), 1);
        assert_eq!(sim.balls[0].id, staying);
        assert_eq!(sim.time_ticks, 1);
    }

    #[test]
    fn test_tick_lights_and_expires_slot() {
        let mut sim = Simulation::with_seed(1).unwrap();
        let slots = sim.board.slots.clone();
        let id = sim.drop_ball(Vec2::new(slots.center_x(3), slots.top + 1.0), Vec2::new(0.0, 1.0));

        let events = sim.tick();
        assert!(matches!(events[0], SimEvent::Scored { ball_id, slot: 3, .. } if ball_id == id));
        assert!(sim.highlights.is_lit(3));

        let ticks = sim.physics.highlight_ticks;
        let mut expired_at = None;
        for _ in 0..ticks {
            let events = sim.tick();
            if events.contains(&SimEvent::HighlightExpired { slot: 3 }) {
                expired_at = Some(sim.time_ticks);
            }
        }
        assert_eq!(expired_at, Some(1 + ticks));
        assert!(!sim.highlights.is_lit(3));
    }

    #[test]
    fn test_tick_preserves_drop_order() {
        let mut sim = Simulation::with_seed(1).unwrap();
        let spawn = sim.board.spawn_point();
        let ids: Vec<_> = (0..5)
            .map(|i| sim.drop_ball(spawn + Vec2::new(i as f32 * 10.0 - 20.0, 0.0), Vec2::ZERO))
            .collect();
        sim.tick();
        let after: Vec<_> = sim.balls.iter().map(|b| b.id).collect();
        assert_eq!(after, ids);
    }
}
