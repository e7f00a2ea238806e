//! Per-frame simulation advance
//!
//! [`tick`] runs exactly one frame: flipper easing, launch handling,
//! position integration, the collision suite in a fixed order, and the
//! drain check. The physics constants are tuned for the nominal 60 Hz
//! rate; the driver owns the clock and calls this once per step.

use glam::Vec2;
use rand::Rng;

use super::collision::{self, Impact};
use super::state::{Ball, FlipperTarget, GameState};
use super::table::Table;
use crate::consts::*;

/// Input flags for one tick
///
/// The flipper flags are held state sampled from keys/buttons; `launch` is
/// a one-shot trigger the driver clears once a tick has consumed it.
/// Repeating the same held input is idempotent.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left_flipper: bool,
    pub right_flipper: bool,
    pub launch: bool,
}

/// What changed this frame, for the display collaborator
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameEvents {
    pub score_changed: bool,
    pub lives_changed: bool,
    /// The last ball drained and the table started over
    pub game_reset: bool,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, table: &Table) -> FrameEvents {
    let mut events = FrameEvents::default();

    state.time_ticks += 1;

    // Held input maps straight onto the flipper targets, then each paddle
    // eases toward its commanded angle.
    let held = [input.left_flipper, input.right_flipper];
    for (flipper, held) in state.flippers.iter_mut().zip(held) {
        flipper.target = if held {
            FlipperTarget::Up
        } else {
            FlipperTarget::Down
        };
        flipper.ease();
    }

    if input.launch && !state.ball.launched {
        launch(state);
    }

    if state.ball.launched {
        step_physics(state, table, &mut events);

        // Past the bottom edge the ball is gone
        if state.ball.pos.y - state.ball.radius > table.height {
            state.balls_remaining = state.balls_remaining.saturating_sub(1);
            events.lives_changed = true;

            if state.balls_remaining == 0 {
                state.reset_table();
                events.score_changed = true;
                events.game_reset = true;
            } else {
                state.ball.reseat();
            }
        }
    }

    events
}

/// Send the ball off the plunger: near-vertical, with a small randomized
/// speed and angle so launches don't replay the same trajectory.
fn launch(state: &mut GameState) {
    let speed = state.rng.random_range(LAUNCH_SPEED_MIN..LAUNCH_SPEED_MAX);
    let spread = state
        .rng
        .random_range(0.0..LAUNCH_SPREAD_DEG)
        .to_radians();
    state.ball.vel = Vec2::new(speed * spread.sin(), -speed * spread.cos());
    state.ball.launched = true;
}

fn apply(ball: &mut Ball, hit: Impact, scored: &mut u32) {
    ball.pos = hit.pos;
    ball.vel = hit.vel;
    *scored += hit.score;
}

/// One integration and collision pass
///
/// Position moves first; every resolver corrects the already-advanced
/// position. The suite runs in a fixed order - flippers, top-right arc,
/// top-left arc, bottom lanes, bumpers - and simultaneous contacts all
/// apply, compounding.
fn step_physics(state: &mut GameState, table: &Table, events: &mut FrameEvents) {
    let GameState {
        ball,
        flippers,
        rng,
        score,
        ..
    } = state;

    ball.pos += ball.vel;
    ball.vel.y += GRAVITY;

    if let Some(hit) = collision::resolve_walls(ball, table) {
        ball.pos = hit.pos;
        ball.vel = hit.vel;
    }

    let mut scored = 0;

    for flipper in flippers.iter() {
        if let Some(hit) = collision::resolve_flipper(ball, flipper) {
            apply(ball, hit, &mut scored);
        }
    }
    if let Some(hit) = collision::resolve_corner(ball, &table.top_right) {
        apply(ball, hit, &mut scored);
    }
    if let Some(hit) = collision::resolve_corner(ball, &table.top_left) {
        apply(ball, hit, &mut scored);
    }
    for lane in &table.lanes {
        if let Some(hit) = collision::resolve_lane(ball, lane) {
            apply(ball, hit, &mut scored);
        }
    }
    for bumper in &table.bumpers {
        if let Some(hit) = collision::resolve_bumper(ball, bumper, rng) {
            apply(ball, hit, &mut scored);
        }
    }

    if scored > 0 {
        *score += scored;
        events.score_changed = true;
    }
}
