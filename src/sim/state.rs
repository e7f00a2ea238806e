//! Game state and core simulation types
//!
//! Everything that changes during play lives here: the ball, the two
//! flippers, and the score/life counters. The whole aggregate is owned and
//! passed explicitly - no globals - and serializes as one snapshot.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which side of the table a flipper pivots on. The pivot sits at the
/// outer end; the tip points toward the drain gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipperSide {
    Left,
    Right,
}

/// Commanded resting state - distinct from the current (easing) angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipperTarget {
    Up,
    Down,
}

/// The ball. Created once at startup and reseated (never replaced) when it
/// drains; its radius is fixed for the life of the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// False while the ball waits at the plunger seat
    pub launched: bool,
}

impl Ball {
    /// New ball waiting at the plunger seat
    pub fn at_rest() -> Self {
        Self {
            pos: Vec2::new(BALL_REST_X, BALL_REST_Y),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            launched: false,
        }
    }

    /// Put the ball back on the plunger seat after a drain
    pub fn reseat(&mut self) {
        self.pos = Vec2::new(BALL_REST_X, BALL_REST_Y);
        self.vel = Vec2::ZERO;
        self.launched = false;
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A player-controlled flipper paddle
///
/// Geometry (pivot, length, thickness) is fixed at construction; only
/// `angle` and `target` change during play. The current angle always stays
/// within the two resting angles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flipper {
    pub pivot: Vec2,
    pub length: f32,
    pub thickness: f32,
    /// Current tilt, radians
    pub angle: f32,
    pub target: FlipperTarget,
    pub side: FlipperSide,
}

impl Flipper {
    pub fn new(side: FlipperSide) -> Self {
        let mut flipper = Self {
            pivot: Self::pivot_for(side),
            length: FLIPPER_LENGTH,
            thickness: FLIPPER_THICKNESS,
            angle: 0.0,
            target: FlipperTarget::Down,
            side,
        };
        flipper.angle = flipper.rest_angle(FlipperTarget::Down);
        flipper
    }

    /// Pivot position for a side. The bottom lanes derive from these too.
    pub fn pivot_for(side: FlipperSide) -> Vec2 {
        let x = match side {
            FlipperSide::Left => TABLE_WIDTH / 2.0 - FLIPPER_PIVOT_SPREAD,
            FlipperSide::Right => TABLE_WIDTH / 2.0 + FLIPPER_PIVOT_SPREAD,
        };
        Vec2::new(x, FLIPPER_Y)
    }

    /// Resting angle for a commanded target, mirrored by pivot side.
    /// Down droops the tip toward the drain, up raises it.
    pub fn rest_angle(&self, target: FlipperTarget) -> f32 {
        let sign = match (self.side, target) {
            (FlipperSide::Left, FlipperTarget::Down) => 1.0,
            (FlipperSide::Left, FlipperTarget::Up) => -1.0,
            (FlipperSide::Right, FlipperTarget::Down) => -1.0,
            (FlipperSide::Right, FlipperTarget::Up) => 1.0,
        };
        sign * FLIPPER_REST_ANGLE
    }

    /// Step the current angle toward the target's resting angle by at most
    /// `FLIPPER_STEP`, never overshooting.
    pub fn ease(&mut self) {
        let delta = self.rest_angle(self.target) - self.angle;
        if delta != 0.0 {
            self.angle += delta.signum() * delta.abs().min(FLIPPER_STEP);
        }
    }

    /// Midpoint of the paddle - the point-approximated collision site.
    /// The tilt angle is deliberately ignored here.
    pub fn midpoint(&self) -> Vec2 {
        let toward_tip = match self.side {
            FlipperSide::Left => 1.0,
            FlipperSide::Right => -1.0,
        };
        Vec2::new(self.pivot.x + toward_tip * self.length / 2.0, self.pivot.y)
    }
}

/// Complete game state - deterministic, serializable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub ball: Ball,
    /// Left then right
    pub flippers: [Flipper; 2],
    pub score: u32,
    pub balls_remaining: u8,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// All sim randomness (launch spread, bumper jitter) flows through here
    pub rng: Pcg32,
}

impl GameState {
    /// Fresh game with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ball: Ball::at_rest(),
            flippers: [
                Flipper::new(FlipperSide::Left),
                Flipper::new(FlipperSide::Right),
            ],
            score: 0,
            balls_remaining: STARTING_BALLS,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Full reset after the last ball drains: counters back to their
    /// starting values, ball back on the plunger seat.
    pub fn reset_table(&mut self) {
        self.score = 0;
        self.balls_remaining = STARTING_BALLS;
        self.ball.reseat();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_game_waits_at_plunger() {
        let state = GameState::new(1);
        assert!(!state.ball.launched);
        assert_eq!(state.ball.pos, Vec2::new(BALL_REST_X, BALL_REST_Y));
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.score, 0);
        assert_eq!(state.balls_remaining, STARTING_BALLS);
    }

    #[test]
    fn flippers_start_drooped() {
        let state = GameState::new(1);
        let [left, right] = &state.flippers;
        assert_eq!(left.angle, FLIPPER_REST_ANGLE);
        assert_eq!(right.angle, -FLIPPER_REST_ANGLE);
        assert_eq!(left.target, FlipperTarget::Down);
        assert_eq!(right.target, FlipperTarget::Down);
    }

    #[test]
    fn flipper_ease_reaches_target_exactly() {
        let mut flipper = Flipper::new(FlipperSide::Left);
        flipper.target = FlipperTarget::Up;
        for _ in 0..20 {
            flipper.ease();
        }
        assert_eq!(flipper.angle, -FLIPPER_REST_ANGLE);

        // Further ticks hold the angle
        flipper.ease();
        assert_eq!(flipper.angle, -FLIPPER_REST_ANGLE);
    }

    #[test]
    fn flipper_midpoint_sits_between_pivot_and_tip() {
        let left = Flipper::new(FlipperSide::Left);
        assert_eq!(left.midpoint().x, left.pivot.x + FLIPPER_LENGTH / 2.0);
        let right = Flipper::new(FlipperSide::Right);
        assert_eq!(right.midpoint().x, right.pivot.x - FLIPPER_LENGTH / 2.0);
    }

    #[test]
    fn state_snapshot_round_trips() {
        let state = GameState::new(7);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score, state.score);
        assert_eq!(back.balls_remaining, state.balls_remaining);
        assert_eq!(back.ball.pos, state.ball.pos);
        assert_eq!(back.rng, state.rng);
    }

    proptest! {
        /// While a target is held, the gap to its resting angle never
        /// grows, and the angle never leaves the resting band.
        #[test]
        fn flipper_never_overshoots(held in proptest::collection::vec(any::<bool>(), 1..120)) {
            let mut flipper = Flipper::new(FlipperSide::Right);
            let mut prev_target = flipper.target;
            let mut prev_gap = (flipper.angle - flipper.rest_angle(prev_target)).abs();

            for hold in held {
                flipper.target = if hold { FlipperTarget::Up } else { FlipperTarget::Down };
                let rest = flipper.rest_angle(flipper.target);
                if flipper.target != prev_target {
                    prev_target = flipper.target;
                    prev_gap = (flipper.angle - rest).abs();
                }

                flipper.ease();

                let gap = (flipper.angle - rest).abs();
                prop_assert!(gap <= prev_gap + 1e-6);
                prop_assert!(flipper.angle.abs() <= FLIPPER_REST_ANGLE + 1e-6);
                prev_gap = gap;
            }
        }
    }
}
