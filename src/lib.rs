//! Silverball - a single-table pinball game for the browser
//!
//! Core modules:
//! - `sim`: deterministic simulation (physics, collisions, game state)
//! - `render`: render-primitive seam between the sim and a drawing backend
//!
//! The platform driver in `main.rs` wires a canvas-2D backend, the DOM
//! score/lives display, and key/button input onto the sim on wasm, and runs
//! a headless demo natively.

pub mod render;
pub mod sim;

/// Game configuration constants
///
/// The whole table layout and physics tuning lives here; the table is built
/// from these literals at startup and never reconfigured.
pub mod consts {
    use std::f32::consts::FRAC_PI_6;

    /// Fixed simulation rate the per-tick physics constants are tuned for
    pub const TICK_HZ: f32 = 60.0;
    /// Fixed timestep for the driver's accumulator
    pub const TICK_DT: f32 = 1.0 / TICK_HZ;
    /// Maximum catch-up ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions
    pub const TABLE_WIDTH: f32 = 600.0;
    pub const TABLE_HEIGHT: f32 = 600.0;

    /// Ball
    pub const BALL_RADIUS: f32 = 6.0;
    /// Plunger seat - where the ball waits for launch
    pub const BALL_REST_X: f32 = TABLE_WIDTH - 22.0;
    pub const BALL_REST_Y: f32 = TABLE_HEIGHT - 90.0;

    /// Gravity added to vertical velocity each tick (10 px/s² at 60 Hz)
    pub const GRAVITY: f32 = 0.166;

    /// Launch speed range (uniform)
    pub const LAUNCH_SPEED_MIN: f32 = 15.0;
    pub const LAUNCH_SPEED_MAX: f32 = 20.0;
    /// Launch direction spread off vertical, degrees
    pub const LAUNCH_SPREAD_DEG: f32 = 5.0;

    /// Flippers
    pub const FLIPPER_LENGTH: f32 = 50.0;
    pub const FLIPPER_THICKNESS: f32 = 4.0;
    /// Resting tilt in either commanded state (mirrored by pivot side)
    pub const FLIPPER_REST_ANGLE: f32 = FRAC_PI_6;
    /// Easing step per tick toward the commanded angle
    pub const FLIPPER_STEP: f32 = 0.1;
    pub const FLIPPER_Y: f32 = TABLE_HEIGHT - 100.0;
    /// Pivot distance from the table centerline
    pub const FLIPPER_PIVOT_SPREAD: f32 = 60.0;

    /// Bounce coefficients
    pub const WALL_BOUNCE: f32 = 0.7;
    pub const FLIPPER_ACTIVE_BOUNCE: f32 = 1.2;
    pub const FLIPPER_IDLE_BOUNCE: f32 = 0.7;
    /// Flat extra upward kick from a raised flipper
    pub const FLIPPER_KICK: f32 = 6.0;
    pub const LANE_BOUNCE: f32 = 0.7;
    /// Push-out along the contact normal to prevent re-penetration
    pub const LANE_PUSH_OUT: f32 = 2.0;
    pub const BUMPER_BOUNCE: f32 = 1.2;
    /// Flat damping applied after the bumper boost
    pub const BUMPER_DRAG: f32 = 0.9;
    /// Uniform per-component velocity jitter on bumper contact
    pub const BUMPER_JITTER: f32 = 0.1;

    /// Bottom lanes
    pub const LANE_WALL_MARGIN: f32 = 16.0;
    pub const LANE_INCLINE: f32 = FRAC_PI_6;
    pub const LANE_LENGTH: f32 = 200.0;

    /// Bumpers
    pub const BUMPER_RADIUS: f32 = 24.0;
    pub const BUMPER_CORE_RADIUS: f32 = 20.0;

    /// Scoring
    pub const SCORE_FLIPPER: u32 = 10;
    pub const SCORE_ORBIT: u32 = 5;
    pub const SCORE_BUMPER: u32 = 30;

    /// Balls per game
    pub const STARTING_BALLS: u8 = 3;

    /// Plunger block (visual only, not a physics object)
    pub const PLUNGER_WIDTH: f32 = 24.0;
    pub const PLUNGER_HEIGHT: f32 = 72.0;
    pub const PLUNGER_MARGIN: f32 = 10.0;
}
