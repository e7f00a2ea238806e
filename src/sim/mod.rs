//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Per-tick constants only (the driver owns the clock)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod table;
pub mod tick;

pub use collision::{Impact, reflect};
pub use state::{Ball, Flipper, FlipperSide, FlipperTarget, GameState};
pub use table::{Bumper, Corner, CornerLane, Lane, Table};
pub use tick::{FrameEvents, TickInput, tick};
