//! Static table geometry
//!
//! Pure value objects describing the obstacles: bumpers, the angled bottom
//! lanes, and the two quarter-arc corner lanes. Everything here is fixed
//! once the table is built; only the flippers (in `state`) move during
//! play. The left/right/top walls and the open drain at the bottom are
//! implied by the playfield bounds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Flipper, FlipperSide};
use crate::consts::*;

/// A circular kicker bumper
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bumper {
    pub center: Vec2,
    /// Collision radius
    pub radius: f32,
    /// Inner cap - decorative only, no separate physics
    pub core_radius: f32,
}

impl Bumper {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            radius: BUMPER_RADIUS,
            core_radius: BUMPER_CORE_RADIUS,
        }
    }
}

/// An angled guide segment funneling the ball toward a flipper
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lane {
    pub a: Vec2,
    pub b: Vec2,
}

impl Lane {
    /// Build a lane from a flipper pivot out toward the wall at `wall_x`.
    ///
    /// A raw endpoint is dropped on the wall line rising at the lane
    /// incline, then the segment is rescaled once so its length is exactly
    /// `LANE_LENGTH`, preserving direction.
    pub fn from_pivot(pivot: Vec2, wall_x: f32) -> Self {
        let run = (wall_x - pivot.x).abs();
        let raw = Vec2::new(wall_x, pivot.y - LANE_INCLINE.tan() * run);
        let delta = raw - pivot;
        Self {
            a: pivot,
            b: pivot + delta * (LANE_LENGTH / delta.length()),
        }
    }

    pub fn direction(&self) -> Vec2 {
        self.b - self.a
    }

    /// Incline of the segment, radians
    pub fn angle(&self) -> f32 {
        let d = self.direction();
        d.y.atan2(d.x)
    }

    pub fn length(&self) -> f32 {
        self.direction().length()
    }
}

/// Which corner of the table an arc lane rounds off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
}

/// A quarter-circle guide arc hugging one top corner
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CornerLane {
    pub center: Vec2,
    pub radius: f32,
    pub corner: Corner,
}

impl CornerLane {
    /// True when the position falls inside this lane's quadrant
    pub fn in_quadrant(&self, pos: Vec2) -> bool {
        match self.corner {
            Corner::TopLeft => pos.x <= self.center.x && pos.y <= self.center.y,
            Corner::TopRight => pos.x >= self.center.x && pos.y <= self.center.y,
        }
    }

    /// Angular sweep for rendering (canvas convention: radians, y-down)
    pub fn sweep(&self) -> (f32, f32) {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self.corner {
            Corner::TopLeft => (-PI, -FRAC_PI_2),
            Corner::TopRight => (-FRAC_PI_2, 0.0),
        }
    }
}

/// The full static playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub width: f32,
    pub height: f32,
    pub bumpers: [Bumper; 3],
    /// Left then right, each anchored at its flipper's pivot
    pub lanes: [Lane; 2],
    pub top_left: CornerLane,
    pub top_right: CornerLane,
}

impl Table {
    /// The standard single-table layout
    pub fn standard() -> Self {
        Self {
            width: TABLE_WIDTH,
            height: TABLE_HEIGHT,
            bumpers: [
                Bumper::new(150.0, 150.0),
                Bumper::new(300.0, 100.0),
                Bumper::new(450.0, 150.0),
            ],
            lanes: [
                Lane::from_pivot(Flipper::pivot_for(FlipperSide::Left), LANE_WALL_MARGIN),
                Lane::from_pivot(
                    Flipper::pivot_for(FlipperSide::Right),
                    TABLE_WIDTH - LANE_WALL_MARGIN,
                ),
            ],
            top_left: CornerLane {
                center: Vec2::new(100.0, 100.0),
                radius: 100.0,
                corner: Corner::TopLeft,
            },
            top_right: CornerLane {
                center: Vec2::new(400.0, 200.0),
                radius: 200.0,
                corner: Corner::TopRight,
            },
        }
    }
}
