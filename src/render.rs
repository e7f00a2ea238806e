//! Render-primitive seam between the simulation and a drawing backend
//!
//! The sim never talks to a canvas directly: [`draw_scene`] describes one
//! frame as a handful of primitives and the backend draws them however it
//! likes. A backend that cannot draw (missing canvas, lost context) may
//! no-op every call - the simulation keeps running regardless.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{FlipperSide, GameState, Table};

/// Table palette, packed 0xRRGGBB
pub struct Colors;

impl Colors {
    pub const BALL: u32 = 0x000000;
    pub const FLIPPER: u32 = 0x0000ff;
    pub const LANE: u32 = 0x000000;
    pub const BUMPER: u32 = 0xff0000;
    pub const BUMPER_CORE: u32 = 0xffffff;
    pub const PLUNGER: u32 = 0x808080;
}

/// CSS hex string for a packed color
pub fn css_color(rgb: u32) -> String {
    format!("#{:06x}", rgb & 0xffffff)
}

/// Drawing capability the platform provides
///
/// Angles follow the canvas convention: radians, y-down, zero along +x.
/// Implementations must tolerate failure silently; the driver never checks.
pub trait Renderer {
    fn clear(&mut self);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: u32);
    /// Fill a polygon given in local coordinates, pre-transformed by a
    /// translation to `origin` and a rotation of `angle` about it
    fn draw_polygon(&mut self, points: &[Vec2], origin: Vec2, angle: f32, color: u32);
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: u32);
    fn draw_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, width: f32, color: u32);
}

/// Backend that draws nothing. Used headless and in tests.
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn clear(&mut self) {}
    fn draw_circle(&mut self, _: Vec2, _: f32, _: u32) {}
    fn draw_polygon(&mut self, _: &[Vec2], _: Vec2, _: f32, _: u32) {}
    fn draw_line(&mut self, _: Vec2, _: Vec2, _: f32, _: u32) {}
    fn draw_arc(&mut self, _: Vec2, _: f32, _: f32, _: f32, _: f32, _: u32) {}
}

/// Tapered paddle outline in pivot-local coordinates: 6 px wide at the
/// pivot narrowing to 2 px at the tip.
fn flipper_outline(side: FlipperSide, length: f32) -> [Vec2; 4] {
    let tip = match side {
        FlipperSide::Left => length,
        FlipperSide::Right => -length,
    };
    [
        Vec2::new(0.0, -3.0),
        Vec2::new(tip, -1.0),
        Vec2::new(tip, 1.0),
        Vec2::new(0.0, 3.0),
    ]
}

/// Axis-aligned rectangle as a polygon, origin at its top-left corner
fn rect_outline(width: f32, height: f32) -> [Vec2; 4] {
    [
        Vec2::ZERO,
        Vec2::new(width, 0.0),
        Vec2::new(width, height),
        Vec2::new(0.0, height),
    ]
}

/// Emit one frame of primitives
pub fn draw_scene<R: Renderer>(state: &GameState, table: &Table, out: &mut R) {
    out.clear();

    out.draw_circle(state.ball.pos, state.ball.radius, Colors::BALL);

    for flipper in &state.flippers {
        out.draw_polygon(
            &flipper_outline(flipper.side, flipper.length),
            flipper.pivot,
            flipper.angle,
            Colors::FLIPPER,
        );
    }

    for corner in [&table.top_right, &table.top_left] {
        let (start, end) = corner.sweep();
        out.draw_arc(corner.center, corner.radius, start, end, 2.0, Colors::LANE);
    }

    for lane in &table.lanes {
        out.draw_line(lane.a, lane.b, 2.0, Colors::LANE);
    }

    for bumper in &table.bumpers {
        out.draw_circle(bumper.center, bumper.radius, Colors::BUMPER);
        out.draw_circle(bumper.center, bumper.core_radius, Colors::BUMPER_CORE);
    }

    // Plunger block marking the launch seat - a visual, not a physics
    // object, so it renders without ever entering the sim
    let seat = Vec2::new(
        table.width - PLUNGER_WIDTH - PLUNGER_MARGIN,
        table.height - PLUNGER_HEIGHT - PLUNGER_MARGIN,
    );
    out.draw_polygon(
        &rect_outline(PLUNGER_WIDTH, PLUNGER_HEIGHT),
        seat,
        0.0,
        Colors::PLUNGER,
    );
}
