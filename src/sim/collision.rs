//! Collision detection and response for the table obstacles
//!
//! Each resolver is a pure function from the current ball state and one
//! obstacle to either no contact or an [`Impact`]: corrected position, new
//! velocity, and the score the contact is worth. Position integration runs
//! before any resolver, so resolvers always correct an already-advanced
//! position. Several contacts can land in the same tick; each applies
//! independently and the effects compound.
//!
//! The model is per-tick velocity reflection, not impulse physics. Two
//! known oddities are kept on purpose: the flipper collides as a single
//! point at its midpoint, and the two corner lanes respond differently
//! (tangent-follow on the left, flat reverse on the right).

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, Flipper, FlipperTarget};
use super::table::{Bumper, Corner, CornerLane, Lane, Table};
use crate::consts::*;

/// Outcome of a resolved contact
#[derive(Debug, Clone, Copy)]
pub struct Impact {
    pub pos: Vec2,
    pub vel: Vec2,
    pub score: u32,
}

/// Reflect a velocity off a surface: v' = v - 2(v·n)n
#[inline]
pub fn reflect(vel: Vec2, normal: Vec2) -> Vec2 {
    vel - 2.0 * vel.dot(normal) * normal
}

/// Clamp the ball inside the left/right/top boundaries, reflecting and
/// damping the perpendicular component. The bottom edge is the drain, not
/// a wall; `tick` handles it separately.
pub fn resolve_walls(ball: &Ball, table: &Table) -> Option<Impact> {
    let mut pos = ball.pos;
    let mut vel = ball.vel;
    let mut hit = false;

    if pos.x + ball.radius > table.width {
        pos.x = table.width - ball.radius;
        vel.x = -vel.x.abs() * WALL_BOUNCE;
        hit = true;
    }
    if pos.x - ball.radius < 0.0 {
        pos.x = ball.radius;
        vel.x = vel.x.abs() * WALL_BOUNCE;
        hit = true;
    }
    if pos.y - ball.radius < 0.0 {
        pos.y = ball.radius;
        vel.y = vel.y.abs() * WALL_BOUNCE;
        hit = true;
    }

    hit.then_some(Impact { pos, vel, score: 0 })
}

/// Paddle contact, point-approximated at the flipper midpoint with
/// effective radius `ball.radius + thickness`.
///
/// A raised ("hot") flipper bounces harder and adds a flat upward kick; an
/// idle one damps. Either way the ball is reseated just above the paddle.
pub fn resolve_flipper(ball: &Ball, flipper: &Flipper) -> Option<Impact> {
    let mid = flipper.midpoint();
    if ball.pos.distance(mid) >= ball.radius + flipper.thickness {
        return None;
    }

    let mut vel = ball.vel;
    vel.y = match flipper.target {
        FlipperTarget::Up => -vel.y.abs() * FLIPPER_ACTIVE_BOUNCE - FLIPPER_KICK,
        FlipperTarget::Down => -vel.y.abs() * FLIPPER_IDLE_BOUNCE,
    };

    Some(Impact {
        pos: Vec2::new(ball.pos.x, mid.y - ball.radius - flipper.thickness),
        vel,
        score: SCORE_FLIPPER,
    })
}

/// Quarter-arc contact: a near-radius pass through the lane's quadrant.
///
/// The top-left lane redirects the ball along the tangent at the contact
/// point and scores; the top-right lane reverses and damps both velocity
/// components flat, for nothing.
pub fn resolve_corner(ball: &Ball, lane: &CornerLane) -> Option<Impact> {
    let offset = ball.pos - lane.center;
    if (offset.length() - lane.radius).abs() >= ball.radius + 2.0 || !lane.in_quadrant(ball.pos) {
        return None;
    }

    let speed = ball.speed();
    let (vel, score) = match lane.corner {
        Corner::TopLeft => {
            let tangent = offset.y.atan2(offset.x) + std::f32::consts::FRAC_PI_2;
            (Vec2::new(tangent.cos(), tangent.sin()) * speed, SCORE_ORBIT)
        }
        Corner::TopRight => (Vec2::splat(-(LANE_BOUNCE * speed)), 0),
    };

    Some(Impact {
        pos: ball.pos,
        vel,
        score,
    })
}

/// Bottom-lane contact: project the ball center onto the segment (clamped
/// to its ends), reflect off the contact normal, then re-derive direction
/// from the lane's own incline at the reflected speed and push the ball
/// clear of the lane.
pub fn resolve_lane(ball: &Ball, lane: &Lane) -> Option<Impact> {
    let seg = lane.direction();
    let len_sq = seg.length_squared();
    if len_sq <= f32::EPSILON {
        return None;
    }

    let t = ((ball.pos - lane.a).dot(seg) / len_sq).clamp(0.0, 1.0);
    let closest = lane.a + seg * t;
    let to_ball = ball.pos - closest;
    if to_ball.length() >= ball.radius + 1.0 {
        return None;
    }

    // Zero-length normal means the center sits exactly on the lane -
    // treat as no contact rather than dividing by zero.
    let normal = Vec2::new(to_ball.y, -to_ball.x).normalize_or_zero();
    if normal == Vec2::ZERO {
        return None;
    }

    let reflected = reflect(ball.vel, normal);
    let incline = lane.angle();
    let speed = reflected.length();
    let vel = Vec2::new(
        speed * incline.cos() * reflected.x.signum(),
        speed * incline.sin(),
    ) * LANE_BOUNCE;

    Some(Impact {
        pos: ball.pos + normal * LANE_PUSH_OUT,
        vel,
        score: 0,
    })
}

/// Kicker bumper contact - the one resolver that fully removes overlap.
///
/// The ball is pushed out along the contact normal by the exact overlap,
/// its velocity reflected with a little per-component jitter so repeated
/// hits don't settle into a loop, then boosted and damped.
pub fn resolve_bumper<R: Rng>(ball: &Ball, bumper: &Bumper, rng: &mut R) -> Option<Impact> {
    let offset = ball.pos - bumper.center;
    let dist = offset.length();
    if dist >= ball.radius + bumper.radius {
        return None;
    }

    let normal = offset.normalize_or_zero();
    if normal == Vec2::ZERO {
        return None;
    }

    let overlap = ball.radius + bumper.radius - dist;
    let jitter = Vec2::new(
        rng.random_range(-BUMPER_JITTER..=BUMPER_JITTER),
        rng.random_range(-BUMPER_JITTER..=BUMPER_JITTER),
    );

    Some(Impact {
        pos: ball.pos + normal * overlap,
        vel: (reflect(ball.vel, normal) + jitter) * BUMPER_BOUNCE * BUMPER_DRAG,
        score: SCORE_BUMPER,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::FlipperSide;
    use crate::sim::table::Table;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ball_at(x: f32, y: f32, dx: f32, dy: f32) -> Ball {
        let mut ball = Ball::at_rest();
        ball.pos = Vec2::new(x, y);
        ball.vel = Vec2::new(dx, dy);
        ball.launched = true;
        ball
    }

    #[test]
    fn right_wall_clamps_and_damps() {
        let table = Table::standard();
        let ball = ball_at(table.width - 2.0, 300.0, 5.0, 0.0);

        let hit = resolve_walls(&ball, &table).unwrap();
        assert_eq!(hit.pos.x, table.width - ball.radius);
        assert_eq!(hit.vel.x, -3.5);
        assert_eq!(hit.score, 0);
    }

    #[test]
    fn left_and_top_walls_reflect_inward() {
        let table = Table::standard();

        let hit = resolve_walls(&ball_at(2.0, 300.0, -4.0, 0.0), &table).unwrap();
        assert_eq!(hit.pos.x, BALL_RADIUS);
        assert_eq!(hit.vel.x, 4.0 * WALL_BOUNCE);

        let hit = resolve_walls(&ball_at(300.0, 2.0, 0.0, -4.0), &table).unwrap();
        assert_eq!(hit.pos.y, BALL_RADIUS);
        assert_eq!(hit.vel.y, 4.0 * WALL_BOUNCE);
    }

    #[test]
    fn wall_miss_inside_bounds() {
        let table = Table::standard();
        assert!(resolve_walls(&ball_at(300.0, 300.0, 5.0, 5.0), &table).is_none());
    }

    #[test]
    fn idle_flipper_damps_and_scores_ten() {
        let flipper = Flipper::new(FlipperSide::Left);
        let mid = flipper.midpoint();
        let ball = ball_at(mid.x, mid.y - 4.0, 0.0, 8.0);

        let hit = resolve_flipper(&ball, &flipper).unwrap();
        assert_eq!(hit.vel.y, -8.0 * FLIPPER_IDLE_BOUNCE);
        assert_eq!(hit.vel.x, ball.vel.x);
        assert_eq!(hit.pos.y, mid.y - ball.radius - flipper.thickness);
        assert_eq!(hit.score, SCORE_FLIPPER);
    }

    #[test]
    fn raised_flipper_kicks_harder() {
        let mut flipper = Flipper::new(FlipperSide::Right);
        flipper.target = FlipperTarget::Up;
        let mid = flipper.midpoint();
        let ball = ball_at(mid.x, mid.y - 4.0, 0.0, 8.0);

        let hit = resolve_flipper(&ball, &flipper).unwrap();
        assert_eq!(hit.vel.y, -8.0 * FLIPPER_ACTIVE_BOUNCE - FLIPPER_KICK);
    }

    #[test]
    fn flipper_misses_outside_contact_radius() {
        let flipper = Flipper::new(FlipperSide::Left);
        let mid = flipper.midpoint();
        let ball = ball_at(mid.x, mid.y - 20.0, 0.0, 8.0);
        assert!(resolve_flipper(&ball, &flipper).is_none());
    }

    #[test]
    fn top_left_arc_follows_tangent_and_scores_five() {
        let table = Table::standard();
        let lane = table.top_left;
        // Contact point straight left of the arc center, on the radius
        let ball = ball_at(lane.center.x - lane.radius, lane.center.y, 3.0, 4.0);

        let hit = resolve_corner(&ball, &lane).unwrap();
        assert_eq!(hit.score, SCORE_ORBIT);
        // Speed preserved, direction swung to the tangent
        assert!((hit.vel.length() - 5.0).abs() < 1e-4);
        // Tangent at angle π is π + π/2: pointing straight down in
        // screen coordinates would be +y, here cos/sin give (0, -1)
        assert!(hit.vel.x.abs() < 1e-4);
        assert!((hit.vel.y - -5.0).abs() < 1e-4);
    }

    #[test]
    fn top_right_arc_reverses_flat_for_nothing() {
        let table = Table::standard();
        let lane = table.top_right;
        let ball = ball_at(lane.center.x + lane.radius, lane.center.y - 1.0, 3.0, 4.0);

        let hit = resolve_corner(&ball, &lane).unwrap();
        assert_eq!(hit.score, 0);
        assert_eq!(hit.vel.x, hit.vel.y);
        assert!((hit.vel.x - -(LANE_BOUNCE * 5.0)).abs() < 1e-4);
    }

    #[test]
    fn corner_arc_gates_on_quadrant() {
        let table = Table::standard();
        let lane = table.top_left;
        // Right radius, wrong quadrant (below center)
        let ball = ball_at(lane.center.x, lane.center.y + lane.radius, 3.0, 4.0);
        assert!(resolve_corner(&ball, &lane).is_none());
    }

    #[test]
    fn lane_contact_damps_and_pushes_clear() {
        let table = Table::standard();
        let lane = table.lanes[0];
        let mid = lane.a + lane.direction() * 0.5;
        // Just off the lane on one side, sliding in
        let ball = ball_at(mid.x, mid.y - 3.0, -2.0, 3.0);

        let hit = resolve_lane(&ball, &lane).unwrap();
        assert_eq!(hit.score, 0);
        // Reflection preserves magnitude, so the damped speed is exact
        let speed_in = ball.speed();
        assert!((hit.vel.length() - speed_in * LANE_BOUNCE).abs() < 1e-3);
        // Pushed two units off the contact point
        assert!((hit.pos.distance(ball.pos) - LANE_PUSH_OUT).abs() < 1e-3);
    }

    #[test]
    fn lane_miss_when_far_or_past_the_ends() {
        let table = Table::standard();
        let lane = table.lanes[0];

        let far = ball_at(lane.a.x, lane.a.y - 50.0, 0.0, 1.0);
        assert!(resolve_lane(&far, &lane).is_none());

        // Beyond the far endpoint the projection clamps, so a ball level
        // with the infinite line but past the segment stays untouched
        let past = lane.b + lane.direction().normalize() * 40.0;
        let past = ball_at(past.x, past.y, 0.0, 1.0);
        assert!(resolve_lane(&past, &lane).is_none());
    }

    #[test]
    fn lane_center_on_segment_is_left_alone() {
        let table = Table::standard();
        let lane = table.lanes[1];
        // Dead on the endpoint: the projection clamps there, the contact
        // normal degenerates to zero, and the guard turns it into a miss
        let ball = ball_at(lane.a.x, lane.a.y, 1.0, 1.0);
        assert!(resolve_lane(&ball, &lane).is_none());
    }

    #[test]
    fn bumper_resolution_is_non_penetrating() {
        let table = Table::standard();
        let bumper = table.bumpers[0];
        let mut rng = Pcg32::seed_from_u64(42);
        let ball = ball_at(bumper.center.x + 20.0, bumper.center.y, -3.0, 0.0);

        let hit = resolve_bumper(&ball, &bumper, &mut rng).unwrap();
        let dist = hit.pos.distance(bumper.center);
        assert!((dist - (ball.radius + bumper.radius)).abs() < 1e-3);
        assert_eq!(hit.score, SCORE_BUMPER);
    }

    #[test]
    fn bumper_reflects_and_boosts() {
        let bumper = Bumper::new(300.0, 100.0);
        let mut rng = Pcg32::seed_from_u64(7);
        let ball = ball_at(bumper.center.x - 25.0, bumper.center.y, 4.0, 0.0);

        let hit = resolve_bumper(&ball, &bumper, &mut rng).unwrap();
        // Head-on reflection flips dx; jitter stays within its band
        let expected = -4.0 * BUMPER_BOUNCE * BUMPER_DRAG;
        assert!((hit.vel.x - expected).abs() <= BUMPER_JITTER * BUMPER_BOUNCE * BUMPER_DRAG + 1e-4);
        assert!(hit.vel.y.abs() <= BUMPER_JITTER * BUMPER_BOUNCE * BUMPER_DRAG + 1e-4);
    }

    #[test]
    fn bumper_concentric_ball_is_left_alone() {
        let bumper = Bumper::new(300.0, 100.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let ball = ball_at(bumper.center.x, bumper.center.y, 1.0, 1.0);
        assert!(resolve_bumper(&ball, &bumper, &mut rng).is_none());
    }

    proptest! {
        /// Any rightward crossing of the right wall ends clamped to the
        /// boundary with the horizontal component reversed and damped.
        #[test]
        fn right_wall_always_damps(dx in 0.1f32..50.0, depth in 0.1f32..20.0, y in 50.0f32..500.0) {
            let table = Table::standard();
            let ball = ball_at(table.width - BALL_RADIUS + depth, y, dx, 0.0);
            let hit = resolve_walls(&ball, &table).unwrap();
            prop_assert_eq!(hit.pos.x, table.width - BALL_RADIUS);
            prop_assert!((hit.vel.x - -dx * WALL_BOUNCE).abs() < 1e-4);
        }

        /// Bumper push-out lands exactly on the contact circle no matter
        /// the approach angle or depth.
        #[test]
        fn bumper_always_fully_separates(angle in 0.0f32..std::f32::consts::TAU, depth in 0.1f32..20.0) {
            let bumper = Bumper::new(300.0, 100.0);
            let offset = Vec2::new(angle.cos(), angle.sin());
            let start = bumper.center + offset * (BALL_RADIUS + bumper.radius - depth);
            let ball = ball_at(start.x, start.y, -offset.x, -offset.y);
            let mut rng = Pcg32::seed_from_u64(99);

            let hit = resolve_bumper(&ball, &bumper, &mut rng).unwrap();
            let dist = hit.pos.distance(bumper.center);
            prop_assert!((dist - (BALL_RADIUS + bumper.radius)).abs() < 1e-2);
        }
    }
}
