//! Crossing detection between two route geometries.
//!
//! Used to locate where a candidate route joins and leaves an existing
//! trip's path. Works on the planar (lng, lat) plane; at the scale of a
//! shared car trip the curvature error is far below the routing noise.

use crate::geo::{self, Coordinate};
use crate::polyline::Polyline;

/// Absolute epsilon for the zero comparisons of the segment test.
///
/// Distinct from [`geo::COORDINATE_EPSILON`]: this bounds cross products of
/// degree-scale vectors, not per-axis coordinate deltas.
pub const INTERSECTION_EPSILON: f64 = 1e-5;

/// First crossing between the two polylines, scanning both forward.
///
/// Returns the crossing coordinate and the index of the `route1` segment
/// on which it lies (the index of the segment's start vertex), or `None`
/// when the polylines do not cross or either has fewer than 2 points.
pub fn first_intersection(
    route1: &Polyline,
    route2: &Polyline,
) -> Option<(Coordinate, usize)> {
    if route1.len() < 2 || route2.len() < 2 {
        return None;
    }

    let a = route1.points();
    let b = route2.points();
    for i in 0..a.len() - 1 {
        for j in 0..b.len() - 1 {
            if let Some(point) = segment_intersection(a[i], a[i + 1], b[j], b[j + 1]) {
                return Some((point, i));
            }
        }
    }
    None
}

/// Last crossing between the two polylines, scanning both backward from
/// their ends.
///
/// Returns the crossing coordinate and the index of the `route1` vertex
/// reached just before the crossing *when walking backward*: the far
/// endpoint of the crossed segment, one past the index
/// [`first_intersection`] would report for the same segment. The two
/// conventions differ deliberately; callers must not assume symmetry
/// beyond scan direction.
pub fn last_intersection(
    route1: &Polyline,
    route2: &Polyline,
) -> Option<(Coordinate, usize)> {
    if route1.len() < 2 || route2.len() < 2 {
        return None;
    }

    let a = route1.points();
    let b = route2.points();
    for i in (0..a.len() - 1).rev() {
        for j in (0..b.len() - 1).rev() {
            if let Some(point) = segment_intersection(a[i], a[i + 1], b[j], b[j + 1]) {
                return Some((point, i + 1));
            }
        }
    }
    None
}

/// Classic 2D segment intersection on the (lng, lat) plane.
///
/// Collinear overlapping segments report the first segment's start point
/// `p` as the crossing; that approximation is part of the stored-geometry
/// contract and must not be refined to the true overlap midpoint.
fn segment_intersection(
    p: Coordinate,
    p2: Coordinate,
    q: Coordinate,
    q2: Coordinate,
) -> Option<Coordinate> {
    let r = geo::sub(p2, p);
    let s = geo::sub(q2, q);
    let q_minus_p = geo::sub(q, p);

    let rxs = geo::cross(r, s);
    let qpxr = geo::cross(q_minus_p, r);

    if is_zero(rxs) && is_zero(qpxr) {
        // Collinear: intersecting iff the projections onto r (or s) overlap.
        let t0 = geo::dot(q_minus_p, r);
        let t1 = geo::dot(geo::sub(p, q), s);
        if (0.0 <= t0 && t0 <= geo::dot(r, r)) || (0.0 <= t1 && t1 <= geo::dot(s, s)) {
            return Some(p);
        }
        return None;
    }

    if is_zero(rxs) {
        // Parallel, disjoint.
        return None;
    }

    let t = geo::cross(q_minus_p, s) / rxs;
    let u = geo::cross(q_minus_p, r) / rxs;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        return Some(Coordinate::new(p.lat + t * r.lat, p.lng + t * r.lng));
    }

    None
}

fn is_zero(value: f64) -> bool {
    value.abs() < INTERSECTION_EPSILON
}
