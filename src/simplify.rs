//! Shape-preserving polyline simplification.
//!
//! Two-pass scheme: a cheap radial-distance pruning pass followed by
//! Douglas-Peucker. Tolerances are in planar degrees, squared internally;
//! route geometries are simplified with [`ROUTE_TOLERANCE_DEGREES`] before
//! being handed to the store.

use crate::geo::Coordinate;
use crate::polyline::Polyline;
use crate::traits::Route;

/// Tolerance callers use when they have no better guess, in degrees.
pub const DEFAULT_TOLERANCE_DEGREES: f64 = 1.0;

/// Tolerance applied to router geometries before persistence, in degrees.
pub const ROUTE_TOLERANCE_DEGREES: f64 = 0.001;

/// Reduces `polyline` to a shape-preserving subset of its points.
///
/// Inputs of 2 or fewer points are returned unchanged. Unless
/// `high_quality` is set, a radial-distance pruning pass runs first and
/// Douglas-Peucker operates on its output; with `high_quality`,
/// Douglas-Peucker sees every input point. The first and last point of the
/// input always survive. Deterministic for a given input and tolerance.
pub fn simplify(polyline: &Polyline, tolerance: f64, high_quality: bool) -> Polyline {
    if polyline.len() <= 2 {
        return polyline.clone();
    }

    let sq_tolerance = tolerance * tolerance;

    let pruned;
    let input: &[Coordinate] = if high_quality {
        polyline.points()
    } else {
        pruned = radial_distance(polyline.points(), sq_tolerance);
        &pruned
    };

    let points = douglas_peucker(input, sq_tolerance);

    // Non-empty: the pass always keeps the endpoints.
    Polyline::new(points).unwrap_or_else(|_| polyline.clone())
}

/// Simplifies a router-produced geometry with the persistence tolerance.
pub fn simplify_route(route: &Route) -> Polyline {
    simplify(&route.geometry, ROUTE_TOLERANCE_DEGREES, false)
}

/// Keeps a point only when it has moved more than the tolerance away from
/// the last kept point. The final input point is always appended.
fn radial_distance(points: &[Coordinate], sq_tolerance: f64) -> Vec<Coordinate> {
    let mut prev = points[0];
    let mut kept = vec![prev];

    for &point in &points[1..] {
        if sq_dist(point, prev) > sq_tolerance {
            kept.push(point);
            prev = point;
        }
    }

    let last = points[points.len() - 1];
    if prev != last {
        kept.push(last);
    }

    kept
}

/// Douglas-Peucker over an explicit range stack.
///
/// Marks the point farthest from the current chord whenever it exceeds the
/// tolerance, then subdivides around it. The stack keeps the call depth
/// flat on adversarial inputs (long runs of collinear points).
fn douglas_peucker(points: &[Coordinate], sq_tolerance: f64) -> Vec<Coordinate> {
    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut ranges = vec![(0usize, last)];
    while let Some((first, last)) = ranges.pop() {
        let mut max_sq_dist = sq_tolerance;
        let mut farthest = None;

        for i in first + 1..last {
            let sq_dist = sq_segment_dist(points[i], points[first], points[last]);
            if sq_dist > max_sq_dist {
                farthest = Some(i);
                max_sq_dist = sq_dist;
            }
        }

        if let Some(i) = farthest {
            keep[i] = true;
            ranges.push((first, i));
            ranges.push((i, last));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(&point, kept)| kept.then_some(point))
        .collect()
}

fn sq_dist(a: Coordinate, b: Coordinate) -> f64 {
    let dlat = a.lat - b.lat;
    let dlng = a.lng - b.lng;
    dlat * dlat + dlng * dlng
}

/// Squared distance from `point` to the chord `(start, end)`, measured to
/// the nearest point of the chord itself (projection clamped to the
/// endpoints).
fn sq_segment_dist(point: Coordinate, start: Coordinate, end: Coordinate) -> f64 {
    let mut lat = start.lat;
    let mut lng = start.lng;
    let mut dlat = end.lat - lat;
    let mut dlng = end.lng - lng;

    if dlat != 0.0 || dlng != 0.0 {
        let t = ((point.lat - lat) * dlat + (point.lng - lng) * dlng)
            / (dlat * dlat + dlng * dlng);

        if t > 1.0 {
            lat = end.lat;
            lng = end.lng;
        } else if t > 0.0 {
            lat += dlat * t;
            lng += dlng * t;
        }
    }

    dlat = point.lat - lat;
    dlng = point.lng - lng;
    dlat * dlat + dlng * dlng
}
