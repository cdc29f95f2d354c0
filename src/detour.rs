//! Time/distance cost of forcing a route through, or away from, a point.
//!
//! Both operations compare a baseline route against a candidate built from
//! extra router lookups. Independent lookups of one evaluation run
//! concurrently, but a delta is always computed between the baseline and
//! the candidate of the *same* call, never a cached baseline from another.

use rayon::join;
use tracing::{debug, trace};

use crate::geo::{self, Coordinate, COORDINATE_EPSILON};
use crate::polyline::Polyline;
use crate::traits::{DeltaRoute, Route, RouteLookup, RouteUnavailable, NO_DETOUR_DELTA};

/// Cost of forcing the route `start` → `end` through `via`.
///
/// The baseline is looked up fresh unless the caller already knows its
/// duration. The returned route is the two-leg composition
/// `start` → `via` → `end`; its delta is the absolute difference between
/// the composed duration and the baseline duration, so it is never
/// negative.
pub fn cross_way_point<L>(
    lookup: &L,
    start: Coordinate,
    end: Coordinate,
    via: Coordinate,
    known_duration: Option<f64>,
) -> Result<DeltaRoute, RouteUnavailable>
where
    L: RouteLookup,
{
    let (forced, baseline_duration) = join(
        || via_route(lookup, start, via, end),
        || match known_duration {
            Some(duration) => Ok(duration),
            None => lookup.route(start, end).map(|route| route.duration),
        },
    );
    let forced = forced?;
    let baseline_duration = baseline_duration?;

    let delta = (forced.duration - baseline_duration).abs();
    Ok(DeltaRoute {
        route: forced,
        delta,
    })
}

/// Cost of keeping the route `start` → `end` away from `exclude`.
///
/// When the route forced through `exclude` differs from the baseline in
/// both duration and distance, the point is trivially avoided by driving
/// the baseline: it is returned with a zero delta. When they coincide, the
/// fastest route already passes through `exclude`, and the baseline
/// geometry is walked point by point for an entry/exit pair whose
/// connecting route avoids it. If none exists the baseline comes back with
/// the no-solution sentinel delta.
///
/// The duration/distance comparison is exact float equality and the
/// sentinel is `-1.0`; both are relied upon by stored match results, so
/// changing either changes observable matches.
pub fn make_detour<L>(
    lookup: &L,
    start: Coordinate,
    end: Coordinate,
    exclude: Coordinate,
    baseline: Option<Route>,
) -> Result<DeltaRoute, RouteUnavailable>
where
    L: RouteLookup,
{
    let (baseline, forced) = match baseline {
        Some(known) => (known, via_route(lookup, start, exclude, end)?),
        None => {
            let (baseline, forced) = join(
                || lookup.route(start, end),
                || via_route(lookup, start, exclude, end),
            );
            (baseline?, forced?)
        }
    };

    if forced.duration != baseline.duration && forced.distance != baseline.distance {
        // Distinct routes: the baseline itself avoids the point.
        return Ok(DeltaRoute {
            route: baseline,
            delta: 0.0,
        });
    }

    search_detour(lookup, &baseline, start, end, exclude)
}

/// Composes `from` → `via` → `to` from two lookups, issued concurrently.
fn via_route<L>(
    lookup: &L,
    from: Coordinate,
    via: Coordinate,
    to: Coordinate,
) -> Result<Route, RouteUnavailable>
where
    L: RouteLookup,
{
    let (inbound, outbound) = join(
        || lookup.route(from, via),
        || lookup.route(via, to),
    );
    let inbound = inbound?;
    let outbound = outbound?;

    Ok(concat_routes(inbound, outbound))
}

fn concat_routes(first: Route, second: Route) -> Route {
    let mut points = first.geometry.into_points();
    let mut tail = second.geometry.into_points();
    // Routers repeat the junction vertex at the seam.
    if points
        .last()
        .is_some_and(|&last| geo::approx_eq(last, tail[0], COORDINATE_EPSILON))
    {
        tail.remove(0);
    }
    points.extend(tail);

    Route {
        // Both inputs were non-empty, so the concatenation is too.
        geometry: Polyline::new(points).expect("concatenation of non-empty geometries"),
        duration: first.duration + second.duration,
        distance: first.distance + second.distance,
    }
}

/// Walks the baseline geometry outward from the vertex nearest `exclude`,
/// looking for an entry/exit pair whose connecting route avoids it.
fn search_detour<L>(
    lookup: &L,
    baseline: &Route,
    start: Coordinate,
    end: Coordinate,
    exclude: Coordinate,
) -> Result<DeltaRoute, RouteUnavailable>
where
    L: RouteLookup,
{
    let points = baseline.geometry.points();
    let last = points.len() - 1;
    if last == 0 {
        return Ok(DeltaRoute {
            route: baseline.clone(),
            delta: NO_DETOUR_DELTA,
        });
    }

    let nearest = nearest_vertex(points, exclude);
    debug!(
        vertex = nearest,
        vertices = points.len(),
        "fastest route passes through the excluded point, searching for a bypass"
    );

    let mut spread = 1;
    loop {
        let entry = nearest.saturating_sub(spread);
        let exit = (nearest + spread).min(last);

        let bypass = lookup.route(points[entry], points[exit])?;
        let avoids = !bypass
            .geometry
            .points()
            .iter()
            .any(|&point| geo::approx_eq(point, exclude, COORDINATE_EPSILON));
        trace!(entry, exit, avoids, "evaluated bypass pair");

        if avoids {
            let mut detour = bypass;
            if !geo::approx_eq(points[entry], start, COORDINATE_EPSILON) {
                detour = concat_routes(lookup.route(start, points[entry])?, detour);
            }
            if !geo::approx_eq(points[exit], end, COORDINATE_EPSILON) {
                detour = concat_routes(detour, lookup.route(points[exit], end)?);
            }
            let delta = detour.duration - baseline.duration;
            return Ok(DeltaRoute {
                route: detour,
                delta,
            });
        }

        if entry == 0 && exit == last {
            debug!("no entry/exit pair bypasses the excluded point");
            return Ok(DeltaRoute {
                route: baseline.clone(),
                delta: NO_DETOUR_DELTA,
            });
        }
        spread += 1;
    }
}

fn nearest_vertex(points: &[Coordinate], target: Coordinate) -> usize {
    let mut best = 0;
    let mut best_dist2 = f64::INFINITY;
    for (index, &point) in points.iter().enumerate() {
        let offset = geo::sub(point, target);
        let dist2 = geo::dot(offset, offset);
        if dist2 < best_dist2 {
            best_dist2 = dist2;
            best = index;
        }
    }
    best
}
