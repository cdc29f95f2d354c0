//! Trip ordering under precedence constraints.
//!
//! Linearizes the rallying points of a multi-member trip into one visiting
//! order: every member's pickup must come before their drop-off, the trip
//! starts and ends at fixed extremities, and between those the next stop is
//! always the reachable point with the smallest router travel time.
//!
//! This is a nearest-neighbour heuristic, not an optimal solver: it never
//! backtracks, so it can miss a feasible order that a different choice
//! sequence would have reached. That trade-off keeps the lookup count
//! linear-ish in the number of points and the response time bounded.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::geo::Coordinate;
use crate::traits::{Id, RouteLookup, RouteUnavailable};

/// An identified physical location where members meet.
///
/// Owned by the caller's store; the engine only ever references the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RallyingPoint<I> {
    pub id: I,
    pub location: Coordinate,
}

impl<I> RallyingPoint<I> {
    pub fn new(id: I, location: Coordinate) -> Self {
        Self { id, location }
    }
}

/// A precedence constraint: `from` must be visited before `to`.
///
/// Segments carry their rallying points so the solver never has to resolve
/// ids against an external store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment<I> {
    pub from: RallyingPoint<I>,
    pub to: RallyingPoint<I>,
}

impl<I> Segment<I> {
    pub fn new(from: RallyingPoint<I>, to: RallyingPoint<I>) -> Self {
        Self { from, to }
    }
}

/// A rallying point placed at a definite position within a resolved trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WayPoint<I> {
    pub rallying_point: RallyingPoint<I>,
    /// 0-based placement index, strictly increasing along the trip.
    pub order: usize,
    /// Cumulative travel seconds preceding this point, non-decreasing.
    pub duration: f64,
    /// Estimated arrival: departure time plus cumulative travel (unix
    /// seconds).
    pub eta: i64,
}

/// Orders all rallying points of `extremities` and `segments` into a
/// single trip.
///
/// The trip starts at `extremities.from` and ends at `extremities.to`; for
/// every segment, its `from` is placed before its `to`. At each step the
/// unplaced point with the smallest router travel time from the current
/// position is placed, restricted to points whose precedence predecessors
/// are already placed; ties keep first-seen input order.
///
/// Returns `Ok(None)` when no placement satisfies all constraints
/// (contradictory segment sets are a normal caller input, not a fault).
/// A router failure aborts the whole ordering with `Err`.
pub fn order<I, L>(
    lookup: &L,
    departure_time: i64,
    extremities: &Segment<I>,
    segments: &[Segment<I>],
) -> Result<Option<Vec<WayPoint<I>>>, RouteUnavailable>
where
    I: Id,
    L: RouteLookup,
{
    let start = &extremities.from;
    let end = &extremities.to;

    // A constraint pointing at the start or out of the end can never hold.
    for segment in segments {
        if segment.to.id == start.id && segment.from.id != start.id {
            return Ok(None);
        }
        if segment.from.id == end.id && segment.to.id != end.id {
            return Ok(None);
        }
    }

    let mut interior: Vec<&RallyingPoint<I>> = Vec::new();
    let mut seen: HashSet<&I> = HashSet::new();
    seen.insert(&start.id);
    seen.insert(&end.id);
    for segment in segments {
        for point in [&segment.from, &segment.to] {
            if seen.insert(&point.id) {
                interior.push(point);
            }
        }
    }

    let predecessors: Vec<(&I, &I)> = segments
        .iter()
        .filter(|segment| segment.from.id != segment.to.id)
        .map(|segment| (&segment.to.id, &segment.from.id))
        .collect();

    let mut placed: HashSet<&I> = HashSet::new();
    placed.insert(&start.id);

    let mut trip = Vec::with_capacity(interior.len() + 2);
    trip.push(WayPoint {
        rallying_point: start.clone(),
        order: 0,
        duration: 0.0,
        eta: departure_time,
    });

    let mut current = start;
    let mut elapsed = 0.0;
    let mut remaining: Vec<&RallyingPoint<I>> = interior;

    while !remaining.is_empty() {
        let mut best: Option<(usize, f64)> = None;

        for (index, candidate) in remaining.iter().enumerate() {
            let blocked = predecessors
                .iter()
                .any(|(to, from)| *to == &candidate.id && !placed.contains(from));
            if blocked {
                continue;
            }

            let leg = lookup.route(current.location, candidate.location)?;
            trace!(
                candidate = index,
                duration_s = leg.duration,
                "evaluated reachable rallying point"
            );
            // Strict comparison keeps first-seen order on ties.
            if best.is_none_or(|(_, duration)| leg.duration < duration) {
                best = Some((index, leg.duration));
            }
        }

        let Some((index, duration)) = best else {
            debug!(
                unplaced = remaining.len(),
                "no reachable point satisfies remaining precedence constraints"
            );
            return Ok(None);
        };

        let point = remaining.remove(index);
        elapsed += duration;
        placed.insert(&point.id);
        debug!(
            order = trip.len(),
            duration_s = elapsed,
            "placed way-point"
        );
        trip.push(WayPoint {
            rallying_point: point.clone(),
            order: trip.len(),
            duration: elapsed,
            eta: departure_time + elapsed as i64,
        });
        current = point;
    }

    let leg = lookup.route(current.location, end.location)?;
    elapsed += leg.duration;
    trip.push(WayPoint {
        rallying_point: end.clone(),
        order: trip.len(),
        duration: elapsed,
        eta: departure_time + elapsed as i64,
    });

    Ok(Some(trip))
}
