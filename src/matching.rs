//! Classification of a pickup/drop-off pair against an existing trip.
//!
//! The spatial store preselects trips whose stored geometry lies near the
//! search area; each candidate tuple is then classified here, one call per
//! trip, with no knowledge of how it was selected.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::polyline::{GeometryError, Polyline};

/// Tolerance, as a fraction of the trip length, under which a projected
/// point coincides with a stored stop (~20 m on a 20 km trip).
pub const STOP_FRACTION_TOLERANCE: f64 = 1e-3;

/// How a pickup/drop-off pair relates to an existing trip's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    /// Both points coincide with stops the trip already makes.
    Exact,
    /// Both points lie on the trip's path between its extremities.
    Partial,
    /// At least one point requires leaving the trip's path.
    Detour,
}

/// A classified candidate insertion into an existing trip.
///
/// `start_fraction`/`end_fraction` locate the entry and exit as fractions
/// of cumulative length along the trip's stored geometry. Both lie in
/// [0, 1] with `start_fraction <= end_fraction` unless `mode` is
/// [`MatchMode::Detour`], in which case the raw projections are kept so
/// callers can see which side overshoots the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate<T> {
    pub trip: T,
    pub pickup: Coordinate,
    pub deposit: Coordinate,
    pub start_fraction: f64,
    pub end_fraction: f64,
    pub mode: MatchMode,
}

/// Classifies the pair (`pickup`, `deposit`) against the stored geometry
/// of `trip`.
///
/// `cumulative_length` is the stored total length of `route` in meters;
/// `stop_fractions` are the length fractions of the trip's existing
/// way-points, extremities 0 and 1 included.
///
/// Returns `Ok(None)` when the pickup projects after the deposit along the
/// route: the pair rides against the trip's direction and is no match,
/// never reordered. A route with fewer than 2 points is a caller error.
pub fn classify<T>(
    trip: T,
    route: &Polyline,
    cumulative_length: f64,
    stop_fractions: &[f64],
    pickup: Coordinate,
    deposit: Coordinate,
) -> Result<Option<MatchCandidate<T>>, GeometryError> {
    let start_fraction = route.project_fraction(pickup, cumulative_length)?;
    let end_fraction = route.project_fraction(deposit, cumulative_length)?;

    if start_fraction > end_fraction {
        return Ok(None);
    }

    let off_path = |fraction: f64| {
        fraction < -STOP_FRACTION_TOLERANCE || fraction > 1.0 + STOP_FRACTION_TOLERANCE
    };

    if off_path(start_fraction) || off_path(end_fraction) {
        return Ok(Some(MatchCandidate {
            trip,
            pickup,
            deposit,
            start_fraction,
            end_fraction,
            mode: MatchMode::Detour,
        }));
    }

    let start_fraction = start_fraction.clamp(0.0, 1.0);
    let end_fraction = end_fraction.clamp(0.0, 1.0);

    let at_stop = |fraction: f64| {
        stop_fractions
            .iter()
            .any(|&stop| (fraction - stop).abs() <= STOP_FRACTION_TOLERANCE)
    };

    let mode = if at_stop(start_fraction) && at_stop(end_fraction) {
        MatchMode::Exact
    } else {
        MatchMode::Partial
    };

    Ok(Some(MatchCandidate {
        trip,
        pickup,
        deposit,
        start_fraction,
        end_fraction,
        mode,
    }))
}
