//! Core domain traits for the routing engine.
//!
//! These are intentionally minimal and domain-agnostic. The engine never
//! talks to a routing backend directly; concrete apps inject a
//! [`RouteLookup`] implementation (HTTP router, cached table, mock graph).

use std::hash::Hash;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::Coordinate;
use crate::polyline::Polyline;

/// Unique identifier for engine entities (rallying points, trips).
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// The router could not produce a route between two coordinates.
///
/// Raised for unreachable backends as well as genuinely unroutable pairs.
/// The engine never retries or degrades; this propagates to the caller
/// unchanged.
#[derive(Debug, Clone, Error)]
#[error("no route from ({:.6}, {:.6}) to ({:.6}, {:.6}): {reason}", .from.lat, .from.lng, .to.lat, .to.lng)]
pub struct RouteUnavailable {
    pub from: Coordinate,
    pub to: Coordinate,
    pub reason: String,
}

impl RouteUnavailable {
    pub fn new(from: Coordinate, to: Coordinate, reason: impl Into<String>) -> Self {
        Self {
            from,
            to,
            reason: reason.into(),
        }
    }
}

/// The atomic result of a router lookup: a geometry plus its scalar cost.
///
/// Immutable; cacheable by its (from, to) endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub geometry: Polyline,
    /// Travel time in seconds.
    pub duration: f64,
    /// Travel distance in meters.
    pub distance: f64,
}

/// Sentinel delta meaning "no detour solution exists".
///
/// Legacy wire value; callers should go through
/// [`DeltaRoute::is_no_solution`] rather than compare against it directly.
pub const NO_DETOUR_DELTA: f64 = -1.0;

/// A route plus the signed travel-time delta it costs (or saves) relative
/// to a baseline route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaRoute {
    pub route: Route,
    /// Extra seconds relative to the baseline, or [`NO_DETOUR_DELTA`].
    pub delta: f64,
}

impl DeltaRoute {
    pub fn is_no_solution(&self) -> bool {
        self.delta == NO_DETOUR_DELTA
    }
}

/// Provides point-to-point routes.
///
/// This is the engine's only I/O seam. Implementations may call an HTTP
/// routing service, consult a cached table, or walk a mock graph; the
/// engine must not depend on which. Lookups for different coordinate pairs
/// may be issued concurrently, so implementations must be `Sync`.
pub trait RouteLookup: Sync {
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<Route, RouteUnavailable>;
}
