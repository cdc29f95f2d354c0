//! Coordinate primitives: great-circle distance and planar vector math.
//!
//! Distances are in meters, coordinates in decimal degrees. The planar
//! operations (`cross`, `dot`, `sub`) treat a coordinate as the 2-vector
//! (lng, lat), longitude being the x axis. Every geometric routine in
//! this crate uses that axis order.

use serde::{Deserialize, Serialize};

/// Earth radius used by the platform's distance thresholds, in meters.
///
/// This is the value the stored trip geometries and search radii were
/// calibrated against; it is intentionally not the textbook 6 371 000 m.
pub const EARTH_RADIUS_M: f64 = 6_376_500.0;

/// Tolerance, in degrees per axis, under which two coordinates are the
/// same physical location (~11 cm).
pub const COORDINATE_EPSILON: f64 = 1e-6;

/// A (latitude, longitude) pair in decimal degrees.
///
/// `PartialEq` is exact bitwise comparison; use [`approx_eq`] for the
/// "same physical location" question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance between two coordinates in meters (haversine).
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// 2D cross product of `a` and `b` taken as (lng, lat) vectors.
pub fn cross(a: Coordinate, b: Coordinate) -> f64 {
    a.lng * b.lat - a.lat * b.lng
}

/// Dot product of `a` and `b` taken as (lng, lat) vectors.
pub fn dot(a: Coordinate, b: Coordinate) -> f64 {
    a.lng * b.lng + a.lat * b.lat
}

/// Component-wise difference `a - b`.
pub fn sub(a: Coordinate, b: Coordinate) -> Coordinate {
    Coordinate::new(a.lat - b.lat, a.lng - b.lng)
}

/// Fuzzy coordinate equality: both axes within `epsilon` degrees.
pub fn approx_eq(a: Coordinate, b: Coordinate, epsilon: f64) -> bool {
    (a.lat - b.lat).abs() < epsilon && (a.lng - b.lng).abs() < epsilon
}
