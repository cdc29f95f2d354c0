//! Polyline representation for route geometries.
//!
//! A polyline is an ordered, non-empty sequence of coordinates; insertion
//! order is the path order. Polylines are never mutated in place, only
//! replaced (by simplification or by a fresh router lookup). Encoding
//! to/from the compact wire format happens at API boundaries, not here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::{self, Coordinate};

/// Precondition violations on geometry inputs.
///
/// These are caller errors, distinct from the legitimate "no result"
/// outcomes (no feasible order, no detour solution) which are values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A polyline must contain at least one coordinate
    #[error("polyline must contain at least one coordinate")]
    EmptyPolyline,

    /// The operation needs more points than the polyline has
    #[error("polyline has {actual} points, operation requires at least {required}")]
    TooFewPoints { required: usize, actual: usize },
}

/// A route geometry as a decoded coordinate sequence, non-empty by
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a polyline from decoded coordinate points.
    pub fn new(points: Vec<Coordinate>) -> Result<Self, GeometryError> {
        if points.is_empty() {
            return Err(GeometryError::EmptyPolyline);
        }
        Ok(Self { points })
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> Coordinate {
        self.points[0]
    }

    pub fn last(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }

    /// Great-circle length of every vertex-to-vertex step, accumulated.
    ///
    /// `cumulative_lengths()[i]` is the distance in meters traveled from
    /// the start to vertex `i`; the final entry is the total length.
    pub fn cumulative_lengths(&self) -> Vec<f64> {
        let mut lengths = Vec::with_capacity(self.points.len());
        let mut total = 0.0;
        lengths.push(0.0);
        for pair in self.points.windows(2) {
            total += geo::distance(pair[0], pair[1]);
            lengths.push(total);
        }
        lengths
    }

    /// Total great-circle length in meters.
    pub fn total_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| geo::distance(pair[0], pair[1]))
            .sum()
    }

    /// Projects `target` onto the polyline and returns its position as a
    /// fraction of `total_length` (cumulative meters along the path).
    ///
    /// Nearest-point projection, not nearest-vertex: the winning segment is
    /// the one whose closest point (clamped to the segment) is nearest to
    /// `target` in planar degree space. The reported fraction uses the
    /// *unclamped* projection parameter on that segment, so a target lying
    /// beyond either end of the path yields a fraction outside [0, 1].
    pub fn project_fraction(
        &self,
        target: Coordinate,
        total_length: f64,
    ) -> Result<f64, GeometryError> {
        if self.points.len() < 2 {
            return Err(GeometryError::TooFewPoints {
                required: 2,
                actual: self.points.len(),
            });
        }

        let mut best_dist2 = f64::INFINITY;
        let mut best_segment = 0;
        let mut best_t = 0.0;

        for (i, pair) in self.points.windows(2).enumerate() {
            let dir = geo::sub(pair[1], pair[0]);
            let to_target = geo::sub(target, pair[0]);
            let seg_len2 = geo::dot(dir, dir);
            let t = if seg_len2 > 0.0 {
                geo::dot(to_target, dir) / seg_len2
            } else {
                0.0
            };
            let clamped = t.clamp(0.0, 1.0);
            let closest = Coordinate::new(
                pair[0].lat + clamped * dir.lat,
                pair[0].lng + clamped * dir.lng,
            );
            let offset = geo::sub(target, closest);
            let dist2 = geo::dot(offset, offset);
            if dist2 < best_dist2 {
                best_dist2 = dist2;
                best_segment = i;
                best_t = t;
            }
        }

        let lengths = self.cumulative_lengths();
        let segment_length = lengths[best_segment + 1] - lengths[best_segment];
        let along = lengths[best_segment] + best_t * segment_length;

        if total_length > 0.0 {
            Ok(along / total_length)
        } else {
            Ok(0.0)
        }
    }
}
