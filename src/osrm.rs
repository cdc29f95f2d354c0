//! OSRM HTTP adapter for point-to-point routes.

use serde::Deserialize;

use crate::geo::Coordinate;
use crate::polyline::Polyline;
use crate::traits::{Route, RouteLookup, RouteUnavailable};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Blocking OSRM client for the `/route` service.
///
/// Failures surface as [`RouteUnavailable`]; callers decide whether a
/// missing route aborts their operation (they all do, per the engine's
/// contracts).
#[derive(Debug, Clone)]
pub struct OsrmRouting {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmRouting {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl RouteLookup for OsrmRouting {
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<Route, RouteUnavailable> {
        let url = format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson&alternatives=false",
            self.config.base_url, self.config.profile, from.lng, from.lat, to.lng, to.lat
        );

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>())
            .map_err(|err| RouteUnavailable::new(from, to, err.to_string()))?;

        let best = response
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RouteUnavailable::new(from, to, "empty route set"))?;

        let points = best
            .geometry
            .coordinates
            .into_iter()
            .map(|[lng, lat]| Coordinate::new(lat, lng))
            .collect();
        let geometry = Polyline::new(points)
            .map_err(|err| RouteUnavailable::new(from, to, err.to_string()))?;

        Ok(Route {
            geometry,
            duration: best.duration,
            distance: best.distance,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    duration: f64,
    distance: f64,
    geometry: OsrmGeometry,
}

/// GeoJSON LineString; OSRM reports coordinates as [lng, lat].
#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}
