//! Real Lozère rallying points for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. These are real, routable
//! locations on the Lozère road network, so they work against OSRM data
//! for the Languedoc-Roussillon extract.

use liane_routing::geo::Coordinate;

/// A named rallying point with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

// ============================================================================
// Towns (good trip extremities)
// ============================================================================

pub const MENDE: Location = Location::new("Mende", 44.5176, 3.5007);
pub const FLORAC: Location = Location::new("Florac", 44.3242, 3.5934);
pub const MARVEJOLS: Location = Location::new("Marvejols", 44.5542, 3.2931);
pub const LA_CANOURGUE: Location = Location::new("La Canourgue", 44.4336, 3.2153);

// ============================================================================
// Villages along the N88 / Tarn gorges (pickup and drop-off points)
// ============================================================================

pub const VILLAGES: &[Location] = &[
    Location::new("Balsièges", 44.4837, 3.4560),
    Location::new("Ispagnac", 44.3726, 3.5346),
    Location::new("Sainte-Enimie", 44.3653, 3.4110),
    Location::new("Chanac", 44.4653, 3.3432),
    Location::new("Barjac", 44.5066, 3.4116),
];
