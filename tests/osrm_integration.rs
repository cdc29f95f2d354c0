//! Routing tests against a real OSRM instance (requires Docker).
//!
//! The first run downloads and preprocesses the Languedoc-Roussillon
//! extract; later runs reuse the dataset and the container.

mod fixtures;

use fixtures::lozere_locations::{FLORAC, MENDE, VILLAGES};
use fixtures::osrm;

use liane_routing::osrm::{OsrmConfig, OsrmRouting};
use liane_routing::simplify::simplify_route;
use liane_routing::solver::{order, RallyingPoint, Segment};
use liane_routing::traits::RouteLookup;

fn router(base_url: String) -> OsrmRouting {
    OsrmRouting::new(OsrmConfig {
        base_url,
        profile: "car".to_string(),
        timeout_secs: 10,
    })
    .expect("build OSRM client")
}

#[test]
fn osrm_route_carries_geometry_and_costs() {
    let (_container, base_url) = osrm::start_router().expect("start OSRM container");
    let router = router(base_url);

    let route = router
        .route(MENDE.coordinate(), FLORAC.coordinate())
        .expect("Mende and Florac are connected by the N106");

    assert!(route.duration > 0.0);
    assert!(route.distance > 10_000.0, "got {}", route.distance);
    assert!(route.geometry.len() >= 2);

    let stored = simplify_route(&route);
    assert!(stored.len() <= route.geometry.len());
    assert_eq!(stored.first(), route.geometry.first());
    assert_eq!(stored.last(), route.geometry.last());
}

#[test]
fn trip_orders_over_the_real_road_network() {
    let (_container, base_url) = osrm::start_router().expect("start OSRM container");
    let router = router(base_url);

    let mende = RallyingPoint::new("mende", MENDE.coordinate());
    let florac = RallyingPoint::new("florac", FLORAC.coordinate());
    let balsieges = RallyingPoint::new(VILLAGES[0].name, VILLAGES[0].coordinate());
    let ispagnac = RallyingPoint::new(VILLAGES[1].name, VILLAGES[1].coordinate());

    let trip = order(
        &router,
        1_700_000_000,
        &Segment::new(mende.clone(), florac.clone()),
        &[Segment::new(balsieges.clone(), ispagnac.clone())],
    )
    .expect("routing succeeds")
    .expect("a feasible order exists");

    assert_eq!(trip.len(), 4);
    assert_eq!(trip[0].rallying_point.id, "mende");
    assert_eq!(trip[3].rallying_point.id, "florac");
    for pair in trip.windows(2) {
        assert!(pair[1].duration >= pair[0].duration);
    }
}
