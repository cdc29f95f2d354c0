//! Test fixtures for liane-routing.
//!
//! Provides realistic test data and harness support:
//! - Real Lozère rallying points (from OpenStreetMap)
//! - OSRM dataset preparation and container startup for the
//!   Docker-gated integration tests

pub mod lozere_locations;
pub mod osrm;

pub use lozere_locations::*;
