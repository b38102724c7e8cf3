//! Regeo - offline reverse geocoding over administrative boundaries
//!
//! This library provides the provider tree and lookup types used by the
//! server binary.

pub mod config;
pub mod error;
pub mod models;
pub mod provider;

pub use error::{GeocodeError, LoadError};
pub use models::{FeatureId, GeoDataInfo, NameField};
pub use provider::{BoundaryProvider, GeoDataProvider, Geocoder, ReverseResult};
