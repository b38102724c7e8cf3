//! Core data models for the geocoder.

pub mod info;

pub use info::{FeatureId, GeoDataInfo, NameField};
