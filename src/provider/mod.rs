//! Geo-data providers: boundary loading, point-in-polygon lookups and
//! the key-addressed provider tree used for reverse geocoding.

mod boundary;
mod geometry;
mod loader;
mod service;
mod tree;

pub use boundary::{parse_parent_ids, BoundaryFeature, BoundaryGeometry};
pub use loader::{load_feature_collection, read_gz_file, FeatureCollection};
pub use service::{Geocoder, ReverseResult};
pub use tree::{BoundaryProvider, FeatureIdMap, GeoDataProvider};
