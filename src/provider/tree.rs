//! Provider nodes and their composition into a tree.
//!
//! A root provider owns one child per region key. Containment is always
//! answered by a single provider; id lookups on the root see every
//! descendant's features because registration copies their ids upward.

use std::path::Path;
use std::sync::Arc;

use geo::Point;
use hashbrown::HashMap;
use tracing::{debug, info};

use super::boundary::BoundaryFeature;
use super::loader::{load_feature_collection, FeatureCollection};
use crate::error::LoadError;
use crate::models::{FeatureId, GeoDataInfo};

/// Features of a provider indexed by id
pub type FeatureIdMap = HashMap<FeatureId, Arc<BoundaryFeature>>;

/// Capabilities shared by every node of the provider tree.
pub trait GeoDataProvider: Send + Sync {
    /// Key this provider was registered under ("" for the root)
    fn key(&self) -> &str;

    /// Id of the first feature, in file-then-feature order, whose geometry
    /// contains the point. `None` when nothing matches.
    fn contains(&self, longitude: f64, latitude: f64) -> Option<FeatureId>;

    /// Metadata for `id` from this provider's id map
    fn get_info(&self, id: FeatureId) -> Option<GeoDataInfo>;

    fn id_map(&self) -> &FeatureIdMap;

    /// Child registered under exactly `key`
    fn get_provider(&self, key: &str) -> Option<&dyn GeoDataProvider>;

    /// Attach `child` under `key` and absorb its ids. Ids already known to
    /// this provider keep their current mapping.
    fn register_child(&mut self, key: String, child: Box<dyn GeoDataProvider>);

    /// Number of features with geometry owned directly by this provider
    fn feature_count(&self) -> usize;
}

/// Provider backed by in-memory boundary collections.
#[derive(Default)]
pub struct BoundaryProvider {
    key: String,
    collections: Vec<FeatureCollection>,
    id_map: FeatureIdMap,
    children: HashMap<String, Box<dyn GeoDataProvider>>,
}

impl BoundaryProvider {
    /// Empty provider used purely as a composition point
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a provider from already decoded collections.
    ///
    /// Duplicate ids inside one provider overwrite earlier ones.
    pub fn from_collections(key: impl Into<String>, collections: Vec<FeatureCollection>) -> Self {
        let mut id_map = FeatureIdMap::new();
        for feature in collections.iter().flat_map(|c| c.features.iter()) {
            if id_map.insert(feature.id(), Arc::clone(feature)).is_some() {
                debug!("Duplicate feature id {} overwritten", feature.id());
            }
        }

        Self {
            key: key.into(),
            collections,
            id_map,
            children: HashMap::new(),
        }
    }

    /// Load every file for `key`. Fails as a whole if any file fails.
    pub fn load<P: AsRef<Path>>(key: impl Into<String>, files: &[P]) -> Result<Self, LoadError> {
        let key = key.into();
        let collections = files
            .iter()
            .map(|path| load_feature_collection(path.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let provider = Self::from_collections(key, collections);
        info!(
            "Provider '{}' ready: {} files, {} ids",
            provider.key,
            provider.collections.len(),
            provider.id_map.len()
        );
        Ok(provider)
    }

    /// Keys of the registered children, sorted
    pub fn child_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.children.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl GeoDataProvider for BoundaryProvider {
    fn key(&self) -> &str {
        &self.key
    }

    fn contains(&self, longitude: f64, latitude: f64) -> Option<FeatureId> {
        let point = Point::new(longitude, latitude);

        self.collections
            .iter()
            .flat_map(|c| c.features.iter())
            .find(|feature| {
                feature
                    .geometry
                    .as_ref()
                    .is_some_and(|geometry| geometry.contains_point(&point))
            })
            .map(|feature| feature.id())
    }

    fn get_info(&self, id: FeatureId) -> Option<GeoDataInfo> {
        self.id_map.get(&id).map(|feature| feature.info.clone())
    }

    fn id_map(&self) -> &FeatureIdMap {
        &self.id_map
    }

    fn get_provider(&self, key: &str) -> Option<&dyn GeoDataProvider> {
        self.children.get(key).map(|child| &**child)
    }

    fn register_child(&mut self, key: String, child: Box<dyn GeoDataProvider>) {
        let mut absorbed = 0;
        for (id, feature) in child.id_map() {
            if !self.id_map.contains_key(id) {
                self.id_map.insert(*id, Arc::clone(feature));
                absorbed += 1;
            }
        }
        debug!(
            "Registered '{}' under '{}': absorbed {} of {} ids",
            key,
            self.key,
            absorbed,
            child.id_map().len()
        );

        self.children.insert(key, child);
    }

    fn feature_count(&self) -> usize {
        self.collections
            .iter()
            .flat_map(|c| c.features.iter())
            .filter(|feature| feature.geometry.is_some())
            .count()
    }
}
