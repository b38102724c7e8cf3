//! Reverse geocoding over a built provider tree.

use std::path::PathBuf;

use tracing::{debug, info};

use super::tree::{BoundaryProvider, GeoDataProvider};
use crate::error::{GeocodeError, LoadError};
use crate::models::{FeatureId, GeoDataInfo, NameField};

/// Outcome of a reverse lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseResult {
    pub hit: bool,
    pub id: Option<FeatureId>,
    pub name: String,
}

/// Read-only geocoding context owning the root of the provider tree.
///
/// Built once at startup and shared between request handlers.
pub struct Geocoder {
    root: BoundaryProvider,
}

impl Geocoder {
    pub fn new(root: BoundaryProvider) -> Self {
        Self { root }
    }

    /// Load one provider per key and register them under a fresh root.
    ///
    /// Keys are processed in iteration order; when two keys share an id
    /// the earlier registration wins. Any load failure aborts the build.
    pub fn build<I>(entries: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (String, Vec<PathBuf>)>,
    {
        let mut root = BoundaryProvider::root();
        for (key, files) in entries {
            let provider = BoundaryProvider::load(key.clone(), &files)?;
            root.register_child(key, Box::new(provider));
        }

        info!(
            "Provider tree built: {} keys, {} ids",
            root.child_keys().len(),
            root.id_map().len()
        );
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &BoundaryProvider {
        &self.root
    }

    /// Containment query scoped to the provider registered under `key`
    pub fn contains(
        &self,
        key: &str,
        longitude: f64,
        latitude: f64,
    ) -> Result<Option<FeatureId>, GeocodeError> {
        let provider = self
            .root
            .get_provider(key)
            .ok_or_else(|| GeocodeError::UnknownKey(key.to_string()))?;
        Ok(provider.contains(longitude, latitude))
    }

    /// Metadata for `id` from the merged id map of the whole tree
    pub fn get_info(&self, id: FeatureId) -> Option<GeoDataInfo> {
        self.root.get_info(id)
    }

    /// Place label for `id`: each resolvable parent's name is prepended,
    /// followed by a space, in `parent_ids` order. Unknown parents are
    /// skipped. Returns `None` when `id` itself is unknown.
    pub fn resolve_name(&self, id: FeatureId, field: NameField) -> Option<String> {
        let info = self.get_info(id)?;
        let mut label = info.name_for(field).to_string();

        for parent_id in &info.parent_ids {
            match self.get_info(*parent_id) {
                Some(parent) => label = format!("{} {}", parent.name_for(field), label),
                None => debug!("Parent {} of {} not found", parent_id, id),
            }
        }

        Some(label)
    }

    /// Find the feature containing the point within `key` and assemble its
    /// full place name.
    pub fn reverse(
        &self,
        key: &str,
        longitude: f64,
        latitude: f64,
        field: NameField,
    ) -> Result<ReverseResult, GeocodeError> {
        let Some(id) = self.contains(key, longitude, latitude)? else {
            return Ok(ReverseResult::default());
        };

        Ok(ReverseResult {
            hit: true,
            id: Some(id),
            name: self.resolve_name(id, field).unwrap_or_default(),
        })
    }
}
