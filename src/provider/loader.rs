//! Loading gzip-compressed GeoJSON boundary files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flate2::read::GzDecoder;
use geojson::GeoJson;
use tracing::info;

use super::boundary::BoundaryFeature;
use crate::error::LoadError;

/// The features of one boundary file, in file order
#[derive(Debug, Clone)]
pub struct FeatureCollection {
    pub source: PathBuf,
    pub features: Vec<Arc<BoundaryFeature>>,
}

/// Decompress a `.geojson.gz` file into a string.
///
/// The file and decoder are owned by this function and closed on every
/// return path.
pub fn read_gz_file(path: &Path) -> Result<String, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .map_err(|source| LoadError::Decompress {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(content)
}

/// Load and decode every feature of one boundary file.
///
/// Any feature without a usable id fails the whole file.
pub fn load_feature_collection(path: &Path) -> Result<FeatureCollection, LoadError> {
    let content = read_gz_file(path)?;

    let geojson: GeoJson = content.parse().map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        reason: format!("{}", e),
    })?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => {
            return Err(LoadError::NotFeatureCollection {
                path: path.to_path_buf(),
            })
        }
    };

    let mut features = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let boundary = BoundaryFeature::from_geojson(feature).ok_or_else(|| LoadError::MissingId {
            path: path.to_path_buf(),
            index,
        })?;
        features.push(Arc::new(boundary));
    }

    info!("Loaded {} features from {}", features.len(), path.display());

    Ok(FeatureCollection {
        source: path.to_path_buf(),
        features,
    })
}
