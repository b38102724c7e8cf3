//! Boundary feature records decoded from GeoJSON.

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::{FeatureId, GeoDataInfo};

/// Geometry kinds that take part in containment queries
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

/// A single boundary with its decoded metadata.
///
/// Features whose geometry is not a polygon or multi-polygon keep
/// `geometry: None`; they can still be resolved by id as ancestors.
#[derive(Debug, Clone)]
pub struct BoundaryFeature {
    pub info: GeoDataInfo,
    pub geometry: Option<BoundaryGeometry>,
}

impl BoundaryFeature {
    /// Decode a GeoJSON feature. Returns `None` when the feature has no
    /// usable `id` property.
    pub fn from_geojson(feature: geojson::Feature) -> Option<Self> {
        let properties = feature.properties.unwrap_or_default();
        let info = decode_properties(&properties)?;

        let geometry = match feature.geometry {
            Some(geometry) => convert_geometry(geometry.value),
            None => None,
        };
        if geometry.is_none() {
            debug!("Feature {} has no polygonal geometry", info.id);
        }

        Some(Self { info, geometry })
    }

    pub fn id(&self) -> FeatureId {
        self.info.id
    }
}

/// Read the `id` property. Floats are truncated; zero counts as missing.
pub fn feature_id(properties: &Map<String, Value>) -> Option<FeatureId> {
    let value = properties.get("id")?;
    let id = value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))?;
    (id != 0).then_some(id)
}

/// Split a `parents` string into ids, dropping tokens that don't parse
pub fn parse_parent_ids(raw: &str) -> Vec<FeatureId> {
    raw.split(',')
        .filter_map(|token| token.parse::<FeatureId>().ok())
        .collect()
}

fn decode_properties(properties: &Map<String, Value>) -> Option<GeoDataInfo> {
    let id = feature_id(properties)?;

    let parent_ids = properties
        .get("parents")
        .and_then(Value::as_str)
        .map(parse_parent_ids)
        .unwrap_or_default();

    let text = |key: &str| {
        properties
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Some(GeoDataInfo {
        id,
        parent_ids,
        name: text("name"),
        local_name: text("local_name"),
        name_en: text("name_en"),
    })
}

fn convert_geometry(value: geojson::Value) -> Option<BoundaryGeometry> {
    match value {
        geojson::Value::Polygon(rings) => Some(BoundaryGeometry::Polygon(to_polygon(&rings)?)),
        geojson::Value::MultiPolygon(polygons) => {
            let polygons: Vec<Polygon<f64>> =
                polygons.iter().filter_map(|rings| to_polygon(rings)).collect();
            Some(BoundaryGeometry::MultiPolygon(MultiPolygon::new(polygons)))
        }
        _ => None,
    }
}

/// First ring is the exterior, the rest are holes
fn to_polygon(rings: &[Vec<Vec<f64>>]) -> Option<Polygon<f64>> {
    let (exterior, holes) = rings.split_first()?;
    Some(Polygon::new(
        to_ring(exterior),
        holes.iter().map(|ring| to_ring(ring)).collect(),
    ))
}

fn to_ring(positions: &[Vec<f64>]) -> LineString<f64> {
    positions
        .iter()
        .filter(|p| p.len() >= 2)
        .map(|p| Coord { x: p[0], y: p[1] })
        .collect::<Vec<_>>()
        .into()
}
