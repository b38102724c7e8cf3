//! Point-in-polygon tests for boundary geometries.

use geo::coordinate_position::{coord_pos_relative_to_ring, CoordPos};
use geo::{Point, Polygon};

use super::boundary::BoundaryGeometry;

impl BoundaryGeometry {
    /// True if the point lies inside the geometry or on its outer boundary.
    ///
    /// A multi-polygon contains the point when any member polygon does.
    /// Points inside a hole or on a hole's ring are not contained.
    pub fn contains_point(&self, point: &Point<f64>) -> bool {
        match self {
            BoundaryGeometry::MultiPolygon(multi) => {
                multi.iter().any(|polygon| polygon_covers(polygon, point))
            }
            BoundaryGeometry::Polygon(polygon) => polygon_covers(polygon, point),
        }
    }
}

fn polygon_covers(polygon: &Polygon<f64>, point: &Point<f64>) -> bool {
    let coord = point.0;
    if coord_pos_relative_to_ring(coord, polygon.exterior()) == CoordPos::Outside {
        return false;
    }

    polygon
        .interiors()
        .iter()
        .all(|hole| coord_pos_relative_to_ring(coord, hole) == CoordPos::Outside)
}
