use geo::AffineTransform;
use gdal::GeoTransform;
use log::warn;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::components::file::RasterFile;

/// Transform gdal reports for rasters without georeferencing.
pub const DEFAULT_GEO_TRANSFORM: GeoTransform = [0., 1., 0., 0., 0., 1.];

/// Snapshot of the georeferencing of a raster.
///
/// Serializes to a mapping with the keys
/// `Width`, `Height`, `Projection` and `GeoTransform`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RasterMetadata {
    #[serde(rename = "Width")]
    pub width: usize,
    #[serde(rename = "Height")]
    pub height: usize,
    /// WKT
    #[serde(rename = "Projection")]
    pub projection: String,
    /// Gdal ordering: `[x_origin, x_res, row_rot, y_origin, col_rot, y_res]`.
    #[serde(rename = "GeoTransform")]
    pub geo_transform: GeoTransform,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum MetadataValue {
    Integer(usize),
    Text(String),
    Coefficients(GeoTransform),
}

impl From<&RasterFile> for RasterMetadata {
    fn from(file: &RasterFile) -> Self {
        let (width, height) = file.size();
        let geo_transform = file.geo_transform().unwrap_or_else(|err| {
            warn!("{:?} has no geotransform ({err}), using default", file.path());
            DEFAULT_GEO_TRANSFORM
        });
        Self {
            width,
            height,
            projection: file.projection(),
            geo_transform,
        }
    }
}

impl RasterMetadata {
    pub fn affine(&self) -> AffineTransform {
        let gt = self.geo_transform;
        AffineTransform::new(gt[1], gt[2], gt[0], gt[4], gt[5], gt[3])
    }

    /// (x, y) resolution, y is negative for north-up rasters.
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.geo_transform[1], self.geo_transform[5])
    }

    pub fn into_map(self) -> BTreeMap<&'static str, MetadataValue> {
        BTreeMap::from([
            ("Width", MetadataValue::Integer(self.width)),
            ("Height", MetadataValue::Integer(self.height)),
            ("Projection", MetadataValue::Text(self.projection)),
            ("GeoTransform", MetadataValue::Coefficients(self.geo_transform)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{AffineOps, Coord, Point};

    fn utm_metadata() -> RasterMetadata {
        RasterMetadata {
            width: 20,
            height: 10,
            projection: String::from("PROJCS[\"WGS 84 / UTM zone 33N\"]"),
            geo_transform: [500_000., 30., 0., 5_000_000., 0., -30.],
        }
    }

    #[test]
    fn affine_maps_pixel_to_geo() {
        let metadata = utm_metadata();
        let corner = Point::from(Coord { x: 20., y: 10. }).affine_transform(&metadata.affine());
        assert_eq!(corner.x_y(), (500_600., 4_999_700.));
    }

    #[test]
    fn pixel_size() {
        assert_eq!(utm_metadata().pixel_size(), (30., -30.));
    }

    #[test]
    fn serializes_with_four_keys() {
        let value = serde_json::to_value(utm_metadata()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, ["GeoTransform", "Height", "Projection", "Width"]);
        assert_eq!(object["Width"], 20);
        assert_eq!(object["GeoTransform"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn map_matches_serialized_form() {
        let metadata = utm_metadata();
        let from_map = serde_json::to_value(metadata.clone().into_map()).unwrap();
        assert_eq!(from_map, serde_json::to_value(metadata).unwrap());
    }
}
