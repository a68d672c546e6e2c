use gdal::spatial_ref::SpatialRef;

use crate::errors::{RasterError, Result};

/// Builds a spatial reference from anything gdal's `SetFromUserInput` accepts:
/// `EPSG:4326`, WKT, PROJ strings.
pub fn parse_crs(definition: &str) -> Result<SpatialRef> {
    SpatialRef::from_definition(definition).map_err(|source| RasterError::Crs {
        definition: definition.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsg_definition() {
        let srs = parse_crs("EPSG:32633").unwrap();
        assert_eq!(srs.auth_code().unwrap(), 32633);
    }

    #[test]
    fn wkt_definition() {
        let wkt = SpatialRef::from_epsg(4326).unwrap().to_wkt().unwrap();
        assert!(parse_crs(&wkt).unwrap() == SpatialRef::from_epsg(4326).unwrap());
    }

    #[test]
    fn invalid_definition() {
        let err = parse_crs("not a crs").unwrap_err();
        assert!(matches!(err, RasterError::Crs { definition, .. } if definition == "not a crs"));
    }
}
