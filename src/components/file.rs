use gdal::{Dataset as GdalDataset, GeoTransform};
use log::debug;
use std::path::{Path, PathBuf};

use crate::{
    components::metadata::RasterMetadata,
    errors::{RasterError, Result},
};

/// Raster opened through gdal.
///
/// The dataset is closed when the file is dropped.
#[derive(Shrinkwrap, Debug)]
pub struct RasterFile {
    path: PathBuf,
    #[shrinkwrap(main_field)]
    dataset: GdalDataset,
}

/// Paths gdal resolves itself, e.g. `/vsizip/...` or `SENTINEL2_L2A:...`.
fn is_virtual(path: &Path) -> bool {
    let path = path.to_string_lossy();
    if path.starts_with("/vsi") {
        return true;
    }
    match path.split_once(':') {
        Some((prefix, _)) => is_driver_prefix(prefix),
        None => false,
    }
}

/// Driver prefixes are upper case, e.g. `NETCDF`, `HDF5`, `SENTINEL2_L2A`.
fn is_driver_prefix(prefix: &str) -> bool {
    prefix
        .chars()
        .next()
        .is_some_and(|first| first.is_ascii_uppercase())
        && prefix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

impl RasterFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !is_virtual(path) && !path.exists() {
            return Err(RasterError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let dataset = GdalDataset::open(path).map_err(|source| RasterError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self {
            path: path.to_path_buf(),
            dataset,
        };
        debug!(
            "opened {:?} ({}, {:?}, {} bands)",
            file.path,
            file.driver_name(),
            file.size(),
            file.band_count()
        );
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// (width, height) in pixels.
    pub fn size(&self) -> (usize, usize) {
        self.dataset.raster_size()
    }

    pub fn band_count(&self) -> usize {
        self.dataset.raster_count()
    }

    pub fn driver_name(&self) -> String {
        self.dataset.driver().short_name()
    }

    /// Projection as WKT, empty if the raster has none.
    pub fn projection(&self) -> String {
        self.dataset.projection()
    }

    pub fn geo_transform(&self) -> Result<GeoTransform> {
        Ok(self.dataset.geo_transform()?)
    }

    pub fn metadata(&self) -> RasterMetadata {
        RasterMetadata::from(self)
    }
}
