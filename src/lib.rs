//! Open rasters with gdal, read their georeferencing and reproject them.
//!
//! ```no_run
//! use rasterproj::{parse_crs, raster_metadata, read_raster_file, reproject_raster};
//!
//! let raster = read_raster_file("data/dem.tif")?;
//! println!("{:?}", raster_metadata(&raster));
//! let target = parse_crs("EPSG:3857")?;
//! let output = reproject_raster(&raster, "data/dem_3857.tif", &target)?;
//! # Ok::<(), rasterproj::RasterError>(())
//! ```

#[macro_use]
extern crate shrinkwraprs;

mod components;
mod errors;

pub use components::{
    parse_crs, MetadataValue, RasterFile, RasterMetadata, ReprojectOptions, Reprojector,
    Resampling,
};
pub use errors::{RasterError, Result};

pub use gdal::spatial_ref::SpatialRef;

use std::path::{Path, PathBuf};

/// Opens `path` as a raster.
pub fn read_raster_file<P: AsRef<Path>>(path: P) -> Result<RasterFile> {
    RasterFile::open(path)
}

/// `Width`, `Height`, `Projection` and `GeoTransform` of `raster`.
pub fn raster_metadata(raster: &RasterFile) -> RasterMetadata {
    raster.metadata()
}

/// Reprojects `raster` into `target`, writing a GeoTIFF at `output_path`
/// with bilinear resampling. See [`Reprojector`] for other settings.
pub fn reproject_raster<P: AsRef<Path>>(
    raster: &RasterFile,
    output_path: P,
    target: &SpatialRef,
) -> Result<PathBuf> {
    Reprojector::default().reproject(raster, output_path, target)
}
