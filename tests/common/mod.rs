#![allow(dead_code)]

use gdal::{raster::Buffer, spatial_ref::SpatialRef, DriverManager, GeoTransform};
use std::path::Path;

pub const SIZE: (usize, usize) = (20, 10);
pub const UTM_33N: u32 = 32633;
pub const WGS84: u32 = 4326;
pub const UTM_TRANSFORM: GeoTransform = [500_000., 30., 0., 5_000_000., 0., -30.];
pub const WGS84_TRANSFORM: GeoTransform = [14.9, 0.01, 0., 45.1, 0., -0.01];

/// Gradient so bilinear resampling on an aligned grid is exact.
pub fn pixel(x: usize, y: usize) -> u8 {
    (x + 2 * y) as u8
}

/// Single band u8 GeoTIFF of `SIZE` pixels.
pub fn write_geotiff(
    path: &Path,
    crs: Option<u32>,
    geo_transform: Option<GeoTransform>,
) -> gdal::errors::Result<()> {
    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut dataset = driver.create_with_band_type::<u8, _>(path, SIZE.0, SIZE.1, 1)?;
    if let Some(geo_transform) = geo_transform {
        dataset.set_geo_transform(&geo_transform)?;
    }
    if let Some(epsg) = crs {
        dataset.set_spatial_ref(&SpatialRef::from_epsg(epsg)?)?;
    }
    let data = (0..SIZE.1)
        .flat_map(|y| (0..SIZE.0).map(move |x| pixel(x, y)))
        .collect();
    let mut buffer = Buffer::new(SIZE, data);
    dataset.rasterband(1)?.write((0, 0), SIZE, &mut buffer)?;
    Ok(())
}

pub fn utm_raster(path: &Path) -> gdal::errors::Result<()> {
    write_geotiff(path, Some(UTM_33N), Some(UTM_TRANSFORM))
}

pub fn wgs84_raster(path: &Path) -> gdal::errors::Result<()> {
    write_geotiff(path, Some(WGS84), Some(WGS84_TRANSFORM))
}

/// Row-major pixels of the first band.
pub fn read_pixels(path: &Path) -> gdal::errors::Result<Vec<u8>> {
    let dataset = gdal::Dataset::open(path)?;
    let size = dataset.raster_size();
    let buffer = dataset.rasterband(1)?.read_as::<u8>((0, 0), size, size, None)?;
    Ok(buffer.data().to_vec())
}

pub fn epsg_of(projection: &str) -> gdal::errors::Result<i32> {
    SpatialRef::from_wkt(projection)?.auth_code()
}
