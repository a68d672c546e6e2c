use gdal::{
    errors::GdalError, raster::RasterCreationOptions, spatial_ref::SpatialRef,
    Dataset as GdalDataset, DriverManager,
};
use gdal_sys::CPLErr;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    ffi::{CStr, CString},
    path::{Path, PathBuf},
    ptr,
};

use crate::{
    components::{file::RasterFile, resampling::Resampling},
    errors::{RasterError, Result},
};

pub const DEFAULT_DRIVER: &str = "GTiff";

/// Settings of a reprojection.
///
/// Every field has a default, so partial configs deserialize.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReprojectOptions {
    /// Gdal short name of the output driver.
    pub driver: String,
    pub resampling: Resampling,
    /// `KEY=VALUE` creation options passed to the driver.
    pub creation_options: BTreeMap<String, String>,
    /// Warp memory limit in bytes, `0` lets gdal decide.
    pub memory_limit: f64,
    /// Approximation error threshold in pixels, `0` for exact transforms.
    pub max_error: f64,
    /// Replace an already existing output.
    pub overwrite: bool,
}

impl Default for ReprojectOptions {
    fn default() -> Self {
        Self {
            driver: DEFAULT_DRIVER.to_string(),
            resampling: Resampling::default(),
            creation_options: BTreeMap::new(),
            memory_limit: 0.,
            max_error: 0.,
            overwrite: true,
        }
    }
}

impl ReprojectOptions {
    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = driver.into();
        self
    }

    pub fn with_resampling(mut self, resampling: Resampling) -> Self {
        self.resampling = resampling;
        self
    }

    pub fn with_creation_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.creation_options.insert(key.into(), value.into());
        self
    }

    pub fn with_memory_limit(mut self, bytes: f64) -> Self {
        self.memory_limit = bytes;
        self
    }

    pub fn with_max_error(mut self, pixels: f64) -> Self {
        self.max_error = pixels;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    fn gdal_creation_options(&self) -> Result<RasterCreationOptions> {
        let mut options = RasterCreationOptions::new();
        for (key, value) in &self.creation_options {
            options.set_name_value(key, value)?;
        }
        Ok(options)
    }
}

/// Message of the last gdal error, clearing it.
fn last_gdal_message() -> String {
    let message = unsafe { CStr::from_ptr(gdal_sys::CPLGetLastErrorMsg()) }
        .to_string_lossy()
        .into_owned();
    unsafe { gdal_sys::CPLErrorReset() };
    message
}

#[derive(Debug, Default, Clone)]
pub struct Reprojector {
    options: ReprojectOptions,
}

impl Reprojector {
    pub fn new(options: ReprojectOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReprojectOptions {
        &self.options
    }

    /// Copies `source` to `output` with the configured driver,
    /// tags the copy with `target` and warps the source pixels into it.
    ///
    /// The source projection is read from `source` at call time.
    /// The output is closed before its path is returned.
    pub fn reproject<P: AsRef<Path>>(
        &self,
        source: &RasterFile,
        output: P,
        target: &SpatialRef,
    ) -> Result<PathBuf> {
        let output = output.as_ref();
        let options = &self.options;

        let driver =
            DriverManager::get_driver_by_name(&options.driver).map_err(|source| {
                RasterError::Driver {
                    name: options.driver.clone(),
                    source,
                }
            })?;

        if output.exists() {
            if !options.overwrite {
                return Err(RasterError::OutputExists {
                    path: output.to_path_buf(),
                });
            }
            warn!("overwriting {:?}", output);
        }

        let target_wkt = target.to_wkt()?;
        let source_wkt = source.projection();
        let source_dataset: &GdalDataset = source;
        info!(
            "reprojecting {:?} into {:?} ({}, {})",
            source.path(),
            output,
            options.driver,
            options.resampling
        );

        let mut copy = source_dataset
            .create_copy(&driver, output, &options.gdal_creation_options()?)
            .map_err(|source| RasterError::Copy {
                path: output.to_path_buf(),
                source,
            })?;
        copy.set_projection(&target_wkt)?;

        let reprojection_error = |message| RasterError::Reproject {
            path: output.to_path_buf(),
            message,
        };
        warp(source_dataset, &source_wkt, &copy, &target_wkt, options).map_err(reprojection_error)?;
        // GTiff flushes on close, so write failures only surface here.
        copy.close().map_err(|err| reprojection_error(err.to_string()))?;

        Ok(output.to_path_buf())
    }
}

fn warp(
    source: &GdalDataset,
    source_wkt: &str,
    destination: &GdalDataset,
    destination_wkt: &str,
    options: &ReprojectOptions,
) -> std::result::Result<(), String> {
    let source_wkt = CString::new(source_wkt).map_err(|err| GdalError::from(err).to_string())?;
    let destination_wkt =
        CString::new(destination_wkt).map_err(|err| GdalError::from(err).to_string())?;
    let rv = unsafe {
        gdal_sys::GDALReprojectImage(
            source.c_dataset(),
            source_wkt.as_ptr(),
            destination.c_dataset(),
            destination_wkt.as_ptr(),
            options.resampling.to_gdal(),
            options.memory_limit,
            options.max_error,
            None,
            ptr::null_mut(),
            ptr::null_mut(),
        )
    };
    if rv != CPLErr::CE_None {
        return Err(last_gdal_message());
    }
    Ok(())
}
