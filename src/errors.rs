use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(thiserror::Error, Debug)]
pub enum RasterError {
    #[error(transparent)]
    GdalError(#[from] gdal::errors::GdalError),
    #[error("No raster file at {path:?}")]
    NotFound { path: PathBuf },
    #[error("Could not open {path:?} as a raster")]
    Open {
        path: PathBuf,
        source: gdal::errors::GdalError,
    },
    #[error("Driver {name} is not available")]
    Driver {
        name: String,
        source: gdal::errors::GdalError,
    },
    #[error("Could not copy raster to {path:?}")]
    Copy {
        path: PathBuf,
        source: gdal::errors::GdalError,
    },
    #[error("Output {path:?} already exists")]
    OutputExists { path: PathBuf },
    #[error("Reprojection into {path:?} failed: {message}")]
    Reproject { path: PathBuf, message: String },
    #[error("Unknown resampling method {0}")]
    UnknownResampling(String),
    #[error("Invalid spatial reference {definition}")]
    Crs {
        definition: String,
        source: gdal::errors::GdalError,
    },
}
