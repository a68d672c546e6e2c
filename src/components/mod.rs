pub mod crs;
pub mod file;
pub mod metadata;
pub mod reproject;
pub mod resampling;

pub use crs::parse_crs;
pub use file::RasterFile;
pub use metadata::{MetadataValue, RasterMetadata};
pub use reproject::{ReprojectOptions, Reprojector};
pub use resampling::Resampling;
