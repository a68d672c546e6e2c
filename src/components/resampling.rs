use gdal_sys::GDALResampleAlg;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::RasterError;

/// Resampling kernel handed to gdal's warper.
///
/// Names follow gdalwarp's `-r` flag.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub enum Resampling {
    NearestNeighbour,
    #[default]
    Bilinear,
    Cubic,
    CubicSpline,
    Lanczos,
    Average,
    Mode,
    Max,
    Min,
    Median,
    Q1,
    Q3,
    Sum,
    Rms,
}

impl Resampling {
    pub fn name(&self) -> &'static str {
        match self {
            Resampling::NearestNeighbour => "near",
            Resampling::Bilinear => "bilinear",
            Resampling::Cubic => "cubic",
            Resampling::CubicSpline => "cubicspline",
            Resampling::Lanczos => "lanczos",
            Resampling::Average => "average",
            Resampling::Mode => "mode",
            Resampling::Max => "max",
            Resampling::Min => "min",
            Resampling::Median => "med",
            Resampling::Q1 => "q1",
            Resampling::Q3 => "q3",
            Resampling::Sum => "sum",
            Resampling::Rms => "rms",
        }
    }

    pub(crate) fn to_gdal(self) -> GDALResampleAlg::Type {
        match self {
            Resampling::NearestNeighbour => GDALResampleAlg::GRA_NearestNeighbour,
            Resampling::Bilinear => GDALResampleAlg::GRA_Bilinear,
            Resampling::Cubic => GDALResampleAlg::GRA_Cubic,
            Resampling::CubicSpline => GDALResampleAlg::GRA_CubicSpline,
            Resampling::Lanczos => GDALResampleAlg::GRA_Lanczos,
            Resampling::Average => GDALResampleAlg::GRA_Average,
            Resampling::Mode => GDALResampleAlg::GRA_Mode,
            Resampling::Max => GDALResampleAlg::GRA_Max,
            Resampling::Min => GDALResampleAlg::GRA_Min,
            Resampling::Median => GDALResampleAlg::GRA_Med,
            Resampling::Q1 => GDALResampleAlg::GRA_Q1,
            Resampling::Q3 => GDALResampleAlg::GRA_Q3,
            Resampling::Sum => GDALResampleAlg::GRA_Sum,
            Resampling::Rms => GDALResampleAlg::GRA_RMS,
        }
    }
}

impl fmt::Display for Resampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resampling {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "near" | "nearest" => Resampling::NearestNeighbour,
            "bilinear" => Resampling::Bilinear,
            "cubic" => Resampling::Cubic,
            "cubicspline" => Resampling::CubicSpline,
            "lanczos" => Resampling::Lanczos,
            "average" => Resampling::Average,
            "mode" => Resampling::Mode,
            "max" => Resampling::Max,
            "min" => Resampling::Min,
            "med" | "median" => Resampling::Median,
            "q1" => Resampling::Q1,
            "q3" => Resampling::Q3,
            "sum" => Resampling::Sum,
            "rms" => Resampling::Rms,
            _ => return Err(RasterError::UnknownResampling(s.to_string())),
        })
    }
}

impl TryFrom<String> for Resampling {
    type Error = RasterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Resampling> for String {
    fn from(value: Resampling) -> Self {
        value.name().to_string()
    }
}
