//! Enumerated qualifier values: crop modes, gravities and delivery formats

use std::str::FromStr;

use super::value::Scalar;
use crate::error::{Result, TransformError};

/// How an asset is resized or cropped to the requested dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMode {
    Scale,
    Fit,
    Limit,
    Mfit,
    Fill,
    Lfill,
    Pad,
    Lpad,
    Mpad,
    FillPad,
    Crop,
    Thumb,
    Auto,
    ImaggaScale,
    ImaggaCrop,
}

impl CropMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scale => "scale",
            Self::Fit => "fit",
            Self::Limit => "limit",
            Self::Mfit => "mfit",
            Self::Fill => "fill",
            Self::Lfill => "lfill",
            Self::Pad => "pad",
            Self::Lpad => "lpad",
            Self::Mpad => "mpad",
            Self::FillPad => "fill_pad",
            Self::Crop => "crop",
            Self::Thumb => "thumb",
            Self::Auto => "auto",
            Self::ImaggaScale => "imagga_scale",
            Self::ImaggaCrop => "imagga_crop",
        }
    }
}

impl FromStr for CropMode {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "scale" => Ok(Self::Scale),
            "fit" => Ok(Self::Fit),
            "limit" => Ok(Self::Limit),
            "mfit" => Ok(Self::Mfit),
            "fill" => Ok(Self::Fill),
            "lfill" => Ok(Self::Lfill),
            "pad" => Ok(Self::Pad),
            "lpad" => Ok(Self::Lpad),
            "mpad" => Ok(Self::Mpad),
            "fill_pad" => Ok(Self::FillPad),
            "crop" => Ok(Self::Crop),
            "thumb" => Ok(Self::Thumb),
            "auto" => Ok(Self::Auto),
            "imagga_scale" => Ok(Self::ImaggaScale),
            "imagga_crop" => Ok(Self::ImaggaCrop),
            _ => Err(TransformError::invalid_input(
                "crop",
                format!("unknown crop mode: {}", s),
            )),
        }
    }
}

impl From<CropMode> for Scalar {
    fn from(mode: CropMode) -> Self {
        Scalar::Text(mode.as_str().to_string())
    }
}

/// Anchor point for cropping and layer placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    Center,
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    Face,
    Faces,
    Auto,
    Custom,
}

impl Gravity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::NorthEast => "north_east",
            Self::NorthWest => "north_west",
            Self::SouthEast => "south_east",
            Self::SouthWest => "south_west",
            Self::Face => "face",
            Self::Faces => "faces",
            Self::Auto => "auto",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for Gravity {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "center" | "c" => Ok(Self::Center),
            "north" | "n" => Ok(Self::North),
            "south" | "s" => Ok(Self::South),
            "east" | "e" => Ok(Self::East),
            "west" | "w" => Ok(Self::West),
            "north_east" | "ne" => Ok(Self::NorthEast),
            "north_west" | "nw" => Ok(Self::NorthWest),
            "south_east" | "se" => Ok(Self::SouthEast),
            "south_west" | "sw" => Ok(Self::SouthWest),
            "face" => Ok(Self::Face),
            "faces" => Ok(Self::Faces),
            "auto" => Ok(Self::Auto),
            "custom" => Ok(Self::Custom),
            _ => Err(TransformError::invalid_input(
                "gravity",
                format!("unknown gravity: {}", s),
            )),
        }
    }
}

impl From<Gravity> for Scalar {
    fn from(gravity: Gravity) -> Self {
        Scalar::Text(gravity.as_str().to_string())
    }
}

/// Delivery format requested with the `f` qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFormat {
    Auto,
    Jpeg,
    Png,
    WebP,
    Avif,
    Gif,
}

impl DeliveryFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::WebP => "webp",
            Self::Avif => "avif",
            Self::Gif => "gif",
        }
    }
}

impl FromStr for DeliveryFormat {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::WebP),
            "avif" => Ok(Self::Avif),
            "gif" => Ok(Self::Gif),
            _ => Err(TransformError::invalid_input(
                "fetch_format",
                format!("unknown format: {}", s),
            )),
        }
    }
}

impl From<DeliveryFormat> for Scalar {
    fn from(format: DeliveryFormat) -> Self {
        Scalar::Text(format.as_str().to_string())
    }
}
