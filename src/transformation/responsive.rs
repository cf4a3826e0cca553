//! Responsive width sets
//!
//! A `SrcSet` describes the widths an asset should be delivered at. Widths
//! come either from an explicit breakpoint list or from an automatic range;
//! the two are mutually exclusive, and an explicit `sizes` value cannot be
//! combined with automatic breakpoints. Conflicts are reported by the call
//! that introduces them.

use super::action::Action;
use super::chain::Transformation;
use super::modes::CropMode;
use crate::constants::MAX_AUTO_BREAKPOINT_IMAGES;
use crate::error::{Result, TransformError};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Breakpoints {
    Explicit(Vec<u32>),
    Auto {
        min_width: u32,
        max_width: u32,
        max_images: u32,
    },
}

/// One delivered width and its full transformation string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrcSetEntry {
    pub width: u32,
    pub transformation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SrcSet {
    breakpoints: Option<Breakpoints>,
    sizes: Option<String>,
}

impl SrcSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit widths; zero widths are rejected
    pub fn breakpoints<I>(mut self, widths: I) -> Result<Self>
    where
        I: IntoIterator<Item = u32>,
    {
        if matches!(self.breakpoints, Some(Breakpoints::Auto { .. })) {
            return Err(TransformError::constraint(
                "breakpoints_exclusive",
                "explicit breakpoints cannot be combined with auto breakpoints",
            ));
        }
        let widths: Vec<u32> = widths.into_iter().collect();
        if widths.is_empty() || widths.contains(&0) {
            return Err(TransformError::invalid_input(
                "breakpoints",
                "expected at least one non-zero width",
            ));
        }
        self.breakpoints = Some(Breakpoints::Explicit(widths));
        Ok(self)
    }

    /// Evenly spread widths between `min_width` and `max_width`
    pub fn auto_breakpoints(mut self, min_width: u32, max_width: u32, max_images: u32) -> Result<Self> {
        if matches!(self.breakpoints, Some(Breakpoints::Explicit(_))) {
            return Err(TransformError::constraint(
                "breakpoints_exclusive",
                "auto breakpoints cannot be combined with explicit breakpoints",
            ));
        }
        if self.sizes.is_some() {
            return Err(TransformError::constraint(
                "sizes_with_auto_breakpoints",
                "auto breakpoints cannot be combined with an explicit sizes value",
            ));
        }
        if min_width == 0 || min_width > max_width {
            return Err(TransformError::invalid_input(
                "auto_breakpoints",
                format!("invalid width range {}..{}", min_width, max_width),
            ));
        }
        if max_images == 0 || max_images > MAX_AUTO_BREAKPOINT_IMAGES {
            return Err(TransformError::invalid_input(
                "max_images",
                format!(
                    "expected 1..={} images, got {}",
                    MAX_AUTO_BREAKPOINT_IMAGES, max_images
                ),
            ));
        }
        self.breakpoints = Some(Breakpoints::Auto {
            min_width,
            max_width,
            max_images,
        });
        Ok(self)
    }

    /// Explicit `sizes` value passed through to the caller
    pub fn sizes(mut self, sizes: impl Into<String>) -> Result<Self> {
        if matches!(self.breakpoints, Some(Breakpoints::Auto { .. })) {
            return Err(TransformError::constraint(
                "sizes_with_auto_breakpoints",
                "an explicit sizes value cannot be combined with auto breakpoints",
            ));
        }
        self.sizes = Some(sizes.into());
        Ok(self)
    }

    pub fn sizes_value(&self) -> Option<&str> {
        self.sizes.as_deref()
    }

    /// Ascending, de-duplicated widths
    pub fn widths(&self) -> Vec<u32> {
        let mut widths = match &self.breakpoints {
            None => Vec::new(),
            Some(Breakpoints::Explicit(widths)) => widths.clone(),
            Some(Breakpoints::Auto {
                min_width,
                max_width,
                max_images,
            }) => auto_widths(*min_width, *max_width, *max_images),
        };
        widths.sort_unstable();
        widths.dedup();
        widths
    }

    /// One `base/c_scale,w_N` transformation per width
    pub fn entries(&self, base: &Transformation) -> Vec<SrcSetEntry> {
        self.widths()
            .into_iter()
            .map(|width| {
                let transformation = base
                    .clone()
                    .chain(Action::new().crop(CropMode::Scale).width(width))
                    .render();
                SrcSetEntry {
                    width,
                    transformation,
                }
            })
            .collect()
    }
}

fn auto_widths(min_width: u32, max_width: u32, max_images: u32) -> Vec<u32> {
    if max_images == 1 || min_width == max_width {
        return vec![max_width];
    }
    // u64 keeps the full u32 range from overflowing
    let (min, max) = (u64::from(min_width), u64::from(max_width));
    let gaps = u64::from(max_images - 1);
    let step = (max - min + gaps - 1) / gaps;
    (0..u64::from(max_images))
        .map(|i| u32::try_from((min + step * i).min(max)).unwrap_or(max_width))
        .collect()
}
