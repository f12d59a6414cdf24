use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::imageops::FilterType;

use crate::foundation::error::{ImagineError, ImagineResult};
use crate::key::encoder::DEFAULT_HASH_LENGTH;
use crate::key::separators::SeparatorConfig;

/// Resampling filter used by size-changing operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResizeFilter {
    /// Nearest neighbour.
    Nearest,
    /// Linear.
    Triangle,
    /// Cubic.
    CatmullRom,
    /// Gaussian.
    Gaussian,
    /// Lanczos with window 3.
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(f: ResizeFilter) -> Self {
        match f {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Construction-time configuration for [`crate::Imagine`].
///
/// Every field has a default and unknown keys are ignored, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImagineConfig {
    /// Resampling filter.
    pub filter: ResizeFilter,
    /// Separators used for cache keys.
    pub separators: SeparatorConfig,
    /// Digest length for hashed keys.
    pub hash_length: usize,
    /// JPEG quality used when saving without explicit options.
    pub jpeg_quality: u8,
}

impl Default for ImagineConfig {
    fn default() -> Self {
        Self {
            filter: ResizeFilter::default(),
            separators: SeparatorConfig::default(),
            hash_length: DEFAULT_HASH_LENGTH,
            jpeg_quality: 90,
        }
    }
}

impl ImagineConfig {
    /// Parse and validate a JSON config.
    pub fn from_reader<R: std::io::Read>(r: R) -> ImagineResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ImagineError::config(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> ImagineResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ImagineError::config(format!("open config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check value ranges.
    pub fn validate(&self) -> ImagineResult<()> {
        if self.hash_length == 0 {
            return Err(ImagineError::InvalidHashLength(self.hash_length));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ImagineError::config(format!(
                "jpegQuality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
