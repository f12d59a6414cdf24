use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context as _;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};

use crate::config::ImagineConfig;
use crate::dispatch::registry::HandlerRegistry;
use crate::foundation::error::{ImagineError, ImagineResult};
use crate::processor::builtin;

/// Output options for [`ImageProcessor::save`].
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveOptions {
    /// Output format; inferred from the file extension when `None`.
    pub format: Option<String>,
    /// JPEG quality (1..=100); falls back to the processor's configured quality.
    pub jpeg_quality: Option<u8>,
}

/// Thin layer over the `image` crate: open, inspect, save and the built-in operations.
#[derive(Clone, Debug)]
pub struct ImageProcessor {
    config: ImagineConfig,
}

impl ImageProcessor {
    /// Processor using `config`'s filter and default quality.
    pub fn new(config: ImagineConfig) -> Self {
        Self { config }
    }

    /// Configuration this processor was built with.
    pub fn config(&self) -> &ImagineConfig {
        &self.config
    }

    /// Handlers for the built-in operations, labelled `processor`.
    pub fn builtin_handlers(&self) -> HandlerRegistry {
        builtin::registry(self.config.filter.into())
    }

    /// Decode an image from disk.
    pub fn open(&self, path: impl AsRef<Path>) -> ImagineResult<DynamicImage> {
        let path = path.as_ref();
        let reader = image::ImageReader::open(path)
            .with_context(|| format!("open image '{}'", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("sniff image format '{}'", path.display()))?;
        Ok(reader.decode()?)
    }

    /// `(width, height)` of the image at `path` without decoding pixel data.
    pub fn dimensions(&self, path: impl AsRef<Path>) -> ImagineResult<(u32, u32)> {
        Ok(image::image_dimensions(path.as_ref())?)
    }

    /// Encode `image` to `path`, creating parent directories.
    pub fn save(
        &self,
        image: &DynamicImage,
        path: impl AsRef<Path>,
        opts: &SaveOptions,
    ) -> ImagineResult<()> {
        let path = path.as_ref();
        let format = match opts.format.as_deref() {
            Some(ext) => ImageFormat::from_extension(ext).ok_or_else(|| {
                ImagineError::invalid_parameter(format!("unknown output format `{ext}`"))
            })?,
            None => ImageFormat::from_path(path)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }

        if format == ImageFormat::Jpeg {
            let quality = opts.jpeg_quality.unwrap_or(self.config.jpeg_quality);
            if !(1..=100).contains(&quality) {
                return Err(ImagineError::invalid_parameter(format!(
                    "jpeg quality must be in 1..=100, got {quality}"
                )));
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            let encoder = JpegEncoder::new_with_quality(BufWriter::new(f), quality);
            // JPEG has no alpha channel.
            DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)?;
        } else {
            image.save_with_format(path, format)?;
        }
        tracing::debug!(path = %path.display(), ?format, "saved image");
        Ok(())
    }
}

impl Default for ImageProcessor {
    fn default() -> Self {
        Self::new(ImagineConfig::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/processor/image_processor.rs"]
mod tests;
