use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::DynamicImage;
use rayon::prelude::*;

use crate::config::ImagineConfig;
use crate::dispatch::registry::{Dispatcher, HandlerRegistry};
use crate::foundation::error::ImagineResult;
use crate::key::encoder::{OperationKeyEncoder, hash_image_operations};
use crate::ops::operation::OperationSequence;
use crate::processor::image_processor::{ImageProcessor, SaveOptions};

/// Where [`Imagine::process_image`] reads its input from.
#[derive(Clone, Debug)]
pub enum ImageSource {
    /// Decode from a file.
    Path(PathBuf),
    /// Use an already decoded image.
    Image(DynamicImage),
}

impl From<PathBuf> for ImageSource {
    fn from(p: PathBuf) -> Self {
        Self::Path(p)
    }
}

impl From<&Path> for ImageSource {
    fn from(p: &Path) -> Self {
        Self::Path(p.to_path_buf())
    }
}

impl From<DynamicImage> for ImageSource {
    fn from(img: DynamicImage) -> Self {
        Self::Image(img)
    }
}

/// Applies named operation sequences to images and derives their cache keys.
///
/// Operations resolve against the optional caller-supplied handlers first and the processor's
/// built-ins second. Caching and file storage are left to the caller.
#[derive(Debug, Clone)]
pub struct Imagine {
    config: ImagineConfig,
    processor: ImageProcessor,
    encoder: OperationKeyEncoder,
    dispatcher: Dispatcher,
}

impl Imagine {
    /// Build from an explicit configuration.
    pub fn new(config: ImagineConfig) -> Self {
        let processor = ImageProcessor::new(config.clone());
        let encoder = OperationKeyEncoder::new(config.separators.clone());
        let dispatcher = Dispatcher::new().with(Arc::new(processor.builtin_handlers()));
        Self {
            config,
            processor,
            encoder,
            dispatcher,
        }
    }

    /// Install handlers that take priority over the built-ins.
    ///
    /// Calling this more than once stacks registries; the latest call has the highest priority.
    pub fn with_handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.dispatcher.prepend(Arc::new(handlers));
        self
    }

    /// Configuration in use.
    pub fn config(&self) -> &ImagineConfig {
        &self.config
    }

    /// The underlying image processor.
    pub fn processor(&self) -> &ImageProcessor {
        &self.processor
    }

    /// The operation dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Filename suffix for `sequence`; hashed to the configured length when `hashed`.
    pub fn operations_to_string(
        &self,
        sequence: &OperationSequence,
        hashed: bool,
    ) -> ImagineResult<String> {
        self.encoder
            .derive_key(sequence, hashed, self.config.hash_length)
    }

    /// Hashed key for every named version.
    pub fn hash_image_operations(
        &self,
        versions: &BTreeMap<String, OperationSequence>,
    ) -> ImagineResult<BTreeMap<String, String>> {
        hash_image_operations(versions, self.encoder.separators(), self.config.hash_length)
    }

    /// `(width, height)` of the image at `path`.
    pub fn image_size(&self, path: impl AsRef<Path>) -> ImagineResult<(u32, u32)> {
        self.processor.dimensions(path)
    }

    /// Load `source` and apply `sequence` to it.
    #[tracing::instrument(skip(self, source, sequence), fields(ops = sequence.len()))]
    pub fn process_image(
        &self,
        source: impl Into<ImageSource>,
        sequence: &OperationSequence,
    ) -> ImagineResult<DynamicImage> {
        let mut image = match source.into() {
            ImageSource::Path(p) => self.processor.open(p)?,
            ImageSource::Image(img) => img,
        };
        self.dispatcher.apply(&mut image, sequence)?;
        Ok(image)
    }

    /// [`Imagine::process_image`] followed by a save to `output`.
    #[tracing::instrument(
        skip(self, source, sequence, output, opts),
        fields(ops = sequence.len(), output = %output.as_ref().display())
    )]
    pub fn process_image_to(
        &self,
        source: impl Into<ImageSource>,
        sequence: &OperationSequence,
        output: impl AsRef<Path>,
        opts: &SaveOptions,
    ) -> ImagineResult<()> {
        let image = self.process_image(source, sequence)?;
        self.processor.save(&image, output, opts)
    }

    /// Render every named version of one source in parallel.
    ///
    /// The source is decoded once. The first failing version aborts the batch.
    #[tracing::instrument(skip(self, source, versions), fields(versions = versions.len()))]
    pub fn process_versions(
        &self,
        source: impl Into<ImageSource>,
        versions: &BTreeMap<String, OperationSequence>,
    ) -> ImagineResult<BTreeMap<String, DynamicImage>> {
        let base = match source.into() {
            ImageSource::Path(p) => self.processor.open(p)?,
            ImageSource::Image(img) => img,
        };
        versions
            .par_iter()
            .map(|(name, ops)| {
                let mut image = base.clone();
                self.dispatcher
                    .apply(&mut image, ops)
                    .map(|()| (name.clone(), image))
            })
            .collect()
    }
}

impl Default for Imagine {
    fn default() -> Self {
        Self::new(ImagineConfig::default())
    }
}

#[cfg(test)]
#[path = "../tests/unit/imagine.rs"]
mod tests;
