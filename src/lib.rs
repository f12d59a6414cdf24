//! Imagine applies named image operations and derives cache-friendly filename suffixes for them.
//!
//! The crate has two halves:
//!
//! - **Keys**: an [`OperationSequence`] (ordered operation names with ordered parameters) is
//!   encoded into a deterministic, human-readable string such as
//!   `thumbnail+width-100+height-100`, or condensed into a fixed-length `[0-9A-Za-z]` digest.
//!   Both are pure functions, stable across processes.
//! - **Processing**: an [`Imagine`] instance resolves each operation through a priority-ordered
//!   [`Dispatcher`] (caller handlers first, then the [`ImageProcessor`] built-ins) and applies
//!   it to an [`image::DynamicImage`].
//!
//! Storage, caching policy and serving of the resulting files are left to the caller.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod dispatch;
mod foundation;
mod imagine;
mod key;
mod ops;
mod processor;

pub use crate::config::{ImagineConfig, ResizeFilter};
pub use crate::dispatch::registry::{
    Dispatcher, HandlerProvider, HandlerRegistry, OperationHandler,
};
pub use crate::foundation::error::{ImagineError, ImagineResult};
pub use crate::imagine::{ImageSource, Imagine};
pub use crate::key::encoder::{
    DEFAULT_HASH_LENGTH, OperationKeyEncoder, derive_key, encode, hash_image_operations,
};
pub use crate::key::separators::SeparatorConfig;
pub use crate::ops::operation::{Operation, OperationSequence};
pub use crate::ops::value::ParamValue;
pub use crate::processor::image_processor::{ImageProcessor, SaveOptions};
