pub(crate) mod builtin;
pub(crate) mod image_processor;
