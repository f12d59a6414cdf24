pub(crate) mod digest;
pub(crate) mod encoder;
pub(crate) mod separators;
