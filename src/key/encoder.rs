//! Canonical encoding of operation sequences into filename suffixes.
//!
//! The canonical string for `[thumbnail{width: 100, height: 100}]` with default separators is
//! `thumbnail+width-100+height-100`, suitable for names like
//! `my_horse.thumbnail+width-100+height-100.jpg`.
//!
//! Values are not escaped: a value that itself contains a separator makes the string ambiguous
//! to a human reader. Keeping values free of separators is the caller's job; hashed keys are
//! unaffected since the digest covers the full canonical string.

use std::collections::BTreeMap;

use crate::foundation::error::{ImagineError, ImagineResult};
use crate::key::digest::base62_digest;
use crate::key::separators::SeparatorConfig;
use crate::ops::operation::{Operation, OperationSequence};

/// Digest length used when the caller does not choose one.
pub const DEFAULT_HASH_LENGTH: usize = 8;

/// Encode `sequence` into its canonical string.
///
/// Each operation becomes `name` followed by `operation + param + parameter + value` for every
/// parameter in order; operations are joined with `operation_group`. Nothing is reordered or
/// deduplicated. An empty sequence encodes to `""`.
pub fn encode(
    sequence: &OperationSequence,
    separators: &SeparatorConfig,
) -> ImagineResult<String> {
    let mut segments = Vec::with_capacity(sequence.len());
    for op in sequence {
        segments.push(encode_operation(op, separators)?);
    }
    Ok(segments.join(&separators.operation_group))
}

/// Derive the cache key for `sequence`.
///
/// Returns the canonical string when `hashed` is false, otherwise a `[0-9A-Za-z]` digest of
/// exactly `hash_length` characters. `hash_length` is checked even when not hashing so that a bad
/// configuration surfaces on first use.
pub fn derive_key(
    sequence: &OperationSequence,
    separators: &SeparatorConfig,
    hashed: bool,
    hash_length: usize,
) -> ImagineResult<String> {
    if hash_length == 0 {
        return Err(ImagineError::InvalidHashLength(hash_length));
    }
    let canonical = encode(sequence, separators)?;
    if !hashed {
        return Ok(canonical);
    }
    let key = base62_digest(&canonical, hash_length);
    tracing::trace!(%canonical, %key, "derived hashed operation key");
    Ok(key)
}

/// Hashed key for every named version, e.g. `{"thumb": ..., "large": ...}`.
pub fn hash_image_operations(
    versions: &BTreeMap<String, OperationSequence>,
    separators: &SeparatorConfig,
    hash_length: usize,
) -> ImagineResult<BTreeMap<String, String>> {
    versions
        .iter()
        .map(|(name, ops)| Ok((name.clone(), derive_key(ops, separators, true, hash_length)?)))
        .collect()
}

fn encode_operation(op: &Operation, separators: &SeparatorConfig) -> ImagineResult<String> {
    op.validate()?;
    let mut out = op.name().to_string();
    for (param, value) in op.params() {
        let text = value
            .canonical()
            .map_err(|reason| ImagineError::unstringifiable(op.name(), param, reason))?;
        out.push_str(&separators.operation);
        out.push_str(param);
        out.push_str(&separators.parameter);
        out.push_str(&text);
    }
    Ok(out)
}

/// Encoder bound to one separator configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperationKeyEncoder {
    separators: SeparatorConfig,
}

impl OperationKeyEncoder {
    /// Encoder using `separators`.
    pub fn new(separators: SeparatorConfig) -> Self {
        Self { separators }
    }

    /// Separators in use.
    pub fn separators(&self) -> &SeparatorConfig {
        &self.separators
    }

    /// See [`encode`].
    pub fn encode(&self, sequence: &OperationSequence) -> ImagineResult<String> {
        encode(sequence, &self.separators)
    }

    /// See [`derive_key`].
    pub fn derive_key(
        &self,
        sequence: &OperationSequence,
        hashed: bool,
        hash_length: usize,
    ) -> ImagineResult<String> {
        derive_key(sequence, &self.separators, hashed, hash_length)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/key/encoder.rs"]
mod tests;
