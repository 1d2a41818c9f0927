// File: src/learning.rs
use crate::core::substitution::{fold_case, LearnedTransform};
use crate::error::InferenceError;
use std::collections::BTreeMap;
use tracing::debug;

/// One original/encoded pair supplied by the user.
pub struct CipherExample {
    pub original: String,
    pub encoded: String,
}

/// Infers substitution ciphers from examples.
pub struct LearningEngine {
    /// Reject examples where two characters encode to the same target.
    strict: bool,
}

impl LearningEngine {
    pub fn new() -> Self {
        Self { strict: false }
    }

    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn learn(&self, example: &CipherExample) -> Result<LearnedTransform, InferenceError> {
        let cipher = learn(&example.original, &example.encoded)?;

        if self.strict {
            if let Some((target, sources)) = cipher.decode_collisions().into_iter().next() {
                return Err(InferenceError::AmbiguousDecode {
                    target,
                    first: sources[0],
                    second: sources[1],
                });
            }
        }
        Ok(cipher)
    }
}

impl Default for LearningEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Infers a per-character substitution from `original` and its `encoded` form.
///
/// Both sides are compared position by position after lower-casing. A source
/// character that would need two different targets fails the whole example.
/// Two sources sharing one target are accepted; the later one wins in the
/// decode map, which makes decoding lossy for that target.
pub fn learn(original: &str, encoded: &str) -> Result<LearnedTransform, InferenceError> {
    let original_len = original.chars().count();
    let encoded_len = encoded.chars().count();
    if original_len != encoded_len {
        return Err(InferenceError::LengthMismatch {
            original: original_len,
            encoded: encoded_len,
        });
    }

    let mut forward = BTreeMap::new();
    let mut backward = BTreeMap::new();

    for (o, e) in original.chars().zip(encoded.chars()) {
        let src = fold_case(o);
        let dst = fold_case(e);

        if let Some(&existing) = forward.get(&src) {
            if existing != dst {
                return Err(InferenceError::InconsistentPattern {
                    source_char: src,
                    first: existing,
                    second: dst,
                });
            }
        }
        forward.insert(src, dst);
        backward.insert(dst, src);
    }

    debug!(pairs = forward.len(), "learned substitution pattern");
    Ok(LearnedTransform::from_maps(forward, backward))
}
