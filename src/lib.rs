// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod learning;
pub mod logging;
pub mod persistence;

pub use crate::core::chain::{apply_decode, apply_encode, TransformChain};
pub use crate::core::engine::CipherEngine;
pub use crate::core::registry::{describe, CipherRegistry, ResolvedCipher};
pub use crate::core::substitution::{CipherRecord, LearnedTransform};
pub use crate::core::types::{BuiltinCipher, Direction, Transform};
pub use crate::error::{CipherError, InferenceError, StoreError};
pub use crate::learning::learn;
