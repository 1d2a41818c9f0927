// File: src/core/registry.rs
//! Caller-owned collection of learned ciphers, plus name resolution.
//!
//! Built-in ciphers are not stored here; [`CipherRegistry::resolve`] checks
//! them first and only then falls back to the learned entries.

use std::collections::BTreeMap;

use crate::core::substitution::LearnedTransform;
use crate::core::types::{BuiltinCipher, Transform};
use crate::error::CipherError;

/// A cipher found by name, either built in or learned.
#[derive(Debug, Clone, Copy)]
pub enum ResolvedCipher<'a> {
    Builtin(BuiltinCipher),
    Learned(&'a LearnedTransform),
}

impl Transform for ResolvedCipher<'_> {
    fn encode(&self, text: &str) -> String {
        match self {
            ResolvedCipher::Builtin(cipher) => cipher.encode(text),
            ResolvedCipher::Learned(cipher) => cipher.encode(text),
        }
    }

    fn decode(&self, text: &str) -> String {
        match self {
            ResolvedCipher::Builtin(cipher) => cipher.decode(text),
            ResolvedCipher::Learned(cipher) => cipher.decode(text),
        }
    }

    fn description(&self) -> &str {
        match self {
            ResolvedCipher::Builtin(cipher) => cipher.description(),
            ResolvedCipher::Learned(cipher) => cipher.description(),
        }
    }
}

/// Canonical form of a user-chosen cipher name: trimmed, lower-cased, and
/// with each whitespace run replaced by `_`.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CipherRegistry {
    learned: BTreeMap<String, LearnedTransform>,
}

impl CipherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `cipher` under `name`, replacing any previous cipher of that
    /// name. Returns the replaced cipher.
    pub fn insert(
        &mut self,
        name: &str,
        cipher: LearnedTransform,
    ) -> Result<Option<LearnedTransform>, CipherError> {
        if BuiltinCipher::lookup(name).is_some() {
            return Err(CipherError::ReservedName(name.to_string()));
        }
        let cipher = cipher.with_name(name);
        Ok(self.learned.insert(name.to_string(), cipher))
    }

    pub fn remove(&mut self, name: &str) -> Option<LearnedTransform> {
        self.learned.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&LearnedTransform> {
        self.learned.get(name)
    }

    pub fn learned(&self) -> impl Iterator<Item = &LearnedTransform> {
        self.learned.values()
    }

    pub fn len(&self) -> usize {
        self.learned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.learned.is_empty()
    }

    /// Looks `id` up among the built-ins first, then the learned ciphers.
    pub fn resolve(&self, id: &str) -> Result<ResolvedCipher<'_>, CipherError> {
        if let Some(builtin) = BuiltinCipher::lookup(id) {
            return Ok(ResolvedCipher::Builtin(builtin));
        }
        self.learned
            .get(id)
            .map(ResolvedCipher::Learned)
            .ok_or_else(|| CipherError::UnknownTransform(id.to_string()))
    }

    /// Every usable cipher id: built-ins in their fixed order, then learned names.
    pub fn available(&self) -> Vec<String> {
        BuiltinCipher::ALL
            .iter()
            .map(|c| c.name().to_string())
            .chain(self.learned.keys().cloned())
            .collect()
    }
}

/// Human-readable description of the cipher called `id`.
pub fn describe(id: &str, registry: &CipherRegistry) -> Result<String, CipherError> {
    registry
        .resolve(id)
        .map(|cipher| cipher.description().to_string())
}
