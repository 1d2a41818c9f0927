// File: src/core/substitution.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::{Direction, Transform};

pub const DEFAULT_DESCRIPTION: &str = "Custom learned cipher";

/// A per-character substitution learned from an example pair.
///
/// Keys and values are stored lower-cased; case is re-applied from the input
/// text when the cipher runs. Characters with no entry pass through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnedTransform {
    pub name: String,
    pub description: String,
    forward: BTreeMap<char, char>,
    backward: BTreeMap<char, char>,
}

/// Flat, serde-friendly form of a [`LearnedTransform`].
///
/// Maps are stored as ordered `[key, value]` pair lists. Field names match the
/// JSON written by earlier versions of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherRecord {
    pub name: String,
    pub description: String,
    pub pattern: Vec<(char, char)>,
    #[serde(rename = "reversePattern")]
    pub reverse_pattern: Vec<(char, char)>,
}

/// Lower-cases a single character, keeping it a single character.
pub(crate) fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn restore_case(mapped: char, original: char) -> char {
    if !original.is_uppercase() {
        return mapped;
    }
    let mut upper = mapped.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => mapped,
    }
}

impl LearnedTransform {
    pub(crate) fn from_maps(
        forward: BTreeMap<char, char>,
        backward: BTreeMap<char, char>,
    ) -> Self {
        Self {
            name: String::new(),
            description: DEFAULT_DESCRIPTION.to_string(),
            forward,
            backward,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn forward(&self) -> &BTreeMap<char, char> {
        &self.forward
    }

    pub fn backward(&self) -> &BTreeMap<char, char> {
        &self.backward
    }

    /// Runs the substitution over `text`.
    ///
    /// Lookups use the lower-cased character. An upper-case input character
    /// produces an upper-case output regardless of how the map stores it.
    pub fn apply(&self, text: &str, direction: Direction) -> String {
        let map = match direction {
            Direction::Encode => &self.forward,
            Direction::Decode => &self.backward,
        };
        text.chars()
            .map(|c| match map.get(&fold_case(c)) {
                Some(&mapped) => restore_case(mapped, c),
                None => c,
            })
            .collect()
    }

    /// Characters that encode to the same target and so cannot be told apart
    /// when decoding. Empty for a lossless cipher.
    pub fn decode_collisions(&self) -> Vec<(char, Vec<char>)> {
        let mut sources: BTreeMap<char, Vec<char>> = BTreeMap::new();
        for (&src, &dst) in &self.forward {
            sources.entry(dst).or_default().push(src);
        }
        sources.into_iter().filter(|(_, s)| s.len() > 1).collect()
    }

    pub fn to_record(&self) -> CipherRecord {
        CipherRecord {
            name: self.name.clone(),
            description: self.description.clone(),
            pattern: self.forward.iter().map(|(&k, &v)| (k, v)).collect(),
            reverse_pattern: self.backward.iter().map(|(&k, &v)| (k, v)).collect(),
        }
    }

    /// Rebuilds a cipher from its pair lists. A repeated key keeps its last value.
    pub fn from_record(record: CipherRecord) -> Self {
        Self {
            name: record.name,
            description: record.description,
            forward: record.pattern.into_iter().collect(),
            backward: record.reverse_pattern.into_iter().collect(),
        }
    }
}

impl Transform for LearnedTransform {
    fn encode(&self, text: &str) -> String {
        self.apply(text, Direction::Encode)
    }

    fn decode(&self, text: &str) -> String {
        self.apply(text, Direction::Decode)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
