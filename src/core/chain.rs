// File: src/core/chain.rs
use std::fmt;
use std::str::FromStr;

use crate::core::registry::CipherRegistry;
use crate::core::types::{Direction, Transform};
use crate::error::CipherError;
use tracing::trace;

/// An ordered, non-empty list of cipher ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformChain {
    ids: Vec<String>,
}

impl TransformChain {
    pub fn new<I, S>(ids: I) -> Result<Self, CipherError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return Err(CipherError::EmptyChain);
        }
        Ok(Self { ids })
    }

    /// Parses a comma and/or whitespace separated list such as `"caesar, reverse"`.
    pub fn parse(list: &str) -> Result<Self, CipherError> {
        Self::new(
            list.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|id| !id.is_empty()),
        )
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn encode(&self, text: &str, registry: &CipherRegistry) -> Result<String, CipherError> {
        apply_encode(text, &self.ids, registry)
    }

    pub fn decode(&self, text: &str, registry: &CipherRegistry) -> Result<String, CipherError> {
        apply_decode(text, &self.ids, registry)
    }
}

impl FromStr for TransformChain {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TransformChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ids.join(","))
    }
}

/// Runs `text` through every cipher in `chain`, first to last.
///
/// Empty text or an empty chain gives an empty string. Every id is resolved
/// before any cipher runs, so an unknown id fails the call without partial work.
pub fn apply_encode<S: AsRef<str>>(
    text: &str,
    chain: &[S],
    registry: &CipherRegistry,
) -> Result<String, CipherError> {
    run_chain(text, chain, registry, Direction::Encode)
}

/// Undoes [`apply_encode`]: last cipher first, each one decoding.
pub fn apply_decode<S: AsRef<str>>(
    text: &str,
    chain: &[S],
    registry: &CipherRegistry,
) -> Result<String, CipherError> {
    run_chain(text, chain, registry, Direction::Decode)
}

fn run_chain<S: AsRef<str>>(
    text: &str,
    chain: &[S],
    registry: &CipherRegistry,
    direction: Direction,
) -> Result<String, CipherError> {
    if text.is_empty() || chain.is_empty() {
        return Ok(String::new());
    }

    let mut ciphers = chain
        .iter()
        .map(|id| registry.resolve(id.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    if direction == Direction::Decode {
        ciphers.reverse();
    }

    let mut current = text.to_string();
    for (step, cipher) in ciphers.iter().enumerate() {
        current = cipher.apply(&current, direction);
        trace!(step, ?direction, "applied cipher");
    }
    Ok(current)
}
