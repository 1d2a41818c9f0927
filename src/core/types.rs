// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{alphabet, structural};

/// Which way a cipher is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Encode,
    Decode,
}

/// Anything that can turn plain text into cipher text and back.
pub trait Transform {
    fn encode(&self, text: &str) -> String;
    fn decode(&self, text: &str) -> String;
    fn description(&self) -> &str;

    fn apply(&self, text: &str, direction: Direction) -> String {
        match direction {
            Direction::Encode => self.encode(text),
            Direction::Decode => self.decode(text),
        }
    }
}

/// The fixed set of ciphers that ship with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinCipher {
    Shifter,
    Caesar,
    Reverse,
    Rot13,
    Atbash,
}

impl BuiltinCipher {
    pub const ALL: [BuiltinCipher; 5] = [
        BuiltinCipher::Shifter,
        BuiltinCipher::Caesar,
        BuiltinCipher::Reverse,
        BuiltinCipher::Rot13,
        BuiltinCipher::Atbash,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BuiltinCipher::Shifter => "shifter",
            BuiltinCipher::Caesar => "caesar",
            BuiltinCipher::Reverse => "reverse",
            BuiltinCipher::Rot13 => "rot13",
            BuiltinCipher::Atbash => "atbash",
        }
    }

    pub fn lookup(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cipher| cipher.name() == id)
    }
}

impl Transform for BuiltinCipher {
    fn encode(&self, text: &str) -> String {
        match self {
            BuiltinCipher::Shifter => structural::shifter_encode(text),
            BuiltinCipher::Caesar => alphabet::shift_encode(text, alphabet::CAESAR_OFFSET),
            BuiltinCipher::Reverse => structural::reverse(text),
            BuiltinCipher::Rot13 => alphabet::rot13(text),
            BuiltinCipher::Atbash => alphabet::atbash(text),
        }
    }

    fn decode(&self, text: &str) -> String {
        match self {
            BuiltinCipher::Shifter => structural::shifter_decode(text),
            BuiltinCipher::Caesar => alphabet::shift_decode(text, alphabet::CAESAR_OFFSET),
            // Reverse, ROT13 and Atbash are involutions: decoding is encoding again.
            BuiltinCipher::Reverse | BuiltinCipher::Rot13 | BuiltinCipher::Atbash => {
                self.encode(text)
            }
        }
    }

    fn description(&self) -> &str {
        match self {
            BuiltinCipher::Shifter => {
                "Takes the last 2 letters of each word and moves them to the front"
            }
            BuiltinCipher::Caesar => "Shifts each letter by 3 positions in the alphabet",
            BuiltinCipher::Reverse => "Reverses the entire text",
            BuiltinCipher::Rot13 => "Rotates each letter by 13 positions (A↔N, B↔O, etc.)",
            BuiltinCipher::Atbash => "Reverses the alphabet (A↔Z, B↔Y, etc.)",
        }
    }
}

impl fmt::Display for BuiltinCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinCipher {
    type Err = crate::error::CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| crate::error::CipherError::UnknownTransform(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_parses_back_from_its_name() {
        for cipher in BuiltinCipher::ALL {
            assert_eq!(cipher.name().parse::<BuiltinCipher>().ok(), Some(cipher));
        }
        assert!("morse".parse::<BuiltinCipher>().is_err());
        assert!("Caesar".parse::<BuiltinCipher>().is_err());
    }

    #[test]
    fn apply_dispatches_on_direction() {
        let caesar = BuiltinCipher::Caesar;
        assert_eq!(caesar.apply("hello", Direction::Encode), "khoor");
        assert_eq!(caesar.apply("khoor", Direction::Decode), "hello");
    }

    #[test]
    fn direction_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Direction::Decode).ok().as_deref(),
            Some("\"decode\"")
        );
    }
}
