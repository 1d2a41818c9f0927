// File: src/core/alphabet.rs
//! Letter-position ciphers over the 26-letter Latin alphabet.
//!
//! Only ASCII letters are touched. Everything else, including accented and
//! non-Latin letters, is copied through as is. Case is always preserved.

const ALPHABET_LEN: u8 = 26;

pub const CAESAR_OFFSET: u8 = 3;
pub const ROT13_OFFSET: u8 = 13;

/// Returns the code of `'A'` or `'a'` for ASCII letters, `None` otherwise.
fn letter_base(c: char) -> Option<u8> {
    if c.is_ascii_uppercase() {
        Some(b'A')
    } else if c.is_ascii_lowercase() {
        Some(b'a')
    } else {
        None
    }
}

fn map_letters(text: &str, f: impl Fn(u8) -> u8) -> String {
    text.chars()
        .map(|c| match letter_base(c) {
            Some(base) => {
                let position = c as u8 - base;
                (base + f(position)) as char
            }
            None => c,
        })
        .collect()
}

/// Rotates every letter forward by `offset` positions. Offsets wrap mod 26.
pub fn shift_encode(text: &str, offset: u8) -> String {
    let offset = offset % ALPHABET_LEN;
    map_letters(text, |pos| (pos + offset) % ALPHABET_LEN)
}

/// Exact inverse of [`shift_encode`] for the same `offset`.
pub fn shift_decode(text: &str, offset: u8) -> String {
    let back = (ALPHABET_LEN - offset % ALPHABET_LEN) % ALPHABET_LEN;
    shift_encode(text, back)
}

/// ROT13. Its own inverse, so decoding calls this same function.
pub fn rot13(text: &str) -> String {
    shift_encode(text, ROT13_OFFSET)
}

/// Atbash: mirrors the alphabet (a↔z, b↔y, ...). Its own inverse.
pub fn atbash(text: &str) -> String {
    map_letters(text, |pos| ALPHABET_LEN - 1 - pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caesar_fixture() {
        assert_eq!(shift_encode("hello", CAESAR_OFFSET), "khoor");
        assert_eq!(shift_decode("khoor", CAESAR_OFFSET), "hello");
    }

    #[test]
    fn caesar_wraps_at_end_of_alphabet() {
        assert_eq!(shift_encode("xyz XYZ", CAESAR_OFFSET), "abc ABC");
        assert_eq!(shift_decode("abc ABC", CAESAR_OFFSET), "xyz XYZ");
    }

    #[test]
    fn every_rotation_inverts() {
        let text = "The Quick Brown Fox, 42!";
        for offset in 0..26 {
            let encoded = shift_encode(text, offset);
            assert_eq!(shift_decode(&encoded, offset), text, "offset {}", offset);
        }
    }

    #[test]
    fn rot13_fixture_and_involution() {
        assert_eq!(rot13("Hello"), "Uryyb");
        assert_eq!(rot13("Uryyb"), "Hello");
        assert_eq!(rot13(&rot13("Sphinx of black quartz")), "Sphinx of black quartz");
    }

    #[test]
    fn atbash_fixture_and_involution() {
        assert_eq!(atbash("abc"), "zyx");
        assert_eq!(atbash("AbC"), "ZyX");
        assert_eq!(atbash(&atbash("Wizard")), "Wizard");
    }

    #[test]
    fn non_ascii_letters_pass_through() {
        let text = "ñandú 123 ¿?";
        assert_eq!(shift_encode(text, 5), "ñfsiú 123 ¿?");
        assert_eq!(atbash("é"), "é");
        assert_eq!(rot13(""), "");
    }
}
