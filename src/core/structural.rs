// File: src/core/structural.rs
//! Ciphers that move characters around instead of replacing them.

const WORD_SEPARATOR: char = ' ';
const SWAP_LEN: usize = 2;

/// Reverses the text code point by code point.
pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}

/// Moves the last two characters of every word to its front.
pub fn shifter_encode(text: &str) -> String {
    map_words(text, |chars| {
        let split = chars.len() - SWAP_LEN;
        chars[split..].iter().chain(&chars[..split]).collect()
    })
}

/// Moves the first two characters of every word to its end.
pub fn shifter_decode(text: &str) -> String {
    map_words(text, |chars| {
        chars[SWAP_LEN..].iter().chain(&chars[..SWAP_LEN]).collect()
    })
}

/// Applies `f` to each space-separated word longer than two characters.
///
/// Splitting on every single space keeps empty segments, so runs of spaces
/// and leading or trailing spaces come back out exactly as they went in.
fn map_words(text: &str, f: impl Fn(&[char]) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, word) in text.split(WORD_SEPARATOR).enumerate() {
        if i > 0 {
            out.push(WORD_SEPARATOR);
        }
        let chars: Vec<char> = word.chars().collect();
        if chars.len() <= SWAP_LEN {
            out.push_str(word);
        } else {
            out.push_str(&f(&chars));
        }
    }
    out
}
