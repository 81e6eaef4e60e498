//! Display helpers for hashes and randomness strings.

use std::collections::HashMap;

/// Shorten a long hash to `start...end`, leaving short values untouched.
pub fn format_hash(hash: &str, start_len: usize, end_len: usize) -> String {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() <= start_len + end_len {
        return hash.to_string();
    }
    let head: String = chars[..start_len].iter().collect();
    let tail: String = chars[chars.len() - end_len..].iter().collect();
    format!("{head}...{tail}")
}

/// Shannon entropy of a string, in bits per character.
pub fn shannon_entropy(s: &str) -> f64 {
    let mut freq: HashMap<char, usize> = HashMap::new();
    let mut len = 0usize;
    for c in s.chars() {
        *freq.entry(c).or_default() += 1;
        len += 1;
    }
    if len == 0 {
        return 0.0;
    }
    freq.values()
        .map(|&count| {
            let p = count as f64 / len as f64;
            -p * p.log2()
        })
        .sum()
}
