//! Row label encoding
//!
//! A row seed that starts with a letter selects spreadsheet-style labels
//! (`A`..`Z`, `AA`, `AB`, ...). Any other seed, including an empty one,
//! selects 1-based decimal labels.

/// Encode the label of row `index` (0-based) for the given seed
pub fn encode(seed: &str, index: u32) -> String {
    if is_alphabetic_seed(seed) {
        alphabetic(index)
    } else {
        (u64::from(index) + 1).to_string()
    }
}

pub fn is_alphabetic_seed(seed: &str) -> bool {
    seed.chars().next().is_some_and(char::is_alphabetic)
}

/// Bijective base-26: 0 -> A, 25 -> Z, 26 -> AA
fn alphabetic(index: u32) -> String {
    let mut n = u64::from(index) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}
