//! Unicode-aware word splitting
//!
//! Inter-word boundaries are runs of anything that is not a letter, a digit
//! or an apostrophe. Intra-word boundaries are lower->upper case transitions
//! and letter<->digit transitions, so `myPhoto2023` has words starting at
//! `m`, `P` and `2`.

use smallvec::SmallVec;

#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || c.is_numeric() || c == '\''
}

/// Simple per-character case fold that keeps char positions aligned.
#[inline]
pub(crate) fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Split a query into its required terms.
pub fn split_terms(query: &str) -> SmallVec<[&str; 4]> {
    query
        .split(|c: char| !is_word_char(c))
        .filter(|t| !t.is_empty())
        .collect()
}

/// For each char, whether a word starts there.
pub fn word_starts(chars: &[char]) -> Vec<bool> {
    let mut starts = Vec::with_capacity(chars.len());
    let mut prev: Option<char> = None;
    for &c in chars {
        let start = is_word_char(c)
            && match prev {
                None => true,
                Some(p) if !is_word_char(p) => true,
                Some(p) => {
                    (p.is_lowercase() && c.is_uppercase())
                        || (p.is_alphabetic() && c.is_numeric())
                        || (p.is_numeric() && c.is_alphabetic())
                }
            };
        starts.push(start);
        prev = Some(c);
    }
    starts
}

/// Split a name into words on both inter- and intra-word boundaries.
pub fn split_words(name: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = name.char_indices().collect();
    let plain: Vec<char> = chars.iter().map(|(_, c)| *c).collect();
    let starts = word_starts(&plain);

    let mut words = Vec::new();
    let mut current: Option<usize> = None;
    for (i, &(byte, c)) in chars.iter().enumerate() {
        if !is_word_char(c) {
            if let Some(s) = current.take() {
                words.push(&name[s..byte]);
            }
            continue;
        }
        if starts[i] {
            if let Some(s) = current.take() {
                words.push(&name[s..byte]);
            }
            current = Some(byte);
        }
    }
    if let Some(s) = current {
        words.push(&name[s..]);
    }
    words
}
