//! Plain/matched text segmentation for highlighted names
//!
//! Pure transform only; emitting markup is left to the presentation layer.

use std::ops::Range;

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Pair flat boundaries into matched byte ranges. A trailing unpaired
/// boundary is ignored.
pub fn matched_spans(ranges: &[usize]) -> Vec<Range<usize>> {
    ranges
        .chunks_exact(2)
        .map(|pair| pair[0]..pair[1])
        .collect()
}

fn valid_boundaries(name: &str, ranges: &[usize]) -> bool {
    ranges.windows(2).all(|w| w[0] <= w[1]) && ranges.iter().all(|&b| name.is_char_boundary(b))
}

/// Split `name` at the flat boundaries in `ranges`.
///
/// The first piece (before the first boundary) is plain, then pieces
/// alternate matched/plain; whatever follows the last boundary is plain.
/// Empty pieces are skipped, so concatenating every `text` yields `name`.
/// Out-of-order or non-char-boundary offsets produce one plain segment.
pub fn highlight_segments<'a>(name: &'a str, ranges: &[usize]) -> Vec<Segment<'a>> {
    if name.is_empty() {
        return Vec::new();
    }
    if ranges.is_empty() || !valid_boundaries(name, ranges) {
        return vec![Segment {
            text: name,
            matched: false,
        }];
    }

    let mut segments = Vec::with_capacity(ranges.len() + 1);
    let mut prev = 0;
    for (n, &boundary) in ranges.iter().enumerate() {
        let text = &name[prev..boundary];
        if !text.is_empty() {
            segments.push(Segment {
                text,
                matched: n % 2 == 1,
            });
        }
        prev = boundary;
    }
    if prev < name.len() {
        segments.push(Segment {
            text: &name[prev..],
            matched: false,
        });
    }
    segments
}
