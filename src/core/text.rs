//! Grapheme width helpers for painting text into cells.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

const TAB_WIDTH: usize = 4;

/// Display width of one grapheme cluster in cells.
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme == "\t" {
        return TAB_WIDTH;
    }
    grapheme
        .chars()
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .sum()
}

/// Display width of a string in cells.
pub fn visible_width(input: &str) -> usize {
    input.graphemes(true).map(grapheme_width).sum()
}

/// Longest prefix of `input` that fits in `width` cells, never splitting a grapheme.
pub fn truncate_to_width(input: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, grapheme) in input.grapheme_indices(true) {
        let w = grapheme_width(grapheme);
        if used + w > width {
            return &input[..idx];
        }
        used += w;
    }
    input
}

/// Yield `(column offset, base char, width)` for each visible grapheme.
///
/// Zero-width clusters are skipped; a cluster's combining marks are dropped since a cell
/// holds a single char.
pub(crate) fn cells(input: &str) -> impl Iterator<Item = (usize, char, usize)> + '_ {
    let mut column = 0;
    input.graphemes(true).filter_map(move |grapheme| {
        let width = grapheme_width(grapheme);
        if width == 0 {
            return None;
        }
        let start = column;
        column += width;
        let ch = match grapheme {
            "\t" => ' ',
            other => other.chars().next()?,
        };
        Some((start, ch, width))
    })
}
