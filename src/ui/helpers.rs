//! Shared rendering utilities and helpers.
//!
//! Text formatting used by both the view model and the components, plus the
//! handful of ANSI sequences the renderer emits.
//!
//! # Example
//!
//! ```rust
//! use dexview::ui::helpers::{capitalize, format_tenths};
//!
//! assert_eq!(capitalize("pikachu"), "Pikachu");
//! assert_eq!(format_tenths(7), "0.7");
//! ```

pub const BOLD: &str = "\u{1b}[1m";
pub const DIM: &str = "\u{1b}[2m";
pub const REVERSE: &str = "\u{1b}[7m";
pub const UNDERLINE: &str = "\u{1b}[4m";
pub const RESET: &str = "\u{1b}[0m";

/// Upper-cases the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Formats a value stored in tenths of a unit (decimetres, hectograms).
///
/// Whole values print without a fractional part: `100` becomes `"10"`.
#[must_use]
pub fn format_tenths(value: u32) -> String {
    format!("{}", f64::from(value) / 10.0)
}

/// Centers `text` within `cols` columns. Text wider than `cols` is returned as is.
#[must_use]
pub fn centered(text: &str, cols: usize) -> String {
    let len = text.chars().count();
    let padding = cols.saturating_sub(len) / 2;
    format!("{}{text}", " ".repeat(padding))
}

/// Writes `text` with the given character ranges underlined.
///
/// Ranges use UTF-8 character indices `(start, end)`, exclusive end. Ranges
/// past the end of the text are clipped.
pub fn write_highlighted(out: &mut String, text: &str, ranges: &[(usize, usize)]) {
    if ranges.is_empty() {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(UNDERLINE);
        out.extend(&chars[start..end]);
        out.push_str(RESET);
        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("mr-mime"), "Mr-mime");
        assert_eq!(capitalize("éclair"), "Éclair");
    }

    #[test]
    fn tenths_render_as_decimal() {
        assert_eq!(format_tenths(7), "0.7");
        assert_eq!(format_tenths(69), "6.9");
        assert_eq!(format_tenths(100), "10");
    }

    #[test]
    fn highlight_wraps_only_matched_chars() {
        let mut out = String::new();
        write_highlighted(&mut out, "pikachu", &[(0, 4)]);
        assert_eq!(out, format!("{UNDERLINE}pika{RESET}chu"));
    }

    #[test]
    fn highlight_clips_out_of_range() {
        let mut out = String::new();
        write_highlighted(&mut out, "abc", &[(2, 10)]);
        assert_eq!(out, format!("ab{UNDERLINE}c{RESET}"));
    }
}
