//! Display transforms over raw document text.
//!
//! Every transform takes the pristine original lines. Applying one to its own
//! output strips again, so callers keep the original around and re-derive.

pub mod chars;
pub mod columns;

pub use chars::{hide_chars, hide_chars_text};
pub use columns::{hide_columns, hide_columns_text};

/// Delimiter used when nothing has been saved for a document.
pub const DEFAULT_DELIMITER: &str = "\t";

/// Turns delimiter input into the separator actually used.
///
/// The two-character input `\t` (backslash, `t`) means a tab. That is the only
/// escape recognised; anything else is taken literally.
pub fn parse_delimiter(input: &str) -> String {
    if input == "\\t" {
        "\t".to_string()
    } else {
        input.to_string()
    }
}

/// Inverse of [`parse_delimiter`], for showing a saved delimiter in an input field.
pub fn display_delimiter(delimiter: &str) -> String {
    if delimiter == "\t" {
        "\\t".to_string()
    } else {
        delimiter.to_string()
    }
}

/// Parses a user-typed character or column count.
///
/// Negative, non-numeric and empty input all clamp to 0, which makes the
/// transform a no-op instead of an error.
pub fn parse_count(input: &str) -> usize {
    let trimmed = input.trim();
    match trimmed.parse::<i64>() {
        Ok(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
        Ok(_) => 0,
        // Leading digits still count ("12px" -> 12)
        Err(_) => {
            let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<usize>().unwrap_or(0)
        }
    }
}

pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimiter_tab_escape() {
        assert_eq!(parse_delimiter("\\t"), "\t");
        assert_eq!(parse_delimiter(","), ",");
        assert_eq!(parse_delimiter("\\n"), "\\n");
        assert_eq!(parse_delimiter("\\t\\t"), "\\t\\t");
    }

    #[test]
    fn test_display_delimiter() {
        assert_eq!(display_delimiter("\t"), "\\t");
        assert_eq!(display_delimiter("|"), "|");
    }

    #[test]
    fn test_parse_count_clamps() {
        assert_eq!(parse_count("12"), 12);
        assert_eq!(parse_count(" 7 "), 7);
        assert_eq!(parse_count("-4"), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("12px"), 12);
    }

    #[test]
    fn test_split_lines_keeps_trailing_empty_line() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b", ""]);
        assert_eq!(split_lines(""), vec![""]);
    }
}
