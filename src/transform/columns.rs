use super::{chars::strip_leading_chars, split_lines};

/// Drops the first `n` delimiter-separated fields of every line.
///
/// The remaining fields are rejoined with the same delimiter. A line with `n`
/// fields or fewer becomes empty, including a line that has no delimiter at
/// all (a single field). An empty delimiter separates every character, so it
/// behaves like hiding `n` characters.
pub fn hide_columns<S: AsRef<str>>(lines: &[S], n: usize, delimiter: &str) -> Vec<String> {
    lines
        .iter()
        .map(|line| strip_leading_fields(line.as_ref(), n, delimiter).to_string())
        .collect()
}

/// [`hide_columns`] over a whole document, split and rejoined on `\n`.
pub fn hide_columns_text(text: &str, n: usize, delimiter: &str) -> String {
    if n == 0 {
        return text.to_string();
    }
    hide_columns(&split_lines(text), n, delimiter).join("\n")
}

fn strip_leading_fields<'a>(line: &'a str, n: usize, delimiter: &str) -> &'a str {
    if n == 0 {
        return line;
    }
    if delimiter.is_empty() {
        return strip_leading_chars(line, n);
    }

    // The tail after the n-th delimiter is exactly the rejoined remainder.
    match line.match_indices(delimiter).nth(n - 1) {
        Some((idx, _)) => &line[idx + delimiter.len()..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hide_two_tab_columns() {
        let lines = ["a\tb\tc\td", "1\t2"];
        assert_eq!(hide_columns(&lines, 2, "\t"), vec!["c\td", ""]);
    }

    #[test]
    fn test_zero_is_identity() {
        let lines = ["a,b,c", "plain"];
        assert_eq!(hide_columns(&lines, 0, ","), vec!["a,b,c", "plain"]);
    }

    #[test]
    fn test_line_without_delimiter_is_single_field() {
        assert_eq!(hide_columns(&["no delimiter here"], 1, "|"), vec![""]);
    }

    #[test]
    fn test_exactly_n_fields_becomes_empty() {
        assert_eq!(hide_columns(&["a,b"], 2, ","), vec![""]);
    }

    #[test]
    fn test_trailing_delimiter_leaves_empty_field() {
        assert_eq!(hide_columns(&["a,b,"], 2, ","), vec![""]);
        assert_eq!(hide_columns(&["a,,b"], 1, ","), vec![",b"]);
    }

    #[test]
    fn test_multi_char_delimiter() {
        assert_eq!(
            hide_columns(&["ts :: level :: message :: more"], 2, " :: "),
            vec!["message :: more"]
        );
    }

    #[test]
    fn test_empty_delimiter_hides_characters() {
        assert_eq!(hide_columns(&["abcdef"], 2, ""), vec!["cdef"]);
    }

    #[test]
    fn test_text_wrapper() {
        let text = "id\tname\tvalue\n1\tfoo\t10\n2\tbar";
        assert_eq!(hide_columns_text(text, 1, "\t"), "name\tvalue\nfoo\t10\nbar");
    }
}
