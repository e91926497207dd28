use super::split_lines;

/// Removes the first `n` characters of every line.
///
/// Lines shorter than `n` become empty. `n == 0` returns the lines unchanged.
pub fn hide_chars<S: AsRef<str>>(lines: &[S], n: usize) -> Vec<String> {
    lines
        .iter()
        .map(|line| strip_leading_chars(line.as_ref(), n).to_string())
        .collect()
}

/// [`hide_chars`] over a whole document, split and rejoined on `\n`.
pub fn hide_chars_text(text: &str, n: usize) -> String {
    if n == 0 {
        return text.to_string();
    }
    hide_chars(&split_lines(text), n).join("\n")
}

pub(crate) fn strip_leading_chars(line: &str, n: usize) -> &str {
    match line.char_indices().nth(n) {
        Some((idx, _)) => &line[idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hide_three_chars() {
        let lines = ["abcdef", "xy"];
        assert_eq!(hide_chars(&lines, 3), vec!["def", ""]);
    }

    #[test]
    fn test_zero_is_identity() {
        let lines = ["abcdef", "", "  indented"];
        assert_eq!(hide_chars(&lines, 0), vec!["abcdef", "", "  indented"]);
    }

    #[test]
    fn test_exact_length_line_becomes_empty() {
        assert_eq!(hide_chars(&["abc"], 3), vec![""]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(hide_chars(&["héllo wörld"], 2), vec!["llo wörld"]);
        assert_eq!(hide_chars(&["日本語テキスト"], 3), vec!["テキスト"]);
    }

    #[test]
    fn test_reapplying_strips_again() {
        let once = hide_chars(&["abcdef"], 2);
        let twice = hide_chars(&once, 2);
        assert_eq!(twice, vec!["ef"]);
    }

    #[test]
    fn test_text_wrapper_preserves_line_structure() {
        let text = "2024-01-01 start\n2024-01-02 stop\n";
        assert_eq!(hide_chars_text(text, 11), "start\nstop\n");
    }
}
