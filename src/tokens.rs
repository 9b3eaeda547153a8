//! Tokenization of an expanded chain segment
//!
//! Argument vectors split on whitespace with runs collapsed; `PATH` entries
//! and history lines split on a single fixed character with empty fields
//! preserved.

/// Default argv delimiters: space, tab, newline.
pub const ARG_DELIMS: &str = " \t\n";

/// Split on any delimiter byte, collapsing consecutive delimiters.
///
/// An empty or all-delimiter input yields an empty vector, which the
/// dispatcher treats as a no-op segment.
pub fn split_words(input: &str, delims: &str) -> Vec<String> {
    input
        .split(|c| delims.contains(c))
        .filter(|word| !word.is_empty())
        .map(String::from)
        .collect()
}

/// Split on a single delimiter without collapsing; empty fields survive.
pub fn split_on(input: &str, delim: char) -> Vec<String> {
    input.split(delim).map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_delimiter_runs() {
        assert_eq!(
            split_words("ls   -l\t/tmp", ARG_DELIMS),
            vec!["ls", "-l", "/tmp"]
        );
    }

    #[test]
    fn empty_input_yields_empty_argv() {
        assert!(split_words("", ARG_DELIMS).is_empty());
        assert!(split_words("  \t ", ARG_DELIMS).is_empty());
    }

    #[test]
    fn split_on_preserves_empty_fields() {
        assert_eq!(split_on("/bin::/usr/bin", ':'), vec!["/bin", "", "/usr/bin"]);
    }
}
