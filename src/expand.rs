//! Alias and variable expansion
//!
//! Runs on a chain segment before tokenization. The alias pass looks at the
//! leading token only and substitutes at most once, so a single level of
//! indirection is honored and alias cycles cannot loop. The variable pass
//! replaces `$?`, `$$`, and `$NAME` textually without recursing into the
//! substituted values.

use crate::session::Session;

/// Run both expansion passes over a segment.
pub fn expand(session: &Session, segment: &str) -> String {
    let aliased = expand_aliases(session, segment);
    expand_variables(session, &aliased)
}

/// Replace the leading token when it names an alias.
pub fn expand_aliases(session: &Session, segment: &str) -> String {
    let trimmed = segment.trim_start();
    let split = trimmed
        .find(|c: char| c.is_ascii_whitespace())
        .unwrap_or(trimmed.len());
    let (head, rest) = trimmed.split_at(split);
    if head.is_empty() {
        return segment.to_string();
    }
    match session.alias_value(head) {
        Some(value) => format!("{}{}", value, rest),
        None => segment.to_string(),
    }
}

/// Replace `$?`, `$$`, and `$NAME` occurrences.
///
/// `$NAME` takes the longest identifier run (`[A-Za-z_][A-Za-z0-9_]*`) and
/// becomes the empty string when the name is not in the environment. A `$`
/// followed by anything else stays literal.
pub fn expand_variables(session: &Session, segment: &str) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let mut out = String::with_capacity(segment.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '$' && i + 1 < chars.len() {
            match chars[i + 1] {
                '?' => {
                    out.push_str(&session.last_status.to_string());
                    i += 2;
                    continue;
                }
                '$' => {
                    out.push_str(&std::process::id().to_string());
                    i += 2;
                    continue;
                }
                c if c.is_ascii_alphabetic() || c == '_' => {
                    let start = i + 1;
                    let mut end = start;
                    while end < chars.len()
                        && (chars[end].is_ascii_alphanumeric() || chars[end] == '_')
                    {
                        end += 1;
                    }
                    let name: String = chars[start..end].iter().collect();
                    if let Some(value) = session.getenv(&name) {
                        out.push_str(value);
                    }
                    i = end;
                    continue;
                }
                _ => {}
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{split_words, ARG_DELIMS};

    #[test]
    fn alias_substitutes_leading_token_once() {
        let mut session = Session::new("husk");
        session.set_alias("ll", "ls -l");
        let expanded = expand(&session, "ll /tmp");
        assert_eq!(
            split_words(&expanded, ARG_DELIMS),
            vec!["ls", "-l", "/tmp"]
        );
    }

    #[test]
    fn alias_expansion_is_single_level() {
        let mut session = Session::new("husk");
        session.set_alias("a", "b");
        session.set_alias("b", "c");
        assert_eq!(expand(&session, "a"), "b");
    }

    #[test]
    fn alias_does_not_touch_later_tokens() {
        let mut session = Session::new("husk");
        session.set_alias("ls", "dir");
        assert_eq!(expand(&session, "echo ls"), "echo ls");
    }

    #[test]
    fn question_mark_expands_to_last_status() {
        let mut session = Session::new("husk");
        session.last_status = 127;
        assert_eq!(expand_variables(&session, "echo $?"), "echo 127");
    }

    #[test]
    fn double_dollar_expands_to_pid() {
        let session = Session::new("husk");
        let expanded = expand_variables(&session, "$$");
        assert_eq!(expanded, std::process::id().to_string());
    }

    #[test]
    fn named_variable_from_environment() {
        let mut session = Session::new("husk");
        session.set_env("HUSK_GREETING", "hello");
        assert_eq!(
            expand_variables(&session, "echo $HUSK_GREETING!"),
            "echo hello!"
        );
    }

    #[test]
    fn missing_variable_becomes_empty() {
        let mut session = Session::new("husk");
        session.unset_env("HUSK_NO_SUCH_VAR");
        assert_eq!(expand_variables(&session, "echo $HUSK_NO_SUCH_VAR."), "echo .");
    }

    #[test]
    fn lone_dollar_stays_literal() {
        let session = Session::new("husk");
        assert_eq!(expand_variables(&session, "cost: 5$"), "cost: 5$");
        assert_eq!(expand_variables(&session, "a $% b"), "a $% b");
    }

    #[test]
    fn substitution_does_not_recurse() {
        let mut session = Session::new("husk");
        session.set_env("HUSK_OUTER", "$HUSK_INNER");
        session.set_env("HUSK_INNER", "nope");
        assert_eq!(expand_variables(&session, "$HUSK_OUTER"), "$HUSK_INNER");
    }
}
