use crate::constant::*;
use lazy_static::lazy_static;
use regex::Regex;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

lazy_static! {
    static ref NAMED_ARGUMENT_NAME: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9-]+$").unwrap();
    static ref POSITIONAL_NAME: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9-]+$").unwrap();
    static ref VERB_NAME: Regex = Regex::new(r"^[a-zA-Z0-9-]+$").unwrap();
    static ref PARAMETER_NAME: Regex = Regex::new(r"^[a-zA-Z0-9-]+$").unwrap();
}

pub(crate) fn is_valid_named_argument_name(name: &str) -> bool {
    NAMED_ARGUMENT_NAME.is_match(name)
}

pub(crate) fn is_valid_positional_name(name: &str) -> bool {
    POSITIONAL_NAME.is_match(name)
}

pub(crate) fn is_valid_verb_name(name: &str) -> bool {
    VERB_NAME.is_match(name)
}

pub(crate) fn is_valid_parameter_name(name: &str) -> bool {
    PARAMETER_NAME.is_match(name)
}

pub(crate) fn is_valid_single_letter_name(letter: char) -> bool {
    letter.is_ascii_alphanumeric() || letter == HELP_SINGLE_LETTER
}

/// A terminator ends a name: any character which could not itself be a single letter name.
pub(crate) fn is_terminator(character: char) -> bool {
    !is_valid_single_letter_name(character)
}

/// Match `-x`, `-x=..`, `-x<terminator>..`.
/// Returns the byte offset of the remainder.
pub(crate) fn match_short_form(token: &str, letter: char) -> Option<usize> {
    let rest = token.strip_prefix('-')?;
    let rest = rest.strip_prefix(letter)?;

    match rest.chars().next() {
        Some(next) if !is_terminator(next) => None,
        _ => Some(token.len() - rest.len()),
    }
}

/// Match `--name`, `--name=..`, `--name<terminator>..`.
/// Returns the byte offset of the remainder.
pub(crate) fn match_long_form(token: &str, name: &str) -> Option<usize> {
    let rest = token.strip_prefix("--")?;
    let rest = rest.strip_prefix(name)?;

    match rest.chars().next() {
        Some(next) if !is_terminator(next) => None,
        _ => Some(token.len() - rest.len()),
    }
}

/// Match either form of a named argument.
pub(crate) fn match_name(token: &str, name: &str, letter: Option<char>) -> Option<usize> {
    letter
        .and_then(|l| match_short_form(token, l))
        .or_else(|| match_long_form(token, name))
}

/// Whether the token bundles several single letter names: `-xyz`.
pub(crate) fn is_single_letter_bundle(token: &str) -> bool {
    let mut characters = token.chars();

    characters.next() == Some('-')
        && matches!(characters.next(), Some(second) if second != '-')
        && matches!(characters.next(), Some(third) if third != '=')
}

/// Split `-xyz` into `-x`, `-y`, `-z`.
pub(crate) fn split_single_letter_bundle(token: &str) -> Vec<String> {
    let split: Vec<String> = token
        .chars()
        .skip(1)
        .map(|letter| format!("-{letter}"))
        .collect();

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Split bundle '{token}' into {split:?}.");
    }

    split
}

/// The tokens contributed by the text of a response file.
///
/// Every line is trimmed, blank and `#` lines are dropped.
/// A line naming one of `named` (up to its first `=`) becomes `--line`, everything else is taken as is.
pub(crate) fn response_file_tokens(text: &str, named: &[&str]) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
        .map(|line| {
            let leading = line.split('=').next().unwrap_or(line);

            if !line.starts_with('-') && named.contains(&leading) {
                format!("--{line}")
            } else {
                line.to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("alpha", true)]
    #[case("al", true)]
    #[case("f-switch", true)]
    #[case("alpha2", true)]
    #[case("a", false)]
    #[case("2alpha", false)]
    #[case("-alpha", false)]
    #[case("alpha_bravo", false)]
    #[case("", false)]
    fn named_argument_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_valid_named_argument_name(name), expected);
        assert_eq!(is_valid_positional_name(name), expected);
    }

    #[rstest]
    #[case("juliett", true)]
    #[case("2", true)]
    #[case("do-it", true)]
    #[case("do it", false)]
    #[case("", false)]
    fn verb_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_valid_verb_name(name), expected);
    }

    #[rstest]
    #[case('a', true)]
    #[case('Z', true)]
    #[case('7', true)]
    #[case('?', true)]
    #[case('-', false)]
    #[case('=', false)]
    #[case('é', false)]
    fn single_letter_names(#[case] letter: char, #[case] expected: bool) {
        assert_eq!(is_valid_single_letter_name(letter), expected);
        assert_eq!(is_terminator(letter), !expected);
    }

    #[rstest]
    #[case("-a", 'a', Some(2))]
    #[case("-a=1", 'a', Some(2))]
    #[case("-a:1", 'a', Some(2))]
    #[case("-ab", 'a', None)]
    #[case("-b", 'a', None)]
    #[case("--a", 'a', None)]
    #[case("a", 'a', None)]
    #[case("-", 'a', None)]
    #[case("-?", '?', Some(2))]
    fn short_form(#[case] token: &str, #[case] letter: char, #[case] expected: Option<usize>) {
        assert_eq!(match_short_form(token, letter), expected);
    }

    #[rstest]
    #[case("--alpha", "alpha", Some(7))]
    #[case("--alpha=1", "alpha", Some(7))]
    #[case("--alpha-bravo", "alpha", Some(7))]
    #[case("--alphabravo", "alpha", None)]
    #[case("--alp", "alpha", None)]
    #[case("-alpha", "alpha", None)]
    #[case("--alphabravo", "alphabravo", Some(12))]
    fn long_form(#[case] token: &str, #[case] name: &str, #[case] expected: Option<usize>) {
        assert_eq!(match_long_form(token, name), expected);
    }

    #[rstest]
    #[case("-a", Some('a'), Some(2))]
    #[case("--alpha", Some('a'), Some(7))]
    #[case("--alpha", None, Some(7))]
    #[case("-a", None, None)]
    fn either_form(#[case] token: &str, #[case] letter: Option<char>, #[case] expected: Option<usize>) {
        assert_eq!(match_name(token, "alpha", letter), expected);
    }

    #[rstest]
    #[case("-ab", true)]
    #[case("-abc", true)]
    #[case("-a", false)]
    #[case("-a=b", false)]
    #[case("--ab", false)]
    #[case("ab", false)]
    #[case("-", false)]
    #[case("", false)]
    fn bundles(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_single_letter_bundle(token), expected);
    }

    #[test]
    fn split_bundle() {
        assert_eq!(
            split_single_letter_bundle("-abc"),
            vec!["-a".to_string(), "-b".to_string(), "-c".to_string()]
        );
    }

    #[test]
    fn response_file() {
        // Setup
        let text = "# comment\n\n  mike=mike-value  \r\n--alpha\nzulu\npapa-value\n  # indented comment\n";

        // Execute
        let tokens = response_file_tokens(text, &["mike", "zulu"]);

        // Verify
        assert_eq!(
            tokens,
            vec![
                "--mike=mike-value".to_string(),
                "--alpha".to_string(),
                "--zulu".to_string(),
                "papa-value".to_string(),
            ]
        );
    }

    #[test]
    fn response_file_empty() {
        assert_eq!(response_file_tokens("", &["mike"]), Vec::<String>::default());
        assert_eq!(response_file_tokens("\n#\n", &["mike"]), Vec::<String>::default());
    }
}
