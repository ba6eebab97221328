use crate::api::slot::ValueSlot;
use crate::constant::DEFAULT_DESCRIPTION;
use crate::error::Error;
use crate::model::{ArgumentKind, RawValue};
use std::cell::Cell;
use std::rc::Rc;

/// Shared between a parser and its arguments: whether the parser has parsed.
pub(crate) type ParseFlag = Rc<Cell<bool>>;

/// A registered command line argument, viewed without its value type.
pub trait Argument {
    /// The name, unique within its parser.
    fn name(&self) -> &str;

    /// The description shown in help, if any.
    fn description(&self) -> Option<&str>;

    /// The kind of argument.
    fn kind(&self) -> ArgumentKind;

    /// Whether parsing fails when this argument is not supplied.
    fn is_required(&self) -> bool;

    /// Whether this argument was supplied on the command line.
    fn is_supplied(&self) -> bool;

    /// The current value, type erased.
    fn raw_value(&self) -> RawValue;
}

// The parser's view of an argument.
// We need a (dyn ..) over every argument regardless of its value type.
pub(crate) trait ArgumentNode: Argument {
    fn as_argument(&self) -> &dyn Argument;

    fn single_letter_name(&self) -> Option<char> {
        None
    }

    fn is_repeated(&self) -> bool {
        false
    }

    /// Try to consume the token at `index`.
    /// Returns `index` when the token is not for this argument, otherwise the index after what was consumed.
    fn try_parse_at(&self, index: usize, tokens: &[String]) -> Result<usize, Error>;

    /// The form shown in the usage line, ex: `[-a]`.
    fn summary(&self) -> String;

    /// The form shown in the left help column, ex: `-a, --alpha`.
    fn short_usage(&self) -> String;

    /// The paragraphs for the right help column.
    fn long_usage(&self) -> Vec<String> {
        vec![describe(self.description())]
    }

    fn dump_into(&self, prefix: &str, lines: &mut Vec<String>) {
        lines.push(format!("{prefix}{} = {}", self.name(), self.raw_value()));
    }
}

/// An argument whose value lives in a [`ValueSlot`]: options and positionals.
pub(crate) trait ValueArgument<T>: ArgumentNode {
    fn slot(&self) -> &ValueSlot<T>;
}

#[derive(Debug)]
pub(crate) struct Header {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
}

impl Header {
    pub(crate) fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }

    pub(crate) fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

pub(crate) fn describe(description: Option<&str>) -> String {
    format!("{}.", description.unwrap_or(DEFAULT_DESCRIPTION))
}

pub(crate) fn named_usage(name: &str, letter: Option<char>) -> String {
    match letter {
        Some(l) => format!("-{l}, --{name}"),
        None => format!("--{name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, "See user's manual.")]
    #[case(Some("Alpha"), "Alpha.")]
    fn describe_default(#[case] description: Option<&str>, #[case] expected: &str) {
        assert_eq!(describe(description), expected);
    }

    #[rstest]
    #[case(Some('a'), "-a, --alpha")]
    #[case(None, "--alpha")]
    fn named(#[case] letter: Option<char>, #[case] expected: &str) {
        assert_eq!(named_usage("alpha", letter), expected);
    }
}
