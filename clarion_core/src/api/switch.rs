use crate::api::argument::{named_usage, Header};
use crate::api::{Argument, ArgumentNode, ParseFlag};
use crate::error::{Error, ProgrammerError, UserError};
use crate::matcher::match_name;
use crate::model::{ArgumentKind, FailurePolicy, RawValue};
use std::cell::Cell;

pub(crate) struct SwitchArgument {
    header: Header,
    single_letter_name: Option<char>,
    supplied: Cell<bool>,
    parsed: ParseFlag,
    policy: FailurePolicy,
}

impl SwitchArgument {
    pub(crate) fn new(
        header: Header,
        single_letter_name: Option<char>,
        parsed: ParseFlag,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            header,
            single_letter_name,
            supplied: Cell::new(false),
            parsed,
            policy,
        }
    }

    pub(crate) fn value(&self) -> Result<bool, ProgrammerError> {
        if self.parsed.get() {
            Ok(self.supplied.get())
        } else {
            Err(self
                .policy
                .raise(ProgrammerError::NotYetParsed(self.header.name.clone())))
        }
    }
}

impl Argument for SwitchArgument {
    fn name(&self) -> &str {
        &self.header.name
    }

    fn description(&self) -> Option<&str> {
        self.header.description()
    }

    fn kind(&self) -> ArgumentKind {
        ArgumentKind::Switch
    }

    fn is_required(&self) -> bool {
        false
    }

    fn is_supplied(&self) -> bool {
        self.supplied.get()
    }

    fn raw_value(&self) -> RawValue {
        if self.parsed.get() {
            RawValue::Flag(self.supplied.get())
        } else {
            RawValue::NotParsed
        }
    }
}

impl ArgumentNode for SwitchArgument {
    fn as_argument(&self) -> &dyn Argument {
        self
    }

    fn single_letter_name(&self) -> Option<char> {
        self.single_letter_name
    }

    fn try_parse_at(&self, index: usize, tokens: &[String]) -> Result<usize, Error> {
        let token = &tokens[index];
        let offset = match match_name(token, &self.header.name, self.single_letter_name) {
            Some(offset) => offset,
            None => return Ok(index),
        };

        if self.supplied.get() {
            return Err(UserError::SuppliedMoreThanOnce(self.header.name.clone()).into());
        }

        self.supplied.set(true);
        let remainder = &token[offset..];

        if !remainder.is_empty() {
            return Err(UserError::UnexpectedCharacters {
                name: self.header.name.clone(),
                characters: remainder.to_string(),
            }
            .into());
        }

        Ok(index + 1)
    }

    fn summary(&self) -> String {
        match self.single_letter_name {
            Some(letter) => format!("[-{letter}]"),
            None => format!("[--{}]", self.header.name),
        }
    }

    fn short_usage(&self) -> String {
        named_usage(&self.header.name, self.single_letter_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    fn switch() -> SwitchArgument {
        SwitchArgument::new(
            Header::new("alpha", None),
            Some('a'),
            Rc::new(Cell::new(true)),
            FailurePolicy::Report,
        )
    }

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[rstest]
    #[case("--alpha")]
    #[case("-a")]
    fn matched(#[case] token: &str) {
        // Setup
        let switch = switch();

        // Execute
        let result = switch.try_parse_at(0, &tokens(&[token]));

        // Verify
        assert_eq!(result, Ok(1));
        assert!(switch.is_supplied());
        assert_eq!(switch.value(), Ok(true));
        assert_eq!(switch.raw_value(), RawValue::Flag(true));
    }

    #[rstest]
    #[case("--bravo")]
    #[case("-b")]
    #[case("alpha")]
    #[case("--alphabet")]
    #[case("-ab")]
    fn not_matched(#[case] token: &str) {
        let switch = switch();
        assert_eq!(switch.try_parse_at(0, &tokens(&[token])), Ok(0));
        assert!(!switch.is_supplied());
        assert_eq!(switch.value(), Ok(false));
    }

    #[rstest]
    #[case("--alpha=true", "=true")]
    #[case("-a=1", "=1")]
    #[case("--alpha-x", "-x")]
    fn unexpected_characters(#[case] token: &str, #[case] characters: &str) {
        let switch = switch();
        assert_eq!(
            switch.try_parse_at(0, &tokens(&[token])),
            Err(UserError::UnexpectedCharacters {
                name: "alpha".to_string(),
                characters: characters.to_string(),
            }
            .into())
        );
    }

    #[test]
    fn supplied_twice() {
        // Setup
        let switch = switch();
        let tokens = tokens(&["--alpha", "-a"]);

        // Execute
        let first = switch.try_parse_at(0, &tokens);
        let second = switch.try_parse_at(1, &tokens);

        // Verify
        assert_eq!(first, Ok(1));
        assert_eq!(
            second,
            Err(UserError::SuppliedMoreThanOnce("alpha".to_string()).into())
        );
    }

    #[test]
    fn not_parsed() {
        let switch = SwitchArgument::new(
            Header::new("alpha", None),
            None,
            Rc::new(Cell::new(false)),
            FailurePolicy::Report,
        );
        assert_eq!(
            switch.value(),
            Err(ProgrammerError::NotYetParsed("alpha".to_string()))
        );
        assert_eq!(switch.raw_value(), RawValue::NotParsed);
    }

    #[test]
    fn usage() {
        let switch = switch();
        assert_eq!(switch.summary(), "[-a]");
        assert_eq!(switch.short_usage(), "-a, --alpha");
        assert_eq!(switch.long_usage(), vec!["See user's manual.".to_string()]);
    }
}
