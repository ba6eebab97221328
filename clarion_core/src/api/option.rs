use crate::api::argument::{describe, named_usage, Header};
use crate::api::slot::ValueSlot;
use crate::api::{Argument, ArgumentNode, ValueArgument};
use crate::error::{Error, UserError};
use crate::matcher::match_name;
use crate::model::{ArgumentKind, RawValue};

pub(crate) struct OptionArgument<T> {
    header: Header,
    single_letter_name: Option<char>,
    parameter_name: Option<String>,
    required: bool,
    slot: ValueSlot<T>,
}

impl<T: Clone> OptionArgument<T> {
    pub(crate) fn new(
        header: Header,
        single_letter_name: Option<char>,
        parameter_name: Option<String>,
        required: bool,
        slot: ValueSlot<T>,
    ) -> Self {
        Self {
            header,
            single_letter_name,
            parameter_name,
            required,
            slot,
        }
    }

    fn parameter(&self) -> String {
        let name = self
            .parameter_name
            .as_deref()
            .unwrap_or_else(|| self.slot.type_name());

        if self.slot.has_preset() {
            format!("[=<{name}>]")
        } else {
            format!("=<{name}>")
        }
    }
}

impl<T: Clone> Argument for OptionArgument<T> {
    fn name(&self) -> &str {
        &self.header.name
    }

    fn description(&self) -> Option<&str> {
        self.header.description()
    }

    fn kind(&self) -> ArgumentKind {
        ArgumentKind::Option
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn is_supplied(&self) -> bool {
        self.slot.is_supplied()
    }

    fn raw_value(&self) -> RawValue {
        self.slot.raw_value()
    }
}

impl<T: Clone> ValueArgument<T> for OptionArgument<T> {
    fn slot(&self) -> &ValueSlot<T> {
        &self.slot
    }
}

impl<T: Clone> ArgumentNode for OptionArgument<T> {
    fn as_argument(&self) -> &dyn Argument {
        self
    }

    fn single_letter_name(&self) -> Option<char> {
        self.single_letter_name
    }

    fn is_repeated(&self) -> bool {
        self.slot.is_repeated()
    }

    fn try_parse_at(&self, index: usize, tokens: &[String]) -> Result<usize, Error> {
        let token = &tokens[index];
        let name = &self.header.name;
        let offset = match match_name(token, name, self.single_letter_name) {
            Some(offset) => offset,
            None => return Ok(index),
        };

        if self.slot.is_supplied() && !self.slot.is_repeated() {
            return Err(UserError::SuppliedMoreThanOnce(name.clone()).into());
        }

        let remainder = &token[offset..];

        if remainder.is_empty() {
            if !self.slot.realize_preset() {
                return Err(UserError::EqualsSignExpected(name.clone()).into());
            }
        } else if let Some(text) = remainder.strip_prefix('=') {
            self.slot
                .realize(text)
                .map_err(|cause| UserError::UnparsableValue {
                    name: name.clone(),
                    text: text.to_string(),
                    cause,
                })?;
        } else {
            return Err(UserError::UnexpectedCharacters {
                name: name.clone(),
                characters: remainder.to_string(),
            }
            .into());
        }

        Ok(index + 1)
    }

    fn summary(&self) -> String {
        let mut usage = format!("--{}{}", self.header.name, self.parameter());

        if self.slot.is_repeated() {
            usage.push_str(" ...");
        }

        if self.required {
            usage
        } else {
            format!("[{usage}]")
        }
    }

    fn short_usage(&self) -> String {
        format!(
            "{}{}",
            named_usage(&self.header.name, self.single_letter_name),
            self.parameter()
        )
    }

    fn long_usage(&self) -> Vec<String> {
        let mut paragraphs = vec![describe(self.description())];

        if let Some(default) = self.slot.default_text() {
            paragraphs.push(format!("If omitted, the default is {default}."));
        }

        if let Some(preset) = self.slot.preset_text() {
            paragraphs.push(format!("If supplied without a value, the preset is {preset}."));
        }

        paragraphs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::slot::SlotConfig;
    use crate::codec::{IntCodec, StringCodec};
    use crate::error::CodecError;
    use crate::model::FailurePolicy;
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    fn option(default: Option<i32>, preset: Option<i32>, repeated: bool) -> OptionArgument<i32> {
        OptionArgument::new(
            Header::new("alpha", Some("The alpha".to_string())),
            Some('a'),
            None,
            false,
            ValueSlot::new(
                "alpha",
                Box::new(IntCodec),
                SlotConfig {
                    default,
                    preset,
                    repeated,
                },
                Rc::new(Cell::new(true)),
                FailurePolicy::Report,
            ),
        )
    }

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[rstest]
    #[case("--alpha=42", 42)]
    #[case("-a=42", 42)]
    #[case("--alpha=-1", -1)]
    fn explicit(#[case] token: &str, #[case] expected: i32) {
        // Setup
        let option = option(Some(5), None, false);

        // Execute
        let result = option.try_parse_at(0, &tokens(&[token]));

        // Verify
        assert_eq!(result, Ok(1));
        assert!(option.is_supplied());
        assert_eq!(option.slot().effective(), Some(expected));
    }

    #[rstest]
    #[case("--bravo=1")]
    #[case("alpha")]
    #[case("-b")]
    fn not_matched(#[case] token: &str) {
        let option = option(Some(5), None, false);
        assert_eq!(option.try_parse_at(0, &tokens(&[token])), Ok(0));
        assert!(!option.is_supplied());
        assert_eq!(option.slot().effective(), Some(5));
    }

    #[rstest]
    #[case("--alpha")]
    #[case("-a")]
    fn preset(#[case] token: &str) {
        let option = option(Some(5), Some(7), false);
        assert_eq!(option.try_parse_at(0, &tokens(&[token])), Ok(1));
        assert_eq!(option.slot().effective(), Some(7));
    }

    #[rstest]
    #[case("--alpha")]
    #[case("-a")]
    fn equals_sign_expected(#[case] token: &str) {
        let option = option(Some(5), None, false);
        assert_eq!(
            option.try_parse_at(0, &tokens(&[token])),
            Err(UserError::EqualsSignExpected("alpha".to_string()).into())
        );
    }

    #[rstest]
    #[case("--alpha:1", ":1")]
    #[case("-a-1", "-1")]
    fn unexpected_characters(#[case] token: &str, #[case] characters: &str) {
        let option = option(None, None, false);
        assert_eq!(
            option.try_parse_at(0, &tokens(&[token])),
            Err(UserError::UnexpectedCharacters {
                name: "alpha".to_string(),
                characters: characters.to_string(),
            }
            .into())
        );
    }

    #[rstest]
    #[case("--alpha=x", "x")]
    #[case("--alpha=", "")]
    fn unparsable(#[case] token: &str, #[case] text: &str) {
        let option = option(None, None, false);
        assert_eq!(
            option.try_parse_at(0, &tokens(&[token])),
            Err(UserError::UnparsableValue {
                name: "alpha".to_string(),
                text: text.to_string(),
                cause: CodecError(format!("Expected an integer, found '{text}'")),
            }
            .into())
        );
    }

    #[test]
    fn empty_string() {
        let option = OptionArgument::new(
            Header::new("alpha", None),
            None,
            None,
            false,
            ValueSlot::new(
                "alpha",
                Box::new(StringCodec),
                SlotConfig {
                    default: None,
                    preset: None,
                    repeated: false,
                },
                Rc::new(Cell::new(true)),
                FailurePolicy::Report,
            ),
        );
        assert_eq!(option.try_parse_at(0, &tokens(&["--alpha="])), Ok(1));
        assert_eq!(option.slot().effective(), Some(String::default()));
    }

    #[test]
    fn supplied_twice() {
        let option = option(None, None, false);
        let tokens = tokens(&["--alpha=1", "-a=2"]);
        assert_eq!(option.try_parse_at(0, &tokens), Ok(1));
        assert_eq!(
            option.try_parse_at(1, &tokens),
            Err(UserError::SuppliedMoreThanOnce("alpha".to_string()).into())
        );
    }

    #[test]
    fn repeated() {
        let option = option(None, None, true);
        let tokens = tokens(&["-a=42", "--alpha=43"]);
        assert_eq!(option.try_parse_at(0, &tokens), Ok(1));
        assert_eq!(option.try_parse_at(1, &tokens), Ok(2));
        assert_eq!(option.slot().collected(), vec![42, 43]);
    }

    #[rstest]
    #[case(None, None, "-a, --alpha=<integer>", vec!["The alpha."])]
    #[case(Some(5), None, "-a, --alpha=<integer>", vec!["The alpha.", "If omitted, the default is 5."])]
    #[case(Some(5), Some(7), "-a, --alpha[=<integer>]", vec!["The alpha.", "If omitted, the default is 5.", "If supplied without a value, the preset is 7."])]
    fn usage(
        #[case] default: Option<i32>,
        #[case] preset: Option<i32>,
        #[case] short: &str,
        #[case] long: Vec<&str>,
    ) {
        let option = option(default, preset, false);
        assert_eq!(option.summary(), format!("[{}]", &short[4..]));
        assert_eq!(option.short_usage(), short);
        assert_eq!(option.long_usage(), long);
    }
}
