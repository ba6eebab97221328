use crate::api::argument::{describe, Header};
use crate::api::slot::ValueSlot;
use crate::api::{Argument, ArgumentNode, ValueArgument};
use crate::error::{Error, UserError};
use crate::model::{ArgumentKind, RawValue};

pub(crate) struct PositionalArgument<T> {
    header: Header,
    required: bool,
    slot: ValueSlot<T>,
}

impl<T: Clone> PositionalArgument<T> {
    pub(crate) fn new(header: Header, required: bool, slot: ValueSlot<T>) -> Self {
        Self {
            header,
            required,
            slot,
        }
    }
}

impl<T: Clone> Argument for PositionalArgument<T> {
    fn name(&self) -> &str {
        &self.header.name
    }

    fn description(&self) -> Option<&str> {
        self.header.description()
    }

    fn kind(&self) -> ArgumentKind {
        ArgumentKind::Positional
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

impl<T: Clone> ValueArgument<T> for PositionalArgument<T> {
    fn slot(&self) -> &ValueSlot<T> {
        &self.slot
    }
}

impl<T: Clone> ArgumentNode for PositionalArgument<T> {
    fn as_argument(&self) -> &dyn Argument {
        self
    }

    fn is_repeated(&self) -> bool {
        self.slot.is_repeated()
    }

    fn try_parse_at(&self, index: usize, tokens: &[String]) -> Result<usize, Error> {
        if self.slot.is_supplied() && !self.slot.is_repeated() {
            return Ok(index);
        }

        let text = &tokens[index];
        self.slot
            .realize(text)
            .map_err(|cause| UserError::UnparsableValue {
                name: self.header.name.clone(),
                text: text.clone(),
                cause,
            })?;
        Ok(index + 1)
    }

    fn summary(&self) -> String {
        if self.required {
            format!("<{}>", self.header.name)
        } else if self.slot.is_repeated() {
            format!("[<{}> ...]", self.header.name)
        } else {
            format!("[<{}>]", self.header.name)
        }
    }

    fn short_usage(&self) -> String {
        if self.slot.is_repeated() {
            format!("<{}> ...", self.header.name)
        } else {
            format!("<{}>", self.header.name)
        }
    }

    fn long_usage(&self) -> Vec<String> {
        let mut paragraphs = vec![describe(self.description())];

        if let Some(default) = self.slot.default_text() {
            paragraphs.push(format!("If omitted, the default is {default}."));
        }

        paragraphs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::slot::SlotConfig;
    use crate::codec::IntCodec;
    use crate::error::CodecError;
    use crate::model::FailurePolicy;
    use std::cell::Cell;
    use std::rc::Rc;

    fn positional(default: Option<i32>, repeated: bool) -> PositionalArgument<i32> {
        PositionalArgument::new(
            Header::new("india", None),
            default.is_none() && !repeated,
            ValueSlot::new(
                "india",
                Box::new(IntCodec),
                SlotConfig {
                    default,
                    preset: None,
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

    #[test]
    fn consumes_once() {
        // Setup
        let positional = positional(None, false);
        let tokens = tokens(&["1", "-2"]);

        // Execute
        let first = positional.try_parse_at(0, &tokens);
        let second = positional.try_parse_at(1, &tokens);

        // Verify
        assert_eq!(first, Ok(1));
        assert_eq!(second, Ok(1));
        assert_eq!(positional.slot().effective(), Some(1));
        assert!(positional.is_required());
    }

    #[test]
    fn repeated_consumes_all() {
        let positional = positional(None, true);
        let tokens = tokens(&["1", "-2", "3"]);
        assert_eq!(positional.try_parse_at(0, &tokens), Ok(1));
        assert_eq!(positional.try_parse_at(1, &tokens), Ok(2));
        assert_eq!(positional.try_parse_at(2, &tokens), Ok(3));
        assert_eq!(positional.slot().collected(), vec![1, -2, 3]);
        assert!(!positional.is_required());
    }

    #[test]
    fn unparsable() {
        let positional = positional(Some(3), false);
        assert_eq!(
            positional.try_parse_at(0, &tokens(&["x"])),
            Err(UserError::UnparsableValue {
                name: "india".to_string(),
                text: "x".to_string(),
                cause: CodecError("Expected an integer, found 'x'".to_string()),
            }
            .into())
        );
        assert!(!positional.is_supplied());
        assert_eq!(positional.slot().effective(), Some(3));
    }

    #[test]
    fn usage() {
        assert_eq!(positional(None, false).summary(), "<india>");
        assert_eq!(positional(Some(3), false).summary(), "[<india>]");
        assert_eq!(positional(None, true).summary(), "[<india> ...]");
        assert_eq!(positional(None, false).short_usage(), "<india>");
        assert_eq!(positional(None, true).short_usage(), "<india> ...");
        assert_eq!(
            positional(Some(3), false).long_usage(),
            vec![
                "See user's manual.".to_string(),
                "If omitted, the default is 3.".to_string(),
            ]
        );
    }
}
