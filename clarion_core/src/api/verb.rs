use crate::api::argument::{describe, Header};
use crate::api::{Argument, ArgumentNode, ParseFlag};
use crate::error::{Error, ProgrammerError};
use crate::model::{ArgumentKind, RawValue};
use crate::parser::{ChildArgumentParser, Settings};
use crate::prelude::ArgumentRegistry;
use std::cell::RefCell;
use std::rc::Rc;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The handler of a verb.
///
/// It is invoked with a child parser on which it registers the verb's own arguments, and then must call
/// [`ChildArgumentParser::try_parse`] exactly once.
/// The handler runs once at registration (to validate the verb's arguments) and again if the verb is selected.
pub type VerbHandler = dyn Fn(&mut ChildArgumentParser) -> Result<(), Error>;

pub(crate) struct VerbArgument {
    header: Header,
    full_name: String,
    handler: Box<VerbHandler>,
    settings: Rc<Settings>,
    executed: RefCell<Option<ChildArgumentParser>>,
    parsed: ParseFlag,
}

impl VerbArgument {
    pub(crate) fn new(
        header: Header,
        parent_name: &str,
        handler: Box<VerbHandler>,
        settings: Rc<Settings>,
        parsed: ParseFlag,
    ) -> Self {
        let full_name = format!("{parent_name} {}", header.name);
        Self {
            header,
            full_name,
            handler,
            settings,
            executed: RefCell::new(None),
            parsed,
        }
    }

    /// Run the handler against a throwaway child, checking it registers valid arguments and calls `try_parse` once.
    pub(crate) fn initialize(&self) -> Result<(), ProgrammerError> {
        let mut child =
            ChildArgumentParser::initialization(self.full_name.clone(), self.settings.clone());

        match (self.handler)(&mut child) {
            Ok(()) => {}
            Err(Error::Programmer(error)) => return Err(error),
            Err(Error::User(error)) => {
                return Err(self.settings.policy.raise(ProgrammerError::VerbHandlerFailed {
                    verb: self.header.name.clone(),
                    reason: error.to_string(),
                }));
            }
        }

        if let Some(error) = child.take_failure() {
            return match error {
                Error::Programmer(error) => Err(error),
                Error::User(error) => Err(self.settings.policy.raise(
                    ProgrammerError::VerbHandlerFailed {
                        verb: self.header.name.clone(),
                        reason: error.to_string(),
                    },
                )),
            };
        }

        if !child.try_parse_invoked() {
            return Err(self
                .settings
                .policy
                .raise(ProgrammerError::TryParseNotInvoked(self.header.name.clone())));
        }

        Ok(())
    }

    /// Run the handler over the tokens following the verb name at `index`.
    /// The first `protected` of those tokens came from a response file.
    pub(crate) fn select(&self, index: usize, tokens: &[String], protected: usize) -> Result<(), Error> {
        self.execute(tokens[index + 1..].to_vec(), protected)
    }

    fn execute(&self, tokens: Vec<String>, protected: usize) -> Result<(), Error> {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Executing verb '{}' over {tokens:?}.", self.full_name);
        }

        let mut child =
            ChildArgumentParser::execution(
                self.full_name.clone(),
                self.settings.clone(),
                tokens,
                protected,
            );
        let outcome = (self.handler)(&mut child);
        let failure = child.take_failure();
        let invoked = child.try_parse_invoked();
        self.executed.replace(Some(child));

        // The child's own failure wins, even when the handler discarded it.
        if let Some(error) = failure {
            return Err(error);
        }

        outcome?;

        if !invoked {
            return Err(self
                .settings
                .policy
                .raise(ProgrammerError::TryParseNotInvoked(self.header.name.clone()))
                .into());
        }

        Ok(())
    }

    pub(crate) fn matches(&self, token: &str) -> bool {
        self.header.name == token
    }

    pub(crate) fn is_selected(&self) -> bool {
        self.executed.borrow().is_some()
    }

    pub(crate) fn with_parser<R>(&self, f: impl FnOnce(&ChildArgumentParser) -> R) -> Option<R> {
        self.executed.borrow().as_ref().map(f)
    }
}

impl Argument for VerbArgument {
    fn name(&self) -> &str {
        &self.header.name
    }

    fn description(&self) -> Option<&str> {
        self.header.description()
    }

    fn kind(&self) -> ArgumentKind {
        ArgumentKind::Verb
    }

    fn is_required(&self) -> bool {
        // The parser requires some verb to be selected, never a particular one.
        false
    }

    fn is_supplied(&self) -> bool {
        self.is_selected()
    }

    fn raw_value(&self) -> RawValue {
        if self.parsed.get() {
            RawValue::Verb {
                selected: self.is_selected(),
            }
        } else {
            RawValue::NotParsed
        }
    }
}

impl ArgumentNode for VerbArgument {
    fn as_argument(&self) -> &dyn Argument {
        self
    }

    fn try_parse_at(&self, index: usize, tokens: &[String]) -> Result<usize, Error> {
        if !self.matches(&tokens[index]) {
            return Ok(index);
        }

        self.select(index, tokens, 0)?;
        Ok(tokens.len())
    }

    fn summary(&self) -> String {
        self.header.name.clone()
    }

    fn short_usage(&self) -> String {
        self.header.name.clone()
    }

    fn long_usage(&self) -> Vec<String> {
        vec![describe(self.description())]
    }

    fn dump_into(&self, prefix: &str, lines: &mut Vec<String>) {
        let executed = self.executed.borrow();

        match executed.as_ref() {
            Some(child) => child
                .base()
                .dump_into(&format!("{prefix}{}.", self.header.name), lines),
            None => lines.push(format!("{prefix}{} = {}", self.header.name, self.raw_value())),
        }
    }
}
