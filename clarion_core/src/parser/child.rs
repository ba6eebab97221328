use crate::error::{Error, ProgrammerError};
use crate::parser::{BaseArgumentParser, Settings};
use crate::prelude::ArgumentRegistry;
use std::rc::Rc;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

enum Mode {
    // Validates the handler's registrations; nothing is consumed.
    Initialization,
    // The first `protected` tokens came from a response file.
    Execution { tokens: Vec<String>, protected: usize },
}

/// The parser handed to a verb handler.
///
/// The handler registers the verb's arguments on it, and then calls [`ChildArgumentParser::try_parse`] exactly once.
pub struct ChildArgumentParser {
    base: BaseArgumentParser,
    mode: Mode,
    invocations: usize,
    failure: Option<Error>,
}

impl ChildArgumentParser {
    pub(crate) fn initialization(name: String, settings: Rc<Settings>) -> Self {
        Self {
            base: BaseArgumentParser::new(name, settings),
            mode: Mode::Initialization,
            invocations: 0,
            failure: None,
        }
    }

    pub(crate) fn execution(
        name: String,
        settings: Rc<Settings>,
        tokens: Vec<String>,
        protected: usize,
    ) -> Self {
        Self {
            base: BaseArgumentParser::new(name, settings),
            mode: Mode::Execution { tokens, protected },
            invocations: 0,
            failure: None,
        }
    }

    /// A child in execution mode over `tokens`, for testing a verb handler in isolation.
    /// Programmer errors are reported rather than panicking.
    #[cfg(feature = "unit_test")]
    pub fn test_dummy(tokens: &[&str]) -> Self {
        use crate::model::FailurePolicy;
        use crate::parser::interface::{ConsoleInterface, FsFileReader};

        let settings = Settings {
            verb_term: crate::constant::DEFAULT_VERB_TERM.to_string(),
            screen_width: crate::constant::DEFAULT_SCREEN_WIDTH,
            interface: Box::new(ConsoleInterface::default()),
            file_reader: Box::new(FsFileReader::default()),
            policy: FailurePolicy::Report,
            validate_verbs: true,
        };
        Self::execution(
            "test-dummy".to_string(),
            Rc::new(settings),
            tokens.iter().map(|t| t.to_string()).collect(),
            0,
        )
    }

    /// Commit the registrations and parse the verb's tokens.
    ///
    /// Returns `Ok(true)` once the tokens parsed, and `Ok(false)` while the verb is only being validated, in which
    /// case the handler must not act on any value.
    /// The first error is retained by the child, so it propagates even if the handler discards it.
    pub fn try_parse(&mut self) -> Result<bool, Error> {
        self.invocations += 1;

        if self.invocations > 1 {
            let error: Error = self
                .base
                .policy()
                .raise(ProgrammerError::TryParseInvokedMoreThanOnce(
                    self.base.name().to_string(),
                ))
                .into();
            return Err(self.record(error));
        }

        let (mut tokens, protected) = match &mut self.mode {
            Mode::Initialization => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Validated verb '{}'.", self.base.name());
                }

                return Ok(false);
            }
            Mode::Execution { tokens, protected } => (std::mem::take(tokens), *protected),
        };

        match self.base.parse_tokens(&mut tokens, protected) {
            Ok(()) => Ok(true),
            Err(error) => Err(self.record(error)),
        }
    }

    fn record(&mut self, error: Error) -> Error {
        if self.failure.is_none() {
            self.failure = Some(error.clone());
        }

        error
    }

    pub(crate) fn try_parse_invoked(&self) -> bool {
        self.invocations > 0
    }

    pub(crate) fn take_failure(&mut self) -> Option<Error> {
        self.failure.take()
    }
}

impl ArgumentRegistry for ChildArgumentParser {
    fn base(&self) -> &BaseArgumentParser {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseArgumentParser {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UserError;
    use crate::model::FailurePolicy;
    use crate::parser::interface::util::{InMemoryFiles, InMemoryInterface};
    use crate::{Parameter, StringCodec, SwitchParameter};
    use rstest::rstest;

    fn settings() -> Rc<Settings> {
        Rc::new(Settings {
            verb_term: "verb".to_string(),
            screen_width: 80,
            interface: Box::new(InMemoryInterface::default()),
            file_reader: Box::new(InMemoryFiles::default()),
            policy: FailurePolicy::Report,
            validate_verbs: true,
        })
    }

    #[test]
    fn initialization() {
        // Setup
        let mut child = ChildArgumentParser::initialization("program verb".to_string(), settings());
        let lima = child.add_switch("lima").unwrap();

        // Execute
        let result = child.try_parse();

        // Verify
        assert_eq!(result, Ok(false));
        assert!(child.try_parse_invoked());
        assert!(!child.base().has_been_parsed());
        assert_matches!(lima.try_value(), Err(ProgrammerError::NotYetParsed(_)));
    }

    #[test]
    fn execution() {
        // Setup
        let mut child = ChildArgumentParser::execution(
            "program verb".to_string(),
            settings(),
            vec!["--lima".to_string()],
            0,
        );
        let lima = child.add_switch("lima").unwrap();

        // Execute
        let result = child.try_parse();

        // Verify
        assert_eq!(result, Ok(true));
        assert!(child.base().has_been_parsed());
        assert!(lima.value());
        assert_eq!(child.take_failure(), None);
    }

    #[test]
    fn execution_protected_tokens() {
        // Setup
        let mut child = ChildArgumentParser::execution(
            "program verb".to_string(),
            settings(),
            vec!["@resp.txt".to_string()],
            1,
        );
        let india = child.add_positional("india", StringCodec).unwrap();

        // Execute
        let result = child.try_parse();

        // Verify
        assert_eq!(result, Ok(true));
        assert_eq!(india.value(), Some("@resp.txt".to_string()));
    }

    #[rstest]
    #[case(Parameter::switch("help"), ProgrammerError::DuplicateArgumentName("help".to_string()))]
    #[case(
        Parameter::switch("question").single_letter_name('?'),
        ProgrammerError::DuplicateSingleLetterName('?')
    )]
    fn help_reserved(#[case] parameter: SwitchParameter, #[case] expected: ProgrammerError) {
        // Setup
        let mut child = ChildArgumentParser::initialization("program verb".to_string(), settings());

        // Execute
        let result = child.add(parameter);

        // Verify
        assert_eq!(result.err(), Some(expected));
    }

    #[test]
    fn execution_failure_recorded() {
        // Setup
        let mut child = ChildArgumentParser::execution(
            "program verb".to_string(),
            settings(),
            vec!["--mike".to_string()],
            0,
        );
        child.add_switch("lima").unwrap();

        // Execute
        let result = child.try_parse();

        // Verify
        let expected: Error = UserError::UnexpectedToken("--mike".to_string()).into();
        assert_eq!(result, Err(expected.clone()));
        assert_eq!(child.take_failure(), Some(expected));
        assert_eq!(child.take_failure(), None);
    }

    #[test]
    fn try_parse_twice() {
        // Setup
        let mut child = ChildArgumentParser::initialization("program verb".to_string(), settings());
        child.try_parse().unwrap();

        // Execute
        let result = child.try_parse();

        // Verify
        assert_matches!(
            result,
            Err(Error::Programmer(ProgrammerError::TryParseInvokedMoreThanOnce(name))) if name == "program verb"
        );
        assert_matches!(
            child.take_failure(),
            Some(Error::Programmer(ProgrammerError::TryParseInvokedMoreThanOnce(_)))
        );
    }

    #[test]
    fn not_invoked() {
        let child = ChildArgumentParser::initialization("program verb".to_string(), settings());
        assert!(!child.try_parse_invoked());
    }
}
