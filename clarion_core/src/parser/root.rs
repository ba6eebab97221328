use crate::constant::*;
use crate::error::{Error, ProgrammerError, UserError};
use crate::model::FailurePolicy;
use crate::parser::interface::{ConsoleInterface, FileReader, FsFileReader, UserInterface};
use crate::parser::BaseArgumentParser;
use crate::prelude::ArgumentRegistry;
use std::env;
use std::rc::Rc;
use terminal_size::{terminal_size, Width};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The configuration shared by a root parser and every child parser beneath it.
pub(crate) struct Settings {
    pub(crate) verb_term: String,
    pub(crate) screen_width: usize,
    pub(crate) interface: Box<dyn UserInterface>,
    pub(crate) file_reader: Box<dyn FileReader>,
    pub(crate) policy: FailurePolicy,
    pub(crate) validate_verbs: bool,
}

/// The root command line parser.
///
/// ### Example
/// ```
/// use clarion_core::prelude::*;
/// use clarion_core::*;
///
/// let mut parser = ArgumentParser::new("greeter");
/// let name = parser.add_positional_with_default("name", StringCodec, "world".to_string()).unwrap();
///
/// assert!(parser.try_parse(&["Alice"]).unwrap());
/// assert_eq!(name.value(), "Alice");
/// ```
pub struct ArgumentParser {
    base: BaseArgumentParser,
}

impl ArgumentParser {
    /// A parser with the default settings.
    pub fn new(program: impl Into<String>) -> Self {
        Self::builder(program).build()
    }

    /// Configure the parser before building it.
    pub fn builder(program: impl Into<String>) -> ArgumentParserBuilder {
        ArgumentParserBuilder {
            program: program.into(),
            verb_term: DEFAULT_VERB_TERM.to_string(),
            screen_width: None,
            interface: None,
            file_reader: None,
            policy: FailurePolicy::default(),
            validate_verbs: cfg!(debug_assertions),
        }
    }

    /// The word used for verbs in help and errors (ex: `command`).
    pub fn verb_term(&self) -> &str {
        &self.base.settings().verb_term
    }

    /// Parse the tokens, reporting to the user interface.
    ///
    /// Returns `Ok(true)` when the program should proceed.
    /// Returns `Ok(false)` when it should exit instead: either help was displayed, or the tokens were
    /// rejected and the problem printed.
    /// Programmer errors are returned (or panic, per the [`FailurePolicy`]).
    pub fn try_parse(&mut self, tokens: &[&str]) -> Result<bool, ProgrammerError> {
        match self.parse(tokens) {
            Ok(()) => Ok(true),
            Err(Error::Programmer(error)) => Err(error),
            Err(Error::User(UserError::HelpRequested { lines, .. })) => {
                let interface = &self.base.settings().interface;

                for line in lines {
                    interface.print(line);
                }

                Ok(false)
            }
            Err(Error::User(error)) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Parse of '{}' failed: {error:?}.", self.base.name());
                }

                let interface = &self.base.settings().interface;

                for line in error.message_lines() {
                    interface.print_error(line);
                }

                interface.print_error(format!(
                    "Try '{} --{HELP_NAME}' for more information.",
                    self.base.name()
                ));
                Ok(false)
            }
        }
    }

    /// Parse the tokens, returning every failure (including the help request) without printing anything.
    pub fn parse(&mut self, tokens: &[&str]) -> Result<(), Error> {
        let mut tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        self.base.parse_tokens(&mut tokens, 0)
    }

    /// [`ArgumentParser::try_parse`] over the process arguments.
    pub fn try_parse_env(&mut self) -> Result<bool, ProgrammerError> {
        let tokens: Vec<String> = env::args().skip(1).collect();
        self.try_parse(
            tokens
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        )
    }
}

impl ArgumentRegistry for ArgumentParser {
    fn base(&self) -> &BaseArgumentParser {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseArgumentParser {
        &mut self.base
    }
}

/// Configures an [`ArgumentParser`].
pub struct ArgumentParserBuilder {
    program: String,
    verb_term: String,
    screen_width: Option<usize>,
    interface: Option<Box<dyn UserInterface>>,
    file_reader: Option<Box<dyn FileReader>>,
    policy: FailurePolicy,
    validate_verbs: bool,
}

impl ArgumentParserBuilder {
    /// The word used for verbs in help and errors; defaults to `verb`.
    pub fn verb_term(mut self, verb_term: impl Into<String>) -> Self {
        self.verb_term = verb_term.into();
        self
    }

    /// The width help is wrapped to; defaults to the terminal width.
    pub fn screen_width(mut self, screen_width: usize) -> Self {
        self.screen_width = Some(screen_width);
        self
    }

    /// Where help and errors are printed; defaults to standard error.
    pub fn interface(mut self, interface: impl UserInterface + 'static) -> Self {
        self.interface = Some(Box::new(interface));
        self
    }

    /// How response files are read; defaults to the file system.
    pub fn file_reader(mut self, file_reader: impl FileReader + 'static) -> Self {
        self.file_reader = Some(Box::new(file_reader));
        self
    }

    /// What to do on programmer errors; defaults to [`FailurePolicy::Panic`].
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Whether verb handlers are validated when the verb is added; defaults to on in debug builds.
    pub fn validate_verbs(mut self, validate_verbs: bool) -> Self {
        self.validate_verbs = validate_verbs;
        self
    }

    /// Build the parser.
    pub fn build(self) -> ArgumentParser {
        let screen_width = self.screen_width.unwrap_or_else(terminal_width);
        let settings = Settings {
            verb_term: self.verb_term,
            screen_width,
            interface: self
                .interface
                .unwrap_or_else(|| Box::new(ConsoleInterface::default())),
            file_reader: self
                .file_reader
                .unwrap_or_else(|| Box::new(FsFileReader::default())),
            policy: self.policy,
            validate_verbs: self.validate_verbs,
        };

        ArgumentParser {
            base: BaseArgumentParser::new(self.program, Rc::new(settings)),
        }
    }
}

fn terminal_width() -> usize {
    if let Some((Width(width), _)) = terminal_size() {
        width as usize
    } else {
        DEFAULT_SCREEN_WIDTH
    }
}
