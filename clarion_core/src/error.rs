use crate::model::OrderingRule;
use thiserror::Error;

/// Convenience alias for results carrying the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A codec could not convert the text into a value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct CodecError(pub String);

/// Misuse of the library by the host program.
///
/// These indicate a bug in the code which configures the parser, never bad user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProgrammerError {
    /// Two sibling arguments share a name.
    #[error("Cannot duplicate the argument name '{0}'.")]
    DuplicateArgumentName(String),

    /// Two sibling named arguments share a single letter name.
    #[error("Cannot duplicate the single letter name '{0}'.")]
    DuplicateSingleLetterName(char),

    /// The argument name does not have a valid syntax.
    #[error("Invalid argument name '{0}'.")]
    InvalidArgumentName(String),

    /// The single letter name does not have a valid syntax.
    #[error("Invalid single letter name '{0}'.")]
    InvalidSingleLetterName(char),

    /// The display name of an option's parameter does not have a valid syntax.
    #[error("Invalid parameter name '{0}'.")]
    InvalidParameterName(String),

    /// An argument was registered in a position which violates a structural rule.
    #[error("Argument '{violating}' violates {rule} because of '{preceding}'.")]
    InvalidArgumentOrdering {
        /// The violated rule.
        rule: OrderingRule,
        /// The argument being added.
        violating: String,
        /// The previously added argument it conflicts with.
        preceding: String,
    },

    /// A parser was asked to parse a second time.
    #[error("The command line of '{0}' has already been parsed.")]
    ParsedMoreThanOnce(String),

    /// An argument was added to a parser which has already parsed.
    #[error("Cannot add argument '{0}': the command line has already been parsed.")]
    ArgumentAddedAfterParse(String),

    /// A value was read before its parser parsed.
    #[error("Cannot read argument '{0}': the command line has not been parsed.")]
    NotYetParsed(String),

    /// A value was read from an argument which never received one (the parse failed).
    #[error("Argument '{0}' has no value.")]
    ValueUnavailable(String),

    /// A default or preset is not a value the argument's codec can write.
    #[error("The default or preset of argument '{0}' is not a value of its codec.")]
    UnencodableValue(String),

    /// A verb handler returned without calling `try_parse`.
    #[error("The handler of verb '{0}' did not invoke try_parse.")]
    TryParseNotInvoked(String),

    /// A verb handler called `try_parse` twice.
    #[error("The handler of verb '{0}' invoked try_parse more than once.")]
    TryParseInvokedMoreThanOnce(String),

    /// A verb handler failed with a user error while registering its arguments.
    #[error("The handler of verb '{verb}' failed during registration: {reason}")]
    VerbHandlerFailed {
        /// The verb.
        verb: String,
        /// The rendered failure.
        reason: String,
    },
}

/// Bad command line input.
///
/// These are caught by `try_parse` and rendered to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    /// The help switch was supplied; not a failure, only an early exit.
    #[error("Help requested for '{parser}'.")]
    HelpRequested {
        /// The full name of the parser whose help was requested.
        parser: String,
        /// The rendered help.
        lines: Vec<String>,
    },

    /// A non repeatable argument appeared twice.
    #[error("Argument '{0}' supplied more than once.")]
    SuppliedMoreThanOnce(String),

    /// An option without a preset was supplied without a value.
    #[error("Argument '{0}' must be followed by an equals sign ('=').")]
    EqualsSignExpected(String),

    /// A named argument matched but was followed by junk.
    #[error("Unexpected characters found after '{name}' : '{characters}'.")]
    UnexpectedCharacters {
        /// The argument name.
        name: String,
        /// The trailing characters.
        characters: String,
    },

    /// A required argument was never supplied.
    #[error("Required argument '{0}' was not supplied.")]
    RequiredArgumentNotSupplied(String),

    /// The parser has verbs but none was supplied.
    #[error("Expected a {0}.")]
    VerbExpected(String),

    /// The codec rejected the text supplied for an argument.
    #[error("'{text}' is not a valid value for argument '{name}'.")]
    UnparsableValue {
        /// The argument name.
        name: String,
        /// The offending text.
        text: String,
        /// What the codec objected to.
        #[source]
        cause: CodecError,
    },

    /// A token which no argument or verb claimed.
    #[error("Unexpected token: '{0}'.")]
    UnexpectedToken(String),

    /// A response file could not be read.
    #[error("Cannot read response file '{path}': {reason}")]
    ResponseFileUnreadable {
        /// The path following the `@`.
        path: String,
        /// The reader's failure.
        reason: String,
    },
}

/// Any failure of the library, split into its two categories.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Library misuse.
    #[error(transparent)]
    Programmer(#[from] ProgrammerError),

    /// Bad command line input.
    #[error(transparent)]
    User(#[from] UserError),
}

impl UserError {
    /// The message lines shown to the user: the error itself, followed by its causes.
    pub fn message_lines(&self) -> Vec<String> {
        let mut lines = vec![self.to_string()];
        let mut source = std::error::Error::source(self);

        while let Some(cause) = source {
            lines.push(format!("Because: {cause}"));
            source = std::error::Error::source(cause);
        }

        lines
    }
}
