use crate::error::ProgrammerError;

/// The kind of a registered argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// A named boolean flag: `--name` or `-n`.
    Switch,
    /// A named argument carrying a value: `--name=value` or `-n=value`.
    Option,
    /// A value identified by its position.
    Positional,
    /// A sub-command token which activates a nested argument scope.
    Verb,
}

impl ArgumentKind {
    pub(crate) fn is_named(&self) -> bool {
        matches!(self, ArgumentKind::Switch | ArgumentKind::Option)
    }
}

impl std::fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The structural ordering rules enforced when arguments are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingRule {
    /// Switches and options must be added before any positional.
    NamedArgumentMustPrecedePositional,
    /// Required positionals must be added before optional (or defaulted) positionals.
    RequiredPositionalMustPrecedeOptionalPositional,
    /// Nothing positional may be added after a repeated positional.
    PositionalMayNotFollowRepeatedPositional,
    /// Every non-verb argument must be added before the first verb.
    ArgumentMustPrecedeVerb,
    /// Verbs cannot share a parser with positionals that precede them.
    VerbMayNotBePrecededByPositionalArgument,
    /// Verbs cannot share a parser with required arguments that precede them.
    VerbMayNotBePrecededByRequiredArgument,
}

impl std::fmt::Display for OrderingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The type-erased value of an argument, for display and dumps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// The owning parser has not parsed yet.
    NotParsed,
    /// No value: not supplied and without a default.
    Null,
    /// The value of a switch.
    Flag(bool),
    /// A single value, rendered through its codec.
    Text(String),
    /// The values of a repeated argument, rendered through their codec.
    List(Vec<String>),
    /// The state of a verb.
    Verb {
        /// Whether the verb was selected on the command line.
        selected: bool,
    },
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::NotParsed => write!(f, "not yet parsed"),
            RawValue::Null => write!(f, "null"),
            RawValue::Flag(value) => write!(f, "{value}"),
            RawValue::Text(text) => write!(f, "{text:?}"),
            RawValue::List(texts) => write!(f, "{texts:?}"),
            RawValue::Verb { selected: true } => write!(f, "selected"),
            RawValue::Verb { selected: false } => write!(f, "not selected"),
        }
    }
}

/// What happens when a programmer error (library misuse) is detected.
///
/// Programmer errors indicate a bug in the host program rather than bad input.
/// Under `Panic` they abort immediately at the offending call.
/// Under `Report` they are handed back as `Err`, which is what test suites want.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Panic with the error message at the point of detection.
    #[default]
    Panic,
    /// Return the error to the caller.
    Report,
}

impl FailurePolicy {
    /// Apply the policy: panics under `Panic`, otherwise gives the error back for returning.
    pub(crate) fn raise(&self, error: ProgrammerError) -> ProgrammerError {
        match self {
            FailurePolicy::Panic => panic!("programmer error - {error}"),
            FailurePolicy::Report => error,
        }
    }
}
