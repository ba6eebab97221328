use crate::api::{
    Argument, ArgumentNode, Declaration, ParseFlag, Parameter, Switch, VerbArgument,
};
use crate::constant::*;
use crate::error::{Error, ProgrammerError, UserError};
use crate::matcher::*;
use crate::model::{ArgumentKind, FailurePolicy, OrderingRule};
use crate::parser::printer::Printer;
use crate::parser::Settings;
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// What the parser needs to know to admit an argument.
pub(crate) struct Profile<'a> {
    pub(crate) kind: ArgumentKind,
    pub(crate) name: &'a str,
    pub(crate) single_letter_name: Option<char>,
    pub(crate) parameter_name: Option<&'a str>,
    pub(crate) required: bool,
}

/// The registration and parsing machinery shared by the root parser and verb parsers.
pub struct BaseArgumentParser {
    name: String,
    settings: Rc<Settings>,
    arguments: Vec<Rc<dyn ArgumentNode>>,
    verbs: Vec<Rc<VerbArgument>>,
    parsed: ParseFlag,
    help: Option<Switch>,
    declaring_help: bool,
}

impl BaseArgumentParser {
    pub(crate) fn new(name: String, settings: Rc<Settings>) -> Self {
        Self {
            name,
            settings,
            arguments: Vec::default(),
            verbs: Vec::default(),
            parsed: Rc::new(Cell::new(false)),
            help: None,
            declaring_help: false,
        }
    }

    /// The full name: the program name followed by the names of the enclosing verbs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether parsing has started.
    pub fn has_been_parsed(&self) -> bool {
        self.parsed.get()
    }

    /// The registered arguments, in registration order.
    pub fn arguments(&self) -> Vec<&dyn Argument> {
        self.arguments.iter().map(|a| a.as_argument()).collect()
    }

    /// One `name = value` line per argument, descending into the selected verb as `verb.name = value`.
    pub fn dump(&self) -> Vec<String> {
        let mut lines = Vec::default();
        self.dump_into("", &mut lines);
        lines
    }

    /// The help text of this parser.
    pub fn help_lines(&self) -> Vec<String> {
        Printer::new(
            &self.name,
            &self.arguments,
            &self.settings.verb_term,
            self.settings.screen_width,
        )
        .render()
    }

    pub(crate) fn dump_into(&self, prefix: &str, lines: &mut Vec<String>) {
        for argument in &self.arguments {
            argument.dump_into(prefix, lines);
        }
    }

    pub(crate) fn settings(&self) -> &Rc<Settings> {
        &self.settings
    }

    pub(crate) fn policy(&self) -> FailurePolicy {
        self.settings.policy
    }

    pub(crate) fn parse_flag(&self) -> ParseFlag {
        self.parsed.clone()
    }

    /// Check the argument may join this parser.
    pub(crate) fn admit(&mut self, profile: &Profile) -> Result<(), ProgrammerError> {
        self.validate(profile)
            .map_err(|error| self.settings.policy.raise(error))?;

        if !profile.kind.is_named() {
            self.ensure_help()?;
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Admitting {} '{}' to '{}'.",
                profile.kind, profile.name, self.name
            );
        }

        Ok(())
    }

    fn validate(&self, profile: &Profile) -> Result<(), ProgrammerError> {
        let name = profile.name;

        if self.parsed.get() {
            return Err(ProgrammerError::ArgumentAddedAfterParse(name.to_string()));
        }

        let valid_name = match profile.kind {
            ArgumentKind::Switch | ArgumentKind::Option => is_valid_named_argument_name(name),
            ArgumentKind::Positional => is_valid_positional_name(name),
            ArgumentKind::Verb => is_valid_verb_name(name),
        };

        if !valid_name {
            return Err(ProgrammerError::InvalidArgumentName(name.to_string()));
        }

        if let Some(letter) = profile.single_letter_name {
            if !is_valid_single_letter_name(letter) {
                return Err(ProgrammerError::InvalidSingleLetterName(letter));
            }
        }

        if let Some(parameter_name) = profile.parameter_name {
            if !is_valid_parameter_name(parameter_name) {
                return Err(ProgrammerError::InvalidParameterName(
                    parameter_name.to_string(),
                ));
            }
        }

        if self.arguments.iter().any(|a| a.name() == name) {
            return Err(ProgrammerError::DuplicateArgumentName(name.to_string()));
        }

        if let Some(letter) = profile.single_letter_name {
            if self
                .arguments
                .iter()
                .any(|a| a.single_letter_name() == Some(letter))
            {
                return Err(ProgrammerError::DuplicateSingleLetterName(letter));
            }
        }

        // The help switch is implicit, so its names are taken even before it is added.
        if !self.declaring_help {
            if name == HELP_NAME {
                return Err(ProgrammerError::DuplicateArgumentName(name.to_string()));
            }

            if profile.single_letter_name == Some(HELP_SINGLE_LETTER) {
                return Err(ProgrammerError::DuplicateSingleLetterName(HELP_SINGLE_LETTER));
            }
        }

        let violation = |rule: OrderingRule, preceding: &Rc<dyn ArgumentNode>| {
            ProgrammerError::InvalidArgumentOrdering {
                rule,
                violating: name.to_string(),
                preceding: preceding.name().to_string(),
            }
        };

        match profile.kind {
            ArgumentKind::Switch | ArgumentKind::Option => {
                if let Some(verb) = self.first(|a| a.kind() == ArgumentKind::Verb) {
                    return Err(violation(OrderingRule::ArgumentMustPrecedeVerb, verb));
                }

                if let Some(positional) = self.first(|a| a.kind() == ArgumentKind::Positional) {
                    return Err(violation(
                        OrderingRule::NamedArgumentMustPrecedePositional,
                        positional,
                    ));
                }
            }
            ArgumentKind::Positional => {
                if let Some(verb) = self.first(|a| a.kind() == ArgumentKind::Verb) {
                    return Err(violation(OrderingRule::ArgumentMustPrecedeVerb, verb));
                }

                if let Some(repeated) =
                    self.first(|a| a.kind() == ArgumentKind::Positional && a.is_repeated())
                {
                    return Err(violation(
                        OrderingRule::PositionalMayNotFollowRepeatedPositional,
                        repeated,
                    ));
                }

                if profile.required {
                    if let Some(optional) =
                        self.first(|a| a.kind() == ArgumentKind::Positional && !a.is_required())
                    {
                        return Err(violation(
                            OrderingRule::RequiredPositionalMustPrecedeOptionalPositional,
                            optional,
                        ));
                    }
                }
            }
            ArgumentKind::Verb => {
                if let Some(positional) = self.first(|a| a.kind() == ArgumentKind::Positional) {
                    return Err(violation(
                        OrderingRule::VerbMayNotBePrecededByPositionalArgument,
                        positional,
                    ));
                }

                if let Some(required) = self.first(|a| a.is_required()) {
                    return Err(violation(
                        OrderingRule::VerbMayNotBePrecededByRequiredArgument,
                        required,
                    ));
                }
            }
        }

        Ok(())
    }

    fn first(&self, predicate: impl Fn(&Rc<dyn ArgumentNode>) -> bool) -> Option<&Rc<dyn ArgumentNode>> {
        self.arguments.iter().find(|a| predicate(a))
    }

    pub(crate) fn push(&mut self, argument: Rc<dyn ArgumentNode>) {
        self.arguments.push(argument);
    }

    pub(crate) fn push_verb(&mut self, verb: Rc<VerbArgument>) {
        self.verbs.push(verb.clone());
        self.arguments.push(verb);
    }

    // The help switch goes after the named arguments, before the first positional or verb.
    fn ensure_help(&mut self) -> Result<(), ProgrammerError> {
        if self.help.is_none() {
            self.declaring_help = true;
            let help = Parameter::switch(HELP_NAME)
                .single_letter_name(HELP_SINGLE_LETTER)
                .description(HELP_MESSAGE)
                .declare(self);
            self.declaring_help = false;
            self.help = Some(help?);
        }

        Ok(())
    }

    /// Run the token consumption algorithm over `tokens`.
    /// Bundles and response files are expanded in place.
    /// The first `protected` tokens came from a response file, so are never expanded as response files again.
    pub(crate) fn parse_tokens(
        &mut self,
        tokens: &mut Vec<String>,
        protected: usize,
    ) -> Result<(), Error> {
        if self.parsed.get() {
            return Err(self
                .settings
                .policy
                .raise(ProgrammerError::ParsedMoreThanOnce(self.name.clone()))
                .into());
        }

        self.ensure_help()?;
        self.parsed.set(true);

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Parsing '{}' over {tokens:?}.", self.name);
        }

        let mut index = 0;
        let mut end_of_options = false;
        // Tokens before this index were spliced in from a response file.
        let mut expanded_until = protected;
        let mut selected: Option<Rc<VerbArgument>> = None;

        while index < tokens.len() {
            let token = tokens[index].clone();

            if !end_of_options {
                if token == END_OF_OPTIONS {
                    end_of_options = true;
                    index += 1;
                    continue;
                }

                if index >= expanded_until {
                    if let Some(path) = token.strip_prefix(RESPONSE_FILE_PREFIX) {
                        let lines = self.read_response_file(path)?;
                        expanded_until = index + lines.len();
                        tokens.splice(index..index + 1, lines);
                        continue;
                    }
                }

                if is_single_letter_bundle(&token) {
                    let split = split_single_letter_bundle(&token);

                    if index < expanded_until {
                        expanded_until += split.len() - 1;
                    }

                    tokens.splice(index..index + 1, split);
                    continue;
                }

                if token.starts_with('-') {
                    if let Some(next) = self.parse_by(index, tokens, |a| a.kind().is_named())? {
                        index = next;
                        continue;
                    }
                }
            }

            if let Some(next) =
                self.parse_by(index, tokens, |a| a.kind() == ArgumentKind::Positional)?
            {
                index = next;
                continue;
            }

            if !end_of_options {
                if let Some(verb) = self.verbs.iter().find(|v| v.matches(&token)) {
                    selected = Some(verb.clone());
                    break;
                }
            }

            return Err(UserError::UnexpectedToken(token).into());
        }

        if self.help.as_ref().map_or(false, |h| h.argument.is_supplied()) {
            return Err(UserError::HelpRequested {
                parser: self.name.clone(),
                lines: self.help_lines(),
            }
            .into());
        }

        if let Some(missing) = self
            .arguments
            .iter()
            .find(|a| a.is_required() && !a.is_supplied())
        {
            return Err(UserError::RequiredArgumentNotSupplied(missing.name().to_string()).into());
        }

        if !self.verbs.is_empty() {
            match selected {
                Some(verb) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Selected verb '{}' of '{}'.", verb.name(), self.name);
                    }

                    verb.select(index, tokens, expanded_until.saturating_sub(index + 1))?;
                }
                None => {
                    return Err(UserError::VerbExpected(self.settings.verb_term.clone()).into());
                }
            }
        }

        Ok(())
    }

    fn parse_by(
        &self,
        index: usize,
        tokens: &[String],
        predicate: impl Fn(&Rc<dyn ArgumentNode>) -> bool,
    ) -> Result<Option<usize>, Error> {
        for argument in self.arguments.iter().filter(|a| predicate(a)) {
            let next = argument.try_parse_at(index, tokens)?;

            if next != index {
                return Ok(Some(next));
            }
        }

        Ok(None)
    }

    fn read_response_file(&self, path: &str) -> Result<Vec<String>, Error> {
        let text = self
            .settings
            .file_reader
            .read(Path::new(path))
            .map_err(|error| UserError::ResponseFileUnreadable {
                path: path.to_string(),
                reason: error.to_string(),
            })?;
        let named: Vec<&str> = self
            .arguments
            .iter()
            .filter(|a| a.kind().is_named())
            .map(|a| a.name())
            .collect();
        let lines = response_file_tokens(&text, &named);

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Expanded response file '{path}' into {lines:?}.");
        }

        Ok(lines)
    }
}
