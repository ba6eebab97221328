use crate::api::argument::Header;
use crate::api::option::OptionArgument;
use crate::api::positional::PositionalArgument;
use crate::api::slot::{SlotConfig, ValueSlot};
use crate::api::switch::SwitchArgument;
use crate::api::verb::{VerbArgument, VerbHandler};
use crate::api::{Collection, Optional, Scalar, Switch, Verb};
use crate::codec::Codec;
use crate::error::{Error, ProgrammerError};
use crate::model::ArgumentKind;
use crate::parser::{BaseArgumentParser, ChildArgumentParser, Profile};
use std::marker::PhantomData;
use std::rc::Rc;

/// Something which registers itself on a parser, producing a handle for its value.
pub trait Declaration {
    /// The handle through which the parsed value is read.
    type Handle;

    /// Register on the parser.
    fn declare(self, parser: &mut BaseArgumentParser) -> Result<Self::Handle, ProgrammerError>;
}

/// Entry point for declaring arguments, to be passed to [`ArgumentRegistry::add`](crate::prelude::ArgumentRegistry::add).
///
/// ### Example
/// ```
/// use clarion_core::prelude::*;
/// use clarion_core::*;
///
/// let mut parser = ArgumentParser::new("program");
/// let verbose = parser.add(Parameter::switch("verbose").single_letter_name('v')).unwrap();
/// let count = parser
///     .add(Parameter::option_with_default("count", IntCodec, 1).single_letter_name('c'))
///     .unwrap();
/// let file = parser.add(Parameter::required_positional("file", StringCodec)).unwrap();
///
/// assert!(parser.try_parse(&["-v", "--count=3", "notes.txt"]).unwrap());
/// assert!(verbose.value());
/// assert_eq!(count.value(), 3);
/// assert_eq!(file.value(), "notes.txt");
/// ```
pub struct Parameter;

impl Parameter {
    /// A boolean named argument, `true` when supplied.
    pub fn switch(name: impl Into<String>) -> SwitchParameter {
        SwitchParameter {
            name: name.into(),
            single_letter_name: None,
            description: None,
        }
    }

    /// An option whose value is absent when not supplied.
    pub fn option<T, C>(name: impl Into<String>, codec: C) -> OptionParameter<T, Optional<T>>
    where
        T: Clone + 'static,
        C: Codec<T> + 'static,
    {
        OptionParameter::new(name.into(), Box::new(codec), None, false, false)
    }

    /// An option which falls back to `default` when not supplied.
    pub fn option_with_default<T, C>(
        name: impl Into<String>,
        codec: C,
        default: T,
    ) -> OptionParameter<T, Scalar<T>>
    where
        T: Clone + 'static,
        C: Codec<T> + 'static,
    {
        OptionParameter::new(name.into(), Box::new(codec), Some(default), false, false)
    }

    /// An option which must be supplied.
    pub fn required_option<T, C>(name: impl Into<String>, codec: C) -> OptionParameter<T, Scalar<T>>
    where
        T: Clone + 'static,
        C: Codec<T> + 'static,
    {
        OptionParameter::new(name.into(), Box::new(codec), None, true, false)
    }

    /// An option which may be supplied any number of times, collecting every value.
    pub fn repeated_option<T, C>(
        name: impl Into<String>,
        codec: C,
    ) -> OptionParameter<T, Collection<T>>
    where
        T: Clone + 'static,
        C: Codec<T> + 'static,
    {
        OptionParameter::new(name.into(), Box::new(codec), None, false, true)
    }

    /// A positional whose value is absent when not supplied.
    pub fn positional<T, C>(name: impl Into<String>, codec: C) -> PositionalParameter<T, Optional<T>>
    where
        T: Clone + 'static,
        C: Codec<T> + 'static,
    {
        PositionalParameter::new(name.into(), Box::new(codec), None, false, false)
    }

    /// A positional which falls back to `default` when not supplied.
    pub fn positional_with_default<T, C>(
        name: impl Into<String>,
        codec: C,
        default: T,
    ) -> PositionalParameter<T, Scalar<T>>
    where
        T: Clone + 'static,
        C: Codec<T> + 'static,
    {
        PositionalParameter::new(name.into(), Box::new(codec), Some(default), false, false)
    }

    /// A positional which must be supplied.
    pub fn required_positional<T, C>(
        name: impl Into<String>,
        codec: C,
    ) -> PositionalParameter<T, Scalar<T>>
    where
        T: Clone + 'static,
        C: Codec<T> + 'static,
    {
        PositionalParameter::new(name.into(), Box::new(codec), None, true, false)
    }

    /// A positional which collects every remaining positional token.
    pub fn repeated_positional<T, C>(
        name: impl Into<String>,
        codec: C,
    ) -> PositionalParameter<T, Collection<T>>
    where
        T: Clone + 'static,
        C: Codec<T> + 'static,
    {
        PositionalParameter::new(name.into(), Box::new(codec), None, false, true)
    }

    /// A sub-command, handled by `handler`.
    ///
    /// See [`VerbHandler`] for the handler contract.
    pub fn verb<F>(name: impl Into<String>, description: impl Into<String>, handler: F) -> VerbParameter
    where
        F: Fn(&mut ChildArgumentParser) -> Result<(), Error> + 'static,
    {
        VerbParameter {
            name: name.into(),
            description: Some(description.into()).filter(|d: &String| !d.is_empty()),
            handler: Box::new(handler),
        }
    }
}

/// The declaration of a switch.
pub struct SwitchParameter {
    name: String,
    single_letter_name: Option<char>,
    description: Option<String>,
}

impl SwitchParameter {
    /// Also match `-<letter>`.
    pub fn single_letter_name(mut self, letter: char) -> Self {
        self.single_letter_name = Some(letter);
        self
    }

    /// Document the switch in help.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Declaration for SwitchParameter {
    type Handle = Switch;

    fn declare(self, parser: &mut BaseArgumentParser) -> Result<Switch, ProgrammerError> {
        parser.admit(&Profile {
            kind: ArgumentKind::Switch,
            name: &self.name,
            single_letter_name: self.single_letter_name,
            parameter_name: None,
            required: false,
        })?;
        let argument = Rc::new(SwitchArgument::new(
            Header::new(self.name, self.description),
            self.single_letter_name,
            parser.parse_flag(),
            parser.policy(),
        ));
        parser.push(argument.clone());
        Ok(Switch { argument })
    }
}

/// The declaration of an option; `H` is the handle it produces.
pub struct OptionParameter<T, H> {
    name: String,
    codec: Box<dyn Codec<T>>,
    single_letter_name: Option<char>,
    description: Option<String>,
    parameter_name: Option<String>,
    preset: Option<T>,
    default: Option<T>,
    required: bool,
    repeated: bool,
    _handle: PhantomData<fn() -> H>,
}

impl<T: Clone + 'static, H> OptionParameter<T, H> {
    fn new(
        name: String,
        codec: Box<dyn Codec<T>>,
        default: Option<T>,
        required: bool,
        repeated: bool,
    ) -> Self {
        Self {
            name,
            codec,
            single_letter_name: None,
            description: None,
            parameter_name: None,
            preset: None,
            default,
            required,
            repeated,
            _handle: PhantomData,
        }
    }

    /// Also match `-<letter>`.
    pub fn single_letter_name(mut self, letter: char) -> Self {
        self.single_letter_name = Some(letter);
        self
    }

    /// Document the option in help.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The name of the value shown in help, ex: `--output=<file>`; defaults to the codec name.
    pub fn parameter_name(mut self, parameter_name: impl Into<String>) -> Self {
        self.parameter_name = Some(parameter_name.into());
        self
    }

    /// The value taken when the option is supplied without `=value`.
    pub fn preset(mut self, preset: T) -> Self {
        self.preset = Some(preset);
        self
    }

    fn build(self, parser: &mut BaseArgumentParser) -> Result<Rc<OptionArgument<T>>, ProgrammerError> {
        parser.admit(&Profile {
            kind: ArgumentKind::Option,
            name: &self.name,
            single_letter_name: self.single_letter_name,
            parameter_name: self.parameter_name.as_deref(),
            required: self.required,
        })?;
        let encodable = self
            .default
            .iter()
            .chain(self.preset.iter())
            .all(|value| self.codec.can_encode(value));

        if !encodable {
            return Err(parser
                .policy()
                .raise(ProgrammerError::UnencodableValue(self.name)));
        }

        let slot = ValueSlot::new(
            self.name.clone(),
            self.codec,
            SlotConfig {
                default: self.default,
                preset: self.preset,
                repeated: self.repeated,
            },
            parser.parse_flag(),
            parser.policy(),
        );
        let argument = Rc::new(OptionArgument::new(
            Header::new(self.name, self.description),
            self.single_letter_name,
            self.parameter_name,
            self.required,
            slot,
        ));
        parser.push(argument.clone());
        Ok(argument)
    }
}

impl<T: Clone + 'static> Declaration for OptionParameter<T, Optional<T>> {
    type Handle = Optional<T>;

    fn declare(self, parser: &mut BaseArgumentParser) -> Result<Optional<T>, ProgrammerError> {
        let argument = self.build(parser)?;
        Ok(Optional { argument })
    }
}

impl<T: Clone + 'static> Declaration for OptionParameter<T, Scalar<T>> {
    type Handle = Scalar<T>;

    fn declare(self, parser: &mut BaseArgumentParser) -> Result<Scalar<T>, ProgrammerError> {
        let argument = self.build(parser)?;
        Ok(Scalar { argument })
    }
}

impl<T: Clone + 'static> Declaration for OptionParameter<T, Collection<T>> {
    type Handle = Collection<T>;

    fn declare(self, parser: &mut BaseArgumentParser) -> Result<Collection<T>, ProgrammerError> {
        let argument = self.build(parser)?;
        Ok(Collection { argument })
    }
}

/// The declaration of a positional; `H` is the handle it produces.
pub struct PositionalParameter<T, H> {
    name: String,
    codec: Box<dyn Codec<T>>,
    description: Option<String>,
    default: Option<T>,
    required: bool,
    repeated: bool,
    _handle: PhantomData<fn() -> H>,
}

impl<T: Clone + 'static, H> PositionalParameter<T, H> {
    fn new(
        name: String,
        codec: Box<dyn Codec<T>>,
        default: Option<T>,
        required: bool,
        repeated: bool,
    ) -> Self {
        Self {
            name,
            codec,
            description: None,
            default,
            required,
            repeated,
            _handle: PhantomData,
        }
    }

    /// Document the positional in help.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn build(
        self,
        parser: &mut BaseArgumentParser,
    ) -> Result<Rc<PositionalArgument<T>>, ProgrammerError> {
        parser.admit(&Profile {
            kind: ArgumentKind::Positional,
            name: &self.name,
            single_letter_name: None,
            parameter_name: None,
            required: self.required,
        })?;

        if let Some(default) = &self.default {
            if !self.codec.can_encode(default) {
                return Err(parser
                    .policy()
                    .raise(ProgrammerError::UnencodableValue(self.name)));
            }
        }

        let slot = ValueSlot::new(
            self.name.clone(),
            self.codec,
            SlotConfig {
                default: self.default,
                preset: None,
                repeated: self.repeated,
            },
            parser.parse_flag(),
            parser.policy(),
        );
        let argument = Rc::new(PositionalArgument::new(
            Header::new(self.name, self.description),
            self.required,
            slot,
        ));
        parser.push(argument.clone());
        Ok(argument)
    }
}

impl<T: Clone + 'static> Declaration for PositionalParameter<T, Optional<T>> {
    type Handle = Optional<T>;

    fn declare(self, parser: &mut BaseArgumentParser) -> Result<Optional<T>, ProgrammerError> {
        let argument = self.build(parser)?;
        Ok(Optional { argument })
    }
}

impl<T: Clone + 'static> Declaration for PositionalParameter<T, Scalar<T>> {
    type Handle = Scalar<T>;

    fn declare(self, parser: &mut BaseArgumentParser) -> Result<Scalar<T>, ProgrammerError> {
        let argument = self.build(parser)?;
        Ok(Scalar { argument })
    }
}

impl<T: Clone + 'static> Declaration for PositionalParameter<T, Collection<T>> {
    type Handle = Collection<T>;

    fn declare(self, parser: &mut BaseArgumentParser) -> Result<Collection<T>, ProgrammerError> {
        let argument = self.build(parser)?;
        Ok(Collection { argument })
    }
}

/// The declaration of a verb.
pub struct VerbParameter {
    name: String,
    description: Option<String>,
    handler: Box<VerbHandler>,
}

impl Declaration for VerbParameter {
    type Handle = Verb;

    fn declare(self, parser: &mut BaseArgumentParser) -> Result<Verb, ProgrammerError> {
        parser.admit(&Profile {
            kind: ArgumentKind::Verb,
            name: &self.name,
            single_letter_name: None,
            parameter_name: None,
            required: false,
        })?;
        let argument = Rc::new(VerbArgument::new(
            Header::new(self.name, self.description),
            parser.name(),
            self.handler,
            parser.settings().clone(),
            parser.parse_flag(),
        ));

        if parser.settings().validate_verbs {
            argument.initialize()?;
        }

        parser.push_verb(argument.clone());
        Ok(Verb { argument })
    }
}
