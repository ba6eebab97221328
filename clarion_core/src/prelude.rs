//! Traits which, typically, may be imported without concern: `use clarion_core::prelude::*`.
use crate::api::{Collection, Declaration, Optional, Parameter, Scalar, Switch, Verb};
use crate::codec::Codec;
use crate::error::{Error, ProgrammerError};
use crate::parser::{BaseArgumentParser, ChildArgumentParser};

/// Registration of arguments, shared by the root parser and the verb parsers.
///
/// Every method fails with a [`ProgrammerError`] when the registration breaks a naming, uniqueness or ordering
/// rule (or panics, per the parser's [`FailurePolicy`](crate::FailurePolicy)).
pub trait ArgumentRegistry {
    /// The underlying parser.
    fn base(&self) -> &BaseArgumentParser;

    /// The underlying parser, mutably.
    fn base_mut(&mut self) -> &mut BaseArgumentParser;

    /// Register a declaration built from [`Parameter`].
    fn add<D: Declaration>(&mut self, declaration: D) -> Result<D::Handle, ProgrammerError> {
        declaration.declare(self.base_mut())
    }

    /// Register a switch.
    fn add_switch(&mut self, name: &str) -> Result<Switch, ProgrammerError> {
        self.add(Parameter::switch(name))
    }

    /// Register an option without default.
    fn add_option<T, C>(&mut self, name: &str, codec: C) -> Result<Optional<T>, ProgrammerError>
    where
        T: Clone + 'static,
        C: Codec<T> + 'static,
    {
        self.add(Parameter::option(name, codec))
    }

    /// Register an option with a default.
    fn add_option_with_default<T, C>(
        &mut self,
        name: &str,
        codec: C,
        default: T,
    ) -> Result<Scalar<T>, ProgrammerError>
    where
        T: Clone + 'static,
        C: Codec<T> + 'static,
    {
        self.add(Parameter::option_with_default(name, codec, default))
    }

    /// Register an option which must be supplied.
    fn add_required_option<T, C>(&mut self, name: &str, codec: C) -> Result<Scalar<T>, ProgrammerError>
    where
        T: Clone + 'static,
        C: Codec<T> + 'static,
    {
        self.add(Parameter::required_option(name, codec))
    }

    /// Register an option which may be supplied many times.
    fn add_repeated_option<T, C>(
        &mut self,
        name: &str,
        codec: C,
    ) -> Result<Collection<T>, ProgrammerError>
    where
        T: Clone + 'static,
        C: Codec<T> + 'static,
    {
        self.add(Parameter::repeated_option(name, codec))
    }

    /// Register a positional without default.
    fn add_positional<T, C>(&mut self, name: &str, codec: C) -> Result<Optional<T>, ProgrammerError>
    where
        T: Clone + 'static,
        C: Codec<T> + 'static,
    {
        self.add(Parameter::positional(name, codec))
    }

    /// Register a positional with a default.
    fn add_positional_with_default<T, C>(
        &mut self,
        name: &str,
        codec: C,
        default: T,
    ) -> Result<Scalar<T>, ProgrammerError>
    where
        T: Clone + 'static,
        C: Codec<T> + 'static,
    {
        self.add(Parameter::positional_with_default(name, codec, default))
    }

    /// Register a positional which must be supplied.
    fn add_required_positional<T, C>(
        &mut self,
        name: &str,
        codec: C,
    ) -> Result<Scalar<T>, ProgrammerError>
    where
        T: Clone + 'static,
        C: Codec<T> + 'static,
    {
        self.add(Parameter::required_positional(name, codec))
    }

    /// Register a positional which collects the remaining positional tokens.
    fn add_repeated_positional<T, C>(
        &mut self,
        name: &str,
        codec: C,
    ) -> Result<Collection<T>, ProgrammerError>
    where
        T: Clone + 'static,
        C: Codec<T> + 'static,
    {
        self.add(Parameter::repeated_positional(name, codec))
    }

    /// Register a verb.
    fn add_verb<F>(&mut self, name: &str, description: &str, handler: F) -> Result<Verb, ProgrammerError>
    where
        F: Fn(&mut ChildArgumentParser) -> Result<(), Error> + 'static,
    {
        self.add(Parameter::verb(name, description, handler))
    }

    /// The full name of the parser.
    fn name(&self) -> &str {
        self.base().name()
    }

    /// One `name = value` line per argument.
    fn dump(&self) -> Vec<String> {
        self.base().dump()
    }

    /// The help text.
    fn help_lines(&self) -> Vec<String> {
        self.base().help_lines()
    }
}

impl ArgumentRegistry for BaseArgumentParser {
    fn base(&self) -> &BaseArgumentParser {
        self
    }

    fn base_mut(&mut self) -> &mut BaseArgumentParser {
        self
    }
}
