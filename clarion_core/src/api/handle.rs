//! The handles returned by registration, through which the parsed values are read.
//!
//! Each handle has a fallible `try_value` and a `value` which panics where `try_value` fails.
//! `try_value` fails when read before the owning parser parsed, or (for [`Scalar`]) when the parse failed
//! before the argument received a value.
use crate::api::switch::SwitchArgument;
use crate::api::verb::VerbArgument;
use crate::api::{Argument, ValueArgument};
use crate::error::ProgrammerError;
use crate::parser::ChildArgumentParser;
use std::rc::Rc;

fn settle<T>(result: Result<T, ProgrammerError>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => panic!("programmer error - {error}"),
    }
}

/// A switch: `true` when supplied.
#[derive(Clone)]
pub struct Switch {
    pub(crate) argument: Rc<SwitchArgument>,
}

impl Switch {
    /// The switch name.
    pub fn name(&self) -> &str {
        self.argument.name()
    }

    /// Whether the switch was supplied.
    pub fn try_value(&self) -> Result<bool, ProgrammerError> {
        self.argument.value()
    }

    /// Whether the switch was supplied.
    ///
    /// # Panics
    /// When read before parsing.
    pub fn value(&self) -> bool {
        settle(self.try_value())
    }
}

/// A value which may be absent: an option or positional without default.
pub struct Optional<T> {
    pub(crate) argument: Rc<dyn ValueArgument<T>>,
}

impl<T: Clone> Optional<T> {
    /// The argument name.
    pub fn name(&self) -> &str {
        self.argument.name()
    }

    /// Whether the argument was supplied on the command line.
    pub fn is_supplied(&self) -> bool {
        self.argument.is_supplied()
    }

    /// The supplied (or preset) value, if any.
    pub fn try_value(&self) -> Result<Option<T>, ProgrammerError> {
        let slot = self.argument.slot();
        slot.ensure_parsed()?;
        Ok(slot.effective())
    }

    /// The supplied (or preset) value, if any.
    ///
    /// # Panics
    /// When read before parsing.
    pub fn value(&self) -> Option<T> {
        settle(self.try_value())
    }
}

/// A value which is always present after a successful parse: a required argument, or one with a default.
pub struct Scalar<T> {
    pub(crate) argument: Rc<dyn ValueArgument<T>>,
}

impl<T: Clone> Scalar<T> {
    /// The argument name.
    pub fn name(&self) -> &str {
        self.argument.name()
    }

    /// Whether the argument was supplied on the command line (as opposed to defaulted).
    pub fn is_supplied(&self) -> bool {
        self.argument.is_supplied()
    }

    /// The supplied, preset or default value.
    pub fn try_value(&self) -> Result<T, ProgrammerError> {
        let slot = self.argument.slot();
        slot.ensure_parsed()?;
        slot.effective().ok_or_else(|| slot.unavailable())
    }

    /// The supplied, preset or default value.
    ///
    /// # Panics
    /// When read before parsing, or after a parse which failed before this argument received a value.
    pub fn value(&self) -> T {
        settle(self.try_value())
    }
}

/// Every value of a repeated argument, in command line order.
pub struct Collection<T> {
    pub(crate) argument: Rc<dyn ValueArgument<T>>,
}

impl<T: Clone> Collection<T> {
    /// The argument name.
    pub fn name(&self) -> &str {
        self.argument.name()
    }

    /// Whether the argument was supplied at least once.
    pub fn is_supplied(&self) -> bool {
        self.argument.is_supplied()
    }

    /// The values.
    pub fn try_value(&self) -> Result<Vec<T>, ProgrammerError> {
        let slot = self.argument.slot();
        slot.ensure_parsed()?;
        Ok(slot.collected())
    }

    /// The values.
    ///
    /// # Panics
    /// When read before parsing.
    pub fn value(&self) -> Vec<T> {
        settle(self.try_value())
    }
}

/// A verb: selected when its name appeared on the command line.
#[derive(Clone)]
pub struct Verb {
    pub(crate) argument: Rc<VerbArgument>,
}

impl Verb {
    /// The verb name.
    pub fn name(&self) -> &str {
        self.argument.name()
    }

    /// Whether the verb was selected.
    pub fn is_selected(&self) -> bool {
        self.argument.is_selected()
    }

    /// Inspect the child parser which handled the verb, if it was selected.
    pub fn with_parser<R>(&self, f: impl FnOnce(&ChildArgumentParser) -> R) -> Option<R> {
        self.argument.with_parser(f)
    }
}

// Derived `Clone` would needlessly require `T: Clone`.
impl<T> Clone for Optional<T> {
    fn clone(&self) -> Self {
        Self {
            argument: self.argument.clone(),
        }
    }
}

impl<T> Clone for Scalar<T> {
    fn clone(&self) -> Self {
        Self {
            argument: self.argument.clone(),
        }
    }
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            argument: self.argument.clone(),
        }
    }
}
