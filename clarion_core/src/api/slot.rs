use crate::api::ParseFlag;
use crate::codec::Codec;
use crate::error::{CodecError, ProgrammerError};
use crate::model::{FailurePolicy, RawValue};
use std::cell::RefCell;

/// How a value slot was filled.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Supplied<T> {
    Absent,
    Preset,
    Explicit(T),
    Repeated(Vec<T>),
}

/// The value storage shared by options and positionals.
///
/// Presence is tracked by [`Supplied`], while the default and preset are kept aside.
/// The effective value resolves as: explicit, preset, default, nothing.
pub(crate) struct ValueSlot<T> {
    name: String,
    codec: Box<dyn Codec<T>>,
    default: Option<T>,
    preset: Option<T>,
    repeated: bool,
    supplied: RefCell<Supplied<T>>,
    parsed: ParseFlag,
    policy: FailurePolicy,
}

pub(crate) struct SlotConfig<T> {
    pub(crate) default: Option<T>,
    pub(crate) preset: Option<T>,
    pub(crate) repeated: bool,
}

impl<T: Clone> ValueSlot<T> {
    pub(crate) fn new(
        name: impl Into<String>,
        codec: Box<dyn Codec<T>>,
        config: SlotConfig<T>,
        parsed: ParseFlag,
        policy: FailurePolicy,
    ) -> Self {
        let SlotConfig {
            default,
            preset,
            repeated,
        } = config;

        Self {
            name: name.into(),
            codec,
            default,
            preset,
            repeated,
            supplied: RefCell::new(Supplied::Absent),
            parsed,
            policy,
        }
    }

    pub(crate) fn type_name(&self) -> &str {
        self.codec.name()
    }

    pub(crate) fn is_repeated(&self) -> bool {
        self.repeated
    }

    pub(crate) fn is_supplied(&self) -> bool {
        !matches!(*self.supplied.borrow(), Supplied::Absent)
    }

    pub(crate) fn has_preset(&self) -> bool {
        self.preset.is_some()
    }

    pub(crate) fn default_text(&self) -> Option<String> {
        self.default.as_ref().map(|v| self.codec.text_from_value(v))
    }

    pub(crate) fn preset_text(&self) -> Option<String> {
        self.preset.as_ref().map(|v| self.codec.text_from_value(v))
    }

    /// Decode and store the text.
    pub(crate) fn realize(&self, text: &str) -> Result<(), CodecError> {
        let value = self.codec.value_from_text(text)?;
        self.store(value);
        Ok(())
    }

    /// Store the preset, returning false when there is none.
    pub(crate) fn realize_preset(&self) -> bool {
        match &self.preset {
            Some(preset) if self.repeated => {
                self.store(preset.clone());
                true
            }
            Some(_) => {
                self.supplied.replace(Supplied::Preset);
                true
            }
            None => false,
        }
    }

    fn store(&self, value: T) {
        let mut supplied = self.supplied.borrow_mut();

        if self.repeated {
            match &mut *supplied {
                Supplied::Repeated(values) => values.push(value),
                _ => *supplied = Supplied::Repeated(vec![value]),
            }
        } else {
            *supplied = Supplied::Explicit(value);
        }
    }

    pub(crate) fn ensure_parsed(&self) -> Result<(), ProgrammerError> {
        if self.parsed.get() {
            Ok(())
        } else {
            Err(self
                .policy
                .raise(ProgrammerError::NotYetParsed(self.name.clone())))
        }
    }

    pub(crate) fn unavailable(&self) -> ProgrammerError {
        self.policy
            .raise(ProgrammerError::ValueUnavailable(self.name.clone()))
    }

    pub(crate) fn effective(&self) -> Option<T> {
        match &*self.supplied.borrow() {
            Supplied::Absent => self.default.clone(),
            Supplied::Preset => self.preset.clone(),
            Supplied::Explicit(value) => Some(value.clone()),
            Supplied::Repeated(values) => values.last().cloned(),
        }
    }

    pub(crate) fn collected(&self) -> Vec<T> {
        match &*self.supplied.borrow() {
            Supplied::Absent => Vec::default(),
            Supplied::Preset => self.preset.iter().cloned().collect(),
            Supplied::Explicit(value) => vec![value.clone()],
            Supplied::Repeated(values) => values.clone(),
        }
    }

    pub(crate) fn raw_value(&self) -> RawValue {
        if !self.parsed.get() {
            return RawValue::NotParsed;
        }

        if self.repeated {
            RawValue::List(
                self.collected()
                    .iter()
                    .map(|v| self.codec.text_from_value(v))
                    .collect(),
            )
        } else {
            match self.effective() {
                Some(value) => RawValue::Text(self.codec.text_from_value(&value)),
                None => RawValue::Null,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::IntCodec;
    use std::cell::Cell;
    use std::rc::Rc;

    fn slot(default: Option<i32>, preset: Option<i32>, repeated: bool) -> ValueSlot<i32> {
        ValueSlot::new(
            "alpha",
            Box::new(IntCodec),
            SlotConfig {
                default,
                preset,
                repeated,
            },
            Rc::new(Cell::new(true)),
            FailurePolicy::Report,
        )
    }

    #[test]
    fn absent_uses_default() {
        let slot = slot(Some(5), Some(7), false);
        assert!(!slot.is_supplied());
        assert_eq!(slot.effective(), Some(5));
        assert_eq!(slot.raw_value(), RawValue::Text("5".to_string()));
    }

    #[test]
    fn absent_without_default() {
        let slot = slot(None, None, false);
        assert_eq!(slot.effective(), None);
        assert_eq!(slot.raw_value(), RawValue::Null);
    }

    #[test]
    fn preset() {
        let slot = slot(Some(5), Some(7), false);
        assert!(slot.realize_preset());
        assert!(slot.is_supplied());
        assert_eq!(slot.effective(), Some(7));
    }

    #[test]
    fn no_preset() {
        let slot = slot(Some(5), None, false);
        assert!(!slot.realize_preset());
        assert!(!slot.is_supplied());
    }

    #[test]
    fn explicit() {
        let slot = slot(Some(5), Some(7), false);
        slot.realize("42").unwrap();
        assert_eq!(slot.effective(), Some(42));
        assert_eq!(slot.collected(), vec![42]);
    }

    #[test]
    fn explicit_invalid() {
        let slot = slot(Some(5), None, false);
        assert_eq!(
            slot.realize("x"),
            Err(CodecError("Expected an integer, found 'x'".to_string()))
        );
        assert!(!slot.is_supplied());
    }

    #[test]
    fn repeated() {
        let slot = slot(None, Some(1), true);
        assert_eq!(slot.raw_value(), RawValue::List(vec![]));
        slot.realize("42").unwrap();
        assert!(slot.realize_preset());
        slot.realize("43").unwrap();
        assert_eq!(slot.collected(), vec![42, 1, 43]);
        assert_eq!(
            slot.raw_value(),
            RawValue::List(vec!["42".to_string(), "1".to_string(), "43".to_string()])
        );
    }

    #[test]
    fn not_parsed() {
        let slot = ValueSlot::new(
            "alpha",
            Box::new(IntCodec),
            SlotConfig {
                default: Some(1),
                preset: None,
                repeated: false,
            },
            Rc::new(Cell::new(false)),
            FailurePolicy::Report,
        );
        assert_eq!(
            slot.ensure_parsed(),
            Err(ProgrammerError::NotYetParsed("alpha".to_string()))
        );
        assert_eq!(slot.raw_value(), RawValue::NotParsed);
    }
}
