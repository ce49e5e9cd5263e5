//! A declared option and its current state.

use std::cell::Cell;
use std::fmt;

use crate::declare::{OptionSpec, Validator};
use crate::value::{OptionValue, ValueType};

/// One declared option inside a dictionary.
///
/// Constraints are fixed at declaration. The stored value changes only through
/// dictionary writes, and the pending deprecation flag is cleared by the first
/// read or write.
#[derive(Clone)]
pub struct OptionSlot {
    pub(crate) name: String,
    pub(crate) value: Option<OptionValue>,
    pub(crate) values: Option<Vec<OptionValue>>,
    pub(crate) types: Option<Vec<ValueType>>,
    pub(crate) desc: String,
    pub(crate) upper: Option<f64>,
    pub(crate) lower: Option<f64>,
    pub(crate) check_valid: Option<Validator>,
    pub(crate) allow_none: bool,
    pub(crate) recordable: bool,
    pub(crate) deprecation: Option<String>,
    pending_deprecation: Cell<bool>,
}

impl OptionSlot {
    /// Normalize a declaration into a slot.
    ///
    /// A `bool`-only type constraint implies the values `[true, false]`, and a
    /// null default implies `allow_none`.
    pub(crate) fn from_spec(spec: OptionSpec) -> Self {
        let OptionSpec {
            name,
            default,
            values,
            types,
            desc,
            upper,
            lower,
            check_valid,
            allow_none,
            recordable,
            deprecation,
        } = spec;

        let values = match types.as_deref() {
            Some([ValueType::Bool]) => Some(vec![OptionValue::Bool(true), OptionValue::Bool(false)]),
            _ => values,
        };
        let allow_none = allow_none || matches!(default, Some(OptionValue::None));
        let pending_deprecation = Cell::new(deprecation.is_some());

        Self {
            name,
            value: default,
            values,
            types,
            desc,
            upper,
            lower,
            check_valid,
            allow_none,
            recordable,
            deprecation,
            pending_deprecation,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current value: the default until the first write, `None` when unset.
    pub fn value(&self) -> Option<&OptionValue> {
        self.value.as_ref()
    }

    /// True once a default was declared or a value was written.
    pub fn has_been_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn allowed_values(&self) -> Option<&[OptionValue]> {
        self.values.as_deref()
    }

    pub fn allowed_types(&self) -> Option<&[ValueType]> {
        self.types.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.desc
    }

    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    pub fn has_validator(&self) -> bool {
        self.check_valid.is_some()
    }

    pub fn allows_none(&self) -> bool {
        self.allow_none
    }

    pub fn is_recordable(&self) -> bool {
        self.recordable
    }

    pub fn deprecation(&self) -> Option<&str> {
        self.deprecation.as_deref()
    }

    /// Whether the deprecation notice has yet to be emitted.
    pub fn is_deprecation_pending(&self) -> bool {
        self.pending_deprecation.get()
    }

    /// Consume the one-shot deprecation notice, if still pending.
    pub(crate) fn take_deprecation(&self) -> Option<&str> {
        if self.pending_deprecation.replace(false) {
            self.deprecation.as_deref()
        } else {
            None
        }
    }
}

impl fmt::Debug for OptionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSlot")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("values", &self.values)
            .field("types", &self.types)
            .field("desc", &self.desc)
            .field("upper", &self.upper)
            .field("lower", &self.lower)
            .field("check_valid", &self.check_valid.is_some())
            .field("allow_none", &self.allow_none)
            .field("recordable", &self.recordable)
            .field("deprecation", &self.deprecation)
            .field("pending_deprecation", &self.pending_deprecation.get())
            .finish()
    }
}
