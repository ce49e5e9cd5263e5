//! The options dictionary: declared keys, validated writes.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::declare::OptionSpec;
use crate::deprecation::{DeprecationSink, TracingSink};
use crate::error::{Access, DeclarationProblem, ErrorKind, OptionsError, Result};
use crate::slot::OptionSlot;
use crate::validate::validate;
use crate::value::{FromOptionValue, OptionValue};

/// A dictionary whose keys must be declared before use.
///
/// Solvers, drivers and systems each embed one of these to hold their
/// configuration. Every write is checked against the option's declaration,
/// and every failure names the owning component when one was given.
///
/// Reads take `&self`; the only state they touch is each slot's one-shot
/// deprecation flag. The dictionary is not `Sync` and callers sharing one
/// across threads must serialize access themselves.
#[derive(Clone)]
pub struct OptionsDictionary {
    slots: BTreeMap<String, OptionSlot>,
    owner: Option<String>,
    read_only: bool,
    all_recordable: bool,
    sink: Arc<dyn DeprecationSink>,
}

impl Default for OptionsDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionsDictionary {
    /// An empty, writable dictionary with no owner name.
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
            owner: None,
            read_only: false,
            all_recordable: true,
            sink: Arc::new(TracingSink),
        }
    }

    /// An empty dictionary whose errors are prefixed with `owner`.
    pub fn with_owner(owner: impl Into<String>) -> Self {
        Self {
            owner: Some(owner.into()),
            ..Self::new()
        }
    }

    /// Builder form of [`set_read_only`](Self::set_read_only).
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Route deprecation notices to `sink` instead of `tracing`.
    pub fn with_sink(mut self, sink: Arc<dyn DeprecationSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Forbid or allow writes. Declarations are unaffected.
    pub fn set_read_only(&mut self, read_only: bool) {
        debug!(owner = ?self.owner, read_only, "read-only changed");
        self.read_only = read_only;
    }

    /// False once any option has been declared with `recordable(false)`.
    pub fn is_all_recordable(&self) -> bool {
        self.all_recordable
    }

    pub(crate) fn error(&self, kind: ErrorKind) -> OptionsError {
        OptionsError {
            owner: self.owner.clone(),
            kind,
        }
    }

    /// Declare an option, replacing any previous declaration of the same name.
    ///
    /// A supplied default goes through the same validation as a write; if it
    /// fails, nothing is declared and a previous declaration stays in place.
    pub fn declare(&mut self, spec: OptionSpec) -> Result<()> {
        if spec.values.is_some() && spec.types.is_some() {
            return Err(self.error(ErrorKind::Configuration {
                name: spec.name,
                problem: DeclarationProblem::ValuesAndTypes,
            }));
        }

        let slot = OptionSlot::from_spec(spec);
        if let Some(default) = &slot.value {
            validate(&slot, default).map_err(|kind| self.error(kind))?;
        }

        if !slot.recordable {
            self.all_recordable = false;
        }
        debug!(owner = ?self.owner, option = %slot.name, "declared option");
        self.slots.insert(slot.name.clone(), slot);
        Ok(())
    }

    /// Remove an option. Removing an undeclared name does nothing.
    pub fn undeclare(&mut self, name: &str) {
        if self.slots.remove(name).is_some() {
            debug!(owner = ?self.owner, option = name, "undeclared option");
        }
    }

    /// Validate and store a value.
    ///
    /// On failure the stored value is left unchanged.
    pub fn set(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<()> {
        let value = value.into();
        let Self {
            slots,
            owner,
            read_only,
            sink,
            ..
        } = self;
        let fail = |kind| OptionsError {
            owner: owner.clone(),
            kind,
        };

        let Some(slot) = slots.get_mut(name) else {
            return Err(fail(ErrorKind::NotDeclared {
                name: name.to_string(),
                access: Access::Write,
            }));
        };
        if let Some(message) = slot.take_deprecation() {
            sink.deprecated(name, message);
        }
        if *read_only {
            return Err(fail(ErrorKind::ReadOnly {
                name: name.to_string(),
            }));
        }
        validate(slot, &value).map_err(fail)?;

        slot.value = Some(value);
        Ok(())
    }

    /// Read a value, failing if the option is undeclared or was never set.
    pub fn get_value(&self, name: &str) -> Result<&OptionValue> {
        let Some(slot) = self.slots.get(name) else {
            return Err(self.error(ErrorKind::NotDeclared {
                name: name.to_string(),
                access: Access::Read,
            }));
        };
        if let Some(message) = slot.take_deprecation() {
            self.sink.deprecated(name, message);
        }
        slot.value.as_ref().ok_or_else(|| {
            self.error(ErrorKind::RequiredNotSet {
                name: name.to_string(),
            })
        })
    }

    /// Read a value and convert it to `T`.
    pub fn get_typed<T: FromOptionValue>(&self, name: &str) -> Result<T> {
        let value = self.get_value(name)?;
        T::from_option_value(value).ok_or_else(|| {
            self.error(ErrorKind::InvalidType {
                name: name.to_string(),
                value: value.repr(),
                found: value.type_name().to_string(),
                expected: vec![T::EXPECTED],
            })
        })
    }

    /// The stored value without checks or notices.
    ///
    /// `None` when the option is undeclared or has no value yet.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.slots.get(name)?.value.as_ref()
    }

    /// Like [`get`](Self::get), falling back to `default`.
    ///
    /// The fallback covers both undeclared names and declared options that
    /// have no value yet. Use [`contains`](Self::contains) to tell them apart.
    pub fn get_or(&self, name: &str, default: impl Into<OptionValue>) -> OptionValue {
        match self.get(name) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Write each entry in iteration order, stopping at the first failure.
    ///
    /// Entries written before the failure keep their new values.
    pub fn update<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<OptionValue>,
    {
        for (name, value) in entries {
            self.set(name.as_ref(), value)?;
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Declared option names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// `(name, value)` pairs; the value is `None` for options never set.
    pub fn items(&self) -> impl Iterator<Item = (&str, Option<&OptionValue>)> {
        self.slots
            .iter()
            .map(|(name, slot)| (name.as_str(), slot.value.as_ref()))
    }

    /// Metadata for one option, for display.
    pub fn slot(&self, name: &str) -> Option<&OptionSlot> {
        self.slots.get(name)
    }

    /// Metadata for every option, ordered by name.
    pub fn slots(&self) -> impl Iterator<Item = &OptionSlot> {
        self.slots.values()
    }
}

impl fmt::Debug for OptionsDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsDictionary")
            .field("owner", &self.owner)
            .field("read_only", &self.read_only)
            .field("all_recordable", &self.all_recordable)
            .field("slots", &self.slots)
            .finish()
    }
}
