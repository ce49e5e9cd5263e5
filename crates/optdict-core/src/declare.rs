//! Option declarations.
//!
//! An [`OptionSpec`] describes one option before it enters a dictionary: its
//! default, the constraints every later write must satisfy, and bookkeeping
//! flags for recording and deprecation. Specs are built by value and handed to
//! [`OptionsDictionary::declare`](crate::OptionsDictionary::declare).

use std::fmt;
use std::sync::Arc;

use crate::value::{OptionValue, ValueType};

/// User-supplied check run after the built-in constraints pass.
///
/// Receives the option name and candidate value; returns a reason on rejection.
pub type Validator = Arc<dyn Fn(&str, &OptionValue) -> Result<(), String> + Send + Sync>;

/// Declaration of a single option.
#[derive(Clone)]
pub struct OptionSpec {
    pub(crate) name: String,
    pub(crate) default: Option<OptionValue>,
    pub(crate) values: Option<Vec<OptionValue>>,
    pub(crate) types: Option<Vec<ValueType>>,
    pub(crate) desc: String,
    pub(crate) upper: Option<f64>,
    pub(crate) lower: Option<f64>,
    pub(crate) check_valid: Option<Validator>,
    pub(crate) allow_none: bool,
    pub(crate) recordable: bool,
    pub(crate) deprecation: Option<String>,
}

impl OptionSpec {
    /// A required option with no constraints.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            values: None,
            types: None,
            desc: String::new(),
            upper: None,
            lower: None,
            check_valid: None,
            allow_none: false,
            recordable: true,
            deprecation: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Default value. Passing `OptionValue::None` also allows null writes.
    pub fn default(mut self, value: impl Into<OptionValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Closed set of acceptable values.
    ///
    /// Membership is exact: `Int(1)`, `Float(1.0)` and `Bool(true)` are
    /// different values, so `values([1, 2])` rejects `1.0`.
    pub fn values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<OptionValue>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Acceptable value types.
    pub fn types<I, T>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ValueType>,
    {
        self.types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Single acceptable value type.
    pub fn of_type(self, ty: impl Into<ValueType>) -> Self {
        self.types([ty.into()])
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    /// Maximum allowed value (inclusive).
    pub fn upper(mut self, upper: f64) -> Self {
        self.upper = Some(upper);
        self
    }

    /// Minimum allowed value (inclusive).
    pub fn lower(mut self, lower: f64) -> Self {
        self.lower = Some(lower);
        self
    }

    pub fn check_valid<F>(mut self, check: F) -> Self
    where
        F: Fn(&str, &OptionValue) -> Result<(), String> + Send + Sync + 'static,
    {
        self.check_valid = Some(Arc::new(check));
        self
    }

    /// Accept null regardless of the other constraints.
    pub fn allow_none(mut self, allow: bool) -> Self {
        self.allow_none = allow;
        self
    }

    /// Whether the option is included in state snapshots.
    pub fn recordable(mut self, recordable: bool) -> Self {
        self.recordable = recordable;
        self
    }

    /// Mark the option deprecated; the message is emitted on first access.
    pub fn deprecation(mut self, message: impl Into<String>) -> Self {
        self.deprecation = Some(message.into());
        self
    }
}

impl fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSpec")
            .field("name", &self.name)
            .field("default", &self.default)
            .field("values", &self.values)
            .field("types", &self.types)
            .field("upper", &self.upper)
            .field("lower", &self.lower)
            .field("check_valid", &self.check_valid.is_some())
            .field("allow_none", &self.allow_none)
            .field("recordable", &self.recordable)
            .field("deprecation", &self.deprecation)
            .finish()
    }
}
