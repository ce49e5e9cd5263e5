//! State capture for recorders.
//!
//! A snapshot is a plain, serializable copy of a dictionary's metadata and
//! values. Options declared with `recordable(false)` are left out whenever the
//! dictionary is not fully recordable; the filter runs on every call.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::dictionary::OptionsDictionary;
use crate::slot::OptionSlot;
use crate::value::{OptionValue, ValueType};

/// Recorded state of one option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotSnapshot {
    /// Absent when the option has never been set. An explicit null is kept.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_value"
    )]
    pub val: Option<OptionValue>,
    pub values: Option<Vec<OptionValue>>,
    pub types: Option<Vec<ValueType>>,
    pub desc: String,
    pub upper: Option<f64>,
    pub lower: Option<f64>,
    /// Validators are code; only their presence is recorded.
    pub has_check_valid: bool,
    pub has_been_set: bool,
    pub allow_none: bool,
    pub recordable: bool,
    pub deprecation: Option<String>,
    pub need_deprecation: bool,
}

/// A present field is always a value, `null` included.
fn present_value<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<OptionValue>, D::Error> {
    OptionValue::deserialize(deserializer).map(Some)
}

impl From<&OptionSlot> for SlotSnapshot {
    fn from(slot: &OptionSlot) -> Self {
        Self {
            val: slot.value().cloned(),
            values: slot.allowed_values().map(<[_]>::to_vec),
            types: slot.allowed_types().map(<[_]>::to_vec),
            desc: slot.description().to_string(),
            upper: slot.upper(),
            lower: slot.lower(),
            has_check_valid: slot.has_validator(),
            has_been_set: slot.has_been_set(),
            allow_none: slot.allows_none(),
            recordable: slot.is_recordable(),
            deprecation: slot.deprecation().map(str::to_string),
            need_deprecation: slot.is_deprecation_pending(),
        }
    }
}

/// Recorded state of a whole dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsSnapshot {
    pub owner: Option<String>,
    pub read_only: bool,
    pub all_recordable: bool,
    pub options: BTreeMap<String, SlotSnapshot>,
}

impl OptionsSnapshot {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a snapshot previously written by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl OptionsDictionary {
    /// Capture the dictionary's current state.
    pub fn snapshot(&self) -> OptionsSnapshot {
        let all_recordable = self.is_all_recordable();
        let options = self
            .slots()
            .filter(|slot| all_recordable || slot.is_recordable())
            .map(|slot| (slot.name().to_string(), SlotSnapshot::from(slot)))
            .collect();

        OptionsSnapshot {
            owner: self.owner().map(str::to_string),
            read_only: self.is_read_only(),
            all_recordable,
            options,
        }
    }
}
