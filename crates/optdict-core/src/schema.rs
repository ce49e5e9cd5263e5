//! TOML schema documents declaring a dictionary's options, and value documents
//! assigning them.
//!
//! A schema looks like:
//!
//! ```toml
//! owner = "NewtonSolver"
//! read-only = false
//!
//! [[option]]
//! name = "maxiter"
//! default = 10
//! types = "int"
//! lower = 0
//! desc = "Maximum number of iterations"
//!
//! [[option]]
//! name = "mode"
//! values = ["fwd", "rev"]
//! deprecation = "'mode' is deprecated, use 'direction'"
//! ```
//!
//! A value document is a flat table of `name = value` pairs.

use std::path::Path;

use serde::Deserialize;

use crate::declare::OptionSpec;
use crate::dictionary::OptionsDictionary;
use crate::error::{DeclarationProblem, ErrorKind, SchemaError};
use crate::value::{OptionValue, ValueType};

/// A parsed schema document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionsSchema {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default, rename = "option")]
    pub options: Vec<OptionDecl>,
}

/// One `[[option]]` table.
///
/// `values` and `types` are kept as raw TOML so their shape can be checked
/// when the option is declared.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionDecl {
    pub name: String,
    #[serde(default)]
    pub default: Option<toml::Value>,
    #[serde(default)]
    pub values: Option<toml::Value>,
    #[serde(default)]
    pub types: Option<toml::Value>,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub upper: Option<f64>,
    #[serde(default)]
    pub lower: Option<f64>,
    #[serde(default)]
    pub allow_none: bool,
    #[serde(default = "default_recordable")]
    pub recordable: bool,
    #[serde(default)]
    pub deprecation: Option<String>,
}

fn default_recordable() -> bool {
    true
}

fn configuration(name: &str, problem: DeclarationProblem) -> ErrorKind {
    ErrorKind::Configuration {
        name: name.to_string(),
        problem,
    }
}

impl OptionDecl {
    /// Convert to a declaration, checking the shapes of `values` and `types`.
    pub fn to_spec(&self) -> Result<OptionSpec, ErrorKind> {
        let mut spec = OptionSpec::new(&self.name)
            .desc(&self.desc)
            .allow_none(self.allow_none)
            .recordable(self.recordable);

        if let Some(default) = &self.default {
            spec = spec.default(default.clone());
        }
        if let Some(values) = &self.values {
            let toml::Value::Array(items) = values else {
                return Err(configuration(
                    &self.name,
                    DeclarationProblem::ValuesNotCollection {
                        found: values.to_string(),
                    },
                ));
            };
            spec = spec.values(items.iter().cloned().map(OptionValue::from));
        }
        if let Some(types) = &self.types {
            let names = type_names(types).ok_or_else(|| {
                configuration(
                    &self.name,
                    DeclarationProblem::TypesNotCollection {
                        found: types.to_string(),
                    },
                )
            })?;
            spec = spec.types(names.into_iter().map(ValueType::parse));
        }
        if let Some(upper) = self.upper {
            spec = spec.upper(upper);
        }
        if let Some(lower) = self.lower {
            spec = spec.lower(lower);
        }
        if let Some(message) = &self.deprecation {
            spec = spec.deprecation(message);
        }
        Ok(spec)
    }
}

/// A single type name, or an array made only of type names.
fn type_names(types: &toml::Value) -> Option<Vec<&str>> {
    match types {
        toml::Value::String(name) => Some(vec![name.as_str()]),
        toml::Value::Array(items) => items.iter().map(toml::Value::as_str).collect(),
        _ => None,
    }
}

impl OptionsSchema {
    /// Declare every option into a fresh dictionary, in document order.
    pub fn build(&self) -> Result<OptionsDictionary, SchemaError> {
        let mut opts = match &self.owner {
            Some(owner) => OptionsDictionary::with_owner(owner),
            None => OptionsDictionary::new(),
        };
        for decl in &self.options {
            let spec = decl.to_spec().map_err(|kind| opts.error(kind))?;
            opts.declare(spec)?;
        }
        opts.set_read_only(self.read_only);
        Ok(opts)
    }
}

/// Parse a schema from a TOML string.
pub fn parse_schema(toml_str: &str) -> Result<OptionsSchema, SchemaError> {
    Ok(toml::from_str(toml_str)?)
}

/// Load a schema from a file.
pub fn load_schema(path: &Path) -> Result<OptionsSchema, SchemaError> {
    parse_schema(&read(path)?)
}

/// Parse a value document into `(name, value)` pairs.
pub fn parse_values(toml_str: &str) -> Result<Vec<(String, OptionValue)>, SchemaError> {
    let table: toml::Table = toml::from_str(toml_str)?;
    Ok(table
        .into_iter()
        .map(|(name, value)| (name, OptionValue::from(value)))
        .collect())
}

/// Load a value document from a file.
pub fn load_values(path: &Path) -> Result<Vec<(String, OptionValue)>, SchemaError> {
    parse_values(&read(path)?)
}

fn read(path: &Path) -> Result<String, SchemaError> {
    if !path.exists() {
        return Err(SchemaError::NotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}
