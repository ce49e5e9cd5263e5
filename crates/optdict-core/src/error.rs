//! Error types for option declaration, access and schema loading.

use std::path::PathBuf;

use crate::value::ValueType;

/// Which access path hit an undeclared option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl Access {
    fn not_declared_phrase(&self) -> &'static str {
        match self {
            Access::Read => "cannot be found",
            Access::Write => "cannot be set because it has not been declared",
        }
    }
}

/// Coarse classification of an [`ErrorKind`].
///
/// Callers that only care whether a failure was a lookup problem, a bad value
/// or a bad type branch on this instead of matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing key or a write to a read-only dictionary.
    Key,
    /// Value outside the enumerated set, out of bounds or rejected by a validator.
    Value,
    /// Value or declaration argument of the wrong type.
    Type,
    /// Required option not set, or conflicting declaration constraints.
    Runtime,
}

/// The way a value failed a value-level check.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Violation {
    #[error("is not one of {allowed}")]
    NotOneOf { allowed: String },

    #[error("exceeds maximum allowed value of {upper}")]
    AboveUpper { upper: f64 },

    #[error("is less than minimum allowed value of {lower}")]
    BelowLower { lower: f64 },

    /// A custom validator refused the value.
    #[error("is not valid: {reason}")]
    Rejected { reason: String },
}

/// A malformed declaration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeclarationProblem {
    #[error("the 'values' arg must be a list - not {found}")]
    ValuesNotCollection { found: String },

    #[error("the 'types' arg must be a type name or a list of type names - not {found}")]
    TypesNotCollection { found: String },

    #[error("'types' and 'values' were both specified")]
    ValuesAndTypes,
}

/// What went wrong, without the owner prefix.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    #[error("Option '{name}' {}.", .access.not_declared_phrase())]
    NotDeclared { name: String, access: Access },

    #[error("Tried to set read-only option '{name}'.")]
    ReadOnly { name: String },

    #[error("Value ({value}) of option '{name}' {violation}.")]
    InvalidValue {
        name: String,
        value: String,
        violation: Violation,
    },

    #[error("Value ({value}) of option '{name}' has type '{found}', but {} was expected.", expected_phrase(.expected))]
    InvalidType {
        name: String,
        value: String,
        found: String,
        expected: Vec<ValueType>,
    },

    #[error("Option '{name}' is required but has not been set.")]
    RequiredNotSet { name: String },

    #[error("In declaration of option '{name}', {problem}.")]
    Configuration {
        name: String,
        problem: DeclarationProblem,
    },
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::NotDeclared { .. } | ErrorKind::ReadOnly { .. } => ErrorCategory::Key,
            ErrorKind::InvalidValue { .. } => ErrorCategory::Value,
            ErrorKind::InvalidType { .. } => ErrorCategory::Type,
            ErrorKind::RequiredNotSet { .. } => ErrorCategory::Runtime,
            ErrorKind::Configuration { problem, .. } => match problem {
                DeclarationProblem::ValuesAndTypes => ErrorCategory::Runtime,
                _ => ErrorCategory::Type,
            },
        }
    }

    /// Name of the option the error concerns.
    pub fn option_name(&self) -> &str {
        match self {
            ErrorKind::NotDeclared { name, .. }
            | ErrorKind::ReadOnly { name }
            | ErrorKind::InvalidValue { name, .. }
            | ErrorKind::InvalidType { name, .. }
            | ErrorKind::RequiredNotSet { name }
            | ErrorKind::Configuration { name, .. } => name,
        }
    }
}

fn expected_phrase(expected: &[ValueType]) -> String {
    match expected {
        [single] => format!("type '{single}'"),
        many => {
            let names: Vec<_> = many.iter().map(|t| format!("'{t}'")).collect();
            format!("one of types ({})", names.join(", "))
        }
    }
}

fn owner_prefix(owner: &Option<String>) -> String {
    match owner {
        Some(owner) => format!("{owner}: "),
        None => String::new(),
    }
}

/// An error raised by an [`OptionsDictionary`](crate::OptionsDictionary).
///
/// The message carries the owning component's name when the dictionary has one,
/// e.g. `NewtonSolver: Option 'maxiter' is required but has not been set.`
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}{kind}", owner_prefix(.owner))]
pub struct OptionsError {
    pub owner: Option<String>,
    pub kind: ErrorKind,
}

impl OptionsError {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

/// Result type for dictionary operations.
pub type Result<T> = std::result::Result<T, OptionsError>;

/// Errors that can occur while loading schema and value documents.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error reading a document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document not found.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A declaration in the schema was rejected.
    #[error(transparent)]
    Options(#[from] OptionsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_prefix_is_prepended() {
        let err = OptionsError {
            owner: Some("NewtonSolver".into()),
            kind: ErrorKind::RequiredNotSet {
                name: "maxiter".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "NewtonSolver: Option 'maxiter' is required but has not been set."
        );

        let bare = OptionsError {
            owner: None,
            kind: err.kind.clone(),
        };
        assert_eq!(
            bare.to_string(),
            "Option 'maxiter' is required but has not been set."
        );
    }

    #[test]
    fn not_declared_messages_differ_by_access() {
        let read = ErrorKind::NotDeclared {
            name: "x".into(),
            access: Access::Read,
        };
        let write = ErrorKind::NotDeclared {
            name: "x".into(),
            access: Access::Write,
        };
        assert_eq!(read.to_string(), "Option 'x' cannot be found.");
        assert_eq!(
            write.to_string(),
            "Option 'x' cannot be set because it has not been declared."
        );
    }

    #[test]
    fn type_error_messages() {
        let one = ErrorKind::InvalidType {
            name: "n".into(),
            value: "'a'".into(),
            found: "str".into(),
            expected: vec![ValueType::Int],
        };
        assert_eq!(
            one.to_string(),
            "Value ('a') of option 'n' has type 'str', but type 'int' was expected."
        );

        let many = ErrorKind::InvalidType {
            name: "n".into(),
            value: "'a'".into(),
            found: "str".into(),
            expected: vec![ValueType::Int, ValueType::Float],
        };
        assert!(many
            .to_string()
            .ends_with("but one of types ('int', 'float') was expected."));
    }

    #[test]
    fn categories() {
        let kind = ErrorKind::ReadOnly { name: "x".into() };
        assert_eq!(kind.category(), ErrorCategory::Key);

        let kind = ErrorKind::Configuration {
            name: "x".into(),
            problem: DeclarationProblem::ValuesAndTypes,
        };
        assert_eq!(kind.category(), ErrorCategory::Runtime);

        let kind = ErrorKind::Configuration {
            name: "x".into(),
            problem: DeclarationProblem::ValuesNotCollection { found: "3".into() },
        };
        assert_eq!(kind.category(), ErrorCategory::Type);
        assert_eq!(kind.option_name(), "x");
    }
}
