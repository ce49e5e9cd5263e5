//! Declared, validated option dictionaries.
//!
//! Solvers, drivers and systems in an optimization framework each carry an
//! [`OptionsDictionary`]: options are declared up front with a default and
//! constraints, and every later write is validated against that declaration.
//!
//! - **Declaration:** [`OptionSpec`] builder, enumerated values or types,
//!   inclusive bounds, custom validators, null handling, deprecation notices
//! - **Access:** checked reads and writes, bulk update, removal, iteration
//! - **Capture:** [`OptionsSnapshot`] for recorders, tables for documentation
//! - **Documents:** TOML schemas and value files ([`schema`])

pub mod declare;
pub mod deprecation;
pub mod dictionary;
pub mod error;
pub mod schema;
pub mod slot;
pub mod snapshot;
pub mod table;
mod validate;
pub mod value;

pub use declare::{OptionSpec, Validator};
pub use deprecation::{CollectingSink, DeprecationSink, TracingSink};
pub use dictionary::OptionsDictionary;
pub use error::{
    Access, DeclarationProblem, ErrorCategory, ErrorKind, OptionsError, Result, SchemaError,
    Violation,
};
pub use schema::{load_schema, load_values, parse_schema, parse_values, OptionsSchema};
pub use slot::OptionSlot;
pub use snapshot::{OptionsSnapshot, SlotSnapshot};
pub use table::{to_table, OptionRow, TableFormat};
pub use value::{FromOptionValue, ObjectValue, OptionValue, ValueType};
