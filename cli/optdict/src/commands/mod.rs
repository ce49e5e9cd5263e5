//! CLI command implementations.

pub mod check;
pub mod snapshot;
pub mod table;

use std::path::Path;

use anyhow::{Context, Result};
use optdict_core::{load_schema, load_values, OptionsDictionary};

/// Build the dictionary a schema declares, then apply an optional value file.
pub fn load(schema: &Path, values: Option<&Path>) -> Result<OptionsDictionary> {
    let mut opts = load_schema(schema)
        .and_then(|s| s.build())
        .with_context(|| format!("loading schema {}", schema.display()))?;

    if let Some(path) = values {
        let entries =
            load_values(path).with_context(|| format!("reading values {}", path.display()))?;
        opts.update(entries)
            .with_context(|| format!("applying values {}", path.display()))?;
    }
    Ok(opts)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::{Path, PathBuf};

    pub const SCHEMA: &str = r#"
owner = "NewtonSolver"

[[option]]
name = "maxiter"
default = 10
types = "int"
lower = 0
upper = 1000
desc = "Maximum number of iterations"

[[option]]
name = "solve_subsystems"
types = "bool"
desc = "Solve subsystems before each Newton step"

[[option]]
name = "iprint"
default = 1
deprecation = "'iprint' is deprecated, use 'verbosity'"
"#;

    /// Write `contents` to `name` inside `dir`.
    pub fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}
