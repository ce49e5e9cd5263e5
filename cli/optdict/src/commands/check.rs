//! `optdict check` — validate values against a schema.

use std::path::Path;

use anyhow::{bail, Result};
use optdict_core::{ErrorKind, OptionsDictionary};

/// Names of options that are required but have no value.
pub fn missing_required(opts: &OptionsDictionary) -> Vec<String> {
    opts.names()
        .filter(|name| {
            matches!(
                opts.get_value(name).map_err(|e| e.kind),
                Err(ErrorKind::RequiredNotSet { .. })
            )
        })
        .map(str::to_string)
        .collect()
}

/// Load, apply values and read back every option.
///
/// Returns a one-line summary; any invalid value or unset required option is
/// an error.
pub fn check(schema: &Path, values: Option<&Path>) -> Result<String> {
    let opts = super::load(schema, values)?;

    let missing = missing_required(&opts);
    if !missing.is_empty() {
        let owner = opts.owner().map(|o| format!("{o}: ")).unwrap_or_default();
        bail!(
            "{owner}{} required option(s) not set: {}",
            missing.len(),
            missing.join(", ")
        );
    }
    Ok(format!("ok: {} option(s) valid", opts.len()))
}

pub fn run(schema: &Path, values: Option<&Path>) -> Result<()> {
    println!("{}", check(schema, values)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{write, SCHEMA};
    use super::*;

    #[test]
    fn reports_missing_required() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(dir.path(), "newton.toml", SCHEMA);

        let err = check(&schema, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "NewtonSolver: 1 required option(s) not set: solve_subsystems"
        );
    }

    #[test]
    fn passes_with_complete_values() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(dir.path(), "newton.toml", SCHEMA);
        let values = write(
            dir.path(),
            "values.toml",
            "solve_subsystems = true\niprint = 2\n",
        );

        assert_eq!(check(&schema, Some(&values)).unwrap(), "ok: 3 option(s) valid");
    }

    #[test]
    fn rejects_wrongly_typed_values() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(dir.path(), "newton.toml", SCHEMA);
        let values = write(dir.path(), "values.toml", "solve_subsystems = 1\n");

        let err = check(&schema, Some(&values)).unwrap_err();
        assert!(format!("{err:#}").contains("is not one of [true, false]"));
    }

    #[test]
    fn rejects_undeclared_values() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(dir.path(), "newton.toml", SCHEMA);
        let values = write(dir.path(), "values.toml", "tolerance = 1e-6\n");

        let err = check(&schema, Some(&values)).unwrap_err();
        assert!(format!("{err:#}").contains("has not been declared"));
    }
}
