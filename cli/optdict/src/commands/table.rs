//! `optdict table` — render declared options.

use std::path::Path;

use anyhow::{anyhow, Result};
use optdict_core::{to_table, TableFormat};

/// Render the table for a schema (and optional value file).
///
/// `text` (the default) wraps long descriptions to 100 columns.
pub fn render(schema: &Path, values: Option<&Path>, format: Option<&str>) -> Result<String> {
    let opts = super::load(schema, values)?;
    match format.unwrap_or("text") {
        "text" => Ok(opts.to_string()),
        other => {
            let format: TableFormat = other.parse().map_err(|e: String| anyhow!(e))?;
            Ok(to_table(&opts, format, "N/A"))
        }
    }
}

pub fn run(schema: &Path, values: Option<&Path>, format: Option<&str>) -> Result<()> {
    println!("{}", render(schema, values, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{write, SCHEMA};
    use super::*;

    #[test]
    fn renders_each_format() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(dir.path(), "newton.toml", SCHEMA);

        let text = render(&schema, None, None).unwrap();
        assert!(text.starts_with("===="));
        assert!(text.contains("solve_subsystems"));

        let github = render(&schema, None, Some("github")).unwrap();
        assert!(github.starts_with("| Option"));
        assert!(github.contains("Deprecation"));

        let rst = render(&schema, None, Some("rst")).unwrap();
        assert!(rst.contains("**Required**"));
    }

    #[test]
    fn shows_applied_values() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(dir.path(), "newton.toml", SCHEMA);
        let values = write(dir.path(), "values.toml", "maxiter = 42");

        let table = render(&schema, Some(&values), Some("github")).unwrap();
        assert!(table.contains("| 42 "));
    }

    #[test]
    fn unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(dir.path(), "newton.toml", SCHEMA);
        let err = render(&schema, None, Some("html")).unwrap_err();
        assert!(err.to_string().contains("unknown table format 'html'"));
    }
}
