//! Tabular rendering of declared options.
//!
//! Rendering only reads the dictionary: no deprecation notices are consumed
//! and no values change.

use std::fmt;
use std::str::FromStr;

use crate::dictionary::OptionsDictionary;
use crate::slot::OptionSlot;
use crate::value::{repr_list, OptionValue};

/// Shown in the default column for options without a value.
pub const REQUIRED: &str = "**Required**";

/// Width used by the `Display` rendering.
pub const DEFAULT_WIDTH: usize = 100;

/// Output format for [`to_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// GitHub-flavored markdown.
    Github,
    /// reStructuredText simple table.
    Rst,
}

impl FromStr for TableFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github" | "markdown" | "md" => Ok(TableFormat::Github),
            "rst" => Ok(TableFormat::Rst),
            other => Err(format!("unknown table format '{other}' (expected github or rst)")),
        }
    }
}

/// Presentation data for one option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionRow {
    pub name: String,
    /// Current value, or [`REQUIRED`] when unset.
    pub default: String,
    pub values: Option<String>,
    pub types: Option<String>,
    pub desc: String,
    pub deprecation: Option<String>,
}

impl From<&OptionSlot> for OptionRow {
    fn from(slot: &OptionSlot) -> Self {
        let default = match slot.value() {
            None => REQUIRED.to_string(),
            // Components show as their bare type name.
            Some(OptionValue::Object(obj)) => obj.type_name().to_string(),
            Some(value) => value.to_string(),
        };
        let types = slot.allowed_types().map(|types| {
            let names: Vec<_> = types.iter().map(|t| format!("'{t}'")).collect();
            format!("[{}]", names.join(", "))
        });

        Self {
            name: slot.name().to_string(),
            default,
            values: slot.allowed_values().map(repr_list),
            types,
            desc: slot.description().to_string(),
            deprecation: slot.deprecation().map(str::to_string),
        }
    }
}

/// One row per option, ordered by name.
pub fn rows(opts: &OptionsDictionary) -> Vec<OptionRow> {
    opts.slots().map(OptionRow::from).collect()
}

/// Render the options as a table; `missing` stands in for absent constraints.
pub fn to_table(opts: &OptionsDictionary, format: TableFormat, missing: &str) -> String {
    let rows = rows(opts);
    let with_deprecation = rows.iter().any(|r| r.deprecation.is_some());

    let mut headers = vec![
        "Option",
        "Default",
        "Acceptable Values",
        "Acceptable Types",
        "Description",
    ];
    if with_deprecation {
        headers.push("Deprecation");
    }
    let headers: Vec<String> = headers.into_iter().map(str::to_string).collect();

    let cells: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| {
            let mut line = vec![
                row.name,
                row.default,
                row.values.unwrap_or_else(|| missing.to_string()),
                row.types.unwrap_or_else(|| missing.to_string()),
                row.desc,
            ];
            if with_deprecation {
                line.push(row.deprecation.unwrap_or_default());
            }
            line
        })
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            std::iter::once(&headers)
                .chain(cells.iter())
                .map(|line| line[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    match format {
        TableFormat::Github => render_github(&headers, &cells, &widths),
        TableFormat::Rst => render_rst(&headers, &cells, &widths),
    }
}

fn render_github(headers: &[String], cells: &[Vec<String>], widths: &[usize]) -> String {
    let line = |row: &[String]| {
        let padded: Vec<_> = row
            .iter()
            .zip(widths)
            .map(|(cell, &w)| format!(" {cell:<w$} "))
            .collect();
        format!("|{}|", padded.join("|"))
    };
    let rule: Vec<_> = widths.iter().map(|w| "-".repeat(w + 2)).collect();

    let mut out = vec![line(headers), format!("|{}|", rule.join("|"))];
    out.extend(cells.iter().map(|row| line(row.as_slice())));
    out.join("\n")
}

fn render_rst(headers: &[String], cells: &[Vec<String>], widths: &[usize]) -> String {
    let line = |row: &[String]| {
        let padded: Vec<_> = row
            .iter()
            .zip(widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect();
        padded.join("  ").trim_end().to_string()
    };
    let rule: Vec<_> = widths.iter().map(|w| "=".repeat(*w)).collect();
    let rule = rule.join("  ");

    let mut out = vec![rule.clone(), line(headers), rule.clone()];
    out.extend(cells.iter().map(|row| line(row.as_slice())));
    out.push(rule);
    out.join("\n")
}

/// Split at a character (not byte) offset.
fn split_chars(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}

/// Fit an RST table into `width` columns.
///
/// Overlong rows are cut at `width` and the remainder is wrapped underneath,
/// aligned with the last column. If the last column would be narrower than
/// ten characters, the table is returned unchanged.
pub fn wrap_rst(rst: &str, width: usize) -> String {
    let lines: Vec<&str> = rst.lines().collect();
    let Some(first) = lines.first() else {
        return String::new();
    };
    let cols: Vec<usize> = first.split_whitespace().map(|c| c.chars().count()).collect();
    let desc_col = cols[..cols.len().saturating_sub(1)].iter().sum::<usize>()
        + 2 * cols.len().saturating_sub(1);
    let desc_len = width.saturating_sub(desc_col);
    if desc_len < 10 {
        return rst.to_string();
    }

    let mut text = Vec::new();
    for row in lines {
        if row.chars().count() <= width {
            text.push(row.to_string());
            continue;
        }
        let (head, rest) = split_chars(row, width);
        text.push(head.to_string());
        if row.starts_with("===") {
            continue;
        }
        let mut rest = rest.trim_end();
        while !rest.is_empty() {
            let (chunk, tail) = split_chars(rest, desc_len);
            text.push(format!("{}{chunk}", " ".repeat(desc_col)));
            rest = tail;
        }
    }
    text.join("\n")
}

impl fmt::Display for OptionsDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rst = to_table(self, TableFormat::Rst, "N/A");
        write!(f, "{}", wrap_rst(&rst, DEFAULT_WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declare::OptionSpec;
    use crate::value::ObjectValue;

    struct DirectSolver;

    fn solver_options() -> OptionsDictionary {
        let mut opts = OptionsDictionary::with_owner("NewtonSolver");
        opts.declare(
            OptionSpec::new("maxiter")
                .default(10)
                .of_type("int")
                .desc("Maximum iterations"),
        )
        .unwrap();
        opts.declare(OptionSpec::new("mode").values(["fwd", "rev"]).desc("Direction"))
            .unwrap();
        opts
    }

    #[test]
    fn rows_describe_each_option() {
        let mut opts = solver_options();
        opts.declare(
            OptionSpec::new("linear_solver")
                .default(ObjectValue::new("DirectSolver", DirectSolver)),
        )
        .unwrap();

        let rows = rows(&opts);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["linear_solver", "maxiter", "mode"]);

        assert_eq!(rows[0].default, "DirectSolver");
        assert_eq!(rows[1].default, "10");
        assert_eq!(rows[1].types.as_deref(), Some("['int']"));
        assert_eq!(rows[2].default, REQUIRED);
        assert_eq!(rows[2].values.as_deref(), Some("['fwd', 'rev']"));
        assert_eq!(rows[2].types, None);
    }

    #[test]
    fn github_table() {
        let table = to_table(&solver_options(), TableFormat::Github, "N/A");
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("| Option "));
        assert!(lines[1].starts_with("|---"));
        assert!(lines[2].contains("| maxiter "));
        assert!(lines[2].contains("['int']"));
        assert!(lines[3].contains("**Required**"));
        assert!(!lines[0].contains("Deprecation"));
    }

    #[test]
    fn rst_table_layout() {
        let table = to_table(&solver_options(), TableFormat::Rst, "N/A");
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("======="));
        assert_eq!(lines[0], lines[2]);
        assert_eq!(lines[0], lines[5]);
        assert!(lines[1].starts_with("Option "));
        assert!(lines[3].starts_with("maxiter"));
    }

    #[test]
    fn deprecation_column_only_when_needed() {
        let mut opts = solver_options();
        opts.declare(
            OptionSpec::new("err_on_maxiter")
                .default(false)
                .deprecation("use 'err_on_non_converge'"),
        )
        .unwrap();
        let table = to_table(&opts, TableFormat::Github, "N/A");
        assert!(table.lines().next().unwrap().contains("Deprecation"));
        assert!(table.contains("use 'err_on_non_converge'"));
    }

    #[test]
    fn rendering_leaves_deprecation_pending() {
        let mut opts = OptionsDictionary::new();
        opts.declare(OptionSpec::new("old").default(1).deprecation("old"))
            .unwrap();
        let _ = opts.to_string();
        assert!(opts.slot("old").unwrap().is_deprecation_pending());
    }

    #[test]
    fn display_wraps_long_descriptions() {
        let mut opts = OptionsDictionary::new();
        opts.declare(
            OptionSpec::new("atol")
                .default(1e-10)
                .desc("Absolute convergence tolerance applied to the residual norm at every nonlinear iteration of the solve"),
        )
        .unwrap();

        let text = opts.to_string();
        assert!(text.lines().all(|l| l.chars().count() <= DEFAULT_WIDTH));
        assert!(text.contains("every nonlinear"));
        let continuation = text.lines().nth(4).unwrap();
        assert!(continuation.starts_with("   "));
    }

    #[test]
    fn narrow_width_keeps_plain_rst() {
        let table = to_table(&solver_options(), TableFormat::Rst, "N/A");
        assert_eq!(wrap_rst(&table, 20), table);
    }

    #[test]
    fn parse_formats() {
        assert_eq!("github".parse::<TableFormat>(), Ok(TableFormat::Github));
        assert_eq!("rst".parse::<TableFormat>(), Ok(TableFormat::Rst));
        assert!("html".parse::<TableFormat>().is_err());
    }
}
