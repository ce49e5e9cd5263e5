//! `optdict snapshot` — print the recorder snapshot.

use std::path::Path;

use anyhow::{Context, Result};

/// JSON snapshot of the dictionary a schema declares.
pub fn render(schema: &Path, values: Option<&Path>) -> Result<String> {
    let opts = super::load(schema, values)?;
    opts.snapshot()
        .to_json()
        .context("serializing snapshot")
}

pub fn run(schema: &Path, values: Option<&Path>) -> Result<()> {
    println!("{}", render(schema, values)?);
    Ok(())
}
