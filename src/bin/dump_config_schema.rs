//! Prints the JSON schema of `config.toml`, or writes it to the path given
//! as the first argument.

use anyhow::{Context, Result};
use std::path::PathBuf;

fn main() -> Result<()> {
    let schema = serde_json::to_string_pretty(&glissemontre::Config::json_schema())
        .context("failed to serialise config schema")?;
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => std::fs::write(&path, schema)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{schema}"),
    }
    Ok(())
}
