//! Implementation of the `wareplan hash` command.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use wareplan_lib::formula::Formula;
use wareplan_lib::util::hash::Hashable;

pub fn cmd_hash(path: &Path) -> Result<()> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read formula: {}", path.display()))?;
  let formula: Formula =
    serde_json::from_str(&content).with_context(|| format!("Failed to parse formula: {}", path.display()))?;

  let hash = formula.setup_hash().context("Failed to compute formula hash")?;
  println!("{}", hash);
  Ok(())
}
