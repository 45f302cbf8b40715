//! Implementation of the `wareplan order` command.
//!
//! Reads a module from JSON and prints the order its steps must run in. With `--deep`,
//! submodules are expanded in place and steps are printed as `path.step`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use wareplan_lib::module::{Module, order_steps, order_steps_deep};

use crate::output::{OutputFormat, print_json, print_step};

pub fn cmd_order(path: &Path, deep: bool, format: OutputFormat) -> Result<()> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read module: {}", path.display()))?;
  let module: Module =
    serde_json::from_str(&content).with_context(|| format!("Failed to parse module: {}", path.display()))?;

  debug!(steps = module.steps.len(), deep, "ordering module");

  let order: Vec<String> = if deep {
    order_steps_deep(&module)
      .context("Failed to order module")?
      .iter()
      .map(ToString::to_string)
      .collect()
  } else {
    order_steps(&module).context("Failed to order module")?
  };

  if format.is_json() {
    print_json(&order)?;
  } else {
    for (i, step) in order.iter().enumerate() {
      print_step(i + 1, step);
    }
  }
  Ok(())
}
