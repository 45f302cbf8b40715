//! Implementation of the `wareplan filter` command.
//!
//! Parses a pack or unpack filter, optionally layers it over a named preset, and reports
//! the canonical form. Incomplete filters are printed with a warning, since execution
//! needs every field specified.

use anyhow::{Context, Result};
use serde::Serialize;

use wareplan_lib::filter::{PackFilter, UnpackFilter};

use crate::FilterKind;
use crate::output::{OutputFormat, print_json, print_stat, print_warning};

#[derive(Debug, Serialize)]
struct FilterReport {
  filter: String,
  complete: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  altering: Option<bool>,
}

pub fn cmd_filter(kind: FilterKind, filter: &str, preset: Option<&str>, format: OutputFormat) -> Result<()> {
  let report = match kind {
    FilterKind::Pack => {
      let parsed: PackFilter = filter.parse().context("Failed to parse pack filter")?;
      let merged = match preset {
        Some(name) => PackFilter::preset(name).context("Failed to load preset")?.apply(&parsed),
        None => parsed,
      };
      FilterReport {
        filter: merged.to_string(),
        complete: merged.is_complete(),
        altering: None,
      }
    }
    FilterKind::Unpack => {
      let parsed: UnpackFilter = filter.parse().context("Failed to parse unpack filter")?;
      let merged = match preset {
        Some(name) => UnpackFilter::preset(name).context("Failed to load preset")?.apply(&parsed),
        None => parsed,
      };
      FilterReport {
        filter: merged.to_string(),
        complete: merged.is_complete(),
        altering: Some(merged.is_altering()),
      }
    }
  };

  if format.is_json() {
    return print_json(&report);
  }

  print_stat("filter", &report.filter);
  print_stat("complete", yes_no(report.complete));
  if let Some(altering) = report.altering {
    print_stat("altering", yes_no(altering));
  }
  if !report.complete {
    print_warning("filter is incomplete; layer it over a preset before using it to pack or unpack");
  }
  Ok(())
}

fn yes_no(b: bool) -> &'static str {
  if b { "yes" } else { "no" }
}
