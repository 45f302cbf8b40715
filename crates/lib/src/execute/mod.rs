//! Running operations.
//!
//! [`run_operation`] is the end of the pipeline for one step:
//! 1. Bind the operation against its scope into a [`Formula`]
//! 2. Build the [`FormulaContext`] from the configured warehouses and input filter
//! 3. Hand both to an [`Executor`]
//! 4. Re-key the executor's results from output paths back to slot names

mod types;

pub use types::*;

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::formula::{Formula, FormulaContext, OperationRecord};
use crate::module::Operation;
use crate::refs::{AbsPath, SlotName, SlotRef, WareId};
use crate::util::hash::{Hashable, SetupHash};

/// Bind, run and collect one operation.
///
/// A nonzero exit code is not an error here; it is reported in the record. Results for
/// paths that are not outputs of `op` are rejected.
pub async fn run_operation(
  op: &Operation,
  scope: &BTreeMap<SlotRef, WareId>,
  config: &ExecuteConfig,
  executor: &dyn Executor,
  monitor: &Monitor,
) -> Result<OperationRecord, RunError> {
  let formula = Formula::bind(op, scope, &config.engine)?;
  let context = FormulaContext::build(
    &formula,
    &config.sourcing,
    &config.staging,
    &config.engine.default_input_filter,
  );
  let formula_id = formula.setup_hash().map_err(RunError::Hash)?;
  debug!(formula = %formula_id, "running formula");

  let mut run = executor.run(&formula, &context, monitor).await?;
  if run.formula_id == SetupHash::default() {
    run.formula_id = formula_id;
  } else if run.formula_id != formula_id {
    return Err(RunError::FormulaMismatch {
      expected: formula_id,
      actual: run.formula_id,
    });
  }

  let slots_by_path: BTreeMap<&AbsPath, &SlotName> = op.outputs.iter().map(|(slot, path)| (path, slot)).collect();
  let mut results = BTreeMap::new();
  for (path, ware) in &run.results {
    let slot = slots_by_path
      .get(path)
      .ok_or_else(|| RunError::UnexpectedResult { path: path.clone() })?;
    results.insert((*slot).clone(), ware.clone());
  }

  if run.exit_code != 0 {
    warn!(formula = %run.formula_id, exit_code = run.exit_code, "contained process exited nonzero");
  }
  info!(formula = %run.formula_id, results = results.len(), "operation complete");
  Ok(OperationRecord { run, results })
}
