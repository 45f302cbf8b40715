use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use super::types::{Formula, FormulaContext, OutputSpec};
use crate::config::EngineConfig;
use crate::filter::UnpackFilter;
use crate::module::Operation;
use crate::refs::{AbsPath, SlotRef, WareId};
use crate::warehouse::{WareSourcing, WareStaging};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
  #[error("cannot provide an input ware for slotref '{slot_ref}': no such ref in scope")]
  Unbound { slot_ref: SlotRef },

  #[error("more than one {kind} is mounted at path '{path}'")]
  PathCollision { kind: &'static str, path: AbsPath },
}

impl Formula {
  /// Bind an operation's inputs to concrete wares.
  ///
  /// `scope` holds the wares visible in the operation's module: its pinned imports, and any
  /// sibling step results the caller has added. Outputs get the configured pack type and
  /// output filter.
  pub fn bind(op: &Operation, scope: &BTreeMap<SlotRef, WareId>, config: &EngineConfig) -> Result<Formula, BindError> {
    let mut formula = Formula {
      action: op.action.clone(),
      ..Default::default()
    };

    for (slot_ref, path) in &op.inputs {
      let ware = scope.get(slot_ref).ok_or_else(|| BindError::Unbound {
        slot_ref: slot_ref.clone(),
      })?;
      if formula.inputs.insert(path.clone(), ware.clone()).is_some() {
        return Err(BindError::PathCollision {
          kind: "input",
          path: path.clone(),
        });
      }
    }

    for path in op.outputs.values() {
      let spec = OutputSpec::new(config.default_pack_type.clone(), config.default_output_filter);
      if formula.outputs.insert(path.clone(), spec).is_some() {
        return Err(BindError::PathCollision {
          kind: "output",
          path: path.clone(),
        });
      }
    }

    debug!(
      inputs = formula.inputs.len(),
      outputs = formula.outputs.len(),
      "bound operation"
    );
    Ok(formula)
  }
}

impl FormulaContext {
  /// Fetch locations and the unpack filter for each input, and save locations for each
  /// output of `formula`.
  ///
  /// Paths with no known location are left out. Every input gets `input_filter`.
  pub fn build(
    formula: &Formula,
    sourcing: &WareSourcing,
    staging: &WareStaging,
    input_filter: &UnpackFilter,
  ) -> FormulaContext {
    let fetch_urls = formula
      .inputs
      .iter()
      .map(|(path, ware)| (path.clone(), sourcing.pivot_to_ware(ware)))
      .filter(|(_, locations)| !locations.is_empty())
      .collect();
    let save_urls = formula
      .outputs
      .iter()
      .filter_map(|(path, spec)| {
        staging
          .for_pack_type(&spec.packtype)
          .map(|location| (path.clone(), location.clone()))
      })
      .collect();
    let unpack_filters = formula.inputs.keys().map(|path| (path.clone(), *input_filter)).collect();
    FormulaContext {
      fetch_urls,
      save_urls,
      unpack_filters,
    }
  }
}
