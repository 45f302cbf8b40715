//! Deterministic execution order for module steps.
//!
//! # Algorithm Overview
//!
//! 1. Check the module's exports point at its own imports or step outputs
//! 2. Visit every step in ascending name order
//! 3. For each step, validate and visit its dependencies in ascending `(step, slot)` order
//! 4. Append a step once all its dependencies are appended (post-order DFS)
//!
//! A step's dependencies are its input slot refs when it is an operation, and the
//! `Parent` imports of the nested module when it is a module. A dependency on a step
//! still on the DFS stack is a cycle.

use std::collections::{BTreeSet, HashSet};

use thiserror::Error;
use tracing::{debug, trace};

use super::types::{Module, StepUnion};
use crate::refs::{ImportRef, ItemName, SlotName, SlotRef, StepName, SubmoduleRef, SubmoduleStepRef};

/// Errors that can occur while ordering a module.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
  /// A dependency points back at a step still being visited.
  #[error("not a dag: loop detected at '{step}'")]
  Cycle { step: StepName },

  /// A dependency names an import the module does not have.
  #[error(
    "step '{step}' has an invalid reference to '{reference}': '{}' is not the name of an import in this module",
    .reference.slot_name
  )]
  DanglingImport { step: StepName, reference: SlotRef },

  /// A dependency names a step the module does not have.
  #[error(
    "step '{step}' has an invalid reference to '{reference}': '{}' is not the name of a step in this module",
    .reference.step_name
  )]
  DanglingStep { step: StepName, reference: SlotRef },

  /// A dependency names a step that exists but declares no such output.
  #[error(
    "step '{step}' has an invalid reference to '{reference}': step '{}' has no output named '{}'",
    .reference.step_name,
    .reference.slot_name
  )]
  MissingOutput { step: StepName, reference: SlotRef },

  /// An export points at something outside the module.
  #[error("export '{item}' has an invalid reference to '{reference}': not an import or step output of this module")]
  DanglingExport { item: ItemName, reference: SlotRef },

  /// A nested module pulls content in by ingest.
  #[error("submodule '{step}' imports '{slot}' by ingest; ingest imports are only allowed in the top module")]
  IngestInSubmodule { step: StepName, slot: SlotName },

  /// The top module has no parent to import from.
  #[error("import '{slot}' refers to a parent module, but this is the top module")]
  ParentInTopModule { slot: SlotName },

  /// An error inside a nested module.
  #[error("in submodule '{step}': {source}")]
  Submodule {
    step: StepName,
    #[source]
    source: Box<OrderError>,
  },
}

/// Order the steps of one module so every step comes after the steps it depends on.
///
/// Unrelated steps are ordered lexically, so identical modules always produce identical
/// orders. Nested modules appear as single steps; see [`order_steps_deep`] to flatten them.
pub fn order_steps(module: &Module) -> Result<Vec<StepName>, OrderError> {
  check_exports(module)?;

  let mut todo: BTreeSet<&str> = module.steps.keys().map(String::as_str).collect();
  let mut result = Vec::with_capacity(module.steps.len());

  for (name, step) in &module.steps {
    // Cycle markers are scoped to one top-level visit.
    let mut in_stack = HashSet::new();
    topo_visit(module, name, step, &mut todo, &mut in_stack, &mut result)?;
  }

  debug!(steps = result.len(), "ordered module steps");
  Ok(result)
}

/// Order every operation in a module tree, addressed from the top module.
///
/// Each nested module's own order is spliced in where the module step would run, with
/// its step refs contextualized by the module step's name.
pub fn order_steps_deep(module: &Module) -> Result<Vec<SubmoduleStepRef>, OrderError> {
  if let Some(slot) = module
    .imports
    .iter()
    .find_map(|(slot, import)| matches!(import, ImportRef::Parent(_)).then_some(slot))
  {
    return Err(OrderError::ParentInTopModule { slot: slot.clone() });
  }
  order_deep(module)
}

fn order_deep(module: &Module) -> Result<Vec<SubmoduleStepRef>, OrderError> {
  let mut result = Vec::new();
  for name in order_steps(module)? {
    match module.steps.get(&name) {
      Some(StepUnion::Module(submodule)) => {
        let inner = order_deep(submodule).map_err(|e| OrderError::Submodule {
          step: name.clone(),
          source: Box::new(e),
        })?;
        result.extend(inner.iter().map(|r| r.contextualize(&name)));
      }
      Some(StepUnion::Operation(_)) => result.push(SubmoduleStepRef::new(SubmoduleRef::root(), name)),
      None => {}
    }
  }
  Ok(result)
}

/// DFS visit for topological sort.
fn topo_visit<'a>(
  module: &'a Module,
  name: &'a str,
  step: &'a StepUnion,
  todo: &mut BTreeSet<&'a str>,
  in_stack: &mut HashSet<&'a str>,
  result: &mut Vec<StepName>,
) -> Result<(), OrderError> {
  if !todo.contains(name) {
    return Ok(());
  }
  if !in_stack.insert(name) {
    return Err(OrderError::Cycle { step: name.to_string() });
  }
  trace!(step = name, "visiting step");

  for dep in dependencies(name, step)? {
    if dep.is_import() {
      if !module.imports.contains_key(&dep.slot_name) {
        return Err(OrderError::DanglingImport {
          step: name.to_string(),
          reference: dep.clone(),
        });
      }
      continue;
    }
    let Some((dep_name, dep_step)) = module.steps.get_key_value(&dep.step_name) else {
      return Err(OrderError::DanglingStep {
        step: name.to_string(),
        reference: dep.clone(),
      });
    };
    if !dep_step.has_output(&dep.slot_name) {
      return Err(OrderError::MissingOutput {
        step: name.to_string(),
        reference: dep.clone(),
      });
    }
    topo_visit(module, dep_name, dep_step, todo, in_stack, result)?;
  }

  todo.remove(name);
  result.push(name.to_string());
  Ok(())
}

/// The slot refs a step depends on, in ascending `(step, slot)` order.
fn dependencies<'a>(name: &str, step: &'a StepUnion) -> Result<Vec<&'a SlotRef>, OrderError> {
  let deps: BTreeSet<&SlotRef> = match step {
    StepUnion::Operation(op) => op.inputs.keys().collect(),
    StepUnion::Module(submodule) => {
      let mut deps = BTreeSet::new();
      for (slot, import) in &submodule.imports {
        match import {
          ImportRef::Parent(slot_ref) => {
            deps.insert(slot_ref);
          }
          ImportRef::Catalog(_) => {}
          ImportRef::Ingest { .. } => {
            return Err(OrderError::IngestInSubmodule {
              step: name.to_string(),
              slot: slot.clone(),
            });
          }
        }
      }
      deps
    }
  };
  Ok(deps.into_iter().collect())
}

fn check_exports(module: &Module) -> Result<(), OrderError> {
  for (item, reference) in &module.exports {
    let valid = if reference.is_import() {
      module.imports.contains_key(&reference.slot_name)
    } else {
      module
        .steps
        .get(&reference.step_name)
        .is_some_and(|step| step.has_output(&reference.slot_name))
    };
    if !valid {
      return Err(OrderError::DanglingExport {
        item: item.clone(),
        reference: reference.clone(),
      });
    }
  }
  Ok(())
}
