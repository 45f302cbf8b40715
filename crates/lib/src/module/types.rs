use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::formula::FormulaAction;
use crate::refs::{AbsPath, ImportRef, ItemName, SlotName, SlotRef, StepName};

/// A composable unit of steps wired by slot references.
///
/// Modules nest: a step may itself be a module, whose `Parent` imports refer to slots
/// of the module containing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub imports: BTreeMap<SlotName, ImportRef>,
  #[serde(default)]
  pub steps: BTreeMap<StepName, StepUnion>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub exports: BTreeMap<ItemName, SlotRef>,
}

impl Module {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_import(mut self, slot: impl Into<SlotName>, import: ImportRef) -> Self {
    self.imports.insert(slot.into(), import);
    self
  }

  pub fn with_step(mut self, name: impl Into<StepName>, step: impl Into<StepUnion>) -> Self {
    self.steps.insert(name.into(), step.into());
    self
  }

  pub fn with_export(mut self, item: impl Into<ItemName>, slot_ref: SlotRef) -> Self {
    self.exports.insert(item.into(), slot_ref);
    self
  }
}

/// One step of a module: an operation, or a nested module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepUnion {
  Operation(Operation),
  Module(Module),
}

impl StepUnion {
  /// Whether other steps can reference `slot` on this step.
  pub fn has_output(&self, slot: &str) -> bool {
    match self {
      StepUnion::Operation(op) => op.outputs.contains_key(slot),
      StepUnion::Module(module) => module.exports.contains_key(slot),
    }
  }
}

impl From<Operation> for StepUnion {
  fn from(op: Operation) -> Self {
    StepUnion::Operation(op)
  }
}

impl From<Module> for StepUnion {
  fn from(module: Module) -> Self {
    StepUnion::Module(module)
  }
}

/// A containerizable computation with slot-wired inputs and outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub inputs: BTreeMap<SlotRef, AbsPath>,
  #[serde(default)]
  pub action: FormulaAction,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub outputs: BTreeMap<SlotName, AbsPath>,
}

impl Operation {
  pub fn new(action: FormulaAction) -> Self {
    Self {
      action,
      ..Default::default()
    }
  }

  pub fn with_input(mut self, slot_ref: SlotRef, path: impl Into<AbsPath>) -> Self {
    self.inputs.insert(slot_ref, path.into());
    self
  }

  pub fn with_output(mut self, slot: impl Into<SlotName>, path: impl Into<AbsPath>) -> Self {
    self.outputs.insert(slot.into(), path.into());
    self
  }
}
