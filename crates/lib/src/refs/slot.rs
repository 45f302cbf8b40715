use std::fmt;
use std::str::FromStr;

use super::{ParseError, SlotName, StepName};
use crate::util::serde_str::string_serde;

/// Reference to a slot within one module.
///
/// An empty `step_name` refers to one of the module's imports; otherwise the ref names
/// an output of a sibling step. Ordering is by step name, then slot name.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotRef {
  pub step_name: StepName,
  pub slot_name: SlotName,
}

impl SlotRef {
  pub fn new(step_name: impl Into<StepName>, slot_name: impl Into<SlotName>) -> Self {
    Self {
      step_name: step_name.into(),
      slot_name: slot_name.into(),
    }
  }

  /// A reference to one of the module's own imports.
  pub fn import(slot_name: impl Into<SlotName>) -> Self {
    Self::new("", slot_name)
  }

  pub fn is_import(&self) -> bool {
    self.step_name.is_empty()
  }
}

impl fmt::Display for SlotRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.step_name.is_empty() {
      write!(f, "{}", self.slot_name)
    } else {
      write!(f, "{}.{}", self.step_name, self.slot_name)
    }
  }
}

impl FromStr for SlotRef {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.split_once('.') {
      None => Ok(Self::import(s)),
      Some((_, rest)) if rest.contains('.') => Err(ParseError::SlotRef {
        input: s.to_string(),
        reason: "slot references can be of form 'x' or 'x.y'",
      }),
      Some((step, _)) if step.is_empty() => Err(ParseError::SlotRef {
        input: s.to_string(),
        reason: "step name must not be empty",
      }),
      Some((step, slot)) => Ok(Self::new(step, slot)),
    }
  }
}

string_serde!(SlotRef);
