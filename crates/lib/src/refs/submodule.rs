use std::fmt;
use std::str::FromStr;

use super::{ParseError, SlotRef, StepName};
use crate::util::serde_str::string_serde;

/// Dot-joined path of step names addressing a nested module.
///
/// The empty path is "this module". All navigation goes through [`first`](Self::first),
/// [`child`](Self::child), [`contextualize`](Self::contextualize) and
/// [`decontextualize`](Self::decontextualize); nothing else splits the path.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmoduleRef(String);

impl SubmoduleRef {
  /// The path addressing the current module.
  pub fn root() -> Self {
    Self::default()
  }

  pub fn is_root(&self) -> bool {
    self.0.is_empty()
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// The leading step name, or `""` for the root.
  pub fn first(&self) -> &str {
    self.0.split('.').next().unwrap_or_default()
  }

  /// Zoom in: the path to the named step's module below this one.
  pub fn child(&self, name: &str) -> Self {
    if self.is_root() {
      Self(name.to_string())
    } else {
      Self(format!("{}.{}", self.0, name))
    }
  }

  /// Zoom out: the same path as seen from the module containing `parent`.
  pub fn contextualize(&self, parent: &str) -> Self {
    if self.is_root() {
      Self(parent.to_string())
    } else if parent.is_empty() {
      self.clone()
    } else {
      Self(format!("{}.{}", parent, self.0))
    }
  }

  /// Zoom in: strip the leading step name.
  pub fn decontextualize(&self) -> Self {
    match self.0.split_once('.') {
      Some((_, rest)) => Self(rest.to_string()),
      None => Self::root(),
    }
  }
}

impl fmt::Display for SubmoduleRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for SubmoduleRef {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if !s.is_empty() && s.split('.').any(str::is_empty) {
      return Err(ParseError::SubmoduleRef {
        input: s.to_string(),
        reason: "path components must not be empty",
      });
    }
    Ok(Self(s.to_string()))
  }
}

string_serde!(SubmoduleRef);

/// A step anywhere in a module tree, addressed from the top.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmoduleStepRef {
  pub submodule_ref: SubmoduleRef,
  pub step_name: StepName,
}

impl SubmoduleStepRef {
  pub fn new(submodule_ref: SubmoduleRef, step_name: impl Into<StepName>) -> Self {
    Self {
      submodule_ref,
      step_name: step_name.into(),
    }
  }

  pub fn first(&self) -> &str {
    self.submodule_ref.first()
  }

  pub fn contextualize(&self, parent: &str) -> Self {
    Self::new(self.submodule_ref.contextualize(parent), self.step_name.clone())
  }

  pub fn decontextualize(&self) -> Self {
    Self::new(self.submodule_ref.decontextualize(), self.step_name.clone())
  }
}

impl fmt::Display for SubmoduleStepRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.submodule_ref.is_root() {
      f.write_str(&self.step_name)
    } else {
      write!(f, "{}.{}", self.submodule_ref, self.step_name)
    }
  }
}

impl FromStr for SubmoduleStepRef {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.rsplit_once('.') {
      Some((path, step)) => Ok(Self::new(path.parse()?, step)),
      None => Ok(Self::new(SubmoduleRef::root(), s)),
    }
  }
}

string_serde!(SubmoduleStepRef);

/// A slot anywhere in a module tree, addressed from the top.
///
/// Formats as the plain [`SlotRef`] for the root module and as `path:slotref` below it.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmoduleSlotRef {
  pub submodule_ref: SubmoduleRef,
  pub slot_ref: SlotRef,
}

impl SubmoduleSlotRef {
  pub fn new(submodule_ref: SubmoduleRef, slot_ref: SlotRef) -> Self {
    Self { submodule_ref, slot_ref }
  }

  pub fn first(&self) -> &str {
    self.submodule_ref.first()
  }

  pub fn contextualize(&self, parent: &str) -> Self {
    Self::new(self.submodule_ref.contextualize(parent), self.slot_ref.clone())
  }

  pub fn decontextualize(&self) -> Self {
    Self::new(self.submodule_ref.decontextualize(), self.slot_ref.clone())
  }
}

impl fmt::Display for SubmoduleSlotRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.submodule_ref.is_root() {
      write!(f, "{}", self.slot_ref)
    } else {
      write!(f, "{}:{}", self.submodule_ref, self.slot_ref)
    }
  }
}

impl FromStr for SubmoduleSlotRef {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.split_once(':') {
      Some((path, slot)) => Ok(Self::new(path.parse()?, slot.parse()?)),
      None => Ok(Self::new(SubmoduleRef::root(), s.parse()?)),
    }
  }
}

string_serde!(SubmoduleSlotRef);
