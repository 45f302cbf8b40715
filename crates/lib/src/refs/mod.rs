//! Identifiers and their canonical string encodings.
//!
//! Every reference in a module graph is a small immutable value with exactly one
//! textual form:
//! - [`WareId`]: `type:hash`, `type:-` when the hash is empty, `""` when zero
//! - [`SlotRef`]: `slot` for module imports, `step.slot` for sibling outputs
//! - [`SubmoduleRef`]: dot-joined path of step names, `""` for "this module"
//! - [`ItemRef`]: `module:release:item`
//! - [`ImportRef`]: `catalog:...`, `parent:...` or `ingest:kind:args`
//!
//! Parsing splits on the first delimiter and is total. The zero value of every
//! reference formats to `""` and `""` parses back to the zero value.

mod import;
mod item;
mod slot;
mod submodule;
mod ware;

pub use import::*;
pub use item::*;
pub use slot::*;
pub use submodule::*;
pub use ware::*;

use thiserror::Error;

/// Opaque name of a pack format, such as `tar` or `git`.
pub type PackType = String;

/// Name of an import slot or a step output, unique within one module.
pub type SlotName = String;

/// Name of a step, unique within one module.
pub type StepName = String;

/// Name of a module in a catalog. See [`crate::catalog::validate_module_name`].
pub type ModuleName = String;

/// Name of a release within a module's lineage.
pub type ReleaseName = String;

/// Name of an item within a release, or of a module export.
pub type ItemName = String;

/// Absolute path inside an execution sandbox.
pub type AbsPath = String;

/// Error parsing a reference from its string form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
  #[error("invalid ware id {input:?}: {reason}")]
  WareId { input: String, reason: &'static str },

  #[error("invalid slot ref {input:?}: {reason}")]
  SlotRef { input: String, reason: &'static str },

  #[error("invalid submodule ref {input:?}: {reason}")]
  SubmoduleRef { input: String, reason: &'static str },

  #[error("invalid item ref {input:?}: no more than two colons may appear")]
  ItemRef { input: String },

  #[error("invalid import ref {input:?}: {reason}")]
  ImportRef { input: String, reason: &'static str },
}
