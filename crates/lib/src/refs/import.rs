use std::fmt;
use std::str::FromStr;

use super::{ItemRef, ParseError, SlotRef};
use crate::util::serde_str::string_serde;

const IMPORT_PREFIX_REASON: &str =
  "valid import refs begin with 'catalog', 'parent', or 'ingest', followed by a colon and additional information";

/// Where a module's import slot gets its ware from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImportRef {
  /// A released item from a module catalog.
  Catalog(ItemRef),
  /// A slot of the enclosing module. Only valid in submodules.
  Parent(SlotRef),
  /// Unaudited content brought in by an ingest tool. Only valid in the top module.
  Ingest { kind: String, args: String },
}

impl ImportRef {
  pub fn catalog(
    module_name: impl Into<String>,
    release_name: impl Into<String>,
    item_name: impl Into<String>,
  ) -> Self {
    ImportRef::Catalog(ItemRef::new(module_name, release_name, item_name))
  }

  pub fn ingest(kind: impl Into<String>, args: impl Into<String>) -> Self {
    ImportRef::Ingest {
      kind: kind.into(),
      args: args.into(),
    }
  }
}

impl fmt::Display for ImportRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ImportRef::Catalog(item) => write!(f, "catalog:{}", item),
      ImportRef::Parent(slot) => write!(f, "parent:{}", slot),
      ImportRef::Ingest { kind, args } => write!(f, "ingest:{}:{}", kind, args),
    }
  }
}

impl FromStr for ImportRef {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let err = |reason| ParseError::ImportRef {
      input: s.to_string(),
      reason,
    };
    let (kind, rest) = s.split_once(':').ok_or_else(|| err(IMPORT_PREFIX_REASON))?;
    match kind {
      "catalog" => Ok(ImportRef::Catalog(rest.parse()?)),
      "parent" => {
        if rest.is_empty() {
          return Err(err("parent imports must name a slot"));
        }
        Ok(ImportRef::Parent(rest.parse()?))
      }
      "ingest" => match rest.split_once(':') {
        Some((tool, args)) if !tool.is_empty() => Ok(ImportRef::ingest(tool, args)),
        _ => Err(err(
          "valid ingest refs begin with 'ingest:thetool', where \"thetool\" names an ingest system (such as \"git\")",
        )),
      },
      _ => Err(err(IMPORT_PREFIX_REASON)),
    }
  }
}

string_serde!(ImportRef);
