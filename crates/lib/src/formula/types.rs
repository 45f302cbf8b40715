//! Formula data types.
//!
//! Every map is a `BTreeMap` and every optional field is skipped when empty, so the JSON
//! form of a [`Formula`] depends only on its contents. That JSON is what
//! [`Hashable::setup_hash`](crate::util::hash::Hashable::setup_hash) digests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::filter::{PackFilter, UnpackFilter};
use crate::refs::{AbsPath, PackType, SlotName, WareId};
use crate::util::hash::{Hashable, SetupHash};
use crate::warehouse::WarehouseLocation;

/// A fully bound unit of work: concrete input wares, an action, and output paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
  #[serde(default)]
  pub inputs: BTreeMap<AbsPath, WareId>,
  #[serde(default)]
  pub action: FormulaAction,
  #[serde(default)]
  pub outputs: BTreeMap<AbsPath, OutputSpec>,
}

impl Hashable for Formula {}

/// Privilege level a contained process is started with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormulaPolicy {
  /// Regular-user privileges with most capabilities dropped.
  #[default]
  Routine,
  /// Commonly used root powers, without the dangerous ones.
  Governor,
  /// All capabilities.
  Sysad,
}

/// What to run, and the environment to run it in.
///
/// Empty strings and `None` mean "not set", which matters for [`Formula::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaAction {
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub exec: Vec<String>,

  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub noop: bool,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub policy: Option<FormulaPolicy>,

  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub cwd: AbsPath,

  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub env: BTreeMap<String, String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub userinfo: Option<FormulaUserinfo>,

  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub cradle: String,

  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub hostname: String,
}

impl FormulaAction {
  pub fn exec<I, S>(args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      exec: args.into_iter().map(Into::into).collect(),
      ..Default::default()
    }
  }

  /// The policy in force, defaulting to [`FormulaPolicy::Routine`].
  pub fn effective_policy(&self) -> FormulaPolicy {
    self.policy.unwrap_or_default()
  }
}

/// Identity of the contained process. Each field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaUserinfo {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub uid: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub gid: Option<u32>,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub username: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub homedir: AbsPath,
}

/// How an output path is packed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
  pub packtype: PackType,
  #[serde(default, skip_serializing_if = "is_unspecified")]
  pub filter: PackFilter,
}

fn is_unspecified(filter: &PackFilter) -> bool {
  *filter == PackFilter::default()
}

impl OutputSpec {
  pub fn new(packtype: impl Into<PackType>, filter: PackFilter) -> Self {
    Self {
      packtype: packtype.into(),
      filter,
    }
  }
}

/// Where to fetch inputs from, how to unpack them, and where to save outputs.
///
/// Travels beside a [`Formula`] but is never part of its hash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaContext {
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub fetch_urls: BTreeMap<AbsPath, Vec<WarehouseLocation>>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub save_urls: BTreeMap<AbsPath, WarehouseLocation>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub unpack_filters: BTreeMap<AbsPath, UnpackFilter>,
}

/// What an executor reports after running a formula.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
  pub guid: String,
  #[serde(rename = "formulaID")]
  pub formula_id: SetupHash,
  /// Unix seconds at the start of the run.
  pub time: i64,
  pub exit_code: i32,
  pub results: BTreeMap<AbsPath, WareId>,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub hostname: String,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub metadata: BTreeMap<String, String>,
}

/// A [`RunRecord`] with results keyed by the operation's output slots instead of paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
  pub run: RunRecord,
  pub results: BTreeMap<SlotName, WareId>,
}
