//! Engine defaults for values a module leaves unspecified.
//!
//! Defaults come from [`EngineConfig::default`] or, layered over those, from the
//! environment via [`EngineConfig::from_env`]:
//! - `WAREPLAN_PACK_TYPE`: pack type for outputs
//! - `WAREPLAN_OUTPUT_FILTER`: pack filter overrides, applied over the flatten preset
//! - `WAREPLAN_INPUT_FILTER`: unpack filter overrides, applied over the lossless preset

use thiserror::Error;
use tracing::debug;

use crate::consts::{DEFAULT_PACK_TYPE, ENV_INPUT_FILTER, ENV_OUTPUT_FILTER, ENV_PACK_TYPE};
use crate::filter::{FilterError, PackFilter, UnpackFilter};
use crate::refs::PackType;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid value for {var}")]
  InvalidFilter {
    var: &'static str,
    #[source]
    source: FilterError,
  },

  #[error("invalid value for {var}: pack type must be non-empty and must not contain ':'")]
  InvalidPackType { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
  pub default_pack_type: PackType,
  pub default_output_filter: PackFilter,
  pub default_input_filter: UnpackFilter,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      default_pack_type: DEFAULT_PACK_TYPE.to_string(),
      default_output_filter: PackFilter::FLATTEN,
      default_input_filter: UnpackFilter::LOSSLESS,
    }
  }
}

impl EngineConfig {
  /// Defaults overridden by any `WAREPLAN_*` variables that are set.
  pub fn from_env() -> Result<Self, ConfigError> {
    let mut config = Self::default();

    if let Some(pack_type) = read_var(ENV_PACK_TYPE) {
      if pack_type.is_empty() || pack_type.contains(':') {
        return Err(ConfigError::InvalidPackType { var: ENV_PACK_TYPE });
      }
      config.default_pack_type = pack_type;
    }
    if let Some(raw) = read_var(ENV_OUTPUT_FILTER) {
      let overrides: PackFilter = raw.parse().map_err(|source| ConfigError::InvalidFilter {
        var: ENV_OUTPUT_FILTER,
        source,
      })?;
      config.default_output_filter = config.default_output_filter.apply(&overrides);
    }
    if let Some(raw) = read_var(ENV_INPUT_FILTER) {
      let overrides: UnpackFilter = raw.parse().map_err(|source| ConfigError::InvalidFilter {
        var: ENV_INPUT_FILTER,
        source,
      })?;
      config.default_input_filter = config.default_input_filter.apply(&overrides);
    }

    debug!(
      pack_type = %config.default_pack_type,
      output_filter = %config.default_output_filter,
      input_filter = %config.default_input_filter,
      "loaded engine config"
    );
    Ok(config)
  }
}

fn read_var(name: &str) -> Option<String> {
  std::env::var(name).ok()
}
