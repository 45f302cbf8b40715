//! Module name validation.
//!
//! A module name resembles a DNS-1123 domain followed by optional `/`-separated path
//! segments, so that mapping names onto filesystem paths is always reasonable:
//!
//! ```text
//! [[sub.]domain.]tld[/path[/morepath...]]
//! ```

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

const SUBDOMAIN_MAX_LEN: usize = 253;
const LABEL_MAX_LEN: usize = 63;
const SEGMENT_MAX_LEN: usize = 63;

/// DNS-1123 subdomain: dot-separated labels.
static SUBDOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$").expect("subdomain pattern compiles")
});

static PATH_SEGMENT_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9.]*[a-z0-9])?$").expect("path segment pattern compiles"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleNameError {
  #[error("a module name cannot be an empty string")]
  Empty,

  #[error("a {part} must be no more than {max} characters")]
  TooLong { part: &'static str, max: usize },

  #[error("a {part} must consist of lower case alphanumeric characters or {allowed}, and must start and end with an alphanumeric character")]
  Malformed { part: &'static str, allowed: &'static str },
}

/// Check that `name` is a valid module name.
pub fn validate_module_name(name: &str) -> Result<(), ModuleNameError> {
  if name.is_empty() {
    return Err(ModuleNameError::Empty);
  }
  let mut hunks = name.split('/');
  let domain = hunks.next().unwrap_or_default();
  validate_subdomain(domain)?;
  hunks.try_for_each(validate_path_segment)
}

fn validate_subdomain(domain: &str) -> Result<(), ModuleNameError> {
  const PART: &str = "module name domain";
  if domain.len() > SUBDOMAIN_MAX_LEN {
    return Err(ModuleNameError::TooLong {
      part: PART,
      max: SUBDOMAIN_MAX_LEN,
    });
  }
  if domain.split('.').any(|label| label.len() > LABEL_MAX_LEN) {
    return Err(ModuleNameError::TooLong {
      part: "module name domain label",
      max: LABEL_MAX_LEN,
    });
  }
  if !SUBDOMAIN_RE.is_match(domain) {
    return Err(ModuleNameError::Malformed {
      part: PART,
      allowed: "'-' or '.'",
    });
  }
  Ok(())
}

fn validate_path_segment(segment: &str) -> Result<(), ModuleNameError> {
  const PART: &str = "module name path segment";
  if segment.len() > SEGMENT_MAX_LEN {
    return Err(ModuleNameError::TooLong {
      part: PART,
      max: SEGMENT_MAX_LEN,
    });
  }
  if !PATH_SEGMENT_RE.is_match(segment) {
    return Err(ModuleNameError::Malformed {
      part: PART,
      allowed: "'-' or '.'",
    });
  }
  Ok(())
}
