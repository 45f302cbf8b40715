//! Per-field value domains for pack and unpack filters.
//!
//! Each enum's `Unspecified` variant is its `Default` and formats as `""`.

use std::fmt;

use chrono::DateTime;

use super::FilterField;

/// Parse `@<unix seconds>` or an RFC3339 date into unix seconds.
fn parse_timestamp(s: &str) -> Option<i64> {
  match s.strip_prefix('@') {
    Some(unix) => unix.parse().ok(),
    None => DateTime::parse_from_rfc3339(s).ok().map(|t| t.timestamp()),
  }
}

/// Pack-side uid or gid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PackId {
  #[default]
  Unspecified,
  Keep,
  Set(u32),
}

impl FilterField for PackId {
  const EXPECTED: &'static str = "'keep' or a non-negative int";

  fn parse_value(s: &str) -> Option<Self> {
    match s {
      "keep" => Some(PackId::Keep),
      _ => s.parse().ok().map(PackId::Set),
    }
  }
}

impl fmt::Display for PackId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PackId::Unspecified => Ok(()),
      PackId::Keep => f.write_str("keep"),
      PackId::Set(id) => write!(f, "{}", id),
    }
  }
}

/// Pack-side mtime, in unix seconds when set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PackMtime {
  #[default]
  Unspecified,
  Keep,
  Set(i64),
}

impl FilterField for PackMtime {
  const EXPECTED: &'static str =
    "either 'keep', a unix timestamp integer beginning with '@', or an RFC3339 date string";

  fn parse_value(s: &str) -> Option<Self> {
    match s {
      "keep" => Some(PackMtime::Keep),
      _ => parse_timestamp(s).map(PackMtime::Set),
    }
  }
}

impl fmt::Display for PackMtime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PackMtime::Unspecified => Ok(()),
      PackMtime::Keep => f.write_str("keep"),
      PackMtime::Set(unix) => write!(f, "@{}", unix),
    }
  }
}

/// Pack-side sticky bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PackSticky {
  #[default]
  Unspecified,
  Keep,
  Ignore,
}

impl FilterField for PackSticky {
  const EXPECTED: &'static str = "'keep' or 'ignore'";

  fn parse_value(s: &str) -> Option<Self> {
    match s {
      "keep" => Some(PackSticky::Keep),
      "ignore" => Some(PackSticky::Ignore),
      _ => None,
    }
  }
}

impl fmt::Display for PackSticky {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PackSticky::Unspecified => Ok(()),
      PackSticky::Keep => f.write_str("keep"),
      PackSticky::Ignore => f.write_str("ignore"),
    }
  }
}

/// Pack-side setid bits or device nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PackSpecial {
  #[default]
  Unspecified,
  Keep,
  Ignore,
  Reject,
}

impl FilterField for PackSpecial {
  const EXPECTED: &'static str = "'keep', 'ignore', or 'reject'";

  fn parse_value(s: &str) -> Option<Self> {
    match s {
      "keep" => Some(PackSpecial::Keep),
      "ignore" => Some(PackSpecial::Ignore),
      "reject" => Some(PackSpecial::Reject),
      _ => None,
    }
  }
}

impl fmt::Display for PackSpecial {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PackSpecial::Unspecified => Ok(()),
      PackSpecial::Keep => f.write_str("keep"),
      PackSpecial::Ignore => f.write_str("ignore"),
      PackSpecial::Reject => f.write_str("reject"),
    }
  }
}

/// Unpack-side uid or gid. `Mine` resolves to the current identity at unpack time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnpackId {
  #[default]
  Unspecified,
  Follow,
  Mine,
  Set(u32),
}

impl FilterField for UnpackId {
  const EXPECTED: &'static str = "'follow', 'mine', or a non-negative int";

  fn parse_value(s: &str) -> Option<Self> {
    match s {
      "follow" => Some(UnpackId::Follow),
      "mine" => Some(UnpackId::Mine),
      _ => s.parse().ok().map(UnpackId::Set),
    }
  }
}

impl fmt::Display for UnpackId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      UnpackId::Unspecified => Ok(()),
      UnpackId::Follow => f.write_str("follow"),
      UnpackId::Mine => f.write_str("mine"),
      UnpackId::Set(id) => write!(f, "{}", id),
    }
  }
}

/// Unpack-side mtime. `Now` resolves to the clock at unpack time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnpackMtime {
  #[default]
  Unspecified,
  Follow,
  Now,
  Set(i64),
}

impl FilterField for UnpackMtime {
  const EXPECTED: &'static str =
    "either 'follow', 'now', a unix timestamp integer beginning with '@', or an RFC3339 date string";

  fn parse_value(s: &str) -> Option<Self> {
    match s {
      "follow" => Some(UnpackMtime::Follow),
      "now" => Some(UnpackMtime::Now),
      _ => parse_timestamp(s).map(UnpackMtime::Set),
    }
  }
}

impl fmt::Display for UnpackMtime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      UnpackMtime::Unspecified => Ok(()),
      UnpackMtime::Follow => f.write_str("follow"),
      UnpackMtime::Now => f.write_str("now"),
      UnpackMtime::Set(unix) => write!(f, "@{}", unix),
    }
  }
}

/// Unpack-side sticky bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnpackSticky {
  #[default]
  Unspecified,
  Follow,
  Ignore,
}

impl FilterField for UnpackSticky {
  const EXPECTED: &'static str = "'follow' or 'ignore'";

  fn parse_value(s: &str) -> Option<Self> {
    match s {
      "follow" => Some(UnpackSticky::Follow),
      "ignore" => Some(UnpackSticky::Ignore),
      _ => None,
    }
  }
}

impl fmt::Display for UnpackSticky {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      UnpackSticky::Unspecified => Ok(()),
      UnpackSticky::Follow => f.write_str("follow"),
      UnpackSticky::Ignore => f.write_str("ignore"),
    }
  }
}

/// Unpack-side setid bits or device nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnpackSpecial {
  #[default]
  Unspecified,
  Follow,
  Ignore,
  Reject,
}

impl FilterField for UnpackSpecial {
  const EXPECTED: &'static str = "'follow', 'ignore', or 'reject'";

  fn parse_value(s: &str) -> Option<Self> {
    match s {
      "follow" => Some(UnpackSpecial::Follow),
      "ignore" => Some(UnpackSpecial::Ignore),
      "reject" => Some(UnpackSpecial::Reject),
      _ => None,
    }
  }
}

impl fmt::Display for UnpackSpecial {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      UnpackSpecial::Unspecified => Ok(()),
      UnpackSpecial::Follow => f.write_str("follow"),
      UnpackSpecial::Ignore => f.write_str("ignore"),
      UnpackSpecial::Reject => f.write_str("reject"),
    }
  }
}
