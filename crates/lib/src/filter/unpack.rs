use std::fmt;
use std::str::FromStr;

use super::{
  FilterError, FilterField, UnpackId, UnpackMtime, UnpackSpecial, UnpackSticky, join_fields, pairs, set_field,
  specified,
};
use crate::util::serde_str::string_serde;

/// How recorded metadata is honored when a ware is unpacked onto a filesystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UnpackFilter {
  pub uid: UnpackId,
  pub gid: UnpackId,
  pub mtime: UnpackMtime,
  pub sticky: UnpackSticky,
  pub setid: UnpackSpecial,
  pub dev: UnpackSpecial,
}

impl UnpackFilter {
  /// Follow every recorded attribute, including device nodes and setid bits.
  pub const LOSSLESS: UnpackFilter = UnpackFilter {
    uid: UnpackId::Follow,
    gid: UnpackId::Follow,
    mtime: UnpackMtime::Follow,
    sticky: UnpackSticky::Follow,
    setid: UnpackSpecial::Follow,
    dev: UnpackSpecial::Follow,
  };

  /// Follow everything, but halt on device nodes and setid bits.
  pub const CONSERVATIVE: UnpackFilter = UnpackFilter {
    uid: UnpackId::Follow,
    gid: UnpackId::Follow,
    mtime: UnpackMtime::Follow,
    sticky: UnpackSticky::Follow,
    setid: UnpackSpecial::Reject,
    dev: UnpackSpecial::Reject,
  };

  /// Own everything as the current user so no privileges are needed.
  pub const LOW_PRIV: UnpackFilter = UnpackFilter {
    uid: UnpackId::Mine,
    gid: UnpackId::Mine,
    mtime: UnpackMtime::Follow,
    sticky: UnpackSticky::Follow,
    setid: UnpackSpecial::Reject,
    dev: UnpackSpecial::Reject,
  };

  /// Look up a preset by name: `lossless`, `conservative` or `lowpriv`.
  pub fn preset(name: &str) -> Result<Self, FilterError> {
    match name {
      "lossless" => Ok(Self::LOSSLESS),
      "conservative" => Ok(Self::CONSERVATIVE),
      "lowpriv" => Ok(Self::LOW_PRIV),
      _ => Err(FilterError::UnknownPreset {
        kind: "unpack",
        name: name.to_string(),
      }),
    }
  }

  /// Layer `overrides` on top of `self`: each specified field of `overrides` wins.
  pub fn apply(&self, overrides: &UnpackFilter) -> UnpackFilter {
    UnpackFilter {
      uid: overrides.uid.or(self.uid),
      gid: overrides.gid.or(self.gid),
      mtime: overrides.mtime.or(self.mtime),
      sticky: overrides.sticky.or(self.sticky),
      setid: overrides.setid.or(self.setid),
      dev: overrides.dev.or(self.dev),
    }
  }

  pub fn is_complete(&self) -> bool {
    self.uid.is_specified()
      && self.gid.is_specified()
      && self.mtime.is_specified()
      && self.sticky.is_specified()
      && self.setid.is_specified()
      && self.dev.is_specified()
  }

  /// Whether unpacking produces metadata different from what the ware records.
  ///
  /// Rejecting setid bits or devices halts instead of altering, so it does not count.
  pub fn is_altering(&self) -> bool {
    let passes = |s: UnpackSpecial| matches!(s, UnpackSpecial::Follow | UnpackSpecial::Reject);
    self.uid != UnpackId::Follow
      || self.gid != UnpackId::Follow
      || self.mtime != UnpackMtime::Follow
      || self.sticky != UnpackSticky::Follow
      || !passes(self.setid)
      || !passes(self.dev)
  }
}

impl fmt::Display for UnpackFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&join_fields([
      specified(self.uid),
      specified(self.gid),
      specified(self.mtime),
      specified(self.sticky),
      specified(self.setid),
      specified(self.dev),
    ]))
  }
}

impl FromStr for UnpackFilter {
  type Err = FilterError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut filter = UnpackFilter::default();
    for pair in pairs(s) {
      let (key, value) = pair?;
      match key {
        "uid" => set_field(&mut filter.uid, "uid", value)?,
        "gid" => set_field(&mut filter.gid, "gid", value)?,
        "mtime" => set_field(&mut filter.mtime, "mtime", value)?,
        "sticky" => set_field(&mut filter.sticky, "sticky", value)?,
        "setid" => set_field(&mut filter.setid, "setid", value)?,
        "dev" => set_field(&mut filter.dev, "dev", value)?,
        _ => return Err(FilterError::UnknownOption { key: key.to_string() }),
      }
    }
    Ok(filter)
  }
}

string_serde!(UnpackFilter);

#[cfg(test)]
mod tests {
  use super::*;

  const LOW_PRIV_STR: &str = "uid=mine,gid=mine,mtime=follow,sticky=follow,setid=reject,dev=reject";

  #[test]
  fn low_priv_formats_canonically() {
    let f = UnpackFilter {
      uid: UnpackId::Mine,
      gid: UnpackId::Mine,
      mtime: UnpackMtime::Follow,
      sticky: UnpackSticky::Follow,
      setid: UnpackSpecial::Reject,
      dev: UnpackSpecial::Reject,
    };
    assert_eq!(f, UnpackFilter::LOW_PRIV);
    assert_eq!(f.to_string(), LOW_PRIV_STR);
    assert_eq!(LOW_PRIV_STR.parse::<UnpackFilter>().unwrap(), f);
  }

  #[test]
  fn context_values_parse() {
    let f: UnpackFilter = "mtime=now,uid=mine".parse().unwrap();
    assert_eq!(f.mtime, UnpackMtime::Now);
    assert_eq!(f.uid, UnpackId::Mine);
  }

  #[test]
  fn explicit_values_parse() {
    let f: UnpackFilter = "uid=0,gid=0,mtime=@0".parse().unwrap();
    assert_eq!(f.uid, UnpackId::Set(0));
    assert_eq!(f.mtime, UnpackMtime::Set(0));
    assert_eq!(f.to_string(), "uid=0,gid=0,mtime=@0");
  }

  #[test]
  fn lossless_is_not_altering() {
    assert!(!UnpackFilter::LOSSLESS.is_altering());
  }

  #[test]
  fn rejecting_specials_is_not_altering() {
    assert!(!UnpackFilter::CONSERVATIVE.is_altering());
  }

  #[test]
  fn low_priv_is_altering() {
    assert!(UnpackFilter::LOW_PRIV.is_altering());
  }

  #[test]
  fn ignoring_specials_is_altering() {
    let f = UnpackFilter::LOSSLESS.apply(&"dev=ignore".parse().unwrap());
    assert!(f.is_altering());
  }

  #[test]
  fn presets_are_complete() {
    for name in ["lossless", "conservative", "lowpriv"] {
      assert!(UnpackFilter::preset(name).unwrap().is_complete(), "{name}");
    }
  }

  #[test]
  fn duplicate_option_is_rejected() {
    let err = "uid=mine,uid=follow".parse::<UnpackFilter>().unwrap_err();
    assert_eq!(err, FilterError::Duplicate { key: "uid" });
  }
}
