use std::fmt;
use std::str::FromStr;

use super::{
  DEFAULT_MTIME, FilterError, FilterField, PackId, PackMtime, PackSpecial, PackSticky, join_fields, pairs, set_field,
  specified,
};
use crate::util::serde_str::string_serde;

/// How metadata is recorded when a fileset is packed into a ware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PackFilter {
  pub uid: PackId,
  pub gid: PackId,
  pub mtime: PackMtime,
  pub sticky: PackSticky,
  pub setid: PackSpecial,
  pub dev: PackSpecial,
}

impl PackFilter {
  /// Record everything as found.
  pub const LOSSLESS: PackFilter = PackFilter {
    uid: PackId::Keep,
    gid: PackId::Keep,
    mtime: PackMtime::Keep,
    sticky: PackSticky::Keep,
    setid: PackSpecial::Keep,
    dev: PackSpecial::Keep,
  };

  /// Normalize ownership and timestamps. The default for operation outputs.
  pub const FLATTEN: PackFilter = PackFilter {
    uid: PackId::Set(1000),
    gid: PackId::Set(1000),
    mtime: PackMtime::Set(DEFAULT_MTIME),
    sticky: PackSticky::Keep,
    setid: PackSpecial::Keep,
    dev: PackSpecial::Keep,
  };

  /// Like [`FLATTEN`](Self::FLATTEN), but refuses anything that needs privileges to unpack.
  pub const CONSERVATIVE: PackFilter = PackFilter {
    uid: PackId::Set(1000),
    gid: PackId::Set(1000),
    mtime: PackMtime::Set(DEFAULT_MTIME),
    sticky: PackSticky::Keep,
    setid: PackSpecial::Reject,
    dev: PackSpecial::Reject,
  };

  /// Look up a preset by name: `lossless`, `flatten` or `conservative`.
  pub fn preset(name: &str) -> Result<Self, FilterError> {
    match name {
      "lossless" => Ok(Self::LOSSLESS),
      "flatten" => Ok(Self::FLATTEN),
      "conservative" => Ok(Self::CONSERVATIVE),
      _ => Err(FilterError::UnknownPreset {
        kind: "pack",
        name: name.to_string(),
      }),
    }
  }

  /// Layer `overrides` on top of `self`: each specified field of `overrides` wins.
  pub fn apply(&self, overrides: &PackFilter) -> PackFilter {
    PackFilter {
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
}

impl fmt::Display for PackFilter {
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

impl FromStr for PackFilter {
  type Err = FilterError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut filter = PackFilter::default();
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

string_serde!(PackFilter);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lossless_formats_all_keep() {
    assert_eq!(
      PackFilter::LOSSLESS.to_string(),
      "uid=keep,gid=keep,mtime=keep,sticky=keep,setid=keep,dev=keep"
    );
  }

  #[test]
  fn flatten_round_trips() {
    let s = "uid=1000,gid=1000,mtime=@1262304000,sticky=keep,setid=keep,dev=keep";
    assert_eq!(PackFilter::FLATTEN.to_string(), s);
    assert_eq!(s.parse::<PackFilter>().unwrap(), PackFilter::FLATTEN);
  }

  #[test]
  fn partial_filter_omits_unspecified_keys() {
    let f: PackFilter = "sticky=ignore,gid=1000".parse().unwrap();
    assert_eq!(f.gid, PackId::Set(1000));
    assert_eq!(f.sticky, PackSticky::Ignore);
    assert_eq!(f.uid, PackId::Unspecified);
    assert_eq!(f.to_string(), "gid=1000,sticky=ignore");
    assert!(!f.is_complete());
  }

  #[test]
  fn empty_string_is_all_unspecified() {
    let f: PackFilter = "".parse().unwrap();
    assert_eq!(f, PackFilter::default());
    assert_eq!(f.to_string(), "");
  }

  #[test]
  fn presets_are_complete() {
    assert!(PackFilter::LOSSLESS.is_complete());
    assert!(PackFilter::FLATTEN.is_complete());
    assert!(PackFilter::CONSERVATIVE.is_complete());
  }

  #[test]
  fn apply_fills_only_unspecified_fields() {
    let overrides: PackFilter = "uid=0,dev=reject".parse().unwrap();
    let merged = PackFilter::FLATTEN.apply(&overrides);
    assert_eq!(merged.uid, PackId::Set(0));
    assert_eq!(merged.gid, PackId::Set(1000));
    assert_eq!(merged.dev, PackSpecial::Reject);
    assert!(merged.is_complete());
  }

  #[test]
  fn preset_lookup() {
    assert_eq!(PackFilter::preset("conservative").unwrap(), PackFilter::CONSERVATIVE);
    assert!(matches!(
      PackFilter::preset("lowpriv"),
      Err(FilterError::UnknownPreset { kind: "pack", .. })
    ));
  }

  #[test]
  fn invalid_uid_names_the_key() {
    let err = "uid=root".parse::<PackFilter>().unwrap_err();
    assert!(err.to_string().contains("uid must be"));
  }

  #[test]
  fn serializes_as_canonical_string() {
    let json = serde_json::to_string(&PackFilter::CONSERVATIVE).unwrap();
    assert_eq!(
      json,
      "\"uid=1000,gid=1000,mtime=@1262304000,sticky=keep,setid=reject,dev=reject\""
    );
  }
}
