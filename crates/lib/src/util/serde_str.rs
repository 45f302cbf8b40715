//! Serialize values through their canonical string form.
//!
//! References and filters have exactly one textual encoding, and that encoding is what
//! goes on the wire and into hashes. Types opt in with `string_serde!(Type)`, which
//! requires `Display` and `FromStr` (with a displayable error).

macro_rules! string_serde {
  ($ty:ty) => {
    impl serde::Serialize for $ty {
      fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
      }
    }

    impl<'de> serde::Deserialize<'de> for $ty {
      fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
      }
    }
  };
}

pub(crate) use string_serde;
