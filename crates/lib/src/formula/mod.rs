//! Formulas: operations with every input bound to a concrete ware.
//!
//! This module provides:
//! - [`Formula`] and its action, output and context types
//! - [`Formula::bind`]: project an [`Operation`](crate::module::Operation) and a scope of
//!   resolved wares onto paths
//! - [`Formula::apply`]: layer one formula over another
//! - [`FormulaContext::build`]: fetch and save locations, kept outside the hash
//!
//! A formula's identity is its [`setup_hash`](crate::util::hash::Hashable::setup_hash):
//! base58 of SHA-384 over the canonical JSON of inputs, action and outputs.

mod bind;
mod merge;
mod types;

pub use bind::*;
pub use types::*;

#[cfg(test)]
mod tests {
  use super::*;
  use crate::filter::PackFilter;
  use crate::refs::WareId;
  use crate::util::hash::Hashable;

  fn formula() -> Formula {
    let mut f = Formula {
      action: FormulaAction::exec(["/bin/echo", "hello"]),
      ..Default::default()
    };
    f.inputs.insert("/".into(), WareId::new("tar", "6q7G4hWr283FpTa5Lf8heVqw9t97b5VoMU6AGszuBYAz9EzQdeHVFAou7c4W9vFcQ6"));
    f.outputs.insert("/out".into(), OutputSpec::new("tar", PackFilter::FLATTEN));
    f
  }

  #[test]
  fn canonical_json_sorts_and_skips_empty_fields() {
    let json = String::from_utf8(formula().canonical_bytes().unwrap()).unwrap();
    assert_eq!(
      json,
      concat!(
        r#"{"inputs":{"/":"tar:6q7G4hWr283FpTa5Lf8heVqw9t97b5VoMU6AGszuBYAz9EzQdeHVFAou7c4W9vFcQ6"},"#,
        r#""action":{"exec":["/bin/echo","hello"]},"#,
        r#""outputs":{"/out":{"packtype":"tar","filter":"uid=1000,gid=1000,mtime=@1262304000,sticky=keep,setid=keep,dev=keep"}}}"#
      )
    );
  }

  #[test]
  fn hash_ignores_construction_order() {
    let mut a = Formula::default();
    a.inputs.insert("/a".into(), WareId::new("tar", "1"));
    a.inputs.insert("/b".into(), WareId::new("tar", "2"));
    let mut b = Formula::default();
    b.inputs.insert("/b".into(), WareId::new("tar", "2"));
    b.inputs.insert("/a".into(), WareId::new("tar", "1"));
    assert_eq!(a.setup_hash().unwrap(), b.setup_hash().unwrap());
  }

  #[test]
  fn hash_changes_with_each_part() {
    let original = formula().setup_hash().unwrap();

    let mut input = formula();
    input.inputs.insert("/src".into(), WareId::new("git", "f00f"));
    let mut action = formula();
    action.action.env.insert("LANG".into(), "C".into());
    let mut output = formula();
    output.outputs.get_mut("/out").unwrap().filter = PackFilter::LOSSLESS;

    for changed in [input, action, output] {
      assert_ne!(changed.setup_hash().unwrap(), original);
    }
  }

  #[test]
  fn explicit_routine_policy_differs_from_unset() {
    let mut explicit = formula();
    explicit.action.policy = Some(FormulaPolicy::Routine);
    assert_eq!(explicit.action.effective_policy(), formula().action.effective_policy());
    assert_ne!(explicit.setup_hash().unwrap(), formula().setup_hash().unwrap());
  }

  #[test]
  fn json_round_trip_preserves_hash() {
    let f = formula();
    let json = serde_json::to_string(&f).unwrap();
    let back: Formula = serde_json::from_str(&json).unwrap();
    assert_eq!(back.setup_hash().unwrap(), f.setup_hash().unwrap());
  }
}
