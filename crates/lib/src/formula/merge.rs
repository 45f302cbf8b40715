use super::types::{Formula, FormulaAction, FormulaUserinfo};

impl Formula {
  /// Layer `overrides` over this formula.
  ///
  /// Inputs, outputs and environment merge as maps with `overrides` winning per key. Every
  /// other action field is replaced only when `overrides` sets it.
  pub fn apply(&self, overrides: &Formula) -> Formula {
    let mut merged = self.clone();
    merged
      .inputs
      .extend(overrides.inputs.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
      .outputs
      .extend(overrides.outputs.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged.action = self.action.apply(&overrides.action);
    merged
  }
}

impl FormulaAction {
  pub fn apply(&self, overrides: &FormulaAction) -> FormulaAction {
    let pick = |base: &String, over: &String| if over.is_empty() { base.clone() } else { over.clone() };

    let mut env = self.env.clone();
    env.extend(overrides.env.iter().map(|(k, v)| (k.clone(), v.clone())));

    FormulaAction {
      exec: if overrides.exec.is_empty() {
        self.exec.clone()
      } else {
        overrides.exec.clone()
      },
      noop: self.noop || overrides.noop,
      policy: overrides.policy.or(self.policy),
      cwd: pick(&self.cwd, &overrides.cwd),
      env,
      userinfo: match (&self.userinfo, &overrides.userinfo) {
        (Some(base), Some(over)) => Some(base.apply(over)),
        (base, over) => over.clone().or_else(|| base.clone()),
      },
      cradle: pick(&self.cradle, &overrides.cradle),
      hostname: pick(&self.hostname, &overrides.hostname),
    }
  }
}

impl FormulaUserinfo {
  pub fn apply(&self, overrides: &FormulaUserinfo) -> FormulaUserinfo {
    FormulaUserinfo {
      uid: overrides.uid.or(self.uid),
      gid: overrides.gid.or(self.gid),
      username: if overrides.username.is_empty() {
        self.username.clone()
      } else {
        overrides.username.clone()
      },
      homedir: if overrides.homedir.is_empty() {
        self.homedir.clone()
      } else {
        overrides.homedir.clone()
      },
    }
  }
}
