pub const APP_NAME: &str = "wareplan";

/// Pack type used for outputs that do not name one.
pub const DEFAULT_PACK_TYPE: &str = "tar";

pub const ENV_PACK_TYPE: &str = "WAREPLAN_PACK_TYPE";
pub const ENV_OUTPUT_FILTER: &str = "WAREPLAN_OUTPUT_FILTER";
pub const ENV_INPUT_FILTER: &str = "WAREPLAN_INPUT_FILTER";
