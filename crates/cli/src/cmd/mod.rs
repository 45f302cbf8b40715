mod filter;
mod hash;
mod order;

pub use filter::cmd_filter;
pub use hash::cmd_hash;
pub use order::cmd_order;
