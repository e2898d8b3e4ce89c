//! Process exit codes. Scripts rely on these.

pub const SUCCESS: i32 = 0;
pub const REJECTED: i32 = 1; // Unknown hole/lang or code too large
pub const INTERNAL_ERROR: i32 = 2; // Config, store or serialization failure
