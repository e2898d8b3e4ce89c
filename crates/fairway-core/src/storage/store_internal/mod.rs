//! Implementation modules for `storage::sqlite`.
//!
//! - schema.rs: connection setup
//! - record.rs: pass recording and rank snapshots
//! - trophies.rs: grants and listing
//! - aggregate.rs: read-only predicates for trophy rules

pub(crate) mod aggregate;
pub(crate) mod record;
pub(crate) mod schema;
pub(crate) mod trophies;
