//! Pipeline stages.
//!
//! - validate.rs: catalogue and size checks
//! - run.rs: orchestration, judging and response assembly
//! - persist.rs: storing a pass and everything that follows from it

pub(crate) mod persist;
pub(crate) mod run;
pub(crate) mod validate;
