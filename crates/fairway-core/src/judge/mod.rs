//! Judge contract: runs submitted code against a hole's hidden tests.
//!
//! Dropping the future returned by [`Judge::execute`] must cancel the run;
//! that is how client disconnects and the pipeline's outer timeout reach the
//! execution backend.

mod command;

pub use command::CommandJudge;

use crate::model::JudgeResult;
use async_trait::async_trait;

#[async_trait]
pub trait Judge: Send + Sync {
    async fn execute(&self, hole: &str, lang: &str, code: &str) -> anyhow::Result<JudgeResult>;

    fn name(&self) -> &'static str;
}
