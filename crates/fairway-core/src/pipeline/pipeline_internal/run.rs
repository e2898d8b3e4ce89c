use super::{persist, validate};
use crate::catalog::{HoleKind, BYPASS_LANG};
use crate::diff::unified_diff;
use crate::errors::PipelineError;
use crate::model::{
    Golfer, JudgeResult, RankUpdate, Scoring, SolutionResponse, SubmissionRequest,
};
use crate::pipeline::{SubmissionOutcome, SubmissionPipeline};
use crate::render::render_terminal;
use crate::trophy::{RuleContext, Stage, SubmissionFacts};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

pub(crate) async fn submit_impl(
    p: &SubmissionPipeline,
    now: DateTime<Utc>,
    req: &SubmissionRequest,
    golfer: Option<&Golfer>,
) -> Result<SubmissionOutcome, PipelineError> {
    let kind = match validate::validate_impl(&p.catalog, req) {
        Ok(kind) => kind,
        Err(outcome) => {
            tracing::debug!(
                hole = %req.hole,
                lang = %req.lang,
                status = outcome.status(),
                "submission rejected"
            );
            return Ok(outcome);
        }
    };

    if validate::is_oversized_impl(&req.code) {
        tracing::debug!(
            hole = %req.hole,
            lang = %req.lang,
            bytes = req.code.len(),
            "submission too large"
        );
        if let Some(g) = golfer {
            let facts = SubmissionFacts {
                oversized: true,
                ..Default::default()
            };
            let ctx = rule_context(p, req, now, g.id, facts);
            p.engine.evaluate(p.store.as_ref(), Stage::Rejected, &ctx)?;
        }
        return Ok(SubmissionOutcome::TooLarge);
    }

    let result = judge_impl(p, req).await;
    let mut trophies = BTreeSet::new();

    if result.timed_out {
        if let Some(g) = golfer {
            let facts = SubmissionFacts {
                timed_out: true,
                ..Default::default()
            };
            let ctx = rule_context(p, req, now, g.id, facts);
            trophies.extend(p.engine.evaluate(p.store.as_ref(), Stage::Judged, &ctx)?);
        }
    }

    let mut resp = assemble_impl(result, golfer.is_some());

    let ranked = kind == HoleKind::Standard && req.lang != BYPASS_LANG;
    match golfer {
        Some(g) if resp.pass && ranked => {
            let ctx = rule_context(p, req, now, g.id, SubmissionFacts::default());
            let persisted = persist::persist_impl(p, req, g, &ctx)?;
            resp.rank_updates = persisted.rank_updates;
            trophies.extend(persisted.trophies);
        }
        _ => {}
    }

    resp.trophies = trophies;
    Ok(SubmissionOutcome::Judged(Box::new(resp)))
}

fn rule_context<'a>(
    p: &'a SubmissionPipeline,
    req: &'a SubmissionRequest,
    now: DateTime<Utc>,
    golfer_id: i64,
    facts: SubmissionFacts,
) -> RuleContext<'a> {
    RuleContext {
        golfer_id,
        today: now.date_naive(),
        hole: &req.hole,
        lang: &req.lang,
        catalog: &p.catalog,
        facts,
    }
}

/// Run the judge under the outer timeout. Backend faults become a failed
/// result carrying the diagnostic.
async fn judge_impl(p: &SubmissionPipeline, req: &SubmissionRequest) -> JudgeResult {
    let call = p.judge.execute(&req.hole, &req.lang, &req.code);
    match tokio::time::timeout(p.judge_timeout, call).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            tracing::warn!(
                judge = p.judge.name(),
                hole = %req.hole,
                lang = %req.lang,
                error = %e,
                "judge failed"
            );
            JudgeResult::fault(format!("judge error: {:#}", e))
        }
        Err(_) => {
            tracing::warn!(
                judge = p.judge.name(),
                hole = %req.hole,
                lang = %req.lang,
                timeout_ms = p.judge_timeout.as_millis() as u64,
                "judge did not respond in time"
            );
            JudgeResult::fault(format!(
                "judge did not respond within {} ms",
                p.judge_timeout.as_millis()
            ))
        }
    }
}

pub(crate) fn assemble_impl(result: JudgeResult, logged_in: bool) -> SolutionResponse {
    let out = String::from_utf8_lossy(&result.stdout).into_owned();
    SolutionResponse {
        diff: unified_diff(&result.answer, &out),
        err: render_terminal(&result.stderr),
        argv: result.args,
        exp: result.answer,
        out,
        pass: result.pass,
        logged_in,
        rank_updates: [
            RankUpdate::placeholder(Scoring::Bytes),
            RankUpdate::placeholder(Scoring::Chars),
        ],
        took: result.took,
        trophies: BTreeSet::new(),
    }
}
