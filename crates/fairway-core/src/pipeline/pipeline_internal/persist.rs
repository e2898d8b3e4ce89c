use crate::announce::RecordAnnouncement;
use crate::errors::PipelineError;
use crate::model::{Golfer, RankUpdate, SubmissionRequest};
use crate::pipeline::SubmissionPipeline;
use crate::rank;
use crate::trophy::{RuleContext, Stage, Trophy};
use std::collections::BTreeSet;

pub(crate) struct Persisted {
    pub(crate) rank_updates: [RankUpdate; 2],
    pub(crate) trophies: BTreeSet<Trophy>,
}

/// Store a pass, log rank movement, queue record announcements and run the
/// post-write trophy rules. Any store failure aborts the request.
pub(crate) fn persist_impl(
    p: &SubmissionPipeline,
    req: &SubmissionRequest,
    golfer: &Golfer,
    ctx: &RuleContext<'_>,
) -> Result<Persisted, PipelineError> {
    let record = p
        .store
        .record_pass(&req.code, &req.hole, &req.lang, golfer.id)?;
    let rank_updates = [record.bytes, record.chars];

    let delta = rank::interpret(golfer, &req.hole, &req.lang, &rank_updates);
    if !delta.records.is_empty() {
        announce_impl(p, req, golfer, delta.records);
    }

    let mut trophies = record.trophies;
    trophies.extend(p.engine.evaluate(p.store.as_ref(), Stage::Persisted, ctx)?);

    Ok(Persisted {
        rank_updates,
        trophies,
    })
}

fn announce_impl(
    p: &SubmissionPipeline,
    req: &SubmissionRequest,
    golfer: &Golfer,
    records: Vec<RankUpdate>,
) {
    let Some(queue) = &p.announcer else {
        tracing::debug!(
            golfer = %golfer.name,
            hole = %req.hole,
            "no announcer configured, record not announced"
        );
        return;
    };
    queue.dispatch(RecordAnnouncement {
        golfer: golfer.clone(),
        hole: req.hole.clone(),
        lang: req.lang.clone(),
        updates: records,
    });
}
