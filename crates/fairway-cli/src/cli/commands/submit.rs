use crate::cli::args::SubmitArgs;
use crate::exit_codes;
use anyhow::Context;
use fairway_core::announce::{AnnouncementQueue, AnnouncementSink, LogSink, WebhookSink};
use fairway_core::{
    CommandJudge, FairwayConfig, Golfer, SqliteLeaderboard, SubmissionOutcome, SubmissionPipeline,
    SubmissionRequest,
};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

pub async fn run(args: SubmitArgs, cfg: FairwayConfig) -> anyhow::Result<i32> {
    let code = read_code(args.code_file.as_deref())?;
    let golfer = match (args.golfer_id, args.golfer_name) {
        (Some(id), Some(name)) => Some(Golfer::new(id, name)),
        _ => None,
    };

    let judge = CommandJudge::from_argv(&cfg.judge.command)
        .context("judge.command must name the judge program")?;
    let store = SqliteLeaderboard::open(&cfg.database.path)
        .with_context(|| format!("failed to open {}", cfg.database.path.display()))?;

    let sink: Arc<dyn AnnouncementSink> = match &cfg.announce.webhook_url {
        Some(url) => Arc::new(WebhookSink::new(url.clone())),
        None => Arc::new(LogSink),
    };
    let (queue, worker) = AnnouncementQueue::spawn(sink, cfg.announce.queue_capacity);

    let pipeline = SubmissionPipeline::new(Arc::new(cfg.catalog), Arc::new(judge), Arc::new(store))
        .with_announcer(queue)
        .with_judge_timeout(cfg.judge.timeout());

    let req = SubmissionRequest {
        code,
        hole: args.hole,
        lang: args.lang,
    };
    let outcome = pipeline.submit(&req, golfer.as_ref()).await;

    // Let queued announcements go out before exiting.
    drop(pipeline);
    worker.join().await;

    match outcome? {
        SubmissionOutcome::Judged(resp) => {
            println!("{}", resp.to_json()?);
            Ok(exit_codes::SUCCESS)
        }
        rejected => {
            eprintln!("{}", describe(&rejected, &req));
            Ok(exit_codes::REJECTED)
        }
    }
}

fn describe(outcome: &SubmissionOutcome, req: &SubmissionRequest) -> String {
    match outcome {
        SubmissionOutcome::UnknownHole => format!("404: unknown hole '{}'", req.hole),
        SubmissionOutcome::UnknownLang => format!("404: unknown language '{}'", req.lang),
        SubmissionOutcome::TooLarge => format!(
            "413: code is {} bytes, limit is {}",
            req.code.len(),
            fairway_core::MAX_CODE_BYTES
        ),
        SubmissionOutcome::Judged(_) => "200".to_string(),
    }
}

fn read_code(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display())),
        None => {
            let mut code = String::new();
            std::io::stdin()
                .read_to_string(&mut code)
                .context("failed to read code from stdin")?;
            Ok(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn code_file_is_read_verbatim() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "say 1..100").unwrap();
        assert_eq!(read_code(Some(f.path())).unwrap(), "say 1..100\n");
    }

    #[test]
    fn rejections_name_the_offending_field() {
        let req = SubmissionRequest {
            code: "x".into(),
            hole: "nope".into(),
            lang: "cobol".into(),
        };
        assert!(describe(&SubmissionOutcome::UnknownHole, &req).contains("'nope'"));
        assert!(describe(&SubmissionOutcome::UnknownLang, &req).contains("'cobol'"));
        assert!(describe(&SubmissionOutcome::TooLarge, &req).starts_with("413"));
    }
}
