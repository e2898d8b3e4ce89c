//! Record announcements.
//!
//! The request path hands announcements to a bounded queue and never waits
//! on delivery. A single worker drains the queue into an
//! [`AnnouncementSink`]; sink failures are logged and dropped.

mod webhook;

pub use webhook::{record_message, WebhookSink};

use crate::model::{Golfer, RankUpdate};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// New sole first places from one submission, batched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordAnnouncement {
    pub golfer: Golfer,
    pub hole: String,
    pub lang: String,
    pub updates: Vec<RankUpdate>,
}

#[async_trait]
pub trait AnnouncementSink: Send + Sync {
    async fn publish_record(&self, announcement: &RecordAnnouncement) -> anyhow::Result<()>;

    fn name(&self) -> &'static str;
}

/// Sink that only logs; used when no webhook is configured.
pub struct LogSink;

#[async_trait]
impl AnnouncementSink for LogSink {
    async fn publish_record(&self, announcement: &RecordAnnouncement) -> anyhow::Result<()> {
        tracing::info!(
            golfer = %announcement.golfer.name,
            hole = %announcement.hole,
            lang = %announcement.lang,
            "{}",
            record_message(announcement)
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Producer handle; cheap to clone into every request.
#[derive(Clone)]
pub struct AnnouncementQueue {
    tx: mpsc::Sender<RecordAnnouncement>,
}

/// Owns the worker task; join it after the last queue handle is dropped.
pub struct AnnouncementWorker {
    handle: JoinHandle<()>,
}

impl AnnouncementQueue {
    /// Start a worker on the current tokio runtime.
    pub fn spawn(
        sink: Arc<dyn AnnouncementSink>,
        capacity: usize,
    ) -> (AnnouncementQueue, AnnouncementWorker) {
        let (tx, mut rx) = mpsc::channel::<RecordAnnouncement>(capacity.max(1));
        let handle = tokio::spawn(async move {
            while let Some(announcement) = rx.recv().await {
                if let Err(e) = sink.publish_record(&announcement).await {
                    tracing::warn!(
                        sink = sink.name(),
                        golfer = %announcement.golfer.name,
                        hole = %announcement.hole,
                        error = %e,
                        "failed to announce record"
                    );
                }
            }
        });
        (AnnouncementQueue { tx }, AnnouncementWorker { handle })
    }

    /// Enqueue without waiting. Returns false when the announcement was dropped.
    pub fn dispatch(&self, announcement: RecordAnnouncement) -> bool {
        match self.tx.try_send(announcement) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(a)) => {
                tracing::warn!(
                    golfer = %a.golfer.name,
                    hole = %a.hole,
                    "announcement queue full, dropping record"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(a)) => {
                tracing::warn!(
                    golfer = %a.golfer.name,
                    hole = %a.hole,
                    "announcement worker stopped, dropping record"
                );
                false
            }
        }
    }
}

impl AnnouncementWorker {
    /// Wait for the queue to drain. Completes once every
    /// [`AnnouncementQueue`] handle has been dropped.
    pub async fn join(self) {
        if let Err(e) = self.handle.await {
            tracing::warn!(error = %e, "announcement worker panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scoring;
    use std::sync::Mutex;

    struct Recording {
        seen: Mutex<Vec<RecordAnnouncement>>,
        fail: bool,
    }

    #[async_trait]
    impl AnnouncementSink for Recording {
        async fn publish_record(&self, a: &RecordAnnouncement) -> anyhow::Result<()> {
            self.seen.lock().unwrap().push(a.clone());
            if self.fail {
                anyhow::bail!("channel unavailable");
            }
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    fn announcement(hole: &str) -> RecordAnnouncement {
        RecordAnnouncement {
            golfer: Golfer::new(1, "alice"),
            hole: hole.to_string(),
            lang: "c".to_string(),
            updates: vec![RankUpdate::placeholder(Scoring::Bytes)],
        }
    }

    #[tokio::test]
    async fn worker_delivers_in_order_and_drains_on_join() {
        let sink = Arc::new(Recording {
            seen: Mutex::new(Vec::new()),
            fail: false,
        });
        let (queue, worker) = AnnouncementQueue::spawn(sink.clone(), 8);

        assert!(queue.dispatch(announcement("quine")));
        assert!(queue.dispatch(announcement("fizz-buzz")));
        drop(queue);
        worker.join().await;

        let seen = sink.seen.lock().unwrap();
        let holes: Vec<_> = seen.iter().map(|a| a.hole.as_str()).collect();
        assert_eq!(holes, ["quine", "fizz-buzz"]);
    }

    #[tokio::test]
    async fn sink_failures_do_not_stop_the_worker() {
        let sink = Arc::new(Recording {
            seen: Mutex::new(Vec::new()),
            fail: true,
        });
        let (queue, worker) = AnnouncementQueue::spawn(sink.clone(), 8);

        queue.dispatch(announcement("quine"));
        queue.dispatch(announcement("π"));
        drop(queue);
        worker.join().await;

        assert_eq!(sink.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn full_queue_drops_instead_of_blocking() {
        let sink = Arc::new(Recording {
            seen: Mutex::new(Vec::new()),
            fail: false,
        });
        let (queue, worker) = AnnouncementQueue::spawn(sink.clone(), 1);

        // The worker cannot run until we yield, so the second send finds the
        // single slot taken.
        assert!(queue.dispatch(announcement("quine")));
        assert!(!queue.dispatch(announcement("π")));
        drop(queue);
        worker.join().await;

        assert_eq!(sink.seen.lock().unwrap().len(), 1);
    }
}
