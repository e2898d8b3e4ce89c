use super::{AnnouncementSink, RecordAnnouncement};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use url::Url;

/// Human-readable announcement text.
pub fn record_message(a: &RecordAnnouncement) -> String {
    let scores = a
        .updates
        .iter()
        .map(|u| match u.to.strokes {
            Some(strokes) => format!("{} {}", strokes, u.scoring),
            None => format!("? {}", u.scoring),
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "🏆 {} set a new record on {} in {}: {}",
        a.golfer.name, a.hole, a.lang, scores
    )
}

/// Posts a chat-webhook message per record announcement.
pub struct WebhookSink {
    url: Url,
    client: reqwest::Client,
}

impl WebhookSink {
    pub fn new(url: Url) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { url, client }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl AnnouncementSink for WebhookSink {
    async fn publish_record(&self, announcement: &RecordAnnouncement) -> anyhow::Result<()> {
        let body = json!({
            "username": "fairway",
            "content": record_message(announcement),
            "allowed_mentions": { "parse": [] },
        });

        let resp = self.client.post(self.url.clone()).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("webhook error (status {}): {}", status, text);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}
