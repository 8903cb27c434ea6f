//! Batch conversion: one composed URL per line of input.
//!
//! Lines are trimmed; blank lines are ignored and lines that are not http/https
//! URLs are skipped up front (counted, but not as failures). The remaining URLs
//! are composed one after another with a fixed pause between items for pacing.
//! A failed item is recorded and the batch keeps going.

use std::time::Duration;

use crate::compose::{Composed, Composer, ConversionRequest, FeatureFlags};
use crate::error::{Result, SubconvError};
use crate::history::History;
use crate::store::KeyValueStore;
use crate::template::TemplateId;
use crate::validate::is_valid_url;

/// Pause between items.
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(100);

/// Input lines after filtering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchInput {
    pub urls: Vec<String>,
    /// Non-blank lines rejected by URL validation.
    pub skipped: Vec<String>,
}

/// Split `text` into lines and keep the valid http/https URLs, in order.
pub fn parse_batch_input(text: &str) -> BatchInput {
    let mut input = BatchInput::default();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_valid_url(line) {
            input.urls.push(line.to_string());
        } else {
            input.skipped.push(line.to_string());
        }
    }
    input
}

/// Result for one input URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub source_url: String,
    pub outcome: std::result::Result<Composed, String>,
}

impl BatchItem {
    pub fn converted_url(&self) -> Option<&str> {
        self.outcome.as_ref().ok().map(|c| c.url.as_str())
    }
}

/// Counts and per-item results of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BatchReport {
    /// Successful converted URLs, in input order.
    pub fn converted_urls(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(BatchItem::converted_url)
    }
}

/// Settings shared by every item of a batch.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub composer: Composer,
    pub template: TemplateId,
    pub custom_template_url: Option<String>,
    pub flags: FeatureFlags,
    pub delay: Duration,
}

impl Default for BatchJob {
    fn default() -> Self {
        Self {
            composer: Composer::default(),
            template: TemplateId::Default,
            custom_template_url: None,
            flags: FeatureFlags::default(),
            delay: DEFAULT_BATCH_DELAY,
        }
    }
}

impl BatchJob {
    fn request_for(&self, url: &str) -> ConversionRequest {
        ConversionRequest::new(url)
            .with_template(self.template, self.custom_template_url.clone())
            .with_flags(self.flags)
    }

    fn compose_one(&self, url: &str) -> BatchItem {
        let outcome = self
            .composer
            .compose(&self.request_for(url))
            .map_err(|e| e.to_string());
        BatchItem {
            source_url: url.to_string(),
            outcome,
        }
    }

    /// Compose every valid line of `text`, recording successes into `history`.
    ///
    /// `on_item` is called after each item with its 0-based position and the total.
    /// Fails only when the input holds no usable URL at all.
    pub async fn run<S, F>(
        &self,
        text: &str,
        mut history: Option<&mut History<S>>,
        mut on_item: F,
    ) -> Result<BatchReport>
    where
        S: KeyValueStore,
        F: FnMut(usize, usize, &BatchItem),
    {
        if text.trim().is_empty() {
            return Err(SubconvError::EmptyUrl);
        }
        let input = parse_batch_input(text);
        for line in &input.skipped {
            tracing::debug!(line = %line, "batch: skipping invalid line");
        }
        if input.urls.is_empty() {
            return Err(SubconvError::NoValidUrls);
        }

        let total = input.urls.len();
        tracing::info!(total, skipped = input.skipped.len(), "batch conversion started");

        let mut report = BatchReport {
            skipped: input.skipped.len(),
            ..BatchReport::default()
        };
        for (i, url) in input.urls.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let item = self.compose_one(url);
            match &item.outcome {
                Ok(c) => {
                    report.succeeded += 1;
                    if let Some(h) = history.as_deref_mut() {
                        if let Err(e) = h.record(&c.source_url, &c.url) {
                            tracing::warn!(error = %e, url = %url, "batch: failed to save history");
                        }
                    }
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(url = %url, error = %e, "batch: item failed");
                }
            }
            on_item(i, total, &item);
            report.items.push(item);
        }

        if report.failed == 0 {
            tracing::info!(succeeded = report.succeeded, "batch conversion finished");
        } else {
            tracing::warn!(
                succeeded = report.succeeded,
                failed = report.failed,
                "batch conversion finished with failures"
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose_url;
    use crate::history::MAX_HISTORY_ITEMS;
    use crate::store::MemoryStore;

    const INPUT: &str = "https://a.example/sub\n\n   \nnot a url\nhttp://b.example/api?token=1\r\nftp://c.example/x\n  https://c.example/sub  \n";

    #[test]
    fn parse_keeps_valid_lines_in_order() {
        let input = parse_batch_input(INPUT);
        assert_eq!(
            input.urls,
            [
                "https://a.example/sub",
                "http://b.example/api?token=1",
                "https://c.example/sub"
            ]
        );
        assert_eq!(input.skipped, ["not a url", "ftp://c.example/x"]);
    }

    #[tokio::test(start_paused = true)]
    async fn n_valid_lines_give_n_successes() {
        let job = BatchJob {
            flags: FeatureFlags {
                emoji: true,
                ..FeatureFlags::default()
            },
            ..BatchJob::default()
        };
        let mut seen = Vec::new();
        let report = job
            .run::<MemoryStore, _>(INPUT, None, |i, total, _| seen.push((i, total)))
            .await
            .unwrap();

        assert_eq!(report.succeeded, 3);
        assert_eq!(report.failed, 0);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.items.len(), 3);
        assert_eq!(seen, [(0, 3), (1, 3), (2, 3)]);

        let expected = compose_url("https://c.example/sub", TemplateId::Default, job.flags).unwrap();
        assert_eq!(report.items[2].converted_url(), Some(expected.as_str()));
        assert_eq!(report.converted_urls().count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn successes_are_recorded_in_history() {
        let mut history = History::new(MemoryStore::new());
        let text: String = (0..25)
            .map(|i| format!("https://h{i}.example/sub\n"))
            .collect();
        let report = BatchJob::default()
            .run(&text, Some(&mut history), |_, _, _| {})
            .await
            .unwrap();
        assert_eq!(report.succeeded, 25);

        let list = history.list().unwrap();
        assert_eq!(list.len(), MAX_HISTORY_ITEMS);
        assert_eq!(list[0].url, "https://h24.example/sub");
    }

    #[tokio::test(start_paused = true)]
    async fn pacing_delay_between_items() {
        let job = BatchJob {
            delay: Duration::from_millis(250),
            ..BatchJob::default()
        };
        let start = tokio::time::Instant::now();
        job.run::<MemoryStore, _>(
            "https://a.example/s\nhttps://b.example/s\nhttps://c.example/s",
            None,
            |_, _, _| {},
        )
        .await
        .unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(500), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(750), "elapsed {elapsed:?}");
    }

    #[tokio::test]
    async fn empty_or_all_invalid_input_is_rejected() {
        let job = BatchJob::default();
        let err = job
            .run::<MemoryStore, _>(" \n\n", None, |_, _, _| {})
            .await
            .unwrap_err();
        assert!(matches!(err, SubconvError::EmptyUrl));

        let err = job
            .run::<MemoryStore, _>("foo\nbar://x", None, |_, _, _| {})
            .await
            .unwrap_err();
        assert!(matches!(err, SubconvError::NoValidUrls));
    }
}
