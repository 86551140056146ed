use std::time::Duration;

use harvest_logging::{harvest_debug, harvest_info, harvest_warn};
use oai_harvest_core::{
    normalize, HarvestStats, ListRecordsPage, SubjectAllowList, DEFAULT_METADATA_PREFIX,
};

use crate::progress::{LogProgressSink, ProgressSink};
use crate::{
    HarvestCursor, HarvestError, HarvestEvent, PageSource, RecordStore, SkipReason,
};

#[derive(Debug, Clone)]
pub struct DriverSettings {
    /// OAI set the first request is scoped to, e.g. `cs`.
    pub set: String,
    pub metadata_prefix: String,
    pub allow_list: SubjectAllowList,
    /// Wait between consecutive requests.
    pub pacing: Duration,
    /// Extra attempts for a request that failed in transport. Zero makes the
    /// first transport failure fatal.
    pub transport_retries: u32,
}

impl DriverSettings {
    pub fn new(set: impl Into<String>) -> Self {
        Self {
            set: set.into(),
            metadata_prefix: DEFAULT_METADATA_PREFIX.to_string(),
            allow_list: SubjectAllowList::default(),
            pacing: Duration::from_secs(5),
            transport_retries: 0,
        }
    }
}

/// Runs one full harvest: every page from the first until the source stops
/// returning resumption tokens, upserting allow-listed records into the store.
///
/// The token lives only in memory; a new driver always starts from page one.
pub struct HarvestDriver<S, R> {
    cursor: HarvestCursor<S>,
    store: R,
    allow_list: SubjectAllowList,
    pacing: Duration,
    transport_retries: u32,
    sink: Box<dyn ProgressSink>,
}

impl<S: PageSource, R: RecordStore> HarvestDriver<S, R> {
    pub fn new(source: S, store: R, settings: DriverSettings) -> Self {
        Self {
            cursor: HarvestCursor::new(source, settings.set, settings.metadata_prefix),
            store,
            allow_list: settings.allow_list,
            pacing: settings.pacing,
            transport_retries: settings.transport_retries,
            sink: Box::new(LogProgressSink),
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn cursor(&self) -> &HarvestCursor<S> {
        &self.cursor
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    pub fn into_store(self) -> R {
        self.store
    }

    pub async fn run(&mut self) -> Result<HarvestStats, HarvestError> {
        let mut stats = HarvestStats::default();

        loop {
            let page = self.fetch_page().await?;
            stats.pages += 1;
            self.sink.emit(HarvestEvent::PageFetched {
                page: stats.pages,
                entries: page.entries.len(),
                cursor: page.resumption_token.as_ref().and_then(|t| t.cursor),
                complete_list_size: page
                    .resumption_token
                    .as_ref()
                    .and_then(|t| t.complete_list_size),
            });

            self.process_page(&page, &mut stats)?;

            if self.cursor.is_done() {
                break;
            }
            self.pause(self.pacing).await;
        }

        harvest_info!(
            "harvest complete: {} pages, {} entries, {} inserted, {} replaced, {} unchanged, {} filtered, {} malformed, {} deleted",
            stats.pages,
            stats.entries,
            stats.inserted,
            stats.replaced,
            stats.skipped,
            stats.filtered,
            stats.malformed,
            stats.deleted
        );
        self.sink.emit(HarvestEvent::Finished(stats));
        Ok(stats)
    }

    async fn fetch_page(&mut self) -> Result<ListRecordsPage, HarvestError> {
        let mut attempt = 0;
        loop {
            match self.cursor.next_page().await {
                Err(HarvestError::Transport(err)) if attempt < self.transport_retries => {
                    attempt += 1;
                    let wait = err.retry_after.unwrap_or(self.pacing).max(self.pacing);
                    harvest_warn!(
                        "request failed ({}), retry {}/{} in {:?}",
                        err,
                        attempt,
                        self.transport_retries,
                        wait
                    );
                    self.pause(wait).await;
                }
                result => return result,
            }
        }
    }

    fn process_page(
        &mut self,
        page: &ListRecordsPage,
        stats: &mut HarvestStats,
    ) -> Result<(), HarvestError> {
        for entry in &page.entries {
            stats.entries += 1;

            if entry.deleted {
                stats.deleted += 1;
                harvest_debug!(
                    "skipping deleted record {}",
                    entry.header_identifier.as_deref().unwrap_or("<unknown>")
                );
                self.sink.emit(HarvestEvent::EntrySkipped {
                    identity: entry.header_identifier.clone(),
                    reason: SkipReason::Deleted,
                });
                continue;
            }

            let record = match normalize(entry) {
                Ok(record) => record,
                Err(err) => {
                    stats.malformed += 1;
                    harvest_warn!("skipping entry: {}", err);
                    self.sink.emit(HarvestEvent::EntrySkipped {
                        identity: err.identity.clone(),
                        reason: SkipReason::Malformed(err),
                    });
                    continue;
                }
            };

            if !self.allow_list.admits(&record) {
                stats.filtered += 1;
                self.sink.emit(HarvestEvent::EntrySkipped {
                    identity: Some(record.identity),
                    reason: SkipReason::OutsideAllowList,
                });
                continue;
            }

            let outcome = self.store.put(&record)?;
            stats.record_put(outcome);
            self.sink.emit(HarvestEvent::RecordStored {
                identity: record.identity,
                outcome,
            });
        }
        Ok(())
    }

    async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
