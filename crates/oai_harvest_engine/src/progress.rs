use harvest_logging::{harvest_debug, harvest_info};

use crate::HarvestEvent;

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: HarvestEvent);
}

/// Reports progress through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn emit(&self, event: HarvestEvent) {
        match event {
            HarvestEvent::PageFetched {
                page,
                entries,
                cursor,
                complete_list_size,
            } => match (cursor, complete_list_size) {
                (Some(cursor), Some(total)) => harvest_info!(
                    "page {} fetched: {} entries (list position {}/{})",
                    page,
                    entries,
                    cursor,
                    total
                ),
                _ => harvest_info!("page {} fetched: {} entries", page, entries),
            },
            HarvestEvent::RecordStored { identity, outcome } => {
                harvest_debug!("{} -> {:?}", identity, outcome);
            }
            HarvestEvent::EntrySkipped { identity, reason } => {
                harvest_debug!(
                    "skipped {}: {:?}",
                    identity.as_deref().unwrap_or("<unknown>"),
                    reason
                );
            }
            HarvestEvent::Finished(_) => {}
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _event: HarvestEvent) {}
}
