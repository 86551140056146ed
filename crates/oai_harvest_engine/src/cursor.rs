use oai_harvest_core::{parse_list_records, CursorState, ListRecordsPage, PageRequest};

use crate::{HarvestError, PageSource};

/// Drives the resumption-token protocol against one `PageSource`.
///
/// The state only advances once a page was fetched and parsed, so a failed
/// request can be issued again unchanged. Transport failures are never
/// retried here.
pub struct HarvestCursor<S> {
    source: S,
    set: String,
    metadata_prefix: String,
    state: CursorState,
}

impl<S: PageSource> HarvestCursor<S> {
    pub fn new(source: S, set: impl Into<String>, metadata_prefix: impl Into<String>) -> Self {
        Self {
            source,
            set: set.into(),
            metadata_prefix: metadata_prefix.into(),
            state: CursorState::AwaitingFirstPage,
        }
    }

    pub fn state(&self) -> &CursorState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches the page the current state points at: the set-scoped first page,
    /// or the page behind the pending resumption token.
    pub async fn next_page(&mut self) -> Result<ListRecordsPage, HarvestError> {
        let request = self.state.next_request(&self.set, &self.metadata_prefix)?;
        let page = self.fetch(&request).await?;

        let token = page.resumption_token.as_ref().map(|t| t.value.as_str());
        self.state = self.state.clone().advance(token)?;
        Ok(page)
    }

    async fn fetch(&self, request: &PageRequest) -> Result<ListRecordsPage, HarvestError> {
        let body = self.source.fetch(request).await?;
        Ok(parse_list_records(&body)?)
    }
}
