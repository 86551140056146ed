use crate::{PageRequest, ProtocolError};

/// Pagination state: `AwaitingFirstPage → Continuing(token)* → Done`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CursorState {
    #[default]
    AwaitingFirstPage,
    Continuing(String),
    Done,
}

impl CursorState {
    pub fn is_done(&self) -> bool {
        matches!(self, CursorState::Done)
    }

    /// The request that fetches the next page from this state.
    pub fn next_request(
        &self,
        set: &str,
        metadata_prefix: &str,
    ) -> Result<PageRequest, ProtocolError> {
        match self {
            CursorState::AwaitingFirstPage => Ok(PageRequest::Initial {
                set: set.to_string(),
                metadata_prefix: metadata_prefix.to_string(),
            }),
            CursorState::Continuing(token) => Ok(PageRequest::Resume {
                token: token.clone(),
            }),
            CursorState::Done => Err(ProtocolError::CursorExhausted),
        }
    }

    /// Applies the token declared by the page just fetched.
    pub fn advance(self, next_token: Option<&str>) -> Result<CursorState, ProtocolError> {
        match (self, next_token) {
            (CursorState::Done, _) => Err(ProtocolError::CursorExhausted),
            (_, None) => Ok(CursorState::Done),
            (CursorState::Continuing(current), Some(next)) if current == next => {
                Err(ProtocolError::TokenDidNotAdvance(current))
            }
            (_, Some(next)) => Ok(CursorState::Continuing(next.to_string())),
        }
    }
}
