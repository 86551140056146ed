use url::Url;

pub const DEFAULT_METADATA_PREFIX: &str = "arXiv";

const VERB: &str = "ListRecords";

/// One ListRecords request. The protocol forbids mixing a resumption token
/// with fresh selectors, so the two shapes are distinct variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    Initial { set: String, metadata_prefix: String },
    Resume { token: String },
}

impl PageRequest {
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        match self {
            PageRequest::Initial {
                set,
                metadata_prefix,
            } => vec![
                ("verb", VERB),
                ("set", set.as_str()),
                ("metadataPrefix", metadata_prefix.as_str()),
            ],
            PageRequest::Resume { token } => {
                vec![("verb", VERB), ("resumptionToken", token.as_str())]
            }
        }
    }

    /// Appends the query to `endpoint`, replacing any query it already had.
    pub fn to_url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        url.set_query(None);
        url.query_pairs_mut().extend_pairs(self.query_pairs());
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_request_carries_set_and_prefix() {
        let endpoint = Url::parse("http://export.arxiv.org/oai2").unwrap();
        let request = PageRequest::Initial {
            set: "cs".into(),
            metadata_prefix: DEFAULT_METADATA_PREFIX.into(),
        };
        assert_eq!(
            request.to_url(&endpoint).as_str(),
            "http://export.arxiv.org/oai2?verb=ListRecords&set=cs&metadataPrefix=arXiv"
        );
    }

    #[test]
    fn resume_request_carries_only_the_token() {
        let endpoint = Url::parse("http://export.arxiv.org/oai2?stale=1").unwrap();
        let request = PageRequest::Resume {
            token: "6960524|1001".into(),
        };
        assert_eq!(
            request.to_url(&endpoint).as_str(),
            "http://export.arxiv.org/oai2?verb=ListRecords&resumptionToken=6960524%7C1001"
        );
    }
}
