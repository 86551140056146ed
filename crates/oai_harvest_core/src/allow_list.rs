use std::collections::BTreeSet;

use crate::CanonicalRecord;

/// Subject tags kept when no allow-list is configured.
pub const DEFAULT_SUBJECTS: &[&str] = &[
    "cs.CV", "cs.LG", "cs.CL", "cs.AI", "cs.NE", "cs.RO", "cs.IT",
];

/// Category codes a record must share at least one of to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectAllowList {
    tags: BTreeSet<String>,
}

impl SubjectAllowList {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn admits(&self, record: &CanonicalRecord) -> bool {
        record
            .categories
            .iter()
            .any(|category| self.tags.contains(category))
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl Default for SubjectAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_SUBJECTS.iter().copied())
    }
}
