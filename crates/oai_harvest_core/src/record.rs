use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub(crate) const ABSTRACT_BASE: &str = "http://arxiv.org/abs/";

/// Normalized, store-ready representation of one harvested entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub identity: String,
    /// Comparison key for the upsert policy: `updated`, else `created`.
    pub revision: NaiveDate,
    pub title: String,
    pub summary: String,
    pub authors: Vec<String>,
    pub primary_category: String,
    pub categories: Vec<String>,
    pub links: RecordLinks,
    pub created: SourceDate,
    pub updated: SourceDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLinks {
    pub abstract_page: String,
    pub pdf: String,
}

impl RecordLinks {
    pub fn for_identity(identity: &str) -> Self {
        let abstract_page = format!("{ABSTRACT_BASE}{identity}");
        let pdf = abstract_page.replacen("/abs/", "/pdf/", 1);
        Self { abstract_page, pdf }
    }
}

/// A date as the source wrote it, plus its parsed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDate {
    pub raw: String,
    pub date: NaiveDate,
}

impl CanonicalRecord {
    pub fn revision_days(&self) -> i32 {
        revision_to_days(self.revision)
    }
}

/// Compact index encoding of a revision date: days since 0001-01-01 (day 1).
pub fn revision_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce()
}

pub fn revision_from_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days)
}
