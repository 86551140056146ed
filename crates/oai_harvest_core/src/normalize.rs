use chrono::NaiveDate;

use crate::{
    CanonicalRecord, MalformedReason, MalformedRecord, RawAuthor, RawEntry, RecordLinks,
    SourceDate,
};

/// Given-name tags, checked in this order. The arXiv format uses both spellings.
pub const GIVEN_NAME_TAGS: &[&str] = &["forename", "forenames"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Converts one raw entry into a canonical record.
pub fn normalize(entry: &RawEntry) -> Result<CanonicalRecord, MalformedRecord> {
    let fail = |reason| MalformedRecord {
        identity: entry
            .field("id")
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .or(entry.header_identifier.as_deref())
            .map(ToOwned::to_owned),
        reason,
    };

    let identity = required(entry, "id").map_err(fail)?.to_string();
    let created = parse_date(entry, "created").map_err(fail)?;
    let updated = match optional(entry, "updated") {
        Some(_) => parse_date(entry, "updated").map_err(fail)?,
        None => created.clone(),
    };
    let title = collapse_whitespace(required(entry, "title").map_err(fail)?);
    let summary = required(entry, "abstract").map_err(fail)?.to_string();
    let categories: Vec<String> = required(entry, "categories")
        .map_err(fail)?
        .split_whitespace()
        .map(ToOwned::to_owned)
        .collect();
    let primary_category = categories[0].clone();

    let authors = entry
        .authors
        .as_deref()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, author)| author_name(author, index + 1))
        .collect::<Result<Vec<_>, _>>()
        .map_err(fail)?;

    Ok(CanonicalRecord {
        links: RecordLinks::for_identity(&identity),
        revision: updated.date,
        identity,
        title,
        summary,
        authors,
        primary_category,
        categories,
        created,
        updated,
        comments: optional(entry, "comments").map(collapse_whitespace),
        journal_ref: optional(entry, "journal-ref").map(collapse_whitespace),
        doi: optional(entry, "doi").map(ToOwned::to_owned),
        license: optional(entry, "license").map(ToOwned::to_owned),
    })
}

fn optional<'a>(entry: &'a RawEntry, name: &str) -> Option<&'a str> {
    entry
        .field(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn required<'a>(entry: &'a RawEntry, name: &'static str) -> Result<&'a str, MalformedReason> {
    optional(entry, name).ok_or(MalformedReason::MissingField(name))
}

fn parse_date(entry: &RawEntry, name: &'static str) -> Result<SourceDate, MalformedReason> {
    let raw = required(entry, name)?;
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        MalformedReason::InvalidDate {
            field: name,
            value: raw.to_string(),
        }
    })?;
    Ok(SourceDate {
        raw: raw.to_string(),
        date,
    })
}

fn author_name(author: &RawAuthor, position: usize) -> Result<String, MalformedReason> {
    let keyname = author
        .field("keyname")
        .map(collapse_whitespace)
        .filter(|name| !name.is_empty())
        .ok_or(MalformedReason::MissingKeyname { position })?;

    let given = GIVEN_NAME_TAGS
        .iter()
        .find_map(|tag| author.field(tag))
        .map(collapse_whitespace)
        .filter(|name| !name.is_empty());

    Ok(match given {
        Some(given) => format!("{keyname} {given}"),
        None => keyname,
    })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::collapse_whitespace;

    #[test]
    fn collapses_line_breaks_and_indentation() {
        assert_eq!(
            collapse_whitespace("  A Study of\n      Things  "),
            "A Study of Things"
        );
    }
}
