/// One `<record>` of a ListRecords response, as delivered.
///
/// Metadata children are kept as `(local name, text)` pairs in document order;
/// nothing is validated until [`crate::normalize`] runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawEntry {
    pub header_identifier: Option<String>,
    pub datestamp: Option<String>,
    pub set_specs: Vec<String>,
    /// OAI header `status="deleted"`; such records carry no metadata.
    pub deleted: bool,
    pub fields: Vec<(String, String)>,
    /// `None` when the metadata has no `<authors>` element at all.
    pub authors: Option<Vec<RawAuthor>>,
}

impl RawEntry {
    pub fn new(header_identifier: impl Into<String>) -> Self {
        Self {
            header_identifier: Some(header_identifier.into()),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.fields.push((name.into(), text.into()));
        self
    }

    pub fn with_author(mut self, author: RawAuthor) -> Self {
        self.authors.get_or_insert_with(Vec::new).push(author);
        self
    }

    /// First metadata field with this local name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// One `<author>` element: its children as `(local name, text)` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawAuthor {
    pub fields: Vec<(String, String)>,
}

impl RawAuthor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.fields.push((name.into(), text.into()));
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
