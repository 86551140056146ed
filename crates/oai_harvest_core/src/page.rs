use roxmltree::{Document, Node};

use crate::{ProtocolError, RawAuthor, RawEntry};

pub const OAI_NS: &str = "http://www.openarchives.org/OAI/2.0/";
pub const ARXIV_NS: &str = "http://arxiv.org/OAI/arXiv/";

/// OAI error code that means "the list is empty", not "the request failed".
const NO_RECORDS_MATCH: &str = "noRecordsMatch";

/// One parsed ListRecords response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListRecordsPage {
    pub entries: Vec<RawEntry>,
    /// `None` when the response declares the list complete.
    pub resumption_token: Option<ResumptionToken>,
}

/// Opaque continuation token plus the optional progress attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumptionToken {
    pub value: String,
    pub cursor: Option<u64>,
    pub complete_list_size: Option<u64>,
}

/// Parses an OAI-PMH ListRecords response body.
///
/// An absent or empty `<resumptionToken>` yields `resumption_token: None`.
pub fn parse_list_records(xml: &str) -> Result<ListRecordsPage, ProtocolError> {
    let doc = Document::parse(xml).map_err(|err| ProtocolError::InvalidXml(err.to_string()))?;
    let root = doc.root_element();
    if !root.has_tag_name((OAI_NS, "OAI-PMH")) {
        return Err(ProtocolError::UnexpectedRoot(
            root.tag_name().name().to_string(),
        ));
    }

    if let Some(error) = child(root, OAI_NS, "error") {
        let code = error.attribute("code").unwrap_or_default().to_string();
        if code == NO_RECORDS_MATCH {
            return Ok(ListRecordsPage::default());
        }
        return Err(ProtocolError::OaiError {
            code,
            message: text_of(error).trim().to_string(),
        });
    }

    let list = child(root, OAI_NS, "ListRecords").ok_or(ProtocolError::MissingListRecords)?;

    let entries = list
        .children()
        .filter(|node| node.has_tag_name((OAI_NS, "record")))
        .map(parse_record)
        .collect();

    let resumption_token = child(list, OAI_NS, "resumptionToken").and_then(|node| {
        let value = text_of(node).trim().to_string();
        if value.is_empty() {
            return None;
        }
        Some(ResumptionToken {
            value,
            cursor: node.attribute("cursor").and_then(|v| v.parse().ok()),
            complete_list_size: node
                .attribute("completeListSize")
                .and_then(|v| v.parse().ok()),
        })
    });

    Ok(ListRecordsPage {
        entries,
        resumption_token,
    })
}

fn parse_record(record: Node) -> RawEntry {
    let mut entry = RawEntry::default();

    if let Some(header) = child(record, OAI_NS, "header") {
        entry.deleted = header.attribute("status") == Some("deleted");
        for node in header.children().filter(Node::is_element) {
            match node.tag_name().name() {
                "identifier" => entry.header_identifier = Some(text_of(node).trim().to_string()),
                "datestamp" => entry.datestamp = Some(text_of(node).trim().to_string()),
                "setSpec" => entry.set_specs.push(text_of(node).trim().to_string()),
                _ => {}
            }
        }
    }

    let metadata = child(record, OAI_NS, "metadata").and_then(|m| child(m, ARXIV_NS, "arXiv"));
    if let Some(metadata) = metadata {
        for node in metadata.children().filter(Node::is_element) {
            if node.has_tag_name((ARXIV_NS, "authors")) {
                let authors = node
                    .children()
                    .filter(|a| a.has_tag_name((ARXIV_NS, "author")))
                    .map(|a| RawAuthor {
                        fields: element_fields(a),
                    })
                    .collect();
                entry.authors = Some(authors);
            } else {
                entry
                    .fields
                    .push((node.tag_name().name().to_string(), text_of(node)));
            }
        }
    }

    entry
}

fn element_fields(node: Node) -> Vec<(String, String)> {
    node.children()
        .filter(Node::is_element)
        .map(|field| (field.tag_name().name().to_string(), text_of(field)))
        .collect()
}

fn child<'a, 'input>(node: Node<'a, 'input>, ns: &str, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name((ns, name)))
}

/// Concatenated text of all descendant text nodes.
fn text_of(node: Node) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}
