#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Mutex, Once};

use oai_harvest_core::PageRequest;
use oai_harvest_engine::{HarvestEvent, PageSource, ProgressSink, TransportError};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(harvest_logging::initialize_for_tests);
}

pub struct EntrySpec<'a> {
    pub id: &'a str,
    pub created: &'a str,
    pub updated: Option<&'a str>,
    pub title: &'a str,
    pub categories: &'a str,
}

impl<'a> EntrySpec<'a> {
    pub fn new(id: &'a str, categories: &'a str) -> Self {
        Self {
            id,
            created: "2020-01-01",
            updated: None,
            title: "A Title",
            categories,
        }
    }

    pub fn updated(mut self, date: &'a str) -> Self {
        self.updated = Some(date);
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn to_xml(&self) -> String {
        let updated = self
            .updated
            .map(|d| format!("<updated>{d}</updated>"))
            .unwrap_or_default();
        format!(
            r#"<record>
  <header><identifier>oai:arXiv.org:{id}</identifier><datestamp>{created}</datestamp></header>
  <metadata>
    <arXiv xmlns="http://arxiv.org/OAI/arXiv/">
      <id>{id}</id>
      <created>{created}</created>
      {updated}
      <authors><author><keyname>Doe</keyname><forenames>Jane</forenames></author></authors>
      <title>{title}</title>
      <categories>{categories}</categories>
      <abstract>Abstract of {id}.</abstract>
    </arXiv>
  </metadata>
</record>"#,
            id = self.id,
            created = self.created,
            title = self.title,
            categories = self.categories,
        )
    }
}

pub fn malformed_record_xml(id: &str) -> String {
    format!(
        r#"<record>
  <header><identifier>oai:arXiv.org:{id}</identifier></header>
  <metadata>
    <arXiv xmlns="http://arxiv.org/OAI/arXiv/">
      <id>{id}</id>
      <created>2020-01-01</created>
      <categories>cs.LG</categories>
    </arXiv>
  </metadata>
</record>"#
    )
}

pub fn deleted_record_xml(id: &str) -> String {
    format!(
        r#"<record><header status="deleted"><identifier>oai:arXiv.org:{id}</identifier></header></record>"#
    )
}

pub fn page_xml(records: &[String], token: Option<&str>) -> String {
    let token = match token {
        Some(value) => format!(r#"<resumptionToken cursor="0">{value}</resumptionToken>"#),
        None => "<resumptionToken/>".to_string(),
    };
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<OAI-PMH xmlns="http://www.openarchives.org/OAI/2.0/">
  <responseDate>2024-01-01T00:00:00Z</responseDate>
  <ListRecords>
    {records}
    {token}
  </ListRecords>
</OAI-PMH>"#,
        records = records.join("\n"),
    )
}

/// Serves queued responses in order and remembers every request it saw.
#[derive(Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<String, TransportError>>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl ScriptedSource {
    pub fn new<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Result<String, TransportError>>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn pages<I>(pages: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self::new(pages.into_iter().map(Ok))
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PageSource for ScriptedSource {
    async fn fetch(&self, request: &PageRequest) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted response left")
    }
}

#[derive(Default)]
pub struct CollectingSink {
    pub events: std::sync::Arc<Mutex<Vec<HarvestEvent>>>,
}

impl ProgressSink for CollectingSink {
    fn emit(&self, event: HarvestEvent) {
        self.events.lock().unwrap().push(event);
    }
}
