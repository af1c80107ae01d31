//! Test helpers for the feed server integration tests.
//!
//! Provides router construction and a strict RSS reader used to check
//! served documents element by element.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use castfeed::web::handlers::AppState;
use castfeed::{create_router, Config, Dataset};

/// Content type the feed route must return.
pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

/// Create a configuration for the given dataset bound to a random local port.
pub fn test_config(dataset: Dataset) -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.logging.file = String::new();
    config.feed.dataset = dataset;
    config
}

/// Create the application router for a configuration.
pub fn test_router(config: &Config) -> Router {
    let state = Arc::new(AppState::new(config.feed.clone()));
    create_router(state, &config.cors_origins())
}

/// Media reference read from an `<enclosure>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEnclosure {
    pub url: String,
    pub media_type: String,
}

/// Item read from an `<item>` element.
#[derive(Debug, Clone, Default)]
pub struct ParsedItem {
    pub guid: Option<String>,
    pub id: Option<String>,
    pub title: Option<String>,
    pub pub_date: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub enclosures: Vec<ParsedEnclosure>,
    /// Child element names in document order.
    pub element_order: Vec<String>,
}

/// Document read from an RSS response body.
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    pub version: Option<String>,
    pub content_namespace: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub items: Vec<ParsedItem>,
}

fn attribute(e: &BytesStart<'_>, name: &str) -> Option<String> {
    e.try_get_attribute(name)
        .expect("malformed attribute")
        .map(|a| a.unescape_value().expect("bad attribute value").into_owned())
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

/// Check a document against a conforming XML 1.0 parser, which also rejects
/// characters outside the XML character range.
pub fn assert_well_formed(xml: &str) {
    if let Err(e) = roxmltree::Document::parse(xml) {
        panic!("document is not well-formed XML: {e}\n{xml}");
    }
}

/// Parse an RSS document, panicking if it is not well-formed XML.
pub fn parse_rss(xml: &str) -> ParsedFeed {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut feed = ParsedFeed::default();
    let mut path: Vec<String> = Vec::new();
    let mut current_item: Option<ParsedItem> = None;

    loop {
        match reader.read_event().expect("XML must be well-formed") {
            Event::Start(e) => {
                let name = element_name(&e);
                match name.as_str() {
                    "rss" => {
                        feed.version = attribute(&e, "version");
                        feed.content_namespace = attribute(&e, "xmlns:content");
                    }
                    "item" => current_item = Some(ParsedItem::default()),
                    _ => {
                        if let Some(item) = current_item.as_mut() {
                            item.element_order.push(name.clone());
                        }
                    }
                }
                path.push(name);
            }
            Event::Empty(e) => {
                let name = element_name(&e);
                if let Some(item) = current_item.as_mut() {
                    if name == "enclosure" {
                        item.enclosures.push(ParsedEnclosure {
                            url: attribute(&e, "url").unwrap_or_default(),
                            media_type: attribute(&e, "type").unwrap_or_default(),
                        });
                    }
                    item.element_order.push(name);
                }
            }
            Event::Text(e) => {
                let text = e.unescape().expect("bad text").into_owned();
                let element = path.last().map(String::as_str).unwrap_or_default();
                match current_item.as_mut() {
                    Some(item) => match element {
                        "guid" => item.guid = Some(text),
                        "id" => item.id = Some(text),
                        "title" => item.title = Some(text),
                        "pubDate" => item.pub_date = Some(text),
                        "description" => item.description = Some(text),
                        "content:encoded" => item.content = Some(text),
                        _ => {}
                    },
                    None => match element {
                        "title" => feed.title = Some(text),
                        "link" => feed.link = Some(text),
                        _ => {}
                    },
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"item" {
                    if let Some(item) = current_item.take() {
                        feed.items.push(item);
                    }
                }
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    assert!(path.is_empty(), "unclosed elements: {path:?}");
    feed
}
