//! Web API tests for the feed and liveness routes.

mod common;

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum_test::TestServer;
use castfeed::datetime::parse_pub_date;
use castfeed::{sample_feed, Config, Dataset};
use common::{assert_well_formed, parse_rss, test_config, test_router, RSS_CONTENT_TYPE};
use serde_json::Value;

fn create_test_server(config: &Config) -> TestServer {
    TestServer::new(test_router(config)).expect("Failed to create test server")
}

async fn fetch_feed(server: &TestServer) -> String {
    let response = server.get("/api/feed").await;
    response.assert_status_ok();
    let body = response.text();
    assert_well_formed(&body);
    body
}

// ============================================================================
// Liveness
// ============================================================================

#[tokio::test]
async fn test_root_returns_greeting() {
    let server = create_test_server(&test_config(Dataset::Hosted));

    let response = server.get("/").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "Hello, World!");
    let content_type = response.headers().get(CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/plain"));
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let server = create_test_server(&test_config(Dataset::Hosted));

    let response = server.get("/api/feeds").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_feed_rejects_post() {
    let server = create_test_server(&test_config(Dataset::Hosted));

    let response = server.post("/api/feed").await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

// ============================================================================
// Feed document
// ============================================================================

#[tokio::test]
async fn test_feed_content_type() {
    let server = create_test_server(&test_config(Dataset::Hosted));

    let response = server.get("/api/feed").await;

    response.assert_status_ok();
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        RSS_CONTENT_TYPE
    );
}

#[tokio::test]
async fn test_feed_document_shape() {
    let server = create_test_server(&test_config(Dataset::Hosted));
    let body = fetch_feed(&server).await;

    assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss "));
    // Two-space indentation
    assert!(body.contains("\n  <channel>\n    <title>My Podcast</title>"));

    let feed = parse_rss(&body);
    assert_eq!(feed.version.as_deref(), Some("2.0"));
    assert_eq!(
        feed.content_namespace.as_deref(),
        Some("http://purl.org/rss/1.0/modules/content/")
    );
    assert_eq!(feed.title.as_deref(), Some("My Podcast"));
    assert_eq!(feed.link.as_deref(), Some("http://localhost:1323"));
}

#[tokio::test]
async fn test_feed_matches_source_data() {
    let server = create_test_server(&test_config(Dataset::Hosted));
    let feed = parse_rss(&fetch_feed(&server).await);
    let source = sample_feed();

    assert_eq!(feed.items.len(), source.channel.items.len());

    for (parsed, episode) in feed.items.iter().zip(&source.channel.items) {
        assert_eq!(parsed.guid, episode.guid);
        assert_eq!(parsed.id, Some(episode.id.to_string()));
        assert_eq!(parsed.title.as_deref(), Some(episode.title.as_str()));
        assert_eq!(parsed.pub_date.as_deref(), Some(episode.pub_date.as_str()));
        assert_eq!(
            parsed.description.as_deref(),
            Some(episode.description.as_str())
        );
        // HTML body survives escaping
        assert_eq!(parsed.content.as_deref(), Some(episode.content.as_str()));
        assert_eq!(parsed.enclosures.len(), episode.enclosures.len());
    }
}

#[tokio::test]
async fn test_item_element_order() {
    let server = create_test_server(&test_config(Dataset::Hosted));
    let feed = parse_rss(&fetch_feed(&server).await);

    for item in &feed.items {
        assert_eq!(
            item.element_order,
            vec![
                "guid",
                "id",
                "title",
                "pubDate",
                "description",
                "content:encoded",
                "enclosure"
            ]
        );
    }
}

#[tokio::test]
async fn test_local_dataset_item_count_and_no_guid() {
    let server = create_test_server(&test_config(Dataset::Local));
    let feed = parse_rss(&fetch_feed(&server).await);

    assert_eq!(feed.items.len(), 3);
    for item in &feed.items {
        assert!(item.guid.is_none());
        assert_eq!(item.element_order.first().map(String::as_str), Some("id"));
    }
    // "&" in the description is escaped on the wire and restored on parse
    assert_eq!(
        feed.items[1].description.as_deref(),
        Some("How the show gets recorded & edited.")
    );
}

#[tokio::test]
async fn test_every_item_has_enclosure() {
    for dataset in [Dataset::Hosted, Dataset::Local] {
        let server = create_test_server(&test_config(dataset));
        let feed = parse_rss(&fetch_feed(&server).await);

        for item in &feed.items {
            assert!(!item.enclosures.is_empty(), "{dataset}: missing enclosure");
            for enclosure in &item.enclosures {
                assert!(!enclosure.url.is_empty());
                assert!(!enclosure.media_type.is_empty());
            }
        }
    }
}

#[tokio::test]
async fn test_pub_dates_non_decreasing() {
    for dataset in [Dataset::Hosted, Dataset::Local] {
        let mut config = test_config(dataset);
        config.feed.timezone = "America/Chicago".to_string();
        let server = create_test_server(&config);
        let feed = parse_rss(&fetch_feed(&server).await);

        let dates: Vec<_> = feed
            .items
            .iter()
            .map(|i| parse_pub_date(i.pub_date.as_deref().unwrap()).unwrap())
            .collect();
        assert!(dates.windows(2).all(|w| w[0] <= w[1]), "{dataset}: {dates:?}");
    }
}

#[tokio::test]
async fn test_configured_channel_overrides() {
    let mut config = test_config(Dataset::Hosted);
    config.feed.title = Some("Renamed <Show>".to_string());
    config.feed.link = Some("https://podcast.example.com".to_string());
    let server = create_test_server(&config);

    let body = fetch_feed(&server).await;
    assert!(body.contains("<title>Renamed &lt;Show&gt;</title>"));

    let feed = parse_rss(&body);
    assert_eq!(feed.title.as_deref(), Some("Renamed <Show>"));
    assert_eq!(feed.link.as_deref(), Some("https://podcast.example.com"));
}

#[tokio::test]
async fn test_control_characters_in_channel_stay_well_formed() {
    let mut config = test_config(Dataset::Hosted);
    config.feed.title = Some("My\u{1}Pod\u{1F}cast".to_string());
    config.feed.link = Some("http://localhost:1323/\u{0}feed".to_string());
    let server = create_test_server(&config);

    let body = fetch_feed(&server).await;

    let doc = roxmltree::Document::parse(&body).unwrap();
    let channel = doc
        .root_element()
        .children()
        .find(|n| n.has_tag_name("channel"))
        .unwrap();
    let text_of = |tag: &str| {
        channel
            .children()
            .find(|n| n.has_tag_name(tag))
            .and_then(|n| n.text())
            .map(str::to_string)
    };
    assert_eq!(text_of("title").as_deref(), Some("My\u{FFFD}Pod\u{FFFD}cast"));
    assert_eq!(
        text_of("link").as_deref(),
        Some("http://localhost:1323/\u{FFFD}feed")
    );
}

#[tokio::test]
async fn test_feed_parses_with_feed_rs() {
    for (dataset, expected) in [(Dataset::Hosted, 2), (Dataset::Local, 3)] {
        let server = create_test_server(&test_config(dataset));
        let body = fetch_feed(&server).await;

        let feed = feed_rs::parser::parse(body.as_bytes()).expect("feed should parse");

        assert_eq!(feed.entries.len(), expected);
        let mut previous = None;
        for entry in &feed.entries {
            let published = entry.published.expect("pubDate should parse");
            if let Some(prev) = previous {
                assert!(prev <= published);
            }
            previous = Some(published);

            assert!(!entry.media.is_empty());
            let content = &entry.media[0].content[0];
            assert!(content.url.is_some());
            assert!(content.content_type.is_some());
        }
    }
}
