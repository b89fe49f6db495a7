#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use workdesk_core::{
    ContentBlock, DocumentCache, NotesClient, NotesConfig, NotesService, flatten, summarize,
};

const FIXTURE: &str = include_str!("fixtures/page_blocks.json");

fn fixture() -> Value {
    serde_json::from_str(FIXTURE).unwrap()
}

fn fixture_blocks() -> Vec<ContentBlock> {
    let list = fixture();
    ContentBlock::from_json_list(list["results"].as_array().unwrap())
}

#[test]
fn test_fixture_flattens_to_golden_records() {
    let flat = flatten(&fixture_blocks());

    assert_eq!(
        serde_json::to_value(&flat).unwrap(),
        json!([
            {"type": "heading_1", "content": "Q2 Planning"},
            {"type": "paragraph", "content": "This page tracks the team's plan for the quarter."},
            {"type": "heading_2", "content": "Goals"},
            {"type": "bulleted_list_item", "content": "Ship the offline cache"},
            {"type": "bulleted_list_item", "content": "Cut API usage in half"},
            {"type": "to_do", "content": "Review budget", "checked": false},
            {"type": "to_do", "content": "Book venue", "checked": true},
            {"type": "image", "content": ""},
            {"type": "paragraph", "content": "The key risk is vendor latency."},
            {"type": "code", "content": "cargo test --workspace", "language": "shell"},
            {"type": "toggle", "content": "Open questions"},
            {"type": "paragraph", "content": ""},
            {"type": "numbered_list_item", "content": "Draft the proposal"},
            {"type": "heading_3", "content": "Conclusion"},
            {"type": "paragraph", "content": "Main conclusion: focus on caching."},
        ])
    );
}

#[test]
fn test_fixture_summaries_at_several_budgets() {
    let flat = flatten(&fixture_blocks());

    // Whole page is 272 characters once empty blocks are dropped
    let full = summarize(&flat, 300);
    assert_eq!(full.chars().count(), 272);
    assert!(full.starts_with("Q2 Planning\nThis page tracks"));
    assert!(!full.contains("\n\n"));

    assert_eq!(
        summarize(&flat, 100),
        "Q2 Planning\nThe key risk is vendor latency.\nConclusion\nMain conclusion: focus on caching."
    );

    assert_eq!(
        summarize(&flat, 150),
        "Q2 Planning\n\
         The key risk is vendor latency.\n\
         Conclusion\n\
         Main conclusion: focus on caching.\n\
         This page tracks the team's plan for the quarter.\n\
         Goals"
    );
}

#[tokio::test]
async fn test_summary_is_served_from_cache_on_second_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/pages/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "page",
            "id": "p1",
            "url": "https://notes.example/p1",
            "created_time": "2024-04-01T09:00:00.000Z",
            "last_edited_time": "2024-05-01T10:00:00.000Z",
            "properties": {"Name": {"type": "title", "title": [{"plain_text": "Q2 Planning"}]}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/blocks/p1/children"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let config = NotesConfig {
        base_url: format!("{}/v1", server.uri()),
        ..NotesConfig::default()
    };
    let client = NotesClient::with_timeout(&config, "secret_test", Duration::from_secs(5)).unwrap();
    let temp = TempDir::new().unwrap();
    let service = NotesService::new(client, DocumentCache::open(temp.path()).unwrap());

    let first = service.page_summary("p1", 100, false).await.unwrap();
    let second = service.page_summary("p1", 100, false).await.unwrap();
    assert_eq!(first, second);
    assert!(first.starts_with("Q2 Planning\nThe key risk"));

    let page = service.simplified_page("p1", 3, false).await.unwrap();
    assert_eq!(page.title, "Q2 Planning");
    assert_eq!(page.blocks.len(), 3);

    let keys: Vec<_> = service
        .cache()
        .entries()
        .unwrap()
        .into_iter()
        .map(|entry| entry.key.to_string())
        .collect();
    assert_eq!(keys, vec!["p1", "p1_children"]);
}
