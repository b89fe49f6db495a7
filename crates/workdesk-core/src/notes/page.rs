use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::blocks::RichText;
use crate::flatten::plain_text;

/// Iterate a page's properties as JSON objects.
fn properties(page: &Value) -> impl Iterator<Item = &Value> {
    page.get("properties")
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|props| props.values())
}

fn str_field(page: &Value, field: &str) -> String {
    page.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Plain-text title of a page: the first property of type `title`.
///
/// Returns an empty string when the page has no title property.
///
/// ```rust
/// use serde_json::json;
/// use workdesk_core::notes::page_title;
///
/// let page = json!({"properties": {
///     "Name": {"type": "title", "title": [{"plain_text": "Weekly "}, {"plain_text": "sync"}]}
/// }});
/// assert_eq!(page_title(&page), "Weekly sync");
/// assert_eq!(page_title(&json!({})), "");
/// ```
pub fn page_title(page: &Value) -> String {
    properties(page)
        .find(|prop| prop.get("type").and_then(Value::as_str) == Some("title"))
        .map(|prop| plain_text(&RichText::parse_list(prop.get("title"))))
        .unwrap_or_default()
}

/// Option names of the first `multi_select` property, in order.
pub fn page_tags(page: &Value) -> Vec<String> {
    properties(page)
        .find(|prop| prop.get("type").and_then(Value::as_str) == Some("multi_select"))
        .and_then(|prop| prop.get("multi_select"))
        .and_then(Value::as_array)
        .map(|options| {
            options
                .iter()
                .map(|option| {
                    option
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string()
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Compact reference to a page, as listed in indexes and recent updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRef {
    /// Page id.
    pub id: String,
    /// Plain-text title, empty if untitled.
    pub title: String,
    /// Link to the page.
    pub url: String,
    /// `last_edited_time` as sent by the service.
    pub last_edited: String,
    /// `created_time` as sent by the service.
    pub created: String,
    /// Names from the first multi-select property.
    pub tags: Vec<String>,
}

impl PageRef {
    /// Build a reference from a page object. Missing fields become empty.
    pub fn from_page(page: &Value) -> Self {
        Self {
            id: str_field(page, "id"),
            title: page_title(page),
            url: str_field(page, "url"),
            last_edited: str_field(page, "last_edited_time"),
            created: str_field(page, "created_time"),
            tags: page_tags(page),
        }
    }

    /// Parsed `last_edited`, if it is a valid RFC 3339 timestamp.
    pub fn last_edited_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.last_edited)
            .ok()
            .map(|at| at.with_timezone(&Utc))
    }
}
