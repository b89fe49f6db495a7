//! Typed content blocks from the notes service.
//!
//! The service returns blocks as loosely shaped JSON:
//!
//! ```json
//! {"type": "to_do", "to_do": {"rich_text": [{"plain_text": "Ship it"}], "checked": true}}
//! ```
//!
//! [`ContentBlock::from_json`] turns that into one variant per block kind.
//! Parsing never fails: a missing payload or span list yields empty text, and
//! kinds we do not extract text from become [`ContentBlock::Unsupported`] so
//! their position in the page is preserved.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One span of rich text. Only the plain text is kept; annotations and links
/// are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    /// Unformatted text of the span.
    #[serde(default)]
    pub plain_text: String,
}

impl RichText {
    /// Span with the given text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
        }
    }

    /// Parse a rich-text array, tolerating missing fields and non-array input.
    pub fn parse_list(value: Option<&Value>) -> Vec<Self> {
        value
            .and_then(Value::as_array)
            .map(|spans| {
                spans
                    .iter()
                    .map(|span| Self {
                        plain_text: span
                            .get("plain_text")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A block of page content, one variant per supported kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Plain paragraph.
    Paragraph(Vec<RichText>),
    /// Top-level heading.
    Heading1(Vec<RichText>),
    /// Second-level heading.
    Heading2(Vec<RichText>),
    /// Third-level heading.
    Heading3(Vec<RichText>),
    /// Bulleted list item.
    BulletedListItem(Vec<RichText>),
    /// Numbered list item.
    NumberedListItem(Vec<RichText>),
    /// Checkbox item.
    ToDo {
        /// Item text.
        text: Vec<RichText>,
        /// Whether the box is ticked.
        checked: bool,
    },
    /// Collapsible toggle (only its summary line is extracted).
    Toggle(Vec<RichText>),
    /// Code listing.
    Code {
        /// Source text.
        text: Vec<RichText>,
        /// Language label, empty when unset.
        language: String,
    },
    /// Any other kind (images, tables, embeds, ...), or a block without a tag.
    Unsupported {
        /// The block's `type` tag as received, empty if it had none.
        kind: String,
    },
}

impl ContentBlock {
    /// Wire tag for paragraphs.
    pub const PARAGRAPH: &'static str = "paragraph";
    /// Wire tag for level-1 headings.
    pub const HEADING_1: &'static str = "heading_1";
    /// Wire tag for level-2 headings.
    pub const HEADING_2: &'static str = "heading_2";
    /// Wire tag for level-3 headings.
    pub const HEADING_3: &'static str = "heading_3";
    /// Wire tag for bulleted list items.
    pub const BULLETED_LIST_ITEM: &'static str = "bulleted_list_item";
    /// Wire tag for numbered list items.
    pub const NUMBERED_LIST_ITEM: &'static str = "numbered_list_item";
    /// Wire tag for to-do items.
    pub const TO_DO: &'static str = "to_do";
    /// Wire tag for toggles.
    pub const TOGGLE: &'static str = "toggle";
    /// Wire tag for code blocks.
    pub const CODE: &'static str = "code";

    /// Build a block from the service's JSON shape.
    ///
    /// Unknown tags become [`ContentBlock::Unsupported`] carrying the tag. A
    /// missing or non-string `type` yields `Unsupported` with an empty kind;
    /// the original value is not kept.
    ///
    /// ```rust
    /// use serde_json::json;
    /// use workdesk_core::blocks::{ContentBlock, RichText};
    ///
    /// let block = ContentBlock::from_json(&json!({
    ///     "type": "code",
    ///     "code": {"rich_text": [{"plain_text": "fn main() {}"}], "language": "rust"}
    /// }));
    /// assert_eq!(block, ContentBlock::Code {
    ///     text: vec![RichText::plain("fn main() {}")],
    ///     language: "rust".to_string(),
    /// });
    ///
    /// let image = ContentBlock::from_json(&json!({"type": "image", "image": {}}));
    /// assert_eq!(image.kind(), "image");
    /// ```
    pub fn from_json(value: &Value) -> Self {
        let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
        let payload = value.get(kind);
        let text = || RichText::parse_list(payload.and_then(|p| p.get("rich_text")));

        match kind {
            Self::PARAGRAPH => Self::Paragraph(text()),
            Self::HEADING_1 => Self::Heading1(text()),
            Self::HEADING_2 => Self::Heading2(text()),
            Self::HEADING_3 => Self::Heading3(text()),
            Self::BULLETED_LIST_ITEM => Self::BulletedListItem(text()),
            Self::NUMBERED_LIST_ITEM => Self::NumberedListItem(text()),
            Self::TO_DO => Self::ToDo {
                text: text(),
                checked: payload
                    .and_then(|p| p.get("checked"))
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            },
            Self::TOGGLE => Self::Toggle(text()),
            Self::CODE => Self::Code {
                text: text(),
                language: payload
                    .and_then(|p| p.get("language"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            },
            other => Self::Unsupported {
                kind: other.to_string(),
            },
        }
    }

    /// Parse a list of blocks, preserving order.
    pub fn from_json_list(values: &[Value]) -> Vec<Self> {
        values.iter().map(Self::from_json).collect()
    }

    /// The block's kind tag, exactly as it appears on the wire.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Paragraph(_) => Self::PARAGRAPH,
            Self::Heading1(_) => Self::HEADING_1,
            Self::Heading2(_) => Self::HEADING_2,
            Self::Heading3(_) => Self::HEADING_3,
            Self::BulletedListItem(_) => Self::BULLETED_LIST_ITEM,
            Self::NumberedListItem(_) => Self::NUMBERED_LIST_ITEM,
            Self::ToDo { .. } => Self::TO_DO,
            Self::Toggle(_) => Self::TOGGLE,
            Self::Code { .. } => Self::CODE,
            Self::Unsupported { kind } => kind.as_str(),
        }
    }

    /// Rich-text spans of the block; empty for unsupported kinds.
    #[must_use]
    pub fn rich_text(&self) -> &[RichText] {
        match self {
            Self::Paragraph(text)
            | Self::Heading1(text)
            | Self::Heading2(text)
            | Self::Heading3(text)
            | Self::BulletedListItem(text)
            | Self::NumberedListItem(text)
            | Self::Toggle(text)
            | Self::ToDo { text, .. }
            | Self::Code { text, .. } => text.as_slice(),
            Self::Unsupported { .. } => &[],
        }
    }
}
