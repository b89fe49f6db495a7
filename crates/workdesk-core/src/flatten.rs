//! Flatten content blocks into uniform text records.
//!
//! Every input block produces exactly one [`FlatBlock`], in input order.
//! Unsupported kinds produce an empty `content` instead of being dropped so
//! that positions line up with the source page. The output is a pure function
//! of the input, which keeps golden-file comparisons stable.

use serde::{Deserialize, Serialize};

use crate::blocks::{ContentBlock, RichText};

/// A block reduced to its kind tag and plain text.
///
/// Serializes as `{"type": ..., "content": ..., "checked"?: ..., "language"?: ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatBlock {
    /// Kind tag copied verbatim from the source block.
    #[serde(rename = "type")]
    pub block_type: String,
    /// Concatenated plain text of the block's spans.
    pub content: String,
    /// Kind-specific extras.
    #[serde(flatten)]
    pub extras: BlockExtras,
}

/// Fields only some block kinds carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockExtras {
    /// Set for `to_do` blocks only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    /// Set for `code` blocks only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl FlatBlock {
    /// Flatten a single block.
    pub fn from_block(block: &ContentBlock) -> Self {
        let extras = match block {
            ContentBlock::ToDo { checked, .. } => BlockExtras {
                checked: Some(*checked),
                language: None,
            },
            ContentBlock::Code { language, .. } => BlockExtras {
                checked: None,
                language: Some(language.clone()),
            },
            _ => BlockExtras::default(),
        };

        Self {
            block_type: block.kind().to_string(),
            content: plain_text(block.rich_text()),
            extras,
        }
    }
}

/// Concatenate the plain text of every span, with no separator.
///
/// ```rust
/// use workdesk_core::blocks::RichText;
/// use workdesk_core::flatten::plain_text;
///
/// let spans = [RichText::plain("Hello, "), RichText::plain("world")];
/// assert_eq!(plain_text(&spans), "Hello, world");
/// assert_eq!(plain_text(&[]), "");
/// ```
pub fn plain_text(spans: &[RichText]) -> String {
    spans.iter().map(|span| span.plain_text.as_str()).collect()
}

/// Flatten `blocks` into one record per block, preserving order.
pub fn flatten(blocks: &[ContentBlock]) -> Vec<FlatBlock> {
    blocks.iter().map(FlatBlock::from_block).collect()
}
