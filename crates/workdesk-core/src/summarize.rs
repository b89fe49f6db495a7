//! Length-bounded page summaries.
//!
//! The summary is built from the flattened blocks' text, one paragraph per
//! line:
//!
//! 1. If the whole text fits in the budget it is returned as is.
//! 2. Otherwise the first paragraph is always kept.
//! 3. Paragraphs mentioning a [`SUMMARY_KEYWORDS`] entry are added next, in
//!    page order, wherever they fit.
//! 4. Remaining paragraphs are then added in page order until the first one
//!    that does not fit. A paragraph string-identical to one already included
//!    is not repeated.
//!
//! Lengths are counted in characters (Unicode scalar values), never bytes.

use crate::flatten::FlatBlock;

/// Default summary budget, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 500;

/// Paragraphs containing one of these (case-insensitively) are preferred.
pub const SUMMARY_KEYWORDS: [&str; 6] = [
    "important",
    "key",
    "main",
    "critical",
    "essential",
    "conclusion",
];

/// Summarize flattened blocks into at most `max_length` characters.
///
/// ```rust
/// use workdesk_core::flatten::{BlockExtras, FlatBlock};
/// use workdesk_core::summarize::summarize;
///
/// let paragraph = |text: &str| FlatBlock {
///     block_type: "paragraph".to_string(),
///     content: text.to_string(),
///     extras: BlockExtras::default(),
/// };
///
/// let short = [paragraph("Hello"), paragraph("World")];
/// assert_eq!(summarize(&short, 500), "Hello\nWorld");
///
/// let long = [
///     paragraph("Intro"),
///     paragraph("Detail one"),
///     paragraph("This is a key finding"),
///     paragraph("Detail two"),
/// ];
/// assert_eq!(summarize(&long, 30), "Intro\nThis is a key finding");
/// ```
pub fn summarize(blocks: &[FlatBlock], max_length: usize) -> String {
    let full_text = blocks
        .iter()
        .map(|block| block.content.as_str())
        .filter(|content| !content.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if char_len(&full_text) <= max_length {
        return full_text;
    }

    // Blocks may carry embedded newlines; each line is its own paragraph.
    let paragraphs: Vec<&str> = full_text.split('\n').collect();
    summarize_paragraphs(&paragraphs, max_length)
}

fn summarize_paragraphs(paragraphs: &[&str], max_length: usize) -> String {
    let Some((first, rest)) = paragraphs.split_first() else {
        return String::new();
    };

    let mut summary = Summary::start(first, max_length);

    for paragraph in rest {
        if summary.len >= max_length {
            break;
        }
        if mentions_keyword(paragraph) && summary.fits(paragraph) {
            summary.push(paragraph);
        }
    }

    for paragraph in rest {
        if !summary.fits(paragraph) {
            break;
        }
        if !summary.includes(paragraph) {
            summary.push(paragraph);
        }
    }

    summary.text
}

/// Summary under construction, tracking its length and included paragraphs.
struct Summary<'a> {
    text: String,
    len: usize,
    included: Vec<&'a str>,
    max_length: usize,
}

impl<'a> Summary<'a> {
    /// Begin with the first paragraph, cut to the budget if it alone exceeds it.
    fn start(first: &'a str, max_length: usize) -> Self {
        let text: String = first.chars().take(max_length).collect();
        Self {
            len: char_len(&text),
            text,
            included: vec![first],
            max_length,
        }
    }

    fn fits(&self, paragraph: &str) -> bool {
        self.len + 1 + char_len(paragraph) <= self.max_length
    }

    fn includes(&self, paragraph: &str) -> bool {
        self.included.contains(&paragraph)
    }

    fn push(&mut self, paragraph: &'a str) {
        self.text.push('\n');
        self.text.push_str(paragraph);
        self.len += 1 + char_len(paragraph);
        self.included.push(paragraph);
    }
}

fn mentions_keyword(paragraph: &str) -> bool {
    let lower = paragraph.to_lowercase();
    SUMMARY_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
