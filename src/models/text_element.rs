// src/models/text_element.rs

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Represents a segment of text with consistent styling within a paragraph.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/text#TextRun
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    /// The text content of this run.
    pub content: Option<String>,
    /// The styling applied to this run, kept raw.
    pub style: Option<JsonValue>,
}

/// A single logical element in the text stream of a Shape or TableCell.
/// Paragraph markers and auto text are carried as raw JSON; only runs are
/// needed for text lookups.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/text#TextElement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub start_index: Option<u32>,
    pub end_index: Option<u32>,
    pub text_run: Option<TextRun>,
    pub paragraph_marker: Option<JsonValue>,
    pub auto_text: Option<JsonValue>,
}
