// src/models/text.rs

use serde::{Deserialize, Serialize};

use crate::models::text_element::TextElement;

/// Represents the textual content of a Shape or TableCell.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/text#TextContent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    /// Output only. The text contents broken down into its component parts.
    pub text_elements: Option<Vec<TextElement>>,
}

impl TextContent {
    /// Concatenates the content of every text run, preserving newlines.
    pub fn plain_text(&self) -> String {
        self.text_elements
            .iter()
            .flatten()
            .filter_map(|element| element.text_run.as_ref())
            .filter_map(|run| run.content.as_deref())
            .collect()
    }
}
