use serde::{Deserialize, Serialize};

use crate::models::text::TextContent;

/// A placeholder reference on a shape (title, body, ...).
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#Placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    /// e.g. "TITLE", "BODY", "CENTERED_TITLE".
    #[serde(rename = "type")]
    pub placeholder_type: Option<String>,
    pub index: Option<i32>,
    pub parent_object_id: Option<String>,
}

/// A PageElement kind representing a generic shape.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#Shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// The type of the shape, e.g. "TEXT_BOX" or "RECTANGLE". Kept as the raw
    /// API string since the shape catalogue keeps growing.
    pub shape_type: Option<String>,

    pub text: Option<TextContent>,

    pub placeholder: Option<Placeholder>,
}

impl Shape {
    pub fn is_text_box(&self) -> bool {
        self.shape_type.as_deref() == Some("TEXT_BOX")
    }
}
