// src/models/elements.rs

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::models::common::{AffineTransform, Size};
use crate::models::shape::Shape;

/// A PageElement kind representing a joined collection of PageElements.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#Group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub children: Vec<PageElement>,
}

/// A visual element rendered on a page.
///
/// Exactly one of the kind fields is set by the API. Only shapes and groups are
/// modelled; the other kinds are kept as raw JSON so that new or unusual
/// element kinds never fail deserialization of the whole presentation.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#PageElement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    pub object_id: String,

    pub size: Option<Size>,

    pub transform: Option<AffineTransform>,

    /// The title of the page element. Combined with description for alt text.
    pub title: Option<String>,

    pub description: Option<String>,

    pub shape: Option<Shape>,

    pub element_group: Option<Group>,

    pub image: Option<JsonValue>,

    pub video: Option<JsonValue>,

    pub line: Option<JsonValue>,

    pub table: Option<JsonValue>,

    pub sheets_chart: Option<JsonValue>,

    pub word_art: Option<JsonValue>,
}

impl PageElement {
    /// Returns `self` or a descendant with the given object ID.
    pub fn find(&self, element_id: &str) -> Option<&PageElement> {
        if self.object_id == element_id {
            return Some(self);
        }
        self.element_group
            .as_ref()
            .and_then(|group| group.children.iter().find_map(|child| child.find(element_id)))
    }

    /// The plain text of a shape element, concatenated from its text runs.
    pub fn shape_text(&self) -> Option<String> {
        self.shape
            .as_ref()
            .and_then(|shape| shape.text.as_ref())
            .map(|text| text.plain_text())
    }
}
