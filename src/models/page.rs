// src/models/page.rs

use serde::{Deserialize, Serialize};

use crate::models::elements::PageElement;

/// The type of the page.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#PageType
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageType {
    #[default]
    PageTypeUnspecified,
    Slide,
    Master,
    Layout,
    Notes,
    NotesMaster,
}

/// The properties specific to a page with type `LAYOUT`.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#LayoutProperties
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutProperties {
    /// The object ID of the master that this layout is based on.
    pub master_object_id: Option<String>,
    /// The name of the layout (e.g., "TITLE_AND_BODY").
    pub name: Option<String>,
    /// Output only. The human-readable name of the layout (e.g., "Title and body").
    pub display_name: Option<String>,
}

/// The properties specific to a page with type `SLIDE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideProperties {
    pub layout_object_id: Option<String>,
    pub master_object_id: Option<String>,
    pub is_skipped: Option<bool>,
}

/// A page in a presentation.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#Page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// The object ID for this page. Shares a namespace with page elements.
    pub object_id: String,

    #[serde(default)]
    pub page_type: Option<PageType>,

    /// The page elements rendered on the page.
    pub page_elements: Option<Vec<PageElement>>,

    pub revision_id: Option<String>,

    /// Slide specific properties. Only set if page_type = SLIDE.
    pub slide_properties: Option<SlideProperties>,

    /// Layout specific properties. Only set if page_type = LAYOUT.
    pub layout_properties: Option<LayoutProperties>,
}

impl Page {
    pub fn elements(&self) -> &[PageElement] {
        self.page_elements.as_deref().unwrap_or_default()
    }

    /// Finds a page element by object ID, descending into groups.
    pub fn find_element(&self, element_id: &str) -> Option<&PageElement> {
        self.elements()
            .iter()
            .find_map(|element| element.find(element_id))
    }
}

/// The thumbnail of a page, from `presentations.pages.getThumbnail`.
/// `content_url` is short-lived and needs no authorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub content_url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}
