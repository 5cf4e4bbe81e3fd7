use serde::{Deserialize, Serialize};

use crate::models::common::Size;
use crate::models::page::Page;

/// Represents a Google Slides presentation.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// The ID of the presentation.
    pub presentation_id: String,

    /// The size of pages in the presentation.
    pub page_size: Option<Size>,

    /// The slides in the presentation, in presentation order.
    pub slides: Option<Vec<Page>>,

    /// The title of the presentation.
    pub title: Option<String>,

    /// The slide masters in the presentation.
    pub masters: Option<Vec<Page>>,

    /// The layouts in the presentation. Each layout points at its master via
    /// `layoutProperties.masterObjectId`.
    pub layouts: Option<Vec<Page>>,

    /// The locale of the presentation, as an IETF BCP 47 language tag.
    pub locale: Option<String>,

    /// Output only. Opaque revision ID; only populated with edit access.
    pub revision_id: Option<String>,
}

impl Presentation {
    /// The slides, or an empty slice when the presentation has none.
    pub fn slides(&self) -> &[Page] {
        self.slides.as_deref().unwrap_or_default()
    }

    /// Object IDs of the slides in presentation order.
    pub fn slide_ids(&self) -> Vec<&str> {
        self.slides().iter().map(|s| s.object_id.as_str()).collect()
    }

    /// Index of the first slide that holds a page element with `element_id`,
    /// searching into groups.
    pub fn slide_index_of_element(&self, element_id: &str) -> Option<usize> {
        self.slides()
            .iter()
            .position(|slide| slide.find_element(element_id).is_some())
    }
}
