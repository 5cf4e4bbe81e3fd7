//! Read-only lookups against a live presentation: slide positions, element
//! IDs by text, raw slide data, page size and a Markdown rendering of the
//! text.

use crate::client::GoogleClient;
use crate::converters::markdown::extract_text_from_presentation;
use crate::errors::{Result, SlidesApiError};
use crate::helpers::{self, dimension_to_points};
use crate::models::elements::PageElement;
use crate::transport::Transport;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

/// Zero-based position of `slide_id` in the presentation.
pub async fn slide_id_to_index<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
) -> Result<usize> {
    let presentation = client.get_presentation(presentation_id).await?;
    helpers::slide_id_to_index(&presentation.slide_ids(), slide_id)
}

/// Object ID of the slide at `index`.
pub async fn index_to_slide_id<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    index: usize,
) -> Result<String> {
    let presentation = client.get_presentation(presentation_id).await?;
    helpers::index_to_slide_id(&presentation.slide_ids(), index).map(str::to_string)
}

/// Depth-first list of `elements` and their group descendants.
fn flatten<'a>(elements: &'a [PageElement], out: &mut Vec<&'a PageElement>) {
    for element in elements {
        out.push(element);
        if let Some(group) = &element.element_group {
            flatten(&group.children, out);
        }
    }
}

fn text_contains(element: &PageElement, needle_lower: &str) -> bool {
    element
        .shape_text()
        .is_some_and(|text| text.to_lowercase().contains(needle_lower))
}

/// Finds the first element whose text contains `name` or whose title equals
/// it, ignoring case. Searches one slide when `slide_id` is given, otherwise
/// the whole deck in order.
pub async fn get_element_id_by_name<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: Option<&str>,
    name: &str,
) -> Result<Option<String>> {
    let presentation = client.get_presentation(presentation_id).await?;
    let slides = match slide_id {
        Some(slide_id) => {
            let slide = presentation
                .slides()
                .iter()
                .find(|slide| slide.object_id == slide_id)
                .ok_or_else(|| SlidesApiError::SlideNotFound(slide_id.to_string()))?;
            std::slice::from_ref(slide)
        }
        None => presentation.slides(),
    };

    let needle = name.to_lowercase();
    let mut elements = Vec::new();
    for slide in slides {
        flatten(slide.elements(), &mut elements);
    }
    Ok(elements
        .into_iter()
        .find(|element| {
            text_contains(element, &needle)
                || element
                    .title
                    .as_deref()
                    .is_some_and(|title| title.to_lowercase() == needle)
        })
        .map(|element| element.object_id.clone()))
}

/// IDs of every shape whose text contains `search`, ignoring case, in slide order.
pub async fn find_element_ids<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    search: &str,
) -> Result<Vec<String>> {
    let presentation = client.get_presentation(presentation_id).await?;
    let needle = search.to_lowercase();
    let mut elements = Vec::new();
    for slide in presentation.slides() {
        flatten(slide.elements(), &mut elements);
    }
    Ok(elements
        .into_iter()
        .filter(|element| text_contains(element, &needle))
        .map(|element| element.object_id.clone())
        .collect())
}

/// Partial-response mask for [`get_slide_data`].
const SLIDE_DATA_FIELDS: &str = "slides(objectId,pageElements)";

/// The raw `objectId` and `pageElements` of one slide, or an empty object
/// when no slide has that ID.
pub async fn get_slide_data<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
) -> Result<JsonValue> {
    let mut presentation = client
        .get_presentation_json(presentation_id, Some(SLIDE_DATA_FIELDS))
        .await?;
    let slide = presentation
        .get_mut("slides")
        .and_then(JsonValue::as_array_mut)
        .and_then(|slides| {
            slides
                .iter_mut()
                .find(|slide| slide.get("objectId").and_then(JsonValue::as_str) == Some(slide_id))
        })
        .map(JsonValue::take);
    Ok(slide.unwrap_or_else(|| JsonValue::Object(Map::new())))
}

/// The presentation's page size in points. Missing dimensions read as 0.
pub async fn get_page_size<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
) -> Result<PageSize> {
    let presentation = client.get_presentation(presentation_id).await?;
    let size = presentation.page_size.as_ref();
    Ok(PageSize {
        width: dimension_to_points(size.and_then(|s| s.width.as_ref())),
        height: dimension_to_points(size.and_then(|s| s.height.as_ref())),
    })
}

/// The text of every slide as Markdown.
pub async fn get_presentation_text<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
) -> Result<String> {
    let presentation = client.get_presentation(presentation_id).await?;
    Ok(extract_text_from_presentation(&presentation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::quiet_client;
    use crate::transport::mock::{json_body, MockTransport};
    use reqwest::Method;
    use serde_json::json;

    fn shape(id: &str, text: &str) -> JsonValue {
        json!({"objectId": id, "shape": {"shapeType": "TEXT_BOX", "text": {
            "textElements": [{"textRun": {"content": text}}]
        }}})
    }

    fn client() -> GoogleClient<MockTransport> {
        let presentation = json!({
            "presentationId": "p1",
            "title": "Deck",
            "pageSize": {
                "width": {"magnitude": 9144000, "unit": "EMU"},
                "height": {"magnitude": 5143500, "unit": "EMU"}
            },
            "slides": [
                {"objectId": "s1", "pageElements": [
                    shape("title1", "Quarterly Review\n"),
                    {"objectId": "logo", "title": "Company Logo", "image": {}}
                ]},
                {"objectId": "s2", "pageElements": [
                    shape("body2", "Review of risks\n"),
                    {"objectId": "grp", "elementGroup": {"children": [shape("inner", "Risk matrix\n")]}}
                ]}
            ]
        });
        quiet_client(MockTransport::new(move |_| json_body(presentation.clone())))
    }

    #[tokio::test]
    async fn slide_lookups_are_inverse() {
        let client = client();
        assert_eq!(slide_id_to_index(&client, "p1", "s2").await.unwrap(), 1);
        assert_eq!(index_to_slide_id(&client, "p1", 0).await.unwrap(), "s1");
        assert!(matches!(
            index_to_slide_id(&client, "p1", 2).await,
            Err(SlidesApiError::SlideIndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(matches!(
            slide_id_to_index(&client, "p1", "nope").await,
            Err(SlidesApiError::SlideNotFound(_))
        ));
    }

    #[tokio::test]
    async fn element_by_text_or_title() {
        let client = client();
        assert_eq!(
            get_element_id_by_name(&client, "p1", None, "REVIEW").await.unwrap(),
            Some("title1".to_string())
        );
        assert_eq!(
            get_element_id_by_name(&client, "p1", Some("s2"), "review").await.unwrap(),
            Some("body2".to_string())
        );
        assert_eq!(
            get_element_id_by_name(&client, "p1", None, "company logo").await.unwrap(),
            Some("logo".to_string())
        );
        // Titles must match exactly, text only needs to contain the name.
        assert_eq!(
            get_element_id_by_name(&client, "p1", None, "logo").await.unwrap(),
            None
        );
        assert!(matches!(
            get_element_id_by_name(&client, "p1", Some("s9"), "x").await,
            Err(SlidesApiError::SlideNotFound(id)) if id == "s9"
        ));
    }

    #[tokio::test]
    async fn find_searches_groups_too() {
        let client = client();
        assert_eq!(
            find_element_ids(&client, "p1", "risk").await.unwrap(),
            vec!["body2".to_string(), "inner".to_string()]
        );
        assert!(find_element_ids(&client, "p1", "absent").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn slide_data_is_raw_and_masked() {
        let client = client();
        let slide = get_slide_data(&client, "p1", "s2").await.unwrap();
        assert_eq!(slide["objectId"], "s2");
        assert_eq!(slide["pageElements"][1]["objectId"], "grp");
        assert_eq!(
            slide["pageElements"][1]["elementGroup"]["children"][0]["objectId"],
            "inner"
        );

        let request = client
            .transport()
            .matching(Method::GET, "/presentations/p1")
            .remove(0);
        assert_eq!(
            request.query_value("fields"),
            Some("slides(objectId,pageElements)")
        );

        assert_eq!(get_slide_data(&client, "p1", "s9").await.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn page_size_in_points() {
        let size = get_page_size(&client(), "p1").await.unwrap();
        assert_eq!(size, PageSize { width: 720.0, height: 405.0 });
    }

    #[tokio::test]
    async fn text_is_markdown() {
        let text = get_presentation_text(&client(), "p1").await.unwrap();
        assert!(text.starts_with("# Presentation\nDeck\n"));
        assert!(text.contains("## Slide 2\n\nReview of risks\nRisk matrix\n"));
    }
}
