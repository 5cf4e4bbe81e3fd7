//! Presentation and slide lifecycle: create, read, add, delete, reorder,
//! duplicate.

use crate::client::GoogleClient;
use crate::errors::{Result, SlidesApiError};
use crate::models::presentation::Presentation;
use crate::models::requests::{
    BatchUpdateResponse, CreateSlideRequest, DeleteObjectRequest, DuplicateObjectRequest,
    LayoutReference, Request, UpdateSlidesPositionRequest,
};
use crate::tools::{new_object_id, presentation_feedback, slide_feedback, ToolOutput};
use crate::transport::Transport;
use indexmap::IndexMap;
use log::info;
use serde_json::Value as JsonValue;

/// Layout used by [`add_slide`] when none is given.
pub const DEFAULT_LAYOUT: &str = "BLANK";

/// Creates an empty presentation titled `title`.
pub async fn create_presentation<T: Transport>(
    client: &GoogleClient<T>,
    title: &str,
) -> Result<ToolOutput<Presentation>> {
    if title.trim().is_empty() {
        return Err(SlidesApiError::InvalidInput(
            "Presentation title cannot be empty".to_string(),
        ));
    }
    let presentation = client.create_presentation(title).await?;
    info!(
        "Created presentation '{}' ({})",
        title, presentation.presentation_id
    );
    let presentation_id = presentation.presentation_id.clone();
    Ok(presentation_feedback(client, &presentation_id, presentation).await)
}

/// Fetches the full presentation resource as returned by the API.
pub async fn get_presentation<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
) -> Result<JsonValue> {
    client.get_presentation_json(presentation_id, None).await
}

/// Adds a slide with a predefined layout, at the end unless
/// `insertion_index` is given.
pub async fn add_slide<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    layout: Option<&str>,
    insertion_index: Option<u32>,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    let layout = layout.unwrap_or(DEFAULT_LAYOUT);
    let slide_id = new_object_id("slide");
    let response = client
        .batch_update(
            presentation_id,
            vec![Request::CreateSlide(CreateSlideRequest {
                object_id: slide_id.clone(),
                insertion_index,
                slide_layout_reference: LayoutReference {
                    predefined_layout: layout.to_string(),
                },
            })],
        )
        .await?;
    let slide_id = response.created_id(0).unwrap_or(&slide_id).to_string();
    info!("Added {} slide {} to {}", layout, slide_id, presentation_id);
    Ok(slide_feedback(client, presentation_id, &slide_id, response).await)
}

pub async fn delete_slide<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    let response = client
        .batch_update(
            presentation_id,
            vec![Request::DeleteObject(DeleteObjectRequest {
                object_id: slide_id.to_string(),
            })],
        )
        .await?;
    info!("Deleted slide {} from {}", slide_id, presentation_id);
    Ok(presentation_feedback(client, presentation_id, response).await)
}

/// Moves `slide_ids`, keeping their relative order, so that they start at
/// `insertion_index` (computed before the move).
pub async fn reorder_slides<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_ids: &[String],
    insertion_index: u32,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    if slide_ids.is_empty() {
        return Err(SlidesApiError::InvalidInput(
            "At least one slide ID is required".to_string(),
        ));
    }
    let response = client
        .batch_update(
            presentation_id,
            vec![Request::UpdateSlidesPosition(UpdateSlidesPositionRequest {
                slide_object_ids: slide_ids.to_vec(),
                insertion_index,
            })],
        )
        .await?;
    Ok(presentation_feedback(client, presentation_id, response).await)
}

/// Duplicates a slide. The copy lands right after the original unless
/// `insertion_index` moves it, in the same batch.
pub async fn duplicate_slide<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
    insertion_index: Option<u32>,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    let requests = match insertion_index {
        None => vec![Request::DuplicateObject(DuplicateObjectRequest {
            object_id: slide_id.to_string(),
            object_ids: None,
        })],
        Some(insertion_index) => {
            let new_id = new_object_id("slide");
            let mut object_ids = IndexMap::new();
            object_ids.insert(slide_id.to_string(), new_id.clone());
            vec![
                Request::DuplicateObject(DuplicateObjectRequest {
                    object_id: slide_id.to_string(),
                    object_ids: Some(object_ids),
                }),
                Request::UpdateSlidesPosition(UpdateSlidesPositionRequest {
                    slide_object_ids: vec![new_id],
                    insertion_index,
                }),
            ]
        }
    };

    let response = client.batch_update(presentation_id, requests).await?;
    let new_slide_id = response.created_id(0).map(str::to_string);
    info!(
        "Duplicated slide {} of {} as {:?}",
        slide_id, presentation_id, new_slide_id
    );
    Ok(match new_slide_id {
        Some(new_slide_id) => slide_feedback(client, presentation_id, &new_slide_id, response).await,
        None => presentation_feedback(client, presentation_id, response).await,
    })
}
