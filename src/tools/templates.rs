//! Layouts and template-style copies of presentations.

use crate::client::GoogleClient;
use crate::errors::{Result, SlidesApiError};
use crate::models::drive::DriveFile;
use crate::models::requests::{
    BatchUpdateResponse, PageLayoutProperties, PageProperties, Request,
    UpdatePagePropertiesRequest,
};
use crate::tools::{presentation_feedback, slide_feedback, ToolOutput};
use crate::transport::Transport;
use indexmap::IndexMap;
use log::info;
use serde::Serialize;

/// Predefined layout names accepted by `createSlide`.
pub const PREDEFINED_LAYOUTS: [&str; 11] = [
    "BLANK",
    "CAPTION_ONLY",
    "TITLE",
    "TITLE_AND_BODY",
    "TITLE_AND_TWO_COLUMNS",
    "TITLE_ONLY",
    "SECTION_HEADER",
    "SECTION_TITLE_AND_DESCRIPTION",
    "ONE_COLUMN_TEXT",
    "MAIN_POINT",
    "BIG_NUMBER",
];

/// A layout available in a presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInfo {
    pub layout_id: String,
    /// Human-readable name, e.g. "Title and body".
    pub layout_name: String,
    /// The predefined layout this one corresponds to, e.g. "TITLE_AND_BODY".
    pub predefined_layout: Option<String>,
    pub master_id: Option<String>,
}

/// A presentation created by copying another one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopiedPresentation {
    pub presentation_id: String,
    pub name: Option<String>,
}

/// Switches a slide to a predefined layout.
pub async fn apply_predefined_layout<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
    layout: &str,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    if !PREDEFINED_LAYOUTS.contains(&layout) {
        return Err(SlidesApiError::InvalidInput(format!(
            "Unknown predefined layout '{}'. Expected one of: {}",
            layout,
            PREDEFINED_LAYOUTS.join(", ")
        )));
    }
    let response = client
        .batch_update(
            presentation_id,
            vec![Request::UpdatePageProperties(UpdatePagePropertiesRequest {
                object_id: slide_id.to_string(),
                page_properties: PageProperties {
                    layout_properties: Some(PageLayoutProperties {
                        predefined_layout: layout.to_string(),
                    }),
                    ..Default::default()
                },
                fields: "layoutProperties.predefinedLayout".to_string(),
            })],
        )
        .await?;
    info!("Applied layout {} to slide {}", layout, slide_id);
    Ok(slide_feedback(client, presentation_id, slide_id, response).await)
}

/// Copies a presentation. Without a title the copy is named
/// "Copy of {original name}".
pub async fn duplicate_presentation<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    new_title: Option<&str>,
) -> Result<ToolOutput<CopiedPresentation>> {
    let new_title = match new_title {
        Some(title) => title.to_string(),
        None => format!("Copy of {}", client.drive_file_name(presentation_id).await?),
    };
    let copy = client
        .copy_file(presentation_id, &DriveFile::named(new_title))
        .await?;
    copied(client, copy).await
}

/// Lists the layouts of a presentation.
pub async fn list_available_layouts<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
) -> Result<Vec<LayoutInfo>> {
    let presentation = client.get_presentation(presentation_id).await?;
    Ok(presentation
        .layouts
        .iter()
        .flatten()
        .map(|layout| {
            let properties = layout.layout_properties.as_ref();
            LayoutInfo {
                layout_id: layout.object_id.clone(),
                layout_name: properties
                    .and_then(|p| p.display_name.clone())
                    .unwrap_or_else(|| "Unnamed Layout".to_string()),
                predefined_layout: properties.and_then(|p| p.name.clone()),
                master_id: properties.and_then(|p| p.master_object_id.clone()),
            }
        })
        .collect())
}

/// Saves a copy of a presentation marked as a template in Drive
/// (`appProperties.isTemplate = "true"`).
pub async fn create_custom_template<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    template_name: &str,
    description: Option<&str>,
) -> Result<ToolOutput<CopiedPresentation>> {
    let mut app_properties = IndexMap::new();
    app_properties.insert("isTemplate".to_string(), "true".to_string());
    let body = DriveFile {
        name: Some(template_name.to_string()),
        description: description.map(str::to_string),
        app_properties: Some(app_properties),
        ..Default::default()
    };
    let copy = client.copy_file(presentation_id, &body).await?;
    copied(client, copy).await
}

async fn copied<T: Transport>(
    client: &GoogleClient<T>,
    copy: DriveFile,
) -> Result<ToolOutput<CopiedPresentation>> {
    let presentation_id = copy
        .id
        .ok_or_else(|| SlidesApiError::Unknown("Drive copy returned no ID".to_string()))?;
    info!("Created copy {} ({:?})", presentation_id, copy.name);
    let response = CopiedPresentation {
        presentation_id: presentation_id.clone(),
        name: copy.name,
    };
    Ok(presentation_feedback(client, &presentation_id, response).await)
}
