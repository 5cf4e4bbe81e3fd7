//! Slide transitions, auto-advance timing and backgrounds.

use crate::client::GoogleClient;
use crate::errors::{Result, SlidesApiError};
use crate::models::requests::{
    BatchUpdateResponse, Duration, PageBackgroundFill, PageProperties, PageTransition, Request,
    StretchedPictureFill, UpdatePagePropertiesRequest,
};
use crate::models::tool_inputs::Background;
use crate::tools::{slide_feedback, ToolOutput};
use crate::transport::Transport;
use log::info;
use serde::Serialize;

pub const ELEMENT_ANIMATION_NOTICE: &str = "Element animations are not directly supported by the \
Google Slides API yet. You would need to use the Google Slides UI to add these animations.";

/// Returned by tools that cannot act through the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub message: String,
}

fn page_update(slide_id: &str, page_properties: PageProperties, fields: &str) -> Request {
    Request::UpdatePageProperties(UpdatePagePropertiesRequest {
        object_id: slide_id.to_string(),
        page_properties,
        fields: fields.to_string(),
    })
}

fn seconds(value: f64, what: &str) -> Result<Duration> {
    if !value.is_finite() || value < 0.0 {
        return Err(SlidesApiError::InvalidInput(format!(
            "{} must be a non-negative number of seconds, got {}",
            what, value
        )));
    }
    Ok(Duration { seconds: value })
}

/// Sets the transition played when `slide_id` is entered, e.g. "FADE".
pub async fn set_slide_transition<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
    transition_type: &str,
    duration_seconds: f64,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    let properties = PageProperties {
        page_transition: Some(PageTransition {
            transition_type: transition_type.to_string(),
            duration: seconds(duration_seconds, "Transition duration")?,
        }),
        ..Default::default()
    };
    let response = client
        .batch_update(
            presentation_id,
            vec![page_update(slide_id, properties, "pageTransition")],
        )
        .await?;
    info!(
        "Set {} transition ({}s) on slide {}",
        transition_type, duration_seconds, slide_id
    );
    Ok(slide_feedback(client, presentation_id, slide_id, response).await)
}

/// Element animations cannot be created through the API. Nothing is sent;
/// the result explains this and still carries the slide feedback.
pub async fn set_element_animation<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
    element_id: &str,
    animation_type: &str,
) -> Result<ToolOutput<Notice>> {
    info!(
        "Skipping {} animation on {}: not supported by the API",
        animation_type, element_id
    );
    let notice = Notice {
        message: ELEMENT_ANIMATION_NOTICE.to_string(),
    };
    Ok(slide_feedback(client, presentation_id, slide_id, notice).await)
}

/// Advances past `slide_id` automatically after `seconds`.
pub async fn apply_auto_advance<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
    advance_after_seconds: f64,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    let properties = PageProperties {
        auto_advance_time: Some(seconds(advance_after_seconds, "Auto-advance time")?),
        ..Default::default()
    };
    let response = client
        .batch_update(
            presentation_id,
            vec![page_update(slide_id, properties, "autoAdvanceTime")],
        )
        .await?;
    info!(
        "Slide {} now advances after {}s",
        slide_id, advance_after_seconds
    );
    Ok(slide_feedback(client, presentation_id, slide_id, response).await)
}

/// Fills the slide background with a solid color or a stretched image.
pub async fn set_slide_background<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
    background: Background,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    let fill = match background {
        Background::Color(color) => PageBackgroundFill::SolidFill(color.into()),
        Background::ImageUrl(content_url) => {
            PageBackgroundFill::StretchedPictureFill(StretchedPictureFill { content_url })
        }
    };
    let properties = PageProperties {
        page_background_fill: Some(fill),
        ..Default::default()
    };
    let response = client
        .batch_update(
            presentation_id,
            vec![page_update(slide_id, properties, "pageBackgroundFill")],
        )
        .await?;
    info!("Updated background of slide {}", slide_id);
    Ok(slide_feedback(client, presentation_id, slide_id, response).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{client_with, quiet_client};
    use crate::helpers::hex_to_rgb;
    use crate::tools::test_support::{deck, fake_google};
    use crate::transport::mock::MockTransport;
    use serde_json::json;

    fn backend() -> MockTransport {
        MockTransport::new(fake_google(deck(&[("s1", &[])]), json!([{}])))
    }

    fn page_properties_sent(client: &GoogleClient<MockTransport>) -> serde_json::Value {
        let body = client.transport().requests().remove(0).body.unwrap();
        body["requests"][0]["updatePageProperties"].clone()
    }

    #[tokio::test]
    async fn transition_body() {
        let client = quiet_client(backend());
        set_slide_transition(&client, "p1", "s1", "FADE", 0.5)
            .await
            .unwrap();
        assert_eq!(
            page_properties_sent(&client),
            json!({
                "objectId": "s1",
                "pageProperties": {"pageTransition": {"type": "FADE", "duration": {"seconds": 0.5}}},
                "fields": "pageTransition"
            })
        );
    }

    #[tokio::test]
    async fn auto_advance_body_and_validation() {
        let client = quiet_client(backend());
        assert!(apply_auto_advance(&client, "p1", "s1", -1.0).await.is_err());
        assert!(client.transport().requests().is_empty());

        apply_auto_advance(&client, "p1", "s1", 5.0).await.unwrap();
        assert_eq!(
            page_properties_sent(&client),
            json!({
                "objectId": "s1",
                "pageProperties": {"autoAdvanceTime": {"seconds": 5.0}},
                "fields": "autoAdvanceTime"
            })
        );
    }

    #[tokio::test]
    async fn background_color_and_image() {
        let client = quiet_client(backend());
        set_slide_background(
            &client,
            "p1",
            "s1",
            Background::Color(hex_to_rgb("#ff0000").unwrap()),
        )
        .await
        .unwrap();
        set_slide_background(
            &client,
            "p1",
            "s1",
            Background::ImageUrl("https://example.com/bg.png".to_string()),
        )
        .await
        .unwrap();

        let requests = client.transport().requests();
        let fills: Vec<_> = requests
            .iter()
            .map(|r| {
                r.body.as_ref().unwrap()["requests"][0]["updatePageProperties"]["pageProperties"]
                    ["pageBackgroundFill"]
                    .clone()
            })
            .collect();
        assert_eq!(
            fills[0],
            json!({"solidFill": {"color": {"rgbColor": {"red": 1.0, "green": 0.0, "blue": 0.0}}}})
        );
        assert_eq!(
            fills[1],
            json!({"stretchedPictureFill": {"contentUrl": "https://example.com/bg.png"}})
        );
        assert_eq!(
            requests[0].body.as_ref().unwrap()["requests"][0]["updatePageProperties"]["fields"],
            "pageBackgroundFill"
        );
    }

    #[tokio::test]
    async fn element_animation_sends_nothing_but_reports_slide() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_with(backend(), dir.path());
        let output = set_element_animation(&client, "p1", "s1", "shape1", "FADE_IN")
            .await
            .unwrap();
        assert_eq!(output.response.message, ELEMENT_ANIMATION_NOTICE);
        assert_eq!(output.slide_pdf_path, Some(dir.path().join("slide_p1_0.pdf")));
        assert!(client
            .transport()
            .requests()
            .iter()
            .all(|r| !r.url.path().ends_with(":batchUpdate")));
    }
}
