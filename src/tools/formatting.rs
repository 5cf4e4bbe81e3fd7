//! Text boxes and text/paragraph styling.

use crate::client::GoogleClient;
use crate::errors::{Result, SlidesApiError};
use crate::models::requests::{
    BatchUpdateResponse, CreateShapeRequest, InsertTextRequest, ParagraphStyle, Request,
    TextRange, TextStyle, UpdateParagraphStyleRequest, UpdateTextStyleRequest,
};
use crate::models::tool_inputs::Position;
use crate::tools::{element_feedback, new_object_id, slide_feedback, ToolOutput};
use crate::transport::Transport;
use log::info;

/// Requests creating a text box holding `text`.
pub(crate) fn text_box_requests(
    text_box_id: &str,
    slide_id: &str,
    text: &str,
    position: &Position,
) -> Vec<Request> {
    vec![
        Request::CreateShape(CreateShapeRequest {
            object_id: text_box_id.to_string(),
            shape_type: "TEXT_BOX".to_string(),
            element_properties: position.element_properties(slide_id),
        }),
        Request::InsertText(InsertTextRequest {
            object_id: text_box_id.to_string(),
            cell_location: None,
            text: text.to_string(),
        }),
    ]
}

/// Where [`add_text_to_slide`] puts the text box when no position is given.
pub const DEFAULT_TEXT_BOX: Position = Position {
    x: 100.0,
    y: 100.0,
    width: 400.0,
    height: 100.0,
};

/// Adds a text box with `text` at `position` (points), or at
/// [`DEFAULT_TEXT_BOX`].
pub async fn add_text_to_slide<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
    text: &str,
    position: Option<Position>,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    let position = position.unwrap_or(DEFAULT_TEXT_BOX);
    let text_box_id = new_object_id("TextBox");
    let response = client
        .batch_update(
            presentation_id,
            text_box_requests(&text_box_id, slide_id, text, &position),
        )
        .await?;
    info!("Added text box {} to slide {}", text_box_id, slide_id);
    Ok(slide_feedback(client, presentation_id, slide_id, response).await)
}

/// Applies `style` to `range` of the text in shape `shape_id`. Only the
/// fields set in `style` change.
pub async fn update_text_style<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    shape_id: &str,
    range: TextRange,
    style: TextStyle,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    let fields = style.fields();
    if fields.is_empty() {
        return Err(SlidesApiError::InvalidInput(
            "No text style fields to update".to_string(),
        ));
    }
    let response = client
        .batch_update(
            presentation_id,
            vec![Request::UpdateTextStyle(UpdateTextStyleRequest {
                object_id: shape_id.to_string(),
                text_range: range,
                style,
                fields,
            })],
        )
        .await?;
    Ok(element_feedback(client, presentation_id, shape_id, response).await)
}

/// Applies `style` to the paragraphs overlapping `range` in shape `shape_id`.
pub async fn update_paragraph_style<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    shape_id: &str,
    range: TextRange,
    style: ParagraphStyle,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    let fields = style.fields();
    if fields.is_empty() {
        return Err(SlidesApiError::InvalidInput(
            "No paragraph style fields to update".to_string(),
        ));
    }
    let response = client
        .batch_update(
            presentation_id,
            vec![Request::UpdateParagraphStyle(UpdateParagraphStyleRequest {
                object_id: shape_id.to_string(),
                text_range: range,
                style,
                fields,
            })],
        )
        .await?;
    Ok(element_feedback(client, presentation_id, shape_id, response).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{client_with, quiet_client};
    use crate::models::requests::{Alignment, RgbColor};
    use crate::models::tool_inputs::{ParagraphFormat, TextFormat};
    use crate::tools::test_support::{deck, fake_google};
    use crate::transport::mock::{json_body, MockTransport};
    use serde_json::json;

    #[tokio::test]
    async fn text_box_is_created_then_filled() {
        let client = quiet_client(MockTransport::new(fake_google(
            deck(&[]),
            json!([{"createShape": {"objectId": "TextBox_1"}}, {}]),
        )));
        add_text_to_slide(
            &client,
            "p1",
            "s1",
            "Hello",
            Some(Position::new(100.0, 50.0, 300.0, 40.0)),
        )
        .await
        .unwrap();

        let body = client.transport().requests()[0].body.clone().unwrap();
        let create = &body["requests"][0]["createShape"];
        let id = create["objectId"].as_str().unwrap();
        assert!(id.starts_with("TextBox_"));
        assert_eq!(create["shapeType"], "TEXT_BOX");
        assert_eq!(create["elementProperties"]["pageObjectId"], "s1");
        assert_eq!(
            create["elementProperties"]["transform"],
            json!({"scaleX": 1.0, "scaleY": 1.0, "translateX": 100.0, "translateY": 50.0, "unit": "PT"})
        );
        assert_eq!(
            body["requests"][1],
            json!({"insertText": {"objectId": id, "text": "Hello"}})
        );
    }

    #[tokio::test]
    async fn text_box_defaults_its_position() {
        let client = quiet_client(MockTransport::new(fake_google(deck(&[]), json!([{}, {}]))));
        add_text_to_slide(&client, "p1", "s1", "Note", None)
            .await
            .unwrap();

        let body = client.transport().requests().remove(0).body.unwrap();
        let properties = &body["requests"][0]["createShape"]["elementProperties"];
        assert_eq!(
            properties["size"],
            json!({
                "width": {"magnitude": 400.0, "unit": "PT"},
                "height": {"magnitude": 100.0, "unit": "PT"}
            })
        );
        assert_eq!(properties["transform"]["translateX"], 100.0);
        assert_eq!(properties["transform"]["translateY"], 100.0);
    }

    #[tokio::test]
    async fn text_style_sends_mask_and_exports_holding_slide() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_with(
            MockTransport::new(fake_google(
                deck(&[("s1", &[]), ("s2", &["title_shape"])]),
                json!([{}]),
            )),
            dir.path(),
        );
        let style = TextStyle::from(TextFormat {
            bold: Some(true),
            color: Some(RgbColor {
                red: 1.0,
                green: 0.0,
                blue: 0.0,
            }),
            ..Default::default()
        });

        let output = update_text_style(
            &client,
            "p1",
            "title_shape",
            TextRange::from_bounds(Some(0), Some(5)),
            style,
        )
        .await
        .unwrap();
        assert_eq!(output.slide_pdf_path, Some(dir.path().join("slide_p1_1.pdf")));

        let body = client.transport().requests()[0].body.clone().unwrap();
        assert_eq!(
            body["requests"][0]["updateTextStyle"],
            json!({
                "objectId": "title_shape",
                "textRange": {"type": "FIXED_RANGE", "startIndex": 0, "endIndex": 5},
                "style": {
                    "bold": true,
                    "foregroundColor": {"opaqueColor": {"rgbColor": {"red": 1.0, "green": 0.0, "blue": 0.0}}}
                },
                "fields": "bold,foregroundColor"
            })
        );
    }

    #[tokio::test]
    async fn empty_styles_are_rejected_locally() {
        let client = quiet_client(MockTransport::new(|_| json_body(json!({}))));
        assert!(matches!(
            update_text_style(&client, "p1", "x", TextRange::All, TextStyle::default()).await,
            Err(SlidesApiError::InvalidInput(_))
        ));
        assert!(matches!(
            update_paragraph_style(&client, "p1", "x", TextRange::All, ParagraphStyle::default())
                .await,
            Err(SlidesApiError::InvalidInput(_))
        ));
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn paragraph_style_uses_points() {
        let client = quiet_client(MockTransport::new(fake_google(deck(&[]), json!([{}]))));
        let style = ParagraphStyle::from(ParagraphFormat {
            alignment: Some(Alignment::Center),
            line_spacing: Some(150.0),
            indent_start: Some(18.0),
            ..Default::default()
        });
        update_paragraph_style(&client, "p1", "body", TextRange::All, style)
            .await
            .unwrap();

        let body = client.transport().requests()[0].body.clone().unwrap();
        assert_eq!(
            body["requests"][0]["updateParagraphStyle"],
            json!({
                "objectId": "body",
                "textRange": {"type": "ALL"},
                "style": {
                    "alignment": "CENTER",
                    "lineSpacing": 150.0,
                    "indentStart": {"magnitude": 18.0, "unit": "PT"}
                },
                "fields": "alignment,lineSpacing,indentStart"
            })
        );
    }
}
