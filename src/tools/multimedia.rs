//! Images, videos, audio links, shapes and groups.

use crate::client::GoogleClient;
use crate::errors::{Result, SlidesApiError};
use crate::models::requests::{
    BatchUpdateResponse, CreateGroupRequest, CreateImageRequest, CreateShapeRequest,
    CreateVideoRequest, Link, Request, RgbColor, ShapeBackgroundFill, ShapeProperties, TextRange,
    TextStyle, UngroupObjectsRequest, UpdateShapePropertiesRequest, UpdateTextStyleRequest,
    UpdateVideoPropertiesRequest, VideoProperties, VideoSource,
};
use crate::models::tool_inputs::Position;
use crate::tools::formatting::text_box_requests;
use crate::tools::{new_object_id, slide_feedback, ToolOutput};
use crate::transport::Transport;
use log::info;
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Link color of audio links: a dark blue.
const AUDIO_LINK_COLOR: RgbColor = RgbColor {
    red: 0.0,
    green: 0.0,
    blue: 0.8,
};

pub const DEFAULT_AUDIO_LINK_TEXT: &str = "Play Audio";

/// Playback settings for an embedded video. Unset fields keep the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoOptions {
    pub auto_play: Option<bool>,
    /// Start offset in seconds.
    pub start_time: Option<u32>,
    /// End offset in seconds.
    pub end_time: Option<u32>,
    pub mute: Option<bool>,
}

impl From<VideoOptions> for VideoProperties {
    fn from(options: VideoOptions) -> Self {
        VideoProperties {
            auto_play: options.auto_play,
            start: options.start_time,
            end: options.end_time,
            mute: options.mute,
        }
    }
}

/// The object created by [`create_shape`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedObject {
    pub object_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedGroup {
    pub group_id: String,
}

/// Extracts the video ID from a YouTube watch, short, embed or shorts URL.
/// A bare 11-character ID is accepted as is.
pub fn youtube_video_id(video_url: &str) -> Result<String> {
    let invalid = || SlidesApiError::InvalidInput(format!("Not a YouTube video URL: {}", video_url));
    let is_id = |id: &str| {
        id.len() == 11
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    };

    if is_id(video_url) {
        return Ok(video_url.to_string());
    }

    let url = Url::parse(video_url).map_err(|_| invalid())?;
    let host = url.host_str().unwrap_or_default().trim_start_matches("www.");
    let mut segments = url.path_segments().into_iter().flatten();
    let id = match host {
        "youtu.be" => segments.next().map(str::to_string),
        "youtube.com" | "m.youtube.com" | "music.youtube.com" | "youtube-nocookie.com" => {
            match segments.next() {
                Some("watch") => url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned()),
                Some("embed") | Some("shorts") | Some("live") | Some("v") => {
                    segments.next().map(str::to_string)
                }
                _ => None,
            }
        }
        _ => None,
    };

    id.filter(|id| is_id(id.as_str())).ok_or_else(invalid)
}

fn create_shape_requests(
    shape_id: &str,
    slide_id: &str,
    shape_type: &str,
    position: &Position,
    fill_color: Option<RgbColor>,
) -> Vec<Request> {
    let mut requests = vec![Request::CreateShape(CreateShapeRequest {
        object_id: shape_id.to_string(),
        shape_type: shape_type.to_string(),
        element_properties: position.element_properties(slide_id),
    })];
    if let Some(color) = fill_color {
        requests.push(Request::UpdateShapeProperties(UpdateShapePropertiesRequest {
            object_id: shape_id.to_string(),
            shape_properties: ShapeProperties {
                shape_background_fill: ShapeBackgroundFill {
                    solid_fill: color.into(),
                },
            },
            fields: "shapeBackgroundFill.solidFill.color".to_string(),
        }));
    }
    requests
}

/// Adds an image from a publicly reachable URL.
pub async fn add_image_to_slide<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
    image_url: &str,
    position: Position,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    let image_id = new_object_id("Image");
    let response = client
        .batch_update(
            presentation_id,
            vec![Request::CreateImage(CreateImageRequest {
                object_id: image_id.clone(),
                url: image_url.to_string(),
                element_properties: position.element_properties(slide_id),
            })],
        )
        .await?;
    info!("Added image {} to slide {}", image_id, slide_id);
    Ok(slide_feedback(client, presentation_id, slide_id, response).await)
}

/// Embeds a YouTube video, then applies playback options.
pub async fn add_video_to_slide<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
    video_url: &str,
    position: Position,
    options: VideoOptions,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    let youtube_id = youtube_video_id(video_url)?;
    if let (Some(start), Some(end)) = (options.start_time, options.end_time) {
        if end <= start {
            return Err(SlidesApiError::InvalidInput(format!(
                "Video end time {} must be after start time {}",
                end, start
            )));
        }
    }

    let video_id = new_object_id("Video");
    let mut requests = vec![Request::CreateVideo(CreateVideoRequest {
        object_id: video_id.clone(),
        source: VideoSource::Youtube,
        id: youtube_id,
        element_properties: position.element_properties(slide_id),
    })];
    let video_properties = VideoProperties::from(options);
    let fields = video_properties.fields();
    if !fields.is_empty() {
        requests.push(Request::UpdateVideoProperties(UpdateVideoPropertiesRequest {
            object_id: video_id.clone(),
            video_properties,
            fields,
        }));
    }

    let response = client.batch_update(presentation_id, requests).await?;
    info!("Added video {} to slide {}", video_id, slide_id);
    Ok(slide_feedback(client, presentation_id, slide_id, response).await)
}

/// Adds a text box whose text links to an external audio file.
pub async fn insert_audio_link<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
    audio_url: &str,
    position: Position,
    link_text: Option<&str>,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    let text_box_id = new_object_id("AudioLink");
    let link_text = link_text.unwrap_or(DEFAULT_AUDIO_LINK_TEXT);

    let style = TextStyle {
        underline: Some(true),
        foreground_color: Some(AUDIO_LINK_COLOR.into()),
        link: Some(Link {
            url: audio_url.to_string(),
        }),
        ..Default::default()
    };
    let mut requests = text_box_requests(&text_box_id, slide_id, link_text, &position);
    requests.push(Request::UpdateTextStyle(UpdateTextStyleRequest {
        object_id: text_box_id.clone(),
        text_range: TextRange::All,
        fields: style.fields(),
        style,
    }));

    let response = client.batch_update(presentation_id, requests).await?;
    info!("Added audio link {} to slide {}", text_box_id, slide_id);
    Ok(slide_feedback(client, presentation_id, slide_id, response).await)
}

/// Adds a shape such as `RECTANGLE` or `ELLIPSE`, optionally filled.
pub async fn add_shape_to_slide<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
    shape_type: &str,
    position: Position,
    fill_color: Option<RgbColor>,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    let shape_id = new_object_id("Shape");
    let response = client
        .batch_update(
            presentation_id,
            create_shape_requests(&shape_id, slide_id, shape_type, &position, fill_color),
        )
        .await?;
    info!("Added {} {} to slide {}", shape_type, shape_id, slide_id);
    Ok(slide_feedback(client, presentation_id, slide_id, response).await)
}

/// Like [`add_shape_to_slide`] but without PDF feedback; returns the new ID.
pub async fn create_shape<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
    shape_type: &str,
    position: Position,
    fill_color: Option<RgbColor>,
) -> Result<CreatedObject> {
    let shape_id = new_object_id("Shape");
    let response = client
        .batch_update(
            presentation_id,
            create_shape_requests(&shape_id, slide_id, shape_type, &position, fill_color),
        )
        .await?;
    let object_id = response.created_id(0).unwrap_or(&shape_id).to_string();
    Ok(CreatedObject { object_id })
}

/// Groups page elements on the same page. At least two are needed.
pub async fn group_elements<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    element_ids: &[String],
) -> Result<CreatedGroup> {
    if element_ids.len() < 2 {
        return Err(SlidesApiError::InvalidInput(
            "Grouping needs at least two element IDs".to_string(),
        ));
    }
    let group_id = new_object_id("Group");
    let response = client
        .batch_update(
            presentation_id,
            vec![Request::CreateGroup(CreateGroupRequest {
                group_object_id: Some(group_id.clone()),
                children_object_ids: element_ids.to_vec(),
            })],
        )
        .await?;
    let group_id = response.created_id(0).unwrap_or(&group_id).to_string();
    info!("Grouped {} elements as {}", element_ids.len(), group_id);
    Ok(CreatedGroup { group_id })
}

pub async fn ungroup_elements<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    group_id: &str,
) -> Result<BatchUpdateResponse> {
    client
        .batch_update(
            presentation_id,
            vec![Request::UngroupObjects(UngroupObjectsRequest {
                object_ids: vec![group_id.to_string()],
            })],
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::quiet_client;
    use crate::tools::test_support::{deck, fake_google};
    use crate::transport::mock::{json_body, MockTransport};
    use serde_json::{json, Value as JsonValue};

    fn sent_requests(client: &GoogleClient<MockTransport>) -> JsonValue {
        client.transport().requests()[0].body.clone().unwrap()["requests"].clone()
    }

    #[test]
    fn youtube_ids_are_extracted() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "dQw4w9WgXcQ",
        ] {
            assert_eq!(youtube_video_id(url).unwrap(), "dQw4w9WgXcQ", "{}", url);
        }
        assert!(youtube_video_id("https://vimeo.com/12345").is_err());
        assert!(youtube_video_id("https://www.youtube.com/watch?v=short").is_err());
    }

    #[tokio::test]
    async fn video_is_created_then_configured() {
        let client = quiet_client(MockTransport::new(fake_google(deck(&[]), json!([{}, {}]))));
        add_video_to_slide(
            &client,
            "p1",
            "s1",
            "https://youtu.be/dQw4w9WgXcQ",
            Position::new(0.0, 0.0, 320.0, 180.0),
            VideoOptions {
                auto_play: Some(true),
                start_time: Some(10),
                mute: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let requests = sent_requests(&client);
        let create = &requests[0]["createVideo"];
        assert_eq!(create["source"], "YOUTUBE");
        assert_eq!(create["id"], "dQw4w9WgXcQ");
        let video_id = create["objectId"].clone();
        assert_eq!(
            requests[1],
            json!({"updateVideoProperties": {
                "objectId": video_id,
                "videoProperties": {"autoPlay": true, "start": 10, "mute": false},
                "fields": "autoPlay,start,mute"
            }})
        );
    }

    #[tokio::test]
    async fn video_without_options_skips_update() {
        let client = quiet_client(MockTransport::new(fake_google(deck(&[]), json!([{}]))));
        add_video_to_slide(
            &client,
            "p1",
            "s1",
            "dQw4w9WgXcQ",
            Position::new(0.0, 0.0, 320.0, 180.0),
            VideoOptions::default(),
        )
        .await
        .unwrap();
        assert_eq!(sent_requests(&client).as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn video_rejects_inverted_range() {
        let client = quiet_client(MockTransport::new(|_| json_body(json!({}))));
        let options = VideoOptions {
            start_time: Some(30),
            end_time: Some(10),
            ..Default::default()
        };
        assert!(add_video_to_slide(
            &client,
            "p1",
            "s1",
            "dQw4w9WgXcQ",
            Position::new(0.0, 0.0, 1.0, 1.0),
            options
        )
        .await
        .is_err());
    }

    #[tokio::test]
    async fn audio_link_is_styled_as_a_link() {
        let client = quiet_client(MockTransport::new(fake_google(deck(&[]), json!([{}, {}, {}]))));
        insert_audio_link(
            &client,
            "p1",
            "s1",
            "https://example.com/track.mp3",
            Position::new(10.0, 10.0, 200.0, 30.0),
            None,
        )
        .await
        .unwrap();

        let requests = sent_requests(&client);
        assert_eq!(requests[1]["insertText"]["text"], DEFAULT_AUDIO_LINK_TEXT);
        let style = &requests[2]["updateTextStyle"];
        assert_eq!(style["textRange"], json!({"type": "ALL"}));
        assert_eq!(style["fields"], "underline,foregroundColor,link");
        assert_eq!(style["style"]["link"]["url"], "https://example.com/track.mp3");
        assert_eq!(
            style["style"]["foregroundColor"]["opaqueColor"]["rgbColor"]["blue"],
            0.8
        );
    }

    #[tokio::test]
    async fn shape_fill_uses_solid_fill_mask() {
        let client = quiet_client(MockTransport::new(fake_google(
            deck(&[]),
            json!([{"createShape": {"objectId": "Shape_x"}}, {}]),
        )));
        let created = create_shape(
            &client,
            "p1",
            "s1",
            "ELLIPSE",
            Position::new(0.0, 0.0, 50.0, 50.0),
            Some(RgbColor {
                red: 0.2,
                green: 0.4,
                blue: 0.6,
            }),
        )
        .await
        .unwrap();
        assert_eq!(created.object_id, "Shape_x");

        let requests = sent_requests(&client);
        assert_eq!(requests[0]["createShape"]["shapeType"], "ELLIPSE");
        assert_eq!(
            requests[1]["updateShapeProperties"]["shapeProperties"],
            json!({"shapeBackgroundFill": {"solidFill": {"color": {"rgbColor": {"red": 0.2, "green": 0.4, "blue": 0.6}}}}})
        );
        assert_eq!(
            requests[1]["updateShapeProperties"]["fields"],
            "shapeBackgroundFill.solidFill.color"
        );
    }

    #[tokio::test]
    async fn grouping_needs_two_elements() {
        let client = quiet_client(MockTransport::new(fake_google(
            deck(&[]),
            json!([{"createGroup": {"objectId": "Group_1"}}]),
        )));
        assert!(group_elements(&client, "p1", &["a".to_string()]).await.is_err());

        let group = group_elements(&client, "p1", &["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        assert_eq!(group.group_id, "Group_1");
        assert_eq!(
            sent_requests(&client)[0]["createGroup"]["childrenObjectIds"],
            json!(["a", "b"])
        );

        ungroup_elements(&client, "p1", "Group_1").await.unwrap();
        assert_eq!(
            client.transport().requests()[1].body,
            Some(json!({"requests": [{"ungroupObjects": {"objectIds": ["Group_1"]}}]}))
        );
    }
}
