//! Write-side models: the batchUpdate request objects sent to
//! `presentations.batchUpdate` and the replies that come back.
//! Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::models::common::{AffineTransform, Dimension, Size};

/// One entry of a `batchUpdate` request list. Serialized externally tagged,
/// e.g. `{"createSlide": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    CreateSlide(CreateSlideRequest),
    DeleteObject(DeleteObjectRequest),
    UpdateSlidesPosition(UpdateSlidesPositionRequest),
    DuplicateObject(DuplicateObjectRequest),
    CreateShape(CreateShapeRequest),
    InsertText(InsertTextRequest),
    UpdateTextStyle(UpdateTextStyleRequest),
    UpdateParagraphStyle(UpdateParagraphStyleRequest),
    CreateImage(CreateImageRequest),
    CreateVideo(CreateVideoRequest),
    UpdateVideoProperties(UpdateVideoPropertiesRequest),
    UpdateShapeProperties(UpdateShapePropertiesRequest),
    CreateSheetsChart(CreateSheetsChartRequest),
    CreateTable(CreateTableRequest),
    UpdatePageProperties(UpdatePagePropertiesRequest),
    CreateGroup(CreateGroupRequest),
    UngroupObjects(UngroupObjectsRequest),
}

/// Body of `presentations.batchUpdate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateRequest {
    pub requests: Vec<Request>,
}

// --- Shared pieces ---

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RgbColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// A themeable solid color. Only RGB colors are written by the tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueColor {
    pub rgb_color: RgbColor,
}

/// A color that can either be fully opaque or fully transparent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalColor {
    pub opaque_color: OpaqueColor,
}

impl From<RgbColor> for OptionalColor {
    fn from(rgb_color: RgbColor) -> Self {
        OptionalColor {
            opaque_color: OpaqueColor { rgb_color },
        }
    }
}

/// Where a new page element goes and how big it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElementProperties {
    pub page_object_id: String,
    pub size: Size,
    pub transform: AffineTransform,
}

/// A range of text inside a shape or table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextRange {
    /// `[start_index, end_index)`.
    FixedRange {
        #[serde(rename = "startIndex")]
        start_index: u32,
        #[serde(rename = "endIndex")]
        end_index: u32,
    },
    FromStartIndex {
        #[serde(rename = "startIndex")]
        start_index: u32,
    },
    All,
}

impl TextRange {
    /// Builds a range from optional bounds: both unset selects all text, a
    /// missing start means 0.
    pub fn from_bounds(start_index: Option<u32>, end_index: Option<u32>) -> Self {
        match (start_index, end_index) {
            (None, None) => TextRange::All,
            (Some(start_index), None) => TextRange::FromStartIndex { start_index },
            (start, Some(end_index)) => TextRange::FixedRange {
                start_index: start.unwrap_or(0),
                end_index,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellLocation {
    pub row_index: u32,
    pub column_index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Duration {
    pub seconds: f64,
}

// --- Slides ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReference {
    /// A predefined layout name such as "TITLE_AND_BODY".
    pub predefined_layout: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlideRequest {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insertion_index: Option<u32>,
    pub slide_layout_reference: LayoutReference,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteObjectRequest {
    pub object_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlidesPositionRequest {
    pub slide_object_ids: Vec<String>,
    pub insertion_index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateObjectRequest {
    pub object_id: String,
    /// Source ID → ID of the duplicate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_ids: Option<IndexMap<String, String>>,
}

// --- Shapes and text ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShapeRequest {
    pub object_id: String,
    pub shape_type: String,
    pub element_properties: PageElementProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTextRequest {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<TableCellLocation>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub url: String,
}

/// A partial text style. Only the fields that are set are written, and
/// [`TextStyle::fields`] names exactly those.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<OptionalColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

impl TextStyle {
    /// The field mask for the fields that are set, in a stable order.
    pub fn fields(&self) -> String {
        let mut fields = Vec::new();
        if self.bold.is_some() {
            fields.push("bold");
        }
        if self.italic.is_some() {
            fields.push("italic");
        }
        if self.underline.is_some() {
            fields.push("underline");
        }
        if self.strikethrough.is_some() {
            fields.push("strikethrough");
        }
        if self.font_size.is_some() {
            fields.push("fontSize");
        }
        if self.font_family.is_some() {
            fields.push("fontFamily");
        }
        if self.foreground_color.is_some() {
            fields.push("foregroundColor");
        }
        if self.background_color.is_some() {
            fields.push("backgroundColor");
        }
        if self.link.is_some() {
            fields.push("link");
        }
        fields.join(",")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyleRequest {
    pub object_id: String,
    pub text_range: TextRange,
    pub style: TextStyle,
    pub fields: String,
}

/// The text alignment for a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    Start,
    Center,
    End,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpacingMode {
    NeverCollapse,
    CollapseLists,
}

/// A partial paragraph style; see [`TextStyle`] for the masking convention.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    /// Percentage of normal, where normal is 100.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_above: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_below: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_first_line: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_start: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_end: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<TextDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing_mode: Option<SpacingMode>,
}

impl ParagraphStyle {
    pub fn fields(&self) -> String {
        let mut fields = Vec::new();
        if self.alignment.is_some() {
            fields.push("alignment");
        }
        if self.line_spacing.is_some() {
            fields.push("lineSpacing");
        }
        if self.space_above.is_some() {
            fields.push("spaceAbove");
        }
        if self.space_below.is_some() {
            fields.push("spaceBelow");
        }
        if self.indent_first_line.is_some() {
            fields.push("indentFirstLine");
        }
        if self.indent_start.is_some() {
            fields.push("indentStart");
        }
        if self.indent_end.is_some() {
            fields.push("indentEnd");
        }
        if self.direction.is_some() {
            fields.push("direction");
        }
        if self.spacing_mode.is_some() {
            fields.push("spacingMode");
        }
        fields.join(",")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParagraphStyleRequest {
    pub object_id: String,
    pub text_range: TextRange,
    pub style: ParagraphStyle,
    pub fields: String,
}

// --- Media ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageRequest {
    pub object_id: String,
    pub url: String,
    pub element_properties: PageElementProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoSource {
    Youtube,
    Drive,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    pub object_id: String,
    pub source: VideoSource,
    /// The video source's ID, e.g. the YouTube video ID.
    pub id: String,
    pub element_properties: PageElementProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_play: Option<bool>,
    /// Start time in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    /// End time in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mute: Option<bool>,
}

impl VideoProperties {
    pub fn fields(&self) -> String {
        let mut fields = Vec::new();
        if self.auto_play.is_some() {
            fields.push("autoPlay");
        }
        if self.start.is_some() {
            fields.push("start");
        }
        if self.end.is_some() {
            fields.push("end");
        }
        if self.mute.is_some() {
            fields.push("mute");
        }
        fields.join(",")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoPropertiesRequest {
    pub object_id: String,
    pub video_properties: VideoProperties,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidFill {
    pub color: OpaqueColor,
}

impl From<RgbColor> for SolidFill {
    fn from(rgb_color: RgbColor) -> Self {
        SolidFill {
            color: OpaqueColor { rgb_color },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeBackgroundFill {
    pub solid_fill: SolidFill,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProperties {
    pub shape_background_fill: ShapeBackgroundFill,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShapePropertiesRequest {
    pub object_id: String,
    pub shape_properties: ShapeProperties,
    pub fields: String,
}

// --- Sheets data ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkingMode {
    NotLinkedImage,
    #[default]
    Linked,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSheetsChartRequest {
    pub object_id: String,
    pub spreadsheet_id: String,
    pub chart_id: i64,
    pub linking_mode: LinkingMode,
    pub element_properties: PageElementProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub object_id: String,
    pub element_properties: PageElementProperties,
    pub rows: u32,
    pub columns: u32,
}

// --- Page properties ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StretchedPictureFill {
    pub content_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PageBackgroundFill {
    SolidFill(SolidFill),
    StretchedPictureFill(StretchedPictureFill),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayoutProperties {
    pub predefined_layout: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTransition {
    #[serde(rename = "type")]
    pub transition_type: String,
    pub duration: Duration,
}

/// The page property groups the tools write. Exactly one is set per request
/// and `fields` on the enclosing request names it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_background_fill: Option<PageBackgroundFill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_properties: Option<PageLayoutProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_transition: Option<PageTransition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_advance_time: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePagePropertiesRequest {
    pub object_id: String,
    pub page_properties: PageProperties,
    pub fields: String,
}

// --- Groups ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_object_id: Option<String>,
    pub children_object_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UngroupObjectsRequest {
    pub object_ids: Vec<String>,
}

// --- Replies ---

/// The object ID carried by create/duplicate replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReply {
    pub object_id: Option<String>,
}

/// A single reply of a batchUpdate. Empty for requests that have no reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_slide: Option<ObjectReply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_shape: Option<ObjectReply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_image: Option<ObjectReply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_video: Option<ObjectReply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_sheets_chart: Option<ObjectReply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_table: Option<ObjectReply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_object: Option<ObjectReply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_group: Option<ObjectReply>,
    /// Reply kinds the tools never inspect.
    #[serde(flatten)]
    pub other: IndexMap<String, JsonValue>,
}

impl Reply {
    /// The object ID of whatever this reply created, if any.
    pub fn object_id(&self) -> Option<&str> {
        [
            &self.create_slide,
            &self.create_shape,
            &self.create_image,
            &self.create_video,
            &self.create_sheets_chart,
            &self.create_table,
            &self.duplicate_object,
            &self.create_group,
        ]
        .into_iter()
        .flatten()
        .find_map(|reply| reply.object_id.as_deref())
    }
}

/// Response of `presentations.batchUpdate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateResponse {
    pub presentation_id: String,
    #[serde(default)]
    pub replies: Vec<Reply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_control: Option<JsonValue>,
}

impl BatchUpdateResponse {
    /// Object ID created by the reply at `index`.
    pub fn created_id(&self, index: usize) -> Option<&str> {
        self.replies.get(index).and_then(Reply::object_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requests_serialize_externally_tagged() {
        let request = Request::CreateSlide(CreateSlideRequest {
            object_id: "slide_1".to_string(),
            insertion_index: None,
            slide_layout_reference: LayoutReference {
                predefined_layout: "TITLE".to_string(),
            },
        });
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "createSlide": {
                    "objectId": "slide_1",
                    "slideLayoutReference": {"predefinedLayout": "TITLE"}
                }
            })
        );
    }

    #[test]
    fn text_style_masks_only_set_fields() {
        let style = TextStyle {
            bold: Some(true),
            font_size: Some(Dimension::pt(18.0)),
            foreground_color: Some(
                RgbColor {
                    red: 0.0,
                    green: 0.0,
                    blue: 1.0,
                }
                .into(),
            ),
            ..Default::default()
        };
        assert_eq!(style.fields(), "bold,fontSize,foregroundColor");
        assert_eq!(
            serde_json::to_value(&style).unwrap(),
            json!({
                "bold": true,
                "fontSize": {"magnitude": 18.0, "unit": "PT"},
                "foregroundColor": {"opaqueColor": {"rgbColor": {"red": 0.0, "green": 0.0, "blue": 1.0}}}
            })
        );
        assert_eq!(TextStyle::default().fields(), "");
    }

    #[test]
    fn text_range_uses_type_tag() {
        let fixed = TextRange::FixedRange {
            start_index: 0,
            end_index: 5,
        };
        assert_eq!(
            serde_json::to_value(&fixed).unwrap(),
            json!({"type": "FIXED_RANGE", "startIndex": 0, "endIndex": 5})
        );
        assert_eq!(
            serde_json::to_value(&TextRange::All).unwrap(),
            json!({"type": "ALL"})
        );
        assert_eq!(TextRange::from_bounds(None, None), TextRange::All);
        assert_eq!(
            TextRange::from_bounds(None, Some(4)),
            TextRange::FixedRange {
                start_index: 0,
                end_index: 4
            }
        );
        assert_eq!(
            TextRange::from_bounds(Some(3), None),
            TextRange::FromStartIndex { start_index: 3 }
        );
    }

    #[test]
    fn background_fill_variants() {
        let properties = PageProperties {
            page_background_fill: Some(PageBackgroundFill::StretchedPictureFill(
                StretchedPictureFill {
                    content_url: "https://example.com/bg.png".to_string(),
                },
            )),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&properties).unwrap(),
            json!({"pageBackgroundFill": {"stretchedPictureFill": {"contentUrl": "https://example.com/bg.png"}}})
        );
    }

    #[test]
    fn replies_expose_created_ids() {
        let response: BatchUpdateResponse = serde_json::from_value(json!({
            "presentationId": "p1",
            "replies": [
                {"createShape": {"objectId": "TextBox_1"}},
                {},
                {"replaceAllText": {"occurrencesChanged": 2}}
            ]
        }))
        .unwrap();
        assert_eq!(response.created_id(0), Some("TextBox_1"));
        assert_eq!(response.created_id(1), None);
        assert_eq!(response.created_id(5), None);
        assert_eq!(
            response.replies[2].other.get("replaceAllText"),
            Some(&json!({"occurrencesChanged": 2}))
        );
    }
}
