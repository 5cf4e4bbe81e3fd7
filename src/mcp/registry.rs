//! The tool catalogue: JSON schemas for `tools/list` and argument decoding
//! plus dispatch for `tools/call`.

use crate::client::GoogleClient;
use crate::errors::{Result, SlidesApiError};
use crate::helpers::hex_to_rgb;
use crate::mcp::protocol::McpTool;
use crate::models::requests::{LinkingMode, ParagraphStyle, RgbColor, TextRange, TextStyle};
use crate::models::tool_inputs::{
    Background, ParagraphFormat, Position, TextFormat, ThumbnailSize,
};
use crate::tools::multimedia::VideoOptions;
use crate::tools::{
    animations, collaboration, data, export, formatting, lookup, multimedia, slides, templates,
};
use crate::transport::Transport;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolCallError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    Failed(#[from] SlidesApiError),
}

// --- Schemas ---

fn string(description: &str) -> JsonValue {
    json!({"type": "string", "description": description})
}

fn number(description: &str) -> JsonValue {
    json!({"type": "number", "description": description})
}

fn integer(description: &str) -> JsonValue {
    json!({"type": "integer", "minimum": 0, "description": description})
}

fn boolean(description: &str) -> JsonValue {
    json!({"type": "boolean", "description": description})
}

fn one_of(values: &[&str], description: &str) -> JsonValue {
    json!({"type": "string", "enum": values, "description": description})
}

fn string_list(description: &str) -> JsonValue {
    json!({"type": "array", "items": {"type": "string"}, "description": description})
}

fn rgb(description: &str) -> JsonValue {
    json!({
        "type": "object",
        "description": description,
        "properties": {
            "red": {"type": "number", "minimum": 0, "maximum": 1},
            "green": {"type": "number", "minimum": 0, "maximum": 1},
            "blue": {"type": "number", "minimum": 0, "maximum": 1}
        },
        "required": ["red", "green", "blue"]
    })
}

const POSITION_FIELDS: [&str; 4] = ["x", "y", "width", "height"];

fn object(properties: Vec<(&str, JsonValue)>, required: &[&str]) -> JsonValue {
    let properties: Map<String, JsonValue> = properties
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect();
    json!({"type": "object", "properties": properties, "required": required})
}

fn presentation_id() -> (&'static str, JsonValue) {
    ("presentation_id", string("ID of the presentation"))
}

fn slide_id() -> (&'static str, JsonValue) {
    ("slide_id", string("Object ID of the slide"))
}

fn placed_properties(extra: Vec<(&'static str, JsonValue)>) -> Vec<(&'static str, JsonValue)> {
    let mut properties = vec![
        presentation_id(),
        slide_id(),
        ("x", number("Left edge in points")),
        ("y", number("Top edge in points")),
        ("width", number("Width in points")),
        ("height", number("Height in points")),
    ];
    properties.extend(extra);
    properties
}

/// `presentation_id`, `slide_id`, the position fields and `extra`.
fn placed(extra: Vec<(&'static str, JsonValue)>, extra_required: &[&str]) -> JsonValue {
    let mut required = vec!["presentation_id", "slide_id"];
    required.extend(POSITION_FIELDS);
    required.extend(extra_required);
    object(placed_properties(extra), &required)
}

/// Like [`placed`], but the position fields may all be left out.
fn optionally_placed(extra: Vec<(&'static str, JsonValue)>, extra_required: &[&str]) -> JsonValue {
    let mut required = vec!["presentation_id", "slide_id"];
    required.extend(extra_required);
    object(placed_properties(extra), &required)
}

fn text_range_fields() -> Vec<(&'static str, JsonValue)> {
    vec![
        ("start_index", integer("Start of the text range; whole text when both bounds are omitted")),
        ("end_index", integer("End of the text range (exclusive)")),
    ]
}

fn tool(name: &'static str, description: &'static str, input_schema: JsonValue) -> McpTool {
    McpTool {
        name,
        description,
        input_schema,
    }
}

/// Every tool the server exposes.
pub fn tool_definitions() -> Vec<McpTool> {
    let pid = || vec![presentation_id()];
    let pid_slide = || vec![presentation_id(), slide_id()];
    let email = || ("email_address", string("Email address of the user"));
    let output_path = || {
        (
            "output_path",
            string("Where to write the file; returned inline as base64 when omitted"),
        )
    };

    vec![
        // Slides
        tool(
            "create_presentation",
            "Create a new, empty Google Slides presentation.",
            object(vec![("title", string("Title of the presentation"))], &["title"]),
        ),
        tool(
            "get_presentation",
            "Fetch the full presentation resource as JSON.",
            object(pid(), &["presentation_id"]),
        ),
        tool(
            "add_slide",
            "Add a slide with a predefined layout.",
            object(
                vec![
                    presentation_id(),
                    ("layout", string("Predefined layout, default BLANK")),
                    ("insertion_index", integer("Zero-based position; appended when omitted")),
                ],
                &["presentation_id"],
            ),
        ),
        tool(
            "delete_slide",
            "Delete a slide.",
            object(pid_slide(), &["presentation_id", "slide_id"]),
        ),
        tool(
            "reorder_slides",
            "Move slides, keeping their order, to start at an index.",
            object(
                vec![
                    presentation_id(),
                    ("slide_ids", string_list("Object IDs of the slides to move")),
                    ("insertion_index", integer("Zero-based target position")),
                ],
                &["presentation_id", "slide_ids", "insertion_index"],
            ),
        ),
        tool(
            "duplicate_slide",
            "Duplicate a slide, optionally moving the copy.",
            object(
                vec![
                    presentation_id(),
                    slide_id(),
                    ("insertion_index", integer("Zero-based position for the copy")),
                ],
                &["presentation_id", "slide_id"],
            ),
        ),
        // Formatting
        tool(
            "add_text_to_slide",
            "Add a text box to a slide. Without x/y/width/height the box is 400x100 at (100, 100).",
            optionally_placed(vec![("text", string("Text to insert"))], &["text"]),
        ),
        tool(
            "update_text_style",
            "Style the text of a shape. Only the given style fields change.",
            object(
                [
                    vec![
                        presentation_id(),
                        ("shape_id", string("Object ID of the shape or text box")),
                        (
                            "style",
                            object(
                                vec![
                                    ("bold", boolean("Bold")),
                                    ("italic", boolean("Italic")),
                                    ("underline", boolean("Underline")),
                                    ("strikethrough", boolean("Strikethrough")),
                                    ("font_size", number("Font size in points")),
                                    ("font_family", string("Font family, e.g. Arial")),
                                    ("color", rgb("Text color, channels 0-1")),
                                    ("background_color", rgb("Highlight color, channels 0-1")),
                                    ("link_url", string("Hyperlink target")),
                                ],
                                &[],
                            ),
                        ),
                    ],
                    text_range_fields(),
                ]
                .concat(),
                &["presentation_id", "shape_id", "style"],
            ),
        ),
        tool(
            "update_paragraph_style",
            "Style the paragraphs of a shape. Only the given style fields change.",
            object(
                [
                    vec![
                        presentation_id(),
                        ("shape_id", string("Object ID of the shape or text box")),
                        (
                            "style",
                            object(
                                vec![
                                    (
                                        "alignment",
                                        one_of(&["START", "CENTER", "END", "JUSTIFIED"], "Alignment"),
                                    ),
                                    ("line_spacing", number("Line spacing in percent, 100 is single")),
                                    ("space_above", number("Space above in points")),
                                    ("space_below", number("Space below in points")),
                                    ("indent_first_line", number("First line indent in points")),
                                    ("indent_start", number("Start indent in points")),
                                    ("indent_end", number("End indent in points")),
                                    (
                                        "direction",
                                        one_of(&["LEFT_TO_RIGHT", "RIGHT_TO_LEFT"], "Text direction"),
                                    ),
                                    (
                                        "spacing_mode",
                                        one_of(&["NEVER_COLLAPSE", "COLLAPSE_LISTS"], "Spacing mode"),
                                    ),
                                ],
                                &[],
                            ),
                        ),
                    ],
                    text_range_fields(),
                ]
                .concat(),
                &["presentation_id", "shape_id", "style"],
            ),
        ),
        // Multimedia
        tool(
            "add_image_to_slide",
            "Add an image from a public URL.",
            placed(vec![("image_url", string("Publicly reachable image URL"))], &["image_url"]),
        ),
        tool(
            "add_video_to_slide",
            "Embed a YouTube video.",
            placed(
                vec![
                    ("video_url", string("YouTube URL or video ID")),
                    ("auto_play", boolean("Play when the slide is shown")),
                    ("start_time", integer("Start offset in seconds")),
                    ("end_time", integer("End offset in seconds")),
                    ("mute", boolean("Start muted")),
                ],
                &["video_url"],
            ),
        ),
        tool(
            "insert_audio_link",
            "Add a text box linking to an audio file.",
            placed(
                vec![
                    ("audio_url", string("URL of the audio file")),
                    ("link_text", string("Link text, default \"Play Audio\"")),
                ],
                &["audio_url"],
            ),
        ),
        tool(
            "add_shape_to_slide",
            "Add a shape, optionally filled with a color.",
            placed(
                vec![
                    ("shape_type", string("Shape type, e.g. RECTANGLE, ELLIPSE, STAR_5")),
                    ("fill_color", string("Fill color as #RRGGBB")),
                ],
                &["shape_type"],
            ),
        ),
        tool(
            "create_shape",
            "Create a shape and return its object ID, without PDF feedback.",
            placed(
                vec![
                    ("shape_type", string("Shape type, e.g. RECTANGLE, ELLIPSE, STAR_5")),
                    ("fill_color", string("Fill color as #RRGGBB")),
                ],
                &["shape_type"],
            ),
        ),
        tool(
            "group_elements",
            "Group two or more page elements on the same slide.",
            object(
                vec![presentation_id(), ("element_ids", string_list("Object IDs to group"))],
                &["presentation_id", "element_ids"],
            ),
        ),
        tool(
            "ungroup_elements",
            "Ungroup a group of page elements.",
            object(
                vec![presentation_id(), ("group_id", string("Object ID of the group"))],
                &["presentation_id", "group_id"],
            ),
        ),
        // Sheets data
        tool(
            "create_sheets_chart",
            "Embed a chart from a Google Sheets spreadsheet.",
            placed(
                vec![
                    ("spreadsheet_id", string("ID of the spreadsheet")),
                    ("chart_id", integer("ID of the chart in the spreadsheet")),
                    (
                        "linking_mode",
                        one_of(&["LINKED", "NOT_LINKED_IMAGE"], "Default LINKED"),
                    ),
                ],
                &["spreadsheet_id", "chart_id"],
            ),
        ),
        tool(
            "create_table_from_sheets",
            "Create a table filled with values from a Google Sheets range.",
            placed(
                vec![
                    ("spreadsheet_id", string("ID of the spreadsheet")),
                    ("sheet_name", string("Name of the sheet")),
                    ("range_name", string("A1 range within the sheet, e.g. A1:C5")),
                ],
                &["spreadsheet_id", "sheet_name", "range_name"],
            ),
        ),
        // Templates
        tool(
            "apply_predefined_layout",
            "Apply a predefined layout to a slide.",
            object(
                vec![
                    presentation_id(),
                    slide_id(),
                    ("layout", one_of(&templates::PREDEFINED_LAYOUTS, "Predefined layout")),
                ],
                &["presentation_id", "slide_id", "layout"],
            ),
        ),
        tool(
            "duplicate_presentation",
            "Copy a presentation.",
            object(
                vec![
                    presentation_id(),
                    ("new_title", string("Name of the copy, default \"Copy of <name>\"")),
                ],
                &["presentation_id"],
            ),
        ),
        tool(
            "list_available_layouts",
            "List the layouts of a presentation.",
            object(pid(), &["presentation_id"]),
        ),
        tool(
            "create_custom_template",
            "Save a copy of a presentation marked as a template.",
            object(
                vec![
                    presentation_id(),
                    ("template_name", string("Name of the template")),
                    ("description", string("Description stored on the Drive file")),
                ],
                &["presentation_id", "template_name"],
            ),
        ),
        // Collaboration
        tool(
            "add_editor_permission",
            "Give a user edit access.",
            object(vec![presentation_id(), email()], &["presentation_id", "email_address"]),
        ),
        tool(
            "add_viewer_permission",
            "Give a user view access.",
            object(vec![presentation_id(), email()], &["presentation_id", "email_address"]),
        ),
        tool(
            "add_commenter_permission",
            "Give a user comment access.",
            object(vec![presentation_id(), email()], &["presentation_id", "email_address"]),
        ),
        tool(
            "remove_permission",
            "Remove a permission.",
            object(
                vec![presentation_id(), ("permission_id", string("ID of the permission"))],
                &["presentation_id", "permission_id"],
            ),
        ),
        tool(
            "list_permissions",
            "List who has access to a presentation.",
            object(pid(), &["presentation_id"]),
        ),
        tool(
            "make_public",
            "Let anyone with the link view the presentation.",
            object(pid(), &["presentation_id"]),
        ),
        // Animations and backgrounds
        tool(
            "set_slide_transition",
            "Set the transition of a slide.",
            object(
                [
                    pid_slide(),
                    vec![
                        ("transition_type", string("Transition, e.g. FADE")),
                        ("duration", number("Duration in seconds, default 1")),
                    ],
                ]
                .concat(),
                &["presentation_id", "slide_id", "transition_type"],
            ),
        ),
        tool(
            "set_element_animation",
            "Element animations are not available through the API; explains this.",
            object(
                [
                    pid_slide(),
                    vec![
                        ("element_id", string("Object ID of the element")),
                        ("animation_type", string("Animation, e.g. FADE_IN")),
                    ],
                ]
                .concat(),
                &["presentation_id", "slide_id", "element_id", "animation_type"],
            ),
        ),
        tool(
            "apply_auto_advance",
            "Advance past a slide automatically.",
            object(
                [
                    pid_slide(),
                    vec![("seconds", number("Seconds before advancing"))],
                ]
                .concat(),
                &["presentation_id", "slide_id", "seconds"],
            ),
        ),
        tool(
            "set_slide_background",
            "Set a slide background to a color or an image. The color wins when both are given.",
            object(
                [
                    pid_slide(),
                    vec![
                        ("color", string("Background color as #RRGGBB")),
                        ("image_url", string("Publicly reachable image URL")),
                    ],
                ]
                .concat(),
                &["presentation_id", "slide_id"],
            ),
        ),
        // Export
        tool(
            "export_presentation_as_pdf",
            "Export the whole presentation as PDF.",
            object(vec![presentation_id(), output_path()], &["presentation_id"]),
        ),
        tool(
            "export_slide_as_pdf",
            "Export a single slide as PDF.",
            object(
                vec![
                    presentation_id(),
                    ("slide_index", integer("Zero-based slide index")),
                    output_path(),
                ],
                &["presentation_id", "slide_index"],
            ),
        ),
        tool(
            "get_presentation_thumbnail",
            "Render a slide as a PNG thumbnail.",
            object(
                vec![
                    presentation_id(),
                    ("slide_index", integer("Zero-based slide index")),
                    ("size", one_of(&["SMALL", "MEDIUM", "LARGE"], "Default LARGE")),
                    output_path(),
                ],
                &["presentation_id", "slide_index"],
            ),
        ),
        // Lookups
        tool(
            "slide_id_to_index",
            "Zero-based position of a slide.",
            object(pid_slide(), &["presentation_id", "slide_id"]),
        ),
        tool(
            "index_to_slide_id",
            "Object ID of the slide at an index.",
            object(
                vec![presentation_id(), ("index", integer("Zero-based slide index"))],
                &["presentation_id", "index"],
            ),
        ),
        tool(
            "get_element_id_by_name",
            "Find an element by its text or title, optionally on one slide.",
            object(
                vec![
                    presentation_id(),
                    ("slide_id", string("Restrict the search to this slide")),
                    ("name", string("Text contained in the element, or its exact title")),
                ],
                &["presentation_id", "name"],
            ),
        ),
        tool(
            "find_element_ids",
            "IDs of every shape whose text contains a string.",
            object(
                vec![presentation_id(), ("search", string("Text to look for, case-insensitive"))],
                &["presentation_id", "search"],
            ),
        ),
        tool(
            "get_slide_data",
            "Raw objectId and pageElements of one slide; empty object when the slide does not exist.",
            object(pid_slide(), &["presentation_id", "slide_id"]),
        ),
        tool(
            "get_page_size",
            "Page width and height in points.",
            object(pid(), &["presentation_id"]),
        ),
        tool(
            "get_presentation_text",
            "All slide text as Markdown.",
            object(pid(), &["presentation_id"]),
        ),
    ]
}

// --- Arguments ---

#[derive(Debug, Deserialize)]
struct PresentationArgs {
    presentation_id: String,
}

#[derive(Debug, Deserialize)]
struct SlideArgs {
    presentation_id: String,
    slide_id: String,
}

#[derive(Debug, Deserialize)]
struct CreatePresentationArgs {
    title: String,
}

#[derive(Debug, Deserialize)]
struct AddSlideArgs {
    presentation_id: String,
    layout: Option<String>,
    insertion_index: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ReorderSlidesArgs {
    presentation_id: String,
    slide_ids: Vec<String>,
    insertion_index: u32,
}

#[derive(Debug, Deserialize)]
struct DuplicateSlideArgs {
    presentation_id: String,
    slide_id: String,
    insertion_index: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct PlacedArgs<E> {
    presentation_id: String,
    slide_id: String,
    #[serde(flatten)]
    position: Position,
    #[serde(flatten)]
    extra: E,
}

/// Position fields that may be omitted together.
#[derive(Debug, Deserialize)]
struct OptionalPosition {
    x: Option<f64>,
    y: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
}

impl OptionalPosition {
    fn resolve(self) -> Result<Option<Position>> {
        match (self.x, self.y, self.width, self.height) {
            (Some(x), Some(y), Some(width), Some(height)) => {
                Ok(Some(Position::new(x, y, width, height)))
            }
            (None, None, None, None) => Ok(None),
            _ => Err(SlidesApiError::InvalidInput(
                "x, y, width and height must be given together".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TextBoxArgs {
    presentation_id: String,
    slide_id: String,
    text: String,
    #[serde(flatten)]
    position: OptionalPosition,
}

#[derive(Debug, Deserialize)]
struct StyleArgs<S> {
    presentation_id: String,
    shape_id: String,
    style: S,
    start_index: Option<u32>,
    end_index: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ImageArgs {
    image_url: String,
}

#[derive(Debug, Deserialize)]
struct VideoArgs {
    video_url: String,
    #[serde(flatten)]
    options: VideoOptions,
}

#[derive(Debug, Deserialize)]
struct AudioArgs {
    audio_url: String,
    link_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ShapeArgs {
    shape_type: String,
    fill_color: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroupArgs {
    presentation_id: String,
    element_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct UngroupArgs {
    presentation_id: String,
    group_id: String,
}

#[derive(Debug, Deserialize)]
struct ChartArgs {
    spreadsheet_id: String,
    chart_id: i64,
    #[serde(default)]
    linking_mode: LinkingMode,
}

#[derive(Debug, Deserialize)]
struct SheetTableArgs {
    spreadsheet_id: String,
    sheet_name: String,
    range_name: String,
}

#[derive(Debug, Deserialize)]
struct LayoutArgs {
    presentation_id: String,
    slide_id: String,
    layout: String,
}

#[derive(Debug, Deserialize)]
struct DuplicatePresentationArgs {
    presentation_id: String,
    new_title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TemplateArgs {
    presentation_id: String,
    template_name: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmailArgs {
    presentation_id: String,
    email_address: String,
}

#[derive(Debug, Deserialize)]
struct PermissionIdArgs {
    presentation_id: String,
    permission_id: String,
}

fn default_transition_seconds() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
struct TransitionArgs {
    presentation_id: String,
    slide_id: String,
    transition_type: String,
    #[serde(default = "default_transition_seconds")]
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct AnimationArgs {
    presentation_id: String,
    slide_id: String,
    element_id: String,
    animation_type: String,
}

#[derive(Debug, Deserialize)]
struct AutoAdvanceArgs {
    presentation_id: String,
    slide_id: String,
    seconds: f64,
}

#[derive(Debug, Deserialize)]
struct BackgroundArgs {
    presentation_id: String,
    slide_id: String,
    color: Option<String>,
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExportArgs {
    presentation_id: String,
    output_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct SlideExportArgs {
    presentation_id: String,
    slide_index: usize,
    output_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ThumbnailArgs {
    presentation_id: String,
    slide_index: usize,
    #[serde(default)]
    size: ThumbnailSize,
    output_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct IndexArgs {
    presentation_id: String,
    index: usize,
}

#[derive(Debug, Deserialize)]
struct ElementNameArgs {
    presentation_id: String,
    slide_id: Option<String>,
    name: String,
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    presentation_id: String,
    search: String,
}

fn parse<A: DeserializeOwned>(tool: &str, arguments: JsonValue) -> Result<A> {
    serde_json::from_value(arguments).map_err(|e| {
        SlidesApiError::InvalidInput(format!("Invalid arguments for {}: {}", tool, e))
    })
}

fn reply<R: Serialize>(value: R) -> Result<JsonValue> {
    Ok(serde_json::to_value(value)?)
}

fn color(hex: Option<String>) -> Result<Option<RgbColor>> {
    hex.as_deref().map(hex_to_rgb).transpose()
}

/// Runs tool `name` with JSON `arguments` and returns its serialized result.
pub async fn call_tool<T: Transport>(
    client: &GoogleClient<T>,
    name: &str,
    arguments: JsonValue,
) -> std::result::Result<JsonValue, ToolCallError> {
    let value = match name {
        "create_presentation" => {
            let a: CreatePresentationArgs = parse(name, arguments)?;
            reply(slides::create_presentation(client, &a.title).await?)
        }
        "get_presentation" => {
            let a: PresentationArgs = parse(name, arguments)?;
            slides::get_presentation(client, &a.presentation_id).await
        }
        "add_slide" => {
            let a: AddSlideArgs = parse(name, arguments)?;
            reply(
                slides::add_slide(
                    client,
                    &a.presentation_id,
                    a.layout.as_deref(),
                    a.insertion_index,
                )
                .await?,
            )
        }
        "delete_slide" => {
            let a: SlideArgs = parse(name, arguments)?;
            reply(slides::delete_slide(client, &a.presentation_id, &a.slide_id).await?)
        }
        "reorder_slides" => {
            let a: ReorderSlidesArgs = parse(name, arguments)?;
            reply(
                slides::reorder_slides(client, &a.presentation_id, &a.slide_ids, a.insertion_index)
                    .await?,
            )
        }
        "duplicate_slide" => {
            let a: DuplicateSlideArgs = parse(name, arguments)?;
            reply(
                slides::duplicate_slide(client, &a.presentation_id, &a.slide_id, a.insertion_index)
                    .await?,
            )
        }
        "add_text_to_slide" => {
            let a: TextBoxArgs = parse(name, arguments)?;
            reply(
                formatting::add_text_to_slide(
                    client,
                    &a.presentation_id,
                    &a.slide_id,
                    &a.text,
                    a.position.resolve()?,
                )
                .await?,
            )
        }
        "update_text_style" => {
            let a: StyleArgs<TextFormat> = parse(name, arguments)?;
            reply(
                formatting::update_text_style(
                    client,
                    &a.presentation_id,
                    &a.shape_id,
                    TextRange::from_bounds(a.start_index, a.end_index),
                    TextStyle::from(a.style),
                )
                .await?,
            )
        }
        "update_paragraph_style" => {
            let a: StyleArgs<ParagraphFormat> = parse(name, arguments)?;
            reply(
                formatting::update_paragraph_style(
                    client,
                    &a.presentation_id,
                    &a.shape_id,
                    TextRange::from_bounds(a.start_index, a.end_index),
                    ParagraphStyle::from(a.style),
                )
                .await?,
            )
        }
        "add_image_to_slide" => {
            let a: PlacedArgs<ImageArgs> = parse(name, arguments)?;
            reply(
                multimedia::add_image_to_slide(
                    client,
                    &a.presentation_id,
                    &a.slide_id,
                    &a.extra.image_url,
                    a.position,
                )
                .await?,
            )
        }
        "add_video_to_slide" => {
            let a: PlacedArgs<VideoArgs> = parse(name, arguments)?;
            reply(
                multimedia::add_video_to_slide(
                    client,
                    &a.presentation_id,
                    &a.slide_id,
                    &a.extra.video_url,
                    a.position,
                    a.extra.options,
                )
                .await?,
            )
        }
        "insert_audio_link" => {
            let a: PlacedArgs<AudioArgs> = parse(name, arguments)?;
            reply(
                multimedia::insert_audio_link(
                    client,
                    &a.presentation_id,
                    &a.slide_id,
                    &a.extra.audio_url,
                    a.position,
                    a.extra.link_text.as_deref(),
                )
                .await?,
            )
        }
        "add_shape_to_slide" => {
            let a: PlacedArgs<ShapeArgs> = parse(name, arguments)?;
            reply(
                multimedia::add_shape_to_slide(
                    client,
                    &a.presentation_id,
                    &a.slide_id,
                    &a.extra.shape_type,
                    a.position,
                    color(a.extra.fill_color)?,
                )
                .await?,
            )
        }
        "create_shape" => {
            let a: PlacedArgs<ShapeArgs> = parse(name, arguments)?;
            reply(
                multimedia::create_shape(
                    client,
                    &a.presentation_id,
                    &a.slide_id,
                    &a.extra.shape_type,
                    a.position,
                    color(a.extra.fill_color)?,
                )
                .await?,
            )
        }
        "group_elements" => {
            let a: GroupArgs = parse(name, arguments)?;
            reply(multimedia::group_elements(client, &a.presentation_id, &a.element_ids).await?)
        }
        "ungroup_elements" => {
            let a: UngroupArgs = parse(name, arguments)?;
            reply(multimedia::ungroup_elements(client, &a.presentation_id, &a.group_id).await?)
        }
        "create_sheets_chart" => {
            let a: PlacedArgs<ChartArgs> = parse(name, arguments)?;
            reply(
                data::create_sheets_chart(
                    client,
                    &a.presentation_id,
                    &a.slide_id,
                    &a.extra.spreadsheet_id,
                    a.extra.chart_id,
                    a.position,
                    a.extra.linking_mode,
                )
                .await?,
            )
        }
        "create_table_from_sheets" => {
            let a: PlacedArgs<SheetTableArgs> = parse(name, arguments)?;
            reply(
                data::create_table_from_sheets(
                    client,
                    &a.presentation_id,
                    &a.slide_id,
                    &a.extra.spreadsheet_id,
                    &a.extra.sheet_name,
                    &a.extra.range_name,
                    a.position,
                )
                .await?,
            )
        }
        "apply_predefined_layout" => {
            let a: LayoutArgs = parse(name, arguments)?;
            reply(
                templates::apply_predefined_layout(
                    client,
                    &a.presentation_id,
                    &a.slide_id,
                    &a.layout,
                )
                .await?,
            )
        }
        "duplicate_presentation" => {
            let a: DuplicatePresentationArgs = parse(name, arguments)?;
            reply(
                templates::duplicate_presentation(
                    client,
                    &a.presentation_id,
                    a.new_title.as_deref(),
                )
                .await?,
            )
        }
        "list_available_layouts" => {
            let a: PresentationArgs = parse(name, arguments)?;
            reply(templates::list_available_layouts(client, &a.presentation_id).await?)
        }
        "create_custom_template" => {
            let a: TemplateArgs = parse(name, arguments)?;
            reply(
                templates::create_custom_template(
                    client,
                    &a.presentation_id,
                    &a.template_name,
                    a.description.as_deref(),
                )
                .await?,
            )
        }
        "add_editor_permission" => {
            let a: EmailArgs = parse(name, arguments)?;
            reply(
                collaboration::add_editor_permission(client, &a.presentation_id, &a.email_address)
                    .await?,
            )
        }
        "add_viewer_permission" => {
            let a: EmailArgs = parse(name, arguments)?;
            reply(
                collaboration::add_viewer_permission(client, &a.presentation_id, &a.email_address)
                    .await?,
            )
        }
        "add_commenter_permission" => {
            let a: EmailArgs = parse(name, arguments)?;
            reply(
                collaboration::add_commenter_permission(
                    client,
                    &a.presentation_id,
                    &a.email_address,
                )
                .await?,
            )
        }
        "remove_permission" => {
            let a: PermissionIdArgs = parse(name, arguments)?;
            collaboration::remove_permission(client, &a.presentation_id, &a.permission_id).await?;
            Ok(json!({
                "message": format!(
                    "Removed permission {} from {}",
                    a.permission_id, a.presentation_id
                )
            }))
        }
        "list_permissions" => {
            let a: PresentationArgs = parse(name, arguments)?;
            reply(collaboration::list_permissions(client, &a.presentation_id).await?)
        }
        "make_public" => {
            let a: PresentationArgs = parse(name, arguments)?;
            reply(collaboration::make_public(client, &a.presentation_id).await?)
        }
        "set_slide_transition" => {
            let a: TransitionArgs = parse(name, arguments)?;
            reply(
                animations::set_slide_transition(
                    client,
                    &a.presentation_id,
                    &a.slide_id,
                    &a.transition_type,
                    a.duration,
                )
                .await?,
            )
        }
        "set_element_animation" => {
            let a: AnimationArgs = parse(name, arguments)?;
            reply(
                animations::set_element_animation(
                    client,
                    &a.presentation_id,
                    &a.slide_id,
                    &a.element_id,
                    &a.animation_type,
                )
                .await?,
            )
        }
        "apply_auto_advance" => {
            let a: AutoAdvanceArgs = parse(name, arguments)?;
            reply(
                animations::apply_auto_advance(client, &a.presentation_id, &a.slide_id, a.seconds)
                    .await?,
            )
        }
        "set_slide_background" => {
            let a: BackgroundArgs = parse(name, arguments)?;
            let background = Background::from_parts(color(a.color)?, a.image_url).ok_or_else(|| {
                SlidesApiError::InvalidInput(
                    "Either color or image_url must be provided".to_string(),
                )
            })?;
            reply(
                animations::set_slide_background(client, &a.presentation_id, &a.slide_id, background)
                    .await?,
            )
        }
        "export_presentation_as_pdf" => {
            let a: ExportArgs = parse(name, arguments)?;
            reply(
                export::export_presentation_as_pdf(
                    client,
                    &a.presentation_id,
                    a.output_path.as_deref(),
                )
                .await?,
            )
        }
        "export_slide_as_pdf" => {
            let a: SlideExportArgs = parse(name, arguments)?;
            reply(
                export::export_slide_as_pdf(
                    client,
                    &a.presentation_id,
                    a.slide_index,
                    a.output_path.as_deref(),
                )
                .await?,
            )
        }
        "get_presentation_thumbnail" => {
            let a: ThumbnailArgs = parse(name, arguments)?;
            reply(
                export::get_presentation_thumbnail(
                    client,
                    &a.presentation_id,
                    a.slide_index,
                    a.size,
                    a.output_path.as_deref(),
                )
                .await?,
            )
        }
        "slide_id_to_index" => {
            let a: SlideArgs = parse(name, arguments)?;
            reply(lookup::slide_id_to_index(client, &a.presentation_id, &a.slide_id).await?)
        }
        "index_to_slide_id" => {
            let a: IndexArgs = parse(name, arguments)?;
            reply(lookup::index_to_slide_id(client, &a.presentation_id, a.index).await?)
        }
        "get_element_id_by_name" => {
            let a: ElementNameArgs = parse(name, arguments)?;
            reply(
                lookup::get_element_id_by_name(
                    client,
                    &a.presentation_id,
                    a.slide_id.as_deref(),
                    &a.name,
                )
                .await?,
            )
        }
        "find_element_ids" => {
            let a: SearchArgs = parse(name, arguments)?;
            reply(lookup::find_element_ids(client, &a.presentation_id, &a.search).await?)
        }
        "get_slide_data" => {
            let a: SlideArgs = parse(name, arguments)?;
            lookup::get_slide_data(client, &a.presentation_id, &a.slide_id).await
        }
        "get_page_size" => {
            let a: PresentationArgs = parse(name, arguments)?;
            reply(lookup::get_page_size(client, &a.presentation_id).await?)
        }
        "get_presentation_text" => {
            let a: PresentationArgs = parse(name, arguments)?;
            reply(lookup::get_presentation_text(client, &a.presentation_id).await?)
        }
        _ => return Err(ToolCallError::UnknownTool(name.to_string())),
    };
    Ok(value?)
}
