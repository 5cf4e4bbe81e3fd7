//! Agent-facing argument types. These are what an LLM fills in; each converts
//! into the corresponding write-side request model.

use serde::{Deserialize, Serialize};

use crate::models::common::{AffineTransform, Dimension, Size, Unit};
use crate::models::requests::{
    Alignment, Link, PageElementProperties, ParagraphStyle, RgbColor, SpacingMode, TextDirection,
    TextStyle,
};

/// Position and size of a new element, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Position {
            x,
            y,
            width,
            height,
        }
    }

    /// Element properties placing an element on `page_object_id`, in points.
    pub fn element_properties(&self, page_object_id: &str) -> PageElementProperties {
        PageElementProperties {
            page_object_id: page_object_id.to_string(),
            size: Size {
                width: Some(Dimension::pt(self.width)),
                height: Some(Dimension::pt(self.height)),
            },
            transform: AffineTransform::translation(self.x, self.y, Unit::Pt),
        }
    }
}

/// Text formatting an agent may ask for. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFormat {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    /// Font size in points.
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub color: Option<RgbColor>,
    pub background_color: Option<RgbColor>,
    pub link_url: Option<String>,
}

impl From<TextFormat> for TextStyle {
    fn from(format: TextFormat) -> Self {
        TextStyle {
            bold: format.bold,
            italic: format.italic,
            underline: format.underline,
            strikethrough: format.strikethrough,
            font_size: format.font_size.map(Dimension::pt),
            font_family: format.font_family,
            foreground_color: format.color.map(Into::into),
            background_color: format.background_color.map(Into::into),
            link: format.link_url.map(|url| Link { url }),
        }
    }
}

/// Paragraph formatting. Lengths are in points; line spacing is a
/// percentage (150 = 1.5 lines).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphFormat {
    pub alignment: Option<Alignment>,
    pub line_spacing: Option<f64>,
    pub space_above: Option<f64>,
    pub space_below: Option<f64>,
    pub indent_first_line: Option<f64>,
    pub indent_start: Option<f64>,
    pub indent_end: Option<f64>,
    pub direction: Option<TextDirection>,
    pub spacing_mode: Option<SpacingMode>,
}

impl From<ParagraphFormat> for ParagraphStyle {
    fn from(format: ParagraphFormat) -> Self {
        ParagraphStyle {
            alignment: format.alignment,
            line_spacing: format.line_spacing,
            space_above: format.space_above.map(Dimension::pt),
            space_below: format.space_below.map(Dimension::pt),
            indent_first_line: format.indent_first_line.map(Dimension::pt),
            indent_start: format.indent_start.map(Dimension::pt),
            indent_end: format.indent_end.map(Dimension::pt),
            direction: format.direction,
            spacing_mode: format.spacing_mode,
        }
    }
}

/// A slide background: a solid color or a stretched image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    Color(RgbColor),
    ImageUrl(String),
}

impl Background {
    /// The color wins when both are given.
    pub fn from_parts(color: Option<RgbColor>, image_url: Option<String>) -> Option<Self> {
        match (color, image_url) {
            (Some(color), _) => Some(Background::Color(color)),
            (None, Some(url)) => Some(Background::ImageUrl(url)),
            (None, None) => None,
        }
    }
}

/// Drive permission roles granted by the collaboration tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionRole {
    Writer,
    Commenter,
    Reader,
}

impl PermissionRole {
    /// The Drive role name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionRole::Writer => "writer",
            PermissionRole::Commenter => "commenter",
            PermissionRole::Reader => "reader",
        }
    }
}

/// Thumbnail sizes offered by `pages.getThumbnail`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThumbnailSize {
    Small,
    Medium,
    #[default]
    Large,
}

impl ThumbnailSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThumbnailSize::Small => "SMALL",
            ThumbnailSize::Medium => "MEDIUM",
            ThumbnailSize::Large => "LARGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn position_in_points() {
        let position = Position::new(100.0, 50.0, 300.0, 40.0);
        assert_eq!(
            serde_json::to_value(position.element_properties("slide_1")).unwrap(),
            json!({
                "pageObjectId": "slide_1",
                "size": {
                    "width": {"magnitude": 300.0, "unit": "PT"},
                    "height": {"magnitude": 40.0, "unit": "PT"}
                },
                "transform": {
                    "scaleX": 1.0, "scaleY": 1.0,
                    "translateX": 100.0, "translateY": 50.0,
                    "unit": "PT"
                }
            })
        );
    }

    #[test]
    fn text_format_converts_to_masked_style() {
        let format: TextFormat = serde_json::from_value(json!({
            "italic": true,
            "font_family": "Roboto",
            "color": {"red": 1.0, "green": 0.0, "blue": 0.0}
        }))
        .unwrap();
        let style = TextStyle::from(format);
        assert_eq!(style.fields(), "italic,fontFamily,foregroundColor");
    }

    #[test]
    fn paragraph_format_uses_points() {
        let style = ParagraphStyle::from(ParagraphFormat {
            alignment: Some(Alignment::Center),
            space_above: Some(6.0),
            ..Default::default()
        });
        assert_eq!(style.fields(), "alignment,spaceAbove");
        assert_eq!(style.space_above, Some(Dimension::pt(6.0)));
    }

    #[test]
    fn background_prefers_color() {
        let red = RgbColor {
            red: 1.0,
            green: 0.0,
            blue: 0.0,
        };
        assert_eq!(
            Background::from_parts(Some(red), Some("https://x".into())),
            Some(Background::Color(red))
        );
        assert_eq!(
            Background::from_parts(None, Some("https://x".into())),
            Some(Background::ImageUrl("https://x".into()))
        );
        assert_eq!(Background::from_parts(None, None), None);
    }
}
