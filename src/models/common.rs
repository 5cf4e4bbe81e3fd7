use serde::{Deserialize, Serialize};

/// Specifies a unit of length.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/Dimension#Unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    /// The units are unknown.
    #[serde(rename = "UNIT_UNSPECIFIED")]
    UnitUnspecified,
    /// An English Metric Unit (EMU). 12700 EMU = 1 pt.
    Emu,
    /// A point (pt). 1 pt = 1/72 inch.
    Pt,
}

/// A magnitude in a specific unit.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/Dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl Dimension {
    pub fn pt(magnitude: f64) -> Self {
        Dimension {
            magnitude: Some(magnitude),
            unit: Some(Unit::Pt),
        }
    }
}

/// A width and height.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/Size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
}

/// AffineTransform uses a 3x3 matrix with an implied last row of [ 0 0 1 ].
///
/// x' = scaleX * x + shearX * y + translateX;
/// y' = shearY * x + scaleY * y + translateY;
///
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/AffineTransform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffineTransform {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shear_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shear_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f64>,
    /// The units for the translation elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl AffineTransform {
    /// An unscaled, unsheared transform that only translates.
    pub fn translation(x: f64, y: f64, unit: Unit) -> Self {
        AffineTransform {
            scale_x: Some(1.0),
            scale_y: Some(1.0),
            shear_x: None,
            shear_y: None,
            translate_x: Some(x),
            translate_y: Some(y),
            unit: Some(unit),
        }
    }
}
