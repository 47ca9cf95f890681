//! # Composition Model
//!
//! The input representation for the composition engine. A layer is one
//! drawable unit (shape, image, or text block) described in authored units.
//! Layers are usually produced by direct construction in Rust or by
//! deserializing a composition script from JSON.
//!
//! A layer carries no kind of its own when authored: the resolver that
//! consumes it assigns the kind, rewrites its geometry into device units,
//! and strips the one-shot `reference_layer` placement before storing it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One drawable unit with pending (authored) or resolved (device) geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Registry key. Layers without one are drawn but cannot be referenced.
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Assigned by the resolver, never by the caller.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub kind: Option<LayerKind>,

    // ── Geometry ───────────────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, alias = "d", skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,

    // ── Paint ──────────────────────────────────────────────────
    /// Image source reference, handed to the host untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Extra spacing between wrapped rows, added on top of the font size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ImageMode>,
    /// Natural width of the image source, in source pixels.
    #[serde(default, alias = "sWidth", skip_serializing_if = "Option::is_none")]
    pub source_width: Option<f64>,
    /// Natural height of the image source, in source pixels.
    #[serde(default, alias = "sHeight", skip_serializing_if = "Option::is_none")]
    pub source_height: Option<f64>,

    /// Position relative to an already registered layer. Consumed by
    /// resolution; never present on a registered layer.
    #[serde(default, alias = "referLayer", skip_serializing_if = "Option::is_none")]
    pub reference_layer: Option<Placement>,
}

impl Layer {
    /// A layer addressable under `identifier`.
    pub fn with_id(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
            ..Default::default()
        }
    }

    /// The identifier, treating an empty string as absent.
    pub fn id(&self) -> Option<&str> {
        self.identifier.as_deref().filter(|id| !id.is_empty())
    }

    /// Bottom edge, treating missing geometry as zero.
    pub fn bottom(&self) -> f64 {
        self.top.unwrap_or(0.0) + self.height.unwrap_or(0.0)
    }
}

/// The resolver that produced a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayerKind {
    Artboard,
    Rectangle,
    Image,
    CircleImage,
    Text,
    WrapText,
}

impl LayerKind {
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Artboard => "artboard",
            LayerKind::Rectangle => "rectangle",
            LayerKind::Image => "image",
            LayerKind::CircleImage => "circleImage",
            LayerKind::Text => "text",
            LayerKind::WrapText => "wrapText",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How an image fills its destination box.
///
/// Any mode string other than `"center"` stretches the whole source into
/// the box, so unknown modes deserialize as [`ImageMode::Fill`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImageMode {
    #[default]
    Fill,
    /// Crop the source around its center to the destination aspect ratio.
    Center,
}

impl From<String> for ImageMode {
    fn from(mode: String) -> Self {
        match mode.as_str() {
            "center" => ImageMode::Center,
            _ => ImageMode::Fill,
        }
    }
}

impl From<ImageMode> for String {
    fn from(mode: ImageMode) -> Self {
        match mode {
            ImageMode::Fill => "fill".to_string(),
            ImageMode::Center => "center".to_string(),
        }
    }
}

/// A request to place a layer relative to a registered one.
///
/// Each present offset places the layer past the anchor's far edge on that
/// axis: `top` below its bottom edge, `left` past its right edge. Offsets
/// are in authored units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(alias = "id")]
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
}

impl Placement {
    /// Place below the anchor's bottom edge, separated by `offset`.
    pub fn below(identifier: impl Into<String>, offset: f64) -> Self {
        Self {
            identifier: identifier.into(),
            top: Some(offset),
            left: None,
        }
    }

    /// Place past the anchor's right edge, separated by `offset`.
    pub fn right_of(identifier: impl Into<String>, offset: f64) -> Self {
        Self {
            identifier: identifier.into(),
            top: None,
            left: Some(offset),
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionConfig {
    /// Device units per authored unit.
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Name of the host canvas this session draws into.
    #[serde(default = "default_canvas_id")]
    pub canvas_id: String,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            canvas_id: default_canvas_id(),
        }
    }
}

fn default_scale() -> f64 {
    1.0
}

fn default_canvas_id() -> String {
    "canvas".to_string()
}

/// A complete composition: configuration plus layers in paint order.
///
/// Unknown top-level keys are rejected, so a misspelled `font` or `layers`
/// fails loudly instead of composing without it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub config: CompositionConfig,

    /// Font used to answer text measurements: base64 TrueType/OpenType
    /// data or a `data:font/...;base64,` URI. Built-in metrics otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    #[serde(default)]
    pub layers: Vec<Step>,
}

/// One resolver invocation in a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Step {
    Artboard(Layer),
    Rectangle(Layer),
    Image(Layer),
    CircleImage(Layer),
    Text(Layer),
    WrapText(Layer),
}

impl Step {
    pub fn kind(&self) -> LayerKind {
        match self {
            Step::Artboard(_) => LayerKind::Artboard,
            Step::Rectangle(_) => LayerKind::Rectangle,
            Step::Image(_) => LayerKind::Image,
            Step::CircleImage(_) => LayerKind::CircleImage,
            Step::Text(_) => LayerKind::Text,
            Step::WrapText(_) => LayerKind::WrapText,
        }
    }
}
