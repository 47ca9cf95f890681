//! # Scale Normalization
//!
//! The single point where authored units become device units. Each layer
//! kind names exactly which of its fields are geometry and get multiplied;
//! everything else (colors, paths, text, source-image dimensions) passes
//! through untouched.
//!
//! Scaling is not idempotent. Applying it twice to the same layer scales it
//! twice, so the engine applies it once, during position resolution.

use crate::model::{Layer, LayerKind};

/// A numeric layer field that is measured in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalableField {
    Left,
    Top,
    Width,
    Height,
    Diameter,
    FontSize,
    LineHeight,
}

impl ScalableField {
    fn slot(self, layer: &mut Layer) -> &mut Option<f64> {
        match self {
            ScalableField::Left => &mut layer.left,
            ScalableField::Top => &mut layer.top,
            ScalableField::Width => &mut layer.width,
            ScalableField::Height => &mut layer.height,
            ScalableField::Diameter => &mut layer.diameter,
            ScalableField::FontSize => &mut layer.font_size,
            ScalableField::LineHeight => &mut layer.line_height,
        }
    }
}

use ScalableField::*;

const ARTBOARD_FIELDS: &[ScalableField] = &[Width, Height];
const BOX_FIELDS: &[ScalableField] = &[Left, Top, Width, Height];
const CIRCLE_FIELDS: &[ScalableField] = &[Left, Top, Width, Height, Diameter];
const TEXT_FIELDS: &[ScalableField] = &[Left, Top, Width, Height, FontSize];
const WRAP_TEXT_FIELDS: &[ScalableField] = &[Left, Top, Width, Height, FontSize, LineHeight];
const ALL_FIELDS: &[ScalableField] = &[Left, Top, Width, Height, Diameter, FontSize, LineHeight];

/// The fields scaled for a layer of `kind`. An unassigned kind scales every
/// layout field.
pub fn scalable_fields(kind: Option<LayerKind>) -> &'static [ScalableField] {
    match kind {
        Some(LayerKind::Artboard) => ARTBOARD_FIELDS,
        Some(LayerKind::Rectangle) | Some(LayerKind::Image) => BOX_FIELDS,
        Some(LayerKind::CircleImage) => CIRCLE_FIELDS,
        Some(LayerKind::Text) => TEXT_FIELDS,
        Some(LayerKind::WrapText) => WRAP_TEXT_FIELDS,
        None => ALL_FIELDS,
    }
}

/// Multiply every present scalable field of `layer` by `factor`, in place.
/// A missing layer is a no-op.
pub fn apply_scale(layer: Option<&mut Layer>, factor: f64) {
    let Some(layer) = layer else {
        return;
    };
    for &field in scalable_fields(layer.kind) {
        if let Some(value) = field.slot(layer) {
            *value *= factor;
        }
    }
}
