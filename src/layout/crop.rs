//! # Image Crop Geometry
//!
//! Source-rectangle math for image fit modes. Crop rectangles are in the
//! source image's own pixel space, independent of the session scale: the
//! destination box only contributes its aspect ratio.

/// A rectangle in source-image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// The largest source region with the destination's aspect ratio, centered
/// in the source.
///
/// Starts from the full source width and the matching height; when that
/// height would overrun the source, the height is clamped and the width
/// derived from it instead. Returns `None` when any dimension is not a
/// positive finite number, in which case there is nothing sensible to crop.
pub fn center_crop(
    dest_width: f64,
    dest_height: f64,
    source_width: f64,
    source_height: f64,
) -> Option<SourceRect> {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if ![dest_width, dest_height, source_width, source_height]
        .into_iter()
        .all(positive)
    {
        return None;
    }

    let mut width = source_width;
    let mut height = dest_height * (source_width / dest_width);

    if height > source_height {
        height = source_height;
        width = dest_width * (source_height / dest_height);
    }

    Some(SourceRect {
        left: (source_width - width) / 2.0,
        top: (source_height - height) / 2.0,
        width,
        height,
    })
}
