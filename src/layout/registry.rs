//! # Layer Registry
//!
//! Every layer composed so far, in paint order, plus a lookup by
//! identifier. Stored geometry is always in device units: layers are scaled
//! exactly once by [`Registry::resolve_position`] before they are painted,
//! and [`Registry::register`] stores them as they are.

use std::collections::HashMap;

use crate::error::Diagnostic;
use crate::model::{Layer, LayerKind, Placement};

use super::scale::apply_scale;

/// Names of session properties and operations. Identifiers spelled the
/// same way still bind, with a warning.
pub const RESERVED_IDENTIFIERS: &[&str] = &[
    "scale",
    "ctx",
    "canvasId",
    "layers",
    "constructor",
    "draw",
    "createArtboard",
    "createRectangle",
    "drawImage",
    "drawCircleImage",
    "drawText",
    "drawWrapText",
    "getAutoCanvasHeight",
];

/// Anchored coordinates for the axes a [`Placement`] asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResolvedOffset {
    pub top: Option<f64>,
    pub left: Option<f64>,
}

impl Placement {
    /// Coordinates past the far edges of `anchor`.
    ///
    /// `anchor` is a registered layer, so its geometry is already in device
    /// units; the placement's own offsets are authored and get `scale`.
    pub fn resolve(&self, anchor: &Layer, scale: f64) -> ResolvedOffset {
        ResolvedOffset {
            top: self.top.map(|offset| {
                anchor.top.unwrap_or(0.0) + anchor.height.unwrap_or(0.0) + offset * scale
            }),
            left: self.left.map(|offset| {
                anchor.left.unwrap_or(0.0) + anchor.width.unwrap_or(0.0) + offset * scale
            }),
        }
    }
}

/// The ordered, identifier-indexed collection of composed layers.
#[derive(Debug, Clone)]
pub struct Registry {
    scale: f64,
    layers: Vec<Layer>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new(scale: f64) -> Self {
        Self {
            scale,
            layers: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Registered layers in paint order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn get(&self, identifier: &str) -> Option<&Layer> {
        self.index.get(identifier).map(|&i| &self.layers[i])
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Convert an authored layer to device units and apply its placement.
    ///
    /// The placement is taken off the layer whether or not its anchor
    /// exists. A missing anchor leaves the layer at its own authored
    /// position and is reported as [`Diagnostic::UnresolvedReference`].
    pub fn resolve_position(&self, mut layer: Layer) -> (Layer, Option<Diagnostic>) {
        let placement = layer.reference_layer.take();
        apply_scale(Some(&mut layer), self.scale);

        let Some(placement) = placement else {
            return (layer, None);
        };

        match self.get(&placement.identifier) {
            Some(anchor) => {
                let offset = placement.resolve(anchor, self.scale);
                if let Some(top) = offset.top {
                    layer.top = Some(top);
                }
                if let Some(left) = offset.left {
                    layer.left = Some(left);
                }
                (layer, None)
            }
            None => (
                layer,
                Some(Diagnostic::UnresolvedReference {
                    identifier: placement.identifier,
                }),
            ),
        }
    }

    /// Append a finished layer. Geometry is stored as given.
    ///
    /// The layer always joins the paint order. It becomes addressable only
    /// if it has an identifier that is not already bound.
    pub fn register(&mut self, layer: Layer) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let position = self.layers.len();

        match layer.id() {
            None => diagnostics.push(Diagnostic::MissingIdentifier { kind: layer.kind }),
            Some(identifier) => {
                if RESERVED_IDENTIFIERS.contains(&identifier) {
                    diagnostics.push(Diagnostic::ReservedIdentifier {
                        identifier: identifier.to_string(),
                    });
                }
                if self.index.contains_key(identifier) {
                    diagnostics.push(Diagnostic::IdentifierCollision {
                        identifier: identifier.to_string(),
                    });
                } else {
                    self.index.insert(identifier.to_string(), position);
                }
            }
        }

        self.layers.push(layer);
        diagnostics
    }

    /// Lowest canvas height that shows every content layer: the greatest
    /// bottom edge among non-artboard layers, or zero when there are none.
    ///
    /// The bottom edge is taken as is, so content lying entirely above the
    /// origin yields a negative height.
    pub fn auto_height(&self) -> f64 {
        let bottom = self
            .layers
            .iter()
            .filter(|layer| layer.kind != Some(LayerKind::Artboard))
            .map(Layer::bottom)
            .fold(f64::NEG_INFINITY, f64::max);
        if bottom.is_finite() {
            bottom
        } else {
            0.0
        }
    }
}
