//! # Layer Composition Engine
//!
//! A [`Composition`] is one drawing session against one host canvas. It owns
//! the host, the session scale, and the [`Registry`] of layers drawn so far.
//!
//! ## How a Layer Is Drawn
//!
//! Each resolver takes an authored layer description and:
//!
//! 1. Assigns the layer kind
//! 2. Resolves its position: scales it to device units once, then applies
//!    its placement against an already registered layer, if any
//! 3. Fills in missing typography (text only) in device units, so a default
//!    font size is the same at every scale
//! 4. Computes kind-specific geometry: wrapped lines, the circular clip,
//!    the center-crop source rectangle
//! 5. Issues paint calls to the host, in order
//! 6. Registers the finished layer, in device units, for later placements
//!
//! Nothing here fails. Problems with individual layers become
//! [`Diagnostic`]s: they are logged as warnings and collected on the
//! session, and the layer is drawn anyway.

pub mod crop;
pub mod registry;
pub mod scale;

use std::f64::consts::PI;

use crate::error::Diagnostic;
use crate::host::DrawingContext;
use crate::model::{CompositionConfig, ImageMode, Layer, LayerKind, Step};
use crate::text::plan_lines;

pub use registry::Registry;

const DEFAULT_BACKGROUND: &str = "#cccccc";
const DEFAULT_TEXT_COLOR: &str = "#333333";
const DEFAULT_FONT_SIZE: f64 = 12.0;
const DEFAULT_WRAP_WIDTH: f64 = 200.0;
const DEFAULT_LINE_HEIGHT: f64 = 1.0;

/// One drawing session: a host canvas plus the layers composed onto it.
pub struct Composition<H: DrawingContext> {
    host: H,
    registry: Registry,
    canvas_id: String,
    diagnostics: Vec<Diagnostic>,
}

impl<H: DrawingContext> Composition<H> {
    pub fn new(host: H, config: &CompositionConfig) -> Self {
        Self {
            host,
            registry: Registry::new(config.scale),
            canvas_id: config.canvas_id.clone(),
            diagnostics: Vec::new(),
        }
    }

    pub fn scale(&self) -> f64 {
        self.registry.scale()
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registered layers in paint order, in device units.
    pub fn layers(&self) -> &[Layer] {
        self.registry.layers()
    }

    pub fn layer(&self, identifier: &str) -> Option<&Layer> {
        self.registry.get(identifier)
    }

    /// Every diagnostic raised so far, oldest first.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Canvas height that fits every content layer. See
    /// [`Registry::auto_height`].
    pub fn auto_canvas_height(&self) -> f64 {
        self.registry.auto_height()
    }

    /// Run one script step through its resolver.
    pub fn apply(&mut self, step: Step) -> &mut Self {
        match step {
            Step::Artboard(layer) => self.create_artboard(layer),
            Step::Rectangle(layer) => self.create_rectangle(layer),
            Step::Image(layer) => self.draw_image(layer),
            Step::CircleImage(layer) => self.draw_circle_image(layer),
            Step::Text(layer) => self.draw_text(layer),
            Step::WrapText(layer) => self.draw_wrap_text(layer),
        }
    }

    /// Paint a background spanning the origin to `(width, height)`.
    ///
    /// Artboards are always absolute: any placement is discarded unread.
    pub fn create_artboard(&mut self, mut layer: Layer) -> &mut Self {
        layer.kind = Some(LayerKind::Artboard);
        layer.reference_layer = None;
        scale::apply_scale(Some(&mut layer), self.registry.scale());

        let color = layer.background_color.as_deref().unwrap_or(DEFAULT_BACKGROUND);
        self.host.set_fill_style(color);
        self.host.fill_rect(
            0.0,
            0.0,
            layer.width.unwrap_or(0.0),
            layer.height.unwrap_or(0.0),
        );
        self.host.fill();

        self.register(layer);
        self
    }

    pub fn create_rectangle(&mut self, layer: Layer) -> &mut Self {
        let layer = self.resolve(layer, LayerKind::Rectangle);

        let color = layer.background_color.as_deref().unwrap_or(DEFAULT_BACKGROUND);
        self.host.set_fill_style(color);
        self.host.fill_rect(
            layer.left.unwrap_or(0.0),
            layer.top.unwrap_or(0.0),
            layer.width.unwrap_or(0.0),
            layer.height.unwrap_or(0.0),
        );

        self.register(layer);
        self
    }

    /// Draw an image into its box, stretched or center-cropped per `mode`.
    pub fn draw_image(&mut self, layer: Layer) -> &mut Self {
        let layer = self.resolve(layer, LayerKind::Image);

        let path = layer.path.as_deref().unwrap_or("");
        let left = layer.left.unwrap_or(0.0);
        let top = layer.top.unwrap_or(0.0);
        let width = layer.width.unwrap_or(0.0);
        let height = layer.height.unwrap_or(0.0);

        let crop = match layer.mode.unwrap_or_default() {
            ImageMode::Center => crop::center_crop(
                width,
                height,
                layer.source_width.unwrap_or(0.0),
                layer.source_height.unwrap_or(0.0),
            ),
            ImageMode::Fill => None,
        };

        match crop {
            Some(src) => self.host.draw_image_region(
                path, src.left, src.top, src.width, src.height, left, top, width, height,
            ),
            None => self.host.draw_image(path, left, top, width, height),
        }

        self.register(layer);
        self
    }

    /// Draw an image clipped to the circle inscribed in its square box.
    ///
    /// The registered layer's width and height are the box side.
    pub fn draw_circle_image(&mut self, layer: Layer) -> &mut Self {
        let mut layer = self.resolve(layer, LayerKind::CircleImage);

        let path = layer.path.as_deref().unwrap_or("");
        let left = layer.left.unwrap_or(0.0);
        let top = layer.top.unwrap_or(0.0);
        let diameter = layer.diameter.unwrap_or(0.0);
        let radius = diameter / 2.0;

        self.host.save();
        self.host.begin_path();
        self.host.arc(left + radius, top + radius, radius, 0.0, PI * 2.0, false);
        self.host.clip();
        self.host.draw_image(path, left, top, diameter, diameter);
        self.host.restore();

        layer.width = layer.diameter;
        layer.height = layer.diameter;
        self.register(layer);
        self
    }

    /// Draw a single unwrapped line of text with its top edge at `top`.
    pub fn draw_text(&mut self, mut layer: Layer) -> &mut Self {
        layer.left.get_or_insert(0.0);
        layer.top.get_or_insert(0.0);
        let mut layer = self.resolve(layer, LayerKind::Text);
        // Typography defaults are device units and skip scaling
        let font_size = *layer.font_size.get_or_insert(DEFAULT_FONT_SIZE);

        let text = layer.text.clone().unwrap_or_default();
        let left = layer.left.unwrap_or(0.0);
        let top = layer.top.unwrap_or(0.0);
        let color = layer.color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR);

        self.host.set_font_size(font_size);
        self.host.set_fill_style(color);
        self.host.fill_text(&text, left, top + font_size);

        layer.height = Some(font_size);
        layer.width = Some(self.host.measure_text(&text));
        self.register(layer);
        self
    }

    /// Draw text wrapped to `width`, one character at a time.
    ///
    /// Row `n` sits on the baseline `top + font_size + n * (font_size +
    /// line_height)`. The registered height runs from `top` to the last
    /// baseline; the registered width is the wrap width.
    pub fn draw_wrap_text(&mut self, mut layer: Layer) -> &mut Self {
        layer.left.get_or_insert(0.0);
        layer.top.get_or_insert(0.0);
        let mut layer = self.resolve(layer, LayerKind::WrapText);
        let font_size = *layer.font_size.get_or_insert(DEFAULT_FONT_SIZE);
        let width = *layer.width.get_or_insert(DEFAULT_WRAP_WIDTH);
        let line_height = *layer.line_height.get_or_insert(DEFAULT_LINE_HEIGHT);

        let text = layer.text.clone().unwrap_or_default();
        let left = layer.left.unwrap_or(0.0);
        let top = layer.top.unwrap_or(0.0);
        let color = layer.color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR);

        // Measurements use the layer's font size
        self.host.set_font_size(font_size);
        let host = &mut self.host;
        let lines = plan_lines(&text, width, |line| host.measure_text(line));

        let mut baseline = top;
        for (row, line) in lines.iter().enumerate() {
            baseline = top + font_size + row as f64 * (font_size + line_height);
            self.host.set_fill_style(color);
            self.host.set_font_size(font_size);
            self.host.fill_text(line, left, baseline);
        }

        layer.height = Some(baseline - top);
        layer.width = Some(width);
        self.register(layer);
        self
    }

    /// Flush the composition to the host surface. `complete` runs once the
    /// host has finished.
    pub fn draw<F>(&mut self, complete: F)
    where
        F: FnOnce() + 'static,
    {
        self.host.commit(Box::new(complete));
    }

    fn resolve(&mut self, mut layer: Layer, kind: LayerKind) -> Layer {
        layer.kind = Some(kind);
        let (layer, diagnostic) = self.registry.resolve_position(layer);
        if let Some(diagnostic) = diagnostic {
            self.report(diagnostic);
        }
        layer
    }

    fn register(&mut self, layer: Layer) {
        for diagnostic in self.registry.register(layer) {
            self.report(diagnostic);
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(canvas = %self.canvas_id, "{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }
}
