//! # Host Drawing Context
//!
//! The canvas API the resolvers paint through. Easel never draws pixels
//! itself: every paint call is delegated to a [`DrawingContext`] supplied by
//! the embedding application, in the order the resolvers issue them.
//!
//! [`Recorder`] is a context that records each call as a [`DrawCommand`].
//! It backs the tests and the CLI, and answers text measurements from
//! [`FontMetrics`].

use serde::Serialize;

use crate::font::FontMetrics;

/// Font size a fresh canvas context starts with.
pub const DEFAULT_FONT_SIZE: f64 = 10.0;

/// The drawing operations the engine needs from a host canvas.
///
/// Coordinates are device units. Image sub-regions are in source pixels.
pub trait DrawingContext {
    fn set_fill_style(&mut self, color: &str);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Fill the current path with the current fill style.
    fn fill(&mut self);

    /// Draw the whole image `path` into the destination box.
    fn draw_image(&mut self, path: &str, x: f64, y: f64, width: f64, height: f64);

    /// Draw the `(sx, sy, sw, sh)` region of image `path` into the
    /// destination box.
    #[allow(clippy::too_many_arguments)]
    fn draw_image_region(
        &mut self,
        path: &str,
        sx: f64,
        sy: f64,
        sw: f64,
        sh: f64,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
    );

    fn set_font_size(&mut self, size: f64);

    /// Paint `text` with its baseline at `y`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Width of `text` at the current font size.
    fn measure_text(&mut self, text: &str) -> f64;

    fn save(&mut self);

    fn restore(&mut self);

    fn begin_path(&mut self);

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64, counterclockwise: bool);

    fn clip(&mut self);

    /// Flush everything drawn so far to the surface. `complete` runs once
    /// the host has finished compositing.
    fn commit(&mut self, complete: Box<dyn FnOnce()>);
}

/// One recorded host call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    SetFillStyle {
        color: String,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Fill,
    DrawImage {
        path: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    DrawImageRegion {
        path: String,
        sx: f64,
        sy: f64,
        sw: f64,
        sh: f64,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
    },
    SetFontSize {
        size: f64,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
    },
    Save,
    Restore,
    BeginPath,
    #[serde(rename_all = "camelCase")]
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        counterclockwise: bool,
    },
    Clip,
    Commit,
}

#[derive(Debug, Clone)]
struct State {
    fill_style: String,
    font_size: f64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            fill_style: "#000000".to_string(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

/// A drawing context that records every call.
///
/// Tracks the fill style and font size the way a canvas does, including
/// `save`/`restore`, so measurements follow the most recent
/// [`DrawingContext::set_font_size`].
#[derive(Debug, Default)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
    metrics: FontMetrics,
    state: State,
    saved: Vec<State>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: FontMetrics) -> Self {
        Self {
            metrics,
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn fill_style(&self) -> &str {
        &self.state.fill_style
    }

    pub fn font_size(&self) -> f64 {
        self.state.font_size
    }
}

impl DrawingContext for Recorder {
    fn set_fill_style(&mut self, color: &str) {
        self.state.fill_style = color.to_string();
        self.commands.push(DrawCommand::SetFillStyle {
            color: color.to_string(),
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::FillRect { x, y, width, height });
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn draw_image(&mut self, path: &str, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::DrawImage {
            path: path.to_string(),
            x,
            y,
            width,
            height,
        });
    }

    fn draw_image_region(
        &mut self,
        path: &str,
        sx: f64,
        sy: f64,
        sw: f64,
        sh: f64,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
    ) {
        self.commands.push(DrawCommand::DrawImageRegion {
            path: path.to_string(),
            sx,
            sy,
            sw,
            sh,
            dx,
            dy,
            dw,
            dh,
        });
    }

    fn set_font_size(&mut self, size: f64) {
        self.state.font_size = size;
        self.commands.push(DrawCommand::SetFontSize { size });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        self.metrics.measure_string(text, self.state.font_size)
    }

    fn save(&mut self) {
        self.saved.push(self.state.clone());
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        // Restoring with nothing saved is a no-op on a canvas
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64, counterclockwise: bool) {
        self.commands.push(DrawCommand::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
            counterclockwise,
        });
    }

    fn clip(&mut self) {
        self.commands.push(DrawCommand::Clip);
    }

    fn commit(&mut self, complete: Box<dyn FnOnce()>) {
        self.commands.push(DrawCommand::Commit);
        complete();
    }
}
