//! # Easel
//!
//! Declarative layer composition for 2D canvases.
//!
//! Callers describe rectangles, images, circular images, and text blocks in
//! authored units. Easel resolves where each one goes and how big it is,
//! then paints it through a host canvas API. Layers can be positioned
//! relative to layers drawn before them ("10 units below the title"), and
//! text wraps to a width budget using the host's own measurements.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]    — Layers, placements, session config
//!       ↓
//!   [layout]   — Scale, place, wrap; registry of drawn layers
//!       ↓        ↑ [text] metrics and wrap planning
//!   [host]     — Paint calls against the host canvas
//! ```

pub mod error;
pub mod font;
pub mod host;
pub mod layout;
pub mod model;
pub mod text;

#[cfg(feature = "wasm")]
pub mod wasm;

use serde::Serialize;

use error::{Diagnostic, EaselError};
use font::FontMetrics;
use host::{DrawCommand, Recorder};
use layout::Composition;
use model::Script;

/// The result of running a composition script.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rendering {
    pub canvas_id: String,
    /// Canvas height that fits every content layer, in device units.
    pub height: f64,
    /// Every host call, in paint order, ending with the commit.
    pub commands: Vec<DrawCommand>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run a composition script against a recording host.
///
/// This is the primary entry point. Fails only if the script's font cannot
/// be loaded; layer-level problems are reported in
/// [`Rendering::diagnostics`].
pub fn compose(script: Script) -> Result<Rendering, EaselError> {
    let metrics = match script.font.as_deref() {
        Some(src) => FontMetrics::from_base64(src)?,
        None => FontMetrics::Builtin,
    };

    let mut composition = Composition::new(Recorder::with_metrics(metrics), &script.config);
    for step in script.layers {
        composition.apply(step);
    }
    composition.draw(|| tracing::debug!("composition committed"));

    let height = composition.auto_canvas_height();
    let diagnostics = composition.diagnostics().to_vec();
    let canvas_id = composition.canvas_id().to_string();
    Ok(Rendering {
        canvas_id,
        height,
        commands: composition.into_host().into_commands(),
        diagnostics,
    })
}

/// Run a composition script described as JSON.
pub fn compose_json(json: &str) -> Result<Rendering, EaselError> {
    let script: Script = serde_json::from_str(json)?;
    compose(script)
}
