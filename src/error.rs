//! Error and diagnostic types for the Easel composition engine.
//!
//! Composition itself never fails: problems with individual layers are
//! [`Diagnostic`]s, surfaced as warnings while the session keeps drawing.
//! [`EaselError`] covers the outer surfaces only: script parsing, font
//! loading, output serialization, and CLI file access.

use serde::Serialize;
use thiserror::Error;

use crate::model::LayerKind;

/// The unified error type returned by the public Easel entry points.
#[derive(Debug, Error)]
pub enum EaselError {
    /// JSON input failed to parse as a composition script.
    #[error("Failed to parse composition script: {source}{}", hint_suffix(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },
    /// The rendering could not be serialized for output.
    #[error("Failed to write rendering: {0}")]
    Output(#[source] serde_json::Error),
    /// Font data could not be decoded or parsed.
    #[error("Font error: {0}")]
    Font(String),
    /// A file could not be read or written.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// A command-line argument was missing or malformed.
    #[error("Invalid argument: {0}")]
    Argument(String),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for EaselError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the script schema. Every layer needs a \"type\" of artboard, rectangle, image, circleImage, text, or wrapText.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        EaselError::Parse { source: e, hint }
    }
}

/// A non-fatal problem found while composing. The layer is still drawn.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Diagnostic {
    /// Registered without an identifier: drawn, but not addressable.
    #[error("{} layer has no identifier and cannot be referenced", kind_label(.kind))]
    MissingIdentifier { kind: Option<LayerKind> },

    /// The identifier is already bound. The first binding is kept.
    #[error("identifier '{identifier}' is already taken; later references resolve to the first layer")]
    IdentifierCollision { identifier: String },

    /// The identifier shadows a session property name.
    #[error("identifier '{identifier}' shadows a reserved name; prefer a '#'-prefixed id")]
    ReservedIdentifier { identifier: String },

    /// The placement names a layer that was never registered.
    #[error("no layer '{identifier}' to position against; keeping the authored position")]
    UnresolvedReference { identifier: String },
}

fn kind_label(kind: &Option<LayerKind>) -> &'static str {
    kind.map(|k| k.name()).unwrap_or("untyped")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_carries_hint() {
        let err: EaselError = serde_json::from_str::<crate::model::Script>("{ \"layers\": [ }")
            .unwrap_err()
            .into();
        let message = err.to_string();
        assert!(message.starts_with("Failed to parse composition script"));
        assert!(message.contains("Hint:"));
    }

    #[test]
    fn test_schema_error_hint_names_layer_types() {
        let err: EaselError =
            serde_json::from_str::<crate::model::Script>(r#"{ "layers": [ { "type": "circle" } ] }"#)
                .unwrap_err()
                .into();
        assert!(err.to_string().contains("circleImage"));
    }

    #[test]
    fn test_output_error_is_not_reported_as_parse() {
        use std::collections::HashMap;

        let unserializable: HashMap<(i32, i32), i32> = [((1, 2), 3)].into_iter().collect();
        let source = serde_json::to_string(&unserializable).unwrap_err();
        let err = EaselError::Output(source);
        let message = err.to_string();
        assert!(message.starts_with("Failed to write rendering"));
        assert!(!message.contains("parse"));
        assert!(!message.contains("Hint:"));
    }

    #[test]
    fn test_diagnostic_messages() {
        let d = Diagnostic::MissingIdentifier {
            kind: Some(LayerKind::Rectangle),
        };
        assert_eq!(
            d.to_string(),
            "rectangle layer has no identifier and cannot be referenced"
        );

        let d = Diagnostic::UnresolvedReference {
            identifier: "title".to_string(),
        };
        assert!(d.to_string().contains("'title'"));
    }

    #[test]
    fn test_diagnostic_serializes_with_type_tag() {
        let d = Diagnostic::IdentifierCollision {
            identifier: "r1".to_string(),
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["type"], "identifierCollision");
        assert_eq!(json["identifier"], "r1");
    }
}
