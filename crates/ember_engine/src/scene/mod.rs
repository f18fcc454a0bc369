//! Declarative scenes
//!
//! A scene document lists entity templates, each a map from component name to
//! payload, plus an optional manifest of assets. The [`SceneLoader`] parses
//! documents (JSON or RON) and instantiates them into a [`World`](crate::ecs::World).

mod document;
mod loader;

pub use document::{AssetManifest, ComponentMap, EntityTemplate, MeshDefinition, Scene, TextureDefinition};
pub use loader::{LoadReport, SceneFormat, SceneLoader, SkippedComponent};

use thiserror::Error;

/// Document-level scene failures
#[derive(Debug, Error)]
pub enum SceneError {
    /// The scene file could not be read
    #[error("failed to read scene '{path}': {source}")]
    Io {
        /// File that failed
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON document
    #[error("invalid JSON scene: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed RON document
    #[error("invalid RON scene: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// File extension is neither `.json` nor `.ron`
    #[error("unsupported scene format: {0}")]
    UnsupportedFormat(String),
}
