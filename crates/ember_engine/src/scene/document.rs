//! Scene document model
//!
//! ```json
//! {
//!   "name": "level_1",
//!   "manifest": { "textures": [{ "handle": "player", "path": "player.png" }] },
//!   "entities": [
//!     { "name": "Player", "components": { "TransformComponent": { "position": [0, 0, 0] } } }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::ecs::Payload;

/// Component payloads of one template, in document order
pub type ComponentMap = serde_json::Map<String, Payload>;

/// A parsed scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name used in logs and reports
    pub name: String,

    /// Assets to register before entities are created
    #[serde(default)]
    pub manifest: Option<AssetManifest>,

    /// Entities in creation order
    #[serde(default)]
    pub entities: Vec<EntityTemplate>,
}

/// Blueprint for one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTemplate {
    /// Name reported in the load report
    pub name: String,

    /// Component name → payload
    #[serde(default)]
    pub components: ComponentMap,
}

/// Assets a scene needs before its entities are created
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Textures by handle
    #[serde(default)]
    pub textures: Vec<TextureDefinition>,

    /// Meshes by handle
    #[serde(default)]
    pub meshes: Vec<MeshDefinition>,
}

/// Texture file to register
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureDefinition {
    /// Handle components refer to
    pub handle: String,
    /// Image path, relative to the scene
    pub path: String,
}

/// Procedural mesh data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDefinition {
    /// Handle components refer to
    pub handle: String,
    /// Interleaved vertex attributes
    pub vertices: Vec<f32>,
    /// Triangle indices
    pub indices: Vec<u32>,
}
