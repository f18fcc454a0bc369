//! Asset catalog
//!
//! Records the textures and meshes declared by scene manifests under their
//! handles. Components refer to assets only by handle; render and audio
//! back-ends resolve handles through the catalog.

use std::collections::HashMap;

/// A texture declared by a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureAsset {
    /// Resource path the back-end loads from
    pub path: String,
}

/// A procedural mesh declared by a manifest
#[derive(Debug, Clone, PartialEq)]
pub struct MeshAsset {
    /// Flat vertex attribute data
    pub vertices: Vec<f32>,
    /// Triangle indices into `vertices`
    pub indices: Vec<u32>,
}

/// Handle → asset lookup
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    textures: HashMap<String, TextureAsset>,
    meshes: HashMap<String, MeshAsset>,
}

impl AssetCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a texture. A handle defined twice keeps the latest path.
    pub fn register_texture(&mut self, handle: impl Into<String>, path: impl Into<String>) {
        let handle = handle.into();
        let asset = TextureAsset { path: path.into() };
        log::debug!("Texture '{handle}' -> {}", asset.path);
        if let Some(previous) = self.textures.insert(handle.clone(), asset) {
            log::warn!("Texture handle '{handle}' redefined (was {})", previous.path);
        }
    }

    /// Record a mesh. A handle defined twice keeps the latest data.
    pub fn register_mesh(&mut self, handle: impl Into<String>, vertices: Vec<f32>, indices: Vec<u32>) {
        let handle = handle.into();
        log::debug!("Mesh '{handle}': {} floats, {} indices", vertices.len(), indices.len());
        if self.meshes.insert(handle.clone(), MeshAsset { vertices, indices }).is_some() {
            log::warn!("Mesh handle '{handle}' redefined");
        }
    }

    /// Texture registered under `handle`
    pub fn texture(&self, handle: &str) -> Option<&TextureAsset> {
        self.textures.get(handle)
    }

    /// Mesh registered under `handle`
    pub fn mesh(&self, handle: &str) -> Option<&MeshAsset> {
        self.meshes.get(handle)
    }

    /// Whether a texture or mesh uses this handle
    pub fn contains(&self, handle: &str) -> bool {
        self.textures.contains_key(handle) || self.meshes.contains_key(handle)
    }

    /// Number of registered textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of registered meshes
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Forget every asset
    pub fn clear(&mut self) {
        self.textures.clear();
        self.meshes.clear();
    }
}
