//! Scene parsing and instantiation

use std::fmt;
use std::path::Path;

use super::document::Scene;
use super::SceneError;
use crate::assets::AssetCatalog;
use crate::ecs::{ComponentRegistry, EcsError, Entity, World};

/// Supported document encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFormat {
    /// `.json`
    Json,
    /// `.ron`
    Ron,
}

impl SceneFormat {
    /// Pick a format from a file extension (`.json` or `.ron`)
    ///
    /// # Errors
    /// [`SceneError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, SceneError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("ron") => Ok(Self::Ron),
            _ => Err(SceneError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl fmt::Display for SceneFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "JSON",
            Self::Ron => "RON",
        })
    }
}

/// A component the loader could not attach
#[derive(Debug)]
pub struct SkippedComponent {
    /// Template the component belonged to
    pub entity_name: String,
    /// Entity that was created for the template
    pub entity: Entity,
    /// Component name as written in the document
    pub component: String,
    /// [`EcsError::UnregisteredComponentType`] or [`EcsError::ComponentDeserialization`]
    pub error: EcsError,
}

/// Outcome of loading one scene
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Scene name
    pub scene: String,
    /// Created entities with their template names, in document order
    pub entities: Vec<(String, Entity)>,
    /// Components attached
    pub components_added: usize,
    /// Components left out
    pub skipped: Vec<SkippedComponent>,
}

impl LoadReport {
    /// Entity created for the first template with this name
    pub fn entity(&self, name: &str) -> Option<Entity> {
        self.entities
            .iter()
            .find(|(template, _)| template == name)
            .map(|&(_, entity)| entity)
    }

    /// Whether every component was attached
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Turns scene documents into entities
///
/// Component names are resolved through the loader's [`ComponentRegistry`].
/// Unknown names and malformed payloads are skipped with a warning; the rest of
/// the scene still loads.
#[derive(Debug, Default)]
pub struct SceneLoader {
    registry: ComponentRegistry,
    catalog: AssetCatalog,
}

impl SceneLoader {
    /// Loader that knows every engine component
    pub fn new() -> Self {
        Self::with_registry(ComponentRegistry::with_engine_components())
    }

    /// Loader using a prepared component registry
    pub fn with_registry(registry: ComponentRegistry) -> Self {
        Self {
            registry,
            catalog: AssetCatalog::new(),
        }
    }

    /// Component names known to the loader
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Mutable registry, for game-specific aliases
    pub fn registry_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.registry
    }

    /// Assets recorded from loaded manifests
    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    /// Mutable asset catalog
    pub fn catalog_mut(&mut self) -> &mut AssetCatalog {
        &mut self.catalog
    }

    /// Parse a document without touching any World
    ///
    /// # Errors
    /// The document is not valid JSON/RON or does not match the scene schema.
    pub fn parse(source: &str, format: SceneFormat) -> Result<Scene, SceneError> {
        let scene: Scene = match format {
            SceneFormat::Json => serde_json::from_str(source)?,
            SceneFormat::Ron => ron::from_str(source)?,
        };
        log::debug!("Parsed {format} scene '{}' ({} entities)", scene.name, scene.entities.len());
        Ok(scene)
    }

    /// Record the manifest's assets, then create one entity per template.
    ///
    /// Never fails as a whole: bad components are skipped and listed in the
    /// report. Loading the same scene twice creates two sets of entities.
    pub fn load(&mut self, scene: &Scene, world: &mut World) -> LoadReport {
        log::info!("Loading scene '{}'", scene.name);

        if let Some(manifest) = &scene.manifest {
            for texture in &manifest.textures {
                self.catalog.register_texture(&texture.handle, &texture.path);
            }
            for mesh in &manifest.meshes {
                self.catalog
                    .register_mesh(&mesh.handle, mesh.vertices.clone(), mesh.indices.clone());
            }
        }

        let mut report = LoadReport {
            scene: scene.name.clone(),
            ..LoadReport::default()
        };

        for template in &scene.entities {
            let entity = world.create_entity();
            log::debug!("Creating '{}' as {entity}", template.name);

            for (name, payload) in &template.components {
                let attached = self
                    .registry
                    .instantiate(name, payload.clone())
                    .and_then(|value| world.insert_value(entity, value));

                match attached {
                    Ok(_) => report.components_added += 1,
                    Err(error) => {
                        log::warn!("Skipping {name} on '{}': {error}", template.name);
                        report.skipped.push(SkippedComponent {
                            entity_name: template.name.clone(),
                            entity,
                            component: name.clone(),
                            error,
                        });
                    }
                }
            }
            report.entities.push((template.name.clone(), entity));
        }

        log::info!(
            "Scene '{}' loaded: {} entities, {} components, {} skipped",
            report.scene,
            report.entities.len(),
            report.components_added,
            report.skipped.len()
        );
        report
    }

    /// Destroy every entity in `world`, then load the scene into it
    pub fn load_replacing(&mut self, scene: &Scene, world: &mut World) -> LoadReport {
        world.clear();
        self.load(scene, world)
    }

    /// Parse and load in one step
    ///
    /// # Errors
    /// Parse failures; nothing is created in that case.
    pub fn load_str(&mut self, source: &str, format: SceneFormat, world: &mut World) -> Result<LoadReport, SceneError> {
        let scene = Self::parse(source, format)?;
        Ok(self.load(&scene, world))
    }

    /// Read, parse and load a `.json` or `.ron` file
    ///
    /// # Errors
    /// Unsupported extension, I/O or parse failures; nothing is created in
    /// those cases.
    pub fn load_file(&mut self, path: impl AsRef<Path>, world: &mut World) -> Result<LoadReport, SceneError> {
        let path = path.as_ref();
        let format = SceneFormat::from_path(path)?;
        let source = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.load_str(&source, format, world)
    }
}
