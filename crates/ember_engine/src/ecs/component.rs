//! Component trait and the engine's closed component set
//!
//! Every component type the World can store is listed once in the
//! `component_set!` invocation at the bottom of this file. The macro expands to:
//!
//! - [`ComponentType`], a fieldless tag enum used as the storage key,
//! - [`ComponentValue`], the matching sum type that stores hold,
//! - a [`Component`] impl per struct for typed access.
//!
//! String names only matter at the scene-loading boundary, where
//! [`ComponentType::deserialize`] turns a loosely-typed payload into a value.

use crate::ecs::components::{
    ColliderComponent, ControllableComponent, EnemyComponent, HealthComponent, MeshComponent,
    MovementStatsComponent, MusicComponent, PlayerComponent, SoundEffectComponent,
    SpriteComponent, TransformComponent, UiButtonComponent, UiImageComponent,
    UiTransformComponent,
};

/// Loosely-typed component payload as it appears in scene documents
pub type Payload = serde_json::Value;

/// Typed view of one member of the component set
pub trait Component: Sized + 'static {
    /// Storage tag for this component type
    const TYPE: ComponentType;

    /// Wrap into the storage sum type
    fn into_value(self) -> ComponentValue;

    /// Unwrap from the storage sum type
    fn from_value(value: ComponentValue) -> Option<Self>;

    /// Borrow from the storage sum type
    fn from_value_ref(value: &ComponentValue) -> Option<&Self>;

    /// Mutably borrow from the storage sum type
    fn from_value_mut(value: &mut ComponentValue) -> Option<&mut Self>;
}

macro_rules! component_set {
    ($( $(#[$meta:meta])* $variant:ident($ty:ty) = $name:literal; )+) => {
        /// Tag identifying one component type of the closed component set
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ComponentType {
            $( $(#[$meta])* $variant, )+
        }

        impl ComponentType {
            /// Every component type, in declaration order
            pub const ALL: &'static [Self] = &[ $( Self::$variant, )+ ];

            /// Number of component types
            pub const COUNT: usize = Self::ALL.len();

            /// Canonical name used by scene documents
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )+
                }
            }

            /// Dense index, suitable for array-backed storage
            pub const fn index(self) -> usize {
                self as usize
            }

            /// Deserialize a scene payload into a value of this type
            ///
            /// # Errors
            /// Returns the `serde_json` error when the payload does not match
            /// the component's schema.
            pub fn deserialize(self, payload: Payload) -> Result<ComponentValue, serde_json::Error> {
                match self {
                    $( Self::$variant => serde_json::from_value::<$ty>(payload).map(ComponentValue::$variant), )+
                }
            }
        }

        /// A component instance of any type in the closed set
        #[derive(Debug, Clone, PartialEq)]
        pub enum ComponentValue {
            $( $(#[$meta])* $variant($ty), )+
        }

        impl ComponentValue {
            /// Tag of the contained component
            pub const fn component_type(&self) -> ComponentType {
                match self {
                    $( Self::$variant(_) => ComponentType::$variant, )+
                }
            }
        }

        $(
            impl Component for $ty {
                const TYPE: ComponentType = ComponentType::$variant;

                fn into_value(self) -> ComponentValue {
                    ComponentValue::$variant(self)
                }

                fn from_value(value: ComponentValue) -> Option<Self> {
                    match value {
                        ComponentValue::$variant(component) => Some(component),
                        _ => None,
                    }
                }

                fn from_value_ref(value: &ComponentValue) -> Option<&Self> {
                    match value {
                        ComponentValue::$variant(component) => Some(component),
                        _ => None,
                    }
                }

                fn from_value_mut(value: &mut ComponentValue) -> Option<&mut Self> {
                    match value {
                        ComponentValue::$variant(component) => Some(component),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for ComponentValue {
                fn from(component: $ty) -> Self {
                    Self::$variant(component)
                }
            }
        )+
    };
}

component_set! {
    /// Position, rotation and scale in world space
    Transform(TransformComponent) = "TransformComponent";
    /// Handle of a renderable mesh
    Mesh(MeshComponent) = "MeshComponent";
    /// Textured, tinted 2D sprite
    Sprite(SpriteComponent) = "SpriteComponent";
    /// Movement tuning values
    MovementStats(MovementStatsComponent) = "MovementStatsComponent";
    /// Per-frame player movement intent
    Controllable(ControllableComponent) = "ControllableComponent";
    /// Axis-aligned collision box
    Collider(ColliderComponent) = "ColliderComponent";
    /// Hit points
    Health(HealthComponent) = "HealthComponent";
    /// Background music track
    Music(MusicComponent) = "MusicComponent";
    /// One-shot sound effect
    SoundEffect(SoundEffectComponent) = "SoundEffectComponent";
    /// Screen-space layout rectangle
    UiTransform(UiTransformComponent) = "UITransformComponent";
    /// Screen-space image
    UiImage(UiImageComponent) = "UIImageComponent";
    /// Interactive button that publishes an action when clicked
    UiButton(UiButtonComponent) = "UIButtonComponent";
    /// Marks a player-controlled entity
    Player(PlayerComponent) = "PlayerComponent";
    /// Marks a hostile entity
    Enemy(EnemyComponent) = "EnemyComponent";
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
