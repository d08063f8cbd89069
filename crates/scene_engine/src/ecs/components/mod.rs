//! ECS Components module
//!
//! Plain data records attached to entities. Every live scene entity carries
//! an identity, a tag and a transform; the rest are optional.

pub mod identity;
pub mod transform;
pub mod renderable;
pub mod lighting;
pub mod camera;
pub mod physics;
pub mod script;

pub use identity::{IdComponent, TagComponent};
pub use transform::{TransformComponent, TransformFactory};
pub use renderable::MeshRendererComponent;
pub use lighting::{LightComponent, LightFactory, LightType};
pub use camera::CameraComponent;
pub use physics::{ColliderComponent, ColliderType, RigidbodyComponent};
pub use script::ScriptComponent;
