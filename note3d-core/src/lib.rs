/// Note3D Core Library - Scene graph and geometry kernel
///
/// This library provides the editor core for small hierarchical 3D models:
/// the parts/element tree, line/arc/polygon/box primitives, transform
/// composition, plane projection, box picking and the record codec.
/// It draws nothing itself; hosts consume [`Drawing`]s or implement
/// [`DrawSink`].

pub mod codec;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod pick;
pub mod primitive;
pub mod projection;
pub mod record;
pub mod scene;
pub mod topology;
pub mod transform;

// Re-export commonly used types
pub use codec::{deserialize, from_text, serialize, to_text};
pub use color::Color;
pub use config::ModelConfig;
pub use error::{CodecError, PartialLoad, SceneError};
pub use geometry::{Plane, Surface};
pub use pick::PickBox;
pub use primitive::{Primitive, PrimitiveKind, Shape};
pub use projection::{Camera, DrawSink, Drawing, Projection};
pub use record::Record;
pub use scene::{Element, ElementId, Item, Parts, PartsId, SceneGraph};
pub use topology::Topology;
pub use transform::{RotationState, Transform};
