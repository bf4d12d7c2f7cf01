//! Layer system - kind descriptors, schema extraction, and network graphs

pub mod builtin;
pub mod construct;
pub mod defaults;
pub mod graph;
pub mod instance;
pub mod kind;
pub mod parameter;
pub mod registry;
pub mod schema;

// Re-export core types
pub use graph::{Connection, ConnectionId, ConnectionPolicy, GraphId, NetworkGraph};
pub use instance::{LayerId, LayerInstance};
pub use kind::{Discriminator, KindCategory, LayerKind, Normalizer, ShapeRule};
pub use parameter::{EnumSpec, ParamMap, ParamValue, ParameterSpec, SemanticType};
pub use registry::LayerKindRegistry;
pub use schema::{KindSchema, ParameterDescriptor, ResolvedKind};
