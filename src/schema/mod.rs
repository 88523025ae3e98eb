//! Schema composition: fragment registry, compiler and compiled artifacts

pub mod artifacts;
pub mod compiled;
pub mod compiler;
pub mod model;
pub mod registry;
pub mod sdl;

pub use compiled::{CompiledField, CompiledSchema, CompiledType, TypeKind};
pub use compiler::compile;
pub use model::{ArgumentShape, FieldShape, TypeModel, TypeShape};
pub use registry::TypeRegistry;
