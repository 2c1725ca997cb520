//! Named vertex attribute arrays and their upload into GPU buffers.
//!
//! A [`Geometry`] holds one float array per attribute name, a vertex count
//! shared by all of them, and a dirty flag. [`Geometry::setup_buffers`]
//! pushes the arrays a shader asks for into buffer objects through a
//! [`GraphicsContext`], binding each to the location the shader assigned.

mod attribute;
mod context;
mod error;
mod geometry;
mod layout;
mod name;
mod shader;

#[cfg(test)]
mod tests;

pub use attribute::Attribute;
pub use context::{GlContext, GraphicsContext};
pub use error::{GeometryError, GeometryResult};
pub use geometry::{CountCheck, Geometry};
pub use layout::Layout;
pub use name::AttrName;
pub use shader::{LinkedProgram, ShaderAttribute, ShaderDescriptor};

pub use sqr_gl::{vertex::AttrType, BufferHandle, DataUsage};
