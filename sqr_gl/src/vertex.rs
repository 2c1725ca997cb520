use crate::{has_handle, transmutable_u32};
use gl::types::*;

pub struct VertexArrayObject {
    handle: GLuint,
}
has_handle!(VertexArrayObject);

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    Float = gl::FLOAT,
    Uint = gl::UNSIGNED_INT,
    Int = gl::INT,
}
transmutable_u32!(AttrType);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GlVertexFormatFunc {
    Float,
    Int,
}

impl AttrType {
    /// Bytes per component.
    pub fn size(&self) -> u32 {
        match self {
            Self::Float => 4,
            Self::Uint => 4,
            Self::Int => 4,
        }
    }

    pub(crate) fn function_to_use(&self) -> GlVertexFormatFunc {
        match self {
            Self::Float => GlVertexFormatFunc::Float,
            Self::Int => GlVertexFormatFunc::Int,
            Self::Uint => GlVertexFormatFunc::Int,
        }
    }
}

pub fn enable_attrib_array(location: GLuint) {
    unsafe { gl::EnableVertexAttribArray(location) };
}

/// Describes the layout of attribute `location` inside the buffer bound to
/// `GL_ARRAY_BUFFER`. `offset` is in bytes from the start of that buffer.
///
/// Integer types go through `glVertexAttribIPointer` and ignore `normalized`.
pub fn attrib_pointer(
    location: GLuint,
    component_count: GLint,
    attr_type: AttrType,
    normalized: bool,
    stride: GLsizei,
    offset: usize,
) {
    let offset = offset as *const std::ffi::c_void;
    unsafe {
        match attr_type.function_to_use() {
            GlVertexFormatFunc::Float => gl::VertexAttribPointer(
                location,
                component_count,
                attr_type.to_u32(),
                if normalized { gl::TRUE } else { gl::FALSE },
                stride,
                offset,
            ),
            GlVertexFormatFunc::Int => gl::VertexAttribIPointer(
                location,
                component_count,
                attr_type.to_u32(),
                stride,
                offset,
            ),
        }
    }
}

impl VertexArrayObject {
    /// Generates and binds a new vertex array. Core profiles refuse
    /// attribute pointers while no vertex array is bound.
    pub fn new() -> Option<Self> {
        let mut handle = 0;
        unsafe { gl::GenVertexArrays(1, &mut handle) };
        if handle == 0 {
            return None;
        }
        unsafe { gl::BindVertexArray(handle) };
        Some(Self { handle })
    }

    pub fn use_self(&self) {
        unsafe {
            gl::BindVertexArray(self.handle);
        }
    }
}
