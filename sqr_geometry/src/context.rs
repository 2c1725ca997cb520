use std::marker::PhantomData;

use sqr_gl::{
    buffer::BufferBindTarget,
    vertex::{self, AttrType},
    BufferHandle, DataUsage,
};

/// The slice of a graphics API that vertex buffer setup needs.
pub trait GraphicsContext {
    /// `None` when the backend has no buffer name to give out.
    fn create_buffer(&mut self) -> Option<BufferHandle>;
    fn delete_buffer(&mut self, buffer: BufferHandle);
    fn bind_array_buffer(&mut self, buffer: BufferHandle);
    /// Fills the bound array buffer.
    fn buffer_data(&mut self, data: &[f32], usage: DataUsage);
    fn enable_vertex_attrib(&mut self, location: u32);
    fn vertex_attrib_pointer(
        &mut self,
        location: u32,
        size: u32,
        attr_type: AttrType,
        normalized: bool,
        stride: u32,
        offset: usize,
    );
}

/// Issues the calls against the GL context current on this thread.
///
/// GL function pointers must be loaded (`gl::load_with`) before any method
/// is called.
#[derive(Debug, Default)]
pub struct GlContext {
    _thread_bound: PhantomData<*const ()>,
}

impl GlContext {
    pub fn current() -> Self {
        Self::default()
    }
}

impl GraphicsContext for GlContext {
    fn create_buffer(&mut self) -> Option<BufferHandle> {
        BufferHandle::generate()
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        buffer.delete();
    }

    fn bind_array_buffer(&mut self, buffer: BufferHandle) {
        BufferBindTarget::ArrayBuffer.bind(buffer);
    }

    fn buffer_data(&mut self, data: &[f32], usage: DataUsage) {
        BufferBindTarget::ArrayBuffer.upload(data, usage);
    }

    fn enable_vertex_attrib(&mut self, location: u32) {
        vertex::enable_attrib_array(location);
    }

    fn vertex_attrib_pointer(
        &mut self,
        location: u32,
        size: u32,
        attr_type: AttrType,
        normalized: bool,
        stride: u32,
        offset: usize,
    ) {
        vertex::attrib_pointer(
            location,
            size as i32,
            attr_type,
            normalized,
            stride as i32,
            offset,
        );
    }
}
