use sqr_gl::BufferHandle;

/// One named vertex array: component size, CPU-side values and the GPU
/// buffer they were last uploaded to.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    size: u32,
    data: Option<Vec<f32>>,
    buffer: Option<BufferHandle>,
}

impl Attribute {
    pub(crate) fn new(size: u32) -> Self {
        Self {
            size,
            data: None,
            buffer: None,
        }
    }

    /// Components per vertex.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Empty until the first `data` call for this attribute.
    pub fn data(&self) -> &[f32] {
        self.data.as_deref().unwrap_or_default()
    }

    pub fn is_populated(&self) -> bool {
        self.data.is_some()
    }

    pub fn buffer(&self) -> Option<BufferHandle> {
        self.buffer
    }

    pub fn vertex_count(&self) -> usize {
        match self.size {
            0 => 0,
            size => self.data().len() / size as usize,
        }
    }

    /// Whether the current storage can take `len` values without
    /// reallocating.
    pub(crate) fn holds(&self, len: usize) -> bool {
        self.data.as_ref().is_some_and(|data| data.len() == len)
    }

    /// Copies `values` over the existing storage when `reuse` is set,
    /// otherwise swaps in a fresh allocation. The buffer handle is kept
    /// either way.
    pub(crate) fn store(&mut self, values: &[f32], reuse: bool) {
        match &mut self.data {
            Some(data) if reuse => data.copy_from_slice(values),
            data => *data = Some(values.to_vec()),
        }
    }

    pub(crate) fn set_buffer(&mut self, buffer: BufferHandle) {
        self.buffer = Some(buffer);
    }

    pub(crate) fn take_buffer(&mut self) -> Option<BufferHandle> {
        self.buffer.take()
    }
}
