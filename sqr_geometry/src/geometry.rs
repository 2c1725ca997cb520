use std::collections::HashMap;

use sqr_gl::{vertex::AttrType, DataUsage};

use crate::{
    Attribute, AttrName, GeometryError, GeometryResult, GraphicsContext, Layout, ShaderDescriptor,
};

/// How `data` treats pairs in one call that disagree on the vertex count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountCheck {
    /// The last pair decides the count.
    #[default]
    Lenient,
    /// Disagreement fails the call.
    Strict,
}

/// Named vertex attribute arrays sharing one vertex count.
///
/// ```
/// # use sqr_geometry::{AttrName, Geometry};
/// let mut geometry = Geometry::new();
/// geometry
///     .quick_setup("v2c3")?
///     .data(AttrName::Position, [0.0, 0.0, 1.0, 0.0, 0.0, 1.0])?
///     .data(AttrName::Color, [1.0; 9])?;
/// assert_eq!(geometry.count(), 3);
/// # Ok::<(), sqr_geometry::GeometryError>(())
/// ```
#[derive(Debug, Default)]
pub struct Geometry {
    attributes: HashMap<AttrName, Attribute>,
    count: usize,
    dirty: bool,
    count_check: CountCheck,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count_check(count_check: CountCheck) -> Self {
        Self {
            count_check,
            ..Self::default()
        }
    }

    pub fn count_check(&self) -> CountCheck {
        self.count_check
    }

    /// Vertex count set by the last processed `data` pair.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Set by every `data` call. Uploading leaves it alone; callers
    /// clear it with [`Geometry::mark_clean`] once they have re-uploaded.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn attribute(&self, name: impl AsRef<str>) -> Option<&Attribute> {
        self.attributes.get(name.as_ref())
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.attributes.contains_key(name.as_ref())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&AttrName, &Attribute)> {
        self.attributes.iter()
    }

    /// Declares an attribute with `size` components per vertex, replacing
    /// any previous declaration along with its data and buffer.
    pub fn attr(&mut self, name: impl Into<AttrName>, size: u32) -> &mut Self {
        let name = name.into();
        let previous = self.attributes.insert(name.clone(), Attribute::new(size));
        if let Some(buffer) = previous.and_then(|previous| previous.buffer()) {
            log::debug!("redeclaring {name} drops its reference to {buffer:?}");
        }
        self
    }

    pub fn attrs<N>(&mut self, pairs: impl IntoIterator<Item = (N, u32)>) -> &mut Self
    where
        N: Into<AttrName>,
    {
        for (name, size) in pairs {
            self.attr(name, size);
        }
        self
    }

    /// Declares the attributes of a shorthand layout such as `"v3n3t2c4"`.
    /// Nothing is declared when the layout fails to parse.
    pub fn quick_setup(&mut self, layout: &str) -> GeometryResult<&mut Self> {
        let layout = Layout::parse(layout)?;
        Ok(self.attrs(layout))
    }

    pub fn data(
        &mut self,
        name: impl Into<AttrName>,
        values: impl AsRef<[f32]>,
    ) -> GeometryResult<&mut Self> {
        self.data_many([(name, values)])
    }

    /// Populates attributes from `(name, values)` pairs.
    ///
    /// Undeclared names are skipped with a warning. Storage is reused when
    /// the length and vertex count are unchanged, otherwise reallocated.
    /// Afterwards the vertex count is that of the last accepted pair and the
    /// geometry is dirty. Nothing is stored if any pair is rejected.
    pub fn data_many<N, V>(
        &mut self,
        pairs: impl IntoIterator<Item = (N, V)>,
    ) -> GeometryResult<&mut Self>
    where
        N: Into<AttrName>,
        V: AsRef<[f32]>,
    {
        let mut accepted = Vec::new();
        let mut first_count = None;

        for (name, values) in pairs {
            let name = name.into();
            let Some(attribute) = self.attributes.get(name.as_str()) else {
                log::warn!("trying to add attribute that was not set up for this geometry: {name}");
                continue;
            };

            let len = values.as_ref().len();
            let size = attribute.size();
            if size == 0 || len % size as usize != 0 {
                return Err(GeometryError::InvalidDataLength { name, len, size });
            }
            let local_count = len / size as usize;

            let expected = *first_count.get_or_insert(local_count);
            if expected != local_count {
                match self.count_check {
                    CountCheck::Strict => {
                        return Err(GeometryError::CountMismatch {
                            name,
                            expected,
                            found: local_count,
                        });
                    }
                    CountCheck::Lenient => {
                        log::debug!("{name} holds {local_count} vertices, expected {expected}");
                    }
                }
            }

            accepted.push((name, values, local_count));
        }

        let count = self.count;
        let mut last_count = None;
        for (name, values, local_count) in &accepted {
            let values = values.as_ref();
            if let Some(attribute) = self.attributes.get_mut(name.as_str()) {
                let reuse = attribute.holds(values.len()) && count != 0 && *local_count == count;
                attribute.store(values, reuse);
            }
            last_count = Some(*local_count);
        }

        if let Some(last_count) = last_count {
            self.count = last_count;
        }
        self.dirty = true;
        Ok(self)
    }

    /// Uploads every attribute `shader` asks for into its buffer and points
    /// the attribute's location at it as tightly packed floats.
    ///
    /// Buffers are created on first upload and reused afterwards. Fails
    /// before touching the context if any requested attribute is missing.
    pub fn setup_buffers<C, S>(
        &mut self,
        ctx: &mut C,
        shader: &S,
        usage: DataUsage,
    ) -> GeometryResult<()>
    where
        C: GraphicsContext + ?Sized,
        S: ShaderDescriptor + ?Sized,
    {
        let shader_attrs = shader.attributes();
        if let Some(missing) = shader_attrs.iter().find(|attr| !self.contains(&attr.name)) {
            return Err(GeometryError::ShaderAttributeNotFound(missing.name.clone()));
        }

        for shader_attr in shader_attrs {
            let Some(attribute) = self.attributes.get_mut(shader_attr.name.as_str()) else {
                return Err(GeometryError::ShaderAttributeNotFound(shader_attr.name.clone()));
            };

            let buffer = match attribute.buffer() {
                Some(buffer) => buffer,
                None => {
                    let buffer = ctx
                        .create_buffer()
                        .ok_or_else(|| GeometryError::BufferCreation(shader_attr.name.clone()))?;
                    log::debug!("created {buffer:?} for {}", shader_attr.name);
                    attribute.set_buffer(buffer);
                    buffer
                }
            };

            log::trace!(
                "uploading {} floats of {} to location {}",
                attribute.data().len(),
                shader_attr.name,
                shader_attr.location
            );
            ctx.bind_array_buffer(buffer);
            ctx.buffer_data(attribute.data(), usage);
            ctx.enable_vertex_attrib(shader_attr.location);
            ctx.vertex_attrib_pointer(
                shader_attr.location,
                attribute.size(),
                AttrType::Float,
                false,
                0,
                0,
            );
        }

        Ok(())
    }

    /// Deletes every buffer created by [`Geometry::setup_buffers`]. The
    /// next upload creates fresh ones.
    pub fn release_buffers<C>(&mut self, ctx: &mut C)
    where
        C: GraphicsContext + ?Sized,
    {
        for attribute in self.attributes.values_mut() {
            if let Some(buffer) = attribute.take_buffer() {
                ctx.delete_buffer(buffer);
            }
        }
    }
}
