use sqr_gl::shader::{ShaderError, ShaderProgram};

use crate::AttrName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderAttribute {
    pub name: AttrName,
    pub location: u32,
}

impl ShaderAttribute {
    pub fn new(name: impl Into<AttrName>, location: u32) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// The vertex inputs a shader expects, in the order buffers should be set up.
pub trait ShaderDescriptor {
    fn attributes(&self) -> &[ShaderAttribute];

    fn num_attributes(&self) -> usize {
        self.attributes().len()
    }
}

impl ShaderDescriptor for [ShaderAttribute] {
    fn attributes(&self) -> &[ShaderAttribute] {
        self
    }
}

impl ShaderDescriptor for Vec<ShaderAttribute> {
    fn attributes(&self) -> &[ShaderAttribute] {
        self
    }
}

impl<const N: usize> ShaderDescriptor for [ShaderAttribute; N] {
    fn attributes(&self) -> &[ShaderAttribute] {
        self
    }
}

/// A linked program together with the attribute locations the linker
/// assigned, read once at construction.
pub struct LinkedProgram {
    program: ShaderProgram,
    attributes: Vec<ShaderAttribute>,
}

impl LinkedProgram {
    pub fn new(program: ShaderProgram) -> Self {
        let attributes = program
            .active_attributes()
            .into_iter()
            .map(|active| ShaderAttribute::new(active.name, active.location))
            .collect();
        Self {
            program,
            attributes,
        }
    }

    pub fn link<T>(shaders: T) -> Result<Self, ShaderError>
    where
        for<'a> &'a T: IntoIterator<Item = &'a sqr_gl::shader::Shader>,
    {
        ShaderProgram::new(shaders).map(Self::new)
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }
}

impl ShaderDescriptor for LinkedProgram {
    fn attributes(&self) -> &[ShaderAttribute] {
        &self.attributes
    }
}
