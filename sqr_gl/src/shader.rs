use std::ffi::CString;

use crate::{has_handle, transmutable_u32};
use gl::types::*;
use thiserror::Error;

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderType {
    Compute = gl::COMPUTE_SHADER,
    Vertex = gl::VERTEX_SHADER,
    Geometry = gl::GEOMETRY_SHADER,
    Fragment = gl::FRAGMENT_SHADER,
}
transmutable_u32!(ShaderType);

#[derive(Error, Debug)]
pub enum ShaderError {
    #[error("could not create a {0:?} shader object")]
    Creation(ShaderType),
    #[error("{kind:?} shader compilation failed:\n{log}")]
    Compile { kind: ShaderType, log: String },
    #[error("could not create a program object")]
    ProgramCreation,
    #[error("program link failed:\n{0}")]
    Link(String),
}

type GetIv = unsafe fn(GLuint, GLenum, *mut GLint);
type GetInfoLog = unsafe fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar);

fn info_log(handle: GLuint, get_iv: GetIv, get_log: GetInfoLog) -> String {
    let mut log_size = 0;
    unsafe { get_iv(handle, gl::INFO_LOG_LENGTH, &mut log_size) };

    let mut info_log = vec![0u8; log_size.max(0) as usize];
    let mut bytes_written = 0;
    unsafe {
        get_log(
            handle,
            log_size,
            &mut bytes_written,
            info_log.as_mut_ptr().cast(),
        );
    }
    info_log.truncate(bytes_written.max(0) as usize);
    String::from_utf8_lossy(&info_log).into_owned()
}

pub struct Shader {
    handle: GLuint,
}
has_handle!(Shader);

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.as_handle());
        }
    }
}

impl Shader {
    pub fn new_many_sources<const N: usize>(
        shader_type: ShaderType,
        sources: [&str; N],
    ) -> Result<Self, ShaderError> {
        let handle = unsafe { gl::CreateShader(shader_type.to_u32()) };
        if handle == 0 {
            return Err(ShaderError::Creation(shader_type));
        }
        let shader = Self { handle };

        let lengths = sources.map(|s| s.len() as GLint);
        let sources = sources.map(|s| s.as_ptr().cast::<GLchar>());
        unsafe {
            gl::ShaderSource(handle, N as GLsizei, sources.as_ptr(), lengths.as_ptr());
            gl::CompileShader(handle);
        }

        let mut success = 0;
        unsafe {
            gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut success);
        }

        if success == GLint::from(gl::FALSE) {
            let log = info_log(handle, gl::GetShaderiv, gl::GetShaderInfoLog);
            return Err(ShaderError::Compile {
                kind: shader_type,
                log,
            });
        }

        Ok(shader)
    }

    pub fn new(shader_type: ShaderType, source: &str) -> Result<Self, ShaderError> {
        Self::new_many_sources(shader_type, [source])
    }
    #[inline]
    pub fn vertex(source: &str) -> Result<Self, ShaderError> {
        Self::new(ShaderType::Vertex, source)
    }
    #[inline]
    pub fn fragment(source: &str) -> Result<Self, ShaderError> {
        Self::new(ShaderType::Fragment, source)
    }
}

/// An attribute the linker kept alive, with the location it assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAttribute {
    pub name: String,
    pub location: GLuint,
    pub gl_type: GLenum,
}

pub struct ShaderProgram {
    handle: GLuint,
}
has_handle!(ShaderProgram);

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.as_handle());
        }
    }
}

impl ShaderProgram {
    pub fn new<T>(shaders: T) -> Result<Self, ShaderError>
    where
        for<'a> &'a T: IntoIterator<Item = &'a Shader>,
    {
        let handle = unsafe { gl::CreateProgram() };
        if handle == 0 {
            return Err(ShaderError::ProgramCreation);
        }
        let program = Self { handle };

        unsafe {
            for shader in &shaders {
                gl::AttachShader(handle, shader.as_handle());
            }
            gl::LinkProgram(handle);
            for shader in &shaders {
                gl::DetachShader(handle, shader.as_handle());
            }
        }

        let mut success = 0;
        unsafe { gl::GetProgramiv(handle, gl::LINK_STATUS, &mut success) };
        if success == GLint::from(gl::FALSE) {
            let log = info_log(handle, gl::GetProgramiv, gl::GetProgramInfoLog);
            return Err(ShaderError::Link(log));
        }

        Ok(program)
    }

    pub fn use_self(&self) {
        unsafe {
            gl::UseProgram(self.handle);
        }
    }

    /// Runs `glValidateProgram` against the current state, logging the
    /// driver's complaint when it fails.
    pub fn validate(&self) -> bool {
        let mut status = 0;
        unsafe {
            gl::ValidateProgram(self.handle);
            gl::GetProgramiv(self.handle, gl::VALIDATE_STATUS, &mut status);
        }
        let valid = status != GLint::from(gl::FALSE);
        if !valid {
            let log = info_log(self.handle, gl::GetProgramiv, gl::GetProgramInfoLog);
            log::warn!("program {} failed validation: {log}", self.handle);
        }
        valid
    }

    pub fn attrib_location(&self, name: &str) -> Option<GLuint> {
        let name = CString::new(name).ok()?;
        let location = unsafe { gl::GetAttribLocation(self.handle, name.as_ptr()) };
        GLuint::try_from(location).ok()
    }

    pub fn uniform_location(&self, name: &str) -> Option<GLint> {
        let name = CString::new(name).ok()?;
        let location = unsafe { gl::GetUniformLocation(self.handle, name.as_ptr()) };
        (location >= 0).then_some(location)
    }

    /// Lists the active vertex inputs in active-attribute index order.
    /// Built-ins such as `gl_VertexID` have no location and are skipped.
    pub fn active_attributes(&self) -> Vec<ActiveAttribute> {
        let mut count = 0;
        let mut max_len = 0;
        unsafe {
            gl::GetProgramiv(self.handle, gl::ACTIVE_ATTRIBUTES, &mut count);
            gl::GetProgramiv(self.handle, gl::ACTIVE_ATTRIBUTE_MAX_LENGTH, &mut max_len);
        }

        (0..count.max(0) as GLuint)
            .filter_map(|index| {
                let mut name = vec![0u8; max_len.max(1) as usize];
                let mut written = 0;
                let mut array_size = 0;
                let mut gl_type = 0;
                unsafe {
                    gl::GetActiveAttrib(
                        self.handle,
                        index,
                        name.len() as GLsizei,
                        &mut written,
                        &mut array_size,
                        &mut gl_type,
                        name.as_mut_ptr().cast(),
                    );
                }
                name.truncate(written.max(0) as usize);
                let name = String::from_utf8(name).ok()?;
                let location = self.attrib_location(&name)?;
                Some(ActiveAttribute {
                    name,
                    location,
                    gl_type,
                })
            })
            .collect()
    }

    /// Writes a `vec2` uniform. The program must be in use.
    pub fn set_uniform_vec2(&self, location: GLint, x: f32, y: f32) {
        unsafe { gl::Uniform2f(location, x, y) };
    }
}
