use std::num::NonZeroU32;

use crate::transmutable_u32;
use gl::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessFrequency {
    /// Modified once, used a few times
    Stream,
    /// Modified once, used many times
    #[default]
    Static,
    /// Modified many times, used many times
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessNature {
    /// Modified by app, used in draw and spec commands
    #[default]
    Draw,
    /// Modified by reading from GL, used to return data to app
    Read,
    /// Modified by reading from GL, used in draw and spec commands
    Copy,
}

/// Usage hint handed to `glBufferData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataUsage {
    frequency: AccessFrequency,
    nature: AccessNature,
}

use AccessFrequency as Freq;
use AccessNature as Nat;

impl DataUsage {
    pub const STATIC_DRAW: Self = Self::new(Freq::Static, Nat::Draw);
    pub const DYNAMIC_DRAW: Self = Self::new(Freq::Dynamic, Nat::Draw);
    pub const STREAM_DRAW: Self = Self::new(Freq::Stream, Nat::Draw);

    pub const fn new(frequency: Freq, nature: Nat) -> Self {
        Self { frequency, nature }
    }

    pub const fn frequency(self) -> Freq {
        self.frequency
    }

    pub const fn nature(self) -> Nat {
        self.nature
    }

    pub const fn to_u32(self) -> u32 {
        match (self.frequency, self.nature) {
            (Freq::Stream, Nat::Draw) => gl::STREAM_DRAW,
            (Freq::Static, Nat::Draw) => gl::STATIC_DRAW,
            (Freq::Dynamic, Nat::Draw) => gl::DYNAMIC_DRAW,

            (Freq::Stream, Nat::Copy) => gl::STREAM_COPY,
            (Freq::Static, Nat::Copy) => gl::STATIC_COPY,
            (Freq::Dynamic, Nat::Copy) => gl::DYNAMIC_COPY,

            (Freq::Stream, Nat::Read) => gl::STREAM_READ,
            (Freq::Static, Nat::Read) => gl::STATIC_READ,
            (Freq::Dynamic, Nat::Read) => gl::DYNAMIC_READ,
        }
    }
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferBindTarget {
    /// Vertex attributes
    ArrayBuffer = gl::ARRAY_BUFFER,
    /// Vertex array indices
    ElementArray = gl::ELEMENT_ARRAY_BUFFER,
    /// Buffer copy source
    CopyRead = gl::COPY_READ_BUFFER,
    /// Buffer copy destination
    CopyWrite = gl::COPY_WRITE_BUFFER,
}
transmutable_u32!(BufferBindTarget);

impl BufferBindTarget {
    pub fn bind(self, buffer: BufferHandle) {
        unsafe { gl::BindBuffer(self.to_u32(), buffer.get()) };
    }

    /// (Re)allocates the storage of whatever buffer is bound to this
    /// target and fills it with `data`.
    pub fn upload<T: Copy>(self, data: &[T], usage: DataUsage) {
        unsafe {
            gl::BufferData(
                self.to_u32(),
                size_of_val(data) as GLsizeiptr,
                data.as_ptr().cast(),
                usage.to_u32(),
            );
        }
    }
}

/// Name of a GL buffer object. Zero is never a valid buffer name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(NonZeroU32);

impl BufferHandle {
    pub const fn new(raw: GLuint) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    pub const fn get(self) -> GLuint {
        self.0.get()
    }

    pub fn generate() -> Option<Self> {
        let mut handle = 0;
        unsafe { gl::GenBuffers(1, &mut handle) };
        Self::new(handle)
    }

    pub fn delete(self) {
        unsafe { gl::DeleteBuffers(1, &self.get()) };
    }
}

impl From<BufferHandle> for GLuint {
    fn from(value: BufferHandle) -> Self {
        value.get()
    }
}
