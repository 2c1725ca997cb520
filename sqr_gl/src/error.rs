use crate::transmutable_u32;

const MAX_PENDING: usize = 16;

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlError {
    InvalidEnum = gl::INVALID_ENUM,
    InvalidValue = gl::INVALID_VALUE,
    InvalidOperation = gl::INVALID_OPERATION,
    InvalidFramebufferOperation = gl::INVALID_FRAMEBUFFER_OPERATION,
    OutOfMemory = gl::OUT_OF_MEMORY,
    StackUnderflow = gl::STACK_UNDERFLOW,
    StackOverflow = gl::STACK_OVERFLOW,
}
transmutable_u32!(GlError);

impl GlError {
    /// Maps a `glGetError` code. `GL_NO_ERROR` and codes outside the
    /// core set map to `None`.
    pub const fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            gl::INVALID_ENUM => GlError::InvalidEnum,
            gl::INVALID_VALUE => GlError::InvalidValue,
            gl::INVALID_OPERATION => GlError::InvalidOperation,
            gl::INVALID_FRAMEBUFFER_OPERATION => GlError::InvalidFramebufferOperation,
            gl::OUT_OF_MEMORY => GlError::OutOfMemory,
            gl::STACK_UNDERFLOW => GlError::StackUnderflow,
            gl::STACK_OVERFLOW => GlError::StackOverflow,
            _ => return None,
        })
    }

    pub fn try_get() -> Option<Self> {
        let err_num = unsafe { gl::GetError() };
        if err_num == gl::NO_ERROR {
            return None;
        }
        let err = Self::from_code(err_num);
        if err.is_none() {
            log::warn!("unrecognized GL error code {err_num:#x}");
        }
        err
    }

    /// Pops every pending error flag. A context may hold more than one.
    pub fn drain() -> Vec<Self> {
        std::iter::from_fn(Self::try_get).take(MAX_PENDING).collect()
    }
}

/// Clears any GL errors on creation, asserts
/// that no GL errors occur in its lifetime.
///
/// Checks for GL errors on `Drop`, and panics
/// if any occured.
pub struct GlErrorGuard {
    name: &'static str,
}
impl Drop for GlErrorGuard {
    fn drop(&mut self) {
        if let Some(err) = GlError::try_get() {
            panic!("GL error assert \"{}\" failed: {err:?}", self.name);
        }
    }
}

impl GlErrorGuard {
    pub fn clear_existing(name: &'static str) {
        for err in GlError::drain() {
            log::warn!("existing error on guard \"{name}\" creation: {err:?}");
        }
    }

    pub fn named(name: &'static str) -> Self {
        Self::clear_existing(name);
        Self { name }
    }

    pub fn guard_named<T>(name: &'static str, run: impl FnOnce() -> T) -> T {
        let guard = Self::named(name);
        let result = run();
        drop(guard);
        result
    }
}
