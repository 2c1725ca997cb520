use glam::IVec2;
use std::{
    ffi::{c_char, c_void, CStr, CString},
    ptr::{self, NonNull},
};
use thiserror::Error;

use glfw::ffi;
pub use glfw::Key;

#[repr(i32)]
#[derive(Debug, Clone, Copy)]
pub enum GlfwError {
    NotInitialized,
    NoCurrentContext,
    InvalidEnum,
    InvalidValue,
    OutOfMemory,
    ApiUnavailable,
    VersionUnavailable,
    PlatformError,
    FormatUnavailable,
    NoWindowContext,
    CursorUnavilable,
    FeatureUnavailable,
    FeatureUnimplemented,
    PlatformUnavailable,
}

impl GlfwError {
    pub fn from_num(err: i32) -> Option<Self> {
        Some(match err {
            0x00010001 => Self::NotInitialized,
            0x00010002 => Self::NoCurrentContext,
            0x00010003 => Self::InvalidEnum,
            0x00010004 => Self::InvalidValue,
            0x00010005 => Self::OutOfMemory,
            0x00010006 => Self::ApiUnavailable,
            0x00010007 => Self::VersionUnavailable,
            0x00010008 => Self::PlatformError,
            0x00010009 => Self::FormatUnavailable,
            0x0001000a => Self::NoWindowContext,
            0x0001000b => Self::CursorUnavilable,
            0x0001000c => Self::FeatureUnavailable,
            0x0001000d => Self::FeatureUnimplemented,
            0x0001000e => Self::PlatformUnavailable,
            _ => return None,
        })
    }
}

#[derive(Error, Debug)]
pub enum WindowError {
    #[error("window title contains a nul byte")]
    NulInTitle(#[from] std::ffi::NulError),
    #[error("window creation failed: nullptr")]
    Creation,
}

extern "C" fn err_callback(err: i32, desc: *const c_char) {
    let desc = if desc.is_null() {
        "<no description>".into()
    } else {
        unsafe { CStr::from_ptr(desc) }.to_string_lossy()
    };
    match GlfwError::from_num(err) {
        Some(err) => log::error!("glfw error {err:?}: {desc}"),
        None => log::error!("glfw error {err:#x}: {desc}"),
    }
}

pub fn init() -> Option<()> {
    let err = unsafe { ffi::glfwInit() };
    (err == ffi::TRUE).then_some(())
}

pub fn terminate() {
    unsafe { ffi::glfwTerminate() }
}

pub fn install_errors() {
    unsafe { ffi::glfwSetErrorCallback(Some(err_callback)) };
}

/// Requests a core-profile context of the given version for windows
/// created after this call.
pub fn hint_core_profile(major: i32, minor: i32) {
    unsafe {
        ffi::glfwWindowHint(ffi::CONTEXT_VERSION_MAJOR, major);
        ffi::glfwWindowHint(ffi::CONTEXT_VERSION_MINOR, minor);
        ffi::glfwWindowHint(ffi::OPENGL_PROFILE, ffi::OPENGL_CORE_PROFILE);
        ffi::glfwWindowHint(ffi::OPENGL_FORWARD_COMPAT, ffi::TRUE);
    }
}

pub fn get_proc_address(name: &'static str) -> *const c_void {
    let Ok(name) = CString::new(name) else {
        return ptr::null();
    };
    unsafe { ffi::glfwGetProcAddress(name.as_ptr()) }
}

pub fn poll_events() {
    unsafe { ffi::glfwPollEvents() }
}

/// Seconds since `init`.
pub fn get_time() -> f64 {
    unsafe { ffi::glfwGetTime() }
}

pub struct Window {
    window: NonNull<ffi::GLFWwindow>,
}

impl Drop for Window {
    fn drop(&mut self) {
        unsafe { ffi::glfwDestroyWindow(self.window.as_ptr()) }
    }
}

impl Window {
    pub fn create(width: i32, height: i32, title: &str) -> Result<Self, WindowError> {
        let as_c_str = CString::new(title)?;
        let window = unsafe {
            ffi::glfwCreateWindow(
                width,
                height,
                as_c_str.as_ptr(),
                ptr::null_mut(),
                ptr::null_mut(),
            )
        };

        NonNull::new(window)
            .map(|window| Self { window })
            .ok_or(WindowError::Creation)
    }

    pub fn should_close(&self) -> bool {
        (unsafe { ffi::glfwWindowShouldClose(self.window.as_ptr()) }) > 0
    }

    pub fn set_should_close(&self, value: bool) {
        let value = if value { ffi::TRUE } else { ffi::FALSE };
        unsafe { ffi::glfwSetWindowShouldClose(self.window.as_ptr(), value) }
    }

    pub fn swap_buffers(&self) {
        unsafe { ffi::glfwSwapBuffers(self.window.as_ptr()) }
    }

    pub fn make_current(&self) {
        unsafe { ffi::glfwMakeContextCurrent(self.window.as_ptr()) };
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        let state = unsafe { ffi::glfwGetKey(self.window.as_ptr(), key as i32) };
        state == ffi::PRESS
    }

    pub fn get_framebuffer_size(&self) -> IVec2 {
        let mut result = IVec2::ZERO;
        unsafe { ffi::glfwGetFramebufferSize(self.window.as_ptr(), &mut result.x, &mut result.y) };
        result
    }
}
