//! EGL 1.5 bindings and the runtime loader for `libEGL`.

#[allow(
    non_camel_case_types,
    non_snake_case,
    non_upper_case_globals,
    dead_code,
    clippy::all
)]
pub mod egl {
    pub type khronos_utime_nanoseconds_t = super::khronos_utime_nanoseconds_t;
    pub type khronos_uint64_t = super::khronos_uint64_t;
    pub type khronos_ssize_t = super::khronos_ssize_t;
    pub type EGLNativeDisplayType = super::EGLNativeDisplayType;
    pub type EGLNativePixmapType = super::EGLNativePixmapType;
    pub type EGLNativeWindowType = super::EGLNativeWindowType;
    pub type EGLint = super::EGLint;
    pub type NativeDisplayType = super::EGLNativeDisplayType;
    pub type NativePixmapType = super::EGLNativePixmapType;
    pub type NativeWindowType = super::EGLNativeWindowType;

    include!(concat!(env!("OUT_DIR"), "/egl_bindings.rs"));
}

pub(crate) mod ffi;
pub(crate) mod util;

use std::os::raw;

#[allow(non_camel_case_types)]
pub type khronos_utime_nanoseconds_t = khronos_uint64_t;
#[allow(non_camel_case_types)]
pub type khronos_uint64_t = u64;
#[allow(non_camel_case_types)]
pub type khronos_ssize_t = raw::c_long;
pub type EGLint = i32;
pub type EGLNativeDisplayType = *const raw::c_void;
pub type EGLNativePixmapType = *const raw::c_void;
pub type EGLNativeWindowType = *const raw::c_void;
