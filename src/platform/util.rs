use crate::platform::egl::types::{EGLConfig, EGLDisplay, EGLint};
use crate::platform::egl::{self, Egl};
use crate::{ConfigAttributes, EglError, ErrorCode};

use std::ffi::CString;
use std::os::raw::{c_char, c_void};
use std::ptr;

pub(crate) struct EGLLibraryWrapper(*mut c_void);

unsafe impl Send for EGLLibraryWrapper {}
unsafe impl Sync for EGLLibraryWrapper {}

pub(crate) struct EGLFuncWrapper(pub Egl);

unsafe impl Send for EGLFuncWrapper {}
unsafe impl Sync for EGLFuncWrapper {}

lazy_static! {
    static ref EGL_LIBRARY: Option<EGLLibraryWrapper> = open_egl_library();
    pub(crate) static ref EGL_FUNCTIONS: Option<EGLFuncWrapper> = EGL_LIBRARY
        .as_ref()
        .map(|library| EGLFuncWrapper(Egl::load_with(|name| get_egl_address(library, name))));
}

/// The loaded EGL function table, or `LibraryUnavailable` if `libEGL` could not be opened.
pub(crate) fn egl() -> Result<&'static Egl, EglError> {
    EGL_FUNCTIONS
        .as_ref()
        .map(|functions| &functions.0)
        .ok_or(EglError::LibraryUnavailable)
}

#[cfg(unix)]
fn open_egl_library() -> Option<EGLLibraryWrapper> {
    use libc::{dlopen, dlsym, RTLD_LAZY};

    // Android 只有 libEGL.so；桌面 Linux 优先带版本号的 soname
    for soname in [c"libEGL.so.1", c"libEGL.so"] {
        unsafe {
            let handle = dlopen(soname.as_ptr(), RTLD_LAZY);
            if handle.is_null() {
                continue;
            }
            if dlsym(handle, c"eglGetDisplay".as_ptr()).is_null() {
                log::warn!("{:?} has no eglGetDisplay, skipping", soname);
                continue;
            }
            log::debug!("loaded {:?}", soname);
            return Some(EGLLibraryWrapper(handle));
        }
    }
    log::warn!("unable to load the libEGL shared object");
    None
}

#[cfg(not(unix))]
fn open_egl_library() -> Option<EGLLibraryWrapper> {
    None
}

#[cfg(unix)]
fn get_egl_address(library: &EGLLibraryWrapper, symbol_name: &str) -> *const c_void {
    let symbol_name = match CString::new(symbol_name) {
        Ok(name) => name,
        Err(_) => return ptr::null(),
    };
    unsafe { libc::dlsym(library.0, symbol_name.as_ptr()) as *const c_void }
}

#[cfg(not(unix))]
fn get_egl_address(_library: &EGLLibraryWrapper, _symbol_name: &str) -> *const c_void {
    ptr::null()
}

/// Resolves a GL or EGL extension entry point through `eglGetProcAddress`.
pub(crate) fn get_proc_address(egl: &Egl, symbol_name: &str) -> *const c_void {
    let symbol_name = match CString::new(symbol_name) {
        Ok(name) => name,
        Err(_) => return ptr::null(),
    };
    unsafe { egl.GetProcAddress(symbol_name.as_ptr() as *const c_char) as *const c_void }
}

pub(crate) unsafe fn egl_config_from_display(
    egl: &Egl,
    egl_display: EGLDisplay,
    attributes: &ConfigAttributes,
) -> Result<EGLConfig, EglError> {
    let config_attributes = attributes.to_attrib_list();

    let (mut config, mut config_count): (EGLConfig, EGLint) = (ptr::null(), 0);
    let result = egl.ChooseConfig(
        egl_display,
        config_attributes.as_ptr(),
        &mut config,
        1,
        &mut config_count,
    );
    if result == egl::FALSE {
        return Err(EglError::ChooseConfigFailed(ErrorCode::last(egl)));
    }
    if config_count < 1 || config.is_null() {
        return Err(EglError::NoMatchingConfig);
    }
    Ok(config)
}
