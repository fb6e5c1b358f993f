//! Extension entry points that are not part of core EGL 1.5.

use crate::platform::egl::types::{EGLBoolean, EGLDisplay, EGLSurface};
use crate::platform::util::{self, get_proc_address};

use std::mem;

pub(crate) const EGL_ANDROID_PRESENTATION_TIME: &str = "EGL_ANDROID_presentation_time";

#[allow(non_camel_case_types)]
pub(crate) type EGLnsecsANDROID = i64;

#[allow(non_snake_case)]
pub(crate) struct EGLExtensionFunctions {
    pub(crate) PresentationTimeANDROID: Option<
        unsafe extern "system" fn(
            dpy: EGLDisplay,
            surface: EGLSurface,
            time: EGLnsecsANDROID,
        ) -> EGLBoolean,
    >,
}

lazy_static! {
    pub(crate) static ref EGL_EXTENSION_FUNCTIONS: EGLExtensionFunctions = {
        match util::egl() {
            Ok(egl) => unsafe {
                EGLExtensionFunctions {
                    PresentationTimeANDROID: mem::transmute(get_proc_address(
                        egl,
                        "eglPresentationTimeANDROID",
                    )),
                }
            },
            Err(_) => EGLExtensionFunctions {
                PresentationTimeANDROID: None,
            },
        }
    };
}
