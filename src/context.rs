use std::sync::Arc;

use crate::instance::DisplayInner;
use crate::platform::egl::{self, types::EGLContext};
use crate::platform::util;
use crate::ErrorCode;

/// An owned `EGLContext`, destroyed on drop.
#[derive(Debug)]
pub struct Context {
    pub(crate) egl_context: EGLContext,
    pub(crate) display: Arc<DisplayInner>,
}

unsafe impl Send for Context {}

impl Context {
    /// Whether this context is current on the calling thread.
    pub fn is_current(&self) -> bool {
        match util::egl() {
            Ok(egl) => unsafe { egl.GetCurrentContext() == self.egl_context },
            Err(_) => false,
        }
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        self.egl_context == other.egl_context
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        let egl = match util::egl() {
            Ok(egl) => egl,
            Err(_) => return,
        };
        unsafe {
            if egl.GetCurrentContext() == self.egl_context
                && egl.MakeCurrent(
                    self.display.egl_display,
                    egl::NO_SURFACE,
                    egl::NO_SURFACE,
                    egl::NO_CONTEXT,
                ) == egl::FALSE
            {
                log::warn!("unbinding context before destroy failed: {}", ErrorCode::last(egl));
            }
            if egl.DestroyContext(self.display.egl_display, self.egl_context) == egl::FALSE {
                log::warn!("eglDestroyContext failed: {}", ErrorCode::last(egl));
            }
        }
    }
}
