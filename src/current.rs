use crate::platform::egl::{self, types::EGLint, Egl};
use crate::platform::egl::types::{EGLContext, EGLDisplay, EGLSurface};
use crate::platform::util;
use crate::{Context, EglError, ErrorCode, Instance};

/// What the calling thread had current at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentBinding {
    display: EGLDisplay,
    draw: EGLSurface,
    read: EGLSurface,
    context: EGLContext,
}

unsafe impl Send for CurrentBinding {}

impl CurrentBinding {
    pub fn capture() -> Result<Self, EglError> {
        Ok(Self::capture_with(util::egl()?))
    }

    pub(crate) fn capture_with(egl: &Egl) -> Self {
        unsafe {
            Self {
                display: egl.GetCurrentDisplay(),
                draw: egl.GetCurrentSurface(egl::DRAW as EGLint),
                read: egl.GetCurrentSurface(egl::READ as EGLint),
                context: egl.GetCurrentContext(),
            }
        }
    }

    /// Nothing was current.
    pub fn is_none(&self) -> bool {
        self.context == egl::NO_CONTEXT
    }

    pub fn is_context(&self, context: &Context) -> bool {
        self.context == context.egl_context
    }

    /// Makes the captured binding current again.
    ///
    /// An empty binding is restored by releasing the thread on `fallback`'s display,
    /// since several drivers reject `eglMakeCurrent(EGL_NO_DISPLAY, ...)`.
    pub(crate) fn restore(&self, fallback: &Instance) -> Result<(), EglError> {
        let egl = util::egl()?;

        let ok = unsafe {
            if self.is_none() {
                let display = if self.display == egl::NO_DISPLAY {
                    fallback.raw()
                } else {
                    self.display
                };
                egl.MakeCurrent(display, egl::NO_SURFACE, egl::NO_SURFACE, egl::NO_CONTEXT)
            } else {
                egl.MakeCurrent(self.display, self.draw, self.read, self.context)
            }
        };
        if ok == egl::FALSE {
            return Err(EglError::MakeCurrentFailed(ErrorCode::last(egl)));
        }
        Ok(())
    }
}
