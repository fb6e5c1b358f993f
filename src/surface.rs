use std::sync::Arc;

use crate::instance::DisplayInner;
use crate::platform::egl::{self, types::EGLSurface, types::EGLint};
use crate::platform::util;
use crate::{EglError, ErrorCode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    /// On-screen, double buffered.
    Window,
    /// Off-screen.
    Pbuffer,
}

/// An owned `EGLSurface`, destroyed on drop.
#[derive(Debug)]
pub struct Surface {
    pub(crate) egl_surface: EGLSurface,
    pub(crate) kind: SurfaceKind,
    pub(crate) display: Arc<DisplayInner>,
}

unsafe impl Send for Surface {}

impl Surface {
    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    /// Current `(width, height)`. Window surfaces follow their window, so this is queried every time.
    pub fn size(&self) -> Result<(i32, i32), EglError> {
        let egl = util::egl()?;
        let (mut width, mut height): (EGLint, EGLint) = (0, 0);
        for (attribute, value) in [(egl::WIDTH, &mut width), (egl::HEIGHT, &mut height)] {
            let ok = unsafe {
                egl.QuerySurface(
                    self.display.egl_display,
                    self.egl_surface,
                    attribute as EGLint,
                    value,
                )
            };
            if ok == egl::FALSE {
                return Err(EglError::QuerySurfaceFailed(ErrorCode::last(egl)));
            }
        }
        Ok((width, height))
    }

    /// Whether this surface is the draw or read surface of the calling thread.
    pub fn is_current(&self) -> bool {
        match util::egl() {
            Ok(egl) => unsafe {
                egl.GetCurrentSurface(egl::DRAW as EGLint) == self.egl_surface
                    || egl.GetCurrentSurface(egl::READ as EGLint) == self.egl_surface
            },
            Err(_) => false,
        }
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        let egl = match util::egl() {
            Ok(egl) => egl,
            Err(_) => return,
        };
        unsafe {
            if self.is_current()
                && egl.MakeCurrent(
                    self.display.egl_display,
                    egl::NO_SURFACE,
                    egl::NO_SURFACE,
                    egl::NO_CONTEXT,
                ) == egl::FALSE
            {
                log::warn!("unbinding surface before destroy failed: {}", ErrorCode::last(egl));
            }
            if egl.DestroySurface(self.display.egl_display, self.egl_surface) == egl::FALSE {
                log::warn!("eglDestroySurface failed: {}", ErrorCode::last(egl));
            }
        }
    }
}
