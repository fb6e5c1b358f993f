use std::fmt;

use crate::platform::egl::Egl;

/// An error code reported by `eglGetError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    BadAccess,
    BadAlloc,
    BadAttribute,
    BadConfig,
    BadContext,
    BadCurrentSurface,
    BadDisplay,
    BadMatch,
    BadNativePixmap,
    BadNativeWindow,
    BadParameter,
    BadSurface,
    ContextLost,
    /// A code outside the EGL 1.5 error range, or `EGL_SUCCESS` after a failed call.
    Unknown(i32),
}

const EGL_SUCCESS: i32 = 0x3000;

const CODES: [(i32, ErrorCode, &str); 14] = [
    (0x3001, ErrorCode::NotInitialized, "EGL_NOT_INITIALIZED"),
    (0x3002, ErrorCode::BadAccess, "EGL_BAD_ACCESS"),
    (0x3003, ErrorCode::BadAlloc, "EGL_BAD_ALLOC"),
    (0x3004, ErrorCode::BadAttribute, "EGL_BAD_ATTRIBUTE"),
    (0x3005, ErrorCode::BadConfig, "EGL_BAD_CONFIG"),
    (0x3006, ErrorCode::BadContext, "EGL_BAD_CONTEXT"),
    (0x3007, ErrorCode::BadCurrentSurface, "EGL_BAD_CURRENT_SURFACE"),
    (0x3008, ErrorCode::BadDisplay, "EGL_BAD_DISPLAY"),
    (0x3009, ErrorCode::BadMatch, "EGL_BAD_MATCH"),
    (0x300A, ErrorCode::BadNativePixmap, "EGL_BAD_NATIVE_PIXMAP"),
    (0x300B, ErrorCode::BadNativeWindow, "EGL_BAD_NATIVE_WINDOW"),
    (0x300C, ErrorCode::BadParameter, "EGL_BAD_PARAMETER"),
    (0x300D, ErrorCode::BadSurface, "EGL_BAD_SURFACE"),
    (0x300E, ErrorCode::ContextLost, "EGL_CONTEXT_LOST"),
];

impl ErrorCode {
    /// Maps a raw `eglGetError` value. `EGL_SUCCESS` has no error and yields `None`.
    pub fn from_raw(code: i32) -> Option<ErrorCode> {
        if code == EGL_SUCCESS {
            return None;
        }
        let known = CODES.iter().find(|(raw, _, _)| *raw == code);
        Some(known.map_or(ErrorCode::Unknown(code), |(_, error, _)| *error))
    }

    pub fn raw(&self) -> i32 {
        match self {
            ErrorCode::Unknown(code) => *code,
            error => CODES
                .iter()
                .find(|(_, known, _)| known == error)
                .map_or(EGL_SUCCESS, |(raw, _, _)| *raw),
        }
    }

    pub fn name(&self) -> &'static str {
        CODES
            .iter()
            .find(|(_, known, _)| known == self)
            .map_or("EGL_UNKNOWN_ERROR", |(_, _, name)| *name)
    }

    /// Reads and clears the calling thread's EGL error.
    pub(crate) fn last(egl: &Egl) -> ErrorCode {
        let code = unsafe { egl.GetError() };
        ErrorCode::from_raw(code).unwrap_or(ErrorCode::Unknown(code))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:x})", self.name(), self.raw())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EglError {
    #[error("libEGL could not be loaded")]
    LibraryUnavailable,
    #[error("no EGL display is available")]
    NoDisplay,
    #[error("eglInitialize failed: {0}")]
    InitializeFailed(ErrorCode),
    #[error("eglBindAPI(EGL_OPENGL_ES_API) failed: {0}")]
    BindApiFailed(ErrorCode),
    #[error("eglChooseConfig failed: {0}")]
    ChooseConfigFailed(ErrorCode),
    #[error("no EGL config matches the requested attributes")]
    NoMatchingConfig,
    #[error("eglCreateContext failed: {0}")]
    ContextCreationFailed(ErrorCode),
    #[error("surface creation failed: {0}")]
    SurfaceCreationFailed(ErrorCode),
    #[error("eglQuerySurface failed: {0}")]
    QuerySurfaceFailed(ErrorCode),
    #[error("window handle is not an android or xlib window")]
    IncompatibleWindowHandle,
    #[error("eglMakeCurrent failed: {0}")]
    MakeCurrentFailed(ErrorCode),
    #[error("eglSwapInterval failed: {0}")]
    SwapIntervalFailed(ErrorCode),
    #[error("eglSwapBuffers failed: {0}")]
    SwapBuffersFailed(ErrorCode),
    #[error("eglPresentationTimeANDROID failed: {0}")]
    PresentationTimeFailed(ErrorCode),
    #[error("{0} is not supported by this display")]
    ExtensionUnavailable(&'static str),
    #[error("the EGL environment has been released")]
    Released,
}
