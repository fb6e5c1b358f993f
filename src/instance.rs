use raw_window_handle::{HasWindowHandle, RawWindowHandle};

use std::collections::HashMap;
use std::ffi::CStr;
use std::os::raw::c_void;
use std::sync::{Arc, Mutex, Weak};

use crate::platform::egl::types::{EGLConfig, EGLDisplay, EGLint};
use crate::platform::ffi::{EGL_ANDROID_PRESENTATION_TIME, EGL_EXTENSION_FUNCTIONS};
use crate::platform::egl;
use crate::platform::util::{self, egl_config_from_display};
use crate::{
    ConfigAttributes, Context, ContextAttributes, EglError, ErrorCode, Surface, SurfaceKind,
};

lazy_static! {
    // eglGetDisplay(EGL_DEFAULT_DISPLAY) 在进程内总是同一个句柄，
    // 只有最后一个使用者释放时才能 eglTerminate
    static ref DISPLAYS: Mutex<HashMap<usize, Weak<DisplayInner>>> = Mutex::new(HashMap::new());
}

#[derive(Debug)]
pub(crate) struct DisplayInner {
    pub(crate) egl_display: EGLDisplay,
    version: (EGLint, EGLint),
    extensions: String,
}

unsafe impl Sync for DisplayInner {}
unsafe impl Send for DisplayInner {}

impl Drop for DisplayInner {
    fn drop(&mut self) {
        let mut displays = DISPLAYS.lock().unwrap_or_else(|e| e.into_inner());
        let key = self.egl_display as usize;

        // A newer Instance already re-registered the same display.
        if displays
            .get(&key)
            .map_or(false, |display| display.strong_count() > 0)
        {
            return;
        }
        displays.remove(&key);

        if let Ok(egl) = util::egl() {
            let result = unsafe { egl.Terminate(self.egl_display) };
            if result == egl::FALSE {
                log::warn!("eglTerminate failed: {}", ErrorCode::last(egl));
            } else {
                log::debug!("terminated display {:?}", self.egl_display);
            }
        }
    }
}

/// A configuration chosen with `eglChooseConfig`. Valid as long as its display is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config(pub(crate) EGLConfig);

unsafe impl Sync for Config {}
unsafe impl Send for Config {}

/// An initialised EGL display with the GLES client API bound.
#[derive(Debug, Clone)]
pub struct Instance {
    pub(crate) display: Arc<DisplayInner>,
}

impl Instance {
    // Display 封装在里面，不对外曝露
    pub fn new() -> Result<Self, EglError> {
        let egl = util::egl()?;

        let display = {
            let mut displays = DISPLAYS.lock().unwrap_or_else(|e| e.into_inner());

            let egl_display = unsafe { egl.GetDisplay(egl::DEFAULT_DISPLAY) };
            if egl_display == egl::NO_DISPLAY {
                return Err(EglError::NoDisplay);
            }

            let key = egl_display as usize;
            match displays.get(&key).and_then(Weak::upgrade) {
                Some(display) => display,
                None => {
                    let (mut major_version, mut minor_version) = (0, 0);
                    let result = unsafe {
                        egl.Initialize(egl_display, &mut major_version, &mut minor_version)
                    };
                    if result == egl::FALSE {
                        return Err(EglError::InitializeFailed(ErrorCode::last(egl)));
                    }

                    let extensions = unsafe {
                        let raw = egl.QueryString(egl_display, egl::EXTENSIONS as EGLint);
                        if raw.is_null() {
                            String::new()
                        } else {
                            CStr::from_ptr(raw).to_string_lossy().into_owned()
                        }
                    };
                    log::debug!(
                        "initialized EGL {}.{} on display {:?}",
                        major_version,
                        minor_version,
                        egl_display
                    );

                    let display = Arc::new(DisplayInner {
                        egl_display,
                        version: (major_version, minor_version),
                        extensions,
                    });
                    displays.insert(key, Arc::downgrade(&display));
                    display
                }
            }
        };

        // eglBindAPI 是线程状态，每个 Instance 都要调用一次
        let result = unsafe { egl.BindAPI(egl::OPENGL_ES_API) };
        if result == egl::FALSE {
            return Err(EglError::BindApiFailed(ErrorCode::last(egl)));
        }

        Ok(Self { display })
    }

    #[inline]
    pub(crate) fn raw(&self) -> EGLDisplay {
        self.display.egl_display
    }

    /// `(major, minor)` reported by `eglInitialize`.
    pub fn version(&self) -> (i32, i32) {
        self.display.version
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.display
            .extensions
            .split_whitespace()
            .any(|extension| extension == name)
    }

    pub fn choose_config(&self, attributes: &ConfigAttributes) -> Result<Config, EglError> {
        let egl = util::egl()?;
        let config = unsafe { egl_config_from_display(egl, self.raw(), attributes)? };
        Ok(Config(config))
    }

    // GLES 3.0
    pub fn create_context(
        &self,
        config: Config,
        attributes: &ContextAttributes,
        share: Option<&Context>,
    ) -> Result<Context, EglError> {
        let egl = util::egl()?;
        let share_context = share.map_or(egl::NO_CONTEXT, |context| context.egl_context);
        let egl_context_attributes = attributes.to_attrib_list();

        let egl_context = unsafe {
            egl.CreateContext(
                self.raw(),
                config.0,
                share_context,
                egl_context_attributes.as_ptr(),
            )
        };
        if egl_context == egl::NO_CONTEXT {
            return Err(EglError::ContextCreationFailed(ErrorCode::last(egl)));
        }
        log::debug!("created context {:?} (shared: {})", egl_context, share.is_some());

        Ok(Context {
            egl_context,
            display: self.display.clone(),
        })
    }

    // 带双缓冲的 Surface
    pub fn create_window_surface<W: HasWindowHandle>(
        &self,
        config: Config,
        window: &W,
    ) -> Result<Surface, EglError> {
        let native_window = native_window(window)?;

        let egl = util::egl()?;
        let attributes = [egl::NONE as EGLint];
        let egl_surface = unsafe {
            egl.CreateWindowSurface(self.raw(), config.0, native_window, attributes.as_ptr())
        };
        if egl_surface == egl::NO_SURFACE {
            return Err(EglError::SurfaceCreationFailed(ErrorCode::last(egl)));
        }
        log::debug!("native_window: {:?}; egl_surface: {:?}", native_window, egl_surface);

        Ok(Surface {
            egl_surface,
            kind: SurfaceKind::Window,
            display: self.display.clone(),
        })
    }

    /// Off-screen surface. A zero size is accepted; such a surface has no pixels.
    pub fn create_pbuffer_surface(
        &self,
        config: Config,
        width: i32,
        height: i32,
    ) -> Result<Surface, EglError> {
        let egl = util::egl()?;
        let attributes = [
            egl::WIDTH as EGLint,
            width,
            egl::HEIGHT as EGLint,
            height,
            egl::NONE as EGLint,
        ];
        let egl_surface =
            unsafe { egl.CreatePbufferSurface(self.raw(), config.0, attributes.as_ptr()) };
        if egl_surface == egl::NO_SURFACE {
            return Err(EglError::SurfaceCreationFailed(ErrorCode::last(egl)));
        }
        log::debug!("created {}x{} pbuffer {:?}", width, height, egl_surface);

        Ok(Surface {
            egl_surface,
            kind: SurfaceKind::Pbuffer,
            display: self.display.clone(),
        })
    }

    // 调用了这个之后，gl的函数才能用；
    // context 为 None 时解除当前线程的绑定
    pub fn make_current(
        &self,
        surface: Option<&Surface>,
        context: Option<&Context>,
    ) -> Result<(), EglError> {
        let egl = util::egl()?;
        let (egl_surface, egl_context) = match context {
            Some(context) => (
                surface.map_or(egl::NO_SURFACE, |surface| surface.egl_surface),
                context.egl_context,
            ),
            None => (egl::NO_SURFACE, egl::NO_CONTEXT),
        };

        let ok = unsafe { egl.MakeCurrent(self.raw(), egl_surface, egl_surface, egl_context) };
        if ok == egl::FALSE {
            return Err(EglError::MakeCurrentFailed(ErrorCode::last(egl)));
        }
        Ok(())
    }

    /// Applies to the surface current on the calling thread.
    pub fn swap_interval(&self, interval: i32) -> Result<(), EglError> {
        let egl = util::egl()?;
        let ok = unsafe { egl.SwapInterval(self.raw(), interval) };
        if ok == egl::FALSE {
            return Err(EglError::SwapIntervalFailed(ErrorCode::last(egl)));
        }
        Ok(())
    }

    // 交换 Surface 中的 双缓冲
    pub fn swap_buffers(&self, surface: &Surface) -> Result<(), EglError> {
        let egl = util::egl()?;
        let ok = unsafe { egl.SwapBuffers(self.raw(), surface.egl_surface) };
        if ok == egl::FALSE {
            return Err(EglError::SwapBuffersFailed(ErrorCode::last(egl)));
        }
        Ok(())
    }

    /// Tags the next frame swapped on `surface` with a presentation time in nanoseconds.
    pub fn set_presentation_time(&self, surface: &Surface, timestamp: i64) -> Result<(), EglError> {
        let egl = util::egl()?;
        let presentation_time = match EGL_EXTENSION_FUNCTIONS.PresentationTimeANDROID {
            Some(function) if self.has_extension(EGL_ANDROID_PRESENTATION_TIME) => function,
            _ => return Err(EglError::ExtensionUnavailable(EGL_ANDROID_PRESENTATION_TIME)),
        };

        let ok = unsafe { presentation_time(self.raw(), surface.egl_surface, timestamp) };
        if ok == egl::FALSE {
            return Err(EglError::PresentationTimeFailed(ErrorCode::last(egl)));
        }
        Ok(())
    }

    /// `eglReleaseThread` for the calling thread.
    pub(crate) fn release_thread(&self) {
        if let Ok(egl) = util::egl() {
            if unsafe { egl.ReleaseThread() } == egl::FALSE {
                log::warn!("eglReleaseThread failed: {}", ErrorCode::last(egl));
            }
        }
    }
}

/// `ANativeWindow*` on Android, the X11 `Window` id under Xlib.
pub(crate) fn native_window<W: HasWindowHandle>(window: &W) -> Result<*const c_void, EglError> {
    let handle = window
        .window_handle()
        .map_err(|_| EglError::IncompatibleWindowHandle)?
        .as_raw();
    match handle {
        RawWindowHandle::AndroidNdk(handle) => Ok(handle.a_native_window.as_ptr() as *const c_void),
        RawWindowHandle::Xlib(handle) => Ok(handle.window as *const c_void),
        _ => Err(EglError::IncompatibleWindowHandle),
    }
}
