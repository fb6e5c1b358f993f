use raw_window_handle::HasWindowHandle;

use std::ops::{Deref, DerefMut};

use crate::instance::native_window;
use crate::platform::util;
use crate::{
    Config, Context, CurrentBinding, EglError, Instance, Options, Surface, SurfaceKind,
    SurfaceKinds,
};

// 字段顺序即释放顺序: surface -> context -> display
#[derive(Debug)]
struct Resources {
    surface: Surface,
    context: Context,
    instance: Instance,
}

/// One GLES context together with the surface it renders to.
///
/// Lifecycle: created bound to nothing, `bind` / `unbind` any number of times,
/// then `release` (or drop). After release every operation returns
/// [`EglError::Released`].
#[derive(Debug)]
pub struct EglCore {
    resources: Option<Resources>,
    // 绑定前线程上的 display / draw / read / context
    previous: Option<CurrentBinding>,
    gl: Option<GlowContext>,
    swap_interval: Option<i32>,
    swap_interval_applied: bool,
    #[cfg(feature = "fps")]
    fps: FpsCounter,
}

// 绑定时保存的快照属于调用 bind 的线程，跨线程移动前应先 unbind
unsafe impl Send for EglCore {}

impl EglCore {
    /// Off-screen environment backed by a `width` x `height` pbuffer.
    pub fn offscreen(
        width: i32,
        height: i32,
        share: Option<&EglCore>,
        options: &Options,
    ) -> Result<Self, EglError> {
        let instance = Instance::new()?;
        let config = Self::choose_config(&instance, options, SurfaceKinds::PBUFFER)?;
        let context = Self::create_context(&instance, config, share, options)?;
        let surface = instance.create_pbuffer_surface(config, width, height)?;
        Ok(Self::from_parts(instance, context, surface, options))
    }

    /// Environment that renders into `window`. `window` must outlive the returned value.
    pub fn with_window<W: HasWindowHandle>(
        window: &W,
        share: Option<&EglCore>,
        options: &Options,
    ) -> Result<Self, EglError> {
        native_window(window)?;
        let instance = Instance::new()?;
        let config = Self::choose_config(&instance, options, SurfaceKinds::WINDOW)?;
        let context = Self::create_context(&instance, config, share, options)?;
        let surface = instance.create_window_surface(config, window)?;
        Ok(Self::from_parts(instance, context, surface, options))
    }

    fn choose_config(
        instance: &Instance,
        options: &Options,
        kind: SurfaceKinds,
    ) -> Result<Config, EglError> {
        let attributes = options
            .config
            .clone()
            .with_surface_kinds(options.config.surface_kinds | kind);
        instance.choose_config(&attributes)
    }

    fn create_context(
        instance: &Instance,
        config: Config,
        share: Option<&EglCore>,
        options: &Options,
    ) -> Result<Context, EglError> {
        let share = share
            .map(|core| core.context().ok_or(EglError::Released))
            .transpose()?;
        instance.create_context(config, &options.context, share)
    }

    fn from_parts(instance: Instance, context: Context, surface: Surface, options: &Options) -> Self {
        Self {
            resources: Some(Resources {
                surface,
                context,
                instance,
            }),
            previous: None,
            gl: None,
            swap_interval: options.swap_interval,
            swap_interval_applied: false,
            #[cfg(feature = "fps")]
            fps: FpsCounter::default(),
        }
    }

    fn resources(&self) -> Result<&Resources, EglError> {
        self.resources.as_ref().ok_or(EglError::Released)
    }

    /// Makes this context current on the calling thread, remembering what was current before.
    ///
    /// Binding again while already bound keeps the binding remembered by the first call.
    pub fn bind(&mut self) -> Result<(), EglError> {
        let egl = util::egl()?;
        let resources = self.resources.as_ref().ok_or(EglError::Released)?;

        let captured = self.previous.is_none();
        if captured {
            self.previous = Some(CurrentBinding::capture_with(egl));
        }
        if let Err(err) = resources
            .instance
            .make_current(Some(&resources.surface), Some(&resources.context))
        {
            if captured {
                self.previous = None;
            }
            return Err(err);
        }

        if !self.swap_interval_applied && resources.surface.kind() == SurfaceKind::Window {
            if let Some(interval) = self.swap_interval {
                if let Err(err) = resources.instance.swap_interval(interval) {
                    log::warn!("swap interval {} not applied: {}", interval, err);
                }
            }
            self.swap_interval_applied = true;
        }

        if self.gl.is_none() {
            let gl = unsafe {
                glow::Context::from_loader_function(|symbol_name| {
                    util::get_proc_address(egl, symbol_name)
                })
            };
            self.gl = Some(GlowContext(gl));
        }
        Ok(())
    }

    /// Restores whatever was current before [`bind`](Self::bind). Does nothing when not bound.
    ///
    /// The snapshot belongs to the thread that called `bind`. If this context is no longer
    /// current on the calling thread (it was rebound elsewhere, or the core moved threads)
    /// the snapshot is dropped without touching the thread's binding.
    ///
    /// If the snapshot cannot be restored, e.g. its context was destroyed in the meantime,
    /// the thread is released instead and the error is returned. Either way this context
    /// is no longer current afterwards.
    pub fn unbind(&mut self) -> Result<(), EglError> {
        let resources = self.resources.as_ref().ok_or(EglError::Released)?;
        let previous = match self.previous.take() {
            Some(previous) => previous,
            None => return Ok(()),
        };
        if !resources.context.is_current() {
            return Ok(());
        }
        if let Err(err) = previous.restore(&resources.instance) {
            if let Err(release_err) = resources.instance.make_current(None, None) {
                log::warn!("releasing the thread after a failed restore failed: {}", release_err);
            }
            return Err(err);
        }
        Ok(())
    }

    /// Binds until the returned guard is dropped.
    pub fn bind_scoped(&mut self) -> Result<BoundCore<'_>, EglError> {
        self.bind()?;
        Ok(BoundCore { core: self })
    }

    /// Needed after rendering for the frame to reach a window surface.
    pub fn swap_buffers(&self) -> Result<(), EglError> {
        let resources = self.resources()?;
        resources.instance.swap_buffers(&resources.surface)?;

        #[cfg(feature = "fps")]
        self.fps.tick();

        Ok(())
    }

    /// `timestamp` is in nanoseconds and applies to the next [`swap_buffers`](Self::swap_buffers).
    pub fn set_presentation_time(&self, timestamp: i64) -> Result<(), EglError> {
        let resources = self.resources()?;
        resources
            .instance
            .set_presentation_time(&resources.surface, timestamp)
    }

    /// Destroys the surface and context and drops the display. Calling it again does nothing.
    pub fn release(&mut self) {
        let Resources {
            surface,
            context,
            instance,
        } = match self.resources.take() {
            Some(resources) => resources,
            None => return,
        };
        self.gl = None;

        if let Some(previous) = self.previous.take() {
            if context.is_current() {
                if let Err(err) = previous.restore(&instance) {
                    log::warn!("restoring the previous binding on release failed: {}", err);
                }
            }
        }

        // Surface / Context 的 Drop 会先解除仍在当前线程上的绑定
        drop(surface);
        drop(context);

        if let Ok(egl) = util::egl() {
            if CurrentBinding::capture_with(egl).is_none() {
                instance.release_thread();
            }
        }
        drop(instance);
        log::debug!("egl core released");
    }

    pub fn is_released(&self) -> bool {
        self.resources.is_none()
    }

    /// Bound through this value and not yet unbound.
    pub fn is_bound(&self) -> bool {
        self.previous.is_some()
    }

    /// This context is current on the calling thread, however it got there.
    pub fn is_current(&self) -> bool {
        self.context().map_or(false, Context::is_current)
    }

    pub fn instance(&self) -> Option<&Instance> {
        self.resources.as_ref().map(|resources| &resources.instance)
    }

    pub fn context(&self) -> Option<&Context> {
        self.resources.as_ref().map(|resources| &resources.context)
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.resources.as_ref().map(|resources| &resources.surface)
    }

    /// GL function table, loaded on the first successful bind.
    /// Only meaningful while this context is current.
    pub fn gl(&self) -> Option<&glow::Context> {
        self.gl.as_ref().map(|gl| &gl.0)
    }
}

impl Drop for EglCore {
    fn drop(&mut self) {
        self.release();
    }
}

/// Keeps an [`EglCore`] bound; unbinds on drop.
#[derive(Debug)]
pub struct BoundCore<'a> {
    core: &'a mut EglCore,
}

impl Deref for BoundCore<'_> {
    type Target = EglCore;

    fn deref(&self) -> &EglCore {
        self.core
    }
}

impl DerefMut for BoundCore<'_> {
    fn deref_mut(&mut self) -> &mut EglCore {
        self.core
    }
}

impl Drop for BoundCore<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.core.unbind() {
            log::warn!("unbind on scope exit failed: {}", err);
        }
    }
}

struct GlowContext(glow::Context);

impl std::fmt::Debug for GlowContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("glow::Context")
    }
}

#[cfg(feature = "fps")]
#[derive(Debug)]
struct FpsCounter {
    frames: std::cell::Cell<u32>,
    since: std::cell::Cell<std::time::Instant>,
}

#[cfg(feature = "fps")]
impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frames: std::cell::Cell::new(0),
            since: std::cell::Cell::new(std::time::Instant::now()),
        }
    }
}

#[cfg(feature = "fps")]
impl FpsCounter {
    fn tick(&self) {
        self.frames.set(self.frames.get() + 1);
        if self.since.get().elapsed().as_millis() > 1000 {
            log::info!("EGL_KIT FPS: {}", self.frames.get());
            self.frames.set(0);
            self.since.set(std::time::Instant::now());
        }
    }
}
