//! These tests need a working EGL driver with a default display (Mesa, SwiftShader,
//! a device). Each test returns early when none is available.

use egl_kit::glow::{self, HasContext};
use egl_kit::{CurrentBinding, EglCore, EglError, Instance, Options, SurfaceKind};
use raw_window_handle::{
    HandleError, HasWindowHandle, RawWindowHandle, Win32WindowHandle, WindowHandle,
};
use serial_test::serial;

use std::num::NonZeroIsize;
use std::thread;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn offscreen(share: Option<&EglCore>) -> Option<EglCore> {
    init_logger();
    match EglCore::offscreen(16, 16, share, &Options::default()) {
        Ok(core) => Some(core),
        Err(err) => {
            eprintln!("skipping, no usable EGL: {}", err);
            None
        }
    }
}

#[test]
#[serial]
fn offscreen_core_has_pbuffer_of_requested_size() {
    let Some(core) = offscreen(None) else { return };

    let surface = core.surface().unwrap();
    assert_eq!(surface.kind(), SurfaceKind::Pbuffer);
    assert_eq!(surface.size(), Ok((16, 16)));
    assert!(!core.is_bound());
    assert!(!core.is_current());
    assert!(core.gl().is_none());
    assert!(core.instance().unwrap().version().0 >= 1);
}

#[test]
#[serial]
fn bind_then_unbind_restores_empty_binding() {
    let Some(mut core) = offscreen(None) else { return };

    assert!(CurrentBinding::capture().unwrap().is_none());
    core.bind().unwrap();
    assert!(core.is_bound());
    assert!(core.is_current());
    assert!(core.gl().is_some());

    core.unbind().unwrap();
    assert!(!core.is_bound());
    assert!(!core.is_current());
    assert!(CurrentBinding::capture().unwrap().is_none());
}

#[test]
#[serial]
fn nested_bind_restores_outer_context() {
    let Some(mut outer) = offscreen(None) else { return };
    let Some(mut inner) = offscreen(None) else { return };

    outer.bind().unwrap();
    inner.bind().unwrap();
    assert!(inner.is_current());
    assert!(!outer.is_current());

    inner.unbind().unwrap();
    assert!(outer.is_current());
    assert!(CurrentBinding::capture()
        .unwrap()
        .is_context(outer.context().unwrap()));

    outer.unbind().unwrap();
    assert!(!outer.is_current());
}

#[test]
#[serial]
fn binding_twice_keeps_first_snapshot() {
    let Some(mut core) = offscreen(None) else { return };

    core.bind().unwrap();
    core.bind().unwrap();
    core.unbind().unwrap();
    assert!(CurrentBinding::capture().unwrap().is_none());

    // not bound any more
    core.unbind().unwrap();
}

#[test]
#[serial]
fn scoped_bind_unbinds_on_drop() {
    let Some(mut core) = offscreen(None) else { return };

    {
        let bound = core.bind_scoped().unwrap();
        assert!(bound.is_current());
        bound.swap_buffers().unwrap();
    }
    assert!(!core.is_current());
    assert!(!core.is_bound());
}

#[test]
#[serial]
fn clear_color_reaches_pbuffer() {
    let Some(mut core) = offscreen(None) else { return };

    core.bind().unwrap();
    let mut pixel = [0u8; 4];
    unsafe {
        let gl = core.gl().unwrap();
        gl.clear_color(1.0, 0.0, 0.0, 1.0);
        gl.clear(glow::COLOR_BUFFER_BIT);
        gl.read_pixels(
            0,
            0,
            1,
            1,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelPackData::Slice(&mut pixel),
        );
    }
    core.unbind().unwrap();

    assert_eq!(pixel, [255, 0, 0, 255]);
}

#[test]
#[serial]
fn shared_context_is_created() {
    let Some(first) = offscreen(None) else { return };
    let Some(mut second) = offscreen(Some(&first)) else { return };

    assert_ne!(first.context(), second.context());
    second.bind().unwrap();
    second.unbind().unwrap();
}

#[test]
#[serial]
fn share_with_released_core_fails() {
    let Some(mut first) = offscreen(None) else { return };
    first.release();

    let err = EglCore::offscreen(16, 16, Some(&first), &Options::default()).unwrap_err();
    assert_eq!(err, EglError::Released);
}

#[test]
#[serial]
fn presentation_time_needs_the_android_extension() {
    let Some(mut core) = offscreen(None) else { return };

    core.bind().unwrap();
    let supported = core
        .instance()
        .unwrap()
        .has_extension("EGL_ANDROID_presentation_time");
    let result = core.set_presentation_time(16_666_667);
    if !supported {
        assert_eq!(
            result,
            Err(EglError::ExtensionUnavailable("EGL_ANDROID_presentation_time"))
        );
    }
    core.unbind().unwrap();
}

#[test]
#[serial]
fn release_is_idempotent_and_final() {
    let Some(mut core) = offscreen(None) else { return };

    core.bind().unwrap();
    core.release();
    assert!(core.is_released());
    assert!(CurrentBinding::capture().unwrap().is_none());

    core.release();
    assert_eq!(core.bind(), Err(EglError::Released));
    assert_eq!(core.unbind(), Err(EglError::Released));
    assert_eq!(core.swap_buffers(), Err(EglError::Released));
    assert_eq!(core.set_presentation_time(0), Err(EglError::Released));
    assert!(core.context().is_none());
    assert!(core.gl().is_none());
}

#[test]
#[serial]
fn releasing_one_core_keeps_the_display_alive_for_others() {
    let Some(mut first) = offscreen(None) else { return };
    let Some(mut second) = offscreen(None) else { return };

    first.release();
    second.bind().unwrap();
    second.swap_buffers().unwrap();
    second.unbind().unwrap();
}

#[test]
#[serial]
fn unbind_after_outer_release_still_leaves_context() {
    let Some(mut outer) = offscreen(None) else { return };
    let Some(mut inner) = offscreen(None) else { return };

    outer.bind().unwrap();
    inner.bind().unwrap();
    outer.release();

    // the remembered binding points at a destroyed context
    assert!(matches!(inner.unbind(), Err(EglError::MakeCurrentFailed(_))));
    assert!(!inner.is_bound());
    assert!(!inner.is_current());
    assert_eq!(inner.unbind(), Ok(()));
}

#[test]
#[serial]
fn release_while_bound_restores_outer_context() {
    let Some(mut outer) = offscreen(None) else { return };
    let Some(mut inner) = offscreen(None) else { return };

    outer.bind().unwrap();
    inner.bind().unwrap();
    inner.release();

    assert!(outer.is_current());
    assert!(CurrentBinding::capture()
        .unwrap()
        .is_context(outer.context().unwrap()));
    outer.unbind().unwrap();
    assert!(!outer.is_current());
}

#[test]
#[serial]
fn unbind_on_another_thread_leaves_both_threads_alone() {
    let Some(mut core) = offscreen(None) else { return };

    core.bind().unwrap();
    let mut core = thread::spawn(move || {
        assert_eq!(core.unbind(), Ok(()));
        assert!(!core.is_bound());
        assert!(CurrentBinding::capture().unwrap().is_none());
        core
    })
    .join()
    .unwrap();

    // still current where it was bound
    assert!(core.is_current());
    core.release();
    assert!(CurrentBinding::capture().unwrap().is_none());
}

struct Win32Window;

impl HasWindowHandle for Win32Window {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        let raw = RawWindowHandle::Win32(Win32WindowHandle::new(NonZeroIsize::new(1).unwrap()));
        Ok(unsafe { WindowHandle::borrow_raw(raw) })
    }
}

#[test]
#[serial]
fn window_surface_rejects_foreign_handles() {
    init_logger();
    let Ok(instance) = Instance::new() else { return };
    let Ok(config) = instance.choose_config(&Default::default()) else { return };

    assert_eq!(
        instance.create_window_surface(config, &Win32Window).unwrap_err(),
        EglError::IncompatibleWindowHandle
    );
    assert_eq!(
        EglCore::with_window(&Win32Window, None, &Options::default()).unwrap_err(),
        EglError::IncompatibleWindowHandle
    );
}

#[test]
#[serial]
fn swap_interval_is_ignored_for_pbuffers() {
    init_logger();
    let options = Options::default().without_vsync();
    let Ok(mut core) = EglCore::offscreen(16, 16, None, &options) else { return };

    core.bind().unwrap();
    core.swap_buffers().unwrap();
    core.unbind().unwrap();
    core.bind().unwrap();
    assert!(core.is_current());
    core.unbind().unwrap();
}

#[test]
#[serial]
fn zero_sized_pbuffer_reports_zero_size() {
    init_logger();
    let Ok(core) = EglCore::offscreen(0, 0, None, &Options::default()) else { return };

    assert_eq!(core.surface().unwrap().size(), Ok((0, 0)));
}

#[test]
#[serial]
fn dropping_a_current_core_unbinds_it() {
    let Some(mut core) = offscreen(None) else { return };

    core.bind().unwrap();
    drop(core);
    assert!(CurrentBinding::capture().unwrap().is_none());
}
