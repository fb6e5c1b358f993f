use egl_kit::glow::{self, HasContext};
use egl_kit::{EglCore, Options};

fn main() {
    env_logger::init();

    let mut core = match EglCore::offscreen(256, 256, None, &Options::default()) {
        Ok(core) => core,
        Err(err) => {
            log::error!("egl init failed: {}", err);
            return;
        }
    };

    let version = core.instance().map(|instance| instance.version());
    log::info!("EGL version: {:?}", version);

    for frame in 0..10 {
        let bound = core.bind_scoped().unwrap();
        let gl = bound.gl().unwrap();
        let r = frame as f32 / 10.0;
        unsafe {
            gl.clear_color(r, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
        bound.swap_buffers().unwrap();
    }

    core.release();
}
