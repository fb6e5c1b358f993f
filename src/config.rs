use bitflags::bitflags;

use crate::platform::egl::{self, types::EGLint};

bitflags! {
    /// Client APIs a config must be renderable with (`EGL_RENDERABLE_TYPE`).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RenderableApi: u32 {
        const OPENGL_ES2 = egl::OPENGL_ES2_BIT as u32;
        const OPENGL_ES3 = egl::OPENGL_ES3_BIT as u32;
    }
}

bitflags! {
    /// Surface types a config must support (`EGL_SURFACE_TYPE`).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SurfaceKinds: u32 {
        const WINDOW = egl::WINDOW_BIT as u32;
        const PBUFFER = egl::PBUFFER_BIT as u32;
    }
}

/// Attributes handed to `eglChooseConfig`.
///
/// The default asks for an RGBA8888 config renderable with GLES 2 and 3.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigAttributes {
    pub red_size: u8,
    pub green_size: u8,
    pub blue_size: u8,
    pub alpha_size: u8,
    /// 0 表示不关心
    pub depth_size: u8,
    pub stencil_size: u8,
    pub renderable: RenderableApi,
    /// Empty leaves `EGL_SURFACE_TYPE` out of the list.
    pub surface_kinds: SurfaceKinds,
}

impl Default for ConfigAttributes {
    fn default() -> Self {
        Self {
            red_size: 8,
            green_size: 8,
            blue_size: 8,
            alpha_size: 8,
            depth_size: 0,
            stencil_size: 0,
            renderable: RenderableApi::OPENGL_ES2 | RenderableApi::OPENGL_ES3,
            surface_kinds: SurfaceKinds::empty(),
        }
    }
}

impl ConfigAttributes {
    pub fn with_surface_kinds(mut self, kinds: SurfaceKinds) -> Self {
        self.surface_kinds = kinds;
        self
    }

    /// `EGL_NONE`-terminated attribute list.
    pub fn to_attrib_list(&self) -> Vec<EGLint> {
        let mut list = vec![
            egl::RED_SIZE as EGLint,
            self.red_size as EGLint,
            egl::GREEN_SIZE as EGLint,
            self.green_size as EGLint,
            egl::BLUE_SIZE as EGLint,
            self.blue_size as EGLint,
            egl::ALPHA_SIZE as EGLint,
            self.alpha_size as EGLint,
        ];
        if self.depth_size > 0 {
            list.extend([egl::DEPTH_SIZE as EGLint, self.depth_size as EGLint]);
        }
        if self.stencil_size > 0 {
            list.extend([egl::STENCIL_SIZE as EGLint, self.stencil_size as EGLint]);
        }
        if !self.renderable.is_empty() {
            list.extend([
                egl::RENDERABLE_TYPE as EGLint,
                self.renderable.bits() as EGLint,
            ]);
        }
        if !self.surface_kinds.is_empty() {
            list.extend([
                egl::SURFACE_TYPE as EGLint,
                self.surface_kinds.bits() as EGLint,
            ]);
        }
        list.push(egl::NONE as EGLint);
        list
    }
}

/// Attributes handed to `eglCreateContext`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextAttributes {
    /// `EGL_CONTEXT_CLIENT_VERSION`
    pub client_version: u8,
}

impl Default for ContextAttributes {
    fn default() -> Self {
        // Request opengl ES3.0
        Self { client_version: 3 }
    }
}

impl ContextAttributes {
    pub fn to_attrib_list(&self) -> Vec<EGLint> {
        vec![
            egl::CONTEXT_CLIENT_VERSION as EGLint,
            self.client_version as EGLint,
            egl::NONE as EGLint,
        ]
    }
}

/// Everything `EglCore` needs besides its surface target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub config: ConfigAttributes,
    pub context: ContextAttributes,
    /// `eglSwapInterval` applied after the first bind of a window surface.
    /// `None` keeps the driver default (vsync on most devices).
    pub swap_interval: Option<i32>,
}

impl Options {
    /// Turns vsync off, the way the `is_vsync = false` switch did.
    pub fn without_vsync(mut self) -> Self {
        self.swap_interval = Some(0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(list: &[EGLint]) -> Vec<(EGLint, EGLint)> {
        assert_eq!(list.last(), Some(&(egl::NONE as EGLint)));
        list[..list.len() - 1]
            .chunks(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }

    #[test]
    fn default_config_is_rgba8_gles2_and_3() {
        let list = ConfigAttributes::default().to_attrib_list();
        assert_eq!(
            pairs(&list),
            vec![
                (egl::RED_SIZE as EGLint, 8),
                (egl::GREEN_SIZE as EGLint, 8),
                (egl::BLUE_SIZE as EGLint, 8),
                (egl::ALPHA_SIZE as EGLint, 8),
                (
                    egl::RENDERABLE_TYPE as EGLint,
                    egl::OPENGL_ES2_BIT as EGLint | egl::OPENGL_ES3_BIT as EGLint
                ),
            ]
        );
    }

    #[test]
    fn depth_stencil_and_surface_type_are_opt_in() {
        let attributes = ConfigAttributes {
            depth_size: 24,
            stencil_size: 8,
            ..Default::default()
        }
        .with_surface_kinds(SurfaceKinds::PBUFFER);
        let list = pairs(&attributes.to_attrib_list());

        assert!(list.contains(&(egl::DEPTH_SIZE as EGLint, 24)));
        assert!(list.contains(&(egl::STENCIL_SIZE as EGLint, 8)));
        assert!(list.contains(&(egl::SURFACE_TYPE as EGLint, egl::PBUFFER_BIT as EGLint)));
    }

    #[test]
    fn context_requests_client_version() {
        let list = ContextAttributes { client_version: 2 }.to_attrib_list();
        assert_eq!(
            list,
            vec![egl::CONTEXT_CLIENT_VERSION as EGLint, 2, egl::NONE as EGLint]
        );
        assert_eq!(ContextAttributes::default().client_version, 3);
    }

    #[test]
    fn without_vsync_sets_interval_zero() {
        assert_eq!(Options::default().swap_interval, None);
        assert_eq!(Options::default().without_vsync().swap_interval, Some(0));
    }
}
