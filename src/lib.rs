//! EGL context helper: one GLES context plus the surface it draws to,
//! bound to and unbound from the calling thread on demand.
//!
//! `libEGL` is loaded at runtime, so the crate builds on hosts without it and
//! reports [`EglError::LibraryUnavailable`] instead.

#[macro_use]
extern crate lazy_static;

mod config;
mod context;
mod current;
mod egl_core;
mod error;
mod instance;
mod surface;

pub mod platform;

pub use config::*;
pub use context::*;
pub use current::*;
pub use egl_core::*;
pub use error::*;
pub use instance::*;
pub use surface::*;

/// Re-exported so callers can use [`EglCore::gl`] without pinning their own `glow`.
pub use glow;
