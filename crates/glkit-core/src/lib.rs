//! Driver seam and shared plumbing for the glkit crates.
//!
//! Every OpenGL call made by the object and window layers goes through the
//! [`GlDriver`] trait. The production implementation, [`NativeGl`], forwards
//! to the `gl` crate once entry points have been loaded with
//! [`loader::load_with`]. Tests swap in `testing::RecordingGl` (behind the
//! `testing` feature) to observe exactly which calls were issued.
//!
//! # Overview
//!
//! - [`GlDriver`] is the trait every backend implements.
//! - [`GlContext`] is the shared, thread-affine handle objects keep to the
//!   driver they were created on.
//! - [`Uniform`] is the tagged value accepted by uniform uploads.
//! - [`logging`] installs the `tracing` subscriber used by binaries.

pub mod driver;
pub mod loader;
pub mod logging;
pub mod native;
pub mod uniform;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use driver::{GlContext, GlDriver};
pub use native::NativeGl;
pub use uniform::{ScalarType, Uniform};

/// Re-exported so downstream crates can name `GLuint`/`GLenum` without their
/// own `gl` dependency.
pub use gl::types;
