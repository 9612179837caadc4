//! GPU buffer objects.

use glkit_core::types::{GLenum, GLuint};
use glkit_core::GlContext;
use tracing::debug;

use crate::bytes::{slice_as_bytes, AsBytes};
use crate::handle::{BufferKind, GlObject, Shared};

/// A buffer object holding raw vertex or index data.
pub type Buffer = GlObject<BufferKind>;

/// Expected access pattern, passed to the driver as a placement hint.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferUsage {
    StaticDraw = gl::STATIC_DRAW,
    StaticRead = gl::STATIC_READ,
    StaticCopy = gl::STATIC_COPY,
    #[default]
    DynamicDraw = gl::DYNAMIC_DRAW,
    DynamicRead = gl::DYNAMIC_READ,
    DynamicCopy = gl::DYNAMIC_COPY,
    StreamDraw = gl::STREAM_DRAW,
    StreamRead = gl::STREAM_READ,
    StreamCopy = gl::STREAM_COPY,
}

impl BufferUsage {
    pub fn as_gl(self) -> GLenum {
        self as GLenum
    }
}

/// Binding point for [`Buffer::bind`].
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Array = gl::ARRAY_BUFFER,
    ElementArray = gl::ELEMENT_ARRAY_BUFFER,
}

impl GlObject<BufferKind> {
    /// Create an empty, owning buffer.
    pub fn create(ctx: &GlContext) -> Self {
        let id = ctx.create_buffer();
        debug!(id, "created buffer");
        Self::wrap(ctx, id, true)
    }

    /// Create a buffer with `size` bytes of uninitialised storage.
    pub fn allocate(ctx: &GlContext, size: usize, usage: BufferUsage) -> Self {
        let buffer = Self::create(ctx);
        ctx.buffer_data(buffer.id(), size, None, usage.as_gl());
        buffer
    }

    /// Create a buffer and upload `data` in one step.
    pub fn load(ctx: &GlContext, data: &[u8], usage: BufferUsage) -> Self {
        let buffer = Self::create(ctx);
        ctx.buffer_data(buffer.id(), data.len(), Some(data), usage.as_gl());
        debug!(id = buffer.id(), bytes = data.len(), ?usage, "uploaded buffer");
        buffer
    }

    /// [`Buffer::load`] for typed data.
    pub fn load_slice<T: AsBytes>(ctx: &GlContext, data: &[T], usage: BufferUsage) -> Self {
        Self::load(ctx, slice_as_bytes(data), usage)
    }

    /// [`Buffer::create`] in shared ownership.
    pub fn create_shared(ctx: &GlContext) -> Shared<Self> {
        Self::create(ctx).into_shared()
    }

    /// [`Buffer::allocate`] in shared ownership.
    pub fn allocate_shared(ctx: &GlContext, size: usize, usage: BufferUsage) -> Shared<Self> {
        Self::allocate(ctx, size, usage).into_shared()
    }

    /// [`Buffer::load_slice`] in shared ownership.
    pub fn load_shared<T: AsBytes>(
        ctx: &GlContext,
        data: &[T],
        usage: BufferUsage,
    ) -> Shared<Self> {
        Self::load_slice(ctx, data, usage).into_shared()
    }

    /// Replace the buffer's storage with `data`.
    pub fn upload(&self, data: &[u8], usage: BufferUsage) {
        self.gl()
            .buffer_data(self.id(), data.len(), Some(data), usage.as_gl());
    }

    pub fn bind(&self, target: BufferTarget) {
        self.gl().bind_buffer(target as GLenum, self.id());
    }
}

/// Anything that names a buffer: a [`Buffer`], a [`Shared`] buffer, or a raw
/// object name.
pub trait BufferSource {
    fn buffer_id(&self) -> GLuint;
}

impl BufferSource for Buffer {
    fn buffer_id(&self) -> GLuint {
        self.id()
    }
}

impl<T: BufferSource + ?Sized> BufferSource for Shared<T> {
    fn buffer_id(&self) -> GLuint {
        (**self).buffer_id()
    }
}

impl BufferSource for GLuint {
    fn buffer_id(&self) -> GLuint {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glkit_core::testing::{GlCall, RecordingGl};

    #[test]
    fn load_nine_floats_yields_owning_handle_released_once() {
        let gl = RecordingGl::new();
        let ctx = gl.context();
        let vertices = [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

        let buffer = Buffer::load_slice(&ctx, &vertices, BufferUsage::StaticDraw);
        assert!(buffer.is_valid());
        assert!(buffer.is_owned());

        let id = buffer.id();
        match &gl.calls()[1] {
            GlCall::BufferData {
                buffer,
                size,
                data,
                usage,
            } => {
                assert_eq!(*buffer, id);
                assert_eq!(*size, 36);
                assert_eq!(data.as_ref().map(Vec::len), Some(36));
                assert_eq!(*usage, gl::STATIC_DRAW);
            }
            other => panic!("expected upload, got {other:?}"),
        }

        drop(buffer);
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteBuffer(_))), 1);
        assert_eq!(gl.calls().last(), Some(&GlCall::DeleteBuffer(id)));
    }

    #[test]
    fn allocate_passes_no_data() {
        let gl = RecordingGl::new();
        let buffer = Buffer::allocate(&gl.context(), 256, BufferUsage::default());
        assert!(gl.calls().contains(&GlCall::BufferData {
            buffer: buffer.id(),
            size: 256,
            data: None,
            usage: gl::DYNAMIC_DRAW,
        }));
    }

    #[test]
    fn wrapped_external_buffer_is_left_alone() {
        let gl = RecordingGl::new();
        let buffer = Buffer::wrap(&gl.context(), 42, false);
        buffer.bind(BufferTarget::ElementArray);
        drop(buffer);
        assert_eq!(
            gl.calls(),
            vec![GlCall::BindBuffer {
                target: gl::ELEMENT_ARRAY_BUFFER,
                buffer: 42
            }]
        );
    }

    #[test]
    fn shared_buffer_reports_same_source_id() {
        let gl = RecordingGl::new();
        let shared = Buffer::load_shared(&gl.context(), &[1u32, 2, 3], BufferUsage::StreamDraw);
        assert_eq!(shared.buffer_id(), shared.id());
        assert_eq!(7u32.buffer_id(), 7);
    }
}
