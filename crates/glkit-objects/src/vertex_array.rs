//! Vertex arrays: a driver object plus the layout attached to it.

use glkit_core::types::{GLint, GLsizei, GLuint};
use glkit_core::GlContext;
use tracing::{debug, trace};

use crate::buffer::BufferSource;
use crate::handle::{GlObject, Shared, VertexArrayKind};
use crate::layout::{BufferAttachment, VertexAttribute, VertexLayout};
use crate::shader::Shader;

/// A vertex array object and the attribute names bound on it.
#[derive(Debug)]
pub struct VertexArray {
    object: GlObject<VertexArrayKind>,
    layout: VertexLayout,
}

impl VertexArray {
    pub fn create(ctx: &GlContext) -> Self {
        let id = ctx.create_vertex_array();
        debug!(id, "created vertex array");
        Self::wrap(ctx, id, true)
    }

    /// Adopt an existing vertex array. The layout starts empty, so slots
    /// already in use on `id` are not known.
    pub fn wrap(ctx: &GlContext, id: GLuint, take_ownership: bool) -> Self {
        Self {
            object: GlObject::wrap(ctx, id, take_ownership),
            layout: VertexLayout::new(),
        }
    }

    pub fn create_shared(ctx: &GlContext) -> Shared<Self> {
        Shared::new(Self::create(ctx))
    }

    pub fn id(&self) -> GLuint {
        self.object.id()
    }

    pub fn is_owned(&self) -> bool {
        self.object.is_owned()
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Attach `buffer` with tightly packed `(components, name)` attributes.
    pub fn vertex_buffer<B, S>(&mut self, buffer: &B, attributes: &[(usize, S)]) -> BufferAttachment
    where
        B: BufferSource + ?Sized,
        S: AsRef<str>,
    {
        let attachment = self.layout.attach_packed(attributes);
        self.apply(buffer.buffer_id(), &attachment);
        attachment
    }

    /// Attach `buffer` with explicit attribute offsets, vertex `stride` and
    /// starting byte `offset` into the buffer.
    pub fn vertex_buffer_with_layout<B>(
        &mut self,
        buffer: &B,
        attributes: &[VertexAttribute],
        stride: usize,
        offset: usize,
    ) -> BufferAttachment
    where
        B: BufferSource + ?Sized,
    {
        let attachment = self.layout.attach_explicit(attributes, stride, offset);
        self.apply(buffer.buffer_id(), &attachment);
        attachment
    }

    pub fn bind(&self) {
        self.object.gl().bind_vertex_array(self.id());
    }

    /// Bind this array and tell `shader` which slot each named attribute
    /// lives in.
    pub fn bind_with(&self, shader: &Shader) {
        self.bind();
        for (name, slot) in self.layout.attributes() {
            shader.bind_attrib_location(name, slot);
        }
    }

    fn apply(&self, buffer: GLuint, attachment: &BufferAttachment) {
        let gl = self.object.gl();
        let vao = self.id();

        for attr in &attachment.attributes {
            gl.vertex_array_attrib_binding(vao, attr.slot, attachment.binding);
            gl.vertex_array_attrib_format(
                vao,
                attr.slot,
                attr.components as GLint,
                attr.offset as GLuint,
            );
            gl.enable_vertex_array_attrib(vao, attr.slot);
        }

        trace!(
            vao,
            buffer,
            binding = attachment.binding,
            stride = attachment.stride,
            "attach vertex buffer"
        );
        gl.vertex_array_vertex_buffer(
            vao,
            attachment.binding,
            buffer,
            attachment.offset as isize,
            attachment.stride as GLsizei,
        );
    }
}
