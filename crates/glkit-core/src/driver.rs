//! The [`GlDriver`] trait: the single seam between glkit and OpenGL.

use std::rc::Rc;

use gl::types::{GLbitfield, GLenum, GLint, GLsizei, GLuint};

use crate::uniform::Uniform;

/// Shared handle to the driver a GPU object was created on.
///
/// `Rc` keeps every handle `!Send`: OpenGL state belongs to the thread that
/// owns the current context, and objects must not leave it.
pub type GlContext = Rc<dyn GlDriver>;

/// Common interface for issuing OpenGL calls.
///
/// The methods map one-to-one onto OpenGL 4.5 direct-state-access entry
/// points. Implementations exist for the real driver ([`crate::NativeGl`])
/// and, in tests, for a recorder that only logs the calls.
///
/// Object names are plain `GLuint`s; `0` is never a valid object and is used
/// as the "invalid" sentinel by the handle layer.
pub trait GlDriver {
    // -- Buffers ------------------------------------------------------------

    /// Create a new buffer object name.
    fn create_buffer(&self) -> GLuint;

    /// Delete a buffer object.
    fn delete_buffer(&self, buffer: GLuint);

    /// Allocate `size` bytes of storage, optionally initialised from `data`.
    ///
    /// When `data` is `Some`, its length equals `size`.
    fn buffer_data(&self, buffer: GLuint, size: usize, data: Option<&[u8]>, usage: GLenum);

    /// Bind `buffer` to `target` on the current context.
    fn bind_buffer(&self, target: GLenum, buffer: GLuint);

    // -- Shader stages ------------------------------------------------------

    /// Create a shader object for the given stage.
    fn create_shader(&self, stage: GLenum) -> GLuint;

    /// Replace the source of a shader object.
    fn shader_source(&self, shader: GLuint, source: &str);

    /// Compile a shader object.
    fn compile_shader(&self, shader: GLuint);

    /// Whether the last compilation of `shader` succeeded.
    fn shader_compiled(&self, shader: GLuint) -> bool;

    /// The driver's info log for `shader`.
    fn shader_info_log(&self, shader: GLuint) -> String;

    /// Delete a shader object.
    fn delete_shader(&self, shader: GLuint);

    // -- Programs -----------------------------------------------------------

    /// Create a program object.
    fn create_program(&self) -> GLuint;

    /// Attach a compiled stage to a program.
    fn attach_shader(&self, program: GLuint, shader: GLuint);

    /// Link a program.
    fn link_program(&self, program: GLuint);

    /// Whether the last link of `program` succeeded.
    fn program_linked(&self, program: GLuint) -> bool;

    /// The driver's info log for `program`.
    fn program_info_log(&self, program: GLuint) -> String;

    /// Delete a program object.
    fn delete_program(&self, program: GLuint);

    /// Install `program` as part of the current rendering state.
    fn use_program(&self, program: GLuint);

    /// Location of a named uniform, `-1` if it does not exist.
    fn uniform_location(&self, program: GLuint, name: &str) -> GLint;

    /// Upload a uniform value to `program` without binding it.
    fn program_uniform(&self, program: GLuint, location: GLint, value: &Uniform);

    /// Associate a vertex attribute slot with a named shader input.
    fn bind_attrib_location(&self, program: GLuint, index: GLuint, name: &str);

    // -- Vertex arrays ------------------------------------------------------

    /// Create a vertex array object name.
    fn create_vertex_array(&self) -> GLuint;

    /// Delete a vertex array object.
    fn delete_vertex_array(&self, vao: GLuint);

    /// Bind a vertex array object.
    fn bind_vertex_array(&self, vao: GLuint);

    /// Route attribute slot `attribute` to buffer binding slot `binding`.
    fn vertex_array_attrib_binding(&self, vao: GLuint, attribute: GLuint, binding: GLuint);

    /// Describe attribute `attribute` as `components` 32-bit floats starting
    /// `relative_offset` bytes into each vertex.
    fn vertex_array_attrib_format(
        &self,
        vao: GLuint,
        attribute: GLuint,
        components: GLint,
        relative_offset: GLuint,
    );

    /// Enable attribute slot `attribute`.
    fn enable_vertex_array_attrib(&self, vao: GLuint, attribute: GLuint);

    /// Attach `buffer` to binding slot `binding`.
    fn vertex_array_vertex_buffer(
        &self,
        vao: GLuint,
        binding: GLuint,
        buffer: GLuint,
        offset: isize,
        stride: GLsizei,
    );

    // -- Framebuffer --------------------------------------------------------

    /// Clear the buffers selected by `mask`.
    fn clear(&self, mask: GLbitfield);

    /// Set the colour used by [`GlDriver::clear`].
    fn clear_color(&self, rgba: [f32; 4]);

    /// Draw `count` vertices from the bound vertex array.
    fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei);
}
