//! [`NativeGl`]: the [`GlDriver`] that talks to the real OpenGL driver.
//!
//! All calls are unsafe FFI into the `gl` crate's loaded function pointers.
//! The only way to construct a `NativeGl` is through
//! [`crate::loader::load_with`], which guarantees the pointers are loaded.

use std::ffi::CString;

use gl::types::{GLbitfield, GLchar, GLenum, GLint, GLsizei, GLsizeiptr, GLuint};
use tracing::warn;

use crate::driver::GlDriver;
use crate::uniform::Uniform;

/// Forwards every [`GlDriver`] call to the OpenGL context current on this
/// thread.
#[derive(Debug)]
pub struct NativeGl {
    _private: (),
}

impl NativeGl {
    /// Only callable once entry points are loaded.
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

/// Convert a Rust string into a NUL-terminated name. Interior NULs cannot be
/// valid GLSL identifiers, so they are cut off with a warning.
fn c_name(name: &str) -> CString {
    match CString::new(name) {
        Ok(c) => c,
        Err(err) => {
            warn!(name, "identifier contains an interior NUL; truncating");
            let end = err.nul_position();
            CString::new(&name[..end]).unwrap_or_default()
        }
    }
}

/// Read an info log of `len` bytes through `fetch`.
fn read_info_log(len: GLint, fetch: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
    if len <= 0 {
        return String::new();
    }
    let mut buf = vec![0u8; len as usize];
    let mut written: GLsizei = 0;
    fetch(len, &mut written, buf.as_mut_ptr().cast());
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).trim_end().to_owned()
}

impl GlDriver for NativeGl {
    fn create_buffer(&self) -> GLuint {
        let mut buffer = 0;
        unsafe {
            gl::CreateBuffers(1, &mut buffer);
        }
        buffer
    }

    fn delete_buffer(&self, buffer: GLuint) {
        unsafe {
            gl::DeleteBuffers(1, &buffer);
        }
    }

    fn buffer_data(&self, buffer: GLuint, size: usize, data: Option<&[u8]>, usage: GLenum) {
        let ptr = data.map_or(std::ptr::null(), |d| d.as_ptr().cast());
        unsafe {
            gl::NamedBufferData(buffer, size as GLsizeiptr, ptr, usage);
        }
    }

    fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        unsafe {
            gl::BindBuffer(target, buffer);
        }
    }

    fn create_shader(&self, stage: GLenum) -> GLuint {
        unsafe { gl::CreateShader(stage) }
    }

    fn shader_source(&self, shader: GLuint, source: &str) {
        let ptr = source.as_ptr() as *const GLchar;
        let len = source.len() as GLint;
        unsafe {
            gl::ShaderSource(shader, 1, &ptr, &len);
        }
    }

    fn compile_shader(&self, shader: GLuint) {
        unsafe {
            gl::CompileShader(shader);
        }
    }

    fn shader_compiled(&self, shader: GLuint) -> bool {
        let mut status = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
        }
        status == gl::TRUE as GLint
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut len = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        }
        read_info_log(len, |cap, written, buf| unsafe {
            gl::GetShaderInfoLog(shader, cap, written, buf);
        })
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe {
            gl::DeleteShader(shader);
        }
    }

    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe {
            gl::AttachShader(program, shader);
        }
    }

    fn link_program(&self, program: GLuint) {
        unsafe {
            gl::LinkProgram(program);
        }
    }

    fn program_linked(&self, program: GLuint) -> bool {
        let mut status = 0;
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
        }
        status == gl::TRUE as GLint
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut len = 0;
        unsafe {
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        }
        read_info_log(len, |cap, written, buf| unsafe {
            gl::GetProgramInfoLog(program, cap, written, buf);
        })
    }

    fn delete_program(&self, program: GLuint) {
        unsafe {
            gl::DeleteProgram(program);
        }
    }

    fn use_program(&self, program: GLuint) {
        unsafe {
            gl::UseProgram(program);
        }
    }

    fn uniform_location(&self, program: GLuint, name: &str) -> GLint {
        let name = c_name(name);
        unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
    }

    fn program_uniform(&self, program: GLuint, location: GLint, value: &Uniform) {
        let (p, l) = (program, location);
        unsafe {
            match *value {
                Uniform::F32(x) => gl::ProgramUniform1f(p, l, x),
                Uniform::Vec2([x, y]) => gl::ProgramUniform2f(p, l, x, y),
                Uniform::Vec3([x, y, z]) => gl::ProgramUniform3f(p, l, x, y, z),
                Uniform::Vec4([x, y, z, w]) => gl::ProgramUniform4f(p, l, x, y, z, w),

                Uniform::I32(x) => gl::ProgramUniform1i(p, l, x),
                Uniform::IVec2([x, y]) => gl::ProgramUniform2i(p, l, x, y),
                Uniform::IVec3([x, y, z]) => gl::ProgramUniform3i(p, l, x, y, z),
                Uniform::IVec4([x, y, z, w]) => gl::ProgramUniform4i(p, l, x, y, z, w),

                Uniform::U32(x) => gl::ProgramUniform1ui(p, l, x),
                Uniform::UVec2([x, y]) => gl::ProgramUniform2ui(p, l, x, y),
                Uniform::UVec3([x, y, z]) => gl::ProgramUniform3ui(p, l, x, y, z),
                Uniform::UVec4([x, y, z, w]) => gl::ProgramUniform4ui(p, l, x, y, z, w),

                Uniform::F64(x) => gl::ProgramUniform1d(p, l, x),
                Uniform::DVec2([x, y]) => gl::ProgramUniform2d(p, l, x, y),
                Uniform::DVec3([x, y, z]) => gl::ProgramUniform3d(p, l, x, y, z),
                Uniform::DVec4([x, y, z, w]) => gl::ProgramUniform4d(p, l, x, y, z, w),

                Uniform::Mat2(ref m) => gl::ProgramUniformMatrix2fv(p, l, 1, gl::FALSE, m.as_ptr()),
                Uniform::Mat2x3(ref m) => {
                    gl::ProgramUniformMatrix2x3fv(p, l, 1, gl::FALSE, m.as_ptr())
                }
                Uniform::Mat2x4(ref m) => {
                    gl::ProgramUniformMatrix2x4fv(p, l, 1, gl::FALSE, m.as_ptr())
                }
                Uniform::Mat3x2(ref m) => {
                    gl::ProgramUniformMatrix3x2fv(p, l, 1, gl::FALSE, m.as_ptr())
                }
                Uniform::Mat3(ref m) => gl::ProgramUniformMatrix3fv(p, l, 1, gl::FALSE, m.as_ptr()),
                Uniform::Mat3x4(ref m) => {
                    gl::ProgramUniformMatrix3x4fv(p, l, 1, gl::FALSE, m.as_ptr())
                }
                Uniform::Mat4x2(ref m) => {
                    gl::ProgramUniformMatrix4x2fv(p, l, 1, gl::FALSE, m.as_ptr())
                }
                Uniform::Mat4x3(ref m) => {
                    gl::ProgramUniformMatrix4x3fv(p, l, 1, gl::FALSE, m.as_ptr())
                }
                Uniform::Mat4(ref m) => gl::ProgramUniformMatrix4fv(p, l, 1, gl::FALSE, m.as_ptr()),

                Uniform::DMat2(ref m) => {
                    gl::ProgramUniformMatrix2dv(p, l, 1, gl::FALSE, m.as_ptr())
                }
                Uniform::DMat2x3(ref m) => {
                    gl::ProgramUniformMatrix2x3dv(p, l, 1, gl::FALSE, m.as_ptr())
                }
                Uniform::DMat2x4(ref m) => {
                    gl::ProgramUniformMatrix2x4dv(p, l, 1, gl::FALSE, m.as_ptr())
                }
                Uniform::DMat3x2(ref m) => {
                    gl::ProgramUniformMatrix3x2dv(p, l, 1, gl::FALSE, m.as_ptr())
                }
                Uniform::DMat3(ref m) => {
                    gl::ProgramUniformMatrix3dv(p, l, 1, gl::FALSE, m.as_ptr())
                }
                Uniform::DMat3x4(ref m) => {
                    gl::ProgramUniformMatrix3x4dv(p, l, 1, gl::FALSE, m.as_ptr())
                }
                Uniform::DMat4x2(ref m) => {
                    gl::ProgramUniformMatrix4x2dv(p, l, 1, gl::FALSE, m.as_ptr())
                }
                Uniform::DMat4x3(ref m) => {
                    gl::ProgramUniformMatrix4x3dv(p, l, 1, gl::FALSE, m.as_ptr())
                }
                Uniform::DMat4(ref m) => {
                    gl::ProgramUniformMatrix4dv(p, l, 1, gl::FALSE, m.as_ptr())
                }
            }
        }
    }

    fn bind_attrib_location(&self, program: GLuint, index: GLuint, name: &str) {
        let name = c_name(name);
        unsafe {
            gl::BindAttribLocation(program, index, name.as_ptr());
        }
    }

    fn create_vertex_array(&self) -> GLuint {
        let mut vao = 0;
        unsafe {
            gl::CreateVertexArrays(1, &mut vao);
        }
        vao
    }

    fn delete_vertex_array(&self, vao: GLuint) {
        unsafe {
            gl::DeleteVertexArrays(1, &vao);
        }
    }

    fn bind_vertex_array(&self, vao: GLuint) {
        unsafe {
            gl::BindVertexArray(vao);
        }
    }

    fn vertex_array_attrib_binding(&self, vao: GLuint, attribute: GLuint, binding: GLuint) {
        unsafe {
            gl::VertexArrayAttribBinding(vao, attribute, binding);
        }
    }

    fn vertex_array_attrib_format(
        &self,
        vao: GLuint,
        attribute: GLuint,
        components: GLint,
        relative_offset: GLuint,
    ) {
        unsafe {
            gl::VertexArrayAttribFormat(
                vao,
                attribute,
                components,
                gl::FLOAT,
                gl::FALSE,
                relative_offset,
            );
        }
    }

    fn enable_vertex_array_attrib(&self, vao: GLuint, attribute: GLuint) {
        unsafe {
            gl::EnableVertexArrayAttrib(vao, attribute);
        }
    }

    fn vertex_array_vertex_buffer(
        &self,
        vao: GLuint,
        binding: GLuint,
        buffer: GLuint,
        offset: isize,
        stride: GLsizei,
    ) {
        unsafe {
            gl::VertexArrayVertexBuffer(vao, binding, buffer, offset, stride);
        }
    }

    fn clear(&self, mask: GLbitfield) {
        unsafe {
            gl::Clear(mask);
        }
    }

    fn clear_color(&self, [r, g, b, a]: [f32; 4]) {
        unsafe {
            gl::ClearColor(r, g, b, a);
        }
    }

    fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        unsafe {
            gl::DrawArrays(mode, first, count);
        }
    }
}
