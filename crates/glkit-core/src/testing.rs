//! [`RecordingGl`]: a driver that records calls instead of issuing them.
//!
//! Object names are handed out from a counter starting at 1, so `0` keeps its
//! meaning as the invalid sentinel. Shader compilation is simulated: a stage
//! compiles when its source contains `void main`, otherwise the info log reads
//! like a driver syntax error. Linking can be forced to fail with
//! [`RecordingGl::fail_next_link`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gl::types::{GLbitfield, GLenum, GLint, GLsizei, GLuint};

use crate::driver::{GlContext, GlDriver};
use crate::uniform::Uniform;

/// One recorded driver call.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateBuffer(GLuint),
    DeleteBuffer(GLuint),
    BufferData {
        buffer: GLuint,
        size: usize,
        data: Option<Vec<u8>>,
        usage: GLenum,
    },
    BindBuffer {
        target: GLenum,
        buffer: GLuint,
    },
    CreateShader {
        stage: GLenum,
        shader: GLuint,
    },
    ShaderSource {
        shader: GLuint,
        source: String,
    },
    CompileShader(GLuint),
    DeleteShader(GLuint),
    CreateProgram(GLuint),
    AttachShader {
        program: GLuint,
        shader: GLuint,
    },
    LinkProgram(GLuint),
    DeleteProgram(GLuint),
    UseProgram(GLuint),
    UniformLocation {
        program: GLuint,
        name: String,
    },
    ProgramUniform {
        program: GLuint,
        location: GLint,
        value: Uniform,
    },
    BindAttribLocation {
        program: GLuint,
        index: GLuint,
        name: String,
    },
    CreateVertexArray(GLuint),
    DeleteVertexArray(GLuint),
    BindVertexArray(GLuint),
    AttribBinding {
        vao: GLuint,
        attribute: GLuint,
        binding: GLuint,
    },
    AttribFormat {
        vao: GLuint,
        attribute: GLuint,
        components: GLint,
        relative_offset: GLuint,
    },
    EnableAttrib {
        vao: GLuint,
        attribute: GLuint,
    },
    VertexBuffer {
        vao: GLuint,
        binding: GLuint,
        buffer: GLuint,
        offset: isize,
        stride: GLsizei,
    },
    Clear(GLbitfield),
    ClearColor([f32; 4]),
    DrawArrays {
        mode: GLenum,
        first: GLint,
        count: GLsizei,
    },
}

/// Call-recording [`GlDriver`] for tests.
#[derive(Debug, Default)]
pub struct RecordingGl {
    next_name: Cell<GLuint>,
    calls: RefCell<Vec<GlCall>>,
    sources: RefCell<HashMap<GLuint, String>>,
    fail_link: Cell<bool>,
    linked: RefCell<HashMap<GLuint, bool>>,
    uniforms: RefCell<HashMap<(GLuint, String), GLint>>,
}

impl RecordingGl {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Coerce a shared recorder into the context type handles expect.
    pub fn context(self: &Rc<Self>) -> GlContext {
        self.clone()
    }

    /// Every call recorded so far, in order.
    pub fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&GlCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    /// Forget all recorded calls; issued names keep counting up.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Make the next `link_program` report failure.
    pub fn fail_next_link(&self) {
        self.fail_link.set(true);
    }

    fn record(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }

    fn issue_name(&self) -> GLuint {
        let name = self.next_name.get() + 1;
        self.next_name.set(name);
        name
    }

    fn compiles(source: &str) -> bool {
        source.contains("void main")
    }
}

impl GlDriver for RecordingGl {
    fn create_buffer(&self) -> GLuint {
        let buffer = self.issue_name();
        self.record(GlCall::CreateBuffer(buffer));
        buffer
    }

    fn delete_buffer(&self, buffer: GLuint) {
        self.record(GlCall::DeleteBuffer(buffer));
    }

    fn buffer_data(&self, buffer: GLuint, size: usize, data: Option<&[u8]>, usage: GLenum) {
        self.record(GlCall::BufferData {
            buffer,
            size,
            data: data.map(<[u8]>::to_vec),
            usage,
        });
    }

    fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        self.record(GlCall::BindBuffer { target, buffer });
    }

    fn create_shader(&self, stage: GLenum) -> GLuint {
        let shader = self.issue_name();
        self.record(GlCall::CreateShader { stage, shader });
        shader
    }

    fn shader_source(&self, shader: GLuint, source: &str) {
        self.sources.borrow_mut().insert(shader, source.to_owned());
        self.record(GlCall::ShaderSource {
            shader,
            source: source.to_owned(),
        });
    }

    fn compile_shader(&self, shader: GLuint) {
        self.record(GlCall::CompileShader(shader));
    }

    fn shader_compiled(&self, shader: GLuint) -> bool {
        self.sources
            .borrow()
            .get(&shader)
            .is_some_and(|s| Self::compiles(s))
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        if self.shader_compiled(shader) {
            String::new()
        } else {
            format!("0:1(1): error: syntax error in shader {shader}")
        }
    }

    fn delete_shader(&self, shader: GLuint) {
        self.record(GlCall::DeleteShader(shader));
    }

    fn create_program(&self) -> GLuint {
        let program = self.issue_name();
        self.record(GlCall::CreateProgram(program));
        program
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        self.record(GlCall::AttachShader { program, shader });
    }

    fn link_program(&self, program: GLuint) {
        let ok = !self.fail_link.replace(false);
        self.linked.borrow_mut().insert(program, ok);
        self.record(GlCall::LinkProgram(program));
    }

    fn program_linked(&self, program: GLuint) -> bool {
        self.linked.borrow().get(&program).copied().unwrap_or(false)
    }

    fn program_info_log(&self, program: GLuint) -> String {
        if self.program_linked(program) {
            String::new()
        } else {
            "error: vertex shader output `fColor' not read by fragment shader".to_owned()
        }
    }

    fn delete_program(&self, program: GLuint) {
        self.record(GlCall::DeleteProgram(program));
    }

    fn use_program(&self, program: GLuint) {
        self.record(GlCall::UseProgram(program));
    }

    fn uniform_location(&self, program: GLuint, name: &str) -> GLint {
        self.record(GlCall::UniformLocation {
            program,
            name: name.to_owned(),
        });
        let mut uniforms = self.uniforms.borrow_mut();
        let next = uniforms.keys().filter(|(p, _)| *p == program).count() as GLint;
        *uniforms.entry((program, name.to_owned())).or_insert(next)
    }

    fn program_uniform(&self, program: GLuint, location: GLint, value: &Uniform) {
        self.record(GlCall::ProgramUniform {
            program,
            location,
            value: *value,
        });
    }

    fn bind_attrib_location(&self, program: GLuint, index: GLuint, name: &str) {
        self.record(GlCall::BindAttribLocation {
            program,
            index,
            name: name.to_owned(),
        });
    }

    fn create_vertex_array(&self) -> GLuint {
        let vao = self.issue_name();
        self.record(GlCall::CreateVertexArray(vao));
        vao
    }

    fn delete_vertex_array(&self, vao: GLuint) {
        self.record(GlCall::DeleteVertexArray(vao));
    }

    fn bind_vertex_array(&self, vao: GLuint) {
        self.record(GlCall::BindVertexArray(vao));
    }

    fn vertex_array_attrib_binding(&self, vao: GLuint, attribute: GLuint, binding: GLuint) {
        self.record(GlCall::AttribBinding {
            vao,
            attribute,
            binding,
        });
    }

    fn vertex_array_attrib_format(
        &self,
        vao: GLuint,
        attribute: GLuint,
        components: GLint,
        relative_offset: GLuint,
    ) {
        self.record(GlCall::AttribFormat {
            vao,
            attribute,
            components,
            relative_offset,
        });
    }

    fn enable_vertex_array_attrib(&self, vao: GLuint, attribute: GLuint) {
        self.record(GlCall::EnableAttrib { vao, attribute });
    }

    fn vertex_array_vertex_buffer(
        &self,
        vao: GLuint,
        binding: GLuint,
        buffer: GLuint,
        offset: isize,
        stride: GLsizei,
    ) {
        self.record(GlCall::VertexBuffer {
            vao,
            binding,
            buffer,
            offset,
            stride,
        });
    }

    fn clear(&self, mask: GLbitfield) {
        self.record(GlCall::Clear(mask));
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        self.record(GlCall::ClearColor(rgba));
    }

    fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        self.record(GlCall::DrawArrays { mode, first, count });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_start_at_one_and_increase() {
        let gl = RecordingGl::new();
        assert_eq!(gl.create_buffer(), 1);
        assert_eq!(gl.create_vertex_array(), 2);
        assert_eq!(gl.create_program(), 3);
    }

    #[test]
    fn compile_status_depends_on_source() {
        let gl = RecordingGl::new();
        let good = gl.create_shader(gl::VERTEX_SHADER);
        let bad = gl.create_shader(gl::VERTEX_SHADER);
        gl.shader_source(good, "#version 460 core\nvoid main() {}");
        gl.shader_source(bad, "#version 460 core\nvoid mian( {");
        assert!(gl.shader_compiled(good));
        assert!(!gl.shader_compiled(bad));
        assert!(gl.shader_info_log(bad).contains("syntax error"));
    }

    #[test]
    fn uniform_locations_are_stable_per_name() {
        let gl = RecordingGl::new();
        let a = gl.uniform_location(1, "uA");
        let b = gl.uniform_location(1, "uB");
        assert_ne!(a, b);
        assert_eq!(gl.uniform_location(1, "uA"), a);
    }

    #[test]
    fn forced_link_failure_applies_once() {
        let gl = RecordingGl::new();
        gl.fail_next_link();
        gl.link_program(5);
        gl.link_program(6);
        assert!(!gl.program_linked(5));
        assert!(gl.program_linked(6));
    }
}
