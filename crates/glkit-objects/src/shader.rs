//! Shader programs: compile, link and upload uniforms.
//!
//! Failure to compile or link is not an `Err`. The driver's info log is
//! reported through `tracing::error!` and the returned [`Shader`] carries the
//! invalid name `0`, which callers check with [`GlObject::is_valid`].

use std::path::Path;

use glkit_core::types::{GLenum, GLint, GLuint};
use glkit_core::{GlContext, Uniform};
use tracing::{debug, error, trace};

use crate::handle::{GlObject, ProgramKind, Shared};

/// A linked shader program.
pub type Shader = GlObject<ProgramKind>;

/// Pipeline stage a source is compiled for.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex = gl::VERTEX_SHADER,
    Fragment = gl::FRAGMENT_SHADER,
    Geometry = gl::GEOMETRY_SHADER,
    TessControl = gl::TESS_CONTROL_SHADER,
    TessEval = gl::TESS_EVALUATION_SHADER,
    Compute = gl::COMPUTE_SHADER,
}

impl ShaderStage {
    pub fn as_gl(self) -> GLenum {
        self as GLenum
    }
}

/// GLSL text for one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub source: String,
}

impl ShaderSource {
    pub fn new(stage: ShaderStage, source: impl Into<String>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }
}

/// Compile one stage, returning its name or `None` after logging the driver
/// log. A failed stage is deleted before returning.
fn compile_stage(ctx: &GlContext, source: &ShaderSource) -> Option<GLuint> {
    let shader = ctx.create_shader(source.stage.as_gl());
    ctx.shader_source(shader, &source.source);
    ctx.compile_shader(shader);

    if !ctx.shader_compiled(shader) {
        let log = ctx.shader_info_log(shader);
        error!(stage = ?source.stage, "failed to compile shader: {}", log.trim_end());
        ctx.delete_shader(shader);
        return None;
    }

    trace!(stage = ?source.stage, shader, "compiled stage");
    Some(shader)
}

/// Build a program from `sources`, returning `0` on any failure. Stage
/// objects and the program are always cleaned up on the failure path.
fn build_program(ctx: &GlContext, sources: &[ShaderSource]) -> GLuint {
    let program = ctx.create_program();
    let mut stages = Vec::with_capacity(sources.len());

    let delete_stages = |stages: &[GLuint]| {
        for &stage in stages {
            ctx.delete_shader(stage);
        }
    };

    for source in sources {
        let Some(stage) = compile_stage(ctx, source) else {
            error!("shader stage failed to compile; not linking program {program}");
            delete_stages(&stages);
            ctx.delete_program(program);
            return 0;
        };
        ctx.attach_shader(program, stage);
        stages.push(stage);
    }

    ctx.link_program(program);
    delete_stages(&stages);

    if !ctx.program_linked(program) {
        let log = ctx.program_info_log(program);
        error!("failed to link shader program: {}", log.trim_end());
        ctx.delete_program(program);
        return 0;
    }

    program
}

impl GlObject<ProgramKind> {
    /// Compile and link `sources` into an owning program.
    ///
    /// Stages are compiled in order; the first one that fails stops the build
    /// and the result is the invalid handle.
    pub fn create(ctx: &GlContext, sources: &[ShaderSource]) -> Self {
        let program = build_program(ctx, sources);
        if program != 0 {
            debug!(program, stages = sources.len(), "linked shader program");
        }
        Self::wrap(ctx, program, true)
    }

    pub fn create_shared(ctx: &GlContext, sources: &[ShaderSource]) -> Shared<Self> {
        Self::create(ctx, sources).into_shared()
    }

    /// Read each stage from disk, then [`Shader::create`].
    ///
    /// An unreadable file is logged and yields the invalid handle without
    /// touching the driver.
    pub fn load<P: AsRef<Path>>(ctx: &GlContext, files: &[(ShaderStage, P)]) -> Self {
        let mut sources = Vec::with_capacity(files.len());
        for (stage, path) in files {
            let path = path.as_ref();
            match std::fs::read_to_string(path) {
                Ok(source) => sources.push(ShaderSource::new(*stage, source)),
                Err(err) => {
                    error!(path = %path.display(), "failed to read shader source: {err}");
                    return Self::wrap(ctx, 0, true);
                }
            }
        }
        Self::create(ctx, &sources)
    }

    pub fn load_shared<P: AsRef<Path>>(
        ctx: &GlContext,
        files: &[(ShaderStage, P)],
    ) -> Shared<Self> {
        Self::load(ctx, files).into_shared()
    }

    /// Install this program for subsequent draws.
    pub fn bind(&self) {
        self.gl().use_program(self.id());
    }

    /// Location of uniform `name`, or `-1` when the program has no such
    /// active uniform.
    pub fn uniform_location(&self, name: &str) -> GLint {
        self.gl().uniform_location(self.id(), name)
    }

    /// Upload `value` to `location`. Location `-1` is ignored by the driver.
    pub fn set_uniform(&self, location: GLint, value: impl Into<Uniform>) {
        let value = value.into();
        trace!(program = self.id(), location, ?value, "set uniform");
        self.gl().program_uniform(self.id(), location, &value);
    }

    /// Look up `name` and upload `value` to it.
    pub fn set_uniform_by_name(&self, name: &str, value: impl Into<Uniform>) {
        let location = self.uniform_location(name);
        self.set_uniform(location, value);
    }

    /// Associate vertex attribute `name` with attribute slot `slot`.
    pub fn bind_attrib_location(&self, name: &str, slot: GLuint) {
        self.gl().bind_attrib_location(self.id(), slot, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glkit_core::testing::{GlCall, RecordingGl};

    const VERTEX: &str = "#version 460 core\nin vec3 posIn;\nvoid main() { gl_Position = vec4(posIn, 1.0); }";
    const FRAGMENT: &str = "#version 460 core\nout vec4 c;\nvoid main() { c = vec4(1.0); }";
    const BROKEN: &str = "#version 460 core\nvoid mian( {";

    fn pair(fragment: &str) -> Vec<ShaderSource> {
        vec![
            ShaderSource::new(ShaderStage::Vertex, VERTEX),
            ShaderSource::new(ShaderStage::Fragment, fragment),
        ]
    }

    #[test]
    fn valid_pair_links_and_cleans_up_stages() {
        let gl = RecordingGl::new();
        let shader = Shader::create(&gl.context(), &pair(FRAGMENT));

        assert!(shader.is_valid());
        assert!(shader.is_owned());
        assert_eq!(gl.count(|c| matches!(c, GlCall::LinkProgram(_))), 1);
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteShader(_))), 2);
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteProgram(_))), 0);
    }

    #[test]
    fn compile_failure_returns_sentinel_and_deletes_everything() {
        let gl = RecordingGl::new();
        let shader = Shader::create(&gl.context(), &pair(BROKEN));

        assert_eq!(shader.id(), 0);
        assert!(shader.is_owned());
        assert_eq!(gl.count(|c| matches!(c, GlCall::LinkProgram(_))), 0);
        // the vertex stage and the failed fragment stage
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteShader(_))), 2);
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteProgram(_))), 1);

        gl.clear_calls();
        drop(shader);
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn first_failing_stage_stops_compilation() {
        let gl = RecordingGl::new();
        let sources = vec![
            ShaderSource::new(ShaderStage::Vertex, BROKEN),
            ShaderSource::new(ShaderStage::Fragment, FRAGMENT),
        ];
        let shader = Shader::create(&gl.context(), &sources);

        assert!(!shader.is_valid());
        assert_eq!(gl.count(|c| matches!(c, GlCall::CompileShader(_))), 1);
    }

    #[test]
    fn link_failure_returns_sentinel() {
        let gl = RecordingGl::new();
        gl.fail_next_link();
        let shader = Shader::create(&gl.context(), &pair(FRAGMENT));

        assert_eq!(shader.id(), 0);
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteShader(_))), 2);
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteProgram(_))), 1);
    }

    #[test]
    fn missing_file_yields_sentinel_without_driver_calls() {
        let gl = RecordingGl::new();
        let shader = Shader::load(
            &gl.context(),
            &[(ShaderStage::Vertex, "/nonexistent/glkit/shader.vert")],
        );
        assert!(!shader.is_valid());
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn load_reads_sources_from_disk() {
        let dir = std::env::temp_dir().join(format!("glkit-shader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let vert = dir.join("tri.vert");
        let frag = dir.join("tri.frag");
        std::fs::write(&vert, VERTEX).unwrap();
        std::fs::write(&frag, FRAGMENT).unwrap();

        let gl = RecordingGl::new();
        let shader = Shader::load(
            &gl.context(),
            &[(ShaderStage::Vertex, &vert), (ShaderStage::Fragment, &frag)],
        );
        assert!(shader.is_valid());
        assert!(gl.calls().contains(&GlCall::ShaderSource {
            shader: 2,
            source: VERTEX.to_owned(),
        }));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn uniform_by_name_resolves_location_then_uploads() {
        let gl = RecordingGl::new();
        let shader = Shader::create(&gl.context(), &pair(FRAGMENT));
        gl.clear_calls();

        shader.set_uniform_by_name("uTransform", Uniform::IDENTITY_MAT4);
        let location = shader.uniform_location("uTransform");

        assert_eq!(
            gl.calls()[1],
            GlCall::ProgramUniform {
                program: shader.id(),
                location,
                value: Uniform::IDENTITY_MAT4,
            }
        );
    }

    #[test]
    fn scalar_and_vector_uniforms_keep_their_type() {
        let gl = RecordingGl::new();
        let shader = Shader::create(&gl.context(), &pair(FRAGMENT));
        gl.clear_calls();

        shader.set_uniform(3, 2u32);
        shader.set_uniform(4, [0.5f64, 1.0]);

        let values: Vec<Uniform> = gl
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                GlCall::ProgramUniform { value, .. } => Some(value),
                _ => None,
            })
            .collect();
        assert_eq!(values, vec![Uniform::U32(2), Uniform::DVec2([0.5, 1.0])]);
    }

    #[test]
    fn bind_forwards_program_and_attribute_locations() {
        let gl = RecordingGl::new();
        let shader = Shader::create(&gl.context(), &pair(FRAGMENT));
        gl.clear_calls();

        shader.bind();
        shader.bind_attrib_location("posIn", 0);

        assert_eq!(
            gl.calls(),
            vec![
                GlCall::UseProgram(shader.id()),
                GlCall::BindAttribLocation {
                    program: shader.id(),
                    index: 0,
                    name: "posIn".to_owned(),
                },
            ]
        );
    }
}
