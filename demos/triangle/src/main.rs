//! Draws one coloured triangle until the window is closed or Escape is
//! pressed. Set `RUST_LOG=debug` to see object creation and release.

use anyhow::{ensure, Context};
use glkit_core::Uniform;
use glkit_objects::{state, Buffer, BufferUsage, Shader, ShaderSource, ShaderStage, VertexArray};
use glkit_window::{GlfwPlatform, Key, Lifecycle, WindowMode, WindowProperties};
use tracing::info;

const VERTEX_SHADER: &str = "#version 460 core
in vec3 posIn;
in vec2 uvIn;
in vec4 colorIn;
out vec2 fUV;
out vec4 fColor;
uniform mat4 uTransform;
void main() {
    gl_Position = uTransform * vec4(posIn, 1.0);
    fUV = uvIn;
    fColor = colorIn;
}
";

const FRAGMENT_SHADER: &str = "#version 460 core
in vec2 fUV;
in vec4 fColor;
out vec4 colorOut;
void main() {
    colorOut = fColor;
}
";

/// Position (3), uv (2) and colour (4) per vertex.
#[rustfmt::skip]
const VERTICES: [f32; 27] = [
    0.0, 0.0, 0.0,  0.0, 0.0,  1.0, 0.0, 0.0, 1.0,
    1.0, 0.0, 0.0,  1.0, 0.0,  0.0, 1.0, 0.0, 1.0,
    0.0, 1.0, 0.0,  0.0, 1.0,  0.0, 0.0, 1.0, 1.0,
];

fn main() -> anyhow::Result<()> {
    glkit_core::logging::init();

    let mut lifecycle = Lifecycle::<GlfwPlatform>::new();
    let system = lifecycle.init().context("failed to initialise GLFW")?;

    let properties = WindowProperties {
        title: "glkit triangle".to_owned(),
        mode: WindowMode::windowed(800, 600),
        ..WindowProperties::default()
    };
    let mut window = system
        .create_window(&properties)
        .context("failed to create window")?;
    let gl = window.gl().clone();

    let shader = Shader::create(
        &gl,
        &[
            ShaderSource::new(ShaderStage::Vertex, VERTEX_SHADER),
            ShaderSource::new(ShaderStage::Fragment, FRAGMENT_SHADER),
        ],
    );
    ensure!(shader.is_valid(), "triangle shader failed to build");

    let vbo = Buffer::load_slice(&gl, &VERTICES, BufferUsage::StaticDraw);
    let mut vao = VertexArray::create(&gl);
    vao.vertex_buffer(&vbo, &[(3, "posIn"), (2, "uvIn"), (4, "colorIn")]);

    info!("entering render loop");
    while window.is_open() {
        system.poll_events();
        if window.is_key_down(Key::Escape) {
            window.request_close();
        }

        state::set_clear_color_rgb(&gl, [1.0, 0.0, 0.0]);
        state::clear(&gl);

        shader.bind();
        shader.set_uniform_by_name("uTransform", Uniform::IDENTITY_MAT4);

        vao.bind_with(&shader);
        state::draw_triangles(&gl, 0, 3);

        window.update();
    }

    drop(vao);
    drop(vbo);
    drop(shader);
    drop(window);
    lifecycle.terminate();
    Ok(())
}
