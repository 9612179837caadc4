//! Clear and reset the state of the OpenGL context.

use gl::types::{GLint, GLsizei};
use glkit_core::GlContext;

/// Clear the colour, depth and stencil buffers.
pub fn clear(ctx: &GlContext) {
    ctx.clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT | gl::STENCIL_BUFFER_BIT);
}

pub fn set_clear_color(ctx: &GlContext, rgba: [f32; 4]) {
    ctx.clear_color(rgba);
}

/// [`set_clear_color`] with an opaque alpha.
pub fn set_clear_color_rgb(ctx: &GlContext, [r, g, b]: [f32; 3]) {
    ctx.clear_color([r, g, b, 1.0]);
}

/// Draw `count` vertices from the bound vertex array as triangles.
pub fn draw_triangles(ctx: &GlContext, first: usize, count: usize) {
    ctx.draw_arrays(gl::TRIANGLES, first as GLint, count as GLsizei);
}

/// Unbind the program, array buffer and vertex array.
pub fn reset_bindings(ctx: &GlContext) {
    ctx.use_program(0);
    ctx.bind_buffer(gl::ARRAY_BUFFER, 0);
    ctx.bind_vertex_array(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glkit_core::testing::{GlCall, RecordingGl};

    #[test]
    fn clear_covers_all_three_buffers() {
        let gl = RecordingGl::new();
        clear(&gl.context());
        assert_eq!(
            gl.calls(),
            vec![GlCall::Clear(
                gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT | gl::STENCIL_BUFFER_BIT
            )]
        );
    }

    #[test]
    fn rgb_clear_colour_is_opaque() {
        let gl = RecordingGl::new();
        set_clear_color_rgb(&gl.context(), [1.0, 0.0, 0.0]);
        assert_eq!(gl.calls(), vec![GlCall::ClearColor([1.0, 0.0, 0.0, 1.0])]);
    }

    #[test]
    fn reset_unbinds_everything() {
        let gl = RecordingGl::new();
        reset_bindings(&gl.context());
        assert_eq!(
            gl.calls(),
            vec![
                GlCall::UseProgram(0),
                GlCall::BindBuffer {
                    target: gl::ARRAY_BUFFER,
                    buffer: 0
                },
                GlCall::BindVertexArray(0),
            ]
        );
    }

    #[test]
    fn draw_forwards_triangle_mode() {
        let gl = RecordingGl::new();
        draw_triangles(&gl.context(), 0, 3);
        assert_eq!(
            gl.calls(),
            vec![GlCall::DrawArrays {
                mode: gl::TRIANGLES,
                first: 0,
                count: 3
            }]
        );
    }
}
