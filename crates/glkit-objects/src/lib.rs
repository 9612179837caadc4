//! RAII handles for OpenGL buffers, shader programs and vertex arrays.
//!
//! Every handle keeps the [`GlContext`](glkit_core::GlContext) it was created
//! on and forwards its calls through that driver. Handles are `!Send`; create
//! and use them on the thread that owns the current context.
//!
//! # Overview
//!
//! - [`GlObject`] is the ownership wrapper shared by every object kind.
//! - [`Buffer`] holds vertex or index data.
//! - [`Shader`] is a linked program, with uniform upload through
//!   [`Uniform`](glkit_core::Uniform).
//! - [`VertexArray`] connects buffers to named attribute slots, using the
//!   bookkeeping in [`VertexLayout`].
//! - [`state`] has the clear, draw and reset helpers.

pub mod buffer;
pub mod bytes;
pub mod handle;
pub mod layout;
pub mod shader;
pub mod state;
pub mod vertex_array;

pub use buffer::{Buffer, BufferSource, BufferTarget, BufferUsage};
pub use bytes::AsBytes;
pub use handle::{GlObject, ObjectKind, Shared};
pub use layout::{AttributeSlot, BufferAttachment, VertexAttribute, VertexLayout};
pub use shader::{Shader, ShaderSource, ShaderStage};
pub use vertex_array::VertexArray;
