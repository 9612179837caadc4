//! Byte views over plain numeric data for buffer uploads.

/// Marker for types that can be uploaded to a GPU buffer as raw bytes.
///
/// # Safety
///
/// Only implement on `Copy` types with no padding, pointers or references:
/// primitive numbers, fixed-size arrays of them, and `#[repr(C)]` structs
/// built only from those.
///
/// # Example
///
/// ```rust,ignore
/// #[repr(C)]
/// #[derive(Clone, Copy)]
/// struct Vertex {
///     pos: [f32; 3],
///     uv: [f32; 2],
/// }
///
/// unsafe impl AsBytes for Vertex {}
///
/// let vbo = Buffer::load_slice(&ctx, &vertices, BufferUsage::StaticDraw);
/// ```
pub unsafe trait AsBytes: Copy {}

unsafe impl AsBytes for u8 {}
unsafe impl AsBytes for i8 {}
unsafe impl AsBytes for u16 {}
unsafe impl AsBytes for i16 {}
unsafe impl AsBytes for u32 {}
unsafe impl AsBytes for i32 {}
unsafe impl AsBytes for f32 {}
unsafe impl AsBytes for f64 {}
unsafe impl<T: AsBytes, const N: usize> AsBytes for [T; N] {}

/// View a slice of [`AsBytes`] values as bytes. The result has length
/// `data.len() * size_of::<T>()`.
pub fn slice_as_bytes<T: AsBytes>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr().cast(), std::mem::size_of_val(data)) }
}
