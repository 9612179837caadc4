//! Generic ownership wrapper for driver-managed GPU objects.
//!
//! [`GlObject<K>`] pairs a raw object name with an `owned` flag. An owning
//! wrapper deletes the object when dropped; a non-owning one only observes a
//! name that something else is responsible for. The kind parameter `K`
//! selects which delete call is used, so buffers, programs and vertex arrays
//! share one implementation.
//!
//! Two ownership disciplines are available:
//!
//! - exclusive: the `GlObject` value itself. It is not `Clone`, so there is a
//!   single logical owner.
//! - shared: [`Shared<T>`] (an `Rc`), for objects reused by several
//!   subsystems, such as a buffer attached to multiple vertex arrays. The
//!   object is released when the last holder drops.
//!
//! Nothing prevents two owning wrappers over the same name; callers must not
//! create them, and non-owning wrappers must not outlive the owner.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use glkit_core::types::GLuint;
use glkit_core::{GlContext, GlDriver};
use tracing::{debug, trace};

/// Reference-counted handle for objects with several holders.
pub type Shared<T> = Rc<T>;

/// A family of driver objects that share a delete call.
pub trait ObjectKind {
    /// Human-readable kind name used in logs.
    const NAME: &'static str;

    /// Delete object `id` through `driver`.
    fn release(driver: &dyn GlDriver, id: GLuint);
}

/// Buffer objects (`glDeleteBuffers`).
#[derive(Debug)]
pub enum BufferKind {}

/// Program objects (`glDeleteProgram`).
#[derive(Debug)]
pub enum ProgramKind {}

/// Vertex array objects (`glDeleteVertexArrays`).
#[derive(Debug)]
pub enum VertexArrayKind {}

impl ObjectKind for BufferKind {
    const NAME: &'static str = "buffer";

    fn release(driver: &dyn GlDriver, id: GLuint) {
        driver.delete_buffer(id);
    }
}

impl ObjectKind for ProgramKind {
    const NAME: &'static str = "program";

    fn release(driver: &dyn GlDriver, id: GLuint) {
        driver.delete_program(id);
    }
}

impl ObjectKind for VertexArrayKind {
    const NAME: &'static str = "vertex array";

    fn release(driver: &dyn GlDriver, id: GLuint) {
        driver.delete_vertex_array(id);
    }
}

/// An object name on a particular context, optionally owned.
pub struct GlObject<K: ObjectKind> {
    id: GLuint,
    owned: bool,
    ctx: GlContext,
    _kind: PhantomData<K>,
}

impl<K: ObjectKind> GlObject<K> {
    /// Adapt an existing object name without allocating.
    ///
    /// With `take_ownership` the wrapper deletes the object on drop.
    pub fn wrap(ctx: &GlContext, id: GLuint, take_ownership: bool) -> Self {
        trace!(kind = K::NAME, id, owned = take_ownership, "wrap");
        Self {
            id,
            owned: take_ownership,
            ctx: ctx.clone(),
            _kind: PhantomData,
        }
    }

    /// Raw object name. `0` means the object failed to be created.
    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Whether dropping this wrapper deletes the object.
    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// Whether the name refers to a real object (non-zero).
    pub fn is_valid(&self) -> bool {
        self.id != 0
    }

    /// The context this object belongs to.
    pub fn context(&self) -> &GlContext {
        &self.ctx
    }

    /// Move into shared ownership.
    pub fn into_shared(self) -> Shared<Self> {
        Rc::new(self)
    }

    /// Borrow the driver for forwarding calls.
    pub(crate) fn gl(&self) -> &dyn GlDriver {
        &*self.ctx
    }
}

impl<K: ObjectKind> Drop for GlObject<K> {
    fn drop(&mut self) {
        // Deleting name 0 is a no-op in GL, so it is never forwarded.
        if self.owned && self.id != 0 {
            debug!(kind = K::NAME, id = self.id, "release");
            K::release(&*self.ctx, self.id);
        }
    }
}

impl<K: ObjectKind> fmt::Debug for GlObject<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlObject")
            .field("kind", &K::NAME)
            .field("id", &self.id)
            .field("owned", &self.owned)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glkit_core::testing::{GlCall, RecordingGl};

    type Vao = GlObject<VertexArrayKind>;

    #[test]
    fn owning_wrapper_releases_once() {
        let gl = RecordingGl::new();
        let ctx = gl.context();
        drop(Vao::wrap(&ctx, 7, true));
        assert_eq!(gl.calls(), vec![GlCall::DeleteVertexArray(7)]);
    }

    #[test]
    fn observing_wrapper_never_releases() {
        let gl = RecordingGl::new();
        let ctx = gl.context();
        let owner = Vao::wrap(&ctx, 7, true);
        drop(Vao::wrap(&ctx, 7, false));
        assert!(gl.calls().is_empty());
        drop(owner);
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteVertexArray(7))), 1);
    }

    #[test]
    fn invalid_name_is_not_released() {
        let gl = RecordingGl::new();
        let ctx = gl.context();
        let object = GlObject::<ProgramKind>::wrap(&ctx, 0, true);
        assert!(!object.is_valid());
        drop(object);
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn shared_object_released_by_last_holder() {
        let gl = RecordingGl::new();
        let ctx = gl.context();
        let shared = GlObject::<BufferKind>::wrap(&ctx, 3, true).into_shared();
        let second = Rc::clone(&shared);
        drop(shared);
        assert!(gl.calls().is_empty());
        drop(second);
        assert_eq!(gl.calls(), vec![GlCall::DeleteBuffer(3)]);
    }

    #[test]
    fn debug_output_names_the_kind() {
        let gl = RecordingGl::new();
        let object = GlObject::<BufferKind>::wrap(&gl.context(), 4, false);
        let text = format!("{object:?}");
        assert!(text.contains("buffer"));
        assert!(text.contains("owned: false"));
    }
}
