//! Attribute-slot and binding-slot bookkeeping for vertex arrays.
//!
//! [`VertexLayout`] assigns slots without talking to the driver, so the
//! numbering can be checked in isolation. Every attached attribute receives
//! the next attribute slot and every attached buffer the next binding slot.
//! Neither counter is ever reset or reused.
//!
//! Attribute names are expected to be unique within one layout. Attaching a
//! name a second time keeps the new slot and forgets the old one.

use std::collections::HashMap;

use glkit_core::types::GLuint;

/// Size in bytes of one component. Attributes are always `f32`.
pub const COMPONENT_SIZE: usize = std::mem::size_of::<f32>();

/// An attribute with an explicit byte offset inside its vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: String,
    /// Number of `f32` components, 1 to 4.
    pub components: usize,
    /// Byte offset from the start of the vertex.
    pub offset: usize,
}

impl VertexAttribute {
    pub fn new(name: impl Into<String>, components: usize, offset: usize) -> Self {
        Self {
            name: name.into(),
            components,
            offset,
        }
    }
}

/// Where one attribute ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSlot {
    pub name: String,
    pub slot: GLuint,
    pub components: usize,
    /// Byte offset relative to the start of the vertex.
    pub offset: usize,
}

/// The result of attaching one buffer: its binding slot, the stride and
/// buffer offset handed to the driver, and the attributes it feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferAttachment {
    pub binding: GLuint,
    pub stride: usize,
    pub offset: usize,
    pub attributes: Vec<AttributeSlot>,
}

#[derive(Debug, Default, Clone)]
pub struct VertexLayout {
    next_attribute: GLuint,
    next_binding: GLuint,
    names: HashMap<String, GLuint>,
}

impl VertexLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach tightly packed attributes given as `(components, name)`.
    ///
    /// Each offset is the running sum of the previous attributes' sizes and
    /// the stride is the total.
    pub fn attach_packed<S: AsRef<str>>(&mut self, attributes: &[(usize, S)]) -> BufferAttachment {
        let binding = self.take_binding();
        let mut stride = 0;
        let mut slots = Vec::with_capacity(attributes.len());

        for (components, name) in attributes {
            slots.push(self.assign(name.as_ref(), *components, stride));
            stride += components * COMPONENT_SIZE;
        }

        BufferAttachment {
            binding,
            stride,
            offset: 0,
            attributes: slots,
        }
    }

    /// Attach attributes with caller-chosen offsets. `stride` and the buffer
    /// `offset` are recorded exactly as given.
    pub fn attach_explicit(
        &mut self,
        attributes: &[VertexAttribute],
        stride: usize,
        offset: usize,
    ) -> BufferAttachment {
        let binding = self.take_binding();
        let slots = attributes
            .iter()
            .map(|attr| self.assign(&attr.name, attr.components, attr.offset))
            .collect();

        BufferAttachment {
            binding,
            stride,
            offset,
            attributes: slots,
        }
    }

    /// Slot currently mapped to `name`.
    pub fn slot_of(&self, name: &str) -> Option<GLuint> {
        self.names.get(name).copied()
    }

    /// Every `(name, slot)` pair, in unspecified order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, GLuint)> + '_ {
        self.names.iter().map(|(name, slot)| (name.as_str(), *slot))
    }

    /// Number of attribute slots handed out so far.
    pub fn attribute_count(&self) -> GLuint {
        self.next_attribute
    }

    /// Number of binding slots handed out so far.
    pub fn binding_count(&self) -> GLuint {
        self.next_binding
    }

    fn take_binding(&mut self) -> GLuint {
        let binding = self.next_binding;
        self.next_binding += 1;
        binding
    }

    fn assign(&mut self, name: &str, components: usize, offset: usize) -> AttributeSlot {
        let slot = self.next_attribute;
        self.next_attribute += 1;
        self.names.insert(name.to_owned(), slot);
        AttributeSlot {
            name: name.to_owned(),
            slot,
            components,
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_offsets_are_prefix_sums() {
        let mut layout = VertexLayout::new();
        let attachment = layout.attach_packed(&[(3, "posIn"), (2, "uvIn"), (4, "colorIn")]);

        let offsets: Vec<usize> = attachment.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 20]);
        assert_eq!(attachment.stride, 36);
        assert_eq!(attachment.offset, 0);
    }

    #[test]
    fn packed_stride_is_sum_of_component_sizes() {
        let cases: [&[usize]; 4] = [&[], &[1], &[4, 4, 4, 4], &[1, 2, 3, 4, 3, 2, 1]];
        for counts in cases {
            let attrs: Vec<(usize, String)> = counts
                .iter()
                .enumerate()
                .map(|(i, c)| (*c, format!("a{i}")))
                .collect();
            let attachment = VertexLayout::new().attach_packed(&attrs);

            let expected: usize = counts.iter().map(|c| c * 4).sum();
            assert_eq!(attachment.stride, expected);

            let mut running = 0;
            for (slot, count) in attachment.attributes.iter().zip(counts) {
                assert_eq!(slot.offset, running);
                running += count * 4;
            }
        }
    }

    #[test]
    fn explicit_stride_and_offset_are_kept_as_given() {
        let mut layout = VertexLayout::new();
        let attachment = layout.attach_explicit(
            &[
                VertexAttribute::new("posIn", 3, 0),
                VertexAttribute::new("uvIn", 2, 16),
            ],
            32,
            64,
        );

        assert_eq!(attachment.stride, 32);
        assert_eq!(attachment.offset, 64);
        assert_eq!(attachment.attributes[1].offset, 16);
    }

    #[test]
    fn slots_increase_across_attachments_and_are_never_reused() {
        let mut layout = VertexLayout::new();
        let first = layout.attach_packed(&[(3, "posIn"), (2, "uvIn")]);
        let second = layout.attach_explicit(&[VertexAttribute::new("normalIn", 3, 0)], 12, 0);
        let third = layout.attach_packed(&[(4, "colorIn")]);

        assert_eq!((first.binding, second.binding, third.binding), (0, 1, 2));

        let slots: Vec<GLuint> = [first, second, third]
            .iter()
            .flat_map(|a| a.attributes.iter().map(|s| s.slot))
            .collect();
        assert_eq!(slots, vec![0, 1, 2, 3]);
        assert_eq!(layout.attribute_count(), 4);
        assert_eq!(layout.binding_count(), 3);
    }

    #[test]
    fn repeated_name_maps_to_latest_slot() {
        let mut layout = VertexLayout::new();
        layout.attach_packed(&[(3, "posIn")]);
        layout.attach_packed(&[(3, "posIn")]);

        assert_eq!(layout.slot_of("posIn"), Some(1));
        assert_eq!(layout.attributes().count(), 1);
        assert_eq!(layout.attribute_count(), 2);
    }

    #[test]
    fn unknown_name_has_no_slot() {
        assert_eq!(VertexLayout::new().slot_of("missing"), None);
    }
}
