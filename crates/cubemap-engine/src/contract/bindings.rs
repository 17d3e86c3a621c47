//! Binding slot numbers shared by host pipelines and shader entry points.
//!
//! Every slot set is numbered `0..n` without gaps so consumers can index
//! binding tables directly by `index()`.

use crate::error::{Error, Result};

/// A closed, contiguous set of binding slots.
pub trait BindingSlot: Copy + Eq + Sized + 'static {
    /// Name of the slot set, used as a prefix for generated shader constants.
    const KIND: &'static str;

    /// Every slot in ascending index order.
    const ALL: &'static [Self];

    fn index(self) -> u32;

    /// Slot name without the kind prefix (e.g. `"Uniforms"`).
    fn name(self) -> &'static str;

    fn from_index(index: u32) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|slot| slot.index() == index)
            .ok_or(Error::UnknownSlot { kind: Self::KIND, index })
    }
}

/// Buffer argument table slots.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferIndex {
    MeshPositions = 0,
    Uniforms = 1,
    PerInstanceUniforms = 2,
}

impl BufferIndex {
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }
}

impl BindingSlot for BufferIndex {
    const KIND: &'static str = "BufferIndex";
    const ALL: &'static [Self] = &[
        BufferIndex::MeshPositions,
        BufferIndex::Uniforms,
        BufferIndex::PerInstanceUniforms,
    ];

    fn index(self) -> u32 {
        BufferIndex::index(self)
    }

    fn name(self) -> &'static str {
        match self {
            BufferIndex::MeshPositions => "MeshPositions",
            BufferIndex::Uniforms => "Uniforms",
            BufferIndex::PerInstanceUniforms => "PerInstanceUniforms",
        }
    }
}

/// Vertex shader input locations.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VertexAttribute {
    Position = 0,
    Normal = 1,
}

impl VertexAttribute {
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }
}

impl BindingSlot for VertexAttribute {
    const KIND: &'static str = "VertexAttribute";
    const ALL: &'static [Self] = &[VertexAttribute::Position, VertexAttribute::Normal];

    fn index(self) -> u32 {
        VertexAttribute::index(self)
    }

    fn name(self) -> &'static str {
        match self {
            VertexAttribute::Position => "Position",
            VertexAttribute::Normal => "Normal",
        }
    }
}

/// Fragment texture slots.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureIndex {
    Color = 0,
}

impl TextureIndex {
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }
}

impl BindingSlot for TextureIndex {
    const KIND: &'static str = "TextureIndex";
    const ALL: &'static [Self] = &[TextureIndex::Color];

    fn index(self) -> u32 {
        TextureIndex::index(self)
    }

    fn name(self) -> &'static str {
        match self {
            TextureIndex::Color => "Color",
        }
    }
}

/// Checks that `S::ALL` is numbered `0..n` in order.
pub fn verify_contiguous<S: BindingSlot>() -> Result<()> {
    for (position, slot) in S::ALL.iter().enumerate() {
        if slot.index() as usize != position {
            return Err(Error::NonContiguousSlot {
                kind: S::KIND,
                position,
                index: slot.index(),
            });
        }
    }
    Ok(())
}
