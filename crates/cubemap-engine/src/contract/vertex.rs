use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};

use super::bindings::VertexAttribute;

/// One vertex input field, bound at a `VertexAttribute` location.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexField {
    pub attribute: VertexAttribute,
    pub name: &'static str,
    pub format: wgpu::VertexFormat,
    pub offset: u64,
}

impl VertexField {
    pub const fn new(
        attribute: VertexAttribute,
        name: &'static str,
        format: wgpu::VertexFormat,
        offset: usize,
    ) -> Self {
        Self { attribute, name, format, offset: offset as u64 }
    }

    const fn to_wgpu(self) -> wgpu::VertexAttribute {
        wgpu::VertexAttribute {
            format: self.format,
            offset: self.offset,
            shader_location: self.attribute.index(),
        }
    }
}

/// A vertex type fed to the mesh-positions buffer slot.
pub trait VertexInput: Pod {
    const NAME: &'static str;
    const FIELDS: &'static [VertexField];

    fn layout() -> wgpu::VertexBufferLayout<'static>;
}

const fn attributes<const N: usize>(fields: &[VertexField; N]) -> [wgpu::VertexAttribute; N] {
    let mut out = [wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32,
        offset: 0,
        shader_location: 0,
    }; N];
    let mut i = 0;
    while i < N {
        out[i] = fields[i].to_wgpu();
        i += 1;
    }
    out
}

/// Vertex of the reflective cube: position then normal, 24-byte stride.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    const FIELD_ARRAY: [VertexField; 2] = [
        VertexField::new(
            VertexAttribute::Position,
            "position",
            wgpu::VertexFormat::Float32x3,
            offset_of!(MeshVertex, position),
        ),
        VertexField::new(
            VertexAttribute::Normal,
            "normal",
            wgpu::VertexFormat::Float32x3,
            offset_of!(MeshVertex, normal),
        ),
    ];
    const ATTRS: [wgpu::VertexAttribute; 2] = attributes(&Self::FIELD_ARRAY);

    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

impl VertexInput for MeshVertex {
    const NAME: &'static str = "MeshVertex";
    const FIELDS: &'static [VertexField] = &Self::FIELD_ARRAY;

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Skybox vertex: position only, 12-byte stride.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct EnvironmentVertex {
    pub position: [f32; 3],
}

impl EnvironmentVertex {
    const FIELD_ARRAY: [VertexField; 1] = [VertexField::new(
        VertexAttribute::Position,
        "position",
        wgpu::VertexFormat::Float32x3,
        offset_of!(EnvironmentVertex, position),
    )];
    const ATTRS: [wgpu::VertexAttribute; 1] = attributes(&Self::FIELD_ARRAY);

    pub const fn new(position: [f32; 3]) -> Self {
        Self { position }
    }
}

impl VertexInput for EnvironmentVertex {
    const NAME: &'static str = "EnvironmentVertex";
    const FIELDS: &'static [VertexField] = &Self::FIELD_ARRAY;

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<EnvironmentVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const _: () = assert!(size_of::<MeshVertex>() == 24);
const _: () = assert!(size_of::<EnvironmentVertex>() == 12);
