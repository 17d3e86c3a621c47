//! Canonical layout schema for uniform records.
//!
//! Each uniform record lists its fields once, in declaration order, together
//! with the offset the host compiler gave them. Shader-side offsets are
//! recomputed from the alignment rules below and compared against those.
//!
//! The rules are the ones WGSL applies to the uniform address space. For the
//! types used here they coincide with Metal's `simd` layout.

use crate::error::{Error, Result};

/// Field types allowed in a uniform record.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderType {
    /// Four `f32` components.
    Float4,
    /// Column-major 4×4 `f32` matrix.
    Float4x4,
}

impl ShaderType {
    pub const fn size(self) -> usize {
        match self {
            ShaderType::Float4 => 16,
            ShaderType::Float4x4 => 64,
        }
    }

    pub const fn align(self) -> usize {
        match self {
            ShaderType::Float4 | ShaderType::Float4x4 => 16,
        }
    }

    pub const fn wgsl(self) -> &'static str {
        match self {
            ShaderType::Float4 => "vec4<f32>",
            ShaderType::Float4x4 => "mat4x4<f32>",
        }
    }

    pub const fn msl(self) -> &'static str {
        match self {
            ShaderType::Float4 => "vector_float4",
            ShaderType::Float4x4 => "matrix_float4x4",
        }
    }
}

/// One field of a uniform record.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub ty: ShaderType,
    /// Byte offset in the host (`#[repr(C)]`) struct.
    pub host_offset: usize,
}

impl Field {
    pub const fn new(name: &'static str, ty: ShaderType, host_offset: usize) -> Self {
        Self { name, ty, host_offset }
    }
}

/// A `#[repr(C)]` record whose bytes are read by shaders.
pub trait ShaderStruct: bytemuck::Pod {
    /// Type name on both sides of the contract.
    const NAME: &'static str;

    /// Fields in declaration order. Reordering is a breaking change.
    const FIELDS: &'static [Field];
}

/// Resolved placement of one field.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub ty: ShaderType,
    pub offset: usize,
    pub host_offset: usize,
}

/// Shader-side layout of a uniform record next to its host layout.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StructLayout {
    pub name: &'static str,
    pub fields: Vec<FieldLayout>,
    pub size: usize,
    pub align: usize,
    pub host_size: usize,
}

impl StructLayout {
    /// Lays out `T::FIELDS` with shader alignment rules.
    pub fn of<T: ShaderStruct>() -> Self {
        let mut cursor = 0;
        let mut align = 1;
        let mut fields = Vec::with_capacity(T::FIELDS.len());

        for field in T::FIELDS {
            let offset = align_up(cursor, field.ty.align());
            fields.push(FieldLayout {
                name: field.name,
                ty: field.ty,
                offset,
                host_offset: field.host_offset,
            });
            cursor = offset + field.ty.size();
            align = align.max(field.ty.align());
        }

        Self {
            name: T::NAME,
            fields,
            size: align_up(cursor, align),
            align,
            host_size: std::mem::size_of::<T>(),
        }
    }

    /// First disagreement between the shader and host layouts, if any.
    pub fn check(&self) -> Result<()> {
        for field in &self.fields {
            if field.offset != field.host_offset {
                return Err(Error::FieldOffsetMismatch {
                    structure: self.name,
                    field: field.name,
                    shader: field.offset,
                    host: field.host_offset,
                });
            }
        }
        if self.size != self.host_size {
            return Err(Error::SizeMismatch {
                structure: self.name,
                shader: self.size,
                host: self.host_size,
            });
        }
        Ok(())
    }
}

/// Computes and checks the layout of `T`.
pub fn verify<T: ShaderStruct>() -> Result<StructLayout> {
    let layout = StructLayout::of::<T>();
    layout.check()?;
    log::debug!("{}: {} bytes, layout verified", layout.name, layout.size);
    Ok(layout)
}

/// Rounds `value` up to a multiple of `align` (a power of two).
#[inline]
pub const fn align_up(value: usize, align: usize) -> usize {
    (value + align - 1) & !(align - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::{Pod, Zeroable};

    #[repr(C)]
    #[derive(Debug, Copy, Clone, Pod, Zeroable)]
    struct Swapped {
        a: [f32; 4],
        b: [f32; 16],
    }

    // Host order is (a, b); the schema claims (b, a).
    impl ShaderStruct for Swapped {
        const NAME: &'static str = "Swapped";
        const FIELDS: &'static [Field] = &[
            Field::new("b", ShaderType::Float4x4, std::mem::offset_of!(Swapped, b)),
            Field::new("a", ShaderType::Float4, std::mem::offset_of!(Swapped, a)),
        ];
    }

    #[repr(C)]
    #[derive(Debug, Copy, Clone, Pod, Zeroable)]
    struct Short {
        a: [f32; 4],
    }

    impl ShaderStruct for Short {
        const NAME: &'static str = "Short";
        const FIELDS: &'static [Field] = &[
            Field::new("a", ShaderType::Float4, 0),
            Field::new("b", ShaderType::Float4, 16),
        ];
    }

    #[test]
    fn align_up_rounds_to_boundary() {
        assert_eq!(align_up(0, 16), 0);
        assert_eq!(align_up(1, 16), 16);
        assert_eq!(align_up(208, 256), 256);
        assert_eq!(align_up(256, 256), 256);
    }

    #[test]
    fn reordered_schema_is_reported() {
        let err = verify::<Swapped>().unwrap_err();
        assert_eq!(
            err,
            Error::FieldOffsetMismatch { structure: "Swapped", field: "b", shader: 0, host: 16 }
        );
    }

    #[test]
    fn extra_schema_field_is_reported_as_size_mismatch() {
        let err = verify::<Short>().unwrap_err();
        assert_eq!(err, Error::SizeMismatch { structure: "Short", shader: 32, host: 16 });
    }
}
