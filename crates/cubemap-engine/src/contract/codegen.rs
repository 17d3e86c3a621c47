//! Shader prelude generation.
//!
//! Shader code includes the emitted text instead of a hand-kept copy of the
//! slot numbers and record layouts, so both sides follow the Rust definitions.

use std::fmt::Write as _;

use super::bindings::{BindingSlot, BufferIndex, TextureIndex, VertexAttribute};
use super::layout::ShaderStruct;
use super::uniforms::{CubeUniforms, EnvironmentUniforms, PerInstanceUniforms};
use super::vertex::{EnvironmentVertex, MeshVertex, VertexField, VertexInput};
use crate::error::{Error, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderLanguage {
    Wgsl,
    /// Metal Shading Language.
    Msl,
}

impl ShaderLanguage {
    pub fn file_extension(self) -> &'static str {
        match self {
            ShaderLanguage::Wgsl => "wgsl",
            ShaderLanguage::Msl => "h",
        }
    }
}

const HEADER: &str = "Generated from the cubemap-engine layout contract. Do not edit.";
const MSL_GUARD: &str = "CUBEMAP_SHADER_TYPES_H";

/// Emits every slot constant, vertex input and uniform record for `lang`.
///
/// Fails if a vertex field uses a format with no shader-side spelling.
pub fn emit(lang: ShaderLanguage) -> Result<String> {
    let mut out = String::new();
    match lang {
        ShaderLanguage::Wgsl => {
            let _ = writeln!(out, "// {HEADER}\n");
            wgsl_slots::<BufferIndex>(&mut out);
            wgsl_slots::<VertexAttribute>(&mut out);
            wgsl_slots::<TextureIndex>(&mut out);
            wgsl_vertex::<MeshVertex>(&mut out)?;
            wgsl_vertex::<EnvironmentVertex>(&mut out)?;
            wgsl_struct::<EnvironmentUniforms>(&mut out);
            wgsl_struct::<CubeUniforms>(&mut out);
            wgsl_struct::<PerInstanceUniforms>(&mut out);
        }
        ShaderLanguage::Msl => {
            let _ = writeln!(out, "// {HEADER}\n");
            let _ = writeln!(out, "#ifndef {MSL_GUARD}\n#define {MSL_GUARD}\n");
            let _ = writeln!(out, "#include <simd/simd.h>\n");
            msl_slots::<BufferIndex>(&mut out);
            msl_slots::<VertexAttribute>(&mut out);
            msl_slots::<TextureIndex>(&mut out);
            msl_vertex::<MeshVertex>(&mut out)?;
            msl_vertex::<EnvironmentVertex>(&mut out)?;
            msl_struct::<EnvironmentUniforms>(&mut out);
            msl_struct::<CubeUniforms>(&mut out);
            msl_struct::<PerInstanceUniforms>(&mut out);
            let _ = writeln!(out, "#endif // {MSL_GUARD}");
        }
    }
    Ok(out)
}

/// `BufferIndex` + `MeshPositions` -> `BUFFER_INDEX_MESH_POSITIONS`.
pub fn wgsl_constant_name<S: BindingSlot>(slot: S) -> String {
    screaming_snake(&format!("{}{}", S::KIND, slot.name()))
}

/// `BufferIndex` + `MeshPositions` -> `BufferIndexMeshPositions`.
pub fn msl_constant_name<S: BindingSlot>(slot: S) -> String {
    format!("{}{}", S::KIND, slot.name())
}

fn screaming_snake(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 8);
    for (i, ch) in camel.chars().enumerate() {
        if ch.is_ascii_uppercase() && i > 0 {
            out.push('_');
        }
        out.push(ch.to_ascii_uppercase());
    }
    out
}

fn wgsl_vertex_type(format: wgpu::VertexFormat) -> Option<&'static str> {
    use wgpu::VertexFormat as F;
    Some(match format {
        F::Float32 => "f32",
        F::Float32x2 => "vec2<f32>",
        F::Float32x3 => "vec3<f32>",
        F::Float32x4 => "vec4<f32>",
        F::Uint32 => "u32",
        F::Uint32x2 => "vec2<u32>",
        F::Uint32x3 => "vec3<u32>",
        F::Uint32x4 => "vec4<u32>",
        F::Sint32 => "i32",
        F::Sint32x2 => "vec2<i32>",
        F::Sint32x3 => "vec3<i32>",
        F::Sint32x4 => "vec4<i32>",
        _ => return None,
    })
}

fn msl_vertex_type(format: wgpu::VertexFormat) -> Option<&'static str> {
    use wgpu::VertexFormat as F;
    Some(match format {
        F::Float32 => "float",
        F::Float32x2 => "vector_float2",
        F::Float32x3 => "vector_float3",
        F::Float32x4 => "vector_float4",
        F::Uint32 => "metal::uint32_t",
        F::Uint32x2 => "vector_uint2",
        F::Uint32x3 => "vector_uint3",
        F::Uint32x4 => "vector_uint4",
        F::Sint32 => "metal::int32_t",
        F::Sint32x2 => "vector_int2",
        F::Sint32x3 => "vector_int3",
        F::Sint32x4 => "vector_int4",
        _ => return None,
    })
}

// Packed and normalized formats would need an unpacking step in the shader;
// only formats that read back as plain 32-bit components are emitted.
fn vertex_type<V: VertexInput>(
    field: &VertexField,
    lang: ShaderLanguage,
) -> Result<&'static str> {
    let ty = match lang {
        ShaderLanguage::Wgsl => wgsl_vertex_type(field.format),
        ShaderLanguage::Msl => msl_vertex_type(field.format),
    };
    ty.ok_or(Error::UnsupportedVertexFormat {
        vertex: V::NAME,
        field: field.name,
        format: field.format,
    })
}

// ── WGSL ──────────────────────────────────────────────────────────────────

fn wgsl_slots<S: BindingSlot>(out: &mut String) {
    for &slot in S::ALL {
        let _ = writeln!(out, "const {}: u32 = {}u;", wgsl_constant_name(slot), slot.index());
    }
    out.push('\n');
}

fn wgsl_vertex<V: VertexInput>(out: &mut String) -> Result<()> {
    let _ = writeln!(out, "struct {} {{", V::NAME);
    for field in V::FIELDS {
        let _ = writeln!(
            out,
            "    @location({}) {}: {},",
            field.attribute.index(),
            field.name,
            vertex_type::<V>(field, ShaderLanguage::Wgsl)?
        );
    }
    out.push_str("};\n\n");
    Ok(())
}

fn wgsl_struct<T: ShaderStruct>(out: &mut String) {
    let _ = writeln!(out, "struct {} {{", T::NAME);
    for field in T::FIELDS {
        let _ = writeln!(out, "    {}: {},", field.name, field.ty.wgsl());
    }
    out.push_str("};\n\n");
}

// ── MSL ───────────────────────────────────────────────────────────────────

fn msl_slots<S: BindingSlot>(out: &mut String) {
    let _ = writeln!(out, "enum {} : metal::int32_t {{", S::KIND);
    for &slot in S::ALL {
        let _ = writeln!(out, "    {} = {},", msl_constant_name(slot), slot.index());
    }
    out.push_str("};\n\n");
}

fn msl_vertex<V: VertexInput>(out: &mut String) -> Result<()> {
    let _ = writeln!(out, "typedef struct {{");
    for field in V::FIELDS {
        let _ = writeln!(
            out,
            "    {} {} [[attribute({})]];",
            vertex_type::<V>(field, ShaderLanguage::Msl)?,
            field.name,
            msl_constant_name(field.attribute)
        );
    }
    let _ = writeln!(out, "}} {};\n", V::NAME);
    Ok(())
}

fn msl_struct<T: ShaderStruct>(out: &mut String) {
    let _ = writeln!(out, "typedef struct {{");
    for field in T::FIELDS {
        let _ = writeln!(out, "    {} {};", field.ty.msl(), field.name);
    }
    let _ = writeln!(out, "}} {};\n", T::NAME);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_names() {
        assert_eq!(
            wgsl_constant_name(BufferIndex::PerInstanceUniforms),
            "BUFFER_INDEX_PER_INSTANCE_UNIFORMS"
        );
        assert_eq!(msl_constant_name(TextureIndex::Color), "TextureIndexColor");
    }

    #[test]
    fn wgsl_declares_slots_and_structs() {
        let src = emit(ShaderLanguage::Wgsl).unwrap();
        assert!(src.contains("const BUFFER_INDEX_MESH_POSITIONS: u32 = 0u;"));
        assert!(src.contains("const BUFFER_INDEX_UNIFORMS: u32 = 1u;"));
        assert!(src.contains("const VERTEX_ATTRIBUTE_NORMAL: u32 = 1u;"));
        assert!(src.contains("const TEXTURE_INDEX_COLOR: u32 = 0u;"));
        assert!(src.contains("    @location(1) normal: vec3<f32>,"));
        assert!(src.contains("    world_camera_position: vec4<f32>,"));
    }

    #[test]
    fn wgsl_cube_fields_keep_schema_order() {
        let src = emit(ShaderLanguage::Wgsl).unwrap();
        let start = src.find("struct CubeUniforms {").unwrap();
        let body = &src[start..];
        let p = body.find("projection_matrix").unwrap();
        let m = body.find("model_matrix").unwrap();
        let v = body.find("view_matrix").unwrap();
        let c = body.find("world_camera_position").unwrap();
        assert!(p < m && m < v && v < c);
    }

    #[test]
    fn msl_is_guarded_and_uses_simd_types() {
        let src = emit(ShaderLanguage::Msl).unwrap();
        assert!(src.contains("#ifndef CUBEMAP_SHADER_TYPES_H"));
        assert!(src.trim_end().ends_with("#endif // CUBEMAP_SHADER_TYPES_H"));
        assert!(src.contains("enum BufferIndex : metal::int32_t {"));
        assert!(src.contains("    BufferIndexPerInstanceUniforms = 2,"));
        assert!(src.contains("    vector_float3 position [[attribute(VertexAttributePosition)]];"));
        assert!(src.contains("    matrix_float4x4 normal_matrix;"));
        assert!(src.contains("} PerInstanceUniforms;"));
    }

    #[repr(C)]
    #[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct PackedVertex {
        position: [f32; 3],
        color: [u8; 4],
    }

    impl VertexInput for PackedVertex {
        const NAME: &'static str = "PackedVertex";
        const FIELDS: &'static [VertexField] = &[
            VertexField::new(VertexAttribute::Position, "position", wgpu::VertexFormat::Float32x3, 0),
            VertexField::new(VertexAttribute::Normal, "color", wgpu::VertexFormat::Unorm8x4, 12),
        ];

        fn layout() -> wgpu::VertexBufferLayout<'static> {
            unimplemented!()
        }
    }

    #[test]
    fn packed_vertex_formats_are_rejected() {
        let expected = Error::UnsupportedVertexFormat {
            vertex: "PackedVertex",
            field: "color",
            format: wgpu::VertexFormat::Unorm8x4,
        };
        assert_eq!(wgsl_vertex::<PackedVertex>(&mut String::new()), Err(expected.clone()));
        assert_eq!(msl_vertex::<PackedVertex>(&mut String::new()), Err(expected));
    }

    #[test]
    fn integer_vertex_formats_have_shader_types() {
        assert_eq!(wgsl_vertex_type(wgpu::VertexFormat::Uint32x2), Some("vec2<u32>"));
        assert_eq!(msl_vertex_type(wgpu::VertexFormat::Sint32x4), Some("vector_int4"));
        assert_eq!(wgsl_vertex_type(wgpu::VertexFormat::Float16x4), None);
    }
}
