//! The host/shader layout contract.
//!
//! Single source of truth for:
//! - binding slot numbers (`bindings`)
//! - uniform record layouts (`uniforms`, described by `layout`)
//! - vertex input layouts (`vertex`)
//!
//! Shader code consumes the same definitions through `codegen`.

mod bindings;
pub mod codegen;
pub mod layout;
mod uniforms;
mod vertex;

pub use bindings::{verify_contiguous, BindingSlot, BufferIndex, TextureIndex, VertexAttribute};
pub use codegen::ShaderLanguage;
pub use layout::{verify, ShaderStruct, ShaderType, StructLayout};
pub use uniforms::{normal_matrix, CubeUniforms, EnvironmentUniforms, PerInstanceUniforms};
pub use vertex::{EnvironmentVertex, MeshVertex, VertexField, VertexInput};

use crate::error::Result;

/// Runs every slot and record check, returning the verified record layouts.
pub fn verify_all() -> Result<Vec<StructLayout>> {
    verify_contiguous::<BufferIndex>()?;
    verify_contiguous::<VertexAttribute>()?;
    verify_contiguous::<TextureIndex>()?;

    Ok(vec![
        verify::<EnvironmentUniforms>()?,
        verify::<CubeUniforms>()?,
        verify::<PerInstanceUniforms>()?,
    ])
}
