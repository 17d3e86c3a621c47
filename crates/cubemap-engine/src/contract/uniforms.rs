//! Uniform records read by the environment and cube shaders.
//!
//! Field order is part of the contract. `CubeUniforms` deliberately places the
//! model matrix before the view matrix, unlike `EnvironmentUniforms`.

use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

use super::layout::{Field, ShaderStruct, ShaderType};

/// Per-frame transforms for the environment (skybox) pass.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct EnvironmentUniforms {
    pub projection_matrix: Mat4,
    pub view_matrix: Mat4,
    pub model_matrix: Mat4,
}

/// Transforms and eye position for the reflective cube pass.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CubeUniforms {
    pub projection_matrix: Mat4,
    pub model_matrix: Mat4,
    pub view_matrix: Mat4,
    pub world_camera_position: Vec4,
}

/// One instance of an instanced draw. A buffer holds N of these back to back.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PerInstanceUniforms {
    pub model_matrix: Mat4,
    /// Inverse-transpose of `model_matrix`.
    pub normal_matrix: Mat4,
}

const _: () = assert!(size_of::<EnvironmentUniforms>() == 192);
const _: () = assert!(size_of::<CubeUniforms>() == 208);
const _: () = assert!(size_of::<PerInstanceUniforms>() == 128);

impl ShaderStruct for EnvironmentUniforms {
    const NAME: &'static str = "EnvironmentUniforms";
    const FIELDS: &'static [Field] = &[
        Field::new(
            "projection_matrix",
            ShaderType::Float4x4,
            offset_of!(EnvironmentUniforms, projection_matrix),
        ),
        Field::new("view_matrix", ShaderType::Float4x4, offset_of!(EnvironmentUniforms, view_matrix)),
        Field::new("model_matrix", ShaderType::Float4x4, offset_of!(EnvironmentUniforms, model_matrix)),
    ];
}

impl ShaderStruct for CubeUniforms {
    const NAME: &'static str = "CubeUniforms";
    const FIELDS: &'static [Field] = &[
        Field::new("projection_matrix", ShaderType::Float4x4, offset_of!(CubeUniforms, projection_matrix)),
        Field::new("model_matrix", ShaderType::Float4x4, offset_of!(CubeUniforms, model_matrix)),
        Field::new("view_matrix", ShaderType::Float4x4, offset_of!(CubeUniforms, view_matrix)),
        Field::new(
            "world_camera_position",
            ShaderType::Float4,
            offset_of!(CubeUniforms, world_camera_position),
        ),
    ];
}

impl ShaderStruct for PerInstanceUniforms {
    const NAME: &'static str = "PerInstanceUniforms";
    const FIELDS: &'static [Field] = &[
        Field::new("model_matrix", ShaderType::Float4x4, offset_of!(PerInstanceUniforms, model_matrix)),
        Field::new("normal_matrix", ShaderType::Float4x4, offset_of!(PerInstanceUniforms, normal_matrix)),
    ];
}

impl Default for EnvironmentUniforms {
    fn default() -> Self {
        Self {
            projection_matrix: Mat4::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            model_matrix: Mat4::IDENTITY,
        }
    }
}

impl Default for CubeUniforms {
    fn default() -> Self {
        Self {
            projection_matrix: Mat4::IDENTITY,
            model_matrix: Mat4::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            world_camera_position: Vec4::W,
        }
    }
}

impl PerInstanceUniforms {
    /// Builds an instance record, deriving the normal matrix from `model_matrix`.
    pub fn from_model(model_matrix: Mat4) -> Self {
        Self {
            model_matrix,
            normal_matrix: normal_matrix(model_matrix),
        }
    }
}

impl Default for PerInstanceUniforms {
    fn default() -> Self {
        Self::from_model(Mat4::IDENTITY)
    }
}

/// Inverse-transpose of `model`, used to carry normals through non-uniform scale.
#[inline]
pub fn normal_matrix(model: Mat4) -> Mat4 {
    model.inverse().transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::layout::verify;
    use glam::Vec3;

    fn offsets<T: ShaderStruct>() -> Vec<(&'static str, usize)> {
        T::FIELDS.iter().map(|f| (f.name, f.host_offset)).collect()
    }

    #[test]
    fn environment_layout_snapshot() {
        assert_eq!(
            offsets::<EnvironmentUniforms>(),
            [("projection_matrix", 0), ("view_matrix", 64), ("model_matrix", 128)]
        );
        verify::<EnvironmentUniforms>().unwrap();
    }

    #[test]
    fn cube_layout_snapshot_keeps_model_before_view() {
        assert_eq!(
            offsets::<CubeUniforms>(),
            [
                ("projection_matrix", 0),
                ("model_matrix", 64),
                ("view_matrix", 128),
                ("world_camera_position", 192),
            ]
        );
        let layout = verify::<CubeUniforms>().unwrap();
        assert_eq!(layout.size, 208);
        assert_eq!(layout.align, 16);
    }

    #[test]
    fn per_instance_layout_snapshot() {
        assert_eq!(
            offsets::<PerInstanceUniforms>(),
            [("model_matrix", 0), ("normal_matrix", 64)]
        );
        verify::<PerInstanceUniforms>().unwrap();
    }

    #[test]
    fn cube_bytes_follow_field_order() {
        let u = CubeUniforms {
            projection_matrix: Mat4::from_diagonal(Vec4::splat(1.0)),
            model_matrix: Mat4::from_diagonal(Vec4::splat(2.0)),
            view_matrix: Mat4::from_diagonal(Vec4::splat(3.0)),
            world_camera_position: Vec4::new(4.0, 5.0, 6.0, 7.0),
        };
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&u));
        assert_eq!(floats.len(), 52);
        // Diagonal element (0,0) of each matrix, then the camera vector.
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[16], 2.0);
        assert_eq!(floats[32], 3.0);
        assert_eq!(&floats[48..], &[4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let instance = PerInstanceUniforms::from_model(model);
        let n = instance.normal_matrix.transform_vector3(Vec3::X);
        assert!((n - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn normal_matrix_of_rotation_is_the_rotation() {
        let model = Mat4::from_rotation_y(0.7);
        assert!(normal_matrix(model).abs_diff_eq(model, 1e-5));
    }
}
