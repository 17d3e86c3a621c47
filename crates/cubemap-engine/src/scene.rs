//! Host-side scene state that fills the uniform records each frame.
//!
//! Convention: left-handed view space, depth in `0..1`, column-major matrices.

use glam::{Mat4, Vec3, Vec4};

use crate::contract::{CubeUniforms, EnvironmentUniforms, PerInstanceUniforms};

/// Scene parameters.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Vertical field of view.
    pub fovy_degrees: f32,
    pub near: f32,
    pub far: f32,

    /// Distance from the eye to the cube center along +Z.
    pub camera_distance: f32,

    /// Uniform scale applied to the unit cube.
    pub cube_scale: f32,

    /// Spin axis of the cube. Need not be normalized.
    pub rotation_axis: Vec3,

    /// Radians added per `advance()`.
    pub rotation_step: f32,

    /// Scale applied to the unit environment box.
    pub environment_scale: f32,

    /// Grid subdivisions of each cube face.
    pub face_divisions: u16,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fovy_degrees: 65.0,
            near: 0.1,
            far: 100.0,
            camera_distance: 4.0,
            cube_scale: 2.0,
            rotation_axis: Vec3::new(1.0, 1.0, 0.3),
            rotation_step: 0.005,
            environment_scale: 10.0,
            face_divisions: 10,
        }
    }
}

/// The six cube faces in instance order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveZ,
    NegativeZ,
    NegativeY,
    PositiveY,
}

impl CubeFace {
    /// Instance order of the face records.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
        CubeFace::NegativeY,
        CubeFace::PositiveY,
    ];

    /// Rotation taking the +X face patch onto this face.
    pub fn rotation(self) -> Mat4 {
        match self {
            CubeFace::PositiveX => Mat4::IDENTITY,
            CubeFace::NegativeX => Mat4::from_rotation_y(180f32.to_radians()),
            CubeFace::PositiveZ => Mat4::from_rotation_y((-90f32).to_radians()),
            CubeFace::NegativeZ => Mat4::from_rotation_y(90f32.to_radians()),
            CubeFace::NegativeY => Mat4::from_rotation_z((-90f32).to_radians()),
            CubeFace::PositiveY => Mat4::from_rotation_z(90f32.to_radians()),
        }
    }

    /// Outward normal of the face in cube space.
    pub fn normal(self) -> Vec3 {
        self.rotation().transform_vector3(Vec3::X)
    }
}

pub struct CubeScene {
    config: SceneConfig,
    projection: Mat4,
    rotation: f32,
}

impl CubeScene {
    /// Creates a scene with an identity projection; call `resize` before the first frame.
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            projection: Mat4::IDENTITY,
            rotation: 0.0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Current cube spin in radians.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Rebuilds the projection for a drawable of `width` × `height` pixels.
    ///
    /// Zero-sized drawables (minimized windows) keep the previous projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("ignoring resize to {width}x{height}");
            return;
        }
        let aspect = width as f32 / height as f32;
        self.projection = Mat4::perspective_lh(
            self.config.fovy_degrees.to_radians(),
            aspect,
            self.config.near,
            self.config.far,
        );
        log::debug!("projection rebuilt for {width}x{height} (aspect {aspect:.3})");
    }

    fn view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, self.config.camera_distance))
    }

    /// Model matrix of the spinning cube.
    pub fn cube_model(&self) -> Mat4 {
        let axis = self.config.rotation_axis.normalize_or(Vec3::Y);
        Mat4::from_axis_angle(axis, self.rotation) * Mat4::from_scale(Vec3::splat(self.config.cube_scale))
    }

    pub fn environment_uniforms(&self) -> EnvironmentUniforms {
        EnvironmentUniforms {
            projection_matrix: self.projection,
            view_matrix: self.view(),
            model_matrix: Mat4::IDENTITY,
        }
    }

    pub fn cube_uniforms(&self) -> CubeUniforms {
        CubeUniforms {
            projection_matrix: self.projection,
            model_matrix: self.cube_model(),
            view_matrix: self.view(),
            world_camera_position: Vec4::new(0.0, 0.0, -self.config.camera_distance, 1.0),
        }
    }

    /// One record per `CubeFace`, in `CubeFace::ALL` order.
    pub fn per_instance_uniforms(&self) -> [PerInstanceUniforms; 6] {
        let model = self.cube_model();
        CubeFace::ALL.map(|face| PerInstanceUniforms::from_model(model * face.rotation()))
    }

    /// Steps the cube spin by one frame.
    pub fn advance(&mut self) {
        self.rotation += self.config.rotation_step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> CubeScene {
        let mut s = CubeScene::new(SceneConfig::default());
        s.resize(800, 600);
        s
    }

    #[test]
    fn face_normals_point_outward() {
        let expected = [Vec3::X, -Vec3::X, Vec3::Z, -Vec3::Z, -Vec3::Y, Vec3::Y];
        for (face, want) in CubeFace::ALL.iter().zip(expected) {
            assert!(
                face.normal().abs_diff_eq(want, 1e-6),
                "{face:?}: {:?} != {want:?}",
                face.normal()
            );
        }
    }

    #[test]
    fn projection_is_left_handed_zero_to_one() {
        let s = scene();
        let p = s.projection();
        let near = p.project_point3(Vec3::new(0.0, 0.0, 0.1));
        let far = p.project_point3(Vec3::new(0.0, 0.0, 100.0));
        assert!(near.z.abs() < 1e-5);
        assert!((far.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn zero_size_resize_keeps_projection() {
        let mut s = scene();
        let before = s.projection();
        s.resize(0, 600);
        assert_eq!(s.projection(), before);
    }

    #[test]
    fn environment_is_identity_model_pushed_back() {
        let u = scene().environment_uniforms();
        assert_eq!(u.model_matrix, Mat4::IDENTITY);
        assert_eq!(u.view_matrix.w_axis, Vec4::new(0.0, 0.0, 4.0, 1.0));
    }

    #[test]
    fn cube_uniforms_place_camera_opposite_view() {
        let u = scene().cube_uniforms();
        assert_eq!(u.world_camera_position, Vec4::new(0.0, 0.0, -4.0, 1.0));
        assert_eq!(u.model_matrix, Mat4::from_scale(Vec3::splat(2.0)));
    }

    #[test]
    fn instances_share_the_cube_model() {
        let mut s = scene();
        s.advance();
        s.advance();
        let instances = s.per_instance_uniforms();
        assert_eq!(instances[0].model_matrix, s.cube_model());
        for (i, face) in CubeFace::ALL.iter().enumerate() {
            let want = s.cube_model() * face.rotation();
            assert!(instances[i].model_matrix.abs_diff_eq(want, 1e-6));
            let n = instances[i].normal_matrix * instances[i].model_matrix.transpose();
            // (M^-1)^T * M^T == (M * M^-1)^T == I
            assert!(n.abs_diff_eq(Mat4::IDENTITY, 1e-4));
        }
    }

    #[test]
    fn advance_accumulates_rotation_step() {
        let mut s = scene();
        for _ in 0..200 {
            s.advance();
        }
        assert!((s.rotation() - 1.0).abs() < 1e-4);
    }
}
