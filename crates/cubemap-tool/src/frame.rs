use anyhow::{Context, Result};
use clap::Args;
use cubemap_engine::contract::{
    BufferIndex, CubeUniforms, EnvironmentUniforms, EnvironmentVertex, MeshVertex,
    PerInstanceUniforms, VertexInput,
};
use cubemap_engine::mesh;
use cubemap_engine::ring::UniformRing;
use cubemap_engine::scene::{CubeFace, CubeScene, SceneConfig};

#[derive(Args)]
pub struct FrameArgs {
    /// Number of frames to simulate
    #[arg(long, default_value_t = 3)]
    pub frames: u32,

    /// Drawable width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Drawable height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}

pub fn execute(args: FrameArgs) -> Result<()> {
    let config = SceneConfig::default();
    let patch = mesh::face_patch(config.face_divisions).context("failed to build face patch")?;
    let skybox = mesh::environment_box(config.environment_scale);
    log::info!(
        "face patch: {} vertices ({} byte stride), {} indices; environment box: {} vertices ({} byte stride), {} indices",
        patch.vertices.len(),
        MeshVertex::layout().array_stride,
        patch.index_count(),
        skybox.vertices.len(),
        EnvironmentVertex::layout().array_stride,
        skybox.index_count()
    );

    let mut scene = CubeScene::new(config);
    scene.resize(args.width, args.height);

    let mut environment =
        UniformRing::<EnvironmentUniforms>::new("environment uniforms", BufferIndex::Uniforms, 1)?;
    let mut cube = UniformRing::<CubeUniforms>::new("cube uniforms", BufferIndex::Uniforms, 1)?;
    let mut instances = UniformRing::<PerInstanceUniforms>::new(
        "per-instance uniforms",
        BufferIndex::PerInstanceUniforms,
        CubeFace::ALL.len(),
    )?;

    for frame in 0..args.frames {
        environment.advance();
        cube.advance();
        instances.advance();

        environment.write(&[scene.environment_uniforms()])?;
        cube.write(&[scene.cube_uniforms()])?;
        instances.write(&scene.per_instance_uniforms())?;

        println!(
            "frame {frame}: rotation {:.3} rad | environment @{} (buffer {}) | cube @{} (buffer {}) | {} instances @{} (buffer {})",
            scene.rotation(),
            environment.offset(),
            environment.binding().index(),
            cube.offset(),
            cube.binding().index(),
            instances.instances(),
            instances.offset(),
            instances.binding().index(),
        );

        scene.advance();
    }

    for ring in [environment.buffer_descriptor(), cube.buffer_descriptor(), instances.buffer_descriptor()] {
        log::info!("{}: {} bytes", ring.label.unwrap_or("uniforms"), ring.size);
    }

    Ok(())
}
