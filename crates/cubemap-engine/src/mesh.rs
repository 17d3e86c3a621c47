//! Demo geometry: the subdivided cube face patch and the environment box.

use crate::contract::{EnvironmentVertex, MeshVertex};
use crate::error::{Error, Result};

/// Indexed triangle list with 16-bit indices.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData<V> {
    pub vertices: Vec<V>,
    pub indices: Vec<u16>,
}

impl<V> MeshData<V> {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Splits the rectangle `start..end` into a `(count + 1)²` grid of points, row by row.
///
/// `count` is clamped to at least one.
pub fn divide(start: [f32; 2], end: [f32; 2], count: usize) -> Vec<Vec<[f32; 2]>> {
    let count = count.max(1);
    let step_x = (end[0] - start[0]) / count as f32;
    let step_y = (end[1] - start[1]) / count as f32;

    (0..=count)
        .map(|y| {
            (0..=count)
                .map(|x| [start[0] + step_x * x as f32, start[1] + step_y * y as f32])
                .collect()
        })
        .collect()
}

/// The +X face of a unit cube (x = 0.5) as a `divisions`² grid.
///
/// Other faces are produced by instancing with `CubeFace` rotations.
pub fn face_patch(divisions: u16) -> Result<MeshData<MeshVertex>> {
    let count = usize::from(divisions.max(1));
    let row = count + 1;
    let vertex_count = row * row;
    if vertex_count > u16::MAX as usize + 1 {
        return Err(Error::MeshTooLarge { vertices: vertex_count });
    }

    let vertices = divide([-0.5, -0.5], [0.5, 0.5], count)
        .into_iter()
        .flatten()
        .map(|[a, b]| MeshVertex::new([0.5, a, b], [1.0, 0.0, 0.0]))
        .collect();

    let mut indices = Vec::with_capacity(count * count * 6);
    for y in 0..count {
        for x in 0..count {
            let i0 = (y * row + x) as u16;
            let i1 = ((y + 1) * row + x) as u16;
            let i2 = ((y + 1) * row + x + 1) as u16;
            let i3 = (y * row + x + 1) as u16;
            indices.extend_from_slice(&[i0, i1, i2, i0, i2, i3]);
        }
    }

    Ok(MeshData { vertices, indices })
}

// Unit box corners, four per face: +X, -X, +Y, -Y, +Z, -Z.
const ENVIRONMENT_CORNERS: [[f32; 3]; 24] = [
    // +X
    [0.5, 0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    // -X
    [-0.5, 0.5, 0.5],
    [-0.5, -0.5, 0.5],
    [-0.5, -0.5, -0.5],
    [-0.5, 0.5, -0.5],
    // +Y
    [-0.5, 0.5, 0.5],
    [-0.5, 0.5, -0.5],
    [0.5, 0.5, -0.5],
    [0.5, 0.5, 0.5],
    // -Y
    [-0.5, -0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, -0.5, -0.5],
    // +Z
    [0.5, 0.5, 0.5],
    [0.5, -0.5, 0.5],
    [-0.5, -0.5, 0.5],
    [-0.5, 0.5, 0.5],
    // -Z
    [-0.5, 0.5, -0.5],
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
];

/// The skybox: a unit box scaled by `scale`, two triangles per face.
pub fn environment_box(scale: f32) -> MeshData<EnvironmentVertex> {
    let vertices = ENVIRONMENT_CORNERS
        .iter()
        .map(|&[x, y, z]| EnvironmentVertex::new([x * scale, y * scale, z * scale]))
        .collect();

    let indices = (0..6u16)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base, base + 2, base + 3]
        })
        .collect();

    MeshData { vertices, indices }
}
