//! CPU staging for dynamic uniform buffers.
//!
//! A `UniformRing` mirrors one GPU-visible buffer split into
//! `MAX_FRAMES_IN_FLIGHT` slots. Each frame writes into the next slot so the
//! GPU can still read the previous frames' slots. Slots start on
//! `UNIFORM_ALIGNMENT` boundaries so they can be bound with a byte offset.

use std::marker::PhantomData;
use std::mem::size_of;

use bytemuck::Pod;

use crate::contract::BufferIndex;
use crate::contract::layout::align_up;
use crate::error::{Error, Result};

/// Required alignment of a uniform binding offset.
pub const UNIFORM_ALIGNMENT: usize = 256;

/// Number of frames the host may record ahead of the GPU.
pub const MAX_FRAMES_IN_FLIGHT: usize = 3;

/// Rounds `bytes` up to the next `UNIFORM_ALIGNMENT` boundary.
#[inline]
pub const fn aligned_size(bytes: usize) -> usize {
    align_up(bytes, UNIFORM_ALIGNMENT)
}

pub struct UniformRing<T> {
    label: &'static str,
    binding: BufferIndex,
    instances: usize,
    stride: usize,
    slot: usize,
    staging: Vec<u8>,
    _marker: PhantomData<T>,
}

impl<T: Pod> UniformRing<T> {
    /// Creates a ring whose slots each hold `instances` consecutive records.
    ///
    /// `instances` is clamped to at least one. Fails with `Error::RingTooLarge`
    /// when the staging size does not fit in `usize`.
    pub fn new(label: &'static str, binding: BufferIndex, instances: usize) -> Result<Self> {
        let instances = instances.max(1);
        let (stride, total) = instances
            .checked_mul(size_of::<T>())
            .filter(|&bytes| bytes <= usize::MAX - (UNIFORM_ALIGNMENT - 1))
            .map(aligned_size)
            .and_then(|stride| Some((stride, stride.checked_mul(MAX_FRAMES_IN_FLIGHT)?)))
            .ok_or(Error::RingTooLarge {
                label,
                instances,
                record_size: size_of::<T>(),
            })?;
        let staging = vec![0u8; total];

        log::debug!(
            "{label}: {} slots x {stride} bytes ({instances} x {} byte records) at buffer index {}",
            MAX_FRAMES_IN_FLIGHT,
            size_of::<T>(),
            binding.index()
        );

        Ok(Self {
            label,
            binding,
            instances,
            stride,
            slot: 0,
            staging,
            _marker: PhantomData,
        })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Buffer slot the ring is bound at.
    pub fn binding(&self) -> BufferIndex {
        self.binding
    }

    /// Records per slot.
    pub fn instances(&self) -> usize {
        self.instances
    }

    /// Aligned byte size of one slot.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Total byte size of the backing buffer.
    pub fn size(&self) -> usize {
        self.staging.len()
    }

    /// Index of the current slot.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Byte offset of the current slot; pass this when binding the buffer.
    pub fn offset(&self) -> usize {
        self.slot * self.stride
    }

    /// Moves to the next slot and returns its byte offset.
    pub fn advance(&mut self) -> usize {
        self.slot = (self.slot + 1) % MAX_FRAMES_IN_FLIGHT;
        self.offset()
    }

    /// Copies `values` to the start of the current slot.
    pub fn write(&mut self, values: &[T]) -> Result<()> {
        if values.len() > self.instances {
            log::warn!(
                "{}: dropping write of {} records into a slot of {}",
                self.label,
                values.len(),
                self.instances
            );
            return Err(Error::RingOverflow {
                label: self.label,
                requested: values.len(),
                capacity: self.instances,
            });
        }

        let bytes: &[u8] = bytemuck::cast_slice(values);
        let start = self.offset();
        self.staging[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Reads record `index` of the current slot.
    pub fn read(&self, index: usize) -> Result<T> {
        if index >= self.instances {
            return Err(Error::InstanceOutOfRange {
                label: self.label,
                index,
                capacity: self.instances,
            });
        }

        let start = self.offset() + index * size_of::<T>();
        Ok(bytemuck::pod_read_unaligned(&self.staging[start..start + size_of::<T>()]))
    }

    /// Whole backing buffer, for a full upload.
    pub fn bytes(&self) -> &[u8] {
        &self.staging
    }

    /// Current slot only, for a partial upload at `offset()`.
    pub fn current_bytes(&self) -> &[u8] {
        let start = self.offset();
        &self.staging[start..start + self.stride]
    }

    /// Descriptor of the GPU buffer this ring mirrors.
    pub fn buffer_descriptor(&self) -> wgpu::BufferDescriptor<'static> {
        wgpu::BufferDescriptor {
            label: Some(self.label),
            size: self.size() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{CubeUniforms, EnvironmentUniforms, PerInstanceUniforms};
    use glam::{Mat4, Vec3, Vec4};

    #[test]
    fn aligned_sizes_of_contract_records() {
        assert_eq!(aligned_size(size_of::<EnvironmentUniforms>()), 256);
        assert_eq!(aligned_size(size_of::<CubeUniforms>()), 256);
        assert_eq!(aligned_size(size_of::<PerInstanceUniforms>()), 256);
        assert_eq!(aligned_size(6 * size_of::<PerInstanceUniforms>()), 768);
    }

    #[test]
    fn advance_wraps_after_frames_in_flight() {
        let mut ring = UniformRing::<CubeUniforms>::new("cube", BufferIndex::Uniforms, 1).unwrap();
        assert_eq!(ring.offset(), 0);
        assert_eq!(ring.advance(), 256);
        assert_eq!(ring.advance(), 512);
        assert_eq!(ring.advance(), 0);
        assert_eq!(ring.slot(), 0);
    }

    #[test]
    fn environment_uniforms_round_trip_bit_identical() {
        let mut ring =
            UniformRing::<EnvironmentUniforms>::new("environment", BufferIndex::Uniforms, 1).unwrap();
        let value = EnvironmentUniforms {
            projection_matrix: Mat4::perspective_lh(1.1, 1.5, 0.1, 100.0),
            view_matrix: Mat4::from_translation(Vec3::new(0.0, 0.0, 4.0)),
            model_matrix: Mat4::from_cols(
                Vec4::new(f32::MIN_POSITIVE, -0.0, 1.0, 2.0),
                Vec4::new(3.0, 4.0, 5.0, 6.0),
                Vec4::new(7.0, 8.0, 9.0, 10.0),
                Vec4::new(11.0, 12.0, 13.0, f32::MAX),
            ),
        };

        ring.advance();
        ring.write(&[value]).unwrap();
        let back = ring.read(0).unwrap();

        assert_eq!(bytemuck::bytes_of(&back), bytemuck::bytes_of(&value));
        assert_eq!(ring.binding(), BufferIndex::Uniforms);
        assert_eq!(&ring.current_bytes()[..192], bytemuck::bytes_of(&value));
    }

    #[test]
    fn slots_do_not_overlap() {
        let mut ring =
            UniformRing::<PerInstanceUniforms>::new("instances", BufferIndex::PerInstanceUniforms, 6).unwrap();
        let a = [PerInstanceUniforms::from_model(Mat4::from_scale(Vec3::splat(2.0))); 6];
        let b = [PerInstanceUniforms::default(); 6];

        ring.write(&a).unwrap();
        ring.advance();
        ring.write(&b).unwrap();
        ring.advance();
        ring.advance();

        assert_eq!(ring.slot(), 0);
        assert_eq!(ring.read(5).unwrap(), a[5]);
    }

    #[test]
    fn overflow_is_rejected() {
        let mut ring = UniformRing::<CubeUniforms>::new("cube", BufferIndex::Uniforms, 1).unwrap();
        let err = ring.write(&[CubeUniforms::default(); 2]).unwrap_err();
        assert_eq!(err, Error::RingOverflow { label: "cube", requested: 2, capacity: 1 });
        assert!(matches!(ring.read(1), Err(Error::InstanceOutOfRange { index: 1, .. })));
    }

    #[test]
    fn descriptor_covers_all_slots() {
        let ring = UniformRing::<CubeUniforms>::new("cube", BufferIndex::Uniforms, 1).unwrap();
        let desc = ring.buffer_descriptor();
        assert_eq!(desc.size, 768);
        assert_eq!(desc.label, Some("cube"));
        assert!(desc.usage.contains(wgpu::BufferUsages::UNIFORM));
        assert!(!desc.mapped_at_creation);
    }

    #[test]
    fn oversized_ring_is_rejected() {
        let err = UniformRing::<PerInstanceUniforms>::new(
            "instances",
            BufferIndex::PerInstanceUniforms,
            usize::MAX / 64,
        )
        .err();
        assert_eq!(
            err,
            Some(Error::RingTooLarge {
                label: "instances",
                instances: usize::MAX / 64,
                record_size: 128,
            })
        );
    }
}
