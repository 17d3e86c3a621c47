use std::fmt;

/// Errors reported by the layout contract and the host-side helpers built on it.
///
/// The contract types themselves cannot fail; these come from explicit checks
/// (layout verification, slot lookup) and from staging-buffer bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No slot of `kind` has the given index.
    UnknownSlot { kind: &'static str, index: u32 },

    /// A slot set is not numbered `0..n` in declaration order.
    NonContiguousSlot {
        kind: &'static str,
        position: usize,
        index: u32,
    },

    /// The host offset of a field differs from the offset shader layout rules give it.
    FieldOffsetMismatch {
        structure: &'static str,
        field: &'static str,
        shader: usize,
        host: usize,
    },

    /// The host size of a record differs from its shader-side size.
    SizeMismatch {
        structure: &'static str,
        shader: usize,
        host: usize,
    },

    /// More records were written than one ring slot holds.
    RingOverflow {
        label: &'static str,
        requested: usize,
        capacity: usize,
    },

    /// Read past the records one ring slot holds.
    InstanceOutOfRange {
        label: &'static str,
        index: usize,
        capacity: usize,
    },

    /// A vertex field format has no plain shader-side type.
    UnsupportedVertexFormat {
        vertex: &'static str,
        field: &'static str,
        format: wgpu::VertexFormat,
    },

    /// A ring would need more staging bytes than `usize` can hold.
    RingTooLarge {
        label: &'static str,
        instances: usize,
        record_size: usize,
    },

    /// A generated mesh needs more vertices than 16-bit indices can address.
    MeshTooLarge { vertices: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownSlot { kind, index } => {
                write!(f, "no {kind} slot has index {index}")
            }
            Error::NonContiguousSlot { kind, position, index } => write!(
                f,
                "{kind} slot at position {position} has index {index}; slots must be numbered 0..n"
            ),
            Error::FieldOffsetMismatch { structure, field, shader, host } => write!(
                f,
                "{structure}.{field}: shader offset {shader} != host offset {host}"
            ),
            Error::SizeMismatch { structure, shader, host } => {
                write!(f, "{structure}: shader size {shader} != host size {host}")
            }
            Error::RingOverflow { label, requested, capacity } => write!(
                f,
                "{label}: {requested} records do not fit in a slot of {capacity}"
            ),
            Error::InstanceOutOfRange { label, index, capacity } => write!(
                f,
                "{label}: record {index} is outside a slot of {capacity}"
            ),
            Error::UnsupportedVertexFormat { vertex, field, format } => write!(
                f,
                "{vertex}.{field}: vertex format {format:?} has no shader-side type"
            ),
            Error::RingTooLarge { label, instances, record_size } => write!(
                f,
                "{label}: {instances} records of {record_size} bytes overflow the staging buffer size"
            ),
            Error::MeshTooLarge { vertices } => write!(
                f,
                "mesh has {vertices} vertices; 16-bit indices address at most {}",
                u16::MAX as usize + 1
            ),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
