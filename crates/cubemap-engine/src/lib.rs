//! Cube-mapping engine crate.
//!
//! Owns the layout contract shared between host code and shaders, plus the
//! host-side pieces that fill it: uniform staging rings, scene state and demo
//! geometry. No GPU device is created here.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`contract`] | binding slots, uniform records, vertex layouts, shader codegen |
//! | [`ring`] | `UniformRing` dynamic uniform staging |
//! | [`scene`] | `CubeScene`, `SceneConfig`, `CubeFace` |
//! | [`mesh`] | face patch and environment box geometry |
//! | [`logging`] | `init_logging` |

pub mod contract;
pub mod mesh;
pub mod ring;
pub mod scene;

pub mod logging;
mod error;

pub use error::{Error, Result};
