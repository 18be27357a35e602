//! simfid store - reading snapshot files from disk
//!
//! Provides:
//! - VTK XML `.vtu`/`.pvtu` point-data readers
//! - XDMF grid description parser
//! - Container-backed payload resolution (HDF5 behind the `hdf5` feature)
//! - SHA-256 digests of compared files

pub mod container;
pub mod digest;
pub mod errors;
pub mod vtk;
pub mod xdmf;
mod xml;

// Re-export key types
pub use container::{default_reader, ContainerReader, ContainerResolver, MemoryContainer};
pub use errors::Result;
pub use vtk::read_point_data;
pub use xdmf::{parse_description, parse_description_str};
