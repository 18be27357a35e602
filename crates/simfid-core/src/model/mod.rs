pub mod array;
pub mod description;
pub mod snapshot;
pub mod tolerance;

pub use array::NamedNumericArray;
pub use description::{
    AttributeBlock, DataItemReference, GeometryBlock, GridChild, ParsedDescription, PayloadRows,
    TopologyBlock,
};
pub use snapshot::{FileFormat, GridVariant, SnapshotFile};
pub use tolerance::Tolerance;
