//! VTK XML unstructured-grid readers.
//!
//! Only the point data is extracted: each `PointData/DataArray` becomes one
//! [`NamedNumericArray`] in file order. Cells and points are not decoded.

pub mod encoding;
pub mod partitioned;
pub mod unstructured;

use crate::errors::{malformed_grid, Result};
use encoding::{BinaryLayout, ByteOrder, HeaderType};
use roxmltree::Node;
use simfid_core::model::{GridVariant, NamedNumericArray};
use std::path::Path;

pub use partitioned::read_partitioned;
pub use unstructured::{parse_unstructured_str, read_unstructured};

/// Read the point-data arrays of a `.vtu` or `.pvtu` file
///
/// The variant comes from the caller's format tag and governs both inputs of a
/// comparison; a file whose `VTKFile` type disagrees is rejected.
///
/// # Errors
///
/// `Io` if a file cannot be read, `MalformedGrid` if it cannot be decoded.
pub fn read_point_data(path: &Path, variant: GridVariant) -> Result<Vec<NamedNumericArray>> {
    let arrays = match variant {
        GridVariant::Single => read_unstructured(path)?,
        GridVariant::Partitioned => read_partitioned(path)?,
    };
    tracing::debug!(
        path = %path.display(),
        variant = ?variant,
        arrays = arrays.len(),
        "Read point data"
    );
    Ok(arrays)
}

/// Check the root is a `VTKFile` of the expected dataset type
pub(crate) fn expect_file_type(root: Node, expected: &str, path: &Path) -> Result<()> {
    if root.tag_name().name() != "VTKFile" {
        return Err(malformed_grid(
            path,
            &format!("root element is '{}', not VTKFile", root.tag_name().name()),
        ));
    }
    match root.attribute("type") {
        Some(found) if found == expected => Ok(()),
        found => Err(malformed_grid(
            path,
            &format!(
                "expected VTKFile type '{}', found '{}'",
                expected,
                found.unwrap_or("")
            ),
        )),
    }
}

pub(crate) fn binary_layout(root: Node, path: &Path) -> Result<BinaryLayout> {
    let header = HeaderType::from_vtk(root.attribute("header_type"))
        .map_err(|e| malformed_grid(path, &format!("header_type: {}", e)))?;
    let compressed = match root.attribute("compressor") {
        None | Some("") => false,
        Some("vtkZLibDataCompressor") => true,
        Some(other) => {
            return Err(malformed_grid(
                path,
                &format!("unsupported compressor '{}'", other),
            ))
        }
    };
    Ok(BinaryLayout {
        header,
        byte_order: ByteOrder::from_vtk(root.attribute("byte_order")),
        compressed,
    })
}

/// `NumberOfComponents`, defaulting to 1
pub(crate) fn components(node: Node, path: &Path) -> Result<usize> {
    match node.attribute("NumberOfComponents") {
        None => Ok(1),
        Some(raw) => raw.trim().parse().map_err(|_| {
            malformed_grid(path, &format!("invalid NumberOfComponents '{}'", raw))
        }),
    }
}
