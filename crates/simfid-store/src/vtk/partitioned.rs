//! Partitioned `.pvtu` reader

use crate::errors::{io_error, malformed_grid, Result};
use crate::vtk::unstructured::read_unstructured;
use crate::vtk::{components, expect_file_type};
use crate::xml::{child, children};
use roxmltree::Document;
use simfid_core::model::NamedNumericArray;
use std::fs;
use std::path::{Path, PathBuf};

/// A `.pvtu` index: declared arrays and piece files
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionIndex {
    /// `(name, components)` in `PPointData` order
    pub arrays: Vec<(String, usize)>,
    /// Piece sources, resolved against the index file's directory
    pub pieces: Vec<PathBuf>,
}

/// Read a `.pvtu` file and merge its pieces' point data
///
/// Arrays follow the `PPointData` declaration order; each piece contributes
/// its array of the same name, appended in piece order.
pub fn read_partitioned(path: &Path) -> Result<Vec<NamedNumericArray>> {
    let bytes = fs::read(path).map_err(|e| io_error("read_partitioned", path, e))?;
    let text =
        String::from_utf8(bytes).map_err(|_| malformed_grid(path, "file is not valid UTF-8"))?;
    let index = parse_partition_index(&text, path)?;

    let mut merged: Vec<NamedNumericArray> = index
        .arrays
        .iter()
        .map(|(name, components)| {
            NamedNumericArray::new(name.clone(), Vec::new()).with_components(*components)
        })
        .collect();

    for piece_path in &index.pieces {
        let piece = read_unstructured(piece_path)?;
        for target in merged.iter_mut() {
            let part = piece.iter().find(|a| a.name == target.name).ok_or_else(|| {
                malformed_grid(
                    piece_path,
                    &format!("piece has no point-data array '{}'", target.name),
                )
            })?;
            target.extend_from(part);
        }
        tracing::debug!(piece = %piece_path.display(), "Merged partition");
    }

    Ok(merged)
}

/// Parse `.pvtu` text; piece sources are resolved against `path`'s directory
pub fn parse_partition_index(text: &str, path: &Path) -> Result<PartitionIndex> {
    let doc = Document::parse(text)
        .map_err(|e| malformed_grid(path, &format!("invalid XML: {}", e)))?;
    let root = doc.root_element();
    expect_file_type(root, "PUnstructuredGrid", path)?;

    let grid = child(root, "PUnstructuredGrid")
        .ok_or_else(|| malformed_grid(path, "missing PUnstructuredGrid element"))?;

    let arrays = match child(grid, "PPointData") {
        Some(point_data) => children(point_data, "PDataArray")
            .map(|node| {
                let name = node
                    .attribute("Name")
                    .ok_or_else(|| malformed_grid(path, "PDataArray without Name"))?;
                Ok((name.to_string(), components(node, path)?))
            })
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let pieces = children(grid, "Piece")
        .map(|node| {
            node.attribute("Source")
                .map(|source| base.join(source))
                .ok_or_else(|| malformed_grid(path, "Piece without Source"))
        })
        .collect::<Result<Vec<_>>>()?;

    if pieces.is_empty() {
        return Err(malformed_grid(path, "no Piece element"));
    }

    Ok(PartitionIndex { arrays, pieces })
}
