//! Single-file `.vtu` reader

use crate::errors::{io_error, malformed_grid, Result};
use crate::vtk::encoding::{compact, decode_ascii, decode_base64, BinaryLayout, ScalarType};
use crate::vtk::{binary_layout, components, expect_file_type};
use crate::xml::{child, children};
use roxmltree::{Document, Node};
use simfid_core::model::NamedNumericArray;
use std::fs;
use std::path::Path;

/// Read the point-data arrays of one `.vtu` file
///
/// Pieces are concatenated in document order; every piece must declare the
/// same arrays in the same order.
pub fn read_unstructured(path: &Path) -> Result<Vec<NamedNumericArray>> {
    let bytes = fs::read(path).map_err(|e| io_error("read_unstructured", path, e))?;
    // VTK writes raw appended data as binary after the `_` marker
    let text = String::from_utf8(bytes).map_err(|_| {
        malformed_grid(
            path,
            "file is not valid UTF-8 (raw appended data is not supported)",
        )
    })?;
    parse_unstructured_str(&text, path)
}

/// Parse `.vtu` text; `path` is only used for diagnostics
pub fn parse_unstructured_str(text: &str, path: &Path) -> Result<Vec<NamedNumericArray>> {
    let doc = Document::parse(text)
        .map_err(|e| malformed_grid(path, &format!("invalid XML: {}", e)))?;
    let root = doc.root_element();
    expect_file_type(root, "UnstructuredGrid", path)?;

    let layout = binary_layout(root, path)?;
    let appended = appended_data(root, path)?;
    let grid = child(root, "UnstructuredGrid")
        .ok_or_else(|| malformed_grid(path, "missing UnstructuredGrid element"))?;

    let mut pieces = children(grid, "Piece")
        .map(|piece| read_piece(piece, layout, appended.as_deref(), path));
    let mut merged = pieces
        .next()
        .ok_or_else(|| malformed_grid(path, "no Piece element"))??;
    for (index, piece) in pieces.enumerate() {
        append_piece(&mut merged, &piece?, index + 1, path)?;
    }

    Ok(merged)
}

fn read_piece(
    piece: Node,
    layout: BinaryLayout,
    appended: Option<&str>,
    path: &Path,
) -> Result<Vec<NamedNumericArray>> {
    match child(piece, "PointData") {
        Some(point_data) => children(point_data, "DataArray")
            .map(|node| read_data_array(node, layout, appended, path))
            .collect(),
        None => Ok(Vec::new()),
    }
}

fn append_piece(
    merged: &mut [NamedNumericArray],
    piece: &[NamedNumericArray],
    piece_index: usize,
    path: &Path,
) -> Result<()> {
    if piece.len() != merged.len() {
        return Err(malformed_grid(
            path,
            &format!(
                "piece {} has {} point-data arrays, piece 0 has {}",
                piece_index,
                piece.len(),
                merged.len()
            ),
        ));
    }
    for (target, part) in merged.iter_mut().zip(piece) {
        if target.name != part.name {
            return Err(malformed_grid(
                path,
                &format!(
                    "piece {} declares '{}' where piece 0 declares '{}'",
                    piece_index, part.name, target.name
                ),
            ));
        }
        target.extend_from(part);
    }
    Ok(())
}

/// The compacted base64 stream after the `_` marker, if the file has one
fn appended_data(root: Node, path: &Path) -> Result<Option<String>> {
    let Some(node) = child(root, "AppendedData") else {
        return Ok(None);
    };
    match node.attribute("encoding") {
        Some("base64") => {
            let text = node.text().unwrap_or("").trim_start();
            let stream = text.strip_prefix('_').unwrap_or(text);
            Ok(Some(compact(stream)))
        }
        other => Err(malformed_grid(
            path,
            &format!(
                "appended data encoding '{}' is not supported",
                other.unwrap_or("raw")
            ),
        )),
    }
}

fn read_data_array(
    node: Node,
    layout: BinaryLayout,
    appended: Option<&str>,
    path: &Path,
) -> Result<NamedNumericArray> {
    let name = node
        .attribute("Name")
        .ok_or_else(|| malformed_grid(path, "point-data DataArray without Name"))?;
    let fail = |reason: String| malformed_grid(path, &format!("array '{}': {}", name, reason));

    let scalar = ScalarType::from_vtk(node.attribute("type").unwrap_or("Float32"))
        .map_err(|e| fail(e.to_string()))?;
    let text = node.text().unwrap_or("");

    let values = match node.attribute("format").unwrap_or("ascii") {
        "ascii" => decode_ascii(text),
        "binary" => decode_base64(&compact(text), scalar, layout),
        "appended" => {
            let stream = appended.ok_or_else(|| fail("no base64 AppendedData".to_string()))?;
            let offset: usize = node
                .attribute("offset")
                .and_then(|raw| raw.trim().parse().ok())
                .ok_or_else(|| fail("missing or invalid offset".to_string()))?;
            let tail = stream
                .get(offset..)
                .ok_or_else(|| fail(format!("offset {} past end of appended data", offset)))?;
            decode_base64(tail, scalar, layout)
        }
        other => return Err(fail(format!("unknown format '{}'", other))),
    }
    .map_err(|e| fail(e.to_string()))?;

    Ok(NamedNumericArray::new(name, values).with_components(components(node, path)?))
}
