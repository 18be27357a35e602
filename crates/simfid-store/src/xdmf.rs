//! XDMF grid description parser.
//!
//! Only the first `Grid` of the first `Domain` is kept. Its direct children
//! become [`GridChild`] entries in document order; every child that is not a
//! Topology or Geometry is recorded as an attribute block.

use crate::errors::{io_error, malformed_description, Result};
use crate::xml::{child, children};
use roxmltree::{Document, Node, ParsingOptions};
use simfid_core::model::{
    AttributeBlock, DataItemReference, GeometryBlock, GridChild, ParsedDescription, TopologyBlock,
};
use std::fs;
use std::path::Path;

/// Read and parse an `.xdmf`/`.xmf` file
///
/// # Errors
///
/// `Io` if the file cannot be read, `MalformedDescription` if it is not
/// UTF-8 XML or has no `Domain/Grid`.
pub fn parse_description(path: &Path) -> Result<ParsedDescription> {
    let label = path.display().to_string();
    let bytes = fs::read(path).map_err(|e| io_error("parse_description", path, e))?;
    let text = String::from_utf8(bytes)
        .map_err(|_| malformed_description(&label, "file is not valid UTF-8"))?;
    parse_description_str(&text, &label)
}

/// Parse description text; `label` names the source in diagnostics
pub fn parse_description_str(text: &str, label: &str) -> Result<ParsedDescription> {
    // XDMF writers routinely emit a DOCTYPE
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options)
        .map_err(|e| malformed_description(label, &format!("invalid XML: {}", e)))?;

    let domain = child(doc.root_element(), "Domain")
        .ok_or_else(|| malformed_description(label, "no Domain element"))?;
    let grid_count = children(domain, "Grid").count();
    let grid = child(domain, "Grid")
        .ok_or_else(|| malformed_description(label, "Domain has no Grid element"))?;

    let children = grid
        .children()
        .filter(Node::is_element)
        .map(grid_child)
        .collect::<Vec<_>>();

    tracing::debug!(
        source = label,
        grid_count,
        children = children.len(),
        "Parsed grid description"
    );

    Ok(ParsedDescription {
        source_label: label.to_string(),
        grid_count,
        children,
    })
}

fn grid_child(node: Node) -> GridChild {
    let data_item = child(node, "DataItem").map(|item| {
        DataItemReference::from_parts(item.attribute("Format"), item.text().unwrap_or(""))
    });

    match node.tag_name().name() {
        "Topology" => GridChild::Topology(TopologyBlock {
            topology_type: type_attribute(node, "TopologyType"),
            data_item,
        }),
        "Geometry" => GridChild::Geometry(GeometryBlock {
            geometry_type: type_attribute(node, "GeometryType"),
            data_item,
        }),
        tag => GridChild::Attribute(AttributeBlock {
            tag: tag.to_string(),
            attribute_type: type_attribute(node, "AttributeType"),
            name: node.attribute("Name").unwrap_or("").to_string(),
            data_item,
        }),
    }
}

/// The specific type attribute, or the short `Type` form older writers use
fn type_attribute(node: Node, specific: &str) -> String {
    node.attribute(specific)
        .or_else(|| node.attribute("Type"))
        .unwrap_or("")
        .to_string()
}
