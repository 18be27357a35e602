//! In-memory view of an XDMF grid description.
//!
//! Blocks hold *references* to their bulk data; the numeric payload is only
//! fetched through a [`PayloadResolver`](crate::resolver::PayloadResolver) once
//! the structural checks that precede it have passed.

use crate::errors::{FidelityError, Result};
use serde::{Deserialize, Serialize};

/// Numeric payload of one DataItem: one row per leading index
///
/// A 1-D dataset yields single-value rows, a 2-D dataset one row per node or cell.
pub type PayloadRows = Vec<Vec<f64>>;

/// Where a DataItem's values live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataItemReference {
    /// `Format="HDF"`: text is `<container-path>:<dataset-path>`
    External { container: String, dataset: String },
    /// Any other storage format, including inline XML values
    Unsupported { format: String },
}

impl DataItemReference {
    /// The `Format` marker for externally stored binary payloads
    pub const EXTERNAL_BINARY_FORMAT: &'static str = "HDF";

    /// Build a reference from a DataItem's `Format` attribute and text content
    ///
    /// The text is trimmed and split on the first `:`. Text without a colon
    /// yields an empty dataset path, which fails later at container lookup.
    pub fn from_parts(format: Option<&str>, text: &str) -> Self {
        match format {
            Some(f) if f == Self::EXTERNAL_BINARY_FORMAT => {
                let text = text.trim();
                let (container, dataset) = text.split_once(':').unwrap_or((text, ""));
                DataItemReference::External {
                    container: container.to_string(),
                    dataset: dataset.to_string(),
                }
            }
            other => DataItemReference::Unsupported {
                format: other.unwrap_or("XML").to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyBlock {
    pub topology_type: String,
    pub data_item: Option<DataItemReference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryBlock {
    pub geometry_type: String,
    pub data_item: Option<DataItemReference>,
}

/// Any grid child that is neither Topology nor Geometry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeBlock {
    /// Element tag, normally `Attribute`
    pub tag: String,
    pub attribute_type: String,
    pub name: String,
    pub data_item: Option<DataItemReference>,
}

/// One direct child element of the grid, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridChild {
    Topology(TopologyBlock),
    Geometry(GeometryBlock),
    Attribute(AttributeBlock),
}

impl GridChild {
    pub fn tag(&self) -> &str {
        match self {
            GridChild::Topology(_) => "Topology",
            GridChild::Geometry(_) => "Geometry",
            GridChild::Attribute(a) => &a.tag,
        }
    }

    pub fn as_attribute(&self) -> Option<&AttributeBlock> {
        match self {
            GridChild::Attribute(a) => Some(a),
            _ => None,
        }
    }
}

/// The first grid of the first domain of one description file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDescription {
    /// Where the description came from (file path), for diagnostics
    pub source_label: String,
    /// Number of Grid elements in the selected domain
    pub grid_count: usize,
    /// Direct child elements of the selected grid
    pub children: Vec<GridChild>,
}

impl ParsedDescription {
    /// Total direct child-element count of the grid
    pub fn cell_count(&self) -> usize {
        self.children.len()
    }

    pub fn children(&self) -> &[GridChild] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&GridChild> {
        self.children.get(index)
    }

    /// First Topology child; later ones are ignored
    ///
    /// # Errors
    ///
    /// `MissingTopology` if the grid has none.
    pub fn get_topology(&self) -> Result<&TopologyBlock> {
        self.children
            .iter()
            .find_map(|c| match c {
                GridChild::Topology(t) => Some(t),
                _ => None,
            })
            .ok_or_else(|| FidelityError::MissingTopology {
                source_label: self.source_label.clone(),
            })
    }

    /// First Geometry child; later ones are ignored
    ///
    /// # Errors
    ///
    /// `MissingGeometry` if the grid has none.
    pub fn get_geometry(&self) -> Result<&GeometryBlock> {
        self.children
            .iter()
            .find_map(|c| match c {
                GridChild::Geometry(g) => Some(g),
                _ => None,
            })
            .ok_or_else(|| FidelityError::MissingGeometry {
                source_label: self.source_label.clone(),
            })
    }
}
