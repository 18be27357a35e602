use simfid_core::errors::{FidelityError, Result};
use simfid_core::model::{
    AttributeBlock, DataItemReference, GeometryBlock, GridChild, ParsedDescription, PayloadRows,
    TopologyBlock,
};
use simfid_core::PayloadResolver;
use std::collections::HashMap;

/// In-memory resolver keyed by dataset path
#[derive(Default, Clone)]
pub struct FakeResolver {
    datasets: HashMap<String, PayloadRows>,
}

#[allow(dead_code)]
impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dataset: &str, rows: PayloadRows) -> Self {
        self.datasets.insert(dataset.to_string(), rows);
        self
    }

    /// Register a 1-D dataset (one value per row)
    pub fn with_values(self, dataset: &str, values: &[f64]) -> Self {
        self.with(dataset, values.iter().map(|v| vec![*v]).collect())
    }
}

impl PayloadResolver for FakeResolver {
    fn resolve(&self, item: &DataItemReference) -> Result<PayloadRows> {
        match item {
            DataItemReference::External { container, dataset } => self
                .datasets
                .get(dataset)
                .cloned()
                .ok_or_else(|| FidelityError::ContainerIo {
                    container: container.clone(),
                    dataset: dataset.clone(),
                    reason: "dataset not found".to_string(),
                }),
            DataItemReference::Unsupported { format } => {
                Err(FidelityError::UnsupportedStorageFormat {
                    format: format.clone(),
                })
            }
        }
    }
}

#[allow(dead_code)]
pub fn hdf(dataset: &str) -> Option<DataItemReference> {
    Some(DataItemReference::from_parts(
        Some("HDF"),
        &format!("snapshot.h5:{}", dataset),
    ))
}

#[allow(dead_code)]
pub fn topology(kind: &str, dataset: &str) -> GridChild {
    GridChild::Topology(TopologyBlock {
        topology_type: kind.to_string(),
        data_item: hdf(dataset),
    })
}

#[allow(dead_code)]
pub fn geometry(kind: &str, dataset: &str) -> GridChild {
    GridChild::Geometry(GeometryBlock {
        geometry_type: kind.to_string(),
        data_item: hdf(dataset),
    })
}

#[allow(dead_code)]
pub fn attribute(kind: &str, name: &str, data_item: Option<DataItemReference>) -> GridChild {
    GridChild::Attribute(AttributeBlock {
        tag: "Attribute".to_string(),
        attribute_type: kind.to_string(),
        name: name.to_string(),
        data_item,
    })
}

/// A one-grid description of a two-triangle mesh followed by `attributes`
#[allow(dead_code)]
pub fn triangle_mesh(label: &str, attributes: Vec<GridChild>) -> ParsedDescription {
    let mut children = vec![
        topology("Triangle", "/mesh/connectivity"),
        geometry("XY", "/mesh/nodes"),
    ];
    children.extend(attributes);
    ParsedDescription {
        source_label: label.to_string(),
        grid_count: 1,
        children,
    }
}

/// Resolver holding the mesh datasets used by [`triangle_mesh`]
#[allow(dead_code)]
pub fn triangle_payloads() -> FakeResolver {
    FakeResolver::new()
        .with(
            "/mesh/connectivity",
            vec![vec![0.0, 1.0, 2.0], vec![1.0, 3.0, 2.0]],
        )
        .with(
            "/mesh/nodes",
            vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![0.0, 1.0],
                vec![1.0, 1.0],
            ],
        )
}
