//! In-memory container backend

use crate::container::{rows_from_shape, ContainerReader};
use simfid_core::errors::{FidelityError, Result};
use simfid_core::model::PayloadRows;
use simfid_core::rules::check_element_limit;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Datasets keyed by `(container path, dataset path)`
///
/// Container paths are matched exactly as the resolver builds them, i.e.
/// already joined onto its base directory.
#[derive(Debug, Default, Clone)]
pub struct MemoryContainer {
    datasets: HashMap<(PathBuf, String), PayloadRows>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, container: impl Into<PathBuf>, dataset: &str, rows: PayloadRows) {
        self.datasets
            .insert((container.into(), dataset.to_string()), rows);
    }

    /// Insert a flat row-major buffer with its dataset shape
    pub fn insert_shaped(
        &mut self,
        container: impl Into<PathBuf>,
        dataset: &str,
        values: Vec<f64>,
        shape: &[usize],
    ) {
        self.insert(container, dataset, rows_from_shape(values, shape));
    }

    pub fn with(mut self, container: impl Into<PathBuf>, dataset: &str, rows: PayloadRows) -> Self {
        self.insert(container, dataset, rows);
        self
    }

    fn has_container(&self, container: &Path) -> bool {
        self.datasets.keys().any(|(c, _)| c == container)
    }
}

impl ContainerReader for MemoryContainer {
    fn read_dataset(
        &self,
        container: &Path,
        dataset: &str,
        max_elements: Option<usize>,
    ) -> Result<PayloadRows> {
        let key = (container.to_path_buf(), dataset.to_string());
        let rows = self.datasets.get(&key).ok_or_else(|| {
            let reason = if self.has_container(container) {
                "no such dataset"
            } else {
                "no such container"
            };
            FidelityError::ContainerIo {
                container: container.display().to_string(),
                dataset: dataset.to_string(),
                reason: reason.to_string(),
            }
        })?;
        let count = rows.iter().map(Vec::len).sum();
        check_element_limit(dataset, count, max_elements)?;
        Ok(rows.clone())
    }
}
