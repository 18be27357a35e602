//! HDF5 container backend (`hdf5` feature)

use crate::container::{rows_from_shape, ContainerReader};
use simfid_core::errors::{FidelityError, Result};
use simfid_core::model::PayloadRows;
use simfid_core::rules::check_element_limit;
use std::path::Path;

/// Reads datasets with libhdf5; the file handle is closed when the read returns
#[derive(Debug, Default, Clone, Copy)]
pub struct Hdf5Container;

impl ContainerReader for Hdf5Container {
    fn read_dataset(
        &self,
        container: &Path,
        dataset: &str,
        max_elements: Option<usize>,
    ) -> Result<PayloadRows> {
        let io = |reason: String| FidelityError::ContainerIo {
            container: container.display().to_string(),
            dataset: dataset.to_string(),
            reason,
        };

        let file = hdf5::File::open(container).map_err(|e| io(e.to_string()))?;
        let ds = file.dataset(dataset).map_err(|e| io(e.to_string()))?;
        let shape = ds.shape();
        check_element_limit(dataset, ds.size(), max_elements)?;

        let values = ds.read_raw::<f64>().map_err(|e| io(e.to_string()))?;
        tracing::debug!(
            container = %container.display(),
            dataset,
            shape = ?shape,
            "Read HDF5 dataset"
        );
        Ok(rows_from_shape(values, &shape))
    }
}
