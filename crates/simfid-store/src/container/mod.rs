//! External payload containers.
//!
//! A [`ContainerResolver`] joins each DataItem's container path onto a base
//! directory (absolute container paths are rejected) and hands the lookup
//! to a [`ContainerReader`] backend. The HDF5 backend comes with the default `hdf5` feature; in builds without it,
//! [`default_reader`] returns a backend that reports the missing support.

#[cfg(feature = "hdf5")]
pub mod hdf5;
pub mod memory;

use simfid_core::errors::{FidelityError, Result};
use simfid_core::model::{DataItemReference, PayloadRows};
use simfid_core::PayloadResolver;
use std::path::{Path, PathBuf};

pub use memory::MemoryContainer;

/// Reads one dataset out of one container file
pub trait ContainerReader {
    /// Read `dataset` from the container at `container` as rows
    ///
    /// # Errors
    ///
    /// `ContainerIo` if the container cannot be opened or lacks the dataset;
    /// `ElementLimitExceeded` if the dataset holds more than `max_elements` values.
    fn read_dataset(
        &self,
        container: &Path,
        dataset: &str,
        max_elements: Option<usize>,
    ) -> Result<PayloadRows>;
}

impl<R: ContainerReader + ?Sized> ContainerReader for &R {
    fn read_dataset(
        &self,
        container: &Path,
        dataset: &str,
        max_elements: Option<usize>,
    ) -> Result<PayloadRows> {
        (**self).read_dataset(container, dataset, max_elements)
    }
}

impl<R: ContainerReader + ?Sized> ContainerReader for Box<R> {
    fn read_dataset(
        &self,
        container: &Path,
        dataset: &str,
        max_elements: Option<usize>,
    ) -> Result<PayloadRows> {
        (**self).read_dataset(container, dataset, max_elements)
    }
}

/// Backend used when no container library is compiled in
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableContainer;

impl ContainerReader for UnavailableContainer {
    fn read_dataset(
        &self,
        container: &Path,
        dataset: &str,
        _max_elements: Option<usize>,
    ) -> Result<PayloadRows> {
        let reason = if container.exists() {
            "HDF5 support not compiled in (build with the `hdf5` feature)"
        } else {
            "container does not exist"
        };
        Err(FidelityError::ContainerIo {
            container: container.display().to_string(),
            dataset: dataset.to_string(),
            reason: reason.to_string(),
        })
    }
}

/// The container backend this build supports
pub fn default_reader() -> Box<dyn ContainerReader> {
    #[cfg(feature = "hdf5")]
    {
        Box::new(self::hdf5::Hdf5Container)
    }
    #[cfg(not(feature = "hdf5"))]
    {
        Box::new(UnavailableContainer)
    }
}

/// [`PayloadResolver`] backed by container files under one base directory
pub struct ContainerResolver<R> {
    base_dir: PathBuf,
    reader: R,
    max_elements: Option<usize>,
}

impl<R: ContainerReader> ContainerResolver<R> {
    pub fn new(base_dir: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            base_dir: base_dir.into(),
            reader,
            max_elements: None,
        }
    }

    pub fn with_max_elements(mut self, max_elements: Option<usize>) -> Self {
        self.max_elements = max_elements;
        self
    }
}

impl<R: ContainerReader> PayloadResolver for ContainerResolver<R> {
    fn resolve(&self, item: &DataItemReference) -> Result<PayloadRows> {
        match item {
            DataItemReference::External { container, dataset } => {
                // Path::join would replace the base with an absolute path
                if Path::new(container).has_root() {
                    return Err(FidelityError::ContainerIo {
                        container: container.clone(),
                        dataset: dataset.clone(),
                        reason: "container path must be relative to the data directory"
                            .to_string(),
                    });
                }
                let path = self.base_dir.join(container);
                tracing::debug!(container = %path.display(), dataset = %dataset, "Resolving payload");
                self.reader.read_dataset(&path, dataset, self.max_elements)
            }
            DataItemReference::Unsupported { format } => {
                Err(FidelityError::UnsupportedStorageFormat {
                    format: format.clone(),
                })
            }
        }
    }
}

/// Split a flat row-major buffer into rows of the trailing dimensions
///
/// A 1-D (or scalar) shape yields one value per row; higher ranks yield rows
/// as wide as the product of the trailing dimensions.
pub fn rows_from_shape(values: Vec<f64>, shape: &[usize]) -> PayloadRows {
    if shape.len() < 2 {
        return values.into_iter().map(|v| vec![v]).collect();
    }
    let width = shape[1..].iter().product::<usize>();
    if width == 0 {
        return vec![Vec::new(); shape[0]];
    }
    values.chunks(width).map(<[f64]>::to_vec).collect()
}
