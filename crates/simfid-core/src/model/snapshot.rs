use crate::errors::{FidelityError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The on-disk representation selected by the caller's format tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Single-piece VTK XML unstructured grid
    Vtu,
    /// Partitioned VTK XML unstructured grid
    Pvtu,
    /// XDMF description with HDF5 payloads (`xdmf` or `xmf`)
    Xdmf,
}

impl FileFormat {
    /// Parse a format tag
    ///
    /// Tags are matched case-insensitively; `xmf` is an alias for `xdmf`.
    ///
    /// # Errors
    ///
    /// `UnsupportedFileType` for any other tag.
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "vtu" => Ok(FileFormat::Vtu),
            "pvtu" => Ok(FileFormat::Pvtu),
            "xdmf" | "xmf" => Ok(FileFormat::Xdmf),
            _ => Err(FidelityError::UnsupportedFileType {
                tag: tag.to_string(),
            }),
        }
    }

    /// Canonical tag
    pub fn tag(self) -> &'static str {
        match self {
            FileFormat::Vtu => "vtu",
            FileFormat::Pvtu => "pvtu",
            FileFormat::Xdmf => "xdmf",
        }
    }

    /// The unstructured-grid reader variant, if this is an unstructured format
    pub fn grid_variant(self) -> Option<GridVariant> {
        match self {
            FileFormat::Vtu => Some(GridVariant::Single),
            FileFormat::Pvtu => Some(GridVariant::Partitioned),
            FileFormat::Xdmf => None,
        }
    }
}

impl FromStr for FileFormat {
    type Err = FidelityError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s)
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Which unstructured-grid reader to use; one variant governs both inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridVariant {
    Single,
    Partitioned,
}

/// A resolved on-disk artifact taking part in a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotFile {
    UnstructuredGrid { path: PathBuf, partitioned: bool },
    StructuredDescription { path: PathBuf },
}

impl SnapshotFile {
    /// Pair a path with the format the caller selected
    pub fn resolve(path: impl Into<PathBuf>, format: FileFormat) -> Self {
        let path = path.into();
        match format {
            FileFormat::Vtu => SnapshotFile::UnstructuredGrid {
                path,
                partitioned: false,
            },
            FileFormat::Pvtu => SnapshotFile::UnstructuredGrid {
                path,
                partitioned: true,
            },
            FileFormat::Xdmf => SnapshotFile::StructuredDescription { path },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            SnapshotFile::UnstructuredGrid { path, .. } => path,
            SnapshotFile::StructuredDescription { path } => path,
        }
    }

    pub fn format(&self) -> FileFormat {
        match self {
            SnapshotFile::UnstructuredGrid {
                partitioned: false, ..
            } => FileFormat::Vtu,
            SnapshotFile::UnstructuredGrid {
                partitioned: true, ..
            } => FileFormat::Pvtu,
            SnapshotFile::StructuredDescription { .. } => FileFormat::Xdmf,
        }
    }
}
