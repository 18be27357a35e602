use simfid_core_types::RunId;
use thiserror::Error;

/// Result type alias using FidelityError
pub type Result<T> = std::result::Result<T, FidelityError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of every way a
/// fidelity run can end without success. Each kind maps to a stable error code
/// that can be used for programmatic handling, testing and CI log scraping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input selection
    UnsupportedFileType,
    InvalidTolerance,

    // Unstructured-grid point data
    ArrayCountMismatch,
    ArrayNameMismatch,
    ArraySizeMismatch,
    ArrayValueMismatch,

    // Structured description shape
    GridCountMismatch,
    CellCountMismatch,
    MissingTopology,
    MissingGeometry,

    // Topology
    TopologyTypeMismatch,
    ConnectivityCountMismatch,
    ConnectivityValueMismatch,

    // Geometry
    GeometryTypeMismatch,
    NodeCountMismatch,
    NodeValueMismatch,

    // Attributes
    AttributeTypeMismatch,
    AttributeNameMismatch,
    AttributeValueCountMismatch,
    AttributeValueMismatch,

    // Payload resolution
    UnsupportedStorageFormat,
    ContainerIo,
    /// A Topology/Geometry/Attribute block has no DataItem child
    MissingDataItem,

    // Input decoding
    /// A VTK XML file could not be decoded into point-data arrays
    MalformedGrid,
    /// An XDMF description is not valid XML or lacks a Domain/Grid
    MalformedDescription,

    // Resource limits
    ElementLimitExceeded,

    // Integration/IO
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::UnsupportedFileType => "ERR_UNSUPPORTED_FILE_TYPE",
            ExErrorKind::InvalidTolerance => "ERR_INVALID_TOLERANCE",
            ExErrorKind::ArrayCountMismatch => "ERR_ARRAY_COUNT_MISMATCH",
            ExErrorKind::ArrayNameMismatch => "ERR_ARRAY_NAME_MISMATCH",
            ExErrorKind::ArraySizeMismatch => "ERR_ARRAY_SIZE_MISMATCH",
            ExErrorKind::ArrayValueMismatch => "ERR_ARRAY_VALUE_MISMATCH",
            ExErrorKind::GridCountMismatch => "ERR_GRID_COUNT_MISMATCH",
            ExErrorKind::CellCountMismatch => "ERR_CELL_COUNT_MISMATCH",
            ExErrorKind::MissingTopology => "ERR_MISSING_TOPOLOGY",
            ExErrorKind::MissingGeometry => "ERR_MISSING_GEOMETRY",
            ExErrorKind::TopologyTypeMismatch => "ERR_TOPOLOGY_TYPE_MISMATCH",
            ExErrorKind::ConnectivityCountMismatch => "ERR_CONNECTIVITY_COUNT_MISMATCH",
            ExErrorKind::ConnectivityValueMismatch => "ERR_CONNECTIVITY_VALUE_MISMATCH",
            ExErrorKind::GeometryTypeMismatch => "ERR_GEOMETRY_TYPE_MISMATCH",
            ExErrorKind::NodeCountMismatch => "ERR_NODE_COUNT_MISMATCH",
            ExErrorKind::NodeValueMismatch => "ERR_NODE_VALUE_MISMATCH",
            ExErrorKind::AttributeTypeMismatch => "ERR_ATTRIBUTE_TYPE_MISMATCH",
            ExErrorKind::AttributeNameMismatch => "ERR_ATTRIBUTE_NAME_MISMATCH",
            ExErrorKind::AttributeValueCountMismatch => "ERR_ATTRIBUTE_VALUE_COUNT_MISMATCH",
            ExErrorKind::AttributeValueMismatch => "ERR_ATTRIBUTE_VALUE_MISMATCH",
            ExErrorKind::UnsupportedStorageFormat => "ERR_UNSUPPORTED_STORAGE_FORMAT",
            ExErrorKind::ContainerIo => "ERR_CONTAINER_IO",
            ExErrorKind::MissingDataItem => "ERR_MISSING_DATA_ITEM",
            ExErrorKind::MalformedGrid => "ERR_MALFORMED_GRID",
            ExErrorKind::MalformedDescription => "ERR_MALFORMED_DESCRIPTION",
            ExErrorKind::ElementLimitExceeded => "ERR_ELEMENT_LIMIT_EXCEEDED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether this kind is a fidelity verdict (the files were read and differ)
    /// rather than a failure to read or select the inputs.
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            ExErrorKind::ArrayCountMismatch
                | ExErrorKind::ArrayNameMismatch
                | ExErrorKind::ArraySizeMismatch
                | ExErrorKind::ArrayValueMismatch
                | ExErrorKind::GridCountMismatch
                | ExErrorKind::CellCountMismatch
                | ExErrorKind::TopologyTypeMismatch
                | ExErrorKind::ConnectivityCountMismatch
                | ExErrorKind::ConnectivityValueMismatch
                | ExErrorKind::GeometryTypeMismatch
                | ExErrorKind::NodeCountMismatch
                | ExErrorKind::NodeValueMismatch
                | ExErrorKind::AttributeTypeMismatch
                | ExErrorKind::AttributeNameMismatch
                | ExErrorKind::AttributeValueCountMismatch
                | ExErrorKind::AttributeValueMismatch
        )
    }
}

/// Canonical structured error type
///
/// Carries the classification plus the diagnostic payload a fidelity failure
/// needs: which unit (array or attribute name, index), which element, the value
/// seen in each file and the tolerance that was applied.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    subject: Option<String>,
    index: Option<usize>,
    element_index: Option<usize>,
    first: Option<String>,
    second: Option<String>,
    tolerance: Option<f64>,
    path: Option<String>,
    run_id: Option<RunId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            subject: None,
            index: None,
            element_index: None,
            first: None,
            second: None,
            tolerance: None,
            path: None,
            run_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the name of the compared unit (array, attribute or block)
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Add the positional index of the compared unit
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Add the element index inside the compared unit
    pub fn with_element_index(mut self, element_index: usize) -> Self {
        self.element_index = Some(element_index);
        self
    }

    /// Add what file 1 and file 2 held at the point of failure
    pub fn with_values(mut self, first: impl ToString, second: impl ToString) -> Self {
        self.first = Some(first.to_string());
        self.second = Some(second.to_string());
        self
    }

    /// Add the tolerance that was applied
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Add the path of the file involved
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add run correlation
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the compared unit's name, if any
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Get the compared unit's index, if any
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Get the element index, if any
    pub fn element_index(&self) -> Option<usize> {
        self.element_index
    }

    /// Get the file 1 value, if any
    pub fn first(&self) -> Option<&str> {
        self.first.as_deref()
    }

    /// Get the file 2 value, if any
    pub fn second(&self) -> Option<&str> {
        self.second.as_deref()
    }

    /// Get the applied tolerance, if any
    pub fn tolerance(&self) -> Option<f64> {
        self.tolerance
    }

    /// Get the file path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the run id, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(subject) = &self.subject {
            write!(f, " (subject: {})", subject)?;
        }
        if let Some(index) = self.index {
            write!(f, " (index: {})", index)?;
        }
        if let Some(element) = self.element_index {
            write!(f, " (element: {})", element)?;
        }
        if let Some(tolerance) = self.tolerance {
            write!(f, " (tolerance: {})", tolerance)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Classified failures raised by the comparison core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FidelityError {
    // ===== Input Selection =====
    /// Format tag is not one of vtu, pvtu, xdmf, xmf
    #[error("File type not supported: {tag}")]
    UnsupportedFileType { tag: String },

    /// Tolerance override is negative or not finite
    #[error("Invalid tolerance {value}: {reason}")]
    InvalidTolerance { value: f64, reason: String },

    // ===== Point Data =====
    #[error("Mismatched data array count: file 1 has {first}, file 2 has {second}")]
    ArrayCountMismatch { first: usize, second: usize },

    #[error("Mismatched data array names at index {index}: file 1 has '{first}', file 2 has '{second}'")]
    ArrayNameMismatch {
        index: usize,
        first: String,
        second: String,
    },

    #[error("Mismatched data array sizes for '{name}' (index {index}): file 1 has {first}, file 2 has {second}")]
    ArraySizeMismatch {
        index: usize,
        name: String,
        first: usize,
        second: usize,
    },

    #[error("Mismatched data array values with given tolerance: '{name}' (index {index}) element {element}: {first} vs {second}, tolerance {tolerance}")]
    ArrayValueMismatch {
        index: usize,
        name: String,
        element: usize,
        first: f64,
        second: f64,
        tolerance: f64,
    },

    // ===== Description Shape =====
    #[error("Mismatched grid count: file 1 has {first}, file 2 has {second}")]
    GridCountMismatch { first: usize, second: usize },

    #[error("Mismatched grid child count: file 1 has {first}, file 2 has {second}")]
    CellCountMismatch { first: usize, second: usize },

    #[error("File is missing grid connectivity data: {source_label}")]
    MissingTopology { source_label: String },

    #[error("File is missing grid node location data: {source_label}")]
    MissingGeometry { source_label: String },

    // ===== Topology =====
    #[error("Mismatched topology type: file 1 has '{first}', file 2 has '{second}'")]
    TopologyTypeMismatch { first: String, second: String },

    /// `row` is `None` for a row-count difference, `Some` for a row-width difference
    #[error("Mismatched connectivity count{}: file 1 has {first}, file 2 has {second}", row_suffix(.row))]
    ConnectivityCountMismatch {
        row: Option<usize>,
        first: usize,
        second: usize,
    },

    #[error("Mismatched connectivity at row {row} column {column}: {first} vs {second}, tolerance {tolerance}")]
    ConnectivityValueMismatch {
        row: usize,
        column: usize,
        first: f64,
        second: f64,
        tolerance: f64,
    },

    // ===== Geometry =====
    #[error("Mismatched geometry type: file 1 has '{first}', file 2 has '{second}'")]
    GeometryTypeMismatch { first: String, second: String },

    /// `row` is `None` for a node-count difference, `Some` for a coordinate-width difference
    #[error("Mismatched node count{}: file 1 has {first}, file 2 has {second}", row_suffix(.row))]
    NodeCountMismatch {
        row: Option<usize>,
        first: usize,
        second: usize,
    },

    #[error("Mismatched node location at row {row} column {column}: {first} vs {second}, tolerance {tolerance}")]
    NodeValueMismatch {
        row: usize,
        column: usize,
        first: f64,
        second: f64,
        tolerance: f64,
    },

    // ===== Attributes =====
    #[error("Mismatched attribute type at grid child {index}: file 1 has '{first}', file 2 has '{second}'")]
    AttributeTypeMismatch {
        index: usize,
        first: String,
        second: String,
    },

    #[error("Mismatched attribute name at grid child {index}: file 1 has '{first}', file 2 has '{second}'")]
    AttributeNameMismatch {
        index: usize,
        first: String,
        second: String,
    },

    #[error("Mismatched value count for attribute '{name}': file 1 has {first}, file 2 has {second}")]
    AttributeValueCountMismatch {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("Mismatched values for attribute '{name}' element {element}: {first} vs {second}, tolerance {tolerance}")]
    AttributeValueMismatch {
        name: String,
        element: usize,
        first: f64,
        second: f64,
        tolerance: f64,
    },

    // ===== Payload Resolution =====
    #[error("Data stored in unrecognized format: '{format}'")]
    UnsupportedStorageFormat { format: String },

    #[error("Cannot read dataset '{dataset}' from container '{container}': {reason}")]
    ContainerIo {
        container: String,
        dataset: String,
        reason: String,
    },

    #[error("{block} block has no DataItem")]
    MissingDataItem { block: String },

    // ===== Resource Limits =====
    #[error("{unit} holds {count} elements, above the limit of {limit}")]
    ElementLimitExceeded {
        unit: String,
        count: usize,
        limit: usize,
    },
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(row) => format!(" at row {}", row),
        None => String::new(),
    }
}

/// Convert FidelityError to ExError
impl From<FidelityError> for ExError {
    fn from(err: FidelityError) -> Self {
        let message = err.to_string();
        match err {
            FidelityError::UnsupportedFileType { tag } => {
                ExError::new(ExErrorKind::UnsupportedFileType)
                    .with_op("select_format")
                    .with_subject(tag)
            }

            FidelityError::InvalidTolerance { value, .. } => {
                ExError::new(ExErrorKind::InvalidTolerance)
                    .with_op("select_tolerance")
                    .with_tolerance(value)
            }

            FidelityError::ArrayCountMismatch { first, second } => {
                ExError::new(ExErrorKind::ArrayCountMismatch)
                    .with_op("compare_point_data")
                    .with_values(first, second)
            }

            FidelityError::ArrayNameMismatch {
                index,
                first,
                second,
            } => ExError::new(ExErrorKind::ArrayNameMismatch)
                .with_op("compare_point_data")
                .with_index(index)
                .with_values(first, second),

            FidelityError::ArraySizeMismatch {
                index,
                name,
                first,
                second,
            } => ExError::new(ExErrorKind::ArraySizeMismatch)
                .with_op("compare_point_data")
                .with_subject(name)
                .with_index(index)
                .with_values(first, second),

            FidelityError::ArrayValueMismatch {
                index,
                name,
                element,
                first,
                second,
                tolerance,
            } => ExError::new(ExErrorKind::ArrayValueMismatch)
                .with_op("compare_point_data")
                .with_subject(name)
                .with_index(index)
                .with_element_index(element)
                .with_values(first, second)
                .with_tolerance(tolerance),

            FidelityError::GridCountMismatch { first, second } => {
                ExError::new(ExErrorKind::GridCountMismatch)
                    .with_op("compare_description")
                    .with_values(first, second)
            }

            FidelityError::CellCountMismatch { first, second } => {
                ExError::new(ExErrorKind::CellCountMismatch)
                    .with_op("compare_description")
                    .with_values(first, second)
            }

            FidelityError::MissingTopology { source_label } => {
                ExError::new(ExErrorKind::MissingTopology)
                    .with_op("get_topology")
                    .with_path(source_label)
            }

            FidelityError::MissingGeometry { source_label } => {
                ExError::new(ExErrorKind::MissingGeometry)
                    .with_op("get_geometry")
                    .with_path(source_label)
            }

            FidelityError::TopologyTypeMismatch { first, second } => {
                ExError::new(ExErrorKind::TopologyTypeMismatch)
                    .with_op("compare_topology")
                    .with_subject("Topology")
                    .with_values(first, second)
            }

            FidelityError::ConnectivityCountMismatch { row, first, second } => {
                let err = ExError::new(ExErrorKind::ConnectivityCountMismatch)
                    .with_op("compare_topology")
                    .with_subject("Topology")
                    .with_values(first, second);
                match row {
                    Some(row) => err.with_index(row),
                    None => err,
                }
            }

            FidelityError::ConnectivityValueMismatch {
                row,
                column,
                first,
                second,
                tolerance,
            } => ExError::new(ExErrorKind::ConnectivityValueMismatch)
                .with_op("compare_topology")
                .with_subject("Topology")
                .with_index(row)
                .with_element_index(column)
                .with_values(first, second)
                .with_tolerance(tolerance),

            FidelityError::GeometryTypeMismatch { first, second } => {
                ExError::new(ExErrorKind::GeometryTypeMismatch)
                    .with_op("compare_geometry")
                    .with_subject("Geometry")
                    .with_values(first, second)
            }

            FidelityError::NodeCountMismatch { row, first, second } => {
                let err = ExError::new(ExErrorKind::NodeCountMismatch)
                    .with_op("compare_geometry")
                    .with_subject("Geometry")
                    .with_values(first, second);
                match row {
                    Some(row) => err.with_index(row),
                    None => err,
                }
            }

            FidelityError::NodeValueMismatch {
                row,
                column,
                first,
                second,
                tolerance,
            } => ExError::new(ExErrorKind::NodeValueMismatch)
                .with_op("compare_geometry")
                .with_subject("Geometry")
                .with_index(row)
                .with_element_index(column)
                .with_values(first, second)
                .with_tolerance(tolerance),

            FidelityError::AttributeTypeMismatch {
                index,
                first,
                second,
            } => ExError::new(ExErrorKind::AttributeTypeMismatch)
                .with_op("compare_attributes")
                .with_index(index)
                .with_values(first, second),

            FidelityError::AttributeNameMismatch {
                index,
                first,
                second,
            } => ExError::new(ExErrorKind::AttributeNameMismatch)
                .with_op("compare_attributes")
                .with_index(index)
                .with_values(first, second),

            FidelityError::AttributeValueCountMismatch {
                name,
                first,
                second,
            } => ExError::new(ExErrorKind::AttributeValueCountMismatch)
                .with_op("compare_attributes")
                .with_subject(name)
                .with_values(first, second),

            FidelityError::AttributeValueMismatch {
                name,
                element,
                first,
                second,
                tolerance,
            } => ExError::new(ExErrorKind::AttributeValueMismatch)
                .with_op("compare_attributes")
                .with_subject(name)
                .with_element_index(element)
                .with_values(first, second)
                .with_tolerance(tolerance),

            FidelityError::UnsupportedStorageFormat { format } => {
                ExError::new(ExErrorKind::UnsupportedStorageFormat)
                    .with_op("resolve_data_item")
                    .with_subject(format)
            }

            FidelityError::ContainerIo {
                container, dataset, ..
            } => ExError::new(ExErrorKind::ContainerIo)
                .with_op("resolve_data_item")
                .with_subject(dataset)
                .with_path(container),

            FidelityError::MissingDataItem { block } => {
                ExError::new(ExErrorKind::MissingDataItem)
                    .with_op("resolve_data_item")
                    .with_subject(block)
            }

            FidelityError::ElementLimitExceeded { unit, count, limit } => {
                ExError::new(ExErrorKind::ElementLimitExceeded)
                    .with_op("check_limits")
                    .with_subject(unit)
                    .with_values(count, limit)
            }
        }
        .with_message(message)
    }
}
