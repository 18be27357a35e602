//! Comparison run orchestration.
//!
//! Loads both snapshot files through the store, hands them to the core
//! comparators and owns the lifecycle logging of every run.

#![allow(clippy::result_large_err)]

use serde::{Deserialize, Serialize};
use simfid_core::errors::ExError;
use simfid_core::model::{FileFormat, GridVariant, SnapshotFile, Tolerance};
use simfid_core::policy::{CompareOptions, DEFAULT_MAX_ELEMENTS};
use simfid_core::{
    compare_descriptions, compare_point_data, ComparisonOutcome, ComparisonReport,
    ComparisonSummary,
};
use simfid_core_types::RunContext;
use simfid_store::container::{default_reader, ContainerReader, ContainerResolver};
use simfid_store::digest::file_digest;
use simfid_store::errors::Result;
use simfid_store::{parse_description, read_point_data};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Everything one comparison run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    /// Reference snapshot (file 1)
    pub first: PathBuf,
    /// Candidate snapshot (file 2)
    pub second: PathBuf,
    /// `vtu`, `pvtu`, `xdmf` or `xmf`
    pub format_tag: String,
    /// Tolerance override; `None` uses the default budget
    pub tolerance: Option<f64>,
    /// Base directory for payload containers; `None` uses each description's own directory
    pub data_dir: Option<PathBuf>,
    /// Element cap override; `Some(0)` disables the cap
    pub max_elements: Option<usize>,
    /// Free-form run label carried into the logs
    pub label: Option<String>,
}

impl ComparisonRequest {
    pub fn new(
        first: impl Into<PathBuf>,
        second: impl Into<PathBuf>,
        format_tag: impl Into<String>,
    ) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            format_tag: format_tag.into(),
            tolerance: None,
            data_dir: None,
            max_elements: None,
            label: None,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = Some(max_elements);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Validated comparison options for this request
    ///
    /// # Errors
    ///
    /// `InvalidTolerance` if the override is negative or not finite.
    pub fn options(&self) -> Result<CompareOptions> {
        let tolerance = Tolerance::from_override(self.tolerance)?;
        let max_elements = match self.max_elements {
            None => Some(DEFAULT_MAX_ELEMENTS),
            Some(0) => None,
            Some(cap) => Some(cap),
        };
        Ok(CompareOptions::default()
            .with_tolerance(tolerance)
            .with_max_elements(max_elements))
    }
}

/// Compare the point data of two unstructured-grid files
///
/// Both files are read with the reader for `variant`.
pub fn compare_unstructured(
    first: &Path,
    second: &Path,
    variant: GridVariant,
    options: &CompareOptions,
) -> Result<ComparisonSummary> {
    let start = Instant::now();
    simfid_core::log_op_start!(
        "compare_unstructured",
        first_path = %first.display(),
        second_path = %second.display(),
        tolerance = options.tolerance.value()
    );

    let result = read_point_data(first, variant).and_then(|first_arrays| {
        let second_arrays = read_point_data(second, variant)?;
        compare_point_data(&first_arrays, &second_arrays, options).map_err(ExError::from)
    });

    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(summary) => {
            simfid_core::log_op_end!(
                "compare_unstructured",
                duration_ms = duration_ms,
                units_compared = summary.units_compared,
                values_compared = summary.values_compared
            );
            Ok(summary)
        }
        Err(e) => {
            simfid_core::log_op_error!("compare_unstructured", e.clone(), duration_ms = duration_ms);
            Err(e)
        }
    }
}

/// Compare two XDMF descriptions, resolving payloads through `reader`
///
/// Container paths resolve against `data_dir` when given, otherwise against
/// the directory of the description that names them.
pub fn compare_structured(
    first: &Path,
    second: &Path,
    options: &CompareOptions,
    data_dir: Option<&Path>,
    reader: &dyn ContainerReader,
) -> Result<ComparisonSummary> {
    let start = Instant::now();
    simfid_core::log_op_start!(
        "compare_structured",
        first_path = %first.display(),
        second_path = %second.display(),
        tolerance = options.tolerance.value()
    );

    let result = parse_description(first).and_then(|first_desc| {
        let second_desc = parse_description(second)?;
        let first_resolver = ContainerResolver::new(payload_base(first, data_dir), reader)
            .with_max_elements(options.max_elements);
        let second_resolver = ContainerResolver::new(payload_base(second, data_dir), reader)
            .with_max_elements(options.max_elements);
        compare_descriptions(
            &first_desc,
            &second_desc,
            options,
            &first_resolver,
            &second_resolver,
        )
        .map_err(ExError::from)
    });

    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(summary) => {
            simfid_core::log_op_end!(
                "compare_structured",
                duration_ms = duration_ms,
                units_compared = summary.units_compared,
                values_compared = summary.values_compared
            );
            Ok(summary)
        }
        Err(e) => {
            simfid_core::log_op_error!("compare_structured", e.clone(), duration_ms = duration_ms);
            Err(e)
        }
    }
}

fn payload_base(description: &Path, data_dir: Option<&Path>) -> PathBuf {
    match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => description
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    }
}

/// Run one comparison with the container backend this build supports
pub fn run_comparison(request: &ComparisonRequest) -> ComparisonOutcome {
    run_comparison_with_reader(request, default_reader().as_ref())
}

/// Run one comparison end to end
///
/// The format tag and tolerance are validated before any file is opened.
/// Every failure carries the run id.
pub fn run_comparison_with_reader(
    request: &ComparisonRequest,
    reader: &dyn ContainerReader,
) -> ComparisonOutcome {
    let mut ctx = RunContext::new();
    if let Some(label) = &request.label {
        ctx = ctx.with_label(label.clone());
    }
    let start = Instant::now();
    simfid_core::log_op_start!(
        "run_comparison",
        run_id = ctx.run_id.as_str(),
        format = request.format_tag.as_str(),
        label = ctx.label.as_deref().unwrap_or("")
    );

    let result = execute(request, reader, &ctx).map_err(|e| e.with_run_id(ctx.run_id.clone()));

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(report) => {
            simfid_core::log_op_end!(
                "run_comparison",
                duration_ms = duration_ms,
                run_id = ctx.run_id.as_str(),
                units_compared = report.units_compared,
                values_compared = report.values_compared
            );
        }
        Err(e) => {
            simfid_core::log_op_error!(
                "run_comparison",
                e.clone(),
                duration_ms = duration_ms,
                run_id = ctx.run_id.as_str(),
                mismatch = e.kind().is_mismatch()
            );
        }
    }
    result
}

fn execute(
    request: &ComparisonRequest,
    reader: &dyn ContainerReader,
    ctx: &RunContext,
) -> Result<ComparisonReport> {
    let format = FileFormat::from_tag(&request.format_tag)?;
    let options = request.options()?;

    let first = SnapshotFile::resolve(&request.first, format);
    let second = SnapshotFile::resolve(&request.second, format);

    let summary = match first.format().grid_variant() {
        Some(variant) => compare_unstructured(first.path(), second.path(), variant, &options)?,
        None => compare_structured(
            first.path(),
            second.path(),
            &options,
            request.data_dir.as_deref(),
            reader,
        )?,
    };

    let report = ComparisonReport::new(ctx.run_id.clone(), format, options.tolerance, summary)
        .with_digests(file_digest(first.path())?, file_digest(second.path())?);
    Ok(report)
}
