//! Structured-grid description comparison.
//!
//! Stages run in a fixed order and the first failing check ends the run:
//!
//! 1. grid count, then grid child count
//! 2. topology: type, then connectivity rows
//! 3. geometry: type, then node rows
//! 4. attributes, positionally over the grid's children
//!
//! Payloads are only resolved once a block's type check has passed.

use crate::diff::model::ComparisonSummary;
use crate::errors::{FidelityError, Result};
use crate::model::{AttributeBlock, GridChild, ParsedDescription, PayloadRows, Tolerance};
use crate::policy::CompareOptions;
use crate::resolver::{resolve_block, PayloadResolver};
use crate::rules::{check_element_limit, ComparisonRule};

/// Which row-shaped block is being compared; selects the failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowStage {
    Connectivity,
    Nodes,
}

impl RowStage {
    fn block(self) -> &'static str {
        match self {
            RowStage::Connectivity => "Topology",
            RowStage::Nodes => "Geometry",
        }
    }

    fn count_mismatch(self, row: Option<usize>, first: usize, second: usize) -> FidelityError {
        match self {
            RowStage::Connectivity => FidelityError::ConnectivityCountMismatch { row, first, second },
            RowStage::Nodes => FidelityError::NodeCountMismatch { row, first, second },
        }
    }

    fn value_mismatch(
        self,
        row: usize,
        column: usize,
        first: f64,
        second: f64,
        tolerance: f64,
    ) -> FidelityError {
        match self {
            RowStage::Connectivity => FidelityError::ConnectivityValueMismatch {
                row,
                column,
                first,
                second,
                tolerance,
            },
            RowStage::Nodes => FidelityError::NodeValueMismatch {
                row,
                column,
                first,
                second,
                tolerance,
            },
        }
    }
}

/// Compare two parsed descriptions, resolving payloads per file
///
/// Each file gets its own resolver so that relative container paths are
/// looked up next to the file that names them.
///
/// # Errors
///
/// The first classified failure: shape, missing block, type, count or value
/// mismatch, or any payload resolution error.
pub fn compare_descriptions(
    first: &ParsedDescription,
    second: &ParsedDescription,
    options: &CompareOptions,
    first_resolver: &dyn PayloadResolver,
    second_resolver: &dyn PayloadResolver,
) -> Result<ComparisonSummary> {
    if first.grid_count != second.grid_count {
        return Err(FidelityError::GridCountMismatch {
            first: first.grid_count,
            second: second.grid_count,
        });
    }
    if first.cell_count() != second.cell_count() {
        return Err(FidelityError::CellCountMismatch {
            first: first.cell_count(),
            second: second.cell_count(),
        });
    }

    let mut summary = ComparisonSummary::default();

    // Topology
    let topo1 = first.get_topology()?;
    let topo2 = second.get_topology()?;
    if topo1.topology_type != topo2.topology_type {
        return Err(FidelityError::TopologyTypeMismatch {
            first: topo1.topology_type.clone(),
            second: topo2.topology_type.clone(),
        });
    }
    let rows1 = resolve_block(first_resolver, "Topology", topo1.data_item.as_ref())?;
    let rows2 = resolve_block(second_resolver, "Topology", topo2.data_item.as_ref())?;
    let values = compare_rows(
        RowStage::Connectivity,
        &rows1,
        &rows2,
        options.rules.connectivity,
        options,
    )?;
    summary.record_unit(values);

    // Geometry
    let geom1 = first.get_geometry()?;
    let geom2 = second.get_geometry()?;
    if geom1.geometry_type != geom2.geometry_type {
        return Err(FidelityError::GeometryTypeMismatch {
            first: geom1.geometry_type.clone(),
            second: geom2.geometry_type.clone(),
        });
    }
    let rows1 = resolve_block(first_resolver, "Geometry", geom1.data_item.as_ref())?;
    let rows2 = resolve_block(second_resolver, "Geometry", geom2.data_item.as_ref())?;
    let values = compare_rows(
        RowStage::Nodes,
        &rows1,
        &rows2,
        options.rules.geometry,
        options,
    )?;
    summary.record_unit(values);

    // Attributes
    for (index, (child1, child2)) in first.children().iter().zip(second.children()).enumerate() {
        match (child1, child2) {
            (GridChild::Topology(_), GridChild::Topology(_))
            | (GridChild::Geometry(_), GridChild::Geometry(_)) => continue,
            (GridChild::Attribute(attr1), GridChild::Attribute(attr2)) => {
                let values = compare_attribute(
                    index,
                    attr1,
                    attr2,
                    options,
                    first_resolver,
                    second_resolver,
                )?;
                summary.record_unit(values);
            }
            _ => {
                return Err(FidelityError::AttributeTypeMismatch {
                    index,
                    first: child_kind(child1).to_string(),
                    second: child_kind(child2).to_string(),
                });
            }
        }
    }

    Ok(summary)
}

/// Compare row-shaped payloads element-wise, returning the number of values checked
fn compare_rows(
    stage: RowStage,
    first: &PayloadRows,
    second: &PayloadRows,
    rule: ComparisonRule,
    options: &CompareOptions,
) -> Result<usize> {
    if first.len() != second.len() {
        return Err(stage.count_mismatch(None, first.len(), second.len()));
    }
    for (row, (r1, r2)) in first.iter().zip(second).enumerate() {
        if r1.len() != r2.len() {
            return Err(stage.count_mismatch(Some(row), r1.len(), r2.len()));
        }
    }

    let total: usize = first.iter().map(Vec::len).sum();
    check_element_limit(stage.block(), total, options.max_elements)?;

    for (row, (r1, r2)) in first.iter().zip(second).enumerate() {
        if let Some((column, a, b)) = first_rejected(r1, r2, rule, options.tolerance) {
            return Err(stage.value_mismatch(
                row,
                column,
                a,
                b,
                rule.effective_tolerance(options.tolerance),
            ));
        }
    }

    tracing::debug!(block = stage.block(), rows = first.len(), values = total, "block matched");
    Ok(total)
}

fn compare_attribute(
    index: usize,
    attr1: &AttributeBlock,
    attr2: &AttributeBlock,
    options: &CompareOptions,
    first_resolver: &dyn PayloadResolver,
    second_resolver: &dyn PayloadResolver,
) -> Result<usize> {
    if attr1.attribute_type != attr2.attribute_type {
        return Err(FidelityError::AttributeTypeMismatch {
            index,
            first: attr1.attribute_type.clone(),
            second: attr2.attribute_type.clone(),
        });
    }
    if attr1.name != attr2.name {
        return Err(FidelityError::AttributeNameMismatch {
            index,
            first: attr1.name.clone(),
            second: attr2.name.clone(),
        });
    }

    let values1: Vec<f64> = resolve_block(first_resolver, &attr1.tag, attr1.data_item.as_ref())?
        .into_iter()
        .flatten()
        .collect();
    let values2: Vec<f64> = resolve_block(second_resolver, &attr2.tag, attr2.data_item.as_ref())?
        .into_iter()
        .flatten()
        .collect();

    if values1.len() != values2.len() {
        return Err(FidelityError::AttributeValueCountMismatch {
            name: attr1.name.clone(),
            first: values1.len(),
            second: values2.len(),
        });
    }
    check_element_limit(&attr1.name, values1.len(), options.max_elements)?;

    let rule = options.rules.attributes;
    if let Some((element, a, b)) = first_rejected(&values1, &values2, rule, options.tolerance) {
        return Err(FidelityError::AttributeValueMismatch {
            name: attr1.name.clone(),
            element,
            first: a,
            second: b,
            tolerance: rule.effective_tolerance(options.tolerance),
        });
    }

    tracing::debug!(attribute = %attr1.name, values = values1.len(), "attribute matched");
    Ok(values1.len())
}

fn first_rejected(
    first: &[f64],
    second: &[f64],
    rule: ComparisonRule,
    tolerance: Tolerance,
) -> Option<(usize, f64, f64)> {
    first
        .iter()
        .zip(second)
        .enumerate()
        .find(|&(_, (&a, &b))| !rule.accepts(a, b, tolerance))
        .map(|(i, (&a, &b))| (i, a, b))
}

/// Label used when a block and an attribute share a position
fn child_kind(child: &GridChild) -> &str {
    match child {
        GridChild::Topology(_) | GridChild::Geometry(_) => child.tag(),
        GridChild::Attribute(attr) => &attr.attribute_type,
    }
}
