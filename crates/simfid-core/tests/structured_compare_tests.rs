#![allow(clippy::unwrap_used)]

mod common;

use common::{attribute, geometry, hdf, topology, triangle_mesh, triangle_payloads, FakeResolver};
use simfid_core::errors::FidelityError;
use simfid_core::model::{DataItemReference, GridChild, ParsedDescription};
use simfid_core::{compare_descriptions, CompareOptions};

#[test]
fn test_identical_meshes_pass() {
    let desc = triangle_mesh(
        "a.xmf",
        vec![attribute("Scalar", "energy", hdf("/fields/energy"))],
    );
    let payloads = triangle_payloads().with_values("/fields/energy", &[1.0, 2.0, 3.0, 4.0]);

    let summary = compare_descriptions(
        &desc,
        &desc,
        &CompareOptions::default(),
        &payloads,
        &payloads,
    )
    .unwrap();

    // topology, geometry and one attribute
    assert_eq!(summary.units_compared, 3);
    assert_eq!(summary.values_compared, 6 + 8 + 4);
}

#[test]
fn test_energy_difference_names_attribute() {
    let desc = triangle_mesh(
        "a.xmf",
        vec![attribute("Scalar", "energy", hdf("/fields/energy"))],
    );
    let first = triangle_payloads().with_values("/fields/energy", &[1.0, 2.0, 3.0, 4.0]);
    let second = triangle_payloads().with_values("/fields/energy", &[1.0, 2.5, 3.0, 4.0]);

    let err = compare_descriptions(&desc, &desc, &CompareOptions::default(), &first, &second)
        .unwrap_err();

    assert_eq!(
        err,
        FidelityError::AttributeValueMismatch {
            name: "energy".to_string(),
            element: 1,
            first: 2.0,
            second: 2.5,
            tolerance: 1e-12,
        }
    );
}

#[test]
fn test_inline_data_item_is_unsupported_storage() {
    let inline = Some(DataItemReference::from_parts(Some("XML"), "1 2 3 4"));
    let desc = triangle_mesh("a.xmf", vec![attribute("Scalar", "energy", inline)]);
    let payloads = triangle_payloads();

    let err = compare_descriptions(
        &desc,
        &desc,
        &CompareOptions::default(),
        &payloads,
        &payloads,
    )
    .unwrap_err();

    assert_eq!(
        err,
        FidelityError::UnsupportedStorageFormat {
            format: "XML".to_string()
        }
    );
}

#[test]
fn test_grid_count_checked_first() {
    let first = triangle_mesh("a.xmf", vec![]);
    let mut second = triangle_mesh("b.xmf", vec![attribute("Scalar", "energy", None)]);
    second.grid_count = 2;
    let empty = FakeResolver::new();

    assert_eq!(
        compare_descriptions(&first, &second, &CompareOptions::default(), &empty, &empty),
        Err(FidelityError::GridCountMismatch {
            first: 1,
            second: 2
        })
    );
}

#[test]
fn test_cell_count_mismatch() {
    let first = triangle_mesh("a.xmf", vec![]);
    let second = triangle_mesh("b.xmf", vec![attribute("Scalar", "energy", None)]);
    let empty = FakeResolver::new();

    assert_eq!(
        compare_descriptions(&first, &second, &CompareOptions::default(), &empty, &empty),
        Err(FidelityError::CellCountMismatch {
            first: 2,
            second: 3
        })
    );
}

#[test]
fn test_missing_geometry_reports_source() {
    let first = ParsedDescription {
        source_label: "a.xmf".to_string(),
        grid_count: 1,
        children: vec![
            topology("Triangle", "/mesh/connectivity"),
            attribute("Scalar", "energy", None),
        ],
    };
    let payloads = triangle_payloads();

    assert_eq!(
        compare_descriptions(&first, &first, &CompareOptions::default(), &payloads, &payloads),
        Err(FidelityError::MissingGeometry {
            source_label: "a.xmf".to_string()
        })
    );
}

#[test]
fn test_node_count_mismatch() {
    let desc = triangle_mesh("a.xmf", vec![]);
    let first = triangle_payloads();
    let second = triangle_payloads().with("/mesh/nodes", vec![vec![0.0, 0.0]]);

    assert_eq!(
        compare_descriptions(&desc, &desc, &CompareOptions::default(), &first, &second),
        Err(FidelityError::NodeCountMismatch {
            row: None,
            first: 4,
            second: 1,
        })
    );
}

#[test]
fn test_node_values_use_absolute_delta() {
    let desc = triangle_mesh("a.xmf", vec![]);
    let first = triangle_payloads();
    // file 1 below file 2 still fails here, unlike point data
    let second = triangle_payloads().with(
        "/mesh/nodes",
        vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.5],
            vec![1.0, 1.0],
        ],
    );

    assert_eq!(
        compare_descriptions(&desc, &desc, &CompareOptions::default(), &first, &second),
        Err(FidelityError::NodeValueMismatch {
            row: 2,
            column: 1,
            first: 1.0,
            second: 1.5,
            tolerance: 1e-12,
        })
    );
}

#[test]
fn test_attribute_name_checked_before_payload() {
    let first = triangle_mesh("a.xmf", vec![attribute("Scalar", "energy", hdf("/missing"))]);
    let second = triangle_mesh("b.xmf", vec![attribute("Scalar", "density", hdf("/missing"))]);
    let payloads = triangle_payloads();

    assert_eq!(
        compare_descriptions(&first, &second, &CompareOptions::default(), &payloads, &payloads),
        Err(FidelityError::AttributeNameMismatch {
            index: 2,
            first: "energy".to_string(),
            second: "density".to_string(),
        })
    );
}

#[test]
fn test_attribute_value_count_mismatch() {
    let desc = triangle_mesh("a.xmf", vec![attribute("Scalar", "energy", hdf("/e"))]);
    let first = triangle_payloads().with_values("/e", &[1.0, 2.0]);
    let second = triangle_payloads().with_values("/e", &[1.0, 2.0, 3.0]);

    assert_eq!(
        compare_descriptions(&desc, &desc, &CompareOptions::default(), &first, &second),
        Err(FidelityError::AttributeValueCountMismatch {
            name: "energy".to_string(),
            first: 2,
            second: 3,
        })
    );
}

#[test]
fn test_vector_attribute_is_flattened() {
    let desc = triangle_mesh("a.xmf", vec![attribute("Vector", "velocity", hdf("/v"))]);
    let first = triangle_payloads().with("/v", vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let second = triangle_payloads().with("/v", vec![vec![1.0, 2.0], vec![3.0, 4.25]]);

    assert!(matches!(
        compare_descriptions(&desc, &desc, &CompareOptions::default(), &first, &second),
        Err(FidelityError::AttributeValueMismatch { element: 3, .. })
    ));
}

#[test]
fn test_container_error_propagates() {
    let desc = triangle_mesh("a.xmf", vec![]);
    let empty = FakeResolver::new();

    assert!(matches!(
        compare_descriptions(&desc, &desc, &CompareOptions::default(), &empty, &empty),
        Err(FidelityError::ContainerIo { .. })
    ));
}

#[test]
fn test_topology_without_data_item() {
    let mut desc = triangle_mesh("a.xmf", vec![]);
    if let GridChild::Topology(block) = &mut desc.children[0] {
        block.data_item = None;
    }
    let payloads = triangle_payloads();

    assert_eq!(
        compare_descriptions(&desc, &desc, &CompareOptions::default(), &payloads, &payloads),
        Err(FidelityError::MissingDataItem {
            block: "Topology".to_string()
        })
    );
}

#[test]
fn test_geometry_type_mismatch() {
    let first = triangle_mesh("a.xmf", vec![]);
    let mut second = triangle_mesh("b.xmf", vec![]);
    second.children[1] = geometry("XYZ", "/mesh/nodes");
    let payloads = triangle_payloads();

    assert_eq!(
        compare_descriptions(&first, &second, &CompareOptions::default(), &payloads, &payloads),
        Err(FidelityError::GeometryTypeMismatch {
            first: "XY".to_string(),
            second: "XYZ".to_string(),
        })
    );
}
