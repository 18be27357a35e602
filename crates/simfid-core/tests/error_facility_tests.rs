use simfid_core::errors::{ExError, ExErrorKind, FidelityError};

#[test]
fn test_value_mismatch_carries_diagnostic_payload() {
    let err = FidelityError::ArrayValueMismatch {
        index: 2,
        name: "pressure".to_string(),
        element: 17,
        first: 1.25,
        second: 1.0,
        tolerance: 1e-12,
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::ArrayValueMismatch);
    assert_eq!(ex_err.code(), "ERR_ARRAY_VALUE_MISMATCH");
    assert_eq!(ex_err.op(), Some("compare_point_data"));
    assert_eq!(ex_err.subject(), Some("pressure"));
    assert_eq!(ex_err.index(), Some(2));
    assert_eq!(ex_err.element_index(), Some(17));
    assert_eq!(ex_err.first(), Some("1.25"));
    assert_eq!(ex_err.second(), Some("1"));
    assert_eq!(ex_err.tolerance(), Some(1e-12));
    assert!(ex_err
        .message()
        .contains("Mismatched data array values with given tolerance"));
}

#[test]
fn test_unsupported_file_type_keeps_tag() {
    let ex_err: ExError = FidelityError::UnsupportedFileType {
        tag: "stl".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::UnsupportedFileType);
    assert_eq!(ex_err.subject(), Some("stl"));
    assert_eq!(ex_err.message(), "File type not supported: stl");
}

#[test]
fn test_container_io_records_container_path() {
    let ex_err: ExError = FidelityError::ContainerIo {
        container: "data/run.h5".to_string(),
        dataset: "/mesh/nodes".to_string(),
        reason: "no such file".to_string(),
    }
    .into();

    assert_eq!(ex_err.code(), "ERR_CONTAINER_IO");
    assert_eq!(ex_err.path(), Some("data/run.h5"));
    assert_eq!(ex_err.subject(), Some("/mesh/nodes"));
    assert!(!ex_err.kind().is_mismatch());
}

#[test]
fn test_row_width_mismatch_records_row() {
    let ex_err: ExError = FidelityError::NodeCountMismatch {
        row: Some(3),
        first: 3,
        second: 2,
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::NodeCountMismatch);
    assert_eq!(ex_err.index(), Some(3));
    assert!(ex_err.message().contains("at row 3"));
}

#[test]
fn test_error_kind_code_mapping() {
    // Codes are stable; CI log scrapers match on them
    let kinds = vec![
        (ExErrorKind::UnsupportedFileType, "ERR_UNSUPPORTED_FILE_TYPE"),
        (ExErrorKind::ArrayCountMismatch, "ERR_ARRAY_COUNT_MISMATCH"),
        (ExErrorKind::ArrayNameMismatch, "ERR_ARRAY_NAME_MISMATCH"),
        (ExErrorKind::ArraySizeMismatch, "ERR_ARRAY_SIZE_MISMATCH"),
        (ExErrorKind::GridCountMismatch, "ERR_GRID_COUNT_MISMATCH"),
        (ExErrorKind::MissingTopology, "ERR_MISSING_TOPOLOGY"),
        (ExErrorKind::MissingGeometry, "ERR_MISSING_GEOMETRY"),
        (ExErrorKind::TopologyTypeMismatch, "ERR_TOPOLOGY_TYPE_MISMATCH"),
        (ExErrorKind::GeometryTypeMismatch, "ERR_GEOMETRY_TYPE_MISMATCH"),
        (ExErrorKind::AttributeTypeMismatch, "ERR_ATTRIBUTE_TYPE_MISMATCH"),
        (ExErrorKind::AttributeNameMismatch, "ERR_ATTRIBUTE_NAME_MISMATCH"),
        (ExErrorKind::UnsupportedStorageFormat, "ERR_UNSUPPORTED_STORAGE_FORMAT"),
        (ExErrorKind::MalformedGrid, "ERR_MALFORMED_GRID"),
        (ExErrorKind::MalformedDescription, "ERR_MALFORMED_DESCRIPTION"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_display_includes_code_and_op() {
    let ex_err = ExError::new(ExErrorKind::MalformedGrid)
        .with_op("read_point_data")
        .with_path("a.vtu")
        .with_message("no Piece element");

    assert_eq!(
        ex_err.to_string(),
        "[ERR_MALFORMED_GRID] in operation 'read_point_data': no Piece element (path: a.vtu)"
    );
}
