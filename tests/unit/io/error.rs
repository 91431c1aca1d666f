//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use patchprob::AnalysisError;
    use patchprob::io::error::invalid_parameter;
    use std::error::Error;

    // Tests error source chaining works correctly
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = AnalysisError::FileSystem {
            path: "/tmp/map.txt".into(),
            operation: "open raster",
            source: io_error,
        };

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("open raster"));
        assert!(message.contains("/tmp/map.txt"));
        assert!(message.contains("file not found"));
    }

    // Tests InvalidParameter error contains all fields
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("trials", &0, &"at least one trial is required");
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'trials' = '0': at least one trial is required"
        );
        assert!(error.source().is_none());
    }

    // Tests parse errors name the file and line
    #[test]
    fn test_raster_parse_error() {
        let error = AnalysisError::RasterParse {
            path: "grid.txt".into(),
            line: 4,
            reason: "invalid cell 'x'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed raster 'grid.txt' at line 4: invalid cell 'x'"
        );
    }

    // Tests dimension mismatches print found before expected
    #[test]
    fn test_dimension_mismatch_error() {
        let error = AnalysisError::DimensionMismatch {
            what: "mask raster",
            expected: (10, 20),
            found: (10, 21),
        };
        assert_eq!(
            error.to_string(),
            "mask raster has size 10x21 but 10x20 was expected"
        );
    }

    // Tests the remaining variants format their fields
    #[test]
    fn test_other_messages() {
        let row = AnalysisError::RowOutOfRange { row: 5, rows: 3 };
        assert_eq!(row.to_string(), "Row 5 is out of range (raster has 3 rows)");

        let unsupported = AnalysisError::UnsupportedFormat {
            path: "map.png".into(),
            reason: "expected a single-channel gray image".to_string(),
        };
        assert!(unsupported.to_string().starts_with("Unsupported raster 'map.png'"));
        assert!(unsupported.source().is_none());
    }

    // Tests io errors convert with placeholder context
    #[test]
    fn test_from_io_error() {
        let error: AnalysisError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(
            error,
            AnalysisError::FileSystem {
                operation: "unknown",
                ..
            }
        ));
    }
}
