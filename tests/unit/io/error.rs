//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;
    use voxelwave::AlgorithmError;
    use voxelwave::spatial::Position;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = AlgorithmError::FileSystem {
            path: "/tmp/modules.json".into(),
            operation: "read module file",
            source: io_error,
        };
        assert!(error.source().is_some());
        assert!(error.to_string().contains("read module file"));

        let json_error = serde_json::from_str::<serde_json::Value>("{").err();
        if let Some(source) = json_error {
            let error = AlgorithmError::Json {
                path: "modules.json".into(),
                source,
            };
            assert!(error.source().is_some());
        }

        assert!(AlgorithmError::UnknownModule { name: "x".into() }.source().is_none());
    }

    // Tests contradiction message and classification
    // Verified by classifying Unresolved as a contradiction
    #[test]
    fn test_contradiction() {
        let error = AlgorithmError::Contradiction {
            position: Position::new(1, 2, 3),
        };
        assert!(error.is_contradiction());
        assert!(error.to_string().contains("(1, 2, 3)"));

        let unresolved = AlgorithmError::Unresolved {
            position: Position::ORIGIN,
            remaining: 3,
        };
        assert!(!unresolved.is_contradiction());
        assert!(unresolved.to_string().contains("3 candidates"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = AlgorithmError::InvalidParameter {
            parameter: "attempts",
            value: "0".to_string(),
            reason: "at least one attempt is required".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("attempts"));
        assert!(message.contains("'0'"));
        assert!(message.contains("at least one attempt"));
    }

    // Tests placement and module messages name the module
    // Verified by dropping the module name from the message
    #[test]
    fn test_module_messages() {
        let placement = AlgorithmError::InvalidPlacement {
            module: "tower".to_string(),
            position: Position::new(4, 0, 0),
            reason: "footprint leaves the grid".to_string(),
        };
        assert!(placement.to_string().contains("'tower'"));
        assert!(placement.to_string().contains("(4, 0, 0)"));

        let connector = AlgorithmError::InvalidConnector {
            value: "v9-7".to_string(),
            reason: "rotation class must be 0, 1, 2 or 3",
        };
        assert!(connector.to_string().contains("'v9-7'"));
    }

    // Tests the io::Error conversion used by `?`
    // Verified by mapping to a different variant
    #[test]
    fn test_from_io_error() {
        let error: AlgorithmError = std::io::Error::other("boom").into();
        assert!(matches!(error, AlgorithmError::FileSystem { .. }));
    }
}
