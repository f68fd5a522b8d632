//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use lazor::LazorError;
    use lazor::io::error::{invalid_parameter, malformed_board, syntax_error};
    use lazor::lattice::point::LatticePoint;
    use std::error::Error;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = LazorError::FileSystem {
            path: "/tmp/board.bff".into(),
            operation: "read board",
            source: io_error,
        };

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("/tmp/board.bff"));
        assert!(message.contains("read board"));
        assert!(message.contains("file not found"));
    }

    // Tests errors without an underlying cause report no source
    // Verified by returning self as the source
    #[test]
    fn test_no_source_for_plain_errors() {
        assert!(malformed_board(&"bad").source().is_none());
        assert!(LazorError::BudgetExceeded { nodes: 5 }.source().is_none());
    }

    // Tests geometry error formatting
    // Verified by omitting the point from the message
    #[test]
    fn test_ambiguous_geometry_message() {
        let error = LazorError::AmbiguousGeometry {
            point: LatticePoint::new(4, 2),
            faces: 2,
        };
        let message = error.to_string();
        assert!(message.contains("(4, 2)"));
        assert!(message.contains("2 block faces"));
    }

    // Tests infeasibility message carries both counts
    // Verified by swapping required and available
    #[test]
    fn test_infeasible_message() {
        let message = LazorError::Infeasible {
            required: 5,
            available: 3,
        }
        .to_string();
        assert!(message.contains("5 movable blocks"));
        assert!(message.contains("3 open cells"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("threads", &0, &"must be positive");

        let message = error.to_string();
        assert!(message.contains("threads"));
        assert!(message.contains("'0'"));
        assert!(message.contains("must be positive"));
    }

    // Tests syntax errors report their line
    // Verified by printing a 0-based line number
    #[test]
    fn test_syntax_error_line() {
        let error = syntax_error(7, &"unknown directive 'Q'");
        assert!(matches!(error, LazorError::BoardSyntax { line: 7, .. }));
        assert!(error.to_string().contains("line 7"));
    }

    // Tests which errors only invalidate one configuration
    // Verified by treating budget exhaustion as local
    #[test]
    fn test_configuration_local_errors() {
        assert!(
            LazorError::AmbiguousGeometry {
                point: LatticePoint::new(0, 0),
                faces: 2
            }
            .is_configuration_local()
        );
        assert!(
            LazorError::BeamOutOfBounds {
                origin: LatticePoint::new(-1, 0)
            }
            .is_configuration_local()
        );
        assert!(!LazorError::BudgetExceeded { nodes: 1 }.is_configuration_local());
        assert!(!malformed_board(&"x").is_configuration_local());
    }

    // Tests conversion from io::Error
    // Verified by dropping the source in the conversion
    #[test]
    fn test_from_io_error() {
        let error: LazorError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(error, LazorError::FileSystem { .. }));
        assert!(error.source().is_some());
    }
}
