use thiserror::Error;

/// Errors raised while opening, parsing, or rendering the document under
/// validation. Criterion predicates absorb these and report a failed check;
/// they never escape the scoring engine.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid page number: {0}")]
    InvalidPage(u32),

    #[error("Render error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for SourceError {
    fn from(err: lopdf::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// Configuration invariant violations. These are fatal before any criterion
/// runs, unlike [`SourceError`] which only fails individual checks.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("max_pages must be at least 1, got {0}")]
    PageLimit(u32),

    #[error("max_file_size_kb must be positive, got {0}")]
    FileSizeLimit(f64),

    #[error("min_font must be below max_font, got {min}pt..{max}pt")]
    FontRange { min: f64, max: f64 },

    #[error("saturation_tolerance must be between 0 and 1, got {0}")]
    SaturationTolerance(f64),

    #[error("Passing score must be between 0 and 100, got {0}")]
    PassingScore(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_source_error_display() {
        let error = SourceError::Parse("unexpected trailer".to_string());
        assert_eq!(error.to_string(), "Parse error: unexpected trailer");
    }

    #[test]
    fn test_source_error_debug() {
        let error = SourceError::Render("empty canvas".to_string());
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("Render"));
        assert!(debug_str.contains("empty canvas"));
    }

    #[test]
    fn test_source_error_from_io_error() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let source_error = SourceError::from(io_error);

        match source_error {
            SourceError::Io(ref err) => {
                assert_eq!(err.kind(), ErrorKind::NotFound);
            }
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_all_source_error_variants() {
        let errors = vec![
            SourceError::Parse("parse error".to_string()),
            SourceError::InvalidPage(7),
            SourceError::Render("render error".to_string()),
        ];

        for error in errors {
            let error_string = error.to_string();
            assert!(!error_string.is_empty());
        }
    }

    #[test]
    fn test_config_error_display() {
        let errors = [
            (
                "max_pages must be at least 1, got 0",
                ConfigError::PageLimit(0),
            ),
            (
                "max_file_size_kb must be positive, got -3",
                ConfigError::FileSizeLimit(-3.0),
            ),
            (
                "min_font must be below max_font, got 21pt..8pt",
                ConfigError::FontRange {
                    min: 21.0,
                    max: 8.0,
                },
            ),
            (
                "saturation_tolerance must be between 0 and 1, got 1.5",
                ConfigError::SaturationTolerance(1.5),
            ),
            (
                "Passing score must be between 0 and 100, got 150",
                ConfigError::PassingScore(150.0),
            ),
        ];

        for (expected, error) in errors {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_result_type_ok() {
        let result: Result<u32> = Ok(3);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn test_result_type_err() {
        let result: Result<u32> = Err(SourceError::InvalidPage(42));
        assert!(result.is_err());

        match result.unwrap_err() {
            SourceError::InvalidPage(page) => assert_eq!(page, 42),
            _ => panic!("Expected InvalidPage variant"),
        }
    }

    #[test]
    fn test_error_send_sync() {
        // Both error types cross thread boundaries via panic payloads
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SourceError>();
        assert_send_sync::<ConfigError>();
    }
}
