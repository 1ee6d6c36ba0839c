//! User-facing error message formatting and startup-failure classification.
//!
//! Uses typed error matching (PolarsError variants, io::ErrorKind) rather
//! than string parsing to produce actionable messages.

use polars::prelude::PolarsError;
use std::io;
use std::path::Path;

/// Why startup failed. `SourceUnavailable` and `SchemaMismatch` are both
/// fatal, but they call for different fixes, so `main` reports them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// An input file is missing or unreadable.
    SourceUnavailable,
    /// An input file was read but does not have the expected columns/types.
    SchemaMismatch,
    Other,
}

/// Classify a report by walking its cause chain. Schema problems are raised
/// by the loader as `PolarsError::SchemaMismatch`; everything rooted in an
/// I/O failure is a source-availability problem.
pub fn classify_report(report: &color_eyre::eyre::Report) -> LoadErrorKind {
    for cause in report.chain() {
        if let Some(pe) = cause.downcast_ref::<PolarsError>() {
            return classify_polars(pe);
        }
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            return classify_io(io_err);
        }
    }
    LoadErrorKind::Other
}

fn classify_polars(err: &PolarsError) -> LoadErrorKind {
    use polars::prelude::PolarsError as PE;
    match err {
        PE::SchemaMismatch(_) | PE::ColumnNotFound(_) | PE::SchemaFieldNotFound(_) => {
            LoadErrorKind::SchemaMismatch
        }
        PE::IO { error, .. } => classify_io(error.as_ref()),
        PE::NoData(_) => LoadErrorKind::SourceUnavailable,
        PE::Context { error, .. } => classify_polars(error),
        _ => LoadErrorKind::Other,
    }
}

fn classify_io(err: &io::Error) -> LoadErrorKind {
    use std::io::ErrorKind;
    match err.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => LoadErrorKind::SourceUnavailable,
        _ => LoadErrorKind::Other,
    }
}

/// Format a PolarsError as a user-facing message by matching on its variant.
pub fn user_message_from_polars(err: &PolarsError) -> String {
    use polars::prelude::PolarsError as PE;

    match err {
        PE::ColumnNotFound(msg) => format!(
            "Column not found: {}. Check spelling and that the column exists.",
            msg
        ),
        PE::IO { error, msg } => {
            user_message_from_io(error.as_ref(), msg.as_ref().map(|m| m.as_ref()))
        }
        PE::NoData(msg) => format!("No data: {}", msg),
        PE::SchemaMismatch(msg) => format!("Schema mismatch: {}", msg),
        PE::ShapeMismatch(msg) => format!("Row shape mismatch: {}", msg),
        PE::InvalidOperation(msg) => format!("Operation not allowed: {}", msg),
        PE::OutOfBounds(msg) => format!("Index or row out of bounds: {}", msg),
        PE::SchemaFieldNotFound(msg) => format!("Schema field not found: {}", msg),
        PE::ComputeError(msg) => msg.to_string(),
        PE::Context { error, msg } => {
            let inner = user_message_from_polars(error);
            format!("{}: {}", msg, inner)
        }
        #[allow(unreachable_patterns)]
        _ => err.to_string(),
    }
}

/// Format an io::Error as a user-facing message by matching on ErrorKind.
pub fn user_message_from_io(err: &io::Error, context: Option<&str>) -> String {
    use std::io::ErrorKind;

    let base: String = match err.kind() {
        ErrorKind::NotFound => "File or directory not found.".to_string(),
        ErrorKind::PermissionDenied => "Permission denied. Check read access.".to_string(),
        ErrorKind::InvalidData | ErrorKind::InvalidInput => {
            "Invalid or corrupted data.".to_string()
        }
        ErrorKind::UnexpectedEof => "Unexpected end of file.".to_string(),
        ErrorKind::Other => {
            let msg = err.to_string();
            if msg.contains("Is a directory") {
                return "Path is a directory, not a file.".to_string();
            }
            return if context.is_some() {
                format!("I/O error: {}", msg)
            } else {
                msg
            };
        }
        _ => err.to_string(),
    };

    if let Some(ctx) = context {
        if !ctx.is_empty() {
            format!("{} {}", base, ctx)
        } else {
            base
        }
    } else {
        base
    }
}

/// Format a color_eyre Report by downcasting to known error types.
/// Walks the cause chain to find PolarsError or io::Error.
pub fn user_message_from_report(report: &color_eyre::eyre::Report, path: Option<&Path>) -> String {
    for cause in report.chain() {
        if let Some(pe) = cause.downcast_ref::<PolarsError>() {
            let msg = user_message_from_polars(pe);
            return if let Some(p) = path {
                format!("Failed to load {}: {}", p.display(), msg)
            } else {
                msg
            };
        }
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            let msg = user_message_from_io(io_err, None);
            return if let Some(p) = path {
                format!("Failed to load {}: {}", p.display(), msg)
            } else {
                msg
            };
        }
    }

    // Fallback: use first line of display to avoid long tracebacks
    let display = report.to_string();
    let first_line = display.lines().next().unwrap_or("An error occurred");
    let trimmed = first_line.trim();
    if let Some(p) = path {
        format!("Failed to load {}: {}", p.display(), trimmed)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_from_io_not_found() {
        let err = io::Error::new(io::ErrorKind::NotFound, "No such file");
        let msg = user_message_from_io(&err, None);
        assert!(
            msg.contains("not found"),
            "expected 'not found', got: {}",
            msg
        );
    }

    #[test]
    fn test_user_message_from_polars_schema_mismatch() {
        let err = PolarsError::SchemaMismatch("column 'inning' is missing".into());
        let msg = user_message_from_polars(&err);
        assert!(
            msg.contains("Schema mismatch"),
            "expected schema mismatch, got: {}",
            msg
        );
        assert!(msg.contains("inning"), "expected 'inning', got: {}", msg);
    }

    #[test]
    fn test_classify_missing_file() {
        let report = color_eyre::eyre::Report::new(io::Error::new(
            io::ErrorKind::NotFound,
            "No such file",
        ));
        assert_eq!(classify_report(&report), LoadErrorKind::SourceUnavailable);
    }

    #[test]
    fn test_classify_schema_mismatch() {
        let report =
            color_eyre::eyre::Report::new(PolarsError::SchemaMismatch("bad column".into()));
        assert_eq!(classify_report(&report), LoadErrorKind::SchemaMismatch);
    }

    #[test]
    fn test_classify_other() {
        let report = color_eyre::eyre::eyre!("something else entirely");
        assert_eq!(classify_report(&report), LoadErrorKind::Other);
    }
}
