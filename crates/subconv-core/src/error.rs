//! Error type shared by the core library.

use std::path::PathBuf;

/// Failures surfaced by composer, store and import/export operations.
///
/// None of these are fatal to the process; the CLI reports them and exits
/// non-zero for the command that failed.
#[derive(Debug, thiserror::Error)]
pub enum SubconvError {
    /// Source URL was empty (or whitespace only).
    #[error("subscription URL is empty")]
    EmptyUrl,

    /// Source URL did not parse, or its scheme is not http/https.
    #[error("not a valid http/https URL: {0}")]
    InvalidUrl(String),

    /// A batch input contained no line that passed validation.
    #[error("no valid http/https URL found in batch input")]
    NoValidUrls,

    /// Template name not one of default/minimal/full/custom.
    #[error("unknown template: {0} (expected default, minimal, full or custom)")]
    UnknownTemplate(String),

    /// Imported document is not the expected JSON shape.
    #[error("import failed, malformed settings document {path}")]
    ImportParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialize {what}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{op} {path}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SubconvError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SubconvError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// True for the user-input validation failures (empty / invalid URL).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SubconvError::EmptyUrl | SubconvError::InvalidUrl(_) | SubconvError::NoValidUrls
        )
    }
}

pub type Result<T> = std::result::Result<T, SubconvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_kinds() {
        assert!(SubconvError::EmptyUrl.is_validation());
        assert!(SubconvError::InvalidUrl("ftp://x".into()).is_validation());
        assert!(SubconvError::NoValidUrls.is_validation());
        assert!(!SubconvError::UnknownTemplate("x".into()).is_validation());
    }

    #[test]
    fn display_includes_offending_input() {
        let e = SubconvError::InvalidUrl("ftp://example.com".into());
        assert_eq!(e.to_string(), "not a valid http/https URL: ftp://example.com");
        let e = SubconvError::UnknownTemplate("huge".into());
        assert!(e.to_string().contains("huge"));
    }
}
