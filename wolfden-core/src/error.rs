use std::path::PathBuf;
use thiserror::Error;

/// The main result type for wolfden-core operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// `what` is a human label such as "Save file" or "Default prompt file".
    #[error("{what} not found: {name}")]
    NotFound { what: &'static str, name: String },

    #[error("Invalid document name: {0:?}")]
    InvalidName(String),

    /// A stored document exists but does not parse as JSON.
    #[error("Stored document at {path:?} is corrupted: {source}")]
    DataCorruption {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error accessing path {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io { path: path.into(), source }
    }

    /// True for the variants that mean "the client asked for something absent".
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display_not_found() {
        let err = StoreError::NotFound { what: "Save file", name: "game1.json".to_string() };
        assert_eq!(format!("{}", err), "Save file not found: game1.json");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_display_invalid_name() {
        let err = StoreError::InvalidName("..".to_string());
        assert_eq!(format!("{}", err), "Invalid document name: \"..\"");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_error_display_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = StoreError::io("/tmp/saves", io_err);
        let shown = format!("{}", err);
        assert!(shown.contains("I/O error accessing path \"/tmp/saves\""));
        assert!(shown.contains("access denied"));
    }

    #[test]
    fn test_error_display_data_corruption() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = StoreError::DataCorruption { path: PathBuf::from("saves/a.json"), source };
        assert!(format!("{}", err).starts_with("Stored document at \"saves/a.json\" is corrupted"));
    }

    #[test]
    fn test_from_serde_error_is_serialization() {
        let source = serde_json::from_str::<u8>("300").unwrap_err();
        let err: StoreError = source.into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
