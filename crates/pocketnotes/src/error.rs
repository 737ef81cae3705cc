//! Error types for pocketnotes.
//!
//! This module defines all error types used throughout the pocketnotes crate.
//! Group-creation rule violations have their own [`ValidationError`] so that
//! the creation surface can show them without digging through storage errors.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for pocketnotes operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// The database was written with a newer storage layout.
    #[error("database layout version {found} is newer than the supported version {supported}")]
    UnsupportedLayout {
        /// Version recorded in the database file.
        found: i32,
        /// Newest version this build reads.
        supported: i32,
    },

    /// The persisted group collection could not be parsed.
    #[error("failed to deserialize stored groups under key '{key}': {source}")]
    Deserialization {
        /// The blob key that was read.
        key: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Writing the group collection to the blob store failed.
    ///
    /// The in-memory mutation that triggered the write has already been applied.
    #[error("failed to persist groups under key '{key}': {source}")]
    Persist {
        /// The blob key that was written.
        key: String,
        /// The underlying storage error.
        #[source]
        source: Box<Error>,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Domain Errors ===
    /// A new group was rejected by the creation rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No group matches the given id or name.
    #[error("no group matches '{0}'")]
    GroupNotFound(String),

    /// A color string is not part of the palette.
    #[error("unknown color '{0}'")]
    UnknownColor(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a candidate group is rejected, in the order they are checked.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The trimmed name is empty.
    #[error("Group name is required")]
    EmptyName,

    /// The trimmed name has fewer than two characters.
    #[error("Group name must be at least 2 characters long")]
    NameTooShort,

    /// Another group already uses this name, ignoring case.
    #[error("A group with this name already exists")]
    DuplicateName,

    /// No palette color was chosen.
    #[error("Please select a color")]
    NoColorSelected,
}

/// A specialized Result type for pocketnotes operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Wrap a storage error raised while saving under `key`.
    #[must_use]
    pub fn persist(key: impl Into<String>, source: Error) -> Self {
        Self::Persist {
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Check if this error is a group-creation rule violation.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from writing the blob store.
    #[must_use]
    pub fn is_persist(&self) -> bool {
        matches!(self, Self::Persist { .. })
    }

    /// The validation failure carried by this error, if any.
    #[must_use]
    pub fn as_validation(&self) -> Option<ValidationError> {
        match self {
            Self::Validation(v) => Some(*v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::EmptyName.to_string(),
            "Group name is required"
        );
        assert_eq!(
            ValidationError::NameTooShort.to_string(),
            "Group name must be at least 2 characters long"
        );
        assert_eq!(
            ValidationError::DuplicateName.to_string(),
            "A group with this name already exists"
        );
        assert_eq!(
            ValidationError::NoColorSelected.to_string(),
            "Please select a color"
        );
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: Error = ValidationError::DuplicateName.into();
        assert_eq!(err.to_string(), "A group with this name already exists");
        assert!(err.is_validation());
        assert_eq!(err.as_validation(), Some(ValidationError::DuplicateName));
    }

    #[test]
    fn test_persist_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "quota exceeded");
        let err = Error::persist("pocketNotesGroups", io_err.into());
        let msg = err.to_string();
        assert!(err.is_persist());
        assert!(msg.contains("pocketNotesGroups"));
        assert!(msg.contains("quota exceeded"));
    }

    #[test]
    fn test_deserialization_error_display() {
        let source = serde_json::from_str::<Vec<u8>>("{not json").unwrap_err();
        let err = Error::Deserialization {
            key: "pocketNotesGroups".to_string(),
            source,
        };
        assert!(err.to_string().contains("pocketNotesGroups"));
    }

    #[test]
    fn test_group_not_found_display() {
        let err = Error::GroupNotFound("Work".to_string());
        assert_eq!(err.to_string(), "no group matches 'Work'");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "key must not be empty".to_string(),
        };
        assert!(err.to_string().contains("key must not be empty"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
