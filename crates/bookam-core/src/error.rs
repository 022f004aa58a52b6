//! Error types for the booking library.

use std::path::PathBuf;

use thiserror::Error;

use crate::{schema::ValidationErrors, wizard::WizardError};

/// Comprehensive error type for all booking operations.
#[derive(Error, Debug)]
pub enum BookingError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Bus not found for the given ID
    #[error("Bus with ID {id} not found")]
    BusNotFound { id: u64 },
    /// Route not found for the given ID
    #[error("Route with ID {id} not found")]
    RouteNotFound { id: u64 },
    /// Booking not found for the given ID
    #[error("Booking with ID {id} not found")]
    BookingNotFound { id: u64 },
    /// User not found for the given ID or email
    #[error("User {key} not found")]
    UserNotFound { key: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input for a single field outside of a form
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// One or more form fields failed their schema
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    /// The passenger wizard refused a transition
    #[error(transparent)]
    Wizard(#[from] WizardError),
    /// The booking draft carried between steps is missing or malformed
    #[error("Invalid booking draft: {reason}")]
    Draft { reason: String },
    /// The seat is already held by another booking
    #[error("Seat {seat} is not available on route {route_id}")]
    SeatUnavailable { seat: String, route_id: u64 },
    /// No session is active
    #[error("You need to log in first")]
    Unauthorized,
    /// The session lacks the required role
    #[error("This action requires an administrator account")]
    Forbidden,
    /// The backend answered with `success: false`
    #[error("API error{}: {message}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Api { status: Option<u16>, message: String },
    /// Transport-level HTTP failures
    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> BookingError {
        BookingError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> BookingError {
        BookingError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl BookingError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a draft error.
    pub fn draft(reason: impl Into<String>) -> Self {
        Self::Draft {
            reason: reason.into(),
        }
    }

    /// Wraps an error raised while joining a blocking task.
    pub(crate) fn join(err: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {err}"),
        }
    }

    /// Whether the error is something the user caused and can fix by editing
    /// input, as opposed to a backend or transport failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::Validation(_)
                | Self::Wizard(_)
                | Self::Draft { .. }
                | Self::SeatUnavailable { .. }
                | Self::Unauthorized
                | Self::Forbidden
        )
    }
}

impl From<ValidationErrors> for BookingError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| BookingError::database(message).with_source(e))
    }
}

/// Result type alias for booking operations
pub type Result<T> = std::result::Result<T, BookingError>;
