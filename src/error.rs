//! Error handling for the sdkit library
//!
//! Every fallible container operation returns [`Result<T>`]. Tree insertion and
//! search are total and never produce an error; failures come from positional
//! access, empty-container access, value removal, and stream persistence.

use thiserror::Error;

/// Main error type for the sdkit library
#[derive(Error, Debug)]
pub enum ContainerError {
    /// I/O related errors, including short reads of fixed-width fields
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed persisted content
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Error message describing the issue
        message: String,
    },

    /// Index out of bounds access
    #[error("Out of bounds: index {index}, size {size}")]
    OutOfBounds {
        /// The invalid index
        index: usize,
        /// The valid size/length
        size: usize,
    },

    /// Access to an element of an empty container
    #[error("Container is empty: {container}")]
    Empty {
        /// Name of the container that was empty
        container: &'static str,
    },

    /// A value requested for removal is not present
    #[error("Not found: {what}")]
    NotFound {
        /// Description of the missing value
        what: String,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl ContainerError {
    /// Create an invalid data error
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData { message: message.into() }
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::OutOfBounds { index, size }
    }

    /// Create an empty container error
    pub fn empty(container: &'static str) -> Self {
        Self::Empty { container }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create an I/O error from a message
    pub fn io_error<S: Into<String>>(message: S) -> Self {
        Self::Io(std::io::Error::new(std::io::ErrorKind::Other, message.into()))
    }

    /// Create an I/O error for a stream that ended before a required field
    pub fn unexpected_eof<S: Into<String>>(message: S) -> Self {
        Self::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            message.into(),
        ))
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(e) => e.kind() != std::io::ErrorKind::UnexpectedEof,
            Self::Empty { .. } => true,
            Self::NotFound { .. } => true,
            Self::InvalidData { .. } => false,
            Self::OutOfBounds { .. } => false,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::InvalidData { .. } => "data",
            Self::OutOfBounds { .. } => "bounds",
            Self::Empty { .. } => "empty",
            Self::NotFound { .. } => "not_found",
            Self::Configuration { .. } => "config",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ContainerError>;

/// Assert that an index addresses an existing element
#[inline]
pub fn check_bounds(index: usize, size: usize) -> Result<()> {
    if index >= size {
        Err(ContainerError::out_of_bounds(index, size))
    } else {
        Ok(())
    }
}

/// Assert that an index is a valid insertion position (`0..=size`)
#[inline]
pub fn check_insert_position(index: usize, size: usize) -> Result<()> {
    if index > size {
        Err(ContainerError::out_of_bounds(index, size))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ContainerError::invalid_data("test message");
        assert_eq!(err.category(), "data");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_bounds_checking() {
        assert!(check_bounds(5, 10).is_ok());
        assert!(check_bounds(10, 10).is_err());
        assert!(check_bounds(15, 10).is_err());
        assert!(check_bounds(0, 0).is_err());
    }

    #[test]
    fn test_insert_position_checking() {
        assert!(check_insert_position(0, 0).is_ok());
        assert!(check_insert_position(10, 10).is_ok());
        assert!(check_insert_position(11, 10).is_err());
    }

    #[test]
    fn test_error_categories() {
        let io_err = ContainerError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "test"));
        assert_eq!(io_err.category(), "io");
        assert!(io_err.is_recoverable());

        let eof = ContainerError::unexpected_eof("short read");
        assert_eq!(eof.category(), "io");
        assert!(!eof.is_recoverable());

        assert_eq!(ContainerError::out_of_bounds(5, 3).category(), "bounds");
        assert_eq!(ContainerError::empty("stack").category(), "empty");
        assert_eq!(ContainerError::not_found("x").category(), "not_found");
        assert_eq!(ContainerError::configuration("bad").category(), "config");
    }

    #[test]
    fn test_error_display() {
        let bounds_err = ContainerError::out_of_bounds(10, 5);
        let display = format!("{}", bounds_err);
        assert!(display.contains("Out of bounds"));
        assert!(display.contains("10"));
        assert!(display.contains("5"));

        let empty = ContainerError::empty("queue");
        assert_eq!(format!("{}", empty), "Container is empty: queue");

        let missing = ContainerError::not_found("value 'z'");
        assert!(format!("{}", missing).contains("value 'z'"));
    }

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: ContainerError = io_error.into();

        assert_eq!(err.category(), "io");
        assert!(format!("{}", err).contains("I/O error"));
    }

    #[test]
    fn test_error_debug() {
        let err = ContainerError::invalid_data("debug test");
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("InvalidData"));
        assert!(debug_str.contains("debug test"));
    }
}
