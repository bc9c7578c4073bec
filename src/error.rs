/// Error types for the wildscan library
use std::fmt;

/// Result type alias for wildscan operations
pub type Result<T> = std::result::Result<T, WildscanError>;

/// Main error type for wildscan operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WildscanError {
    /// Pattern-related errors
    InvalidPattern(String),

    /// Inconsistent matcher configuration
    InvalidConfig(String),

    /// Resource limit exceeded (e.g., pattern too long, too many states)
    ResourceLimitExceeded(String),

    /// I/O errors
    Io(String),

    /// General errors
    Other(String),
}

impl fmt::Display for WildscanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WildscanError::InvalidPattern(msg) => write!(f, "Invalid pattern: {}", msg),
            WildscanError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            WildscanError::ResourceLimitExceeded(msg) => {
                write!(f, "Resource limit exceeded: {}", msg)
            }
            WildscanError::Io(msg) => write!(f, "I/O error: {}", msg),
            WildscanError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for WildscanError {}

impl From<std::io::Error> for WildscanError {
    fn from(err: std::io::Error) -> Self {
        WildscanError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WildscanError {
    fn from(err: serde_json::Error) -> Self {
        WildscanError::InvalidConfig(err.to_string())
    }
}

impl From<String> for WildscanError {
    fn from(msg: String) -> Self {
        WildscanError::Other(msg)
    }
}

impl From<&str> for WildscanError {
    fn from(msg: &str) -> Self {
        WildscanError::Other(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = WildscanError::ResourceLimitExceeded("pattern is 10 bytes".to_string());
        assert_eq!(err.to_string(), "Resource limit exceeded: pattern is 10 bytes");

        let err = WildscanError::from("boom");
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: WildscanError = io.into();
        assert!(matches!(err, WildscanError::Io(_)));
    }
}
