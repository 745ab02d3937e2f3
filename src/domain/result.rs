//! Result type alias for loganon

use super::errors::LoganonError;

/// Result type alias for loganon operations
///
/// # Examples
///
/// ```
/// use loganon::domain::result::Result;
/// use loganon::domain::errors::LoganonError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(LoganonError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, LoganonError>;
