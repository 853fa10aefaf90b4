/// Flat error set for the overlay. Inputs are validated upstream, so nothing
/// here is retried; callers log and fall back to an empty chart.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    RenderingError(String),
    ValidationError(String),
    ConfigurationError(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::RenderingError(msg) => write!(f, "Rendering Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::ConfigurationError(msg) => write!(f, "Configuration Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::ConfigurationError(e.to_string())
    }
}

pub type RenderingResult<T> = Result<T, AppError>;
pub type ConfigResult<T> = Result<T, AppError>;
