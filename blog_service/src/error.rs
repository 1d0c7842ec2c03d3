use blog_request::filter::error::FilterError;
use thiserror::Error;
use tracing::error;

/// Application error types.
///
/// Represents all possible errors that can occur in the blog service.
#[derive(Debug, Error)]
pub enum AppError {
    /// A requested user or blog does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Caller supplied an unusable value, e.g. an empty search filter.
    #[error("{0}")]
    Validation(String),

    /// A stored record is inconsistent, e.g. a blog whose author cannot be resolved.
    #[error("{0}")]
    Integrity(String),

    /// Internal application error.
    ///
    /// Represents unexpected failures of the underlying store or configuration.
    #[error("internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    /// HTTP status code an outer layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Integrity(_) => 500,
            Self::Internal(_) => {
                error!("internal service error: {}", self);
                500
            }
        }
    }

    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Validation(_))
    }
}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        Self::Validation(err.to_string())
    }
}

macro_rules! impl_internal_errors {
    ( $( $type:ty ),* $(,)? ) => {
        $(
        impl From<$type> for AppError {
            fn from(err: $type) -> Self {
                AppError::Internal(Box::new(err))
            }
        }
        )*
    };
}
impl_internal_errors!(config::ConfigError, sqlx::Error);
