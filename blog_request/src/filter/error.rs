use thiserror::Error;

/// Filter construction errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A filter value is empty after trimming.
    #[error("{} value is empty", capitalize(.field))]
    EmptyValue {
        /// Name of the offending field, as the caller supplied it.
        field: String,
    },
    /// A date filter could not be parsed.
    #[error("{} value `{value}` is not a valid date", capitalize(.field))]
    InvalidDate {
        /// Name of the offending field.
        field: String,
        /// Rejected input.
        value: String,
    },
}

/// Filter result type.
pub type FilterResult<T> = Result<T, FilterError>;

impl FilterError {
    /// Gets the name of the field that caused the error.
    pub fn get_violating_field_name(&self) -> &str {
        match self {
            Self::EmptyValue { field } | Self::InvalidDate { field, .. } => field,
        }
    }
}

/// Upper-cases the first character and leaves the rest untouched.
fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
