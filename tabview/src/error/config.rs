//! ConfigError for table configuration

/// Error type for loading and validating a [`TableConfig`](crate::table::TableConfig).
///
/// Table operations themselves never fail; these errors only surface when a
/// host asks for strict validation or loads configuration from JSON.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Page size must be at least one row.
    #[error("Invalid page size {size}: must be at least 1")]
    InvalidPageSize { size: usize },

    /// One of the page size options is zero.
    #[error("Invalid page size option {size}: must be at least 1")]
    InvalidPageSizeOption { size: usize },

    /// The row identity key is empty.
    #[error("Row identity key must not be empty")]
    EmptyRowIdKey,

    /// The configuration document could not be parsed.
    #[error("Failed to parse table config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Returns `true` if this error came from parsing rather than validation.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}
