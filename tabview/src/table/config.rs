//! Table configuration

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default choices offered by a page size picker.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

/// Default field read as row identity.
pub const DEFAULT_ROW_ID_KEY: &str = "id";

/// Configuration for a [`TableView`](super::TableView).
///
/// Every field has a default, so a host can deserialize a partial JSON
/// document.
///
/// # Example
///
/// ```
/// use tabview::table::TableConfig;
///
/// let config = TableConfig::default()
///     .with_selectable(true)
///     .with_page_size(20);
///
/// let loaded = TableConfig::from_json(r#"{"selectable": true, "pageSize": 20}"#).unwrap();
/// assert_eq!(config, loaded);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    /// Whether the host shows selection checkboxes.
    ///
    /// Default: false
    pub selectable: bool,

    /// Whether clicking a row (outside interactive controls) toggles it.
    /// Only applies when `selectable` is set.
    ///
    /// Default: true
    pub row_click_toggles_selection: bool,

    /// Dotted path of the field holding the row identity.
    ///
    /// Default: `"id"`
    pub row_id_key: String,

    /// Rows per page.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Choices for a page size picker.
    ///
    /// Default: `[5, 10, 20, 50]`
    pub page_size_options: Vec<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            selectable: false,
            row_click_toggles_selection: true,
            row_id_key: DEFAULT_ROW_ID_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
        }
    }
}

impl TableConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets whether rows are selectable.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Sets whether a row click toggles selection.
    pub fn with_row_click_toggles_selection(mut self, toggles: bool) -> Self {
        self.row_click_toggles_selection = toggles;
        self
    }

    /// Sets the identity field path.
    pub fn with_row_id_key(mut self, key: impl Into<String>) -> Self {
        self.row_id_key = key.into();
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the page size choices.
    pub fn with_page_size_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    /// Strict validation for hosts that want to reject bad config.
    ///
    /// The table itself never needs this: it clamps instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize {
                size: self.page_size,
            });
        }
        if let Some(&size) = self.page_size_options.iter().find(|&&size| size == 0) {
            return Err(ConfigError::InvalidPageSizeOption { size });
        }
        if self.row_id_key.trim().is_empty() {
            return Err(ConfigError::EmptyRowIdKey);
        }
        Ok(())
    }

    /// Page size options as a picker should show them: zeros dropped,
    /// sorted, de-duplicated, and always containing `page_size`.
    pub fn normalized_page_size_options(&self, page_size: usize) -> Vec<usize> {
        let mut options: Vec<usize> = self
            .page_size_options
            .iter()
            .copied()
            .filter(|&size| size > 0)
            .collect();
        options.push(page_size.max(1));
        options.sort_unstable();
        options.dedup();
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TableConfig::default();
        assert!(!config.selectable);
        assert!(config.row_click_toggles_selection);
        assert_eq!(config.row_id_key, "id");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.page_size_options, vec![5, 10, 20, 50]);
    }

    #[test]
    fn test_from_json_partial() {
        let config = TableConfig::from_json(r#"{"rowIdKey": "user.id"}"#).unwrap();
        assert_eq!(config.row_id_key, "user.id");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_from_json_rejects_zero_page_size() {
        let err = TableConfig::from_json(r#"{"pageSize": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPageSize { size: 0 }));
    }

    #[test]
    fn test_from_json_parse_error() {
        let err = TableConfig::from_json("{").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_validate_options_and_key() {
        let config = TableConfig::default().with_page_size_options(vec![5, 0]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPageSizeOption { size: 0 })
        ));
        let config = TableConfig::default().with_row_id_key(" ");
        assert!(matches!(config.validate(), Err(ConfigError::EmptyRowIdKey)));
    }

    #[test]
    fn test_normalized_options_include_page_size() {
        let config = TableConfig::default().with_page_size_options(vec![50, 5, 0, 5]);
        assert_eq!(config.normalized_page_size_options(25), vec![5, 25, 50]);
    }
}
