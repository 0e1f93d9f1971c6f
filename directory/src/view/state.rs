use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::consts::consts::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Email,
    Role,
    /// Newest registration first
    Date,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Everything the user can change about the list, the visible page is derived from it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ViewState {
    pub search: String,
    /// `None` shows every role
    pub role_filter: Option<String>,
    pub sort: SortKey,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
    pub view_mode: ViewMode,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        ViewState {
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            ..Default::default()
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            role_filter: None,
            sort: SortKey::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            view_mode: ViewMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn sort_keys_parse_from_lowercase_names() {
        assert_eq!(SortKey::from_str("date").unwrap(), SortKey::Date);
        assert_eq!(SortKey::Role.to_string(), "role");
        assert!(SortKey::from_str("salary").is_err());
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(ViewState::new(0).page_size, 1);
        assert_eq!(ViewState::new(500).page_size, MAX_PAGE_SIZE);
        assert_eq!(ViewState::new(12).page_size, 12);
    }
}
