use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// How aggressively personality rules hide content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStrength {
    Weak,
    Standard,
    Strong,
}

impl FilterStrength {
    pub fn from_i32(value: i32) -> Option<FilterStrength> {
        match value {
            1 => Some(FilterStrength::Weak),
            2 => Some(FilterStrength::Standard),
            3 => Some(FilterStrength::Strong),
            _ => None,
        }
    }

    pub fn as_i32(self) -> i32 {
        match self {
            FilterStrength::Weak => 1,
            FilterStrength::Standard => 2,
            FilterStrength::Strong => 3,
        }
    }
}

impl Default for FilterStrength {
    fn default() -> Self {
        FilterStrength::Standard
    }
}

/// Per-user filter configuration. Saved wholesale on every update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Manual block-list of content-axis categories.
    pub hidden_content_categories: HashSet<String>,
    pub auto_filter_enabled: bool,
    pub similarity_filter_enabled: bool,
    pub filter_strength: FilterStrength,
    pub similarity_threshold: f32,
}

impl Default for FilterSettings {
    /// Defaults applied lazily for users with no saved row.
    fn default() -> Self {
        FilterSettings {
            hidden_content_categories: HashSet::new(),
            auto_filter_enabled: true,
            similarity_filter_enabled: true,
            filter_strength: FilterStrength::Standard,
            similarity_threshold: 0.80,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct FilterSettingsRow {
    pub user_did: String,
    pub hidden_content_categories: Vec<String>,
    pub auto_filter_enabled: bool,
    pub similarity_filter_enabled: bool,
    pub filter_strength: i32,
    pub similarity_threshold: f32,
    pub updated_at: DateTime<Utc>,
}

impl From<FilterSettingsRow> for FilterSettings {
    fn from(row: FilterSettingsRow) -> Self {
        FilterSettings {
            hidden_content_categories: row.hidden_content_categories.into_iter().collect(),
            auto_filter_enabled: row.auto_filter_enabled,
            similarity_filter_enabled: row.similarity_filter_enabled,
            // Rows written before the strength column existed carry whatever
            // the backfill left; anything out of range reads as Standard.
            filter_strength: FilterStrength::from_i32(row.filter_strength)
                .unwrap_or(FilterStrength::Standard),
            similarity_threshold: row.similarity_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        let settings = FilterSettings::default();
        assert!(settings.auto_filter_enabled);
        assert!(settings.similarity_filter_enabled);
        assert_eq!(settings.filter_strength, FilterStrength::Standard);
        assert_eq!(settings.similarity_threshold, 0.80);
        assert!(settings.hidden_content_categories.is_empty());
    }

    #[test]
    fn test_strength_round_trips() {
        for strength in [
            FilterStrength::Weak,
            FilterStrength::Standard,
            FilterStrength::Strong,
        ] {
            assert_eq!(FilterStrength::from_i32(strength.as_i32()), Some(strength));
        }
        assert_eq!(FilterStrength::from_i32(0), None);
        assert_eq!(FilterStrength::from_i32(4), None);
    }

    #[test]
    fn test_out_of_range_strength_reads_as_standard() {
        let row = FilterSettingsRow {
            user_did: "did:plc:example".to_string(),
            hidden_content_categories: vec![],
            auto_filter_enabled: true,
            similarity_filter_enabled: true,
            filter_strength: 9,
            similarity_threshold: 0.80,
            updated_at: Utc::now(),
        };
        let settings = FilterSettings::from(row);
        assert_eq!(settings.filter_strength, FilterStrength::Standard);
    }
}
