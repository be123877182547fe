//! Two-phase filter state: a freely edited draft and the applied snapshot that
//! drives the remote query.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date format accepted for the date bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FilterError {
    #[error("unknown filter field: {0}")]
    UnknownField(String),

    #[error("invalid date for {field}: {value}")]
    InvalidDate { field: FilterField, value: String },

    #[error("unknown sort order: {0}")]
    UnknownSortOrder(String),
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "newest")]
    Newest,
    #[serde(rename = "oldest")]
    Oldest,
    #[serde(rename = "mostLiked")]
    MostLiked,
    #[serde(rename = "mostCommented")]
    MostCommented,
}

impl SortOrder {
    /// Name used by the remote service.
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::MostLiked => "mostLiked",
            SortOrder::MostCommented => "mostCommented",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "mostLiked" => Ok(SortOrder::MostLiked),
            "mostCommented" => Ok(SortOrder::MostCommented),
            other => Err(FilterError::UnknownSortOrder(other.to_string())),
        }
    }
}

/// Fields of [`Filter`] that can be edited individually.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterField {
    Search,
    Category,
    DateFrom,
    DateTo,
    SortBy,
}

impl FilterField {
    /// Parameter name used for this field in the query string.
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterField::Search => "search",
            FilterField::Category => "category",
            FilterField::DateFrom => "dateFrom",
            FilterField::DateTo => "dateTo",
            FilterField::SortBy => "sortBy",
        }
    }
}

impl Display for FilterField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = FilterError;

    /// Unknown names are rejected rather than ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(FilterField::Search),
            "category" => Ok(FilterField::Category),
            "dateFrom" => Ok(FilterField::DateFrom),
            "dateTo" => Ok(FilterField::DateTo),
            "sortBy" => Ok(FilterField::SortBy),
            other => Err(FilterError::UnknownField(other.to_string())),
        }
    }
}

/// Filter values applied to the post list. `Default` is the cleared filter.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct Filter {
    pub search: String,
    pub category: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub sort: SortOrder,
}

impl Filter {
    /// Sets one field from its textual form. Blank values clear optional
    /// fields; the sort order falls back to newest.
    pub fn set_field(&mut self, field: FilterField, value: &str) -> Result<(), FilterError> {
        let trimmed = value.trim();
        match field {
            FilterField::Search => self.search = trimmed.to_string(),
            FilterField::Category => {
                self.category = Some(trimmed.to_string()).filter(|s| !s.is_empty());
            }
            FilterField::DateFrom => self.date_from = parse_date(field, trimmed)?,
            FilterField::DateTo => self.date_to = parse_date(field, trimmed)?,
            FilterField::SortBy => self.sort = trimmed.parse()?,
        }
        Ok(())
    }

    /// Search term as sent to the service, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        Some(self.search.trim()).filter(|s| !s.is_empty())
    }
}

fn parse_date(field: FilterField, value: &str) -> Result<Option<NaiveDate>, FilterError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| FilterError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

/// Draft and applied filter snapshots.
///
/// The applied snapshot only changes through [`FilterModel::apply`] and
/// [`FilterModel::clear`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterModel {
    draft: Filter,
    applied: Filter,
}

impl FilterModel {
    /// Creates a model with cleared draft and applied filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters being edited, not yet applied.
    pub fn draft(&self) -> &Filter {
        &self.draft
    }

    /// Filters the displayed list was requested with.
    pub fn applied(&self) -> &Filter {
        &self.applied
    }

    /// Updates a single draft field. On error the draft is left unchanged.
    pub fn set_draft_field(&mut self, field: FilterField, value: &str) -> Result<(), FilterError> {
        self.draft.set_field(field, value)
    }

    /// Promotes the whole draft to the applied snapshot.
    pub fn apply(&mut self) -> Filter {
        self.applied = self.draft.clone();
        self.applied.clone()
    }

    /// Resets both snapshots to the default filter.
    pub fn clear(&mut self) -> Filter {
        self.draft = Filter::default();
        self.applied = Filter::default();
        self.applied.clone()
    }

    /// Whether the draft holds edits that were not applied yet.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_edits_do_not_touch_applied() {
        let mut model = FilterModel::new();
        model
            .set_draft_field(FilterField::Search, "ai")
            .expect("search accepted");

        assert_eq!(model.draft().search, "ai");
        assert_eq!(model.applied(), &Filter::default());
        assert!(model.is_dirty());
    }

    #[test]
    fn apply_promotes_the_whole_draft() {
        let mut model = FilterModel::new();
        model
            .set_draft_field(FilterField::Category, "Technology")
            .unwrap();
        model.set_draft_field(FilterField::DateFrom, "2024-01-01").unwrap();
        model.set_draft_field(FilterField::SortBy, "mostLiked").unwrap();

        let applied = model.apply();

        assert_eq!(applied.category.as_deref(), Some("Technology"));
        assert_eq!(applied.date_from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(applied.sort, SortOrder::MostLiked);
        assert!(!model.is_dirty());
    }

    #[test]
    fn clear_resets_draft_and_applied() {
        let mut model = FilterModel::new();
        model.set_draft_field(FilterField::Search, "rust").unwrap();
        model.apply();
        model.set_draft_field(FilterField::Search, "go").unwrap();

        let cleared = model.clear();

        assert_eq!(cleared, Filter::default());
        assert_eq!(model.draft(), &Filter::default());
        assert_eq!(cleared.sort, SortOrder::Newest);
    }

    #[test]
    fn invalid_values_are_rejected_without_side_effects() {
        let mut model = FilterModel::new();
        model.set_draft_field(FilterField::DateTo, "2024-02-01").unwrap();

        let err = model
            .set_draft_field(FilterField::DateTo, "01/02/2024")
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidDate { .. }));
        assert_eq!(model.draft().date_to, NaiveDate::from_ymd_opt(2024, 2, 1));

        assert_eq!(
            model.set_draft_field(FilterField::SortBy, "random"),
            Err(FilterError::UnknownSortOrder("random".to_string()))
        );
    }

    #[test]
    fn unknown_field_names_are_rejected() {
        assert_eq!(
            "author".parse::<FilterField>(),
            Err(FilterError::UnknownField("author".to_string()))
        );
        assert_eq!("dateFrom".parse::<FilterField>(), Ok(FilterField::DateFrom));
    }

    #[test]
    fn blank_values_clear_optional_fields() {
        let mut filter = Filter::default();
        filter.set_field(FilterField::Category, "Product").unwrap();
        filter.set_field(FilterField::Category, "  ").unwrap();
        assert_eq!(filter.category, None);
        assert_eq!(filter.search_term(), None);
    }
}
