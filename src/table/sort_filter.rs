use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::BTreeMap;
use tracing::trace;

use crate::config::config::FormatConfig;
use crate::data::datavalue_compare::compare_optional_datavalues;
use crate::data::filter::FilterPredicate;
use crate::data::identity::Identity;
use crate::data::row::DataRow;
use crate::table::cell_format::format_cell;
use crate::table::columns::ColumnDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The single active sort; "no sort" is `Option::None` at the call sites
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column_key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(column_key: impl Into<String>) -> Self {
        Self {
            column_key: column_key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column_key: impl Into<String>) -> Self {
        Self {
            column_key: column_key.into(),
            direction: SortDirection::Descending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Substring,
    /// Skim-style fuzzy match; rows must score above the threshold
    Fuzzy { threshold: i64 },
}

/// Free-text search across every column of the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub mode: SearchMode,
}

/// Column predicates (ANDed) plus an optional global search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    columns: BTreeMap<String, FilterPredicate>,
    search: Option<SearchQuery>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace a column predicate; vacuous predicates remove the filter
    pub fn with_filter(mut self, column_key: impl Into<String>, predicate: FilterPredicate) -> Self {
        let column_key = column_key.into();
        if predicate.is_vacuous() {
            self.columns.remove(&column_key);
        } else {
            self.columns.insert(column_key, predicate);
        }
        self
    }

    pub fn without_filter(mut self, column_key: &str) -> Self {
        self.columns.remove(column_key);
        self
    }

    pub fn with_search(mut self, search: Option<SearchQuery>) -> Self {
        self.search = search.filter(|query| !query.term.trim().is_empty());
        self
    }

    /// Keep only predicates whose column is still in the schema
    pub fn retain_columns(mut self, columns: &[ColumnDefinition]) -> Self {
        self.columns
            .retain(|key, _| columns.iter().any(|column| &column.key == key));
        self
    }

    pub fn get(&self, column_key: &str) -> Option<&FilterPredicate> {
        self.columns.get(column_key)
    }

    pub fn predicates(&self) -> impl Iterator<Item = (&str, &FilterPredicate)> {
        self.columns.iter().map(|(key, predicate)| (key.as_str(), predicate))
    }

    pub fn search(&self) -> Option<&SearchQuery> {
        self.search.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.search.is_none()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }
}

/// Filters and sorts a dataset into a derived view of row positions.
///
/// Rows are never copied; the output indexes into the input slice.
pub struct SortFilterEngine<'a> {
    columns: &'a [ColumnDefinition],
    format: &'a FormatConfig,
}

impl<'a> SortFilterEngine<'a> {
    pub fn new(columns: &'a [ColumnDefinition], format: &'a FormatConfig) -> Self {
        Self { columns, format }
    }

    fn column(&self, key: &str) -> Option<&'a ColumnDefinition> {
        self.columns.iter().find(|column| column.key == key)
    }

    /// Filtered, then stably sorted, positions into `rows`.
    ///
    /// `identities[i]` must be the identity of `rows[i]`.
    pub fn apply(
        &self,
        rows: &[DataRow],
        identities: &[Identity],
        sort: Option<&SortState>,
        filter: &FilterState,
    ) -> Vec<usize> {
        let matcher = match filter.search() {
            Some(SearchQuery {
                mode: SearchMode::Fuzzy { .. },
                ..
            }) => Some(SkimMatcherV2::default().ignore_case()),
            _ => None,
        };

        let mut positions: Vec<usize> = (0..rows.len())
            .filter(|&i| self.row_matches(&rows[i], &identities[i], filter, matcher.as_ref()))
            .collect();

        trace!(
            target: "sort_filter",
            "{} of {} rows pass {} column filters",
            positions.len(),
            rows.len(),
            filter.len()
        );

        if let Some(sort) = sort {
            if let Some(column) = self.column(&sort.column_key) {
                let mode = column.kind.compare_mode();
                // slice::sort_by is stable, so ties keep dataset order
                positions.sort_by(|&a, &b| {
                    let value_a = column.value(&rows[a], &identities[a]);
                    let value_b = column.value(&rows[b], &identities[b]);
                    let ordering =
                        compare_optional_datavalues(value_a.as_deref(), value_b.as_deref(), mode);
                    match sort.direction {
                        SortDirection::Ascending => ordering,
                        SortDirection::Descending => ordering.reverse(),
                    }
                });
            }
        }

        positions
    }

    fn row_matches(
        &self,
        row: &DataRow,
        identity: &Identity,
        filter: &FilterState,
        matcher: Option<&SkimMatcherV2>,
    ) -> bool {
        let columns_pass = filter.predicates().all(|(key, predicate)| match self.column(key) {
            Some(column) => predicate.matches(column.value(row, identity).as_deref()),
            // Predicates on columns outside the schema constrain nothing
            None => true,
        });

        if !columns_pass {
            return false;
        }

        match filter.search() {
            Some(query) => self.search_matches(row, identity, query, matcher),
            None => true,
        }
    }

    fn search_matches(
        &self,
        row: &DataRow,
        identity: &Identity,
        query: &SearchQuery,
        matcher: Option<&SkimMatcherV2>,
    ) -> bool {
        let term = query.term.trim();
        let needle = term.to_lowercase();

        self.columns.iter().any(|column| {
            let value = column.value(row, identity);
            let text = format_cell(column, value.as_deref(), self.format);
            let text = text.text();
            match (query.mode, matcher) {
                (SearchMode::Fuzzy { threshold }, Some(matcher)) => matcher
                    .fuzzy_match(text, term)
                    .is_some_and(|score| score > threshold),
                _ => text.to_lowercase().contains(&needle),
            }
        })
    }
}
