//! Events a host can queue against a table controller

use crate::data::filter::FilterPredicate;
use crate::data::identity::Identity;
use crate::data::row::DataRow;
use crate::table::sort_filter::{SearchQuery, SortState};

/// One external input to the table state.
///
/// Applying an event runs exactly one recomputation pass.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    /// New dataset from the data source
    ReplaceDataset(Vec<DataRow>),

    /// Switch the column schema variant
    SetContext(String),

    SetSort(Option<SortState>),

    /// Header click: ascending, descending, then off
    ToggleSort(String),

    SetFilter {
        column_key: String,
        predicate: FilterPredicate,
    },

    ClearFilter(String),

    ClearFilters,

    SetSearch(Option<SearchQuery>),

    /// Drag gesture finished: drop `source` before `target`
    Reorder { source: Identity, target: Identity },

    ResetOrder,

    ToggleRow(Identity),

    ToggleAllVisible,

    ClearSelection,

    SetPage(usize),

    SetPageSize(usize),

    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
}

impl TableEvent {
    /// Short label for the event history
    pub fn describe(&self) -> String {
        match self {
            TableEvent::ReplaceDataset(rows) => format!("ReplaceDataset({} rows)", rows.len()),
            TableEvent::SetContext(context) => format!("SetContext({})", context),
            TableEvent::SetSort(Some(sort)) => {
                format!("SetSort({} {:?})", sort.column_key, sort.direction)
            }
            TableEvent::SetSort(None) => "SetSort(none)".to_string(),
            TableEvent::ToggleSort(column) => format!("ToggleSort({})", column),
            TableEvent::SetFilter { column_key, .. } => format!("SetFilter({})", column_key),
            TableEvent::ClearFilter(column) => format!("ClearFilter({})", column),
            TableEvent::ClearFilters => "ClearFilters".to_string(),
            TableEvent::SetSearch(Some(query)) => format!("SetSearch({:?})", query.term),
            TableEvent::SetSearch(None) => "SetSearch(none)".to_string(),
            TableEvent::Reorder { source, target } => format!("Reorder({} -> {})", source, target),
            TableEvent::ResetOrder => "ResetOrder".to_string(),
            TableEvent::ToggleRow(id) => format!("ToggleRow({})", id),
            TableEvent::ToggleAllVisible => "ToggleAllVisible".to_string(),
            TableEvent::ClearSelection => "ClearSelection".to_string(),
            TableEvent::SetPage(index) => format!("SetPage({})", index),
            TableEvent::SetPageSize(size) => format!("SetPageSize({})", size),
            TableEvent::NextPage => "NextPage".to_string(),
            TableEvent::PreviousPage => "PreviousPage".to_string(),
            TableEvent::FirstPage => "FirstPage".to_string(),
            TableEvent::LastPage => "LastPage".to_string(),
        }
    }
}
