//! The table controller: one state object a rendering layer binds to.
//!
//! Every transition takes `&mut self`, updates the inputs it owns and then
//! runs [`TableController::recompute`] exactly once. The pass always goes
//! sort/filter, then order reconciliation and selection pruning, then the
//! pagination clamp, so a renderer never observes a half-updated state.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::config::GridConfig;
use crate::data::filter::FilterPredicate;
use crate::data::identity::{Identity, IdentityResolver};
use crate::data::row::DataRow;
use crate::error::TableResult;
use crate::table::cell_format::{format_cell, CellContent};
use crate::table::column_schema::SchemaCatalog;
use crate::table::columns::ColumnDefinition;
use crate::table::events::TableEvent;
use crate::table::order::{OrderState, OrderStatus};
use crate::table::pagination::{PageInfo, PaginationState};
use crate::table::selection::{SelectionAggregate, SelectionState};
use crate::table::sort_filter::{
    FilterState, SearchMode, SearchQuery, SortDirection, SortFilterEngine, SortState,
};

/// Maximum number of dispatched events remembered for debugging
const MAX_EVENT_HISTORY: usize = 100;

/// How to build a controller
#[derive(Debug, Clone)]
pub struct TableOptions {
    table_kind: String,
    context: String,
    identity_field: Option<String>,
    page_size: Option<usize>,
    config: GridConfig,
    catalog: Arc<SchemaCatalog>,
}

impl TableOptions {
    pub fn new(table_kind: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            table_kind: table_kind.into(),
            context: context.into(),
            identity_field: None,
            page_size: None,
            config: GridConfig::default(),
            catalog: SchemaCatalog::shared_builtin(),
        }
    }

    /// Field holding the row identity; defaults to the configured one
    pub fn with_identity_field(mut self, field: impl Into<String>) -> Self {
        self.identity_field = Some(field.into());
        self
    }

    /// Initial page size; defaults to the configured one
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<SchemaCatalog>) -> Self {
        self.catalog = catalog;
        self
    }
}

/// A row on the current page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRow<'a> {
    pub identity: &'a Identity,
    pub row: &'a DataRow,
    pub selected: bool,
}

/// Read-only view of the whole table state
#[derive(Debug, Clone)]
pub struct TableSnapshot<'a> {
    /// Rows of the current page, in display order
    pub visible_rows: Vec<VisibleRow<'a>>,
    pub columns: &'a [ColumnDefinition],
    pub selection: &'a SelectionState,
    /// Header checkbox state over every row passing the filters
    pub selection_aggregate: SelectionAggregate,
    pub sort: Option<&'a SortState>,
    pub filter: &'a FilterState,
    pub order: &'a OrderState,
    pub pagination: PageInfo,
}

pub struct TableController {
    table_kind: String,
    context: String,
    resolver: IdentityResolver,
    config: GridConfig,
    catalog: Arc<SchemaCatalog>,

    rows: Vec<DataRow>,
    identities: Vec<Identity>,
    identity_set: HashSet<Identity>,
    columns: Vec<ColumnDefinition>,

    sort: Option<SortState>,
    filter: FilterState,
    order: OrderState,
    selection: SelectionState,
    pagination: PaginationState,

    /// Dataset positions passing the filters, in display order
    view: Vec<usize>,

    event_history: VecDeque<String>,
}

impl TableController {
    /// Build a controller for a dataset.
    ///
    /// Fails on duplicate or missing identities and zero page sizes. Catalog
    /// schemas are validated when they are registered.
    pub fn new(rows: Vec<DataRow>, options: TableOptions) -> TableResult<Self> {
        let TableOptions {
            table_kind,
            context,
            identity_field,
            page_size,
            config,
            catalog,
        } = options;

        config.validate()?;
        let pagination =
            PaginationState::new(page_size.unwrap_or(config.pagination.default_page_size))?;

        let resolver =
            IdentityResolver::new(identity_field.unwrap_or_else(|| config.identity.field.clone()));
        let identities = resolver.identify_all(&rows)?;

        let columns = catalog.resolve(&context, &table_kind);

        info!(
            target: "table",
            "New {} table (context '{}'): {} rows, {} columns",
            table_kind,
            context,
            rows.len(),
            columns.len()
        );

        let mut controller = Self {
            table_kind,
            context,
            resolver,
            config,
            catalog,
            identity_set: identities.iter().cloned().collect(),
            order: OrderState::from_identities(&identities),
            rows,
            identities,
            columns,
            sort: None,
            filter: FilterState::new(),
            selection: SelectionState::new(),
            pagination,
            view: Vec::new(),
            event_history: VecDeque::with_capacity(MAX_EVENT_HISTORY),
        };
        controller.recompute();
        Ok(controller)
    }

    /// The recomputation pipeline run after every transition.
    fn recompute(&mut self) {
        // Sort/Filter
        let engine = SortFilterEngine::new(&self.columns, &self.config.format);
        let mut view = engine.apply(&self.rows, &self.identities, self.sort.as_ref(), &self.filter);

        // Order reconciliation
        if self.order.status(&self.identities) == OrderStatus::Stale {
            self.order = self.order.reconcile(&self.identities);
            debug!(target: "table", "Order reconciled to {} identities", self.order.len());
        }
        let selection = std::mem::take(&mut self.selection);
        self.selection = selection.retain_known(&self.identity_set);

        // Manual order only shows while no column sort is active
        if self.sort.is_none() {
            let rank: HashMap<&Identity, usize> = self
                .order
                .iter()
                .enumerate()
                .map(|(rank, id)| (id, rank))
                .collect();
            view.sort_by_key(|&position| {
                rank.get(&self.identities[position])
                    .copied()
                    .unwrap_or(usize::MAX)
            });
        }

        // Pagination
        self.pagination = self.pagination.clamped(view.len());
        self.view = view;

        debug!(
            target: "table",
            "Recomputed: {} of {} rows visible, page {}",
            self.view.len(),
            self.rows.len(),
            self.pagination.page_index()
        );
    }

    fn has_column(&self, column_key: &str) -> bool {
        self.columns.iter().any(|column| column.key == column_key)
    }

    // Transitions

    /// Swap in a new dataset; order, selection and pagination are reconciled
    pub fn replace_dataset(&mut self, rows: Vec<DataRow>) -> TableResult<()> {
        let identities = self.resolver.identify_all(&rows)?;
        info!(
            target: "table",
            "Dataset replaced: {} -> {} rows",
            self.rows.len(),
            rows.len()
        );
        self.identity_set = identities.iter().cloned().collect();
        self.identities = identities;
        self.rows = rows;
        self.recompute();
        Ok(())
    }

    /// Switch the schema variant. Sort and filters on columns the new schema
    /// lacks are dropped.
    pub fn set_context(&mut self, context: impl Into<String>) {
        let context = context.into();
        let columns = self.catalog.resolve(&context, &self.table_kind);

        info!(
            target: "table",
            "Context changed: '{}' -> '{}'",
            self.context,
            context
        );
        self.context = context;
        self.columns = columns;

        if let Some(sort) = &self.sort {
            if !self.has_column(&sort.column_key) {
                debug!(target: "table", "Dropping sort on '{}'", sort.column_key);
                self.sort = None;
            }
        }
        let filter = std::mem::take(&mut self.filter);
        self.filter = filter.retain_columns(&self.columns);

        self.recompute();
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) {
        if let Some(requested) = &sort {
            if !self.has_column(&requested.column_key) {
                warn!(
                    target: "table",
                    "Ignoring sort on unknown column '{}'",
                    requested.column_key
                );
                return;
            }
        }
        debug!(target: "table", "Sort set to {:?}", sort);
        self.sort = sort;
        self.recompute();
    }

    /// Cycle a column through ascending, descending and unsorted
    pub fn toggle_sort(&mut self, column_key: &str) {
        let next = match &self.sort {
            Some(current) if current.column_key == column_key => match current.direction {
                SortDirection::Ascending => Some(SortState {
                    direction: current.direction.reversed(),
                    ..current.clone()
                }),
                SortDirection::Descending => None,
            },
            _ => Some(SortState::ascending(column_key)),
        };
        self.set_sort(next);
    }

    pub fn set_filter(&mut self, column_key: &str, predicate: FilterPredicate) {
        if !self.has_column(column_key) {
            warn!(target: "table", "Ignoring filter on unknown column '{}'", column_key);
            return;
        }
        debug!(target: "table", "Filter on '{}': {:?}", column_key, predicate);
        let filter = std::mem::take(&mut self.filter);
        self.filter = filter.with_filter(column_key, predicate);
        self.recompute();
    }

    pub fn clear_filter(&mut self, column_key: &str) {
        let filter = std::mem::take(&mut self.filter);
        self.filter = filter.without_filter(column_key);
        self.recompute();
    }

    /// Drop every column filter and the global search
    pub fn clear_filters(&mut self) {
        self.filter = FilterState::new();
        self.recompute();
    }

    pub fn set_search(&mut self, search: Option<SearchQuery>) {
        let filter = std::mem::take(&mut self.filter);
        self.filter = filter.with_search(search);
        self.recompute();
    }

    /// Global search using the configured matching mode
    pub fn search(&mut self, term: &str) {
        let mode = if self.config.search.fuzzy {
            SearchMode::Fuzzy {
                threshold: self.config.search.fuzzy_threshold,
            }
        } else {
            SearchMode::Substring
        };
        self.set_search(Some(SearchQuery {
            term: term.to_string(),
            mode,
        }));
    }

    /// Drop `source` before `target`. Stale identities are a no-op.
    pub fn reorder(&mut self, source: &Identity, target: &Identity) {
        let order = std::mem::take(&mut self.order);
        self.order = order.reorder(source, target);
        if self.sort.is_some() {
            debug!(target: "table", "Reorder recorded; hidden while a sort is active");
        }
        self.recompute();
    }

    /// Back to dataset order
    pub fn reset_order(&mut self) {
        self.order = OrderState::from_identities(&self.identities);
        self.recompute();
    }

    pub fn toggle_row(&mut self, id: &Identity) {
        let selection = std::mem::take(&mut self.selection);
        self.selection = selection.toggle_one(id, &self.identity_set);
        self.recompute();
    }

    /// Header checkbox over every row passing the filters, on all pages
    pub fn toggle_all_visible(&mut self) {
        let visible = self.visible_identities();
        let selection = std::mem::take(&mut self.selection);
        self.selection = selection.toggle_all_visible(&visible);
        self.recompute();
    }

    pub fn clear_selection(&mut self) {
        let selection = std::mem::take(&mut self.selection);
        self.selection = selection.clear();
        self.recompute();
    }

    /// Jump to a page; out-of-range indices clamp to the last page
    pub fn set_page(&mut self, page_index: usize) {
        self.pagination = self.pagination.with_page_index(page_index);
        self.recompute();
    }

    /// Change rows per page and return to the first page; 0 is ignored
    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination = self.pagination.with_page_size(page_size);
        self.recompute();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.pagination.page_index().saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.pagination.page_index().saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.set_page(0);
    }

    pub fn last_page(&mut self) {
        self.set_page(usize::MAX);
    }

    /// Apply a queued event. Only dataset replacement can fail.
    pub fn dispatch(&mut self, event: TableEvent) -> TableResult<()> {
        let description = event.describe();
        debug!(target: "table", "Dispatching {}", description);

        match event {
            TableEvent::ReplaceDataset(rows) => self.replace_dataset(rows)?,
            TableEvent::SetContext(context) => self.set_context(context),
            TableEvent::SetSort(sort) => self.set_sort(sort),
            TableEvent::ToggleSort(column_key) => self.toggle_sort(&column_key),
            TableEvent::SetFilter {
                column_key,
                predicate,
            } => self.set_filter(&column_key, predicate),
            TableEvent::ClearFilter(column_key) => self.clear_filter(&column_key),
            TableEvent::ClearFilters => self.clear_filters(),
            TableEvent::SetSearch(search) => self.set_search(search),
            TableEvent::Reorder { source, target } => self.reorder(&source, &target),
            TableEvent::ResetOrder => self.reset_order(),
            TableEvent::ToggleRow(id) => self.toggle_row(&id),
            TableEvent::ToggleAllVisible => self.toggle_all_visible(),
            TableEvent::ClearSelection => self.clear_selection(),
            TableEvent::SetPage(page_index) => self.set_page(page_index),
            TableEvent::SetPageSize(page_size) => self.set_page_size(page_size),
            TableEvent::NextPage => self.next_page(),
            TableEvent::PreviousPage => self.previous_page(),
            TableEvent::FirstPage => self.first_page(),
            TableEvent::LastPage => self.last_page(),
        }

        self.event_history.push_back(description);
        if self.event_history.len() > MAX_EVENT_HISTORY {
            self.event_history.pop_front();
        }
        Ok(())
    }

    // State accessors

    pub fn snapshot(&self) -> TableSnapshot<'_> {
        let visible = self.visible_identities();
        TableSnapshot {
            visible_rows: self.page_rows(),
            columns: &self.columns,
            selection: &self.selection,
            selection_aggregate: self.selection.aggregate(&visible),
            sort: self.sort.as_ref(),
            filter: &self.filter,
            order: &self.order,
            pagination: self.page_info(),
        }
    }

    /// Rows on the current page
    pub fn page_rows(&self) -> Vec<VisibleRow<'_>> {
        let size = self.pagination.page_size();
        self.view
            .iter()
            .skip(self.pagination.page_index() * size)
            .take(size)
            .map(|&position| {
                let identity = &self.identities[position];
                VisibleRow {
                    identity,
                    row: &self.rows[position],
                    selected: self.selection.contains(identity),
                }
            })
            .collect()
    }

    /// Identities passing the filters, across all pages, in display order
    pub fn visible_identities(&self) -> Vec<Identity> {
        self.view
            .iter()
            .map(|&position| self.identities[position].clone())
            .collect()
    }

    /// Rendered cells for a row, one per column
    pub fn cells(&self, row: &VisibleRow<'_>) -> Vec<CellContent> {
        self.columns
            .iter()
            .map(|column| {
                let value = column.value(row.row, row.identity);
                format_cell(column, value.as_deref(), &self.config.format)
            })
            .collect()
    }

    /// Selected rows in dataset order, for bulk actions
    pub fn selected_rows(&self) -> Vec<(&Identity, &DataRow)> {
        self.identities
            .iter()
            .zip(self.rows.iter())
            .filter(|(id, _)| self.selection.contains(id))
            .collect()
    }

    pub fn selection_aggregate(&self) -> SelectionAggregate {
        self.selection.aggregate(&self.visible_identities())
    }

    pub fn page_info(&self) -> PageInfo {
        self.pagination.info(self.view.len())
    }

    pub fn filtered_count(&self) -> usize {
        self.view.len()
    }

    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn order(&self) -> &OrderState {
        &self.order
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    pub fn table_kind(&self) -> &str {
        &self.table_kind
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn identity_field(&self) -> &str {
        self.resolver.field()
    }

    /// Descriptions of the most recent dispatched events, oldest first
    pub fn event_history(&self) -> impl Iterator<Item = &str> {
        self.event_history.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;

    fn transactions(statuses: &[&str]) -> Vec<DataRow> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                DataRow::new()
                    .with("id", (i + 1) as i64)
                    .with("order_id", format!("ORD-{:03}", i + 1))
                    .with("merchant_name", format!("Merchant {}", i + 1))
                    .with("amount", ((i + 1) * 100) as f64)
                    .with("payment_method", "UPI")
                    .with("status", *status)
            })
            .collect()
    }

    fn page_ids(controller: &TableController) -> Vec<Identity> {
        controller
            .page_rows()
            .iter()
            .map(|row| row.identity.clone())
            .collect()
    }

    fn ids(values: &[i64]) -> Vec<Identity> {
        values.iter().copied().map(Identity::Int).collect()
    }

    #[test]
    fn test_new_controller_shows_first_page_in_dataset_order() {
        let controller = TableController::new(
            transactions(&["Successful"; 12]),
            TableOptions::new("transactions", "all"),
        )
        .unwrap();
        assert_eq!(controller.page_rows().len(), 10);
        assert_eq!(controller.page_info().total_pages, 2);
        assert_eq!(page_ids(&controller)[0], Identity::Int(1));
        assert_eq!(controller.selection_aggregate(), SelectionAggregate::None);
    }

    #[test]
    fn test_duplicate_identity_is_refused() {
        let mut rows = transactions(&["Successful", "Failed"]);
        rows[1].insert("id", 1i64.into());
        let err = TableController::new(rows, TableOptions::new("transactions", "all"))
            .err()
            .unwrap();
        assert!(matches!(err, TableError::DuplicateIdentity { .. }));
    }

    #[test]
    fn test_zero_page_size_is_refused() {
        let err = TableController::new(
            transactions(&["Successful"]),
            TableOptions::new("transactions", "all").with_page_size(0),
        )
        .err()
        .unwrap();
        assert_eq!(err, TableError::InvalidPageSize);
    }

    #[test]
    fn test_manual_order_applies_without_sort() {
        let mut controller = TableController::new(
            transactions(&["Successful"; 5]),
            TableOptions::new("transactions", "all"),
        )
        .unwrap();
        controller.reorder(&Identity::Int(5), &Identity::Int(2));
        assert_eq!(page_ids(&controller), ids(&[1, 5, 2, 3, 4]));

        controller.set_sort(Some(SortState::ascending("amount")));
        assert_eq!(page_ids(&controller), ids(&[1, 2, 3, 4, 5]));

        controller.set_sort(None);
        assert_eq!(page_ids(&controller), ids(&[1, 5, 2, 3, 4]));

        controller.reset_order();
        assert_eq!(page_ids(&controller), ids(&[1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_toggle_sort_cycles() {
        let mut controller = TableController::new(
            transactions(&["Successful"; 3]),
            TableOptions::new("transactions", "all"),
        )
        .unwrap();
        controller.toggle_sort("amount");
        assert_eq!(controller.sort(), Some(&SortState::ascending("amount")));
        controller.toggle_sort("amount");
        assert_eq!(controller.sort(), Some(&SortState::descending("amount")));
        assert_eq!(page_ids(&controller), ids(&[3, 2, 1]));
        controller.toggle_sort("amount");
        assert_eq!(controller.sort(), None);
    }

    #[test]
    fn test_unknown_sort_and_filter_columns_are_ignored() {
        let mut controller = TableController::new(
            transactions(&["Successful", "Failed"]),
            TableOptions::new("transactions", "all"),
        )
        .unwrap();
        controller.set_sort(Some(SortState::descending("utr")));
        controller.set_filter("utr", FilterPredicate::contains("x"));
        assert!(controller.sort().is_none());
        assert!(controller.filter().is_empty());
        assert_eq!(controller.filtered_count(), 2);
    }

    #[test]
    fn test_context_change_drops_stale_sort_and_filters() {
        let rows = vec![
            DataRow::new().with("id", 1i64).with("business_name", "Acme").with("status", "Pending"),
            DataRow::new().with("id", 2i64).with("business_name", "Bolt").with("status", "Active"),
        ];
        let mut controller =
            TableController::new(rows, TableOptions::new("merchants", "pending")).unwrap();
        controller.set_sort(Some(SortState::ascending("submitted_at")));
        controller.set_filter("status", FilterPredicate::contains("pending"));
        assert_eq!(controller.filtered_count(), 1);

        controller.set_context("unknown-tab");
        assert_eq!(controller.columns().len(), 2);
        assert!(controller.sort().is_none());
        assert!(controller.filter().is_empty());
        assert_eq!(controller.filtered_count(), 2);
    }

    #[test]
    fn test_replace_dataset_reconciles_order_and_selection() {
        let mut controller = TableController::new(
            transactions(&["Successful"; 4]),
            TableOptions::new("transactions", "all"),
        )
        .unwrap();
        controller.reorder(&Identity::Int(4), &Identity::Int(1));
        controller.toggle_row(&Identity::Int(4));
        controller.toggle_row(&Identity::Int(2));

        let mut next = transactions(&["Successful"; 5]);
        next.remove(3);
        controller.replace_dataset(next).unwrap();

        assert_eq!(controller.order().ids(), ids(&[1, 2, 3, 5]).as_slice());
        assert_eq!(
            controller.selection().iter().cloned().collect::<Vec<_>>(),
            ids(&[2])
        );
    }

    #[test]
    fn test_failed_replace_keeps_previous_state() {
        let mut controller = TableController::new(
            transactions(&["Successful"; 3]),
            TableOptions::new("transactions", "all"),
        )
        .unwrap();
        let mut broken = transactions(&["Successful"; 2]);
        broken[0] = DataRow::new().with("status", "Failed");
        assert!(controller.replace_dataset(broken).is_err());
        assert_eq!(controller.rows().len(), 3);
    }

    #[test]
    fn test_filter_shrink_clamps_page() {
        let mut statuses = vec!["Successful"; 20];
        statuses.extend(["Failed"; 3]);
        let mut controller =
            TableController::new(transactions(&statuses), TableOptions::new("transactions", "all"))
                .unwrap();
        controller.last_page();
        assert_eq!(controller.page_info().page_index, 2);

        controller.set_filter("status", FilterPredicate::contains("failed"));
        assert_eq!(controller.page_info().page_index, 0);
        assert_eq!(controller.page_rows().len(), 3);
    }

    #[test]
    fn test_page_navigation() {
        let mut controller = TableController::new(
            transactions(&["Successful"; 23]),
            TableOptions::new("transactions", "all"),
        )
        .unwrap();
        controller.next_page();
        controller.next_page();
        controller.next_page();
        assert_eq!(controller.page_info().page_index, 2);
        controller.previous_page();
        assert_eq!(controller.page_info().page_index, 1);
        controller.set_page_size(5);
        assert_eq!(controller.page_info().page_index, 0);
        assert_eq!(controller.page_info().total_pages, 5);
        controller.set_page_size(0);
        assert_eq!(controller.pagination().page_size(), 5);
    }

    #[test]
    fn test_search_uses_config_mode() {
        let mut controller = TableController::new(
            transactions(&["Successful", "Failed", "Pending"]),
            TableOptions::new("transactions", "all"),
        )
        .unwrap();
        controller.search("ORD-002");
        assert_eq!(page_ids(&controller), ids(&[2]));
        controller.set_search(None);
        assert_eq!(controller.filtered_count(), 3);
    }

    #[test]
    fn test_dispatch_records_history() {
        let mut controller = TableController::new(
            transactions(&["Successful"; 3]),
            TableOptions::new("transactions", "all"),
        )
        .unwrap();
        for _ in 0..(MAX_EVENT_HISTORY + 5) {
            controller.dispatch(TableEvent::NextPage).unwrap();
        }
        controller
            .dispatch(TableEvent::ToggleRow(Identity::Int(2)))
            .unwrap();

        let history: Vec<&str> = controller.event_history().collect();
        assert_eq!(history.len(), MAX_EVENT_HISTORY);
        assert_eq!(history.last(), Some(&"ToggleRow(2)"));
        assert_eq!(controller.selected_rows().len(), 1);
    }

    #[test]
    fn test_snapshot_marks_selected_rows() {
        let mut controller = TableController::new(
            transactions(&["Successful", "Failed"]),
            TableOptions::new("transactions", "all"),
        )
        .unwrap();
        controller.toggle_row(&Identity::Int(2));
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.selection_aggregate, SelectionAggregate::Partial);
        assert!(!snapshot.visible_rows[0].selected);
        assert!(snapshot.visible_rows[1].selected);
        assert_eq!(snapshot.pagination.total_rows, 2);

        let cells = controller.cells(&snapshot.visible_rows[1]);
        assert_eq!(cells[3].text(), "₹200.00");
        assert_eq!(cells[5].text(), "Failed");
    }
}
