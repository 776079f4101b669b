//! Interactive table engine.
//!
//! Leaf components (schema resolution, sort/filter, manual order, selection,
//! pagination) are pure values with transition methods. [`controller`]
//! composes them into the single state object a rendering layer binds to.

pub mod cell_format;
pub mod column_schema;
pub mod columns;
pub mod controller;
pub mod events;
pub mod order;
pub mod pagination;
pub mod selection;
pub mod sort_filter;

pub use column_schema::{resolve_columns, SchemaCatalog, TableKind};
pub use columns::{Accessor, ColumnDefinition, ColumnKind};
pub use controller::{TableController, TableOptions, TableSnapshot, VisibleRow};
pub use events::TableEvent;
pub use order::OrderState;
pub use pagination::{paginate, Page, PageInfo, PaginationState};
pub use selection::{SelectionAggregate, SelectionState};
pub use sort_filter::{FilterState, SearchMode, SearchQuery, SortDirection, SortState};
