//! Column schema resolution.
//!
//! Schemas are a lookup table from `(table kind, context tag)` to an ordered
//! column list. The table kind picks a family (transactions, merchants, ...)
//! and the context tag picks the variant a particular tab or report needs.
//! Pairs with no entry resolve to [`fallback_schema`], so resolution never
//! fails on the render path.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

use crate::error::{TableError, TableResult};
use crate::table::cell_format::is_known_formatter;
use crate::table::columns::{Accessor, ColumnDefinition, ColumnKind};

/// Table families with built-in schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Transactions,
    Merchants,
    Banks,
    Settlements,
    Leaderboard,
}

impl TableKind {
    pub const ALL: [TableKind; 5] = [
        TableKind::Transactions,
        TableKind::Merchants,
        TableKind::Banks,
        TableKind::Settlements,
        TableKind::Leaderboard,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            TableKind::Transactions => "transactions",
            TableKind::Merchants => "merchants",
            TableKind::Banks => "banks",
            TableKind::Settlements => "settlements",
            TableKind::Leaderboard => "leaderboard",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = normalize_tag(tag);
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

/// Fields tried, in order, for the fallback label column
const LABEL_FIELDS: &[&str] = &[
    "name",
    "label",
    "title",
    "business_name",
    "merchant_name",
    "bank_name",
];

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_ascii_lowercase()
}

/// The schema used for any unmapped `(kind, context)` pair
pub fn fallback_schema() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::plain("id", "ID").with_accessor(Accessor::Identity),
        ColumnDefinition::plain("label", "Name").with_accessor(Accessor::FirstOf(
            LABEL_FIELDS.iter().map(|field| field.to_string()).collect(),
        )),
    ]
}

/// Reject schemas with repeated keys or unknown custom formatters
pub fn validate_schema(columns: &[ColumnDefinition]) -> TableResult<()> {
    let mut keys = HashSet::with_capacity(columns.len());
    for column in columns {
        if !keys.insert(column.key.as_str()) {
            return Err(TableError::DuplicateColumnKey(column.key.clone()));
        }
        if let ColumnKind::Custom(name) = &column.kind {
            if !is_known_formatter(name) {
                return Err(TableError::UnresolvableColumnKind {
                    column: column.key.clone(),
                    formatter: name.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Lookup table of column schemas
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    schemas: HashMap<(String, String), Arc<[ColumnDefinition]>>,
}

static BUILTIN_CATALOG: LazyLock<Arc<SchemaCatalog>> =
    LazyLock::new(|| Arc::new(SchemaCatalog::builtin()));

/// Resolve against the built-in catalog
pub fn resolve_columns(context_tag: &str, table_kind: &str) -> Vec<ColumnDefinition> {
    BUILTIN_CATALOG.resolve(context_tag, table_kind)
}

impl SchemaCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Shared handle to the built-in catalog
    pub fn shared_builtin() -> Arc<SchemaCatalog> {
        Arc::clone(&BUILTIN_CATALOG)
    }

    /// Every schema shipped with the dashboard
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();

        for (context, columns) in transaction_schemas() {
            catalog.insert(TableKind::Transactions.tag(), context, columns);
        }
        for (context, columns) in merchant_schemas() {
            catalog.insert(TableKind::Merchants.tag(), context, columns);
        }
        for (context, columns) in bank_schemas() {
            catalog.insert(TableKind::Banks.tag(), context, columns);
        }
        for (context, columns) in settlement_schemas() {
            catalog.insert(TableKind::Settlements.tag(), context, columns);
        }
        for (context, columns) in leaderboard_schemas() {
            catalog.insert(TableKind::Leaderboard.tag(), context, columns);
        }

        debug!(target: "schema", "Built-in catalog holds {} schemas", catalog.len());
        catalog
    }

    /// Add or replace a schema after validating it
    pub fn register(
        &mut self,
        table_kind: &str,
        context_tag: &str,
        columns: Vec<ColumnDefinition>,
    ) -> TableResult<()> {
        validate_schema(&columns)?;
        self.insert(table_kind, context_tag, columns);
        Ok(())
    }

    fn insert(&mut self, table_kind: &str, context_tag: &str, columns: Vec<ColumnDefinition>) {
        self.schemas.insert(
            (normalize_tag(table_kind), normalize_tag(context_tag)),
            columns.into(),
        );
    }

    pub fn contains(&self, context_tag: &str, table_kind: &str) -> bool {
        self.schemas
            .contains_key(&(normalize_tag(table_kind), normalize_tag(context_tag)))
    }

    /// Columns for a pair, or the fallback schema when unmapped
    pub fn resolve(&self, context_tag: &str, table_kind: &str) -> Vec<ColumnDefinition> {
        match self
            .schemas
            .get(&(normalize_tag(table_kind), normalize_tag(context_tag)))
        {
            Some(columns) => columns.to_vec(),
            None => {
                warn!(
                    target: "schema",
                    "No schema for kind '{}' context '{}', using fallback",
                    table_kind,
                    context_tag
                );
                fallback_schema()
            }
        }
    }

    /// Registered context tags for a kind, sorted
    pub fn contexts(&self, table_kind: &str) -> Vec<String> {
        let kind = normalize_tag(table_kind);
        let mut contexts: Vec<String> = self
            .schemas
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, context)| context.clone())
            .collect();
        contexts.sort();
        contexts
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Every registered schema; used to check the catalog as a whole
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[ColumnDefinition])> {
        self.schemas
            .iter()
            .map(|((kind, context), columns)| (kind.as_str(), context.as_str(), &columns[..]))
    }
}

// Column building blocks shared across families

fn id_column(header: &str) -> ColumnDefinition {
    ColumnDefinition::plain("id", header)
}

fn status_column() -> ColumnDefinition {
    ColumnDefinition::new("status", "Status", ColumnKind::Badge)
}

fn merchant_column() -> ColumnDefinition {
    ColumnDefinition::plain("merchant", "Merchant").from_field("merchant_name")
}

fn money(key: &str, header: &str) -> ColumnDefinition {
    ColumnDefinition::new(key, header, ColumnKind::Currency)
}

fn date(key: &str, header: &str) -> ColumnDefinition {
    ColumnDefinition::new(key, header, ColumnKind::Date)
}

fn transaction_base() -> Vec<ColumnDefinition> {
    vec![
        id_column("Transaction ID"),
        ColumnDefinition::plain("order_id", "Order ID"),
        merchant_column(),
        money("amount", "Amount"),
        ColumnDefinition::plain("method", "Method").from_field("payment_method"),
        status_column(),
    ]
}

fn transaction_schemas() -> Vec<(&'static str, Vec<ColumnDefinition>)> {
    let with = |extra: Vec<ColumnDefinition>| {
        let mut columns = transaction_base();
        columns.extend(extra);
        columns
    };

    vec![
        ("all", with(vec![date("created_at", "Created")])),
        (
            "successful",
            with(vec![
                ColumnDefinition::plain("utr", "UTR"),
                date("created_at", "Created"),
            ]),
        ),
        (
            "failed",
            with(vec![
                ColumnDefinition::plain("failure_reason", "Failure Reason"),
                date("created_at", "Created"),
            ]),
        ),
        (
            "pending",
            with(vec![
                date("created_at", "Created"),
                date("updated_at", "Last Update"),
            ]),
        ),
        (
            "refunded",
            with(vec![
                money("refund_amount", "Refunded"),
                date("refunded_at", "Refunded On"),
            ]),
        ),
    ]
}

fn merchant_base() -> Vec<ColumnDefinition> {
    vec![
        id_column("Merchant ID"),
        ColumnDefinition::plain("business_name", "Business Name"),
        ColumnDefinition::plain("email", "Contact Email"),
        ColumnDefinition::plain("phone", "Phone"),
        status_column(),
    ]
}

fn merchant_schemas() -> Vec<(&'static str, Vec<ColumnDefinition>)> {
    let with = |extra: Vec<ColumnDefinition>| {
        let mut columns = merchant_base();
        columns.extend(extra);
        columns
    };

    vec![
        ("all", with(vec![date("onboarded_at", "Onboarded")])),
        (
            "active",
            with(vec![
                money("monthly_volume", "Monthly Volume"),
                date("onboarded_at", "Onboarded"),
            ]),
        ),
        (
            "inactive",
            with(vec![
                ColumnDefinition::plain("reason", "Reason"),
                date("deactivated_at", "Deactivated"),
            ]),
        ),
        (
            "pending",
            with(vec![
                ColumnDefinition::new("kyc_status", "KYC", ColumnKind::Badge),
                date("submitted_at", "Submitted"),
            ]),
        ),
        (
            "rejected",
            with(vec![
                ColumnDefinition::plain("rejection_reason", "Rejection Reason"),
                date("reviewed_at", "Reviewed"),
            ]),
        ),
    ]
}

fn bank_schemas() -> Vec<(&'static str, Vec<ColumnDefinition>)> {
    let base = || {
        vec![
            id_column("Bank ID"),
            ColumnDefinition::plain("bank_name", "Bank"),
            ColumnDefinition::plain("ifsc", "IFSC"),
            ColumnDefinition::new(
                "account_number",
                "Account",
                ColumnKind::custom("masked_account"),
            ),
        ]
    };

    let mut all = base();
    all.extend([
        ColumnDefinition::new("vpa", "UPI Handle", ColumnKind::custom("upi_handle")),
        status_column(),
        date("added_at", "Added"),
    ]);

    let mut unverified = base();
    unverified.extend([
        ColumnDefinition::new("verification_status", "Verification", ColumnKind::Badge),
        date("added_at", "Added"),
    ]);

    vec![("all", all), ("unverified", unverified)]
}

fn settlement_schemas() -> Vec<(&'static str, Vec<ColumnDefinition>)> {
    let base = || {
        vec![
            id_column("Settlement ID"),
            merchant_column(),
            money("gross_amount", "Gross"),
            money("fees", "Fees"),
            money("net_amount", "Net"),
            status_column(),
        ]
    };

    let mut settled = base();
    settled.push(date("settled_at", "Settled On"));

    let mut pending = base();
    pending.push(date("expected_at", "Expected"));

    vec![("all", settled.clone()), ("settled", settled), ("pending", pending)]
}

fn leaderboard_schemas() -> Vec<(&'static str, Vec<ColumnDefinition>)> {
    let board = |subject: ColumnDefinition, share_header: &str, share_key: &str| {
        vec![
            ColumnDefinition::plain("rank", "#"),
            subject,
            ColumnDefinition::plain("transaction_count", "Transactions"),
            money("volume", "Volume"),
            ColumnDefinition::new(share_key, share_header, ColumnKind::custom("percentage")),
        ]
    };

    vec![
        (
            "merchants",
            board(merchant_column(), "Success Rate", "success_rate"),
        ),
        (
            "banks",
            board(
                ColumnDefinition::plain("bank_name", "Bank"),
                "Success Rate",
                "success_rate",
            ),
        ),
        (
            "payment-methods",
            board(
                ColumnDefinition::plain("method", "Method").from_field("payment_method"),
                "Share",
                "share",
            ),
        ),
    ]
}
