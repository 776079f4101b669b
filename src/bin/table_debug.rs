// Table Debug Binary - load a dataset file and print one page of a table
// Run with: cargo run --bin table_debug -- data.json --kind transactions --context failed

use anyhow::{anyhow, bail, Context, Result};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use std::path::PathBuf;

use paydesk_grid::config::GridConfig;
use paydesk_grid::data::filter::FilterPredicate;
use paydesk_grid::data::loaders::load_rows;
use paydesk_grid::table::cell_format::{BadgeTone, CellContent};
use paydesk_grid::table::{
    SchemaCatalog, SelectionAggregate, SortState, TableController, TableOptions,
};
use paydesk_grid::utils::logging::init_tracing;

const USAGE: &str = "usage: table_debug <file.json|file.csv> [--kind KIND] [--context TAG] \
[--id FIELD] [--sort KEY[:desc]] [--filter KEY=TEXT]... [--search TERM] [--page N] \
[--page-size N] [--config PATH] [--logs]";

#[derive(Debug, Default)]
struct Args {
    file: PathBuf,
    kind: Option<String>,
    context: Option<String>,
    identity_field: Option<String>,
    sort: Option<SortState>,
    filters: Vec<(String, String)>,
    search: Option<String>,
    page: Option<usize>,
    page_size: Option<usize>,
    config: Option<PathBuf>,
    show_logs: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut file = None;
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .ok_or_else(|| anyhow!("{} needs a value\n{}", name, USAGE))
        };
        match arg.as_str() {
            "--kind" => args.kind = Some(value("--kind")?),
            "--context" => args.context = Some(value("--context")?),
            "--id" => args.identity_field = Some(value("--id")?),
            "--sort" => {
                let spec = value("--sort")?;
                args.sort = Some(match spec.split_once(':') {
                    Some((key, "desc")) => SortState::descending(key),
                    Some((key, _)) => SortState::ascending(key),
                    None => SortState::ascending(spec.as_str()),
                });
            }
            "--filter" => {
                let spec = value("--filter")?;
                let (key, text) = spec
                    .split_once('=')
                    .ok_or_else(|| anyhow!("--filter expects KEY=TEXT, got '{}'", spec))?;
                args.filters.push((key.to_string(), text.to_string()));
            }
            "--search" => args.search = Some(value("--search")?),
            "--page" => {
                let page: usize = value("--page")?.parse().context("--page")?;
                // 1-based on the command line
                args.page = Some(page.saturating_sub(1));
            }
            "--page-size" => {
                args.page_size = Some(value("--page-size")?.parse().context("--page-size")?)
            }
            "--config" => args.config = Some(PathBuf::from(value("--config")?)),
            "--logs" => args.show_logs = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            other if other.starts_with("--") => bail!("unknown option '{}'\n{}", other, USAGE),
            other => file = Some(PathBuf::from(other)),
        }
    }

    args.file = file.ok_or_else(|| anyhow!("missing dataset file\n{}", USAGE))?;
    Ok(args)
}

fn badge_color(tone: BadgeTone) -> Color {
    match tone {
        BadgeTone::Success => Color::Green,
        BadgeTone::Danger => Color::Red,
        BadgeTone::Warning => Color::Yellow,
        BadgeTone::Info => Color::Cyan,
        BadgeTone::Neutral => Color::Grey,
    }
}

fn main() -> Result<()> {
    let log_buffer = init_tracing();
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => GridConfig::load_from(path)?,
        None => GridConfig::default(),
    };

    let kind = args.kind.as_deref().unwrap_or("transactions");
    let context = args.context.as_deref().unwrap_or("all");
    let catalog = SchemaCatalog::shared_builtin();
    if !catalog.contains(context, kind) {
        let known = catalog.contexts(kind);
        if known.is_empty() {
            eprintln!("No schemas for kind '{}', using the fallback columns", kind);
        } else {
            eprintln!(
                "No '{}' schema for {}, using the fallback columns (known: {})",
                context,
                kind,
                known.join(", ")
            );
        }
    }

    let rows = load_rows(&args.file)?;
    let mut options = TableOptions::new(kind, context)
        .with_config(config)
        .with_catalog(catalog);
    if let Some(field) = &args.identity_field {
        options = options.with_identity_field(field.clone());
    }
    if let Some(size) = args.page_size {
        options = options.with_page_size(size);
    }

    let mut controller = TableController::new(rows, options)
        .with_context(|| format!("Failed to build table from {:?}", args.file))?;

    for (key, text) in &args.filters {
        controller.set_filter(key, FilterPredicate::contains(text.as_str()));
    }
    if let Some(term) = &args.search {
        controller.search(term);
    }
    if args.sort.is_some() {
        controller.set_sort(args.sort.clone());
    }
    if let Some(page) = args.page {
        controller.set_page(page);
    }

    let snapshot = controller.snapshot();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        snapshot
            .columns
            .iter()
            .map(|column| Cell::new(&column.header).add_attribute(Attribute::Bold)),
    );

    for row in &snapshot.visible_rows {
        table.add_row(controller.cells(row).into_iter().map(|cell| match cell {
            CellContent::Text(text) => Cell::new(text),
            CellContent::Badge { label, tone } => Cell::new(label).fg(badge_color(tone)),
        }));
    }

    println!(
        "{} / {} ({} columns)",
        controller.table_kind(),
        controller.context(),
        snapshot.columns.len()
    );
    println!("{table}");

    let info = snapshot.pagination;
    if info.total_rows == 0 {
        println!("No rows match.");
    } else {
        println!(
            "Showing {}-{} of {} (page {} of {})",
            info.first_row,
            info.last_row,
            info.total_rows,
            info.page_index + 1,
            info.total_pages
        );
    }
    if snapshot.selection_aggregate != SelectionAggregate::None {
        println!("{} selected", snapshot.selection.len());
    }

    if args.show_logs {
        println!();
        for entry in log_buffer.get_recent(50) {
            println!("{}", entry.format_for_display());
        }
    }

    Ok(())
}
