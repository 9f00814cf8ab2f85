//! Catalog browser CLI.
//!
//! Read-only queries over the parts catalog: category listing, components in
//! a category, name search, price-range filtering, and saved-build summaries
//! with a total price. Output is JSON on stdout.

use anyhow::{Result, anyhow, bail};
use rigcheck::runtime::{self, next_value, parse_price, parse_u64};
use rigcheck::{
    BuildId, CatalogIndex, CatalogSource, CategorySlug, Component, resolve_catalog_path,
};
use serde::Serialize;
use serde_json::{Value, json};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    runtime::init_logging();
    let args = CliArgs::parse()?;
    let catalog_path = resolve_catalog_path(args.catalog.as_deref())?;
    let catalog = CatalogIndex::load(&catalog_path)?;

    let output = match &args.query {
        Query::Categories => {
            let rows: Vec<Value> = catalog
                .categories()
                .map(|category| {
                    let count = catalog.components_in_category(&category.slug).count();
                    json!({
                        "id": category.id,
                        "name": category.name,
                        "slug": category.slug,
                        "icon": category.icon,
                        "component_count": count,
                    })
                })
                .collect();
            Value::Array(rows)
        }
        Query::Category(slug) => {
            if catalog.category_by_slug(slug).is_none() {
                bail!("unknown category '{slug}'");
            }
            to_json(&catalog.components_in_category(slug).collect::<Vec<_>>())?
        }
        Query::Search(term) => to_json(&catalog.search(term))?,
        Query::PriceRange(min, max) => to_json(&catalog.components_in_price_range(*min, *max))?,
        Query::Build(id) => build_summary(&catalog, *id)?,
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

fn build_summary(catalog: &CatalogIndex, id: BuildId) -> Result<Value> {
    let build = catalog
        .build(id)
        .ok_or_else(|| anyhow!("build {id} not found"))?;
    let total = catalog.build_total_price(id).unwrap_or(0.0);
    let lines: Vec<Value> = build
        .components
        .iter()
        .filter_map(|entry| {
            catalog.component_ref(entry.component_id).map(|component: &Component| {
                json!({
                    "component_id": component.id,
                    "name": component.name,
                    "category": component.category_slug,
                    "quantity": entry.quantity,
                    "unit_price": component.price,
                    "notes": entry.notes,
                })
            })
        })
        .collect();
    Ok(json!({
        "id": build.id,
        "name": build.name,
        "description": build.description,
        "is_public": build.is_public,
        "components": lines,
        "total_price": total,
    }))
}

enum Query {
    Categories,
    Category(CategorySlug),
    Search(String),
    PriceRange(f64, f64),
    Build(BuildId),
}

struct CliArgs {
    query: Query,
    catalog: Option<PathBuf>,
    pretty: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let raw: Vec<String> = env::args_os()
            .skip(1)
            .map(|arg| {
                arg.into_string()
                    .map_err(|_| anyhow!("argument is not valid UTF-8"))
            })
            .collect::<Result<_>>()?;
        let mut args = raw.into_iter();

        let mut query: Option<Query> = None;
        let mut catalog: Option<PathBuf> = None;
        let mut pretty = false;

        while let Some(arg) = args.next() {
            let next_query = match arg.as_str() {
                "--categories" => Some(Query::Categories),
                "--category" => Some(Query::Category(CategorySlug::new(next_value(
                    &mut args,
                    "--category",
                )?))),
                "--search" => Some(Query::Search(next_value(&mut args, "--search")?)),
                "--price-range" => {
                    let min = parse_price(&next_value(&mut args, "--price-range")?, "min price")?;
                    let max = parse_price(&next_value(&mut args, "--price-range")?, "max price")?;
                    if min > max {
                        bail!("--price-range min ({min}) exceeds max ({max})");
                    }
                    Some(Query::PriceRange(min, max))
                }
                "--build" => {
                    let id = parse_u64(&next_value(&mut args, "--build")?, "--build")?;
                    Some(Query::Build(BuildId(id)))
                }
                "--catalog" => {
                    catalog = Some(PathBuf::from(next_value(&mut args, "--catalog")?));
                    None
                }
                "--pretty" => {
                    pretty = true;
                    None
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            };

            if let Some(next_query) = next_query {
                if query.is_some() {
                    bail!("only one query flag may be given");
                }
                query = Some(next_query);
            }
        }

        let Some(query) = query else {
            print_usage();
            bail!("a query flag is required");
        };

        Ok(Self {
            query,
            catalog,
            pretty,
        })
    }
}

fn print_usage() {
    eprintln!(
        "Usage: rig-catalog (--categories | --category SLUG | --search TERM | --price-range MIN MAX | --build ID) [--catalog PATH] [--pretty]"
    );
}
