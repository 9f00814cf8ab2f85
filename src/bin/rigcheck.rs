//! Compatibility checker CLI.
//!
//! Loads the parts catalog and evaluates either a component pair, a saved
//! build, or an ad-hoc component list. The verdict is printed to stdout as
//! JSON; logs go to stderr (`RIGCHECK_LOG`).
//!
//! Exit codes: 0 when the check ran (whatever the verdict), 1 on usage,
//! catalog, or rule-data errors, 2 with `--strict` when the result is
//! incompatible.

use anyhow::{Context, Result, anyhow, bail};
use rigcheck::runtime::{self, next_value, parse_u64};
use rigcheck::{
    BuildId, CatalogIndex, CatalogSource, CompatibilityService, ComponentId, resolve_catalog_path,
    split_list,
};
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use tracing::warn;

const EXIT_INCOMPATIBLE: i32 = 2;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_INCOMPATIBLE),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

/// Returns `false` only when `--strict` was given and the verdict failed.
fn run() -> Result<bool> {
    runtime::init_logging();
    let args = CliArgs::parse()?;
    let catalog_path = resolve_catalog_path(args.catalog.as_deref())?;
    let catalog = CatalogIndex::load(&catalog_path)?;
    let service = CompatibilityService::new(&catalog);

    let compatible = match &args.mode {
        Mode::Pair(first, second) => {
            let verdict = service
                .check_pair_compatibility(Some(*first), Some(*second))
                .with_context(|| format!("checking pair {first} / {second}"))?;
            emit(&verdict, args.pretty)?;
            verdict.compatible
        }
        Mode::Build(id) => {
            let verdict = service
                .check_saved_build(*id)
                .map_err(|err| anyhow!("build {id} ({}): {err}", err.class().as_str()))?;
            emit(&verdict, args.pretty)?;
            verdict.overall_compatible
        }
        Mode::Components(ids) => {
            let mut components = Vec::with_capacity(ids.len());
            for id in ids {
                match catalog.component(*id) {
                    Some(component) => components.push(component),
                    None => warn!(component = %id, "skipping unknown component"),
                }
            }
            let verdict = service
                .check_build_compatibility(&components)
                .map_err(|err| anyhow!("component list ({}): {err}", err.class().as_str()))?;
            emit(&verdict, args.pretty)?;
            verdict.overall_compatible
        }
    };

    Ok(compatible || !args.strict)
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

enum Mode {
    Pair(ComponentId, ComponentId),
    Build(BuildId),
    Components(Vec<ComponentId>),
}

struct CliArgs {
    mode: Mode,
    catalog: Option<PathBuf>,
    pretty: bool,
    strict: bool,
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

        let mut mode: Option<Mode> = None;
        let mut catalog: Option<PathBuf> = None;
        let mut pretty = false;
        let mut strict = false;

        while let Some(arg) = args.next() {
            let next_mode = match arg.as_str() {
                "--pair" => {
                    let first = parse_u64(&next_value(&mut args, "--pair")?, "--pair id")?;
                    let second = parse_u64(&next_value(&mut args, "--pair")?, "--pair id")?;
                    Some(Mode::Pair(ComponentId(first), ComponentId(second)))
                }
                "--build" => {
                    let id = parse_u64(&next_value(&mut args, "--build")?, "--build")?;
                    Some(Mode::Build(BuildId(id)))
                }
                "--components" => {
                    let list = next_value(&mut args, "--components")?;
                    let ids = split_list(&list)
                        .iter()
                        .map(|raw| parse_u64(raw, "--components id").map(ComponentId))
                        .collect::<Result<Vec<_>>>()?;
                    Some(Mode::Components(ids))
                }
                "--catalog" => {
                    catalog = Some(PathBuf::from(next_value(&mut args, "--catalog")?));
                    None
                }
                "--pretty" => {
                    pretty = true;
                    None
                }
                "--strict" => {
                    strict = true;
                    None
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            };

            if let Some(next_mode) = next_mode {
                if mode.is_some() {
                    bail!("--pair, --build, and --components are mutually exclusive");
                }
                mode = Some(next_mode);
            }
        }

        let Some(mode) = mode else {
            print_usage();
            bail!("one of --pair, --build, or --components is required");
        };

        Ok(Self {
            mode,
            catalog,
            pretty,
            strict,
        })
    }
}

fn print_usage() {
    eprintln!(
        "Usage: rigcheck (--pair ID ID | --build ID | --components ID[,ID...]) [--catalog PATH] [--pretty] [--strict]\n\
         \n\
         Evaluates component compatibility against the parts catalog and prints JSON.\n\
         Catalog: --catalog, then $RIGCHECK_CATALOG, then <repo>/catalog/parts.json.\n\
         --strict exits 2 when the result is incompatible."
    );
}
