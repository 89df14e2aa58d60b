// Prime set catalog CLI.
//
// Builds the catalog of all 224 prime pitch class sets and prints it.
//
// Usage:
//   cargo run -p pcsets_catalog -- [--page N] [--json] [--serial] [--config FILE]
//
// --page N     print only cardinality N (0-12)
// --json       dump as JSON instead of the text listing
// --serial     compute prime forms on one thread
// --config F   read a CatalogConfig from a JSON file; flags override it
//
// Logging goes to stderr and follows RUST_LOG (default: info).

use pcsets_catalog::{CatalogConfig, PAGES, SetCatalog};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

struct Args {
    page: Option<usize>,
    json: bool,
    serial: bool,
    config_path: Option<String>,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = parse_args();

    let mut config = match &args.config_path {
        Some(path) => load_config(path),
        None => CatalogConfig::default(),
    };
    if args.serial {
        config.parallel = false;
    }

    tracing::info!(parallel = config.parallel, "building prime set catalog");
    let catalog = SetCatalog::build(&config);
    tracing::info!(primes = catalog.len(), "catalog ready");

    let output = match (args.page, args.json) {
        (Some(n), true) => serde_json::to_string_pretty(catalog.page(n)),
        (None, true) => serde_json::to_string_pretty(&catalog),
        (Some(n), false) => Ok(catalog.page_listing(n)),
        (None, false) => Ok(catalog.listing()),
    };
    match output {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("Error: failed to serialize catalog: {e}");
            std::process::exit(1);
        }
    }
    if args.json {
        println!();
    }
}

fn load_config(path: &str) -> CatalogConfig {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: cannot read config {path}: {e}");
            std::process::exit(1);
        }
    };
    match CatalogConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: invalid config {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        page: None,
        json: false,
        serial: false,
        config_path: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => parsed.json = true,
            "--serial" => parsed.serial = true,
            "--page" => {
                i += 1;
                parsed.page = Some(parse_page(args.get(i)));
            }
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => parsed.config_path = Some(path.clone()),
                    None => {
                        eprintln!("Error: --config requires a file path");
                        std::process::exit(1);
                    }
                }
            }
            "--help" | "-h" => {
                println!("Usage: catalog [--page N] [--json] [--serial] [--config FILE]");
                std::process::exit(0);
            }
            other => {
                eprintln!("Error: unknown argument {other:?}");
                std::process::exit(1);
            }
        }
        i += 1;
    }
    parsed
}

fn parse_page(value: Option<&String>) -> usize {
    match value.and_then(|v| v.parse::<usize>().ok()) {
        Some(n) if n < PAGES => n,
        _ => {
            eprintln!("Error: --page requires a cardinality from 0 to {}", PAGES - 1);
            std::process::exit(1);
        }
    }
}
