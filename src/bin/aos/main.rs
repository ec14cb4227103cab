//! aos CLI tool
//!
//! Command-line interface for the Alchemies of Scent dataset.
//!
//! ## Commands
//!
//! - `validate`: Referential-integrity check (the default when no command is given). Prints one
//!   `path<TAB>entityId<TAB>field<TAB>reason` line per violation to stderr and exits 1 if there
//!   are any.
//! - `route <url-or-route>`: Resolve an address the way the site does and print its breadcrumbs
//! - `slug <title>`: Derive the slug and URN for a new record
//!
//! Paths come from `aos.toml` (or `--config`), then `AOS_DATASET` / `AOS_CURATED`, then the
//! command line flags.
//!
//! Logging goes to stderr at `warn` unless `RUST_LOG` says otherwise, so a default `validate` run
//! leaves stderr to the integrity lines alone.

use aos_core::{
    breadcrumb::build_breadcrumbs,
    config::{load_config, AosConfig},
    dataset::{Dataset, ItemKind},
    ident::{recipe_slug, slugify, urn_for, UrnKind},
    inherit::resolve_recipe_metadata,
    route::Route,
    url_codec::{encode, resolve_location, ROUTE_PARAM},
    validate::validate_files,
    AosError,
};
use clap::{Parser, Subcommand};
use std::{
    io::{stderr, IsTerminal},
    path::PathBuf,
    process::ExitCode,
};
use url::{form_urlencoded, Url};

#[derive(Parser)]
#[command(name = "aos")]
#[command(author, version, about = "Routing and integrity tools for the Alchemies of Scent dataset", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./aos.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the dataset's referential integrity
    Validate {
        /// Dataset JSON document
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Curated homepage content source
        #[arg(long)]
        curated: Option<PathBuf>,
    },

    /// Resolve a URL, query string or route string and print its breadcrumb trail
    Route {
        /// e.g. `https://example.org/?r=recipe%3Ar1`, `?r=archive` or `person:p-dioscorides`
        target: String,

        /// Dataset JSON document
        #[arg(long)]
        dataset: Option<PathBuf>,
    },

    /// Derive the slug and URN for a title
    Slug {
        title: String,

        /// Author, appended to recipe slugs
        #[arg(long)]
        author: Option<String>,

        /// Record kind (recipe, ingredient, tool, process, work, person, ancient-term, ...)
        #[arg(long, default_value = "recipe")]
        kind: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(stderr)
        .with_ansi(stderr().is_terminal())
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, AosError> {
    let config = load_config(cli.config)?;
    match cli.command.unwrap_or(Commands::Validate {
        dataset: None,
        curated: None,
    }) {
        Commands::Validate { dataset, curated } => Ok(validate(&config, dataset, curated)),
        Commands::Route { target, dataset } => {
            route(&target, dataset.unwrap_or(config.dataset_path))?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Slug {
            title,
            author,
            kind,
        } => {
            slug(&title, author.as_deref(), &kind)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn validate(config: &AosConfig, dataset: Option<PathBuf>, curated: Option<PathBuf>) -> ExitCode {
    let dataset = dataset.unwrap_or_else(|| config.dataset_path.clone());
    let curated = curated.unwrap_or_else(|| config.curated_path.clone());
    tracing::info!("Validating {:?} (curated content: {:?})", dataset, curated);
    let errors = validate_files(&dataset, &curated);
    for error in &errors {
        eprintln!("{error}");
    }
    if errors.is_empty() {
        tracing::info!("Dataset is consistent");
        ExitCode::SUCCESS
    } else {
        tracing::info!("{} integrity errors", errors.len());
        ExitCode::FAILURE
    }
}

/// Query string for a full URL, a bare query string or a route string.
fn query_string(target: &str) -> Result<String, AosError> {
    let target = target.trim();
    if target.starts_with('?') || target.starts_with(&format!("{ROUTE_PARAM}=")) {
        return Ok(target.to_string());
    }
    if target.contains("://") {
        let url = Url::parse(target)?;
        return Ok(url.query().unwrap_or_default().to_string());
    }
    Ok(form_urlencoded::Serializer::new(String::new())
        .append_pair(ROUTE_PARAM, target)
        .finish())
}

fn route(target: &str, dataset_path: PathBuf) -> Result<(), AosError> {
    let dataset = Dataset::load(&dataset_path)?;
    let state = resolve_location(&query_string(target)?, &dataset);
    let route = state.typed_route();
    println!("route\t{route}");
    println!("url\t{}", encode(&state));
    if !state.query.is_empty() {
        println!("query\t{}", state.query);
    }
    let trail = build_breadcrumbs(&route, &dataset);
    let rendered: Vec<String> = trail
        .iter()
        .map(|crumb| match &crumb.route {
            Some(link) => format!("{} [{link}]", crumb.label),
            None => crumb.label.clone(),
        })
        .collect();
    println!("breadcrumbs\t{}", rendered.join(" > "));
    if let Route::Recipe { id } = &route {
        if let Some(recipe) = dataset.recipe(id) {
            for item in recipe.items.iter().filter(|i| i.kind == ItemKind::Ingredient) {
                println!(
                    "term\t{}\t{}",
                    item.id,
                    dataset.pinned_term(&recipe.id, item).unwrap_or("-")
                );
            }
            let meta = resolve_recipe_metadata(recipe, &dataset);
            for (name, value) in [
                ("author", meta.author),
                ("date", meta.date),
                ("language", meta.language),
                ("place", meta.place),
            ] {
                println!("{name}\t{}", value.unwrap_or_default());
            }
        }
    }
    Ok(())
}

fn slug(title: &str, author: Option<&str>, kind: &str) -> Result<(), AosError> {
    let kind = UrnKind::parse(kind)
        .ok_or_else(|| AosError::Custom(format!("unknown record kind '{kind}'")))?;
    let slug = match kind {
        UrnKind::Recipe => recipe_slug(title, author),
        _ => slugify(title),
    };
    if slug.is_empty() {
        return Err(AosError::Custom(format!("'{title}' has no usable characters")));
    }
    println!("slug\t{slug}");
    println!("urn\t{}", urn_for(kind, &slug));
    Ok(())
}
