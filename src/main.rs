use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use vitrine::catalog::Catalog;
use vitrine::config::{self, GalleryConfig};
use vitrine::controller::{self, Action, Gallery};
use vitrine::{html, output};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

/// Criteria flags shared by commands that derive a working set.
#[derive(clap::Args, Clone, Default)]
struct FilterArgs {
    /// Only show this category
    #[arg(long, default_value = "")]
    category: String,
    /// Case-insensitive title substring
    #[arg(long, default_value = "")]
    search: String,
    /// Lowest rating first
    #[arg(long, conflicts_with = "descending")]
    ascending: bool,
    /// Highest rating first
    #[arg(long)]
    descending: bool,
}

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Filterable, rating-sorted image gallery")]
#[command(long_about = "\
Filterable, rating-sorted image gallery

Loads an image catalog (built-in, or a JSON array of {id, title, category,
rating, url}), filters it by category and title, sorts it by rating and
renders it as a card grid with a detail overlay.

  vitrine query --category Города
  vitrine render --search мост --open 2 --output dist/index.html
  printf 'category Природа\\nsort\\nopen 3\\n' | vitrine session

Run 'vitrine gen-config' to generate a documented vitrine.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (defaults to ./vitrine.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log state transitions at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the category selector entries
    Categories,
    /// Print the working set and stats for the given criteria
    Query(FilterArgs),
    /// Write a standalone HTML page for the given criteria
    Render {
        #[command(flatten)]
        filter: FilterArgs,
        /// Show the detail overlay for this image id
        #[arg(long)]
        open: Option<u32>,
        /// Output file
        #[arg(long, default_value = "dist/index.html")]
        output: PathBuf,
    },
    /// Read actions from stdin, one per line, and print each refresh
    Session {
        /// Rewrite this HTML page after every refresh
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a stock vitrine.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Categories => {
            let (config, catalog) = load_inputs(cli.config.as_deref())?;
            let gallery = Gallery::from_config(catalog, &config);
            output::print_lines(&output::format_categories(
                &gallery.page_view(&config.labels).toolbar,
            ));
        }
        Command::Query(filter) => {
            let (config, catalog) = load_inputs(cli.config.as_deref())?;
            let labels = &config.labels;
            let gallery = build_gallery(catalog, &config, &filter);
            output::print_lines(&output::format_page(&gallery.page_view(labels), labels));
        }
        Command::Render {
            filter,
            open,
            output: page_path,
        } => {
            let (config, catalog) = load_inputs(cli.config.as_deref())?;
            let mut gallery = build_gallery(catalog, &config, &filter);
            if let Some(id) = open {
                gallery.dispatch(Action::OpenCard(id));
            }
            html::write_page(&page_path, &gallery.page_view(&config.labels), &config)?;
            println!("Generated {}", page_path.display());
        }
        Command::Session { output: page_path } => {
            let (config, catalog) = load_inputs(cli.config.as_deref())?;
            let labels = &config.labels;
            let mut gallery = Gallery::from_config(catalog, &config);
            let page = gallery.page_view(labels);
            output::print_lines(&output::format_page(&page, labels));
            if let Some(path) = &page_path {
                html::write_page(path, &page, &config)?;
            }

            for line in std::io::stdin().lock().lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let action = match controller::parse_action(&line) {
                    Ok(action) => action,
                    Err(e) => {
                        eprintln!("{e}");
                        continue;
                    }
                };
                let refresh = gallery.dispatch(action);
                if refresh.is_none() {
                    continue;
                }
                let page = gallery.page_view(labels);
                output::print_lines(&output::format_refresh(&page, refresh, labels));
                if let Some(path) = &page_path {
                    html::write_page(path, &page, &config)?;
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve config (explicit file, else `./vitrine.toml`) and the catalog it names.
///
/// An explicit `--config` path must exist; the implicit one may be absent.
fn load_inputs(
    config_path: Option<&Path>,
) -> Result<(GalleryConfig, Catalog), Box<dyn std::error::Error>> {
    let (config, base_dir) = match config_path {
        Some(path) => (
            config::load_config_file(path)?,
            path.parent().unwrap_or(Path::new("")),
        ),
        None => (config::load_config(Path::new("."))?, Path::new("")),
    };
    // Relative catalog paths are relative to the config file.
    let catalog = if config.catalog.is_empty() {
        Catalog::builtin()
    } else {
        Catalog::load(&base_dir.join(&config.catalog))?
    };
    Ok((config, catalog))
}

/// Controller over the catalog with the command-line criteria applied.
fn build_gallery(catalog: Catalog, config: &GalleryConfig, filter: &FilterArgs) -> Gallery {
    let mut gallery = Gallery::from_config(catalog, config);
    let wants_ascending = if filter.ascending {
        Some(true)
    } else if filter.descending {
        Some(false)
    } else {
        None
    };
    if wants_ascending.is_some_and(|asc| asc != gallery.sort().ascending) {
        gallery.dispatch(Action::ToggleSort);
    }
    gallery.dispatch(Action::EditSearch(filter.search.clone()));
    gallery.dispatch(Action::SelectCategory(filter.category.clone()));
    gallery
}
