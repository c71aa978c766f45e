//! # SEO Engine CLI (`seo`)
//!
//! The `seo` binary is the primary interface for the content engine. It
//! provides commands for analyzing free text, generating a single page's
//! content, batch-rendering the service×city catalog, and inspecting the
//! catalog and rendered output.
//!
//! ## Usage
//!
//! ```bash
//! seo --config ./seo.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `seo analyze "<text>"` | Entity/keyword/intent/gap report for free text |
//! | `seo generate "<topic>"` | Generate one page's content and metadata |
//! | `seo render <target>` | Render catalog landing pages to HTML files |
//! | `seo catalog` | List the effective service and city catalog |
//! | `seo stats` | Summarize the rendered output directory |
//!
//! ## Examples
//!
//! ```bash
//! # Analyze marketing copy
//! seo analyze "Emergency AC Repair in Riyadh with same-day booking"
//!
//! # Analyze a file, machine-readable
//! seo analyze --file ./copy.txt --json
//!
//! # Generate a single service/city landing page from the catalog
//! seo generate --service ac-repair --city riyadh --html
//!
//! # Render every catalog page to ./dist
//! seo render all
//!
//! # Re-render one service after a catalog change
//! seo render ac-repair --force
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use seo_engine::catalog::{self, Catalog};
use seo_engine::config::{self, Config};
use seo_engine::progress::ProgressMode;
use seo_engine::recognize::SemanticEngine;
use seo_engine::render::{self, RenderTarget};
use seo_engine::report;
use seo_engine::stats_cmd;
use seo_engine::{assemble, models::SemanticContent};

/// SEO Engine CLI — entity and keyword content synthesis for an
/// Arabic-first home-services marketplace.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. A missing file falls back to built-in defaults; an invalid file
/// is an error.
#[derive(Parser)]
#[command(
    name = "seo",
    about = "SEO Engine — entity and keyword content synthesis for a home-services marketplace",
    version,
    long_about = "SEO Engine synthesizes landing-page copy and SEO metadata (entities, n-grams, \
    internal links, search intents, information gaps, topical coverage) from a topic string and \
    the marketplace's service/city catalog."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./seo.toml`. Site, generation, catalog, and output
    /// settings are read from this file.
    #[arg(long, global = true, default_value = "./seo.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Analyze free text.
    ///
    /// Runs entity recognition, n-gram/skip-gram extraction, intent
    /// classification, link proposals, and information-gap detection over
    /// the given text and prints a report.
    Analyze {
        /// The text to analyze. Omit when using `--file`.
        text: Option<String>,

        /// Read the text to analyze from a file instead.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Print the full analysis as JSON instead of tables.
        #[arg(long)]
        json: bool,
    },

    /// Generate one page's content and metadata.
    ///
    /// Either pass a free topic string, or `--service`/`--city` catalog
    /// slugs to generate a landing page with the catalog's entity graph.
    Generate {
        /// Free topic string (e.g. "AC Repair in Riyadh"). Omit when using
        /// `--service` and `--city`.
        topic: Option<String>,

        /// Catalog service slug (requires `--city`).
        #[arg(long)]
        service: Option<String>,

        /// Catalog city slug (requires `--service`).
        #[arg(long)]
        city: Option<String>,

        /// Print the full SemanticContent as JSON.
        #[arg(long)]
        json: bool,

        /// Print only the raw HTML body.
        #[arg(long)]
        html: bool,
    },

    /// Render catalog landing pages to HTML files.
    ///
    /// Target format: `all`, `<service-slug>`, or
    /// `<service-slug>:<city-slug>`. Unchanged pages are skipped unless
    /// `--force` is given.
    Render {
        /// Render target: `all`, a service slug, or `service:city`.
        target: String,

        /// Output directory (overrides `[output].dir`).
        #[arg(long)]
        out: Option<PathBuf>,

        /// Rewrite pages even when their content is unchanged.
        #[arg(long)]
        force: bool,

        /// Show the selected page count without writing anything.
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of pages to render.
        #[arg(long)]
        limit: Option<usize>,

        /// Progress output: `auto`, `off`, `human`, or `json`.
        #[arg(long, default_value = "auto")]
        progress: String,
    },

    /// List the effective service and city catalog.
    ///
    /// Shows built-in entries plus any `[catalog]` additions from the
    /// config file, and the resulting page count.
    Catalog,

    /// Summarize the rendered output directory.
    ///
    /// Page counts, bytes on disk, and per-service last-render times.
    Stats {
        /// Output directory (overrides `[output].dir`).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_or_minimal(&cli.config)?;

    match cli.command {
        Commands::Analyze { text, file, json } => {
            let input = match (text, file) {
                (Some(text), None) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (Some(_), Some(_)) => bail!("Pass either <text> or --file, not both"),
                (None, None) => bail!("Pass <text> or --file"),
            };
            let mut engine = SemanticEngine::with_max_input(cfg.generation.max_input_chars)?;
            let report = report::analyze_text(&mut engine, &cfg, &input);
            if json {
                report::print_json(&report)?;
            } else {
                report::print_human(&report);
            }
        }
        Commands::Generate {
            topic,
            service,
            city,
            json,
            html,
        } => {
            let mut engine = SemanticEngine::with_max_input(cfg.generation.max_input_chars)?;
            let content = match (topic, service, city) {
                (None, Some(service_slug), Some(city_slug)) => {
                    let catalog = Catalog::from_config(&cfg);
                    let service = catalog
                        .service(&service_slug)
                        .with_context(|| format!("Unknown service: {}", service_slug))?;
                    let city = catalog
                        .city(&city_slug)
                        .with_context(|| format!("Unknown city: {}", city_slug))?;
                    catalog::generate_service_content(
                        &mut engine,
                        &cfg,
                        &service.category,
                        &service.name_en,
                        &city.name_en,
                    )
                }
                (Some(topic), None, None) => {
                    assemble::generate_semantic_content(&mut engine, &cfg, &topic, &[])
                }
                (None, None, None) => bail!("Pass a <topic> or --service and --city"),
                _ => bail!("Pass either a <topic> or both --service and --city"),
            };
            print_content(&content, json, html)?;
        }
        Commands::Render {
            target,
            out,
            force,
            dry_run,
            limit,
            progress,
        } => {
            let mode = parse_progress_mode(&progress)?;
            let reporter = mode.reporter();
            let target = RenderTarget::parse(&target);
            render::run_render(
                &cfg,
                &target,
                out.as_deref(),
                force,
                dry_run,
                limit,
                reporter.as_ref(),
            )?;
        }
        Commands::Catalog => {
            catalog::list_catalog(&cfg);
        }
        Commands::Stats { out } => {
            stats_cmd::run_stats(&cfg, out.as_deref())?;
        }
    }

    Ok(())
}

/// Load the config file, or fall back to defaults when it doesn't exist.
/// A present-but-invalid file is always an error.
fn load_or_minimal(path: &Path) -> Result<Config> {
    if path.exists() {
        config::load_config(path)
    } else {
        Ok(Config::minimal())
    }
}

fn parse_progress_mode(value: &str) -> Result<ProgressMode> {
    match value {
        "auto" => Ok(ProgressMode::default_for_tty()),
        "off" => Ok(ProgressMode::Off),
        "human" => Ok(ProgressMode::Human),
        "json" => Ok(ProgressMode::Json),
        other => bail!(
            "Unknown progress mode: {}. Use auto, off, human, or json.",
            other
        ),
    }
}

fn print_content(content: &SemanticContent, json: bool, html: bool) -> Result<()> {
    if json && html {
        bail!("Pass either --json or --html, not both");
    }
    if json {
        println!("{}", serde_json::to_string_pretty(content)?);
        return Ok(());
    }
    if html {
        println!("{}", content.content);
        return Ok(());
    }

    println!("title:       {}", content.title);
    println!("description: {}", content.meta_description);
    println!(
        "entities: {}  ngrams: {}  links: {}  intents: {}  gaps: {}",
        content.entities.len(),
        content.ngrams.len(),
        content.entity_links.len(),
        content.search_intents.len(),
        content
            .information_gaps
            .iter()
            .map(|g| g.missing_information.len())
            .sum::<usize>()
    );
    println!(
        "coverage: {:.2}  (entity {:.2}, depth {:.2}, breadth {:.2})  authority: {:.2}",
        content.topical_coverage.coverage_score,
        content.topical_coverage.entity_coverage,
        content.topical_coverage.depth_score,
        content.topical_coverage.breadth_score,
        seo_engine::coverage::calculate_topical_authority(
            &content.topical_coverage,
            &content.historical_data
        )
    );
    println!();
    println!("{}", content.content);
    Ok(())
}
