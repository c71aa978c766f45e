//! Batch landing-page rendering.
//!
//! Fans out over the service×city catalog, generates each page's content,
//! wraps it in a complete RTL HTML document, and writes
//! `<out_dir>/services/<service>/<city>.html`. A page whose body hash is
//! unchanged since the last render is skipped, so re-renders after a
//! catalog tweak only touch affected files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::catalog::{self, Catalog};
use crate::config::Config;
use crate::models::{City, SemanticContent, Service};
use crate::progress::{RenderProgressEvent, RenderProgressReporter};
use crate::recognize::SemanticEngine;
use crate::text;

/// Which catalog pages to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    All,
    Service(String),
    ServiceCity(String, String),
}

impl RenderTarget {
    /// Parse `all`, `<service-slug>`, or `<service-slug>:<city-slug>`.
    pub fn parse(target: &str) -> Self {
        if target == "all" {
            return RenderTarget::All;
        }
        match target.split_once(':') {
            Some((service, city)) => {
                RenderTarget::ServiceCity(service.to_string(), city.to_string())
            }
            None => RenderTarget::Service(target.to_string()),
        }
    }
}

/// Outcome counters for one render run.
#[derive(Debug, Default)]
pub struct RenderSummary {
    pub written: usize,
    pub unchanged: usize,
    pub total: usize,
}

/// Render the selected pages. `force` rewrites files even when unchanged;
/// `dry_run` generates nothing and only reports what would be written.
pub fn run_render(
    config: &Config,
    target: &RenderTarget,
    out_dir: Option<&Path>,
    force: bool,
    dry_run: bool,
    limit: Option<usize>,
    reporter: &dyn RenderProgressReporter,
) -> Result<RenderSummary> {
    let catalog = Catalog::from_config(config);
    let out_dir = out_dir.unwrap_or(&config.output.dir);

    reporter.report(RenderProgressEvent::Discovering);
    let mut pages = select_pages(&catalog, target)?;
    if let Some(limit) = limit {
        pages.truncate(limit);
    }

    let mut summary = RenderSummary {
        total: pages.len(),
        ..Default::default()
    };

    if dry_run {
        println!("render: {} page(s) selected (dry run)", pages.len());
        return Ok(summary);
    }

    let mut engine = SemanticEngine::with_max_input(config.generation.max_input_chars)?;
    let total = pages.len() as u64;

    for (i, (service, city)) in pages.iter().enumerate() {
        let content = catalog::generate_service_content(
            &mut engine,
            config,
            &service.category,
            &service.name_en,
            &city.name_en,
        );

        let path = page_path(out_dir, service, city);
        let document = wrap_document(config, service, city, &content);

        if !force && is_unchanged(&path, &document) {
            summary.unchanged += 1;
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&path, &document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            summary.written += 1;
        }

        reporter.report(RenderProgressEvent::Rendering {
            page: format!("services/{}/{}", service.slug, city.slug),
            n: (i + 1) as u64,
            total,
        });
    }

    println!(
        "render: ok  written: {}  unchanged: {}  total: {}",
        summary.written, summary.unchanged, summary.total
    );
    Ok(summary)
}

fn select_pages<'a>(
    catalog: &'a Catalog,
    target: &RenderTarget,
) -> Result<Vec<(&'a Service, &'a City)>> {
    let mut pages = Vec::new();
    match target {
        RenderTarget::All => {
            for service in &catalog.services {
                for city in &catalog.cities {
                    pages.push((service, city));
                }
            }
        }
        RenderTarget::Service(slug) => {
            let service = catalog
                .service(slug)
                .with_context(|| format!("Unknown service: {}", slug))?;
            for city in &catalog.cities {
                pages.push((service, city));
            }
        }
        RenderTarget::ServiceCity(service_slug, city_slug) => {
            let service = catalog
                .service(service_slug)
                .with_context(|| format!("Unknown service: {}", service_slug))?;
            let city = catalog
                .city(city_slug)
                .with_context(|| format!("Unknown city: {}", city_slug))?;
            pages.push((service, city));
        }
    }
    Ok(pages)
}

fn page_path(out_dir: &Path, service: &Service, city: &City) -> PathBuf {
    out_dir
        .join("services")
        .join(&service.slug)
        .join(format!("{}.html", city.slug))
}

/// True when the on-disk file already carries this exact document body,
/// compared by SHA-256 of the bytes.
fn is_unchanged(path: &Path, document: &str) -> bool {
    match fs::read(path) {
        Ok(existing) => {
            let mut old = Sha256::new();
            old.update(&existing);
            let mut new = Sha256::new();
            new.update(document.as_bytes());
            old.finalize() == new.finalize()
        }
        Err(_) => false,
    }
}

/// Wrap the generated body in a complete HTML document. Arabic-first:
/// `dir="rtl"` when the configured locale is Arabic.
fn wrap_document(
    config: &Config,
    service: &Service,
    city: &City,
    content: &SemanticContent,
) -> String {
    let arabic = config.site.locale == "ar";
    let dir = if arabic { "rtl" } else { "ltr" };
    let localized_heading = if arabic {
        format!("{} في {}", service.name_ar, city.name_ar)
    } else {
        format!("{} in {}", service.name_en, city.name_en)
    };

    format!(
        "<!doctype html>\n<html lang=\"{lang}\" dir=\"{dir}\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <meta name=\"description\" content=\"{description}\">\n\
         <link rel=\"canonical\" href=\"{base}/services/{service}/{city}\">\n\
         </head>\n<body>\n\
         <header><p>{heading}</p></header>\n\
         <main>\n{body}</main>\n\
         </body>\n</html>\n",
        lang = text::html_escape(&config.site.locale),
        dir = dir,
        title = text::html_escape(&content.title),
        description = text::html_escape(&content.meta_description),
        base = config.site.base_url.trim_end_matches('/'),
        service = service.slug,
        city = city.slug,
        heading = text::html_escape(&localized_heading),
        body = content.content,
    )
}
