//! Rendered-output statistics.
//!
//! Provides a quick summary of what has been rendered: page counts, bytes
//! on disk, and per-service breakdowns. Used by `seo stats` to give
//! confidence that a batch render produced what the catalog promised.

use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::catalog::Catalog;
use crate::config::Config;

struct ServiceStats {
    slug: String,
    page_count: usize,
    bytes: u64,
    last_rendered_ts: Option<i64>,
}

/// Run the stats command: walk the output directory and print a summary.
pub fn run_stats(config: &Config, out_dir: Option<&Path>) -> Result<()> {
    let out_dir = out_dir.unwrap_or(&config.output.dir);
    let catalog = Catalog::from_config(config);
    let services_dir = out_dir.join("services");

    let mut per_service: Vec<ServiceStats> = Vec::new();
    let mut total_pages = 0usize;
    let mut total_bytes = 0u64;

    for service in &catalog.services {
        let dir = services_dir.join(&service.slug);
        let mut stats = ServiceStats {
            slug: service.slug.clone(),
            page_count: 0,
            bytes: 0,
            last_rendered_ts: None,
        };
        if let Ok(entries) = fs::read_dir(&dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().map(|e| e == "html").unwrap_or(false) {
                    stats.page_count += 1;
                    if let Ok(meta) = entry.metadata() {
                        stats.bytes += meta.len();
                        if let Ok(modified) = meta.modified() {
                            let ts = modified
                                .duration_since(std::time::UNIX_EPOCH)
                                .map(|d| d.as_secs() as i64)
                                .unwrap_or(0);
                            stats.last_rendered_ts =
                                Some(stats.last_rendered_ts.map_or(ts, |t| t.max(ts)));
                        }
                    }
                }
            }
        }
        total_pages += stats.page_count;
        total_bytes += stats.bytes;
        per_service.push(stats);
    }

    println!("SEO Engine — Output Stats");
    println!("=========================");
    println!();
    println!("  Output:      {}", out_dir.display());
    println!("  Services:    {}", catalog.services.len());
    println!("  Cities:      {}", catalog.cities.len());
    println!(
        "  Pages:       {} / {} ({}%)",
        total_pages,
        catalog.page_count(),
        if catalog.page_count() > 0 {
            (total_pages * 100) / catalog.page_count()
        } else {
            0
        }
    );
    println!("  Size:        {}", format_bytes(total_bytes));

    let rendered: Vec<&ServiceStats> = per_service.iter().filter(|s| s.page_count > 0).collect();
    if !rendered.is_empty() {
        println!();
        println!("  By service:");
        println!(
            "  {:<24} {:>6} {:>10}   {}",
            "SERVICE", "PAGES", "SIZE", "LAST RENDER"
        );
        println!("  {}", "-".repeat(60));
        for s in rendered {
            let when = match s.last_rendered_ts {
                Some(ts) => format_ts_relative(ts),
                None => "unknown".to_string(),
            };
            println!(
                "  {:<24} {:>6} {:>10}   {}",
                s.slug,
                s.page_count,
                format_bytes(s.bytes),
                when
            );
        }
    }

    println!();
    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

/// Format a Unix timestamp as a relative time string (e.g. "3 hours ago").
fn format_ts_relative(ts: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let delta = now - ts;

    if delta < 0 {
        return format_ts_iso(ts);
    }

    if delta < 60 {
        "just now".to_string()
    } else if delta < 3600 {
        let mins = delta / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if delta < 86400 {
        let hours = delta / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if delta < 86400 * 30 {
        let days = delta / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        format_ts_iso(ts)
    }
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}
