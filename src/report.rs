//! Text-analysis reports.
//!
//! Runs the analysis half of the pipeline (no HTML assembly) over free
//! text and prints either human-readable tables or a JSON payload for
//! dashboard panels. Used by `seo analyze` and, with `--json`, as the
//! machine surface other tools consume.

use anyhow::Result;
use serde::Serialize;

use crate::config::Config;
use crate::gaps;
use crate::intent;
use crate::link;
use crate::models::{EntityLink, InformationGap, NGram, NamedEntity, SearchIntent, SkipGram};
use crate::ngram;
use crate::recognize::SemanticEngine;

/// Full analysis payload for one input text.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub entities: Vec<NamedEntity>,
    pub ngrams: Vec<NGram>,
    pub skip_grams: Vec<SkipGram>,
    pub entity_links: Vec<EntityLink>,
    pub search_intents: Vec<SearchIntent>,
    pub information_gaps: Vec<InformationGap>,
}

/// Run recognition, extraction, intents, links, and gap detection over
/// `input`.
pub fn analyze_text(engine: &mut SemanticEngine, config: &Config, input: &str) -> AnalysisReport {
    let entities = engine.recognize_entities(input);

    let mut ngrams = ngram::generate_ngrams(input, config.generation.ngram_size);
    ngram::annotate_with_entities(&mut ngrams, &entities);
    let skip_grams = ngram::generate_skip_grams(input, config.generation.skip_distance);

    let entity_links = link::link_entities(engine.rules(), &entities, &config.site.base_url);
    let search_intents = intent::generate_search_intents(engine.rules(), &entities);
    let information_gaps = gaps::identify_information_gaps(engine.rules(), input, &entities);

    AnalysisReport {
        entities,
        ngrams,
        skip_grams,
        entity_links,
        search_intents,
        information_gaps,
    }
}

/// Print the report as indented JSON on stdout.
pub fn print_json(report: &AnalysisReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Print the report as human-readable tables on stdout.
pub fn print_human(report: &AnalysisReport) {
    println!("Analysis");
    println!("========");
    println!();

    println!("  Entities:   {}", report.entities.len());
    println!("  N-grams:    {}", report.ngrams.len());
    println!("  Skip-grams: {}", report.skip_grams.len());
    println!("  Links:      {}", report.entity_links.len());
    println!("  Gaps:       {}", gap_count(&report.information_gaps));

    if !report.entities.is_empty() {
        println!();
        println!("  Entities:");
        println!("  {:<28} {:<12} {:>6}  {}", "TEXT", "LABEL", "CONF", "SPAN");
        println!("  {}", "-".repeat(64));
        for e in &report.entities {
            println!(
                "  {:<28} {:<12} {:>6.2}  {}..{}",
                truncate(&e.text, 28),
                e.label.as_str(),
                e.confidence,
                e.start,
                e.end
            );
        }
    }

    if !report.entity_links.is_empty() {
        println!();
        println!("  Proposed links:");
        for link in &report.entity_links {
            println!(
                "  [{:.2}] {} -> {}",
                link.relevance, link.anchor_text, link.target_url
            );
        }
    }

    if !report.search_intents.is_empty() {
        println!();
        println!("  Search intents:");
        for si in &report.search_intents {
            println!("  {} ({})", si.query, si.intent.as_str());
            for q in &si.questions {
                println!("    - {}", q);
            }
        }
    }

    let flagged: Vec<&InformationGap> = report
        .information_gaps
        .iter()
        .filter(|g| !g.missing_information.is_empty())
        .collect();
    if !flagged.is_empty() {
        println!();
        println!("  Information gaps:");
        for gap in flagged {
            println!(
                "  {} ({:?}): missing {}",
                gap.topic,
                gap.priority,
                gap.missing_information.join(", ")
            );
        }
    }

    println!();
}

fn gap_count(gaps: &[InformationGap]) -> usize {
    gaps.iter().map(|g| g.missing_information.len()).sum()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_analyze_collects_all_artifacts() {
        let mut engine = SemanticEngine::new().unwrap();
        let config = Config::minimal();
        let report = analyze_text(
            &mut engine,
            &config,
            "Emergency AC Repair in Riyadh with warranty and upfront cost",
        );
        assert!(!report.entities.is_empty());
        assert!(!report.ngrams.is_empty());
        assert!(!report.entity_links.is_empty());
        assert_eq!(report.entities.len(), report.search_intents.len());
        assert_eq!(report.entities.len(), report.information_gaps.len());
    }

    #[test]
    fn test_analyze_empty_text() {
        let mut engine = SemanticEngine::new().unwrap();
        let config = Config::minimal();
        let report = analyze_text(&mut engine, &config, "");
        assert!(report.entities.is_empty());
        assert!(report.ngrams.is_empty());
        assert!(report.search_intents.is_empty());
    }

    #[test]
    fn test_report_serializes() {
        let mut engine = SemanticEngine::new().unwrap();
        let config = Config::minimal();
        let report = analyze_text(&mut engine, &config, "plumbing in Jeddah");
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"SERVICE\""));
        assert!(json.contains("\"LOCATION\""));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 28), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
    }
}
