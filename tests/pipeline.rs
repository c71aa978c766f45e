//! End-to-end library properties of the synthesis pipeline.

use seo_engine::catalog::generate_service_content;
use seo_engine::config::Config;
use seo_engine::link::{relevance_for, RELEVANCE_FLOOR};
use seo_engine::models::{EntityLabel, NamedEntity};
use seo_engine::ngram::generate_ngrams;
use seo_engine::recognize::SemanticEngine;

#[test]
fn recognized_spans_match_source_text() {
    let mut engine = SemanticEngine::new().unwrap();
    let inputs = [
        "Book AC Repair in Riyadh before the summer season",
        "House cleaning and pest control across Saudi Arabia",
        "نحتاج سباكة وتنظيف عميق في جدة",
    ];
    for input in inputs {
        for entity in engine.recognize_entities(input) {
            let span = &input[entity.start..entity.end];
            assert_eq!(
                span.to_lowercase(),
                entity.text.to_lowercase(),
                "span {:?} != entity {:?} in {:?}",
                span,
                entity.text,
                input
            );
        }
    }
}

#[test]
fn ngram_count_formula_holds() {
    let cases = [
        ("", 2usize, 0usize),
        ("one", 2, 0),
        ("one two", 2, 1),
        ("one two three four five", 2, 4),
        ("one two three four five", 3, 3),
        ("one two three four five", 5, 1),
    ];
    for (input, n, expected) in cases {
        assert_eq!(
            generate_ngrams(input, n).len(),
            expected,
            "input {:?} n {}",
            input,
            n
        );
    }
}

#[test]
fn link_relevance_boundaries() {
    let entity = |label, confidence| NamedEntity {
        text: "x".to_string(),
        label,
        start: 0,
        end: 1,
        confidence,
        context: String::new(),
    };

    // PERSON at 0.5 => 0.6, included.
    assert!((relevance_for(&entity(EntityLabel::Person, 0.5)) - 0.6).abs() < 1e-9);
    // PERSON at confidence 0 => 0.5, still above the floor.
    assert!(relevance_for(&entity(EntityLabel::Person, 0.0)) > RELEVANCE_FLOOR);
    // PERSON at confidence 1 => 0.7.
    assert!((relevance_for(&entity(EntityLabel::Person, 1.0)) - 0.7).abs() < 1e-9);
    // SERVICE at confidence 1 caps at 1.0.
    assert!((relevance_for(&entity(EntityLabel::Service, 1.0)) - 1.0).abs() < 1e-9);
}

#[test]
fn ngrams_are_stateless_but_recognizer_cache_is_not() {
    let input = "deep cleaning offers in Dammam this winter season";

    // Extraction is pure: repeated calls agree exactly.
    assert_eq!(generate_ngrams(input, 2), generate_ngrams(input, 2));

    // The recognizer's term cache accumulates across calls on one engine —
    // by design, and observable through the explicit cache handle.
    let mut engine = SemanticEngine::new().unwrap();
    engine.recognize_entities("plumbing in Riyadh");
    let before = engine.cache().len();
    engine.recognize_entities("painting in Jeddah");
    assert!(engine.cache().len() > before);
    engine.clear_cache();
    assert_eq!(engine.cache().len(), 0);
}

#[test]
fn service_content_end_to_end() {
    let mut engine = SemanticEngine::new().unwrap();
    let config = Config::minimal();
    let content = generate_service_content(
        &mut engine,
        &config,
        "air-conditioning-hvac",
        "AC Repair",
        "Riyadh",
    );

    assert!(content.title.contains("AC Repair"));
    assert!(content.content.contains("<h1>"));
    assert!(content
        .entities
        .iter()
        .any(|e| e.label == EntityLabel::Service));
    assert!(content
        .entities
        .iter()
        .any(|e| e.label == EntityLabel::Location));

    // The analysis artifacts are populated alongside the HTML.
    assert!(!content.ngrams.is_empty());
    assert!(!content.search_intents.is_empty());
    assert!(!content.entity_links.is_empty());
    assert!(content.topical_coverage.coverage_score > 0.0);
    assert!(!content.fact_sources.is_empty());
}

#[test]
fn gaps_empty_when_all_markers_present() {
    use seo_engine::gaps::identify_information_gaps;
    use seo_engine::rules::LabelRuleSet;

    let rules = LabelRuleSet::compile().unwrap();
    let entity = NamedEntity {
        text: "Pest Control".to_string(),
        label: EntityLabel::Service,
        start: 0,
        end: 12,
        confidence: 0.8,
        context: String::new(),
    };
    let content = "How it works: our process, the benefits, the cost, and the warranty.";
    let gaps = identify_information_gaps(&rules, content, &[entity]);
    assert_eq!(gaps.len(), 1);
    assert!(gaps[0].missing_information.is_empty());
}
