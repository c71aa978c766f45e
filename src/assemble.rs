//! Content assembly.
//!
//! The assembler drives the whole pipeline in one synchronous pass:
//! recognize entities in the topic, fold in the caller-supplied domain
//! entities, extract word groups, classify intents, detect gaps, score
//! coverage, then concatenate the HTML body section by section —
//! introduction, per-entity facts, contextual domains, entity connections,
//! and Q&A. Absent inputs produce shorter output, never errors.

use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use crate::config::{Config, GenerationConfig, SentenceLength};
use crate::coverage;
use crate::gaps;
use crate::intent;
use crate::link;
use crate::models::{
    FactSource, HistoricalData, NamedEntity, SemanticContent, SemanticEntity,
};
use crate::ngram;
use crate::recognize::SemanticEngine;
use crate::rules::fill_template;
use crate::text;

/// Fixed contextual domains; one paragraph is generated per entry.
const CONTEXTUAL_DOMAINS: &[(&str, &str)] = &[
    (
        "technical",
        "On the technical side, {topic} is handled with calibrated diagnostic \
         equipment and parts matched to the installed system, so repairs hold \
         up through the Saudi summer.",
    ),
    (
        "commercial",
        "Commercially, {topic} is booked with a fixed quote before work \
         starts; there are no callout surprises and invoices are itemized.",
    ),
    (
        "geographical",
        "Coverage for {topic} spans the major cities and their surrounding \
         districts, with local teams dispatched from the nearest hub.",
    ),
    (
        "procedural",
        "The procedure for {topic} starts with an inspection visit, followed \
         by a written scope, the work itself, and a final walkthrough.",
    ),
    (
        "comparative",
        "Compared with unlicensed alternatives, {topic} through the platform \
         includes vetted technicians, a workmanship guarantee, and recourse \
         if anything goes wrong.",
    ),
];

/// Words-in-common threshold for two contexts to count as related.
const CONNECTION_SHARED_WORDS: usize = 2;
/// Minimum word length counted toward the connection threshold.
const CONNECTION_MIN_WORD_LEN: usize = 3;

/// Run the full synthesis pipeline for `topic` and assemble the HTML body.
pub fn generate_semantic_content(
    engine: &mut SemanticEngine,
    config: &Config,
    topic: &str,
    target_entities: &[SemanticEntity],
) -> SemanticContent {
    let gen = &config.generation;

    // 1. Entities: recognized in the topic text, then the caller-supplied
    //    domain entities converted to the same shape.
    let mut entities = engine.recognize_entities(topic);
    entities.extend(target_entities.iter().map(convert_target_entity));

    // 2. Word groups over the topic, annotated with recognized entities.
    let mut ngrams = ngram::generate_ngrams(topic, gen.ngram_size);
    ngram::annotate_with_entities(&mut ngrams, &entities);
    let skip_grams = ngram::generate_skip_grams(topic, gen.skip_distance);

    // 3. Intents, links, coverage.
    let search_intents = intent::generate_search_intents(engine.rules(), &entities);
    let entity_links = link::link_entities(engine.rules(), &entities, &config.site.base_url);
    let topical_coverage = coverage::score_topical_coverage(topic, target_entities);
    let historical_data = HistoricalData::default();

    // 4. HTML body.
    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>\n", text::html_escape(topic)));
    push_paragraph(&mut body, gen, &introduction(topic, &entities));

    for entity in &entities {
        if let Some(rule) = engine.rules().rule(entity.label) {
            body.push_str(&format!(
                "<h2>{}</h2>\n",
                text::html_escape(&entity.text)
            ));
            push_paragraph(
                &mut body,
                gen,
                &fill_template(rule.fact_template, &entity.text),
            );
        }
    }

    body.push_str("<h2>Service context</h2>\n");
    for (domain, template) in CONTEXTUAL_DOMAINS {
        body.push_str(&format!("<h3>{}</h3>\n", domain));
        push_paragraph(&mut body, gen, &fill_template_topic(template, topic));
    }

    let connections = entity_connections(&entities);
    if !connections.is_empty() {
        body.push_str("<h2>Related topics</h2>\n<ul>\n");
        for (a, b) in &connections {
            body.push_str(&format!(
                "<li>{} relates to {}</li>\n",
                text::html_escape(a),
                text::html_escape(b)
            ));
        }
        body.push_str("</ul>\n");
    }

    if !search_intents.is_empty() {
        body.push_str("<h2>Questions and answers</h2>\n");
        for si in &search_intents {
            for question in &si.questions {
                body.push_str(&format!("<h3>{}</h3>\n", text::html_escape(question)));
                push_paragraph(&mut body, gen, &answer_for(question, &si.query));
            }
        }
    }

    // 5. Gap detection runs against the assembled body so the report
    //    reflects what the page actually says.
    let information_gaps = gaps::identify_information_gaps(engine.rules(), &body, &entities);

    let title = format!("{} | {}", topic, config.site.brand_name);
    let meta_description = meta_description(topic, &entities);

    SemanticContent {
        id: Uuid::new_v4().to_string(),
        title,
        meta_description,
        content: body,
        entities,
        ngrams,
        skip_grams,
        entity_links,
        search_intents,
        information_gaps,
        topical_coverage,
        historical_data,
        fact_sources: fact_sources(),
        generated_at: Utc::now(),
    }
}

fn fill_template_topic(template: &str, topic: &str) -> String {
    template.replace("{topic}", topic)
}

/// Convert a caller-supplied domain entity to the recognized-entity shape.
fn convert_target_entity(entity: &SemanticEntity) -> NamedEntity {
    NamedEntity {
        text: entity.name.clone(),
        label: entity.kind,
        start: 0,
        end: entity.name.len(),
        confidence: 0.9,
        context: entity.context_qualifiers.join(" "),
    }
}

fn push_paragraph(body: &mut String, gen: &GenerationConfig, paragraph: &str) {
    let shaped = match gen.sentence_length {
        SentenceLength::Short => text::shorten_sentences(paragraph, gen.max_sentence_words),
        SentenceLength::Standard => paragraph.to_string(),
    };
    body.push_str(&format!("<p>{}</p>\n", text::html_escape(&shaped)));
}

fn introduction(topic: &str, entities: &[NamedEntity]) -> String {
    let mut names: Vec<&str> = entities.iter().map(|e| e.text.as_str()).collect();
    names.dedup();
    let mention = match names.len() {
        0 => String::new(),
        1 => format!(" It covers {}.", names[0]),
        _ => format!(" It covers {} and {}.", names[..names.len() - 1].join(", "), names[names.len() - 1]),
    };
    format!(
        "This guide explains {} for homes and businesses in Saudi Arabia: \
         what the work involves, what it costs, and how to book a visit.{}",
        topic, mention
    )
}

fn meta_description(topic: &str, entities: &[NamedEntity]) -> String {
    let description = introduction(topic, entities);
    let mut out: String = description.chars().take(157).collect();
    if out.len() < description.len() {
        out.push_str("...");
    }
    out
}

/// Pairs of entities whose contexts overlap in more than
/// [`CONNECTION_SHARED_WORDS`] distinct words longer than
/// [`CONNECTION_MIN_WORD_LEN`] characters.
fn entity_connections(entities: &[NamedEntity]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    for (i, a) in entities.iter().enumerate() {
        for b in entities.iter().skip(i + 1) {
            if a.text.eq_ignore_ascii_case(&b.text) {
                continue;
            }
            if contexts_related(&a.context, &b.context) {
                let key = (a.text.to_lowercase(), b.text.to_lowercase());
                if seen.insert(key) {
                    pairs.push((a.text.clone(), b.text.clone()));
                }
            }
        }
    }
    pairs
}

fn contexts_related(a: &str, b: &str) -> bool {
    let words_a: HashSet<String> = a
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() > CONNECTION_MIN_WORD_LEN)
        .map(str::to_string)
        .collect();
    let b_lower = b.to_lowercase();
    let shared: HashSet<&str> = b_lower
        .split_whitespace()
        .filter(|w| w.chars().count() > CONNECTION_MIN_WORD_LEN)
        .filter(|w| words_a.contains(*w))
        .collect::<Vec<&str>>()
        .into_iter()
        .collect();
    shared.len() > CONNECTION_SHARED_WORDS
}

/// Canned answer keyed on question substring. Every question gets some
/// answer; the generic fallback closes the set.
fn answer_for(question: &str, subject: &str) -> String {
    let q = question.to_lowercase();
    if q.contains("cost") || q.contains("price") {
        format!(
            "Pricing for {} depends on the scope of work; a fixed quote is \
             issued after the inspection visit and before any work begins.",
            subject
        )
    } else if q.contains("how to book") || q.contains("how to schedule") {
        format!(
            "Booking {} takes a few minutes: pick a time slot, confirm the \
             address, and a technician is assigned to the visit.",
            subject
        )
    } else if q.contains("where") || q.contains("which districts") || q.contains("which cities") {
        format!(
            "{} is available across the covered cities, with local teams \
             assigned by district for faster arrival.",
            subject
        )
    } else if q.contains("benefit") {
        format!(
            "The main benefits of {} are licensed workmanship, upfront \
             pricing, and a service guarantee on the completed job.",
            subject
        )
    } else if q.contains("contact") {
        format!(
            "You can reach the {} team through the booking page or the \
             support line listed on every service page.",
            subject
        )
    } else if q.contains("what is") {
        format!(
            "{} is one of the core home services on the platform, performed \
             by vetted professionals to the published standard.",
            subject
        )
    } else {
        format!(
            "For {}, the service team follows the published scope and \
             confirms the details during the inspection visit.",
            subject
        )
    }
}

/// Attribution entries for the fact sections. Static editorial list.
fn fact_sources() -> Vec<FactSource> {
    vec![
        FactSource {
            name: "Saudi Standards, Metrology and Quality Organization".to_string(),
            url: "https://www.saso.gov.sa".to_string(),
            reliability: 0.95,
        },
        FactSource {
            name: "Ministry of Municipal and Rural Affairs and Housing".to_string(),
            url: "https://momah.gov.sa".to_string(),
            reliability: 0.9,
        },
        FactSource {
            name: "Platform service desk records".to_string(),
            url: "https://example.sa/about".to_string(),
            reliability: 0.75,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::EntityLabel;

    fn target(name: &str, kind: EntityLabel) -> SemanticEntity {
        SemanticEntity {
            id: text::slugify(name),
            name: name.to_string(),
            kind,
            attributes: Default::default(),
            relationships: Vec::new(),
            context_qualifiers: vec!["home services saudi arabia".to_string()],
            ngrams: Vec::new(),
            skip_grams: Vec::new(),
        }
    }

    #[test]
    fn test_generates_all_sections() {
        let mut engine = SemanticEngine::new().unwrap();
        let config = Config::minimal();
        let content = generate_semantic_content(
            &mut engine,
            &config,
            "AC Repair in Riyadh",
            &[target("AC Repair", EntityLabel::Service)],
        );

        assert!(content.content.contains("<h1>AC Repair in Riyadh</h1>"));
        assert!(content.content.contains("<h3>technical</h3>"));
        assert!(content.content.contains("<h3>comparative</h3>"));
        assert!(content.content.contains("Questions and answers"));
        assert!(content.title.contains("AC Repair in Riyadh"));
        assert!(!content.meta_description.is_empty());
        assert!(!content.search_intents.is_empty());
        assert!(!content.entity_links.is_empty());
    }

    #[test]
    fn test_empty_inputs_still_produce_content() {
        let mut engine = SemanticEngine::new().unwrap();
        let config = Config::minimal();
        let content = generate_semantic_content(&mut engine, &config, "", &[]);
        assert!(content.content.contains("<h1>"));
        assert!(content.entities.is_empty());
        assert!(content.search_intents.is_empty());
        assert_eq!(content.topical_coverage.coverage_score, 0.0);
    }

    #[test]
    fn test_short_sentence_optimization() {
        let mut engine = SemanticEngine::new().unwrap();
        let mut config = Config::minimal();
        config.generation.sentence_length = SentenceLength::Short;
        let content = generate_semantic_content(
            &mut engine,
            &config,
            "deep cleaning in Jeddah",
            &[],
        );

        // Every <p> sentence respects the word cap.
        for paragraph in content
            .content
            .split("<p>")
            .skip(1)
            .filter_map(|rest| rest.split("</p>").next())
        {
            for sentence in paragraph.split(['.', '!', '?']) {
                let word_count = sentence.split_whitespace().count();
                assert!(
                    word_count <= config.generation.max_sentence_words,
                    "sentence too long: {:?}",
                    sentence
                );
            }
        }
    }

    #[test]
    fn test_connected_entities_share_context() {
        let entities = vec![
            NamedEntity {
                text: "AC Repair".to_string(),
                label: EntityLabel::Service,
                start: 0,
                end: 9,
                confidence: 0.8,
                context: "emergency repair visits across riyadh districts".to_string(),
            },
            NamedEntity {
                text: "Riyadh".to_string(),
                label: EntityLabel::Location,
                start: 0,
                end: 6,
                confidence: 0.8,
                context: "emergency repair visits across riyadh districts".to_string(),
            },
            NamedEntity {
                text: "winter season".to_string(),
                label: EntityLabel::Event,
                start: 0,
                end: 13,
                confidence: 0.8,
                context: "unrelated words entirely different".to_string(),
            },
        ];
        let pairs = entity_connections(&entities);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "AC Repair");
        assert_eq!(pairs[0].1, "Riyadh");
    }

    #[test]
    fn test_answers_match_question_kinds() {
        assert!(answer_for("What does AC Repair cost?", "AC Repair").contains("quote"));
        assert!(answer_for("How to book plumbing in Saudi Arabia?", "plumbing").contains("time slot"));
        assert!(answer_for("Where in Riyadh is the service available?", "Riyadh").contains("cities"));
        assert!(answer_for("Anything else?", "x").contains("inspection"));
    }

    #[test]
    fn test_html_escapes_topic() {
        let mut engine = SemanticEngine::new().unwrap();
        let config = Config::minimal();
        let content =
            generate_semantic_content(&mut engine, &config, "<script>alert(1)</script>", &[]);
        assert!(!content.content.contains("<script>"));
        assert!(content.content.contains("&lt;script&gt;"));
    }
}
