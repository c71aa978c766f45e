//! Search-intent classification.
//!
//! Per entity, the label rule's question templates are instantiated and the
//! resulting questions are scanned for intent keywords. Because the
//! questions come from the same label that is being classified, the intent
//! is effectively deterministic per label; the keyword scan exists so that
//! caller-supplied question sets (if any are ever added) classify the same
//! way.

use crate::models::{IntentKind, NamedEntity, SearchIntent};
use crate::rules::{fill_template, LabelRuleSet};

/// Build one [`SearchIntent`] per entity from its label's question set.
pub fn generate_search_intents(rules: &LabelRuleSet, entities: &[NamedEntity]) -> Vec<SearchIntent> {
    entities
        .iter()
        .filter_map(|entity| {
            let rule = rules.rule(entity.label)?;
            let questions: Vec<String> = rule
                .question_templates
                .iter()
                .map(|t| fill_template(t, &entity.text))
                .collect();
            Some(SearchIntent {
                query: entity.text.clone(),
                intent: classify_questions(&questions),
                entities: vec![entity.text.clone()],
                questions,
                context: entity.context.clone(),
            })
        })
        .collect()
}

/// Keyword classification over a question set. Checks run in fixed order;
/// the first matching bucket wins, and the fallback is informational.
pub fn classify_questions(questions: &[String]) -> IntentKind {
    let joined = questions.join(" ").to_lowercase();
    if joined.contains("how to") || joined.contains("what is") {
        IntentKind::Informational
    } else if joined.contains("where") {
        IntentKind::Navigational
    } else if joined.contains("choose") || joined.contains("benefits") {
        IntentKind::Commercial
    } else if joined.contains("contact") {
        IntentKind::Transactional
    } else {
        IntentKind::Informational
    }
}
