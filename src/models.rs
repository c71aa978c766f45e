//! Core data models used throughout the content engine.
//!
//! These types represent the entities, word groups, and analysis artifacts
//! that flow through the synthesis pipeline, plus the catalog records the
//! marketplace pages draw from. Everything derives `Serialize` so the
//! dashboard panels can consume analysis output as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category assigned to a recognized span of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Person,
    Org,
    Gpe,
    Event,
    Fac,
    Product,
    Service,
    Location,
    Technology,
}

impl EntityLabel {
    /// Wire form of the label (`"SERVICE"`, `"LOCATION"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Event => "EVENT",
            EntityLabel::Fac => "FAC",
            EntityLabel::Product => "PRODUCT",
            EntityLabel::Service => "SERVICE",
            EntityLabel::Location => "LOCATION",
            EntityLabel::Technology => "TECHNOLOGY",
        }
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A span of text tagged with a category. Created transiently per
/// recognition call; `start..end` indexes the source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedEntity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
    /// Heuristic match quality in [0, 1].
    pub confidence: f64,
    /// Surrounding words (up to 3 on each side).
    pub context: String,
}

/// A contiguous word group extracted from text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NGram {
    pub text: String,
    /// Window size (2 = bigram, 3 = trigram, ...).
    pub size: usize,
    /// Occurrences of this exact phrase within the same source text.
    /// Always >= 1 for a generated entry by construction.
    pub frequency: usize,
    pub context: String,
    /// Entity texts that appear inside this word group.
    pub entities: Vec<String>,
}

/// A gapped word pair: two words separated by exactly `skip` others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkipGram {
    pub text: String,
    pub skip: usize,
    pub frequency: usize,
    pub context: String,
    pub entities: Vec<String>,
}

/// A proposed internal hyperlink for a recognized entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityLink {
    pub entity: String,
    pub target_url: String,
    pub anchor_text: String,
    /// Heuristic score in (0.3, 1.0]; links at or below 0.3 are dropped.
    pub relevance: f64,
    pub context: String,
}

/// Coarse classification of why a user would issue a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentKind {
    Informational,
    Navigational,
    Transactional,
    Commercial,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Informational => "informational",
            IntentKind::Navigational => "navigational",
            IntentKind::Transactional => "transactional",
            IntentKind::Commercial => "commercial",
        }
    }
}

/// Question set and intent classification derived from one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchIntent {
    pub query: String,
    pub intent: IntentKind,
    pub entities: Vec<String>,
    pub questions: Vec<String>,
    pub context: String,
}

/// Priority of an information gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapPriority {
    High,
    Medium,
    Low,
}

/// Content sections missing for an entity, with canned suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InformationGap {
    pub topic: String,
    pub missing_information: Vec<String>,
    pub priority: GapPriority,
    pub suggested_content: Vec<String>,
    pub entities: Vec<String>,
}

/// A relationship edge on a caller-supplied domain entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRelationship {
    pub target: String,
    pub kind: String,
    /// Edge weight in [0, 1].
    pub strength: f64,
    pub context: String,
}

/// Caller-supplied domain object (a service or a city) with a small
/// relationship graph. Distinct from [`NamedEntity`], which is a tagged
/// text span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticEntity {
    pub id: String,
    pub name: String,
    pub kind: EntityLabel,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub relationships: Vec<EntityRelationship>,
    #[serde(default)]
    pub context_qualifiers: Vec<String>,
    #[serde(default)]
    pub ngrams: Vec<String>,
    #[serde(default)]
    pub skip_grams: Vec<String>,
}

/// Aggregate coverage score for a topic, recomputed from scratch each call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicalCoverage {
    pub topic_id: String,
    pub coverage_score: f64,
    pub entity_coverage: f64,
    pub depth_score: f64,
    pub breadth_score: f64,
}

/// Search-performance metrics. Caller-supplied or zeroed; nothing here is
/// persisted between calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoricalData {
    pub click_through_rate: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub average_position: f64,
    pub trend: f64,
}

/// Attribution entry for a fact section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactSource {
    pub name: String,
    pub url: String,
    pub reliability: f64,
}

/// Full output of the synthesis pipeline: the HTML body plus every
/// analysis artifact the dashboard panels render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticContent {
    pub id: String,
    pub title: String,
    pub meta_description: String,
    /// Raw HTML; interpolated free text is escaped during assembly.
    pub content: String,
    pub entities: Vec<NamedEntity>,
    pub ngrams: Vec<NGram>,
    pub skip_grams: Vec<SkipGram>,
    pub entity_links: Vec<EntityLink>,
    pub search_intents: Vec<SearchIntent>,
    pub information_gaps: Vec<InformationGap>,
    pub topical_coverage: TopicalCoverage,
    pub historical_data: HistoricalData,
    pub fact_sources: Vec<FactSource>,
    pub generated_at: DateTime<Utc>,
}

/// A marketplace service offering (bilingual).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub slug: String,
    pub name_en: String,
    pub name_ar: String,
    pub category: String,
}

/// A city served by the marketplace (bilingual).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub slug: String,
    pub name_en: String,
    pub name_ar: String,
    pub region: String,
}
