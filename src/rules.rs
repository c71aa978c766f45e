//! Declarative per-label rule table.
//!
//! The recognizer, linker, intent classifier, and gap detector all consume
//! this one table instead of carrying their own per-label switches. Each
//! [`LabelRule`] bundles the recognition pattern, link target, anchor
//! variants, fact template, gap markers, and question templates for one
//! entity label. [`LabelRuleSet::compile`] builds the case-insensitive
//! regexes once; rule order is fixed and significant (earlier rules match
//! first, and overlapping matches from different rules are all kept).
//!
//! Patterns cover both the English and the Arabic vocabulary of the
//! marketplace: the site is Arabic-first, and service/city terms appear in
//! either script in page copy.

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

use crate::models::EntityLabel;

/// Where a recognized entity's internal link points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// `/services/<slug>`
    ServicePage,
    /// `/locations/<slug>`
    LocationPage,
    /// `/about`
    AboutPage,
    /// `/team`
    TeamPage,
    /// `/search?q=<encoded text>`
    SearchQuery,
}

/// One expected content section for a label. The section counts as present
/// when any of `any_of` appears in the lowercased page content.
#[derive(Debug, Clone, Copy)]
pub struct GapMarker {
    /// Stable name used in `missing_information` entries.
    pub name: &'static str,
    pub any_of: &'static [&'static str],
    /// Canned suggestion emitted when this section is missing.
    pub suggestion: &'static str,
}

/// Full rule set for one entity label.
#[derive(Debug, Clone, Copy)]
pub struct LabelRule {
    pub label: EntityLabel,
    /// Case-insensitive recognition pattern.
    pub pattern: &'static str,
    pub link_target: LinkTarget,
    /// Anchor-text variants; the linker uses the first.
    pub anchor_variants: &'static [&'static str],
    /// Fact-section template; `{name}` is substituted.
    pub fact_template: &'static str,
    pub gap_markers: &'static [GapMarker],
    /// Gap-marker names that force [`GapPriority::High`] when missing.
    ///
    /// [`GapPriority::High`]: crate::models::GapPriority::High
    pub high_priority_markers: &'static [&'static str],
    /// Question templates; `{name}` is substituted.
    pub question_templates: &'static [&'static str],
}

const SERVICE_GAP_MARKERS: &[GapMarker] = &[
    GapMarker {
        name: "process",
        any_of: &["how", "process", "خطوات"],
        suggestion: "Add a step-by-step section explaining how the service is performed.",
    },
    GapMarker {
        name: "benefits",
        any_of: &["benefit", "مميزات"],
        suggestion: "Add a benefits section covering what customers gain from the service.",
    },
    GapMarker {
        name: "cost",
        any_of: &["cost", "price", "سعر"],
        suggestion: "Add a pricing section with typical cost ranges and what affects them.",
    },
    GapMarker {
        name: "warranty",
        any_of: &["warranty", "guarantee", "ضمان"],
        suggestion: "Add a warranty section describing the guarantee on parts and labor.",
    },
];

const LOCATION_GAP_MARKERS: &[GapMarker] = &[
    GapMarker {
        name: "address",
        any_of: &["address", "عنوان"],
        suggestion: "Add address and coverage-area details for this location.",
    },
    GapMarker {
        name: "services",
        any_of: &["service", "خدمة"],
        suggestion: "Add a list of services available in this location.",
    },
    GapMarker {
        name: "contact",
        any_of: &["contact", "phone", "اتصل"],
        suggestion: "Add contact details and response times for this location.",
    },
];

const ORG_GAP_MARKERS: &[GapMarker] = &[
    GapMarker {
        name: "about",
        any_of: &["about", "founded", "من نحن"],
        suggestion: "Add an about section with company background and licensing.",
    },
    GapMarker {
        name: "contact",
        any_of: &["contact", "اتصل"],
        suggestion: "Add contact channels and business hours.",
    },
];

const PRODUCT_GAP_MARKERS: &[GapMarker] = &[
    GapMarker {
        name: "specifications",
        any_of: &["specification", "capacity", "مواصفات"],
        suggestion: "Add a specifications section with capacities and supported models.",
    },
    GapMarker {
        name: "cost",
        any_of: &["cost", "price", "سعر"],
        suggestion: "Add typical price ranges for supply and installation.",
    },
];

const GENERIC_GAP_MARKERS: &[GapMarker] = &[GapMarker {
    name: "overview",
    any_of: &["what", "overview", "نبذة"],
    suggestion: "Add an overview paragraph introducing this topic.",
}];

/// The rule table, in match order.
pub const LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        label: EntityLabel::Service,
        pattern: r"\b(?:ac repair|air conditioning|hvac|plumbing|electrical work|electrical repair|house cleaning|deep cleaning|pest control|painting|carpentry|appliance repair|water leak detection|general maintenance)\b|تكييف|سباكة|تنظيف|مكافحة حشرات|صيانة|دهان|نجارة|كهرباء",
        link_target: LinkTarget::ServicePage,
        anchor_variants: &[
            "professional {text} services",
            "{text} specialists",
            "book {text} today",
        ],
        fact_template: "{name} is delivered by licensed technicians across the Kingdom, \
                        with upfront pricing and a workmanship guarantee on every visit.",
        gap_markers: SERVICE_GAP_MARKERS,
        high_priority_markers: &["cost", "process"],
        question_templates: &[
            "What is {name}?",
            "How to book {name} in Saudi Arabia?",
            "What does {name} cost?",
            "What are the benefits of {name}?",
        ],
    },
    LabelRule {
        label: EntityLabel::Location,
        pattern: r"\b(?:riyadh|jeddah|dammam|makkah|mecca|madinah|medina|khobar|dhahran|taif|abha|tabuk|buraidah|jubail)\b|الرياض|جدة|الدمام|مكة|المدينة|الخبر|الظهران|الطائف|أبها|تبوك",
        link_target: LinkTarget::LocationPage,
        anchor_variants: &[
            "home services in {text}",
            "{text} service coverage",
            "technicians near {text}",
        ],
        fact_template: "Teams in {name} arrive within the booked window and cover all \
                        districts of the city, seven days a week.",
        gap_markers: LOCATION_GAP_MARKERS,
        high_priority_markers: &["contact"],
        question_templates: &[
            "Where in {name} is the service available?",
            "Where do technicians in {name} operate?",
            "Which districts of {name} are covered?",
        ],
    },
    LabelRule {
        label: EntityLabel::Gpe,
        pattern: r"\b(?:saudi arabia|ksa|the kingdom|eastern province|gcc)\b|السعودية|المملكة|المنطقة الشرقية",
        link_target: LinkTarget::LocationPage,
        anchor_variants: &["services across {text}", "nationwide coverage in {text}"],
        fact_template: "Operations in {name} follow the national contractor licensing \
                        and consumer-protection regulations.",
        gap_markers: LOCATION_GAP_MARKERS,
        high_priority_markers: &["contact"],
        question_templates: &[
            "Where in {name} is the service available?",
            "Where are the main service hubs in {name}?",
            "Which cities in {name} are covered?",
        ],
    },
    LabelRule {
        label: EntityLabel::Org,
        pattern: r"\b[a-z][a-z&' ]{2,40}(?:company|corporation|establishment|contracting|est\.|llc|ltd)\b|شركة \S+",
        link_target: LinkTarget::AboutPage,
        anchor_variants: &["about {text}", "{text} profile"],
        fact_template: "{name} is a registered provider vetted for commercial licensing \
                        and insurance before joining the platform.",
        gap_markers: ORG_GAP_MARKERS,
        high_priority_markers: &["contact"],
        question_templates: &[
            "How can you contact {name}?",
            "Is {name} a licensed provider?",
            "Does {name} serve residential customers?",
        ],
    },
    LabelRule {
        label: EntityLabel::Person,
        pattern: r"\b(?:eng\.|engineer|technician|mr\.|supervisor)\s+[a-z][a-z]+\b|المهندس \S+|الفني \S+",
        link_target: LinkTarget::TeamPage,
        anchor_variants: &["meet {text}", "{text}'s profile"],
        fact_template: "{name} is background-checked and certified for the trades listed \
                        on their profile.",
        gap_markers: GENERIC_GAP_MARKERS,
        high_priority_markers: &[],
        question_templates: &[
            "How can you contact {name}?",
            "Which services does {name} handle?",
            "Is {name} available for urgent visits?",
        ],
    },
    LabelRule {
        label: EntityLabel::Product,
        pattern: r"\b(?:split ac|central ac|window ac|water heater|washing machine|dishwasher|refrigerator|generator|water pump|ceiling fan)\b|مكيف سبليت|سخان مياه|غسالة|ثلاجة|مولد كهربائي",
        link_target: LinkTarget::SearchQuery,
        anchor_variants: &["{text} installation and repair", "{text} support"],
        fact_template: "Replacement parts for {name} are sourced from authorized \
                        distributors and covered by the service warranty.",
        gap_markers: PRODUCT_GAP_MARKERS,
        high_priority_markers: &["cost"],
        question_templates: &[
            "Which {name} should you choose?",
            "What are the benefits of a new {name}?",
            "Is repairing a {name} worth the price?",
        ],
    },
    LabelRule {
        label: EntityLabel::Technology,
        pattern: r"\b(?:inverter|freon|r-410a|thermostat|smart home|solar panel|leak sensor|uv sterilization)\b|الطاقة الشمسية|منزل ذكي|ثرموستات",
        link_target: LinkTarget::SearchQuery,
        anchor_variants: &["{text} explained", "learn about {text}"],
        fact_template: "{name} is supported by technicians trained on \
                        manufacturer-current tooling and diagnostics.",
        gap_markers: GENERIC_GAP_MARKERS,
        high_priority_markers: &[],
        question_templates: &[
            "What is {name}?",
            "How to tell if {name} fits your home?",
            "What does {name} add to a maintenance plan?",
        ],
    },
    LabelRule {
        label: EntityLabel::Event,
        pattern: r"\b(?:summer season|winter season|ramadan|eid|hajj season|back to school)\b|رمضان|العيد|موسم الحج|موسم الصيف",
        link_target: LinkTarget::SearchQuery,
        anchor_variants: &["{text} offers", "prepare for {text}"],
        fact_template: "Demand peaks around {name}; booking ahead secures preferred \
                        time slots and seasonal rates.",
        gap_markers: GENERIC_GAP_MARKERS,
        high_priority_markers: &[],
        question_templates: &[
            "What is the best service plan for {name}?",
            "How to prepare your home for {name}?",
            "What offers run during {name}?",
        ],
    },
    LabelRule {
        label: EntityLabel::Fac,
        pattern: r"\b(?:villa|apartment|compound|duplex|warehouse|showroom|office building|rest house)\b|فيلا|شقة|مجمع سكني|مستودع|استراحة",
        link_target: LinkTarget::SearchQuery,
        anchor_variants: &["services for your {text}", "{text} maintenance"],
        fact_template: "Service plans for a {name} are scoped to the property size \
                        before the visit, so quotes hold.",
        gap_markers: GENERIC_GAP_MARKERS,
        high_priority_markers: &[],
        question_templates: &[
            "What is included in a {name} maintenance plan?",
            "How to schedule recurring visits for a {name}?",
            "What does a {name} inspection cover?",
        ],
    },
];

/// A [`LabelRule`] with its compiled pattern.
pub struct CompiledRule {
    pub rule: &'static LabelRule,
    pub regex: Regex,
}

/// The compiled rule table. Build once per engine.
pub struct LabelRuleSet {
    rules: Vec<CompiledRule>,
}

impl LabelRuleSet {
    /// Compile every rule's pattern (case-insensitive).
    pub fn compile() -> Result<Self> {
        let mut rules = Vec::with_capacity(LABEL_RULES.len());
        for rule in LABEL_RULES {
            let regex = RegexBuilder::new(rule.pattern)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("invalid pattern for label {}", rule.label))?;
            rules.push(CompiledRule { rule, regex });
        }
        Ok(Self { rules })
    }

    /// Rules in match order.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }

    /// Rule for a label, if the table defines one.
    pub fn rule(&self, label: EntityLabel) -> Option<&'static LabelRule> {
        self.rules
            .iter()
            .find(|c| c.rule.label == label)
            .map(|c| c.rule)
    }
}

/// Substitute `{name}` / `{text}` in a rule template.
pub fn fill_template(template: &str, value: &str) -> String {
    template.replace("{name}", value).replace("{text}", value)
}
