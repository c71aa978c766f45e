//! Internal-link proposals for recognized entities.
//!
//! Pure string transform: no check that a target URL exists. Relevance is
//! `0.5 + 0.3 (service/location) + confidence * 0.2`, capped at 1.0, and a
//! link is emitted only when relevance clears 0.3.

use crate::models::{EntityLabel, EntityLink, NamedEntity};
use crate::rules::{fill_template, LabelRuleSet, LinkTarget};
use crate::text;

/// Minimum relevance for a link to be proposed.
pub const RELEVANCE_FLOOR: f64 = 0.3;

/// Propose one internal link per sufficiently relevant entity.
/// `base_url` is prepended to every target path (no trailing slash).
pub fn link_entities(
    rules: &LabelRuleSet,
    entities: &[NamedEntity],
    base_url: &str,
) -> Vec<EntityLink> {
    let base = base_url.trim_end_matches('/');
    entities
        .iter()
        .filter_map(|entity| {
            let relevance = relevance_for(entity);
            if relevance <= RELEVANCE_FLOOR {
                return None;
            }
            let rule = rules.rule(entity.label)?;
            let anchor = rule
                .anchor_variants
                .first()
                .map(|v| fill_template(v, &entity.text))
                .unwrap_or_else(|| entity.text.clone());
            Some(EntityLink {
                entity: entity.text.clone(),
                target_url: target_url(base, rule.link_target, &entity.text),
                anchor_text: anchor,
                relevance,
                context: entity.context.clone(),
            })
        })
        .collect()
}

/// Relevance heuristic combining label and confidence.
pub fn relevance_for(entity: &NamedEntity) -> f64 {
    let label_bonus = match entity.label {
        EntityLabel::Service | EntityLabel::Location => 0.3,
        _ => 0.0,
    };
    (0.5 + label_bonus + entity.confidence * 0.2).min(1.0)
}

fn target_url(base: &str, target: LinkTarget, entity_text: &str) -> String {
    match target {
        LinkTarget::ServicePage => format!("{}/services/{}", base, text::slugify(entity_text)),
        LinkTarget::LocationPage => format!("{}/locations/{}", base, text::slugify(entity_text)),
        LinkTarget::AboutPage => format!("{}/about", base),
        LinkTarget::TeamPage => format!("{}/team", base),
        LinkTarget::SearchQuery => {
            format!("{}/search?q={}", base, text::encode_query_value(entity_text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::LabelRuleSet;

    fn entity(text: &str, label: EntityLabel, confidence: f64) -> NamedEntity {
        NamedEntity {
            text: text.to_string(),
            label,
            start: 0,
            end: text.len(),
            confidence,
            context: String::new(),
        }
    }

    #[test]
    fn test_relevance_formula() {
        // PERSON at confidence 0.5: 0.5 + 0 + 0.1 = 0.6
        let person = entity("Eng. Fahad", EntityLabel::Person, 0.5);
        assert!((relevance_for(&person) - 0.6).abs() < 1e-9);

        // SERVICE at confidence 1.0: 0.5 + 0.3 + 0.2 = 1.0 (cap holds)
        let service = entity("ac repair", EntityLabel::Service, 1.0);
        assert!((relevance_for(&service) - 1.0).abs() < 1e-9);

        // Boundary: confidence 0 still clears the floor for any label.
        let weak = entity("villa", EntityLabel::Fac, 0.0);
        assert!(relevance_for(&weak) > RELEVANCE_FLOOR);
    }

    #[test]
    fn test_links_above_floor_only() {
        let rules = LabelRuleSet::compile().unwrap();
        let entities = vec![
            entity("plumbing", EntityLabel::Service, 0.0),
            entity("Riyadh", EntityLabel::Location, 1.0),
        ];
        let links = link_entities(&rules, &entities, "https://example.sa/");
        assert_eq!(links.len(), 2);
        for link in &links {
            assert!(link.relevance > RELEVANCE_FLOOR);
        }
    }

    #[test]
    fn test_url_templates() {
        let rules = LabelRuleSet::compile().unwrap();
        let entities = vec![
            entity("AC Repair", EntityLabel::Service, 0.8),
            entity("Riyadh", EntityLabel::Location, 0.8),
            entity("Alfa Contracting Company", EntityLabel::Org, 0.8),
            entity("Eng. Fahad", EntityLabel::Person, 0.8),
            entity("split ac", EntityLabel::Product, 0.8),
        ];
        let links = link_entities(&rules, &entities, "https://example.sa");
        let urls: Vec<&str> = links.iter().map(|l| l.target_url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.sa/services/ac-repair",
                "https://example.sa/locations/riyadh",
                "https://example.sa/about",
                "https://example.sa/team",
                "https://example.sa/search?q=split%20ac",
            ]
        );
    }

    #[test]
    fn test_anchor_uses_first_variant() {
        let rules = LabelRuleSet::compile().unwrap();
        let links = link_entities(
            &rules,
            &[entity("deep cleaning", EntityLabel::Service, 0.9)],
            "https://example.sa",
        );
        assert_eq!(links[0].anchor_text, "professional deep cleaning services");
    }
}
