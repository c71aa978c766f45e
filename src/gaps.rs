//! Information-gap detection.
//!
//! For each entity, the label rule's gap markers are checked against the
//! lowercased page content. A marker counts as present when any of its
//! keywords appears anywhere in the content; absent markers become
//! `missing_information` entries with one canned suggestion each.

use crate::models::{GapPriority, InformationGap, NamedEntity};
use crate::rules::LabelRuleSet;

/// Missing-marker count above which a gap is at least Medium priority.
const MEDIUM_PRIORITY_THRESHOLD: usize = 2;

/// One [`InformationGap`] per entity whose label rule defines markers.
/// Entities with nothing missing still get an entry (empty
/// `missing_information`, Low priority) so dashboards can show full
/// coverage explicitly.
pub fn identify_information_gaps(
    rules: &LabelRuleSet,
    content: &str,
    entities: &[NamedEntity],
) -> Vec<InformationGap> {
    let haystack = content.to_lowercase();
    entities
        .iter()
        .filter_map(|entity| {
            let rule = rules.rule(entity.label)?;

            let mut missing = Vec::new();
            let mut suggestions = Vec::new();
            for marker in rule.gap_markers {
                let present = marker
                    .any_of
                    .iter()
                    .any(|keyword| haystack.contains(&keyword.to_lowercase()));
                if !present {
                    missing.push(marker.name.to_string());
                    suggestions.push(marker.suggestion.to_string());
                }
            }

            let high = missing
                .iter()
                .any(|name| rule.high_priority_markers.contains(&name.as_str()));
            let priority = if high {
                GapPriority::High
            } else if missing.len() > MEDIUM_PRIORITY_THRESHOLD {
                GapPriority::Medium
            } else {
                GapPriority::Low
            };

            Some(InformationGap {
                topic: entity.text.clone(),
                missing_information: missing,
                priority,
                suggested_content: suggestions,
                entities: vec![entity.text.clone()],
            })
        })
        .collect()
}
