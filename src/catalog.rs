//! Service and city catalog.
//!
//! The static data catalog the marketplace pages draw from: services and
//! cities with Arabic and English names. A built-in catalog covers the
//! launch lineup; `[catalog]` config entries extend it (or replace it when
//! `replace_builtin` is set). Also home of
//! [`generate_service_content`], the convenience entry point page callers
//! use for one service×city landing page.

use std::collections::BTreeMap;

use crate::assemble;
use crate::config::Config;
use crate::models::{City, EntityLabel, EntityRelationship, SemanticContent, SemanticEntity, Service};
use crate::recognize::SemanticEngine;
use crate::text;

/// Built-in launch services. Config entries extend this list.
pub fn builtin_services() -> Vec<Service> {
    [
        ("ac-repair", "AC Repair", "تصليح مكيفات", "air-conditioning-hvac"),
        ("ac-cleaning", "AC Cleaning", "تنظيف مكيفات", "air-conditioning-hvac"),
        ("plumbing", "Plumbing", "سباكة", "plumbing-water"),
        ("water-leak-detection", "Water Leak Detection", "كشف تسربات المياه", "plumbing-water"),
        ("electrical-repair", "Electrical Repair", "إصلاح كهرباء", "electrical"),
        ("house-cleaning", "House Cleaning", "تنظيف منازل", "cleaning"),
        ("deep-cleaning", "Deep Cleaning", "تنظيف عميق", "cleaning"),
        ("pest-control", "Pest Control", "مكافحة حشرات", "pest-control"),
        ("painting", "Painting", "دهانات", "finishing"),
        ("carpentry", "Carpentry", "نجارة", "finishing"),
        ("general-maintenance", "General Maintenance", "صيانة عامة", "maintenance"),
    ]
    .into_iter()
    .map(|(slug, en, ar, category)| Service {
        slug: slug.to_string(),
        name_en: en.to_string(),
        name_ar: ar.to_string(),
        category: category.to_string(),
    })
    .collect()
}

/// Built-in launch cities.
pub fn builtin_cities() -> Vec<City> {
    [
        ("riyadh", "Riyadh", "الرياض", "central"),
        ("jeddah", "Jeddah", "جدة", "western"),
        ("makkah", "Makkah", "مكة المكرمة", "western"),
        ("madinah", "Madinah", "المدينة المنورة", "western"),
        ("dammam", "Dammam", "الدمام", "eastern"),
        ("khobar", "Khobar", "الخبر", "eastern"),
        ("taif", "Taif", "الطائف", "western"),
        ("tabuk", "Tabuk", "تبوك", "northern"),
        ("abha", "Abha", "أبها", "southern"),
    ]
    .into_iter()
    .map(|(slug, en, ar, region)| City {
        slug: slug.to_string(),
        name_en: en.to_string(),
        name_ar: ar.to_string(),
        region: region.to_string(),
    })
    .collect()
}

/// The effective catalog after applying config entries.
pub struct Catalog {
    pub services: Vec<Service>,
    pub cities: Vec<City>,
}

impl Catalog {
    pub fn from_config(config: &Config) -> Self {
        let (mut services, mut cities) = if config.catalog.replace_builtin {
            (Vec::new(), Vec::new())
        } else {
            (builtin_services(), builtin_cities())
        };
        for service in &config.catalog.services {
            if !services.iter().any(|s| s.slug == service.slug) {
                services.push(service.clone());
            }
        }
        for city in &config.catalog.cities {
            if !cities.iter().any(|c| c.slug == city.slug) {
                cities.push(city.clone());
            }
        }
        Self { services, cities }
    }

    pub fn service(&self, slug: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.slug == slug)
    }

    pub fn city(&self, slug: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.slug == slug)
    }

    /// Total service×city page count.
    pub fn page_count(&self) -> usize {
        self.services.len() * self.cities.len()
    }
}

/// Build the [`SemanticEntity`] describing a catalog service.
pub fn service_entity(category: &str, service_name: &str, city_name: &str) -> SemanticEntity {
    let mut attributes = BTreeMap::new();
    attributes.insert("category".to_string(), category.to_string());
    attributes.insert("booking".to_string(), "same-day".to_string());
    attributes.insert("warranty".to_string(), "30-day workmanship".to_string());

    SemanticEntity {
        id: text::slugify(service_name),
        name: service_name.to_string(),
        kind: EntityLabel::Service,
        attributes,
        relationships: vec![
            EntityRelationship {
                target: city_name.to_string(),
                kind: "available-in".to_string(),
                strength: 0.9,
                context: format!("{} available in {}", service_name, city_name),
            },
            EntityRelationship {
                target: category.to_string(),
                kind: "belongs-to".to_string(),
                strength: 0.8,
                context: format!("{} is part of the {} category", service_name, category),
            },
        ],
        context_qualifiers: vec![
            format!("{} in {}", service_name, city_name),
            "licensed home services".to_string(),
        ],
        ngrams: vec![
            service_name.to_lowercase(),
            format!("{} {}", service_name.to_lowercase(), city_name.to_lowercase()),
        ],
        skip_grams: Vec::new(),
    }
}

/// Build the [`SemanticEntity`] describing a catalog city.
pub fn city_entity(city_name: &str, service_name: &str) -> SemanticEntity {
    let mut attributes = BTreeMap::new();
    attributes.insert("country".to_string(), "Saudi Arabia".to_string());

    SemanticEntity {
        id: text::slugify(city_name),
        name: city_name.to_string(),
        kind: EntityLabel::Location,
        attributes,
        relationships: vec![EntityRelationship {
            target: service_name.to_string(),
            kind: "offers".to_string(),
            strength: 0.9,
            context: format!("{} offers {}", city_name, service_name),
        }],
        context_qualifiers: vec![format!("home services in {}", city_name)],
        ngrams: vec![city_name.to_lowercase()],
        skip_grams: Vec::new(),
    }
}

/// Print the effective catalog: every service and city, with the source
/// of each entry (built-in or config).
pub fn list_catalog(config: &Config) {
    let catalog = Catalog::from_config(config);
    let builtin_service_slugs: Vec<String> =
        builtin_services().into_iter().map(|s| s.slug).collect();
    let builtin_city_slugs: Vec<String> = builtin_cities().into_iter().map(|c| c.slug).collect();

    println!("{:<24} {:<24} {:<20} SOURCE", "SERVICE", "ARABIC", "CATEGORY");
    for service in &catalog.services {
        let source = if builtin_service_slugs.contains(&service.slug) {
            "built-in"
        } else {
            "config"
        };
        println!(
            "{:<24} {:<24} {:<20} {}",
            service.slug, service.name_ar, service.category, source
        );
    }

    println!();
    println!("{:<24} {:<24} {:<20} SOURCE", "CITY", "ARABIC", "REGION");
    for city in &catalog.cities {
        let source = if builtin_city_slugs.contains(&city.slug) {
            "built-in"
        } else {
            "config"
        };
        println!(
            "{:<24} {:<24} {:<20} {}",
            city.slug, city.name_ar, city.region, source
        );
    }

    println!();
    println!(
        "{} services x {} cities = {} pages",
        catalog.services.len(),
        catalog.cities.len(),
        catalog.page_count()
    );
}

/// Generate the landing-page content for one service in one city.
///
/// `category` is the service's catalog category slug (e.g.
/// `"air-conditioning-hvac"`); `service_name` and `city_name` are display
/// names and may be either language.
pub fn generate_service_content(
    engine: &mut SemanticEngine,
    config: &Config,
    category: &str,
    service_name: &str,
    city_name: &str,
) -> SemanticContent {
    let topic = format!("{} in {}", service_name, city_name);
    let targets = vec![
        service_entity(category, service_name, city_name),
        city_entity(city_name, service_name),
    ];
    assemble::generate_semantic_content(engine, config, &topic, &targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityLabel;

    #[test]
    fn test_builtin_catalog_slugs_unique() {
        let services = builtin_services();
        let mut slugs: Vec<&str> = services.iter().map(|s| s.slug.as_str()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), services.len());
    }

    #[test]
    fn test_config_entries_extend_builtin() {
        let mut config = Config::minimal();
        config.catalog.services.push(Service {
            slug: "sofa-cleaning".to_string(),
            name_en: "Sofa Cleaning".to_string(),
            name_ar: "تنظيف كنب".to_string(),
            category: "cleaning".to_string(),
        });
        let catalog = Catalog::from_config(&config);
        assert!(catalog.service("sofa-cleaning").is_some());
        assert!(catalog.service("ac-repair").is_some());
    }

    #[test]
    fn test_replace_builtin() {
        let mut config = Config::minimal();
        config.catalog.replace_builtin = true;
        config.catalog.services.push(Service {
            slug: "only".to_string(),
            name_en: "Only".to_string(),
            name_ar: "فقط".to_string(),
            category: "misc".to_string(),
        });
        config.catalog.cities.push(City {
            slug: "riyadh".to_string(),
            name_en: "Riyadh".to_string(),
            name_ar: "الرياض".to_string(),
            region: "central".to_string(),
        });
        let catalog = Catalog::from_config(&config);
        assert_eq!(catalog.services.len(), 1);
        assert_eq!(catalog.cities.len(), 1);
        assert_eq!(catalog.page_count(), 1);
    }

    #[test]
    fn test_generate_service_content_end_to_end() {
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
        assert!(content.title.contains("Riyadh"));
        assert!(content.content.contains("<h1>"));
        assert!(content
            .entities
            .iter()
            .any(|e| e.label == EntityLabel::Service));
        assert!(content
            .entities
            .iter()
            .any(|e| e.label == EntityLabel::Location));
    }

    #[test]
    fn test_service_entity_relationships_feed_coverage() {
        let entity = service_entity("cleaning", "Deep Cleaning", "Jeddah");
        assert_eq!(entity.relationships.len(), 2);
        assert_eq!(entity.kind, EntityLabel::Service);
        assert!(entity.attributes.contains_key("warranty"));
    }
}
