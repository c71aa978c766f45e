//! # SEO Engine
//!
//! Entity and keyword content-synthesis pipeline for an Arabic-first
//! home-services marketplace.
//!
//! SEO Engine turns a topic string and a set of domain entities into
//! landing-page copy (raw HTML) plus the analysis metadata — recognized
//! entities, n-grams, internal-link proposals, search intents, information
//! gaps, and topical-coverage scores — that the marketplace's dashboard
//! panels consume.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐   ┌──────────────────────────────┐   ┌──────────┐
//! │ Catalog       │──▶│  Pipeline                     │──▶│  HTML +  │
//! │ services/cities│  │ recognize → extract → classify│   │ metadata │
//! └───────────────┘   │ → score → assemble            │   └────┬─────┘
//!                     └──────────────────────────────┘        │
//!                                   ┌──────────────────────────┤
//!                                   ▼                          ▼
//!                              ┌──────────┐             ┌──────────┐
//!                              │   CLI    │             │  Pages   │
//!                              │  (seo)   │             │  (dist/) │
//!                              └──────────┘             └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! seo analyze "Emergency AC Repair in Riyadh"   # entity/keyword report
//! seo generate "AC Repair in Riyadh" --json     # one page's content
//! seo render all                                # whole catalog to dist/
//! seo catalog                                   # list services and cities
//! seo stats                                     # summarize rendered output
//! ```
//!
//! Everything runs synchronously in one pass over caller-supplied strings;
//! there is no database, network, or background work.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`rules`] | Declarative per-label rule table |
//! | [`recognize`] | Entity recognition engine |
//! | [`ngram`] | N-gram / skip-gram extraction |
//! | [`link`] | Internal-link proposals |
//! | [`intent`] | Search-intent classification |
//! | [`gaps`] | Information-gap detection |
//! | [`coverage`] | Topical coverage scoring |
//! | [`assemble`] | HTML content assembly |
//! | [`catalog`] | Service/city catalog |
//! | [`render`] | Batch page rendering |

pub mod assemble;
pub mod catalog;
pub mod config;
pub mod coverage;
pub mod gaps;
pub mod intent;
pub mod link;
pub mod models;
pub mod ngram;
pub mod progress;
pub mod recognize;
pub mod render;
pub mod report;
pub mod rules;
pub mod stats_cmd;
pub mod text;
