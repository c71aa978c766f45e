use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::{City, Service};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_brand_name")]
    pub brand_name: String,
    /// Primary page language. The site is Arabic-first; rendered documents
    /// carry `dir="rtl"` when this is `"ar"`.
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            brand_name: default_brand_name(),
            locale: default_locale(),
        }
    }
}

fn default_base_url() -> String {
    "https://example.sa".to_string()
}
fn default_brand_name() -> String {
    "Home Services".to_string()
}
fn default_locale() -> String {
    "ar".to_string()
}

/// Sentence-length optimization for generated copy.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SentenceLength {
    Standard,
    Short,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Window size for n-gram extraction.
    #[serde(default = "default_ngram_size")]
    pub ngram_size: usize,
    /// Intervening-word count for skip-gram extraction.
    #[serde(default = "default_skip_distance")]
    pub skip_distance: usize,
    #[serde(default = "default_sentence_length")]
    pub sentence_length: SentenceLength,
    /// Word cap applied per sentence when `sentence_length = "short"`.
    #[serde(default = "default_max_sentence_words")]
    pub max_sentence_words: usize,
    /// Recognition/extraction input bound, in characters.
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            ngram_size: default_ngram_size(),
            skip_distance: default_skip_distance(),
            sentence_length: default_sentence_length(),
            max_sentence_words: default_max_sentence_words(),
            max_input_chars: default_max_input_chars(),
        }
    }
}

fn default_ngram_size() -> usize {
    2
}
fn default_skip_distance() -> usize {
    1
}
fn default_sentence_length() -> SentenceLength {
    SentenceLength::Standard
}
fn default_max_sentence_words() -> usize {
    15
}
fn default_max_input_chars() -> usize {
    20_000
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// Extra services beyond the built-in catalog.
    #[serde(default)]
    pub services: Vec<Service>,
    /// Extra cities beyond the built-in catalog.
    #[serde(default)]
    pub cities: Vec<City>,
    /// Drop the built-in catalog and use only the entries above.
    #[serde(default)]
    pub replace_builtin: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_out_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_out_dir(),
        }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("./dist")
}

impl Config {
    /// Minimal configuration for commands that can run without a config
    /// file (`analyze`, `generate` with built-in catalog).
    pub fn minimal() -> Self {
        Self {
            site: SiteConfig::default(),
            generation: GenerationConfig::default(),
            catalog: CatalogConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.generation.ngram_size == 0 {
        anyhow::bail!("generation.ngram_size must be > 0");
    }

    if config.generation.max_sentence_words == 0 {
        anyhow::bail!("generation.max_sentence_words must be > 0");
    }

    if config.generation.max_input_chars == 0 {
        anyhow::bail!("generation.max_input_chars must be > 0");
    }

    if config.site.base_url.is_empty() {
        anyhow::bail!("site.base_url must not be empty");
    }

    if config.catalog.replace_builtin
        && (config.catalog.services.is_empty() || config.catalog.cities.is_empty())
    {
        anyhow::bail!("catalog.replace_builtin requires at least one service and one city");
    }

    for service in &config.catalog.services {
        if service.slug.is_empty() {
            anyhow::bail!("catalog service '{}' has an empty slug", service.name_en);
        }
    }
    for city in &config.catalog.cities {
        if city.slug.is_empty() {
            anyhow::bail!("catalog city '{}' has an empty slug", city.name_en);
        }
    }

    Ok(config)
}
