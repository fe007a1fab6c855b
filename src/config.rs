use crate::engine::ScoringTables;
use crate::error::{AppError, Result};
use crate::models::CropCategory;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub recommendation: RecommendationConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Remote crop catalog settings. Without `api_url` only the static catalog is used.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub api_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub api_key: Option<String>,
    #[serde(default = "default_cache_ttl", deserialize_with = "deserialize_number")]
    pub cache_ttl_seconds: u64,
    #[serde(default = "default_timeout", deserialize_with = "deserialize_number")]
    pub timeout_seconds: u64,
    #[serde(default = "default_max_retries", deserialize_with = "deserialize_number")]
    pub max_retries: u32,
}

fn default_cache_ttl() -> u64 {
    900 // 15 minutes
}

fn default_timeout() -> u64 {
    15
}

fn default_max_retries() -> u32 {
    3
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            cache_ttl_seconds: default_cache_ttl(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl CatalogConfig {
    pub fn is_remote(&self) -> bool {
        self.api_url.is_some()
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct RecommendationConfig {
    #[serde(default = "default_top_n", deserialize_with = "deserialize_number")]
    pub top_n: usize,
    /// Soil pH a crop must tolerate to pass the climate filter
    #[serde(default = "default_target_ph", deserialize_with = "deserialize_number")]
    pub target_ph: f64,
    /// Soil score used when a region has no soil profile
    #[serde(default = "default_soil_score", deserialize_with = "deserialize_number")]
    pub default_soil_score: f64,
}

fn default_top_n() -> usize {
    15
}

fn default_target_ph() -> f64 {
    crate::climate::DEFAULT_TARGET_PH
}

fn default_soil_score() -> f64 {
    7.0
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            target_ph: default_target_ph(),
            default_soil_score: default_soil_score(),
        }
    }
}

/// Overrides layered on top of the built-in scoring tables.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScoringConfig {
    #[serde(default)]
    pub market_demand: HashMap<CropCategory, f64>,
    #[serde(default)]
    pub market_default: Option<f64>,
    /// Crop name → regions; replaces the built-in entry for that crop
    #[serde(default)]
    pub regional_affinity: HashMap<String, Vec<String>>,
}

impl ScoringConfig {
    pub fn tables(&self) -> ScoringTables {
        let mut tables = ScoringTables::default();
        tables
            .market_demand
            .extend(self.market_demand.iter().map(|(k, v)| (*k, *v)));
        if let Some(default) = self.market_default {
            tables.market_default = default;
        }
        tables.regional_affinity.extend(
            self.regional_affinity
                .iter()
                .map(|(crop, regions)| (crop.clone(), regions.clone())),
        );
        tables
    }
}

/// Accepts a number or a string holding one, so `${VAR}` substitutions work
/// whether or not they are quoted.
fn deserialize_number<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberValue<T> {
        Number(T),
        String(String),
    }

    match NumberValue::<T>::deserialize(deserializer)? {
        NumberValue::Number(n) => Ok(n),
        NumberValue::String(s) => s
            .trim()
            .parse::<T>()
            .map_err(|e| serde::de::Error::custom(format!("Invalid number '{}': {}", s, e))),
    }
}

/// Empty and whitespace-only strings deserialize as `None`.
fn deserialize_optional_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let expanded = expand_env_vars(content)?;

        // An empty document parses as unit, not as a mapping
        let config: Config = if expanded.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&expanded)
                .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    ///
    /// Checks for:
    /// - Unexpanded environment variables
    /// - A parseable HTTPS catalog URL
    /// - Scores and pH inside their scales
    pub fn validate(&self) -> Result<()> {
        if let Some(api_url) = &self.catalog.api_url {
            if api_url.contains("${") {
                return Err(AppError::Config(
                    "CROP_API_URL environment variable is not set. \
                     Please set it or create a .env file. \
                     See .env.example for required variables."
                        .to_string(),
                ));
            }

            let parsed = url::Url::parse(api_url).map_err(|e| {
                AppError::Config(format!("Invalid catalog api_url '{}': {}", api_url, e))
            })?;

            if parsed.scheme() != "https" {
                return Err(AppError::Config(format!(
                    "Catalog api_url must use HTTPS, got: {}",
                    parsed.scheme()
                )));
            }
        }

        if self.catalog.timeout_seconds == 0 {
            return Err(AppError::Config(
                "Catalog timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.catalog.max_retries > 10 {
            return Err(AppError::Config(format!(
                "Catalog max_retries {} seems too high, maximum recommended is 10",
                self.catalog.max_retries
            )));
        }

        if self.catalog.is_remote() && self.catalog.cache_ttl_seconds < 60 {
            tracing::warn!(
                "Catalog cache TTL of {} seconds is very short, consider using at least 60 seconds",
                self.catalog.cache_ttl_seconds
            );
        }

        let rec = &self.recommendation;
        if rec.top_n == 0 {
            return Err(AppError::Config(
                "Recommendation top_n must be at least 1".to_string(),
            ));
        }

        if !(0.0..=14.0).contains(&rec.target_ph) {
            return Err(AppError::Config(format!(
                "Recommendation target_ph {} must be between 0 and 14",
                rec.target_ph
            )));
        }

        check_score("recommendation.default_soil_score", rec.default_soil_score)?;

        for (category, score) in &self.scoring.market_demand {
            check_score(&format!("scoring.market_demand.{}", category), *score)?;
        }

        if let Some(default) = self.scoring.market_default {
            check_score("scoring.market_default", default)?;
        }

        for (crop, regions) in &self.scoring.regional_affinity {
            if regions.is_empty() {
                return Err(AppError::Config(format!(
                    "scoring.regional_affinity.{} must list at least one region",
                    crop
                )));
            }
        }

        Ok(())
    }
}

fn check_score(field: &str, value: f64) -> Result<()> {
    if (0.0..=10.0).contains(&value) {
        Ok(())
    } else {
        Err(AppError::Config(format!(
            "{} must be between 0 and 10, got {}",
            field, value
        )))
    }
}

/// Substitute `${VAR}` and `${VAR:-default}` references.
fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = content.to_string();
    let re = regex_lite::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
        .map_err(|e| AppError::Config(format!("Invalid substitution pattern: {}", e)))?;

    let mut missing_vars = Vec::new();

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        match (std::env::var(var_name), cap.get(2)) {
            (Ok(value), _) => {
                result = result.replace(&cap[0], &value);
            }
            (Err(_), Some(default)) => {
                result = result.replace(&cap[0], default.as_str());
            }
            (Err(_), None) => {
                missing_vars.push(var_name.to_string());
            }
        }
    }

    if !missing_vars.is_empty() {
        return Err(AppError::Config(format!(
            "Missing required environment variable{}: {}\n\n\
             To fix this:\n\
             1. Create a .env file in the project root (copy .env.example)\n\
             2. Set the missing variable{}: export {}=<value>\n\
             3. Or give it a default in the config file: ${{{}:-<value>}}",
            if missing_vars.len() > 1 { "s" } else { "" },
            missing_vars.join(", "),
            if missing_vars.len() > 1 { "s" } else { "" },
            missing_vars[0],
            missing_vars[0]
        )));
    }

    Ok(result)
}
