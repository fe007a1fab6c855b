use crate::config::CatalogConfig;
use crate::data::find_crop;
use crate::error::{AppError, Result};
use crate::models::{CropCategory, CropEconomics, CropRequirement, ValueRange, WaterRequirement};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

/// HTTP client for the remote crop catalog.
pub struct CatalogFetcher {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    max_retries: u32,
}

impl CatalogFetcher {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let api_url = config
            .api_url
            .clone()
            .ok_or_else(|| AppError::Config("Catalog api_url is not configured".to_string()))?;

        let client = Client::builder()
            .user_agent(concat!("crop-advisor/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            api_url,
            api_key: config.api_key.clone(),
            max_retries: config.max_retries,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetch the remote catalog and merge it over `defaults`.
    pub async fn fetch(&self, defaults: &[CropRequirement]) -> Result<Vec<CropRequirement>> {
        let items = self.fetch_items().await?;
        info!("Fetched {} crop records from {}", items.len(), self.api_url);
        Ok(normalize_catalog(items, defaults))
    }

    /// Raw catalog items, unwrapped from `{"data": [...]}` when needed.
    pub async fn fetch_items(&self) -> Result<Vec<Value>> {
        debug!("Requesting crop catalog from {}", self.api_url);

        retry_with_backoff(self.max_retries, || async {
            let mut request = self.client.get(&self.api_url).header(ACCEPT, "application/json");
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key).header("x-api-key", key);
            }

            let response = request.send().await?.error_for_status()?;
            let body: Value = response.json().await?;
            Ok(extract_items(body))
        })
        .await
    }
}

/// Retry a future with exponential backoff
async fn retry_with_backoff<F, Fut, T>(max_retries: u32, mut f: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut retries = 0;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                retries += 1;

                if retries > max_retries {
                    return Err(e);
                }

                let should_retry = match &e {
                    // Connection errors, timeouts and 5xx are transient
                    AppError::Http(reqwest_err) => {
                        reqwest_err.is_timeout()
                            || reqwest_err.is_connect()
                            || reqwest_err
                                .status()
                                .map(|s| s.is_server_error())
                                .unwrap_or(false)
                    }
                    AppError::Io(_) => true,
                    _ => false,
                };

                if !should_retry {
                    return Err(e);
                }

                let delay = Duration::from_secs(2u64.pow(retries.saturating_sub(1)));
                warn!(
                    "Catalog request failed (attempt {}/{}): {}. Retrying in {:?}...",
                    retries, max_retries, e, delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Unwrap a catalog response body: a bare array or `{"data": [...]}`.
/// Any other shape is treated as an empty catalog.
pub fn extract_items(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                warn!("Catalog response object has no data array");
                Vec::new()
            }
        },
        other => {
            warn!("Unexpected catalog response shape: {}", type_name(&other));
            Vec::new()
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One remote catalog record. Every field is optional and accepts the
/// spellings seen across catalog providers.
#[derive(Debug, Default, Deserialize)]
struct ApiCrop {
    #[serde(default, alias = "crop", alias = "crop_name", deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(
        default,
        rename = "type",
        alias = "category",
        alias = "crop_type",
        deserialize_with = "lenient_text"
    )]
    category: Option<String>,
    #[serde(
        default,
        alias = "min_temp",
        alias = "temperature_min",
        alias = "tempMin",
        deserialize_with = "lenient_number"
    )]
    temp_min: Option<f64>,
    #[serde(
        default,
        alias = "max_temp",
        alias = "temperature_max",
        alias = "tempMax",
        deserialize_with = "lenient_number"
    )]
    temp_max: Option<f64>,
    #[serde(default, alias = "min_rainfall", alias = "rainfallMin", deserialize_with = "lenient_number")]
    rainfall_min: Option<f64>,
    #[serde(default, alias = "max_rainfall", alias = "rainfallMax", deserialize_with = "lenient_number")]
    rainfall_max: Option<f64>,
    #[serde(
        default,
        alias = "soilPhMin",
        alias = "soil_ph_low",
        alias = "ph_min",
        deserialize_with = "lenient_number"
    )]
    soil_ph_min: Option<f64>,
    #[serde(
        default,
        alias = "soilPhMax",
        alias = "soil_ph_high",
        alias = "ph_max",
        deserialize_with = "lenient_number"
    )]
    soil_ph_max: Option<f64>,
    #[serde(default, alias = "season", alias = "growingSeason", deserialize_with = "lenient_text")]
    growing_season: Option<String>,
    #[serde(default, alias = "water", alias = "waterRequirement", deserialize_with = "lenient_text")]
    water_requirement: Option<String>,
    #[serde(default, alias = "price", alias = "marketPrice", deserialize_with = "lenient_number")]
    market_price: Option<f64>,
    #[serde(default, alias = "cost", alias = "productionCost", deserialize_with = "lenient_number")]
    production_cost: Option<f64>,
    #[serde(default, alias = "yield", alias = "expectedYield", deserialize_with = "lenient_number")]
    expected_yield: Option<f64>,
    #[serde(
        default,
        alias = "growingDays",
        alias = "duration_days",
        deserialize_with = "lenient_number"
    )]
    growing_period_days: Option<f64>,
}

/// Numbers may arrive as JSON numbers or numeric strings; anything else is absent.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        _ => None,
    })
}

/// Build a crop from a remote record, filling gaps from the static entry of
/// the same name. Fails with the first field that is still missing.
fn merge_with_default(
    api: ApiCrop,
    defaults: &[CropRequirement],
) -> std::result::Result<CropRequirement, &'static str> {
    let name = api.name.ok_or("name")?;
    let base = find_crop(defaults, &name);

    let category = match api.category {
        Some(label) => CropCategory::parse(&label),
        None => base.map(|b| b.category).ok_or("type")?,
    };
    let water_requirement = match api.water_requirement {
        Some(label) => WaterRequirement::parse(&label),
        None => base.map(|b| b.water_requirement).ok_or("water_requirement")?,
    };

    let temperature = ValueRange::new(
        api.temp_min.or(base.map(|b| b.temperature.min)).ok_or("temp_min")?,
        api.temp_max.or(base.map(|b| b.temperature.max)).ok_or("temp_max")?,
    );
    let rainfall = ValueRange::new(
        api.rainfall_min.or(base.map(|b| b.rainfall.min)).ok_or("rainfall_min")?,
        api.rainfall_max.or(base.map(|b| b.rainfall.max)).ok_or("rainfall_max")?,
    );
    let soil_ph = ValueRange::new(
        api.soil_ph_min.or(base.map(|b| b.soil_ph.min)).ok_or("soil_ph_min")?,
        api.soil_ph_max.or(base.map(|b| b.soil_ph.max)).ok_or("soil_ph_max")?,
    );

    let economics = CropEconomics::new(
        api.market_price
            .or(base.map(|b| b.economics.market_price))
            .ok_or("market_price")?,
        api.production_cost
            .or(base.map(|b| b.economics.production_cost))
            .ok_or("production_cost")?,
        api.expected_yield
            .or(base.map(|b| b.economics.expected_yield))
            .ok_or("expected_yield")?,
    );

    let growing_period_days = match api.growing_period_days {
        Some(days) if days >= 0.0 => days.round() as u32,
        _ => base.map(|b| b.growing_period_days).ok_or("growing_period_days")?,
    };

    let growing_season = api
        .growing_season
        .or_else(|| base.map(|b| b.growing_season.clone()))
        .ok_or("growing_season")?;

    for range in [&temperature, &rainfall, &soil_ph] {
        if range.min > range.max {
            return Err("range");
        }
    }

    Ok(CropRequirement {
        name,
        category,
        temperature,
        rainfall,
        soil_ph,
        growing_season,
        water_requirement,
        economics,
        growing_period_days,
    })
}

/// Normalize raw catalog items over `defaults`.
///
/// Items that cannot be completed are dropped with a warning, as are repeated
/// names. An empty input or an empty result yields `defaults` unchanged.
pub fn normalize_catalog(items: Vec<Value>, defaults: &[CropRequirement]) -> Vec<CropRequirement> {
    if items.is_empty() {
        info!("Remote catalog is empty, using static catalog");
        return defaults.to_vec();
    }

    let total = items.len();
    let mut seen = HashSet::new();
    let mut crops = Vec::with_capacity(total);

    for (index, item) in items.into_iter().enumerate() {
        let api: ApiCrop = match serde_json::from_value(item) {
            Ok(api) => api,
            Err(e) => {
                warn!("Skipping catalog item {}: {}", index, e);
                continue;
            }
        };

        match merge_with_default(api, defaults) {
            Ok(crop) => {
                if seen.insert(crop.name.clone()) {
                    crops.push(crop);
                } else {
                    warn!("Skipping duplicate catalog item '{}'", crop.name);
                }
            }
            Err("range") => warn!("Skipping catalog item {}: inverted min/max range", index),
            Err(field) => warn!("Skipping catalog item {}: missing required field '{}'", index, field),
        }
    }

    if crops.is_empty() {
        warn!("No usable items in remote catalog ({} received), using static catalog", total);
        return defaults.to_vec();
    }

    debug!("Normalized {}/{} remote catalog items", crops.len(), total);
    crops
}
