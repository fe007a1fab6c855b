use clap::Parser;
use crop_advisor::catalog::CatalogProvider;
use crop_advisor::config::Config;
use crop_advisor::data::{climate_normals, find_region, SoilDatabase};
use crop_advisor::engine::{RecommendationEngine, RecommendationFilters, ScoredCrop, Season};
use crop_advisor::models::{CropCategory, RegionProfile, WeatherSummary};
use crop_advisor::soil::{improvement_plan, improvement_priorities, soil_concerns};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Rainy days assumed when weather is built from regional normals.
const DEFAULT_RAINY_DAYS: u32 = 60;

#[derive(Parser, Debug)]
#[command(
    name = "crop-advisor",
    version,
    about = "Rank crops for an Indian region by climate, soil, economics and risk"
)]
struct Cli {
    /// YAML configuration file
    #[arg(long, default_value = "config/config.yaml")]
    config: PathBuf,

    /// Region name, e.g. "Punjab"
    #[arg(long)]
    region: String,

    /// Number of crops to rank (defaults to recommendation.top_n)
    #[arg(long)]
    top_n: Option<usize>,

    /// Keep only one crop category (Cereals, Pulses, Oilseeds, Vegetables, Fruits)
    #[arg(long)]
    category: Option<String>,

    /// Minimum return on investment, percent
    #[arg(long, default_value_t = 0.0)]
    min_roi: f64,

    /// Maximum production cost per acre
    #[arg(long)]
    max_investment: Option<f64>,

    /// Season filter: Kharif, Rabi or Zaid
    #[arg(long)]
    season: Option<String>,

    /// Mean annual temperature (°C), overriding regional normals
    #[arg(long)]
    avg_temp: Option<f64>,

    /// Annual rainfall (mm), overriding regional normals
    #[arg(long)]
    annual_rainfall: Option<f64>,

    /// JSON file with twelve monthly weather records
    #[arg(long, conflicts_with_all = ["avg_temp", "annual_rainfall"])]
    weather: Option<PathBuf>,

    /// Bypass the catalog cache
    #[arg(long)]
    refresh: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Also print the soil improvement plan for the region
    #[arg(long)]
    improvement_plan: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,crop_advisor=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = if cli.config.exists() {
        let config = Config::load(&cli.config).map_err(|e| {
            anyhow::anyhow!(
                "Failed to load configuration: {}\n\n\
                 Make sure:\n\
                 1. {} is valid YAML\n\
                 2. All referenced environment variables are set (check .env.example)\n\
                 3. Create a .env file if needed",
                e,
                cli.config.display()
            )
        })?;
        info!("Configuration loaded from {}", cli.config.display());
        config
    } else {
        warn!("{} not found, using default configuration", cli.config.display());
        Config::default()
    };

    let region = find_region(&cli.region).map_err(|e| {
        anyhow::anyhow!(
            "{}\n\nKnown regions: {}",
            e,
            crop_advisor::data::regions()
                .iter()
                .map(|r| r.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })?;

    let weather = load_weather(&cli, &region)?;
    info!(
        "Weather for {}: {:.1} °C, {:.0} mm ({})",
        region.name,
        weather.avg_temp,
        weather.annual_rainfall,
        weather.climate_class()
    );

    let category = cli
        .category
        .as_deref()
        .filter(|c| !c.eq_ignore_ascii_case("all"))
        .map(|label| {
            let category = CropCategory::parse(label);
            if category.is_known() {
                Ok(category)
            } else {
                Err(anyhow::anyhow!(
                    "Unknown category '{}'. Use one of: All, {}",
                    label,
                    CropCategory::KNOWN
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            }
        })
        .transpose()?;

    let season = cli
        .season
        .as_deref()
        .map(|label| {
            Season::parse(label)
                .ok_or_else(|| anyhow::anyhow!("Unknown season '{}'. Use Kharif, Rabi or Zaid", label))
        })
        .transpose()?;

    let provider = CatalogProvider::from_config(&config.catalog)?;
    let snapshot = provider.snapshot(cli.refresh).await;
    info!(
        "Using {:?} catalog with {} crops (loaded {})",
        snapshot.source,
        snapshot.crops.len(),
        snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let soils = Arc::new(SoilDatabase::builtin());
    let engine = RecommendationEngine::new(snapshot.crops.clone(), soils.clone())
        .with_tables(config.scoring.tables())
        .with_settings(config.recommendation);

    let filters = RecommendationFilters {
        category,
        min_roi: cli.min_roi,
        max_investment: cli.max_investment.unwrap_or(f64::INFINITY),
        top_n: cli.top_n.unwrap_or(config.recommendation.top_n),
    };

    let results = match season {
        Some(season) => engine.seasonal_filtered(&region, &weather, season, &filters),
        None => engine.recommend_filtered(&region, &weather, &filters),
    };
    info!("{} crops recommended for {}", results.len(), region.name);

    let soil = soils.get(&region.name);

    if cli.json {
        let mut output = json!({
            "region": region,
            "weather": {
                "avg_temp": weather.avg_temp,
                "annual_rainfall": weather.annual_rainfall,
                "climate_class": weather.climate_class().as_str(),
            },
            "catalog_source": snapshot.source,
            "recommendations": results,
        });
        if cli.improvement_plan {
            output["soil_improvement"] = match soil {
                Some(profile) => {
                    let plan = improvement_plan(profile);
                    json!({
                        "total_cost_per_hectare": plan.total_cost_per_hectare(),
                        "plan": plan,
                        "concerns": soil_concerns(profile),
                        "priorities": improvement_priorities(profile),
                    })
                }
                None => serde_json::Value::Null,
            };
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_table(&region, &results);

    if cli.improvement_plan {
        match soil {
            Some(profile) => {
                let plan = improvement_plan(profile);
                println!();
                println!("Soil improvement plan for {}", region.name);
                for action in plan.actions() {
                    println!(
                        "  - {} ({:.0}/ha, {})",
                        action.action, action.cost_per_hectare, action.timeline
                    );
                }
                println!("  Total: {:.0}/ha", plan.total_cost_per_hectare());
                for concern in soil_concerns(profile) {
                    println!("  ! {}", concern);
                }
            }
            None => println!("\nNo soil profile available for {}", region.name),
        }
    }

    Ok(())
}

fn load_weather(cli: &Cli, region: &RegionProfile) -> anyhow::Result<WeatherSummary> {
    if let Some(path) = &cli.weather {
        return WeatherSummary::load(path).map_err(|e| {
            anyhow::anyhow!("Failed to load weather file {}: {}", path.display(), e)
        });
    }

    let (mean_temp, mean_humidity) = climate_normals(&region.name)
        .ok_or_else(|| anyhow::anyhow!("No climate normals for {}", region.name))?;

    Ok(WeatherSummary::from_normals(
        cli.avg_temp.unwrap_or(mean_temp),
        cli.annual_rainfall.unwrap_or(region.annual_rainfall),
        mean_humidity,
        DEFAULT_RAINY_DAYS,
    ))
}

fn print_table(region: &RegionProfile, results: &[ScoredCrop]) {
    if results.is_empty() {
        println!("No crops match the given criteria for {}", region.name);
        return;
    }

    println!(
        "{:<4} {:<20} {:<11} {:>6} {:>7} {:>6} {:>8} {:>8} {:>8}",
        "#", "Crop", "Category", "Score", "Climate", "Soil", "Economic", "ROI %", "Profit"
    );
    for (rank, scored) in results.iter().enumerate() {
        println!(
            "{:<4} {:<20} {:<11} {:>6.2} {:>7.2} {:>6.2} {:>8.2} {:>8.1} {:>8.0}",
            rank + 1,
            scored.crop.name,
            scored.crop.category.as_str(),
            scored.suitability_score,
            scored.scores.climate,
            scored.scores.soil,
            scored.scores.economic,
            scored.economics.roi,
            scored.economics.profit
        );
    }
}
