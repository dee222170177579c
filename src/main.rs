extern crate log;
pub mod asset;
pub mod geofile;
pub mod map;
pub mod pipeline;
pub mod scenario;
pub mod session;
use crate::asset::normalize::normalize_features;
use crate::asset::record::Asset;
use crate::geofile::download::sync_dataset_to_file;
use crate::geofile::geojson::{write_assets_to_geojson, write_feature_collection};
use crate::geofile::read_dataset;
use crate::scenario::storm::StormPreview;
use crate::session::{Session, SessionEvent};
use anyhow::anyhow;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::{fs::read_to_string, path::Path};

/// Maintenance-delay scenarios for rain garden assets.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input config file.
    #[arg(short, long)]
    config_filepath: String,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
enum DatasetConfig {
    Geofile { filepath: PathBuf },
    Url { url: String },
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
enum TaskConfig {
    /// Replay a page session and report the resulting summary.
    Summary {
        #[serde(default)]
        events: Vec<SessionEvent>,
        click_tolerance: Option<f64>,
        output_geojson: Option<PathBuf>,
        output_map: Option<PathBuf>,
    },
    /// Reduce a raw inventory to the rain garden core dataset.
    Prepare { output_filepath: PathBuf },
    /// Preview capture for a storm of the given rainfall depth in inches.
    Storm { depth_in: f64 },
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct Config {
    #[serde(with = "serde_yaml::with::singleton_map")]
    dataset: DatasetConfig,
    data_dir: PathBuf,
    // Nested enums (session events, modes, filters) are written as single-key maps too.
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    task: TaskConfig,
}

fn get_dataset_filepath(dataset: &DatasetConfig, data_dir: &Path) -> anyhow::Result<PathBuf> {
    match dataset {
        DatasetConfig::Geofile { filepath } => Ok(filepath.clone()),
        DatasetConfig::Url { url } => sync_dataset_to_file(url, data_dir),
    }
}

fn load_assets(dataset: &DatasetConfig, data_dir: &Path) -> anyhow::Result<Vec<Asset>> {
    let filepath = get_dataset_filepath(dataset, data_dir)?;
    log::info!("Reading assets from {:?}", filepath);
    let collection = read_dataset(&filepath)?;
    let assets = normalize_features(collection);
    log::info!("Loaded {} assets", assets.len());
    Ok(assets)
}

fn run_summary(
    config: &Config,
    events: Vec<SessionEvent>,
    click_tolerance: Option<f64>,
    output_geojson: Option<&Path>,
    output_map: Option<&Path>,
) -> anyhow::Result<()> {
    // A dataset that cannot be loaded leaves an empty page rather than failing the run.
    let assets = load_assets(&config.dataset, &config.data_dir).unwrap_or_else(|err| {
        log::error!("Failed to load dataset: {:?}", err);
        Vec::new()
    });

    let mut session = Session::new(assets);
    if let Some(tolerance) = click_tolerance {
        session = session.with_click_tolerance(tolerance);
    }
    let options = session.controller().filter_options();
    log::info!(
        "Filter options: {} council districts, {} community districts, {} asset types",
        options.councils.len(),
        options.communities.len(),
        options.asset_types.len()
    );

    let view = session.replay(events);
    log::info!(
        "{} assets selected, {:.0} gallons at {} weeks of delay",
        view.summary.count,
        view.summary.effective_gallons,
        view.summary.weeks
    );
    println!("{}", serde_yaml::to_string(&view)?);

    if let Some(output_geojson) = output_geojson {
        write_assets_to_geojson(session.controller().assets(), output_geojson)?;
    }
    if let Some(output_map) = output_map {
        log::info!("Writing map document to {:?}", output_map);
        let document = serde_json::to_string_pretty(&session.map_document()?)?;
        std::fs::write(output_map, document)?;
    }
    Ok(())
}

fn run_prepare(config: &Config, output_filepath: &Path) -> anyhow::Result<()> {
    let source_filepath = get_dataset_filepath(&config.dataset, &config.data_dir)?;
    let source = read_dataset(&source_filepath)?;
    let core = pipeline::prepare::prepare_core_dataset(source);
    let num_features = core.features.len();
    write_feature_collection(core, output_filepath)?;
    log::info!("Wrote {} features to {:?}", num_features, output_filepath);
    Ok(())
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    if !Path::new(&args.config_filepath).exists() {
        return Err(anyhow!("Config file {} not found", &args.config_filepath));
    }
    let config_contents = read_to_string(args.config_filepath)?;
    let config: Config = serde_yaml::from_str(&config_contents)?;

    match &config.task {
        TaskConfig::Summary {
            events,
            click_tolerance,
            output_geojson,
            output_map,
        } => run_summary(
            &config,
            events.clone(),
            *click_tolerance,
            output_geojson.as_deref(),
            output_map.as_deref(),
        ),
        TaskConfig::Prepare { output_filepath } => run_prepare(&config, output_filepath),
        TaskConfig::Storm { depth_in } => {
            let preview = StormPreview::for_depth(*depth_in);
            println!("{}", serde_yaml::to_string(&preview)?);
            Ok(())
        }
    }
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
