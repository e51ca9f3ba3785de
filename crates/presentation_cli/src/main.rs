//! WeatherFrame CLI
//!
//! Command-line host for the weather data source: runs queries, tests the
//! connection and edits the saved data source settings.

#![allow(clippy::print_stdout)]

mod output;
mod settings_store;

use std::path::PathBuf;
use std::sync::Arc;

use application::{ConfigEditor, DataSourceService, OptionsHost, QueryRequest};
use clap::{Parser, Subcommand};
use domain::{
    MainParameter, WeatherQuery, WeatherUnits, main_parameter_options, units_options,
};
use infrastructure::{AppConfig, LoggingConfig, OpenWeatherAdapter, init_logging};
use settings_store::SettingsStore;

/// WeatherFrame CLI
#[derive(Parser)]
#[command(name = "weatherframe-cli")]
#[command(author, version, about = "Weather forecast data source CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Saved data source settings
    #[arg(
        short,
        long,
        global = true,
        env = "WEATHERFRAME_SETTINGS",
        default_value = "weatherframe-settings.json"
    )]
    settings: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the forecast for a city and print it as a frame
    ///
    /// Example: weatherframe-cli query "london,uk" --main-parameter wind -p speed -p gust
    Query {
        /// City name, e.g. "London,uk"
        city: String,

        /// Weather category
        #[arg(short, long, default_value = "main")]
        main_parameter: MainParameter,

        /// Fields within the category (repeatable; default: first of the category)
        #[arg(short = 'p', long = "sub-parameter")]
        sub_parameters: Vec<String>,

        /// Measurement system (default: from settings)
        #[arg(short, long)]
        units: Option<WeatherUnits>,

        /// Print frames as JSON
        #[arg(long)]
        json: bool,
    },

    /// Test the connection to the weather API
    Test,

    /// List the available parameters and units
    Parameters,

    /// Show or edit the saved data source settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the saved settings (the API key is never shown)
    Show,

    /// Set the forecast endpoint
    SetUrl {
        /// Endpoint, e.g. <https://api.openweathermap.org/data/2.5/forecast>
        url: String,
    },

    /// Set the API key
    SetApiKey {
        /// Key issued by the weather API
        api_key: String,
    },

    /// Remove the saved API key
    ResetApiKey,

    /// Set the default measurement system
    SetUnits {
        /// standard, metric or imperial
        units: WeatherUnits,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Query built from command-line arguments
fn build_query(
    city: &str,
    main_parameter: MainParameter,
    sub_parameters: Vec<String>,
    units: Option<WeatherUnits>,
) -> WeatherQuery {
    let sub_parameters = if sub_parameters.is_empty() {
        vec![main_parameter.first_sub_parameter().to_string()]
    } else {
        sub_parameters
    };

    WeatherQuery {
        ref_id: "A".to_string(),
        city_name: Some(city.to_string()),
        location: Some(city.to_string()),
        query_text: Some(city.to_string()),
        main_parameter: Some(main_parameter),
        metric: Some(sub_parameters.clone()),
        sub_parameter: Some(sub_parameters),
        units,
        ..Default::default()
    }
}

/// Data source from configuration overlaid with the saved settings
fn build_datasource(store: &SettingsStore) -> anyhow::Result<DataSourceService> {
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });
    if let Some(saved) = store.load()? {
        config.datasource.apply_settings(&saved);
    }
    config
        .datasource
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid data source configuration: {e}"))?;

    let adapter = OpenWeatherAdapter::with_config(config.datasource.to_client_config())
        .map_err(|e| anyhow::anyhow!("Failed to initialize weather API client: {e}"))?;

    Ok(DataSourceService::new(
        Arc::new(adapter),
        &config.datasource.to_settings(),
    ))
}

/// Apply one settings edit through the configuration form
fn edit_settings(store: &Arc<SettingsStore>, action: SettingsAction) -> anyhow::Result<()> {
    let current = store.load()?.unwrap_or_default();
    let mut editor = ConfigEditor::new(current, Arc::clone(store) as Arc<dyn OptionsHost>);

    match action {
        SettingsAction::Show => {
            output::print_settings(&editor, store.path());
            return Ok(());
        },
        SettingsAction::SetUrl { url } => {
            editor.on_url_change(&url);
            if let Some(error) = editor.url_error() {
                println!("⚠️  {error}");
            }
        },
        SettingsAction::SetApiKey { api_key } => editor.on_api_key_change(&api_key),
        SettingsAction::ResetApiKey => editor.on_reset_api_key(),
        SettingsAction::SetUnits { units } => editor.on_units_change(units),
    }

    if let Some(e) = store.take_error() {
        return Err(e.into());
    }
    println!("✅ Settings saved to {}", store.path().display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    init_logging(
        &LoggingConfig::default(),
        log_filter_from_verbosity(cli.verbose),
    )?;

    let store = Arc::new(SettingsStore::new(cli.settings));

    match cli.command {
        Commands::Query {
            city,
            main_parameter,
            sub_parameters,
            units,
            json,
        } => {
            let query = build_query(&city, main_parameter, sub_parameters, units);
            if !DataSourceService::filter_query(&query) {
                anyhow::bail!("A city name is required");
            }

            let datasource = build_datasource(&store)?;
            let response = datasource
                .query(&QueryRequest {
                    targets: vec![query],
                })
                .await;

            if response.data.is_empty() {
                println!("❌ No data for {city} (run with -v for details)");
                std::process::exit(1);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&response.data)?);
            } else {
                for frame in &response.data {
                    output::print_frame(frame);
                }
            }
        },

        Commands::Test => {
            let datasource = build_datasource(&store)?;
            let result = datasource.test_datasource().await;

            if result.is_success() {
                println!("✅ {}", result.message);
            } else {
                println!("❌ {}", result.message);
                if let Some(details) = result.details {
                    println!("   {details}");
                }
                std::process::exit(1);
            }
        },

        Commands::Parameters => {
            output::print_parameters(&main_parameter_options(), &units_options());
        },

        Commands::Settings { action } => edit_settings(&store, action)?,
    }

    Ok(())
}
