use std::env;

use clap::{Parser, Subcommand};
use config::Config;
use dotenvy::dotenv;
use serde::Serialize;

use vehicle_discovery::domain::filter::SortOrder;
use vehicle_discovery::forms::filters::FilterForm;
use vehicle_discovery::models::config::ClientConfig;
use vehicle_discovery::services::ServiceResult;
use vehicle_discovery::{run_detail, run_listing};

#[derive(Debug, Parser)]
#[command(about = "Browse the vehicle rental catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render one page of the vehicle listing.
    List {
        /// URL query string of the listing, e.g. `manufacturer=Kia&sort=yearDesc`.
        #[arg(long, value_name = "QUERY")]
        query: Option<String>,
        #[arg(long, value_name = "MANUFACTURER")]
        manufacturer: Option<String>,
        #[arg(long, value_name = "PRICE")]
        max_price: Option<u32>,
        #[arg(long, value_name = "SORT")]
        sort: Option<SortOrder>,
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,
        #[arg(long, value_name = "PAGE")]
        page: Option<usize>,
    },
    /// Show the detail view of a vehicle.
    #[command(arg_required_else_help = true)]
    Show { id: i32 },
}

fn print_json<T: Serialize>(result: ServiceResult<T>) {
    let value = match result {
        Ok(value) => value,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&value) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("Failed to serialize output: {err}");
            std::process::exit(1);
        }
    }
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let client_config = match settings.try_deserialize::<ClientConfig>() {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {}", err);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::List {
            query,
            manufacturer,
            max_price,
            sort,
            search,
            page,
        } => {
            let mut form = match query.as_deref().map(FilterForm::parse).transpose() {
                Ok(form) => form.unwrap_or_default(),
                Err(err) => {
                    log::error!("Invalid listing query: {err}");
                    std::process::exit(1);
                }
            };

            if let Some(manufacturer) = manufacturer {
                form.manufacturer = manufacturer;
            }
            if max_price.is_some() {
                form.max_daily_price = max_price;
            }
            if sort.is_some() {
                form.sort = sort;
            }
            if let Some(search) = search {
                form.search_query = search;
            }
            if page.is_some() {
                form.page = page;
            }

            print_json(run_listing(&client_config, &form));
        }
        Commands::Show { id } => print_json(run_detail(&client_config, id)),
    }
}
