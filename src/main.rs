use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use country_explorer_lib::commands::{self, format_utils, AppState};
use country_explorer_lib::config::{self, AppConfig, CliOverrides, DEFAULT_CONFIG_PATH};
use country_explorer_lib::countries::CountriesClient;
use country_explorer_lib::favorites::FavoritesStore;
use country_explorer_lib::filter::FilterSpec;
use country_explorer_lib::storage::{KeyValueStore, MemoryStore, SqliteStore};

#[derive(Parser, Debug)]
#[command(name = "country-explorer")]
#[command(version)]
#[command(about = "Explore the world's countries and keep a list of favorites", long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Country list endpoint
    #[arg(long = "api-url")]
    api_url: Option<String>,

    /// Favorites database file
    #[arg(long = "db")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List countries matching the given filters
    List {
        /// Query string to start from (e.g. "search=fra&region=Europe")
        #[arg(short = 'q', long = "query")]
        query: Option<String>,

        /// Case-insensitive substring of the common or official name
        #[arg(short = 's', long = "search")]
        search: Option<String>,

        /// Exact region name (see `regions`)
        #[arg(short = 'r', long = "region")]
        region: Option<String>,

        /// Minimum population, 0 for no bound
        #[arg(long = "min-population")]
        min_population: Option<u64>,

        /// Maximum population, 0 for no bound
        #[arg(long = "max-population")]
        max_population: Option<u64>,

        /// Print the result as JSON
        #[arg(long = "json")]
        json: bool,
    },
    /// List the distinct regions
    Regions,
    /// Show details for one country
    Show {
        /// Three-letter country code (e.g. FRA)
        id: String,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },
}

#[derive(Subcommand, Debug)]
enum FavoritesAction {
    List,
    Add { id: String },
    Remove { id: String },
    Toggle { id: String },
    Clear,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("country_explorer=info,country_explorer_lib=info"),
    )
    .init();

    let args = Args::parse();

    let file_config = config::load_file_config(&args.config);
    let app_config = AppConfig::resolve(
        &CliOverrides {
            api_url: args.api_url.clone(),
            database_path: args.db.clone(),
        },
        &file_config,
    );

    let state = match build_state(&app_config).await {
        Ok(s) => s,
        Err(e) => fail(e),
    };

    if let Err(e) = run(&state, args.cmd).await {
        fail(e);
    }
}

async fn build_state(config: &AppConfig) -> Result<AppState, String> {
    let storage: Arc<dyn KeyValueStore> = match SqliteStore::open(&config.database_path).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::error!("Failed to open favorites database, favorites will not persist: {}", e);
            Arc::new(MemoryStore::new())
        }
    };
    let favorites = FavoritesStore::load(storage).await.into_shared();

    let client = CountriesClient::new(config.api_url.clone(), config.timeout)
        .map_err(|e| e.to_string())?;

    Ok(AppState::new(client, favorites))
}

async fn run(state: &AppState, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::List {
            query,
            search,
            region,
            min_population,
            max_population,
            json,
        } => {
            let mut filter = query
                .as_deref()
                .map(FilterSpec::from_query)
                .unwrap_or_default();
            if let Some(s) = search {
                filter.search = s;
            }
            if let Some(r) = region {
                filter.region = r;
            }
            if let Some(n) = min_population {
                filter.min_population = n;
            }
            if let Some(n) = max_population {
                filter.max_population = n;
            }

            load(state).await?;
            let page = commands::countries::list_countries(state, &filter).await?;

            if json {
                let out = serde_json::to_string_pretty(&page).map_err(|e| e.to_string())?;
                println!("{}", out);
                return Ok(());
            }

            let favorites = state.favorites.lock().await;
            for country in &page.countries {
                let star = if favorites.is_favorite(&country.id) { "*" } else { " " };
                println!(
                    "{} {}  {:<40} {:<10} {:>15}",
                    star,
                    country.id,
                    country.name.common,
                    country.region,
                    format_utils::format_population(country.population)
                );
            }
            println!("Showing {} of {}", page.shown, format_utils::pluralize_countries(page.total));
            let query = page.filter.to_query();
            if !query.is_empty() {
                println!("Query: ?{}", query);
            }
        }
        Command::Regions => {
            load(state).await?;
            for region in commands::countries::get_regions(state).await? {
                if !region.is_empty() {
                    println!("{}", region);
                }
            }
        }
        Command::Show { id } => {
            load(state).await?;
            let details = commands::countries::get_country(state, &id).await?;
            let heart = if details.is_favorite { " [favorite]" } else { "" };
            println!("{} ({}){}", details.official_name, details.id, heart);
            println!("  Name:       {}", details.common_name);
            println!("  Region:     {}", details.region);
            println!("  Population: {}", details.population);
            if !details.capitals.is_empty() {
                println!("  Capital:    {}", details.capitals.join(", "));
            }
            println!("  Flag:       {} ({})", details.flag_url, details.flag_alt);
        }
        Command::Favorites { action } => match action.unwrap_or(FavoritesAction::List) {
            FavoritesAction::List => {
                load(state).await?;
                let view = commands::favorites::get_favorites(state).await?;
                println!("{} in your favorites", format_utils::pluralize_countries(view.countries.len()));
                for country in &view.countries {
                    println!("  {}  {}", country.id, country.name.common);
                }
            }
            FavoritesAction::Add { id } => {
                let id = id.to_uppercase();
                commands::favorites::add_favorite(state, &id).await?;
                println!("✓ Added {} to favorites", id);
            }
            FavoritesAction::Remove { id } => {
                let id = id.to_uppercase();
                commands::favorites::remove_favorite(state, &id).await?;
                println!("✓ Removed {} from favorites", id);
            }
            FavoritesAction::Toggle { id } => {
                let id = id.to_uppercase();
                if commands::favorites::toggle_favorite(state, &id).await? {
                    println!("✓ Added {} to favorites", id);
                } else {
                    println!("✓ Removed {} from favorites", id);
                }
            }
            FavoritesAction::Clear => {
                let removed = commands::favorites::clear_favorites(state).await?;
                println!("✓ Cleared {} favorites", removed);
            }
        },
    }
    Ok(())
}

async fn load(state: &AppState) -> Result<(), String> {
    eprintln!("Loading countries...");
    let count = commands::countries::load_countries(state).await?;
    log::debug!("Catalog ready with {} countries", count);
    Ok(())
}
