//! Bluepenguin CLI - Command-line front end for the admin console.
//!
//! # Usage
//!
//! ```bash
//! # Log in (the session is kept in BLUEPENGUIN_SESSION_FILE)
//! bp-cli login -u admin -p secret
//!
//! # Catalog management
//! bp-cli categories list
//! bp-cli categories feature RNG
//! bp-cli collections create SUM "Summer Edit"
//! bp-cli products search --collection SUM --page 2
//!
//! # Product images
//! bp-cli images upload BP-RNG-001 ./ring.jpg --primary
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `status` - Session management
//! - `hash` - Hash a key with the backend
//! - `categories`, `featured`, `collections`, `materials`, `features` - Catalog
//! - `products`, `favs` - Products and artisan favourites
//! - `images` - Product images
//! - `occasions` - Upcoming festivals and holidays

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use bluepenguin_admin::{AdminConfig, ConsoleState};
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "bp-cli")]
#[command(author, version, about = "Bluepenguin admin console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the stored session
    Status,
    /// Hash a key with the backend
    Hash { key: String },
    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Inspect featured categories
    Featured {
        #[command(subcommand)]
        action: FeaturedAction,
    },
    /// Manage collections
    Collections {
        #[command(subcommand)]
        action: CollectionAction,
    },
    /// Inspect materials
    Materials {
        #[command(subcommand)]
        action: MaterialAction,
    },
    /// Manage product features
    Features {
        #[command(subcommand)]
        action: FeatureAction,
    },
    /// Browse products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage artisan favourites
    Favs {
        #[command(subcommand)]
        action: FavAction,
    },
    /// Manage product images
    Images {
        #[command(subcommand)]
        action: ImageAction,
    },
    /// List upcoming occasions
    Occasions {
        /// Number of occasions to show
        #[arg(short, long, default_value_t = bluepenguin_core::occasion::DEFAULT_UPCOMING_LIMIT)]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// List categories with their featured flag
    List,
    /// Toggle whether a category is featured (at most 4)
    Feature { id: String },
}

#[derive(Subcommand)]
enum FeaturedAction {
    /// List featured category codes
    List,
}

#[derive(Subcommand)]
enum CollectionAction {
    /// List collections with product counts
    List,
    /// Show one collection
    Show { id: String },
    /// Create a collection
    Create { id: String, name: String },
    /// Rename a collection
    Update { id: String, name: String },
}

#[derive(Subcommand)]
enum MaterialAction {
    /// List materials
    List,
}

#[derive(Subcommand)]
enum FeatureAction {
    /// List features
    List,
    /// Create a feature
    Create { id: String, name: String },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List all products
    List,
    /// Search products
    Search {
        #[arg(long = "collection")]
        collections: Vec<String>,

        #[arg(long = "category")]
        categories: Vec<String>,

        #[arg(long = "material")]
        materials: Vec<String>,

        #[arg(long = "feature")]
        features: Vec<String>,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = bluepenguin_admin::services::product::DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
}

#[derive(Subcommand)]
enum FavAction {
    /// List artisan favourites
    List,
    /// Mark a product as an artisan favourite
    Add { sku: String },
    /// Unmark a product
    Remove { sku: String },
}

#[derive(Subcommand)]
enum ImageAction {
    /// List image ids for a product
    List { sku: String },
    /// Print the URL serving an image
    Url { sku: String, image_id: String },
    /// Upload an image file
    Upload {
        sku: String,
        file: PathBuf,

        /// Make this the product's primary image
        #[arg(long)]
        primary: bool,
    },
    /// Download an image to a file
    Download {
        sku: String,
        image_id: String,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Delete an image
    Delete { sku: String, image_id: String },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &AdminConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(config: &AdminConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bluepenguin_admin=info,bluepenguin_cli=info".into());

    let json_layer = config
        .log_json
        .then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!config.log_json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AdminConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Tracing is not up yet
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Failed to load configuration: {e}");
            }
            std::process::exit(2);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing(&config);

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: AdminConfig) -> Result<(), CliError> {
    let state = ConsoleState::new(config)?;

    let result = dispatch(&state, cli.command).await;
    if let Err(e) = &result
        && e.is_unauthorized()
    {
        tracing::warn!("Backend rejected the session, clearing it");
        state.session().clear_auth()?;
    }
    result
}

async fn dispatch(state: &ConsoleState, command: Commands) -> Result<(), CliError> {
    use commands::{auth, catalog, images, occasions, products};

    match command {
        Commands::Login { username, password } => auth::login(state, &username, &password).await,
        Commands::Logout => auth::logout(state),
        Commands::Status => {
            auth::status(state);
            Ok(())
        }
        Commands::Hash { key } => auth::hash(state, &key).await,
        Commands::Categories { action } => match action {
            CategoryAction::List => catalog::list_categories(state).await,
            CategoryAction::Feature { id } => catalog::toggle_featured(state, &id).await,
        },
        Commands::Featured { action } => match action {
            FeaturedAction::List => catalog::list_featured(state).await,
        },
        Commands::Collections { action } => match action {
            CollectionAction::List => catalog::list_collections(state).await,
            CollectionAction::Show { id } => catalog::show_collection(state, &id).await,
            CollectionAction::Create { id, name } => {
                catalog::create_collection(state, &id, &name).await
            }
            CollectionAction::Update { id, name } => {
                catalog::update_collection(state, &id, &name).await
            }
        },
        Commands::Materials { action } => match action {
            MaterialAction::List => catalog::list_materials(state).await,
        },
        Commands::Features { action } => match action {
            FeatureAction::List => catalog::list_features(state).await,
            FeatureAction::Create { id, name } => catalog::create_feature(state, &id, &name).await,
        },
        Commands::Products { action } => match action {
            ProductAction::List => products::list(state).await,
            ProductAction::Search {
                collections,
                categories,
                materials,
                features,
                page,
                page_size,
            } => {
                let filter = products::filter(collections, categories, materials, features);
                products::search(state, &filter, page, page_size).await
            }
        },
        Commands::Favs { action } => match action {
            FavAction::List => products::list_favs(state).await,
            FavAction::Add { sku } => products::add_fav(state, &sku).await,
            FavAction::Remove { sku } => products::remove_fav(state, &sku).await,
        },
        Commands::Images { action } => match action {
            ImageAction::List { sku } => images::list(state, &sku).await,
            ImageAction::Url { sku, image_id } => images::url(state, &sku, &image_id),
            ImageAction::Upload { sku, file, primary } => {
                images::upload(state, &sku, &file, primary).await
            }
            ImageAction::Download {
                sku,
                image_id,
                output,
            } => images::download(state, &sku, &image_id, &output).await,
            ImageAction::Delete { sku, image_id } => images::delete(state, &sku, &image_id).await,
        },
        Commands::Occasions { limit } => {
            occasions::list(limit);
            Ok(())
        }
    }
}
