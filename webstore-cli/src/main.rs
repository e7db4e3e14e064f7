use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

use commands::{
    AuthCommand, CartCommand, ConfigCommand, OrderCommand, ProductCommand, ProductsCommand,
    ProfileCommand, WishlistCommand,
};
use config::Config;
use webstore_core::{ApiGateway, AuthSession, MembershipTracker, MirrorStore, StoreKey};

#[derive(Parser)]
#[command(name = "store")]
#[command(version)]
#[command(about = "A storefront client for the webstore services", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, register, or inspect auth state
    Auth(AuthCommand),

    /// Show the authenticated user's profile
    Profile(ProfileCommand),

    /// List products in a category
    Products(ProductsCommand),

    /// Show, create, or update a single product
    Product(ProductCommand),

    /// Manage the shopping cart
    Cart(CartCommand),

    /// Manage the wishlist
    Wishlist(WishlistCommand),

    /// Place orders
    Order(OrderCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("STORE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;
    tracing::debug!(config_file = ?config.config_file, "configuration loaded");

    match &cli.command {
        Some(Commands::Auth(cmd)) => {
            let gateway = gateway(&config)?;
            cmd.run(&config, &gateway).await?;
        }
        Some(Commands::Profile(cmd)) => {
            let gateway = gateway(&config)?;
            let session = session(&config)?;
            cmd.run(&config, &gateway, &session).await?;
        }
        Some(Commands::Products(cmd)) => {
            let gateway = gateway(&config)?;
            let session = session(&config)?;
            let cart = tracker(&config, StoreKey::Cart);
            let wishlist = tracker(&config, StoreKey::Wishlist);
            cmd.run(&config, &gateway, &session, &cart, &wishlist)
                .await?;
        }
        Some(Commands::Product(cmd)) => {
            let gateway = gateway(&config)?;
            let session = session(&config)?;
            cmd.run(&config, &gateway, &session).await?;
        }
        Some(Commands::Cart(cmd)) => {
            let gateway = gateway(&config)?;
            let session = session(&config)?;
            let cart = tracker(&config, StoreKey::Cart);
            cmd.run(&config, &gateway, &session, &cart).await?;
        }
        Some(Commands::Wishlist(cmd)) => {
            let gateway = gateway(&config)?;
            let session = session(&config)?;
            let wishlist = tracker(&config, StoreKey::Wishlist);
            cmd.run(&config, &gateway, &session, &wishlist).await?;
        }
        Some(Commands::Order(cmd)) => {
            let gateway = gateway(&config)?;
            let session = session(&config)?;
            let cart = tracker(&config, StoreKey::Cart);
            cmd.run(&config, &gateway, &session, &cart).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

fn gateway(config: &Config) -> Result<ApiGateway, Box<dyn std::error::Error>> {
    Ok(ApiGateway::new(
        config.user_service_url.value.clone(),
        config.product_service_url.value.clone(),
    )?)
}

/// Build the session context from the stored token, or fail with a hint.
fn session(config: &Config) -> Result<AuthSession, Box<dyn std::error::Error>> {
    match &config.auth.token {
        Some(token) => Ok(AuthSession::new(token.clone())),
        None => Err("Not logged in. Run 'store auth login' first.".into()),
    }
}

fn tracker(config: &Config, key: StoreKey) -> MembershipTracker {
    MembershipTracker::open(key, MirrorStore::new(config.data_dir.value.clone()))
}
