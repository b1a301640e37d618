//! knjiznica-rs server entry point.

use clap::Parser;
use knjiznica_rs::{
    Catalog,
    config::{Cli, Command, Config},
    db::seed,
    server,
};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Find or load config
    let config_path = cli.config.clone().or_else(Config::find_config_file);

    let config = if let Some(ref path) = config_path {
        Config::load(path)?
    } else {
        Config::default()
    };

    match cli.command {
        Some(Command::Init { force }) => cmd_init(&config, force),
        Some(Command::Serve { bind }) => cmd_serve(config, bind).await,
        None => cmd_serve(config, None).await,
    }
}

/// Write a default config, create the database and seed it.
fn cmd_init(config: &Config, force: bool) -> anyhow::Result<()> {
    let config_path = PathBuf::from("config.toml");

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, Config::generate_default())?;
    println!("Created config file: {}", config_path.display());

    let (_, seeded) = seed::open_configured(&config.database)?;
    println!(
        "Initialized database: {}{}",
        config.database.path.display(),
        if seeded { " (seeded)" } else { "" }
    );

    println!("\nEdit config.toml to configure your server, then run: knjiznica-rs serve");

    Ok(())
}

/// Start the server.
async fn cmd_serve(mut config: Config, bind: Option<std::net::SocketAddr>) -> anyhow::Result<()> {
    if let Some(addr) = bind {
        config.server.bind = addr;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "knjiznica_rs=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        bind = %config.server.bind,
        database = %config.database.path.display(),
        "Starting knjiznica-rs server"
    );

    // Schema creation is idempotent; seeding only touches an empty store.
    let (db, _) = seed::open_configured(&config.database)?;

    let counts = db.counts()?;
    tracing::info!(
        books = counts.books,
        authors = counts.authors,
        categories = counts.categories,
        "Database ready"
    );

    let state = server::AppState::new(config.clone(), Catalog::new(db));
    let app = server::create_router(state);

    let listener = TcpListener::bind(config.server.bind).await?;
    tracing::info!(address = %config.server.bind, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
