use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use noteful::{api, config::ServerConfig, db::Database};

#[derive(Parser)]
#[command(name = "noteful")]
#[command(about = "Note-taking REST API with folders, tags and user accounts")]
struct Cli {
    /// Path to the SQLite database (defaults to the platform data directory)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for HTTP API
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
    /// Apply pending database migrations and exit
    Migrate,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "noteful=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn open_database(path: Option<PathBuf>) -> anyhow::Result<Database> {
    let db = match path {
        Some(path) => Database::open(path)?,
        None => Database::open_default()?,
    };
    db.migrate()?;
    Ok(db)
}

async fn serve(db: Database, host: &str, port: u16) -> anyhow::Result<()> {
    let app = api::create_router_with_config(db, ServerConfig::from_env());

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Noteful listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let db = open_database(cli.database)?;

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(db, &host, port).await?,
        Some(Commands::Migrate) => tracing::info!("Database is up to date"),
        None => serve(db, "127.0.0.1", 8080).await?,
    }

    Ok(())
}
