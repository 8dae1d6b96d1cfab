use clap::Parser;
use std::net::TcpListener;
use chirpy::auth::TokenService;
use chirpy::configuration::get_configuration;
use chirpy::database::Database;
use chirpy::domain::Chirpy;
use chirpy::startup::run;
use chirpy::telemetry::init_telemetry;

#[derive(Parser)]
#[command(name = "chirpy", about = "Chirpy API server")]
struct Cli {
    /// Wipe the database file before serving
    #[arg(long)]
    debug: bool,
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    tracing::error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    init_telemetry("info");
    tracing::info!("Starting application");

    let configuration =
        get_configuration().map_err(|e| startup_error("Failed to read configuration", e))?;
    tracing::info!("Configuration loaded successfully");

    let db = Database::open(&configuration.database.path)
        .map_err(|e| startup_error("Failed to open database", e))?;
    if cli.debug {
        db.reset()
            .map_err(|e| startup_error("Failed to wipe database", e))?;
        tracing::info!("Database deleted successfully");
    }

    let tokens = TokenService::new(&configuration.jwt);
    let chirpy = Chirpy::new(db, tokens, configuration.polka.api_key.clone());

    let address = configuration.application.address();
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Server listening on: {}", address);

    let server = run(
        listener,
        chirpy,
        configuration.application.filepath_root.clone(),
    )?;
    server.await
}
