use clap::{Parser, Subcommand};
use corsgate::config::Config;
use corsgate::error::AppResult;
use corsgate::server;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// corsgate - serve HTTP behind a static CORS policy
#[derive(Parser, Debug)]
#[command(name = "corsgate")]
#[command(version)]
#[command(about = "Serve HTTP behind a static CORS policy", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web server
    Server {
        /// Host to bind to (overrides SERVER_HOST env var)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides SERVER_PORT env var)
        #[arg(long)]
        port: Option<u16>,

        /// Emit logs as JSON
        #[arg(long, default_value_t = false)]
        json_logs: bool,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Server {
            host,
            port,
            json_logs,
        } => {
            init_tracing(json_logs);

            // CLI args take precedence over SERVER_HOST / SERVER_PORT
            let config = Config::from_env_with(|key| match key {
                "SERVER_HOST" => host.clone(),
                "SERVER_PORT" => port.map(|p| p.to_string()),
                _ => None,
            })?;

            let addr = config.server.addr();
            server::run_server(config, addr).await
        }
    }
}
