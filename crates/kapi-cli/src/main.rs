//! Kapi - LDAP authentication provider
//!
//! Serves the provider entry points over HTTP, or calls one of them once
//! from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use kapi_auth::{AuthProvider, LdapAuthProvider, MemoryDirectory};
use kapi_core::config::KapiConfig;
use kapi_core::types::LoginPayload;
use kapi_server::ProviderServer;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "kapi")]
#[command(author = "Kapi Team")]
#[command(version = kapi_core::VERSION)]
#[command(about = "LDAP authentication provider", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// LDAP server URL
    #[arg(long, global = true, env = "KAPI_SERVER_NAME")]
    server_name: Option<String>,

    /// API key lifetime in minutes
    #[arg(long, global = true, env = "KAPI_KEY_LIFETIME_MINUTES")]
    key_lifetime_minutes: Option<u64>,

    /// Directory backend
    #[arg(long, global = true, value_enum, default_value_t = DirectoryKind::Ldap)]
    directory: DirectoryKind,

    /// Bind address
    #[arg(long, global = true, env = "KAPI_BIND_ADDRESS")]
    bind: Option<String>,

    /// Port number
    #[arg(short, long, global = true, env = "KAPI_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "KAPI_LOG_LEVEL")]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the provider over HTTP
    Serve,

    /// Authenticate once and print the response
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short = 'P', long, env = "KAPI_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Print the login dialog fields
    LoginInfo,

    /// Print the current configuration and its editable fields
    ConfigInfo,

    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DirectoryKind {
    /// A real LDAP server at the configured server name
    Ldap,
    /// Built-in copy of the public test directory
    Memory,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Load or create config
    let mut config = if let Some(config_path) = &cli.config {
        KapiConfig::from_file(config_path)?
    } else {
        KapiConfig::from_env()
    };

    // Override with CLI args
    if let Some(server_name) = cli.server_name.clone() {
        config.provider.server_name = Some(server_name);
    }
    if let Some(minutes) = cli.key_lifetime_minutes {
        config.provider.key_lifetime_minutes = Some(minutes);
    }
    if let Some(bind) = cli.bind.clone() {
        config.server.bind_address = bind;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level.clone() {
        config.logging.level = level;
    }

    init_logging(&config.logging.level, &config.logging.format);

    let provider = build_provider(cli.directory, &config)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            info!("Starting Kapi {}", kapi_core::VERSION);
            ProviderServer::new(config, provider).run().await?;
        }
        Commands::Login { username, password } => {
            let outcome = provider
                .authenticate(&LoginPayload::new(username, password))
                .await;
            print_json(&outcome)?;
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
        Commands::LoginInfo => print_json(&provider.login_info())?,
        Commands::ConfigInfo => print_json(&provider.config_info())?,
        Commands::Version => println!("kapi {}", kapi_core::VERSION),
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only command output
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if format == "json" {
        registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn build_provider(
    directory: DirectoryKind,
    config: &KapiConfig,
) -> anyhow::Result<Arc<dyn AuthProvider>> {
    let provider: Arc<dyn AuthProvider> = match directory {
        DirectoryKind::Ldap => Arc::new(LdapAuthProvider::from_config(config)?),
        DirectoryKind::Memory => Arc::new(LdapAuthProvider::with_directory(
            MemoryDirectory::forumsys(),
            config,
        )),
    };
    Ok(provider)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
