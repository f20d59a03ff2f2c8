//! authgate client management CLI
//!
//! Registers clients against a running authgate server through
//! `POST /oauth/clients/register`.
//!
//! ```bash
//! authgate-client-management --base-url http://localhost:8080 register \
//!   --name "My App" \
//!   --homepage-url "https://app.example.com/" \
//!   --description "Example application" \
//!   --success-redirect-url "https://app.example.com/callback"
//! ```
//!
//! `AUTHGATE_BASE_URL` may be used instead of `--base-url`. The client secret
//! is printed once and cannot be retrieved again.
//!
//! Exit codes: 0 success, 1 network or parsing error, 2 registration rejected.

use authgate::oauth::{RegistrationRequest, RegistrationResponse};
use clap::{Args, Parser, Subcommand, ValueEnum};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::process;
use thiserror::Error;

#[derive(Parser)]
#[command(
    name = "authgate-client-management",
    about = "authgate client management CLI",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Base URL of the authgate server
    #[arg(long, env = "AUTHGATE_BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,

    #[arg(short, long, help = "Enable verbose output for debugging")]
    verbose: bool,

    #[arg(long, value_enum, default_value = "json", help = "Output format for responses")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Json,
    JsonPretty,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new client and print its credentials
    Register(RegisterArgs),
    /// Check that the server is up
    Health,
}

#[derive(Args)]
struct RegisterArgs {
    #[arg(long, help = "Human-readable name of the client")]
    name: String,

    #[arg(long, help = "Homepage of the client application")]
    homepage_url: String,

    #[arg(long, help = "Short description shown to users")]
    description: String,

    #[arg(long, help = "Where users land after a successful authorization")]
    success_redirect_url: String,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Client management error: {0}")]
    ClientManagement(String),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Register(args) => register_client(&cli, args).await,
        Commands::Health => check_health(&cli).await,
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        match err {
            AppError::ClientManagement(_) => process::exit(2),
            AppError::Network(_) | AppError::Json(_) => process::exit(1),
        }
    }
}

async fn register_client(cli: &Cli, args: &RegisterArgs) -> Result<(), AppError> {
    let request = RegistrationRequest::new(
        &args.name,
        &args.homepage_url,
        &args.description,
        &args.success_redirect_url,
    );

    if cli.verbose {
        eprintln!(
            "Registration request: {}",
            serde_json::to_string_pretty(&request)?
        );
    }

    let url = format!("{}/oauth/clients/register", cli.base_url.trim_end_matches('/'));
    let response = Client::new().post(&url).json(&request).send().await?;

    if cli.verbose {
        eprintln!("Response status: {}", response.status());
    }

    match response.status() {
        StatusCode::CREATED => {
            let registration: RegistrationResponse = response.json().await?;
            output_response(&cli.format, &registration)
        }
        status => {
            let error_text = response.text().await?;
            Err(AppError::ClientManagement(format!(
                "Registration failed with status {}: {}",
                status, error_text
            )))
        }
    }
}

async fn check_health(cli: &Cli) -> Result<(), AppError> {
    let url = format!("{}/health", cli.base_url.trim_end_matches('/'));
    let response = Client::new().get(&url).send().await?;

    match response.status() {
        StatusCode::OK => {
            println!("{}", response.text().await?);
            Ok(())
        }
        status => Err(AppError::ClientManagement(format!(
            "Health check failed with status {}",
            status
        ))),
    }
}

fn output_response<T: Serialize>(format: &OutputFormat, data: &T) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(data)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Table => {
            if let Value::Object(map) = serde_json::to_value(data)? {
                for (key, value) in map {
                    println!("{}: {}", key, format_value(&value));
                }
            }
        }
    }
    Ok(())
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        _ => value.to_string(),
    }
}
