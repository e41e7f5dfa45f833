//! uniauth CLI Client
//!
//! Sends one command to a uniauth service and prints the decoded response.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use uniauth::{Client, Config, Fields, Response};

/// uniauth CLI
#[derive(Parser, Debug)]
#[command(name = "uniauth-cli")]
#[command(about = "Diagnostic client for the uniauth session service")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:7033")]
    server: String,

    /// Read timeout in milliseconds (0 waits forever)
    #[arg(long, default_value = "5000")]
    read_timeout_ms: u64,

    /// Write timeout in milliseconds (0 waits forever)
    #[arg(long, default_value = "5000")]
    write_timeout_ms: u64,

    /// Command to issue: lookup, commit, create or transfer
    command: String,

    /// Request fields as name:value (e.g. key:abc123 id:42)
    #[arg(value_parser = parse_field)]
    fields: Vec<(String, String)>,
}

/// Split `name:value` on the first colon
fn parse_field(arg: &str) -> Result<(String, String), String> {
    match arg.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected name:value, got {:?}", arg)),
    }
}

fn main() {
    // Logs go to stderr so stdout carries only the response
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,uniauth=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .server_addr(&args.server)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .build();

    if let Err(e) = run(&args, &config) {
        tracing::error!("{} failed: {}", args.command, e);
        std::process::exit(1);
    }
}

fn run(args: &Args, config: &Config) -> uniauth::Result<()> {
    let fields: Fields = args
        .fields
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();

    let mut client = Client::connect(config)?;
    tracing::debug!("uniauth-cli v{} connected to {}", uniauth::VERSION, client.peer_addr());

    let response = client.execute(&args.command, &fields)?;
    match &response {
        Response::Error(text) => println!("error: {}", text),
        _ => println!("{}", response),
    }

    Ok(())
}
