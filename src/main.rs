use clap::Parser;
use tracing_subscriber::EnvFilter;

use vextriage::cli;
use vextriage::errors::VexError;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        cli::Commands::Generate(args) => cli::generate::handle_generate(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let exit_code = match &e {
            VexError::Config(_) => 2,
            _ => 1,
        };
        std::process::exit(exit_code);
    }
}
