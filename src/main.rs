use std::process::ExitCode;

use clap::Parser;

use crudsync::cli::{self, Cli};
use crudsync::logging::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = cli.load_config()?;
    let state = cli::execute(&cli.command, &config).await?;

    println!("{}", serde_json::to_string_pretty(&state)?);

    if let Some(error) = state.first_error() {
        tracing::warn!(resource = cli.command.resource(), error = %error, "Request failed");
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}
