use std::process::ExitCode;

use clap::Parser;

use trellis_cli::{Cli, CliExitCode};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    match trellis_cli::run(cli, &mut stdout).await {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("error: {e:#}");
            CliExitCode::StartupError.into()
        }
    }
}
