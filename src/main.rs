// src/main.rs — epiminer entry point

use clap::Parser;

use epiminer::cli::{Cli, Commands};
use epiminer::infra::config::Config;
use epiminer::infra::errors::EpiminerError;
use epiminer::infra::logger;
use epiminer::infra::paths;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG overrides either default
    logger::init_logging(if cli.verbose { "debug" } else { "warn" });

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        let code = match e.downcast_ref::<EpiminerError>() {
            Some(err) if err.is_configuration() => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Falls back to defaults if no config.toml
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    match cli.command {
        Commands::Mine(args) => epiminer::cli::mine::run_mine(args, &config).await,
        Commands::Config => {
            println!("# {}", paths::config_file_path().display());
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
