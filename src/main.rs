use clap::Parser;
use career_wizard::cli::commands::{cmd_clear, cmd_inspect, cmd_submit, cmd_validate};
use career_wizard::cli::config::{Cli, Commands, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    match &cli.command {
        Commands::Inspect { record } => {
            cmd_inspect(record.as_deref(), &cli, &config)?;
        }
        Commands::Validate { record } => {
            let valid = cmd_validate(record.as_deref(), &cli, &config)?;
            if !valid {
                std::process::exit(1);
            }
        }
        Commands::Submit { record, status } => {
            let submitted = cmd_submit(record.as_deref(), status, &cli, &config)?;
            if !submitted {
                std::process::exit(1);
            }
        }
        Commands::Clear { record } => {
            cmd_clear(record.as_deref(), &cli, &config)?;
        }
    }

    Ok(())
}
