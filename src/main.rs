use chapter_tally::app::{handle_fatal_error, init_logging};
use chapter_tally::cli::{run_aggregate, AggregateCommand, Cli};
use chapter_tally::config::load_config;
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref(), &cli.overrides()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    init_logging(cli.verbose, &config.log_level);

    let command = AggregateCommand {
        config,
        table: cli.table,
        write_file: !cli.no_write,
    };

    if let Err(e) = run(command).await {
        handle_fatal_error(e, cli.verbose);
    }
}

async fn run(command: AggregateCommand) -> anyhow::Result<()> {
    run_aggregate(&command, std::io::stdout().lock()).await?;
    Ok(())
}
