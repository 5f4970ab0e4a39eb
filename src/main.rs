use anyhow::Result;
use clap::Parser;
use household_ledger::cli::Cli;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_config.as_deref(), cli.verbose)?;
    cli.run().await
}

/// Use the given log4rs YAML file, or log to stderr (debug with --verbose).
fn init_logging(config_path: Option<&str>, verbose: bool) -> Result<()> {
    if let Some(path) = config_path {
        log4rs::init_file(path, Default::default())
            .map_err(|e| anyhow::anyhow!("Could not initialize logging from {}: {}", path, e))?;
        return Ok(());
    }

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;

    log4rs::init_config(config)?;
    Ok(())
}
