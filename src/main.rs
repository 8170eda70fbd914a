// src/main.rs
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2data::{CommandLineInput, DataSource, Environment, RunConfig, SiteGenerator, WriteOutcome};
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion2data.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = RunConfig::resolve(cli)?;
    log::info!("Using configuration {}", config.config_path.display());

    let generator = SiteGenerator::new(&config.site_dir, config.site.notion);
    let site_data = generator.generate(&Environment::capture()).await;

    for (key, entry) in site_data.iter() {
        let source = match entry.source {
            DataSource::Notion => "Notion",
            DataSource::Fallback => "local fallback",
        };
        let status = match &entry.outcome {
            Some(WriteOutcome::Written { path, .. }) => format!("written to {}", path.display()),
            Some(WriteOutcome::Unchanged { .. }) => "unchanged".to_string(),
            None => "not written".to_string(),
        };
        println!(
            "✓ {}: {} items from {} ({})",
            key,
            entry.data.item_count(),
            source,
            status
        );
    }
    if site_data.is_empty() {
        println!("No collections generated.");
    }

    Ok(())
}
