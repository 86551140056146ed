mod cli;
mod config;

use anyhow::{bail, Context};
use clap::Parser;
use harvest_logging::{harvest_error, harvest_info};
use log::LevelFilter;
use oai_harvest_engine::{HarvestDriver, RecordStore, RedbRecordStore, ReqwestPageSource};

use cli::{Cli, Command};
use config::HarvestConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = HarvestConfig::load_or_default(&cli.config)?;
    cli.apply_overrides(&mut config);

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        harvest_logging::parse_level(&config.log_level)
    };
    harvest_logging::initialize(level, config.log_file.as_deref());

    match &cli.command {
        Command::Harvest => harvest(&config),
        Command::Show { identity } => show(&config, identity),
        Command::Stats => stats(&config),
    }
}

fn open_store(config: &HarvestConfig) -> anyhow::Result<RedbRecordStore> {
    RedbRecordStore::open(&config.store_path)
        .with_context(|| format!("opening record store {}", config.store_path.display()))
}

fn harvest(config: &HarvestConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let source = ReqwestPageSource::new(config.fetch_settings()?)?;
    let mut driver = HarvestDriver::new(source, store, config.driver_settings());

    harvest_info!(
        "Harvesting set {:?} from {} into {}",
        config.set,
        config.endpoint,
        config.store_path.display()
    );

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    match runtime.block_on(driver.run()) {
        Ok(stats) => {
            println!(
                "{} pages, {} stored ({} new, {} updated), {} unchanged",
                stats.pages,
                stats.stored(),
                stats.inserted,
                stats.replaced,
                stats.skipped
            );
            Ok(())
        }
        Err(err) => {
            harvest_error!("Harvest stopped: {}", err);
            Err(err.into())
        }
    }
}

fn show(config: &HarvestConfig, identity: &str) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let Some(record) = store.get(identity)? else {
        bail!("no record stored for {identity}");
    };
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn stats(config: &HarvestConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    println!(
        "{} records in {}",
        store.len()?,
        config.store_path.display()
    );
    Ok(())
}
