use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{HarvestConfig, DEFAULT_CONFIG_FILENAME};

/// Harvests arXiv metadata over OAI-PMH into a local record store.
#[derive(Parser, Debug)]
#[command(name = "oai-harvest", version)]
pub struct Cli {
    /// RON configuration file; defaults apply when it does not exist
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,

    /// OAI set to harvest
    #[arg(long)]
    pub set: Option<String>,

    /// Record store file
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// OAI-PMH endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Seconds to wait between page requests
    #[arg(long)]
    pub pacing_secs: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run a full harvest from the first page
    Harvest,
    /// Print one stored record as JSON
    Show {
        /// Record identity, e.g. 2101.00001
        identity: String,
    },
    /// Print the number of stored records
    Stats,
}

impl Cli {
    /// Command-line values win over the file.
    pub fn apply_overrides(&self, config: &mut HarvestConfig) {
        if let Some(set) = &self.set {
            config.set = set.clone();
        }
        if let Some(store) = &self.store {
            config.store_path = store.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(pacing) = self.pacing_secs {
            config.pacing_secs = pacing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_values() {
        let cli = Cli::try_parse_from([
            "oai-harvest",
            "--set",
            "math",
            "--store",
            "other.redb",
            "--pacing-secs",
            "0",
            "harvest",
        ])
        .unwrap();
        let mut config = HarvestConfig::default();

        cli.apply_overrides(&mut config);

        assert_eq!(cli.command, Command::Harvest);
        assert_eq!(config.set, "math");
        assert_eq!(config.store_path, PathBuf::from("other.redb"));
        assert_eq!(config.pacing_secs, 0);
        assert_eq!(config.endpoint, HarvestConfig::default().endpoint);
    }

    #[test]
    fn show_takes_an_identity() {
        let cli = Cli::try_parse_from(["oai-harvest", "-v", "show", "2101.00001"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILENAME));
        assert_eq!(
            cli.command,
            Command::Show {
                identity: "2101.00001".to_string()
            }
        );
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["oai-harvest"]).is_err());
    }
}
