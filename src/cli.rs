// Command-line surface.
// Parses arguments into a Config, refreshes the cache and runs the lookup.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cache::{CacheEntry, CachePolicy, prepare_cache};
use crate::config::{Config, DEFAULT_TIMEOUT};
use crate::error::Result;
use crate::kb::{Tag, pick_random};
use crate::remote::HttpSource;

#[derive(Parser, Debug)]
#[command(name = "amuse")]
#[command(version)]
#[command(about = "Print a random knowledge-base entry for a tag")]
pub struct Cli {
    /// Remote dataset URL
    #[arg(long, env = "AMUSE_URL", value_name = "URL", global = true)]
    pub url: Option<String>,

    /// Local dataset cache file
    #[arg(long, env = "AMUSE_DATASET", value_name = "PATH", global = true)]
    pub dataset: Option<PathBuf>,

    /// Local validator token file
    #[arg(long, env = "AMUSE_TOKEN_FILE", value_name = "PATH", global = true)]
    pub token_file: Option<PathBuf>,

    /// Network timeout in seconds
    #[arg(long, env = "AMUSE_TIMEOUT", value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Skip the refresh and use whatever is cached
    #[arg(long, global = true, conflicts_with = "allow_stale")]
    pub offline: bool,

    /// Fall back to the cached dataset if the refresh fails
    #[arg(long, global = true)]
    pub allow_stale: bool,

    /// Log level
    #[arg(short = 'v', long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a random entry filed under TAG
    #[command(visible_alias = "pick")]
    Tech {
        /// Category to pick from
        #[arg(value_enum)]
        tag: Tag,

        /// Seed for the random pick (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Defaults overlaid with whatever was given on the command line or environment.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        if let Some(url) = &self.url {
            config.remote_url = url.clone();
        }
        if let Some(dataset) = &self.dataset {
            config.dataset_path = dataset.clone();
        }
        if let Some(token_file) = &self.token_file {
            config.token_path = token_file.clone();
        }
        config.timeout = self
            .timeout
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        config
    }

    pub fn policy(&self) -> CachePolicy {
        if self.offline {
            CachePolicy::Offline
        } else if self.allow_stale {
            CachePolicy::AllowStale
        } else {
            CachePolicy::Strict
        }
    }
}

/// Seed that differs between runs.
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Refresh the cache, then pick a record. Returns the text to print.
pub async fn run(cli: Cli) -> Result<String> {
    let config = cli.config();
    let policy = cli.policy();
    let entry = CacheEntry::from_config(&config);

    let Command::Tech { tag, seed, json } = cli.command;

    let source = HttpSource::new(&config.remote_url, config.timeout)?;
    prepare_cache(&source, &entry, policy).await?;

    let mut rng = StdRng::seed_from_u64(seed.unwrap_or_else(time_seed));
    let record = pick_random(&entry.dataset_path, tag, &mut rng)?;

    if json {
        Ok(serde_json::to_string_pretty(&record)?)
    } else {
        Ok(record.render())
    }
}
