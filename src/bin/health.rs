use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use url::Url;

/// Probes a running analyzer, exits non-zero unless it answers with a success status
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Health endpoint of the analyzer
    #[arg(default_value = "http://127.0.0.1:3001/health")]
    url: String,

    /// Seconds to wait for an answer
    #[arg(short, long, default_value_t = 5)]
    timeout: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let url = Url::parse(&args.url).with_context(|| format!("Invalid URL {}", args.url))?;

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()?;
    let response = client.get(url).send()?;
    if !response.status().is_success() {
        bail!("Health check failed with status {}", response.status());
    }

    Ok(())
}
