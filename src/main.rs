use std::env;
use std::str::FromStr;

use anyhow::{bail, Result};
use hurricane_stats::{HurricaneSource, Month};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();

    let source = HurricaneSource::from_env();
    info!(url = %source.url(), "startup");

    match env::args().nth(1) {
        // month given: print the possibility estimate for it
        Some(raw) => {
            let month = match Month::from_str(&raw) {
                Ok(month) => month,
                Err(err) => bail!("{err}"),
            };
            match source.possibility(month).await {
                Some(possibility) => {
                    println!("Possibility of hurricanes in {month} ~ {possibility}%");
                }
                None => {
                    println!("Could not predict hurricanes for {month}. Not enough data.");
                }
            }
        }
        // no month: print the aggregated year/month totals
        None => {
            let summary = source.summary().await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
