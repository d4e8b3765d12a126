use reqwest::Client;
use tracing::{error, info, instrument};

use crate::error::Result;
use crate::model::{Dataset, Month, TransformedSummary};
use crate::{config, fetch, parse, stats};

/// Owns the HTTP client and the resolved source URL, and orchestrates
/// fetch → parse.
///
/// Every [`load`](Self::load) builds a fresh [`Dataset`] and returns it by
/// value, so concurrent calls share no mutable state and cannot corrupt
/// each other's results. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct HurricaneSource {
    client: Client,
    url: String,
}

impl HurricaneSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Source configured from the environment (`SHEET_URL` override, fixed
    /// default otherwise).
    pub fn from_env() -> Self {
        Self::new(Client::new(), config::sheet_url())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the table into a fresh dataset. Fetch and parse
    /// failures are logged here and propagated to the caller.
    #[instrument(level = "info", skip(self), fields(url = %self.url))]
    pub async fn load(&self) -> Result<Dataset> {
        let chunks = match fetch::fetch_table(&self.client, &self.url).await {
            Ok(chunks) => chunks,
            Err(err) => {
                error!(%err, "fetching hurricane data failed");
                return Err(err);
            }
        };
        match parse::parse_stream(chunks).await {
            Ok(dataset) => {
                info!(months = dataset.len(), "hurricane dataset loaded");
                Ok(dataset)
            }
            Err(err) => {
                error!(%err, "parsing hurricane data failed");
                Err(err)
            }
        }
    }

    /// Composite "possibility for month" call: load, then estimate. Every
    /// failure along the way degrades to `None` — a missing prediction is a
    /// valid, user-facing outcome.
    pub async fn possibility(&self, month: Month) -> Option<f64> {
        let dataset = match self.load().await {
            Ok(dataset) => dataset,
            Err(err) => {
                error!(%err, month = %month, "could not load data for possibility estimate");
                return None;
            }
        };
        match stats::possibility_for_month(month, &dataset) {
            Ok(possibility) => possibility,
            Err(err) => {
                error!(%err, month = %month, "possibility calculation failed");
                None
            }
        }
    }

    /// Load the table and aggregate it into year/month totals. Unlike
    /// [`possibility`](Self::possibility) this surfaces errors: there is no
    /// sensible empty fallback for the bulk listing.
    pub async fn summary(&self) -> Result<TransformedSummary> {
        let dataset = self.load().await?;
        stats::transform(&dataset)
    }
}
