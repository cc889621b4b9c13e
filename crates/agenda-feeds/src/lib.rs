//! agenda-feeds — catalog API source for agenda-prep.
//!
//! [`CatalogClient`] pages through the OpenDataSoft records endpoint of the
//! public OpenAgenda dataset and returns every record as a [`RawEvent`].
//! Pages are fetched one after the other with `limit`/`offset`; the walk
//! stops on an empty page or once `offset` reaches the reported
//! `total_count`. There is no retry: any HTTP failure aborts the fetch.

use agenda_core::config::FetchConfig;
use agenda_core::RawEvent;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FeedError {
    #[error("catalog API returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, FeedError>;

/// One page of the records endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub results: Vec<RawEvent>,
}

/// Client for the paginated records endpoint.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: FetchConfig,
}

impl CatalogClient {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("agenda-prep/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// ODSQL filter selecting the configured city from `start` onwards.
    pub fn where_clause(&self, start: NaiveDate) -> String {
        format!(
            "location_city='{}' AND firstdate_begin >= date'{}'",
            self.config.city.replace('\'', "\\'"),
            start.format("%Y-%m-%d")
        )
    }

    /// Fetch a single page.
    pub async fn fetch_page(&self, offset: u64, filter: &str) -> Result<CatalogPage> {
        let limit = self.page_size();
        debug!(offset, limit, "requesting catalog page");

        let response = self
            .http
            .get(&self.config.base_url)
            .query(&[
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
                ("where", filter.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }
        Ok(response.json().await?)
    }

    /// Fetch every record in the window ending on `today`, in API order.
    pub async fn fetch_all(&self, today: NaiveDate) -> Result<Vec<RawEvent>> {
        let filter = self.where_clause(self.config.window_start(today));
        let limit = self.page_size();
        let mut offset = 0u64;
        let mut events = Vec::new();

        loop {
            let page = self.fetch_page(offset, &filter).await?;
            if page.results.is_empty() {
                break;
            }

            events.extend(page.results);
            offset += limit;

            if offset >= page.total_count.unwrap_or(0) {
                break;
            }
            info!(offset, "fetched catalog events so far");
        }

        info!(total = events.len(), city = %self.config.city, "catalog fetch complete");
        Ok(events)
    }

    fn page_size(&self) -> u64 {
        u64::from(self.config.limit.max(1))
    }
}
