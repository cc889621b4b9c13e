//! Command implementations behind the `agenda-prep` subcommands.

use agenda_core::audit::{self, AuditReport};
use agenda_core::config::Config;
use agenda_core::{store, CanonicalizeStats, Canonicalizer};
use agenda_feeds::CatalogClient;
use anyhow::Context;
use chrono::NaiveDate;
use tracing::info;

/// Fetch the raw dataset and write it to `paths.raw`. Returns the record count.
pub async fn fetch(config: &Config, today: NaiveDate) -> anyhow::Result<usize> {
    let client = CatalogClient::new(config.fetch.clone()).context("building catalog client")?;
    let events = client
        .fetch_all(today)
        .await
        .with_context(|| format!("fetching events for {}", config.fetch.city))?;

    store::save_raw(&config.paths.raw, &events)?;
    info!(count = events.len(), path = %config.paths.raw.display(), "raw dataset saved");
    Ok(events.len())
}

/// Clean `paths.raw` into `paths.clean`.
pub fn clean(config: &Config) -> anyhow::Result<CanonicalizeStats> {
    let raw = store::load_raw(&config.paths.raw)?;
    let mut run = Canonicalizer::new();
    let events = run.run(raw);

    store::save_clean(&config.paths.clean, &events)?;
    info!(count = events.len(), path = %config.paths.clean.display(), "clean dataset saved");
    Ok(run.stats().clone())
}

/// Audit `paths.clean` against the configured city and the fetch window
/// ending on `today`.
pub fn audit(config: &Config, today: NaiveDate) -> anyhow::Result<AuditReport> {
    let events = store::load_clean(&config.paths.clean)?;
    let min_start = config
        .fetch
        .window_start(today)
        .and_hms_opt(0, 0, 0)
        .context("fetch window start is not a valid timestamp")?
        .and_utc();
    Ok(audit::audit(&events, &config.fetch.city, min_start))
}
