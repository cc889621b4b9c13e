//! Test builders — ergonomic constructors for `RawEvent` fixtures and configs.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use agenda_prep::{Config, RawEvent};
use serde_json::Value;
use std::path::Path;

// ---------------------------------------------------------------------------
// RawEventBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawEvent`] test fixtures.
///
/// `RawEventBuilder::valid(uid)` starts from a record that passes every
/// filter; the setters then override or remove individual fields.
///
/// # Example
///
/// ```rust,ignore
/// let raw = RawEventBuilder::valid("evt-1")
///     .field("title_fr", "<b>Concert</b>")
///     .without("description_fr")
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct RawEventBuilder {
    event: RawEvent,
}

impl RawEventBuilder {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn valid(uid: &str) -> Self {
        Self::empty()
            .field("uid", uid)
            .field("title_fr", "Concert de jazz")
            .field("description_fr", "Un quartet au parc")
            .field("longdescription_fr", "Entrée libre dans la limite des places disponibles.")
            .field("firstdate_begin", "2025-06-01T18:00:00Z")
            .field("firstdate_end", "2025-06-01T20:00:00Z")
            .field("lastdate_begin", "2025-06-08T18:00:00Z")
            .field("lastdate_end", "2025-06-08T20:00:00Z")
            .field("location_name", "Parc de Belleville")
            .field("location_address", "47 rue des Couronnes")
            .field("location_city", "Paris")
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.event.insert(key, value);
        self
    }

    pub fn null(self, key: &str) -> Self {
        self.field(key, Value::Null)
    }

    pub fn without(self, key: &str) -> Self {
        let mut map = self.event.into_inner();
        map.remove(key);
        Self { event: RawEvent::from(map) }
    }

    pub fn build(self) -> RawEvent {
        self.event
    }
}

// ---------------------------------------------------------------------------
// Config helpers
// ---------------------------------------------------------------------------

/// Defaults with both dataset paths redirected into `dir`.
pub fn config_in(dir: &Path) -> Config {
    let mut config = Config::defaults();
    config.paths.raw = dir.join("data/raw_events.json");
    config.paths.clean = dir.join("data/clean_events.json");
    config
}

/// Defaults pointed at a fake catalog API.
pub fn config_for_api(dir: &Path, base_url: &str, limit: u32) -> Config {
    let mut config = config_in(dir);
    config.fetch.base_url = base_url.to_string();
    config.fetch.limit = limit;
    config.fetch.timeout_secs = 5;
    config
}

/// Build `n` distinct valid records.
pub fn build_corpus(n: usize) -> Vec<RawEvent> {
    (0..n)
        .map(|i| RawEventBuilder::valid(&format!("evt-{i}")).build())
        .collect()
}
