//! Canonicalizer — turns raw catalog records into deduplicated [`CanonicalEvent`]s.
//!
//! One [`Canonicalizer`] value is one run: it owns the set of dedup keys seen
//! so far and the per-run statistics. Records are processed strictly in input
//! order and either accepted or dropped; dropping is a normal outcome, not an
//! error.
//!
//! Per record:
//!
//! 1. normalize the editorial text fields that are present and non-empty;
//! 2. require `uid`, `title_fr` and at least one description;
//! 3. canonicalize the four temporal fields, requiring `firstdate_begin`;
//! 4. drop exact duplicates of an earlier record;
//! 5. synthesize the embedding text and assemble the fixed-schema record.

use crate::normalizer;
use crate::timestamp;
use crate::types::{is_truthy, CanonicalEvent, RawEvent};
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, info};

/// Editorial fields that may carry markup or stray line breaks.
pub const EDITORIAL_FIELDS: &[&str] = &[
    "title_fr",
    "description_fr",
    "longdescription_fr",
    "conditions_fr",
    "keywords_fr",
    "imagecredits",
    "location_imagecredits",
    "location_description_fr",
    "location_access_fr",
    "originagenda_title",
    "country_fr",
    "location_tags",
];

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("static regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));
static DOUBLE_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s*\.").expect("static regex"));

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Why a record was left out of the clean dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    MissingUid,
    MissingTitle,
    MissingDescription,
    MissingStartDate,
    Duplicate,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::MissingUid => write!(f, "missing uid"),
            DropReason::MissingTitle => write!(f, "missing title"),
            DropReason::MissingDescription => write!(f, "missing description"),
            DropReason::MissingStartDate => write!(f, "missing or invalid start date"),
            DropReason::Duplicate => write!(f, "duplicate"),
        }
    }
}

/// Result of feeding one record through the canonicalizer.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Accepted(CanonicalEvent),
    Dropped(DropReason),
}

impl Outcome {
    pub fn accepted(self) -> Option<CanonicalEvent> {
        match self {
            Outcome::Accepted(event) => Some(event),
            Outcome::Dropped(_) => None,
        }
    }
}

/// Per-run counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalizeStats {
    pub processed: usize,
    pub accepted: usize,
    pub missing_uid: usize,
    pub missing_title: usize,
    pub missing_description: usize,
    pub missing_start_date: usize,
    pub duplicates: usize,
}

impl CanonicalizeStats {
    pub fn dropped(&self) -> usize {
        self.processed - self.accepted
    }

    fn record(&mut self, outcome: &Outcome) {
        self.processed += 1;
        match outcome {
            Outcome::Accepted(_) => self.accepted += 1,
            Outcome::Dropped(DropReason::MissingUid) => self.missing_uid += 1,
            Outcome::Dropped(DropReason::MissingTitle) => self.missing_title += 1,
            Outcome::Dropped(DropReason::MissingDescription) => self.missing_description += 1,
            Outcome::Dropped(DropReason::MissingStartDate) => self.missing_start_date += 1,
            Outcome::Dropped(DropReason::Duplicate) => self.duplicates += 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Dedup key
// ---------------------------------------------------------------------------

/// Identity of an event for exact-duplicate detection.
///
/// Location fields keep the absent/present distinction of the raw record;
/// descriptions count a missing value as empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub uid: String,
    pub title: String,
    pub short_description: String,
    pub long_description: String,
    pub first_begin: String,
    pub first_end: Option<String>,
    pub last_begin: Option<String>,
    pub last_end: Option<String>,
    pub location_name: Option<String>,
    pub location_address: Option<String>,
    pub location_city: Option<String>,
}

// ---------------------------------------------------------------------------
// Canonicalizer
// ---------------------------------------------------------------------------

/// A single cleaning run.
#[derive(Debug, Default)]
pub struct Canonicalizer {
    seen: HashSet<DedupKey>,
    stats: CanonicalizeStats,
}

impl Canonicalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &CanonicalizeStats {
        &self.stats
    }

    /// Number of distinct events accepted so far.
    pub fn seen_keys(&self) -> usize {
        self.seen.len()
    }

    /// Canonicalize every record in order, keeping the accepted ones.
    pub fn run(&mut self, events: impl IntoIterator<Item = RawEvent>) -> Vec<CanonicalEvent> {
        let clean: Vec<_> = events
            .into_iter()
            .filter_map(|raw| self.process(raw).accepted())
            .collect();
        info!(
            processed = self.stats.processed,
            accepted = self.stats.accepted,
            duplicates = self.stats.duplicates,
            "canonicalization pass complete"
        );
        clean
    }

    /// Feed one record through the pipeline.
    pub fn process(&mut self, raw: RawEvent) -> Outcome {
        let outcome = self.evaluate(raw);
        if let Outcome::Dropped(reason) = &outcome {
            debug!(%reason, "dropping event");
        }
        self.stats.record(&outcome);
        outcome
    }

    fn evaluate(&mut self, mut raw: RawEvent) -> Outcome {
        normalize_editorial_fields(&mut raw);

        let Some(uid) = raw.non_empty_text("uid") else {
            return Outcome::Dropped(DropReason::MissingUid);
        };
        let Some(title) = raw.non_empty_text("title_fr") else {
            return Outcome::Dropped(DropReason::MissingTitle);
        };
        let short_description = raw.text("description_fr").unwrap_or_default();
        let long_description = raw.text("longdescription_fr").unwrap_or_default();
        if short_description.is_empty() && long_description.is_empty() {
            return Outcome::Dropped(DropReason::MissingDescription);
        }

        let date = |key: &str| timestamp::canonicalize(raw.get(key).and_then(Value::as_str));
        let first_end = date("firstdate_end");
        let last_begin = date("lastdate_begin");
        let last_end = date("lastdate_end");
        let Some(first_begin) = date("firstdate_begin") else {
            return Outcome::Dropped(DropReason::MissingStartDate);
        };

        let key = DedupKey {
            uid,
            title,
            short_description,
            long_description,
            first_begin,
            first_end,
            last_begin,
            last_end,
            location_name: raw.text("location_name"),
            location_address: raw.text("location_address"),
            location_city: raw.text("location_city"),
        };
        if self.seen.contains(&key) {
            return Outcome::Dropped(DropReason::Duplicate);
        }

        let event = assemble(&raw, &key);
        self.seen.insert(key);
        Outcome::Accepted(event)
    }
}

/// Canonicalize `events` with a fresh run state.
pub fn canonicalize_all(events: impl IntoIterator<Item = RawEvent>) -> Vec<CanonicalEvent> {
    Canonicalizer::new().run(events)
}

fn normalize_editorial_fields(raw: &mut RawEvent) {
    for field in EDITORIAL_FIELDS {
        if raw.get(field).is_some_and(is_truthy) {
            raw.update(field, normalizer::normalize_value);
        }
    }
}

// ---------------------------------------------------------------------------
// Embedding text
// ---------------------------------------------------------------------------

/// Build the single-line narrative used as embedding input.
pub fn embedding_text(key: &DedupKey) -> String {
    let narrative = format!(
        "Titre : {title}\n\
         Description : {short}\n\
         Détails : {long}\n\
         Lieu : {name}\n\
         Adresse : {address}\n\
         Date début : {begin}\n\
         Date fin : {end}",
        title = key.title,
        short = key.short_description,
        long = key.long_description,
        name = key.location_name.as_deref().unwrap_or_default(),
        address = key.location_address.as_deref().unwrap_or_default(),
        begin = key.first_begin,
        end = key.first_end.as_deref().unwrap_or_default(),
    );
    flatten_narrative(&narrative)
}

/// Line breaks become sentence breaks, whitespace is collapsed and the
/// `". ."` artifacts left behind by empty or period-terminated lines are
/// squeezed down to one period.
pub fn flatten_narrative(narrative: &str) -> String {
    let sentences = LINE_BREAKS.replace_all(narrative, ". ");
    let mut text = WHITESPACE.replace_all(&sentences, " ").trim().to_string();
    while DOUBLE_PERIOD.is_match(&text) {
        text = DOUBLE_PERIOD.replace_all(&text, ".").into_owned();
    }
    text
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

fn text_or_empty(raw: &RawEvent, key: &str) -> String {
    raw.text(key).unwrap_or_default()
}

fn value_or_empty(raw: &RawEvent, key: &str) -> Value {
    raw.get(key)
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}

/// Build the output record. This is the only place where missing values are
/// collapsed to empty strings.
fn assemble(raw: &RawEvent, key: &DedupKey) -> CanonicalEvent {
    CanonicalEvent {
        uid: key.uid.clone(),
        canonical_url: text_or_empty(raw, "canonicalurl"),
        title: key.title.clone(),
        short_description: key.short_description.clone(),
        long_description: key.long_description.clone(),
        conditions: text_or_empty(raw, "conditions_fr"),
        updated_at: text_or_empty(raw, "updatedat"),
        date_range: text_or_empty(raw, "daterange_fr"),
        first_begin: key.first_begin.clone(),
        first_end: key.first_end.clone().unwrap_or_default(),
        last_begin: key.last_begin.clone().unwrap_or_default(),
        last_end: key.last_end.clone().unwrap_or_default(),
        timings: value_or_empty(raw, "timings"),
        accessibility: value_or_empty(raw, "accessibility"),
        accessibility_localized: value_or_empty(raw, "accessibility_fr"),
        location_name: text_or_empty(raw, "location_name"),
        location_address: text_or_empty(raw, "location_address"),
        location_district: text_or_empty(raw, "location_district"),
        location_postal_code: text_or_empty(raw, "location_postalcode"),
        location_city: text_or_empty(raw, "location_city"),
        location_department: text_or_empty(raw, "location_department"),
        location_region: text_or_empty(raw, "location_region"),
        location_country_code: text_or_empty(raw, "location_countrycode"),
        location_phone: text_or_empty(raw, "location_phone"),
        location_website: text_or_empty(raw, "location_website"),
        location_access: text_or_empty(raw, "location_access_fr"),
        age_min: value_or_empty(raw, "age_min"),
        age_max: value_or_empty(raw, "age_max"),
        embedding_text: embedding_text(key),
    }
}
