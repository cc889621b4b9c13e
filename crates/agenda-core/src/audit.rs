//! Audit — sanity checks over a clean dataset.
//!
//! A clean dataset is expected to be non-empty, restricted to the fetched
//! city, and made only of events starting on or after the fetch window.

use crate::timestamp;
use crate::types::CanonicalEvent;
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub total: usize,
    /// Uids whose `location_city` differs from the expected city.
    pub wrong_city: Vec<String>,
    /// Uids whose `firstdate_begin` does not parse.
    pub invalid_start: Vec<String>,
    /// Uids starting before the minimum date.
    pub too_old: Vec<String>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.total > 0
            && self.wrong_city.is_empty()
            && self.invalid_start.is_empty()
            && self.too_old.is_empty()
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            return write!(f, "dataset is empty");
        }
        write!(
            f,
            "{} events audited: {} outside city, {} with invalid start date, {} too old",
            self.total,
            self.wrong_city.len(),
            self.invalid_start.len(),
            self.too_old.len()
        )
    }
}

pub fn audit(events: &[CanonicalEvent], city: &str, min_start: DateTime<Utc>) -> AuditReport {
    let mut report = AuditReport {
        total: events.len(),
        ..AuditReport::default()
    };

    for event in events {
        if event.location_city != city {
            report.wrong_city.push(event.uid.clone());
        }
        match timestamp::parse_iso8601(&event.first_begin) {
            Some(start) if start < min_start => report.too_old.push(event.uid.clone()),
            Some(_) => {}
            None => report.invalid_start.push(event.uid.clone()),
        }
    }
    report
}
