//! Static event corpora used across harnesses.
//!
//! The records mimic what the OpenAgenda catalog returns: French editorial
//! text, HTML in descriptions, mixed timestamp spellings, integers for age
//! bounds and the occasional `null`.

use agenda_prep::RawEvent;
use serde_json::{json, Value};

/// A mixed page of catalog records. After cleaning, exactly the uids in
/// [`SAMPLE_ACCEPTED_UIDS`] remain, in this order.
pub fn sample_raw_json() -> Value {
    json!([
        {
            "uid": "48213",
            "canonicalurl": "https://openagenda.com/events/fete-de-quartier",
            "title_fr": "<h2>Fête de quartier</h2>",
            "description_fr": "Musique,\ndanses et <b>repas partagé</b>",
            "longdescription_fr": "<p>Rendez-vous place des Fêtes.</p><p>Venez nombreux !</p>",
            "conditions_fr": "Gratuit",
            "keywords_fr": ["fête", "quartier"],
            "updatedat": "2025-05-20T09:12:44+00:00",
            "daterange_fr": "Samedi 14 juin, 14h00",
            "firstdate_begin": "2025-06-14T12:00:00Z",
            "firstdate_end": "2025-06-14T20:00:00Z",
            "lastdate_begin": "2025-06-14T12:00:00Z",
            "lastdate_end": "2025-06-14T20:00:00Z",
            "timings": "[{\"begin\": \"2025-06-14T14:00:00+02:00\"}]",
            "accessibility": null,
            "location_name": "Place des Fêtes",
            "location_address": "Place des Fêtes, 75019 Paris",
            "location_postalcode": "75019",
            "location_city": "Paris",
            "location_countrycode": "FR",
            "age_min": 0,
            "age_max": 99
        },
        {
            "uid": "48213",
            "canonicalurl": "https://openagenda.com/events/fete-de-quartier",
            "title_fr": "Fête de quartier",
            "description_fr": "Musique, danses et repas partagé",
            "longdescription_fr": "Rendez-vous place des Fêtes. Venez nombreux !",
            "firstdate_begin": "2025-06-14T12:00:00+00:00",
            "firstdate_end": "2025-06-14T20:00:00Z",
            "lastdate_begin": "2025-06-14T12:00:00Z",
            "lastdate_end": "2025-06-14T20:00:00Z",
            "location_name": "Place des Fêtes",
            "location_address": "Place des Fêtes, 75019 Paris",
            "location_city": "Paris"
        },
        {
            "uid": "50001",
            "title_fr": "",
            "description_fr": "Atelier sans titre",
            "firstdate_begin": "2025-07-01T10:00:00Z"
        },
        {
            "uid": "50002",
            "title_fr": "Lecture",
            "description_fr": null,
            "longdescription_fr": "",
            "firstdate_begin": "2025-07-02T10:00:00Z"
        },
        {
            "uid": "50003",
            "title_fr": "Projection",
            "description_fr": "Cinéma en plein air",
            "firstdate_begin": "bientôt"
        },
        {
            "uid": "50004",
            "title_fr": "Visite guidée",
            "longdescription_fr": "Découverte du <i>Paris</i> médiéval",
            "firstdate_begin": "2025-09-20T10:00:00+02:00",
            "firstdate_end": "not-a-date",
            "location_name": null,
            "location_city": "Paris",
            "age_min": 12
        },
        {
            "title_fr": "Sans identifiant",
            "description_fr": "x",
            "firstdate_begin": "2025-07-03T10:00:00Z"
        }
    ])
}

pub const SAMPLE_ACCEPTED_UIDS: &[&str] = &["48213", "50004"];

pub fn sample_raw_events() -> Vec<RawEvent> {
    serde_json::from_value(sample_raw_json()).expect("fixture is an array of objects")
}
