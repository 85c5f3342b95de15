// src/classify.rs
//! # Classification & Normalization
//!
//! Maps raw posts into canonical rows for one topic domain. Pure and
//! order-preserving: every raw post yields exactly one row. Missing optional
//! data degrades to `"Unknown"` / `"Other"`, and an unparsable timestamp falls
//! back to the current time.

use chrono::{Local, NaiveDateTime};

use crate::records::{CanonicalRecord, CanonicalTable, DomainFields, RawRecord};
use crate::registry::{first_mention, Registry, OTHER, UNKNOWN};
use crate::topic::TopicDomain;

/// Normalize a batch. Empty input yields an empty table.
pub fn normalize(registry: &Registry, raw: &[RawRecord], domain: TopicDomain) -> CanonicalTable {
    normalize_at(registry, raw, domain, Local::now().naive_local())
}

/// Same as [`normalize`] with an explicit fallback instant for unparsable timestamps.
pub fn normalize_at(
    registry: &Registry,
    raw: &[RawRecord],
    domain: TopicDomain,
    now: NaiveDateTime,
) -> CanonicalTable {
    let rows: Vec<CanonicalRecord> = raw
        .iter()
        .map(|r| normalize_record(registry, r, domain, now))
        .collect();

    // Every row was built for `domain`, so the schema check cannot fail.
    CanonicalTable::from_records(domain, rows).unwrap_or_else(|_| CanonicalTable::empty(domain))
}

pub fn normalize_record(
    registry: &Registry,
    raw: &RawRecord,
    domain: TopicDomain,
    now: NaiveDateTime,
) -> CanonicalRecord {
    let location_raw = raw.location.as_deref().unwrap_or(UNKNOWN);
    let (location, state) = registry.resolve_location(location_raw);

    let fields = match domain {
        TopicDomain::Travel => DomainFields::Travel {
            category: registry.category_for(&location).to_string(),
            location,
            state,
        },
        TopicDomain::Politics => DomainFields::Politics {
            party: first_mention(&registry.parties, &raw.text),
            politician: first_mention(&registry.politicians, &raw.text),
            location,
            state,
        },
        TopicDomain::Sports => DomainFields::Sports {
            sport: first_mention(&registry.sports, &raw.text),
            sports_person: first_mention(&registry.sports_persons, &raw.text),
            location,
            state,
        },
        TopicDomain::Cinema => DomainFields::Cinema {
            movie: raw.movie.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            industry: raw
                .industry
                .as_deref()
                .filter(|i| registry.is_known_industry(i))
                .unwrap_or(OTHER)
                .to_string(),
            location,
            state,
        },
    };

    let user = raw.user.as_ref();
    let sex = user.and_then(|u| u.sex.as_deref()).unwrap_or(UNKNOWN);
    let age_group = user.and_then(|u| u.age_group.as_deref()).unwrap_or(UNKNOWN);
    let user_location = user
        .and_then(|u| u.location_raw.as_deref())
        .or(raw.location.as_deref())
        .unwrap_or(UNKNOWN);

    CanonicalRecord::new(
        raw.text.clone(),
        raw.likes.unwrap_or(0),
        raw.retweets.unwrap_or(0),
        raw.created_at.resolve(now),
        fields,
    )
    .with_demographics(sex, age_group, user_location)
}
