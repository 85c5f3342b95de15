// src/records.rs
//! Raw posts as delivered by an event source and the canonical analytics rows
//! produced from them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::error::PipelineError;
use crate::registry::UNKNOWN;
use crate::topic::TopicDomain;

/// Creation time of a raw post: structured, or a timestamp-like string from a live feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTimestamp {
    At(NaiveDateTime),
    Text(String),
}

impl RawTimestamp {
    /// Resolve to a wall-clock timestamp, substituting `now` when the text cannot be parsed.
    pub fn resolve(&self, now: NaiveDateTime) -> NaiveDateTime {
        match self {
            Self::At(dt) => *dt,
            Self::Text(s) => parse_timestamp(s).unwrap_or(now),
        }
    }
}

/// Accepts RFC 3339 (wall clock kept in the given offset), ISO-8601 naive
/// date-times with `T` or space separator, and bare dates (midnight).
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// User-level metadata attached to a post. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserMeta {
    pub id: Option<String>,
    pub name: Option<String>,
    pub sex: Option<String>,
    pub age_group: Option<String>,
    pub location_raw: Option<String>,
}

/// An un-normalized post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub text: String,
    pub location: Option<String>,
    pub likes: Option<u64>,
    pub retweets: Option<u64>,
    pub created_at: RawTimestamp,
    pub user: Option<UserMeta>,
    /// Cinema metadata, trusted as delivered.
    pub movie: Option<String>,
    pub industry: Option<String>,
}

impl RawRecord {
    pub fn new(text: impl Into<String>, created_at: RawTimestamp) -> Self {
        Self {
            text: text.into(),
            location: None,
            likes: None,
            retweets: None,
            created_at,
            user: None,
            movie: None,
            industry: None,
        }
    }
}

/// Domain-specific columns of a canonical row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DomainFields {
    #[serde(rename_all = "PascalCase")]
    Travel {
        location: String,
        state: String,
        category: String,
    },
    #[serde(rename_all = "PascalCase")]
    Politics {
        party: String,
        politician: String,
        location: String,
        state: String,
    },
    #[serde(rename_all = "PascalCase")]
    Sports {
        sport: String,
        sports_person: String,
        location: String,
        state: String,
    },
    #[serde(rename_all = "PascalCase")]
    Cinema {
        movie: String,
        industry: String,
        location: String,
        state: String,
    },
}

impl DomainFields {
    pub fn domain(&self) -> TopicDomain {
        match self {
            Self::Travel { .. } => TopicDomain::Travel,
            Self::Politics { .. } => TopicDomain::Politics,
            Self::Sports { .. } => TopicDomain::Sports,
            Self::Cinema { .. } => TopicDomain::Cinema,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            Self::Travel { location, .. }
            | Self::Politics { location, .. }
            | Self::Sports { location, .. }
            | Self::Cinema { location, .. } => location,
        }
    }

    pub fn state(&self) -> &str {
        match self {
            Self::Travel { state, .. }
            | Self::Politics { state, .. }
            | Self::Sports { state, .. }
            | Self::Cinema { state, .. } => state,
        }
    }
}

/// Upper bound for `likes` and `retweets`; larger inputs are clamped so their
/// sum always fits in a `u64`.
pub const MAX_COUNT: u64 = u64::MAX / 2;

/// One normalized analytics row.
///
/// `likes`, `retweets` and `engagement` are only readable through accessors:
/// `engagement` is fixed to `likes + retweets` at construction. `hour` is taken
/// from a timestamp and is always within `0..=23`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CanonicalRecord {
    pub text: String,
    likes: u64,
    retweets: u64,
    engagement: u64,
    hour: u32,
    /// Reserved; always 0.0.
    pub sentiment: f64,
    pub sex: String,
    pub age_group: String,
    pub user_location_raw: String,
    #[serde(flatten)]
    pub fields: DomainFields,
}

impl CanonicalRecord {
    pub fn new(
        text: impl Into<String>,
        likes: u64,
        retweets: u64,
        created_at: NaiveDateTime,
        fields: DomainFields,
    ) -> Self {
        let likes = likes.min(MAX_COUNT);
        let retweets = retweets.min(MAX_COUNT);
        Self {
            text: text.into(),
            likes,
            retweets,
            engagement: likes + retweets,
            hour: created_at.hour(),
            sentiment: 0.0,
            sex: UNKNOWN.to_string(),
            age_group: UNKNOWN.to_string(),
            user_location_raw: UNKNOWN.to_string(),
            fields,
        }
    }

    pub fn with_demographics(
        mut self,
        sex: impl Into<String>,
        age_group: impl Into<String>,
        user_location_raw: impl Into<String>,
    ) -> Self {
        self.sex = sex.into();
        self.age_group = age_group.into();
        self.user_location_raw = user_location_raw.into();
        self
    }

    pub fn likes(&self) -> u64 {
        self.likes
    }

    pub fn retweets(&self) -> u64 {
        self.retweets
    }

    pub fn engagement(&self) -> u64 {
        self.engagement
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn domain(&self) -> TopicDomain {
        self.fields.domain()
    }
}

/// Ordered rows sharing one domain schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalTable {
    domain: TopicDomain,
    records: Vec<CanonicalRecord>,
}

impl CanonicalTable {
    pub fn empty(domain: TopicDomain) -> Self {
        Self {
            domain,
            records: Vec::new(),
        }
    }

    /// Build a table, rejecting any row whose schema belongs to another domain.
    pub fn from_records(
        domain: TopicDomain,
        records: Vec<CanonicalRecord>,
    ) -> Result<Self, PipelineError> {
        if let Some(bad) = records.iter().find(|r| r.domain() != domain) {
            return Err(PipelineError::SchemaMismatch {
                expected: domain,
                found: bad.domain(),
            });
        }
        Ok(Self { domain, records })
    }

    pub fn domain(&self) -> TopicDomain {
        self.domain
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<CanonicalRecord> {
        self.records
    }

    /// Keep rows whose hour lies in `start..=end`.
    pub fn retain_hours(&mut self, start: u32, end: u32) {
        self.records.retain(|r| (start..=end).contains(&r.hour));
    }
}

impl<'a> IntoIterator for &'a CanonicalTable {
    type Item = &'a CanonicalRecord;
    type IntoIter = std::slice::Iter<'a, CanonicalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
