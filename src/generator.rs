// src/generator.rs
//! # Synthetic Post Generator
//!
//! Produces topic-tagged raw posts when no live source is configured.
//!
//! Two passes over the requested window:
//! 1. coverage: every hour bucket receives `max(1, target / total_hours)` posts,
//!    timestamped uniformly inside that hour;
//! 2. fill: remaining posts are spread uniformly across the whole window.
//!
//! The result always holds exactly `target` posts. [`generate`] draws from the
//! thread RNG on purpose so every call yields fresh content; tests drive
//! [`generate_with`] with a seeded RNG.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::PipelineError;
use crate::records::{RawRecord, RawTimestamp, UserMeta};
use crate::registry::{
    EntityTemplates, Registry, SynthProfile, AGE_GROUPS, NAME_PLACEHOLDER, SEXES, UNKNOWN,
};
use crate::topic::TopicDomain;

/// Probability that a synthetic politics post is about a party rather than a politician.
const PARTY_SHARE: f64 = 0.6;

/// Resolved generation window, `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl SynthWindow {
    /// `from` defaults to today, `to` to `now`. A given `to` date extends to its last microsecond.
    pub fn resolve(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        now: NaiveDateTime,
    ) -> Result<Self, PipelineError> {
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(PipelineError::InvalidDateRange { from: f, to: t });
            }
        }
        let start = from.unwrap_or(now.date()).and_time(NaiveTime::MIN);
        let end = match to {
            Some(d) => d.and_time(NaiveTime::MIN) + TimeDelta::days(1) - TimeDelta::microseconds(1),
            None => now,
        };
        if start > end {
            return Err(PipelineError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Number of hour buckets, counting a trailing partial hour.
    pub fn total_hours(&self) -> usize {
        ((self.end - self.start).num_seconds() / 3600 + 1) as usize
    }

    /// Start of the `h`-th hour bucket.
    pub fn bucket(&self, h: usize) -> NaiveDateTime {
        self.start + TimeDelta::hours(h as i64)
    }

    fn random_instant<R: Rng + ?Sized>(&self, rng: &mut R) -> NaiveDateTime {
        let span_ms = (self.end - self.start).num_milliseconds();
        self.start + TimeDelta::milliseconds(rng.random_range(0..=span_ms))
    }
}

/// Generate exactly `target` raw posts for `domain` over `[from, to]`.
pub fn generate(
    registry: &Registry,
    domain: TopicDomain,
    target: usize,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<RawRecord>, PipelineError> {
    let now = Local::now().naive_local();
    let window = SynthWindow::resolve(from, to, now)?;
    generate_with(&mut rand::rng(), registry, domain, target, &window)
}

pub fn generate_with<R: Rng + ?Sized>(
    rng: &mut R,
    registry: &Registry,
    domain: TopicDomain,
    target: usize,
    window: &SynthWindow,
) -> Result<Vec<RawRecord>, PipelineError> {
    if target == 0 {
        return Err(PipelineError::InvalidTarget);
    }
    let total_hours = window.total_hours();
    let mut out = Vec::with_capacity(target);

    if target >= total_hours {
        let per_hour = (target / total_hours).max(1);
        for h in 0..total_hours {
            let bucket = window.bucket(h);
            for _ in 0..per_hour {
                let ts = bucket + TimeDelta::seconds(rng.random_range(0..3600));
                out.push(synth_post(rng, registry, domain, ts));
            }
        }
    } else {
        // Fewer posts than hours: one post in each of `target` evenly spaced buckets.
        for i in 0..target {
            let bucket = window.bucket(i * total_hours / target);
            let ts = bucket + TimeDelta::seconds(rng.random_range(0..3600));
            out.push(synth_post(rng, registry, domain, ts));
        }
    }

    while out.len() < target {
        let ts = window.random_instant(rng);
        out.push(synth_post(rng, registry, domain, ts));
    }

    Ok(out)
}

fn synth_post<R: Rng + ?Sized>(
    rng: &mut R,
    registry: &Registry,
    domain: TopicDomain,
    ts: NaiveDateTime,
) -> RawRecord {
    let mut movie = None;
    let mut industry = None;

    let (text, location) = match domain {
        TopicDomain::Travel => {
            let (name, text) = render_entity(rng, &registry.travel_templates);
            (text, name.to_string())
        }
        TopicDomain::Politics => {
            let loc = random_travel_location(rng, registry);
            let pool = if rng.random_bool(PARTY_SHARE) {
                &registry.party_templates
            } else {
                &registry.politician_templates
            };
            (render_entity(rng, pool).1, loc)
        }
        TopicDomain::Sports => {
            let loc = random_travel_location(rng, registry);
            (render_entity(rng, &registry.sport_templates).1, loc)
        }
        TopicDomain::Cinema => match registry.movies.choose(rng) {
            Some(m) => {
                let loc = pick(rng, &m.locations).to_string();
                let template = pick(rng, &registry.cinema_templates);
                let text = template
                    .replace("{movie}", &m.title)
                    .replace("{loc}", &loc)
                    .replace("{industry}", &m.industry.to_lowercase());
                movie = Some(m.title.clone());
                industry = Some(m.industry.clone());
                (text, loc)
            }
            None => (String::new(), UNKNOWN.to_string()),
        },
    };

    let profile = registry.profile(domain);
    let (likes, retweets) = engagement(rng, profile);
    let user = synth_user(rng, profile, &location);

    RawRecord {
        text,
        location: Some(location),
        likes: Some(likes),
        retweets: Some(retweets),
        created_at: RawTimestamp::At(ts),
        user: Some(user),
        movie,
        industry,
    }
}

/// Pick an entity and one of its templates; returns `(entity name, rendered text)`.
fn render_entity<'a, R: Rng + ?Sized>(
    rng: &mut R,
    pool: &'a [EntityTemplates],
) -> (&'a str, String) {
    match pool.choose(rng) {
        Some(entity) => {
            let template = pick(rng, &entity.templates);
            (entity.name.as_str(), template.replace(NAME_PLACEHOLDER, &entity.name))
        }
        None => (UNKNOWN, String::new()),
    }
}

fn random_travel_location<R: Rng + ?Sized>(rng: &mut R, registry: &Registry) -> String {
    registry
        .travel_templates
        .choose(rng)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &'a [String]) -> &'a str {
    items.choose(rng).map(String::as_str).unwrap_or(UNKNOWN)
}

fn engagement<R: Rng + ?Sized>(rng: &mut R, p: &SynthProfile) -> (u64, u64) {
    let base = rng.random_range(p.likes.0..=p.likes.1) as f64;
    let likes = (base * rng.random_range(p.jitter.0..p.jitter.1)) as u64;
    let retweets =
        (likes as f64 * rng.random_range(p.retweet_fraction.0..p.retweet_fraction.1)) as u64;
    (likes, retweets)
}

fn weighted<'a, R: Rng + ?Sized>(rng: &mut R, options: &[&'a str], weights: &[u32]) -> &'a str {
    let pairs: Vec<(&'a str, u32)> = options
        .iter()
        .copied()
        .zip(weights.iter().copied())
        .collect();
    pairs
        .choose_weighted(rng, |(_, w)| *w)
        .map(|(v, _)| *v)
        .unwrap_or(UNKNOWN)
}

fn synth_user<R: Rng + ?Sized>(rng: &mut R, p: &SynthProfile, location: &str) -> UserMeta {
    let id = format!("u{}", rng.random_range(1..=500_000u32));
    UserMeta {
        name: Some(format!("{} {}", p.user_label, id)),
        id: Some(id),
        sex: Some(weighted(rng, &SEXES, &p.sex_weights).to_string()),
        age_group: Some(weighted(rng, &AGE_GROUPS, &p.age_weights).to_string()),
        location_raw: Some(format!("{location}, India")),
    }
}
