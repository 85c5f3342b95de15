// src/insights.rs
//! Rule-based summaries over a canonical table, used by the dashboard and as the
//! fallback whenever no language model is wired in.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::records::{CanonicalRecord, CanonicalTable, DomainFields};
use crate::registry::{OTHER, UNKNOWN};
use crate::topic::TopicDomain;

pub const NO_DATA: &str = "No data available for analysis.";

/// Coarse health labels shown next to the dashboard metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsHealth {
    pub total_records: String,
    pub engagement: String,
    pub timerange: String,
}

/// Sum engagement per key, sorted by engagement (desc) then key (asc).
fn engagement_by<'a, F>(table: &'a CanonicalTable, key: F) -> Vec<(&'a str, u64)>
where
    F: Fn(&'a CanonicalRecord) -> &'a str,
{
    let mut acc: HashMap<&str, u64> = HashMap::new();
    for r in table {
        *acc.entry(key(r)).or_default() += r.engagement();
    }
    let mut out: Vec<(&str, u64)> = acc.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    out
}

/// Hour with the most engagement; ties go to the earliest hour.
fn peak_hour(table: &CanonicalTable) -> Option<u32> {
    let mut by_hour: BTreeMap<u32, u64> = BTreeMap::new();
    for r in table {
        *by_hour.entry(r.hour()).or_default() += r.engagement();
    }
    by_hour
        .into_iter()
        .fold(None, |best: Option<(u32, u64)>, (h, e)| match best {
            Some((_, be)) if be >= e => best,
            _ => Some((h, e)),
        })
        .map(|(h, _)| h)
}

fn distinct_known<'a, F>(table: &'a CanonicalTable, key: F) -> usize
where
    F: Fn(&'a CanonicalRecord) -> &'a str,
{
    table
        .iter()
        .map(key)
        .filter(|k| *k != OTHER && *k != UNKNOWN)
        .collect::<HashSet<_>>()
        .len()
}

fn party(r: &CanonicalRecord) -> &str {
    match &r.fields {
        DomainFields::Politics { party, .. } => party,
        _ => OTHER,
    }
}

fn politician(r: &CanonicalRecord) -> &str {
    match &r.fields {
        DomainFields::Politics { politician, .. } => politician,
        _ => OTHER,
    }
}

fn sport(r: &CanonicalRecord) -> &str {
    match &r.fields {
        DomainFields::Sports { sport, .. } => sport,
        _ => OTHER,
    }
}

fn movie(r: &CanonicalRecord) -> &str {
    match &r.fields {
        DomainFields::Cinema { movie, .. } => movie,
        _ => UNKNOWN,
    }
}

fn industry(r: &CanonicalRecord) -> &str {
    match &r.fields {
        DomainFields::Cinema { industry, .. } => industry,
        _ => OTHER,
    }
}

/// Short multi-paragraph summary of the table for its topic domain.
pub fn summarize(table: &CanonicalTable) -> String {
    if table.is_empty() {
        return NO_DATA.to_string();
    }
    let total = table.len();
    let mut lines = Vec::new();

    match table.domain() {
        TopicDomain::Travel => {
            if let Some((loc, eng)) = engagement_by(table, |r| r.fields.location()).first() {
                lines.push(format!(
                    "Top Trending Destination: {loc} is leading with {eng} total engagement."
                ));
            }
            if let Some((state, _)) = engagement_by(table, |r| r.fields.state()).first() {
                if *state != UNKNOWN {
                    lines.push(format!(
                        "Most Active State: {state} is seeing the most travel chatter."
                    ));
                }
            }
        }
        TopicDomain::Politics => {
            if let Some((p, eng)) = engagement_by(table, party).first() {
                lines.push(format!("Most Discussed Party: {p} with {eng} total engagement."));
            }
            if let Some((pol, eng)) = engagement_by(table, politician)
                .into_iter()
                .find(|(name, _)| *name != OTHER)
            {
                lines.push(format!(
                    "Most Mentioned Politician: {pol} is leading the conversation with {eng} engagement."
                ));
            }
        }
        TopicDomain::Sports => {
            let ranked = engagement_by(table, sport);
            if let Some((s, eng)) = ranked.first() {
                lines.push(format!("Most Discussed Sport: {s} with {eng} total engagement."));
            }
            if ranked.len() >= 3 {
                let top: Vec<&str> = ranked.iter().take(3).map(|(s, _)| *s).collect();
                lines.push(format!("Top 3 Sports: {}", top.join(", ")));
            }
        }
        TopicDomain::Cinema => {
            if let Some((m, eng)) = engagement_by(table, movie).first() {
                lines.push(format!("Most Discussed Movie: {m} with {eng} total engagement."));
            }
            if let Some((i, _)) = engagement_by(table, industry).first() {
                lines.push(format!("Leading Industry: {i} is drawing the most buzz."));
            }
        }
    }

    if let Some(h) = peak_hour(table) {
        lines.push(format!(
            "Peak Activity Time: the most buzz happened around {h}:00 hours."
        ));
    }

    lines.push(match table.domain() {
        TopicDomain::Travel => format!(
            "Diversity: tracking trends across {} locations with {total} posts analyzed.",
            distinct_known(table, |r| r.fields.location())
        ),
        TopicDomain::Politics => format!(
            "Political Landscape: tracking {} parties with {total} posts analyzed.",
            distinct_known(table, party)
        ),
        TopicDomain::Sports => format!(
            "Sports Coverage: tracking {} sports with {total} posts analyzed.",
            distinct_known(table, sport)
        ),
        TopicDomain::Cinema => format!(
            "Cinema Coverage: tracking {} movies across {} industries with {total} posts analyzed.",
            distinct_known(table, movie),
            distinct_known(table, industry)
        ),
    });

    lines.join("\n\n")
}

pub fn metric_health(table: &CanonicalTable) -> MetricsHealth {
    if table.is_empty() {
        return MetricsHealth {
            total_records: "No data".into(),
            engagement: "No engagement".into(),
            timerange: "No active range".into(),
        };
    }

    let n = table.len();
    let total: u64 = table.iter().map(|r| r.engagement()).sum();
    let mean = total as f64 / n as f64;
    let above = table
        .iter()
        .filter(|r| r.engagement() as f64 > mean)
        .count();

    let min_h = table.iter().map(|r| r.hour()).min().unwrap_or(0);
    let max_h = table.iter().map(|r| r.hour()).max().unwrap_or(0);

    MetricsHealth {
        total_records: if n > 1000 { "High volume" } else { "Needs more data" }.into(),
        engagement: if above * 2 >= n {
            "Above avg engagement"
        } else {
            "Below avg; check content"
        }
        .into(),
        timerange: if (min_h == 0 && max_h == 23) || max_h - min_h > 10 {
            "Good hourly coverage"
        } else {
            "Narrow hourly coverage"
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(hour: u32, likes: u64, party: &str, politician: &str) -> CanonicalRecord {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        CanonicalRecord::new(
            "x",
            likes,
            0,
            ts,
            DomainFields::Politics {
                party: party.into(),
                politician: politician.into(),
                location: "Mysore".into(),
                state: "Karnataka".into(),
            },
        )
    }

    fn table(rows: Vec<CanonicalRecord>) -> CanonicalTable {
        CanonicalTable::from_records(TopicDomain::Politics, rows).unwrap()
    }

    #[test]
    fn empty_table_has_no_insights() {
        let t = CanonicalTable::empty(TopicDomain::Travel);
        assert_eq!(summarize(&t), NO_DATA);
        assert_eq!(metric_health(&t).total_records, "No data");
    }

    #[test]
    fn politics_summary_names_leaders() {
        let t = table(vec![
            row(9, 100, "BJP", "Other"),
            row(9, 50, "Congress", "Siddaramaiah"),
            row(20, 40, "Congress", "Siddaramaiah"),
            row(3, 500, "Other", "Other"),
        ]);
        let s = summarize(&t);
        assert!(s.contains("Most Discussed Party: Other with 500"), "{s}");
        assert!(s.contains("Most Mentioned Politician: Siddaramaiah"), "{s}");
        assert!(s.contains("around 3:00"), "{s}");
        assert!(s.contains("tracking 2 parties with 4 posts"), "{s}");
    }

    #[test]
    fn peak_hour_ties_go_to_earliest() {
        let t = table(vec![row(14, 10, "BJP", "Other"), row(2, 10, "BJP", "Other")]);
        assert_eq!(peak_hour(&t), Some(2));
    }

    #[test]
    fn health_flags_narrow_ranges() {
        let t = table(vec![row(9, 10, "BJP", "Other"), row(12, 30, "JDS", "Other")]);
        let h = metric_health(&t);
        assert_eq!(h.total_records, "Needs more data");
        assert_eq!(h.timerange, "Narrow hourly coverage");
        assert_eq!(h.engagement, "Above avg engagement");
    }
}
