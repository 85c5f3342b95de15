// src/resample.rs
//! Fixed-size resampling so downstream consumers always see the same row count.
//!
//! Downsampling draws without replacement, upsampling with replacement. Both use
//! a call-local RNG seeded from `seed`, so the same input and seed give the same
//! output. Only marginal frequencies are preserved in expectation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::PipelineError;
use crate::records::CanonicalTable;

pub const DEFAULT_TARGET_ROWS: usize = 100_000;
pub const DEFAULT_SEED: u64 = 42;

/// Resize `table` to exactly `target` rows. An empty table is returned unchanged.
pub fn resample(
    table: CanonicalTable,
    target: usize,
    seed: u64,
) -> Result<CanonicalTable, PipelineError> {
    if target == 0 {
        return Err(PipelineError::InvalidTarget);
    }
    let n = table.len();
    if n == 0 || n == target {
        return Ok(table);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let rows = table.records();
    let picked: Vec<_> = if n > target {
        rand::seq::index::sample(&mut rng, n, target)
            .into_iter()
            .map(|i| rows[i].clone())
            .collect()
    } else {
        (0..target)
            .map(|_| rows[rng.random_range(0..n)].clone())
            .collect()
    };

    CanonicalTable::from_records(table.domain(), picked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{CanonicalRecord, DomainFields};
    use crate::topic::TopicDomain;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn table(n: usize) -> CanonicalTable {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let rows = (0..n)
            .map(|i| {
                CanonicalRecord::new(
                    format!("post {i}"),
                    i as u64,
                    1,
                    base + chrono::TimeDelta::hours((i % 24) as i64),
                    DomainFields::Sports {
                        sport: "Chess".into(),
                        sports_person: "Other".into(),
                        location: "Pune".into(),
                        state: "Maharashtra".into(),
                    },
                )
            })
            .collect();
        CanonicalTable::from_records(TopicDomain::Sports, rows).unwrap()
    }

    #[test]
    fn downsample_without_replacement() {
        let out = resample(table(500), 120, DEFAULT_SEED).unwrap();
        assert_eq!(out.len(), 120);
        let distinct: HashSet<&str> = out.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(distinct.len(), 120);
    }

    #[test]
    fn upsample_rows_come_from_source() {
        let src = table(7);
        let out = resample(src.clone(), 100, DEFAULT_SEED).unwrap();
        assert_eq!(out.len(), 100);
        for r in &out {
            assert!(src.records().contains(r));
        }
    }

    #[test]
    fn same_seed_same_sample() {
        let a = resample(table(300), 50, 42).unwrap();
        let b = resample(table(300), 50, 42).unwrap();
        assert_eq!(a, b);
        let c = resample(table(3), 50, 42).unwrap();
        let d = resample(table(3), 50, 42).unwrap();
        assert_eq!(c, d);
    }

    #[test]
    fn equal_size_and_empty_are_unchanged() {
        let t = table(24);
        assert_eq!(resample(t.clone(), 24, 1).unwrap(), t);
        let empty = CanonicalTable::empty(TopicDomain::Travel);
        assert_eq!(resample(empty.clone(), DEFAULT_TARGET_ROWS, DEFAULT_SEED).unwrap(), empty);
    }

    #[test]
    fn zero_target_is_rejected() {
        assert_eq!(resample(table(3), 0, 1), Err(PipelineError::InvalidTarget));
    }
}
