// tests/pipeline_e2e.rs
//
// Library-level end-to-end checks: generate → normalize → resample.

use chrono::NaiveDate;

use social_trends_analyzer::records::RawTimestamp;
use social_trends_analyzer::{
    generate, normalize, resample, CanonicalTable, PipelineError, RawRecord, Registry, TopicDomain,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).expect("valid date")
}

#[test]
fn sports_day_has_one_row_per_hour_and_survives_resampling() {
    let reg = Registry::builtin();
    let raw = generate(&reg, TopicDomain::Sports, 24, Some(day(1)), Some(day(1))).expect("generate");
    assert_eq!(raw.len(), 24);

    let table = normalize(&reg, &raw, TopicDomain::Sports);
    let mut hours: Vec<u32> = table.iter().map(|r| r.hour()).collect();
    hours.sort_unstable();
    assert_eq!(hours, (0..24).collect::<Vec<_>>());

    let before = table.records().to_vec();
    let out = resample(table, 24, 42).expect("resample");
    assert_eq!(out.len(), 24);
    for row in out.iter() {
        assert!(before.contains(row), "row not from source: {row:?}");
    }
}

#[test]
fn every_domain_keeps_engagement_and_hour_invariants() {
    let reg = Registry::builtin();
    for domain in TopicDomain::ALL {
        let raw = generate(&reg, domain, 200, Some(day(1)), Some(day(3))).expect("generate");
        assert_eq!(raw.len(), 200, "{domain}");

        let table = normalize(&reg, &raw, domain);
        assert_eq!(table.domain(), domain);
        assert_eq!(table.len(), 200);
        for r in table.iter() {
            assert_eq!(r.engagement(), r.likes() + r.retweets());
            assert!(r.hour() <= 23);
            assert_eq!(r.domain(), domain);
        }
    }
}

#[test]
fn coverage_spans_multi_day_windows() {
    let reg = Registry::builtin();
    let raw = generate(&reg, TopicDomain::Travel, 72, Some(day(1)), Some(day(3))).expect("generate");
    let mut seen = std::collections::HashSet::new();
    for r in &raw {
        if let RawTimestamp::At(ts) = r.created_at {
            seen.insert((ts.date(), chrono::Timelike::hour(&ts)));
        }
    }
    assert_eq!(seen.len(), 72, "every hour bucket of the window is covered");
}

#[test]
fn empty_input_stays_empty() {
    let reg = Registry::builtin();
    let table = normalize(&reg, &[], TopicDomain::Travel);
    assert!(table.is_empty());
    assert_eq!(table.domain(), TopicDomain::Travel);

    let out = resample(table, 100_000, 42).expect("resample empty");
    assert!(out.is_empty());
    assert_eq!(out, CanonicalTable::empty(TopicDomain::Travel));
}

#[test]
fn upsampling_and_downsampling_hit_the_target() {
    let reg = Registry::builtin();
    let raw = generate(&reg, TopicDomain::Cinema, 50, Some(day(1)), Some(day(1))).expect("generate");
    let table = normalize(&reg, &raw, TopicDomain::Cinema);
    let source = table.records().to_vec();

    let up = resample(table.clone(), 1_000, 7).expect("upsample");
    assert_eq!(up.len(), 1_000);
    assert!(up.iter().all(|r| source.contains(r)));

    let down = resample(table.clone(), 10, 7).expect("downsample");
    assert_eq!(down.len(), 10);
    assert_eq!(down, resample(table, 10, 7).expect("same seed"));
}

#[test]
fn mangalore_resolves_before_unknown() {
    let reg = Registry::builtin();
    let mut raw = RawRecord::new(
        "Weekend plans",
        RawTimestamp::Text("2024-01-01T10:00:00".into()),
    );
    raw.location = Some("Mangalore, Karnataka".into());

    let table = normalize(&reg, &[raw], TopicDomain::Travel);
    let row = &table.records()[0];
    assert_eq!(row.fields.location(), "Mangalore");
    assert_eq!(row.fields.state(), "Karnataka");
    assert_eq!(row.hour(), 10);
}

#[test]
fn invalid_configuration_fails_fast() {
    let reg = Registry::builtin();
    assert_eq!(
        generate(&reg, TopicDomain::Politics, 0, Some(day(1)), Some(day(1))).unwrap_err(),
        PipelineError::InvalidTarget
    );
    assert!(matches!(
        generate(&reg, TopicDomain::Politics, 10, Some(day(3)), Some(day(1))),
        Err(PipelineError::InvalidDateRange { .. })
    ));
    assert!(matches!(
        "gardening".parse::<TopicDomain>(),
        Err(PipelineError::UnknownTopic(_))
    ));

    let table = normalize(&reg, &[], TopicDomain::Sports);
    assert_eq!(resample(table, 0, 42).unwrap_err(), PipelineError::InvalidTarget);
}
