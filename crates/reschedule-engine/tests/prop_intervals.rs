//! Property-based tests for interval math and time normalization.
//!
//! These verify invariants that should hold for *any* well-formed session, not
//! just the specific scenarios in the other test files.

use chrono::{NaiveDate, NaiveTime};
use proptest::prelude::*;
use reschedule_engine::{
    can_keep_duration, compatible_spans, detect_format, duration_minutes, fits_within, overlaps,
    to_absolute, to_storage_format, FreeSpan, Interval, RescheduleTarget, Session, SessionTime,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A calendar date in 2025-2027. Day is capped at 28 to avoid invalid dates.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2025i32..=2027, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Minute of day in 00:00..=23:59.
fn arb_minute() -> impl Strategy<Value = u32> {
    0u32..(24 * 60)
}

/// An ordered (start, end) pair of minutes with start < end.
fn arb_span_minutes() -> impl Strategy<Value = (u32, u32)> {
    (0u32..(24 * 60 - 1)).prop_flat_map(|start| (Just(start), (start + 1)..(24 * 60)))
}

fn time_of(minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap()
}

fn hhmmss(minute: u32) -> String {
    format!("{:02}:{:02}:00", minute / 60, minute % 60)
}

fn session(id: &str, date: NaiveDate, (start, end): (u32, u32)) -> Session {
    Session::new(
        id,
        date,
        SessionTime::time_only(time_of(start)),
        SessionTime::time_only(time_of(end)),
        "r1",
        "Room 1",
    )
    .unwrap()
}

fn interval(date: NaiveDate, (start, end): (u32, u32)) -> Interval {
    Interval::new(date.and_time(time_of(start)), date.and_time(time_of(end)))
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: A session always fits a span equal to its own interval
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn session_fits_its_own_interval(date in arb_date(), span in arb_span_minutes()) {
        let (s, e) = (hhmmss(span.0), hhmmss(span.1));
        prop_assert!(fits_within(&s, &e, &s, &e, date).unwrap());

        let moved = session("s", date, span);
        let free = FreeSpan::new(time_of(span.0), time_of(span.1)).unwrap();
        let target = RescheduleTarget::same_room(&moved, date);
        prop_assert!(can_keep_duration(&moved, &target, &[free], &[]).is_keep());
    }
}

// ---------------------------------------------------------------------------
// Property 2: Duration is antisymmetric and positive when end follows start
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn duration_is_antisymmetric(date in arb_date(), a in arb_minute(), b in arb_minute()) {
        let forward = duration_minutes(&hhmmss(a), &hhmmss(b), date).unwrap();
        let backward = duration_minutes(&hhmmss(b), &hhmmss(a), date).unwrap();
        prop_assert_eq!(forward, -backward);
        prop_assert_eq!(forward, i64::from(b) - i64::from(a));
    }

    #[test]
    fn duration_positive_for_ordered_pairs(date in arb_date(), span in arb_span_minutes()) {
        prop_assert!(duration_minutes(&hhmmss(span.0), &hhmmss(span.1), date).unwrap() > 0);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Overlap is symmetric; adjacency is never overlap
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn overlap_is_symmetric(date in arb_date(), a in arb_span_minutes(), b in arb_span_minutes()) {
        let (ia, ib) = (interval(date, a), interval(date, b));
        prop_assert_eq!(overlaps(&ia, &ib), overlaps(&ib, &ia));
        prop_assert_eq!(ia.overlap_minutes(&ib), ib.overlap_minutes(&ia));
        prop_assert_eq!(overlaps(&ia, &ib), ia.overlap_minutes(&ib) > 0);
    }

    #[test]
    fn adjacent_never_overlap(date in arb_date(), span in arb_span_minutes(), extra in 1u32..120) {
        let end = (span.1 + extra).min(24 * 60 - 1);
        prop_assume!(end > span.1);
        let first = interval(date, span);
        let second = interval(date, (span.1, end));
        prop_assert!(!overlaps(&first, &second));
        prop_assert!(!overlaps(&second, &first));
    }
}

// ---------------------------------------------------------------------------
// Property 4: Storage format round trip
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn time_only_round_trips(date in arb_date(), minute in arb_minute(), second in 0u32..60) {
        let value = format!("{:02}:{:02}:{:02}", minute / 60, minute % 60, second);
        let format = detect_format(&value).unwrap();
        prop_assert_eq!(to_storage_format(to_absolute(date, &value).unwrap(), format), value);
    }

    #[test]
    fn minute_precision_time_only_round_trips(date in arb_date(), minute in arb_minute()) {
        let value = format!("{:02}:{:02}", minute / 60, minute % 60);
        let format = detect_format(&value).unwrap();
        prop_assert_eq!(to_storage_format(to_absolute(date, &value).unwrap(), format), value);
    }

    #[test]
    fn iso_round_trips(
        date in arb_date(),
        minute in arb_minute(),
        suffix in prop_oneof![Just(""), Just("Z"), Just("+02:00"), Just("-05:30")],
    ) {
        let value = format!("{}T{}{}", date.format("%Y-%m-%d"), hhmmss(minute), suffix);
        let format = detect_format(&value).unwrap();
        prop_assert_eq!(to_storage_format(to_absolute(date, &value).unwrap(), format), value);
    }
}

// ---------------------------------------------------------------------------
// Property 5: compatible_spans only returns spans at least as long as the session
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn compatible_spans_are_long_enough(
        date in arb_date(),
        own in arb_span_minutes(),
        spans in prop::collection::vec(arb_span_minutes(), 0..8),
    ) {
        let s = session("s", date, own);
        let free: Vec<FreeSpan> = spans
            .iter()
            .map(|&(a, b)| FreeSpan::new(time_of(a), time_of(b)).unwrap())
            .collect();
        let result = compatible_spans(&s, &free);
        prop_assert!(result.iter().all(|f| f.duration_minutes() >= s.duration_minutes()));
        let expected = free
            .iter()
            .filter(|f| f.duration_minutes() >= s.duration_minutes())
            .count();
        prop_assert_eq!(result.len(), expected);
    }
}
