use age_engine::{countdown, diff, next_occurrence, parse_instant, AgeError, Duration6, Instant};
use proptest::prelude::*;

// 1900-01-01T00:00:00Z .. 2200-01-01T00:00:00Z, whole seconds.
const MIN_SECS: i64 = -2_208_988_800;
const MAX_SECS: i64 = 7_258_118_400;

fn instant_at(secs: i64) -> Instant {
    Instant::new(chrono::DateTime::from_timestamp(secs, 0).unwrap())
}

fn arb_instant() -> impl Strategy<Value = Instant> {
    (MIN_SECS..MAX_SECS).prop_map(instant_at)
}

fn arb_ordered_pair() -> impl Strategy<Value = (Instant, Instant)> {
    (MIN_SECS..MAX_SECS, MIN_SECS..MAX_SECS).prop_map(|(a, b)| {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        (instant_at(lo), instant_at(hi))
    })
}

fn arb_month_day() -> impl Strategy<Value = (u32, u32)> {
    (1u32..=12, 1u32..=31).prop_filter("day must exist in month", |(m, d)| {
        *d <= age_engine::days_in_month(2000, m - 1).unwrap()
    })
}

proptest! {
    #[test]
    fn diff_with_itself_is_zero(t in arb_instant()) {
        prop_assert_eq!(diff(&t, &t).unwrap(), Duration6::ZERO);
    }

    #[test]
    fn diff_backwards_clamps_to_zero((b, t) in arb_ordered_pair()) {
        prop_assume!(b != t);
        prop_assert_eq!(diff(&t, &b).unwrap(), Duration6::ZERO);
    }

    #[test]
    fn diff_units_stay_in_radix((b, t) in arb_ordered_pair()) {
        let d = diff(&b, &t).unwrap();
        prop_assert!(d.months <= 11);
        prop_assert!(d.days <= 30);
        prop_assert!(d.hours <= 23);
        prop_assert!(d.minutes <= 59);
        prop_assert!(d.seconds <= 59);
    }

    #[test]
    fn diff_reconstructs_target((b, t) in arb_ordered_pair()) {
        let d = diff(&b, &t).unwrap();
        prop_assert_eq!(d.add_to(&b), Some(t), "duration {:?}", d);
    }

    #[test]
    fn diff_is_monotonic_in_target((b, t) in arb_ordered_pair(), step in 0i64..86_400 * 400) {
        let later = Instant::new(t.as_datetime() + chrono::Duration::seconds(step));
        let d1 = diff(&b, &t).unwrap();
        let d2 = diff(&b, &later).unwrap();
        let key = |d: Duration6| (d.years, d.months, d.days, d.hours, d.minutes, d.seconds);
        prop_assert!(key(d2) >= key(d1), "{:?} then {:?}", d1, d2);
    }

    #[test]
    fn next_occurrence_is_not_before_from_and_within_a_cycle(
        from in arb_instant(),
        (month, day) in arb_month_day(),
    ) {
        let next = next_occurrence(month, day, &from).unwrap();
        prop_assert!(next >= from);
        let fields = next.fields();
        prop_assert_eq!(fields.month0 + 1, month);
        prop_assert_eq!(fields.day, day);
        prop_assert_eq!((fields.hour, fields.minute, fields.second), (0, 0, 0));
        prop_assert!(fields.year - from.fields().year <= 8);
    }

    #[test]
    fn countdown_lands_on_next_occurrence(from in arb_instant(), (month, day) in arb_month_day()) {
        let next = next_occurrence(month, day, &from).unwrap();
        let left = countdown(month, day, &from).unwrap();
        prop_assert_eq!(left.add_to(&from), Some(next));
    }

    #[test]
    fn garbage_never_parses(s in "[a-zA-Z ]{0,24}") {
        prop_assert!(matches!(parse_instant(&s), Err(AgeError::Parse(_))));
    }

    #[test]
    fn date_strings_round_trip(t in arb_instant()) {
        prop_assert_eq!(parse_instant(&t.to_rfc3339()).unwrap(), t);
    }
}

#[test]
fn month_length_regressions() {
    let d = diff(
        &parse_instant("2021-01-31T00:00:00Z").unwrap(),
        &parse_instant("2021-03-01T00:00:00Z").unwrap(),
    )
    .unwrap();
    assert_eq!((d.years, d.months, d.days, d.hours), (0, 1, 1, 0));

    let d = diff(
        &parse_instant("2020-02-01T00:00:00Z").unwrap(),
        &parse_instant("2020-03-01T00:00:00Z").unwrap(),
    )
    .unwrap();
    assert_eq!((d.years, d.months, d.days), (0, 1, 0));
}

#[test]
fn malformed_input_is_a_parse_error_not_a_zero_duration() {
    for input in ["", "   ", "garbage", "1993-02-30", "2021/01/01"] {
        assert!(
            matches!(parse_instant(input), Err(AgeError::Parse(_))),
            "{input:?} parsed"
        );
    }
}
