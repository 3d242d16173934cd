use proptest::prelude::*;
use serde_json::{json, Value};
use timetable::{resolve_records, DaySelection, FieldMap, Moment, Resolution, Weekday};

/// A time token the way sources write them: "9:05" or "09:05".
fn arb_time_token() -> impl Strategy<Value = (u8, u8, String)> {
    (0u8..24, 0u8..60, any::<bool>()).prop_map(|(h, m, pad)| {
        let token = if pad {
            format!("{h:02}:{m:02}")
        } else {
            format!("{h}:{m:02}")
        };
        (h, m, token)
    })
}

fn arb_day_code() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("Mo"),
        Just("Tu"),
        Just("We"),
        Just("Th"),
        Just("Fr"),
        Just("Monday"),
        Just("Wednesday"),
        Just("Mon"),
    ]
}

/// A student-shape record, sometimes with a combined range, sometimes split,
/// and occasionally garbage.
fn arb_record() -> impl Strategy<Value = Value> {
    (
        "[A-Z][a-z]{2,8}",
        arb_day_code(),
        arb_time_token(),
        arb_time_token(),
        0u8..4,
    )
        .prop_map(|(subject, day, (_, _, start), (_, _, end), style)| match style {
            0 => json!({ "course_name": subject, "day": day, "time": format!("{start} - {end}") }),
            1 => json!({ "course_name": subject, "day": day, "time": format!("{start}-{end}") }),
            2 => json!({
                "course_name": subject,
                "day": day,
                "start_time": start,
                "end_time": end,
            }),
            _ => json!({ "course_name": subject, "day": day, "time": "sometime" }),
        })
}

fn arb_moment() -> impl Strategy<Value = Moment> {
    (0usize..7, 0u8..24, 0u8..60).prop_map(|(d, h, m)| {
        Moment::new(
            Weekday::ALL[d],
            timetable::ClockTime::new(h, m).unwrap(),
        )
    })
}

fn arb_records() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(arb_record(), 0..12)
}

fn resolve_student(records: Vec<Value>, now: Moment, selection: DaySelection) -> Resolution {
    resolve_records(Some(&Value::Array(records)), &FieldMap::student(), now, selection)
}

fn is_hh_mm(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 5
        && b[0].is_ascii_digit()
        && b[1].is_ascii_digit()
        && b[2] == b':'
        && b[3].is_ascii_digit()
        && b[4].is_ascii_digit()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any accepted time token renders as zero-padded HH:MM with the same value.
    #[test]
    fn normalized_times_are_padded((h, m, token) in arb_time_token()) {
        let normalized = timetable::normalize_time(&token).unwrap();
        prop_assert!(is_hh_mm(&normalized), "'{}' -> '{}'", token, normalized);
        prop_assert_eq!(normalized, format!("{h:02}:{m:02}"));
    }

    /// Normalized entries always serialize their times as HH:MM.
    #[test]
    fn entries_expose_hh_mm(records in arb_records(), now in arb_moment()) {
        let r = resolve_student(records, now, DaySelection::Reference);
        for e in r.schedule.current.iter().chain(&r.schedule.upcoming) {
            prop_assert!(is_hh_mm(&e.start_time.to_string()));
            prop_assert!(is_hh_mm(&e.end_time.to_string()));
        }
    }

    /// No class is both current and upcoming.
    #[test]
    fn current_and_upcoming_disjoint(
        records in arb_records(),
        now in arb_moment(),
        preselected in any::<bool>(),
    ) {
        let selection = if preselected {
            DaySelection::Preselected
        } else {
            DaySelection::Reference
        };
        let r = resolve_student(records, now, selection);
        for e in &r.schedule.current {
            prop_assert!(e.start_time <= now.time && now.time < e.end_time);
            prop_assert!(!r.schedule.upcoming.contains(e), "{} is current and upcoming", e);
        }
        for e in &r.schedule.upcoming {
            prop_assert!(e.start_time > now.time);
        }
    }

    /// Upcoming is non-decreasing by start time.
    #[test]
    fn upcoming_is_sorted(records in arb_records(), now in arb_moment()) {
        let r = resolve_student(records, now, DaySelection::Preselected);
        for pair in r.schedule.upcoming.windows(2) {
            prop_assert!(pair[0].start_time.to_string() <= pair[1].start_time.to_string());
        }
    }

    /// Same inputs, same output.
    #[test]
    fn resolution_is_idempotent(records in arb_records(), now in arb_moment()) {
        let first = resolve_student(records.clone(), now, DaySelection::Reference);
        let second = resolve_student(records, now, DaySelection::Reference);
        prop_assert_eq!(first, second);
    }

    /// Every record is either kept or reported as skipped.
    #[test]
    fn every_record_accounted_for(records in arb_records()) {
        let payload = Value::Array(records.clone());
        let tt = timetable::Timetable::from_records(Some(&payload), &FieldMap::student());
        prop_assert_eq!(tt.entries().len() + tt.skipped().len(), records.len());
    }
}
