#![no_main]
use libfuzzer_sys::fuzz_target;
use timetable::{resolve_records, DaySelection, FieldMap, Moment};

fuzz_target!(|data: (&str, u8, u8)| {
    let (json, weekday, minute) = data;
    let Ok(payload) = serde_json::from_str::<serde_json::Value>(json) else {
        return;
    };
    let now = Moment::new(
        timetable::Weekday::ALL[weekday as usize % 7],
        timetable::ClockTime::new((minute / 10) % 24, minute % 60).unwrap(),
    );
    for map in [FieldMap::student(), FieldMap::teacher()] {
        let r = resolve_records(Some(&payload), &map, now, DaySelection::Reference);
        for e in &r.schedule.upcoming {
            assert!(e.start_time > now.time);
        }
    }
});
