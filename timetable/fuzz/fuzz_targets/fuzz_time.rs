#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(normalized) = timetable::normalize_time(data) {
        // Normalized output is a fixed point
        assert_eq!(timetable::normalize_time(&normalized).unwrap(), normalized);
    }
    if let Ok((start, end)) = timetable::split_range(data) {
        assert_eq!(start.to_string().len(), 5);
        assert_eq!(end.to_string().len(), 5);
    }
    let _ = timetable::normalize_day(data);
});
