//! Basic timetable walkthrough: load, resolve, inspect a day.

use timetable::{DaySelection, FieldMap, Timetable, Weekday};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A student's week as the timetable service returns it
    let json = r#"[
        { "course_name": "Linear Algebra", "venue": "LT-3", "teacher_name": "Dr. Boateng", "day": "Mo", "time": "8:00 - 9:30" },
        { "course_name": "Mechanics", "venue": "Physics Lab", "teacher_name": "Prof. Lindqvist", "day": "Mo", "start_time": "10:00", "end_time": "12:00" },
        { "course_name": "Academic Writing", "day": "Mo", "time": "13:00-14:00" },
        { "course_name": "Statistics", "venue": "LT-1", "teacher_name": "Dr. Haddad", "day": "We", "time": "9:00 - 11:00" },
        { "course_name": "Lab Safety", "day": "Mo", "time": "whenever" }
    ]"#;
    let timetable = Timetable::from_json(json, &FieldMap::student())?;

    for skipped in timetable.skipped() {
        println!("skipped record {}: {}", skipped.index, skipped.reason);
    }

    // Resolve against a fixed Monday morning
    let now: jiff::Zoned = "2026-02-09T08:45:00+00:00[UTC]".parse()?;
    let schedule = timetable.resolve_at(&now, DaySelection::Reference);
    println!("\nAt {now}:\n{schedule}");

    if let (Some(next), Some(minutes)) = (schedule.next(), schedule.minutes_until_next(&now)) {
        println!("\n{} starts in {minutes} min", next.subject_name);
    }

    // Whole-day view for Wednesday
    println!("\nWednesday:");
    for class in timetable.for_day(Weekday::Wednesday) {
        println!("  {class}");
    }

    Ok(())
}
