//! timetable: which classes are on now, and which are next.
//!
//! Takes a class list as fetched from a timetable source, normalizes its
//! loose day codes and time strings, and partitions it against a reference
//! instant into classes in session and classes still to come.
//!
//! # Examples
//!
//! ```
//! use timetable::{DaySelection, FieldMap, Timetable};
//!
//! let json = r#"[
//!     { "course_name": "Math", "day": "Mo", "time": "9:00 - 10:00" },
//!     { "course_name": "Physics", "day": "Mo", "start_time": "10:30", "end_time": "11:30" }
//! ]"#;
//! let timetable = Timetable::from_json(json, &FieldMap::student()).unwrap();
//!
//! // 2026-02-09 is a Monday.
//! let now: jiff::Zoned = "2026-02-09T09:30:00+00:00[UTC]".parse().unwrap();
//! let schedule = timetable.resolve_at(&now, DaySelection::Reference);
//! assert_eq!(schedule.current[0].subject_name, "Math");
//! assert_eq!(schedule.upcoming[0].subject_name, "Physics");
//! ```

pub mod adapter;
pub mod clock;
pub mod day;
pub mod display;
pub mod entry;
pub mod error;
pub mod resolve;
pub mod store;
mod timetable;

pub use adapter::{normalize_records, FieldMap, RecordAdapter, Shape, SkippedRecord};
pub use clock::{normalize_time, split_range, ClockTime, TimeWindow};
pub use day::{normalize_day, Weekday};
pub use entry::{ClassEntry, PLACEHOLDER};
pub use error::TimetableError;
pub use resolve::{
    current_classes, resolve, resolve_records, upcoming_classes, DaySelection, Moment, Resolution,
    ResolvedSchedule,
};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, Settings, Theme, TimetableCache};
pub use crate::timetable::Timetable;

/// Resolve raw records against the wall clock.
pub fn resolve_records_now<A>(
    payload: Option<&serde_json::Value>,
    adapter: &A,
    selection: DaySelection,
) -> Resolution
where
    A: RecordAdapter + ?Sized,
{
    resolve_records(payload, adapter, Moment::now(), selection)
}
