use serde::{Deserialize, Serialize};

use crate::clock::{ClockTime, TimeWindow};
use crate::day::{parse_weekday, Weekday};

/// Shown for optional fields the source left empty.
pub const PLACEHOLDER: &str = "TBA";

/// One scheduled session, normalized.
///
/// `start_time` and `end_time` always render as zero-padded `HH:MM`; `day` is
/// a canonical weekday name, or the source's code when it was not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    pub subject_name: String,
    pub venue: String,
    pub instructor_or_program: String,
    pub day: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

impl ClassEntry {
    /// Create an entry with placeholder venue and instructor.
    pub fn new(subject_name: impl Into<String>, day: Weekday, window: TimeWindow) -> Self {
        Self {
            subject_name: subject_name.into(),
            venue: PLACEHOLDER.to_string(),
            instructor_or_program: PLACEHOLDER.to_string(),
            day: day.as_str().to_string(),
            start_time: window.start,
            end_time: window.end,
        }
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }

    pub fn with_instructor(mut self, instructor_or_program: impl Into<String>) -> Self {
        self.instructor_or_program = instructor_or_program.into();
        self
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time)
    }

    /// The entry's weekday, if its day is a recognized name.
    pub fn weekday(&self) -> Option<Weekday> {
        parse_weekday(&self.day)
    }

    /// True only when `day` is exactly the canonical name of `weekday`.
    pub fn is_on(&self, weekday: Weekday) -> bool {
        self.day == weekday.as_str()
    }

    pub fn is_current_at(&self, time: ClockTime) -> bool {
        self.window().contains(time)
    }

    pub fn is_upcoming_at(&self, time: ClockTime) -> bool {
        self.window().starts_after(time)
    }
}
