//! Mapping raw source records onto [`ClassEntry`].
//!
//! The student and teacher timetables come from different sources with
//! different field names. A [`FieldMap`] names the fields of one shape; any
//! [`RecordAdapter`] can be used where neither built-in map fits.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::clock::{ClockTime, TimeWindow};
use crate::day::normalize_day;
use crate::entry::{ClassEntry, PLACEHOLDER};
use crate::error::TimetableError;

/// Turns one raw record into a normalized entry.
pub trait RecordAdapter {
    fn adapt(&self, record: &Value) -> Result<ClassEntry, TimetableError>;
}

impl<F> RecordAdapter for F
where
    F: Fn(&Value) -> Result<ClassEntry, TimetableError>,
{
    fn adapt(&self, record: &Value) -> Result<ClassEntry, TimetableError> {
        self(record)
    }
}

/// Source field names for one record shape.
///
/// Split `start`/`end` fields win when both are present; otherwise the
/// combined `range` field is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    pub subject: String,
    pub venue: String,
    pub instructor: String,
    pub day: String,
    pub start: String,
    pub end: String,
    pub range: String,
}

impl FieldMap {
    /// Student timetable rows: `course_name`, `venue`, `teacher_name`.
    pub fn student() -> Self {
        Self {
            subject: "course_name".into(),
            venue: "venue".into(),
            instructor: "teacher_name".into(),
            day: "day".into(),
            start: "start_time".into(),
            end: "end_time".into(),
            range: "time".into(),
        }
    }

    /// Teacher timetable rows: `Subject`, `Location`, `program`.
    pub fn teacher() -> Self {
        Self {
            subject: "Subject".into(),
            venue: "Location".into(),
            instructor: "program".into(),
            day: "Day".into(),
            start: "StartTime".into(),
            end: "EndTime".into(),
            range: "Time".into(),
        }
    }

    fn window(&self, record: &Value) -> Result<TimeWindow, TimetableError> {
        if let (Some(start), Some(end)) = (text(record, &self.start), text(record, &self.end)) {
            return Ok(TimeWindow::new(
                ClockTime::parse(&start)?,
                ClockTime::parse(&end)?,
            ));
        }
        match text(record, &self.range) {
            Some(range) => TimeWindow::parse(&range),
            None => Err(TimetableError::record(format!(
                "missing time: expected '{}' and '{}', or '{}'",
                self.start, self.end, self.range
            ))),
        }
    }
}

impl RecordAdapter for FieldMap {
    fn adapt(&self, record: &Value) -> Result<ClassEntry, TimetableError> {
        if !record.is_object() {
            return Err(TimetableError::record(format!(
                "expected a class record object, found {}",
                kind_of(record)
            )));
        }

        let day = text(record, &self.day)
            .ok_or_else(|| TimetableError::record(format!("missing field '{}'", self.day)))?;
        let window = self.window(record)?;
        let or_placeholder =
            |field: &str| text(record, field).unwrap_or_else(|| PLACEHOLDER.to_string());

        Ok(ClassEntry {
            subject_name: or_placeholder(&self.subject),
            venue: or_placeholder(&self.venue),
            instructor_or_program: or_placeholder(&self.instructor),
            day: normalize_day(&day),
            start_time: window.start,
            end_time: window.end,
        })
    }
}

/// Which view a class list was fetched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Student,
    Teacher,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }

    pub fn field_map(self) -> FieldMap {
        match self {
            Self::Student => FieldMap::student(),
            Self::Teacher => FieldMap::teacher(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shape {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            other => Err(TimetableError::record(format!(
                "unknown shape '{other}', expected 'student' or 'teacher'"
            ))),
        }
    }
}

/// A record that was left out of the results, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Position in the source list.
    pub index: usize,
    pub reason: TimetableError,
}

impl Serialize for SkippedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("index", &self.index)?;
        map.serialize_entry("reason", &self.reason.to_string())?;
        map.end()
    }
}

/// The list of records in a fetched payload.
///
/// Accepts a bare array or an object wrapping it under `data`, the way
/// database clients return rows. Anything else has no records.
pub fn record_list(payload: &Value) -> Option<&[Value]> {
    match payload {
        Value::Array(items) => Some(items.as_slice()),
        Value::Object(obj) => obj.get("data").and_then(Value::as_array).map(Vec::as_slice),
        _ => None,
    }
}

/// Adapt every record, keeping the ones that normalize.
///
/// A missing or non-list payload yields nothing; a bad record never stops
/// the rest from being processed.
pub fn normalize_records<A>(
    payload: Option<&Value>,
    adapter: &A,
) -> (Vec<ClassEntry>, Vec<SkippedRecord>)
where
    A: RecordAdapter + ?Sized,
{
    let Some(records) = payload.and_then(record_list) else {
        if let Some(other) = payload.filter(|v| !v.is_null()) {
            log::debug!("ignoring class payload of type {}", kind_of(other));
        }
        return (Vec::new(), Vec::new());
    };

    let mut entries = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();
    for (index, record) in records.iter().enumerate() {
        match adapter.adapt(record) {
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                log::debug!("skipping class record {index}: {reason}");
                skipped.push(SkippedRecord { index, reason });
            }
        }
    }
    (entries, skipped)
}

/// Non-blank text of a field. Numbers and booleans are rendered as text.
fn text(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
