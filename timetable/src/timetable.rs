use std::collections::BTreeMap;

use jiff::Zoned;
use serde_json::Value;

use crate::adapter::{normalize_records, RecordAdapter, SkippedRecord};
use crate::day::Weekday;
use crate::entry::ClassEntry;
use crate::error::TimetableError;
use crate::resolve::{self, DaySelection, Moment, Resolution, ResolvedSchedule};

/// A normalized class list, as fetched for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timetable {
    entries: Vec<ClassEntry>,
    skipped: Vec<SkippedRecord>,
}

impl Timetable {
    pub fn new(entries: Vec<ClassEntry>) -> Self {
        Self {
            entries,
            skipped: Vec::new(),
        }
    }

    /// Parse a JSON payload and adapt its records.
    ///
    /// Only invalid JSON is an error. Records that do not normalize are kept
    /// aside in [`Timetable::skipped`].
    pub fn from_json<A>(json: &str, adapter: &A) -> Result<Self, TimetableError>
    where
        A: RecordAdapter + ?Sized,
    {
        let payload: Value = serde_json::from_str(json)
            .map_err(|e| TimetableError::record(format!("invalid class list JSON: {e}")))?;
        Ok(Self::from_records(Some(&payload), adapter))
    }

    /// Adapt an already-decoded payload. `None` gives an empty timetable.
    pub fn from_records<A>(payload: Option<&Value>, adapter: &A) -> Self
    where
        A: RecordAdapter + ?Sized,
    {
        let (entries, skipped) = normalize_records(payload, adapter);
        Self { entries, skipped }
    }

    pub fn entries(&self) -> &[ClassEntry] {
        &self.entries
    }

    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One day's classes, earliest first.
    pub fn for_day(&self, weekday: Weekday) -> Vec<ClassEntry> {
        let mut day: Vec<ClassEntry> = self
            .entries
            .iter()
            .filter(|e| e.is_on(weekday))
            .cloned()
            .collect();
        day.sort_by_key(|e| e.start_time);
        day
    }

    /// Classes grouped Monday through Sunday. Days without classes are absent,
    /// as are entries whose day was not recognized.
    pub fn by_day(&self) -> BTreeMap<Weekday, Vec<ClassEntry>> {
        let mut days = BTreeMap::new();
        for weekday in Weekday::ALL {
            let classes = self.for_day(weekday);
            if !classes.is_empty() {
                days.insert(weekday, classes);
            }
        }
        days
    }

    pub fn resolve_at(&self, now: impl Into<Moment>, selection: DaySelection) -> ResolvedSchedule {
        resolve::resolve(&self.entries, now, selection)
    }

    /// Resolve against the wall clock.
    pub fn resolve_now(&self, selection: DaySelection) -> ResolvedSchedule {
        self.resolve_at(&Zoned::now(), selection)
    }

    /// Resolve and carry the skipped-record diagnostics along.
    pub fn resolution_at(&self, now: impl Into<Moment>, selection: DaySelection) -> Resolution {
        Resolution {
            schedule: self.resolve_at(now, selection),
            skipped: self.skipped.clone(),
        }
    }
}

impl FromIterator<ClassEntry> for Timetable {
    fn from_iter<I: IntoIterator<Item = ClassEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
