use jiff::Zoned;
use serde::Serialize;
use serde_json::Value;

use crate::adapter::{normalize_records, RecordAdapter, SkippedRecord};
use crate::clock::ClockTime;
use crate::day::Weekday;
use crate::entry::ClassEntry;

/// How the resolver decides which entries belong to the reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DaySelection {
    /// Keep only entries whose day is the reference instant's weekday.
    #[default]
    Reference,
    /// The caller already selected one day's entries; keep them all.
    Preselected,
}

/// The weekday and minute a resolution is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub weekday: Weekday,
    pub time: ClockTime,
}

impl Moment {
    pub fn new(weekday: Weekday, time: ClockTime) -> Self {
        Self { weekday, time }
    }

    pub fn now() -> Self {
        Self::from(&Zoned::now())
    }
}

impl From<&Zoned> for Moment {
    fn from(z: &Zoned) -> Self {
        Self::from(z.datetime())
    }
}

impl From<Zoned> for Moment {
    fn from(z: Zoned) -> Self {
        Self::from(&z)
    }
}

impl From<jiff::civil::DateTime> for Moment {
    fn from(dt: jiff::civil::DateTime) -> Self {
        Self {
            weekday: Weekday::from_jiff(dt.weekday()),
            time: ClockTime::from_jiff(dt.time()),
        }
    }
}

/// Classes in session and classes still to come, for one reference instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedSchedule {
    /// In source order.
    pub current: Vec<ClassEntry>,
    /// Ascending by start time; ties keep source order.
    pub upcoming: Vec<ClassEntry>,
}

impl ResolvedSchedule {
    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.upcoming.is_empty()
    }

    /// The next class to start.
    pub fn next(&self) -> Option<&ClassEntry> {
        self.upcoming.first()
    }

    /// Whole minutes from `now` until the next class starts.
    pub fn minutes_until_next(&self, now: impl Into<Moment>) -> Option<u16> {
        let now = now.into().time.minutes_since_midnight();
        self.next()
            .map(|e| e.start_time.minutes_since_midnight().saturating_sub(now))
    }
}

/// A resolution of raw records, with the records that had to be left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    #[serde(flatten)]
    pub schedule: ResolvedSchedule,
    pub skipped: Vec<SkippedRecord>,
}

fn on_reference_day(entry: &ClassEntry, moment: Moment, selection: DaySelection) -> bool {
    match selection {
        DaySelection::Reference => entry.is_on(moment.weekday),
        DaySelection::Preselected => true,
    }
}

/// Entries whose `[start, end)` window contains the reference time.
pub fn current_classes(
    entries: &[ClassEntry],
    now: impl Into<Moment>,
    selection: DaySelection,
) -> Vec<ClassEntry> {
    let moment = now.into();
    entries
        .iter()
        .filter(|e| on_reference_day(e, moment, selection) && e.is_current_at(moment.time))
        .cloned()
        .collect()
}

/// Entries starting strictly after the reference time, earliest first.
pub fn upcoming_classes(
    entries: &[ClassEntry],
    now: impl Into<Moment>,
    selection: DaySelection,
) -> Vec<ClassEntry> {
    let moment = now.into();
    let mut upcoming: Vec<ClassEntry> = entries
        .iter()
        .filter(|e| on_reference_day(e, moment, selection) && e.is_upcoming_at(moment.time))
        .cloned()
        .collect();
    // Stable, so equal start times keep their source order.
    upcoming.sort_by_key(|e| e.start_time);
    upcoming
}

/// Partition normalized entries into current and upcoming classes.
pub fn resolve(
    entries: &[ClassEntry],
    now: impl Into<Moment>,
    selection: DaySelection,
) -> ResolvedSchedule {
    let moment = now.into();
    let schedule = ResolvedSchedule {
        current: current_classes(entries, moment, selection),
        upcoming: upcoming_classes(entries, moment, selection),
    };
    log::trace!(
        "resolved {} entries at {} {}: {} current, {} upcoming",
        entries.len(),
        moment.weekday,
        moment.time,
        schedule.current.len(),
        schedule.upcoming.len()
    );
    schedule
}

/// Adapt raw records and resolve them. Never fails: records that cannot be
/// normalized are reported in [`Resolution::skipped`].
pub fn resolve_records<A>(
    payload: Option<&Value>,
    adapter: &A,
    now: impl Into<Moment>,
    selection: DaySelection,
) -> Resolution
where
    A: RecordAdapter + ?Sized,
{
    let (entries, skipped) = normalize_records(payload, adapter);
    Resolution {
        schedule: resolve(&entries, now, selection),
        skipped,
    }
}
