//! Persisting settings and an offline copy of the timetable.

use serde_json::json;
use timetable::{DaySelection, JsonFileStore, Settings, Shape, Theme, Timetable, TimetableCache};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join("timetable-example-store.json");
    let mut store = JsonFileStore::open(&path)?;

    let mut settings = Settings::load(&store)?;
    println!("loaded: {settings:?}");
    settings.theme = Theme::Dark;
    settings.reminder_lead_minutes = 10;
    settings.save(&mut store)?;

    // Cache the teacher view after a successful fetch
    let fetched = json!([{
        "Subject": "Thermodynamics",
        "Location": "ENG-2",
        "program": "BEng Mechanical",
        "Day": "Th",
        "Time": "10:00 - 12:00"
    }]);
    let mut cache = TimetableCache::new(&mut store);
    cache.save(Shape::Teacher, &fetched)?;

    // Later, offline: rebuild from the cache
    let cached = cache.load(Shape::Teacher)?;
    let timetable = Timetable::from_records(cached.as_ref(), &Shape::Teacher.field_map());
    let now: jiff::Zoned = "2026-02-12T09:00:00+00:00[UTC]".parse()?;
    println!("{}", timetable.resolve_at(&now, DaySelection::Reference));

    println!("store at {}", store.path().display());
    Ok(())
}
