use serde::Serialize;
use timetable::{DaySelection, Moment, Shape, Timetable};
use wasm_bindgen::prelude::*;

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// Plain JS objects rather than `Map`s, so results survive `JSON.stringify`.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(js_err)
}

fn parse_shape(shape: &str) -> Result<Shape, JsError> {
    shape.parse().map_err(js_err)
}

/// The reference instant: an ISO datetime (zoned or civil), or the clock.
fn reference(now: Option<String>) -> Result<Moment, JsError> {
    let Some(now) = now else {
        return Ok(Moment::now());
    };
    if let Ok(zoned) = now.parse::<jiff::Zoned>() {
        return Ok(Moment::from(&zoned));
    }
    now.parse::<jiff::civil::DateTime>()
        .map(Moment::from)
        .map_err(|e| js_err(format!("invalid reference time '{now}': {e}")))
}

fn selection(all_days: bool) -> DaySelection {
    if all_days {
        DaySelection::Preselected
    } else {
        DaySelection::Reference
    }
}

/// A normalized class list, usable from JavaScript.
#[wasm_bindgen]
pub struct ClassList {
    inner: Timetable,
}

#[wasm_bindgen]
impl ClassList {
    /// Parse a JSON class list of the given shape ("student" or "teacher").
    #[wasm_bindgen]
    pub fn parse(json: &str, shape: &str) -> Result<ClassList, JsError> {
        let inner = Timetable::from_json(json, &parse_shape(shape)?.field_map()).map_err(js_err)?;
        Ok(ClassList { inner })
    }

    /// Build from already-decoded records, e.g. a database query result.
    #[wasm_bindgen(js_name = "fromRecords")]
    pub fn from_records(records: JsValue, shape: &str) -> Result<ClassList, JsError> {
        let payload: Option<serde_json::Value> =
            serde_wasm_bindgen::from_value(records).map_err(js_err)?;
        let inner = Timetable::from_records(payload.as_ref(), &parse_shape(shape)?.field_map());
        Ok(ClassList { inner })
    }

    /// `{ current, upcoming, skipped }` at `now` (ISO string) or the clock.
    pub fn resolve(&self, now: Option<String>, all_days: bool) -> Result<JsValue, JsError> {
        let resolution = self.inner.resolution_at(reference(now)?, selection(all_days));
        to_js(&resolution)
    }

    /// Minutes until the next class starts, if there is one today.
    #[wasm_bindgen(js_name = "minutesUntilNext")]
    pub fn minutes_until_next(&self, now: Option<String>) -> Result<Option<u16>, JsError> {
        let moment = reference(now)?;
        let schedule = self.inner.resolve_at(moment, DaySelection::Reference);
        Ok(schedule.minutes_until_next(moment))
    }

    /// A weekday's classes, earliest first.
    #[wasm_bindgen(js_name = "forDay")]
    pub fn for_day(&self, day: &str) -> Result<JsValue, JsError> {
        let weekday = timetable::day::parse_weekday(day)
            .ok_or_else(|| js_err(format!("unknown weekday '{day}'")))?;
        to_js(&self.inner.for_day(weekday))
    }

    /// Records that could not be normalized, as `{ index, reason }`.
    pub fn skipped(&self) -> Result<JsValue, JsError> {
        to_js(self.inner.skipped())
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.entries().len()
    }
}

/// One-shot: parse a JSON class list and resolve it.
#[wasm_bindgen]
pub fn resolve(json: &str, shape: &str, now: Option<String>) -> Result<JsValue, JsError> {
    ClassList::parse(json, shape)?.resolve(now, false)
}

/// Normalize a time token to `HH:MM`, for form validation.
#[wasm_bindgen(js_name = "normalizeTime")]
pub fn normalize_time(token: &str) -> Result<String, JsError> {
    timetable::normalize_time(token).map_err(js_err)
}

/// Normalize a day code to its weekday name; unknown codes come back unchanged.
#[wasm_bindgen(js_name = "normalizeDay")]
pub fn normalize_day(code: &str) -> String {
    timetable::normalize_day(code)
}

/// Split a combined range into `[start, end]` as `HH:MM` strings.
#[wasm_bindgen(js_name = "splitRange")]
pub fn split_range(token: &str) -> Result<Vec<String>, JsError> {
    let (start, end) = timetable::split_range(token).map_err(js_err)?;
    Ok(vec![start.to_string(), end.to_string()])
}
