//! Loads the timeline and case-study JSON arrays into core types.
//!
//! The data files are hand-edited, so loading is lenient: a record with
//! odd or missing optional fields still loads with those fields absent, and
//! only a document that is not an array at all is rejected.

use serde_json::Value;
use timeline_core::{CaseStudyEntry, EntryDate, Exhibit, TimelineEntry, TimelineError};
use tracing::{debug, warn};

/// Load timeline entries from a JSON string.
pub fn load_timeline_str(json: &str) -> Result<Vec<TimelineEntry>, TimelineError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| TimelineError::Parse(err.to_string()))?;
    load_timeline_value(&value)
}

/// Load timeline entries from a `serde_json::Value`, in file order.
pub fn load_timeline_value(document: &Value) -> Result<Vec<TimelineEntry>, TimelineError> {
    let records = records(document, "timeline")?;
    let entries: Vec<TimelineEntry> = records
        .iter()
        .enumerate()
        .filter_map(|(position, record)| timeline_entry(position, record))
        .collect();
    debug!(
        records = records.len(),
        loaded = entries.len(),
        "timeline data loaded"
    );
    Ok(entries)
}

/// Load case studies from a JSON string.
pub fn load_cases_str(json: &str) -> Result<Vec<CaseStudyEntry>, TimelineError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| TimelineError::Parse(err.to_string()))?;
    load_cases_value(&value)
}

pub fn load_cases_value(document: &Value) -> Result<Vec<CaseStudyEntry>, TimelineError> {
    let records = records(document, "case studies")?;
    let cases: Vec<CaseStudyEntry> = records
        .iter()
        .enumerate()
        .filter_map(|(position, record)| case_entry(position, record))
        .collect();
    debug!(
        records = records.len(),
        loaded = cases.len(),
        "case study data loaded"
    );
    Ok(cases)
}

/// Load both documents and order the timeline.
pub fn load_exhibit_str(timeline_json: &str, cases_json: &str) -> Result<Exhibit, TimelineError> {
    Ok(Exhibit::new(
        load_timeline_str(timeline_json)?,
        load_cases_str(cases_json)?,
    ))
}

pub fn load_exhibit_value(timeline: &Value, cases: &Value) -> Result<Exhibit, TimelineError> {
    Ok(Exhibit::new(
        load_timeline_value(timeline)?,
        load_cases_value(cases)?,
    ))
}

fn records<'a>(document: &'a Value, what: &str) -> Result<&'a [Value], TimelineError> {
    match document {
        Value::Array(records) => Ok(records),
        Value::Null => Err(TimelineError::MissingData),
        other => Err(TimelineError::Parse(format!(
            "expected {what} to be a JSON array, received {}",
            kind(other)
        ))),
    }
}

fn timeline_entry(position: usize, record: &Value) -> Option<TimelineEntry> {
    let Some(fields) = record.as_object() else {
        warn!(position, kind = kind(record), "skipping non-object timeline record");
        return None;
    };

    let date = match fields.get("date") {
        Some(date @ Value::Object(_)) => EntryDate {
            month: text(date.get("month")),
            year: year(date.get("year")),
        },
        Some(Value::Null) | None => EntryDate::default(),
        Some(other) => {
            warn!(position, kind = kind(other), "ignoring malformed timeline date");
            EntryDate::default()
        }
    };

    let title = text(fields.get("title")).unwrap_or_else(|| {
        warn!(position, "timeline record has no title");
        String::new()
    });

    Some(TimelineEntry {
        date,
        title,
        subtitle: text(fields.get("subtitle")),
        resume: text(fields.get("resume")).unwrap_or_default(),
        image_path: text(fields.get("imagePath")),
    })
}

fn case_entry(position: usize, record: &Value) -> Option<CaseStudyEntry> {
    let Some(fields) = record.as_object() else {
        warn!(position, kind = kind(record), "skipping non-object case study record");
        return None;
    };

    let company = text(fields.get("company")).unwrap_or_else(|| {
        warn!(position, "case study record has no company");
        String::new()
    });

    Some(CaseStudyEntry {
        image_path: text(fields.get("imagePath")),
        company,
        subtitle: text(fields.get("subtitle")),
        description: text(fields.get("description")),
    })
}

/// Display text of a scalar field. Blank strings count as absent; numbers
/// are kept in their written form.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Year as an integer, accepting numeric strings such as `"1968"`.
fn year(value: Option<&Value>) -> Option<i32> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
