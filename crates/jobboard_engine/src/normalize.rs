//! Response normalization.
//!
//! The upstream API does not commit to one response shape. Each accepted
//! shape is one variant below; anything else is a [`NormalizeError`], which
//! surfaces as a malformed-response failure instead of a guess.

use board_logging::{board_debug, board_info};
use chrono::{DateTime, Utc};
use jobboard_core::{JobSummary, ResultPage};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Array-valued fields that carry a job list, in lookup order.
const LIST_FIELDS: [&str; 3] = ["jobs", "data", "results"];
/// Fields that wrap a single job record, in lookup order.
const RECORD_FIELDS: [&str; 2] = ["job", "data"];
/// Object-valued `data` fields unwrapped before giving up.
const MAX_ENVELOPE_DEPTH: usize = 3;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("unrecognized list response: expected an array or an object with a jobs/data/results array")]
    UnrecognizedList,
    #[error("unrecognized record response: expected a job object, an array or a data/job wrapper")]
    UnrecognizedRecord,
}

impl From<serde_json::Error> for NormalizeError {
    fn from(err: serde_json::Error) -> Self {
        NormalizeError::InvalidJson(err.to_string())
    }
}

enum ListShape<'a> {
    /// `[ {...}, {...} ]`
    Bare(&'a [Value]),
    /// `{ "jobs": [...], "totalJobs": 5, "totalPages": 2, "page": 1 }`
    Wrapped {
        items: &'a [Value],
        meta: &'a Map<String, Value>,
    },
    /// `{ "success": true, "data": { ... } }`
    Envelope(&'a Value),
    Unrecognized,
}

fn classify_list(value: &Value) -> ListShape<'_> {
    match value {
        Value::Array(items) => ListShape::Bare(items),
        Value::Object(map) => {
            let items = LIST_FIELDS
                .iter()
                .find_map(|field| map.get(*field).and_then(Value::as_array));
            match (items, map.get("data")) {
                (Some(items), _) => ListShape::Wrapped { items, meta: map },
                (None, Some(inner @ Value::Object(_))) => ListShape::Envelope(inner),
                _ => ListShape::Unrecognized,
            }
        }
        _ => ListShape::Unrecognized,
    }
}

enum RecordShape<'a> {
    /// `{ "_id": "...", "jobTitle": "..." }`
    Bare(&'a Value),
    /// `[ {...} ]`; the first valid record wins.
    List(&'a [Value]),
    /// `{ "data": ... }` or `{ "job": ... }`
    Wrapped(&'a Value),
    /// `null` payload: nothing found.
    Empty,
    Unrecognized,
}

fn classify_record(value: &Value) -> RecordShape<'_> {
    match value {
        Value::Null => RecordShape::Empty,
        Value::Array(items) => RecordShape::List(items),
        Value::Object(map) if looks_like_record(map) => RecordShape::Bare(value),
        Value::Object(map) => RECORD_FIELDS
            .iter()
            .find_map(|field| map.get(*field))
            .map_or(RecordShape::Unrecognized, RecordShape::Wrapped),
        _ => RecordShape::Unrecognized,
    }
}

fn looks_like_record(map: &Map<String, Value>) -> bool {
    ["_id", "id", "jobTitle", "title"]
        .iter()
        .any(|field| map.contains_key(*field))
}

/// Normalizes a list body into a page. `requested_page` fills in the page
/// number when the server does not report one.
pub fn normalize_page(body: &[u8], requested_page: u32) -> Result<ResultPage, NormalizeError> {
    let value: Value = serde_json::from_slice(body)?;
    normalize_page_value(&value, requested_page)
}

pub fn normalize_page_value(
    value: &Value,
    requested_page: u32,
) -> Result<ResultPage, NormalizeError> {
    let mut current = value;
    for _ in 0..=MAX_ENVELOPE_DEPTH {
        match classify_list(current) {
            ListShape::Bare(items) => {
                return Ok(ResultPage {
                    items: valid_jobs(items),
                    total_count: None,
                    total_pages: None,
                    page: requested_page,
                })
            }
            ListShape::Wrapped { items, meta } => {
                return Ok(ResultPage {
                    items: valid_jobs(items),
                    total_count: read_count(meta, "totalJobs").or_else(|| read_count(meta, "total")),
                    total_pages: read_count(meta, "totalPages").and_then(|n| u32::try_from(n).ok()),
                    page: read_count(meta, "page")
                        .and_then(|n| u32::try_from(n).ok())
                        .filter(|page| *page > 0)
                        .unwrap_or(requested_page),
                })
            }
            ListShape::Envelope(inner) => current = inner,
            ListShape::Unrecognized => break,
        }
    }
    Err(NormalizeError::UnrecognizedList)
}

/// Normalizes a single-record body. `Ok(None)` means the body was well-formed
/// but held no valid job.
pub fn normalize_record(body: &[u8]) -> Result<Option<JobSummary>, NormalizeError> {
    let value: Value = serde_json::from_slice(body)?;
    normalize_record_value(&value)
}

pub fn normalize_record_value(value: &Value) -> Result<Option<JobSummary>, NormalizeError> {
    let mut current = value;
    for _ in 0..=MAX_ENVELOPE_DEPTH {
        match classify_record(current) {
            RecordShape::Bare(record) => return Ok(parse_job(record)),
            RecordShape::List(items) => return Ok(items.iter().find_map(parse_job)),
            RecordShape::Wrapped(inner) => current = inner,
            RecordShape::Empty => return Ok(None),
            RecordShape::Unrecognized => break,
        }
    }
    Err(NormalizeError::UnrecognizedRecord)
}

fn valid_jobs(items: &[Value]) -> Vec<JobSummary> {
    let jobs: Vec<JobSummary> = items.iter().filter_map(parse_job).collect();
    if jobs.len() != items.len() {
        board_info!(
            "Dropped {} invalid job records out of {}",
            items.len() - jobs.len(),
            items.len()
        );
    }
    jobs
}

fn read_count(meta: &Map<String, Value>, field: &str) -> Option<u64> {
    match meta.get(field)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl RawScalar {
    fn into_text(self) -> Option<String> {
        let text = match self {
            RawScalar::Text(text) => text.trim().to_string(),
            RawScalar::Number(n) => n.to_string(),
            RawScalar::Flag(flag) => flag.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }
}

/// Label fields tried when a list entry is an object, e.g. `{ "name": "rust" }`.
const LABEL_FIELDS: [&str; 3] = ["name", "label", "title"];

/// Each field is read on its own, so a badly typed optional field only loses
/// that field. Only a missing id or title rejects the record.
fn parse_job(value: &Value) -> Option<JobSummary> {
    let Some(record) = value.as_object() else {
        board_debug!("Skipping non-object job record");
        return None;
    };
    let id = text_field(record, &["_id", "id"])?;
    let title = text_field(record, &["jobTitle", "title"])?;
    Some(JobSummary {
        id,
        title,
        company_name: text_field(record, &["companyName"]),
        company: text_field(record, &["company"]),
        company_image: text_field(record, &["companyImage"]),
        region: text_field(record, &["region"]),
        tags: list_field(record, "tags"),
        skills: list_field(record, "skills"),
        posted_at: ["createdAt", "postedAt"]
            .iter()
            .find_map(|field| record.get(*field).and_then(parse_timestamp)),
        job_type: text_field(record, &["jobType"]),
        is_urgent: flag_field(record, "isUrgent"),
        is_responsive: flag_field(record, "isResponsive"),
        salary: text_field(record, &["salary"]),
        needed_experience: text_field(record, &["neededExperience"]),
        description: record
            .get("description")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned),
        apply_link: text_field(record, &["applyNowLink"]),
    })
}

/// First non-blank scalar among `fields`, in order.
fn text_field(record: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| scalar_text(record.get(*field)?))
}

fn scalar_text(value: &Value) -> Option<String> {
    RawScalar::deserialize(value).ok()?.into_text()
}

fn list_field(record: &Map<String, Value>, field: &str) -> Vec<String> {
    match record.get(field) {
        Some(Value::Array(values)) => values.iter().filter_map(list_entry).collect(),
        Some(Value::String(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

fn list_entry(value: &Value) -> Option<String> {
    match value {
        Value::Object(entry) => text_field(entry, &LABEL_FIELDS),
        other => scalar_text(other),
    }
}

fn flag_field(record: &Map<String, Value>, field: &str) -> Option<bool> {
    match record.get(field)? {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => text.trim().to_ascii_lowercase().parse().ok(),
        Value::Number(n) => n.as_u64().map(|n| n != 0),
        _ => None,
    }
}

/// RFC 3339 text or epoch milliseconds.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => DateTime::parse_from_rfc3339(text.trim())
            .ok()
            .map(|at| at.with_timezone(&Utc)),
        Value::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?),
        _ => None,
    }
}
