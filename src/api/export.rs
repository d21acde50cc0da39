use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::core::TimelineItem;
use crate::error::{TimelineError, TimelineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }

    #[must_use]
    pub fn file_extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = TimelineError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        if tag.eq_ignore_ascii_case("csv") {
            Ok(Self::Csv)
        } else if tag.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(TimelineError::InvalidData(format!(
                "unsupported export format: {tag}"
            )))
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
        })
    }
}

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    title: &'a str,
    start: String,
    end: Option<String>,
}

impl<'a> From<&'a TimelineItem> for ExportRow<'a> {
    fn from(item: &'a TimelineItem) -> Self {
        Self {
            id: item.id(),
            title: item.title(),
            start: format_time(item.start()),
            end: item.end().map(format_time),
        }
    }
}

const CSV_HEADER: &str = "id,title,start,end";

/// Serializes items as `id,title,start,end` rows (CSV) or an array of objects (JSON).
///
/// Timestamps are RFC 3339 in UTC; point items have an empty/`null` end.
pub fn export_items(items: &[TimelineItem], format: ExportFormat) -> TimelineResult<String> {
    let rows: Vec<ExportRow<'_>> = items.iter().map(ExportRow::from).collect();
    match format {
        ExportFormat::Csv => Ok(rows_to_csv(&rows)),
        ExportFormat::Json => serde_json::to_string_pretty(&rows).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize timeline export: {e}"))
        }),
    }
}

fn rows_to_csv(rows: &[ExportRow<'_>]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + rows.len() * 64);
    out.push_str(CSV_HEADER);
    out.push_str("\r\n");
    for row in rows {
        let fields = [
            row.id,
            row.title,
            row.start.as_str(),
            row.end.as_deref().unwrap_or(""),
        ];
        for (index, field) in fields.iter().enumerate() {
            if index > 0 {
                out.push(',');
            }
            push_csv_field(&mut out, field);
        }
        out.push_str("\r\n");
    }
    out
}

fn push_csv_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}
