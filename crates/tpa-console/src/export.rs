//! Export of program lists
//!
//! JSON uses the persisted record layout; CSV has one header row and RFC
//! 4180 quoting.

use chrono::SecondsFormat;
use std::fmt;
use std::str::FromStr;
use tpa_model::ProgramRecord;

/// CSV header, in persisted field order
pub const CSV_HEADER: &str =
    "id,name,type,department,startDate,duration,maxParticipants,programCost,status,createdAt";

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    /// Pretty-printed JSON array
    #[default]
    Json,
    /// Comma-separated values
    Csv,
}

impl ExportFormat {
    /// File extension / wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Format name not recognized
    #[error("unknown export format: '{0}'")]
    UnknownFormat(String),

    /// JSON encoding failed
    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render records in `format`
///
/// # Errors
/// Returns error if JSON encoding fails
pub fn export<'a, I>(records: I, format: ExportFormat) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a ProgramRecord>,
{
    let records: Vec<&ProgramRecord> = records.into_iter().collect();
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&records)?),
        ExportFormat::Csv => Ok(to_csv(&records)),
    }
}

fn to_csv(records: &[&ProgramRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for record in records {
        let row = [
            csv_field(record.id().as_str()),
            csv_field(record.name()),
            record.program_type().as_str().to_string(),
            record.department().as_str().to_string(),
            record.start_date().format("%Y-%m-%d").to_string(),
            record.duration().to_string(),
            record.max_participants().to_string(),
            record.program_cost().to_string(),
            record.status().as_str().to_string(),
            record
                .created_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_format() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!(matches!(
            "xlsx".parse::<ExportFormat>(),
            Err(ExportError::UnknownFormat(_))
        ));
    }

    #[test]
    fn csv_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a, b"), "\"a, b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn empty_csv_is_header_only() {
        let csv = export(std::iter::empty(), ExportFormat::Csv).unwrap();
        assert_eq!(csv, format!("{CSV_HEADER}\n"));
        let json = export(std::iter::empty(), ExportFormat::Json).unwrap();
        assert_eq!(json, "[]");
    }
}
