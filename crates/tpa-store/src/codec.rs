//! JSON codec for the persisted collection
//!
//! The whole collection is one JSON array. Decoding enforces id uniqueness
//! and the submission rules, so a hand-edited file cannot smuggle in
//! duplicates or records a form would have rejected.

use crate::error::StorageCorruptionError;
use std::collections::HashSet;
use tpa_model::{ProgramDraft, ProgramRecord, ProgramValidator};

/// Encode the collection as a JSON array
///
/// # Errors
/// Returns error if serialization fails
pub fn encode(records: &[ProgramRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}

/// Decode a JSON array stored under `key`
///
/// # Errors
/// - `StorageCorruptionError::Malformed` if not an array of valid records
/// - `StorageCorruptionError::DuplicateId` if two records share an id
/// - `StorageCorruptionError::InvalidRecord` if a record breaks a field rule
pub fn decode(key: &str, raw: &str) -> Result<Vec<ProgramRecord>, StorageCorruptionError> {
    let records: Vec<ProgramRecord> =
        serde_json::from_str(raw).map_err(|source| StorageCorruptionError::Malformed {
            key: key.to_string(),
            source,
        })?;

    let validator = ProgramValidator::new();
    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.id()) {
            return Err(StorageCorruptionError::DuplicateId {
                key: key.to_string(),
                id: record.id().clone(),
            });
        }
        if let Err(source) = validator.validate(&ProgramDraft::from(record)) {
            return Err(StorageCorruptionError::InvalidRecord {
                key: key.to_string(),
                id: record.id().clone(),
                source,
            });
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tpa_model::{Field, Rule};

    const ONE_RECORD: &str = r#"[{"id":"1736501400000","name":"AI Basics","type":"technical",
        "department":"IT","startDate":"2025-01-10","duration":4,"maxParticipants":20,
        "programCost":500000,"status":"scheduled","createdAt":"2025-01-10T09:30:00.000Z"}]"#;

    #[test]
    fn decodes_browser_written_data() {
        let records = decode("trainingPrograms", ONE_RECORD).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id().as_str(), "1736501400000");
        assert_eq!(records[0].name(), "AI Basics");
    }

    #[test]
    fn encode_decode_preserves_collection() {
        let records = decode("k", ONE_RECORD).unwrap();
        let encoded = encode(&records).unwrap();
        assert_eq!(decode("k", &encoded).unwrap(), records);
    }

    #[test]
    fn empty_array() {
        assert!(decode("k", "[]").unwrap().is_empty());
        assert_eq!(encode(&[]).unwrap(), "[]");
    }

    #[test]
    fn malformed_json_is_corruption() {
        for raw in ["{not json", "{}", "[1,2]", r#"[{"id":"x"}]"#] {
            let err = decode("k", raw).unwrap_err();
            assert!(matches!(err, StorageCorruptionError::Malformed { .. }), "{raw}");
        }
    }

    #[test]
    fn unknown_enum_value_is_corruption() {
        let raw = ONE_RECORD.replace("\"technical\"", "\"yoga\"");
        assert!(matches!(
            decode("k", &raw),
            Err(StorageCorruptionError::Malformed { .. })
        ));
    }

    #[test]
    fn duplicate_ids_are_corruption() {
        let body = ONE_RECORD.trim().trim_start_matches('[').trim_end_matches(']');
        let raw = format!("[{body},{body}]");
        let err = decode("trainingPrograms", &raw).unwrap_err();
        assert!(matches!(err, StorageCorruptionError::DuplicateId { ref id, .. } if id.as_str() == "1736501400000"));
    }

    #[test]
    fn rule_breaking_record_is_corruption() {
        let raw = ONE_RECORD
            .replace("\"AI Basics\"", "\"\"")
            .replace("\"duration\":4", "\"duration\":0")
            .replace("\"maxParticipants\":20", "\"maxParticipants\":0");
        let err = decode("trainingPrograms", &raw).unwrap_err();

        let StorageCorruptionError::InvalidRecord { id, source, .. } = err else {
            panic!("expected InvalidRecord, got {err:?}");
        };
        assert_eq!(id.as_str(), "1736501400000");
        assert!(source.has(Field::Name, Rule::Required));
        assert!(source.has(Field::Duration, Rule::BelowMinimum { min: 1 }));
        assert!(source.has(Field::MaxParticipants, Rule::BelowMinimum { min: 1 }));
    }

    #[test]
    fn zero_cost_record_loads() {
        let raw = ONE_RECORD.replace("\"programCost\":500000", "\"programCost\":0");
        assert_eq!(decode("k", &raw).unwrap()[0].program_cost(), 0);
    }
}
