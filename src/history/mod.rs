//! Bounded, newest-first record of past extraction results, persisted as a
//! JSON array on disk. The store is the only mutation surface for history;
//! edits made in the result viewer are transient and never written back.

use std::{
    fs,
    path::PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::{
        ExtractionResult,
        RefscanError,
    },
    persistence,
};

pub const HISTORY_FILE: &str = "history.json";

/// Retention cap. Saving past this evicts the oldest entries.
pub const MAX_ENTRIES: usize = 50;

/// One persisted upload result, stamped by the store at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    /// Alias of `job_id`, kept for lookup symmetry.
    pub id: String,
    /// RFC 3339, assigned on save (not by the backend).
    pub timestamp: String,
    #[serde(flatten)]
    pub result: ExtractionResult,
}

impl ExtractionRecord {
    pub fn matches_id(&self, key: &str) -> bool {
        self.id == key || self.result.job_id == key
    }
}

pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn at_default_location() -> Self {
        Self::new(persistence::get_data_file_path(HISTORY_FILE))
    }

    /// Prepends a record for `result`, evicts past [`MAX_ENTRIES`], and writes
    /// the whole collection back. Returns the record as persisted. A store
    /// that has become unreadable is replaced wholesale by the next save.
    pub fn save(&self, result: &ExtractionResult) -> Result<ExtractionRecord, RefscanError> {
        let mut records = self.list().unwrap_or_default();

        let record = ExtractionRecord {
            id: result.job_id.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            result: result.clone(),
        };

        records.insert(0, record.clone());
        records.truncate(MAX_ENTRIES);

        self.persist(&records)?;
        Ok(record)
    }

    /// All records, newest first. A missing file is an empty history; a file
    /// that exists but cannot be read or parsed is reported as unreadable so
    /// the caller can tell "no history" from "history unavailable".
    pub fn list(&self) -> Result<Vec<ExtractionRecord>, RefscanError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path)
            .map_err(|e| RefscanError::HistoryUnreadable(e.to_string()))?;

        serde_json::from_str(&json).map_err(|e| RefscanError::HistoryUnreadable(e.to_string()))
    }

    /// First record whose `id` or `job_id` equals `key`.
    pub fn find_by_id(&self, key: &str) -> Result<Option<ExtractionRecord>, RefscanError> {
        Ok(self.list()?.into_iter().find(|record| record.matches_id(key)))
    }

    /// Removes every record matching `key`. Unknown keys are a no-op.
    pub fn delete_by_id(&self, key: &str) -> Result<(), RefscanError> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|record| !record.matches_id(key));

        if records.len() != before {
            self.persist(&records)?;
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<(), RefscanError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn persist(&self, records: &[ExtractionRecord]) -> Result<(), RefscanError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Read-side filter for the history page: case-insensitive substring match
/// over patient name, receiving facility, file number, and job id. An empty
/// search term matches everything.
pub fn matches_search(record: &ExtractionRecord, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    let extracted = &record.result.extracted;
    let haystacks = [
        extracted.patient.full_name.as_deref(),
        extracted.referral.referral_to.as_deref(),
        extracted.file_number.as_deref(),
        Some(record.result.job_id.as_str()),
    ];

    haystacks
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::core::models::ReferralExtraction;

    fn temp_store() -> (TempDir, HistoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join(HISTORY_FILE));
        (dir, store)
    }

    fn result_with_job_id(job_id: &str) -> ExtractionResult {
        ExtractionResult {
            job_id: job_id.to_string(),
            file_type: "pdf".to_string(),
            extracted: ReferralExtraction::default(),
            ..Default::default()
        }
    }

    #[test]
    fn test_list_is_empty_for_fresh_store() {
        let (_dir, store) = temp_store();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_find_returns_saved_result() {
        let (_dir, store) = temp_store();
        let mut result = result_with_job_id("job-1");
        result.extracted.patient.full_name = Some("Jane Doe".to_string());

        let saved = store.save(&result).unwrap();
        assert_eq!(saved.id, "job-1");

        let found = store.find_by_id("job-1").unwrap().expect("record should exist");
        // Equal to what was saved, modulo the stamped timestamp/id fields.
        assert_eq!(found.result, result);
        assert_eq!(found.timestamp, saved.timestamp);
    }

    #[test]
    fn test_list_is_newest_first_and_delete_removes_matches() {
        let (_dir, store) = temp_store();
        for id in ["A", "B", "C"] {
            store.save(&result_with_job_id(id)).unwrap();
        }

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["C", "B", "A"]);

        store.delete_by_id("B").unwrap();
        let ids: Vec<String> = store.list().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["C", "A"]);
        assert!(store.find_by_id("B").unwrap().is_none());

        store.clear().unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete_unknown_key_is_noop() {
        let (_dir, store) = temp_store();
        store.save(&result_with_job_id("A")).unwrap();
        store.delete_by_id("nope").unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_cap_evicts_oldest_entries() {
        let (_dir, store) = temp_store();
        for i in 0..=MAX_ENTRIES {
            store.save(&result_with_job_id(&format!("job-{}", i))).unwrap();
        }

        let records = store.list().unwrap();
        assert_eq!(records.len(), MAX_ENTRIES);
        assert_eq!(records[0].id, format!("job-{}", MAX_ENTRIES));
        assert!(records.iter().all(|r| r.id != "job-0"));
    }

    #[test]
    fn test_duplicate_job_id_is_insert_only() {
        let (_dir, store) = temp_store();
        store.save(&result_with_job_id("dup")).unwrap();
        store.save(&result_with_job_id("dup")).unwrap();

        assert_eq!(store.list().unwrap().len(), 2);

        store.delete_by_id("dup").unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_persisted_json_round_trips_losslessly() {
        let (_dir, store) = temp_store();
        let mut result = result_with_job_id("rt-1");
        result.extracted.diagnoses.primary_diagnoses = vec!["CVA".to_string()];
        result.extracted.treatments = vec!["Physiotherapy".to_string()];
        store.save(&result).unwrap();

        let listed = store.list().unwrap();
        let reencoded: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&listed).unwrap()).unwrap();

        let raw = std::fs::read_to_string(store.path.clone()).unwrap();
        let direct: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(reencoded, direct);
    }

    #[test]
    fn test_corrupt_store_is_reported_not_masked() {
        let (_dir, store) = temp_store();
        std::fs::create_dir_all(store.path.parent().unwrap()).unwrap();
        std::fs::write(&store.path, "{ not json").unwrap();

        match store.list() {
            Err(RefscanError::HistoryUnreadable(_)) => {}
            other => panic!("Expected HistoryUnreadable, got {:?}", other.map(|v| v.len())),
        }

        // A save replaces the corrupt collection and recovers the store.
        store.save(&result_with_job_id("fresh")).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_matches_search_fields_and_empty_term() {
        let mut result = result_with_job_id("JOB-42");
        result.extracted.patient.full_name = Some("Jane Doe".to_string());
        result.extracted.referral.referral_to = Some("City Rehab Center".to_string());
        result.extracted.file_number = Some("FN-100".to_string());

        let record = ExtractionRecord {
            id: result.job_id.clone(),
            timestamp: "2026-01-01T00:00:00Z".to_string(),
            result,
        };

        assert!(matches_search(&record, ""));
        assert!(matches_search(&record, "   "));
        assert!(matches_search(&record, "jane"));
        assert!(matches_search(&record, "REHAB"));
        assert!(matches_search(&record, "fn-100"));
        assert!(matches_search(&record, "job-42"));
        assert!(!matches_search(&record, "cardiology"));
    }
}
