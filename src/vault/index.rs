//! Metadata index types and fuzzy filename resolution.
//!
//! The index is the single source of truth for which objects are live:
//! an object on disk with no `FileRecord` is an orphan and is never
//! surfaced.  The whole index is serialized to JSON and sealed as one
//! blob under the master key — every mutation re-seals it in full,
//! which bounds complexity at the cost of O(index size) per operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current metadata index version.
pub const INDEX_VERSION: u32 = 1;

/// One encrypted file tracked by the vault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Opaque identifier of the sealed object on disk.  Unrelated to
    /// the original filename, so on-disk names leak nothing.
    pub object_id: String,

    /// The filename the file had before it was added.
    pub original_name: String,

    /// Plaintext size in bytes.
    pub size: u64,

    /// Modification time of the original file, restored on extract.
    pub modified_time: DateTime<Utc>,

    /// When the file was added to the vault.
    pub added_time: DateTime<Utc>,
}

/// The vault's file index, sealed as a single blob under the master key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultIndex {
    pub version: u32,
    pub files: Vec<FileRecord>,
}

impl VaultIndex {
    /// A fresh index with no files.
    pub fn empty() -> Self {
        Self {
            version: INDEX_VERSION,
            files: Vec::new(),
        }
    }

    /// Returns `true` if a record with exactly this original name exists.
    pub fn contains_name(&self, name: &str) -> bool {
        self.files.iter().any(|f| f.original_name == name)
    }
}

/// Resolve a user-supplied name query to one record.
///
/// Rules are applied in strict priority order, first match wins:
/// 1. exact name match
/// 2. case-insensitive exact match
/// 3. case-insensitive substring match (index order)
///
/// An ambiguous substring query silently resolves to the first matching
/// record — there is no ambiguity error.
pub fn find_record<'a>(files: &'a [FileRecord], query: &str) -> Option<&'a FileRecord> {
    let lower_query = query.to_lowercase();

    // First pass: exact match.
    if let Some(f) = files.iter().find(|f| f.original_name == query) {
        return Some(f);
    }

    // Second pass: case-insensitive exact match.
    if let Some(f) = files
        .iter()
        .find(|f| f.original_name.to_lowercase() == lower_query)
    {
        return Some(f);
    }

    // Third pass: case-insensitive substring match.
    files
        .iter()
        .find(|f| f.original_name.to_lowercase().contains(&lower_query))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> FileRecord {
        FileRecord {
            object_id: format!("id-{name}"),
            original_name: name.to_string(),
            size: 0,
            modified_time: Utc::now(),
            added_time: Utc::now(),
        }
    }

    #[test]
    fn exact_match_beats_substring() {
        let files = vec![record("secret.txt"), record("SECRET_2024.txt")];

        // "secret.txt" is also a substring of neither, but an exact
        // match of the first — the first rule must win.
        let found = find_record(&files, "secret.txt").unwrap();
        assert_eq!(found.original_name, "secret.txt");
    }

    #[test]
    fn case_insensitive_exact_is_second_priority() {
        let files = vec![record("Notes.TXT"), record("notes.txt.bak")];

        let found = find_record(&files, "notes.txt").unwrap();
        assert_eq!(found.original_name, "Notes.TXT");
    }

    #[test]
    fn substring_match_is_case_insensitive_and_first_wins() {
        let files = vec![record("secret.txt"), record("SECRET_2024.txt")];

        let found = find_record(&files, "SECRET").unwrap();
        assert_eq!(found.original_name, "secret.txt");
    }

    #[test]
    fn no_match_returns_none() {
        let files = vec![record("a.txt")];
        assert!(find_record(&files, "zzz").is_none());
    }

    #[test]
    fn empty_index_round_trips_through_json() {
        let index = VaultIndex::empty();
        let bytes = serde_json::to_vec(&index).unwrap();
        let back: VaultIndex = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back.version, INDEX_VERSION);
        assert!(back.files.is_empty());
    }
}
