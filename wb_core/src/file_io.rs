//! # File I/O Module
//!
//! Question sets are handed from the generator to the print view through a
//! file on disk:
//! - **Atomic saves**: write to .tmp, sync, rename to prevent torn files
//! - **Version validation**: reject sets written by a newer schema
//! - **Lenient print loading**: a missing or malformed hand-off prints nothing
//!
//! ## File Format
//!
//! Sets are saved as `.wbq` files containing pretty-printed JSON. The print
//! loader also accepts a bare JSON array of questions.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use wb_core::file_io::{load_question_set, save_question_set};
//! use wb_core::question_set::{QuestionSet, SheetSettings};
//! use std::path::Path;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(1);
//! let set = QuestionSet::generate("Practice", SheetSettings::default(), &mut rng)?;
//! let path = Path::new("practice.wbq");
//!
//! save_question_set(&set, path)?;
//! let loaded = load_question_set(path)?;
//! assert_eq!(loaded.questions.len(), set.questions.len());
//! # Ok::<(), wb_core::errors::WbError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::errors::{WbError, WbResult};
use crate::question_set::{QuestionSet, SCHEMA_VERSION};
use crate::questions::Question;

/// Extension used for saved question sets
pub const QUESTION_SET_EXTENSION: &str = "wbq";

/// Save a question set with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk
/// 4. Rename over the target
pub fn save_question_set(set: &QuestionSet, path: &Path) -> WbResult<()> {
    let json = serde_json::to_string_pretty(set).map_err(|e| WbError::SerializationError {
        reason: e.to_string(),
    })?;
    write_atomic(path, json.as_bytes())
}

/// Write bytes to `path` through a synced temporary file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> WbResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        WbError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents).map_err(|e| {
        WbError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        WbError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        WbError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    path.with_extension(extension)
}

fn read_to_string(path: &Path) -> WbResult<String> {
    let mut file = File::open(path).map_err(|e| WbError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| WbError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Load a question set from a file.
///
/// # Returns
///
/// * `Err(WbError::VersionMismatch)` - file written by an incompatible schema
/// * `Err(WbError::SerializationError)` - invalid JSON
/// * `Err(WbError::FileError)` - I/O error
pub fn load_question_set(path: &Path) -> WbResult<QuestionSet> {
    let contents = read_to_string(path)?;

    let set: QuestionSet = serde_json::from_str(&contents).map_err(|e| WbError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&set.version)?;

    Ok(set)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HandOff {
    Set(QuestionSet),
    Questions(Vec<Question>),
}

/// Questions to print from a hand-off file.
///
/// Never fails: a missing file, unreadable JSON or an incompatible version
/// logs a warning and yields no questions.
pub fn load_for_print(path: &Path) -> Vec<Question> {
    let contents = match read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "no questions to print");
            return Vec::new();
        }
    };

    match serde_json::from_str::<HandOff>(&contents) {
        Ok(HandOff::Set(set)) => match validate_version(&set.version) {
            Ok(()) => set.questions,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring question set");
                Vec::new()
            }
        },
        Ok(HandOff::Questions(questions)) => questions,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed question data");
            Vec::new()
        }
    }
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> WbResult<()> {
    let mismatch = || WbError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // 0.x: a newer minor may have broken the format
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question_set::SheetSettings;
    use crate::questions::QuestionType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_set_path(name: &str) -> PathBuf {
        temp_dir().join(format!("wb_core_test_{}_{}.wbq", name, std::process::id()))
    }

    fn sample_set() -> QuestionSet {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let settings = SheetSettings::new(vec![QuestionType::PercentMac, QuestionType::Ballast], 1);
        QuestionSet::generate("Sample", settings, &mut rng).unwrap()
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(tmp_path_for(Path::new("/a/set.wbq")), Path::new("/a/set.wbq.tmp"));
        assert_eq!(tmp_path_for(Path::new("/a/set")), Path::new("/a/set.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_set_path("roundtrip");
        let set = sample_set();
        save_question_set(&set, &path).unwrap();

        let loaded = load_question_set(&path).unwrap();
        assert_eq!(loaded.id, set.id);
        assert_eq!(loaded.questions.len(), 2);
        assert_eq!(loaded.questions[1].question_type, QuestionType::Ballast);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_set_path("atomic");
        save_question_set(&sample_set(), &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_set_path("newer");
        let mut set = sample_set();
        set.version = "0.9.0".to_string();
        save_question_set(&set, &path).unwrap();

        let err = load_question_set(&path).unwrap_err();
        assert!(matches!(err, WbError::VersionMismatch { .. }));
        assert!(load_for_print(&path).is_empty());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_load_for_print_missing_file() {
        assert!(load_for_print(&temp_set_path("does_not_exist")).is_empty());
    }

    #[test]
    fn test_load_for_print_malformed() {
        let path = temp_set_path("malformed");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_for_print(&path).is_empty());
        fs::write(&path, "{\"questions\": 3}").unwrap();
        assert!(load_for_print(&path).is_empty());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_for_print_accepts_bare_array() {
        let path = temp_set_path("bare");
        let set = sample_set();
        let json = serde_json::to_string(&set.questions).unwrap();
        write_atomic(&path, json.as_bytes()).unwrap();

        let questions = load_for_print(&path);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id, set.questions[0].id);

        let _ = fs::remove_file(&path);
    }
}
