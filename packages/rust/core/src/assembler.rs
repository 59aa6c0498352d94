//! Artifact assembler.
//!
//! Takes one directory's processed collection and writes its artifact set
//! to disk, then records a manifest with artifact checksums.
//!
//! Layout:
//! ```text
//! <output_root>/<directory>/
//! ├── curriculum_data.json      (JSON contract)
//! ├── curriculum_courses.csv    (course rows)
//! ├── curriculum_for_llm.md     (narrative)
//! └── manifest.json             (run metadata + checksums)
//! ```

use std::path::{Path, PathBuf};

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use curricula_shared::{
    ArtifactMeta, CURRENT_SCHEMA_VERSION, CurriculaError, Result, RunId, RunManifest,
};

use crate::pipeline::ProcessDirResult;

/// JSON artifact filename.
pub const DATA_JSON: &str = "curriculum_data.json";
/// Course CSV artifact filename.
pub const COURSES_CSV: &str = "curriculum_courses.csv";
/// Narrative markdown artifact filename.
pub const NARRATIVE_MD: &str = "curriculum_for_llm.md";
/// Manifest filename.
pub const MANIFEST_JSON: &str = "manifest.json";

/// Configuration for artifact assembly.
#[derive(Debug, Clone)]
pub struct AssembleConfig {
    /// Root directory for artifact output.
    pub output_root: PathBuf,
    /// Tool version string recorded in the manifest.
    pub tool_version: String,
}

/// Output from a successful assembly.
#[derive(Debug, Clone)]
pub struct AssembleResult {
    /// Absolute path to the artifact directory.
    pub out_dir: PathBuf,
    /// The manifest that was written.
    pub manifest: RunManifest,
}

/// Render and write one directory's artifact set.
#[instrument(skip_all, fields(directory = %result.directory))]
pub fn assemble(config: &AssembleConfig, result: &ProcessDirResult) -> Result<AssembleResult> {
    let out_dir = config.output_root.join(&result.directory);
    std::fs::create_dir_all(&out_dir).map_err(|e| CurriculaError::io(&out_dir, e))?;

    let json = curricula_artifacts::collection_json(&result.collection)?;
    let rows = curricula_artifacts::collection_rows(&result.directory, &result.collection);
    let courses_csv = curricula_artifacts::rows_to_csv(&rows)?;
    let narrative = curricula_artifacts::render_collection(&result.directory, &result.collection);

    let artifacts: Vec<(&str, &str)> = vec![
        (DATA_JSON, &json),
        (COURSES_CSV, &courses_csv),
        (NARRATIVE_MD, &narrative),
    ];
    let metas = write_artifacts(&out_dir, &artifacts)?;

    let manifest = RunManifest {
        schema_version: CURRENT_SCHEMA_VERSION,
        id: RunId::new(),
        directory: result.directory.clone(),
        tool_version: config.tool_version.clone(),
        created_at: Utc::now(),
        document_count: result.documents_processed,
        program_count: result.collection.len(),
        artifacts: metas,
    };
    write_json(&out_dir.join(MANIFEST_JSON), &manifest)?;

    info!(
        path = %out_dir.display(),
        programs = manifest.program_count,
        "artifact assembly complete"
    );

    Ok(AssembleResult { out_dir, manifest })
}

/// Verify that an artifact directory is well-formed.
pub fn validate_output(out_dir: &Path) -> Result<()> {
    let manifest_path = out_dir.join(MANIFEST_JSON);
    if !manifest_path.exists() {
        return Err(CurriculaError::validation("missing manifest.json"));
    }

    let content = std::fs::read_to_string(&manifest_path)
        .map_err(|e| CurriculaError::io(&manifest_path, e))?;
    let manifest: RunManifest = serde_json::from_str(&content)
        .map_err(|e| CurriculaError::validation(format!("invalid manifest.json: {e}")))?;

    if manifest.schema_version != CURRENT_SCHEMA_VERSION {
        return Err(CurriculaError::validation(format!(
            "unsupported schema_version: {} (expected {})",
            manifest.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }

    for meta in &manifest.artifacts {
        if !out_dir.join(&meta.filename).exists() {
            return Err(CurriculaError::validation(format!(
                "manifest lists missing artifact: {}",
                meta.filename
            )));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Write artifact files and return their checksums.
///
/// Each entry is a `(filename, content)` pair. Files are written atomically:
/// to a temp file first, then renamed over the target.
pub(crate) fn write_artifacts(
    dir: &Path,
    artifacts: &[(&str, &str)],
) -> Result<Vec<ArtifactMeta>> {
    let mut metas = Vec::with_capacity(artifacts.len());

    for (filename, content) in artifacts {
        let target = dir.join(filename);
        let temp = dir.join(format!(".{filename}.tmp"));

        std::fs::write(&temp, content).map_err(|e| CurriculaError::io(&temp, e))?;
        std::fs::rename(&temp, &target).map_err(|e| CurriculaError::io(&target, e))?;

        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        let hash = format!("{:x}", hasher.finalize());

        debug!(file = %filename, size = content.len(), "wrote artifact");

        metas.push(ArtifactMeta {
            filename: (*filename).to_string(),
            sha256: hash,
            size_bytes: content.len(),
        });
    }

    Ok(metas)
}

/// Write a JSON file (pretty-printed).
pub(crate) fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| CurriculaError::validation(format!("JSON serialization failed: {e}")))?;
    std::fs::write(path, json).map_err(|e| CurriculaError::io(path, e))?;
    debug!(path = %path.display(), "wrote JSON file");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ProcessDirResult;
    use curricula_shared::{
        CourseRecord, CurriculumCollection, CurriculumDocument, ProgramInfo, Semesters,
    };

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "curricula-assembler-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn make_result() -> ProcessDirResult {
        let mut semesters = Semesters::new();
        semesters.push(
            "1",
            vec![CourseRecord {
                number: Some("1".into()),
                name: "Математика".into(),
                credits: 4,
                hours: 144,
            }],
        );

        let mut collection = CurriculumCollection::new();
        collection.insert(
            "Искусственный интеллект",
            CurriculumDocument {
                program_info: ProgramInfo {
                    name: Some("Искусственный интеллект".into()),
                    ..Default::default()
                },
                semesters,
            },
        );

        ProcessDirResult {
            directory: "pdf_curriculum_ai".into(),
            collection,
            documents_processed: 1,
            documents_failed: 0,
        }
    }

    #[test]
    fn assemble_writes_artifact_set_and_manifest() {
        let tmp = temp_dir();
        let config = AssembleConfig {
            output_root: tmp.clone(),
            tool_version: "0.1.0-test".into(),
        };

        let assembled = assemble(&config, &make_result()).unwrap();

        assert!(assembled.out_dir.join(DATA_JSON).exists());
        assert!(assembled.out_dir.join(COURSES_CSV).exists());
        assert!(assembled.out_dir.join(NARRATIVE_MD).exists());
        assert!(assembled.out_dir.join(MANIFEST_JSON).exists());

        assert_eq!(assembled.manifest.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(assembled.manifest.program_count, 1);
        assert_eq!(assembled.manifest.artifacts.len(), 3);
        assert!(assembled.manifest.artifacts.iter().all(|a| a.sha256.len() == 64));

        let json = std::fs::read_to_string(assembled.out_dir.join(DATA_JSON)).unwrap();
        assert!(json.contains("Искусственный интеллект"));
        assert!(json.contains("Математика"));

        let csv = std::fs::read_to_string(assembled.out_dir.join(COURSES_CSV)).unwrap();
        assert!(csv.starts_with("Directory,Program,Semester,Course Name,Credits,Hours"));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn assemble_leaves_no_temp_files() {
        let tmp = temp_dir();
        let config = AssembleConfig {
            output_root: tmp.clone(),
            tool_version: "0.1.0-test".into(),
        };

        let assembled = assemble(&config, &make_result()).unwrap();

        for entry in std::fs::read_dir(&assembled.out_dir).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.ends_with(".tmp"), "temp file left behind: {name}");
        }

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn assemble_is_repeatable() {
        let tmp = temp_dir();
        let config = AssembleConfig {
            output_root: tmp.clone(),
            tool_version: "0.1.0-test".into(),
        };
        let result = make_result();

        let first = assemble(&config, &result).unwrap();
        let second = assemble(&config, &result).unwrap();

        // Overwrites cleanly, and the data artifacts are byte-identical.
        assert_eq!(
            first.manifest.artifacts.iter().map(|a| &a.sha256).collect::<Vec<_>>(),
            second.manifest.artifacts.iter().map(|a| &a.sha256).collect::<Vec<_>>()
        );

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn validate_output_accepts_assembled_dir() {
        let tmp = temp_dir();
        let config = AssembleConfig {
            output_root: tmp.clone(),
            tool_version: "0.1.0-test".into(),
        };
        let assembled = assemble(&config, &make_result()).unwrap();

        assert!(validate_output(&assembled.out_dir).is_ok());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn validate_output_missing_manifest() {
        let tmp = temp_dir();
        let err = validate_output(&tmp).unwrap_err();
        assert!(err.to_string().contains("missing manifest.json"));

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
