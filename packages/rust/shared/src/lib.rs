//! Shared types, error model, and configuration for Curricula.
//!
//! This crate is the foundation depended on by all other Curricula crates.
//! It provides:
//! - [`CurriculaError`] — the unified error type
//! - Domain types ([`CurriculumDocument`], [`CurriculumCollection`],
//!   [`CourseRecord`], [`ProgramInfo`], [`Semesters`], [`RunManifest`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, DirectoryEntry, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{CurriculaError, Result};
pub use types::{
    ArtifactMeta, CURRENT_SCHEMA_VERSION, CourseRecord, CurriculumCollection, CurriculumDocument,
    ProgramInfo, RunId, RunManifest, Semesters, derive_program_key,
};
