//! Batch orchestration for Curricula: directory → collection → artifacts.
//!
//! - [`pipeline`] — walk a source directory, extract every document, and
//!   accumulate a [`curricula_shared::CurriculumCollection`]
//! - [`assembler`] — write one directory's artifact set with a manifest
//! - [`combine`] — merge per-directory results into combined artifacts and
//!   cross-program summary tables

pub mod assembler;
pub mod combine;
pub mod pipeline;

pub use assembler::{AssembleConfig, AssembleResult, assemble, validate_output};
pub use combine::{CombinedArtifacts, combine, write_combined};
pub use pipeline::{
    ProcessDirConfig, ProcessDirResult, ProgressReporter, SilentProgress, process_directory,
};
