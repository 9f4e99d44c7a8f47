//! Errors of a generation run.

use specgen_compiler::{SpecializeError, TemplateError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::summary::RunSummary;

pub type Result<T> = std::result::Result<T, GenerateError>;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to delete {}: {source}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Two instantiations map to the same output path.
    #[error("{} is produced by both {first} and {second}", path.display())]
    DuplicateOutput {
        path: PathBuf,
        first: String,
        second: String,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("{} [{instantiation}]: {source}", template.display())]
    Specialize {
        template: PathBuf,
        instantiation: String,
        #[source]
        source: SpecializeError,
    },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Errors collected over a whole run. Writes and orphan cleanup completed
    /// before this was returned.
    #[error("{} error(s) during generation:\n{}", errors.len(), list(errors))]
    Failed {
        errors: Vec<GenerateError>,
        summary: Box<RunSummary>,
    },
}

impl GenerateError {
    /// The summary of a run that completed with errors.
    pub fn summary(&self) -> Option<&RunSummary> {
        match self {
            GenerateError::Failed { summary, .. } => Some(summary),
            _ => None,
        }
    }
}

fn list(errors: &[GenerateError]) -> String {
    errors
        .iter()
        .map(|e| format!("  {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use specgen_core::Span;

    #[test]
    fn specialize_error_names_template_and_binding() {
        let err = GenerateError::Specialize {
            template: PathBuf::from("KTypeVTypeHashMap.java"),
            instantiation: "Int, Long".to_string(),
            source: SpecializeError::AmbiguousIntrinsic {
                call: "Intrinsics.empty()".to_string(),
                span: Span::new(12, 9, 10),
            },
        };
        let text = err.to_string();
        assert!(text.starts_with("KTypeVTypeHashMap.java [Int, Long]: at 12:9"));
        assert!(text.contains("Intrinsics.empty()"));
    }

    #[test]
    fn failed_lists_every_error() {
        let err = GenerateError::Failed {
            errors: vec![
                GenerateError::DuplicateOutput {
                    path: PathBuf::from("out/IntList.java"),
                    first: "KTypeList.java [Int]".to_string(),
                    second: "KTypeVTypeList.java [Int, Object]".to_string(),
                },
                GenerateError::Read {
                    path: PathBuf::from("KTypeSet.java"),
                    source: io::Error::new(io::ErrorKind::NotFound, "gone"),
                },
            ],
            summary: Box::default(),
        };
        let text = err.to_string();
        assert!(text.starts_with("2 error(s) during generation:\n"));
        assert!(text.contains("  out/IntList.java is produced by both"));
        assert!(text.contains("  failed to read KTypeSet.java: gone"));
        assert!(err.summary().is_some());
    }
}
